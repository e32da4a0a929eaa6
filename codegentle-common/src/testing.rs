//! Test utilities for generated sources.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Result, eyre};

/// Error from compile checking.
#[derive(Debug)]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CompileError {}

/// Trait for verifying generated code compiles.
pub trait CompileChecker {
    /// Whether the compiler can be run on this machine.
    fn is_available(&self) -> bool;

    /// Check that the sources in the given directory compile.
    fn check(&self, dir: &Path) -> Result<(), CompileError>;
}

/// Java compile checker using `javac`.
pub struct JavacChecker;

impl CompileChecker for JavacChecker {
    fn is_available(&self) -> bool {
        probe("javac", "-version")
    }

    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        let sources = sources_with_extension(dir, "java");
        let classes = dir.join("classes");
        let mut command = Command::new("javac");
        command.arg("-d").arg(&classes).args(&sources);
        run(command, "javac")
    }
}

/// Kotlin compile checker using `kotlinc`.
pub struct KotlincChecker;

impl CompileChecker for KotlincChecker {
    fn is_available(&self) -> bool {
        probe("kotlinc", "-version")
    }

    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        let sources = sources_with_extension(dir, "kt");
        let classes = dir.join("classes");
        let mut command = Command::new("kotlinc");
        command.args(&sources).arg("-d").arg(&classes);
        run(command, "kotlinc")
    }
}

fn probe(program: &str, version_flag: &str) -> bool {
    Command::new(program)
        .arg(version_flag)
        .output()
        .is_ok_and(|output| output.status.success())
}

fn run(mut command: Command, name: &str) -> Result<(), CompileError> {
    let output = command.output().map_err(|e| CompileError {
        message: format!("Failed to run {}: {}", name, e),
        output: String::new(),
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Err(CompileError {
            message: format!("{} failed", name),
            output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
        })
    }
}

/// Every file below `dir` with the given extension, sorted.
pub fn sources_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == extension) {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {:?}\n", exp));
                diff.push_str(&format!("  actual:   {:?}\n", act));
            }
        }

        if diff.is_empty() {
            diff.push_str("  (difference in trailing newlines)\n");
        }
        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate sources into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Run a generator and check that its output compiles.
pub fn assert_generates_valid_code<C>(
    generate: impl FnOnce(&Path) -> Result<()>,
    checker: &C,
) -> Result<()>
where
    C: CompileChecker,
{
    let temp_dir = generate_to_temp(generate)?;

    checker.check(temp_dir.path()).map_err(|e| {
        eprintln!("Generated files in {}:", temp_dir.path().display());
        for source in sources_with_extension(temp_dir.path(), "java")
            .into_iter()
            .chain(sources_with_extension(temp_dir.path(), "kt"))
        {
            eprintln!("  {}", source.display());
        }
        eyre!("Compile check failed: {}", e)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_with_extension_recurses() {
        let temp = generate_to_temp(|dir| {
            std::fs::create_dir_all(dir.join("a/b"))?;
            std::fs::write(dir.join("a/b/One.java"), "")?;
            std::fs::write(dir.join("a/Two.java"), "")?;
            std::fs::write(dir.join("a/Three.kt"), "")?;
            Ok(())
        })
        .unwrap();

        let java = sources_with_extension(temp.path(), "java");
        assert_eq!(java.len(), 2);
        assert!(java.iter().all(|p| p.extension().unwrap() == "java"));
        assert_eq!(sources_with_extension(temp.path(), "kt").len(), 1);
    }

    #[test]
    fn test_assert_content_eq_passes_on_equal() {
        assert_content_eq("a\nb\n", "a\nb\n");
    }

    #[test]
    #[should_panic(expected = "Line 2")]
    fn test_assert_content_eq_reports_line() {
        assert_content_eq("a\nb\n", "a\nc\n");
    }
}
