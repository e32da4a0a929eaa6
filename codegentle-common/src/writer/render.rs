use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use super::{CodeWriter, WriteStrategy};
use crate::{
    config::EmitConfig,
    error::Result,
    line_wrapper::NullSink,
    naming::{ClassName, PackageName},
};

/// Render a file in two passes.
///
/// The first pass runs `emit` against a discarding sink to collect import
/// candidates; the second pass runs it again into `out` with those imports
/// already in the writer's import table. Returns the imports used.
pub fn render_file<F>(
    strategy: &dyn WriteStrategy,
    config: &EmitConfig,
    package: &PackageName,
    out: &mut dyn fmt::Write,
    emit: F,
) -> Result<IndexMap<String, ClassName>>
where
    F: Fn(&mut CodeWriter<'_>) -> Result<()>,
{
    debug!(package = %package, dialect = %strategy.dialect(), "rendering file");

    let mut sink = NullSink;
    let imports = {
        let mut collector = CodeWriter::new(strategy, &mut sink, config);
        collector.set_package(package.clone());
        emit(&mut collector)?;
        collector.suggested_imports()
    };

    let mut writer = CodeWriter::new(strategy, out, config).with_imported_types(imports.clone());
    writer.set_package(package.clone());
    emit(&mut writer)?;
    writer.close()?;

    debug!(package = %package, imports = imports.len(), "rendered file");
    Ok(imports)
}

/// Render a fragment with a fresh writer and no package.
///
/// Only implicitly visible classes are shortened; everything else stays
/// fully qualified since a fragment has no import block.
pub fn render_standalone<F>(strategy: &dyn WriteStrategy, emit: F) -> Result<String>
where
    F: Fn(&mut CodeWriter<'_>) -> Result<()>,
{
    render_standalone_with(strategy, &EmitConfig::default(), emit)
}

/// [`render_standalone`] under an explicit `config`.
pub fn render_standalone_with<F>(
    strategy: &dyn WriteStrategy,
    config: &EmitConfig,
    emit: F,
) -> Result<String>
where
    F: Fn(&mut CodeWriter<'_>) -> Result<()>,
{
    let mut sink = NullSink;
    let imports = {
        let mut collector = CodeWriter::new(strategy, &mut sink, config);
        emit(&mut collector)?;
        collector.implicit_suggested_imports()
    };

    let mut out = String::new();
    {
        let mut writer = CodeWriter::new(strategy, &mut out, config).with_imported_types(imports);
        emit(&mut writer)?;
        writer.close()?;
    }
    Ok(out)
}
