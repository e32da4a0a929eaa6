//! Declarations shared by the snapshot and compile tests.

use codegentle_common::{
    ClassName,
    code::{CodePart, CodeValue},
    naming::{TypeName, TypeRef, TypeVariableName},
};
use codegentle_kotlin::{
    KotlinFile, KotlinFunctionSpec, KotlinModifier, KotlinParameterSpec, KotlinPropertySpec,
    KotlinTypeSpec, Mutability, types,
};

fn val(name: &str, type_ref: impl Into<TypeRef>) -> KotlinParameterSpec {
    KotlinParameterSpec::builder(name, type_ref)
        .property(Mutability::Val)
        .build()
        .unwrap()
}

pub fn hello_world() -> KotlinFile {
    let main = KotlinFunctionSpec::builder("main")
        .add_statement("println(%V)", [CodePart::string("Hello, KotlinPoet!")])
        .unwrap()
        .build()
        .unwrap();
    KotlinFile::builder("com.example.hello", "Hello")
        .add_function(main)
        .build()
        .unwrap()
}

pub fn geometry() -> KotlinFile {
    let shape = ClassName::new("com.example.geometry", "Shape");
    let math = ClassName::new("java.lang", "Math");

    let area = |getter: CodeValue| {
        KotlinPropertySpec::builder("area", types::double())
            .add_modifiers([KotlinModifier::Override])
            .getter(getter)
            .build()
            .unwrap()
    };

    let interface = KotlinTypeSpec::interface_builder("Shape")
        .add_modifiers([KotlinModifier::Sealed])
        .add_property(KotlinPropertySpec::builder("area", types::double()).build().unwrap())
        .add_function(
            KotlinFunctionSpec::builder("describe")
                .returns(types::string())
                .expression_body("\"${this::class.simpleName} with area $area\"")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let circle = KotlinTypeSpec::class_builder("Circle")
        .add_modifiers([KotlinModifier::Data])
        .add_constructor_parameter(val("radius", types::double()))
        .add_superinterface(shape.clone())
        .add_property(area(CodeValue::from_parts([
            CodePart::type_name(math.clone()),
            CodePart::simple(".PI * radius * radius"),
        ])))
        .build()
        .unwrap();
    let square = KotlinTypeSpec::class_builder("Square")
        .add_modifiers([KotlinModifier::Data])
        .add_constructor_parameter(val("side", types::double()))
        .add_superinterface(shape)
        .add_property(area(CodeValue::simple("side * side")))
        .build()
        .unwrap();

    KotlinFile::builder("com.example.geometry", "Shapes")
        .add_static_import(&math, "PI")
        .add_type(interface)
        .add_type(circle)
        .add_type(square)
        .build()
        .unwrap()
}

pub fn repository() -> KotlinFile {
    let entity = TypeVariableName::new("T").with_bound(types::any());
    let t = || TypeRef::from(TypeVariableName::new("T"));
    let uuid = ClassName::new("java.util", "UUID");

    let find_by_id = KotlinFunctionSpec::builder("findById")
        .add_parameter_of("id", uuid.clone())
        .unwrap()
        .returns(t().nullable())
        .build()
        .unwrap();
    let find_all = KotlinFunctionSpec::builder("findAll")
        .returns(TypeName::parameterized(types::list(), [t()]))
        .build()
        .unwrap();
    let exists = KotlinFunctionSpec::builder("exists")
        .add_parameter_of("id", uuid)
        .unwrap()
        .returns(types::boolean())
        .expression_body("findById(id) != null")
        .build()
        .unwrap();

    let repository = KotlinTypeSpec::interface_builder("Repository")
        .add_type_variable(entity)
        .add_function(find_by_id)
        .add_function(find_all)
        .add_function(exists)
        .build()
        .unwrap();
    KotlinFile::builder("com.example.data", "Repository")
        .add_type(repository)
        .build()
        .unwrap()
}

pub fn planet() -> KotlinFile {
    let constant = |mass: &str, radius: &str| {
        KotlinTypeSpec::anonymous_object_builder()
            .superclass_arguments(format!("{mass}, {radius}"))
            .build()
            .unwrap()
    };
    let companion = KotlinTypeSpec::companion_object_builder(None)
        .add_property(
            KotlinPropertySpec::builder("G", types::double())
                .add_modifiers([KotlinModifier::Const])
                .initializer("6.67300E-11")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let planet = KotlinTypeSpec::enum_builder("Planet")
        .add_constructor_parameter(val("mass", types::double()))
        .add_constructor_parameter(val("radius", types::double()))
        .add_enum_constant_with("MERCURY", constant("3.303e+23", "2.4397e6"))
        .add_enum_constant_with("VENUS", constant("4.869e+24", "6.0518e6"))
        .add_enum_constant_with("EARTH", constant("5.976e+24", "6.37814e6"))
        .add_property(
            KotlinPropertySpec::builder("surfaceGravity", types::double())
                .getter("G * mass / (radius * radius)")
                .build()
                .unwrap(),
        )
        .add_type(companion)
        .build()
        .unwrap();
    KotlinFile::builder("com.example.space", "Planet")
        .add_type(planet)
        .build()
        .unwrap()
}

pub fn sorting() -> KotlinFile {
    let comparator = TypeName::parameterized(
        types::kotlin_class("Comparator"),
        [types::string().into()],
    );
    let compare = KotlinFunctionSpec::builder("compare")
        .add_modifiers([KotlinModifier::Override])
        .add_parameter_of("a", types::string())
        .unwrap()
        .add_parameter_of("b", types::string())
        .unwrap()
        .returns(types::int())
        .expression_body("a.length - b.length")
        .build()
        .unwrap();
    let by_length = KotlinTypeSpec::anonymous_object_builder()
        .add_superinterface(comparator.clone())
        .add_function(compare)
        .build()
        .unwrap();
    let by_length = KotlinFunctionSpec::builder("byLength")
        .returns(comparator)
        .expression_body(CodeValue::from_parts([CodePart::literal(by_length)]))
        .build()
        .unwrap();

    let t = TypeName::type_variable("T");
    let comparable = TypeName::parameterized(types::kotlin_class("Comparable"), [t.clone().into()]);
    let sorted_copy = KotlinFunctionSpec::builder("sortedCopy")
        .add_type_variable(TypeVariableName::new("T").with_bound(comparable))
        .add_parameter(
            KotlinParameterSpec::builder("items", t.clone())
                .add_modifiers([KotlinModifier::Vararg])
                .build()
                .unwrap(),
        )
        .add_parameter(
            KotlinParameterSpec::builder("descending", types::boolean())
                .default_value("false")
                .build()
                .unwrap(),
        )
        .returns(TypeName::parameterized(types::list(), [t.into()]))
        .add_statement("val sorted = items.sorted()", [])
        .unwrap()
        .add_statement("return if (descending) sorted.reversed() else sorted", [])
        .unwrap()
        .build()
        .unwrap();

    KotlinFile::builder("com.example.sorting", "Sorting")
        .add_function(by_length)
        .add_function(sorted_copy)
        .build()
        .unwrap()
}

pub fn config() -> KotlinFile {
    let duration = ClassName::new("java.time", "Duration");
    let port = KotlinPropertySpec::builder("DEFAULT_PORT", types::int())
        .add_modifiers([KotlinModifier::Const])
        .initializer("8080")
        .build()
        .unwrap();
    let defaults = KotlinTypeSpec::object_builder("Defaults")
        .add_property(
            KotlinPropertySpec::builder("timeout", duration.clone())
                .initializer(CodeValue::from_parts([
                    CodePart::type_name(duration),
                    CodePart::simple(".ofSeconds(30)"),
                ]))
                .build()
                .unwrap(),
        )
        .add_function(
            KotlinFunctionSpec::builder("describe")
                .returns(types::string())
                .expression_body("\"port=$DEFAULT_PORT timeout=$timeout\"")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    KotlinFile::builder("com.example.config", "Defaults")
        .add_file_comment("Generated code. Do not edit.")
        .add_property(port)
        .add_type(defaults)
        .build()
        .unwrap()
}
