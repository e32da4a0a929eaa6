//! Declarations shared by the snapshot and compile tests.

use codegentle_common::{
    ClassName,
    code::{CodePart, CodeValue},
    naming::{TypeName, TypeVariableName},
};
use codegentle_java::{
    FieldSpec, JavaFile, JavaModifier, MethodSpec, ParameterSpec, TypeSpec, types,
};

pub fn hello_world() -> JavaFile {
    let main = MethodSpec::builder("main")
        .add_modifiers([JavaModifier::Public, JavaModifier::Static])
        .add_parameter_of(TypeName::array_of(types::string()), "args")
        .unwrap()
        .add_statement(
            "%V.out.println(%V)",
            [
                CodePart::type_name(types::lang_class("System")),
                CodePart::string("Hello, JavaPoet!"),
            ],
        )
        .unwrap()
        .build()
        .unwrap();
    let class = TypeSpec::class_builder("HelloWorld")
        .add_modifiers([JavaModifier::Public, JavaModifier::Final])
        .add_method(main)
        .build()
        .unwrap();
    JavaFile::builder("com.example.helloworld", class)
        .build()
        .unwrap()
}

pub fn repository() -> JavaFile {
    let entity = TypeVariableName::new("T");
    let uuid = ClassName::new("java.util", "UUID");
    let optional = TypeName::parameterized(
        ClassName::new("java.util", "Optional"),
        [entity.clone().into()],
    );
    let list = TypeName::parameterized(ClassName::new("java.util", "List"), [entity.clone().into()]);

    let find_by_id = MethodSpec::builder("findById")
        .returns(optional)
        .add_parameter_of(uuid.clone(), "id")
        .unwrap()
        .build()
        .unwrap();
    let find_all = MethodSpec::builder("findAll").returns(list).build().unwrap();
    let exists = MethodSpec::builder("exists")
        .add_modifiers([JavaModifier::Default])
        .returns(types::BOOLEAN)
        .add_parameter_of(uuid, "id")
        .unwrap()
        .add_statement("return findById(id).isPresent()", [])
        .unwrap()
        .build()
        .unwrap();

    let interface = TypeSpec::interface_builder("Repository")
        .add_javadoc("Stores entities by id.\n")
        .add_modifiers([JavaModifier::Public])
        .add_type_variable(entity)
        .add_method(find_by_id)
        .add_method(find_all)
        .add_method(exists)
        .build()
        .unwrap();
    JavaFile::builder("com.example.data", interface)
        .build()
        .unwrap()
}

pub fn planet() -> JavaFile {
    let field = |name: &str| {
        FieldSpec::builder(types::DOUBLE, name)
            .add_modifiers([JavaModifier::Private, JavaModifier::Final])
            .build()
            .unwrap()
    };
    let constant = |arguments: &str| {
        TypeSpec::anonymous_class_builder(arguments)
            .build()
            .unwrap()
    };

    let constructor = MethodSpec::constructor_builder()
        .add_parameter_of(types::DOUBLE, "mass")
        .unwrap()
        .add_parameter_of(types::DOUBLE, "radius")
        .unwrap()
        .add_statement("this.mass = mass", [])
        .unwrap()
        .add_statement("this.radius = radius", [])
        .unwrap()
        .build()
        .unwrap();
    let gravity = MethodSpec::builder("surfaceGravity")
        .add_modifiers([JavaModifier::Public])
        .returns(types::DOUBLE)
        .add_statement("return mass / (radius * radius)", [])
        .unwrap()
        .build()
        .unwrap();

    let planet = TypeSpec::enum_builder("Planet")
        .add_modifiers([JavaModifier::Public])
        .add_enum_constant_with("MERCURY", constant("3.303e+23, 2.4397e6"))
        .add_enum_constant_with("EARTH", constant("5.976e+24, 6.37814e6"))
        .add_field(field("mass"))
        .add_field(field("radius"))
        .add_method(constructor)
        .add_method(gravity)
        .build()
        .unwrap();
    JavaFile::builder("com.example.space", planet)
        .build()
        .unwrap()
}

pub fn shapes() -> JavaFile {
    let shape = ClassName::new("com.example.shapes", "Shape");
    let math = ClassName::new("java.lang", "Math");

    let record = |name: &str, component: &str, area: CodeValue| {
        let area = MethodSpec::builder("area")
            .add_modifiers([JavaModifier::Public])
            .returns(types::DOUBLE)
            .add_code(&area)
            .build()
            .unwrap();
        TypeSpec::record_builder(name)
            .add_modifiers([JavaModifier::Public])
            .add_record_component(ParameterSpec::of(types::DOUBLE, component).unwrap())
            .add_superinterface(shape.clone())
            .add_method(area)
            .build()
            .unwrap()
    };

    let circle_area = CodeValue::builder()
        .add_statement("return %V.PI * radius * radius", [CodePart::type_name(math.clone())])
        .unwrap()
        .build();
    let square_area = CodeValue::builder()
        .add_statement("return side * side", [])
        .unwrap()
        .build();

    let interface = TypeSpec::interface_builder("Shape")
        .add_modifiers([JavaModifier::Public, JavaModifier::Sealed])
        .add_permitted_subclass(shape.nested_class("Circle"))
        .add_permitted_subclass(shape.nested_class("Square"))
        .add_method(MethodSpec::builder("area").returns(types::DOUBLE).build().unwrap())
        .add_type(record("Circle", "radius", circle_area))
        .add_type(record("Square", "side", square_area))
        .build()
        .unwrap();
    JavaFile::builder("com.example.shapes", interface)
        .add_static_import(&math, "PI")
        .build()
        .unwrap()
}

pub fn sorting() -> JavaFile {
    let strings = TypeName::parameterized(ClassName::new("java.util", "List"), [types::string().into()]);
    let comparator = TypeName::parameterized(
        ClassName::new("java.util", "Comparator"),
        [types::string().into()],
    );

    let compare = MethodSpec::builder("compare")
        .add_annotation(types::lang_class("Override"))
        .add_modifiers([JavaModifier::Public])
        .returns(types::INT)
        .add_parameter_of(types::string(), "a")
        .unwrap()
        .add_parameter_of(types::string(), "b")
        .unwrap()
        .add_statement("return a.length() - b.length()", [])
        .unwrap()
        .build()
        .unwrap();
    let by_length = TypeSpec::anonymous_class_builder("")
        .add_superinterface(comparator)
        .add_method(compare)
        .build()
        .unwrap();

    let sort = MethodSpec::builder("sortByLength")
        .add_parameter_of(strings, "strings")
        .unwrap()
        .add_statement(
            "%V.sort(%V, %V)",
            [
                CodePart::type_name(ClassName::new("java.util", "Collections")),
                CodePart::simple("strings"),
                CodePart::literal(by_length),
            ],
        )
        .unwrap()
        .build()
        .unwrap();

    let class = TypeSpec::class_builder("Sorting").add_method(sort).build().unwrap();
    JavaFile::builder("com.example", class).build().unwrap()
}
