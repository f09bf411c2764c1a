use crate::*;
use pretty_assertions::assert_eq;

fn name(text: &str) -> QualifiedName {
    QualifiedName::parse(text).unwrap()
}

fn field_type(unit: &CompilationUnit, class: &str, field: &str) -> Option<JavaType> {
    unit.class_named(class)
        .unwrap()
        .fields()
        .flat_map(|declarations| declarations.variables())
        .find(|variable| variable.name.name == field)
        .and_then(|variable| variable.java_type.clone())
}

fn fqn(java_type: Option<JavaType>) -> Option<String> {
    java_type.and_then(|t| t.fully_qualified_name().map(|n| n.to_string()))
}

#[test]
fn test_nested_type_through_wildcard_import() {
    let a = "package a; public class A { public static class B {} }";
    let c = "import a.*; public class C { A.B b = new A.B(); }";

    let units = JavaParser::new().parse_with_dependencies(&[c], &[a]).unwrap();
    assert_eq!(units.len(), 1);
    let unit = &units[0];

    let b_type = field_type(unit, "C", "b").unwrap();
    let class = b_type.as_class().unwrap();
    assert_eq!(class.fully_qualified_name().to_string(), "a.A.B");
    assert_eq!(class.package_segments(), ["a"]);
    assert_eq!(class.class_name(), "A.B");

    let import = &unit.imports()[0];
    assert!(import.is_from_type("a.A.B").unwrap());
    assert!(import.is_from_type("a.A").unwrap());
    assert!(import.is_from_class(class));
}

#[test]
fn test_class_declarations_are_typed() {
    let unit = parse_compilation_unit(
        "package com.acme;\nclass Outer {\n    class Inner {\n        class Deepest {}\n    }\n}",
    )
    .unwrap();

    let outer = unit.class_named("Outer").unwrap();
    assert_eq!(fqn(outer.java_type.clone().map(JavaType::Class)), Some("com.acme.Outer".to_string()));

    let inner = outer.nested_classes().next().unwrap();
    let deepest = inner.nested_classes().next().unwrap();
    let deepest_type = deepest.java_type.clone().unwrap();
    assert_eq!(deepest_type.fully_qualified_name().to_string(), "com.acme.Outer.Inner.Deepest");
    assert_eq!(deepest_type.package_name(), Some(name("com.acme")));
    assert_eq!(
        deepest.name.java_type,
        Some(JavaType::Class(deepest_type.clone()))
    );
}

#[test]
fn test_single_type_import_resolution() {
    let unit = parse_compilation_unit(
        "import java.util.List;\nimport java.util.Map;\nclass A {\n    List<String> names;\n    Map.Entry<String, Integer> entry;\n    int[] counts;\n}",
    )
    .unwrap();

    match field_type(&unit, "A", "names") {
        Some(JavaType::Parameterized { class, arguments }) => {
            assert_eq!(class.fully_qualified_name().to_string(), "java.util.List");
            assert_eq!(
                arguments,
                vec![JavaType::Class(ClassType::new(name("java.lang.String"), 2))]
            );
        }
        other => panic!("Expected parameterized type, got: {:?}", other),
    }

    let entry = field_type(&unit, "A", "entry").unwrap();
    let entry = entry.as_class().unwrap();
    assert_eq!(entry.fully_qualified_name().to_string(), "java.util.Map.Entry");
    assert_eq!(entry.class_name(), "Map.Entry");

    assert_eq!(
        field_type(&unit, "A", "counts"),
        Some(JavaType::Array(Box::new(JavaType::Primitive(Primitive::Int))))
    );
}

#[test]
fn test_same_package_types_resolve_across_units() {
    let units = JavaParser::new()
        .parse_with_dependencies(
            &[
                "package p;\nclass First { Second other; }",
                "package p;\nclass Second { First other; }",
            ],
            &[] as &[&str],
        )
        .unwrap();

    assert_eq!(fqn(field_type(&units[0], "First", "other")), Some("p.Second".to_string()));
    assert_eq!(fqn(field_type(&units[1], "Second", "other")), Some("p.First".to_string()));
}

#[test]
fn test_enclosing_class_members_resolve() {
    let unit = parse_compilation_unit(
        "package p;\nclass Outer {\n    static class Node {}\n    class User { Node node; Outer owner; }\n}",
    )
    .unwrap();

    let user = unit
        .class_named("Outer")
        .unwrap()
        .nested_classes()
        .find(|c| c.name.name == "User")
        .unwrap();
    let types: Vec<Option<String>> = user
        .fields()
        .flat_map(|declarations| declarations.variables())
        .map(|v| fqn(v.java_type.clone()))
        .collect();

    assert_eq!(
        types,
        vec![Some("p.Outer.Node".to_string()), Some("p.Outer".to_string())]
    );
}

#[test]
fn test_implicit_java_lang() {
    let source = "class A { String s; Object o; Unknown u; }";

    let unit = parse_compilation_unit(source).unwrap();
    assert_eq!(fqn(field_type(&unit, "A", "s")), Some("java.lang.String".to_string()));
    assert_eq!(fqn(field_type(&unit, "A", "o")), Some("java.lang.Object".to_string()));
    assert_eq!(field_type(&unit, "A", "u"), None);

    let parser = JavaParser::with_config(ParserConfig {
        implicit_java_lang: false,
        ..ParserConfig::default()
    });
    let unit = parser.parse(source).unwrap();
    assert_eq!(field_type(&unit, "A", "s"), None);
}

#[test]
fn test_fully_qualified_references_use_naming_convention() {
    let unit = parse_compilation_unit("class A { java.util.Map.Entry e; }").unwrap();

    let entry = field_type(&unit, "A", "e").unwrap();
    let entry = entry.as_class().unwrap();
    assert_eq!(entry.package_segments(), ["java", "util"]);
    assert_eq!(entry.class_name(), "Map.Entry");
}

#[test]
fn test_expressions_are_typed() {
    let unit = parse_compilation_unit(
        "package p;\nclass A {\n    static int count;\n    Object f() {\n        return this;\n    }\n    int g() { return A.count + 1; }\n}",
    )
    .unwrap();
    let class = unit.class_named("A").unwrap();

    let this = class.method_named("f").unwrap().statements()[0]
        .as_return()
        .and_then(|ret| ret.expression.clone())
        .unwrap();
    assert_eq!(fqn(this.java_type()), Some("p.A".to_string()));

    let sum = class.method_named("g").unwrap().statements()[0]
        .as_return()
        .and_then(|ret| ret.expression.clone())
        .unwrap();
    match &*sum {
        Expression::Binary(binary) => {
            // `A` names the class; the field access itself stays untyped
            match &*binary.left {
                Expression::FieldAccess(access) => {
                    assert_eq!(fqn(access.target.java_type()), Some("p.A".to_string()));
                }
                other => panic!("Expected field access, got: {:?}", other),
            }
            assert_eq!(
                binary.right.java_type(),
                Some(JavaType::Primitive(Primitive::Int))
            );
        }
        other => panic!("Expected binary expression, got: {:?}", other),
    }
}

#[test]
fn test_annotations_are_typed() {
    let unit = parse_compilation_unit("class A {\n    @Override\n    public String toString() { return null; }\n}").unwrap();
    let method = unit.classes()[0].method_named("toString").unwrap();

    match &method.modifiers[0] {
        Modifier::Annotation(annotation) => {
            assert_eq!(
                fqn(annotation.java_type.clone()),
                Some("java.lang.Override".to_string())
            );
        }
        other => panic!("Expected annotation, got: {:?}", other),
    }
}

#[test]
fn test_type_index() {
    let unit = parse_compilation_unit(
        "package a;\nclass A { class B {} }\nclass Other {}",
    )
    .unwrap();
    let index = TypeIndex::from_units([&unit]);

    assert_eq!(index.len(), 3);
    assert!(index.contains(&name("a.A")));
    assert!(index.contains(&name("a.A.B")));
    assert!(index.contains(&name("a.Other")));
    assert_eq!(index.get(&name("a.A.B")).map(ClassType::class_name), Some("A.B".to_string()));
    assert!(!index.contains(&name("a.B")));
}

#[test]
fn test_resolve_in_unit() {
    let dependency = parse_compilation_unit("package lib;\npublic class Tool { public static class Part {} }").unwrap();
    let unit = parse_compilation_unit("import lib.Tool;\nclass A {}").unwrap();

    let index = TypeIndex::from_units([&dependency, &unit]);
    let attributor = Attributor::new(&index, true);

    let part = attributor.resolve_in(&unit, &name("Tool.Part")).unwrap();
    assert_eq!(part.fully_qualified_name().to_string(), "lib.Tool.Part");
    assert_eq!(part.package_segments(), ["lib"]);

    assert_eq!(attributor.resolve_in(&unit, &name("Missing")), None);
}

#[test]
fn test_attribution_preserves_source_text() {
    let input = "import java.util.List;\n\nclass A {\n    List < String > xs = new java.util.ArrayList<>( ) ;\n}\n";
    let unit = parse_compilation_unit(input).unwrap();
    assert_eq!(unit.print(), input);
}
