use crate::*;
use pretty_assertions::assert_eq;

#[test]
fn test_qualified_name_segments() {
    let name = QualifiedName::parse("java.util.Map.Entry").unwrap();

    assert_eq!(name.segment_count(), 4);
    assert_eq!(name.simple_name(), "Entry");
    assert_eq!(name.package_path(), ["java", "util", "Map"]);
    assert_eq!(name.conventional_package_len(), 2);
    assert_eq!(name.to_string(), "java.util.Map.Entry");
}

#[test]
fn test_qualified_name_single_segment() {
    let name: QualifiedName = "List".parse().unwrap();

    assert_eq!(name.simple_name(), "List");
    assert!(name.package_path().is_empty());
    assert_eq!(name.parent(), None);
    assert_eq!(name.conventional_package_len(), 0);
}

#[test]
fn test_qualified_name_rejects_invalid_input() {
    assert_eq!(QualifiedName::parse(""), Err(NameError::Empty));
    assert_eq!(QualifiedName::parse("   "), Err(NameError::Empty));
    assert_eq!(
        QualifiedName::parse("a..b"),
        Err(NameError::InvalidSegment {
            name: "a..b".to_string(),
            segment: String::new(),
        })
    );
    assert!(QualifiedName::parse("a.b.").is_err());
    assert!(QualifiedName::parse("a b").is_err());
    assert!(QualifiedName::parse("a.int").is_err());
    assert!(QualifiedName::parse("9lives").is_err());
    assert_eq!(
        QualifiedName::from_segments(Vec::<String>::new()),
        Err(NameError::Empty)
    );
}

#[test]
fn test_qualified_name_accepts_legal_identifiers() {
    for text in ["_", "$", "a$b", "snake_case.Name2", "Größe", "integer.Interface"] {
        assert!(QualifiedName::parse(text).is_ok(), "{} should parse", text);
    }
}

#[test]
fn test_qualified_name_package_prefix_is_segment_wise() {
    let name = QualifiedName::parse("java.utilities.List").unwrap();
    let util = QualifiedName::parse("java.util").unwrap();
    let java = QualifiedName::parse("java").unwrap();

    assert!(!name.starts_with_package(&util));
    assert!(name.starts_with_package(&java));
    assert!(name.starts_with_package(&name));
}

#[test]
fn test_qualified_name_composition() {
    let package = QualifiedName::parse("a.b").unwrap();
    let class = package.child("C").unwrap();
    assert_eq!(class.to_string(), "a.b.C");
    assert_eq!(class.parent(), Some(package.clone()));
    assert_eq!(class.prefix(1).map(|p| p.to_string()), Some("a".to_string()));
    assert_eq!(class.prefix(0), None);
    assert_eq!(class.prefix(4), None);

    let tail = QualifiedName::parse("D.E").unwrap();
    assert_eq!(class.join(&tail).to_string(), "a.b.C.D.E");
    assert!(package.child("while").is_err());
}

#[test]
fn test_is_identifier() {
    assert!(is_identifier("value"));
    assert!(is_identifier("_value1"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("1value"));
    assert!(!is_identifier("return"));
    assert!(!is_identifier("with-dash"));
}

#[test]
fn test_class_type_decomposition() {
    let outer = ClassType::new(QualifiedName::parse("com.acme.Outer").unwrap(), 2);
    let inner = outer.nested("Inner");

    assert_eq!(inner.fully_qualified_name().to_string(), "com.acme.Outer.Inner");
    assert_eq!(inner.package_name().map(|p| p.to_string()), Some("com.acme".to_string()));
    assert_eq!(inner.class_name(), "Outer.Inner");
    assert_eq!(inner.simple_name(), "Inner");
    assert!(inner.is_nested());
    assert!(!outer.is_nested());
    assert_eq!(inner.outermost(), outer);
    assert_eq!(inner.owner(), Some(outer.clone()));
    assert_eq!(outer.owner(), None);
}

#[test]
fn test_class_type_from_convention() {
    let entry = ClassType::from_convention(QualifiedName::parse("java.util.Map.Entry").unwrap());
    assert_eq!(entry.package_segments(), ["java", "util"]);
    assert_eq!(entry.class_name(), "Map.Entry");

    let top = ClassType::top_level(None, "Main");
    assert_eq!(top.package_name(), None);
    assert_eq!(top.to_string(), "Main");
}

#[test]
fn test_java_type_display() {
    let list = ClassType::new(QualifiedName::parse("java.util.List").unwrap(), 2);
    let string = ClassType::new(QualifiedName::parse("java.lang.String").unwrap(), 2);
    let parameterized = JavaType::Parameterized {
        class: list,
        arguments: vec![JavaType::Class(string)],
    };

    assert_eq!(parameterized.to_string(), "java.util.List<java.lang.String>");
    assert_eq!(JavaType::Primitive(Primitive::Int).array_of(2).to_string(), "int[][]");
    assert_eq!(
        parameterized.fully_qualified_name().map(|n| n.to_string()),
        Some("java.util.List".to_string())
    );
}
