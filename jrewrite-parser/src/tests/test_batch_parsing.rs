use crate::*;
use pretty_assertions::assert_eq;

fn sequential() -> ParserConfig {
    ParserConfig {
        parallel: false,
        ..ParserConfig::default()
    }
}

fn numbered_sources(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("package p{i};\n\nclass C{i} {{\n    int value = {i};\n}}\n"))
        .collect()
}

#[test]
fn test_default_config() {
    let config = ParserConfig::default();

    assert_eq!(config.error_policy, ErrorPolicy::FailFast);
    assert!(config.parallel);
    assert!(config.implicit_java_lang);
    assert_eq!(JavaParser::new().config(), &config);
}

#[test]
fn test_batch_preserves_input_order() {
    let sources = numbered_sources(64);

    for config in [ParserConfig::default(), sequential()] {
        let units = JavaParser::with_config(config)
            .parse_with_dependencies(&sources, &[] as &[&str])
            .unwrap();

        assert_eq!(units.len(), sources.len());
        for (i, (unit, source)) in units.iter().zip(&sources).enumerate() {
            assert_eq!(unit.print(), *source);
            assert_eq!(unit.classes()[0].name.name, format!("C{i}"));
        }
    }
}

#[test]
fn test_batch_parallel_matches_sequential() {
    let sources = numbered_sources(16);

    let parallel = JavaParser::new()
        .parse_with_dependencies(&sources, &[] as &[&str])
        .unwrap();
    let one_by_one = JavaParser::with_config(sequential())
        .parse_with_dependencies(&sources, &[] as &[&str])
        .unwrap();

    assert_eq!(parallel, one_by_one);
}

#[test]
fn test_empty_batch() {
    let units = JavaParser::new()
        .parse_with_dependencies(&[] as &[&str], &[] as &[&str])
        .unwrap();
    assert!(units.is_empty());
}

#[test]
fn test_fail_fast_on_malformed_source() {
    let sources = ["class Good {}", "class Bad {", "class AlsoGood {}"];

    let result = JavaParser::new().parse_with_dependencies(&sources, &[] as &[&str]);
    assert!(matches!(result, Err(ParseError::Syntax { .. })));
}

#[test]
fn test_parse_each_reports_per_source() {
    let sources = ["class Good {}", "class Bad {", "class AlsoGood {}"];

    let results = JavaParser::new()
        .parse_each(&sources, &[] as &[&str])
        .unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert_eq!(
        results[2].as_ref().unwrap().classes()[0].name.name,
        "AlsoGood"
    );
}

#[test]
fn test_malformed_dependency_fails_fast() {
    let result = JavaParser::new().parse_with_dependencies(&["class A {}"], &["class Broken {"]);
    assert!(result.is_err());
}

#[test]
fn test_malformed_dependency_skipped_when_keeping_going() {
    init_tracing();
    let parser = JavaParser::with_config(ParserConfig {
        error_policy: ErrorPolicy::KeepGoing,
        ..ParserConfig::default()
    });

    let units = parser
        .parse_with_dependencies(
            &["import lib.*;\nclass A { Tool tool; }"],
            &["class Broken {", "package lib;\npublic class Tool {}"],
        )
        .unwrap();

    let field = units[0].classes()[0].fields().next().unwrap();
    assert_eq!(
        field.type_expr.java_type.as_ref().and_then(JavaType::fully_qualified_name).map(|n| n.to_string()),
        Some("lib.Tool".to_string())
    );
}

#[test]
fn test_dependencies_produce_no_output() {
    let units = JavaParser::new()
        .parse_with_dependencies(&["class A {}"], &["class B {}", "class C {}"])
        .unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].classes()[0].name.name, "A");
}

#[test]
fn test_source_paths_are_recorded() {
    let sources = [
        SourceFile::new("src/A.java", "class A {}"),
        SourceFile::new("src/B.java", "class B {}"),
    ];
    let units = JavaParser::new()
        .parse_with_dependencies(&sources, &[] as &[&str])
        .unwrap();

    assert_eq!(units[0].source_path.as_deref(), Some("src/A.java"));
    assert_eq!(units[1].source_path.as_deref(), Some("src/B.java"));

    let unit = parse_compilation_unit_with_source("class C {}", "src/C.java").unwrap();
    assert_eq!(unit.source_path.as_deref(), Some("src/C.java"));
    assert_eq!(parse_compilation_unit("class D {}").unwrap().source_path, None);
}

#[test]
fn test_source_text_implementations() {
    let owned = String::from("class A {}");
    assert_eq!(owned.text(), "class A {}");
    assert_eq!(owned.path(), None);

    let file = SourceFile::new("A.java", "class A {}");
    assert_eq!(file.text(), "class A {}");
    assert_eq!(file.path(), Some("A.java"));
}
