use crate::*;
use pretty_assertions::assert_eq;
use std::path::Path;

fn unit_at(path: &str, source: &str) -> CompilationUnit {
    parse_compilation_unit_with_source(source, path).unwrap()
}

#[test]
fn test_unchanged_unit_has_empty_diff() {
    let source = "class A {}\n";
    let change = Change::new(
        Some(unit_at("A.java", source)),
        Some(unit_at("A.java", source)),
        ["Noop"],
    );

    assert_eq!(change.diff(), "");
}

#[test]
fn test_diff_of_modified_unit() {
    let original = unit_at(
        "src/A.java",
        "class A {\n    void f() {\n        return;\n    }\n}\n",
    );
    let fixed = unit_at(
        "src/A.java",
        "class A {\n    void f() {\n        return 0;\n    }\n}\n",
    );
    let change = Change::new(Some(original), Some(fixed), ["ReturnZero"]);

    assert_eq!(
        change.diff(),
        "diff --git a/src/A.java b/src/A.java\n\
         --- a/src/A.java\n\
         +++ b/src/A.java\n\
         @@ -1,5 +1,5 @@ ReturnZero\n \
         class A {\n     \
         void f() {\n\
         -        return;\n\
         +        return 0;\n     \
         }\n \
         }\n"
    );
}

#[test]
fn test_diff_lists_visitors_in_order() {
    let change = Change::new(
        Some(unit_at("A.java", "class A {}\n")),
        Some(unit_at("A.java", "class B {}\n")),
        ["Second", "First", "Second"],
    );

    assert_eq!(change.visitors_that_made_changes().len(), 2);
    assert!(change.diff().contains("@@ -1 +1 @@ First, Second\n"));
}

#[test]
fn test_diff_without_visitors() {
    let change = Change::new(
        Some(unit_at("A.java", "class A {}\n")),
        Some(unit_at("A.java", "class B {}\n")),
        Vec::<String>::new(),
    );

    assert!(change.diff().contains("@@ -1 +1 @@\n-class A {}\n+class B {}\n"));
}

#[test]
fn test_diff_marks_missing_final_newline() {
    let change = Change::new(
        Some(unit_at("A.java", "class A {}")),
        Some(unit_at("A.java", "class B {}")),
        ["Rename"],
    );

    assert_eq!(
        change.diff(),
        "diff --git a/A.java b/A.java\n\
         --- a/A.java\n\
         +++ b/A.java\n\
         @@ -1 +1 @@ Rename\n\
         -class A {}\n\
         \\ No newline at end of file\n\
         +class B {}\n\
         \\ No newline at end of file\n"
    );
}

#[test]
fn test_diff_of_created_unit() {
    let change = Change::new(None, Some(unit_at("New.java", "class New {}\n")), ["Create"]);

    assert_eq!(change.original(), None);
    assert_eq!(
        change.diff(),
        "diff --git a/New.java b/New.java\n\
         --- a/New.java\n\
         +++ b/New.java\n\
         @@ -0,0 +1 @@ Create\n\
         +class New {}\n"
    );
}

#[test]
fn test_diff_of_deleted_unit_uses_original_path() {
    let change = Change::new(Some(unit_at("Old.java", "class Old {}\n")), None, ["Delete"]);

    assert!(change.fixed().is_none());
    assert!(change.diff().starts_with("diff --git a/Old.java b/Old.java\n"));
    assert!(change.diff().ends_with("@@ -1 +0,0 @@ Delete\n-class Old {}\n"));
}

#[test]
fn test_diff_relative_to_base_directory() {
    let change = Change::new(
        Some(unit_at("/repo/src/A.java", "class A {}\n")),
        Some(unit_at("/repo/src/A.java", "class B {}\n")),
        ["Rename"],
    );

    let diff = change.diff_relative_to(Some(Path::new("/repo")));
    assert!(diff.starts_with("diff --git a/src/A.java b/src/A.java\n"));

    // A base that does not contain the file leaves the path untouched
    let diff = change.diff_relative_to(Some(Path::new("/elsewhere")));
    assert!(diff.starts_with("diff --git a//repo/src/A.java b//repo/src/A.java\n"));
}

#[test]
fn test_diff_without_source_path() {
    let change = Change::new(
        Some(parse_compilation_unit("class A {}\n").unwrap()),
        Some(parse_compilation_unit("class B {}\n").unwrap()),
        ["Rename"],
    );

    assert!(change.diff().starts_with("diff --git a/partial b/partial\n"));
}

#[test]
fn test_diff_of_tree_edit() {
    let unit = unit_at("A.java", "package p;\nimport b.B;\nimport a.A;\n\nclass X {}\n");
    let mut imports = unit.imports().to_vec();
    sort_imports(&mut imports);
    let fixed = unit.clone().with_imports(imports);
    assert_eq!(fixed.print(), "package p;\nimport a.A;\nimport b.B;\n\nclass X {}\n");

    let change = Change::new(Some(unit), Some(fixed), ["OrderImports"]);
    let diff = change.diff();
    assert!(diff.contains("@@ -1,5 +1,5 @@ OrderImports\n package p;\n"));
    assert_eq!(diff.lines().filter(|line| line.starts_with('-') && !line.starts_with("---")).count(), 1);
    assert_eq!(diff.lines().filter(|line| line.starts_with('+') && !line.starts_with("+++")).count(), 1);
    assert!(diff.ends_with(" \n class X {}\n"));
}
