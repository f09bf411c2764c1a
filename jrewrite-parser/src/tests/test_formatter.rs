use crate::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn method_body(unit: &CompilationUnit, method: &str) -> Arc<Block> {
    unit.classes()[0]
        .method_named(method)
        .and_then(|m| m.body.clone())
        .unwrap()
}

#[test]
fn test_format_in_block_with_spaces() {
    let unit = parse_compilation_unit(
        "class A {\n    void f() {\n        int x = 1;\n        if (x > 0) {\n            x++;\n        }\n    }\n}\n",
    )
    .unwrap();
    let formatter = Formatter::new(&unit);
    let body = method_body(&unit, "f");

    assert_eq!(
        formatter.find_indent(4, &body.statements),
        Indentation {
            enclosing_indent: 4,
            indent_to_use: 4,
            indented_with_spaces: true,
        }
    );
    assert_eq!(formatter.format_in_block(&body).as_str(), "\n        ");
}

#[test]
fn test_format_in_block_with_tabs() {
    let unit = parse_compilation_unit("class A {\n\tvoid f() {\n\t\treturn;\n\t}\n}").unwrap();
    let formatter = Formatter::new(&unit);

    assert_eq!(formatter.format_in_block(&method_body(&unit, "f")).as_str(), "\n\t\t");
}

#[test]
fn test_empty_block_uses_whole_unit_indent() {
    let unit = parse_compilation_unit(
        "class A {\n  void f() {\n  }\n  void g() {\n    return;\n  }\n}",
    )
    .unwrap();
    let formatter = Formatter::new(&unit);

    let indentation = formatter.find_indent(2, &[]);
    assert_eq!(indentation.indent_to_use, 2);
    assert!(indentation.indented_with_spaces);
    assert_eq!(formatter.format_in_block(&method_body(&unit, "f")).as_str(), "\n    ");
}

#[test]
fn test_unit_without_indentation_defaults_to_four_spaces() {
    let unit = parse_compilation_unit("class A { void f() {} }").unwrap();
    let formatter = Formatter::new(&unit);

    let indentation = formatter.find_indent(0, &[]);
    assert_eq!(indentation.indent_to_use, 4);
    assert!(indentation.indented_with_spaces);
}

#[test]
fn test_most_common_indent_wins_and_ties_prefer_narrower() {
    let unit = parse_compilation_unit("class A {}").unwrap();
    let formatter = Formatter::new(&unit);

    let block = parse_statement("{\n  a();\n    b();\n    c();\n}").unwrap();
    let Statement::Block(block) = block else {
        panic!("Expected block");
    };
    assert_eq!(formatter.find_indent(0, &block.statements).indent_to_use, 4);

    let block = parse_statement("{\n  a();\n    b();\n}").unwrap();
    let Statement::Block(block) = block else {
        panic!("Expected block");
    };
    assert_eq!(formatter.find_indent(0, &block.statements).indent_to_use, 2);
}

#[test]
fn test_inserted_statement_prints_in_place() {
    let input = "class A {\n    void f() {\n        a();\n    }\n}\n";
    let unit = parse_compilation_unit(input).unwrap();
    let formatter = Formatter::new(&unit);
    let body = method_body(&unit, "f");

    let prefix = formatter.format_in_block(&body);
    let added = Statement::Return(Return::build(None)).with_prefix(prefix);
    let mut statements = body.statements.clone();
    statements.push(Arc::new(added));
    let body = (*body).clone().with_statements(statements);

    assert_eq!(body.print(), " {\n        a();\n        return;\n    }");
}

#[test]
fn test_shift_right_between_blocks() {
    let unit = parse_compilation_unit(
        "class A {\n    void f() {\n        while (a) {\n            b();\n        }\n        if (c) {\n            d();\n        }\n    }\n}",
    )
    .unwrap();
    let formatter = Formatter::new(&unit);
    let body = method_body(&unit, "f");
    let Statement::While(while_loop) = body.statements[0].as_ref() else {
        panic!("Expected while loop");
    };
    let Statement::Block(loop_body) = while_loop.body.as_ref() else {
        panic!("Expected block");
    };

    let shift = formatter.shift_right(loop_body, &body);
    assert_eq!(shift, ShiftRight { shift: 4, with_spaces: true });

    let moved = shift.apply_to_statement(&body.statements[1]);
    assert_eq!(
        moved.print(),
        "\n            if (c) {\n                d();\n            }"
    );

    let back = formatter.shift_right(&body, loop_body);
    assert_eq!(back.shift, -4);
    assert_eq!(back.apply_to_statement(&moved), *body.statements[1]);
}

#[test]
fn test_shift_trivia() {
    let right = ShiftRight {
        shift: 2,
        with_spaces: true,
    };
    assert_eq!(right.apply(&Trivia::new("\n  // note\n  ")).as_str(), "\n    // note\n    ");
    assert_eq!(right.apply(&Trivia::space()).as_str(), " ");

    let left = ShiftRight {
        shift: -4,
        with_spaces: true,
    };
    assert_eq!(left.apply(&Trivia::new("\n  ")).as_str(), "\n");
    assert_eq!(left.apply(&Trivia::new("\n\t\t\t\t\t")).as_str(), "\n\t");

    let tabs = ShiftRight {
        shift: 1,
        with_spaces: false,
    };
    assert_eq!(tabs.apply(&Trivia::new("\n\t")).as_str(), "\n\t\t");
}
