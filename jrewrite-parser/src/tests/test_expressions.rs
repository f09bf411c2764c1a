use crate::*;
use pretty_assertions::assert_eq;

fn binary(expression: &Expression) -> &Binary {
    match expression {
        Expression::Binary(binary) => binary,
        _ => panic!("Expected binary expression, got: {:?}", expression),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expression = parse_expression("a + b * c").unwrap();
    let add = binary(&expression);

    assert_eq!(add.operator, BinaryOperator::Add);
    assert_eq!(add.left.print_trimmed(), "a");
    assert_eq!(binary(&add.right).operator, BinaryOperator::Multiply);
    assert_eq!(add.operator_prefix.as_str(), " ");
    assert_eq!(add.right.prefix().as_str(), " ");
}

#[test]
fn test_binary_operators_are_left_associative() {
    let expression = parse_expression("a - b - c").unwrap();
    let outer = binary(&expression);

    assert_eq!(outer.operator, BinaryOperator::Subtract);
    assert_eq!(outer.left.print_trimmed(), "a - b");
    assert_eq!(outer.right.print_trimmed(), "c");
}

#[test]
fn test_logical_precedence() {
    let expression = parse_expression("a || b && c == d | e").unwrap();
    let or = binary(&expression);
    assert_eq!(or.operator, BinaryOperator::Or);

    let and = binary(&or.right);
    assert_eq!(and.operator, BinaryOperator::And);

    // `|` binds looser than `==`
    let bit_or = binary(&and.right);
    assert_eq!(bit_or.operator, BinaryOperator::BitOr);
    assert_eq!(binary(&bit_or.left).operator, BinaryOperator::Equal);
}

#[test]
fn test_shift_and_relational_operators() {
    let expression = parse_expression("a << 1 < b >>> 2").unwrap();
    let less = binary(&expression);

    assert_eq!(less.operator, BinaryOperator::LessThan);
    assert_eq!(binary(&less.left).operator, BinaryOperator::ShiftLeft);
    assert_eq!(binary(&less.right).operator, BinaryOperator::UnsignedShiftRight);
}

#[test]
fn test_parentheses_override_precedence() {
    let expression = parse_expression("(a + b) * c").unwrap();
    let multiply = binary(&expression);

    assert_eq!(multiply.operator, BinaryOperator::Multiply);
    match &*multiply.left {
        Expression::Parentheses(parens) => {
            assert_eq!(binary(&parens.expression).operator, BinaryOperator::Add)
        }
        other => panic!("Expected parentheses, got: {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    let expression = parse_expression("a = b += c").unwrap();

    match expression {
        Expression::Assignment(outer) => {
            assert_eq!(outer.operator, AssignmentOperator::Assign);
            match &*outer.value {
                Expression::Assignment(inner) => {
                    assert_eq!(inner.operator, AssignmentOperator::AddAssign);
                    assert_eq!(inner.target.print_trimmed(), "b");
                }
                other => panic!("Expected assignment, got: {:?}", other),
            }
        }
        other => panic!("Expected assignment, got: {:?}", other),
    }
}

#[test]
fn test_conditional_expression() {
    let expression = parse_expression("a ? b : c ? d : e").unwrap();

    match expression {
        Expression::Conditional(conditional) => {
            assert_eq!(conditional.condition.print_trimmed(), "a");
            assert_eq!(conditional.then_part.print_trimmed(), "b");
            assert!(matches!(*conditional.else_part, Expression::Conditional(_)));
        }
        other => panic!("Expected conditional, got: {:?}", other),
    }
}

#[test]
fn test_unary_operators() {
    let expression = parse_expression("-x++").unwrap();

    match expression {
        Expression::Unary(negate) => {
            assert_eq!(negate.operator, UnaryOperator::Negative);
            match &*negate.operand {
                Expression::Unary(increment) => {
                    assert_eq!(increment.operator, UnaryOperator::PostIncrement);
                    assert!(increment.operator.is_postfix());
                }
                other => panic!("Expected postfix increment, got: {:?}", other),
            }
        }
        other => panic!("Expected unary, got: {:?}", other),
    }

    let expression = parse_expression("!  done").unwrap();
    assert_eq!(expression.print(), "!  done");
}

#[test]
fn test_selectors() {
    let expression = parse_expression("this.items.get(0).name").unwrap();

    match &expression {
        Expression::FieldAccess(access) => {
            assert_eq!(access.name.name, "name");
            match &*access.target {
                Expression::MethodInvocation(invocation) => {
                    assert_eq!(invocation.name.name, "get");
                    assert_eq!(invocation.arguments.len(), 1);
                    let select = invocation.select.as_ref().unwrap();
                    assert_eq!(select.target.print_trimmed(), "this.items");
                }
                other => panic!("Expected method invocation, got: {:?}", other),
            }
        }
        other => panic!("Expected field access, got: {:?}", other),
    }
}

#[test]
fn test_method_call_arguments_keep_trivia() {
    let expression = parse_expression("f ( a , /* b */ b )").unwrap();

    match &expression {
        Expression::MethodInvocation(invocation) => {
            assert!(invocation.select.is_none());
            assert_eq!(invocation.arguments.before.as_str(), " ");
            assert_eq!(invocation.arguments.elements[0].after.as_str(), " ");
            assert_eq!(invocation.arguments.end.as_str(), " ");
            let second = invocation.arguments.iter().nth(1).unwrap();
            assert_eq!(second.prefix().as_str(), " /* b */ ");
        }
        other => panic!("Expected method invocation, got: {:?}", other),
    }
    assert_eq!(expression.print(), "f ( a , /* b */ b )");
}

#[test]
fn test_new_class_with_body() {
    let expression = parse_expression("new java.util.ArrayList<String>(10) { }").unwrap();

    match &expression {
        Expression::NewClass(new_class) => {
            assert_eq!(
                new_class.class.name().map(|n| n.to_string()),
                Some("java.util.ArrayList".to_string())
            );
            assert_eq!(new_class.class.type_arguments.as_ref().map(Container::len), Some(1));
            assert_eq!(new_class.arguments.len(), 1);
            assert!(new_class.body.as_ref().unwrap().members.is_empty());
        }
        other => panic!("Expected new class, got: {:?}", other),
    }
}

#[test]
fn test_expression_rejects_trailing_input() {
    assert!(parse_expression("a +").is_err());
    assert!(parse_expression("a b").is_err());
    assert!(parse_expression("").is_err());
}
