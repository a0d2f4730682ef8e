use mlang_diagnostic::span::Span;
use pretty_assertions::assert_eq;

use crate::ast::{Literal, Node};
use crate::{parse, tokenize, ParseError, ParseResult};

fn parse_source(source: &str) -> ParseResult<Vec<Node>> {
    parse(tokenize(source).expect("source should lex"))
}

fn text(s: &str) -> Node {
    Node::TextNode { text: s.to_owned() }
}

fn error(source: &str) -> ParseError {
    parse_source(source).expect_err("source should not parse")
}

#[test]
fn component_then_call() {
    assert_eq!(
        parse_source("component A { Text(\"hi\") }\nA()"),
        Ok(vec![
            Node::ComponentDef {
                name: "A".to_owned(),
                body: vec![text("hi")],
            },
            Node::ComponentCall {
                name: "A".to_owned()
            },
        ])
    );
}

#[test]
fn component_with_parameter_list() {
    assert_eq!(
        parse_source("component A() {}"),
        Ok(vec![Node::ComponentDef {
            name: "A".to_owned(),
            body: vec![],
        }])
    );
}

#[test]
fn view_block() {
    assert_eq!(
        parse_source("View {\n  Text(\"a\")\n  Button(\"b\")\n  View {}\n}"),
        Ok(vec![Node::ViewBlock {
            elements: vec![
                text("a"),
                Node::ButtonNode {
                    text: "b".to_owned()
                },
                Node::ViewBlock { elements: vec![] },
            ],
        }])
    );
}

#[test]
fn function_definition() {
    assert_eq!(
        parse_source("func greet() { Text(\"hello\") }"),
        Ok(vec![Node::FunctionDef {
            name: "greet".to_owned(),
            body: vec![text("hello")],
        }])
    );
}

#[test]
fn assignments() {
    assert_eq!(
        parse_source("let name = \"Ada\"\nlet count = 3"),
        Ok(vec![
            Node::Assignment {
                name: "name".to_owned(),
                value: Literal::StringLiteral("Ada".to_owned()),
            },
            Node::Assignment {
                name: "count".to_owned(),
                value: Literal::NumberLiteral(3),
            },
        ])
    );
}

#[test]
fn empty_program() {
    assert_eq!(parse_source("  \n "), Ok(vec![]));
}

#[test]
fn deeply_nested_views() {
    let depth = 50_000;
    let source = "View { ".repeat(depth) + &"} ".repeat(depth);

    let ast = parse_source(&source).unwrap();
    let mut node = &ast[0];
    let mut seen = 1;
    while let Node::ViewBlock { elements } = node {
        match elements.first() {
            Some(inner) => {
                node = inner;
                seen += 1;
            }
            None => break,
        }
    }

    assert_eq!(seen, depth);
}

#[test]
fn unterminated_block() {
    let err = error("component A { Text(\"hi\")");
    assert_eq!(err.expected, "`}`");
    assert_eq!(err.found, "end of input");
    assert_eq!(err.line, 1);
    assert_eq!(err.opened_at, Some(Span::new(12, 13)));
}

#[test]
fn unterminated_nested_block() {
    let err = error("View {\n  View {\n    Text(\"x\")\n  }\n");
    assert_eq!(err.expected, "`}`");
    assert_eq!(err.line, 4);
    assert_eq!(err.opened_at, Some(Span::new(5, 6)));
}

#[test]
fn missing_paren() {
    insta::assert_snapshot!(
        error("Text(\"hi\"").to_string(),
        @"expected `)`, found end of input at line 1"
    );
    assert_eq!(error("Text(\"hi\"").opened_at, None);
    insta::assert_snapshot!(
        error("Button \"hi\")").to_string(),
        @r#"expected `(`, found `"hi"` at line 1"#
    );
}

#[test]
fn text_requires_string() {
    let err = error("Text(42)");
    assert_eq!(err.expected, "string literal");
    assert_eq!(err.found, "`42`");
}

#[test]
fn assignment_requires_literal() {
    let err = error("let x = y");
    assert_eq!(err.expected, "a string or number literal");
    assert_eq!(err.found, "`y`");

    let err = error("let = 1");
    assert_eq!(err.expected, "identifier");
}

#[test]
fn number_overflow() {
    let err = error("let big = 99999999999999999999");
    assert_eq!(err.expected, "a number that fits in 64 bits");
}

#[test]
fn reserved_keyword_is_not_a_statement() {
    let err = error("\nif");
    assert_eq!(
        err,
        ParseError {
            expected: "a statement".to_owned(),
            found: "`if`".to_owned(),
            line: 2,
            span: Span::new(1, 3),
            opened_at: None,
        }
    );
}

#[test]
fn stray_symbol() {
    let err = error("A() }");
    assert_eq!(err.expected, "a statement");
    assert_eq!(err.found, "`}`");
}

#[test]
fn function_requires_parens() {
    let err = error("func f { }");
    assert_eq!(err.expected, "`(`");
    assert_eq!(err.found, "`{`");
}
