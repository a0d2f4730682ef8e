use pretty_assertions::assert_eq;

use mlang_syntax::ast::{Literal, Node};
use mlang_syntax::{parse, tokenize};

use super::{EvalMode, Interpreter, InterpreterConfig};
use crate::{Binding, RenderEvent};

fn ast(source: &str) -> Vec<Node> {
    parse(tokenize(source).unwrap()).unwrap()
}

fn run_with(source: &str, config: InterpreterConfig) -> Vec<RenderEvent> {
    let mut interpreter = Interpreter::with_config(vec![], config);
    interpreter.interpret(&ast(source));
    interpreter.into_sink()
}

fn run(source: &str) -> Vec<RenderEvent> {
    run_with(source, InterpreterConfig::default())
}

fn corrected(source: &str) -> Vec<RenderEvent> {
    run_with(
        source,
        InterpreterConfig {
            mode: EvalMode::Corrected,
            ..InterpreterConfig::default()
        },
    )
}

fn log(events: &[RenderEvent]) -> String {
    events
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn define_then_call_component() {
    assert_eq!(
        run("component A { Text(\"hi\") }\nA()"),
        [
            RenderEvent::ComponentDefined {
                name: "A".to_owned()
            },
            RenderEvent::ComponentRendering {
                name: "A".to_owned()
            },
            RenderEvent::TextRendered {
                text: "hi".to_owned()
            },
        ]
    );
}

#[test]
fn sample_program() {
    let source = r#"
component MyCustomView {
    Text("This is my custom view")
    Button("Click me")
}

MyCustomView()
"#;

    insta::assert_snapshot!(log(&run(source)), @r"
    Defined component MyCustomView
    Rendering component MyCustomView
    Rendering Text: This is my custom view
    Rendering Button with text: Click me
    ");
}

#[test]
fn missing_component_is_not_fatal() {
    assert_eq!(
        run("Missing()\nText(\"after\")"),
        [
            RenderEvent::ComponentNotFound {
                name: "Missing".to_owned()
            },
            RenderEvent::TextRendered {
                text: "after".to_owned()
            },
        ]
    );
}

#[test]
fn calling_a_value_is_not_found() {
    let events = run("let A = 1\nA()");
    assert_eq!(
        events[1],
        RenderEvent::ComponentNotFound {
            name: "A".to_owned()
        }
    );
}

#[test]
fn assignment_overwrites() {
    let mut interpreter = Interpreter::new(vec![]);
    interpreter.interpret(&ast("let x = 1\nlet x = \"two\""));

    assert_eq!(
        interpreter.environment().get("x"),
        Some(&Binding::Value(Literal::StringLiteral("two".to_owned())))
    );
    insta::assert_snapshot!(log(interpreter.sink()), @r#"
    Assigned x = 1
    Assigned x = "two"
    "#);
}

#[test]
fn component_redefinition_replaces_body() {
    let events = run("component A { Text(\"1\") }\ncomponent A { Text(\"2\") }\nA()");
    assert_eq!(
        events.last(),
        Some(&RenderEvent::TextRendered {
            text: "2".to_owned()
        })
    );
}

#[test]
fn nested_component_calls() {
    let source = "component Inner { Button(\"ok\") }\ncomponent Outer { Text(\"t\") Inner() }\nOuter()";
    insta::assert_snapshot!(log(&run(source)), @r#"
    Defined component Inner
    Defined component Outer
    Rendering component Outer
    Rendering Text: t
    Rendering component Inner
    Rendering Button with text: ok
    "#);
}

#[test]
fn view_children_are_not_evaluated() {
    let events = run("View { Text(\"a\") Missing() }");
    assert_eq!(events.len(), 1);
    insta::assert_snapshot!(
        log(&events),
        @r#"Rendering View with elements: [Text("a"), Missing()]"#
    );
}

#[test]
fn functions_are_inert() {
    let mut interpreter = Interpreter::new(vec![]);
    interpreter.interpret(&ast("func f() { Text(\"x\") }\nf()"));

    assert!(interpreter.environment().get("f").is_none());
    insta::assert_snapshot!(log(interpreter.sink()), @r#"
    Defined function f with body [Text("x")]
    Component f not found.
    "#);
}

#[test]
fn corrected_mode_evaluates_view_children() {
    insta::assert_snapshot!(log(&corrected("View { Text(\"a\") View { Button(\"b\") } }")), @r#"
    Rendering View with elements: [Text("a"), View { Button("b") }]
    Rendering Text: a
    Rendering View with elements: [Button("b")]
    Rendering Button with text: b
    "#);
}

#[test]
fn corrected_mode_calls_functions() {
    insta::assert_snapshot!(log(&corrected("func f() { Text(\"x\") }\nf()")), @r#"
    Defined function f with body [Text("x")]
    Calling function f
    Rendering Text: x
    "#);
}

#[test]
fn reset_then_reinterpret_is_identical() {
    let program = ast("let n = 1\ncomponent A { Text(\"a\") }\nA()\nB()\nView { A() }");

    let mut interpreter = Interpreter::new(vec![]);
    interpreter.interpret(&program);
    let first = std::mem::take(interpreter.sink_mut());

    interpreter.reset();
    assert!(interpreter.environment().is_empty());

    interpreter.interpret(&program);
    assert_eq!(interpreter.sink(), &first);
}

#[test]
fn reset_forgets_components() {
    let mut interpreter = Interpreter::new(vec![]);
    interpreter.interpret(&ast("component A {}"));
    interpreter.reset();
    interpreter.reset();
    interpreter.interpret(&ast("A()"));

    assert_eq!(
        interpreter.sink().last(),
        Some(&RenderEvent::ComponentNotFound {
            name: "A".to_owned()
        })
    );
}

#[test]
fn self_recursive_component_stops_at_depth_limit() {
    let config = InterpreterConfig {
        max_call_depth: 8,
        ..InterpreterConfig::default()
    };
    let events = run_with("component A { A() }\nA()\nText(\"done\")", config);

    let rendering = events
        .iter()
        .filter(|e| matches!(e, RenderEvent::ComponentRendering { .. }))
        .count();
    assert_eq!(rendering, 8);

    assert_eq!(
        &events[events.len() - 2..],
        &[
            RenderEvent::CallDepthExceeded {
                name: "A".to_owned(),
                depth: 8,
            },
            RenderEvent::TextRendered {
                text: "done".to_owned()
            },
        ]
    );
}

#[test]
fn long_component_chain_expands_fully() {
    let depth = 2_000;
    let mut source = "component C0 { Text(\"end\") }\n".to_owned();
    for i in 1..depth {
        source.push_str(&format!("component C{i} {{ C{}() }}\n", i - 1));
    }
    source.push_str(&format!("C{}()", depth - 1));

    let events = run(&source);

    let rendering = events
        .iter()
        .filter(|e| matches!(e, RenderEvent::ComponentRendering { .. }))
        .count();
    assert_eq!(rendering, depth);
    assert_eq!(
        events.last(),
        Some(&RenderEvent::TextRendered {
            text: "end".to_owned()
        })
    );
}

#[test]
fn separate_interpreters_do_not_share_bindings() {
    let mut first = Interpreter::new(vec![]);
    let mut second = Interpreter::new(vec![]);

    first.interpret(&ast("component A {}"));
    second.interpret(&ast("A()"));

    assert_eq!(first.environment().len(), 1);
    assert!(second.environment().is_empty());
}
