use std::fmt;

use mlang_syntax::ast::{Literal, Node, NodeList};

/// An observable effect of evaluating a program.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event")]
pub enum RenderEvent {
    ViewRendered { elements: Vec<Node> },
    Assigned { name: String, value: Literal },
    FunctionDefined { name: String, body: Vec<Node> },
    ComponentDefined { name: String },
    ComponentRendering { name: String },
    ComponentNotFound { name: String },
    ButtonRendered { text: String },
    TextRendered { text: String },
    FunctionCalled { name: String },
    CallDepthExceeded { name: String, depth: usize },
}

impl fmt::Display for RenderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderEvent::ViewRendered { elements } => {
                write!(f, "Rendering View with elements: {}", NodeList(elements))
            }
            RenderEvent::Assigned { name, value } => write!(f, "Assigned {name} = {value}"),
            RenderEvent::FunctionDefined { name, body } => {
                write!(f, "Defined function {name} with body {}", NodeList(body))
            }
            RenderEvent::ComponentDefined { name } => write!(f, "Defined component {name}"),
            RenderEvent::ComponentRendering { name } => write!(f, "Rendering component {name}"),
            RenderEvent::ComponentNotFound { name } => write!(f, "Component {name} not found."),
            RenderEvent::ButtonRendered { text } => write!(f, "Rendering Button with text: {text}"),
            RenderEvent::TextRendered { text } => write!(f, "Rendering Text: {text}"),
            RenderEvent::FunctionCalled { name } => write!(f, "Calling function {name}"),
            RenderEvent::CallDepthExceeded { name, depth } => {
                write!(f, "Call depth limit of {depth} reached at {name}")
            }
        }
    }
}
