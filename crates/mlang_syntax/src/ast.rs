use std::{fmt, mem};

use mlang_utils::stack::ensure_sufficient_stack;
use serde::{Serialize, Serializer};

use crate::Syntax;

/// Blocks nest as deep as the parser allows, so every recursive pass over a
/// tree (`Clone`, `PartialEq`, `Serialize`, `Display`) grows the stack as it
/// descends and `Drop` flattens the tree instead of recursing.
#[derive(Debug, Serialize)]
pub enum Node {
    ViewBlock {
        #[serde(serialize_with = "serialize_block")]
        elements: Vec<Node>,
    },
    Assignment {
        name: String,
        value: Literal,
    },
    FunctionDef {
        name: String,
        #[serde(serialize_with = "serialize_block")]
        body: Vec<Node>,
    },
    ComponentDef {
        name: String,
        #[serde(serialize_with = "serialize_block")]
        body: Vec<Node>,
    },
    ComponentCall {
        name: String,
    },
    TextNode {
        text: String,
    },
    ButtonNode {
        text: String,
    },
}

impl Node {
    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::ViewBlock { elements } => Some(elements),
            Node::FunctionDef { body, .. } | Node::ComponentDef { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        if children.is_empty() {
            return;
        }

        let mut pending = mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children_mut() {
                pending.append(children);
            }
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Node::ViewBlock { elements } => Node::ViewBlock {
                elements: elements.clone(),
            },
            Node::Assignment { name, value } => Node::Assignment {
                name: name.clone(),
                value: value.clone(),
            },
            Node::FunctionDef { name, body } => Node::FunctionDef {
                name: name.clone(),
                body: body.clone(),
            },
            Node::ComponentDef { name, body } => Node::ComponentDef {
                name: name.clone(),
                body: body.clone(),
            },
            Node::ComponentCall { name } => Node::ComponentCall { name: name.clone() },
            Node::TextNode { text } => Node::TextNode { text: text.clone() },
            Node::ButtonNode { text } => Node::ButtonNode { text: text.clone() },
        })
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Node::ViewBlock { elements: a }, Node::ViewBlock { elements: b }) => a == b,
            (
                Node::Assignment { name, value },
                Node::Assignment {
                    name: other_name,
                    value: other_value,
                },
            ) => name == other_name && value == other_value,
            (
                Node::FunctionDef { name, body },
                Node::FunctionDef {
                    name: other_name,
                    body: other_body,
                },
            )
            | (
                Node::ComponentDef { name, body },
                Node::ComponentDef {
                    name: other_name,
                    body: other_body,
                },
            ) => name == other_name && body == other_body,
            (Node::ComponentCall { name: a }, Node::ComponentCall { name: b }) => a == b,
            (Node::TextNode { text: a }, Node::TextNode { text: b })
            | (Node::ButtonNode { text: a }, Node::ButtonNode { text: b }) => a == b,
            _ => false,
        })
    }
}

impl Eq for Node {}

fn serialize_block<S: Serializer>(nodes: &[Node], serializer: S) -> Result<S::Ok, S::Error> {
    ensure_sufficient_stack(|| nodes.serialize(serializer))
}

#[derive(Syntax!)]
pub enum Literal {
    StringLiteral(String),
    NumberLiteral(i64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::StringLiteral(s) => write!(f, "\"{s}\""),
            Literal::NumberLiteral(n) => write!(f, "{n}"),
        }
    }
}

/// Single-line M- source for a node.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Node::ViewBlock { elements } => write!(f, "View {}", Block(elements)),
            Node::Assignment { name, value } => write!(f, "let {name} = {value}"),
            Node::FunctionDef { name, body } => write!(f, "func {name}() {}", Block(body)),
            Node::ComponentDef { name, body } => write!(f, "component {name} {}", Block(body)),
            Node::ComponentCall { name } => write!(f, "{name}()"),
            Node::TextNode { text } => write!(f, "Text(\"{text}\")"),
            Node::ButtonNode { text } => write!(f, "Button(\"{text}\")"),
        })
    }
}

struct Block<'a>(&'a [Node]);

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for node in self.0 {
            write!(f, " {node}")?;
        }
        f.write_str(" }")
    }
}

/// Displays a node sequence as `[a, b, c]`.
pub struct NodeList<'a>(pub &'a [Node]);

impl fmt::Display for NodeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{node}")?;
        }
        f.write_str("]")
    }
}
