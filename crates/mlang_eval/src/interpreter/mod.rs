#[cfg(test)]
mod tests;

use std::rc::Rc;

use mlang_syntax::ast::Node;
use mlang_utils::stack::ensure_sufficient_stack;

use crate::{Binding, Environment, RenderEvent, RenderSink};

/// How faithfully to follow the reference evaluation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// `View` children are reported but not evaluated, and functions are
    /// defined but never callable.
    #[default]
    Reference,
    /// `View` children are evaluated and functions can be called like
    /// components.
    Corrected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub mode: EvalMode,
    /// Nested component/function calls allowed before a call is reported as
    /// [`RenderEvent::CallDepthExceeded`] instead of being expanded.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            mode: EvalMode::Reference,
            max_call_depth: 10_000,
        }
    }
}

/// Tree-walking evaluator over a single mutable [`Environment`].
///
/// Evaluation never fails: lookups that miss are reported to the sink as
/// events and evaluation moves on to the next statement.
pub struct Interpreter<S: RenderSink> {
    env: Environment,
    sink: S,
    config: InterpreterConfig,

    depth: usize,
}

impl<S: RenderSink> Interpreter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, InterpreterConfig::default())
    }

    pub fn with_config(sink: S, config: InterpreterConfig) -> Self {
        Self {
            env: Environment::new(),
            sink,
            config,
            depth: 0,
        }
    }

    pub fn interpret(&mut self, ast: &[Node]) {
        for node in ast {
            self.evaluate(node);
        }

        tracing::debug!(statements = ast.len(), bindings = self.env.len(), "interpreted program");
    }

    /// Drops every binding. The sink keeps what it has received.
    pub fn reset(&mut self) {
        self.env.clear();
    }

    pub fn evaluate(&mut self, node: &Node) {
        tracing::trace!(%node, depth = self.depth, "evaluate");

        match node {
            Node::ViewBlock { elements } => {
                self.emit(RenderEvent::ViewRendered {
                    elements: elements.clone(),
                });

                if self.config.mode == EvalMode::Corrected {
                    self.evaluate_all(elements);
                }
            }

            Node::Assignment { name, value } => {
                self.env.bind(name.as_str(), Binding::Value(value.clone()));
                self.emit(RenderEvent::Assigned {
                    name: name.clone(),
                    value: value.clone(),
                });
            }

            Node::FunctionDef { name, body } => {
                if self.config.mode == EvalMode::Corrected {
                    self.env
                        .bind(name.as_str(), Binding::Function(Rc::from(body.as_slice())));
                }

                self.emit(RenderEvent::FunctionDefined {
                    name: name.clone(),
                    body: body.clone(),
                });
            }

            Node::ComponentDef { name, body } => {
                self.env
                    .bind(name.as_str(), Binding::Component(Rc::from(body.as_slice())));
                self.emit(RenderEvent::ComponentDefined { name: name.clone() });
            }

            Node::ComponentCall { name } => self.call(name),

            Node::ButtonNode { text } => {
                self.emit(RenderEvent::ButtonRendered { text: text.clone() });
            }

            Node::TextNode { text } => {
                self.emit(RenderEvent::TextRendered { text: text.clone() });
            }
        }
    }

    fn call(&mut self, name: &str) {
        let (body, event) = match self.env.get(name) {
            Some(Binding::Component(body)) => (
                Rc::clone(body),
                RenderEvent::ComponentRendering {
                    name: name.to_owned(),
                },
            ),
            Some(Binding::Function(body)) if self.config.mode == EvalMode::Corrected => (
                Rc::clone(body),
                RenderEvent::FunctionCalled {
                    name: name.to_owned(),
                },
            ),
            _ => {
                tracing::debug!(name, "component not found");
                self.emit(RenderEvent::ComponentNotFound {
                    name: name.to_owned(),
                });
                return;
            }
        };

        if self.depth >= self.config.max_call_depth {
            tracing::debug!(name, depth = self.depth, "call depth exceeded");
            self.emit(RenderEvent::CallDepthExceeded {
                name: name.to_owned(),
                depth: self.depth,
            });
            return;
        }

        self.emit(event);

        self.depth += 1;
        self.evaluate_all(&body);
        self.depth -= 1;
    }

    fn evaluate_all(&mut self, nodes: &[Node]) {
        ensure_sufficient_stack(|| {
            for node in nodes {
                self.evaluate(node);
            }
        });
    }

    fn emit(&mut self, event: RenderEvent) {
        self.sink.emit(event);
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
