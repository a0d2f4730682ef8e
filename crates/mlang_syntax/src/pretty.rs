//! Multi-line source printer for parsed programs.

use mlang_utils::stack::ensure_sufficient_stack;

use crate::ast::Node;

pub struct PrettyPrinter {
    indent: &'static str,
    level: usize,
    out: String,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new("    ")
    }
}

impl PrettyPrinter {
    pub fn new(indent: &'static str) -> Self {
        Self {
            indent,
            level: 0,
            out: String::new(),
        }
    }

    pub fn print_program(mut self, nodes: &[Node]) -> String {
        for node in nodes {
            self.print_node(node);
        }
        self.out
    }

    fn print_node(&mut self, node: &Node) {
        ensure_sufficient_stack(|| match node {
            Node::ViewBlock { elements } => self.print_block("View".to_owned(), elements),
            Node::FunctionDef { name, body } => self.print_block(format!("func {name}()"), body),
            Node::ComponentDef { name, body } => {
                self.print_block(format!("component {name}"), body);
            }
            leaf => self.line(&leaf.to_string()),
        });
    }

    fn print_block(&mut self, header: String, body: &[Node]) {
        if body.is_empty() {
            self.line(&format!("{header} {{}}"));
            return;
        }

        self.line(&format!("{header} {{"));
        self.level += 1;
        for node in body {
            self.print_node(node);
        }
        self.level -= 1;
        self.line("}");
    }

    fn line(&mut self, s: &str) {
        for _ in 0..self.level {
            self.out.push_str(self.indent);
        }
        self.out.push_str(s);
        self.out.push('\n');
    }
}
