#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod pretty;
pub mod token;

pub use lexer::{LexError, LexResult};
pub use parser::{ParseError, ParseResult};

use ast::Node;
use lexer::Lexer;
use parser::Parser;
use token::Token;

derive_alias! {
    #[derive(Syntax!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(SyntaxCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).lex()
}

pub fn parse(tokens: Vec<Token>) -> ParseResult<Vec<Node>> {
    Parser::new(&tokens).parse()
}
