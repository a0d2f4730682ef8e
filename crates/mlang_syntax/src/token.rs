use std::fmt;

use mlang_diagnostic::span::Span;

use crate::{Syntax, SyntaxCopy};

#[derive(Syntax!)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw matched text. String tokens keep their quotes.
    pub text: String,
    /// 1-based line the token starts on.
    pub line: u32,
    pub span: Span,
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_str(&self.text),
            _ => None,
        }
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

#[derive(SyntaxCopy!)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    String,
    Symbol,
    Operator,
    /// Part of the token contract, but line breaks are always absorbed by
    /// surrounding whitespace so the lexer never emits it.
    Newline,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string literal",
            TokenKind::Symbol => "symbol",
            TokenKind::Operator => "operator",
            TokenKind::Newline => "newline",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Newline => "NEWLINE",
        })
    }
}

#[derive(SyntaxCopy!)]
pub enum Keyword {
    Let,
    Func,
    Return,
    View,
    Text,
    Button,
    If,
    Else,
    For,
    While,
    Component,
}

impl Keyword {
    pub const ALL: [Keyword; 11] = [
        Keyword::Let,
        Keyword::Func,
        Keyword::Return,
        Keyword::View,
        Keyword::Text,
        Keyword::Button,
        Keyword::If,
        Keyword::Else,
        Keyword::For,
        Keyword::While,
        Keyword::Component,
    ];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == s)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Let => "let",
            Keyword::Func => "func",
            Keyword::Return => "return",
            Keyword::View => "View",
            Keyword::Text => "Text",
            Keyword::Button => "Button",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Component => "component",
        }
    }
}
