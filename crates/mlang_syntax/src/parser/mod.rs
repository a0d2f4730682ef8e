#[cfg(test)]
mod tests;

use mlang_diagnostic::span::Span;
use mlang_diagnostic::{Diagnostic, IntoDiagnostic, Snippet};
use mlang_utils::peek::Peek;
use mlang_utils::stack::ensure_sufficient_stack;

use crate::ast::{Literal, Node};
use crate::token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found} at line {line}")]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub line: u32,
    pub span: Span,
    /// The `{` of the block left open when input ran out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<Span>,
}

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(self) -> Diagnostic {
        let diagnostic = Diagnostic::error()
            .with_message(format!("expected {}, found {}", self.expected, self.found))
            .with_snippet(Snippet::primary(
                format!("expected {} here", self.expected),
                self.span,
            ));

        match self.opened_at {
            Some(open) => diagnostic.with_snippet(Snippet::secondary("block opened here", open)),
            None => diagnostic,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    tokens: std::slice::Iter<'a, Token>,

    eof_line: u32,
    eof_span: Span,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let (eof_line, eof_span) = match tokens.last() {
            Some(last) => {
                let newlines = last.text.bytes().filter(|&b| b == b'\n').count() as u32;
                (last.line + newlines, Span::empty(last.span.end))
            }
            None => (1, Span::empty(0)),
        };

        Self {
            tokens: tokens.iter(),
            eof_line,
            eof_span,
        }
    }

    pub fn parse(mut self) -> ParseResult<Vec<Node>> {
        let mut nodes = vec![];
        while !self.tokens.at_end() {
            nodes.push(self.parse_statement()?);
        }

        tracing::debug!(count = nodes.len(), "parsed program");

        Ok(nodes)
    }

    fn parse_statement(&mut self) -> ParseResult<Node> {
        ensure_sufficient_stack(|| {
            let Some(token) = self.tokens.peek() else {
                return Err(self.error_expected("a statement", None));
            };

            tracing::trace!(text = %token.text, line = token.line, "statement");

            match token.keyword() {
                Some(Keyword::View) => self.parse_view(),
                Some(Keyword::Let) => self.parse_assignment(),
                Some(Keyword::Func) => self.parse_function(),
                Some(Keyword::Component) => self.parse_component(),
                Some(Keyword::Text) => {
                    let text = self.parse_call_with_string(Keyword::Text)?;
                    Ok(Node::TextNode { text })
                }
                Some(Keyword::Button) => {
                    let text = self.parse_call_with_string(Keyword::Button)?;
                    Ok(Node::ButtonNode { text })
                }

                None if token.kind == TokenKind::Identifier => self.parse_component_call(),

                _ => Err(self.error_expected("a statement", Some(token))),
            }
        })
    }

    fn parse_view(&mut self) -> ParseResult<Node> {
        self.expect_keyword(Keyword::View)?;
        let elements = self.parse_block()?;
        Ok(Node::ViewBlock { elements })
    }

    fn parse_assignment(&mut self) -> ParseResult<Node> {
        self.expect_keyword(Keyword::Let)?;
        let name = self.parse_ident()?;
        self.expect(TokenKind::Operator, Some("="))?;

        let value = match self.tokens.peek() {
            Some(t) if t.kind == TokenKind::String => {
                self.tokens.next();
                Literal::StringLiteral(string_value(t))
            }
            Some(t) if t.kind == TokenKind::Number => {
                self.tokens.next();
                let n = t.text.parse().map_err(|_| {
                    self.error_expected("a number that fits in 64 bits", Some(t))
                })?;
                Literal::NumberLiteral(n)
            }
            other => return Err(self.error_expected("a string or number literal", other)),
        };

        Ok(Node::Assignment { name, value })
    }

    fn parse_function(&mut self) -> ParseResult<Node> {
        self.expect_keyword(Keyword::Func)?;
        let name = self.parse_ident()?;
        self.expect_symbol("(")?;
        self.expect_symbol(")")?;
        let body = self.parse_block()?;
        Ok(Node::FunctionDef { name, body })
    }

    fn parse_component(&mut self) -> ParseResult<Node> {
        self.expect_keyword(Keyword::Component)?;
        let name = self.parse_ident()?;

        // the empty parameter list is optional for components
        if self.check(TokenKind::Symbol, Some("(")) {
            self.expect_symbol("(")?;
            self.expect_symbol(")")?;
        }

        let body = self.parse_block()?;
        Ok(Node::ComponentDef { name, body })
    }

    fn parse_call_with_string(&mut self, keyword: Keyword) -> ParseResult<String> {
        self.expect_keyword(keyword)?;
        self.expect_symbol("(")?;
        let text = string_value(self.expect(TokenKind::String, None)?);
        self.expect_symbol(")")?;
        Ok(text)
    }

    fn parse_component_call(&mut self) -> ParseResult<Node> {
        let name = self.parse_ident()?;
        self.expect_symbol("(")?;
        self.expect_symbol(")")?;
        Ok(Node::ComponentCall { name })
    }

    /// `{ statement* }`
    fn parse_block(&mut self) -> ParseResult<Vec<Node>> {
        let open = self.expect_symbol("{")?;

        let mut body = vec![];
        loop {
            match self.tokens.peek() {
                Some(t) if t.is(TokenKind::Symbol, "}") => break,
                Some(_) => body.push(self.parse_statement()?),
                None => {
                    return Err(ParseError {
                        opened_at: Some(open.span),
                        ..self.error_expected("`}`", None)
                    })
                }
            }
        }

        self.expect_symbol("}")?;
        Ok(body)
    }

    fn parse_ident(&mut self) -> ParseResult<String> {
        self.expect(TokenKind::Identifier, None)
            .map(|t| t.text.clone())
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<&'a Token> {
        self.expect(TokenKind::Keyword, Some(keyword.as_str()))
    }

    fn expect_symbol(&mut self, symbol: &str) -> ParseResult<&'a Token> {
        self.expect(TokenKind::Symbol, Some(symbol))
    }

    fn expect(&mut self, kind: TokenKind, value: Option<&str>) -> ParseResult<&'a Token> {
        match self.tokens.peek() {
            Some(t) if token_matches(t, kind, value) => {
                self.tokens.next();
                Ok(t)
            }
            other => {
                let expected = match value {
                    Some(value) => format!("`{value}`"),
                    None => kind.token_name().to_owned(),
                };
                Err(self.error_expected(expected, other))
            }
        }
    }

    fn check(&self, kind: TokenKind, value: Option<&str>) -> bool {
        self.tokens
            .peek()
            .is_some_and(|t| token_matches(t, kind, value))
    }

    fn error_expected(&self, expected: impl Into<String>, found: Option<&Token>) -> ParseError {
        match found {
            Some(token) => ParseError {
                expected: expected.into(),
                found: format!("`{}`", token.text),
                line: token.line,
                span: token.span,
                opened_at: None,
            },
            None => ParseError {
                expected: expected.into(),
                found: "end of input".to_owned(),
                line: self.eof_line,
                span: self.eof_span,
                opened_at: None,
            },
        }
    }
}

fn token_matches(token: &Token, kind: TokenKind, value: Option<&str>) -> bool {
    token.kind == kind && value.map_or(true, |value| token.text == value)
}

/// The contents of a string token without its quotes.
fn string_value(token: &Token) -> String {
    let text = token.text.as_str();
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
        .to_owned()
}
