
use std::str::Chars;

use mlang_diagnostic::span::Span;
use mlang_diagnostic::{Diagnostic, IntoDiagnostic, Snippet};
use mlang_utils::peek::Peek;

use crate::token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character {character:?} at line {line}")]
pub struct LexError {
    pub character: char,
    pub line: u32,
    pub span: Span,
}

impl IntoDiagnostic for LexError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error()
            .with_message(format!("unexpected character {:?}", self.character))
            .with_snippet(Snippet::primary("no token starts here", self.span))
    }
}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    token_start: usize,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            token_start: 0,
            line: 1,
        }
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token()? {
            tracing::trace!(kind = %token.kind, text = %token.text, line = token.line, "token");
            tokens.push(token);
        }

        tracing::debug!(count = tokens.len(), lines = self.line, "lexed source");

        Ok(tokens)
    }

    fn lex_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            self.token_start = self.byte_pos();
            let line = self.line;

            let Some(ch) = self.chars.next() else {
                return Ok(None);
            };

            let kind = match ch {
                ch if is_ident_start(ch) => self.lex_alpha(),

                '0'..='9' => {
                    self.chars.eat_while(char::is_ascii_digit);
                    TokenKind::Number
                }

                '"' => self.lex_string()?,

                '(' | ')' | '{' | '}' | '[' | ']' | '.' | ',' => TokenKind::Symbol,

                ch if ch.is_whitespace() => {
                    self.chars.eat_while(|ch| ch.is_whitespace());
                    self.advance_lines();
                    continue;
                }

                '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!' | '&' | '|' => TokenKind::Operator,

                character => {
                    return Err(LexError {
                        character,
                        line,
                        span: self.span(),
                    })
                }
            };

            let text = self.all[self.token_start..self.byte_pos()].to_owned();
            self.advance_lines();

            return Ok(Some(Token {
                kind,
                text,
                line,
                span: self.span(),
            }));
        }
    }

    fn lex_alpha(&mut self) -> TokenKind {
        self.chars.eat_while(|&ch| is_ident(ch));

        let s = &self.all[self.token_start..self.byte_pos()];

        // a reserved word touching a word character on either side (a digit
        // before it, or a non-ASCII letter after it) is not a whole word
        let before = self.all[..self.token_start].chars().next_back();
        let whole_word = !before.is_some_and(is_word_char)
            && !self.chars.peek().is_some_and(is_word_char);

        match Keyword::from_str(s) {
            Some(_) if whole_word => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        }
    }

    fn lex_string(&mut self) -> LexResult<TokenKind> {
        self.chars.eat_while(|&ch| ch != '"');

        if self.chars.eat('"') {
            Ok(TokenKind::String)
        } else {
            Err(LexError {
                character: '"',
                line: self.line,
                span: Span::new(self.token_start, self.token_start + 1),
            })
        }
    }

    fn advance_lines(&mut self) {
        let newlines = self.all[self.token_start..self.byte_pos()]
            .bytes()
            .filter(|&b| b == b'\n')
            .count();
        self.line += newlines as u32;
    }

    fn span(&self) -> Span {
        Span::new(self.token_start, self.byte_pos())
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
