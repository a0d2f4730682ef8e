//! The `source -> events` pipeline: lexing, parsing and evaluation, with
//! error reporting for embedders and the command line.

pub mod diagnostics;


use diagnostics::DiagnosticEmitter;
use mlang_diagnostic::source::Source;
use mlang_diagnostic::{Diagnostic, IntoDiagnostic};
use mlang_eval::{Interpreter, InterpreterConfig, RenderEvent, RenderSink};
use mlang_syntax::ast::Node;
use mlang_syntax::token::Token;
use mlang_syntax::{LexError, ParseError};

pub use mlang_eval::EvalMode;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IntoDiagnostic for PipelineError {
    fn into_diagnostic(self) -> Diagnostic {
        match self {
            PipelineError::Lex(err) => err.into_diagnostic(),
            PipelineError::Parse(err) => err.into_diagnostic(),
        }
    }
}

/// Tokenize, parse and evaluate `source` with a fresh reference-mode
/// interpreter, collecting the emitted events.
pub fn run(source: &str) -> Result<Vec<RenderEvent>, PipelineError> {
    run_with(source, InterpreterConfig::default())
}

pub fn run_with(
    source: &str,
    config: InterpreterConfig,
) -> Result<Vec<RenderEvent>, PipelineError> {
    let tokens = mlang_syntax::tokenize(source)?;
    let ast = mlang_syntax::parse(tokens)?;

    let mut interpreter = Interpreter::with_config(vec![], config);
    interpreter.interpret(&ast);

    let events = interpreter.into_sink();
    tracing::debug!(count = events.len(), "collected events");

    Ok(events)
}

/// Marker returned once an error has been handed to the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("errors were emitted")]
pub struct ErrorsEmitted;

/// One source unit together with somewhere to report its diagnostics.
pub struct Session<D: DiagnosticEmitter> {
    pub source: Source,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(source: Source, diagnostics: D) -> Self {
        Self {
            source,
            diagnostics,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ErrorsEmitted> {
        let result = mlang_syntax::tokenize(self.source.text());
        self.check(result)
    }

    pub fn parse(&mut self) -> Result<Vec<Node>, ErrorsEmitted> {
        let tokens = self.tokenize()?;
        let result = mlang_syntax::parse(tokens);
        self.check(result)
    }

    /// Run the whole pipeline, feeding events into `sink`.
    pub fn evaluate<S: RenderSink>(
        &mut self,
        sink: S,
        config: InterpreterConfig,
    ) -> Result<S, ErrorsEmitted> {
        let ast = self.parse()?;

        let mut interpreter = Interpreter::with_config(sink, config);
        interpreter.interpret(&ast);

        Ok(interpreter.into_sink())
    }

    pub fn report(&mut self, diagnostic: impl IntoDiagnostic) -> ErrorsEmitted {
        self.diagnostics
            .emit_diagnostic(diagnostic.into_diagnostic(), &self.source);
        ErrorsEmitted
    }

    fn check<T, E: IntoDiagnostic>(&mut self, result: Result<T, E>) -> Result<T, ErrorsEmitted> {
        result.map_err(|err| self.report(err))
    }
}
