mod cli;


use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser as _;
use cli::{Cli, Command, FormatArg, Input};
use mlang_diagnostic::source::Source;
use mlang_eval::{InterpreterConfig, LogSink, RenderEvent};
use mlang_session::diagnostics::{DiagnosticEmitter, PrettyDiagnosticEmitter};
use mlang_session::{ErrorsEmitted, Session};
use mlang_syntax::pretty::PrettyPrinter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("error writing json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("errors while running")]
    HadErrors(#[from] ErrorsEmitted),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,

        // diagnostics have already been printed
        Err(CliError::HadErrors(_)) => ExitCode::FAILURE,

        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, and only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let source = load(cli.command.input())?;
    let mut session = Session::new(source, PrettyDiagnosticEmitter::new(cli.color.into()));

    tracing::debug!(name = session.source.name(), "loaded source");

    let stdout = io::stdout();
    execute(&cli.command, &mut session, &mut stdout.lock())
}

fn execute<D: DiagnosticEmitter>(
    command: &Command,
    session: &mut Session<D>,
    out: &mut impl Write,
) -> CliResult<()> {
    match *command {
        Command::Run {
            mode,
            max_depth,
            format,
            ..
        } => {
            let config = InterpreterConfig {
                mode: mode.into(),
                max_call_depth: max_depth,
            };

            match format {
                FormatArg::Text => {
                    session.evaluate(LogSink::new(&mut *out), config)?.finish()?;
                }
                FormatArg::Json => {
                    let events: Vec<RenderEvent> = session.evaluate(vec![], config)?;
                    serde_json::to_writer_pretty(&mut *out, &events)?;
                    writeln!(out)?;
                }
            }
        }

        Command::Tokens { .. } => {
            for token in session.tokenize()? {
                writeln!(out, "{}\t{}\t{:?}", token.line, token.kind, token.text)?;
            }
        }

        Command::Ast { .. } => {
            let ast = session.parse()?;
            write!(out, "{}", PrettyPrinter::default().print_program(&ast))?;
        }
    }

    Ok(())
}

fn load(input: &Input) -> io::Result<Source> {
    if input.source {
        Ok(Source::new("<source>", input.input.clone()))
    } else {
        let text = std::fs::read_to_string(&input.input)?;
        Ok(Source::new(input.input.clone(), text))
    }
}
