use clap::{Args, Parser, Subcommand, ValueEnum};
use mlang_diagnostic::termcolor::ColorChoice;
use mlang_eval::{EvalMode, InterpreterConfig};

#[derive(Parser)]
#[command(author, version, about = "Run M- programs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// When to color diagnostics.
    #[arg(long, value_enum, global = true, default_value_t = ColorArg::Auto)]
    pub color: ColorArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a program and print the events it produces.
    Run {
        #[command(flatten)]
        input: Input,

        /// Evaluation rules to follow.
        #[arg(long, value_enum, default_value_t = ModeArg::Reference)]
        mode: ModeArg,

        /// How deeply component calls may nest.
        #[arg(long, default_value_t = InterpreterConfig::default().max_call_depth)]
        max_depth: usize,

        /// Output format for events.
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },

    /// Print the tokens of a program, one per line.
    Tokens {
        #[command(flatten)]
        input: Input,
    },

    /// Print a program as parsed.
    Ast {
        #[command(flatten)]
        input: Input,
    },
}

impl Command {
    pub fn input(&self) -> &Input {
        match self {
            Command::Run { input, .. } | Command::Tokens { input } | Command::Ast { input } => {
                input
            }
        }
    }
}

#[derive(Args)]
pub struct Input {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[clap(long, short, action)]
    pub source: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Do not evaluate `View` children; functions are not callable.
    Reference,
    /// Evaluate `View` children and allow calling functions.
    Corrected,
}

impl From<ModeArg> for EvalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Reference => EvalMode::Reference,
            ModeArg::Corrected => EvalMode::Corrected,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// One line per event.
    Text,
    /// A JSON array of events.
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}
