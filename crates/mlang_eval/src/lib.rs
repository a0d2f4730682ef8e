mod environment;
mod event;
mod interpreter;
mod sink;

pub use environment::{Binding, Environment};
pub use event::RenderEvent;
pub use interpreter::{EvalMode, Interpreter, InterpreterConfig};
pub use sink::{LogSink, RenderSink};
