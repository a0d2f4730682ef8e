use std::io;

use crate::RenderEvent;

/// Consumer of the events produced by an [`Interpreter`](crate::Interpreter).
pub trait RenderSink {
    fn emit(&mut self, event: RenderEvent);
}

impl RenderSink for Vec<RenderEvent> {
    fn emit(&mut self, event: RenderEvent) {
        self.push(event);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn emit(&mut self, event: RenderEvent) {
        (**self).emit(event);
    }
}

/// Writes each event as one line of text.
///
/// Write failures are kept and reported by [`LogSink::finish`]; events after a
/// failure are dropped.
#[derive(Debug)]
pub struct LogSink<W: io::Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> LogSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => {
                self.writer.flush()?;
                Ok(self.writer)
            }
        }
    }
}

impl<W: io::Write> RenderSink for LogSink<W> {
    fn emit(&mut self, event: RenderEvent) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = writeln!(self.writer, "{event}") {
            self.error = Some(err);
        }
    }
}
