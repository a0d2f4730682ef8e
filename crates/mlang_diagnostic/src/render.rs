use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::source::Source;
use super::{Config, Diagnostic, SnippetKind};

const TAB: &str = "    ";

impl Diagnostic {
    pub fn write_to_stream(
        &self,
        source: &Source,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            source,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor> {
    diagnostic: &'a Diagnostic,
    source: &'a Source,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor> DiagnosticWriter<'_, 'a, W> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        let snippets = self.snippet_data();

        let Some((first_line, last_line)) = snippets
            .iter()
            .map(|s| s.line)
            .fold(None, |acc: Option<(usize, usize)>, line| match acc {
                Some((lo, hi)) => Some((lo.min(line), hi.max(line))),
                None => Some((line, line)),
            })
        else {
            writeln!(self.stream)?;
            return Ok(());
        };

        let start = first_line.saturating_sub(self.config.context_size);
        let end = (last_line + 1 + self.config.context_size).min(self.source.num_lines());

        let line_num_width = end.max(1).ilog10() as usize + 1;

        self.draw_location(&snippets[0])?;

        for line in start..end {
            self.draw_gutter(Some(line + 1), line_num_width)?;

            let line_str = self
                .source
                .line_str(line)
                .unwrap_or_default()
                .replace('\t', TAB);
            writeln!(self.stream, "{line_str}")?;

            for snippet in snippets.iter().filter(|s| s.line == line) {
                self.draw_underline(snippet, line_num_width)?;
            }
        }

        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(&self.config.error_color)?;
        write!(self.stream, "error:")?;
        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_location(&mut self, snippet: &SnippetData) -> io::Result<()> {
        let (line, col) = self
            .source
            .byte_to_line_col(snippet.start)
            .unwrap_or((snippet.line + 1, 1));

        self.stream.set_color(&self.config.subtle)?;
        writeln!(self.stream, "In {}:{line}:{col}", self.source.name())?;
        self.stream.reset()
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{line:>line_num_width$}")?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()
    }

    fn draw_underline(&mut self, snippet: &SnippetData, line_num_width: usize) -> io::Result<()> {
        self.draw_gutter(None, line_num_width)?;

        let text = self.source.text();
        let line_start = self.source.line_to_byte(snippet.line).unwrap_or(0);
        let line_end = line_start + self.source.line_str(snippet.line).map_or(0, str::len);

        let offset = str_width(text.get(line_start..snippet.start).unwrap_or_default());

        // multi-line spans are only underlined up to the end of their first line
        let underlined = text
            .get(snippet.start..snippet.end.min(line_end))
            .unwrap_or_default();
        let width = str_width(underlined).max(1);

        self.stream.set_color(self.snippet_color(snippet.kind))?;

        write!(self.stream, "{:<offset$}", "")?;
        for _ in 0..width {
            write!(self.stream, "{}", self.config.underline)?;
        }
        writeln!(
            self.stream,
            "{}{}",
            self.config.underline_after, snippet.label
        )?;

        self.stream.reset()
    }

    fn snippet_data(&self) -> Vec<SnippetData<'a>> {
        let mut snippets: Vec<_> = self
            .diagnostic
            .snippets
            .iter()
            .map(|snippet| {
                let start = snippet.span.start.min(self.source.text().len());
                SnippetData {
                    label: &snippet.label,
                    kind: snippet.kind,
                    start,
                    end: snippet.span.end.max(start),
                    line: self.source.byte_to_line_index(start).unwrap_or(0),
                }
            })
            .collect();

        snippets.sort_by_key(|s| s.start);
        snippets
    }

    fn snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => &self.config.error_color,
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    start: usize,
    end: usize,
    line: usize,
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use termcolor::NoColor;

    use crate::source::Source;
    use crate::{Config, Diagnostic, Snippet};

    fn render(diagnostic: &Diagnostic, source: &Source) -> String {
        let mut stream = NoColor::new(vec![]);
        diagnostic
            .write_to_stream(source, &Config::default(), &mut stream)
            .unwrap();
        String::from_utf8(stream.into_inner()).unwrap()
    }

    #[test]
    fn single_line_snippet() {
        let source = Source::new("main.m", "View { @ }");
        let diagnostic = Diagnostic::error()
            .with_message("unexpected character '@'")
            .with_snippet(Snippet::primary("not valid here", 7..8));

        let expected = [
            "error: unexpected character '@'",
            "In main.m:1:8",
            "1 │ View { @ }",
            "  │        ^ not valid here",
            "",
            "",
        ]
        .join("\n");

        assert_eq!(render(&diagnostic, &source), expected);
    }

    #[test]
    fn context_lines_around_snippet() {
        let source = Source::new("main.m", "a()\nb(\nc()\nd()");
        let diagnostic = Diagnostic::error()
            .with_message("expected `)`")
            .with_snippet(Snippet::primary("here", 7..8));

        let expected = [
            "error: expected `)`",
            "In main.m:3:1",
            "2 │ b(",
            "3 │ c()",
            "  │ ^ here",
            "4 │ d()",
            "",
            "",
        ]
        .join("\n");

        assert_eq!(render(&diagnostic, &source), expected);
    }

    #[test]
    fn secondary_snippet_on_earlier_line() {
        let source = Source::new("main.m", "View {\n  Text(\"a\")");
        let diagnostic = Diagnostic::error()
            .with_message("expected `}`, found end of input at line 2")
            .with_snippet(Snippet::primary("expected `}`", 18..18))
            .with_snippet(Snippet::secondary("block opened here", 5..6));

        let expected = [
            "error: expected `}`, found end of input at line 2",
            "In main.m:1:6",
            "1 │ View {",
            "  │      ^ block opened here",
            "2 │   Text(\"a\")",
            "  │            ^ expected `}`",
            "",
            "",
        ]
        .join("\n");

        assert_eq!(render(&diagnostic, &source), expected);
    }

    #[test]
    fn no_snippets() {
        let source = Source::new("main.m", "");
        let diagnostic = Diagnostic::error().with_message("nothing to run");

        assert_eq!(render(&diagnostic, &source), "error: nothing to run\n\n");
    }
}
