use std::io::{self, Write};

const SPEAKER: &str = "Golu";

/// Prints replies to a terminal-like writer.
#[derive(Debug)]
pub struct TextOutput<W: Write> {
    writer: W,
}

impl TextOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self { writer: io::stdout() }
    }
}

impl<W: Write> TextOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `text` with the speaker label; continuation lines are indented
    /// under it.
    pub fn display(&mut self, text: &str) -> io::Result<()> {
        let indent = " ".repeat(SPEAKER.len() + 2);
        for (i, line) in text.lines().enumerate() {
            if i == 0 {
                writeln!(self.writer, "{}: {}", SPEAKER, line)?;
            } else if line.is_empty() {
                writeln!(self.writer)?;
            } else {
                writeln!(self.writer, "{}{}", indent, line)?;
            }
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_first_line_and_indents_the_rest() {
        let mut out = TextOutput::new(Vec::new());
        out.display("Rust is a language.\n\n👉 Read more: https://example.org").unwrap();
        let printed = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(
            printed,
            "Golu: Rust is a language.\n\n      👉 Read more: https://example.org\n"
        );
    }
}
