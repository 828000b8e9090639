//! Indentation-tracking text output for diagram sources.
//!
//! [`IndentingWriter`] accumulates line-oriented output. Indentation is written
//! lazily at the first token of each line, and whitespace requested through
//! [`IndentingWriter::whitespace`] is only emitted when another token follows
//! on the same line, so rendered sources never carry trailing spaces.

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Line-oriented string output with nested indentation.
///
/// # Examples
///
/// ```
/// use documl_core::render::IndentingWriter;
///
/// let mut output = IndentingWriter::new(2);
/// output.append("namespace").whitespace().append("com.acme").whitespace().append("{").newline();
/// output.indented(|output| {
///     output.append("class Widget").whitespace().newline();
/// });
/// output.append("}").newline();
///
/// assert_eq!(output.finish(), "namespace com.acme {\n  class Widget\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct IndentingWriter {
    buffer: String,
    indent_width: usize,
    level: usize,
    at_line_start: bool,
    pending_whitespace: bool,
}

impl IndentingWriter {
    /// Creates an empty writer using `indent_width` spaces per level.
    pub fn new(indent_width: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_width,
            level: 0,
            at_line_start: true,
            pending_whitespace: false,
        }
    }

    /// Appends a token to the current line.
    ///
    /// Line feeds inside `text` start new lines at the current indentation.
    pub fn append(&mut self, text: impl AsRef<str>) -> &mut Self {
        let mut lines = text.as_ref().split('\n');
        if let Some(first) = lines.next() {
            self.write_fragment(first);
        }
        for line in lines {
            self.newline();
            self.write_fragment(line);
        }
        self
    }

    /// Requests a single separating space before the next token on this line.
    pub fn whitespace(&mut self) -> &mut Self {
        if !self.at_line_start {
            self.pending_whitespace = true;
        }
        self
    }

    /// Terminates the current line.
    pub fn newline(&mut self) -> &mut Self {
        self.pending_whitespace = false;
        self.buffer.push('\n');
        self.at_line_start = true;
        self
    }

    /// Runs `f` with the indentation increased by one level.
    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.level += 1;
        f(self);
        self.level -= 1;
        self
    }

    /// The output written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consumes the writer, returning the output.
    pub fn finish(self) -> String {
        self.buffer
    }

    fn write_fragment(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        if self.at_line_start {
            let indentation = self.level * self.indent_width;
            self.buffer.extend(std::iter::repeat_n(' ', indentation));
            self.at_line_start = false;
        } else if self.pending_whitespace && !self.buffer.ends_with(char::is_whitespace) {
            self.buffer.push(' ');
        }
        self.pending_whitespace = false;
        self.buffer.push_str(fragment);
    }
}

impl Default for IndentingWriter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_lazy() {
        let mut output = IndentingWriter::default();
        output.append("class").whitespace().append("Widget").whitespace().newline();

        assert_eq!(output.as_str(), "class Widget\n");
    }

    #[test]
    fn test_whitespace_not_doubled() {
        let mut output = IndentingWriter::default();
        output.append("a").whitespace().whitespace().append("b").newline();

        assert_eq!(output.as_str(), "a b\n");
    }

    #[test]
    fn test_leading_whitespace_ignored() {
        let mut output = IndentingWriter::default();
        output.whitespace().append("a").newline();

        assert_eq!(output.as_str(), "a\n");
    }

    #[test]
    fn test_nested_indentation() {
        let mut output = IndentingWriter::new(2);
        output.append("a").newline();
        output.indented(|output| {
            output.append("b").newline();
            output.indented(|output| {
                output.append("c").newline();
            });
        });
        output.append("d").newline();

        assert_eq!(output.finish(), "a\n  b\n    c\nd\n");
    }

    #[test]
    fn test_embedded_line_feed_keeps_indentation() {
        let mut output = IndentingWriter::new(2);
        output.indented(|output| {
            output.append("first\nsecond").newline();
        });

        assert_eq!(output.as_str(), "  first\n  second\n");
    }

    #[test]
    fn test_empty_lines_have_no_indentation() {
        let mut output = IndentingWriter::new(2);
        output.indented(|output| {
            output.newline();
        });

        assert_eq!(output.as_str(), "\n");
    }
}
