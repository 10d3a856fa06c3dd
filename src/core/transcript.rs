//! # Transcript
//!
//! The scrolling log of output lines. Text is sanitized on the way in so
//! remote content (post titles, index text) can never smuggle terminal
//! control sequences onto the screen.

/// Presentation tag carried by every line. Only the renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// `> input` echo of a submitted line
    Echo,
    Output,
    Error,
    /// One search hit
    Result,
    Welcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub class: LineClass,
}

#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<Line>,
    /// Bumped on every change; the view re-pins to the bottom when it moves.
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends `text`, one transcript line per `\n`-separated part.
    /// Returns the index of the last line written.
    pub fn push(&mut self, text: &str, class: LineClass) -> usize {
        for part in text.split('\n') {
            self.lines.push(Line {
                text: sanitize(part),
                class,
            });
        }
        self.revision += 1;
        self.lines.len() - 1
    }

    pub fn echo(&mut self, input: &str) -> usize {
        self.push(&format!("> {input}"), LineClass::Echo)
    }

    /// Appends a character to an existing line. Ignored if the line is gone
    /// (the transcript was cleared in between).
    pub fn append_to(&mut self, index: usize, c: char) {
        if let Some(line) = self.lines.get_mut(index) {
            line.text.push_str(&sanitize(c.encode_utf8(&mut [0; 4])));
            self.revision += 1;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.revision += 1;
    }

    pub fn last_text(&self) -> Option<&str> {
        self.lines.last().map(|l| l.text.as_str())
    }
}

/// Replaces tabs with spaces and drops every other control character.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_splits_lines() {
        let mut t = Transcript::new();
        let idx = t.push("one\ntwo", LineClass::Output);
        assert_eq!(idx, 1);
        assert_eq!(t.len(), 2);
        assert_eq!(t.lines()[0].text, "one");
        assert_eq!(t.lines()[1].text, "two");
    }

    #[test]
    fn test_echo_format() {
        let mut t = Transcript::new();
        t.echo("/help");
        assert_eq!(t.last_text(), Some("> /help"));
        assert_eq!(t.lines()[0].class, LineClass::Echo);
    }

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        assert_eq!(sanitize("\x1b[31mred\x1b[0m\tok"), "[31mred[0m ok");
    }

    #[test]
    fn test_append_after_clear_is_ignored() {
        let mut t = Transcript::new();
        let idx = t.push("", LineClass::Welcome);
        t.append_to(idx, 'a');
        assert_eq!(t.last_text(), Some("a"));

        t.clear();
        t.append_to(idx, 'b');
        assert!(t.is_empty());
    }

    #[test]
    fn test_revision_moves_on_every_change() {
        let mut t = Transcript::new();
        let r0 = t.revision();
        t.push("x", LineClass::Output);
        let r1 = t.revision();
        t.clear();
        assert!(r1 > r0);
        assert!(t.revision() > r1);
    }
}
