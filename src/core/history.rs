//! # Input History
//!
//! Append-only log of submitted lines with a browsing cursor.
//! The cursor sits in `[0, len]`; `len` means "not browsing".

#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: String) {
        self.entries.push(line);
        self.cursor = self.entries.len();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Steps back one entry. `None` when already at the oldest entry.
    pub fn previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Steps forward one entry. Moving past the newest entry leaves history
    /// and yields `Some("")`; `None` when not browsing at all.
    pub fn next(&mut self) -> Option<&str> {
        if !self.is_browsing() {
            return None;
        }
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            Some(&self.entries[self.cursor])
        } else {
            self.cursor = self.entries.len();
            Some("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(lines: &[&str]) -> HistoryLog {
        let mut log = HistoryLog::new();
        for line in lines {
            log.push(line.to_string());
        }
        log
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut log = log_of(&["a", "b"]);
        log.previous();
        assert_eq!(log.cursor(), 1);
        log.push("c".to_string());
        assert_eq!(log.cursor(), 3);
        assert!(!log.is_browsing());
    }

    #[test]
    fn test_walk_back_and_forward() {
        let mut log = log_of(&["A", "B", "C"]);
        assert_eq!(log.previous(), Some("C"));
        assert_eq!(log.previous(), Some("B"));
        assert_eq!(log.previous(), Some("A"));
        // Clamped at the oldest entry
        assert_eq!(log.previous(), None);
        assert_eq!(log.cursor(), 0);

        assert_eq!(log.next(), Some("B"));
        assert_eq!(log.next(), Some("C"));
        assert_eq!(log.next(), Some(""));
        assert_eq!(log.cursor(), 3);
        assert_eq!(log.next(), None);
    }

    #[test]
    fn test_empty_history() {
        let mut log = HistoryLog::new();
        assert_eq!(log.previous(), None);
        assert_eq!(log.next(), None);
        assert_eq!(log.cursor(), 0);
    }
}
