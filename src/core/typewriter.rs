//! # Typewriter
//!
//! Reveals queued lines one character per tick. The ticks come from a
//! scheduler outside the core (a tokio interval in the TUI); stopping the
//! scheduler is the cancellation, and `finish` flushes whatever is left.

use std::collections::VecDeque;

use crate::core::transcript::{LineClass, Transcript};

struct Typing {
    index: usize,
    chars: Vec<char>,
    next: usize,
}

pub struct Typewriter {
    queue: VecDeque<String>,
    current: Option<Typing>,
    class: LineClass,
}

impl Typewriter {
    pub fn new(lines: Vec<String>, class: LineClass) -> Self {
        Self {
            queue: lines.into(),
            current: None,
            class,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some() || !self.queue.is_empty()
    }

    /// Advances the animation by one step. Returns `false` once everything
    /// has been written.
    pub fn tick(&mut self, transcript: &mut Transcript) -> bool {
        if self.current.is_none() {
            let Some(line) = self.queue.pop_front() else {
                return false;
            };
            let index = transcript.push("", self.class);
            self.current = Some(Typing {
                index,
                chars: line.chars().collect(),
                next: 0,
            });
        }

        if let Some(typing) = self.current.as_mut() {
            match typing.chars.get(typing.next) {
                Some(&c) => {
                    transcript.append_to(typing.index, c);
                    typing.next += 1;
                }
                None => self.current = None,
            }
        }
        self.is_pending()
    }

    /// Writes out everything still pending at once.
    pub fn finish(&mut self, transcript: &mut Transcript) {
        if let Some(typing) = self.current.take() {
            for &c in &typing.chars[typing.next..] {
                transcript.append_to(typing.index, c);
            }
        }
        for line in self.queue.drain(..) {
            transcript.push(&line, self.class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_one_char_per_tick() {
        let mut transcript = Transcript::new();
        let mut tw = Typewriter::new(vec!["hi".to_string()], LineClass::Welcome);

        assert!(tw.tick(&mut transcript));
        assert_eq!(transcript.last_text(), Some("h"));
        assert!(tw.tick(&mut transcript));
        assert_eq!(transcript.last_text(), Some("hi"));
        // One more tick to notice the line is done
        assert!(!tw.tick(&mut transcript));
        assert!(!tw.is_pending());
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_runs_lines_in_order() {
        let mut transcript = Transcript::new();
        let mut tw = Typewriter::new(vec!["ab".to_string(), "c".to_string()], LineClass::Welcome);
        while tw.tick(&mut transcript) {}
        let texts: Vec<&str> = transcript.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "c"]);
    }

    #[test]
    fn test_finish_flushes_partial_and_queued_lines() {
        let mut transcript = Transcript::new();
        let mut tw = Typewriter::new(
            vec!["hello".to_string(), "world".to_string()],
            LineClass::Welcome,
        );
        tw.tick(&mut transcript);
        tw.tick(&mut transcript);
        assert_eq!(transcript.last_text(), Some("he"));

        tw.finish(&mut transcript);
        assert!(!tw.is_pending());
        let texts: Vec<&str> = transcript.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "world"]);
    }

    #[test]
    fn test_other_output_does_not_corrupt_typed_line() {
        let mut transcript = Transcript::new();
        let mut tw = Typewriter::new(vec!["ab".to_string()], LineClass::Welcome);
        tw.tick(&mut transcript);
        transcript.push("Error: Could not load search data.", LineClass::Error);
        tw.finish(&mut transcript);
        assert_eq!(transcript.lines()[0].text, "ab");
        assert_eq!(transcript.lines()[1].text, "Error: Could not load search data.");
    }
}
