//! Cursor context
//!
//! Pure helpers that look at a line and a cursor offset and decide which
//! word is being typed and which completed word should steer completion.

/// The line and cursor of one completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorContext<'a> {
    pub line: &'a str,

    /// Byte offset of the cursor, always on a char boundary
    pub pos: usize,
}

impl<'a> CursorContext<'a> {
    pub fn new(line: &'a str, pos: usize) -> Self {
        let mut pos = pos.min(line.len());
        while !line.is_char_boundary(pos) {
            pos -= 1;
        }
        CursorContext { line, pos }
    }

    pub fn text_before_cursor(&self) -> &'a str {
        &self.line[..self.pos]
    }

    pub fn char_before_cursor(&self) -> Option<char> {
        self.text_before_cursor().chars().next_back()
    }

    /// Offset where the word being typed starts
    pub fn word_start(&self) -> usize {
        self.text_before_cursor()
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    /// The partial word left of the cursor; empty right after a space
    pub fn word_before_cursor(&self) -> &'a str {
        &self.line[self.word_start()..self.pos]
    }

    /// The completed word that decides what kind of candidates to offer.
    ///
    /// After whitespace this is the last word before the cursor. Otherwise the
    /// last word is still being typed, so the one before it is used.
    pub fn word_for_completion(&self) -> Option<&'a str> {
        let words: Vec<&str> = self.text_before_cursor().split_whitespace().collect();
        if self.char_before_cursor().is_some_and(char::is_whitespace) {
            words.last().copied()
        } else {
            words.len().checked_sub(2).map(|i| words[i])
        }
    }

    /// Second-to-last word before the cursor, regardless of trailing space
    pub fn last_second_word(&self) -> Option<&'a str> {
        let words: Vec<&str> = self.text_before_cursor().split_whitespace().collect();
        words.len().checked_sub(2).map(|i| words[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_end(line: &str) -> CursorContext<'_> {
        CursorContext::new(line, line.len())
    }

    #[test]
    fn test_word_for_completion_while_typing() {
        assert_eq!(at_end("run --mod").word_for_completion(), Some("run"));
        assert_eq!(at_end("run --config a.y").word_for_completion(), Some("--config"));
    }

    #[test]
    fn test_word_for_completion_after_space() {
        assert_eq!(at_end("xyz ").word_for_completion(), Some("xyz"));
        assert_eq!(at_end("run --module ").word_for_completion(), Some("--module"));
    }

    #[test]
    fn test_word_for_completion_missing() {
        assert_eq!(at_end("").word_for_completion(), None);
        assert_eq!(at_end("ru").word_for_completion(), None);
        assert_eq!(at_end("   ").word_for_completion(), None);
    }

    #[test]
    fn test_word_before_cursor() {
        assert_eq!(at_end("run --mod").word_before_cursor(), "--mod");
        assert_eq!(at_end("run ").word_before_cursor(), "");
        assert_eq!(at_end("ru").word_before_cursor(), "ru");
        assert_eq!(at_end("run --mod").word_start(), 4);
    }

    #[test]
    fn test_cursor_in_middle_of_line() {
        let ctx = CursorContext::new("run --config a.yml", 7);
        assert_eq!(ctx.text_before_cursor(), "run --c");
        assert_eq!(ctx.word_before_cursor(), "--c");
        assert_eq!(ctx.word_for_completion(), Some("run"));
    }

    #[test]
    fn test_cursor_clamped_to_char_boundary() {
        let ctx = CursorContext::new("env é", 5);
        assert_eq!(ctx.pos, 4);
        let ctx = CursorContext::new("env", 99);
        assert_eq!(ctx.pos, 3);
    }

    #[test]
    fn test_last_second_word() {
        assert_eq!(at_end("run --module ").last_second_word(), Some("run"));
        assert_eq!(at_end("run").last_second_word(), None);
    }

    #[test]
    fn test_multibyte_whitespace() {
        let ctx = at_end("run\u{3000}");
        assert_eq!(ctx.word_start(), 6);
        assert_eq!(ctx.word_before_cursor(), "");
        assert_eq!(ctx.word_for_completion(), Some("run"));

        let ctx = at_end("run\u{3000}--");
        assert_eq!(ctx.word_start(), 6);
        assert_eq!(ctx.word_before_cursor(), "--");
        assert_eq!(ctx.word_for_completion(), Some("run"));
    }

    #[test]
    fn test_tab_finishes_word() {
        assert_eq!(at_end("run\t").word_for_completion(), Some("run"));
        assert_eq!(at_end("run\t--mod").word_before_cursor(), "--mod");
    }
}
