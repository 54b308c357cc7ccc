//! Comment-stripping, quote-aware tokenizer for shader scripts.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

// Patterns are constant, so compiling them cannot fail.
// `//` comments are removed before block comments.
#[allow(clippy::expect_used)]
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)//.*$").expect("valid regex"));
#[allow(clippy::expect_used)]
static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));
#[allow(clippy::expect_used)]
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([^\s"]+)|"([^"]+)""#).expect("valid regex"));

/// An immutable token stream with a forward cursor and a one-token rewind.
///
/// The stream itself never changes after construction; only the cursor moves.
/// A rewind is allowed once after each successful [`Tokenizer::next_token`].
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    tokens: Vec<String>,
    offset: usize,
    /// Set by a successful read, cleared by a rewind.
    can_rewind: bool,
}

impl Tokenizer {
    /// Tokenizes `src`, dropping comments and grouping double-quoted runs.
    pub fn new(src: &str) -> Self {
        let without_lines = LINE_COMMENT.replace_all(src, "");
        let stripped = BLOCK_COMMENT.replace_all(&without_lines, "");

        let tokens = TOKEN
            .captures_iter(&stripped)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_owned())
            .collect::<Vec<_>>();

        trace!("Tokenized {} bytes into {} tokens", src.len(), tokens.len());
        Self::from_tokens(tokens)
    }

    /// Builds a stream from already split tokens. Empty strings are kept and skipped by the cursor.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            offset: 0,
            can_rewind: false,
        }
    }

    /// Returns `true` once no non-empty token remains ahead of the cursor.
    pub fn is_eof(&self) -> bool {
        self.tokens[self.offset.min(self.tokens.len())..]
            .iter()
            .all(String::is_empty)
    }

    /// Consumes and returns the next non-empty token, or `None` past the end.
    pub fn next_token(&mut self) -> Option<&str> {
        while self.offset < self.tokens.len() {
            let index = self.offset;
            self.offset += 1;
            if !self.tokens[index].is_empty() {
                self.can_rewind = true;
                return Some(&self.tokens[index]);
            }
        }
        self.can_rewind = false;
        None
    }

    /// Rewinds the cursor onto the most recently read token and returns it.
    ///
    /// Only one rewind is permitted per read; further calls return `None`
    /// without moving the cursor.
    pub fn prev_token(&mut self) -> Option<&str> {
        if !self.can_rewind {
            return None;
        }
        self.can_rewind = false;
        while self.offset > 0 {
            self.offset -= 1;
            if !self.tokens[self.offset].is_empty() {
                return Some(&self.tokens[self.offset]);
            }
        }
        None
    }

    /// All tokens in source order, independent of the cursor.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Current cursor position (index of the next token to read).
    pub const fn position(&self) -> usize {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(src: &str) -> Vec<String> {
        let mut tokens = Tokenizer::new(src);
        let mut out = Vec::new();
        while let Some(token) = tokens.next_token() {
            out.push(token.to_owned());
        }
        out
    }

    #[test]
    fn strips_line_and_block_comments() {
        let src = "a // one\nb /* two\nthree */ c";
        assert_eq!(collect(src), vec!["a", "b", "c"]);
    }

    #[test]
    fn block_comments_do_not_nest() {
        assert_eq!(collect("/* a /* b */ c */ d"), vec!["c", "*/", "d"]);
    }

    #[test]
    fn quoted_runs_are_single_tokens() {
        assert_eq!(
            collect(r#"map "textures/my dir/a.tga" x"#),
            vec!["map", "textures/my dir/a.tga", "x"]
        );
        // An empty quoted run yields nothing.
        assert_eq!(collect(r#"a "" b"#), vec!["a", "b"]);
    }

    #[test]
    fn tokens_ignore_the_cursor() {
        let mut tokens = Tokenizer::new("a { b }");
        assert_eq!(tokens.next_token(), Some("a"));
        assert_eq!(tokens.next_token(), Some("{"));
        assert_eq!(tokens.tokens(), ["a", "{", "b", "}"]);
        assert_eq!(tokens.position(), 2);
    }

    #[test]
    fn next_past_end_is_none() {
        let mut tokens = Tokenizer::new("only");
        assert!(!tokens.is_eof());
        assert_eq!(tokens.next_token(), Some("only"));
        assert!(tokens.is_eof());
        assert_eq!(tokens.next_token(), None);
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn rewind_returns_last_token_once() {
        let mut tokens = Tokenizer::new("a b c");
        tokens.next_token();
        assert_eq!(tokens.next_token(), Some("b"));
        assert_eq!(tokens.prev_token(), Some("b"));
        assert_eq!(tokens.prev_token(), None);
        assert_eq!(tokens.next_token(), Some("b"));
        assert_eq!(tokens.next_token(), Some("c"));
    }

    #[test]
    fn rewind_before_any_read_is_refused() {
        let mut tokens = Tokenizer::new("a");
        assert_eq!(tokens.prev_token(), None);
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn empty_artifacts_are_skipped_both_ways() {
        let mut tokens = Tokenizer::from_tokens(
            ["", "a", "", "", "b", ""].iter().map(|s| (*s).to_owned()).collect(),
        );
        assert_eq!(tokens.next_token(), Some("a"));
        assert_eq!(tokens.next_token(), Some("b"));
        assert!(tokens.is_eof());
        assert_eq!(tokens.prev_token(), Some("b"));
        assert!(!tokens.is_eof());
        assert_eq!(tokens.next_token(), Some("b"));
        assert_eq!(tokens.next_token(), None);
    }
}
