use proptest::prelude::*;
use shader_core::Tokenizer;

fn drain(mut tokens: Tokenizer) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(token) = tokens.next_token() {
        out.push(token.to_owned());
    }
    out
}

proptest! {
    #[test]
    fn comments_are_invisible(
        words in prop::collection::vec("[a-z0-9_.{}$]{1,8}", 0..20),
        comment in "[a-z ]{0,12}",
    ) {
        let plain = words.join(" ");
        let mut commented = String::new();
        for (i, word) in words.iter().enumerate() {
            commented.push_str(word);
            if i % 3 == 0 {
                commented.push_str(&format!(" // {comment}\n"));
            } else {
                commented.push_str(&format!(" /* {comment}\n{comment} */ "));
            }
        }

        prop_assert_eq!(drain(Tokenizer::new(&commented)), drain(Tokenizer::new(&plain)));
    }

    #[test]
    fn quoted_run_is_one_token(
        before in "[a-z]{1,6}",
        inner in prop::collection::vec("[a-z_]{1,6}", 1..5),
        after in "[a-z]{1,6}",
    ) {
        let quoted = inner.join(" ");
        let src = format!("{before} \"{quoted}\" {after}");
        prop_assert_eq!(drain(Tokenizer::new(&src)), vec![before, quoted, after]);
    }

    #[test]
    fn rewind_then_read_is_stable(words in prop::collection::vec("[a-z]{1,5}", 1..10)) {
        let mut tokens = Tokenizer::new(&words.join("\t"));
        for word in &words {
            prop_assert_eq!(tokens.next_token(), Some(word.as_str()));
            prop_assert_eq!(tokens.prev_token(), Some(word.as_str()));
            prop_assert_eq!(tokens.next_token(), Some(word.as_str()));
        }
        prop_assert!(tokens.is_eof());
    }
}

#[test]
fn windows_line_endings_and_tabs() {
    let tokens = drain(Tokenizer::new("a\r\n\tb // c\r\nd"));
    assert_eq!(tokens, vec!["a", "b", "d"]);
}

#[test]
fn line_comment_is_removed_before_block_comment() {
    // The `//` eats the block terminator on its line, so the block never closes.
    let tokens = drain(Tokenizer::new("x /* a // b */ y\nz"));
    assert_eq!(tokens, vec!["x", "/*", "a", "z"]);
}
