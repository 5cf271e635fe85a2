use super::*;

#[test]
fn short_text_is_one_line() {
    assert_eq!(wrap_words("hello world", 25), ["hello world"]);
}

#[test]
fn breaks_on_word_boundaries() {
    let lines = wrap_words("When everything goes wrong at the office again", 25);
    assert_eq!(lines, ["When everything goes", "wrong at the office again"]);
}

#[test]
fn lines_never_exceed_budget_unless_single_long_word() {
    let text = "a bb ccc dddd eeeee supercalifragilisticexpialidocious ff g hhhhhhh i jj";
    for width in 1..=30 {
        for line in wrap_words(text, width) {
            let len = line.chars().count();
            assert!(
                len <= width || !line.contains(' '),
                "width {width}: line '{line}' is {len} chars"
            );
        }
    }
}

#[test]
fn long_word_passes_through_unsplit() {
    let lines = wrap_words("tiny antidisestablishmentarianism end", 10);
    assert_eq!(lines, ["tiny", "antidisestablishmentarianism", "end"]);
}

#[test]
fn wrapping_preserves_word_order() {
    let text = "one two three four five six seven eight nine ten";
    let joined = wrap_words(text, 9).join(" ");
    assert_eq!(joined, text);
}

#[test]
fn blank_text_yields_no_lines() {
    assert!(wrap_words("", 25).is_empty());
    assert!(wrap_words("   \t ", 25).is_empty());
}

#[test]
fn budget_counts_chars_not_bytes() {
    assert_eq!(wrap_words("héhé héhé", 9), ["héhé héhé"]);
}
