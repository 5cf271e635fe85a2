use super::*;

#[test]
fn negative_prompt_gets_everything_goes_wrong_top() {
    assert_eq!(
        synthesize_caption("cats", Sentiment::Negative),
        "When everything goes wrong :: cats"
    );
}

#[test]
fn positive_prompt_gets_best_day_bottom() {
    assert_eq!(
        synthesize_caption("cats", Sentiment::Positive),
        "cats :: Best day ever!"
    );
}

#[test]
fn neutral_prompt_is_unchanged() {
    assert_eq!(synthesize_caption("cats", Sentiment::Neutral), "cats");
}

#[test]
fn split_round_trips_single_delimiter() {
    for text in [
        "top::bottom",
        " spaced :: out ",
        "::only bottom",
        "only top::",
        "When everything goes wrong :: cats",
    ] {
        let c = Caption::parse(text);
        assert_eq!(format!("{}{}{}", c.top, CAPTION_DELIMITER, c.bottom), text);
    }
}

#[test]
fn no_delimiter_puts_everything_on_top() {
    let c = Caption::parse("just one line of text");
    assert_eq!(c.top, "just one line of text");
    assert_eq!(c.bottom, "");
}

#[test]
fn first_delimiter_wins() {
    let c = Caption::parse("a::b::c");
    assert_eq!(c.top, "a");
    assert_eq!(c.bottom, "b::c");
}

#[test]
fn variants_are_plain_upper_and_relatable() {
    let base = synthesize_caption("cats", Sentiment::Positive);
    let v = caption_variants("cats", &base);
    assert_eq!(v.len(), VARIANT_COUNT);
    assert_eq!(v[0], "cats :: Best day ever!");
    assert_eq!(v[1], "CATS :: BEST DAY EVER!");
    assert_eq!(v[2], "cats::Relatable!");
}
