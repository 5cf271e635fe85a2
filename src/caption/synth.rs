use crate::classify::classifier::Sentiment;

/// Structural token separating top text from bottom text.
pub const CAPTION_DELIMITER: &str = "::";

/// Number of captions derived from one base caption.
pub const VARIANT_COUNT: usize = 3;

/// A caption split into its top and bottom halves.
///
/// Halves are kept verbatim (untrimmed) so `top + "::" + bottom` reproduces the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caption {
    /// Text above the delimiter, or the whole caption when there is none.
    pub top: String,
    /// Text after the first delimiter; empty when there is none.
    pub bottom: String,
}

impl Caption {
    /// Split on the first [`CAPTION_DELIMITER`]. Later occurrences stay in `bottom`.
    pub fn parse(text: &str) -> Self {
        match text.split_once(CAPTION_DELIMITER) {
            Some((top, bottom)) => Self {
                top: top.to_string(),
                bottom: bottom.to_string(),
            },
            None => Self {
                top: text.to_string(),
                bottom: String::new(),
            },
        }
    }
}

/// Build the base caption for `prompt` from its sentiment.
pub fn synthesize_caption(prompt: &str, sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Negative => format!("When everything goes wrong :: {prompt}"),
        Sentiment::Positive => format!("{prompt} :: Best day ever!"),
        Sentiment::Neutral => prompt.to_string(),
    }
}

/// Expand a base caption into the rendered variants: plain, shouted, and the "Relatable!" take.
pub fn caption_variants(prompt: &str, base: &str) -> [String; VARIANT_COUNT] {
    [
        base.to_string(),
        base.to_uppercase(),
        format!("{prompt}{CAPTION_DELIMITER}Relatable!"),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/caption/synth.rs"]
mod tests;
