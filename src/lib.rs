//! memegen turns short text prompts into captioned meme images.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: `prompt -> Classification` (sentiment plus best context label)
//! 2. **Synthesize**: `prompt + sentiment -> base caption -> caption variants`
//! 3. **Layout**: `caption + frame size -> CaptionLayout` (wrapped, centered, stacked lines)
//! 4. **Render**: `Template frame + CaptionLayout -> RenderedFrame` (outlined text, watermark)
//! 5. **Assemble**: `RenderedFrame(s) -> file` (still image or looping GIF)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Injected collaborators**: models, glyph rasterizers, template sources and pickers are
//!   trait objects built by the caller, so every stage runs against fakes in tests.
//! - **Templates are read-only**: rendering always produces new frame buffers.
//! - **No partial outputs**: files are encoded in memory and written in one step.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod caption;
mod classify;
mod foundation;
mod generator;
mod layout;
mod output;
mod render;
mod session;
mod template;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use caption::synth::{
    CAPTION_DELIMITER, Caption, VARIANT_COUNT, caption_variants, synthesize_caption,
};
pub use classify::classifier::{
    CONTEXT_LABELS, Classification, ContentClassifier, ContextModel, RankedLabel, Sentiment,
    SentimentModel,
};
pub use classify::hosted::HostedInference;
pub use foundation::config::{
    CatalogConfig, FontConfig, GeneratorConfig, InferenceConfig, LayoutParams,
};
pub use foundation::error::{MemeError, MemeResult};
pub use generator::{GenerateOptions, MemeGenerator, PromptOutcome};
pub use layout::placement::{CaptionLayout, PlacedLine, layout_caption, place_watermark};
pub use layout::wrap::wrap_words;
pub use output::assemble::{MemeOutput, assemble, output_file_name};
pub use render::frame::{CaptionRenderer, RenderedFrame};
pub use render::style::{Style, apply_style};
pub use render::text::{FontRasterizer, GlyphRasterizer, TextMeasure};
pub use session::menu::{MenuChoice, Session, SessionOptions};
pub use session::picker::{ConsolePicker, TemplatePicker, default_picker};
pub use session::prompts::{parse_prompt_list, read_prompts_file};
pub use template::catalog::{CatalogEntry, ImgflipCatalog, LocalTemplate, TemplateSource};
pub use template::source::{Template, TemplateFrame, TemplateKind, load_template};

#[cfg(feature = "file-picker")]
pub use session::picker::DialogPicker;
