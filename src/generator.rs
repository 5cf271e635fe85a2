use std::path::PathBuf;

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    caption::synth::{VARIANT_COUNT, caption_variants, synthesize_caption},
    classify::classifier::{Classification, ContentClassifier, Sentiment},
    foundation::config::GeneratorConfig,
    foundation::error::{MemeError, MemeResult},
    output::assemble::{MemeOutput, assemble, output_file_name},
    render::frame::CaptionRenderer,
    render::style::Style,
    render::text::GlyphRasterizer,
    template::source::load_template,
};

/// Per-run options chosen by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Post-process style for still templates.
    pub style: Style,
}

/// Everything produced for one prompt.
#[derive(Clone, Debug)]
pub struct PromptOutcome {
    /// The prompt as given.
    pub prompt: String,
    /// Classification, or `None` when the models were unavailable.
    pub classification: Option<Classification>,
    /// Template the outputs were drawn on.
    pub template: PathBuf,
    /// One output per caption variant, in variant order.
    pub outputs: Vec<MemeOutput>,
}

/// Drives classification, caption synthesis and output assembly for batches of prompts.
pub struct MemeGenerator {
    config: GeneratorConfig,
    classifier: ContentClassifier,
    rasterizer: Box<dyn GlyphRasterizer>,
    rng: StdRng,
}

impl std::fmt::Debug for MemeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MemeGenerator {
    /// Assemble a generator from explicitly constructed collaborators.
    pub fn new(
        config: GeneratorConfig,
        classifier: ContentClassifier,
        rasterizer: Box<dyn GlyphRasterizer>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            classifier,
            rasterizer,
            rng,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every caption variant for every prompt.
    ///
    /// Prompt `i`, variant `j` is written to `output_dir/meme_{i}_{j}{ext}` with the chosen
    /// template's extension. Classification failures fall back to a neutral caption; template
    /// load failures abort the run before that prompt writes anything.
    #[tracing::instrument(
        skip(self, prompts, templates),
        fields(prompts = prompts.len(), templates = templates.len())
    )]
    pub fn generate(
        &mut self,
        prompts: &[String],
        templates: &[PathBuf],
        opts: &GenerateOptions,
    ) -> MemeResult<Vec<PromptOutcome>> {
        if templates.is_empty() {
            return Err(MemeError::validation("no templates available"));
        }

        let mut outcomes = Vec::with_capacity(prompts.len());
        for (prompt_index, prompt) in prompts.iter().enumerate() {
            let classification = match self.classifier.classify(prompt) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        %prompt,
                        "classification failed, using neutral caption"
                    );
                    None
                }
            };
            let sentiment = classification
                .as_ref()
                .map_or(Sentiment::Neutral, |c| c.sentiment);

            let template_path = templates
                .choose(&mut self.rng)
                .cloned()
                .ok_or_else(|| MemeError::validation("no templates available"))?;
            let template = load_template(&template_path)?;

            let base = synthesize_caption(prompt, sentiment);
            let renderer = CaptionRenderer::new(self.rasterizer.as_ref(), &self.config.layout);
            let watermark = self.config.watermark.as_deref();

            let mut outputs = Vec::with_capacity(VARIANT_COUNT);
            let variants = caption_variants(prompt, &base);
            for (variant_index, caption) in variants.into_iter().enumerate() {
                let path = self.config.output_dir.join(output_file_name(
                    prompt_index,
                    variant_index,
                    &template.extension,
                ));
                let frames =
                    assemble(&template, &caption, opts.style, watermark, &renderer, &path)?;
                outputs.push(MemeOutput {
                    path,
                    prompt_index,
                    variant_index,
                    caption,
                    frames,
                });
            }

            tracing::info!(
                %prompt,
                template = %template_path.display(),
                outputs = outputs.len(),
                "generated prompt"
            );
            outcomes.push(PromptOutcome {
                prompt: prompt.clone(),
                classification,
                template: template_path,
                outputs,
            });
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
#[path = "../tests/unit/generator.rs"]
mod tests;
