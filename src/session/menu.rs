use std::{
    fmt::Display,
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;

use crate::{
    foundation::config::GeneratorConfig,
    foundation::error::{MemeError, MemeResult},
    generator::{GenerateOptions, MemeGenerator, PromptOutcome},
    render::style::Style,
    session::picker::TemplatePicker,
    session::prompts::{parse_prompt_list, read_prompts_file},
    template::catalog::{LocalTemplate, TemplateSource},
};

const MENU: &str = "\nAI Meme Generator
1. Single Prompt
2. Multiple Prompts (comma separated)
3. From file (prompts.txt)
4. Custom Template Upload
5. Batch Generate from prompts.txt
6. Exit";

/// Top-level menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// One typed prompt.
    Single,
    /// Comma-separated prompts.
    Multiple,
    /// Prompts file.
    FromFile,
    /// User-picked template, one prompt, optional style.
    CustomTemplate,
    /// Prompts file, announcing the prompt count first.
    BatchFromFile,
    /// Leave the session.
    Exit,
}

impl MenuChoice {
    /// Parse the menu number typed by the user.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Single),
            "2" => Some(Self::Multiple),
            "3" => Some(Self::FromFile),
            "4" => Some(Self::CustomTemplate),
            "5" => Some(Self::BatchFromFile),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Session settings taken from [`GeneratorConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    /// File read by the batch entries.
    pub prompts_file: PathBuf,
    /// Catalog templates fetched for typed prompts.
    pub interactive_limit: usize,
    /// Catalog templates fetched for file batches.
    pub batch_limit: usize,
}

impl SessionOptions {
    /// Extract the session-facing parts of `cfg`.
    pub fn from_config(cfg: &GeneratorConfig) -> Self {
        Self {
            prompts_file: cfg.prompts_file.clone(),
            interactive_limit: cfg.catalog.interactive_limit,
            batch_limit: cfg.catalog.batch_limit,
        }
    }
}

enum Flow {
    AskToContinue,
    BackToMenu,
}

/// Interactive menu loop over any line reader and writer.
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    generator: &'a mut MemeGenerator,
    catalog: &'a mut dyn TemplateSource,
    picker: &'a dyn TemplatePicker,
    opts: SessionOptions,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Wire a session to its collaborators.
    pub fn new(
        input: R,
        output: W,
        generator: &'a mut MemeGenerator,
        catalog: &'a mut dyn TemplateSource,
        picker: &'a dyn TemplatePicker,
        opts: SessionOptions,
    ) -> Self {
        Self {
            input,
            output,
            generator,
            catalog,
            picker,
            opts,
        }
    }

    /// Run until the user exits or input ends. Operation failures are printed, not returned;
    /// only console I/O errors end the loop with an error.
    pub fn run(&mut self) -> MemeResult<()> {
        loop {
            self.say(MENU)?;
            let Some(choice) = self.ask("Choose option: ")? else {
                return Ok(());
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Exit) => {
                    self.say("Exiting AI Meme Generator. Goodbye!")?;
                    return Ok(());
                }
                Some(choice) => match self.dispatch(choice) {
                    Ok(flow) => flow,
                    Err(e) => {
                        tracing::debug!(error = %e, ?choice, "menu operation failed");
                        self.say(format!("Error: {e}"))?;
                        Flow::AskToContinue
                    }
                },
                None => {
                    self.say("Invalid choice. Please select 1-6.")?;
                    Flow::AskToContinue
                }
            };

            if let Flow::BackToMenu = flow {
                continue;
            }
            let answer = self
                .ask("\nDo you want to create another meme? (yes/no): ")?
                .unwrap_or_default()
                .to_ascii_lowercase();
            if answer != "yes" && answer != "y" {
                self.say("Done! Exiting AI Meme Generator.")?;
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> MemeResult<Flow> {
        match choice {
            MenuChoice::Single => {
                let prompt = self.ask("Enter meme idea: ")?.unwrap_or_default();
                if prompt.is_empty() {
                    self.say("No prompt entered.")?;
                    return Ok(Flow::AskToContinue);
                }
                self.generate_from_catalog(vec![prompt], self.opts.interactive_limit, Style::None)?;
            }
            MenuChoice::Multiple => {
                let line = self
                    .ask("Enter meme ideas (comma separated): ")?
                    .unwrap_or_default();
                let prompts = parse_prompt_list(&line);
                if prompts.is_empty() {
                    self.say("No prompts entered.")?;
                    return Ok(Flow::AskToContinue);
                }
                self.generate_from_catalog(prompts, self.opts.interactive_limit, Style::None)?;
            }
            MenuChoice::FromFile => {
                let prompts = read_prompts_file(&self.opts.prompts_file)?;
                self.generate_from_catalog(prompts, self.opts.batch_limit, Style::None)?;
            }
            MenuChoice::BatchFromFile => {
                let prompts = read_prompts_file(&self.opts.prompts_file)?;
                self.say(format!("Generating memes for {} prompts...", prompts.len()))?;
                self.generate_from_catalog(prompts, self.opts.batch_limit, Style::None)?;
            }
            MenuChoice::CustomTemplate => {
                self.say("Select your custom template file:")?;
                let Some(path) = self.picker.pick_template() else {
                    self.say("No file selected. Returning to menu.")?;
                    return Ok(Flow::BackToMenu);
                };
                let templates = LocalTemplate::new(path).templates(1)?;
                let prompt = self.ask("Enter meme idea: ")?.unwrap_or_default();
                let style = Style::parse(
                    &self
                        .ask("Style? (none/grayscale/cartoon): ")?
                        .unwrap_or_default(),
                );
                let outcomes = self.generator.generate(
                    &[prompt],
                    &templates,
                    &GenerateOptions { style },
                )?;
                self.report(&outcomes)?;
            }
            MenuChoice::Exit => {}
        }
        Ok(Flow::AskToContinue)
    }

    fn generate_from_catalog(
        &mut self,
        prompts: Vec<String>,
        limit: usize,
        style: Style,
    ) -> MemeResult<()> {
        let templates = match self.catalog.templates(limit) {
            Ok(t) => t,
            Err(e @ MemeError::Network(_)) => {
                self.say(format!("Could not fetch templates: {e}"))?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let outcomes = self
            .generator
            .generate(&prompts, &templates, &GenerateOptions { style })?;
        self.report(&outcomes)
    }

    fn report(&mut self, outcomes: &[PromptOutcome]) -> MemeResult<()> {
        for o in outcomes {
            let line = match &o.classification {
                Some(c) => format!("Context detected for '{}': {}", o.prompt, c.context_label),
                None => format!("Context unavailable for '{}'", o.prompt),
            };
            self.say(line)?;
        }
        let paths: Vec<PathBuf> = outcomes
            .iter()
            .flat_map(|o| o.outputs.iter().map(|m| m.path.clone()))
            .collect();
        self.say(format!("\nGenerated {} memes:", paths.len()))?;
        for (i, p) in paths.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, p.display()))?;
        }
        Ok(())
    }

    fn say(&mut self, msg: impl Display) -> MemeResult<()> {
        writeln!(self.output, "{msg}").context("write to console")?;
        Ok(())
    }

    // `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> MemeResult<Option<String>> {
        write!(self.output, "{prompt}").context("write to console")?;
        self.output.flush().context("flush console")?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("read from console")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/menu.rs"]
mod tests;
