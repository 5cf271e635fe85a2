use std::{
    cell::RefCell,
    io::{BufRead, Write},
    path::PathBuf,
};

/// Extensions a template picker accepts.
pub const TEMPLATE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Asks the user for a template file.
pub trait TemplatePicker {
    /// The chosen file, or `None` when the user cancelled.
    fn pick_template(&self) -> Option<PathBuf>;
}

/// Native file dialog restricted to [`TEMPLATE_EXTENSIONS`].
///
/// Blocking; safe to call from a synchronous `main` with no async runtime running.
#[cfg(feature = "file-picker")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DialogPicker;

#[cfg(feature = "file-picker")]
impl TemplatePicker for DialogPicker {
    fn pick_template(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select Template Image or GIF")
            .set_directory(".")
            .add_filter("Image Files", &TEMPLATE_EXTENSIONS)
            .pick_file()
    }
}

/// Reads a template path typed on a console.
pub struct ConsolePicker<R, W> {
    io: RefCell<(R, W)>,
}

impl<R: BufRead, W: Write> ConsolePicker<R, W> {
    /// Prompt on `output`, read the path from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: RefCell::new((input, output)),
        }
    }
}

impl<R: BufRead, W: Write> TemplatePicker for ConsolePicker<R, W> {
    fn pick_template(&self) -> Option<PathBuf> {
        let mut io = self.io.borrow_mut();
        let (input, output) = &mut *io;
        write!(output, "Template path (jpg/jpeg/png/gif): ").ok()?;
        output.flush().ok()?;
        let mut line = String::new();
        input.read_line(&mut line).ok()?;
        let path = PathBuf::from(line.trim());
        if path.as_os_str().is_empty() || !has_template_extension(&path) {
            return None;
        }
        Some(path)
    }
}

/// The native dialog when built with `file-picker`, otherwise a stdin prompt.
pub fn default_picker() -> Box<dyn TemplatePicker> {
    #[cfg(feature = "file-picker")]
    {
        Box::new(DialogPicker)
    }
    #[cfg(not(feature = "file-picker"))]
    {
        Box::new(ConsolePicker::new(
            std::io::BufReader::new(std::io::stdin()),
            std::io::stdout(),
        ))
    }
}

fn has_template_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| TEMPLATE_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
#[path = "../../tests/unit/session/picker.rs"]
mod tests;
