use std::path::Path;

use crate::foundation::error::{MemeError, MemeResult};

/// Split a comma-separated line into trimmed, non-empty prompts.
pub fn parse_prompt_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read one prompt per non-blank line of `path`.
pub fn read_prompts_file(path: &Path) -> MemeResult<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MemeError::file_not_found(format!("no {} file found", path.display()))
        } else {
            MemeError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        }
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/session/prompts.rs"]
mod tests;
