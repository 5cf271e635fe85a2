use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::MemeResult;

/// Write `bytes` to `path` through a sibling temp file and a rename.
///
/// Readers never observe a half-written file. Missing parent directories are created. On failure
/// the temp file is removed.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> MemeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }

    let tmp = temp_path_for(path);
    let result = write_and_sync(&tmp, bytes).and_then(|()| {
        fs::rename(&tmp, path)
            .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), path.display()))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    Ok(result?)
}

fn write_and_sync(tmp: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut f = File::create(tmp).with_context(|| format!("create '{}'", tmp.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write '{}'", tmp.display()))?;
    f.sync_all()
        .with_context(|| format!("sync '{}'", tmp.display()))?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/fs.rs"]
mod tests;
