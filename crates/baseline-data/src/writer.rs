//! Profile persistence.

use std::path::Path;

use baseline_core::error::{BaselineError, Result};
use baseline_core::models::Profile;
use tracing::debug;

/// Write `profile` to `path` as pretty-printed JSON.
///
/// The document is written to a sibling temp file and then renamed into
/// place, so a failure never leaves a truncated profile behind. Missing
/// parent directories are created.
pub fn write_profile(profile: &Profile, path: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| BaselineError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut json = serde_json::to_string_pretty(profile)?;
    json.push('\n');

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    debug!("Wrote {} keys to {}", profile.len(), path.display());
    Ok(())
}

/// Load a profile previously written by [`write_profile`].
pub fn read_profile(path: &Path) -> Result<Profile> {
    let content = std::fs::read_to_string(path).map_err(|source| BaselineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
