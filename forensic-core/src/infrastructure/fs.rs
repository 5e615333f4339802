// forensic-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes through a temporary file in the target directory, then renames it
/// over the target. Readers see the old file or the new one, never a mix.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    // Same directory: a rename across filesystems is not atomic.
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Writes an exported rule set, creating missing parent directories.
pub fn write_export(path: &Path, payload: &str) -> Result<(), InfrastructureError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    atomic_write(path, payload)?;
    info!("💾 Rule set exported to {:?} ({} bytes)", path, payload.len());
    Ok(())
}
