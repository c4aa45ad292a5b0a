use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::path::Path;

/// Writes `content` to `path`, creating missing parent directories.
///
/// The target is overwritten unconditionally: no diff check, no backup, no
/// temporary file. A failure halfway leaves previously written files in place.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| InfrastructureError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content.as_ref()).map_err(|source| InfrastructureError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
