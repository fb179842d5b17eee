//! Export destinations

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::error::ExportError;
use crate::wav::WavBytes;

/// File name offered for every exported clip unless configured otherwise
pub const DEFAULT_EXPORT_FILE_NAME: &str = "edited.wav";

/// Somewhere an encoded clip can be delivered to
///
/// Delivery is all-or-nothing: on error no file is left behind.
pub trait ExportTarget {
    /// Deliver `wav` under `file_name`, returning where it landed
    fn deliver(&self, wav: &WavBytes, file_name: &str) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory, replacing any previous file atomically
#[derive(Debug, Clone)]
pub struct DirectoryExport {
    dir: PathBuf,
}

impl DirectoryExport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Accept bare file names only (no separators, no `.`/`..`)
fn validate_file_name(file_name: &str) -> Result<(), ExportError> {
    let invalid = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\']);
    if invalid {
        return Err(ExportError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}

impl ExportTarget for DirectoryExport {
    fn deliver(&self, wav: &WavBytes, file_name: &str) -> Result<PathBuf, ExportError> {
        validate_file_name(file_name)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| ExportError::CreateDir {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.dir.join(file_name);
        let write_err = |source: std::io::Error| ExportError::Write {
            path: path.clone(),
            source,
        };

        // Stage next to the destination so the rename stays on one filesystem
        let mut staged = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        staged.write_all(wav.as_bytes()).map_err(write_err)?;
        staged.flush().map_err(write_err)?;
        staged.persist(&path).map_err(|e| write_err(e.error))?;

        log::info!(
            "deliver: Wrote {} ({} bytes, {})",
            path.display(),
            wav.len(),
            wav.mime_type()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleBuffer;
    use crate::wav::encode_wav;

    fn sample_wav() -> WavBytes {
        let buffer = SampleBuffer::mono(44100, vec![0.5, -0.5, 1.0, -1.0]).unwrap();
        encode_wav(&buffer, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_deliver_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryExport::new(dir.path().join("exports"));
        let wav = sample_wav();

        let path = target.deliver(&wav, DEFAULT_EXPORT_FILE_NAME).unwrap();

        assert!(path.ends_with("exports/edited.wav"));
        assert_eq!(std::fs::read(&path).unwrap(), wav.as_bytes());
        // Only the final file remains
        assert_eq!(std::fs::read_dir(target.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_deliver_replaces_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryExport::new(dir.path());
        std::fs::write(dir.path().join("edited.wav"), b"stale").unwrap();

        let wav = sample_wav();
        let path = target.deliver(&wav, "edited.wav").unwrap();

        assert_eq!(std::fs::read(path).unwrap().len(), wav.len());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryExport::new(dir.path());
        let wav = sample_wav();

        for name in ["", ".", "..", "../escape.wav", "sub/clip.wav"] {
            assert!(matches!(
                target.deliver(&wav, name),
                Err(ExportError::InvalidFileName(_))
            ));
        }
    }
}
