//! Document loading with the caller-side size bound

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// 10 MiB
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Read a UTF-8 text document, rejecting oversized or blank files
pub fn read_document(path: &Path, max_bytes: u64) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if metadata.len() > max_bytes {
        bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("{} is not valid UTF-8 text", path.display()))?;
    if text.trim().is_empty() {
        bail!("{} contains no text", path.display());
    }

    tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded document");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_reads_text_document() {
        let file = file_with("1. Payment\nThe Client shall pay.".as_bytes());
        let text = read_document(file.path(), DEFAULT_MAX_BYTES).unwrap();
        assert!(text.contains("shall pay"));
    }

    #[test]
    fn test_rejects_oversized_document() {
        let file = file_with(&[b'a'; 64]);
        let err = read_document(file.path(), 63).unwrap_err();
        assert!(err.to_string().contains("byte limit"));
        assert!(read_document(file.path(), 64).is_ok());
    }

    #[test]
    fn test_rejects_blank_document() {
        let file = file_with(b"  \n\t  \n");
        let err = read_document(file.path(), DEFAULT_MAX_BYTES).unwrap_err();
        assert!(err.to_string().contains("contains no text"));
    }

    #[test]
    fn test_rejects_binary_document() {
        let file = file_with(&[0xff, 0xfe, 0x00, 0x41]);
        assert!(read_document(file.path(), DEFAULT_MAX_BYTES).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/contract.txt");
        assert!(read_document(path, DEFAULT_MAX_BYTES).is_err());
    }
}
