//! Build product directories and scoped artifact extraction.

use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{Result, ToolchainError};

/// A directory of named outputs from a toolchain run.
#[derive(Debug, Clone)]
pub struct BuildProducts {
    dir: PathBuf,
}

impl BuildProducts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        BuildProducts { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dir.join(name).is_file()
    }

    /// Read an artifact into memory.
    pub fn get(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(ToolchainError::MissingArtifact {
                name: name.to_string(),
            });
        }
        Ok(std::fs::read(path)?)
    }

    /// Copy an artifact to a scoped temporary file. The copy is deleted
    /// when the returned handle drops, on every exit path, including a
    /// consumer that fails to start at all.
    pub fn extract(&self, name: &str) -> Result<ExtractedArtifact> {
        let data = self.get(name)?;
        let mut file = NamedTempFile::new()?;
        file.write_all(&data)?;
        file.flush()?;
        Ok(ExtractedArtifact {
            file,
            name: name.to_string(),
        })
    }

    /// SHA-256 of an artifact, hex-encoded.
    pub fn digest(&self, name: &str) -> Result<String> {
        let data = self.get(name)?;
        let mut hasher = Sha256::new();
        hasher.update(&data);
        Ok(hex_encode(&hasher.finalize()))
    }
}

/// Scoped temporary copy of one build artifact.
#[derive(Debug)]
pub struct ExtractedArtifact {
    file: NamedTempFile,
    name: String,
}

impl ExtractedArtifact {
    /// Path of the temporary copy; valid until the handle drops.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Name of the artifact this was extracted from.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Encode bytes as lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products_with(name: &str, data: &[u8]) -> (tempfile::TempDir, BuildProducts) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(name), data).unwrap();
        let products = BuildProducts::new(dir.path());
        (dir, products)
    }

    #[test]
    fn get_reads_artifact() {
        let (_dir, products) = products_with("blinky.fs", b"bitstream");
        assert!(products.contains("blinky.fs"));
        assert_eq!(products.get("blinky.fs").unwrap(), b"bitstream");
    }

    #[test]
    fn missing_artifact_is_an_error() {
        let (_dir, products) = products_with("blinky.fs", b"bitstream");
        assert!(matches!(
            products.get("other.fs"),
            Err(ToolchainError::MissingArtifact { .. })
        ));
    }

    #[test]
    fn extract_copies_and_cleans_up_on_drop() {
        let (_dir, products) = products_with("blinky.fs", b"bitstream");
        let extracted = products.extract("blinky.fs").unwrap();
        let temp_path = extracted.path().to_path_buf();
        assert_eq!(extracted.name(), "blinky.fs");
        assert_eq!(std::fs::read(&temp_path).unwrap(), b"bitstream");

        drop(extracted);
        assert!(!temp_path.exists());
    }

    #[test]
    fn digest_is_stable_sha256() {
        let (_dir, products) = products_with("blinky.fs", b"abc");
        assert_eq!(
            products.digest("blinky.fs").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
