//! External tesseract executable wrapper
//!
//! The engine is an explicit configuration value: the executable path and
//! language spec are fixed at construction and injected into the detection
//! worker, never stashed in process-global state.

use anyhow::{bail, Context, Result};
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Handle to an external tesseract install
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    program: PathBuf,
    language: Option<String>,
}

impl TesseractEngine {
    /// Point the engine at a tesseract executable.
    ///
    /// `language` is one or more tesseract language codes joined by `+`;
    /// `None` leaves tesseract on its default (English).
    pub fn new(program: &Path, language: Option<String>) -> Result<Self> {
        if !program.is_file() {
            bail!(
                "tesseract executable not found at {} - double check the install path",
                program.display()
            );
        }
        Ok(Self {
            program: program.to_path_buf(),
            language,
        })
    }

    /// Run `--version` against the executable and return the first line.
    ///
    /// Used as a startup check; a tesseract that cannot report its version
    /// cannot run inference either.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .with_context(|| format!("failed to run {} --version", self.program.display()))?;
        if !output.status.success() {
            bail!(
                "{} --version exited with {}",
                self.program.display(),
                output.status
            );
        }
        // Tesseract 3 prints the banner on stderr, 4+ on stdout.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let banner = String::from_utf8_lossy(&banner);
        Ok(banner.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Run detection on a grayscale image, returning the raw TSV record
    /// stream (header line included).
    pub fn image_to_data(&self, image: &GrayImage) -> Result<String> {
        let scratch = tempfile::Builder::new()
            .prefix("realtime-ocr-")
            .suffix(".png")
            .tempfile()
            .context("failed to create scratch image for tesseract")?;
        image
            .save(scratch.path())
            .context("failed to write scratch image for tesseract")?;

        let mut command = Command::new(&self.program);
        command.arg(scratch.path()).arg("stdout");
        if let Some(language) = &self.language {
            command.args(["-l", language]);
        }
        command.arg("tsv");

        let output = command
            .output()
            .with_context(|| format!("failed to run {}", self.program.display()))?;
        if !output.status.success() {
            bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_rejected() {
        let result = TesseractEngine::new(Path::new("/nonexistent/tesseract"), None);
        assert!(result.is_err());
    }

    #[test]
    fn engine_keeps_the_language_spec() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let engine =
            TesseractEngine::new(file.path(), Some("chi_sim+chi_tra".to_string())).unwrap();
        assert_eq!(engine.language.as_deref(), Some("chi_sim+chi_tra"));
    }

    #[cfg(unix)]
    #[test]
    fn version_reports_the_first_banner_line() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-tesseract.sh");
        std::fs::write(&path, "#!/bin/sh\necho 'tesseract 5.3.0'\necho ' leptonica'\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        let engine = TesseractEngine::new(&path, None).unwrap();
        assert_eq!(engine.version().unwrap(), "tesseract 5.3.0");
    }
}
