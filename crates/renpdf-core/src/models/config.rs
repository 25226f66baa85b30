//! Configuration structures for the renaming pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RenpdfError;

/// Main configuration for renpdf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenpdfConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Input/output folder layout.
    pub paths: PathsConfig,

    /// Run log configuration.
    pub log: LogConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum length (bytes of normalized text) of a section after an ID anchor.
    pub id_section_window: usize,

    /// Keep searching the fallback anchors when the primary anchor is
    /// present but its section holds no valid ID.
    pub continue_after_primary_miss: bool,

    /// Number of leading lines rescanned for a labelled contract number.
    pub contract_header_lines: usize,

    /// Leading lines accepted for the rescan even without the contract keyword.
    pub contract_unconditional_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            id_section_window: 1500,
            continue_after_primary_miss: false,
            contract_header_lines: 40,
            contract_unconditional_lines: 10,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Retry with per-page extraction when whole-document extraction yields nothing.
    pub page_fallback: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { page_fallback: true }
    }
}

/// Folder layout for batch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Base folder holding the input and output trees (default: next to the executable).
    pub base_dir: Option<PathBuf>,

    /// Input folder name under the base folder.
    pub input_dir: String,

    /// Output folder name under the base folder.
    pub output_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            input_dir: "input".to_string(),
            output_dir: "output".to_string(),
        }
    }
}

/// Run log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Run log file name prefix; a timestamp and `.csv` are appended.
    pub file_prefix: String,

    /// Field delimiter of the run log.
    pub delimiter: char,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_prefix: "rename_log".to_string(),
            delimiter: ';',
        }
    }
}

impl RenpdfConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RenpdfError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RenpdfError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Input folder for a category under `base`.
    pub fn input_dir(&self, base: &Path, folder: &str) -> PathBuf {
        base.join(&self.paths.input_dir).join(folder)
    }

    /// Output folder for a category under `base`.
    pub fn output_dir(&self, base: &Path, folder: &str) -> PathBuf {
        base.join(&self.paths.output_dir).join(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"id_section_window": 800}}"#).unwrap();

        let config = RenpdfConfig::from_file(&path).unwrap();
        assert_eq!(config.extraction.id_section_window, 800);
        assert_eq!(config.extraction.contract_header_lines, 40);
        assert!(!config.extraction.continue_after_primary_miss);
        assert_eq!(config.log.delimiter, ';');
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RenpdfConfig::default();
        config.paths.base_dir = Some(PathBuf::from("/srv/renpdf"));
        config.save(&path).unwrap();

        let loaded = RenpdfConfig::from_file(&path).unwrap();
        assert_eq!(loaded.paths.base_dir, Some(PathBuf::from("/srv/renpdf")));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = RenpdfConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, RenpdfError::Config(ref msg) if msg.contains("config.json")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RenpdfConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RenpdfError::Io(_)));
    }

    #[test]
    fn test_category_dirs() {
        let config = RenpdfConfig::default();
        let base = Path::new("/base");
        assert_eq!(config.input_dir(base, "contracts"), PathBuf::from("/base/input/contracts"));
        assert_eq!(config.output_dir(base, "contracts"), PathBuf::from("/base/output/contracts"));
    }
}
