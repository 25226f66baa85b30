//! Subcommands and the helpers they share.

pub mod config;
pub mod init;
pub mod process;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use renpdf_core::{DocumentCategory, RenpdfConfig};

/// Document category selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Financing contracts, named `{cpf}_{contract}.pdf`
    Contracts,
    /// Certificates "with reference to the name of", named `{name}-2.pdf`
    #[value(name = "certificates-2")]
    Certificates2,
    /// Registry-office certificates, named `{name}-5.pdf` or `{name}-6.pdf`
    #[value(name = "certificates-5-6")]
    Certificates56,
}

impl From<Mode> for DocumentCategory {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Contracts => DocumentCategory::Contract,
            Mode::Certificates2 => DocumentCategory::CertificateByName,
            Mode::Certificates56 => DocumentCategory::CertificateByOffice,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("renpdf")
        .join("config.json")
}

/// The file named by `--config`, else the default file when present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RenpdfConfig> {
    if let Some(path) = config_path {
        return RenpdfConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        RenpdfConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        Ok(RenpdfConfig::default())
    }
}

/// `--base-dir`, else the configured base folder, else the executable's folder.
pub fn resolve_base_dir(arg: Option<PathBuf>, config: &RenpdfConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = arg.or_else(|| config.paths.base_dir.clone()) {
        return Ok(dir);
    }

    let exe = std::env::current_exe().context("Cannot locate the executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("Executable has no parent folder: {}", exe.display()))
}
