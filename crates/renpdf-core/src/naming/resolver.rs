//! Output file names and collision handling.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Answers whether a file name is already taken in the destination.
pub trait Destination {
    fn exists(&self, name: &str) -> bool;
}

impl Destination for Path {
    fn exists(&self, name: &str) -> bool {
        Path::exists(&self.join(name))
    }
}

impl Destination for PathBuf {
    fn exists(&self, name: &str) -> bool {
        Destination::exists(self.as_path(), name)
    }
}

impl Destination for HashSet<String> {
    fn exists(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Suffix scheme used when a name is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStyle {
    /// `base_1.pdf`, `base_2.pdf`, ...
    Underscore,
    /// `base.1.pdf`, `base.2.pdf`, ...
    Dotted,
}

/// Builds destination names from a base and an extension.
#[derive(Debug, Clone)]
pub struct FileNameResolver {
    extension: String,
}

impl FileNameResolver {
    pub fn new() -> Self {
        Self {
            extension: "pdf".to_string(),
        }
    }

    /// First name, starting from `base.ext`, that `destination` does not hold.
    ///
    /// The destination is checked again for every candidate.
    pub fn resolve<D: Destination + ?Sized>(&self, base: &str, style: CollisionStyle, destination: &D) -> String {
        let name = format!("{}.{}", base, self.extension);
        if !destination.exists(&name) {
            return name;
        }

        let mut counter: u64 = 1;
        loop {
            let candidate = match style {
                CollisionStyle::Underscore => format!("{}_{}.{}", base, counter, self.extension),
                CollisionStyle::Dotted => format!("{}.{}.{}", base, counter, self.extension),
            };
            if !destination.exists(&candidate) {
                debug!("{} taken, using {}", name, candidate);
                return candidate;
            }
            counter += 1;
        }
    }
}

impl Default for FileNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// `{cpf}_{contract}`
pub fn contract_base(cpf: &str, contract: &str) -> String {
    format!("{}_{}", cpf, contract)
}

/// `{name}-{code}`
pub fn certificate_base(name: &str, code: &str) -> String {
    format!("{}-{}", name, code)
}
