//! Where wizard definitions come from.

use std::path::{Path, PathBuf};

use crate::error::GraphValidationError;
use crate::graph::WizardDefinition;

/// Supplies wizard definitions by domain tag.
#[cfg_attr(test, mockall::automock)]
pub trait GraphSource: Send + Sync {
    /// Domain tags this source can supply, in display order.
    fn wizards(&self) -> Vec<String>;

    /// The definition for `wizard`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphValidationError::UnknownWizard`] if the source has no
    /// such wizard, or [`GraphValidationError::InvalidDefinition`] if its
    /// content cannot be read or parsed.
    fn definition(&self, wizard: &str) -> Result<WizardDefinition, GraphValidationError>;
}

const EMBEDDED: [(&str, &str); 4] = [
    ("electrical", include_str!("../../wizards/electrical.json")),
    ("automotive", include_str!("../../wizards/automotive.json")),
    ("lawn-garden", include_str!("../../wizards/lawn-garden.json")),
    ("motorcycle", include_str!("../../wizards/motorcycle.json")),
];

/// Wizards compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl GraphSource for EmbeddedSource {
    fn wizards(&self) -> Vec<String> {
        EMBEDDED.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn definition(&self, wizard: &str) -> Result<WizardDefinition, GraphValidationError> {
        let (_, json) = EMBEDDED
            .iter()
            .find(|(name, _)| *name == wizard)
            .ok_or_else(|| GraphValidationError::UnknownWizard {
                wizard: wizard.to_string(),
            })?;
        WizardDefinition::from_json(wizard, json)
    }
}

/// Wizards read from `<dir>/<wizard>.json` at runtime.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Source over `dir`. The directory is read lazily.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, wizard: &str) -> PathBuf {
        self.dir.join(format!("{wizard}.json"))
    }
}

impl GraphSource for DirectorySource {
    /// Stems of every `.json` file, sorted.
    fn wizards(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "Cannot read wizard directory");
                return Vec::new();
            }
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names
    }

    fn definition(&self, wizard: &str) -> Result<WizardDefinition, GraphValidationError> {
        let path = self.path_for(wizard);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GraphValidationError::UnknownWizard {
                    wizard: wizard.to_string(),
                }
            } else {
                GraphValidationError::InvalidDefinition {
                    wizard: wizard.to_string(),
                    message: format!("Failed to read {}: {e}", path.display()),
                }
            }
        })?;
        let def = WizardDefinition::from_json(wizard, &json)?;
        if def.wizard != wizard {
            return Err(GraphValidationError::InvalidDefinition {
                wizard: wizard.to_string(),
                message: format!("file declares wizard '{}'", def.wizard),
            });
        }
        Ok(def)
    }
}
