use std::path::PathBuf;

use crate::error::RegistryError;
use crate::tables::RawTables;

const EMBEDDED_YAML: &str = include_str!("embedded.yaml");

/// Where a [`crate::registry::TopologyRegistry`]'s configuration comes from.
pub enum RegistrySource {
    /// In-memory YAML, parsed directly. Used by tests and by embedders
    /// that already have the configuration loaded.
    Bytes(Vec<u8>),
    /// Read from disk once at startup.
    FilePath(PathBuf),
    /// The compiled-in default table set, covering the full closed
    /// edge-type/join-type/arithmetic-law sets.
    Embedded,
}

impl RegistrySource {
    pub(crate) fn load_raw(self) -> Result<RawTables, RegistryError> {
        match self {
            Self::Bytes(bytes) => Ok(serde_yaml::from_slice(&bytes)?),
            Self::FilePath(path) => {
                let contents = std::fs::read_to_string(&path).map_err(|err| {
                    RegistryError::Parse(serde_yaml::Error::from(std::io::Error::new(
                        err.kind(),
                        format!("failed to read registry source {}: {err}", path.display()),
                    )))
                })?;
                Ok(serde_yaml::from_str(&contents)?)
            }
            Self::Embedded => Ok(serde_yaml::from_str(EMBEDDED_YAML)?),
        }
    }
}
