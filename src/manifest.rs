//! Reads the bundled `Package.resolved` and turns its `pins` into
//! [`DependencyDescriptor`]s.
//!
//! Failures never reach the caller: a missing or malformed manifest is logged
//! and yields an empty list.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::models::{DependencyDescriptor, DescriptorError};

/// File name of the manifest shipped next to the executable.
pub const MANIFEST_FILE_NAME: &str = "Package.resolved";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot locate the running executable: {0}")]
    Locate(std::io::Error),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid manifest: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Pins {
    pins: Vec<Pin>,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawPin")]
struct Pin(DependencyDescriptor);

#[derive(Debug, Deserialize)]
struct RawPin {
    identity: String,
    location: Url,
}

impl TryFrom<RawPin> for Pin {
    type Error = DescriptorError;

    fn try_from(raw: RawPin) -> Result<Self, Self::Error> {
        DependencyDescriptor::new(raw.identity, raw.location).map(Pin)
    }
}

/// Which descriptors to leave out besides the malformed `.git/` ones.
#[derive(Debug, Clone, Default)]
pub struct ExclusionPolicy {
    /// Drop the descriptor whose name equals this identity (the tool itself).
    pub self_identity: Option<String>,
}

pub struct ManifestParser {
    policy: ExclusionPolicy,
}

impl ManifestParser {
    pub fn new(policy: ExclusionPolicy) -> Self {
        Self { policy }
    }

    /// Parse the bundled manifest. Returns an empty list if it is missing or
    /// cannot be decoded.
    pub fn parse_packages(&self) -> Vec<DependencyDescriptor> {
        match bundled_manifest_path() {
            Ok(path) => self.parse_file(&path),
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        }
    }

    fn parse_file(&self, path: &Path) -> Vec<DependencyDescriptor> {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(source) => {
                let e = ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                tracing::warn!("{}", e);
                return Vec::new();
            }
        };
        self.parse_slice(&content)
    }

    fn parse_slice(&self, content: &[u8]) -> Vec<DependencyDescriptor> {
        match decode(content) {
            Ok(descriptors) => self.filter(descriptors),
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        }
    }

    fn filter(&self, descriptors: Vec<DependencyDescriptor>) -> Vec<DependencyDescriptor> {
        descriptors
            .into_iter()
            .filter(|d| !d.main_url().as_str().contains(".git/"))
            .filter(|d| self.policy.self_identity.as_deref() != Some(d.name.as_str()))
            .collect()
    }
}

fn decode(content: &[u8]) -> Result<Vec<DependencyDescriptor>, ManifestError> {
    let pins: Pins = serde_json::from_slice(content)?;
    let descriptors = pins
        .pins
        .into_iter()
        .map(|Pin(descriptor)| {
            tracing::debug!(
                name = %descriptor.name,
                location = %descriptor.repository_url,
                "decoded pin"
            );
            descriptor
        })
        .collect();
    Ok(descriptors)
}

/// `Package.resolved` in the directory holding the running executable.
fn bundled_manifest_path() -> Result<PathBuf, ManifestError> {
    let exe = std::env::current_exe().map_err(ManifestError::Locate)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(MANIFEST_FILE_NAME))
}
