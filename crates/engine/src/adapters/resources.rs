//! Resource loaders for bundled pin material.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::error::{PinError, PinResult};
use crate::domain::resource_loader::ResourceLoader;

/// Reads `<root>/<resource_name>.<resource_kind>` from disk, e.g. an app
/// bundle's resource directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resource_path(&self, resource_name: &str, resource_kind: &str) -> PinResult<PathBuf> {
        validate_component(resource_name)?;
        if resource_kind.is_empty() {
            return Ok(self.root.join(resource_name));
        }
        validate_component(resource_kind)?;
        Ok(self.root.join(format!("{resource_name}.{resource_kind}")))
    }
}

// Names stay inside the root: no separators, no parent references.
fn validate_component(part: &str) -> PinResult<()> {
    if part.is_empty() || part == "." || part == ".." || part.contains(['/', '\\', '\0']) {
        return Err(PinError::Config(format!("invalid resource name component: {part:?}")));
    }
    Ok(())
}

impl ResourceLoader for DirectoryLoader {
    fn load_bytes(
        &self,
        host_identifier: &str,
        resource_name: &str,
        resource_kind: &str,
    ) -> PinResult<Vec<u8>> {
        let path = self.resource_path(resource_name, resource_kind)?;
        tracing::debug!(host = host_identifier, path = %path.display(), "loading pin resource");
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PinError::ResourceNotFound {
                name: resource_name.to_string(),
                kind: resource_kind.to_string(),
            },
            _ => PinError::ResourceLoad(e),
        })
    }
}

/// In-memory bundle keyed by `(resource_name, resource_kind)`. Suited to
/// material compiled in with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    entries: HashMap<(String, String), Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        resource_name: impl Into<String>,
        resource_kind: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.entries
            .insert((resource_name.into(), resource_kind.into()), bytes.into());
        self
    }

    pub fn with(
        mut self,
        resource_name: impl Into<String>,
        resource_kind: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(resource_name, resource_kind, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceLoader for MemoryLoader {
    fn load_bytes(
        &self,
        _host_identifier: &str,
        resource_name: &str,
        resource_kind: &str,
    ) -> PinResult<Vec<u8>> {
        self.entries
            .get(&(resource_name.to_string(), resource_kind.to_string()))
            .cloned()
            .ok_or_else(|| PinError::ResourceNotFound {
                name: resource_name.to_string(),
                kind: resource_kind.to_string(),
            })
    }
}
