//! Package and dependency manifest handling

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{AssignError, Result};

/// The package's own manifest (package.json shape)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: Option<PackageAuthor>,
    #[serde(default)]
    pub repository: Option<PackageRepository>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageRepository {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn repository_url(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .map(|r| r.url.as_str())
            .filter(|u| !u.is_empty())
    }
}

/// Rewrite the value a dependency key points at, keeping its URL form
///
/// Three value shapes are handled the way package managers write them:
/// a value with a `#tag` keeps its base and gets the new tag, a bare
/// `.git` URL gets `#tag` appended, anything else is replaced by the plain
/// version string.
pub fn updated_dependency_value(current: &str, new_version: &str) -> String {
    if let Some(base) = current.split('#').next().filter(|_| current.contains('#')) {
        format!("{}#{}", base, new_version)
    } else if current.ends_with(".git") {
        format!("{}#{}", current, new_version)
    } else {
        new_version.to_string()
    }
}

/// Point `dependency_key` in the manifest at `new_version`
///
/// The manifest is JSON with a top-level `dependencies` object. Fails if
/// the file, the `dependencies` table or the key is missing.
pub fn rewrite_dependency_version(
    manifest_path: &Path,
    dependency_key: &str,
    new_version: &str,
) -> Result<()> {
    let content = std::fs::read_to_string(manifest_path)?;
    let mut manifest: serde_json::Value = serde_json::from_str(&content)?;

    let new_value = rewrite_dependency_value(&mut manifest, dependency_key, new_version)?;

    std::fs::write(manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    tracing::info!("Updated {} to {}", dependency_key, new_value);
    Ok(())
}

/// In-memory half of the rewrite; returns the new dependency value
pub fn rewrite_dependency_value(
    manifest: &mut serde_json::Value,
    dependency_key: &str,
    new_version: &str,
) -> Result<String> {
    let entry = manifest
        .get_mut("dependencies")
        .and_then(|deps| deps.get_mut(dependency_key))
        .ok_or_else(|| {
            AssignError::UpdateError(format!(
                "Dependency '{}' not found in manifest",
                dependency_key
            ))
        })?;

    let current = entry.as_str().ok_or_else(|| {
        AssignError::UpdateError(format!(
            "Dependency '{}' has a non-string value",
            dependency_key
        ))
    })?;

    let new_value = updated_dependency_value(current, new_version);
    *entry = serde_json::Value::String(new_value.clone());
    Ok(new_value)
}
