//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `sync-config.json` registry of documentation sources, and the logic for
//! loading and validating it.
//!
//! ## Key Components
//!
//! - **`SyncConfig`**: The whole registry, an ordered list of sources.
//! - **`SourceConfig`**: One source descriptor: where to clone from, which
//!   subtree holds the documentation, where it lands in the site, and which
//!   (if any) navigation targets the source owns.
//! - **`DiscoveryMode`**: Which document-discovery strategy the source uses.
//!   The mode also fixes the placement policy: `indexed` sources are placed
//!   additively (preserved hand-written files may coexist), `flat` sources
//!   replace their target subtree wholesale on every run.
//!
//! ## Validation
//!
//! Loading fails fast, before any network action, if required fields are
//! empty, a source name is duplicated, or two sources claim the same nav
//! section header or nav marker. The last rule exists because the shared
//! nav document and template are written once per source: with a duplicated
//! target the later source would silently discard the earlier one's
//! contribution, so duplicates are rejected up front.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Document discovery strategy for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Directory-per-document: each immediate subdirectory holding an
    /// `index.md`/`index.mdx` is one document, with frontmatter metadata.
    #[default]
    Indexed,
    /// Flat recursive: every markdown file under the source root is one
    /// document, slug taken from its relative path, no metadata.
    Flat,
}

/// Configuration for a single documentation source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Unique name of the source, used for `--source` filtering and for the
    /// default temp directory name.
    pub name: String,
    /// URL of the Git repository to mirror documentation from.
    pub repo: String,
    /// Branch to clone.
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Path of the documentation subtree inside the cloned repository.
    pub source_dir: String,
    /// Destination path under the site root (e.g. `docs/guides/app`).
    pub target_dir: String,
    /// Narrow the clone to the declared subpaths only.
    #[serde(default = "default_true")]
    pub sparse_checkout: bool,
    /// Working directory name for the clone, relative to the site root.
    /// Defaults to `.{name}-temp`.
    #[serde(default)]
    pub temp_dir: Option<String>,
    /// Discovery strategy (and with it, placement policy).
    #[serde(default)]
    pub discovery: DiscoveryMode,
    /// Section header label in the site's `mkdocs.yml` nav to splice the
    /// synced documents into (text-splice mode).
    #[serde(default)]
    pub nav_section: Option<String>,
    /// Filenames of existing child entries under the managed section that
    /// survive a splice.
    #[serde(default)]
    pub preserve_nav_entries: Vec<String>,
    /// Path of the source repository's own `mkdocs.yml` (or equivalent),
    /// relative to the clone root. Enables marker-substitution nav merging
    /// and subnav injection.
    #[serde(default)]
    pub external_nav: Option<String>,
    /// Marker token whose line in the site's `mkdocs.yml` is replaced with
    /// the reprojected external nav (marker mode).
    #[serde(default)]
    pub nav_marker: Option<String>,
    /// Page-template file under the site root that receives the rendered
    /// subnav fragment.
    #[serde(default)]
    pub template_file: Option<String>,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_true() -> bool {
    true
}

impl SourceConfig {
    /// Working directory name for this source's clone.
    pub fn temp_dir_name(&self) -> String {
        self.temp_dir
            .clone()
            .unwrap_or_else(|| format!(".{}-temp", self.name))
    }

    /// The target directory as seen from the MkDocs nav, which resolves
    /// paths relative to `docs/`.
    pub fn nav_prefix(&self) -> &str {
        self.target_dir
            .strip_prefix("docs/")
            .unwrap_or(&self.target_dir)
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("repo", &self.repo),
            ("sourceDir", &self.source_dir),
            ("targetDir", &self.target_dir),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("source field '{}' must not be empty", field),
                    hint: None,
                });
            }
        }

        if self.nav_marker.is_some() && self.external_nav.is_none() {
            return Err(Error::Config {
                message: format!("source '{}': navMarker requires externalNav", self.name),
                hint: Some("set 'externalNav' to the repository's own nav file".to_string()),
            });
        }
        if self.template_file.is_some() && self.external_nav.is_none() {
            return Err(Error::Config {
                message: format!("source '{}': templateFile requires externalNav", self.name),
                hint: Some("subnav links are derived from the external nav tree".to_string()),
            });
        }

        Ok(())
    }
}

/// The full source registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Ordered list of sources; each is processed in isolation.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl SyncConfig {
    /// Parse a registry from JSON text and validate it.
    pub fn parse(text: &str) -> Result<Self> {
        let config: SyncConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a registry from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
            hint: Some("create a sync-config.json next to mkdocs.yml".to_string()),
        })?;
        Self::parse(&text)
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut sections = HashSet::new();
        let mut markers = HashSet::new();

        for source in &self.sources {
            source.validate()?;

            if !names.insert(source.name.as_str()) {
                return Err(Error::Config {
                    message: format!("duplicate source name '{}'", source.name),
                    hint: None,
                });
            }
            if let Some(section) = &source.nav_section {
                if !sections.insert(section.as_str()) {
                    return Err(Error::Config {
                        message: format!(
                            "nav section '{}' is claimed by more than one source",
                            section
                        ),
                        hint: Some("each source must own a distinct nav section".to_string()),
                    });
                }
            }
            if let Some(marker) = &source.nav_marker {
                if !markers.insert(marker.as_str()) {
                    return Err(Error::Config {
                        message: format!("nav marker '{}' is claimed by more than one source", marker),
                        hint: Some("each source must own a distinct marker token".to_string()),
                    });
                }
            }
        }

        Ok(())
    }
}
