//! Per-source sync orchestration.
//!
//! Each source runs the same strict sequence: acquire → discover →
//! transform → place → merge nav → inject subnav → cleanup. Sources are
//! processed one at a time because later steps depend on filesystem state
//! left by earlier ones and because the nav document and template file are
//! shared mutable targets across the loop.
//!
//! The temporary checkout is removed on success and failure alike, via a
//! drop guard, so repeated runs never accumulate stale clones. Structural
//! gaps (missing nav header, marker, template, or external nav file, or an
//! empty source directory) are warnings: the affected step is skipped and
//! the source still counts as synced.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::config::{DiscoveryMode, SourceConfig};
use crate::discover::{discover, DocInfo};
use crate::error::Result;
use crate::transform::{rewrite_image_paths, split_frontmatter};
use crate::{git, nav, place, subnav};

/// The site's own navigation document, relative to the site root.
pub const NAV_FILE: &str = "mkdocs.yml";

/// Outcome of one source's sync.
#[derive(Debug)]
pub struct SourceReport {
    pub name: String,
    pub documents: usize,
}

/// Removes the temporary checkout when the sync scope ends, on both the
/// success and failure paths.
struct TempGuard {
    path: PathBuf,
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                warn!("failed to remove {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Run the full pipeline for one source.
///
/// In dry-run mode no network or filesystem mutation happens: the intended
/// checkout path is computed, discovery runs against it if it happens to
/// exist, and the planned actions are printed.
pub fn sync_source(source: &SourceConfig, root: &Path, dry_run: bool) -> Result<SourceReport> {
    if dry_run {
        let checkout = git::intended_path(source, root);
        println!(
            "  [dry-run] would clone {}@{} into {}",
            source.repo,
            source.branch,
            checkout.display()
        );

        let docs = discover(&checkout.join(&source.source_dir), source.discovery)?;
        for doc in &docs {
            println!(
                "  [dry-run] would sync {} -> {}/{}.md",
                doc.source_path.display(),
                source.target_dir,
                doc.slug
            );
        }
        if source.nav_section.is_some() || source.nav_marker.is_some() {
            println!("  [dry-run] would update navigation in {}", NAV_FILE);
        }
        if let Some(template) = &source.template_file {
            println!("  [dry-run] would inject subnav into {}", template);
        }

        return Ok(SourceReport {
            name: source.name.clone(),
            documents: docs.len(),
        });
    }

    let checkout = git::acquire(source, root)?;
    let _guard = TempGuard {
        path: checkout.clone(),
    };
    sync_checkout(source, &checkout, root)
}

/// Everything after acquisition: discovery through subnav injection.
///
/// Split out from [`sync_source`] so tests can run the pipeline against a
/// prepared directory without a git remote.
pub fn sync_checkout(source: &SourceConfig, checkout: &Path, root: &Path) -> Result<SourceReport> {
    let source_root = checkout.join(&source.source_dir);
    let docs = discover(&source_root, source.discovery)?;
    if docs.is_empty() {
        warn!(
            "source '{}': no documents under {}",
            source.name,
            source_root.display()
        );
    }

    let target = root.join(&source.target_dir);
    if source.discovery == DiscoveryMode::Flat {
        place::clear_target(&target)?;
    }
    fs::create_dir_all(&target)?;

    for doc in &docs {
        place_one(doc, &target)?;
        println!("  synced: {}.md", doc.slug);
    }

    if let Some(section) = &source.nav_section {
        merge_nav_section(source, section, &docs, root)?;
    }

    // Marker mode and subnav injection both consume the external nav tree.
    if let Some(external) = &source.external_nav {
        let external_path = checkout.join(external);
        if external_path.is_file() {
            let tree = nav::parse_nav(&fs::read_to_string(&external_path)?)?;
            if let Some(marker) = &source.nav_marker {
                merge_nav_marker(source, marker, &tree, root)?;
            }
            if let Some(template) = &source.template_file {
                inject_subnav(source, template, &tree, root)?;
            }
        } else {
            warn!(
                "source '{}': external nav file {} not found, skipping nav merge",
                source.name,
                external_path.display()
            );
        }
    }

    Ok(SourceReport {
        name: source.name.clone(),
        documents: docs.len(),
    })
}

fn place_one(doc: &DocInfo, target: &Path) -> Result<()> {
    let content = fs::read_to_string(&doc.source_path)?;
    let (_, body) = split_frontmatter(&content)?;
    let body = rewrite_image_paths(body, &doc.slug)?;
    place::place_document(doc, &body, target)?;
    Ok(())
}

fn merge_nav_section(
    source: &SourceConfig,
    section: &str,
    docs: &[DocInfo],
    root: &Path,
) -> Result<()> {
    let nav_path = root.join(NAV_FILE);
    if !nav_path.is_file() {
        warn!(
            "source '{}': {} not found, skipping nav splice",
            source.name, NAV_FILE
        );
        return Ok(());
    }

    let entries: Vec<(String, String)> = docs
        .iter()
        .map(|doc| {
            (
                doc.title.clone(),
                format!("{}/{}.md", source.nav_prefix(), doc.slug),
            )
        })
        .collect();

    let content = fs::read_to_string(&nav_path)?;
    match nav::splice_section(&content, section, &entries, &source.preserve_nav_entries)? {
        Some(updated) => {
            fs::write(&nav_path, updated)?;
            println!("  nav section '{}' updated", section);
        }
        None => warn!(
            "source '{}': section '{}' not found in {} nav",
            source.name, section, NAV_FILE
        ),
    }
    Ok(())
}

fn merge_nav_marker(
    source: &SourceConfig,
    marker: &str,
    tree: &[nav::NavNode],
    root: &Path,
) -> Result<()> {
    let nav_path = root.join(NAV_FILE);
    if !nav_path.is_file() {
        warn!(
            "source '{}': {} not found, skipping marker substitution",
            source.name, NAV_FILE
        );
        return Ok(());
    }

    let projected = nav::reproject(tree, source.nav_prefix());
    let content = fs::read_to_string(&nav_path)?;
    match nav::substitute_marker(&content, marker, &projected) {
        Some(updated) => {
            fs::write(&nav_path, updated)?;
            println!("  nav marker '{}' replaced", marker);
        }
        None => warn!(
            "source '{}': marker '{}' not found in {} (already hardened?)",
            source.name, marker, NAV_FILE
        ),
    }
    Ok(())
}

fn inject_subnav(
    source: &SourceConfig,
    template: &str,
    tree: &[nav::NavNode],
    root: &Path,
) -> Result<()> {
    let template_path = root.join(template);
    if !template_path.is_file() {
        warn!(
            "source '{}': template {} not found, skipping subnav injection",
            source.name,
            template_path.display()
        );
        return Ok(());
    }

    let prefix = source.nav_prefix();
    let links = subnav::derive_links(tree, prefix);
    let content = fs::read_to_string(&template_path)?;
    match subnav::inject(&content, &links, prefix) {
        Some(updated) => {
            fs::write(&template_path, updated)?;
            println!("  subnav injected into {}", template);
        }
        None => warn!(
            "source '{}': subnav marker not found in {}",
            source.name, template
        ),
    }
    Ok(())
}
