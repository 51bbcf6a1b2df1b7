//! Placement of transformed documents into the site tree.
//!
//! A document lands at `<target>/<slug>.md`, its assets at
//! `<target>/images/<slug>/`. Only files with an allow-listed image
//! extension are copied out of an asset directory.
//!
//! Two idempotency policies exist, chosen by the source's discovery mode:
//! additive placement overwrites files in place and never deletes (safe
//! when preserved hand-written files live in the same target), while
//! wholesale replacement clears the target subtree first so no stale
//! document can outlive its source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discover::DocInfo;
use crate::error::Result;

/// Asset extensions copied alongside documents.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Remove the target subtree ahead of a wholesale-replace placement.
///
/// Missing target is fine; the first placement will create it.
pub fn clear_target(target: &Path) -> Result<()> {
    if target.exists() {
        fs::remove_dir_all(target)?;
    }
    Ok(())
}

/// Write a transformed document body (and its assets) under `target`.
///
/// Returns the path of the written markdown file.
pub fn place_document(doc: &DocInfo, body: &str, target: &Path) -> Result<PathBuf> {
    let dest_md = target.join(format!("{}.md", doc.slug));
    if let Some(parent) = dest_md.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest_md, body)?;

    if let Some(images_dir) = &doc.images_dir {
        let dest_images = target.join("images").join(&doc.slug);
        fs::create_dir_all(&dest_images)?;

        for entry in fs::read_dir(images_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_image(&path) {
                if let Some(name) = path.file_name() {
                    fs::copy(&path, dest_images.join(name))?;
                }
            }
        }
    }

    Ok(dest_md)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
