//! Document discovery.
//!
//! Walks an acquired source subtree and enumerates candidate documents with
//! a deterministic ordering. Two strategies exist, selected per source by
//! [`DiscoveryMode`]:
//!
//! - **Indexed**: each immediate subdirectory containing `index.md` or
//!   `index.mdx` is one document. Title and ordering hint come from the
//!   file's frontmatter; the fallbacks are the title-cased directory name
//!   and a large sentinel so untagged documents sort last. A co-located
//!   `images/` directory is recorded for placement.
//! - **Flat**: every `*.md` file anywhere under the root is one document,
//!   slug equal to its path relative to the root (minus extension), no
//!   metadata extraction, sorted by that path.
//!
//! A source root that does not exist yields an empty list rather than an
//! error; dry-run mode and optional sources depend on that.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DiscoveryMode;
use crate::error::Result;
use crate::transform::{split_frontmatter, DEFAULT_ORDER};

const INDEX_EXTENSIONS: &[&str] = &["md", "mdx"];

/// One discovered document.
#[derive(Debug, Clone)]
pub struct DocInfo {
    /// The markdown file itself.
    pub source_path: PathBuf,
    /// Slug: destination filename (minus `.md`) and asset namespace.
    pub slug: String,
    /// Display title used for generated nav entries.
    pub title: String,
    /// Sort key; explicit `order` frontmatter or [`DEFAULT_ORDER`].
    pub order: i64,
    /// Co-located asset directory, when present.
    pub images_dir: Option<PathBuf>,
}

/// Enumerate documents under `root` with the given strategy.
pub fn discover(root: &Path, mode: DiscoveryMode) -> Result<Vec<DocInfo>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    match mode {
        DiscoveryMode::Indexed => discover_indexed(root),
        DiscoveryMode::Flat => discover_flat(root),
    }
}

fn discover_indexed(root: &Path) -> Result<Vec<DocInfo>> {
    let mut subdirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    let mut docs = Vec::new();
    for subdir in subdirs {
        let Some(index_path) = INDEX_EXTENSIONS
            .iter()
            .map(|ext| subdir.join(format!("index.{}", ext)))
            .find(|candidate| candidate.is_file())
        else {
            continue;
        };

        let slug = subdir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = fs::read_to_string(&index_path)?;
        let (frontmatter, _) = split_frontmatter(&content)?;

        let title = frontmatter
            .title
            .unwrap_or_else(|| title_from_slug(&slug));
        let order = frontmatter.order.unwrap_or(DEFAULT_ORDER);

        let images_dir = subdir.join("images");
        docs.push(DocInfo {
            source_path: index_path,
            slug,
            title,
            order,
            images_dir: images_dir.is_dir().then_some(images_dir),
        });
    }

    docs.sort_by(|a, b| (a.order, &a.slug).cmp(&(b.order, &b.slug)));
    Ok(docs)
}

fn discover_flat(root: &Path) -> Result<Vec<DocInfo>> {
    let mut docs = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .with_extension("");
        let slug = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let leaf = slug.rsplit('/').next().unwrap_or(&slug).to_string();
        docs.push(DocInfo {
            source_path: entry.path().to_path_buf(),
            title: title_from_slug(&leaf),
            slug,
            order: DEFAULT_ORDER,
            images_dir: None,
        });
    }

    docs.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(docs)
}

/// Derive a display title from a slug segment: separators become spaces and
/// each word is capitalized (`getting-started` -> `Getting Started`).
pub fn title_from_slug(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_root_yields_empty_list() {
        let docs = discover(Path::new("/nonexistent/docs"), DiscoveryMode::Indexed).unwrap();
        assert!(docs.is_empty());
        let docs = discover(Path::new("/nonexistent/docs"), DiscoveryMode::Flat).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_indexed_discovery_orders_by_order_then_slug() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "zeta/index.md",
            "---\ntitle: Zeta Guide\norder: 1\n---\nbody\n",
        );
        write(temp.path(), "beta/index.md", "no metadata\n");
        write(
            temp.path(),
            "alpha/index.md",
            "---\norder: 2\n---\nbody\n",
        );

        let docs = discover(temp.path(), DiscoveryMode::Indexed).unwrap();
        let slugs: Vec<&str> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["zeta", "alpha", "beta"]);

        assert_eq!(docs[0].title, "Zeta Guide");
        assert_eq!(docs[1].title, "Alpha");
        assert_eq!(docs[2].title, "Beta");
        assert_eq!(docs[2].order, DEFAULT_ORDER);
    }

    #[test]
    fn test_indexed_discovery_is_stable_across_calls() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b/index.md", "x\n");
        write(temp.path(), "a/index.md", "x\n");
        write(temp.path(), "c/index.mdx", "x\n");

        let first: Vec<String> = discover(temp.path(), DiscoveryMode::Indexed)
            .unwrap()
            .into_iter()
            .map(|d| d.slug)
            .collect();
        let second: Vec<String> = discover(temp.path(), DiscoveryMode::Indexed)
            .unwrap()
            .into_iter()
            .map(|d| d.slug)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_indexed_discovery_skips_dirs_without_index() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "doc/index.md", "x\n");
        write(temp.path(), "assets/logo.md", "not an index\n");
        write(temp.path(), "README.md", "top-level file, not a dir\n");

        let docs = discover(temp.path(), DiscoveryMode::Indexed).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].slug, "doc");
    }

    #[test]
    fn test_indexed_discovery_prefers_md_over_mdx() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "doc/index.md", "---\ntitle: From Md\n---\nx\n");
        write(temp.path(), "doc/index.mdx", "---\ntitle: From Mdx\n---\nx\n");

        let docs = discover(temp.path(), DiscoveryMode::Indexed).unwrap();
        assert_eq!(docs[0].title, "From Md");
    }

    #[test]
    fn test_indexed_discovery_records_images_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "doc/index.md", "x\n");
        write(temp.path(), "doc/images/shot.png", "png");
        write(temp.path(), "bare/index.md", "x\n");

        let docs = discover(temp.path(), DiscoveryMode::Indexed).unwrap();
        assert!(docs.iter().any(|d| d.slug == "doc" && d.images_dir.is_some()));
        assert!(docs.iter().any(|d| d.slug == "bare" && d.images_dir.is_none()));
    }

    #[test]
    fn test_flat_discovery_sorted_by_relative_path() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "intro.md", "x\n");
        write(temp.path(), "advanced/tuning.md", "x\n");
        write(temp.path(), "advanced/setup.md", "x\n");
        write(temp.path(), "notes.txt", "ignored\n");

        let docs = discover(temp.path(), DiscoveryMode::Flat).unwrap();
        let slugs: Vec<&str> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["advanced/setup", "advanced/tuning", "intro"]);
        assert!(docs.iter().all(|d| d.order == DEFAULT_ORDER));
        assert!(docs.iter().all(|d| d.images_dir.is_none()));
    }

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("getting-started"), "Getting Started");
        assert_eq!(title_from_slug("b"), "B");
        assert_eq!(title_from_slug("multi_word-slug"), "Multi Word Slug");
        assert_eq!(title_from_slug(""), "");
    }
}
