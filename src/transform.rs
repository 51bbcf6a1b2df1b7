//! Content transformation for relocated documents.
//!
//! Two independent rewrites happen between reading a document from its
//! source checkout and writing it into the site tree:
//!
//! 1. A leading YAML frontmatter block is split off. Its `title` and
//!    `order` fields feed discovery; the block itself never reaches the
//!    published body.
//! 2. Inline image references under `images/` are namespaced under
//!    `images/<slug>/`, so that documents from different sources can share
//!    one destination directory without asset collisions. The rewrite is
//!    idempotent: already-namespaced references are left alone, and a
//!    leading `./` is normalized away in the same pass. References that do
//!    not point into `images/` (absolute URLs, other directories) are
//!    untouched.

use regex::Regex;
use serde::Deserialize;

use crate::error::Result;

/// Sentinel ordering for documents without an explicit `order` field; they
/// sort after every tagged document.
pub const DEFAULT_ORDER: i64 = 999;

/// Metadata extracted from a document's frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    order: Option<i64>,
}

/// Split a document into its frontmatter fields and body.
///
/// The block is delimited by `---` lines at the very start of the document.
/// A document without a block, or with a block that is not valid YAML,
/// yields empty metadata and the full text as body.
pub fn split_frontmatter(content: &str) -> Result<(Frontmatter, &str)> {
    let pattern = Regex::new(r"(?s)\A---[ \t]*\n(.*?)\n---[ \t]*\n(.*)\z")?;

    if let Some(caps) = pattern.captures(content) {
        let raw: RawFrontmatter =
            serde_yaml::from_str(caps.get(1).map_or("", |m| m.as_str())).unwrap_or_default();
        let body = caps.get(2).map_or("", |m| m.as_str());
        return Ok((
            Frontmatter {
                title: raw.title,
                order: raw.order,
            },
            body,
        ));
    }

    Ok((Frontmatter::default(), content))
}

/// Rewrite relative image references so they resolve after relocation.
///
/// `![alt](images/foo.png)` and `![alt](./images/foo.png)` both become
/// `![alt](images/<slug>/foo.png)`. A reference already beginning with
/// `images/<slug>/` is passed through (minus any `./` prefix), which makes
/// the transform safe to apply any number of times.
pub fn rewrite_image_paths(content: &str, slug: &str) -> Result<String> {
    let pattern = Regex::new(r"!\[([^\]]*)\]\((?:\./)?images/([^)]+)\)")?;
    let namespace = format!("{}/", slug);

    let rewritten = pattern.replace_all(content, |caps: &regex::Captures| {
        let alt = &caps[1];
        let rest = &caps[2];
        if rest.starts_with(&namespace) {
            format!("![{}](images/{})", alt, rest)
        } else {
            format!("![{}](images/{}/{})", alt, slug, rest)
        }
    });

    Ok(rewritten.into_owned())
}
