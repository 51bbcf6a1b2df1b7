//! Navigation merging.
//!
//! The site's `mkdocs.yml` is hand-edited: comments, quoting, and blank
//! lines elsewhere in the file must survive a merge byte for byte. So this
//! module never round-trips the document through a YAML parser. It patches
//! text surgically, in one of two modes:
//!
//! - **Text-splice**: a named section header (`- <label>:`) is located by
//!   regex, its indentation-delimited child block is computed, and only
//!   that byte range is replaced. Child entries on the preserve list keep
//!   their original lines, in their original order, ahead of the generated
//!   entries.
//! - **Marker substitution**: the external repository's own nav tree is
//!   parsed into [`NavNode`] values, every leaf path is reprojected under
//!   the destination prefix, and the rendered lines replace the single
//!   line holding a configured marker token, re-indented to the marker's
//!   column.
//!
//! Both modes return `None` when their anchor (header or marker) is absent;
//! the caller logs a warning and moves on. A marker that has disappeared
//! usually means a previous run already hardened the nav into place.

use regex::Regex;

use crate::discover::title_from_slug;
use crate::error::Result;

/// A node of an external navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// A page: label mapped to a document path.
    Leaf { label: String, path: String },
    /// A section: label mapped to an ordered list of children.
    Branch { label: String, children: Vec<NavNode> },
}

/// Replace the child block of `- <section>:` in a nav document.
///
/// `entries` are `(title, path)` pairs rendered as `- title: path` at the
/// section's item indentation (header indentation plus two spaces). Existing
/// child lines whose path filename appears in `preserve` are kept verbatim,
/// in their original order, ahead of the new entries. Every byte outside
/// the replaced block is untouched.
///
/// Returns `Ok(None)` when the header is not present.
pub fn splice_section(
    content: &str,
    section: &str,
    entries: &[(String, String)],
    preserve: &[String],
) -> Result<Option<String>> {
    let header_re = Regex::new(&format!(r"(?m)^([ \t]*)- {}:[ \t]*\n", regex::escape(section)))?;
    let Some(header) = header_re.captures(content) else {
        return Ok(None);
    };

    let header_indent = header.get(1).map_or("", |m| m.as_str());
    let header_end = header.get(0).map_or(0, |m| m.end());
    let item_indent = format!("{}  ", header_indent);
    let item_prefix = format!("{}- ", item_indent);

    // Walk the lines after the header. Item lines extend the block; blank
    // lines and deeper-indented continuations are consumed but only count
    // once a later item line closes over them; anything at the header's
    // indentation or shallower terminates the block.
    let rest = &content[header_end..];
    let mut consumed = 0usize;
    let mut block_len = 0usize;
    let mut block_lines: Vec<&str> = Vec::new();

    for line in rest.split_inclusive('\n') {
        let text = line.trim_end_matches(['\n', '\r']);
        if text.starts_with(&item_prefix) {
            consumed += line.len();
            block_len = consumed;
            block_lines.push(text);
        } else if text.trim().is_empty() || text.starts_with(&item_indent) {
            consumed += line.len();
        } else {
            break;
        }
    }

    let entry_re = Regex::new(r"^[ \t]*-\s+([^:]+):\s*(.+)$")?;
    let mut new_lines: Vec<String> = Vec::new();

    for line in &block_lines {
        if let Some(caps) = entry_re.captures(line) {
            let path = caps.get(2).map_or("", |m| m.as_str()).trim();
            let filename = path.rsplit('/').next().unwrap_or(path);
            if preserve.iter().any(|keep| keep == filename) {
                new_lines.push((*line).to_string());
            }
        }
    }

    for (title, path) in entries {
        new_lines.push(format!("{}- {}: {}", item_indent, title, path));
    }

    let mut result = String::with_capacity(content.len());
    result.push_str(&content[..header_end]);
    if !new_lines.is_empty() {
        result.push_str(&new_lines.join("\n"));
        result.push('\n');
    }
    result.push_str(&content[header_end + block_len..]);
    Ok(Some(result))
}

/// Parse the `nav:` tree of an external mkdocs document.
///
/// Plain string entries (MkDocs' title-inference form) become leaves with a
/// title derived from the file stem. A document without a `nav:` key yields
/// an empty tree.
pub fn parse_nav(yaml: &str) -> Result<Vec<NavNode>> {
    let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let Some(items) = doc.get("nav").and_then(|nav| nav.as_sequence()) else {
        return Ok(Vec::new());
    };
    Ok(parse_items(items))
}

fn parse_items(items: &[serde_yaml::Value]) -> Vec<NavNode> {
    items.iter().filter_map(parse_item).collect()
}

fn parse_item(value: &serde_yaml::Value) -> Option<NavNode> {
    match value {
        serde_yaml::Value::String(path) => {
            let stem = path
                .rsplit('/')
                .next()
                .and_then(|name| name.split('.').next())
                .unwrap_or(path);
            Some(NavNode::Leaf {
                label: title_from_slug(stem),
                path: path.clone(),
            })
        }
        serde_yaml::Value::Mapping(map) => {
            let (key, val) = map.iter().next()?;
            let label = key.as_str()?.to_string();
            match val {
                serde_yaml::Value::String(path) => Some(NavNode::Leaf {
                    label,
                    path: path.clone(),
                }),
                serde_yaml::Value::Sequence(children) => Some(NavNode::Branch {
                    label,
                    children: parse_items(children),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Prefix every leaf path with the destination's nav-relative directory.
pub fn reproject(nodes: &[NavNode], prefix: &str) -> Vec<NavNode> {
    nodes
        .iter()
        .map(|node| match node {
            NavNode::Leaf { label, path } => NavNode::Leaf {
                label: label.clone(),
                path: format!("{}/{}", prefix, path),
            },
            NavNode::Branch { label, children } => NavNode::Branch {
                label: label.clone(),
                children: reproject(children, prefix),
            },
        })
        .collect()
}

/// Render nodes back to nav-document lines at the given base indentation.
pub fn render_nodes(nodes: &[NavNode], indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for node in nodes {
        match node {
            NavNode::Leaf { label, path } => {
                lines.push(format!("{}- {}: {}", indent, label, path));
            }
            NavNode::Branch { label, children } => {
                lines.push(format!("{}- {}:", indent, label));
                lines.extend(render_nodes(children, &format!("{}  ", indent)));
            }
        }
    }
    lines
}

/// Replace the single line containing `marker` with the rendered nodes,
/// re-indented to the marker line's column.
///
/// Returns `None` when no line contains the marker.
pub fn substitute_marker(content: &str, marker: &str, nodes: &[NavNode]) -> Option<String> {
    let mut offset = 0usize;
    for line in content.split_inclusive('\n') {
        if line.contains(marker) {
            let indent: String = line
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();
            let rendered = render_nodes(nodes, &indent);

            let mut result = String::with_capacity(content.len());
            result.push_str(&content[..offset]);
            result.push_str(&rendered.join("\n"));
            if line.ends_with('\n') {
                result.push('\n');
            }
            result.push_str(&content[offset + line.len()..]);
            return Some(result);
        }
        offset += line.len();
    }
    None
}
