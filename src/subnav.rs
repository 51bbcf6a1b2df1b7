//! Subnav injection into the shared page template.
//!
//! From the external navigation tree (before reprojection) a flat list of
//! top-level section links is derived and rendered as an HTML fragment.
//! The fragment and the bare destination prefix are substituted at two
//! fixed marker tokens inside a template file the site build consumes.
//!
//! Activation rules: the first link is the "home" item and only activates
//! on an exact URL match; every later link activates when its match key is
//! contained in the page URL, with the home URL explicitly excluded so the
//! home item does not light up on every page.

use crate::nav::NavNode;

/// Marker replaced with the rendered `<li>` fragment.
pub const ITEMS_MARKER: &str = "<!-- docsync:subnav -->";
/// Marker replaced with the bare destination prefix.
pub const BASE_MARKER: &str = "<!-- docsync:base -->";

/// One top-level subnav link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnavLink {
    pub label: String,
    /// Destination-prefixed document path.
    pub url: String,
    /// Key used by the activation condition.
    pub match_key: String,
}

/// Derive one link per top-level nav node.
///
/// A leaf links to its own (prefixed) path; its match key is the path with
/// the extension and any trailing `index` segment stripped. A branch links
/// to its first leaf in document order, with the match key reduced to that
/// leaf's first path segment — the section folder.
pub fn derive_links(nodes: &[NavNode], prefix: &str) -> Vec<SubnavLink> {
    let mut links = Vec::new();

    for node in nodes {
        match node {
            NavNode::Leaf { label, path } => links.push(SubnavLink {
                label: label.clone(),
                url: format!("{}/{}", prefix, path),
                match_key: strip_index(path),
            }),
            NavNode::Branch { label, children } => {
                if let Some(path) = first_leaf_path(children) {
                    let key = path.split('/').next().unwrap_or(path).to_string();
                    links.push(SubnavLink {
                        label: label.clone(),
                        url: format!("{}/{}", prefix, path),
                        match_key: key,
                    });
                }
            }
        }
    }

    links
}

fn first_leaf_path(nodes: &[NavNode]) -> Option<&str> {
    for node in nodes {
        match node {
            NavNode::Leaf { path, .. } => return Some(path),
            NavNode::Branch { children, .. } => {
                if let Some(path) = first_leaf_path(children) {
                    return Some(path);
                }
            }
        }
    }
    None
}

fn strip_index(path: &str) -> String {
    let stem = path
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(path);
    if stem == "index" {
        String::new()
    } else {
        stem.strip_suffix("/index").unwrap_or(stem).to_string()
    }
}

/// Render the subnav fragment, one list item per link.
pub fn render_fragment(links: &[SubnavLink]) -> String {
    let Some(home) = links.first() else {
        return String::new();
    };

    let mut items = Vec::new();
    for (i, link) in links.iter().enumerate() {
        let condition = if i == 0 {
            format!("page.url == '{}'", link.url)
        } else {
            format!(
                "'{}' in page.url and page.url != '{}'",
                link.match_key, home.url
            )
        };
        items.push(format!(
            "<li class=\"subnav__item{{% if {} %}} subnav__item--active{{% endif %}}\">\
             <a class=\"subnav__link\" href=\"{{{{ base_url }}}}/{}\">{}</a></li>",
            condition, link.url, link.label
        ));
    }
    items.join("\n")
}

/// Substitute the fragment and prefix markers inside a template.
///
/// Returns `None` when the items marker is absent (the template was never
/// prepared for injection, or a previous run's output was committed over
/// it); the prefix marker is optional.
pub fn inject(template: &str, links: &[SubnavLink], prefix: &str) -> Option<String> {
    if !template.contains(ITEMS_MARKER) {
        return None;
    }
    let fragment = render_fragment(links);
    let result = template.replace(ITEMS_MARKER, &fragment);
    Some(result.replace(BASE_MARKER, prefix))
}
