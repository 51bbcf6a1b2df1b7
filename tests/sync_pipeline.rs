//! Library-level pipeline tests over a prepared checkout directory.
//!
//! These run everything after acquisition (discovery, transformation,
//! placement, nav merging, subnav injection) against fixture trees on
//! disk, with no git remote involved.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use docsync::config::{SourceConfig, SyncConfig};
use docsync::pipeline::{sync_checkout, NAV_FILE};

fn source(json: &str) -> SourceConfig {
    SyncConfig::parse(&format!(r#"{{"sources": [{}]}}"#, json))
        .unwrap()
        .sources
        .remove(0)
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const SITE_NAV: &str = "\
site_name: Example
# keep this comment
nav:
  - Home: index.md
  - Guides:
    - Getting Started: guides/app/getting-started.md
    - Old Entry: guides/app/old.md
  - About: about.md
";

/// The full end-to-end scenario: two indexed documents, one with metadata
/// and an image, one bare, spliced into an existing nav section.
#[test]
fn test_indexed_sync_end_to_end() {
    let checkout = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();

    write(
        checkout.path(),
        "topics/a/index.md",
        "---\ntitle: Alpha\norder: 1\n---\n# Alpha\n\n![diagram](images/diagram.png)\n",
    );
    fs::create_dir_all(checkout.path().join("topics/a/images")).unwrap();
    fs::write(
        checkout.path().join("topics/a/images/diagram.png"),
        b"\x89PNG\r\n\x1a\nfake",
    )
    .unwrap();
    write(checkout.path(), "topics/b/index.md", "# B content\n");

    write(site.path(), NAV_FILE, SITE_NAV);

    let src = source(
        r#"{"name": "app", "repo": "unused", "sourceDir": "topics",
            "targetDir": "docs/guides/app",
            "navSection": "Guides",
            "preserveNavEntries": ["getting-started.md"]}"#,
    );
    let report = sync_checkout(&src, checkout.path(), site.path()).unwrap();
    assert_eq!(report.documents, 2);

    // a.md: frontmatter stripped, image reference namespaced.
    let a = fs::read_to_string(site.path().join("docs/guides/app/a.md")).unwrap();
    assert_eq!(a, "# Alpha\n\n![diagram](images/a/diagram.png)\n");

    // b.md: untouched body.
    let b = fs::read_to_string(site.path().join("docs/guides/app/b.md")).unwrap();
    assert_eq!(b, "# B content\n");

    // Image copied byte for byte.
    let img = fs::read(site.path().join("docs/guides/app/images/a/diagram.png")).unwrap();
    assert_eq!(img, b"\x89PNG\r\n\x1a\nfake");

    // Nav: preserved entry first, then Alpha (order 1) before B (order 999),
    // old entry gone, everything outside the section untouched.
    let nav = fs::read_to_string(site.path().join(NAV_FILE)).unwrap();
    let expected = "\
site_name: Example
# keep this comment
nav:
  - Home: index.md
  - Guides:
    - Getting Started: guides/app/getting-started.md
    - Alpha: guides/app/a.md
    - B: guides/app/b.md
  - About: about.md
";
    assert_eq!(nav, expected);
}

/// Running the pipeline twice against an unchanged checkout produces
/// byte-identical destination content and nav output.
#[test]
fn test_sync_is_idempotent() {
    let checkout = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();

    write(
        checkout.path(),
        "topics/guide/index.md",
        "---\ntitle: Guide\norder: 1\n---\n![s](./images/shot.png)\n",
    );
    fs::create_dir_all(checkout.path().join("topics/guide/images")).unwrap();
    fs::write(checkout.path().join("topics/guide/images/shot.png"), b"png").unwrap();
    write(site.path(), NAV_FILE, SITE_NAV);

    let src = source(
        r#"{"name": "app", "repo": "unused", "sourceDir": "topics",
            "targetDir": "docs/guides/app", "navSection": "Guides"}"#,
    );

    sync_checkout(&src, checkout.path(), site.path()).unwrap();
    let doc_first = fs::read_to_string(site.path().join("docs/guides/app/guide.md")).unwrap();
    let nav_first = fs::read_to_string(site.path().join(NAV_FILE)).unwrap();

    sync_checkout(&src, checkout.path(), site.path()).unwrap();
    let doc_second = fs::read_to_string(site.path().join("docs/guides/app/guide.md")).unwrap();
    let nav_second = fs::read_to_string(site.path().join(NAV_FILE)).unwrap();

    assert_eq!(doc_first, doc_second);
    assert_eq!(nav_first, nav_second);
    assert_eq!(doc_first, "![s](images/guide/shot.png)\n");
}

/// Marker-mode merge plus subnav injection is idempotent on the template
/// only until the marker is consumed; afterwards the run degrades to a
/// logged no-op and the files keep their merged content.
#[test]
fn test_marker_mode_second_run_is_noop() {
    let checkout = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();

    write(checkout.path(), "docs/index.md", "home\n");
    write(checkout.path(), "docs/setup.md", "setup\n");
    write(
        checkout.path(),
        "mkdocs.yml",
        "nav:\n  - Home: index.md\n  - Setup: setup.md\n",
    );
    write(site.path(), NAV_FILE, "nav:\n  - Home: index.md\n  # @app-nav\n");

    let src = source(
        r#"{"name": "app", "repo": "unused", "sourceDir": "docs",
            "targetDir": "docs/guides/app", "discovery": "flat",
            "externalNav": "mkdocs.yml", "navMarker": "@app-nav"}"#,
    );

    sync_checkout(&src, checkout.path(), site.path()).unwrap();
    let nav_first = fs::read_to_string(site.path().join(NAV_FILE)).unwrap();
    assert!(nav_first.contains("  - Setup: guides/app/setup.md"));
    assert!(!nav_first.contains("@app-nav"));

    // The marker is gone now; a second run warns and leaves the file as is.
    sync_checkout(&src, checkout.path(), site.path()).unwrap();
    let nav_second = fs::read_to_string(site.path().join(NAV_FILE)).unwrap();
    assert_eq!(nav_first, nav_second);
}

/// A source with no nav configuration at all still syncs its documents.
#[test]
fn test_source_without_nav_config() {
    let checkout = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();
    write(checkout.path(), "docs/note/index.md", "note\n");

    let src = source(
        r#"{"name": "plain", "repo": "unused", "sourceDir": "docs",
            "targetDir": "docs/external"}"#,
    );
    let report = sync_checkout(&src, checkout.path(), site.path()).unwrap();
    assert_eq!(report.documents, 1);
    assert!(site.path().join("docs/external/note.md").exists());
}

/// An empty (or missing) source directory is a warning, not an error.
#[test]
fn test_empty_source_directory() {
    let checkout = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();

    let src = source(
        r#"{"name": "empty", "repo": "unused", "sourceDir": "docs/missing",
            "targetDir": "docs/external"}"#,
    );
    let report = sync_checkout(&src, checkout.path(), site.path()).unwrap();
    assert_eq!(report.documents, 0);
}
