//! # docsync
//!
//! This library provides the core functionality for mirroring documentation
//! from external repositories into a local MkDocs site tree. It is designed
//! to be used by the `docsync` command-line tool but the pieces are plain
//! functions over paths and strings, usable from other tooling.
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `sync-config.json` registry of
//!   source descriptors — where to clone from, which subtree to take, where
//!   it lands, and which navigation targets the source owns.
//! - **Acquisition (`git`)**: Shallow (optionally sparse) clones through
//!   the system git command into a deterministic temporary directory.
//! - **Discovery (`discover`)**: Deterministic enumeration of candidate
//!   documents, either directory-per-document with frontmatter metadata or
//!   a flat recursive walk.
//! - **Transformation (`transform`)**: Frontmatter stripping and idempotent
//!   namespacing of relative image references.
//! - **Placement (`place`)**: Writing documents and their assets into the
//!   site tree, additively or by wholesale replacement.
//! - **Navigation merge (`nav`, `subnav`)**: Surgical text patches of the
//!   site's nav document and page template. The hand-edited parts of those
//!   files are preserved byte for byte; only the owned section, marker
//!   line, or marker tokens are rewritten.
//!
//! ## Execution Flow
//!
//! The `pipeline` module sequences the steps per source: acquire →
//! discover → transform → place → merge nav → inject subnav, with
//! guaranteed cleanup of the temporary checkout. Sources run strictly one
//! at a time; the nav document and template are shared write targets and
//! must not interleave.

pub mod config;
pub mod discover;
pub mod error;
pub mod git;
pub mod nav;
pub mod output;
pub mod pipeline;
pub mod place;
pub mod subnav;
pub mod transform;
