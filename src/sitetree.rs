//! Site tree construction from filtered access log records.
//!
//! The tree models the site as it was actually browsed: every accepted
//! request contributes one leaf, with interior directories created on
//! demand along the way. Raw access logs are dominated by noise (errors,
//! static assets, trackers, internal includes), so a record passes an
//! ordered acceptance pipeline before it touches the tree; any stage can
//! reject it, silently.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::accesslog::LogRecord;
use crate::config::{Section, SiteMapConfig};

/// Children of an interior node, ordered by name.
pub type Children = BTreeMap<String, SiteNode>;

/// Name under which a seeded section's include marker is stored.
const INCLUDE_KEY: &str = "include";

/// A node in the site tree.
///
/// Serializes untagged so a dumped tree reads as plain nested JSON:
/// leaves become `null`, include markers become their target string and
/// directories become objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SiteNode {
    /// A trackable file that was served at this position.
    Leaf,
    /// External markup fragment referenced instead of expanded.
    Include(String),
    /// A directory mapping child names to nodes.
    Dir(Children),
}

impl SiteNode {
    /// An empty interior node.
    pub fn dir() -> Self {
        SiteNode::Dir(Children::new())
    }

    /// Child map of an interior node.
    pub fn children(&self) -> Option<&Children> {
        match self {
            SiteNode::Dir(children) => Some(children),
            _ => None,
        }
    }
}

/// Where an accepted record lands in the tree: the directory segments to
/// descend through and the filename to insert there.
#[derive(Debug, PartialEq, Eq)]
struct Target {
    segments: Vec<String>,
    filename: String,
}

/// Builds the site tree by folding accepted records into it.
pub struct TreeBuilder<'a> {
    config: &'a SiteMapConfig,
    root: Children,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder with the configured sections pre-seeded.
    pub fn new(config: &'a SiteMapConfig) -> Self {
        let mut root = Children::new();
        for section in &config.sections {
            seed_section(&mut root, section);
        }
        Self { config, root }
    }

    /// Run one record through the acceptance pipeline and, if it passes,
    /// insert its leaf. Re-inserting an existing leaf is a no-op.
    pub fn insert(&mut self, record: &LogRecord) {
        let Some(target) = self.accept(record) else {
            return;
        };

        let mut filename = target.filename;
        let mut cursor = &mut self.root;
        for segment in target.segments {
            // A .php segment acts as a directory-like dispatcher: treat it
            // as the requested file and stop descending.
            if segment.ends_with(".php") {
                filename = segment;
                break;
            }
            cursor = match cursor.entry(segment).or_insert_with(SiteNode::dir) {
                SiteNode::Dir(children) => children,
                // A file already sits where the path wants a directory;
                // nothing can be inserted below it.
                _ => return,
            };
        }
        cursor.entry(filename).or_insert(SiteNode::Leaf);
    }

    /// The finished tree, rooted at an interior node.
    pub fn finish(self) -> SiteNode {
        SiteNode::Dir(self.root)
    }

    /// The acceptance pipeline. Each stage rejects by returning `None`;
    /// a passing record resolves to its insertion target.
    fn accept(&self, record: &LogRecord) -> Option<Target> {
        let response = &record.response;
        if !all_digits(&response.size_bytes) || !all_digits(&response.status_code) {
            return None;
        }
        let status: u32 = response.status_code.parse().ok()?;
        if !(200..300).contains(&status) {
            trace!(status, path = %record.request.path, "skipping non-2xx entry");
            return None;
        }

        // Logs carry relative request targets; resolving against a fixed
        // base discards any scheme or host a proxy request smuggled in.
        let url = parse_request_path(&record.request.path)?;
        let path = url.path();
        let (dir_path, file) = split_path(path);

        // A bare directory request was served its index file.
        let filename = if file.is_empty() {
            self.config.index_filename.clone()
        } else {
            file.to_string()
        };

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let trackable = extension.is_some_and(|ext| self.config.is_trackable(&ext));
        if !trackable || self.config.skips_filename(&filename) {
            trace!(path = %record.request.path, "skipping untracked entry");
            return None;
        }

        let segments: Vec<String> = dir_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(first) = segments.first() {
            if self.config.skips_path(first) {
                return None;
            }
        }

        Some(Target { segments, filename })
    }
}

/// Fold a stream of parse attempts into a finished tree.
pub fn build<I>(config: &SiteMapConfig, records: I) -> SiteNode
where
    I: IntoIterator<Item = Option<LogRecord>>,
{
    let mut builder = TreeBuilder::new(config);
    for record in records.into_iter().flatten() {
        builder.insert(&record);
    }
    builder.finish()
}

fn seed_section(root: &mut Children, section: &Section) {
    let mut cursor = root;
    for segment in section.path.split('/').filter(|s| !s.is_empty()) {
        cursor = match cursor
            .entry(segment.to_string())
            .or_insert_with(SiteNode::dir)
        {
            SiteNode::Dir(children) => children,
            _ => return,
        };
    }
    cursor.insert(
        INCLUDE_KEY.to_string(),
        SiteNode::Include(section.include.clone()),
    );
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a raw request target, keeping only its path and query parts.
fn parse_request_path(raw: &str) -> Option<Url> {
    let base = Url::parse("http://localhost/").ok()?;
    base.join(raw).ok()
}

/// Split a URL path into (directory part, file part) at the last separator.
fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}
