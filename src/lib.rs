//! logmap library
//!
//! Derives a browsable sitemap from an Apache access log: parse the log
//! line by line, fold the served pages into a tree of site paths, render
//! the tree as a nested HTML (or PHP-embedded HTML) listing.

pub mod accesslog;
pub mod config;
pub mod render;
pub mod sitetree;

pub use accesslog::{LogFile, LogRecord, OpenLogError};
pub use config::{RenderMode, Section, SiteMapConfig};
pub use render::render;
pub use sitetree::{SiteNode, TreeBuilder};
