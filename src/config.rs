//! Sitemap generation configuration.
//!
//! The filter tables, curated sections and output flavor that distinguish
//! one site's map from another's. The built-in [`Default`] reproduces the
//! tables the tool shipped with; a TOML file passed via `--config` selects
//! a different variant without touching code.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output flavor for the rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// PHP-embedded HTML; include markers become `<?php include ...; ?>`.
    #[default]
    Php,
    /// Plain HTML; include markers become HTML comments.
    Html,
}

impl RenderMode {
    /// The inclusion snippet emitted for an include marker.
    pub fn include_snippet(&self, target: &str) -> String {
        match self {
            RenderMode::Php => format!(r#"<?php include "{}"; ?>"#, target),
            RenderMode::Html => format!("<!-- include {} -->", target),
        }
    }

    /// Default output filename for this mode.
    pub fn default_output(&self) -> &'static str {
        match self {
            RenderMode::Php => "map.php",
            RenderMode::Html => "map.html",
        }
    }
}

/// A manually curated section seeded into the tree before any log line is
/// processed. The section renders as an inclusion point until a tracked
/// file lands inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Slash-separated position in the tree, e.g. `food/recipes`.
    pub path: String,
    /// Path of the external snippet referenced at that position.
    pub include: String,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMapConfig {
    /// File extensions eligible for the map, lowercase, without the dot.
    #[serde(default = "default_trackable_extensions")]
    pub trackable_extensions: Vec<String>,
    /// Top-level path segments excluded wholesale.
    #[serde(default = "default_skip_path_prefixes")]
    pub skip_path_prefixes: Vec<String>,
    /// Exact filenames excluded wherever they appear.
    #[serde(default = "default_skip_filenames")]
    pub skip_filenames: Vec<String>,
    /// Filename substituted when a request ends in a directory.
    #[serde(default = "default_index_filename")]
    pub index_filename: String,
    #[serde(default)]
    pub mode: RenderMode,
    /// Where to write the rendered map; the mode picks a filename in the
    /// current directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(default = "default_sections")]
    pub sections: Vec<Section>,
}

fn default_trackable_extensions() -> Vec<String> {
    vec!["php".to_string(), "html".to_string(), "pdf".to_string()]
}

fn default_skip_path_prefixes() -> Vec<String> {
    [
        "account",
        "blogs",
        "doubleclick",
        "email",
        "fb",
        "includes",
        "jw",
        "lib",
        "rest",
        "scripts",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_skip_filenames() -> Vec<String> {
    [
        "recipeindex.php",
        "email_friend.php",
        "recipe.php",
        "article.php",
        "mla.pdf",
        "sets.php",
        "food_results.php",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_index_filename() -> String {
    "index.php".to_string()
}

fn default_sections() -> Vec<Section> {
    vec![
        Section {
            path: "food/recipes".to_string(),
            include: "includes/recipes.php".to_string(),
        },
        Section {
            path: "food/sets".to_string(),
            include: "includes/sets.php".to_string(),
        },
        Section {
            path: "articles".to_string(),
            include: "includes/articles.php".to_string(),
        },
    ]
}

impl Default for SiteMapConfig {
    fn default() -> Self {
        Self {
            trackable_extensions: default_trackable_extensions(),
            skip_path_prefixes: default_skip_path_prefixes(),
            skip_filenames: default_skip_filenames(),
            index_filename: default_index_filename(),
            mode: RenderMode::default(),
            output_path: None,
            sections: default_sections(),
        }
    }
}

impl SiteMapConfig {
    /// Load configuration from a TOML file. Missing tables fall back to
    /// the built-in defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: SiteMapConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Whether a lowercase extension is eligible for the map.
    pub fn is_trackable(&self, extension: &str) -> bool {
        self.trackable_extensions.iter().any(|e| e == extension)
    }

    /// Whether a top-level path segment is excluded.
    pub fn skips_path(&self, segment: &str) -> bool {
        self.skip_path_prefixes.iter().any(|p| p == segment)
    }

    /// Whether an exact filename is excluded.
    pub fn skips_filename(&self, filename: &str) -> bool {
        self.skip_filenames.iter().any(|f| f == filename)
    }

    /// The output path to write, configured or mode-derived.
    pub fn resolved_output(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.mode.default_output()))
    }
}
