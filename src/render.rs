//! Recursive rendering of the site tree into nested list markup.
//!
//! Children render in ascending name order, one markup line per list
//! element. Two interior shapes collapse instead of expanding: a
//! directory holding nothing but its index file becomes a direct link,
//! and a directory holding nothing but an include marker becomes an
//! inclusion point.

use crate::config::SiteMapConfig;
use crate::sitetree::{Children, SiteNode};

/// Render the finished tree into markup lines.
///
/// Pure function of the tree; the caller joins and writes the lines.
pub fn render(root: &SiteNode, config: &SiteMapConfig) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(children) = root.children() {
        render_children(children, "", config, &mut lines);
    }
    lines
}

fn render_children(children: &Children, cwd: &str, config: &SiteMapConfig, out: &mut Vec<String>) {
    for (name, node) in children {
        match node {
            SiteNode::Leaf => out.push(format!(
                r#"<li><a href="{cwd}/{name}" class="dir-url">{name}</a></li>"#
            )),
            SiteNode::Include(target) => out.push(config.mode.include_snippet(target)),
            SiteNode::Dir(sub) => render_dir(name, sub, cwd, config, out),
        }
    }
}

fn render_dir(
    name: &str,
    children: &Children,
    cwd: &str,
    config: &SiteMapConfig,
    out: &mut Vec<String>,
) {
    if children.len() == 1 {
        // Only the index inside: link straight to it.
        if children.contains_key(&config.index_filename) {
            out.push(format!(
                r#"<li><a href="{cwd}/{name}/{index}" class="dir-url">{name}</a></li>"#,
                index = config.index_filename
            ));
            return;
        }
        // Only an include marker inside: reference the snippet instead of
        // expanding the directory.
        if let Some((_, SiteNode::Include(target))) = children.iter().next() {
            out.push(format!(
                r#"<li class="dir"><div class="dir-label {name}"><span>{name}</span></div><ul class="{name}">{snippet}</ul></li>"#,
                snippet = config.mode.include_snippet(target)
            ));
            return;
        }
    }

    out.push(format!(
        r#"<li class="dir"><div class="dir-label {name}"><span>{name}</span></div><ul class="{name}">"#
    ));
    render_children(children, &format!("{cwd}/{name}"), config, out);
    out.push("</ul></li>".to_string());
}
