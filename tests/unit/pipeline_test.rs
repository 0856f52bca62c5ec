//! End-to-end pipeline tests: log text in, markup lines out.

use logmap::{render, LogRecord, SiteMapConfig, SiteNode, TreeBuilder};

fn build_and_render(config: &SiteMapConfig, log: &str) -> Vec<String> {
    let tree = build(config, log);
    render(&tree, config)
}

fn build(config: &SiteMapConfig, log: &str) -> SiteNode {
    let mut builder = TreeBuilder::new(config);
    for record in log.lines().filter_map(LogRecord::parse) {
        builder.insert(&record);
    }
    builder.finish()
}

fn bare_config() -> SiteMapConfig {
    SiteMapConfig {
        sections: Vec::new(),
        ..SiteMapConfig::default()
    }
}

#[test]
fn single_entry_round_trip() {
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET /recipes/chili.php HTTP/1.1" 200 500"#;
    let lines = build_and_render(&bare_config(), log);
    assert_eq!(
        lines,
        vec![
            r#"<li class="dir"><div class="dir-label recipes"><span>recipes</span></div><ul class="recipes">"#,
            r#"<li><a href="/recipes/chili.php" class="dir-url">chili.php</a></li>"#,
            "</ul></li>",
        ]
    );
}

#[test]
fn web_root_request_maps_to_index() {
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET / HTTP/1.1" 200 100"#;
    let lines = build_and_render(&bare_config(), log);
    assert_eq!(
        lines,
        vec![r#"<li><a href="/index.php" class="dir-url">index.php</a></li>"#]
    );
}

#[test]
fn skip_listed_prefix_produces_no_output() {
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET /includes/foo.php HTTP/1.1" 200 100"#;
    let lines = build_and_render(&bare_config(), log);
    assert!(lines.is_empty());
}

#[test]
fn error_responses_produce_no_output() {
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET /recipes/chili.php HTTP/1.1" 404 500"#;
    let lines = build_and_render(&bare_config(), log);
    assert!(lines.is_empty());
}

#[test]
fn index_only_directory_collapses_after_build() {
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET /press/ HTTP/1.1" 200 100"#;
    let lines = build_and_render(&bare_config(), log);
    assert_eq!(
        lines,
        vec![r#"<li><a href="/press/index.php" class="dir-url">press</a></li>"#]
    );
}

#[test]
fn noisy_log_keeps_only_tracked_pages() {
    let log = "\
127.0.0.1 - - [23/Dec/2010:13:10:30 -0500] \"GET /favicon.ico HTTP/1.1\" 200 1406\n\
127.0.0.1 - - [23/Dec/2010:13:10:30 -0500] \"GET /jw/jw-trial-config.xml HTTP/1.1\" 200 762\n\
127.0.0.1 - - [23/Dec/2010:13:10:31 -0500] \"GET /scripts/site.js HTTP/1.1\" 200 5120\n\
127.0.0.1 - - [23/Dec/2010:13:10:32 -0500] \"GET /about.html HTTP/1.1\" 200 900\n\
garbage line that does not parse\n\
127.0.0.1 - - [23/Dec/2010:13:10:33 -0500] \"GET /about.html HTTP/1.1\" 304 -\n\
127.0.0.1 - - [23/Dec/2010:13:10:34 -0500] \"GET /docs/guide.pdf HTTP/1.1\" 200 80000\n";
    let lines = build_and_render(&bare_config(), log);
    assert_eq!(
        lines,
        vec![
            r#"<li><a href="/about.html" class="dir-url">about.html</a></li>"#,
            r#"<li class="dir"><div class="dir-label docs"><span>docs</span></div><ul class="docs">"#,
            r#"<li><a href="/docs/guide.pdf" class="dir-url">guide.pdf</a></li>"#,
            "</ul></li>",
        ]
    );
}

#[test]
fn seeded_sections_render_as_inclusion_points_when_untouched() {
    let config = SiteMapConfig::default();
    let lines = build_and_render(&config, "");
    assert_eq!(
        lines,
        vec![
            r#"<li class="dir"><div class="dir-label articles"><span>articles</span></div><ul class="articles"><?php include "includes/articles.php"; ?></ul></li>"#,
            r#"<li class="dir"><div class="dir-label food"><span>food</span></div><ul class="food">"#,
            r#"<li class="dir"><div class="dir-label recipes"><span>recipes</span></div><ul class="recipes"><?php include "includes/recipes.php"; ?></ul></li>"#,
            r#"<li class="dir"><div class="dir-label sets"><span>sets</span></div><ul class="sets"><?php include "includes/sets.php"; ?></ul></li>"#,
            "</ul></li>",
        ]
    );
}

#[test]
fn seeded_section_expands_once_a_leaf_lands_inside() {
    let config = SiteMapConfig::default();
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET /food/recipes/chili.php HTTP/1.1" 200 500"#;
    let lines = build_and_render(&config, log);
    // The recipes section now holds a real leaf next to its include
    // marker, so it renders as a general group.
    assert!(lines
        .iter()
        .any(|l| l.contains(r#"href="/food/recipes/chili.php""#)));
    assert!(lines
        .iter()
        .any(|l| l == r#"<?php include "includes/recipes.php"; ?>"#));
}

#[test]
fn dumped_tree_matches_inserted_paths() {
    let log = r#"10.0.0.1 - - [01/Jan/2020:00:00:00 +0000] "GET /recipes/chili.php HTTP/1.1" 200 500"#;
    let tree = build(&bare_config(), log);
    let json = serde_json::to_value(&tree).unwrap();
    assert!(json["recipes"]["chili.php"].is_null());
    assert!(json["recipes"].is_object());
}
