use inkwell::render::Views;
use inkwell::site::Site;
use inkwell::{search, ArticleStore, BlogConfig, SiteContext};
use std::fs;
use std::path::Path;

fn write_article(dir: &Path, relative: &str, front: &str, body: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("---\n{}\n---\n{}", front, body)).unwrap();
}

fn content_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_article(
        dir.path(),
        "go-vs-rust.md",
        "id: x\ntitle: Go vs Rust\ndate: Dec 05, 2024\ntags: [Go, Rust]\nauthor:\n  name: Mihir Goswami",
        "Goroutines and the borrow checker.\n",
    );
    write_article(
        dir.path(),
        "notes/c-plus-plus.md",
        "title: \"C++ templates\"\ndate: 2023-01-15\ntags: [C++, Programming]\nauthor:\n  name: Ada Lovelace\n  bio: Analyst.",
        "| a | b |\n|---|---|\n| 1 | 2 |\n",
    );
    dir
}

#[test]
fn loads_searches_and_builds_from_a_content_directory() {
    let src = content_dir();
    let store = ArticleStore::load(src.path()).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.featured().unwrap().id, "x");
    assert!(store.get("c-plus-plus").is_some());

    assert_eq!(store.search("rust").ids(), vec!["x"]);
    assert_eq!(store.search("RUST"), store.search("rust"));
    assert_eq!(store.search("c++").ids(), vec!["c-plus-plus"]);
    assert_eq!(store.search("lovelace").ids(), vec!["c-plus-plus"]);
    assert!(store.search("   ").is_empty());
    assert!(search("zig", store.all()).is_empty());

    assert_eq!(store.tag_index().len(), 4);

    let dest = tempfile::tempdir().unwrap();
    let ctx = SiteContext::new(BlogConfig::default(), store);
    Site::new(&ctx, dest.path()).build().unwrap();

    let article = fs::read_to_string(dest.path().join("blog/c-plus-plus/index.html")).unwrap();
    assert!(article.contains("<h1>C++ templates</h1>"));
    assert!(article.contains("<table>"));
    assert!(article.contains("Analyst."));

    let tag_page = fs::read_to_string(dest.path().join("tags/cplusplus/index.html")).unwrap();
    assert!(tag_page.contains("href=\"/blog/c-plus-plus/\""));
    assert!(!tag_page.contains("href=\"/blog/x/\""));
}

#[test]
fn tag_index_lists_tags_in_first_seen_order() {
    let src = content_dir();
    let store = ArticleStore::load(src.path()).unwrap();
    let tag_index = store.tag_index();
    let names: Vec<&str> = tag_index.names().collect();
    assert_eq!(names, vec!["Go", "Rust", "C++", "Programming"]);
}

#[test]
fn broken_content_falls_back_to_bundled_articles() {
    let src = tempfile::tempdir().unwrap();
    write_article(src.path(), "broken.md", "excerpt: no title here", "body");

    assert!(ArticleStore::load(src.path()).is_err());
    let store = ArticleStore::load_or_fallback(src.path()).unwrap();
    assert_eq!(store, ArticleStore::bundled().unwrap());
}

#[test]
fn missing_article_renders_not_found() {
    let ctx = SiteContext::new(BlogConfig::default(), ArticleStore::bundled().unwrap());
    let html = Views::new(&ctx).article("no-such-post");
    assert!(html.contains("404"));
    assert!(html.contains("Return to Home"));
}
