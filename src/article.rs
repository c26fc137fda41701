use crate::error::{BlogError, BlogResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const WORDS_PER_MINUTE: usize = 200;
const DATE_FORMATS: [&str; 3] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"];
const DEFAULT_CATEGORY: &str = "Article";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub bio: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Author {
        let name = name.into();
        Author {
            initials: initials_of(&name),
            name,
            ..Default::default()
        }
    }
}

/// Uppercased first letters of the first two words, "Mihir Goswami" -> "MG".
fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A single blog post. Immutable once loaded.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub cover_image: String,
    pub content: String,
    pub author: Author,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

impl Article {
    /// The first tag, used as the article's headline category.
    pub fn category(&self) -> &str {
        self.tags
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn published_on(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

pub fn read_time_label(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    cover_image: String,
    #[serde(default)]
    date: String,
    read_time: Option<String>,
    #[serde(default)]
    author: Author,
    #[serde(default)]
    tags: Vec<String>,
}

/// Turns a markdown file with a `---` delimited YAML header into an [`Article`].
#[derive(Debug)]
pub struct ArticleParser {
    front_matter_regex: Regex,
}

impl ArticleParser {
    pub fn new() -> BlogResult<ArticleParser> {
        let front_matter_regex = Regex::new(r"(?s)\A\s*---\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z")?;
        Ok(ArticleParser { front_matter_regex })
    }

    /// `path` names the source in errors; its file stem is the fallback id.
    pub fn parse(&self, source: &str, path: &Path) -> BlogResult<Article> {
        let caps = self
            .front_matter_regex
            .captures(source)
            .ok_or_else(|| BlogError::front_matter(path, "no `---` delimited header"))?;
        let header = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str()).trim_start_matches(['\r', '\n']);

        let front: FrontMatter = if header.trim().is_empty() {
            FrontMatter::default()
        } else {
            serde_yaml::from_str(header)
                .map_err(|err| BlogError::front_matter(path, err.to_string()))?
        };

        let context = path.display().to_string();
        let id = match front.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .ok_or_else(|| BlogError::missing_field("id", &context))?,
        };
        let title = front
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| BlogError::missing_field("title", &context))?;

        let mut author = front.author;
        if author.initials.is_empty() {
            author.initials = initials_of(&author.name);
        }

        Ok(Article {
            id,
            title,
            excerpt: front.excerpt,
            cover_image: front.cover_image,
            read_time: front
                .read_time
                .unwrap_or_else(|| read_time_label(body)),
            content: body.to_string(),
            author,
            date: front.date,
            tags: front.tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_VS_RUST: &str = "---
id: go-vs-rust
title: \"Go vs Rust\"
excerpt: Two languages.
date: Dec 05, 2024
readTime: 10 min read
author:
  name: Mihir Goswami
tags: [Go, Rust]
---
# Go vs Rust

Body text.
";

    #[test]
    fn parses_front_matter_and_body() {
        let parser = ArticleParser::new().unwrap();
        let article = parser.parse(GO_VS_RUST, Path::new("posts/go.md")).unwrap();

        assert_eq!(article.id, "go-vs-rust");
        assert_eq!(article.title, "Go vs Rust");
        assert_eq!(article.read_time, "10 min read");
        assert_eq!(article.tags, vec!["Go", "Rust"]);
        assert_eq!(article.author.initials, "MG");
        assert!(article.content.starts_with("# Go vs Rust"));
        assert_eq!(article.category(), "Go");
        assert_eq!(
            article.published_on(),
            NaiveDate::from_ymd_opt(2024, 12, 5)
        );
    }

    #[test]
    fn id_falls_back_to_file_stem_and_read_time_is_computed() {
        let parser = ArticleParser::new().unwrap();
        let words = "word ".repeat(450);
        let source = format!("---\ntitle: Untagged\n---\n{}", words);
        let article = parser.parse(&source, Path::new("drafts/untagged.md")).unwrap();

        assert_eq!(article.id, "untagged");
        assert_eq!(article.read_time, "3 min read");
        assert!(article.tags.is_empty());
        assert_eq!(article.category(), "Article");
        assert_eq!(article.published_on(), None);
    }

    #[test]
    fn missing_title_is_an_error() {
        let parser = ArticleParser::new().unwrap();
        let err = parser
            .parse("---\nid: nameless\n---\nhello", Path::new("nameless.md"))
            .unwrap_err();
        assert!(matches!(err, BlogError::MissingField { ref field, .. } if field == "title"));
    }

    #[test]
    fn missing_header_is_an_error() {
        let parser = ArticleParser::new().unwrap();
        let err = parser
            .parse("# Just markdown", Path::new("plain.md"))
            .unwrap_err();
        assert!(matches!(err, BlogError::FrontMatter { .. }));
    }

    #[test]
    fn short_posts_read_in_one_minute() {
        assert_eq!(read_time_label(""), "1 min read");
        assert_eq!(read_time_label("a few words"), "1 min read");
        assert_eq!(read_time_label(&"w ".repeat(201)), "2 min read");
    }

    #[test]
    fn long_month_names_are_accepted() {
        let article = Article {
            id: "a".into(),
            title: "A".into(),
            excerpt: String::new(),
            cover_image: String::new(),
            content: String::new(),
            author: Author::new("Ada Lovelace"),
            date: "March 20, 2024".into(),
            read_time: "1 min read".into(),
            tags: vec![],
        };
        assert_eq!(article.published_on(), NaiveDate::from_ymd_opt(2024, 3, 20));
        assert_eq!(article.author.initials, "AL");
    }
}
