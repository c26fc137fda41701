//! Distinct tags across the store, in first-seen order.

use crate::Article;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One filter option: a tag and the ids of the articles carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagTerm {
    pub name: String,
    pub slug: String,
    pub articles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagIndex {
    terms: Vec<TagTerm>,
}

impl TagIndex {
    pub fn build(articles: &[Article]) -> TagIndex {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut slugs: HashSet<String> = HashSet::new();
        let mut terms: Vec<TagTerm> = vec![];

        for article in articles {
            for tag in &article.tags {
                let pos = match positions.get(tag.as_str()) {
                    Some(&pos) => pos,
                    None => {
                        terms.push(TagTerm {
                            name: tag.clone(),
                            slug: unique_slug(tag, &mut slugs),
                            articles: vec![],
                        });
                        positions.insert(tag, terms.len() - 1);
                        terms.len() - 1
                    }
                };
                let ids = &mut terms[pos].articles;
                if ids.last() != Some(&article.id) {
                    ids.push(article.id.clone());
                }
            }
        }

        TagIndex { terms }
    }

    pub fn terms(&self) -> &[TagTerm] {
        &self.terms
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|term| term.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&TagTerm> {
        self.terms.iter().find(|term| term.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Distinct tags in first-seen order.
pub fn unique_tags<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// URL-safe form of a tag: "Web Development" -> "web-development".
pub fn slugify(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    for c in tag.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if c == '+' {
            slug.push_str("plus");
        } else if c == '#' {
            slug.push_str("sharp");
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("tag");
    }
    slug
}

fn unique_slug(tag: &str, taken: &mut HashSet<String>) -> String {
    let base = slugify(tag);
    let mut slug = base.clone();
    let mut n = 2;
    while taken.contains(&slug) {
        slug = format!("{}-{}", base, n);
        n += 1;
    }
    taken.insert(slug.clone());
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;
    use proptest::prelude::*;

    fn article(id: &str, tags: &[&str]) -> Article {
        Article {
            id: id.to_string(),
            title: id.to_string(),
            excerpt: String::new(),
            cover_image: String::new(),
            content: String::new(),
            author: Author::new("Mihir Goswami"),
            date: String::new(),
            read_time: "1 min read".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn keeps_first_seen_order() {
        let articles = vec![
            article("go-vs-rust", &["Go", "Rust", "Programming"]),
            article("js-vs-ts", &["JavaScript", "Programming"]),
            article("untagged", &[]),
            article("rust-async", &["Rust", "Async"]),
        ];
        let index = TagIndex::build(&articles);

        let names: Vec<&str> = index.names().collect();
        assert_eq!(names, vec!["Go", "Rust", "Programming", "JavaScript", "Async"]);
        assert_eq!(index.get("Rust").unwrap().articles, vec!["go-vs-rust", "rust-async"]);
        assert_eq!(index.get("Programming").unwrap().articles, vec!["go-vs-rust", "js-vs-ts"]);
        assert!(!index.contains("rust"));
    }

    #[test]
    fn empty_store_has_no_tags() {
        assert!(TagIndex::build(&[]).is_empty());
    }

    #[test]
    fn slugs_are_url_safe_and_unique() {
        assert_eq!(slugify("Web Development"), "web-development");
        assert_eq!(slugify("C++"), "cplusplus");
        assert_eq!(slugify("C#"), "csharp");
        assert_eq!(slugify("  "), "tag");

        let index = TagIndex::build(&[article("a", &["Web Dev", "web-dev", "Web/Dev"])]);
        let slugs: Vec<&str> = index.terms().iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["web-dev", "web-dev-2", "web-dev-3"]);
    }

    #[test]
    fn unique_tags_drops_repeats() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(unique_tags(&tags), vec!["b", "a"]);
    }

    proptest! {
        #[test]
        fn index_is_distinct_and_complete(
            tag_lists in prop::collection::vec(
                prop::collection::hash_set("[A-Za-z]{1,6}", 0..5),
                0..8,
            )
        ) {
            let articles: Vec<Article> = tag_lists
                .iter()
                .enumerate()
                .map(|(i, tags)| {
                    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                    article(&format!("a{}", i), &tags)
                })
                .collect();
            let index = TagIndex::build(&articles);

            let names: Vec<&str> = index.names().collect();
            let distinct: HashSet<&str> = names.iter().copied().collect();
            prop_assert_eq!(distinct.len(), names.len());
            for a in &articles {
                for tag in &a.tags {
                    prop_assert!(index.contains(tag));
                }
            }
        }
    }
}
