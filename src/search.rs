//! Case-insensitive substring search over the article list.
//!
//! The query is trimmed, escaped and compiled once; every searchable field of
//! each article (title, content, excerpt, tags, author name) is tested
//! against it. Results keep store order and carry no score.

use crate::error::BlogResult;
use crate::tags::unique_tags;
use crate::Article;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCard {
    pub name: String,
    pub avatar: String,
    pub initials: String,
}

/// Listing projection of an [`Article`], as shown on cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub cover_image: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: AuthorCard,
}

impl From<&Article> for SearchResult {
    fn from(article: &Article) -> Self {
        SearchResult {
            id: article.id.clone(),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            cover_image: article.cover_image.clone(),
            date: article.date.clone(),
            read_time: article.read_time.clone(),
            category: article.category().to_string(),
            tags: article.tags.clone(),
            author: AuthorCard {
                name: article.author.name.clone(),
                avatar: article.author.avatar.clone(),
                initials: article.author.initials.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchResults {
    items: Vec<SearchResult>,
}

impl SearchResults {
    pub fn as_slice(&self) -> &[SearchResult] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First `limit` results, for the quick-search dialog.
    pub fn preview(&self, limit: usize) -> &[SearchResult] {
        &self.items[..self.items.len().min(limit)]
    }

    pub fn has_more(&self, limit: usize) -> bool {
        self.items.len() > limit
    }

    /// Distinct tags across all results, first `limit` of them.
    pub fn related_tags(&self, limit: usize) -> Vec<String> {
        let mut tags = unique_tags(self.items.iter().flat_map(|r| r.tags.iter()));
        tags.truncate(limit);
        tags
    }

    pub fn summary(&self, query: &str) -> String {
        let n = self.items.len();
        format!(
            "Found {} result{} for \"{}\"",
            n,
            if n == 1 { "" } else { "s" },
            query
        )
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Articles matching `query`. Blank queries match nothing; matcher failures
/// are logged and yield no results.
pub fn search(query: &str, articles: &[Article]) -> SearchResults {
    let term = query.trim();
    if term.is_empty() {
        return SearchResults::default();
    }

    match matching(term, articles) {
        Ok(found) => {
            debug!(query = term, hits = found.len(), "search finished");
            SearchResults {
                items: found.into_iter().map(SearchResult::from).collect(),
            }
        }
        Err(err) => {
            error!(query = term, error = %err, "search failed");
            SearchResults::default()
        }
    }
}

/// Matching articles by reference, in store order.
pub fn matching<'a>(term: &str, articles: &'a [Article]) -> BlogResult<Vec<&'a Article>> {
    let matcher = matcher(term)?;
    Ok(articles
        .iter()
        .filter(|article| is_match(&matcher, article))
        .collect())
}

fn matcher(term: &str) -> BlogResult<Regex> {
    Ok(RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()?)
}

fn is_match(matcher: &Regex, article: &Article) -> bool {
    matcher.is_match(&article.title)
        || matcher.is_match(&article.content)
        || matcher.is_match(&article.excerpt)
        || article.tags.iter().any(|tag| matcher.is_match(tag))
        || matcher.is_match(&article.author.name)
}
