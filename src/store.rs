use crate::article::ArticleParser;
use crate::error::{BlogError, BlogResult};
use crate::loader::ArticleLoader;
use crate::search::{search, SearchResults};
use crate::tags::TagIndex;
use crate::Article;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Articles compiled into the binary, in listing order.
const BUNDLED: [(&str, &str); 3] = [
    ("go-vs-rust.md", include_str!("../content/go-vs-rust.md")),
    ("rest-vs-graphql.md", include_str!("../content/rest-vs-graphql.md")),
    (
        "javascript-typescript-comparison.md",
        include_str!("../content/javascript-typescript-comparison.md"),
    ),
];

/// Read-only list of articles. Ids are unique; tags are unique per article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleStore {
    articles: Vec<Article>,
}

impl ArticleStore {
    pub fn new(articles: Vec<Article>) -> BlogResult<ArticleStore> {
        let mut ids = HashSet::new();
        for article in &articles {
            check_id(&article.id)?;
            if !ids.insert(article.id.as_str()) {
                return Err(BlogError::DuplicateId {
                    id: article.id.clone(),
                });
            }
            let mut tags = HashSet::new();
            if let Some(tag) = article.tags.iter().find(|tag| !tags.insert(tag.as_str())) {
                return Err(BlogError::DuplicateTag {
                    id: article.id.clone(),
                    tag: tag.clone(),
                });
            }
        }
        Ok(ArticleStore { articles })
    }

    pub fn load(src: &Path) -> BlogResult<ArticleStore> {
        let articles = ArticleLoader::new(src)?.load()?;
        ArticleStore::new(articles)
    }

    pub fn bundled() -> BlogResult<ArticleStore> {
        let parser = ArticleParser::new()?;
        let articles = BUNDLED
            .iter()
            .map(|(name, source)| parser.parse(source, Path::new(name)))
            .collect::<BlogResult<Vec<_>>>()?;
        ArticleStore::new(articles)
    }

    /// Loads `src`, falling back to the bundled articles if that fails.
    pub fn load_or_fallback(src: &Path) -> BlogResult<ArticleStore> {
        match ArticleStore::load(src) {
            Ok(store) => Ok(store),
            Err(err) => {
                warn!(src = %src.display(), error = %err, "falling back to bundled articles");
                ArticleStore::bundled()
            }
        }
    }

    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn articles_with<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Article> + 'a {
        self.articles.iter().filter(move |article| article.has_tag(tag))
    }

    pub fn featured(&self) -> Option<&Article> {
        self.articles.first()
    }

    pub fn recent(&self) -> &[Article] {
        self.articles.get(1..).unwrap_or_default()
    }

    pub fn tag_index(&self) -> TagIndex {
        TagIndex::build(&self.articles)
    }

    pub fn search(&self, query: &str) -> SearchResults {
        search(query, &self.articles)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

fn check_id(id: &str) -> BlogResult<()> {
    let reason = if id.is_empty() {
        "empty"
    } else if id == "." || id == ".." {
        "reserved path segment"
    } else if id.contains(['/', '\\', '?', '#']) {
        "contains a path or URL separator"
    } else if id.contains(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '&')) {
        "contains whitespace or markup characters"
    } else {
        return Ok(());
    };
    Err(BlogError::InvalidId {
        id: id.to_string(),
        reason: reason.to_string(),
    })
}
