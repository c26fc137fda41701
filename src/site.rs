use crate::context::SiteContext;
use crate::error::{BlogError, BlogResult};
use crate::render::{article_path, tag_path, Views};
use crate::search::SearchResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Searchable fields of one article, for client-side search scripts.
#[derive(Debug, Serialize)]
struct SearchDocument<'a> {
    id: &'a str,
    title: &'a str,
    excerpt: &'a str,
    content: &'a str,
    tags: &'a [String],
    author: &'a str,
}

/// Writes every view of a [`SiteContext`] below `dest`.
#[derive(Debug)]
pub struct Site<'a> {
    ctx: &'a SiteContext,
    dest: PathBuf,
    views: Views<'a>,
}

impl<'a> Site<'a> {
    pub fn new(ctx: &'a SiteContext, dest: impl Into<PathBuf>) -> Site<'a> {
        Site {
            ctx,
            dest: dest.into(),
            views: Views::new(ctx),
        }
    }

    /// Returns the paths written, relative to `dest`.
    pub fn build(&self) -> BlogResult<Vec<PathBuf>> {
        let store = self.ctx.store();
        let mut written = vec![];

        written.push(self.write_page("/", &self.views.home())?);
        written.push(self.write_page("/blog/", &self.views.blog())?);
        for article in store.all() {
            written.push(self.write_page(&article_path(&article.id), &self.views.article(&article.id))?);
        }

        let index = store.tag_index();
        for term in index.terms() {
            written.push(self.write_page(&tag_path(term), &self.views.tag(term))?);
        }

        written.push(self.write_page("/search/", &self.views.search(""))?);
        written.push(self.write_page("/about/", &self.views.about())?);
        written.push(self.write_file(Path::new("404.html"), &self.views.not_found())?);

        let listing: Vec<SearchResult> = store.all().iter().map(SearchResult::from).collect();
        written.push(self.write_json("articles.json", &listing)?);
        written.push(self.write_json("tags.json", &index)?);
        let documents: Vec<SearchDocument> = store
            .all()
            .iter()
            .map(|article| SearchDocument {
                id: &article.id,
                title: &article.title,
                excerpt: &article.excerpt,
                content: &article.content,
                tags: &article.tags,
                author: &article.author.name,
            })
            .collect();
        written.push(self.write_json("search-index.json", &documents)?);

        info!(
            dest = %self.dest.display(),
            files = written.len(),
            articles = store.len(),
            tags = index.len(),
            "site built"
        );
        Ok(written)
    }

    /// `/blog/x/` is written to `blog/x/index.html`.
    fn write_page(&self, url: &str, html: &str) -> BlogResult<PathBuf> {
        let relative = Path::new(url.trim_matches('/')).join("index.html");
        self.write_file(&relative, html)
    }

    fn write_file(&self, relative: &Path, contents: &str) -> BlogResult<PathBuf> {
        let dest_path = self.dest.join(relative);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("Writing {} [{}]", relative.display(), dest_path.display());
        std::fs::write(&dest_path, contents)?;
        Ok(relative.to_path_buf())
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> BlogResult<PathBuf> {
        let json = serde_json::to_string(value).map_err(|err| BlogError::json(name, err))?;
        self.write_file(Path::new(name), &json)
    }
}
