//! HTML views. Each view is a pure function of the [`SiteContext`] (plus a
//! query or id) and is wrapped in the shared layout with the site chrome.

use crate::context::SiteContext;
use crate::search::{SearchResult, SearchResults};
use crate::share::ShareLinks;
use crate::tags::TagTerm;
use crate::Article;
use comrak::ComrakOptions;
use std::collections::HashSet;
use tracing::warn;

const LAYOUT: &str = include_str!("../assets/layout.html");

#[derive(Debug)]
pub struct MarkdownRenderer {
    option: ComrakOptions,
}

impl MarkdownRenderer {
    pub fn new() -> MarkdownRenderer {
        let mut option = ComrakOptions::default();
        option.extension.strikethrough = true;
        option.extension.footnotes = true;
        option.extension.autolink = true;
        option.extension.table = true;
        option.extension.description_lists = true;
        option.render.unsafe_ = true;
        MarkdownRenderer { option }
    }

    pub fn render(&self, markdown: &str) -> String {
        comrak::markdown_to_html(markdown, &self.option)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        MarkdownRenderer::new()
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn article_path(id: &str) -> String {
    format!("/blog/{}/", id)
}

pub fn tag_path(term: &TagTerm) -> String {
    format!("/tags/{}/", term.slug)
}

#[derive(Debug)]
pub struct Views<'a> {
    ctx: &'a SiteContext,
    markdown: MarkdownRenderer,
}

impl<'a> Views<'a> {
    pub fn new(ctx: &'a SiteContext) -> Views<'a> {
        Views {
            ctx,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Hero, the featured story, then everything else.
    pub fn home(&self) -> String {
        let site = &self.ctx.config().site;
        let store = self.ctx.store();
        let mut body = format!(
            "<section class=\"hero\">\n<h1>{}</h1>\n\
             <p>Discover thought-provoking articles on any topic.</p>\n\
             <a class=\"button\" href=\"/blog/\">Read Articles</a>\n\
             <a class=\"button outline\" href=\"/about/\">About Me</a>\n</section>\n",
            escape_html(&site.description),
        );

        if let Some(featured) = store.featured() {
            body.push_str("<section class=\"featured\">\n<h2>Featured Story</h2>\n");
            body.push_str(&card(&SearchResult::from(featured), true, false));
            body.push_str("</section>\n");
        }

        if !store.recent().is_empty() {
            body.push_str("<section class=\"latest\">\n<h2>Latest Stories</h2>\n<div class=\"grid\">\n");
            for article in store.recent() {
                body.push_str(&card(&SearchResult::from(article), false, false));
            }
            body.push_str("</div>\n</section>\n");
        }

        self.page(&site.title, &body)
    }

    /// The "All" tab followed by one tab per tag.
    pub fn blog(&self) -> String {
        let store = self.ctx.store();
        let index = store.tag_index();

        let mut tabs = String::from("<ul class=\"tabs\">\n<li><a href=\"#all\">All</a></li>\n");
        for term in index.terms() {
            tabs.push_str(&format!(
                "<li><a href=\"#tag-{}\">{}</a></li>\n",
                term.slug,
                escape_html(&term.name)
            ));
        }
        tabs.push_str("</ul>\n");

        let mut body = format!(
            "<section class=\"blog\">\n<h1>Featured Posts</h1>\n{}<div class=\"tab\" id=\"all\">\n",
            tabs
        );
        body.push_str(&cards(store.all().iter().map(SearchResult::from)));
        body.push_str("</div>\n");
        for term in index.terms() {
            body.push_str(&format!("<div class=\"tab\" id=\"tag-{}\">\n", term.slug));
            body.push_str(&cards(store.articles_with(&term.name).map(SearchResult::from)));
            body.push_str("</div>\n");
        }
        body.push_str("</section>\n");

        self.page("Blog", &body)
    }

    pub fn tag(&self, term: &TagTerm) -> String {
        let mut body = format!(
            "<section class=\"tag\">\n<h1>#{}</h1>\n<p><a href=\"/blog/\">All posts</a></p>\n",
            escape_html(&term.name)
        );
        body.push_str(&cards(
            self.ctx
                .store()
                .articles_with(&term.name)
                .map(SearchResult::from),
        ));
        body.push_str("</section>\n");
        self.page(&term.name, &body)
    }

    /// The reading view, or the not-found view for an unknown id.
    pub fn article(&self, id: &str) -> String {
        match self.ctx.store().get(id) {
            Some(article) => self.render_article(article),
            None => {
                warn!(id = %id, "article not found");
                self.not_found()
            }
        }
    }

    fn render_article(&self, article: &Article) -> String {
        let site = &self.ctx.config().site;
        let url = format!("{}{}", site.base_url.trim_end_matches('/'), article_path(&article.id));
        let share = share_buttons(&ShareLinks::for_article(&article.title, &url));
        let author = &article.author;

        let mut body = String::from("<article class=\"post\">\n<a class=\"back\" href=\"/blog/\">Back</a>\n<header>\n");
        body.push_str(&format!("<h1>{}</h1>\n", escape_html(&article.title)));
        body.push_str(&format!(
            "<div class=\"byline\">{}<span class=\"author\">{}</span>\
             <time datetime=\"{}\">{}</time> &middot; <span>{}</span></div>\n",
            avatar(&author.avatar, &author.name, &author.initials),
            escape_html(&author.name),
            escape_html(&article.date),
            escape_html(&article.date),
            escape_html(&article.read_time),
        ));
        if !article.cover_image.is_empty() {
            body.push_str(&format!(
                "<img class=\"cover\" src=\"{}\" alt=\"{}\">\n",
                escape_html(&article.cover_image),
                escape_html(&article.title)
            ));
        }
        body.push_str(&share);
        body.push_str("</header>\n<div class=\"content\">\n");
        body.push_str(&self.markdown.render(&article.content));
        body.push_str("</div>\n");

        if !article.tags.is_empty() {
            body.push_str("<div class=\"tags\">\n");
            for tag in &article.tags {
                body.push_str(&format!("<span class=\"chip\">{}</span>\n", escape_html(tag)));
            }
            body.push_str("</div>\n");
        }

        body.push_str("<hr>\n<div class=\"author-bio\">\n");
        body.push_str(&avatar(&author.avatar, &author.name, &author.initials));
        body.push_str(&format!(
            "<div><div class=\"name\">{}</div>\n<p>{}</p>\n",
            escape_html(&author.name),
            escape_html(&author.bio)
        ));
        if let Some(link) = &site.author_link {
            body.push_str(&format!(
                "<a class=\"button outline\" href=\"{}\">Say Hi</a>\n",
                escape_html(link)
            ));
        }
        body.push_str("</div>\n</div>\n");
        body.push_str(&share);
        body.push_str("</article>\n");

        self.page(&article.title, &body)
    }

    /// Runs `query` against the store and renders the results page.
    pub fn search(&self, query: &str) -> String {
        let results = self.ctx.store().search(query);
        self.search_results(query, &results)
    }

    pub fn search_results(&self, query: &str, results: &SearchResults) -> String {
        let mut body = format!(
            "<section class=\"search\">\n<h1>Search Results</h1>\n\
             <form action=\"/search/\" method=\"get\">\n\
             <input name=\"q\" value=\"{}\" placeholder=\"Search articles...\">\n\
             <button type=\"submit\">Search</button>\n</form>\n",
            escape_html(query)
        );

        if query.trim().is_empty() {
            body.push_str(
                "<div class=\"empty\">\n<p class=\"headline\">Enter search term</p>\n\
                 <p>Type in the search box above to find articles</p>\n</div>\n",
            );
        } else if results.is_empty() {
            body.push_str(&format!("<p class=\"summary\">{}</p>\n", escape_html(&results.summary(query))));
            body.push_str(
                "<div class=\"empty\">\n<p class=\"headline\">No results found</p>\n\
                 <p>Try searching with different keywords or browse all articles</p>\n</div>\n",
            );
        } else {
            body.push_str(&format!("<p class=\"summary\">{}</p>\n", escape_html(&results.summary(query))));
            body.push_str(&cards(results.iter().cloned()));
        }
        body.push_str("</section>\n");

        self.page("Search", &body)
    }

    pub fn about(&self) -> String {
        let site = &self.ctx.config().site;
        let mut body = format!(
            "<section class=\"about\">\n<h1>About</h1>\n<p>{}</p>\n",
            escape_html(&site.description)
        );
        let mut seen = HashSet::new();
        let authors: Vec<&str> = self
            .ctx
            .store()
            .all()
            .iter()
            .map(|article| article.author.name.as_str())
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect();
        if !authors.is_empty() {
            body.push_str("<p>Written by ");
            body.push_str(&escape_html(&authors.join(", ")));
            body.push_str(".</p>\n");
        }
        body.push_str(&format!(
            "<p>{} articles across {} topics.</p>\n</section>\n",
            self.ctx.store().len(),
            self.ctx.store().tag_index().len()
        ));
        self.page("About", &body)
    }

    pub fn not_found(&self) -> String {
        let body = "<section class=\"not-found\">\n<h1>404</h1>\n\
                    <p>Oops! We couldn't find the page you're looking for.</p>\n\
                    <a class=\"button\" href=\"/\">Return to Home</a>\n</section>\n";
        self.page("Page not found", body)
    }

    fn page(&self, title: &str, body: &str) -> String {
        let site = &self.ctx.config().site;
        let theme = self.ctx.theme();
        let full_title = if title == site.title {
            escape_html(title)
        } else {
            format!("{} | {}", escape_html(title), escape_html(&site.title))
        };
        fill_layout(
            LAYOUT,
            &[
                ("theme_class", if theme.is_dark() { "dark" } else { "" }),
                ("theme", theme.theme().as_str()),
                ("site_title", &escape_html(&site.title)),
                ("description", &escape_html(&site.description)),
                ("title", &full_title),
                ("body", body),
            ],
        )
    }
}

/// Substitutes `{{ name }}` placeholders in one pass over `layout`. Inserted
/// values are never rescanned; unknown placeholders are left as they are.
fn fill_layout(layout: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(layout.len());
    let mut rest = layout;
    while let Some(start) = rest.find("{{ ") {
        out.push_str(&rest[..start]);
        let inner = &rest[start + 3..];
        let Some(end) = inner.find(" }}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &inner[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 3 + end + 3]),
        }
        rest = &inner[end + 3..];
    }
    out.push_str(rest);
    out
}

fn cards(results: impl Iterator<Item = SearchResult>) -> String {
    let mut out = String::from("<div class=\"grid\">\n");
    for result in results {
        out.push_str(&card(&result, false, true));
    }
    out.push_str("</div>\n");
    out
}

fn card(result: &SearchResult, featured: bool, show_tags: bool) -> String {
    let href = escape_html(&article_path(&result.id));
    let mut out = format!(
        "<article class=\"card{}\">\n<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a>\n",
        if featured { " featured" } else { "" },
        href,
        escape_html(&result.cover_image),
        escape_html(&result.title),
    );
    if show_tags && !result.tags.is_empty() {
        out.push_str("<div class=\"tags\">");
        for tag in &result.tags {
            out.push_str(&format!("<span class=\"badge\">{}</span>", escape_html(tag)));
        }
        out.push_str("</div>\n");
    }
    out.push_str(&format!(
        "<a href=\"{}\"><h2>{}</h2></a>\n<p class=\"excerpt\">{}</p>\n\
         <footer>{}<span class=\"author\">{}</span>\
         <time datetime=\"{}\">{}</time> &middot; <span>{}</span></footer>\n</article>\n",
        href,
        escape_html(&result.title),
        escape_html(&result.excerpt),
        avatar(&result.author.avatar, &result.author.name, &result.author.initials),
        escape_html(&result.author.name),
        escape_html(&result.date),
        escape_html(&result.date),
        escape_html(&result.read_time),
    ));
    out
}

fn avatar(src: &str, name: &str, initials: &str) -> String {
    if src.is_empty() {
        format!("<span class=\"avatar\">{}</span>", escape_html(initials))
    } else {
        format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
            escape_html(src),
            escape_html(name)
        )
    }
}

fn share_buttons(links: &ShareLinks) -> String {
    format!(
        "<div class=\"share\"><span>Share:</span>\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Twitter</a>\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener\">LinkedIn</a>\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Facebook</a>\
         <a href=\"{}\" class=\"copy-link\">Copy link</a></div>\n",
        escape_html(&links.twitter),
        escape_html(&links.linkedin),
        escape_html(&links.facebook),
        escape_html(&links.copy),
    )
}
