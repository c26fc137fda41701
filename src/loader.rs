use crate::article::ArticleParser;
use crate::error::BlogResult;
use crate::tree::ContentNode;
use crate::Article;
use std::fs::read_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads every `*.md` file below a content root into articles.
#[derive(Debug)]
pub struct ArticleLoader {
    src: PathBuf,
    parser: ArticleParser,
}

impl ArticleLoader {
    pub fn new(src: impl Into<PathBuf>) -> BlogResult<ArticleLoader> {
        Ok(ArticleLoader {
            src: src.into(),
            parser: ArticleParser::new()?,
        })
    }

    pub fn load(&self) -> BlogResult<Vec<Article>> {
        let root = self.process(PathBuf::new())?;
        let articles = root.into_articles();
        info!(
            src = %self.src.display(),
            count = articles.len(),
            "loaded articles"
        );
        Ok(articles)
    }

    fn process_markdown_file(&self, file: PathBuf, base_path: &Path) -> BlogResult<ContentNode> {
        let relative_path = file.strip_prefix(&self.src).unwrap_or(&file).to_path_buf();
        debug!(file = %file.display(), section = %base_path.display(), "parsing article");
        let markdown = std::fs::read_to_string(&file)?;
        let article = self.parser.parse(&markdown, &relative_path)?;
        Ok(ContentNode::Entry(relative_path, article))
    }

    fn process(&self, current: PathBuf) -> BlogResult<ContentNode> {
        let mut res = vec![];
        for entry in read_dir(self.src.join(&current))? {
            let entry = entry?;
            let fname = entry.file_name();
            let fname = fname.to_string_lossy();
            let ftype = entry.file_type()?;
            if ftype.is_file() && fname.ends_with(".md") {
                res.push(self.process_markdown_file(entry.path(), &current)?);
            } else if ftype.is_dir() {
                let next_cur = current.join(&*fname);
                res.push(self.process(next_cur)?);
            }
        }

        res.sort();

        Ok(ContentNode::Section(current, res))
    }
}
