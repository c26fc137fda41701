use crate::Article;
use std::cmp::{Ord, Ordering, PartialOrd};
use std::path::PathBuf;

/// A content directory as loaded from disk: sub-directories are sections.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ContentNode {
    Section(PathBuf, Vec<ContentNode>),
    Entry(PathBuf, Article),
}

impl ContentNode {
    /// Depth-first walk in sort order.
    pub fn into_articles(self) -> Vec<Article> {
        let mut out = vec![];
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<Article>) {
        match self {
            ContentNode::Entry(_, article) => out.push(article),
            ContentNode::Section(_, children) => {
                for child in children {
                    child.collect_into(out);
                }
            }
        }
    }
}

impl PartialOrd for ContentNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContentNode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ContentNode::Section(path1, _), ContentNode::Section(path2, _)) => path1.cmp(path2),
            // an entry must be less than a section
            (ContentNode::Section(..), ContentNode::Entry(..)) => Ordering::Greater,
            (ContentNode::Entry(..), ContentNode::Section(..)) => Ordering::Less,
            (ContentNode::Entry(path1, article1), ContentNode::Entry(path2, article2)) => {
                // newest first, undated last
                let by_date = match (article1.published_on(), article2.published_on()) {
                    (Some(d1), Some(d2)) => d2.cmp(&d1),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                by_date.then_with(|| path1.cmp(path2))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;

    fn entry(path: &str, date: &str) -> ContentNode {
        ContentNode::Entry(
            PathBuf::from(path),
            Article {
                id: path.trim_end_matches(".md").to_string(),
                title: path.to_string(),
                excerpt: String::new(),
                cover_image: String::new(),
                content: String::new(),
                author: Author::new("Test"),
                date: date.to_string(),
                read_time: "1 min read".to_string(),
                tags: vec![],
            },
        )
    }

    #[test]
    fn entries_sort_newest_first_then_by_path() {
        let mut nodes = vec![
            entry("b.md", "Mar 20, 2024"),
            entry("undated.md", ""),
            entry("a.md", "Mar 20, 2024"),
            entry("c.md", "Dec 05, 2024"),
        ];
        nodes.sort();
        let ids: Vec<String> = ContentNode::Section(PathBuf::new(), nodes)
            .into_articles()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b", "undated"]);
    }

    #[test]
    fn sections_follow_entries() {
        let mut nodes = vec![
            ContentNode::Section(PathBuf::from("z"), vec![entry("z/inner.md", "Jan 01, 2020")]),
            entry("old.md", "Jan 01, 2000"),
            ContentNode::Section(PathBuf::from("m"), vec![]),
        ];
        nodes.sort();
        assert!(matches!(&nodes[0], ContentNode::Entry(..)));
        assert!(matches!(&nodes[1], ContentNode::Section(p, _) if p == &PathBuf::from("m")));
        assert!(matches!(&nodes[2], ContentNode::Section(p, _) if p == &PathBuf::from("z")));
    }
}
