use serde::Serialize;

/// Outbound share targets for one article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
    pub copy: String,
}

impl ShareLinks {
    pub fn for_article(title: &str, url: &str) -> ShareLinks {
        let title = encode(title);
        let encoded_url = encode(url);
        ShareLinks {
            twitter: format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                title, encoded_url
            ),
            linkedin: format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                encoded_url
            ),
            facebook: format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                encoded_url
            ),
            copy: url.to_string(),
        }
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
