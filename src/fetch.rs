use scraper::{Html, Selector};

use crate::error::{Error, Result};

/// Retrieves the raw HTML of one document by id. The crawl treats any
/// failure here as fatal for the run; retry policy belongs to the caller.
pub trait Fetch {
    fn fetch(&self, page: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    host: String,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(host: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            host,
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, page: &str) -> Result<String> {
        let url = format!("{}{}", self.host, page);
        self.client
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(|response| response.text())
            .map_err(|source| Error::Fetch {
                page: page.to_string(),
                source,
            })
    }
}

/// Collects the raw `href` values of every anchor inside the article body
/// container, falling back to the whole document when no such container
/// exists. Link validity is the `LinkFilter`'s concern, not ours.
#[must_use]
pub fn extract_links(html: &str) -> Vec<String> {
    let Ok(body) = Selector::parse("div#bodyContent") else {
        return Vec::new();
    };
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);

    let anchors: Vec<_> = match document.select(&body).next() {
        Some(content) => content.select(&anchor).collect(),
        None => document.select(&anchor).collect(),
    };

    anchors
        .into_iter()
        .filter_map(|element| element.value().attr("href"))
        .map(String::from)
        .collect()
}
