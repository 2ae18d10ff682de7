use std::future::Future;

use chrono::Local;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::{info_time, Error, Result};

/// Pages of the site we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// The n-th musician listing page, counting from 0.
    Musicians(usize),
    /// The ratings page of a decade, given by its start year.
    Ratings(u16),
}

impl Page {
    /// Resolves the page to a URL. `None` for a listing page past the last one.
    pub fn url(&self, config: &ClientConfig) -> Option<String> {
        match *self {
            Page::Musicians(n) => config.musician_pages.get(n).map(|path| config.url(path)),
            Page::Ratings(decade) => Some(config.ratings_url(decade)),
        }
    }
}

/// Anything that can turn a URL into markup. One call is one GET.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

impl<F: Fetch> Fetch for &F {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> {
        (**self).fetch(url)
    }
}

/// [`Fetch`] over a `reqwest::Client` built from a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    // Client uses Arc so we can clone cheaply
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    /// Requests a page and returns a `Result<String>` containing the HTML.
    async fn fetch(&self, url: &str) -> Result<String> {
        let start_time = Local::now();
        debug!("GET {url}");

        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            warn!("Server returned HTTP {status} to {url}");
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        let html = res.text().await?;
        info_time!(start_time, "Fetched {} ({} bytes)", url, html.len());
        Ok(html)
    }
}
