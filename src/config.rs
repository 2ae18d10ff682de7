use std::time::Duration;

use crate::{DEFAULT_DECADES, MUSICIAN_PAGES, SITE_URL};

/// Everything the fetcher needs to know about the site and the HTTP client.
///
/// Passed to [`HttpFetcher::new`](crate::request::HttpFetcher::new) once; there is no
/// process-wide client state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Paths of the musician listing pages, in listing order.
    pub musician_pages: Vec<String>,
    /// Decades (as start years) the site publishes a ratings page for.
    pub decades: Vec<u16>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: SITE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            musician_pages: MUSICIAN_PAGES.iter().map(|p| p.to_string()).collect(),
            decades: DEFAULT_DECADES.to_vec(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_musician_pages<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.musician_pages = pages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_decades(mut self, decades: impl Into<Vec<u16>>) -> Self {
        self.decades = decades.into();
        self
    }

    /// URL of a decade's ratings page; the site names them by the last two digits.
    pub fn ratings_url(&self, decade: u16) -> String {
        self.url(&format!("ratings/{:02}.html", decade % 100))
    }

    /// Full URL of a site path such as `/ratings/60.html`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
