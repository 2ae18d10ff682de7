#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use scaruffi::{ClientConfig, Error, Fetch, Result, Scaruffi};

pub const BASE_URL: &str = "http://scaruffi.test";

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path}: {e}"))
}

/// In-memory site that records every URL it is asked for.
#[derive(Debug, Default)]
pub struct CountingFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl CountingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(format!("{BASE_URL}{path}"), html.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetch for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| Error::HttpStatus {
            url: url.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::default().with_base_url(BASE_URL)
}

pub fn site(fetcher: &CountingFetcher) -> Scaruffi<&CountingFetcher> {
    Scaruffi::with_fetcher(config(), fetcher)
}

/// A listing page in the site's layout, holding `Musician {n:05}` for every n in `names`.
pub fn listing_page(names: std::ops::Range<usize>) -> String {
    let cells = names
        .map(|n| format!("<td><a href=\"m{n}.html\">Musician {n:05}</a></td>\n"))
        .collect::<String>();
    format!(
        "<html><body>\n<table><tr><td><a href=\"/\">Home</a></td></tr></table>\n\
         <table><tr>\n{cells}</tr></table>\n</body></html>"
    )
}

pub fn musician(n: usize) -> String {
    format!("Musician {n:05}")
}
