use chrono::Local;
use tracing::debug;

use crate::config::ClientConfig;
use crate::parse::{parse_musicians, parse_ratings};
use crate::request::{Fetch, HttpFetcher, Page};
use crate::types::{Musician, Ratings};
use crate::{info_time, Error, Result};

/// Entry point of the library: musicians and decade ratings from the site.
///
/// Every call fetches fresh pages, one at a time, nothing is cached.
#[derive(Debug, Clone)]
pub struct Scaruffi<F = HttpFetcher> {
    config: ClientConfig,
    fetcher: F,
}

impl Scaruffi<HttpFetcher> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: Fetch> Scaruffi<F> {
    pub fn with_fetcher(config: ClientConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// A fresh pass over the musician listing, starting at its first page.
    pub fn musician_pages(&self) -> MusicianPages<'_, F> {
        MusicianPages {
            config: &self.config,
            fetcher: &self.fetcher,
            next: 0,
            seen: 0,
        }
    }

    /// Musicians in listing order, windowed to `[offset, offset + limit)`.
    /// `limit: None` means until the listing runs out.
    ///
    /// Listing pages are fetched in order and only as far as the window needs.
    pub async fn get_musicians(&self, offset: usize, limit: Option<usize>) -> Result<Vec<Musician>> {
        if limit == Some(0) {
            return Err(Error::Validation("limit must be positive".into()));
        }
        let start_time = Local::now();
        let end = limit.map(|limit| offset.saturating_add(limit));
        let in_window = |idx: usize| idx >= offset && end.map_or(true, |end| idx < end);

        let mut musicians = Vec::with_capacity(limit.unwrap_or(0).min(1024));
        let mut pages = self.musician_pages();
        while end.map_or(true, |end| pages.musicians_seen() < end) {
            let base = pages.musicians_seen();
            let Some(page) = pages.next_page().await? else {
                break;
            };
            musicians.extend(
                page.into_iter()
                    .enumerate()
                    .filter(|(i, _)| in_window(base + i))
                    .map(|(_, name)| name),
            );
        }

        info_time!(
            start_time,
            "Collected {} musicians (offset {}, limit {:?}) from {} page(s)",
            musicians.len(),
            offset,
            limit,
            pages.pages_fetched()
        );
        Ok(musicians)
    }

    /// Ratings of the decade starting at `decade` (e.g. 1960). The site's own
    /// two-digit form (60, 0, 10) is accepted too.
    pub async fn get_ratings(&self, decade: u16) -> Result<Ratings> {
        let decade = self.validate_decade(decade)?;
        let start_time = Local::now();

        let url = self.config.ratings_url(decade);
        let html = self.fetcher.fetch(&url).await?;
        let ratings = parse_ratings(&html)?;

        info_time!(start_time, "Parsed {} rating groups for the {}s", ratings.len(), decade);
        Ok(ratings)
    }

    /// Maps the two-digit form to a full year and checks the site has that decade.
    pub fn validate_decade(&self, decade: u16) -> Result<u16> {
        let full = match decade {
            0..=29 => 2000 + decade,
            30..=99 => 1900 + decade,
            _ => decade,
        };
        if full % 10 != 0 || !self.config.decades.contains(&full) {
            return Err(Error::Validation(format!(
                "unsupported decade {decade}, expected one of {:?}",
                self.config.decades
            )));
        }
        Ok(full)
    }
}

/// Lazy walk over the musician listing pages. Each [`next_page`](Self::next_page)
/// fetches and parses exactly one page; `None` once the listing is exhausted.
#[derive(Debug)]
pub struct MusicianPages<'a, F> {
    config: &'a ClientConfig,
    fetcher: &'a F,
    next: usize,
    seen: usize,
}

impl<F: Fetch> MusicianPages<'_, F> {
    pub async fn next_page(&mut self) -> Result<Option<Vec<Musician>>> {
        let Some(url) = Page::Musicians(self.next).url(self.config) else {
            debug!("musician listing exhausted after {} page(s)", self.next);
            return Ok(None);
        };
        let html = self.fetcher.fetch(&url).await?;
        let names = parse_musicians(&html)?;

        self.next += 1;
        self.seen += names.len();
        Ok(Some(names))
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.next
    }

    /// Number of musicians produced so far.
    pub fn musicians_seen(&self) -> usize {
        self.seen
    }
}
