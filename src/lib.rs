//! Client for the musician index and the decade ratings published on scaruffi.com.
//!
//! ```no_run
//! use scaruffi::{ClientConfig, Scaruffi};
//!
//! # async fn run() -> scaruffi::Result<()> {
//! let site = Scaruffi::new(ClientConfig::default())?;
//! let ratings = site.get_ratings(1960).await?;
//! for release in ratings.get(9.5).unwrap_or_default() {
//!     println!("{release}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod macros;

pub mod config;
pub mod output;
pub mod parse;
pub mod process;
pub mod request;
pub mod types;

pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use process::{MusicianPages, Scaruffi};
pub use request::{Fetch, HttpFetcher, Page};
pub use types::{Musician, Rating, RatingGroup, Ratings, Release};

const SITE_URL: &str = "https://scaruffi.com";
/// The site lists every musician on a single index page.
const MUSICIAN_PAGES: &[&str] = &["/music/groups.html"];
const DEFAULT_DECADES: &[u16] = &[1960, 1970, 1980, 1990, 2000, 2010];
