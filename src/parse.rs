use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::types::{Musician, Rating, Ratings, Release};
use crate::{Error, Result};

/// Extracts musician names from a listing page: the text of every link in the
/// listing table, in document order.
pub fn parse_musicians(html: &str) -> Result<Vec<Musician>> {
    let doc = Html::parse_document(html);
    let table = largest_table(&doc)?;
    let link_selector = create_selector("a")?;

    let names = table
        .select(&link_selector)
        .map(|a| normalize_ws(&a.text().collect::<String>()))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>();
    debug!("parsed {} musicians", names.len());
    Ok(names)
}

/// Extracts the rating groups of a decade page.
///
/// Older decades put every rating in one `<ul>` where headings and entries are
/// siblings; newer ones use one `<ul>` per rating with the rating in a `<span>`.
pub fn parse_ratings(html: &str) -> Result<Ratings> {
    let doc = Html::parse_document(html);
    let table = largest_table(&doc)?;
    let list_selector = create_selector("ul")?;

    let lists = table.select(&list_selector).collect::<Vec<_>>();
    let ratings = match lists.as_slice() {
        [] => return Err(Error::Parse("ratings table contains no list".into())),
        [single] => ratings_from_unique_list(*single)?,
        _ => ratings_from_lists(&lists)?,
    };

    if ratings.is_empty() {
        return Err(Error::Parse("no rating heading found on the page".into()));
    }
    debug!(
        "parsed {} rating groups, {} releases",
        ratings.len(),
        ratings.releases().count()
    );
    Ok(ratings)
}

/// Headings and entries are siblings: each `<li>` belongs to the last heading seen.
fn ratings_from_unique_list(list: ElementRef) -> Result<Ratings> {
    let mut ratings = Ratings::new();
    let mut current = None;

    for tag in list.children().filter_map(ElementRef::wrap) {
        let text = tag.text().collect::<String>();
        // Unclosed `<li>`s swallow the next heading, so it can sit at the tail of an entry,
        // either as its own element or as the last word of the text.
        let stuck = tag
            .children()
            .filter_map(ElementRef::wrap)
            .filter_map(|el| match_rating(&el.text().collect::<String>()).map(|r| (el.id(), r)))
            .last();
        let heading = stuck
            .map(|(_, rating)| rating)
            .or_else(|| text.split_whitespace().last().and_then(match_rating));

        if tag.value().name() == "li" {
            let entry = match (stuck, heading) {
                (Some((heading_id, _)), _) => tag
                    .children()
                    .filter(|node| node.id() != heading_id)
                    .map(|node| match ElementRef::wrap(node) {
                        Some(el) => el.text().collect(),
                        None => node.value().as_text().map_or_else(String::new, |t| t.to_string()),
                    })
                    .collect::<String>(),
                (None, Some(_)) => text
                    .trim_end()
                    .rsplit_once(char::is_whitespace)
                    .map_or("", |(entry, _)| entry)
                    .to_string(),
                (None, None) => text,
            };
            if let Some(release) = parse_release(&entry) {
                let Some(rating) = current else {
                    return Err(Error::Parse(format!("found release {release} without rating")));
                };
                ratings.open_group(rating).push(release);
            }
        }
        // The new heading only applies after the entry it was stuck to.
        if let Some(rating) = heading {
            current = Some(rating);
            ratings.open_group(rating);
        }
    }
    Ok(ratings)
}

fn ratings_from_lists(lists: &[ElementRef]) -> Result<Ratings> {
    let span_selector = create_selector("span")?;
    let entry_selector = create_selector("li")?;
    let mut ratings = Ratings::new();

    for list in lists {
        let rating = list
            .select(&span_selector)
            .next()
            .and_then(|span| match_rating(&span.text().collect::<String>()))
            .ok_or_else(|| Error::Parse("failed to find rating tag in list".into()))?;

        let releases = list
            .select(&entry_selector)
            .filter_map(|li| parse_release(&li.text().collect::<String>()));
        ratings.open_group(rating).extend(releases);
    }
    Ok(ratings)
}

/// Matches `9/10`, `9.5/10` or `10/10` at the start of `text`.
pub fn match_rating(text: &str) -> Option<Rating> {
    static RATING_RE: OnceLock<Regex> = OnceLock::new();
    let re = RATING_RE.get_or_init(|| {
        Regex::new(r"^\s*(10|\d)(?:[.,](\d))?/10").expect("rating regex is valid")
    });

    let caps = re.captures(text)?;
    let units = caps[1].parse::<u8>().ok()?;
    let tenths = caps.get(2).map_or(Some(0), |d| d.as_str().parse::<u8>().ok())?;
    Some(Rating::from_tenths(units * 10 + tenths))
}

/// Fills a release from an entry like `Artist: Title (1969)` as well as we can.
/// Returns `None` for entries with no text.
pub fn parse_release(entry: &str) -> Option<Release> {
    let entry = normalize_ws(entry);
    // Remove bogus spaces and colons.
    let entry = entry.trim_matches(|c: char| c.is_whitespace() || c == ':');
    if entry.is_empty() {
        return None;
    }

    let release = match entry.split_once(": ") {
        None => {
            debug!("No colon in {entry:?}, using it as both artist and title.");
            match split_title_year(entry) {
                Some((title, year)) => Release::new(title, title, Some(year)),
                None => Release::new(entry, entry, None),
            }
        }
        // Any further ": " is part of the title, not the artist name.
        Some((artist, rest)) => {
            let artist = artist.trim();
            let rest = rest.trim();
            match split_title_year(rest) {
                Some((title, year)) => Release::new(artist, title, Some(year)),
                None => Release::new(artist, rest, None),
            }
        }
    };
    Some(release)
}

/// Splits the approximate `title (year)` format. The year is sometimes a range
/// (`YYYY-YY`), of which the first year is kept, and the space before the
/// parenthesis is sometimes missing.
fn split_title_year(text: &str) -> Option<(&str, u16)> {
    static TITLE_YEAR_RE: OnceLock<Regex> = OnceLock::new();
    let re = TITLE_YEAR_RE.get_or_init(|| {
        Regex::new(r"^(.+?)\s?\((\d{4})(?:-\d+)?\)").expect("title regex is valid")
    });

    let Some(caps) = re.captures(text) else {
        warn!("Failed to split title and year in {text:?}");
        return None;
    };
    let title = caps.get(1)?.as_str().trim();
    let year = caps[2].parse::<u16>().ok()?;
    if title.is_empty() {
        return None;
    }
    Some((title, year))
}

/// The table with the most text. The site has no semantic markup, so this is
/// what holds the listing.
fn largest_table(doc: &Html) -> Result<ElementRef<'_>> {
    let table_selector = create_selector("table")?;
    let tables = doc.select(&table_selector).collect::<Vec<_>>();

    // `rev` so that ties go to the first table.
    tables
        .into_iter()
        .rev()
        .max_by_key(|t| t.text().map(|s| s.chars().count()).sum::<usize>())
        .ok_or_else(|| Error::Parse("the page contains no table".into()))
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseInvalidSelector(sel_str.into()))
}

/// Collapses whitespace runs to a single space and trims.
fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
