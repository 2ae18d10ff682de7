use std::fmt::Write;

use crate::types::{Musician, Ratings};

/// One name per line.
pub fn format_musicians(musicians: &[Musician]) -> String {
    musicians.iter().fold(String::new(), |mut out, name| {
        out.push_str(name);
        out.push('\n');
        out
    })
}

/// Each rating on its own line, followed by its releases indented below it.
pub fn format_ratings(ratings: &Ratings) -> String {
    let mut out = String::new();
    for group in ratings {
        // Writing into a `String` can't fail.
        let _ = writeln!(out, "{}", group.rating);
        for release in &group.releases {
            let _ = writeln!(out, "    {release}");
        }
    }
    out
}
