use std::fmt;

/// A musician is just the name the site lists.
pub type Musician = String;

/// An album as listed on a ratings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub artist: String,
    pub title: String,
    /// Usually the release year, not the recording year.
    pub year: Option<u16>,
}

impl Release {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            year,
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} - {} ({year})", self.artist, self.title),
            None => write!(f, "{} - {}", self.artist, self.title),
        }
    }
}

/// A rating out of 10 with one decimal, stored in tenths so it can be compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub fn from_tenths(tenths: u8) -> Self {
        Rating(tenths)
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    pub fn value(self) -> f32 {
        self.0 as f32 / 10.0
    }
}

impl From<f32> for Rating {
    fn from(value: f32) -> Self {
        Rating((value * 10.0).round().clamp(0.0, u8::MAX as f32) as u8)
    }
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Rating((value * 10.0).round().clamp(0.0, u8::MAX as f64) as u8)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingGroup {
    pub rating: Rating,
    pub releases: Vec<Release>,
}

/// Ratings of one decade: rating groups in the order their headings appear on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ratings {
    groups: Vec<RatingGroup>,
}

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `rating` the group new releases go into. A rating seen before keeps its
    /// position and its releases.
    pub(crate) fn open_group(&mut self, rating: Rating) -> &mut Vec<Release> {
        let idx = match self.groups.iter().position(|g| g.rating == rating) {
            Some(idx) => idx,
            None => {
                self.groups.push(RatingGroup {
                    rating,
                    releases: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].releases
    }

    pub fn get(&self, rating: impl Into<Rating>) -> Option<&[Release]> {
        let rating = rating.into();
        self.groups
            .iter()
            .find(|g| g.rating == rating)
            .map(|g| g.releases.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RatingGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn releases(&self) -> impl Iterator<Item = (Rating, &Release)> {
        self.groups
            .iter()
            .flat_map(|g| g.releases.iter().map(move |r| (g.rating, r)))
    }
}

impl IntoIterator for Ratings {
    type Item = RatingGroup;
    type IntoIter = std::vec::IntoIter<RatingGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ratings {
    type Item = &'a RatingGroup;
    type IntoIter = std::slice::Iter<'a, RatingGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
