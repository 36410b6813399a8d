use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CatalogError;

/// The kind of ambient audio a track contains.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Meditation,
    Nature,
    Music,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Meditation => "Meditation",
            Self::Nature => "Nature Sounds",
            Self::Music => "Music",
        }
    }
}

/// A category filter as offered by the track list. `All` is a view concept,
/// tracks never carry it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    #[default]
    All,
    Meditation,
    Nature,
    Music,
}

impl CategoryFilter {
    /// Filters in the order the category bar shows them.
    pub const ALL: [CategoryFilter; 4] = [Self::All, Self::Meditation, Self::Nature, Self::Music];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Meditation => Category::Meditation.label(),
            Self::Nature => Category::Nature.label(),
            Self::Music => Category::Music.label(),
        }
    }

    pub fn matches(self, track: &Track) -> bool {
        match self {
            Self::All => true,
            Self::Meditation => track.category == Category::Meditation,
            Self::Nature => track.category == Category::Nature,
            Self::Music => track.category == Category::Music,
        }
    }

    /// Cycle `All -> Meditation -> Nature -> Music -> All`.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

/// One playable catalog entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Nominal length as `M:SS`; only shown until the real duration is known.
    #[serde(rename = "duration")]
    pub duration_label: String,
    /// Where the audio lives: `http(s)://` URL, `file://` URI or a plain path.
    pub source: String,
}

/// Validated, ordered set of tracks.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, duplicate ids and malformed labels.
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for t in &tracks {
            if !seen.insert(t.id) {
                return Err(CatalogError::DuplicateId(t.id));
            }
            if !is_duration_label(&t.duration_label) {
                return Err(CatalogError::BadDurationLabel {
                    id: t.id,
                    label: t.duration_label.clone(),
                });
            }
        }

        Ok(Self { tracks })
    }

    pub(super) fn from_validated(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// The first track; a catalog is never empty.
    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn get(&self, id: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// The track after `id` in catalog order, wrapping to the first.
    /// Unknown ids start over at the first track.
    pub fn next_after(&self, id: u32) -> &Track {
        match self.position(id) {
            Some(p) => &self.tracks[(p + 1) % self.tracks.len()],
            None => self.first(),
        }
    }

    /// The track before `id` in catalog order, wrapping to the last.
    pub fn prev_before(&self, id: u32) -> &Track {
        let last = self.tracks.len() - 1;
        match self.position(id) {
            Some(0) | None => &self.tracks[last],
            Some(p) => &self.tracks[p - 1],
        }
    }

    /// Tracks matching `filter`, in catalog order.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Track> {
        self.tracks.iter().filter(|t| filter.matches(t)).collect()
    }
}

/// `M:SS`: one or more minute digits, a colon, exactly two second digits below 60.
pub(crate) fn is_duration_label(label: &str) -> bool {
    let Some((mins, secs)) = label.split_once(':') else {
        return false;
    };
    !mins.is_empty()
        && mins.chars().all(|c| c.is_ascii_digit())
        && secs.len() == 2
        && secs.chars().all(|c| c.is_ascii_digit())
        && secs.parse::<u32>().map(|s| s < 60).unwrap_or(false)
}

/// Parse an `M:SS` label into seconds.
pub fn label_seconds(label: &str) -> Option<u64> {
    if !is_duration_label(label) {
        return None;
    }
    let (mins, secs) = label.split_once(':')?;
    Some(mins.parse::<u64>().ok()? * 60 + secs.parse::<u64>().ok()?)
}
