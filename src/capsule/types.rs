//! Core capsule type definitions.
//!
//! Defines [`CapsuleDate`] (the identifier shared by every record namespace),
//! [`Mood`] (the fixed glyph set), [`DayCapsule`] (one day's entry), and
//! [`QuickNote`] (an item in a day's quick-note list).

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Wire format for dates in keys and index records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date, rendered as `YYYY-MM-DD` everywhere it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapsuleDate(NaiveDate);

impl CapsuleDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// First day of this date's month.
    pub fn month_start(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Human form used in headers, e.g. `Friday, March 1`.
    pub fn display_long(&self) -> String {
        self.0.format("%A, %B %-d").to_string()
    }
}

impl std::fmt::Display for CapsuleDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for CapsuleDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|e| format!("invalid date {s:?} (expected YYYY-MM-DD): {e}"))
    }
}

impl Serialize for CapsuleDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CapsuleDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The fixed set of mood glyphs a capsule can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
    Tired,
    Celebrating,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Self::Happy,
        Self::Neutral,
        Self::Sad,
        Self::Angry,
        Self::Tired,
        Self::Celebrating,
    ];

    /// The glyph stored on disk.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Neutral => "😐",
            Self::Sad => "🙁",
            Self::Angry => "😡",
            Self::Tired => "😴",
            Self::Celebrating => "🥳",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Tired => "tired",
            Self::Celebrating => "celebrating",
        }
    }

    pub fn from_glyph(glyph: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.glyph() == glyph)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Accepts either the glyph or the lowercase name.
impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_glyph(s)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|m| m.name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| format!("unknown mood: {s}"))
    }
}

/// One day's journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCapsule {
    /// Opaque local file URI of the attached photo.
    pub image_ref: Option<String>,
    /// Free-form entry text, possibly empty.
    pub text: String,
    pub mood: Option<Mood>,
}

impl DayCapsule {
    /// An empty `image_ref` string is treated as no image.
    pub fn new(image_ref: Option<String>, text: impl Into<String>, mood: Option<Mood>) -> Self {
        Self {
            image_ref: image_ref.filter(|s| !s.is_empty()),
            text: text.into(),
            mood,
        }
    }

    /// True iff there is nothing worth persisting: no image, blank text, no mood.
    pub fn is_empty(&self) -> bool {
        self.image_ref.as_deref().map_or(true, str::is_empty)
            && self.text.trim().is_empty()
            && self.mood.is_none()
    }
}

/// A single quick note in a day's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickNote {
    /// Opaque unique token (epoch millis for notes created here).
    pub id: String,
    pub text: String,
}

impl QuickNote {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
