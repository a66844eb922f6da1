//! Album schema.
//!
//! Three shapes of an album live here:
//!
//! - [`Album`]: the stored record, including the internal `_id` and `__v` markers.
//! - [`AlbumView`]: what clients see. `Album` serializes through it, so internal
//!   fields never reach a response body.
//! - [`AlbumFields`] / [`AlbumDraft`]: client-submitted values and the per-field
//!   merge + validation that turns them into a [`ValidAlbum`] ready to persist.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Resource name used in error messages.
pub const RESOURCE: &str = "Album";

pub const PATH_TITLE: &str = "title";
pub const PATH_ARTIST: &str = "artist";
pub const PATH_IMAGE_URL: &str = "imageUrl";
pub const PATH_RELEASE_DATE: &str = "releaseDate";

/// Schema order, used to sort violations.
const PATHS: [&str; 4] = [PATH_TITLE, PATH_ARTIST, PATH_IMAGE_URL, PATH_RELEASE_DATE];

/// A persisted album as the store knows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "AlbumView")]
pub struct Album {
    /// Internal storage identifier (`_id`).
    pub object_id: Uuid,
    /// Internal revision marker (`__v`), bumped on every update.
    pub revision: i64,
    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
}

impl Album {
    /// The client-facing identifier: the hex form of the internal id.
    pub fn id(&self) -> String {
        self.object_id.simple().to_string()
    }

    pub fn view(&self) -> AlbumView {
        AlbumView {
            id: self.id(),
            title: self.title.clone(),
            artist: self.artist.clone(),
            image_url: self.image_url.clone(),
            release_date: self.release_date.map(format_date),
        }
    }
}

/// Client-facing album representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl From<Album> for AlbumView {
    fn from(album: Album) -> Self {
        album.view()
    }
}

/// ISO 8601 with millisecond precision and a `Z` suffix.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts RFC 3339 date-times, plain `YYYY-MM-DD` dates and epoch milliseconds.
///
/// The UTC year must lie in `0..=9999`; [`format_date`] output outside that range is
/// not RFC 3339 and could not be read back.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    parse_any_date(value).filter(|dt| (0..=9999).contains(&dt.year()))
}

fn parse_any_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Fields submitted by a client.
///
/// `None` means the key was absent; `Some(Value::Null)` means it was sent as `null`.
/// Keys outside the schema (including `id`, `_id`, `__v`) are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumFields {
    pub title: Option<Value>,
    pub artist: Option<Value>,
    pub image_url: Option<Value>,
    pub release_date: Option<Value>,
}

impl From<Map<String, Value>> for AlbumFields {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            title: body.remove(PATH_TITLE),
            artist: body.remove(PATH_ARTIST),
            image_url: body.remove(PATH_IMAGE_URL),
            release_date: body.remove(PATH_RELEASE_DATE),
        }
    }
}

/// One field-level violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: &'static str,
    pub message: String,
}

/// The violations that aborted a write, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.violations.iter().find(|v| v.path == path).map(|v| v.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    fn push(&mut self, path: &'static str, message: String) {
        self.violations.push(FieldViolation { path, message });
        self.violations
            .sort_by_key(|v| PATHS.iter().position(|p| *p == v.path).unwrap_or(PATHS.len()));
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed", RESOURCE)?;
        for (i, v) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            write!(f, "{}{}: {}", sep, v.path, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Album values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAlbum {
    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
}

/// Unvalidated album values, either empty (create) or seeded from a stored album (update).
#[derive(Debug, Clone, Default)]
pub struct AlbumDraft {
    title: Option<String>,
    artist: Option<String>,
    image_url: Option<String>,
    release_date: Option<DateTime<Utc>>,
    errors: ValidationErrors,
}

impl From<&Album> for AlbumDraft {
    fn from(album: &Album) -> Self {
        Self {
            title: Some(album.title.clone()),
            artist: Some(album.artist.clone()),
            image_url: album.image_url.clone(),
            release_date: album.release_date,
            errors: ValidationErrors::default(),
        }
    }
}

impl AlbumDraft {
    /// Overwrites every field present in `fields`; absent fields keep their value.
    pub fn apply(mut self, fields: AlbumFields) -> Self {
        if let Some(v) = fields.title {
            self.title = cast_string(PATH_TITLE, v, &mut self.errors);
        }
        if let Some(v) = fields.artist {
            self.artist = cast_string(PATH_ARTIST, v, &mut self.errors);
        }
        if let Some(v) = fields.image_url {
            self.image_url = cast_string(PATH_IMAGE_URL, v, &mut self.errors);
        }
        if let Some(v) = fields.release_date {
            self.release_date = cast_date(PATH_RELEASE_DATE, v, &mut self.errors);
        }
        self
    }

    pub fn validate(self) -> Result<ValidAlbum, ValidationErrors> {
        let mut errors = self.errors;
        let title = required(PATH_TITLE, self.title, &mut errors);
        let artist = required(PATH_ARTIST, self.artist, &mut errors);
        match (title, artist) {
            (Some(title), Some(artist)) if errors.is_empty() => Ok(ValidAlbum {
                title,
                artist,
                image_url: self.image_url,
                release_date: self.release_date,
            }),
            _ => Err(errors),
        }
    }
}

fn required(path: &'static str, value: Option<String>, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        Some(s) if !s.is_empty() => Some(s),
        _ => {
            // a failed cast already explains the missing value
            if !errors.contains(path) {
                errors.push(path, format!("Path `{}` is required.", path));
            }
            None
        }
    }
}

fn cast_string(path: &'static str, value: Value, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            errors.push(path, format!("Cast to string failed for value {} at path \"{}\"", other, path));
            None
        }
    }
}

fn cast_date(path: &'static str, value: Value, errors: &mut ValidationErrors) -> Option<DateTime<Utc>> {
    if value.is_null() {
        return None;
    }
    let parsed = parse_date(&value);
    if parsed.is_none() {
        errors.push(path, format!("Cast to date failed for value {} at path \"{}\"", value, path));
    }
    parsed
}
