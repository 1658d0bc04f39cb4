//! Catalog entities as the backend API exchanges them.
//!
//! Field names serialize in camelCase to match the API's JSON documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFeatures {
    /// Beats per minute.
    pub tempo: u32,
    /// Key and mode, e.g. `F# minor`.
    pub audio_key: String,
    /// `"0"` for minor, `"1"` for major.
    pub mode: String,
    /// Decibels, between -60 and 0.
    pub loudness: f64,
    pub energy: f64,
    pub danceability: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
}

/// One encoded rendition of a song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioBitrate {
    /// Kilobits per second.
    pub bitrate: u32,
    pub audio_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub audio_features: AudioFeatures,
    pub genre: Genre,
    pub release_date: NaiveDate,
    /// Length in seconds.
    pub duration: u32,
    pub lyrics: String,
    pub explicit: bool,
    pub bitrates: Vec<AudioBitrate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: Genre,
    pub cover_art_url: String,
    pub total_tracks: u32,
    pub songs: Vec<Song>,
}

/// A person in a band, duo or solo project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub biography: String,
    pub birth_date: NaiveDate,
    pub profile_picture_url: String,
    pub start_date: NaiveDate,
    /// `None` while the member is still active.
    pub end_date: Option<NaiveDate>,
}

/// A band or artist, the root document of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Act {
    pub id: String,
    pub name: String,
    /// `Band`, `Solo Artist` or `Duo`.
    #[serde(rename = "type")]
    pub kind: String,
    pub biography: String,
    pub formation_date: NaiveDate,
    pub disband_date: Option<NaiveDate>,
    pub profile_picture_url: String,
    pub genres: Vec<Genre>,
    pub albums: Vec<Album>,
    pub members: Vec<Member>,
}
