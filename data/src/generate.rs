//! Synthetic catalog data.
//!
//! [`ActGenerator`] fills every field of an [`Act`] tree (albums, songs,
//! members, genres) from small word lists and a random number generator.
//! Dates are drawn relative to a fixed "today" so seeded runs repeat.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::DataError;
use crate::model::{Act, Album, AudioBitrate, AudioFeatures, Genre, Member, Song};

const KEYS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const MODES: [&str; 2] = ["major", "minor"];
const ACT_KINDS: [&str; 3] = ["Band", "Solo Artist", "Duo"];
const GENRES: [&str; 14] = [
    "Rock", "Jazz", "Hip Hop", "Electronic", "Pop", "Blues", "Classical", "Country", "Metal",
    "Reggae", "Folk", "Soul", "Funk", "Latin",
];
const NAME_PREFIXES: [&str; 10] = [
    "The", "Velvet", "Electric", "Midnight", "Silver", "Crimson", "Northern", "Wild", "Quiet",
    "Golden",
];
const NAME_NOUNS: [&str; 10] = [
    "Owls", "Harbor", "Echoes", "Machines", "Tides", "Lanterns", "Wolves", "Satellites", "Rivers",
    "Parade",
];
const FIRST_NAMES: [&str; 12] = [
    "Ana", "Bruno", "Carla", "Diego", "Elena", "Felix", "Greta", "Hugo", "Irene", "Jonas", "Lucia",
    "Marco",
];
const LAST_NAMES: [&str; 12] = [
    "Alvarez", "Berg", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen", "Ibarra",
    "Jensen", "Kowalski", "Moreau",
];
const LOREM: [&str; 24] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud",
];

/// Kinds of data the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Act,
}

impl DataKind {
    pub const ALL: [DataKind; 1] = [DataKind::Act];

    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::Act => "act",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DataError::UnknownDataKind {
                value: s.to_string(),
                supported: DataKind::ALL.map(DataKind::as_str).join(", "),
            })
    }
}

/// Random catalog data generator.
///
/// # Examples
///
/// ```
/// use catalog_data::ActGenerator;
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let mut generator = ActGenerator::with_rng(StdRng::seed_from_u64(7), today);
/// let acts = generator.acts(3);
///
/// assert_eq!(acts.len(), 3);
/// assert!(acts.iter().all(|act| act.formation_date < today));
/// ```
#[derive(Debug)]
pub struct ActGenerator<R> {
    rng: R,
    today: NaiveDate,
}

impl ActGenerator<ThreadRng> {
    /// Generator seeded from the thread-local RNG, dated from today (UTC).
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng(), Utc::now().date_naive())
    }
}

impl Default for ActGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ActGenerator<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    pub fn acts(&mut self, count: usize) -> Vec<Act> {
        (0..count).map(|_| self.act()).collect()
    }

    pub fn act(&mut self) -> Act {
        let genre_count = self.rng.gen_range(1..=3);
        let album_count = self.rng.gen_range(1..=10);
        let member_count = self.rng.gen_range(1..=5);
        Act {
            id: self.object_id(),
            name: self.act_name(),
            kind: self.pick(&ACT_KINDS).to_string(),
            biography: self.paragraph(),
            formation_date: self.past_date(30),
            disband_date: self.maybe_recent_date(),
            profile_picture_url: self.avatar_url(),
            genres: (0..genre_count).map(|_| self.genre()).collect(),
            albums: (0..album_count).map(|_| self.album()).collect(),
            members: (0..member_count).map(|_| self.member()).collect(),
        }
    }

    pub fn album(&mut self) -> Album {
        let song_count = self.rng.gen_range(5..=15);
        let songs: Vec<Song> = (0..song_count).map(|_| self.song()).collect();
        Album {
            id: self.object_id(),
            title: self.words(3),
            release_date: self.past_date(20),
            genre: self.genre(),
            cover_art_url: format!(
                "https://cdn.example.com/covers/{}.jpg",
                self.rng.gen_range(1..=10_000)
            ),
            total_tracks: songs.len() as u32,
            songs,
        }
    }

    pub fn song(&mut self) -> Song {
        Song {
            id: self.object_id(),
            title: self.words(3),
            audio_features: self.audio_features(),
            genre: self.genre(),
            release_date: self.past_date(10),
            duration: self.rng.gen_range(120..=600),
            lyrics: self.paragraph(),
            explicit: self.rng.gen_bool(0.5),
            bitrates: (0..3).map(|_| self.bitrate()).collect(),
        }
    }

    pub fn member(&mut self) -> Member {
        Member {
            name: format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES)),
            biography: self.paragraph(),
            birth_date: self.past_date(50),
            profile_picture_url: self.avatar_url(),
            start_date: self.past_date(20),
            end_date: self.maybe_recent_date(),
        }
    }

    pub fn genre(&mut self) -> Genre {
        Genre {
            name: self.pick(&GENRES).to_string(),
            description: self.sentence(),
        }
    }

    fn audio_features(&mut self) -> AudioFeatures {
        AudioFeatures {
            tempo: self.rng.gen_range(60..=200),
            audio_key: format!("{} {}", self.pick(&KEYS), self.pick(&MODES)),
            mode: self.rng.gen_range(0..=1).to_string(),
            loudness: self.rng.gen_range(-60.0..=0.0),
            energy: self.unit(),
            danceability: self.unit(),
            speechiness: self.unit(),
            acousticness: self.unit(),
            instrumentalness: self.unit(),
            liveness: self.unit(),
            valence: self.unit(),
        }
    }

    fn bitrate(&mut self) -> AudioBitrate {
        AudioBitrate {
            bitrate: self.rng.gen_range(64..=320),
            audio_url: format!(
                "https://cdn.example.com/audio/{}.mp3",
                self.rng.gen_range(1..=1_000_000)
            ),
        }
    }

    /// 24 hex digits, the shape of a MongoDB ObjectId.
    fn object_id(&mut self) -> String {
        let high: u32 = self.rng.gen_range(0..=u32::MAX);
        let low: u64 = self.rng.gen_range(0..=u64::MAX);
        format!("{high:08x}{low:016x}")
    }

    fn act_name(&mut self) -> String {
        format!("{} {}", self.pick(&NAME_PREFIXES), self.pick(&NAME_NOUNS))
    }

    fn avatar_url(&mut self) -> String {
        format!(
            "https://cdn.example.com/avatars/{}.jpg",
            self.rng.gen_range(1..=1_000)
        )
    }

    fn past_date(&mut self, years: u64) -> NaiveDate {
        let days = self.rng.gen_range(1..=365 * years);
        self.today - Days::new(days)
    }

    fn maybe_recent_date(&mut self) -> Option<NaiveDate> {
        if self.rng.gen_bool(0.5) {
            let days = self.rng.gen_range(1..=30);
            Some(self.today - Days::new(days))
        } else {
            None
        }
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..=1.0)
    }

    fn words(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| self.pick(&LOREM))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(4..=10);
        let words = self.words(count);
        let mut chars = words.chars();
        match chars.next() {
            Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    fn paragraph(&mut self) -> String {
        let count = self.rng.gen_range(3..=5);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
