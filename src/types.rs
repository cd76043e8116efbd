use serde::{Deserialize, Serialize};

/// Access token granted by the authorization code exchange.
///
/// Only the access token is kept; refresh data and expiry are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
}

/// A displayable entry of the summary: an artist or a track with its artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatItem {
    pub name: String,
    pub image: Option<String>,
}

/// Compact listening summary handed to the roast generator and the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub top_artists: Vec<StatItem>,
    pub recent_tracks: Vec<StatItem>,
    pub genres: Vec<String>,
    pub total_saved: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastRecord {
    pub roast: String,
    pub stats: Stats,
}

// Spotify Web API payloads. Every nested field is optional or defaulted so a
// sparse response degrades to empty values instead of failing to decode.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    #[serde(default)]
    pub items: Vec<Artist>,
}

/// `GET /artists?ids=...` answers `null` for ids it does not know.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayHistory {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    #[serde(default)]
    pub items: Vec<PlayHistory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    #[serde(default)]
    pub total: u64,
}
