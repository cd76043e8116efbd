//! Reshapes raw Spotify payloads into the compact [`Stats`] summary.

use std::collections::HashSet;

use crate::types::{
    Artist, Image, RecentlyPlayedResponse, SavedTracksResponse, SeveralArtistsResponse, StatItem,
    Stats, TopArtistsResponse,
};

/// Number of top artists requested from Spotify.
pub const TOP_ARTISTS_FETCH_LIMIT: u32 = 10;
/// Number of recently played tracks requested from Spotify.
pub const RECENT_TRACKS_FETCH_LIMIT: u32 = 5;
/// Cap applied to every list in [`Stats`].
pub const MAX_ITEMS: usize = 5;

/// Builds the listening summary.
///
/// Artists come from `top`, in ranking order, enriched with `details` when the
/// batch lookup knows the same id. Genres are gathered over every fetched
/// artist (not only the displayed ones), deduplicated in first-seen order.
pub fn aggregate(
    top: &TopArtistsResponse,
    details: &SeveralArtistsResponse,
    recent: &RecentlyPlayedResponse,
    saved: &SavedTracksResponse,
) -> Stats {
    let artists = merge_artist_details(&top.items, details);

    let top_artists = artists
        .iter()
        .take(MAX_ITEMS)
        .map(|artist| StatItem {
            name: artist.name.clone(),
            image: first_image(artist.images.as_deref()),
        })
        .collect();

    let recent_tracks = recent
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .take(MAX_ITEMS)
        .map(|track| StatItem {
            name: track.name.clone(),
            image: track
                .album
                .as_ref()
                .and_then(|album| first_image(album.images.as_deref())),
        })
        .collect();

    Stats {
        top_artists,
        recent_tracks,
        genres: unique_genres(&artists),
        total_saved: saved.total,
    }
}

/// Ids to send to the batch artist lookup, in ranking order.
pub fn artist_ids(top: &TopArtistsResponse) -> Vec<String> {
    top.items
        .iter()
        .filter(|a| !a.id.is_empty())
        .map(|a| a.id.clone())
        .collect()
}

fn merge_artist_details(top: &[Artist], details: &SeveralArtistsResponse) -> Vec<Artist> {
    top.iter()
        .map(|artist| {
            let detail = details
                .artists
                .iter()
                .flatten()
                .find(|d| !artist.id.is_empty() && d.id == artist.id);

            let Some(detail) = detail else {
                return artist.clone();
            };

            let images = match detail.images.as_deref() {
                Some(images) if !images.is_empty() => detail.images.clone(),
                _ => artist.images.clone(),
            };
            let genres = if detail.genres.is_empty() {
                artist.genres.clone()
            } else {
                detail.genres.clone()
            };

            Artist {
                id: artist.id.clone(),
                name: artist.name.clone(),
                genres,
                images,
            }
        })
        .collect()
}

fn unique_genres(artists: &[Artist]) -> Vec<String> {
    let mut seen = HashSet::new();
    artists
        .iter()
        .flat_map(|a| a.genres.iter())
        .filter(|g| seen.insert(*g))
        .take(MAX_ITEMS)
        .cloned()
        .collect()
}

fn first_image(images: Option<&[Image]>) -> Option<String> {
    images.and_then(|imgs| imgs.first()).map(|img| img.url.clone())
}
