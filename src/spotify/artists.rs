use crate::types::{SeveralArtistsResponse, TopArtistsResponse};

use super::SpotifyClient;

impl SpotifyClient {
    /// Fetches the user's top artists over the medium-term window.
    pub async fn top_artists(&self, limit: u32) -> Result<TopArtistsResponse, reqwest::Error> {
        self.get_json(
            "me/top/artists",
            &[
                ("limit", limit.to_string()),
                ("time_range", "medium_term".to_string()),
            ],
        )
        .await
    }

    /// Looks up several artists at once.
    ///
    /// An empty id list answers an empty response without touching the network,
    /// since Spotify rejects `ids=` with a 400.
    pub async fn artists(&self, ids: &[String]) -> Result<SeveralArtistsResponse, reqwest::Error> {
        if ids.is_empty() {
            return Ok(SeveralArtistsResponse::default());
        }

        self.get_json("artists", &[("ids", ids.join(","))]).await
    }
}
