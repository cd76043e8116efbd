use crate::types::RecentlyPlayedResponse;

use super::SpotifyClient;

impl SpotifyClient {
    /// Fetches the user's most recently played tracks.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of play history items (Spotify caps it at 50)
    ///
    /// # Returns
    ///
    /// The play history, newest first. Items whose track is missing are kept
    /// as-is and skipped later by the aggregator.
    pub async fn recently_played(
        &self,
        limit: u32,
    ) -> Result<RecentlyPlayedResponse, reqwest::Error> {
        self.get_json("me/player/recently-played", &[("limit", limit)])
            .await
    }
}
