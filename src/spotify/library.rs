use crate::types::SavedTracksResponse;

use super::SpotifyClient;

impl SpotifyClient {
    /// Reads the size of the saved-tracks library.
    ///
    /// Only `total` is used, so a single item is requested.
    pub async fn saved_tracks(&self) -> Result<SavedTracksResponse, reqwest::Error> {
        self.get_json("me/tracks", &[("limit", 1)]).await
    }
}
