use serde_json::Value;
use tracing::warn;

use super::OpenwhydClient;
use crate::{
    convert,
    error::Result,
    types::{Playlist, RawUserInfo},
};

impl OpenwhydClient {
    /// Fetches a profile's playlists, sorted by name. Playlists sharing a
    /// name keep their upstream relative order.
    pub async fn user_playlists(&self, profile_id: &str) -> Result<Vec<Playlist>> {
        let info: RawUserInfo = self
            .http()
            .get_json("/api/user", &[("id", profile_id)], None)
            .await
            .inspect_err(|e| warn!("playlist fetch failed: {e}"))?;

        Ok(convert::convert_playlists(&info.pl, self.api_url()))
    }

    /// Creates a playlist on the authenticated account. Returns the raw
    /// upstream acknowledgment.
    pub async fn create_playlist(&self, name: &str, cookie: &str) -> Result<Value> {
        let form = vec![
            ("action", "create".to_string()),
            ("name", name.to_string()),
        ];

        self.http()
            .post_form_json("/api/playlist", &form, Some(cookie))
            .await
            .inspect_err(|e| warn!("playlist create failed: {e}"))
    }

    /// Renames a playlist. Returns the raw upstream acknowledgment.
    pub async fn rename_playlist(
        &self,
        playlist_id: &str,
        name: &str,
        cookie: &str,
    ) -> Result<Value> {
        let form = vec![
            ("action", "rename".to_string()),
            ("id", playlist_id.to_string()),
            ("name", name.to_string()),
        ];

        self.http()
            .post_form_json("/api/playlist", &form, Some(cookie))
            .await
            .inspect_err(|e| warn!("playlist rename failed: {e}"))
    }

    /// Deletes a playlist. Returns the raw upstream acknowledgment.
    pub async fn delete_playlist(&self, playlist_id: &str, cookie: &str) -> Result<Value> {
        let form = vec![
            ("action", "delete".to_string()),
            ("id", playlist_id.to_string()),
        ];

        self.http()
            .post_form_json("/api/playlist", &form, Some(cookie))
            .await
            .inspect_err(|e| warn!("playlist delete failed: {e}"))
    }
}
