use serde_json::Value;
use tracing::warn;

use super::OpenwhydClient;
use crate::{
    convert,
    error::{OpenwhydError, Result},
    types::{HotTrack, RawHotTracks, RawPost, RawTrackSearch, Track, TrackDraft},
};

impl OpenwhydClient {
    /// Resolves a single track page (an upstream resource path like
    /// `/u/<id>/...`) to the playable URL of its media provider.
    pub async fn track_source_url(&self, track_path: &str) -> Result<String> {
        let body: Value = self
            .http()
            .get_json(track_path, &[("format", "json")], None)
            .await
            .inspect_err(|e| warn!("track lookup failed: {e}"))?;

        // the external id sits at the root, or under `data` on post pages
        let eid = body
            .get("eId")
            .or_else(|| body.get("data").and_then(|data| data.get("eId")))
            .and_then(Value::as_str)
            .ok_or_else(|| OpenwhydError::missing_field("eId"))?;

        let (_, url) = self.providers().resolve(eid);
        Ok(url)
    }

    /// Fetches the "hot tracks" chart, optionally for a single genre, with
    /// each entry carrying its rank trend.
    pub async fn hot_tracks(&self, limit: usize, genre: Option<&str>) -> Result<Vec<HotTrack>> {
        let limit_value = limit.to_string();
        let response: RawHotTracks = match genre {
            Some(genre) => {
                self.http()
                    .get_json(&format!("/hot/{genre}"), &[("format", "json")], None)
                    .await
            }
            None => {
                self.http()
                    .get_json(
                        "/hot",
                        &[("format", "json"), ("limit", limit_value.as_str())],
                        None,
                    )
                    .await
            }
        }
        .inspect_err(|e| warn!("hot tracks fetch failed: {e}"))?;

        Ok(response
            .tracks
            .iter()
            .map(|raw| convert::convert_hot_track(raw, self.providers(), self.api_url()))
            .collect())
    }

    /// Fetches the tracks posted by a profile.
    ///
    /// With a `filter`, the upstream's search index is queried instead of the
    /// profile feed; that path does not cap results server-side, so the
    /// converted list is clipped to `limit + 1` entries (the extra entry
    /// tells callers another page exists).
    pub async fn user_tracks(
        &self,
        profile_id: &str,
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<Track>> {
        match filter {
            Some(filter) => {
                let response: RawTrackSearch = self
                    .http()
                    .get_json(
                        "/search",
                        &[("q", filter), ("uid", profile_id), ("format", "json")],
                        None,
                    )
                    .await
                    .inspect_err(|e| warn!("filtered track fetch failed: {e}"))?;

                Ok(convert::clip_results(self.convert_posts(&response.results), limit))
            }
            None => {
                let limit_value = limit.to_string();
                let posts: Vec<RawPost> = self
                    .http()
                    .get_json(
                        &format!("/u/{profile_id}"),
                        &[("format", "json"), ("limit", limit_value.as_str())],
                        None,
                    )
                    .await
                    .inspect_err(|e| warn!("profile track fetch failed: {e}"))?;

                Ok(self.convert_posts(&posts))
            }
        }
    }

    /// Fetches the tracks of one playlist, clipped to `limit + 1` entries.
    pub async fn playlist_tracks(
        &self,
        profile_id: &str,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<Track>> {
        let limit_value = limit.to_string();
        let posts: Vec<RawPost> = self
            .http()
            .get_json(
                &format!("/u/{profile_id}/playlist/{playlist_id}"),
                &[("format", "json"), ("limit", limit_value.as_str())],
                None,
            )
            .await
            .inspect_err(|e| warn!("playlist track fetch failed: {e}"))?;

        Ok(convert::clip_results(self.convert_posts(&posts), limit))
    }

    /// Fetches the global stream feed.
    pub async fn stream_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        let limit_value = limit.to_string();
        let posts: Vec<RawPost> = self
            .http()
            .get_json(
                "/",
                &[("format", "json"), ("limit", limit_value.as_str())],
                None,
            )
            .await
            .inspect_err(|e| warn!("stream fetch failed: {e}"))?;

        Ok(self.convert_posts(&posts))
    }

    /// Posts a new track to the authenticated account. Returns the raw
    /// upstream acknowledgment; callers inspect it for success.
    pub async fn post_track(&self, draft: &TrackDraft, cookie: &str) -> Result<Value> {
        self.http()
            .post_form_json("/api/post", &track_form(draft), Some(cookie))
            .await
            .inspect_err(|e| warn!("track post failed: {e}"))
    }

    /// Updates an existing track post. Updating is an insert carrying the
    /// existing post id in `draft.id`.
    pub async fn update_track(&self, draft: &TrackDraft, cookie: &str) -> Result<Value> {
        self.post_track(draft, cookie).await
    }

    /// Deletes a track post. Returns the raw upstream acknowledgment.
    pub async fn delete_track(&self, track_id: &str, cookie: &str) -> Result<Value> {
        let form = vec![
            ("action", "delete".to_string()),
            ("_id", track_id.to_string()),
        ];

        self.http()
            .post_form_json("/api/post", &form, Some(cookie))
            .await
            .inspect_err(|e| warn!("track delete failed: {e}"))
    }

    fn convert_posts(&self, posts: &[RawPost]) -> Vec<Track> {
        posts
            .iter()
            .map(|post| convert::convert_track(Some(post), self.providers(), self.api_url()))
            .collect()
    }
}

fn track_form(draft: &TrackDraft) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("action", "insert".to_string()),
        ("ctx", "bk".to_string()),
        ("eId", draft.eid.clone()),
        ("name", draft.name.clone()),
        ("img", draft.image_url.clone()),
        ("text", draft.comment.clone()),
    ];
    if let Some(id) = &draft.id {
        form.push(("_id", id.clone()));
    }
    if let Some(playlist_id) = &draft.playlist_id {
        form.push(("pl[id]", playlist_id.clone()));
    }
    if let Some(playlist_name) = &draft.playlist_name {
        form.push(("pl[name]", playlist_name.clone()));
    }
    form
}
