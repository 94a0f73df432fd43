use serde_json::Value;
use tracing::warn;

use super::OpenwhydClient;
use crate::{
    convert,
    error::Result,
    types::{FollowedUser, Follower, RawFollowed, RawFollower},
};

impl OpenwhydClient {
    /// Fetches the accounts following a profile.
    pub async fn followers(&self, profile_id: &str) -> Result<Vec<Follower>> {
        let raws: Vec<RawFollower> = self
            .http()
            .get_json(&format!("/api/follow/fetchFollowers/{profile_id}"), &[], None)
            .await
            .inspect_err(|e| warn!("followers fetch failed: {e}"))?;

        Ok(raws
            .iter()
            .map(|raw| convert::convert_follower(raw, self.api_url()))
            .collect())
    }

    /// Fetches the accounts a profile follows.
    pub async fn following(&self, profile_id: &str) -> Result<Vec<FollowedUser>> {
        let raws: Vec<RawFollowed> = self
            .http()
            .get_json(&format!("/api/follow/fetchFollowing/{profile_id}"), &[], None)
            .await
            .inspect_err(|e| warn!("following fetch failed: {e}"))?;

        Ok(raws
            .iter()
            .map(|raw| convert::convert_followed(profile_id, raw, self.api_url()))
            .collect())
    }

    /// Follows a target account. The upstream drives this mutation through a
    /// GET carrying the session cookie; the raw acknowledgment is returned.
    pub async fn follow(&self, target_id: &str, cookie: &str) -> Result<Value> {
        self.http()
            .get_json(
                "/api/follow",
                &[("action", "insert"), ("tId", target_id)],
                Some(cookie),
            )
            .await
            .inspect_err(|e| warn!("follow failed: {e}"))
    }

    /// Unfollows a target account. Returns the raw acknowledgment.
    pub async fn unfollow(&self, target_id: &str, cookie: &str) -> Result<Value> {
        self.http()
            .get_json(
                "/api/follow",
                &[("action", "delete"), ("tId", target_id)],
                Some(cookie),
            )
            .await
            .inspect_err(|e| warn!("unfollow failed: {e}"))
    }
}
