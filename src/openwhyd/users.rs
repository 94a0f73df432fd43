use tracing::warn;

use super::OpenwhydClient;
use crate::{
    error::{OpenwhydError, Result},
    types::{CurrentUser, RawUserInfo, UserProfile},
};

impl OpenwhydClient {
    /// Fetches a public profile with its activity counters.
    pub async fn user_profile(&self, profile_id: &str) -> Result<UserProfile> {
        let info: RawUserInfo = self
            .http()
            .get_json(
                "/api/user",
                &[
                    ("id", profile_id),
                    ("includeSubscr", "true"),
                    ("countPosts", "true"),
                ],
                None,
            )
            .await
            .inspect_err(|e| warn!("profile fetch failed: {e}"))?;

        Ok(UserProfile {
            id: profile_id.to_string(),
            name: info.name,
            image_url: info.img,
            bio: info.text,
            track_count: info.post_count,
            playlist_count: info.pl.len() as u32,
            follower_count: info.follower_count,
            following_count: info.following_count,
        })
    }

    /// Fetches the identity bound to a session credential. Fails with
    /// [`OpenwhydError::Auth`] when the upstream does not recognize the
    /// session.
    pub async fn current_user(&self, cookie: &str) -> Result<CurrentUser> {
        let info: RawUserInfo = self
            .http()
            .get_json("/api/user", &[], Some(cookie))
            .await
            .inspect_err(|e| warn!("current user fetch failed: {e}"))?;

        if info.id.is_empty() {
            return Err(OpenwhydError::Auth("session not recognized by upstream".into()));
        }

        Ok(CurrentUser {
            id: info.id,
            name: info.name,
            image_url: info.img,
        })
    }
}
