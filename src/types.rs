use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Provider tag attached to every search result produced by this crate.
pub const API_PROVIDER: &str = "openwhyd";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub name: String,
    pub image_url: String,
    pub cookie: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub cookie: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub owner_id: String,
    pub owner_name: String,
    pub owner_image_url: String,
    pub playlist_id: String,
    pub playlist_name: String,
    pub name: String,
    pub source_url: String,
    pub source_provider: String,
    pub image_url: String,
    pub original_owner_id: Option<String>,
    pub original_owner_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotTrack {
    pub track: Track,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follower {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedUser {
    pub follower_id: String,
    pub id: String,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    User,
    Track,
    Playlist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub api_provider: String,
    pub id: String,
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub kind: SearchKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub bio: String,
    pub track_count: u32,
    pub playlist_count: u32,
    pub follower_count: u32,
    pub following_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub track_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackDraft {
    pub id: Option<String>,
    pub eid: String,
    pub name: String,
    pub image_url: String,
    pub playlist_id: Option<String>,
    pub playlist_name: Option<String>,
    pub comment: String,
}

// Upstream wire shapes. Every field is defaulted so that partial or odd
// responses degrade to empty values instead of failing deserialization.

pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlaylistRef {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepost {
    #[serde(default, rename = "uId")]
    pub user_id: String,
    #[serde(default, rename = "uNm")]
    pub user_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default, rename = "uId")]
    pub user_id: String,
    #[serde(default, rename = "uNm")]
    pub user_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "eId")]
    pub eid: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub pl: Option<RawPlaylistRef>,
    #[serde(default)]
    pub repost: Option<RawRepost>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHotTrack {
    #[serde(flatten)]
    pub post: RawPost,
    #[serde(default)]
    pub prev: Option<i64>,
    #[serde(default)]
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHotTracks {
    #[serde(default)]
    pub tracks: Vec<RawHotTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchHit {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub img: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchBuckets {
    #[serde(default)]
    pub user: Option<Vec<RawSearchHit>>,
    #[serde(default)]
    pub track: Option<Vec<RawSearchHit>>,
    #[serde(default)]
    pub playlist: Option<Vec<RawSearchHit>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub results: RawSearchBuckets,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrackSearch {
    #[serde(default)]
    pub results: Vec<RawPost>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserPlaylist {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "nbTracks")]
    pub track_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserInfo {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "nbPosts")]
    pub post_count: u32,
    #[serde(default)]
    pub pl: Vec<RawUserPlaylist>,
    #[serde(default, rename = "nbSubscribers")]
    pub follower_count: u32,
    #[serde(default, rename = "nbSubscriptions")]
    pub following_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFollower {
    #[serde(default, rename = "uId")]
    pub user_id: String,
    #[serde(default, rename = "uNm")]
    pub user_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFollowed {
    #[serde(default, rename = "tId")]
    pub target_id: String,
    #[serde(default, rename = "tNm")]
    pub target_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLogin {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub error: Option<String>,
}
