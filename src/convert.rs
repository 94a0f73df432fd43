//! Pure conversion of upstream JSON shapes into the crate's domain records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::{
    API_PROVIDER, FollowedUser, Follower, HotTrack, Playlist, RawFollowed, RawFollower,
    RawHotTrack, RawPost, RawSearchHit, RawUserPlaylist, SearchKind, SearchResult, Track, Trend,
};

pub fn timestamp_from_id(id: &str) -> Option<DateTime<Utc>> {
    let prefix = id.get(..8)?;
    let seconds = u32::from_str_radix(prefix, 16).ok()?;
    DateTime::from_timestamp(i64::from(seconds), 0)
}

#[derive(Debug, Clone)]
pub struct ProviderSpec {
    pub name: String,
    pub url_prefix: String,
    /// Some providers embed a `#fragment` in the reference that is not part
    /// of the canonical resource path.
    pub strip_fragment: bool,
}

/// Mapping from upstream provider codes (the first segment of an external id
/// like `/yt/dQw4w9WgXcQ`) to canonical provider names and URL prefixes.
///
/// The default mapping knows `yt` (YouTube) and `sc` (SoundCloud); additional
/// providers can be registered with [`ProviderMap::insert`] without touching
/// the conversion logic.
#[derive(Debug, Clone)]
pub struct ProviderMap {
    entries: HashMap<String, ProviderSpec>,
}

impl Default for ProviderMap {
    fn default() -> Self {
        let mut map = Self {
            entries: HashMap::new(),
        };
        map.insert("yt", "youtube", "https://www.youtube.com/watch?v=", false);
        map.insert("sc", "soundcloud", "https://soundcloud.com/", true);
        map
    }
}

impl ProviderMap {
    pub fn insert(&mut self, code: &str, name: &str, url_prefix: &str, strip_fragment: bool) {
        self.entries.insert(
            code.to_string(),
            ProviderSpec {
                name: name.to_string(),
                url_prefix: url_prefix.to_string(),
                strip_fragment,
            },
        );
    }

    /// Resolves an external id of the form `/<code>/<reference>` into a
    /// `(provider name, playable URL)` pair. Unknown codes resolve to a pair
    /// of empty strings.
    pub fn resolve(&self, eid: &str) -> (String, String) {
        let mut segments = eid.trim_start_matches('/').splitn(2, '/');
        let code = segments.next().unwrap_or("");
        let reference = segments.next().unwrap_or("");

        match self.entries.get(code) {
            Some(spec) => {
                let reference = if spec.strip_fragment {
                    reference.split('#').next().unwrap_or("")
                } else {
                    reference
                };
                (spec.name.clone(), format!("{}{}", spec.url_prefix, reference))
            }
            None => (String::new(), String::new()),
        }
    }

    /// Inverse of [`ProviderMap::resolve`]: derives the external id for a
    /// provider URL, or `None` when no registered provider matches.
    pub fn eid_for_url(&self, url: &str) -> Option<String> {
        for (code, spec) in &self.entries {
            if let Some(reference) = url.strip_prefix(spec.url_prefix.as_str()) {
                let reference = reference
                    .split(['&', '#'])
                    .next()
                    .unwrap_or("")
                    .trim_end_matches('/');
                if !reference.is_empty() {
                    return Some(format!("/{code}/{reference}"));
                }
            }
        }
        None
    }
}

pub fn absolute_image_url(img: &str, api_url: &str) -> String {
    if img.is_empty() || img.starts_with("http") {
        img.to_string()
    } else {
        format!("{api_url}{img}")
    }
}

pub fn rewrite_search_url(url: &str) -> String {
    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() > 2 && segments[1] == "u" {
        if segments.get(3) == Some(&"playlist") && segments.len() > 4 {
            return format!("/profile/{}/playlists/{}", segments[2], segments[4]);
        }
        return format!("/profile/{}/tracks", segments[2]);
    }
    url.to_string()
}

pub fn trend(prev: Option<i64>, score: Option<i64>) -> Trend {
    let Some(prev) = prev else {
        return Trend::Unchanged;
    };
    if score == Some(prev) {
        Trend::Unchanged
    } else if score.is_some_and(|score| score > prev) {
        Trend::Rising
    } else {
        Trend::Falling
    }
}

pub fn convert_track(post: Option<&RawPost>, providers: &ProviderMap, api_url: &str) -> Track {
    let Some(post) = post else {
        return Track::default();
    };

    let (source_provider, source_url) = providers.resolve(&post.eid);
    let (playlist_id, playlist_name) = post
        .pl
        .as_ref()
        .map(|pl| (pl.id.clone(), pl.name.clone()))
        .unwrap_or_default();
    let (original_owner_id, original_owner_name) = post
        .repost
        .as_ref()
        .map(|repost| (Some(repost.user_id.clone()), repost.user_name.clone()))
        .unwrap_or((None, String::new()));

    Track {
        id: post.id.clone(),
        created_at: timestamp_from_id(&post.id),
        owner_id: post.user_id.clone(),
        owner_name: post.user_name.clone(),
        owner_image_url: format!("{api_url}/img/u/{}", post.user_id),
        playlist_id,
        playlist_name,
        name: post.name.clone(),
        source_url,
        source_provider,
        image_url: post.img.clone(),
        original_owner_id,
        original_owner_name,
    }
}

pub fn convert_hot_track(raw: &RawHotTrack, providers: &ProviderMap, api_url: &str) -> HotTrack {
    HotTrack {
        track: convert_track(Some(&raw.post), providers, api_url),
        trend: trend(raw.prev, raw.score),
    }
}

pub fn convert_follower(raw: &RawFollower, api_url: &str) -> Follower {
    Follower {
        id: raw.user_id.clone(),
        name: raw.user_name.clone(),
        image_url: format!("{api_url}/img/u/{}?width=100&height=100", raw.user_id),
    }
}

pub fn convert_followed(profile_id: &str, raw: &RawFollowed, api_url: &str) -> FollowedUser {
    FollowedUser {
        follower_id: profile_id.to_string(),
        id: raw.target_id.clone(),
        name: raw.target_name.clone(),
        image_url: format!("{api_url}/img/u/{}?width=100&height=100", raw.target_id),
    }
}

pub fn convert_search_hits(
    items: Option<&[RawSearchHit]>,
    kind: SearchKind,
    limit: usize,
    api_url: &str,
) -> Vec<SearchResult> {
    let Some(items) = items else {
        return Vec::new();
    };

    items
        .iter()
        .take(limit)
        .map(|item| SearchResult {
            api_provider: API_PROVIDER.to_string(),
            id: item.id.clone(),
            name: item.name.clone(),
            url: rewrite_search_url(&item.url),
            image_url: absolute_image_url(&item.img, api_url),
            kind,
        })
        .collect()
}

pub fn convert_playlists(raws: &[RawUserPlaylist], api_url: &str) -> Vec<Playlist> {
    let mut playlists: Vec<Playlist> = raws
        .iter()
        .map(|raw| {
            // playlist covers are keyed by "<owner slug>_<playlist id>"
            let owner_slug = raw.url.split('/').nth(2).unwrap_or("");
            Playlist {
                id: raw.id.clone(),
                name: raw.name.clone(),
                image_url: format!("{api_url}/img/playlist/{owner_slug}_{}", raw.id),
                track_count: raw.track_count,
            }
        })
        .collect();

    // stable sort: playlists sharing a name keep their upstream order
    playlists.sort_by(|a, b| a.name.cmp(&b.name));
    playlists
}

/// Keeps one entry past `limit` so callers can detect that a further page
/// exists upstream.
pub fn clip_results<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.truncate(limit.saturating_add(1));
    items
}
