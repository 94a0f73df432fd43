use chrono::{Datelike, Timelike};
use openwhyd_client::convert::*;
use openwhyd_client::types::{
    RawFollowed, RawFollower, RawHotTrack, RawPlaylistRef, RawPost, RawRepost, RawSearchHit,
    RawUserPlaylist, SearchKind, Trend,
};

const API_URL: &str = "https://openwhyd.org";

// Helper function to create a test post
fn create_test_post(id: &str, name: &str, eid: &str) -> RawPost {
    RawPost {
        id: id.to_string(),
        user_id: "42".to_string(),
        user_name: "Some User".to_string(),
        name: name.to_string(),
        eid: eid.to_string(),
        img: "/img/post/abc".to_string(),
        pl: Some(RawPlaylistRef {
            id: "3".to_string(),
            name: "Favorites".to_string(),
        }),
        repost: None,
    }
}

// Helper function to create a test search hit
fn create_test_hit(id: &str, name: &str, url: &str, img: &str) -> RawSearchHit {
    RawSearchHit {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        img: img.to_string(),
    }
}

// Helper function to create a test user playlist
fn create_test_playlist(id: &str, name: &str, url: &str, track_count: u32) -> RawUserPlaylist {
    RawUserPlaylist {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        track_count,
    }
}

#[test]
fn test_timestamp_from_id() {
    // First 8 hex chars of the id are a big-endian epoch-seconds value
    let created_at = timestamp_from_id("5a001cbcaa2aa06454be3ef1").unwrap();
    assert_eq!(created_at.timestamp(), 0x5a001cbc_i64);
    assert_eq!(
        (created_at.year(), created_at.month(), created_at.day()),
        (2017, 11, 6)
    );
    assert_eq!(created_at.second(), 36);

    // Too short or non-hex prefixes yield nothing
    assert!(timestamp_from_id("5a001").is_none());
    assert!(timestamp_from_id("zzzzzzzzaa2aa06454be3ef1").is_none());
    assert!(timestamp_from_id("").is_none());
}

#[test]
fn test_provider_resolution() {
    let providers = ProviderMap::default();

    let (provider, url) = providers.resolve("/yt/abc123");
    assert_eq!(provider, "youtube");
    assert_eq!(url, "https://www.youtube.com/watch?v=abc123");

    let (provider, url) = providers.resolve("/sc/artist/some-track");
    assert_eq!(provider, "soundcloud");
    assert_eq!(url, "https://soundcloud.com/artist/some-track");

    // SoundCloud references may carry a fragment that is not part of the path
    let (provider, url) = providers.resolve("/sc/artist/some-track#t=30");
    assert_eq!(provider, "soundcloud");
    assert_eq!(url, "https://soundcloud.com/artist/some-track");

    // Unknown provider codes resolve to an empty pair instead of failing
    let (provider, url) = providers.resolve("/unknown/x");
    assert_eq!(provider, "");
    assert_eq!(url, "");

    let (provider, url) = providers.resolve("");
    assert_eq!(provider, "");
    assert_eq!(url, "");
}

#[test]
fn test_provider_map_is_extensible() {
    let mut providers = ProviderMap::default();
    providers.insert("dm", "dailymotion", "https://www.dailymotion.com/video/", false);

    let (provider, url) = providers.resolve("/dm/x7abc");
    assert_eq!(provider, "dailymotion");
    assert_eq!(url, "https://www.dailymotion.com/video/x7abc");
}

#[test]
fn test_eid_for_url() {
    let providers = ProviderMap::default();

    assert_eq!(
        providers.eid_for_url("https://www.youtube.com/watch?v=abc123"),
        Some("/yt/abc123".to_string())
    );
    // Extra query parameters and fragments are not part of the reference
    assert_eq!(
        providers.eid_for_url("https://www.youtube.com/watch?v=abc123&t=42s"),
        Some("/yt/abc123".to_string())
    );
    assert_eq!(
        providers.eid_for_url("https://soundcloud.com/artist/some-track"),
        Some("/sc/artist/some-track".to_string())
    );
    assert_eq!(providers.eid_for_url("https://example.com/whatever"), None);
}

#[test]
fn test_absolute_image_url() {
    assert_eq!(
        absolute_image_url("/img/u/42", API_URL),
        "https://openwhyd.org/img/u/42"
    );
    assert_eq!(
        absolute_image_url("https://cdn.example.com/a.jpg", API_URL),
        "https://cdn.example.com/a.jpg"
    );
    assert_eq!(absolute_image_url("", API_URL), "");
}

#[test]
fn test_rewrite_search_url() {
    assert_eq!(rewrite_search_url("/u/42/playlist/7"), "/profile/42/playlists/7");
    assert_eq!(rewrite_search_url("/u/42/tracks"), "/profile/42/tracks");
    assert_eq!(rewrite_search_url("/u/42"), "/profile/42/tracks");

    // Anything outside the /u/ convention passes through unchanged
    assert_eq!(rewrite_search_url("/hot/electro"), "/hot/electro");
    assert_eq!(rewrite_search_url("whatever"), "whatever");
}

#[test]
fn test_trend() {
    assert_eq!(trend(Some(5), Some(5)), Trend::Unchanged);
    assert_eq!(trend(Some(3), Some(7)), Trend::Rising);
    assert_eq!(trend(Some(7), Some(3)), Trend::Falling);
    assert_eq!(trend(None, Some(3)), Trend::Unchanged);
}

#[test]
fn test_convert_track() {
    let providers = ProviderMap::default();
    let post = create_test_post("5a001cbcaa2aa06454be3ef1", "Some Song", "/yt/abc123");

    let track = convert_track(Some(&post), &providers, API_URL);

    assert_eq!(track.id, "5a001cbcaa2aa06454be3ef1");
    assert_eq!(track.created_at.unwrap().timestamp(), 0x5a001cbc_i64);
    assert_eq!(track.owner_id, "42");
    assert_eq!(track.owner_name, "Some User");
    assert_eq!(track.owner_image_url, "https://openwhyd.org/img/u/42");
    assert_eq!(track.playlist_id, "3");
    assert_eq!(track.playlist_name, "Favorites");
    assert_eq!(track.name, "Some Song");
    assert_eq!(track.source_url, "https://www.youtube.com/watch?v=abc123");
    assert_eq!(track.source_provider, "youtube");
    assert_eq!(track.image_url, "/img/post/abc");
    assert_eq!(track.original_owner_id, None);
    assert_eq!(track.original_owner_name, "");
}

#[test]
fn test_convert_track_empty_input() {
    let providers = ProviderMap::default();

    // Absent input normalizes to an empty record with all fields present
    let track = convert_track(None, &providers, API_URL);
    assert_eq!(track.id, "");
    assert!(track.created_at.is_none());
    assert_eq!(track.owner_id, "");
    assert_eq!(track.name, "");
    assert_eq!(track.source_url, "");
    assert_eq!(track.source_provider, "");
    assert_eq!(track.original_owner_id, None);
}

#[test]
fn test_convert_track_repost_attribution() {
    let providers = ProviderMap::default();
    let mut post = create_test_post("5a001cbcaa2aa06454be3ef1", "Some Song", "/yt/abc123");
    post.repost = Some(RawRepost {
        user_id: "7".to_string(),
        user_name: "Original Poster".to_string(),
    });

    let track = convert_track(Some(&post), &providers, API_URL);
    assert_eq!(track.original_owner_id, Some("7".to_string()));
    assert_eq!(track.original_owner_name, "Original Poster");
}

#[test]
fn test_convert_hot_track() {
    let providers = ProviderMap::default();
    let raw = RawHotTrack {
        post: create_test_post("5a001cbcaa2aa06454be3ef1", "Some Song", "/yt/abc123"),
        prev: Some(3),
        score: Some(7),
    };

    let hot = convert_hot_track(&raw, &providers, API_URL);
    assert_eq!(hot.trend, Trend::Rising);
    assert_eq!(hot.track.name, "Some Song");
}

#[test]
fn test_convert_follower_and_followed() {
    let follower = convert_follower(
        &RawFollower {
            user_id: "42".to_string(),
            user_name: "Some User".to_string(),
        },
        API_URL,
    );
    assert_eq!(follower.id, "42");
    assert_eq!(
        follower.image_url,
        "https://openwhyd.org/img/u/42?width=100&height=100"
    );

    let followed = convert_followed(
        "42",
        &RawFollowed {
            target_id: "7".to_string(),
            target_name: "Other User".to_string(),
        },
        API_URL,
    );
    assert_eq!(followed.follower_id, "42");
    assert_eq!(followed.id, "7");
    assert_eq!(followed.name, "Other User");
    assert_eq!(
        followed.image_url,
        "https://openwhyd.org/img/u/7?width=100&height=100"
    );
}

#[test]
fn test_convert_search_hits() {
    let hits = vec![
        create_test_hit("u1", "Jazz Cat", "/u/1", "/img/u/1"),
        create_test_hit("u2", "Jazz Dog", "/u/2", "https://cdn.example.com/2.jpg"),
        create_test_hit("u3", "Jazz Fox", "/u/3", "/img/u/3"),
    ];

    let results = convert_search_hits(Some(&hits), SearchKind::User, 2, API_URL);

    // Each bucket is truncated to exactly `limit`
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].api_provider, "openwhyd");
    assert_eq!(results[0].kind, SearchKind::User);
    assert_eq!(results[0].url, "/profile/1/tracks");
    assert_eq!(results[0].image_url, "https://openwhyd.org/img/u/1");
    assert_eq!(results[1].image_url, "https://cdn.example.com/2.jpg");

    // Absent bucket normalizes to an empty sequence
    let empty = convert_search_hits(None, SearchKind::Track, 2, API_URL);
    assert!(empty.is_empty());
}

#[test]
fn test_convert_playlists_sorted_by_name() {
    let raws = vec![
        create_test_playlist("1", "Morning", "/u/adrien/playlist/1", 12),
        create_test_playlist("2", "Evening", "/u/adrien/playlist/2", 3),
        create_test_playlist("3", "Workout", "/u/adrien/playlist/3", 7),
    ];

    let playlists = convert_playlists(&raws, API_URL);
    let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Evening", "Morning", "Workout"]);

    // Cover image is keyed by owner slug and playlist id
    assert_eq!(
        playlists[0].image_url,
        "https://openwhyd.org/img/playlist/adrien_2"
    );
    assert_eq!(playlists[0].track_count, 3);
}

#[test]
fn test_convert_playlists_stable_on_ties() {
    let raws = vec![
        create_test_playlist("9", "Mix", "/u/adrien/playlist/9", 1),
        create_test_playlist("4", "Mix", "/u/adrien/playlist/4", 2),
    ];

    // Two playlists sharing a name keep their original relative order
    let playlists = convert_playlists(&raws, API_URL);
    assert_eq!(playlists[0].id, "9");
    assert_eq!(playlists[1].id, "4");
}

#[test]
fn test_clip_results() {
    // One entry past the limit is kept so callers can detect a further page
    let clipped = clip_results(vec![1, 2, 3, 4, 5], 2);
    assert_eq!(clipped, vec![1, 2, 3]);

    // Fewer entries than the limit are returned as-is
    let clipped = clip_results(vec![1, 2], 4);
    assert_eq!(clipped, vec![1, 2]);
}

#[test]
fn test_raw_post_tolerates_sparse_json() {
    // Playlist ids arrive as numbers or strings depending on the endpoint
    let post: RawPost = serde_json::from_str(
        r#"{"_id":"5a001cbcaa2aa06454be3ef1","uId":"42","pl":{"id":3,"name":"Favorites"}}"#,
    )
    .unwrap();
    assert_eq!(post.pl.as_ref().unwrap().id, "3");
    assert_eq!(post.name, "");
    assert_eq!(post.eid, "");

    let empty: RawPost = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.id, "");
    assert!(empty.pl.is_none());
}

#[test]
fn test_raw_hot_track_parses_ranks() {
    let raw: RawHotTrack = serde_json::from_str(
        r#"{"_id":"5a001cbcaa2aa06454be3ef1","name":"Some Song","prev":3,"score":7}"#,
    )
    .unwrap();
    assert_eq!(raw.prev, Some(3));
    assert_eq!(raw.score, Some(7));
    assert_eq!(raw.post.name, "Some Song");
}
