use tracing::warn;

use super::OpenwhydClient;
use crate::{
    convert,
    error::Result,
    types::{RawSearchResponse, SearchKind, SearchResult},
};

impl OpenwhydClient {
    /// Searches the platform for users, tracks and playlists matching
    /// `keywords`.
    ///
    /// The upstream answers all three buckets in a single response; each
    /// bucket is normalized independently and truncated to `limit` entries,
    /// so the result holds at most `3 * limit` items. Result URLs are
    /// rewritten to the caller-side routing convention and relative images
    /// are absolutized.
    pub async fn search(&self, keywords: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let response: RawSearchResponse = self
            .http()
            .get_json(
                "/search",
                &[("q", keywords), ("format", "json"), ("context", "header")],
                None,
            )
            .await
            .inspect_err(|e| warn!("search failed: {e}"))?;

        let api_url = self.api_url();
        let buckets = response.results;

        let mut results =
            convert::convert_search_hits(buckets.user.as_deref(), SearchKind::User, limit, api_url);
        results.extend(convert::convert_search_hits(
            buckets.track.as_deref(),
            SearchKind::Track,
            limit,
            api_url,
        ));
        results.extend(convert::convert_search_hits(
            buckets.playlist.as_deref(),
            SearchKind::Playlist,
            limit,
            api_url,
        ));

        Ok(results)
    }
}
