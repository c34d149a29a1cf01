//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`Transport`](crate::transport::Transport),
//! a recording event sink and payload builders for the shipped sites,
//! allowing adapters to be tested end to end without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use scour_core::testing::{fixtures, MockTransport, RecordingSink};
//!
//! let transport = MockTransport::new();
//! transport.push_json(fixtures::shiza_response(vec![/* nodes */])).await;
//!
//! let sink = RecordingSink::new();
//! // Build an adapter with Arc::new(transport.clone()) and Arc::new(sink.clone())...
//! ```

mod mock_transport;
mod recording_sink;

pub use mock_transport::MockTransport;
pub use recording_sink::RecordingSink;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::collections::BTreeSet;
    use url::Url;

    use crate::release::ResultEntry;
    use crate::sites::{alpharatio, shizaproject};
    use crate::taxonomy::UniversalCategory;

    pub const MAGNET: &str = "magnet:?xt=urn:btih:0123456789abcdef0123456789abcdef01234567";

    /// Create a test entry with reasonable defaults.
    pub fn entry(title: &str) -> ResultEntry {
        let link = Url::parse(&format!(
            "https://tracker.example/dl/{}.torrent",
            urlencoding::encode(title)
        ))
        .unwrap();

        ResultEntry {
            title: title.to_string(),
            guid: link.clone(),
            details_uri: Url::parse("https://tracker.example/details/1").unwrap(),
            download_uri: Some(link),
            magnet_uri: None,
            size: 1024 * 1024 * 700, // 700 MB
            seeders: 20,
            leechers: 2,
            grabs: 100,
            files: None,
            publish_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            categories: BTreeSet::from([UniversalCategory::Movies]),
            download_volume_factor: 1.0,
            upload_volume_factor: 1.0,
            minimum_seed_ratio: None,
            minimum_seed_time_seconds: None,
            poster_uri: None,
            imdb_id: None,
            description: None,
        }
    }

    // =========================================================================
    // ShizaProject
    // =========================================================================

    /// One torrent of a ShizaProject release.
    pub fn shiza_torrent(file_url: Option<&str>, magnet: Option<&str>, qualities: &[&str]) -> Value {
        json!({
            "downloaded": 12,
            "seeders": 5,
            "leechers": 1,
            "size": 1_073_741_824u64,
            "magnetUri": magnet,
            "updatedAt": "2024-02-01T12:00:00Z",
            "file": file_url.map(|url| json!({ "url": url })),
            "videoQualities": qualities,
        })
    }

    /// A release named `name` (original name "`name` JP", alternate "Bar").
    pub fn shiza_node(name: &str, torrents: Vec<Value>) -> Value {
        let slug = name.to_lowercase().replace(' ', "-");
        json!({
            "name": name,
            "originalName": format!("{} JP", name),
            "alternativeNames": ["Bar"],
            "publishedAt": "2024-01-15T00:00:00Z",
            "slug": slug,
            "posters": [
                { "preview": { "url": format!("{}p/{}.jpg", shizaproject::DEFAULT_SITE_LINK, slug) } }
            ],
            "torrents": torrents,
        })
    }

    /// The GraphQL response body for `nodes`.
    pub fn shiza_response(nodes: Vec<Value>) -> Vec<u8> {
        let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
        serde_json::to_vec(&json!({ "data": { "releases": { "edges": edges } } })).unwrap()
    }

    // =========================================================================
    // AlphaRatio (Gazelle)
    // =========================================================================

    /// One torrent of a Gazelle group.
    pub fn gazelle_torrent(torrent_id: u64, category: &str, freeleech: bool) -> Value {
        json!({
            "torrentId": torrent_id,
            "size": 4_294_967_296u64,
            "snatches": 7,
            "seeders": 10,
            "leechers": 2,
            "time": "2024-01-02 03:04:05",
            "fileCount": 3,
            "format": "MKV",
            "encoding": "x264",
            "media": "WEB",
            "category": category,
            "isFreeleech": freeleech,
            "isNeutralLeech": false,
            "isPersonalFreeleech": false,
            "canUseToken": true,
        })
    }

    /// A group from 2023 tagged `drama` and `tt0944947`.
    pub fn gazelle_group(group_id: u64, name: &str, torrents: Vec<Value>) -> Value {
        json!({
            "groupId": group_id,
            "groupName": name,
            "groupYear": 2023,
            "artist": null,
            "cover": format!("{}covers/{}.jpg", alpharatio::DEFAULT_SITE_LINK, group_id),
            "tags": ["drama", "tt0944947"],
            "category": "2",
            "groupTime": 1_700_000_000u64,
            "torrents": torrents,
        })
    }

    /// A successful browse response for `groups`.
    pub fn gazelle_response(groups: Vec<Value>) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "status": "success",
            "response": { "currentPage": 1, "pages": 1, "results": groups }
        }))
        .unwrap()
    }
}
