//! Adapter pipeline integration tests.
//!
//! These tests drive the shipped adapters end to end through a mock
//! transport: translate -> send -> parse -> expand -> policy.

use std::sync::Arc;
use std::time::Duration;

use tokio_test::assert_ok;

use scour_core::{
    config::IndexerConfig,
    load_config_from_str,
    testing::{fixtures, MockTransport, RecordingSink},
    AdapterError, AdapterEvent, Indexer, RawResponse, TransportError, UniversalCategory,
    UniversalQuery,
};

/// Test helper wiring one configured adapter to a mock transport.
struct TestHarness {
    adapter: Arc<dyn Indexer>,
    transport: MockTransport,
    sink: RecordingSink,
}

impl TestHarness {
    fn new(toml: &str) -> Self {
        let config = load_config_from_str(toml).expect("Failed to parse config");
        let indexer: &IndexerConfig = &config.indexers[0];

        let transport = MockTransport::new();
        let sink = RecordingSink::new();
        let adapter = scour_core::build_adapter(
            indexer,
            Arc::new(transport.clone()),
            Arc::new(sink.clone()),
        )
        .expect("Failed to build adapter");

        Self {
            adapter,
            transport,
            sink,
        }
    }

    fn shiza() -> Self {
        Self::new("[[indexers]]\nkind = \"shizaproject\"\n")
    }

    fn alpharatio() -> Self {
        Self::new("[[indexers]]\nkind = \"alpharatio\"\napi_key = \"key\"\n")
    }
}

#[tokio::test]
async fn test_shiza_search_applies_freeleech_policy() {
    let harness = TestHarness::shiza();
    harness
        .transport
        .push_json(fixtures::shiza_response(vec![
            fixtures::shiza_node(
                "Foo",
                vec![
                    fixtures::shiza_torrent(Some("https://shiza-project.com/t/1.torrent"), None, &["1080p"]),
                    fixtures::shiza_torrent(None, Some(fixtures::MAGNET), &["720p"]),
                ],
            ),
            fixtures::shiza_node(
                "Other Show",
                vec![fixtures::shiza_torrent(None, Some(fixtures::MAGNET), &[])],
            ),
        ]))
        .await;

    let entries = harness
        .adapter
        .search(&UniversalQuery::search("foo"))
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].title, "Foo / Foo JP / Bar [ 1080p ]");
    assert_eq!(entries[1].title, "Foo / Foo JP / Bar [ 720p ]");
    assert_eq!(entries[2].title, "Other Show / Other Show JP / Bar");
    assert!(entries.iter().all(|e| e.download_volume_factor == 0.0));
    assert!(entries.iter().all(|e| e.upload_volume_factor == 1.0));
    assert!(entries
        .iter()
        .all(|e| e.categories.contains(&UniversalCategory::TvAnime)));

    let request = harness.transport.last_request().await.unwrap();
    assert_eq!(request.url, "https://shiza-project.com/graphql");
    assert!(harness.sink.events().is_empty());
}

#[tokio::test]
async fn test_variant_without_links_is_dropped_and_reported() {
    let harness = TestHarness::shiza();
    harness
        .transport
        .push_json(fixtures::shiza_response(vec![fixtures::shiza_node(
            "Foo",
            vec![
                fixtures::shiza_torrent(None, Some(fixtures::MAGNET), &["1080p"]),
                fixtures::shiza_torrent(None, None, &["720p"]),
            ],
        )]))
        .await;

    let entries = harness
        .adapter
        .search(&UniversalQuery::search("foo"))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].magnet_uri.as_ref().unwrap().as_str(), fixtures::MAGNET);
    assert_eq!(
        harness.sink.events(),
        vec![AdapterEvent::VariantsDropped {
            adapter: "shizaproject".to_string(),
            count: 1,
        }]
    );
}

#[tokio::test]
async fn test_malformed_payload_yields_no_entries() {
    let harness = TestHarness::shiza();
    harness
        .transport
        .push_response(RawResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: b"<html>maintenance</html>".to_vec(),
        })
        .await;

    let entries = harness
        .adapter
        .search(&UniversalQuery::search("foo"))
        .await
        .unwrap();

    assert!(entries.is_empty());
    let failures = harness.sink.events_of("parse_failed");
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        AdapterEvent::ParseFailed { reason, .. } if reason.contains("text/html")
    ));
}

#[tokio::test]
async fn test_transport_failure_is_an_error() {
    let harness = TestHarness::alpharatio();
    harness
        .transport
        .push_error(TransportError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        })
        .await;

    let err = harness
        .adapter
        .search(&UniversalQuery::search("anything"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AdapterError::Transport(TransportError::Status { status: 502, .. })
    ));
}

#[tokio::test]
async fn test_alpharatio_search_applies_seed_policy() {
    let harness = TestHarness::alpharatio();
    harness
        .transport
        .push_json(fixtures::gazelle_response(vec![fixtures::gazelle_group(
            5,
            "Release",
            vec![
                fixtures::gazelle_torrent(50, "9", false),
                fixtures::gazelle_torrent(51, "99", false),
            ],
        )]))
        .await;

    let query = UniversalQuery::search("release").with_categories(vec![UniversalCategory::Movies]);
    let entries = harness.adapter.search(&query).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.minimum_seed_ratio == Some(1.0)));
    assert!(entries
        .iter()
        .all(|e| e.minimum_seed_time_seconds == Some(259200)));
    assert_eq!(entries[0].categories.iter().next(), Some(&UniversalCategory::MoviesHd));

    // The unmapped category still produces an entry.
    assert_eq!(entries[1].categories.iter().next(), Some(&UniversalCategory::Other));
    assert_eq!(harness.sink.events_of("unmapped_category").len(), 1);

    let request = harness.transport.last_request().await.unwrap();
    assert_eq!(request.header("Authorization"), Some("key"));
    assert_eq!(request.query_value("searchstr"), Some("release"));
    for movie_category in ["8", "9", "10", "11", "12", "13", "15"] {
        assert_eq!(
            request.query_value(&format!("filter_cat[{}]", movie_category)),
            Some("1")
        );
    }
    assert!(request.query_value("filter_cat[1]").is_none());
}

#[tokio::test]
async fn test_setup_handshake_requires_results() {
    let harness = TestHarness::shiza();
    harness
        .transport
        .push_json(fixtures::shiza_response(vec![]))
        .await;

    let err = harness.adapter.setup().await.unwrap_err();
    assert!(matches!(err, AdapterError::Configuration(ref msg) if msg.contains("Could not find releases")));
    assert_eq!(harness.transport.request_count().await, 1);

    let request = harness.transport.last_request().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert!(body["variables"]["query"].is_null());
}

#[tokio::test]
async fn test_setup_handshake_succeeds() {
    let harness = TestHarness::shiza();
    harness
        .transport
        .push_json(fixtures::shiza_response(vec![fixtures::shiza_node(
            "Foo",
            vec![fixtures::shiza_torrent(None, Some(fixtures::MAGNET), &[])],
        )]))
        .await;

    assert_ok!(harness.adapter.setup().await);
    assert_eq!(harness.transport.request_count().await, 1);
}

#[tokio::test]
async fn test_setup_without_handshake_sends_nothing() {
    let harness = TestHarness::alpharatio();

    assert_ok!(harness.adapter.setup().await);
    assert_eq!(harness.transport.request_count().await, 0);
}

#[tokio::test]
async fn test_cancelled_search_returns_nothing() {
    let harness = TestHarness::shiza();
    harness.transport.set_delay(Duration::from_secs(5)).await;
    harness
        .transport
        .push_json(fixtures::shiza_response(vec![]))
        .await;

    let result = tokio::time::timeout(
        Duration::from_millis(20),
        harness.adapter.search(&UniversalQuery::search("slow")),
    )
    .await;

    assert!(result.is_err());
    assert!(harness.sink.events().is_empty());
}

#[tokio::test]
async fn test_supports() {
    let shiza = TestHarness::shiza();
    let alpharatio = TestHarness::alpharatio();

    assert!(shiza.adapter.supports(&UniversalQuery::default()));
    assert!(shiza.adapter.supports(&UniversalQuery::search("x")));
    assert!(!shiza
        .adapter
        .supports(&UniversalQuery::default().with_external_id("tt0944947")));
    assert!(!shiza.adapter.supports(
        &UniversalQuery::search("x").with_categories(vec![UniversalCategory::Movies])
    ));

    assert!(alpharatio
        .adapter
        .supports(&UniversalQuery::default().with_external_id("tt0944947")));
    assert!(alpharatio.adapter.supports(
        &UniversalQuery::search("x").with_categories(vec![UniversalCategory::Movies])
    ));
    assert!(!alpharatio.adapter.supports(
        &UniversalQuery::search("x").with_categories(vec![UniversalCategory::TvDocumentary])
    ));
}
