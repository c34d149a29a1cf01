//! ShizaProject, a public Russian anime tracker with a GraphQL API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapter::{AdapterError, AdapterInfo, ParseError, SiteProtocol, TrackerType};
use crate::policy::SeedPolicy;
use crate::query::{QueryField, SiteRequest, UniversalQuery};
use crate::release::{compose_title, first_poster, ExpandContext, Expansion, ReleaseBase, Variant};
use crate::taxonomy::{CategoryMap, UniversalCategory};

pub const KIND: &str = "shizaproject";
pub const DEFAULT_SITE_LINK: &str = "https://shiza-project.com/";

/// Releases fetched per request.
const PAGE_SIZE: u32 = 50;

/// The site has no categories: every release is filed under this one.
const DEFAULT_CATEGORY: &str = "1";

const FETCH_RELEASES: &str = r#"
query fetchReleases($first: Int, $query: String) {
    releases(first: $first, query: $query) {
        edges {
            node {
                name
                originalName
                alternativeNames
                publishedAt
                slug
                posters {
                    preview: resize(width: 360, height: 500) {
                        url
                    }
                }
                torrents {
                    downloaded
                    seeders
                    leechers
                    size
                    magnetUri
                    updatedAt
                    file {
                        url
                    }
                    videoQualities
                }
            }
        }
    }
}"#;

pub fn info(id: &str, site_link: &str) -> AdapterInfo {
    AdapterInfo {
        id: id.to_string(),
        name: "ShizaProject".to_string(),
        description: "ShizaProject Tracker is a Public RUSSIAN tracker and release group for ANIME"
            .to_string(),
        site_link: site_link.to_string(),
        language: "ru-RU".to_string(),
        tracker_type: TrackerType::Public,
        supported_fields: vec![QueryField::SearchTerm],
        verify_on_setup: true,
    }
}

pub fn categories() -> Result<CategoryMap, AdapterError> {
    Ok(CategoryMap::from_pairs([(
        DEFAULT_CATEGORY,
        UniversalCategory::TvAnime,
        "Anime",
    )])?)
}

/// Everything on the site is freeleech.
pub fn policy() -> SeedPolicy {
    SeedPolicy::freeleech()
}

pub struct ShizaProject {
    site_link: String,
}

impl ShizaProject {
    pub fn new(site_link: &str) -> Self {
        Self {
            site_link: site_link.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    operation_name: &'a str,
    variables: FetchVariables<'a>,
    query: &'a str,
}

#[derive(Serialize)]
struct FetchVariables<'a> {
    first: u32,
    query: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ReleasesResponse {
    data: ReleasesData,
}

#[derive(Debug, Deserialize)]
struct ReleasesData {
    releases: Releases,
}

#[derive(Debug, Deserialize)]
struct Releases {
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Node,
}

/// One release as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    name: String,
    original_name: Option<String>,
    #[serde(default)]
    alternative_names: Option<Vec<String>>,
    published_at: Option<DateTime<Utc>>,
    slug: String,
    #[serde(default)]
    posters: Option<Vec<Poster>>,
    #[serde(default)]
    torrents: Option<Vec<Torrent>>,
}

#[derive(Debug, Deserialize)]
struct Poster {
    preview: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Torrent {
    downloaded: Option<u64>,
    seeders: u64,
    leechers: u64,
    size: u64,
    magnet_uri: Option<String>,
    updated_at: DateTime<Utc>,
    file: Option<Link>,
    #[serde(default)]
    video_qualities: Option<Vec<String>>,
}

fn saturating_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl SiteProtocol for ShizaProject {
    type Record = Node;

    fn translate(&self, query: &UniversalQuery, _categories: &CategoryMap) -> SiteRequest {
        let body = GraphqlRequest {
            operation_name: "fetchReleases",
            variables: FetchVariables {
                first: PAGE_SIZE,
                query: query.term(),
            },
            query: FETCH_RELEASES,
        };

        // Serializing plain strings and integers cannot fail.
        let body = serde_json::to_vec(&body).unwrap_or_default();

        SiteRequest::post(format!("{}graphql", self.site_link), body)
            .with_header("Content-Type", "application/json; charset=utf-8")
    }

    fn parse(&self, body: &[u8], content_type: Option<&str>) -> Result<Vec<Node>, ParseError> {
        let response: ReleasesResponse =
            serde_json::from_slice(body).map_err(|e| ParseError::from_json(e, content_type))?;

        Ok(response
            .data
            .releases
            .edges
            .into_iter()
            .map(|e| e.node)
            .collect())
    }

    fn expand(&self, node: Node, ctx: &ExpandContext<'_>) -> Expansion {
        let mut expansion = Expansion::default();

        let details = format!("{}releases/{}", self.site_link, node.slug);
        let Some(details_uri) = ctx.link("details", Some(details.as_str())) else {
            return expansion;
        };

        let alternates = node.alternative_names.unwrap_or_default();
        let title = compose_title(
            &node.name,
            node.original_name.as_deref(),
            alternates.iter().map(String::as_str),
        );

        let posters = node.posters.unwrap_or_default();
        let mut base = ReleaseBase::new(title, details_uri);
        base.categories = ctx.resolve_category(DEFAULT_CATEGORY);
        base.publish_date = node.published_at;
        base.poster_uri = first_poster(
            posters
                .iter()
                .map(|p| p.preview.as_ref().and_then(|l| l.url.as_deref())),
        );

        for torrent in node.torrents.unwrap_or_default() {
            let download = torrent.file.as_ref().and_then(|f| f.url.as_deref());
            expansion.push(base.variant(Variant {
                tags: torrent.video_qualities.unwrap_or_default(),
                download_uri: ctx.link("file.url", download),
                magnet_uri: ctx.link("magnetUri", torrent.magnet_uri.as_deref()),
                size: torrent.size,
                seeders: saturating_u32(torrent.seeders),
                leechers: saturating_u32(torrent.leechers),
                grabs: saturating_u32(torrent.downloaded.unwrap_or(0)),
                updated_at: Some(torrent.updated_at),
                ..Default::default()
            }));
        }

        expansion
    }
}
