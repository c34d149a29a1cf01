//! AlphaRatio, a private general tracker running Gazelle.
//!
//! Searches go through Gazelle's JSON browse endpoint. Results are grouped:
//! one group per release, with one or more torrents each.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

use crate::adapter::{AdapterError, AdapterInfo, ParseError, SiteProtocol, TrackerType};
use crate::policy::SeedPolicy;
use crate::query::{QueryField, SiteRequest, UniversalQuery};
use crate::release::{ExpandContext, Expansion, ReleaseBase, Variant};
use crate::taxonomy::{CategoryMap, UniversalCategory};

pub const KIND: &str = "alpharatio";
pub const DEFAULT_SITE_LINK: &str = "https://alpharatio.cc/";

const MINIMUM_RATIO: f64 = 1.0;
const MINIMUM_SEED_TIME_SECS: u64 = 259200;

static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid entity regex"));

static IMDB_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d{7,}$").expect("valid IMDB regex"));

pub fn info(id: &str, site_link: &str) -> AdapterInfo {
    AdapterInfo {
        id: id.to_string(),
        name: "AlphaRatio".to_string(),
        description: "AlphaRatio (AR) is a Private Torrent Tracker for 0DAY / GENERAL".to_string(),
        site_link: site_link.to_string(),
        language: "en-US".to_string(),
        tracker_type: TrackerType::Private,
        supported_fields: vec![
            QueryField::SearchTerm,
            QueryField::Season,
            QueryField::Episode,
            QueryField::ImdbId,
            QueryField::Categories,
        ],
        verify_on_setup: false,
    }
}

pub fn categories() -> Result<CategoryMap, AdapterError> {
    use UniversalCategory::*;

    Ok(CategoryMap::from_pairs([
        ("1", TvSd, "TvSD"),
        ("2", TvHd, "TvHD"),
        ("3", TvUhd, "TvUHD"),
        ("4", TvSd, "TvDVDRip"),
        ("5", TvSd, "TvPackSD"),
        ("6", TvHd, "TvPackHD"),
        ("7", TvUhd, "TvPackUHD"),
        ("8", MoviesSd, "MovieSD"),
        ("9", MoviesHd, "MovieHD"),
        ("10", MoviesUhd, "MovieUHD"),
        ("11", MoviesSd, "MoviePackSD"),
        ("12", MoviesHd, "MoviePackHD"),
        ("13", MoviesUhd, "MoviePackUHD"),
        ("14", Xxx, "MovieXXX"),
        ("15", MoviesBluRay, "Bluray"),
        ("16", TvAnime, "AnimeSD"),
        ("17", TvAnime, "AnimeHD"),
        ("18", PcGames, "GamesPC"),
        ("19", ConsoleXbox, "GamesxBox"),
        ("20", ConsolePs4, "GamesPS"),
        ("21", ConsoleWii, "GamesNin"),
        ("22", Pc0day, "AppsWindows"),
        ("23", PcMac, "AppsMAC"),
        ("24", Pc0day, "AppsLinux"),
        ("25", PcMobileOther, "AppsMobile"),
        ("26", Xxx, "0dayXXX"),
        ("27", Books, "eBook"),
        ("28", AudioAudiobook, "AudioBook"),
        ("29", AudioOther, "Music"),
        ("30", Other, "Misc"),
    ])?)
}

pub fn policy() -> SeedPolicy {
    SeedPolicy::with_seed_requirements(MINIMUM_RATIO, MINIMUM_SEED_TIME_SECS)
}

/// Per-account options.
#[derive(Debug, Clone, Default)]
pub struct AlphaRatioOptions {
    /// Sent as the `Authorization` header.
    pub api_key: Option<String>,
    /// Only return freeleech torrents.
    pub freeleech_only: bool,
    /// Spend freeleech tokens on downloads that allow it.
    pub use_freeleech_tokens: bool,
}

pub struct AlphaRatio {
    site_link: String,
    options: AlphaRatioOptions,
}

impl AlphaRatio {
    pub fn new(site_link: &str, options: AlphaRatioOptions) -> Self {
        Self {
            site_link: site_link.to_string(),
            options,
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct BrowseResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    response: Option<BrowseResults>,
}

#[derive(Debug, Deserialize)]
struct BrowseResults {
    #[serde(default)]
    results: Vec<Group>,
}

/// One release group from the browse endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, deserialize_with = "flexible_u64")]
    group_id: Option<u64>,
    group_name: String,
    #[serde(default, deserialize_with = "flexible_u64")]
    group_year: Option<u64>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    cover: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "flexible_string")]
    category: Option<String>,
    #[serde(default, deserialize_with = "flexible_u64")]
    group_time: Option<u64>,
    #[serde(default)]
    torrents: Option<Vec<Torrent>>,
    /// Single-torrent groups carry the torrent fields inline.
    #[serde(flatten)]
    inline: Torrent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Torrent {
    #[serde(default, deserialize_with = "flexible_u64")]
    torrent_id: Option<u64>,
    #[serde(default, deserialize_with = "flexible_u64")]
    size: Option<u64>,
    #[serde(default, deserialize_with = "flexible_u64")]
    snatches: Option<u64>,
    #[serde(default, deserialize_with = "flexible_u64")]
    seeders: Option<u64>,
    #[serde(default, deserialize_with = "flexible_u64")]
    leechers: Option<u64>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default, deserialize_with = "flexible_u64")]
    file_count: Option<u64>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    media: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    category: Option<String>,
    #[serde(default)]
    is_freeleech: bool,
    #[serde(default)]
    is_neutral_leech: bool,
    #[serde(default)]
    is_personal_freeleech: bool,
    #[serde(default)]
    can_use_token: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flexible {
    Int(u64),
    Float(f64),
    Text(String),
}

/// Gazelle emits numbers as either JSON numbers or strings.
fn flexible_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<Flexible>::deserialize(d)? {
        Some(Flexible::Int(n)) => Some(n),
        Some(Flexible::Float(f)) if f >= 0.0 => Some(f as u64),
        Some(Flexible::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn flexible_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Flexible>::deserialize(d)? {
        Some(Flexible::Int(n)) => Some(n.to_string()),
        Some(Flexible::Float(f)) => Some(f.to_string()),
        Some(Flexible::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Named entities seen in Gazelle names. `&amp;` is handled separately.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
    ("&ndash;", "\u{2013}"),
    ("&mdash;", "\u{2014}"),
    ("&hellip;", "\u{2026}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201c}"),
    ("&rdquo;", "\u{201d}"),
    ("&aacute;", "\u{e1}"),
    ("&agrave;", "\u{e0}"),
    ("&auml;", "\u{e4}"),
    ("&ccedil;", "\u{e7}"),
    ("&eacute;", "\u{e9}"),
    ("&egrave;", "\u{e8}"),
    ("&iacute;", "\u{ed}"),
    ("&ntilde;", "\u{f1}"),
    ("&oacute;", "\u{f3}"),
    ("&ouml;", "\u{f6}"),
    ("&uacute;", "\u{fa}"),
    ("&uuml;", "\u{fc}"),
    ("&szlig;", "\u{df}"),
    ("&copy;", "\u{a9}"),
    ("&reg;", "\u{ae}"),
    ("&trade;", "\u{2122}"),
];

/// Decode the HTML entities Gazelle leaves in names.
fn decode_entities(s: &str) -> String {
    let named = NAMED_ENTITIES
        .iter()
        .fold(s.to_string(), |acc, &(entity, text)| acc.replace(entity, text));

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex_lite::Captures<'_>| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // Last, so "&amp;lt;" stays "&lt;".
    numeric.replace("&amp;", "&")
}

fn group_title(group: &Group) -> String {
    let name = decode_entities(group.group_name.trim());
    let mut title = match group.artist.as_deref().map(str::trim) {
        Some(artist) if !artist.is_empty() => format!("{} - {}", decode_entities(artist), name),
        _ => name,
    };
    if let Some(year) = group.group_year.filter(|y| *y > 0) {
        title.push_str(&format!(" [{}]", year));
    }
    title
}

fn parse_time(time: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(time.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|ndt| ndt.and_utc())
}

fn saturating_u32(n: Option<u64>) -> u32 {
    n.map(|n| u32::try_from(n).unwrap_or(u32::MAX)).unwrap_or(0)
}

impl AlphaRatio {
    fn category_set(&self, local_id: Option<&str>, ctx: &ExpandContext<'_>) -> BTreeSet<UniversalCategory> {
        match local_id {
            Some(id) => ctx.resolve_category(id),
            None => {
                ctx.degraded("category", "missing");
                BTreeSet::from([UniversalCategory::Other])
            }
        }
    }

    fn torrent_variant(
        &self,
        group_id: u64,
        torrent: Torrent,
        ctx: &ExpandContext<'_>,
    ) -> Option<Variant> {
        let Some(torrent_id) = torrent.torrent_id else {
            ctx.degraded("torrentId", "missing");
            return None;
        };

        let free = torrent.is_freeleech || torrent.is_neutral_leech || torrent.is_personal_freeleech;
        let use_token = self.options.use_freeleech_tokens && torrent.can_use_token && !free;

        let mut download = format!(
            "{}torrents.php?action=download&id={}",
            self.site_link, torrent_id
        );
        if use_token {
            download.push_str("&usetoken=1");
        }
        let details = format!(
            "{}torrents.php?id={}&torrentid={}",
            self.site_link, group_id, torrent_id
        );

        let updated_at = match torrent.time.as_deref() {
            Some(time) => {
                let parsed = parse_time(time);
                if parsed.is_none() {
                    ctx.degraded("time", format!("unparseable time {:?}", time));
                }
                parsed
            }
            None => None,
        };

        let tags = [&torrent.format, &torrent.encoding, &torrent.media]
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let categories = torrent
            .category
            .as_deref()
            .map(|id| ctx.resolve_category(id));

        Some(Variant {
            tags,
            details_uri: ctx.link("details", Some(details.as_str())),
            download_uri: ctx.link("download", Some(download.as_str())),
            magnet_uri: None,
            size: torrent.size.unwrap_or(0),
            seeders: saturating_u32(torrent.seeders),
            leechers: saturating_u32(torrent.leechers),
            grabs: saturating_u32(torrent.snatches),
            files: torrent.file_count.map(|n| saturating_u32(Some(n))),
            updated_at,
            categories,
            download_volume_factor: Some(if free || use_token { 0.0 } else { 1.0 }),
            upload_volume_factor: Some(if torrent.is_neutral_leech { 0.0 } else { 1.0 }),
        })
    }
}

impl SiteProtocol for AlphaRatio {
    type Record = Group;

    fn translate(&self, query: &UniversalQuery, categories: &CategoryMap) -> SiteRequest {
        let mut request = SiteRequest::get(format!("{}ajax.php", self.site_link))
            .with_query("action", "browse");

        let search = query.query_string();
        if let Some(imdb) = query.imdb_id() {
            request = request.with_query("taglist", imdb);
        } else if !search.is_empty() {
            request = request.with_query("searchstr", search);
        }

        request = request
            .with_query("order_by", "time")
            .with_query("order_way", "desc");

        for local_id in categories.local_ids_for(&query.categories) {
            request = request.with_query(format!("filter_cat[{}]", local_id), "1");
        }

        if self.options.freeleech_only {
            request = request.with_query("freetorrent", "1");
        }

        if let Some(key) = &self.options.api_key {
            request = request.with_header("Authorization", key.clone());
        }

        request
    }

    fn parse(&self, body: &[u8], content_type: Option<&str>) -> Result<Vec<Group>, ParseError> {
        let response: BrowseResponse =
            serde_json::from_slice(body).map_err(|e| ParseError::from_json(e, content_type))?;

        if response.status != "success" {
            return Err(ParseError::new(format!(
                "Site returned status {:?}: {}",
                response.status,
                response.error.as_deref().unwrap_or("no error message")
            )));
        }

        response
            .response
            .map(|r| r.results)
            .ok_or_else(|| ParseError::new("Missing response object"))
    }

    fn expand(&self, group: Group, ctx: &ExpandContext<'_>) -> Expansion {
        let mut expansion = Expansion::default();

        let Some(group_id) = group.group_id else {
            ctx.degraded("groupId", "missing");
            return expansion;
        };
        let details = format!("{}torrents.php?id={}", self.site_link, group_id);
        let Some(details_uri) = ctx.link("details", Some(details.as_str())) else {
            return expansion;
        };

        let tags: Vec<String> = group
            .tags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let imdb_tags: Vec<&String> = tags.iter().filter(|t| IMDB_TAG.is_match(t)).collect();

        let mut base = ReleaseBase::new(group_title(&group), details_uri);
        base.categories = self.category_set(group.category.as_deref(), ctx);
        base.publish_date = group
            .group_time
            .and_then(|t| Utc.timestamp_opt(t as i64, 0).single());
        base.poster_uri = ctx.link("cover", group.cover.as_deref());
        base.imdb_id = match imdb_tags.as_slice() {
            [only] => Some(only.to_string()),
            _ => None,
        };
        if !tags.is_empty() {
            base.description = Some(format!("Tags: {}", tags.join(", ")));
        }

        // An empty list with no inline torrent is a group with no variants.
        let torrents = match group.torrents {
            Some(list) if !list.is_empty() => list,
            Some(_) if group.inline.torrent_id.is_none() => Vec::new(),
            _ => vec![group.inline],
        };

        for torrent in torrents {
            match self.torrent_variant(group_id, torrent, ctx) {
                Some(variant) => expansion.push(base.variant(variant)),
                None => expansion.dropped += 1,
            }
        }

        expansion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AdapterEvent;
    use crate::query::HttpMethod;
    use crate::testing::{fixtures, RecordingSink};
    use serde_json::json;

    fn protocol(options: AlphaRatioOptions) -> AlphaRatio {
        AlphaRatio::new(DEFAULT_SITE_LINK, options)
    }

    fn expand_all(protocol: &AlphaRatio, body: &[u8]) -> (Expansion, RecordingSink) {
        let map = categories().unwrap();
        let sink = RecordingSink::new();
        let mut expansion = Expansion::default();
        {
            let ctx = ExpandContext::new(KIND, &map, &sink);
            for group in protocol.parse(body, Some("application/json")).unwrap() {
                expansion.extend(protocol.expand(group, &ctx));
            }
        }
        (expansion, sink)
    }

    #[test]
    fn test_category_table() {
        let map = categories().unwrap();
        assert_eq!(map.len(), 30);
        assert_eq!(map.resolve("15"), BTreeSet::from([UniversalCategory::MoviesBluRay]));
        assert_eq!(map.resolve("30"), BTreeSet::from([UniversalCategory::Other]));
        assert_eq!(map.mappings()[24].label, "AppsMobile");
    }

    #[test]
    fn test_translate_search() {
        let query = UniversalQuery::search("The Expanse")
            .with_season_episode(2, Some(3))
            .with_categories(vec![UniversalCategory::TvHd]);
        let request = protocol(AlphaRatioOptions::default()).translate(&query, &categories().unwrap());

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://alpharatio.cc/ajax.php");
        assert_eq!(request.query_value("action"), Some("browse"));
        assert_eq!(request.query_value("searchstr"), Some("The Expanse S02E03"));
        assert_eq!(request.query_value("order_by"), Some("time"));
        assert_eq!(request.query_value("order_way"), Some("desc"));
        assert_eq!(request.query_value("filter_cat[2]"), Some("1"));
        assert_eq!(request.query_value("filter_cat[6]"), Some("1"));
        assert!(request.query_value("filter_cat[1]").is_none());
        assert!(request.query_value("freetorrent").is_none());
        assert!(request.header("Authorization").is_none());
    }

    #[test]
    fn test_translate_imdb_uses_taglist() {
        let query = UniversalQuery::search("ignored").with_external_id("0944947");
        let request = protocol(AlphaRatioOptions::default()).translate(&query, &CategoryMap::new());
        assert_eq!(request.query_value("taglist"), Some("tt0944947"));
        assert!(request.query_value("searchstr").is_none());
    }

    #[test]
    fn test_translate_options() {
        let options = AlphaRatioOptions {
            api_key: Some("secret".to_string()),
            freeleech_only: true,
            use_freeleech_tokens: false,
        };
        let request = protocol(options).translate(&UniversalQuery::default(), &CategoryMap::new());
        assert_eq!(request.query_value("freetorrent"), Some("1"));
        assert_eq!(request.header("Authorization"), Some("secret"));
        assert!(request.query_value("searchstr").is_none());
    }

    #[test]
    fn test_parse_failure_status() {
        let body = br#"{"status": "failure", "error": "bad credentials"}"#;
        let err = protocol(AlphaRatioOptions::default())
            .parse(body, Some("application/json"))
            .unwrap_err();
        assert!(err.reason.contains("bad credentials"));
    }

    #[test]
    fn test_expand_grouped_torrents() {
        let body = fixtures::gazelle_response(vec![fixtures::gazelle_group(
            100,
            "The Show &amp; Friends",
            vec![
                fixtures::gazelle_torrent(1, "2", false),
                fixtures::gazelle_torrent(2, "3", true),
            ],
        )]);

        let (expansion, sink) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert_eq!(expansion.entries.len(), 2);
        assert!(sink.events().is_empty());

        let first = &expansion.entries[0];
        assert_eq!(first.title, "The Show & Friends [2023] [ MKV x264 WEB ]");
        assert_eq!(
            first.download_uri.as_ref().unwrap().as_str(),
            "https://alpharatio.cc/torrents.php?action=download&id=1"
        );
        assert_eq!(
            first.details_uri.as_str(),
            "https://alpharatio.cc/torrents.php?id=100&torrentid=1"
        );
        assert_eq!(first.categories, BTreeSet::from([UniversalCategory::TvHd]));
        assert_eq!(first.download_volume_factor, 1.0);
        assert_eq!(first.grabs, 7);
        assert_eq!(first.files, Some(3));
        assert_eq!(first.imdb_id.as_deref(), Some("tt0944947"));
        assert_eq!(first.description.as_deref(), Some("Tags: drama, tt0944947"));
        assert_eq!(first.poster_uri.as_ref().unwrap().as_str(), "https://alpharatio.cc/covers/100.jpg");
        // Torrent time is later than the group time.
        assert_eq!(
            first.publish_date,
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        );

        let second = &expansion.entries[1];
        assert_eq!(second.categories, BTreeSet::from([UniversalCategory::TvUhd]));
        assert_eq!(second.download_volume_factor, 0.0);
        assert_eq!(second.upload_volume_factor, 1.0);
    }

    #[test]
    fn test_expand_inline_torrent() {
        let body = serde_json::to_vec(&json!({
            "status": "success",
            "response": { "results": [{
                "groupId": "7",
                "groupName": "Some.App.v1",
                "artist": "",
                "category": 22,
                "groupTime": "1700000000",
                "torrentId": 70,
                "size": "2048",
                "snatches": 1,
                "seeders": 4,
                "leechers": 0,
                "isNeutralLeech": true
            }]}
        }))
        .unwrap();

        let (expansion, _) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert_eq!(expansion.entries.len(), 1);

        let entry = &expansion.entries[0];
        assert_eq!(entry.title, "Some.App.v1");
        assert_eq!(entry.size, 2048);
        assert_eq!(entry.categories, BTreeSet::from([UniversalCategory::Pc0day]));
        assert_eq!(entry.publish_date.timestamp(), 1700000000);
        assert_eq!(entry.download_volume_factor, 0.0);
        assert_eq!(entry.upload_volume_factor, 0.0);
        assert!(entry.imdb_id.is_none());
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_expand_freeleech_token() {
        let body = fixtures::gazelle_response(vec![fixtures::gazelle_group(
            100,
            "Movie",
            vec![
                fixtures::gazelle_torrent(1, "9", false),
                fixtures::gazelle_torrent(2, "9", true),
            ],
        )]);
        let options = AlphaRatioOptions {
            use_freeleech_tokens: true,
            ..Default::default()
        };

        let (expansion, _) = expand_all(&protocol(options), &body);
        let token = &expansion.entries[0];
        assert!(token.download_uri.as_ref().unwrap().as_str().ends_with("&usetoken=1"));
        assert_eq!(token.download_volume_factor, 0.0);

        // Already free; no token spent.
        let free = &expansion.entries[1];
        assert!(!free.download_uri.as_ref().unwrap().as_str().contains("usetoken"));
    }

    #[test]
    fn test_expand_unmapped_category_falls_back() {
        let body = fixtures::gazelle_response(vec![fixtures::gazelle_group(
            100,
            "Odd",
            vec![fixtures::gazelle_torrent(1, "99", false)],
        )]);

        let (expansion, sink) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert_eq!(expansion.entries[0].categories, BTreeSet::from([UniversalCategory::Other]));
        assert_eq!(
            sink.events(),
            vec![AdapterEvent::UnmappedCategory {
                adapter: KIND.to_string(),
                local_id: "99".to_string(),
            }]
        );
    }

    #[test]
    fn test_expand_keeps_later_group_time() {
        let mut group = fixtures::gazelle_group(
            100,
            "Show",
            vec![fixtures::gazelle_torrent(1, "2", false)],
        );
        group["groupTime"] = json!(1_800_000_000u64);
        let body = fixtures::gazelle_response(vec![group]);

        let (expansion, _) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert_eq!(expansion.entries[0].publish_date.timestamp(), 1_800_000_000);
    }

    #[test]
    fn test_expand_empty_torrent_list_yields_nothing() {
        let body = fixtures::gazelle_response(vec![fixtures::gazelle_group(100, "Empty", vec![])]);

        let (expansion, sink) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert!(expansion.entries.is_empty());
        assert_eq!(expansion.dropped, 0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_expand_drops_torrent_without_id() {
        let mut broken = fixtures::gazelle_torrent(1, "2", false);
        broken.as_object_mut().unwrap().remove("torrentId");
        let body = fixtures::gazelle_response(vec![fixtures::gazelle_group(
            100,
            "Show",
            vec![broken, fixtures::gazelle_torrent(2, "2", false)],
        )]);

        let (expansion, sink) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert_eq!(expansion.entries.len(), 1);
        assert_eq!(expansion.dropped, 1);
        assert!(expansion.entries[0].details_uri.as_str().ends_with("torrentid=2"));
        assert_eq!(
            sink.events(),
            vec![AdapterEvent::DegradedField {
                adapter: KIND.to_string(),
                field: "torrentId".to_string(),
                reason: "missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_expand_drops_variant_without_any_date() {
        let mut torrent = fixtures::gazelle_torrent(1, "2", false);
        torrent.as_object_mut().unwrap().remove("time");
        let mut group = fixtures::gazelle_group(100, "Undated", vec![torrent]);
        group.as_object_mut().unwrap().remove("groupTime");
        let body = fixtures::gazelle_response(vec![group]);

        let (expansion, _) = expand_all(&protocol(AlphaRatioOptions::default()), &body);
        assert!(expansion.entries.is_empty());
        assert_eq!(expansion.dropped, 1);
    }

    #[test]
    fn test_missing_group_id_degrades_one_group() {
        let mut broken = fixtures::gazelle_group(
            100,
            "Broken",
            vec![fixtures::gazelle_torrent(1, "2", false)],
        );
        broken.as_object_mut().unwrap().remove("groupId");
        let good = fixtures::gazelle_group(
            200,
            "Good",
            vec![fixtures::gazelle_torrent(2, "2", false)],
        );
        let body = fixtures::gazelle_response(vec![broken, good]);

        let protocol = protocol(AlphaRatioOptions::default());
        assert_eq!(protocol.parse(&body, Some("application/json")).unwrap().len(), 2);

        let (expansion, sink) = expand_all(&protocol, &body);
        assert_eq!(expansion.entries.len(), 1);
        assert!(expansion.entries[0].title.starts_with("Good"));
        assert_eq!(
            sink.events(),
            vec![AdapterEvent::DegradedField {
                adapter: KIND.to_string(),
                field: "groupId".to_string(),
                reason: "missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("Caf&eacute;&nbsp;Noir"), "Café Noir");
        assert_eq!(decode_entities("A &ndash; B&hellip;"), "A \u{2013} B\u{2026}");
        assert_eq!(decode_entities("&quot;Q&quot; &#39;s&#x27;"), "\"Q\" 's'");
        assert_eq!(decode_entities("&#233;t&#233;"), "été");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_group_title_with_artist() {
        let group: Group = serde_json::from_value(json!({
            "groupId": 1,
            "groupName": "Album",
            "groupYear": 1999,
            "artist": "Band"
        }))
        .unwrap();
        assert_eq!(group_title(&group), "Band - Album [1999]");
    }
}
