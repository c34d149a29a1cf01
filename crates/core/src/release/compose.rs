//! Helpers for building entry fields from site records.

use chrono::{DateTime, Utc};
use url::Url;

/// Separator between the names of one release.
pub const TITLE_SEPARATOR: &str = " / ";

/// Join a release's names: primary, original, then alternates in order.
/// Blank names are skipped.
pub fn compose_title<'a, I>(primary: &'a str, original: Option<&'a str>, alternates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    std::iter::once(primary)
        .chain(original)
        .chain(alternates)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}

/// ` [ tag1 tag2 ]`, or an empty string when there are no non-blank tags.
pub fn quality_suffix<S: AsRef<str>>(tags: &[S]) -> String {
    let tags: Vec<&str> = tags
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();

    if tags.is_empty() {
        String::new()
    } else {
        format!(" [ {} ]", tags.join(" "))
    }
}

/// A release title with the variant's tags appended.
pub fn variant_title<S: AsRef<str>>(title: &str, tags: &[S]) -> String {
    format!("{}{}", title, quality_suffix(tags))
}

/// Effective date of a variant: the later of the item and variant
/// timestamps, or the variant timestamp when the item has none.
pub fn reconcile_publish_date(
    item: Option<DateTime<Utc>>,
    variant: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (item, variant) {
        (Some(i), Some(v)) => Some(i.max(v)),
        (None, v) => v,
        (i, None) => i,
    }
}

/// The first candidate that parses as a URL.
pub fn first_poster<'a, I>(candidates: I) -> Option<Url>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .find_map(|c| Url::parse(c).ok())
}
