//! The universal category taxonomy.
//!
//! Values follow the Newznab numbering scheme: top-level categories are
//! multiples of 1000 and subcategories add to their parent's id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! universal_categories {
    ($($(#[$doc:meta])* $variant:ident = $id:literal, $name:literal;)*) => {
        /// A site-independent content category shared by every adapter.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "u32", try_from = "u32")]
        pub enum UniversalCategory {
            $($(#[$doc])* $variant,)*
        }

        impl UniversalCategory {
            /// Every category, ordered by id.
            pub const ALL: &'static [UniversalCategory] = &[$(UniversalCategory::$variant,)*];

            /// Newznab numeric id.
            pub const fn id(self) -> u32 {
                match self {
                    $(UniversalCategory::$variant => $id,)*
                }
            }

            /// Display name, e.g. `TV/Anime`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(UniversalCategory::$variant => $name,)*
                }
            }

            pub fn from_id(id: u32) -> Option<Self> {
                match id {
                    $($id => Some(UniversalCategory::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

universal_categories! {
    Console = 1000, "Console";
    ConsoleWii = 1030, "Console/Wii";
    ConsoleXbox = 1040, "Console/Xbox";
    ConsolePs4 = 1150, "Console/PS4";
    Movies = 2000, "Movies";
    MoviesForeign = 2010, "Movies/Foreign";
    MoviesSd = 2030, "Movies/SD";
    MoviesHd = 2040, "Movies/HD";
    MoviesUhd = 2045, "Movies/UHD";
    MoviesBluRay = 2050, "Movies/BluRay";
    MoviesWebDl = 2080, "Movies/WEB-DL";
    Audio = 3000, "Audio";
    AudioMp3 = 3010, "Audio/MP3";
    AudioAudiobook = 3030, "Audio/Audiobook";
    AudioLossless = 3040, "Audio/Lossless";
    AudioOther = 3050, "Audio/Other";
    Pc = 4000, "PC";
    Pc0day = 4010, "PC/0day";
    PcMac = 4030, "PC/Mac";
    PcMobileOther = 4040, "PC/Mobile-Other";
    PcGames = 4050, "PC/Games";
    Tv = 5000, "TV";
    TvWebDl = 5010, "TV/WEB-DL";
    TvForeign = 5020, "TV/Foreign";
    TvSd = 5030, "TV/SD";
    TvHd = 5040, "TV/HD";
    TvUhd = 5045, "TV/UHD";
    TvAnime = 5070, "TV/Anime";
    TvDocumentary = 5080, "TV/Documentary";
    /// Adult content.
    Xxx = 6000, "XXX";
    Books = 7000, "Books";
    BooksEbook = 7020, "Books/EBook";
    BooksComics = 7030, "Books/Comics";
    /// The generic bucket unmapped site categories fall back to.
    Other = 8000, "Other";
    OtherMisc = 8010, "Other/Misc";
}

impl UniversalCategory {
    /// Whether this is a top-level category.
    pub fn is_parent(self) -> bool {
        self.id() % 1000 == 0
    }

    /// The top-level category this one belongs to, `None` for top-level ones.
    pub fn parent(self) -> Option<Self> {
        if self.is_parent() {
            None
        } else {
            Self::from_id(self.id() / 1000 * 1000)
        }
    }

    /// Whether `self` equals `other` or is one of its subcategories.
    pub fn is_within(self, other: Self) -> bool {
        self == other || self.parent() == Some(other)
    }

    /// Kebab-case identifier used on the command line (`tv-anime`).
    pub fn slug(self) -> String {
        self.name()
            .to_lowercase()
            .replace(['/', ' '], "-")
    }
}

impl fmt::Display for UniversalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<UniversalCategory> for u32 {
    fn from(category: UniversalCategory) -> Self {
        category.id()
    }
}

impl TryFrom<u32> for UniversalCategory {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        UniversalCategory::from_id(id).ok_or_else(|| format!("Unknown category id: {}", id))
    }
}

impl FromStr for UniversalCategory {
    type Err = String;

    /// Accepts a numeric id (`5070`), a display name (`TV/Anime`) or a slug
    /// (`tv-anime`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return UniversalCategory::try_from(id);
        }

        let wanted = s.to_lowercase();
        UniversalCategory::ALL
            .iter()
            .copied()
            .find(|c| c.name().to_lowercase() == wanted || c.slug() == wanted)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sorted_and_unique() {
        let ids: Vec<u32> = UniversalCategory::ALL.iter().map(|c| c.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_parent() {
        assert_eq!(UniversalCategory::TvAnime.parent(), Some(UniversalCategory::Tv));
        assert_eq!(UniversalCategory::MoviesUhd.parent(), Some(UniversalCategory::Movies));
        assert_eq!(UniversalCategory::Tv.parent(), None);
        assert!(UniversalCategory::Other.is_parent());
    }

    #[test]
    fn test_is_within() {
        assert!(UniversalCategory::TvHd.is_within(UniversalCategory::Tv));
        assert!(UniversalCategory::Tv.is_within(UniversalCategory::Tv));
        assert!(!UniversalCategory::TvHd.is_within(UniversalCategory::TvSd));
        assert!(!UniversalCategory::MoviesHd.is_within(UniversalCategory::Tv));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("5070".parse(), Ok(UniversalCategory::TvAnime));
        assert_eq!("TV/Anime".parse(), Ok(UniversalCategory::TvAnime));
        assert_eq!("tv-anime".parse(), Ok(UniversalCategory::TvAnime));
        assert_eq!("pc-mobile-other".parse(), Ok(UniversalCategory::PcMobileOther));
        assert!("9999".parse::<UniversalCategory>().is_err());
        assert!("cartoons".parse::<UniversalCategory>().is_err());
    }

    #[test]
    fn test_serializes_as_id() {
        assert_eq!(serde_json::to_string(&UniversalCategory::TvAnime).unwrap(), "5070");
        let parsed: UniversalCategory = serde_json::from_str("2045").unwrap();
        assert_eq!(parsed, UniversalCategory::MoviesUhd);
        assert!(serde_json::from_str::<UniversalCategory>("1").is_err());
    }
}
