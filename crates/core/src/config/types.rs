use serde::{Deserialize, Serialize};

use crate::sites::{alpharatio, shizaproject};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub indexers: Vec<IndexerConfig>,
}

/// Settings shared by every adapter's transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("scour/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// One configured adapter, selected by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IndexerConfig {
    #[serde(rename = "shizaproject")]
    ShizaProject(ShizaProjectConfig),
    #[serde(rename = "alpharatio")]
    AlphaRatio(AlphaRatioConfig),
}

impl IndexerConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            IndexerConfig::ShizaProject(_) => shizaproject::KIND,
            IndexerConfig::AlphaRatio(_) => alpharatio::KIND,
        }
    }

    /// Configured id, defaulting to the kind.
    pub fn id(&self) -> &str {
        let id = match self {
            IndexerConfig::ShizaProject(c) => c.id.as_deref(),
            IndexerConfig::AlphaRatio(c) => c.id.as_deref(),
        };
        id.unwrap_or(self.kind())
    }

    pub fn enabled(&self) -> bool {
        match self {
            IndexerConfig::ShizaProject(c) => c.enabled,
            IndexerConfig::AlphaRatio(c) => c.enabled,
        }
    }

    /// Base URL, always ending in `/`.
    pub fn site_link(&self) -> String {
        let (link, default) = match self {
            IndexerConfig::ShizaProject(c) => (&c.site_link, shizaproject::DEFAULT_SITE_LINK),
            IndexerConfig::AlphaRatio(c) => (&c.site_link, alpharatio::DEFAULT_SITE_LINK),
        };
        let link = link.as_deref().map(str::trim).unwrap_or(default);
        if link.ends_with('/') {
            link.to_string()
        } else {
            format!("{}/", link)
        }
    }

    /// Session cookie for the transport, if any.
    pub fn cookie(&self) -> Option<&str> {
        match self {
            IndexerConfig::ShizaProject(_) => None,
            IndexerConfig::AlphaRatio(c) => c.cookie.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShizaProjectConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub site_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlphaRatioConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub site_link: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub freeleech_only: bool,
    #[serde(default)]
    pub use_freeleech_tokens: bool,
}

/// Sanitized config for display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub http: HttpConfig,
    pub indexers: Vec<SanitizedIndexerConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedIndexerConfig {
    pub kind: String,
    pub id: String,
    pub enabled: bool,
    pub site_link: String,
    pub api_key_configured: bool,
    pub cookie_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            http: config.http.clone(),
            indexers: config
                .indexers
                .iter()
                .map(|i| SanitizedIndexerConfig {
                    kind: i.kind().to_string(),
                    id: i.id().to_string(),
                    enabled: i.enabled(),
                    site_link: i.site_link(),
                    api_key_configured: match i {
                        IndexerConfig::AlphaRatio(c) => {
                            c.api_key.as_deref().is_some_and(|k| !k.is_empty())
                        }
                        IndexerConfig::ShizaProject(_) => false,
                    },
                    cookie_configured: i.cookie().is_some_and(|c| !c.is_empty()),
                })
                .collect(),
        }
    }
}
