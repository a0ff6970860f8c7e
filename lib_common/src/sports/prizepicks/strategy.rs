//! # Strategy Selection
//!
//! The upstream can be reached four ways. Which one is used depends only on
//! which credentials were configured at startup, in a fixed priority order:
//!
//! 1. ZenRows bypass service (API key)
//! 2. ScraperAPI bypass service (API key)
//! 3. Residential forward proxy (proxy URL)
//! 4. Direct request (no credential, always available)
//!
//! Selection is a pure function of [`Credentials`]; it is evaluated once per
//! process and the result is stable for the process lifetime.

use std::fmt;
use std::time::Duration;

/// The projections endpoint: NFL league, 250 projections per page.
pub const PROJECTIONS_URL: &str = "https://api.prizepicks.com/projections?league_id=9&per_page=250";
/// ZenRows API base.
pub const ZENROWS_URL: &str = "https://api.zenrows.com/v1/";
/// ScraperAPI base.
pub const SCRAPERAPI_URL: &str = "https://api.scraperapi.com/";

/// One of the four network paths to the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyChoice {
    /// Request relayed and rendered by ZenRows.
    ZenRows,
    /// Request relayed and rendered by ScraperAPI.
    ScraperApi,
    /// Request tunneled through a residential forward proxy.
    ResidentialProxy,
    /// Request sent straight to the upstream.
    Direct,
}

impl StrategyChoice {
    /// Label reported by the status endpoint and used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyChoice::ZenRows => "zenrows",
            StrategyChoice::ScraperApi => "scraperapi",
            StrategyChoice::ResidentialProxy => "residential_proxy",
            StrategyChoice::Direct => "direct",
        }
    }

    /// Timeout budget for one request; intermediaries add network hops.
    pub fn timeout(&self) -> Duration {
        match self {
            StrategyChoice::ZenRows | StrategyChoice::ScraperApi => Duration::from_secs(25),
            StrategyChoice::ResidentialProxy => Duration::from_secs(20),
            StrategyChoice::Direct => Duration::from_secs(15),
        }
    }
}

impl fmt::Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independent, optional credentials.
///
/// Blank values are treated exactly like missing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    zenrows_api_key: Option<String>,
    scraperapi_key: Option<String>,
    proxy_url: Option<String>,
}

impl Credentials {
    /// Builds the credential set, dropping blank values.
    pub fn new(zenrows_api_key: Option<String>, scraperapi_key: Option<String>, proxy_url: Option<String>) -> Self {
        Self {
            zenrows_api_key: non_blank(zenrows_api_key),
            scraperapi_key: non_blank(scraperapi_key),
            proxy_url: non_blank(proxy_url),
        }
    }

    /// ZenRows API key, if configured.
    pub fn zenrows_api_key(&self) -> Option<&str> {
        self.zenrows_api_key.as_deref()
    }

    /// ScraperAPI key, if configured.
    pub fn scraperapi_key(&self) -> Option<&str> {
        self.scraperapi_key.as_deref()
    }

    /// Forward proxy URL, if configured. May embed `user:pass@`.
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Where each strategy sends its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// The true target: the projections endpoint.
    pub target: String,
    /// ZenRows API base.
    pub zenrows: String,
    /// ScraperAPI base.
    pub scraperapi: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            target: PROJECTIONS_URL.to_string(),
            zenrows: ZENROWS_URL.to_string(),
            scraperapi: SCRAPERAPI_URL.to_string(),
        }
    }
}

/// Picks the highest-priority strategy whose credential is present.
pub fn select_strategy(credentials: &Credentials) -> StrategyChoice {
    if credentials.zenrows_api_key().is_some() {
        StrategyChoice::ZenRows
    } else if credentials.scraperapi_key().is_some() {
        StrategyChoice::ScraperApi
    } else if credentials.proxy_url().is_some() {
        StrategyChoice::ResidentialProxy
    } else {
        StrategyChoice::Direct
    }
}
