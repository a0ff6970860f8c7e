use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lib_common::retrieve::RetryPolicy;
use lib_common::sports::prizepicks::strategy::{PROJECTIONS_URL, SCRAPERAPI_URL, ZENROWS_URL};
use lib_common::sports::prizepicks::{Credentials, Endpoints};

/// Process configuration, read once at startup from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[clap(about = "NFL projections scraping proxy", version)]
pub struct Config {
    #[clap(long, env = "PORT", default_value_t = 3000, help = "Port to listen on for client connections.")]
    pub port: u16,

    #[clap(long, env = "ZENROWS_API_KEY", hide_env_values = true, help = "ZenRows API key (highest priority strategy).")]
    pub zenrows_api_key: Option<String>,

    #[clap(long, env = "SCRAPERAPI_KEY", hide_env_values = true, help = "ScraperAPI key (second priority strategy).")]
    pub scraperapi_key: Option<String>,

    #[clap(long, env = "PROXY_URL", hide_env_values = true, help = "Residential forward proxy URL, credentials may be embedded.")]
    pub proxy_url: Option<String>,

    #[clap(long, env = "CACHE_TTL_SEC", default_value_t = 60, help = "Seconds a fetched projection list is served from memory.")]
    pub cache_ttl_sec: u64,

    #[clap(long, env = "MAX_RETRIES", default_value_t = 4, help = "Maximum fetch attempts per cache miss, first try included.")]
    pub max_retries: u32,

    #[clap(long, env = "UPSTREAM_URL", default_value = PROJECTIONS_URL, help = "Projections endpoint.")]
    pub upstream_url: String,

    #[clap(long, env = "ZENROWS_BASE_URL", default_value = ZENROWS_URL, help = "ZenRows API base URL.")]
    pub zenrows_base_url: String,

    #[clap(long, env = "SCRAPERAPI_BASE_URL", default_value = SCRAPERAPI_URL, help = "ScraperAPI base URL.")]
    pub scraperapi_base_url: String,

    #[clap(long, env = "LOG_DIR", default_value = "logs", help = "Directory for log files.")]
    pub log_dir: PathBuf,

    #[clap(long, env = "RUST_LOG", default_value = "info", help = "Log filter (trace, debug, info, warn, error).")]
    pub log_level: String,
}

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.zenrows_api_key.clone(),
            self.scraperapi_key.clone(),
            self.proxy_url.clone(),
        )
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            target: self.upstream_url.clone(),
            zenrows: self.zenrows_base_url.clone(),
            scraperapi: self.scraperapi_base_url.clone(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_max_attempts(self.max_retries)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_sec)
    }
}

/// Loads `.env` files, then parses flags and environment variables.
pub fn load_config() -> Config {
    let dotenv_os: &str = if cfg!(target_os = "windows") {
        ".env.windows"
    } else {
        ".env.linux"
    };
    dotenvy::dotenv().ok();
    dotenvy::from_filename(dotenv_os).ok();

    Config::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_common::sports::prizepicks::{StrategyChoice, select_strategy};

    #[test]
    fn flags_resolve_into_library_types() {
        let config = Config::try_parse_from([
            "server_nfl",
            "--scraperapi-key",
            "scraper-key",
            "--proxy-url",
            "http://proxy.local:8080",
            "--cache-ttl-sec",
            "90",
            "--max-retries",
            "6",
            "--upstream-url",
            "http://127.0.0.1:9/projections",
        ])
        .unwrap();

        assert_eq!(config.cache_ttl(), Duration::from_secs(90));
        assert_eq!(config.retry_policy().max_attempts, 6);
        assert_eq!(config.endpoints().target, "http://127.0.0.1:9/projections");
        assert_eq!(config.credentials().scraperapi_key(), Some("scraper-key"));
    }

    #[test]
    fn flag_credentials_follow_the_priority_order() {
        let config = Config::try_parse_from([
            "server_nfl",
            "--zenrows-api-key",
            "zen-key",
            "--scraperapi-key",
            "scraper-key",
        ])
        .unwrap();

        assert_eq!(select_strategy(&config.credentials()), StrategyChoice::ZenRows);
    }

    #[test]
    fn zero_retries_still_allows_one_attempt() {
        let config = Config::try_parse_from(["server_nfl", "--max-retries", "0"]).unwrap();
        assert_eq!(config.retry_policy().max_attempts, 1);
    }
}
