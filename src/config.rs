use std::env;

use url::Url;

pub const DEFAULT_FEED_URL: &str =
    "https://s3.amazonaws.com/duolingo-data/s3/js2/find_challenges.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid feed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let feed_url =
            env::var("PUZZLE_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());

        if let Err(source) = Url::parse(&feed_url) {
            return Err(ConfigError::InvalidUrl {
                url: feed_url,
                source,
            });
        }

        Ok(Config { feed_url })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_url: DEFAULT_FEED_URL.to_string(),
        }
    }
}
