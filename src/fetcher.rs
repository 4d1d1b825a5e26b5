use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::config::DEFAULT_FEED_URL;
use crate::delivery::{Deliver, Immediate};
use crate::feed;
use crate::fetch_error::FetchError;
use crate::puzzle::Puzzle;

/// Outcome of one fetch: every decodable record in feed order, or the reason
/// the feed could not be read.
pub type FetchResult<T = Puzzle> = Result<Vec<T>, FetchError>;

pub struct PuzzleFetcher<T = Puzzle> {
    client: reqwest::Client,
    url: String,
    delivery: Arc<dyn Deliver>,
    record: PhantomData<fn() -> T>,
}

impl<T> Clone for PuzzleFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            url: self.url.clone(),
            delivery: self.delivery.clone(),
            record: PhantomData,
        }
    }
}

impl PuzzleFetcher {
    pub fn new(url: String) -> Self {
        Self::with_url(url)
    }
}

impl Default for PuzzleFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL.to_string())
    }
}

impl<T> PuzzleFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub fn with_url(url: String) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: String) -> Self {
        Self {
            client,
            url,
            delivery: Arc::new(Immediate),
            record: PhantomData,
        }
    }

    /// Set the context completions from [`fetch_puzzles`](Self::fetch_puzzles) run on.
    pub fn with_delivery(mut self, delivery: impl Deliver + 'static) -> Self {
        self.delivery = Arc::new(delivery);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> FetchResult<T> {
        debug!("Sending HTTP request to puzzle feed");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(transport_failure)?;
        debug!("Received HTTP response with status: {}", response.status());

        let response = response.error_for_status().map_err(transport_failure)?;
        let body = response.bytes().await.map_err(transport_failure)?;
        debug!("Retrieved feed body, size: {} bytes", body.len());

        decode_body(&body)
    }

    /// Fetch on the current Tokio runtime and pass the result to `on_complete`
    /// exactly once, through this fetcher's delivery context.
    ///
    /// With a [`MainQueue`](crate::delivery::MainQueue) whose `MainLoop` has
    /// already been dropped, the completion is discarded and `on_complete`
    /// never runs.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn fetch_puzzles<F>(&self, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(FetchResult<T>) + Send + 'static,
    {
        let fetcher = self.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch().await;
            fetcher.delivery.deliver(Box::new(move || on_complete(result)));
        })
    }
}

fn transport_failure(err: reqwest::Error) -> FetchError {
    debug!("Puzzle feed request failed: {}", err);
    FetchError::from(err)
}

/// A zero-length or non-UTF-8 body has no text to decode. A leading byte-order
/// mark is not part of the text.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> FetchResult<T> {
    match std::str::from_utf8(body) {
        Ok(text) if !text.is_empty() => {
            Ok(feed::decode_lines(text.strip_prefix('\u{FEFF}').unwrap_or(text)))
        }
        Ok(_) => Err(FetchError::EmptyBody),
        Err(e) => {
            debug!("Feed body is not valid UTF-8: {}", e);
            Err(FetchError::EmptyBody)
        }
    }
}
