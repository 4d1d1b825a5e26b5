use mockito::{Mock, Server};

#[allow(dead_code)]
pub const FEED_PATH: &str = "/s3/js2/find_challenges.txt";

/// Recorded feed sample: five records, three of which decode into puzzles
#[allow(dead_code)]
pub const SAMPLE_FEED: &str = include_str!("fixtures/find_challenges.txt");

/// Serve `body` as the puzzle feed with a 200 status
#[allow(dead_code)]
pub async fn mock_feed(server: &mut Server, body: &str) -> Mock {
    server
        .mock("GET", FEED_PATH)
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(body)
        .create_async()
        .await
}

#[allow(dead_code)]
pub fn feed_url(server: &Server) -> String {
    format!("{}{}", server.url(), FEED_PATH)
}
