use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use puzzle_feed::config::Config;
use puzzle_feed::delivery;
use puzzle_feed::fetcher::PuzzleFetcher;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,puzzle_feed=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    info!("Fetching puzzles with config: {:?}", config);

    // Completions run here on the main thread; the request runs on the runtime's workers
    let (queue, mut main_loop) = delivery::main_queue();
    let fetcher = PuzzleFetcher::new(config.feed_url.clone()).with_delivery(queue);

    let failed = Arc::new(AtomicBool::new(false));
    let failed_flag = failed.clone();
    fetcher.fetch_puzzles(move |result| match result {
        Ok(puzzles) => {
            info!("Loaded {} puzzles", puzzles.len());
            for (idx, puzzle) in puzzles.iter().enumerate() {
                let targets: Vec<&str> = puzzle
                    .solutions()
                    .iter()
                    .map(|solution| solution.word.as_str())
                    .collect();
                println!(
                    "{idx:4}  {} -> {}  [{}->{}, {}x{} grid]",
                    puzzle.word(),
                    targets.join(" / "),
                    puzzle.source_language(),
                    puzzle.target_language(),
                    puzzle.columns(),
                    puzzle.rows(),
                );
            }
        }
        Err(e) => {
            error!("Failed to fetch puzzles: {}", e);
            failed_flag.store(true, Ordering::SeqCst);
        }
    });
    drop(fetcher);

    main_loop.run_next().await;

    if failed.load(Ordering::SeqCst) {
        std::process::exit(1);
    }

    Ok(())
}
