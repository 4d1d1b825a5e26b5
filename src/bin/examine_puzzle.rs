use clap::Parser;
use puzzle_feed::config::DEFAULT_FEED_URL;
use puzzle_feed::fetcher::PuzzleFetcher;
use puzzle_feed::puzzle::Puzzle;

#[derive(Parser)]
#[command(name = "examine-puzzle")]
#[command(about = "Fetch the puzzle feed and print one puzzle's grid and solutions", long_about = None)]
struct Cli {
    /// Feed of line-delimited puzzle records
    #[arg(long, env = "PUZZLE_FEED_URL", default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Zero-based position of the puzzle among the decoded records
    #[arg(long, default_value = "0")]
    index: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    println!("Fetching puzzle feed: {}", cli.feed_url);
    let puzzles = PuzzleFetcher::new(cli.feed_url).fetch().await?;
    println!("Decoded {} puzzles", puzzles.len());

    let Some(puzzle) = puzzles.get(cli.index) else {
        return Err(format!(
            "No puzzle at index {} (feed has {})",
            cli.index,
            puzzles.len()
        )
        .into());
    };

    print_puzzle(cli.index, puzzle);
    Ok(())
}

fn print_puzzle(index: usize, puzzle: &Puzzle) {
    println!("\n{}", "=".repeat(60));
    println!(
        "Puzzle {index}: '{}' ({} -> {})",
        puzzle.word(),
        puzzle.source_language(),
        puzzle.target_language()
    );
    println!("{}", "=".repeat(60));

    print!("    ");
    for column in 0..puzzle.columns() {
        print!("{column:>3}");
    }
    println!();
    for (row, letters) in puzzle.grid().iter().enumerate() {
        print!("{row:>3} ");
        for letter in letters {
            print!("{letter:>3}");
        }
        println!();
    }

    println!("\nSolutions:");
    for solution in puzzle.solutions() {
        let cells: Vec<String> = solution
            .cells
            .iter()
            .map(|cell| format!("({},{})", cell.column, cell.row))
            .collect();
        let spelled = puzzle.spell(&solution.cells).unwrap_or_default();
        println!("  {:<16} {}  spells '{}'", solution.word, cells.join(" "), spelled);
    }
}
