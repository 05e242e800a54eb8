//! Ladle CLI
//!
//! Command-line interface for the Ladle recipe browser.
//! Provides both an interactive TUI and a one-shot search mode.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::HumanDuration;
use ladle::{
    format_minutes, ClientConfig, FilterField, Pagination, RecipeClient, RecipeRow, SearchState,
    DEFAULT_BASE_URL,
};
use ladle::tui::App;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Ladle - terminal recipe browser
///
/// Browses a paginated recipe search API with filtering,
/// pagination and per-recipe detail views.
#[derive(Parser)]
#[command(name = "ladle")]
#[command(author = "Ladle Contributors")]
#[command(version)]
#[command(about = "Terminal browser for recipe search APIs", long_about = None)]
struct Cli {
    /// Base URL of the recipe API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse recipes interactively (default)
    Browse,

    /// Run a single search and print the results
    Search {
        /// Title filter (partial match)
        #[arg(long, default_value = "")]
        title: String,

        /// Cuisine filter (exact match)
        #[arg(long, default_value = "")]
        cuisine: String,

        /// Rating filter, e.g. ">4.5"
        #[arg(long, default_value = "")]
        rating: String,

        /// Total-time filter in minutes, e.g. "<30"
        #[arg(long = "total-time", default_value = "")]
        total_time: String,

        /// Serves filter
        #[arg(long, default_value = "")]
        serves: String,

        /// Page to fetch
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Results per page
        #[arg(short, long, default_value = "15")]
        limit: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);

    if let Err(e) = init_logging(matches!(command, Commands::Browse)) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    let result = match command {
        Commands::Browse => cmd_browse(cli.base_url),

        Commands::Search {
            title,
            cuisine,
            rating,
            total_time,
            serves,
            page,
            limit,
            output,
        } => cmd_search(
            cli.base_url,
            [title, cuisine, rating, total_time, serves],
            page,
            limit,
            &output,
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to a file in browse mode so nothing corrupts the alternate screen;
/// to stderr otherwise.
fn init_logging(to_file: bool) -> ladle::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join("ladle.log")))
            .unwrap_or_else(|| PathBuf::from("ladle.log"));
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

/// Browse command implementation
fn cmd_browse(base_url: String) -> ladle::Result<()> {
    let client = RecipeClient::new(ClientConfig { base_url })?;
    let mut app = App::new(client);

    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}

/// Search command implementation
fn cmd_search(
    base_url: String,
    filters: [String; 5],
    page: u32,
    limit: u32,
    output_format: &str,
) -> ladle::Result<()> {
    let client = RecipeClient::new(ClientConfig { base_url })?;

    let mut state = SearchState::default();
    state.set_page_size(limit);
    for (field, value) in FilterField::ALL.into_iter().zip(filters) {
        state.set_filter(field, value);
    }
    state.page = page;

    let start = Instant::now();
    let result = client.search(&state)?;
    let elapsed = start.elapsed();

    if output_format == "json" {
        println!(
            "{}",
            serde_json::json!({
                "page": result.page,
                "total": result.total,
                "data": result.data,
            })
        );
        return Ok(());
    }

    let pagination = Pagination::compute(result.page, result.total, state.per_page);
    println!(
        "Found {} recipes ({}) in {:.2}s:",
        style(result.total).green(),
        pagination.label(),
        elapsed.as_secs_f64()
    );
    println!();

    for (i, recipe) in result.data.iter().enumerate() {
        let row = RecipeRow::from_recipe(recipe);
        println!(
            "  {} {}  [{}]  {}",
            style(format!("{:3}.", i + 1)).dim(),
            style(&recipe.title).cyan(),
            row.cuisine,
            row.stars
        );
        println!(
            "      {} {}   {} {}   {} {}",
            style("Total:").dim(),
            format_minutes(recipe.total_time),
            style("Prep:").dim(),
            format_minutes(recipe.prep_time),
            style("Serves:").dim(),
            row.serves
        );
    }

    if result.data.is_empty() {
        println!("  {}", style("No recipes matched.").yellow());
    }

    println!();
    println!(
        "{} Done in {}",
        style("✓").green().bold(),
        style(HumanDuration(elapsed)).cyan()
    );

    Ok(())
}
