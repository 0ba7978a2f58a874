use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use std::path::PathBuf;

use foodlens::config::VisionConfig;
use foodlens::database::Database;
use foodlens::history::store::HistoryStore;
use foodlens::orchestrator::{AnalysisOrchestrator, AnalysisState};
use foodlens::providers::openai::OpenAiVisionProvider;
use foodlens::{DayBucket, NutritionRecord};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the food photo to analyze
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Commit the analysis into today's history after it completes
    #[arg(long)]
    save: bool,

    /// Print the stored history and exit
    #[arg(long)]
    history: bool,

    /// SQLite file holding the history
    #[arg(long, default_value = "foodlens.db")]
    db: PathBuf,

    #[arg(short, long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    if args.history {
        let store = HistoryStore::new(Database::new(&args.db).await?);
        let buckets = store.load().await;
        if buckets.is_empty() {
            println!("{}", "No history yet.".yellow());
        }
        for bucket in &buckets {
            print_bucket(bucket);
        }
        return Ok(());
    }

    let Some(path) = args.image else {
        eprintln!("{}", "Nothing to do. Pass --image <path> or --history.".red());
        std::process::exit(1);
    };

    let config = match args.api_key {
        Some(key) => VisionConfig::with_api_key(key),
        None => VisionConfig::from_env().map_err(|e| anyhow::anyhow!(e))?,
    };

    let store = HistoryStore::new(Database::new(&args.db).await?);
    let provider = Box::new(OpenAiVisionProvider::new(config));
    let orchestrator = AnalysisOrchestrator::new(provider, store).await;

    let image = image::open(&path)?;
    orchestrator.select_image(image);

    println!("{}", "Analyzing photo...".cyan());
    if let Err(err) = orchestrator.start_analysis().await {
        eprintln!("{}", err.user_message().red());
        std::process::exit(1);
    }

    if let AnalysisState::Succeeded(record) = orchestrator.state() {
        print_record(&record);
        if args.save {
            orchestrator
                .commit()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{}", "Saved to today's history.".green());
        }
    }

    Ok(())
}

fn print_record(record: &NutritionRecord) {
    println!("\n{}", record.food_name.bold());
    println!("  Calories: {}", record.calories.to_string().green());
    println!(
        "  P: {} / C: {} / F: {}",
        record.protein, record.carbs, record.fat
    );
    if !record.ingredients.is_empty() {
        println!("  Ingredients: {}", record.ingredients.join(", "));
    }
}

fn print_bucket(bucket: &DayBucket) {
    println!(
        "{} {}",
        bucket.date.to_string().bold(),
        format!("({} cal)", bucket.total_calories).green()
    );
    for record in &bucket.entries {
        println!(
            "  - {} ({} cal, P: {} / C: {} / F: {})",
            record.food_name, record.calories, record.protein, record.carbs, record.fat
        );
    }
}
