// ABOUTME: Main executable for apod-wallpaper
// ABOUTME: Provides the CLI for fetching the daily picture and inspecting configuration

use std::process;
use std::time::Duration;

use apod_wallpaper::{
    cli::{Cli, Commands, ConfigArgs, FetchArgs},
    client::ApodClient,
    config::Config,
    error::{generic_error, AppError},
    fetch::save_record_image,
    record::ApodRecord,
};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag before the logger reads it
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    // Initialize the library (sets up logging)
    apod_wallpaper::init();

    // Run the application
    if let Err(e) = run(cli) {
        error!("Application error: {}", e);
        println!();
        println!("{} {}", "❌".red(), "Error:".bright_red().bold());
        println!("{}", e.to_string().red());
        println!();
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Commands::Fetch(args)) => handle_fetch(FetchArgs {
            output: args.output.or(cli.fetch.output),
            sd: args.sd || cli.fetch.sd,
            dry_run: args.dry_run || cli.fetch.dry_run,
        }),
        Some(Commands::Info) => handle_info(),
        Some(Commands::Config(config_args)) => handle_config(config_args),
        None => handle_fetch(cli.fetch),
    }
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    println!();
    if args.dry_run {
        println!(
            "{}",
            "🧪 Astronomy Picture of the Day (Dry Run)"
                .bright_yellow()
                .bold()
        );
    } else {
        println!(
            "{}",
            "🔭 Astronomy Picture of the Day".bright_cyan().bold()
        );
    }
    println!("{}", "─".repeat(50).dimmed());

    let spinner = create_spinner("🔧 Loading configuration...")?;
    info!("Loading configuration");
    let hd = if args.sd { Some(false) } else { None };
    let config = match Config::load_with_overrides(args.output, hd) {
        Ok(config) => config,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    debug!(
        "Using {} with output {}",
        config.base_url,
        config.output_path.display()
    );
    spinner.finish_with_message(format!(
        "{} {}",
        "✅".green(),
        "Configuration loaded".green()
    ));

    let client = ApodClient::new(&config)?;

    let spinner = create_spinner("🛰️  Fetching today's entry...")?;
    let record = match client.fetch_record() {
        Ok(record) => record,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} {} {}",
        "✅".green(),
        "Found".green(),
        record.title.bright_white().bold()
    ));

    let source_url = record.image_url(config.hd).to_string();

    if args.dry_run {
        println!();
        println!(
            "{} {}",
            "🧪".yellow(),
            "DRY RUN MODE - No image will be downloaded"
                .bright_yellow()
                .bold()
        );
        println!("  Would download: {}", source_url);
        println!("  Would save to:  {}", config.output_path.display());
        return Ok(());
    }

    let spinner = create_spinner("📥 Downloading image...")?;
    let saved = match save_record_image(&client, record, config.hd, &config.output_path) {
        Ok(saved) => saved,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} {}",
        "✅".green(),
        "Image saved".green()
    ));

    println!();
    println!("{}", "─".repeat(50).dimmed());
    println!(
        "{} {}",
        "🎉".green(),
        "Wallpaper updated!".bright_green().bold()
    );
    println!(
        "{} {} {}",
        "📷".blue(),
        "Title:".bright_blue(),
        saved.record.title.bright_white().bold()
    );
    println!(
        "{} {} {}",
        "📐".blue(),
        "Size:".bright_blue(),
        format!("{}x{}", saved.width, saved.height).bright_white()
    );
    println!(
        "{} {} {}",
        "📁".blue(),
        "Saved to:".bright_blue(),
        saved.path.display().to_string().bright_white().bold()
    );
    println!("{}", "─".repeat(50).dimmed());

    Ok(())
}

fn handle_info() -> Result<(), AppError> {
    let config = Config::load()?;
    let client = ApodClient::new(&config)?;

    let spinner = create_spinner("🛰️  Fetching today's entry...")?;
    let record = client.fetch_record();
    spinner.finish_and_clear();
    let record = record?;

    print_record(&record);
    Ok(())
}

fn print_record(record: &ApodRecord) {
    let date = record
        .parsed_date()
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| record.date.clone());

    println!();
    println!("{}", record.title.bright_cyan().bold());
    println!("{}", "─".repeat(50).dimmed());
    println!("{} {}", "Date:".bright_blue(), date.bright_white());
    println!(
        "{} {}",
        "Media type:".bright_blue(),
        record.media_type.bright_white()
    );
    println!(
        "{} {}",
        "Copyright:".bright_blue(),
        record.copyright.trim().bright_white()
    );
    println!("{} {}", "HD image:".bright_blue(), record.hdurl.bright_white());
    println!("{} {}", "SD image:".bright_blue(), record.url.bright_white());
    if let Some(concepts) = &record.concepts {
        println!("{} {}", "Concepts:".bright_blue(), concepts.bright_white());
    }
    println!();
    println!("{}", record.explanation);
    println!("{}", "─".repeat(50).dimmed());
}

fn handle_config(args: ConfigArgs) -> Result<(), AppError> {
    if args.path {
        let path = Config::get_config_file_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Show current configuration
    println!();
    println!("{}", "📋 Current Configuration".bright_cyan().bold());
    println!("{}", "─".repeat(50).dimmed());

    match Config::load() {
        Ok(config) => {
            println!(
                "{} {}",
                "Base URL:".bright_blue(),
                config.base_url.bright_white()
            );
            println!(
                "{} {}",
                "API key:".bright_blue(),
                config.masked_api_key().bright_white()
            );
            println!(
                "{} {}",
                "Output path:".bright_blue(),
                config.output_path.display().to_string().bright_white()
            );
            println!(
                "{} {}",
                "HD images:".bright_blue(),
                config.hd.to_string().bright_white()
            );

            if let Ok(config_path) = Config::get_config_file_path() {
                println!();
                println!(
                    "{} {}",
                    "Config file:".bright_blue(),
                    config_path.display().to_string().bright_white()
                );
            }
        }
        Err(e) => {
            println!("{} {}", "❌".red(), "No usable configuration found".red());
            println!("{}", e.to_string().dimmed());
            println!();
            println!("Set APOD_API_KEY or create the config file shown by:");
            println!("  {}", "apod-wallpaper config --path".cyan());
        }
    }

    println!("{}", "─".repeat(50).dimmed());
    Ok(())
}

/// Creates a spinner with consistent styling
fn create_spinner(msg: &str) -> Result<ProgressBar, AppError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .map_err(|e| generic_error(format!("Failed to create spinner template: {}", e)))?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
