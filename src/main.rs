// stockroom - keeps track of what's on the shelf
//
// Entry point. Sets up logging and settings, then either runs the
// interactive menu or prints a one-off listing.

use anyhow::{bail, Context};
use stockroom_lib::{
    cli::{display, Prompter, Session},
    Inventory, LoadOutcome, Settings,
};
use std::env;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let (file_override, rest) = split_file_flag(&args)?;
    let command = rest.first().map(String::as_str).unwrap_or("menu");

    match command {
        "version" | "-v" | "--version" => {
            println!("stockroom v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "-h" | "--help" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load(file_override.as_deref()).context("Failed to load settings")?;

    match command {
        "menu" => handle_menu(settings),
        "list" => handle_list(settings, rest.iter().any(|arg| arg == "--json")),
        "low-stock" => handle_low_stock(settings),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

// Log lines go to stderr so they never land in the middle of the menu
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom=warn,stockroom_lib=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

// Pull `--file <path>` (or `--file=<path>`) out from anywhere in the args
fn split_file_flag(args: &[String]) -> anyhow::Result<(Option<String>, Vec<String>)> {
    let mut file = None;
    let mut rest = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--file" => {
                i += 1;
                match args.get(i) {
                    Some(path) => file = Some(path.clone()),
                    None => bail!("--file needs a path"),
                }
            }
            arg => match arg.strip_prefix("--file=") {
                Some(path) => file = Some(path.to_string()),
                None => rest.push(arg.to_string()),
            },
        }
        i += 1;
    }

    Ok((file, rest))
}

fn handle_menu(settings: Settings) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut session = Session::start(settings, prompter)?;

    // A failed save on the way out is reported, not fatal
    if let Err(e) = session.run() {
        eprintln!("Error: {}", e.user_message());
    }

    Ok(())
}

fn open_inventory(settings: &Settings) -> anyhow::Result<Inventory> {
    let (inventory, outcome) = Inventory::open(&settings.file)
        .with_context(|| format!("Failed to read {}", settings.file.display()))?;

    if let LoadOutcome::Loaded(summary) = outcome {
        if summary.skipped > 0 {
            eprintln!("Warning: {} invalid entries were skipped.", summary.skipped);
        }
    }

    Ok(inventory)
}

fn handle_list(settings: Settings, json: bool) -> anyhow::Result<()> {
    let inventory = open_inventory(&settings)?;

    if json {
        println!("{}", inventory.to_json()?);
    } else {
        display::write_inventory(&mut io::stdout(), inventory.list())?;
    }

    Ok(())
}

fn handle_low_stock(settings: Settings) -> anyhow::Result<()> {
    let inventory = open_inventory(&settings)?;
    let low = inventory.low_stock(settings.low_stock_threshold);

    println!("Products with fewer than {} units:", settings.low_stock_threshold);
    display::write_low_stock(&mut io::stdout(), &low)?;

    Ok(())
}

fn print_usage() {
    println!(
        r#"stockroom v{} - A tiny inventory tracker

USAGE:
    stockroom [--file <path>] [COMMAND]

COMMANDS:
    menu                   Interactive menu (default)
    list [--json]          Print every product
    low-stock              Print products running low
    version                Show version
    help                   Show this help

CONFIGURATION:
    --file <path>                    Inventory file (default: inventory.txt)
    STOCKROOM_FILE                   Same as --file
    STOCKROOM_LOW_STOCK_THRESHOLD    Low stock cutoff (default: 5)
    stockroom.toml                   Optional settings file in the working directory
    RUST_LOG                         Log filter, e.g. stockroom_lib=debug
"#,
        env!("CARGO_PKG_VERSION")
    );
}
