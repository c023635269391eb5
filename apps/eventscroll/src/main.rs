use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use event_sync::{
    load_filter_options, ApplyOutcome, EventBrowser, EventListView, EventSource, FilterField,
    HttpEventSource, SyncController,
};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, Command, HELP};
use config::{load_settings, validate_server_url, DEFAULT_CONFIG_PATH};
use render::{format_row, status_line, IncrementalPrinter};

/// Browse the event catalog page by page.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the listing API, e.g. http://localhost:8000/api
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Page size; fixed for the session.
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    venue: Option<String>,
    #[arg(long)]
    event_type: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    end_date: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Load this many pages, print them and exit instead of prompting.
    #[arg(long)]
    pages: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    if let Some(limit) = args.limit {
        settings.page_limit = limit;
    }
    let server_url = validate_server_url(&settings.server_url)?;
    info!(server_url = %server_url, page_limit = settings.page_limit, "starting event browser");

    let source: Arc<dyn EventSource> = Arc::new(HttpEventSource::new(server_url));
    let mut controller = SyncController::new(settings.page_limit);
    controller.set_filter_options(load_filter_options(source.as_ref()).await);
    apply_initial_filters(&mut controller, &args).context("invalid filter argument")?;

    let mut browser = EventBrowser::new(source, controller);
    browser.refresh();

    match args.pages {
        Some(pages) => run_batch(&mut browser, pages).await,
        None => run_interactive(&mut browser).await,
    }
}

/// Seeds the criteria before the first fetch. The tickets these produce are
/// superseded by the browser's initial refresh.
fn apply_initial_filters(controller: &mut SyncController, args: &Args) -> Result<()> {
    let fields = [
        (FilterField::Venue, &args.venue),
        (FilterField::EventType, &args.event_type),
        (FilterField::StartDate, &args.start_date),
        (FilterField::EndDate, &args.end_date),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            controller.set_filter_field(field, value)?;
        }
    }
    if let Some(search) = &args.search {
        controller.set_search_query(search);
    }
    Ok(())
}

async fn run_batch(browser: &mut EventBrowser, pages: usize) -> Result<()> {
    browser.settle().await;
    for _ in 1..pages {
        if !browser.load_more() {
            break;
        }
        browser.settle().await;
    }

    let view = browser.view();
    for (index, event) in view.events.iter().enumerate() {
        println!("{}", format_row(index, event));
    }
    println!("{}", status_line(&view));
    Ok(())
}

async fn run_interactive(browser: &mut EventBrowser) -> Result<()> {
    let mut lines = BufReader::new(stdin()).lines();
    let mut printer = IncrementalPrinter::default();
    println!("{HELP}");
    print_view(&mut printer, &browser.view());

    loop {
        tokio::select! {
            outcome = browser.next_completion() => {
                if matches!(outcome, Some(ApplyOutcome::Applied | ApplyOutcome::Failed)) {
                    print_view(&mut printer, &browser.view());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle_command(browser, &mut printer, command),
                    Err(message) => println!("{message}"),
                }
            }
        }
    }
    Ok(())
}

fn handle_command(browser: &mut EventBrowser, printer: &mut IncrementalPrinter, command: Command) {
    match command {
        Command::More => {
            if !browser.load_more() {
                println!("{}", status_line(&browser.view()));
            }
        }
        Command::Filter { field, value } => {
            if let Err(err) = browser.set_filter_field(field, &value) {
                warn!("rejected filter change: {err}");
                println!("{err}");
                return;
            }
            print_view(printer, &browser.view());
        }
        Command::Search(text) => {
            browser.set_search_query(&text);
            print_view(printer, &browser.view());
        }
        Command::Reset => {
            browser.reset_filters();
            print_view(printer, &browser.view());
        }
        Command::Show => {
            let view = browser.view();
            for (index, event) in view.events.iter().enumerate() {
                println!("{}", format_row(index, event));
            }
            println!("{}", status_line(&view));
        }
        Command::Options => {
            let options = browser.controller().options();
            println!("venues: {}", options.venues.join(", "));
            println!("event types: {}", options.event_types.join(", "));
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn print_view(printer: &mut IncrementalPrinter, view: &EventListView) {
    for row in printer.pending_rows(view) {
        println!("{row}");
    }
    println!("{}", status_line(view));
}
