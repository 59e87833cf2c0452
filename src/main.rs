mod action;
mod app;
mod catalog;
mod config;
mod controller;
mod error;
mod event;
mod location;
mod query;
mod tui;
mod types;
mod ui;

use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::catalog::HttpCatalog;
use crate::config::Config;
use crate::controller::PageSelectionController;
use crate::event::Event;
use crate::location::Location;
use crate::tui::EventHandler;

/// Browse a remote product catalog from the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Location to open, e.g. "?page=2&productId=42" or a shared link
    location: Option<String>,

    /// Base URL of the product API
    #[arg(long)]
    api_url: Option<String>,

    /// Products per page
    #[arg(long)]
    per_page: Option<u32>,

    /// Total number of products in the catalog
    #[arg(long)]
    total_items: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load().with_overrides(cli.api_url, cli.per_page, cli.total_items);

    let catalog = HttpCatalog::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let location = Location::parse(cli.location.as_deref().unwrap_or(""));
    let controller = PageSelectionController::from_location(config.catalog, location);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(controller, Arc::new(catalog), config.general.share_base).await;

    tui::restore()?;

    // Leave the final state behind as a link that reopens it.
    println!("{}", result?);
    Ok(())
}

async fn run(
    controller: PageSelectionController,
    catalog: Arc<HttpCatalog>,
    share_base: String,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(controller, catalog, share_base, action_tx.clone());
    app.mount();

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16);
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    let link = app.share_link();
    app.unmount();
    Ok(link)
}
