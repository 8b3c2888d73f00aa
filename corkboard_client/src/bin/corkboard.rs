// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `corkboard`: watch a board from the terminal.
//!
//! Runs the headless canvas against a content service, logs new-entity
//! notifications and prints an ASCII minimap after each applied fetch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use corkboard_canvas::{Canvas, EntityId, Event};
use corkboard_client::{CanvasHost, ClientConfig, Driver, HttpContentService, ascii_minimap};
use kurbo::{Point, Size};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MINIMAP_SIZE: Size = Size::new(48.0, 16.0);

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Corkboard canvas client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow a board and print its minimap as it changes
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct WatchArgs {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Content service root, overriding the configuration
    #[arg(long)]
    base_url: Option<String>,

    /// Poll the live feed for new entities
    #[arg(long)]
    live: bool,

    /// Simulated screen width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Simulated screen height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// World point to center on, as X,Y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    center: Option<Point>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("`{v}` is not a finite number"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[derive(Debug)]
struct TerminalHost;

impl CanvasHost for TerminalHost {
    fn on_position_committed(&mut self, id: &EntityId, position: Point) {
        info!(entity = %id, x = position.x, y = position.y, "position saved");
    }

    fn on_new_entities(&mut self, previous: usize, current: usize) {
        info!(previous, current, "new entities on the board");
    }

    fn on_reverted(&mut self, id: &EntityId, position: Point) {
        warn!(entity = %id, x = position.x, y = position.y, "move reverted");
    }

    fn on_refresh(&mut self, canvas: &Canvas) {
        let count = canvas.entity_set().len();
        let center = canvas.camera().center_world();
        println!(
            "{count} entities around ({:.0}, {:.0}) at zoom {:.2}",
            center.x,
            center.y,
            canvas.camera().zoom()
        );
        if let Some(minimap) = canvas.minimap(MINIMAP_SIZE) {
            print!("{}", ascii_minimap(&minimap));
        }
    }
}

async fn watch(args: WatchArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.live |= args.live;
    if let Some(width) = args.width {
        config.screen.width = width;
    }
    if let Some(height) = args.height {
        config.screen.height = height;
    }
    let screen = config.screen_size();
    if !(screen.width > 0.0 && screen.height > 0.0) {
        bail!("screen size must be positive, got {screen:?}");
    }

    let canvas =
        Canvas::new(config.canvas.clone(), screen).context("invalid canvas configuration")?;
    let service = HttpContentService::new(config.base_url.clone(), config.session());
    info!(base_url = %config.base_url, live = config.live, "watching board");

    let mut driver = Driver::new(canvas, Arc::new(service), TerminalHost, config.request_timeout());
    // Applied before the session starts so the first fetch already covers them.
    if let Some(center) = args.center {
        driver.dispatch(Event::CenterOn(center));
    }
    driver.dispatch(Event::SetLive(config.live));

    let cancel = driver.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
    driver.run().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Watch(args) => watch(args).await,
    }
}
