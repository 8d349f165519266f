use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{CommentsApi, GalleryClient};
use shared::domain::WallpaperId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod host;
mod session;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Drive the wallpaper gallery page behaviours from a terminal")]
struct Cli {
    #[arg(long, default_value = "gallery.toml")]
    config: PathBuf,
    /// Overrides the configured server URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Emit masonry layout diagnostics.
    #[arg(long)]
    layout_verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a wallpaper's modal and print its comments.
    Comments { wallpaper_id: i64 },
    /// Post a comment through the modal's form.
    Post { wallpaper_id: i64, text: String },
    /// Rename a wallpaper; prompts on stdin unless --new-name is given.
    Rename {
        wallpaper_id: i64,
        #[arg(long, default_value = "")]
        current_name: String,
        #[arg(long)]
        new_name: Option<String>,
    },
    /// Compute masonry row spans for cards of the given container heights.
    Layout {
        #[arg(required = true)]
        heights: Vec<f64>,
        #[arg(long)]
        gap: Option<String>,
        #[arg(long)]
        row_height: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config);
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    if cli.layout_verbose {
        settings.ui.layout_verbose = true;
    }
    info!(server_url = %settings.server_url, "gallery cli starting");

    let client = Arc::new(GalleryClient::new(settings.server_url.clone()));
    let api: Arc<dyn CommentsApi> = client.clone();

    match cli.command {
        Command::Comments { wallpaper_id } => {
            let html = session::show_comments(api, &settings.ui, WallpaperId(wallpaper_id)).await;
            println!("{html}");
        }
        Command::Post { wallpaper_id, text } => {
            let html =
                session::post_comment(api, &settings.ui, WallpaperId(wallpaper_id), &text).await?;
            println!("{html}");
        }
        Command::Rename {
            wallpaper_id,
            current_name,
            new_name,
        } => {
            match session::rename(
                &client,
                &settings.ui,
                WallpaperId(wallpaper_id),
                &current_name,
                new_name,
            )
            .await?
            {
                Some(location) => println!("renamed; now at {location}"),
                None => println!("rename cancelled"),
            }
        }
        Command::Layout {
            heights,
            gap,
            row_height,
        } => {
            let spans = session::layout(
                &settings.ui,
                &heights,
                gap.as_deref(),
                row_height.as_deref(),
            )
            .await;
            for (index, span) in spans.iter().enumerate() {
                println!("card {index}: {span}");
            }
        }
    }

    Ok(())
}
