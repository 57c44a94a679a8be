/// Encore - browse the hosted catalog and walk playlists from the terminal
use anyhow::Context;
use clap::{Parser, Subcommand};
use encore_catalog::{load_playlist, CatalogConfig, HttpCatalog, PlaylistScope};
use encore_core::{CategoryId, Track, TrackId};
use encore_playback::{format_clock, PlaybackConfig, PlaybackController};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod dry_run;

use dry_run::DryRunDevice;

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore music catalog and playback controller", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./encore.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List songs in catalog order
    Tracks {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// List categories
    Categories,
    /// Walk the playlist the way the player would
    Walk {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Track to start from (defaults to the first)
        #[arg(short, long)]
        from: Option<String>,
        /// Number of skips
        #[arg(short, long, default_value_t = 5)]
        steps: usize,
        /// Skip backwards instead of forwards
        #[arg(long)]
        previous: bool,
    },
}

#[derive(clap::Args)]
struct ScopeArgs {
    /// Only tracks in this category
    #[arg(long, conflicts_with = "uncategorized")]
    category: Option<String>,
    /// Only tracks without a category
    #[arg(long)]
    uncategorized: bool,
}

impl ScopeArgs {
    fn scope(&self) -> PlaylistScope {
        match (&self.category, self.uncategorized) {
            (Some(id), _) => PlaylistScope::Category(CategoryId::new(id.clone())),
            (None, true) => PlaylistScope::Uncategorized,
            (None, false) => PlaylistScope::All,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "encore=info,encore_catalog=info,encore_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config =
        CatalogConfig::load(cli.config.as_deref()).context("Failed to load catalog configuration")?;
    let catalog = HttpCatalog::new(config)?;

    match cli.command {
        Commands::Tracks { scope } => list_tracks(&catalog, &scope.scope()).await?,
        Commands::Categories => list_categories(&catalog).await?,
        Commands::Walk {
            scope,
            from,
            steps,
            previous,
        } => walk(&catalog, &scope.scope(), from, steps, previous).await?,
    }

    Ok(())
}

async fn list_tracks(catalog: &HttpCatalog, scope: &PlaylistScope) -> anyhow::Result<()> {
    let mut controller = dry_run_controller();
    load_playlist(catalog, &mut controller, scope).await?;

    for (index, track) in controller.playlist().iter().enumerate() {
        println!("{}", render_row(index, track));
    }
    Ok(())
}

async fn list_categories(catalog: &HttpCatalog) -> anyhow::Result<()> {
    for category in catalog.categories().await? {
        match category.description {
            Some(description) => println!("{:<16} {} - {}", category.id.as_str(), category.name, description),
            None => println!("{:<16} {}", category.id.as_str(), category.name),
        }
    }
    Ok(())
}

async fn walk(
    catalog: &HttpCatalog,
    scope: &PlaylistScope,
    from: Option<String>,
    steps: usize,
    previous: bool,
) -> anyhow::Result<()> {
    let mut controller = dry_run_controller();
    let count = load_playlist(catalog, &mut controller, scope).await?;
    anyhow::ensure!(count > 0, "Playlist is empty");

    let start = match from {
        Some(id) => {
            let id = TrackId::new(id);
            controller
                .playlist()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .with_context(|| format!("Track {} is not in the playlist", id))?
        }
        None => controller.playlist()[0].clone(),
    };

    controller.play(start);
    print_current(&controller);
    for _ in 0..steps {
        if previous {
            controller.previous();
        } else {
            controller.next();
        }
        print_current(&controller);
    }
    Ok(())
}

fn dry_run_controller() -> PlaybackController<DryRunDevice> {
    PlaybackController::new(PlaybackConfig::default(), || Ok(DryRunDevice::default()))
}

fn print_current(controller: &PlaybackController<DryRunDevice>) {
    if let Some(track) = controller.current_track() {
        println!("{}", render_row(controller.playlist_index(), track));
    }
    if let Some(fault) = controller.fault() {
        eprintln!("  ! {}", fault.message);
    }
}

fn render_row(index: usize, track: &Track) -> String {
    format!(
        "{:>3}. {} - {} [{}]",
        index + 1,
        track.artist,
        track.title,
        format_clock(track.duration_secs)
    )
}
