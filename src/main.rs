//! inspire-finder CLI entry point
//!
//! A terminal front end for the INSPIRE Austria catalog search. Each
//! invocation builds one [`Session`], runs the requested operation and
//! renders the outcome with colored terminal output.
//!
//! # Usage
//!
//! ```bash
//! # Search with filters
//! inspire-finder search wald --province Tirol --service WFS
//!
//! # Dataset detail, copying a shareable link
//! inspire-finder show <id> --share
//!
//! # Restore a shared view
//! inspire-finder open "https://inspire.example.at/?concept=wald"
//!
//! # Combination analysis
//! inspire-finder combine --ids <id1> <id2> --copy
//!
//! # Rotating highlights until Ctrl-C
//! inspire-finder highlights --watch
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/inspire-finder/config.toml` on Linux) and `INSPIRE_FINDER_*`
//! environment variables. Logging is controlled by `RUST_LOG`.

use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use config::ConfigError;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use inspire_finder::{
    FinderError,
    api::HttpCatalog,
    cli::{Cli, Commands, ConfigCommands, FavoritesCommands, generate_completions, location_from_link},
    config::FinderConfig,
    session::{CarouselScheduler, HighlightLimits, Session},
    store::SledStore,
    ui::{ArboardClipboard, TerminalRenderer},
};

type Result<T> = std::result::Result<T, FinderError>;

/// Initialise stderr logging; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "inspire_finder=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Assemble a session from configuration
///
/// # Errors
///
/// Returns `FinderError` if the HTTP client cannot be created, the
/// favorites database cannot be opened, or favorites cannot be loaded.
fn build_session(config: &FinderConfig, quiet: bool) -> Result<Session> {
    let api = HttpCatalog::new(&config.api_base_url, config.request_timeout())?;
    let favorites_path = config.favorites_path()?;
    debug!(path = %favorites_path.display(), "opening favorites store");
    let store = SledStore::open(&favorites_path)?;

    let session = Session::builder()
        .api(Arc::new(api))
        .renderer(Box::new(TerminalRenderer::new(quiet)))
        .clipboard(Box::new(ArboardClipboard::new()))
        .store(Box::new(store))
        .page_size(config.page_size)
        .share_base_url(config.share_base_url())
        .highlight_limits(HighlightLimits {
            concepts: config.highlight_concepts,
            gems: config.highlight_gems,
        })
        .build()?;
    Ok(session)
}

/// Handle `config` subcommands; none of them needs a session
///
/// # Errors
///
/// Returns `FinderError` if the config path cannot be determined or the
/// file cannot be written.
fn handle_config_command(config: &FinderConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;
            print!("{rendered}");
        }
        ConfigCommands::Path => {
            println!("{}", FinderConfig::config_path()?.display());
        }
        ConfigCommands::Init => {
            let path = config.save()?;
            if !quiet {
                println!("{} Konfiguration geschrieben: {}", "✓".green(), path.display());
            }
        }
    }
    Ok(())
}

/// Show highlights, optionally rotating them until Ctrl-C
///
/// # Errors
///
/// Returns `FinderError` if waiting for the interrupt signal fails.
async fn handle_highlights_command(
    session: &mut Session,
    config: &FinderConfig,
    watch: bool,
    quiet: bool,
) -> Result<()> {
    if session.load_highlights().await == 0 {
        if !quiet {
            println!("{}", "Keine Highlights verfügbar.".dimmed());
        }
        return Ok(());
    }
    if !watch {
        return Ok(());
    }
    let Some(carousel) = session.carousel() else {
        return Ok(());
    };

    let sink = Arc::new(TerminalRenderer::new(quiet));
    let handle = CarouselScheduler::start(carousel, config.carousel_timing(), sink);
    if !handle.is_running() {
        return Ok(());
    }

    if !quiet {
        println!("{}", "Strg+C beendet die Rotation.".dimmed());
    }
    tokio::signal::ctrl_c().await?;
    handle.shutdown().await;
    Ok(())
}

/// Dispatch a session command
///
/// # Errors
///
/// Returns `FinderError` if the session operation fails.
async fn run_session_command(
    session: &mut Session,
    config: &FinderConfig,
    command: Commands,
    quiet: bool,
) -> Result<()> {
    match command {
        Commands::Search { query, filters, page } => {
            let text = query.unwrap_or_default();
            session.run_query(&text, &filters.active(), page).await?;
        }
        Commands::Show { id, browser, share } => {
            session.open_detail(&id).await?;
            if share {
                let link = session.copy_share_link()?;
                if quiet {
                    println!("{link}");
                }
            }
            if browser {
                if let Some(url) = session.detail().and_then(|d| d.inspire_url.clone()) {
                    open::that(&url)?;
                }
            }
        }
        Commands::Open { url } => {
            session.restore(location_from_link(&url)).await?;
        }
        Commands::Favorites { command } => match command {
            FavoritesCommands::List => {
                session.show_favorites().await;
            }
            FavoritesCommands::Toggle { id } => {
                session.toggle_favorite(&id)?;
            }
        },
        Commands::Combine { ids, concept, copy } => {
            if let Some(concept) = concept {
                session.open_concept_by_id(&concept).await?;
            } else {
                session.select_ids(ids.iter().map(String::as_str));
                session.analyze_selection().await?;
            }
            if copy {
                session.copy_combination_prompt()?;
            }
        }
        Commands::Prompt { ids } => {
            session.select_ids(ids.iter().map(String::as_str));
            session.copy_selection_prompt().await?;
        }
        Commands::Highlights { watch } => {
            handle_highlights_command(session, config, watch, quiet).await?;
        }
        Commands::Topics => {
            session.load_topics().await?;
        }
        Commands::Config { .. } | Commands::Completions { .. } => {}
    }
    Ok(())
}

/// Load configuration, apply global flags and run the command
///
/// # Errors
///
/// Returns `FinderError` if configuration loading fails, the session
/// cannot be built, or the command fails.
async fn run(cli: Cli) -> Result<()> {
    let command = cli.get_command();

    if let Commands::Completions { shell } = &command {
        generate_completions(*shell, &mut std::io::stdout());
        return Ok(());
    }

    let mut config = FinderConfig::load()?;
    if let Some(api) = cli.api {
        config.api_base_url = api;
    }
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &command {
        return handle_config_command(&config, command, quiet);
    }

    info!(api = %config.api_base_url, "starting session");
    let mut session = build_session(&config, quiet)?;
    run_session_command(&mut session, &config, command, quiet).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(FinderError::Session(e)) if e.is_reported() => {
            debug!(error = %e, "command failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} {e}", "❌".red());
            ExitCode::FAILURE
        }
    }
}
