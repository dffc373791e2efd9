//! Command-line interface definitions and parsing
//!
//! This module defines the CLI of `inspire-finder` using the `clap` crate.
//! Every subcommand maps onto one or a few [`Session`](crate::session::Session)
//! operations; the binary wires them to the terminal renderer.
//!
//! # Commands
//!
//! - **search**: Run a catalog search with optional filters and page
//! - **show**: Open the detail view of one dataset
//! - **open**: Restore the view encoded in a shareable link
//! - **favorites**: List or toggle favorites
//! - **combine**: Combination analysis of datasets or a concept
//! - **prompt**: Copy an LLM prompt for a set of datasets
//! - **highlights**: Show (and optionally rotate) the highlight carousel
//! - **topics**: List topic filter options
//! - **config**: Inspect or initialise the configuration file
//! - **completions**: Generate shell completion scripts

use clap::{Args, Command, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;

use crate::session::FilterKind;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "inspire-finder")]
#[command(about = "Search the INSPIRE Austria geodata catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log requests and state transitions to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Catalog API base URL (overrides config)
    #[arg(long = "api", value_name = "URL", global = true)]
    pub api: Option<String>,
}

/// Facet filters of the `search` command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Record type (dataset, service, series)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Federal province, e.g. Tirol
    #[arg(short = 'p', long = "province", value_name = "PROVINCE")]
    pub province: Option<String>,

    /// Service type, e.g. WFS
    #[arg(short = 's', long = "service", value_name = "SERVICE")]
    pub service: Option<String>,

    /// Topic
    #[arg(long = "topic", value_name = "TOPIC")]
    pub topic: Option<String>,
}

impl FilterArgs {
    /// Filters that were given, in request order
    #[must_use]
    pub fn active(&self) -> Vec<(FilterKind, &str)> {
        [
            (FilterKind::Type, &self.kind),
            (FilterKind::Province, &self.province),
            (FilterKind::Service, &self.service),
            (FilterKind::Topic, &self.topic),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.as_deref().map(|v| (kind, v)))
        .collect()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Search the catalog (default)
    #[command(visible_alias = "s")]
    Search {
        /// Free-text query
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Result page (1-based)
        #[arg(long = "page", value_name = "N", default_value_t = 1)]
        page: usize,
    },

    /// Show the detail view of a dataset
    Show {
        /// Dataset id
        id: String,

        /// Open the dataset in the INSPIRE geoportal
        #[arg(long = "browser")]
        browser: bool,

        /// Copy a shareable link to the clipboard
        #[arg(long = "share")]
        share: bool,
    },

    /// Restore the view encoded in a shareable link
    Open {
        /// Link or location, e.g. `https://host/?dataset=ID` or `/?q=wald`
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Manage favorites
    #[command(visible_alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },

    /// Combination analysis of several datasets or one concept
    #[command(visible_alias = "c")]
    Combine {
        /// Dataset ids to combine (at least two)
        #[arg(long = "ids", value_name = "ID", num_args = 1.., conflicts_with = "concept")]
        ids: Vec<String>,

        /// Concept id
        #[arg(long = "concept", value_name = "CONCEPT", required_unless_present = "ids")]
        concept: Option<String>,

        /// Copy the combination prompt to the clipboard
        #[arg(long = "copy")]
        copy: bool,
    },

    /// Copy an LLM prompt for the given datasets to the clipboard
    Prompt {
        /// Dataset ids
        #[arg(value_name = "ID", required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Show the highlight carousel
    #[command(visible_alias = "hl")]
    Highlights {
        /// Keep rotating until interrupted with Ctrl-C
        #[arg(short = 'w', long = "watch")]
        watch: bool,
    },

    /// List topic filter options
    Topics,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Favorites subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesCommands {
    /// List all favorites
    #[command(visible_alias = "ls")]
    List,

    /// Add or remove a favorite
    Toggle {
        /// Dataset id
        id: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the path of the configuration file
    Path,

    /// Write the effective configuration to the configuration file
    Init,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to an unfiltered search
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Search {
            query: None,
            filters: FilterArgs::default(),
            page: 1,
        })
    }

    /// The clap command tree, for completion generation
    #[must_use]
    pub fn command_tree() -> Command {
        Self::command()
    }
}

/// Write a static completion script for `shell` to `buf`
pub fn generate_completions<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command_tree();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}

/// Location part (`/path?query`) of a shareable link
///
/// Accepts absolute URLs as well as bare locations.
#[must_use]
pub fn location_from_link(link: &str) -> &str {
    let Some((_, rest)) = link.split_once("://") else {
        return link;
    };
    rest.find(['/', '?']).map_or("/", |start| &rest[start..])
}
