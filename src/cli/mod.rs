//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the jamapi binary.

use clap::{ArgAction, Parser, Subcommand};

use crate::ItemQuery;

/// Jama API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "jamapi", about = "Jama API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log request details to stderr (repeat for more).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Jama REST endpoint, e.g. https://example.jamacloud.com/rest/v1
    #[arg(long, global = true, env = "JAMA_API_URL")]
    pub url: Option<String>,

    /// OAuth token endpoint (defaults to /rest/oauth/token on the same host).
    #[arg(long, global = true, env = "JAMA_TOKEN_URL")]
    pub token_url: Option<String>,

    /// API client ID from the Jama web interface.
    #[arg(long, global = true, env = "JAMA_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API client secret from the Jama web interface.
    #[arg(long, global = true, env = "JAMA_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single item by global id, or by project and project-scoped id.
    Item {
        /// Global document key.
        #[arg(long)]
        global_id: Option<String>,

        /// Project ID (with --item-project-id).
        #[arg(long)]
        project: Option<i64>,

        /// Project-scoped document key (with --project).
        #[arg(long)]
        item_project_id: Option<String>,

        /// Also print every item field.
        #[arg(long)]
        fields: bool,
    },
}

impl Command {
    /// Item lookup arguments, unvalidated.
    pub fn item_query(&self) -> ItemQuery {
        match self {
            Command::Item {
                global_id,
                project,
                item_project_id,
                ..
            } => ItemQuery {
                global_id: global_id.clone(),
                project_id: *project,
                item_project_id: item_project_id.clone(),
            },
        }
    }
}
