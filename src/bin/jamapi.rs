//! Jama API CLI binary.
//!
//! A command-line interface for looking up Jama items.

use clap::Parser;
use jamapi::cli::{Cli, Command};
use jamapi::{Item, JamaClient, JamaError, PrettyPrint};
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                JamaError::ConfigMissing(_) => {
                    eprintln!("Hint: Set JAMA_API_URL, JAMA_CLIENT_ID and JAMA_CLIENT_SECRET");
                }
                JamaError::InvalidArguments(_) => {
                    eprintln!("Hint: Use '--global-id <ID>' or '--project <N> --item-project-id <KEY>'");
                }
                _ => {}
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

async fn run(cli: Cli) -> jamapi::Result<()> {
    let url = required(cli.url.as_deref(), "--url or JAMA_API_URL")?;
    let client_id = required(cli.client_id.as_deref(), "--client-id or JAMA_CLIENT_ID")?;
    let client_secret =
        required(cli.client_secret.as_deref(), "--client-secret or JAMA_CLIENT_SECRET")?;

    let mut client = JamaClient::new(url)?;
    if let Some(token_url) = cli.token_url.as_deref() {
        client = client.with_token_url(token_url)?;
    }

    // Reject bad arguments before spending a token request on them.
    let query = cli.command.item_query();
    query.resolve()?;

    client.authenticate(client_id, client_secret).await?;

    match cli.command {
        Command::Item { fields, .. } => {
            let item = client.get_item(query).await?;
            output_item(&item, fields, cli.json);
        }
    }
    Ok(())
}

fn required<'a>(value: Option<&'a str>, what: &str) -> jamapi::Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| JamaError::ConfigMissing(format!("{what} is required")))
}

fn output_item(item: &Item, fields: bool, json: bool) {
    if json {
        let value = if fields {
            item.render_fields()
        } else {
            // Items hold only JSON values, so this cannot fail.
            serde_json::to_string_pretty(item).unwrap_or_default()
        };
        println!("{value}");
        return;
    }

    println!("{}", item.pretty_print());
    if fields {
        let rows: Vec<FieldRow> = item
            .fields()
            .iter()
            .map(|(name, value)| FieldRow::new(name, value))
            .collect();
        println!("\n{}", Table::new(rows));
    }
}

// Table row type for non-JSON output

#[derive(Tabled)]
struct FieldRow {
    field: String,
    value: String,
}

impl FieldRow {
    fn new(name: &str, value: &serde_json::Value) -> Self {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self {
            field: name.to_string(),
            value,
        }
    }
}
