//! `haapi` - command-line front-end for the HAAPI dispatcher.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Print registered operations |
//! | `url` | Print the URL for an endpoint key |
//! | `invoke` | Dispatch an operation and print the response body |

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use haapi_client::{
    catalog, init_tracing, ApiKeySession, CallArgs, ClientConfig, Dispatcher, InvokeError,
    LogFormat, RetryPolicy,
};
use haapi_core::UrlBuilder;
use serde_json::Value;
use tracing::error;

#[derive(Parser)]
#[command(name = "haapi")]
#[command(about = "Dispatch HAAPI operations from the command line", long_about = None)]
struct Cli {
    /// Backend base URL (must end with '/')
    #[arg(
        long,
        global = true,
        env = "HAAPI_BASE_URL",
        default_value = haapi_client::dispatch::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Retries after the first attempt for timed-out requests
    #[arg(long, global = true, env = "HAAPI_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Lower bound of the delay between attempts, in milliseconds
    #[arg(long, global = true, env = "HAAPI_MIN_RETRY_INTERVAL_MS", default_value_t = 500)]
    min_retry_interval_ms: u64,

    /// Upper bound of the delay between attempts, in milliseconds
    #[arg(long, global = true, env = "HAAPI_MAX_RETRY_INTERVAL_MS", default_value_t = 2_000)]
    max_retry_interval_ms: u64,

    /// Per-request deadline, in milliseconds
    #[arg(long, global = true, env = "HAAPI_REQUEST_TIMEOUT_MS", default_value_t = 30_000)]
    request_timeout_ms: u64,

    /// Session api key, used by operations called without one
    #[arg(long, global = true, env = "HAAPI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "HAAPI_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print registered operations with their endpoint and arity
    List,
    /// Print the absolute URL of an endpoint
    Url {
        /// Endpoint key, e.g. ANKAMA_ACCOUNT_STATUS
        #[arg(value_name = "KEY")]
        key: String,

        /// Query parameters as name=value
        #[arg(value_name = "NAME=VALUE")]
        query: Vec<String>,
    },
    /// Invoke an operation by name
    Invoke {
        /// Operation name, e.g. ankama.account.status
        #[arg(value_name = "NAME")]
        name: String,

        /// Positional arguments; each is parsed as JSON, else taken as a string
        #[arg(value_name = "ARG")]
        args: Vec<String>,
    },
}

impl Cli {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                min_interval: Duration::from_millis(self.min_retry_interval_ms),
                max_interval: Duration::from_millis(self.max_retry_interval_ms),
            },
            ..ClientConfig::default()
        }
    }
}

fn parse_query(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            let Some((name, value)) = pair.split_once('=') else {
                bail!("query parameter {pair:?} is not name=value");
            };
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn list() {
    for operation in catalog::CATALOG {
        println!(
            "{:<40} {:<5} {:<45} args={}",
            operation.name,
            operation.method.as_str(),
            operation.endpoint.path(),
            operation.arity()
        );
    }
}

fn print_url(config: &ClientConfig, key: &str, query: &[String]) -> Result<()> {
    config.validate()?;
    let query = parse_query(query)?;
    let url = UrlBuilder::new(config.base_url.clone()).build_url_for_key(key, &query)?;
    println!("{url}");
    Ok(())
}

fn session(api_key: Option<&str>) -> ApiKeySession {
    api_key.map_or_else(ApiKeySession::new, |key| ApiKeySession::with_api_key(key))
}

async fn invoke(
    config: &ClientConfig,
    session: Arc<ApiKeySession>,
    name: &str,
    args: &[String],
) -> Result<()> {
    let dispatcher =
        Dispatcher::connect(config, session.clone()).context("failed to build dispatcher")?;
    let args: CallArgs = args.iter().map(|raw| parse_arg(raw)).collect();

    let result = dispatcher.invoke(name, args).await;
    if session.is_logged_out() {
        error!("backend revoked the session");
    }
    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response.body)?);
            Ok(())
        }
        Err(InvokeError::Domain(err)) => bail!("{err}"),
        Err(InvokeError::Transport(err)) => {
            if let Some(body) = &err.body {
                eprintln!("{}", serde_json::to_string_pretty(body)?);
            }
            bail!("{err}")
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    // A subscriber installed by the embedding environment wins.
    let _ = init_tracing(LogFormat::from_json_flag(cli.log_json));

    let config = cli.config();
    let outcome = match &cli.command {
        Commands::List => {
            list();
            Ok(())
        }
        Commands::Url { key, query } => print_url(&config, key, query),
        Commands::Invoke { name, args } => {
            let auth = Arc::new(session(cli.api_key.as_deref()));
            invoke(&config, auth, name, args).await
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
