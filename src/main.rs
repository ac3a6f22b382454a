//! instance-ingress CLI
//!
//! Renders the `Ingress` resources exposing an instance, using the same
//! forging rules a controller applies.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ config::loader ──▶ ForgeOptions ─┐
//!                                                     ▼
//!   --name/--uid/--mode/--kind ──▶ InstanceRef ──▶ forge::ingress ──▶ JSON (stdout)
//!                                                     ▲
//!   (watch) config::watcher ── changed options ───────┘
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use instance_ingress::config::{load_config, ConfigWatcher, ForgeConfig};
use instance_ingress::forge::hostname::host_name;
use instance_ingress::forge::ingress::{forge_ingress, instance_url};
use instance_ingress::observability::init_logging;
use instance_ingress::{EnvironmentMode, ForgeOptions, IngressKind, InstanceRef};

#[derive(Parser)]
#[command(name = "instance-ingress")]
#[command(about = "Forge the ingresses exposing instance environments", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ingress for an instance sub-resource as JSON
    Render(InstanceArgs),
    /// Print the hostname for an environment mode
    Host {
        #[arg(short, long, default_value = "Standard")]
        mode: String,
    },
    /// Print the user-facing URL of an instance sub-resource
    Url(InstanceArgs),
    /// Re-render the ingress whenever the configuration file changes
    Watch(InstanceArgs),
}

#[derive(Args, Clone)]
struct InstanceArgs {
    /// Instance name
    #[arg(long)]
    name: String,

    /// Instance namespace
    #[arg(long)]
    namespace: String,

    /// Instance UID
    #[arg(long)]
    uid: String,

    /// Environment mode (Standard, Exam, Exercise); unknown values mean Standard
    #[arg(short, long, default_value = "Standard")]
    mode: String,

    /// Sub-resource to expose (instance, gui, mydrive)
    #[arg(short, long, default_value = "gui")]
    kind: IngressKind,
}

impl InstanceArgs {
    fn instance(&self) -> InstanceRef {
        InstanceRef {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            uid: self.uid.clone(),
            mode: resolve_mode(&self.mode),
        }
    }
}

/// Unknown modes are accepted as `Standard`, but worth a warning on the command line.
fn resolve_mode(raw: &str) -> EnvironmentMode {
    EnvironmentMode::parse_known(raw).unwrap_or_else(|| {
        tracing::warn!(mode = %raw, "Unrecognized environment mode, using Standard");
        EnvironmentMode::Standard
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ForgeConfig::default(),
    };
    init_logging(&config.observability);

    tracing::debug!(
        base_domain = %config.ingress.base_domain,
        authenticated = config.auth.url.is_some(),
        "Configuration loaded"
    );

    let options = ForgeOptions::from(&config);
    match cli.command {
        Commands::Render(args) => render(&args, &options)?,
        Commands::Host { mode } => println!("{}", host_name(&options.base_domain, resolve_mode(&mode))),
        Commands::Url(args) => println!("{}", instance_url(&args.instance(), args.kind, &options)),
        Commands::Watch(args) => {
            let path = cli.config.ok_or("watch requires --config")?;
            watch(path, &args, options).await?;
        }
    }

    Ok(())
}

fn render(args: &InstanceArgs, options: &ForgeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let ingress = forge_ingress(&args.instance(), args.kind, options, None);
    println!("{}", serde_json::to_string_pretty(&ingress)?);
    Ok(())
}

async fn watch(
    path: PathBuf,
    args: &InstanceArgs,
    options: ForgeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    render(args, &options)?;

    let (watcher, mut updates) = ConfigWatcher::new(&path, options);
    let _guard = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(options) = update else { break };
                render(args, &options)?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
