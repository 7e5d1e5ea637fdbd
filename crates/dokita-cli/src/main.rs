mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::Context;

#[derive(Parser)]
#[command(name = "dokita")]
#[command(about = "Dokita administration client")]
#[command(version)]
struct Cli {
    /// Path to the Dokita config directory (default: ~/.dokita)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Backend base URL, overrides the config file.
    #[arg(long, global = true, env = "DOKITA_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration
    Init,

    /// Show current configuration
    Config,

    /// Sign in and store the session
    Login {
        /// Account phone number
        #[arg(long)]
        phone: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "DOKITA_PASSWORD")]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user and their grants
    Whoami,

    /// List the permission catalog
    Permissions {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Fetch every page
        #[arg(long)]
        all: bool,
    },

    /// Check whether the session holds any of the given permissions
    Check {
        #[arg(required = true)]
        permissions: Vec<String>,
        /// Skip fetching the permission catalog
        #[arg(long)]
        offline: bool,
    },

    /// Print the navigation menu visible to the session
    Menu {
        /// TOML file with a custom navigation tree
        #[arg(long)]
        tree: Option<PathBuf>,
        /// Filter nested entries at every depth, not just the first two levels
        #[arg(long)]
        recursive: bool,
        /// Skip fetching the permission catalog
        #[arg(long)]
        offline: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dokita=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => dokita_core::DokitaConfig::default_base_dir()?,
    };

    let load = || Context::load(base_dir.clone(), cli.api_url.clone());
    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Init => commands::init::run(&base_dir),
        Commands::Config => commands::config::run(&load()?),
        Commands::Login {
            ref phone,
            ref password,
        } => rt.block_on(commands::login::run(&load()?, phone, password.clone())),
        Commands::Logout => commands::logout::run(&load()?),
        Commands::Whoami => commands::whoami::run(&load()?),
        Commands::Permissions { page, limit, all } => {
            rt.block_on(commands::permissions::run(&load()?, page, limit, all))
        }
        Commands::Check {
            ref permissions,
            offline,
        } => rt.block_on(commands::check::run(&load()?, permissions, offline)),
        Commands::Menu {
            ref tree,
            recursive,
            offline,
        } => rt.block_on(commands::menu::run(
            &load()?,
            tree.as_deref(),
            recursive,
            offline,
        )),
    }
}
