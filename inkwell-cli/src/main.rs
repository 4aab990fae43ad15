//! # inkwell CLI
//!
//! Serves the blog and wiki collections over HTTP and scaffolds new
//! content files.

mod bundle;
mod commands;

use clap::{Parser, Subcommand};
use inkwell_core::Collection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkwell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "inkwell.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create a new wiki page
    Wiki {
        /// Page title
        title: String,
    },

    /// Create a new blog post
    Blog {
        /// Post title
        title: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve { port } => commands::serve(&cli.config, port).await,
        Commands::Wiki { title } => commands::new_entry(&cli.config, Collection::Wiki, &title),
        Commands::Blog { title } => commands::new_entry(&cli.config, Collection::Blog, &title),
    }
}
