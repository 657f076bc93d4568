use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "storyrag")]
#[command(about = "Index story files and extract structured character info")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute embeddings for all stories and store them in the vector index
    ComputeEmbeddings {
        /// Directory containing story files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Directory where the vector index is stored
        #[arg(long, default_value = "vector_store")]
        persist_dir: PathBuf,
    },
    /// Get structured info for a given character
    GetCharacterInfo {
        /// Name of the character to search for
        name: String,
        /// Directory where the vector index is stored
        #[arg(long, default_value = "vector_store")]
        persist_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ComputeEmbeddings {
            data_dir,
            persist_dir,
        } => commands::compute_embeddings(&data_dir, &persist_dir).await,
        Commands::GetCharacterInfo { name, persist_dir } => {
            commands::get_character_info(&name, &persist_dir).await
        }
    }
}
