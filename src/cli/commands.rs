use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vecstore", about = "Build and query persisted vector indexes")]
pub struct Cli {
    /// Index name (defaults to VECSTORE_INDEX_NAME or openai-ada-fsdl)
    #[arg(long, global = true)]
    pub index: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild an index from a JSON file
    Build {
        /// JSON array of {"text": "...", "metadata": {...}}
        file: PathBuf,
    },
    /// Append documents to an existing index
    Add {
        /// JSON array of {"text": "...", "metadata": {...}}
        file: PathBuf,
    },
    /// Similarity search
    Search {
        query: String,
        #[arg(long, default_value = "4")]
        limit: usize,
        /// JSON object; only documents whose metadata contains every pair match
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show index name, model, dimension and document count
    Info,
}
