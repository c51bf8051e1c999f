use clap::Parser;
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};
use vecstore::cli::commands::{Cli, Commands};
use vecstore::config::EmbeddingConfig;
use vecstore::domain::entities::document::Metadata;
use vecstore::VecStore;

#[derive(Deserialize)]
struct DocumentInput {
    text: String,
    #[serde(default)]
    metadata: Metadata,
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vecstore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = match VecStore::new() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error initializing vecstore: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(store, cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(store: VecStore, cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let index_name = cli.index.unwrap_or_else(|| store.config().index_name.clone());
    let engine = VecStore::get_embedding_engine(&EmbeddingConfig::from_env()?)?;

    match cli.command {
        Commands::Build { file } => {
            let (texts, metadatas) = read_documents(&file)?;
            let index = store.create_vector_index(&index_name, engine, &texts, &metadatas).await?;
            println!("{}", serde_json::to_string_pretty(index.info())?);
        }
        Commands::Add { file } => {
            let (texts, metadatas) = read_documents(&file)?;
            let index = store.connect_to_vector_index(&index_name, engine)?;
            let ids = index.add_texts(&texts, &metadatas).await?;
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        Commands::Search { query, limit, filter } => {
            let index = store.connect_to_vector_index(&index_name, engine)?;
            let results = match filter {
                Some(filter) => {
                    let filter: Metadata = serde_json::from_str(&filter)?;
                    index.similarity_search_with_filter(&query, limit, &filter).await?
                }
                None => index.similarity_search(&query, limit).await?,
            };
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Info => {
            let index = store.connect_to_vector_index(&index_name, engine)?;
            let info = serde_json::json!({
                "info": index.info(),
                "documents": index.len()?,
                "location": store.config().vector_dir,
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }
    Ok(())
}

fn read_documents(path: &Path) -> Result<(Vec<String>, Vec<Metadata>), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
    let inputs: Vec<DocumentInput> = serde_json::from_str(&raw)?;
    Ok(inputs.into_iter().map(|d| (d.text, d.metadata)).unzip())
}
