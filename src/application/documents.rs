use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};

/// Texts and metadatas are paired by position, so both must be non-empty and equally long.
pub(crate) fn check_pairs(texts: &[String], metadatas: &[Metadata]) -> Result<(), DomainError> {
    if texts.is_empty() {
        return Err(DomainError::InvalidInput("No documents to index".into()));
    }
    if texts.len() != metadatas.len() {
        return Err(DomainError::InvalidInput(format!(
            "{} documents but {} metadata entries",
            texts.len(),
            metadatas.len()
        )));
    }
    Ok(())
}

pub(crate) async fn embed_documents(
    embedder: &dyn EmbeddingProvider,
    texts: &[String],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>, DomainError> {
    let mut vectors = Vec::with_capacity(texts.len());
    for chunk in texts.chunks(batch_size.max(1)) {
        let batch = embedder.embed(chunk, InputType::Document).await?;
        if batch.len() != chunk.len() {
            return Err(DomainError::Embedding(format!(
                "Requested {} embeddings, received {}",
                chunk.len(),
                batch.len()
            )));
        }
        vectors.extend(batch);
    }
    Ok(vectors)
}

/// Shared dimension of `vectors`; empty or ragged output is an embedding failure.
pub(crate) fn vector_dimension(vectors: &[Vec<f32>]) -> Result<usize, DomainError> {
    let dimension = vectors.first().map(Vec::len).unwrap_or(0);
    if dimension == 0 {
        return Err(DomainError::Embedding("Embedding engine returned empty vectors".into()));
    }
    if let Some(ragged) = vectors.iter().find(|v| v.len() != dimension) {
        return Err(DomainError::Embedding(format!(
            "Inconsistent embedding dimensions: {dimension} and {}",
            ragged.len()
        )));
    }
    Ok(dimension)
}
