use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI-compatible `/v1/embeddings` endpoint
    #[default]
    OpenAi,
    /// Voyage AI embeddings
    Voyage,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Voyage => write!(f, "voyage"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "voyage" => Ok(Self::Voyage),
            _ => Err(format!(
                "Invalid embedding provider: '{}'. Use 'openai' or 'voyage'",
                s
            )),
        }
    }
}
