use vecstore::config::EmbeddingConfig;
use vecstore::domain::error::DomainError;
use vecstore::domain::values::provider_kind::ProviderKind;
use vecstore::VecStore;

#[test]
fn test_default_engine_is_ada_002() {
    let engine = VecStore::get_embedding_engine(&EmbeddingConfig::default().with_api_key("sk-test")).unwrap();
    assert_eq!(engine.model(), "text-embedding-ada-002");
    assert_eq!(engine.dimension(), 1536);
}

#[test]
fn test_options_are_passed_through() {
    let config = EmbeddingConfig::new("text-embedding-3-large")
        .with_api_key("sk-test")
        .with_option("dimensions", 256)
        .with_option("user", "indexer");
    let engine = VecStore::get_embedding_engine(&config).unwrap();
    assert_eq!(engine.dimension(), 256);
}

#[test]
fn test_invalid_configurations_are_errors() {
    let cases = [
        EmbeddingConfig::default().with_api_key(""),
        EmbeddingConfig::default().with_api_key("sk-test").with_base_url("not a url"),
        EmbeddingConfig::default().with_api_key("sk-test").with_option("model", "other"),
        EmbeddingConfig::new("").with_api_key("sk-test"),
        EmbeddingConfig::default().with_api_key("sk-test").with_timeout_secs(0),
    ];
    for config in cases {
        let err = VecStore::get_embedding_engine(&config).err().unwrap();
        assert!(matches!(err, DomainError::Config(_)), "unexpected error for {config:?}: {err}");
    }
}

#[test]
fn test_voyage_engine() {
    let config = EmbeddingConfig::new("voyage-3")
        .with_provider(ProviderKind::Voyage)
        .with_api_key("pa-test");
    let engine = VecStore::get_embedding_engine(&config).unwrap();
    assert_eq!(engine.model(), "voyage-3");
    assert_eq!(engine.dimension(), 1024);

    let bad = config.with_option("input_type", "query");
    assert!(VecStore::get_embedding_engine(&bad).is_err());
}

#[test]
fn test_provider_names_parse() {
    assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
    assert_eq!("Voyage".parse::<ProviderKind>().unwrap(), ProviderKind::Voyage);
    assert!("cohere".parse::<ProviderKind>().is_err());
}
