use persistence::{JsonFileBackend, PersistenceConfig, RestBackend, UpsertBackend};
use std::path::PathBuf;

/// Backend the standings are saved through.
///
/// REST credentials are checked here, so callers build the backend before
/// scraping anything.
pub fn save_backend(
    local_dir: Option<PathBuf>,
    config: &PersistenceConfig,
) -> persistence::Result<Box<dyn UpsertBackend>> {
    match local_dir {
        Some(dir) => Ok(Box::new(JsonFileBackend::new(dir))),
        None => Ok(Box::new(RestBackend::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::PersistenceError;

    #[test]
    fn test_missing_credentials_rejected() {
        let config = PersistenceConfig::from_lookup(|name| {
            (name == "NEXT_PUBLIC_SUPABASE_URL").then(|| "https://example.supabase.co".to_string())
        });

        let result = save_backend(None, &config);
        assert!(matches!(result, Err(PersistenceError::Config(_))));
    }

    #[test]
    fn test_backend_selection() {
        let config = PersistenceConfig::rest("https://example.supabase.co", "service-key");
        assert_eq!(save_backend(None, &config).unwrap().name(), "rest");

        let local = save_backend(Some(PathBuf::from("./data/tables")), &PersistenceConfig::default()).unwrap();
        assert_eq!(local.name(), "json-file");
    }
}
