use crate::{
    error::MigrationError,
    execution::{factory, pipeline::Pipeline, summary::RunSummary},
};
use engine_config::settings::EtlSettings;
use engine_core::observer::EtlObserver;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one full migration.
///
/// Both stores are opened before any table is touched. The source is closed
/// and the destination client dropped on every path, then the pipeline's
/// result is returned.
pub async fn run(
    settings: &EtlSettings,
    observer: Arc<dyn EtlObserver>,
) -> Result<RunSummary, MigrationError> {
    let result = run_inner(settings, observer.clone()).await;
    observer.flush();
    result
}

async fn run_inner(
    settings: &EtlSettings,
    observer: Arc<dyn EtlObserver>,
) -> Result<RunSummary, MigrationError> {
    let mut source = factory::open_source(settings).await?;
    let mut destination = match factory::open_destination(settings).await {
        Ok(destination) => destination,
        Err(err) => {
            if let Err(close_err) = source.close().await {
                warn!(error = %close_err, "Failed to close SQLite connection");
            }
            return Err(err);
        }
    };
    info!(
        sqlite = %settings.sqlite.path.display(),
        schema = %settings.postgres.schema,
        "Connected to both stores"
    );

    let pipeline = Pipeline::new(settings, observer);
    let result = pipeline.execute(&mut source, &mut destination).await;

    if let Err(close_err) = source.close().await {
        warn!(error = %close_err, "Failed to close SQLite connection");
    }
    drop(destination);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::sql::base::error::ConnectorError;
    use engine_config::{env::EnvManager, settings};
    use engine_core::observer::{EtlEvent, MemoryObserver};
    use tracing_test::traced_test;

    fn settings_for(path: &str) -> EtlSettings {
        EtlSettings::from_env(&EnvManager::from_pairs([
            (settings::SQLITE_DB, path),
            (settings::POSTGRES_NAME, "movies_database"),
            (settings::POSTGRES_USER, "app"),
            (settings::POSTGRES_PASSWORD, "123qwe"),
        ]))
        .unwrap()
    }

    #[traced_test]
    #[tokio::test]
    async fn test_missing_sqlite_file_fails_before_any_table() {
        let observer = Arc::new(MemoryObserver::new());
        let err = run(&settings_for("/nonexistent/db.sqlite"), observer.clone())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MigrationError::Connectivity(ConnectorError::InvalidConfig(_))
        ));
        assert!(
            !observer
                .events()
                .iter()
                .any(|e| matches!(e, EtlEvent::TableStarted { .. }))
        );
        assert!(observer.was_flushed());
    }
}
