use crate::error::MigrationError;
use connectors::sql::{
    postgres::{adapter::PgAdapter, destination::PgDestination, source::PgExtractor},
    sqlite::{adapter::SqliteAdapter, source::SqliteExtractor},
};
use engine_config::settings::EtlSettings;

pub async fn open_source(settings: &EtlSettings) -> Result<SqliteExtractor, MigrationError> {
    let adapter = SqliteAdapter::open(&settings.sqlite.path).await?;
    Ok(SqliteExtractor::new(adapter, settings.batch_size.get()))
}

pub async fn open_destination(settings: &EtlSettings) -> Result<PgDestination, MigrationError> {
    Ok(PgDestination::new(connect_postgres(settings).await?))
}

/// Opens the destination namespace for reading, as the verifier does.
pub async fn open_destination_reader(settings: &EtlSettings) -> Result<PgExtractor, MigrationError> {
    Ok(PgExtractor::new(
        connect_postgres(settings).await?,
        settings.batch_size.get(),
    ))
}

async fn connect_postgres(settings: &EtlSettings) -> Result<PgAdapter, MigrationError> {
    let adapter = PgAdapter::connect(settings.postgres.to_config(), &settings.postgres.schema).await?;
    Ok(adapter)
}
