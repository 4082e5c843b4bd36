#![allow(dead_code)]

use connectors::sql::{postgres::utils::connect_client, sqlite::adapter::SqliteAdapter};
use engine_config::{env::EnvManager, settings, settings::EtlSettings};
use sqlx::{ConnectOptions, Connection, SqliteConnection, sqlite::SqliteConnectOptions};
use std::path::Path;
use tokio_postgres::Client;

pub mod integration;
pub mod pipeline;
pub mod utils;

// Test database settings
const TEST_PG_HOST: &str = "localhost";
const TEST_PG_PORT: &str = "5432";
const TEST_PG_NAME: &str = "testdb";
const TEST_PG_USER: &str = "user";
const TEST_PG_PASSWORD: &str = "password";
const TEST_PG_SCHEMA: &str = "content";

/// The SQLite layout of the catalogue dump. Column order differs from the
/// record descriptors on purpose.
pub const SQLITE_DDL: &str = r#"
    CREATE TABLE genre (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        created_at timestamp with time zone,
        updated_at timestamp with time zone
    );
    CREATE TABLE person (
        id TEXT PRIMARY KEY,
        full_name TEXT NOT NULL,
        created_at timestamp with time zone,
        updated_at timestamp with time zone
    );
    CREATE TABLE film_work (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        creation_date DATE,
        file_path TEXT,
        rating FLOAT,
        type TEXT NOT NULL,
        created_at timestamp with time zone,
        updated_at timestamp with time zone
    );
    CREATE TABLE genre_film_work (
        id TEXT PRIMARY KEY,
        film_work_id TEXT NOT NULL,
        genre_id TEXT NOT NULL,
        created_at timestamp with time zone
    );
    CREATE TABLE person_film_work (
        id TEXT PRIMARY KEY,
        film_work_id TEXT NOT NULL,
        person_id TEXT NOT NULL,
        role TEXT NOT NULL,
        created_at timestamp with time zone
    );
"#;

/// Sample catalogue: 3 genres, 2 people, 3 film works and their links.
pub const SQLITE_SEED: &str = r#"
    INSERT INTO genre VALUES
        ('3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff', 'Action', NULL, '2021-06-16 20:14:09.221838+00', '2021-06-16 20:14:09.221855+00'),
        ('120a21cf-9097-479e-904a-13dd7198c1dd', 'Adventure', 'Quests and journeys', '2021-06-16 20:14:09.222016+00', '2021-06-16 20:14:09.222028+00'),
        ('b92ef010-5e4c-4fd0-99d6-41b6456272cd', 'Fantasy', NULL, NULL, NULL);
    INSERT INTO person VALUES
        ('26e83050-29ef-4163-a99d-b546cac208f8', 'Mark Hamill', '2021-06-16 20:14:09.309735+00', '2021-06-16 20:14:09.309751+00'),
        ('5b4bf1bc-3397-4e83-9b17-8b10c6544ed1', 'Harrison Ford', NULL, NULL);
    INSERT INTO film_work VALUES
        ('3d825f60-9fff-4dfe-b294-1a45fa1e115d', 'Star Wars: Episode IV - A New Hope', 'The Imperial Forces hold Princess Leia hostage.', NULL, NULL, 8.6, 'movie', '2021-06-16 20:14:09.221838+00', '2021-06-16 20:14:09.221855+00'),
        ('0312ed51-8833-413f-bff5-0e139c11264a', 'Star Wars: Episode V - The Empire Strikes Back', NULL, '1980-05-21', '/films/empire.mp4', 8, 'movie', NULL, NULL),
        ('025c58cd-1b7e-43be-9ffb-8571a613579b', 'Star Wars: The Clone Wars', NULL, NULL, NULL, NULL, 'tv_series', NULL, NULL);
    INSERT INTO genre_film_work VALUES
        ('3b2d3d6e-6b0e-4ee5-a3e4-6b6a5d7f35a1', '3d825f60-9fff-4dfe-b294-1a45fa1e115d', '3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff', '2021-06-16 20:14:09.221838+00'),
        ('8f3f4b1c-2f1e-4e0e-9a2f-6c2d7e6c9b11', '3d825f60-9fff-4dfe-b294-1a45fa1e115d', '120a21cf-9097-479e-904a-13dd7198c1dd', NULL),
        ('c8e0e2f4-9f6b-4f0b-8a5e-2e0b7e1f4d22', '0312ed51-8833-413f-bff5-0e139c11264a', 'b92ef010-5e4c-4fd0-99d6-41b6456272cd', NULL);
    INSERT INTO person_film_work VALUES
        ('d3c1f1a2-7e3b-4c5d-9a6f-1b2c3d4e5f60', '3d825f60-9fff-4dfe-b294-1a45fa1e115d', '26e83050-29ef-4163-a99d-b546cac208f8', 'actor', '2021-06-16 20:14:09.309735+00'),
        ('e4d2a2b3-8f4c-4d6e-8b7a-2c3d4e5f6a71', '0312ed51-8833-413f-bff5-0e139c11264a', '5b4bf1bc-3397-4e83-9b17-8b10c6544ed1', 'actor', NULL);
"#;

/// The destination layout, as the admin application creates it.
pub const POSTGRES_DDL: &str = r#"
    CREATE TABLE content.genre (
        id uuid PRIMARY KEY,
        name VARCHAR(300) NOT NULL UNIQUE,
        description TEXT,
        created timestamp with time zone NOT NULL,
        modified timestamp with time zone NOT NULL
    );
    CREATE TABLE content.person (
        id uuid PRIMARY KEY,
        full_name VARCHAR(300) NOT NULL,
        created timestamp with time zone NOT NULL,
        modified timestamp with time zone NOT NULL
    );
    CREATE TABLE content.film_work (
        id uuid PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        creation_date DATE,
        rating DOUBLE PRECISION,
        type TEXT NOT NULL,
        created timestamp with time zone NOT NULL,
        modified timestamp with time zone NOT NULL
    );
    CREATE TABLE content.genre_film_work (
        id uuid PRIMARY KEY,
        genre_id uuid NOT NULL REFERENCES content.genre (id) ON DELETE CASCADE,
        film_work_id uuid NOT NULL REFERENCES content.film_work (id) ON DELETE CASCADE,
        created timestamp with time zone NOT NULL
    );
    CREATE TABLE content.person_film_work (
        id uuid PRIMARY KEY,
        person_id uuid NOT NULL REFERENCES content.person (id) ON DELETE CASCADE,
        film_work_id uuid NOT NULL REFERENCES content.film_work (id) ON DELETE CASCADE,
        role TEXT NOT NULL,
        created timestamp with time zone NOT NULL
    );
"#;

pub const TOTAL_SEED_ROWS: usize = 13;

/// An in-memory SQLite database holding the sample catalogue.
pub async fn seeded_sqlite() -> SqliteConnection {
    let mut conn = SqliteConnection::connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    seed(&mut conn).await;
    conn
}

pub async fn seeded_adapter() -> SqliteAdapter {
    SqliteAdapter::from_connection(seeded_sqlite().await)
}

/// Writes the sample catalogue to a SQLite file at `path`.
pub async fn seeded_sqlite_file(path: &Path) {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .expect("create sqlite file");
    seed(&mut conn).await;
    conn.close().await.expect("close sqlite file");
}

async fn seed(conn: &mut SqliteConnection) {
    sqlx::raw_sql(SQLITE_DDL)
        .execute(&mut *conn)
        .await
        .expect("create sqlite tables");
    sqlx::raw_sql(SQLITE_SEED)
        .execute(&mut *conn)
        .await
        .expect("seed sqlite tables");
}

/// Settings for the local test Postgres and the given SQLite file.
pub fn test_settings(sqlite_db: &Path) -> EtlSettings {
    let sqlite_db = sqlite_db.display().to_string();
    let env = EnvManager::from_pairs([
        (settings::SQLITE_DB, sqlite_db.as_str()),
        (settings::POSTGRES_HOST, TEST_PG_HOST),
        (settings::POSTGRES_PORT, TEST_PG_PORT),
        (settings::POSTGRES_NAME, TEST_PG_NAME),
        (settings::POSTGRES_USER, TEST_PG_USER),
        (settings::POSTGRES_PASSWORD, TEST_PG_PASSWORD),
        (settings::POSTGRES_SCHEMA, TEST_PG_SCHEMA),
        (settings::BATCH_SIZE, "2"),
    ]);
    EtlSettings::from_env(&env).expect("test settings")
}

async fn pg_client(settings: &EtlSettings) -> Client {
    connect_client(settings.postgres.to_config())
        .await
        .expect("connect postgres")
}

/// Drop & recreate the `content` schema in Postgres with empty catalogue tables.
async fn reset_content_schema(settings: &EtlSettings) -> Client {
    let client = pg_client(settings).await;
    client
        .batch_execute("DROP SCHEMA IF EXISTS content CASCADE; CREATE SCHEMA content;")
        .await
        .expect("reset postgres schema");
    client
        .batch_execute(POSTGRES_DDL)
        .await
        .expect("create postgres tables");
    client
}
