use model::registry::RecordKind;
use serde::Serialize;

/// The fields compared between the two stores for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCheck {
    pub table: String,
    pub fields: Vec<String>,
}

impl TableCheck {
    pub fn new(table: &str, fields: &[&str]) -> Self {
        TableCheck {
            table: table.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Fields that survive a load unchanged. Timestamps are left out since
    /// they are renamed and may be defaulted on the way.
    pub fn standard(kind: RecordKind) -> Self {
        let fields: &[&str] = match kind {
            RecordKind::Genre => &["id", "name", "description"],
            RecordKind::Person => &["id", "full_name"],
            RecordKind::FilmWork => &[
                "id",
                "title",
                "type",
                "description",
                "creation_date",
                "rating",
            ],
            RecordKind::GenreFilmWork => &["id", "film_work_id", "genre_id"],
            RecordKind::PersonFilmWork => &["id", "film_work_id", "person_id", "role"],
        };
        TableCheck::new(kind.table(), fields)
    }

    pub fn for_tables(kinds: &[RecordKind]) -> Vec<TableCheck> {
        kinds.iter().copied().map(TableCheck::standard).collect()
    }
}
