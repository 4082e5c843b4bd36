//! The set of record shapes the migration knows how to build.

use crate::{
    core::value::FieldValue,
    error::{RecordError, RegistryError},
    records::{
        self, FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork, Record, row::RowData,
    },
    schema::TableSchema,
};
use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Genre,
    Person,
    FilmWork,
    GenreFilmWork,
    PersonFilmWork,
}

impl RecordKind {
    /// Every kind, parents before the link tables that reference them.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Genre,
        RecordKind::Person,
        RecordKind::FilmWork,
        RecordKind::GenreFilmWork,
        RecordKind::PersonFilmWork,
    ];

    pub fn table(&self) -> &'static str {
        self.schema().table
    }

    pub fn schema(&self) -> &'static TableSchema {
        match self {
            RecordKind::Genre => Genre::schema(),
            RecordKind::Person => Person::schema(),
            RecordKind::FilmWork => FilmWork::schema(),
            RecordKind::GenreFilmWork => GenreFilmWork::schema(),
            RecordKind::PersonFilmWork => PersonFilmWork::schema(),
        }
    }

    /// Kinds whose rows must exist before rows of this kind are written.
    pub fn depends_on(&self) -> &'static [RecordKind] {
        match self {
            RecordKind::Genre | RecordKind::Person | RecordKind::FilmWork => &[],
            RecordKind::GenreFilmWork => &[RecordKind::FilmWork, RecordKind::Genre],
            RecordKind::PersonFilmWork => &[RecordKind::FilmWork, RecordKind::Person],
        }
    }

    pub fn build(&self, row: &RowData) -> Result<AnyRecord, RecordError> {
        Ok(match self {
            RecordKind::Genre => AnyRecord::Genre(records::build(row)?),
            RecordKind::Person => AnyRecord::Person(records::build(row)?),
            RecordKind::FilmWork => AnyRecord::FilmWork(records::build(row)?),
            RecordKind::GenreFilmWork => AnyRecord::GenreFilmWork(records::build(row)?),
            RecordKind::PersonFilmWork => AnyRecord::PersonFilmWork(records::build(row)?),
        })
    }
}

impl FromStr for RecordKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| RegistryError::UnknownTable(s.to_string()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A record of any registered shape.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyRecord {
    Genre(Genre),
    Person(Person),
    FilmWork(FilmWork),
    GenreFilmWork(GenreFilmWork),
    PersonFilmWork(PersonFilmWork),
}

impl AnyRecord {
    pub fn into_fields(self) -> Vec<FieldValue> {
        match self {
            AnyRecord::Genre(r) => r.into_fields(),
            AnyRecord::Person(r) => r.into_fields(),
            AnyRecord::FilmWork(r) => r.into_fields(),
            AnyRecord::GenreFilmWork(r) => r.into_fields(),
            AnyRecord::PersonFilmWork(r) => r.into_fields(),
        }
    }
}

/// Maps table names to record kinds. Schemas are validated on registration.
#[derive(Debug, Default)]
pub struct Registry {
    kinds: HashMap<&'static str, RecordKind>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the five catalogue tables.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        for kind in RecordKind::ALL {
            registry.register(kind)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, kind: RecordKind) -> Result<(), RegistryError> {
        kind.schema().validate()?;
        let table = kind.table();
        if self.kinds.contains_key(table) {
            return Err(RegistryError::DuplicateTable(table.to_string()));
        }
        self.kinds.insert(table, kind);
        Ok(())
    }

    pub fn resolve(&self, table: &str) -> Result<RecordKind, RegistryError> {
        self.kinds
            .get(table)
            .copied()
            .ok_or_else(|| RegistryError::UnknownTable(table.to_string()))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
