//! PostgreSQL dialect.

use crate::dialect::{DataTypeFn, Dialect};
use crate::error::StorqResult;
use crate::mapping::PropertyMapping;

pub struct PostgresDialect;

fn integer(_mapping: &PropertyMapping) -> String {
    "integer".to_string()
}

fn bigint(_mapping: &PropertyMapping) -> String {
    "bigint".to_string()
}

fn smallint(_mapping: &PropertyMapping) -> String {
    "smallint".to_string()
}

fn double_precision(mapping: &PropertyMapping) -> String {
    match (mapping.precision, mapping.scale) {
        (Some(precision), Some(scale)) => format!("numeric({}, {})", precision, scale),
        (Some(precision), None) => format!("numeric({})", precision),
        (None, _) => "double precision".to_string(),
    }
}

fn character(mapping: &PropertyMapping) -> String {
    match mapping.length {
        Some(length) => format!("character({})", length),
        None => "character".to_string(),
    }
}

fn varchar(mapping: &PropertyMapping) -> String {
    match mapping.length {
        Some(length) => format!("varchar({})", length),
        None => "text".to_string(),
    }
}

fn boolean(_mapping: &PropertyMapping) -> String {
    "boolean".to_string()
}

fn date(_mapping: &PropertyMapping) -> String {
    "date".to_string()
}

fn time(_mapping: &PropertyMapping) -> String {
    "time".to_string()
}

fn timestamp(_mapping: &PropertyMapping) -> String {
    "timestamp".to_string()
}

fn bytea(_mapping: &PropertyMapping) -> String {
    "bytea".to_string()
}

fn text(_mapping: &PropertyMapping) -> String {
    "text".to_string()
}

const DATA_TYPES: &[(&str, DataTypeFn)] = &[
    ("integer", integer),
    ("short", smallint),
    ("long", bigint),
    ("float", double_precision),
    ("double", double_precision),
    ("character", character),
    ("string", varchar),
    ("byte", smallint),
    ("boolean", boolean),
    ("date", date),
    ("time", time),
    ("timestamp", timestamp),
    ("binary", bytea),
    ("text", text),
];

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn data_types(&self) -> &'static [(&'static str, DataTypeFn)] {
        DATA_TYPES
    }

    fn has_sequence_support(&self) -> bool {
        true
    }

    fn next_sequence_value_sql(&self, name: &str) -> StorqResult<String> {
        Ok(format!("SELECT nextval('{}')", name))
    }

    fn add_sql_limit(&self, sql: String, limit: u64) -> StorqResult<String> {
        Ok(format!("{} LIMIT {}", sql, limit))
    }

    fn add_sql_offset(&self, sql: String, offset: u64) -> StorqResult<String> {
        Ok(format!("{} OFFSET {}", sql, offset))
    }

    fn add_sql_range(&self, sql: String, offset: u64, limit: u64) -> StorqResult<String> {
        Ok(format!("{} LIMIT {} OFFSET {}", sql, limit, offset))
    }
}
