//! MySQL dialect.

use crate::dialect::{DataTypeFn, Dialect};
use crate::error::StorqResult;
use crate::mapping::PropertyMapping;

pub struct MysqlDialect;

fn integer(_mapping: &PropertyMapping) -> String {
    "integer".to_string()
}

fn bigint(_mapping: &PropertyMapping) -> String {
    "bigint".to_string()
}

fn smallint(_mapping: &PropertyMapping) -> String {
    "smallint".to_string()
}

fn double(mapping: &PropertyMapping) -> String {
    match (mapping.precision, mapping.scale) {
        (Some(precision), Some(scale)) => format!("double({}, {})", precision, scale),
        (Some(precision), None) => format!("double({})", precision),
        (None, _) => "double".to_string(),
    }
}

fn character(mapping: &PropertyMapping) -> String {
    match mapping.length {
        Some(length) => format!("char({})", length),
        None => "char".to_string(),
    }
}

fn varchar(mapping: &PropertyMapping) -> String {
    format!("varchar({})", mapping.length.unwrap_or(4000))
}

fn tinyint(_mapping: &PropertyMapping) -> String {
    "tinyint".to_string()
}

fn bit(_mapping: &PropertyMapping) -> String {
    "bit".to_string()
}

fn date(_mapping: &PropertyMapping) -> String {
    "date".to_string()
}

fn time(_mapping: &PropertyMapping) -> String {
    "time".to_string()
}

fn datetime(_mapping: &PropertyMapping) -> String {
    "datetime".to_string()
}

fn longblob(_mapping: &PropertyMapping) -> String {
    "longblob".to_string()
}

fn longtext(_mapping: &PropertyMapping) -> String {
    "longtext".to_string()
}

const DATA_TYPES: &[(&str, DataTypeFn)] = &[
    ("integer", integer),
    ("short", smallint),
    ("long", bigint),
    ("float", double),
    ("double", double),
    ("character", character),
    ("string", varchar),
    ("byte", tinyint),
    ("boolean", bit),
    ("date", date),
    ("time", time),
    ("timestamp", datetime),
    ("binary", longblob),
    ("text", longtext),
];

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn open_quote(&self) -> char {
        '`'
    }

    fn close_quote(&self) -> char {
        '`'
    }

    fn data_types(&self) -> &'static [(&'static str, DataTypeFn)] {
        DATA_TYPES
    }

    fn engine_type(&self) -> Option<&'static str> {
        Some("InnoDB")
    }

    fn add_sql_limit(&self, sql: String, limit: u64) -> StorqResult<String> {
        Ok(format!("{} LIMIT {}", sql, limit))
    }

    fn add_sql_offset(&self, sql: String, offset: u64) -> StorqResult<String> {
        // MySQL has no standalone OFFSET; the manual's recipe is a huge limit.
        Ok(format!("{} LIMIT {}, 18446744073709551615", sql, offset))
    }

    fn add_sql_range(&self, sql: String, offset: u64, limit: u64) -> StorqResult<String> {
        Ok(format!("{} LIMIT {}, {}", sql, offset, limit))
    }
}
