//! Oracle dialect.

use crate::dialect::{DataTypeFn, Dialect};
use crate::error::StorqResult;
use crate::mapping::PropertyMapping;

pub struct OracleDialect;

fn number(mapping: &PropertyMapping) -> String {
    match mapping.length {
        Some(length) => format!("number({}, 0)", length),
        None => "number".to_string(),
    }
}

fn binary_double(mapping: &PropertyMapping) -> String {
    // Scale only matters together with precision; a bare scale is ignored.
    match (mapping.precision, mapping.scale) {
        (Some(precision), Some(scale)) => format!("number({}, {})", precision, scale),
        (Some(precision), None) => format!("number({})", precision),
        (None, _) => "binary_double".to_string(),
    }
}

fn character(mapping: &PropertyMapping) -> String {
    match mapping.length {
        Some(length) => format!("char({} char)", length),
        None => "char".to_string(),
    }
}

fn varchar2(mapping: &PropertyMapping) -> String {
    format!("varchar2({} char)", mapping.length.unwrap_or(4000))
}

fn byte(_mapping: &PropertyMapping) -> String {
    "number(3,0)".to_string()
}

fn boolean(_mapping: &PropertyMapping) -> String {
    "number(1,0)".to_string()
}

fn date(_mapping: &PropertyMapping) -> String {
    "date".to_string()
}

fn timestamp(_mapping: &PropertyMapping) -> String {
    "timestamp".to_string()
}

fn blob(_mapping: &PropertyMapping) -> String {
    "blob".to_string()
}

fn clob(_mapping: &PropertyMapping) -> String {
    "clob".to_string()
}

const DATA_TYPES: &[(&str, DataTypeFn)] = &[
    ("integer", number),
    ("short", number),
    ("long", number),
    ("float", binary_double),
    ("double", binary_double),
    ("character", character),
    ("string", varchar2),
    ("byte", byte),
    ("boolean", boolean),
    ("date", date),
    // Oracle has no separate time type.
    ("time", date),
    ("timestamp", timestamp),
    ("binary", blob),
    ("text", clob),
];

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn data_types(&self) -> &'static [(&'static str, DataTypeFn)] {
        DATA_TYPES
    }

    fn has_sequence_support(&self) -> bool {
        true
    }

    fn next_sequence_value_sql(&self, name: &str) -> StorqResult<String> {
        Ok(format!("SELECT {}.NEXTVAL FROM DUAL", self.quote(name)))
    }

    fn add_sql_limit(&self, sql: String, limit: u64) -> StorqResult<String> {
        Ok(format!("SELECT * FROM ({}) WHERE ROWNUM <= {}", sql, limit))
    }

    fn add_sql_offset(&self, sql: String, offset: u64) -> StorqResult<String> {
        Ok(format!(
            "SELECT * FROM (SELECT r.*, ROWNUM rnum FROM ({}) r) WHERE rnum > {}",
            sql, offset
        ))
    }

    fn add_sql_range(&self, sql: String, offset: u64, limit: u64) -> StorqResult<String> {
        Ok(format!(
            "SELECT * FROM (SELECT r.*, ROWNUM rnum FROM ({}) r WHERE ROWNUM <= {}) WHERE rnum > {}",
            sql,
            offset + limit,
            offset
        ))
    }
}
