//! Dialect contract: quoting, column DDL, pagination, sequences.
//!
//! A dialect is a stateless strategy object created once at process
//! configuration and shared across all renderings. Everything a dialect
//! cannot express fails loudly through the default trait methods; there is
//! no silent fallback behavior.

pub mod mysql;
pub mod oracle;
pub mod postgres;

pub use mysql::MysqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;

use crate::error::{StorqError, StorqResult};
use crate::mapping::PropertyMapping;

/// One column-DDL rule: descriptor in, column SQL out. Pure and stateless.
pub type DataTypeFn = fn(&PropertyMapping) -> String;

/// The dialect contract.
///
/// `column_sql` is the single seam through which all column DDL flows; a
/// descriptor whose type key is absent from `data_types()` is a
/// configuration error, never a default. Pagination and sequence hooks are
/// opt-in per dialect: the defaults fail so an unsupported query shape
/// surfaces before any SQL executes.
pub trait Dialect: Send + Sync {
    /// Dialect name used in error messages.
    fn name(&self) -> &'static str;

    /// Opening quote character for identifiers.
    fn open_quote(&self) -> char {
        '"'
    }

    /// Closing quote character for identifiers.
    fn close_quote(&self) -> char {
        '"'
    }

    /// The per-type column-DDL dispatch table.
    fn data_types(&self) -> &'static [(&'static str, DataTypeFn)];

    /// Enclose an identifier in this dialect's quote characters. Every
    /// identifier (table, column, alias) must pass through here before
    /// concatenation into SQL text.
    fn quote(&self, name: &str) -> String {
        format!("{}{}{}", self.open_quote(), name, self.close_quote())
    }

    /// Quote an identifier under a quoted prefix: `"prefix"."name"`.
    fn quote_prefixed(&self, name: &str, prefix: &str) -> String {
        format!("{}.{}", self.quote(prefix), self.quote(name))
    }

    /// Produce the column DDL for a property descriptor by dispatching on
    /// its data type.
    fn column_sql(&self, mapping: &PropertyMapping) -> StorqResult<String> {
        self.data_types()
            .iter()
            .find(|(key, _)| *key == mapping.data_type)
            .map(|(_, data_type)| data_type(mapping))
            .ok_or_else(|| StorqError::unknown_data_type(&mapping.data_type))
    }

    /// Storage-engine hint. Only MySQL needs one.
    fn engine_type(&self) -> Option<&'static str> {
        None
    }

    /// True if the underlying database supports sequences.
    fn has_sequence_support(&self) -> bool {
        false
    }

    /// The statement retrieving the next value of a sequence.
    fn next_sequence_value_sql(&self, _name: &str) -> StorqResult<String> {
        Err(StorqError::unsupported(self.name(), "sequences"))
    }

    /// Extend a statement with a limit restriction.
    fn add_sql_limit(&self, _sql: String, _limit: u64) -> StorqResult<String> {
        Err(StorqError::unsupported(self.name(), "limit pagination"))
    }

    /// Extend a statement with an offset restriction.
    fn add_sql_offset(&self, _sql: String, _offset: u64) -> StorqResult<String> {
        Err(StorqError::unsupported(self.name(), "offset pagination"))
    }

    /// Extend a statement with an offset/limit range restriction.
    fn add_sql_range(&self, _sql: String, _offset: u64, _limit: u64) -> StorqResult<String> {
        Err(StorqError::unsupported(self.name(), "range pagination"))
    }

    /// The default schema, if the dialect is configured with one.
    fn default_schema(&self) -> Option<&str> {
        None
    }
}

/// Supported dialects, for process-wide configuration. Swapping the dialect
/// never requires touching already-built query trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectKind {
    Oracle,
    Postgres,
    Mysql,
}

impl DialectKind {
    /// The shared dialect instance for this kind.
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Oracle => &OracleDialect,
            DialectKind::Postgres => &PostgresDialect,
            DialectKind::Mysql => &MysqlDialect,
        }
    }
}
