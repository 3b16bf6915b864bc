//! Dialect-neutral query AST with SQL rendering.
//!
//! Build a query as a typed tree, then render it against any configured
//! dialect. The tree never changes, the dialect does.
//!
//! ```
//! use storq::ast::*;
//! use storq::dialect::PostgresDialect;
//! use storq::mapping::{EntityMapping, MappingRegistry, PropertyMapping};
//! use storq::render::render_select;
//!
//! let mut registry = MappingRegistry::new();
//! registry.register(EntityMapping::new(
//!     "Author",
//!     "T_AUTHOR",
//!     PropertyMapping::new("AUT_ID", "long"),
//! ));
//!
//! let select = Select::simple(
//!     SelectClause::new(vec![SelectExpression::new(
//!         Selectable::Entity(SelectEntity::new("Author", false)),
//!         None,
//!     )]),
//!     FromClause::new(vec![FromExpression::new(Entity::new("Author"), None)]),
//! );
//!
//! let rendered = render_select(&select, &PostgresDialect, &registry).unwrap();
//! assert_eq!(rendered.sql, "SELECT \"T_AUTHOR\".\"AUT_ID\" FROM \"T_AUTHOR\"");
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod mapping;
pub mod render;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::dialect::{Dialect, DialectKind, MysqlDialect, OracleDialect, PostgresDialect};
    pub use crate::error::*;
    pub use crate::mapping::{EntityMapping, MappingRegistry, PropertyMapping};
    pub use crate::render::{render_select, RenderedQuery, SqlRenderer};
}
