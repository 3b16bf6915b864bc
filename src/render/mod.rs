//! Rendering entry points.
//!
//! Rendering either fully succeeds and returns one complete statement plus
//! its parameter list, or fails; no partial SQL ever escapes.

pub mod sql;

#[cfg(test)]
mod tests;

use log::debug;

use crate::ast::Select;
use crate::dialect::Dialect;
use crate::error::StorqResult;
use crate::mapping::MappingRegistry;
pub use sql::SqlRenderer;

/// A rendered statement: the SQL text and the parameter placeholder names
/// in positional binding order (one entry per parameter node visited, in
/// traversal order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery {
    pub sql: String,
    pub parameters: Vec<String>,
}

/// Render a select tree with the given dialect and mapping store.
///
/// Constructs a fresh renderer per call. Trees and dialects are freely
/// shareable, renderers are not.
pub fn render_select(
    select: &Select,
    dialect: &dyn Dialect,
    registry: &MappingRegistry,
) -> StorqResult<RenderedQuery> {
    let mut renderer = SqlRenderer::new(dialect, registry);
    let sql = select.accept(&mut renderer)?;
    debug!("Rendered query: {}", sql);
    Ok(RenderedQuery {
        sql,
        parameters: renderer.into_parameters(),
    })
}
