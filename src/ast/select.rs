//! The select root node and aggregations.

use serde::{Deserialize, Serialize};

use crate::ast::clauses::{
    FromClause, GroupByClause, HavingClause, JoinClause, OrderByClause, RangeClause, SelectClause,
    WhereClause,
};
use crate::ast::idents::{AliasIdent, Ident};
use crate::ast::visitor::Visitor;
use crate::error::StorqResult;
use crate::mapping::PropertyMapping;

/// Aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationKind {
    Max,
    Min,
    Sum,
    Count,
}

impl AggregationKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            AggregationKind::Max => "MAX",
            AggregationKind::Min => "MIN",
            AggregationKind::Sum => "SUM",
            AggregationKind::Count => "COUNT",
        }
    }
}

impl std::fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// The column reference an aggregation applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregationTarget {
    Ident(Ident),
    AliasIdent(AliasIdent),
}

impl AggregationTarget {
    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        match self {
            AggregationTarget::Ident(ident) => ident.property_mapping(visitor),
            AggregationTarget::AliasIdent(ident) => ident.property_mapping(visitor),
        }
    }

    pub fn result_property_name(&self) -> String {
        match self {
            AggregationTarget::Ident(ident) => ident.result_property_name(),
            AggregationTarget::AliasIdent(ident) => ident.result_property_name(),
        }
    }
}

/// An aggregation over a column reference (`COUNT(a.id)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub kind: AggregationKind,
    pub value: AggregationTarget,
}

impl Aggregation {
    pub fn new(kind: AggregationKind, value: AggregationTarget) -> Self {
        Self { kind, value }
    }

    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        self.value.property_mapping(visitor)
    }

    /// Result name: `"<KIND>_<inner result name>"`.
    pub fn result_property_name(&self) -> String {
        format!("{}_{}", self.kind, self.value.result_property_name())
    }
}

/// The root node of a query tree.
///
/// Absent clauses are `None` and skipped entirely during rendering; they
/// never show up as empty syntax. Trees are immutable once built: rebuild
/// instead of editing in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub select: SelectClause,
    pub from: FromClause,
    pub join: Option<JoinClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<HavingClause>,
    pub order_by: Option<OrderByClause>,
    pub range: Option<RangeClause>,
    pub is_distinct: bool,
}

impl Select {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        select: SelectClause,
        from: FromClause,
        join: Option<JoinClause>,
        where_clause: Option<WhereClause>,
        group_by: Option<GroupByClause>,
        having: Option<HavingClause>,
        order_by: Option<OrderByClause>,
        range: Option<RangeClause>,
        is_distinct: bool,
    ) -> Self {
        Self {
            select,
            from,
            join,
            where_clause,
            group_by,
            having,
            order_by,
            range,
            is_distinct,
        }
    }

    /// A minimal tree: select + from, everything else absent.
    pub fn simple(select: SelectClause, from: FromClause) -> Self {
        Self::new(select, from, None, None, None, None, None, None, false)
    }

    /// Forwards to the select clause.
    pub fn is_entity_query(&self) -> bool {
        self.select.is_entity_query()
    }
}
