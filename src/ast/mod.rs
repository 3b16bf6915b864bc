//! Abstract syntax tree for relational queries.
//!
//! The node taxonomy is dialect-neutral: trees describe what a query means,
//! never how any particular database spells it. Nodes are immutable after
//! construction and safe to share across concurrent renderings.

pub mod clauses;
pub mod conditions;
pub mod idents;
pub mod select;
pub mod values;
pub mod visitor;

pub use clauses::{
    FromClause, FromExpression, GroupByClause, HavingClause, InnerJoinClause, JoinClause, OrderBy,
    OrderByClause, OuterJoinClause, OuterJoinSide, RangeClause, SelectClause, SelectEntity,
    SelectExpression, Selectable, WhereClause,
};
pub use conditions::{
    BetweenCondition, CompareOp, Comparison, Condition, ConditionList, ConditionNode, ConditionRhs,
    ExistsCondition, Expression, InCondition, IsNullCondition, LikeCondition, NotCondition, Term,
};
pub use idents::{AliasEntity, AliasIdent, Entity, Ident, ID_PROPERTY};
pub use select::{Aggregation, AggregationKind, AggregationTarget, Select};
pub use values::{Value, ValueType};
pub use visitor::Visitor;
