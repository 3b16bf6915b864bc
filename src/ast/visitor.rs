//! The double-dispatch rendering protocol.
//!
//! A renderer implements one method per node variant; every method is
//! required, so an incomplete renderer fails to compile instead of failing
//! mid-traversal. Each node's `accept` performs the dispatch with an
//! exhaustive match.
//!
//! Methods take `&mut self` because a renderer accumulates per-render state
//! (the ordered parameter list); a visitor instance is scoped to exactly one
//! rendering pass. `entity_mapping` is the mapping-resolution hook: nodes
//! never hold mappings, they ask whichever visitor is currently rendering.

use crate::ast::clauses::{
    FromClause, FromExpression, GroupByClause, HavingClause, InnerJoinClause, JoinClause, OrderBy,
    OrderByClause, OuterJoinClause, RangeClause, SelectClause, SelectEntity, SelectExpression,
    Selectable, WhereClause,
};
use crate::ast::conditions::{
    BetweenCondition, Comparison, Condition, ConditionList, ConditionNode, ConditionRhs,
    ExistsCondition, Expression, InCondition, IsNullCondition, LikeCondition, NotCondition, Term,
};
use crate::ast::idents::{AliasEntity, AliasIdent, Entity, Ident};
use crate::ast::select::{Aggregation, AggregationTarget, Select};
use crate::ast::values::Value;
use crate::error::StorqResult;
use crate::mapping::EntityMapping;

/// One rendering method per node variant, plus the mapping-resolution hook.
pub trait Visitor {
    /// Resolve an entity name or from-clause alias to its mapping.
    fn entity_mapping(&self, name_or_alias: &str) -> StorqResult<&EntityMapping>;

    fn visit_value(&mut self, node: &Value) -> StorqResult<String>;
    fn visit_parameter_value(&mut self, name: &str) -> StorqResult<String>;
    fn visit_entity(&mut self, node: &Entity) -> StorqResult<String>;
    fn visit_ident(&mut self, node: &Ident) -> StorqResult<String>;
    fn visit_alias_ident(&mut self, node: &AliasIdent) -> StorqResult<String>;
    fn visit_alias_entity(&mut self, node: &AliasEntity) -> StorqResult<String>;
    fn visit_comparison(&mut self, node: &Comparison) -> StorqResult<String>;
    fn visit_condition(&mut self, node: &Condition) -> StorqResult<String>;
    fn visit_not_condition(&mut self, node: &NotCondition) -> StorqResult<String>;
    fn visit_exist_condition(&mut self, node: &ExistsCondition) -> StorqResult<String>;
    fn visit_is_null_condition(&mut self, node: &IsNullCondition) -> StorqResult<String>;
    fn visit_between_condition(&mut self, node: &BetweenCondition) -> StorqResult<String>;
    fn visit_in_condition(&mut self, node: &InCondition) -> StorqResult<String>;
    fn visit_like_condition(&mut self, node: &LikeCondition) -> StorqResult<String>;
    fn visit_condition_list(&mut self, node: &ConditionList) -> StorqResult<String>;
    fn visit_expression(&mut self, node: &Expression) -> StorqResult<String>;
    fn visit_having_clause(&mut self, node: &HavingClause) -> StorqResult<String>;
    fn visit_order_by(&mut self, node: &OrderBy) -> StorqResult<String>;
    fn visit_order_by_clause(&mut self, node: &OrderByClause) -> StorqResult<String>;
    fn visit_group_by_clause(&mut self, node: &GroupByClause) -> StorqResult<String>;
    fn visit_where_clause(&mut self, node: &WhereClause) -> StorqResult<String>;
    fn visit_from_clause(&mut self, node: &FromClause) -> StorqResult<String>;
    fn visit_from_expression(&mut self, node: &FromExpression) -> StorqResult<String>;
    fn visit_inner_join_clause(&mut self, node: &InnerJoinClause) -> StorqResult<String>;
    fn visit_outer_join_clause(&mut self, node: &OuterJoinClause) -> StorqResult<String>;
    /// Pagination wraps a whole statement, so this method takes the SQL
    /// assembled so far and returns the wrapped statement.
    fn visit_range_clause(&mut self, node: &RangeClause, sql: String) -> StorqResult<String>;
    fn visit_select_clause(&mut self, node: &SelectClause) -> StorqResult<String>;
    fn visit_select_entity(&mut self, node: &SelectEntity) -> StorqResult<String>;
    fn visit_select_expression(&mut self, node: &SelectExpression) -> StorqResult<String>;
    fn visit_aggregation(&mut self, node: &Aggregation) -> StorqResult<String>;
    fn visit_select(&mut self, node: &Select) -> StorqResult<String>;
}

impl Value {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            Value::Parameter(name) => visitor.visit_parameter_value(name),
            other => visitor.visit_value(other),
        }
    }
}

impl Entity {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_entity(self)
    }
}

impl Ident {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_ident(self)
    }
}

impl AliasIdent {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_alias_ident(self)
    }
}

impl AliasEntity {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_alias_entity(self)
    }
}

impl Term {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            Term::Value(node) => node.accept(visitor),
            Term::Entity(node) => node.accept(visitor),
            Term::Ident(node) => node.accept(visitor),
            Term::AliasIdent(node) => node.accept(visitor),
        }
    }
}

impl Comparison {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_comparison(self)
    }
}

impl Condition {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_condition(self)
    }
}

impl ConditionRhs {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            ConditionRhs::Comparison(node) => node.accept(visitor),
            ConditionRhs::IsNull(node) => visitor.visit_is_null_condition(node),
            ConditionRhs::Between(node) => visitor.visit_between_condition(node),
            ConditionRhs::In(node) => visitor.visit_in_condition(node),
            ConditionRhs::Like(node) => visitor.visit_like_condition(node),
        }
    }
}

impl NotCondition {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_not_condition(self)
    }
}

impl ExistsCondition {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_exist_condition(self)
    }
}

impl ConditionNode {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            ConditionNode::Condition(node) => node.accept(visitor),
            ConditionNode::Not(node) => node.accept(visitor),
            ConditionNode::Exists(node) => node.accept(visitor),
            ConditionNode::Expression(node) => node.accept(visitor),
        }
    }
}

impl ConditionList {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_condition_list(self)
    }
}

impl Expression {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_expression(self)
    }
}

impl Selectable {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            Selectable::Entity(node) => visitor.visit_select_entity(node),
            Selectable::AliasEntity(node) => node.accept(visitor),
            Selectable::Ident(node) => node.accept(visitor),
            Selectable::AliasIdent(node) => node.accept(visitor),
            Selectable::Aggregation(node) => node.accept(visitor),
        }
    }
}

impl SelectExpression {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_select_expression(self)
    }
}

impl SelectClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_select_clause(self)
    }
}

impl FromExpression {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_from_expression(self)
    }
}

impl FromClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_from_clause(self)
    }
}

impl JoinClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            JoinClause::Inner(node) => visitor.visit_inner_join_clause(node),
            JoinClause::Outer(node) => visitor.visit_outer_join_clause(node),
        }
    }
}

impl WhereClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_where_clause(self)
    }
}

impl GroupByClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_group_by_clause(self)
    }
}

impl HavingClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_having_clause(self)
    }
}

impl OrderBy {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_order_by(self)
    }
}

impl OrderByClause {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_order_by_clause(self)
    }
}

impl RangeClause {
    /// Wrap the statement assembled so far in this range's pagination.
    pub fn accept<V: Visitor + ?Sized>(
        &self,
        visitor: &mut V,
        sql: String,
    ) -> StorqResult<String> {
        visitor.visit_range_clause(self, sql)
    }
}

impl Aggregation {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_aggregation(self)
    }
}

impl AggregationTarget {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        match self {
            AggregationTarget::Ident(node) => node.accept(visitor),
            AggregationTarget::AliasIdent(node) => node.accept(visitor),
        }
    }
}

impl Select {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> StorqResult<String> {
        visitor.visit_select(self)
    }
}
