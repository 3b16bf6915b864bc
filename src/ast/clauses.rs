//! Clause nodes of a select tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::conditions::Expression;
use crate::ast::idents::{AliasEntity, AliasIdent, Entity, Ident};
use crate::ast::select::Aggregation;
use crate::ast::visitor::Visitor;
use crate::error::StorqResult;
use crate::mapping::{EntityMapping, PropertyMapping};

/// An entity reference in select position (`select Author from Author`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectEntity {
    pub entity: String,
    pub load_aggressive: bool,
}

impl SelectEntity {
    pub fn new(entity: impl Into<String>, load_aggressive: bool) -> Self {
        Self {
            entity: entity.into(),
            load_aggressive,
        }
    }

    pub fn entity_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a EntityMapping> {
        visitor.entity_mapping(&self.entity)
    }

    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        self.entity_mapping(visitor)?.id_mapping()
    }

    pub fn result_property_name(&self) -> String {
        self.entity.clone()
    }
}

/// Anything that can stand in select, order-by or group-by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selectable {
    Entity(SelectEntity),
    AliasEntity(AliasEntity),
    Ident(Ident),
    AliasIdent(AliasIdent),
    Aggregation(Aggregation),
}

impl Selectable {
    /// True for entity-shaped references (full entities rather than scalar
    /// columns).
    pub fn is_entity(&self) -> bool {
        matches!(self, Selectable::Entity(_) | Selectable::AliasEntity(_))
    }

    pub fn result_property_name(&self) -> String {
        match self {
            Selectable::Entity(node) => node.result_property_name(),
            Selectable::AliasEntity(node) => node.result_property_name(),
            Selectable::Ident(node) => node.result_property_name(),
            Selectable::AliasIdent(node) => node.result_property_name(),
            Selectable::Aggregation(node) => node.result_property_name(),
        }
    }
}

/// One select item: an expression plus an optional result alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectExpression {
    pub expression: Selectable,
    pub alias: Option<String>,
}

impl SelectExpression {
    pub fn new(expression: Selectable, alias: Option<String>) -> Self {
        Self { expression, alias }
    }

    /// The name this item contributes to a result row: the alias if given,
    /// the expression's own result name otherwise.
    pub fn result_property_name(&self) -> String {
        self.alias
            .clone()
            .unwrap_or_else(|| self.expression.result_property_name())
    }
}

/// The ordered list of select items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    list: Vec<SelectExpression>,
}

impl SelectClause {
    pub fn new(list: Vec<SelectExpression>) -> Self {
        Self { list }
    }

    pub fn get(&self, idx: usize) -> Option<&SelectExpression> {
        self.list.get(idx)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectExpression> {
        self.list.iter()
    }

    /// True iff the clause selects exactly one entity-shaped item. Governs
    /// whether downstream consumers expect full entities or scalar rows.
    pub fn is_entity_query(&self) -> bool {
        if self.list.len() == 1 {
            return self.list[0].expression.is_entity();
        }
        false
    }
}

/// One from-clause source: an entity, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromExpression {
    pub entity: Entity,
    pub alias: Option<String>,
}

impl FromExpression {
    pub fn new(entity: Entity, alias: Option<String>) -> Self {
        Self { entity, alias }
    }
}

/// The from clause: an ordered source list plus the alias map derived from
/// it.
///
/// The alias map is frozen at construction and covers only expressions that
/// declared an alias; it is never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromClause {
    list: Vec<FromExpression>,
    aliases: HashMap<String, String>,
}

impl FromClause {
    pub fn new(list: Vec<FromExpression>) -> Self {
        let mut aliases = HashMap::new();
        for expression in &list {
            if let Some(alias) = &expression.alias {
                aliases.insert(alias.clone(), expression.entity.entity.clone());
            }
        }
        Self { list, aliases }
    }

    pub fn get(&self, idx: usize) -> Option<&FromExpression> {
        self.list.get(idx)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FromExpression> {
        self.list.iter()
    }

    /// Alias → entity-name map derived at construction.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }
}

/// The side of an outer join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OuterJoinSide {
    Left,
    Right,
}

impl OuterJoinSide {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OuterJoinSide::Left => "LEFT",
            OuterJoinSide::Right => "RIGHT",
        }
    }
}

/// `INNER JOIN <entities> ON <predicate>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnerJoinClause {
    pub entities: Vec<FromExpression>,
    pub predicate: Expression,
}

impl InnerJoinClause {
    pub fn new(entities: Vec<FromExpression>, predicate: Expression) -> Self {
        Self { entities, predicate }
    }
}

/// `LEFT|RIGHT OUTER JOIN <entities> ON <predicate>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OuterJoinClause {
    pub side: OuterJoinSide,
    pub entities: Vec<FromExpression>,
    pub predicate: Expression,
}

impl OuterJoinClause {
    pub fn new(side: OuterJoinSide, entities: Vec<FromExpression>, predicate: Expression) -> Self {
        Self {
            side,
            entities,
            predicate,
        }
    }
}

/// Either join flavor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinClause {
    Inner(InnerJoinClause),
    Outer(OuterJoinClause),
}

impl JoinClause {
    /// The entities this join brings into scope.
    pub fn entities(&self) -> &[FromExpression] {
        match self {
            JoinClause::Inner(join) => &join.entities,
            JoinClause::Outer(join) => &join.entities,
        }
    }
}

/// `WHERE <expression>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    pub value: Expression,
}

impl WhereClause {
    pub fn new(value: Expression) -> Self {
        Self { value }
    }
}

/// `GROUP BY <list>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByClause {
    pub list: Vec<Selectable>,
}

impl GroupByClause {
    pub fn new(list: Vec<Selectable>) -> Self {
        Self { list }
    }
}

/// `HAVING <expression>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavingClause {
    pub value: Expression,
}

impl HavingClause {
    pub fn new(value: Expression) -> Self {
        Self { value }
    }
}

/// One ordering: a target plus direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub value: Selectable,
    pub is_reverse: bool,
}

impl OrderBy {
    pub fn new(value: Selectable, is_reverse: bool) -> Self {
        Self { value, is_reverse }
    }
}

/// `ORDER BY <list>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByClause {
    pub list: Vec<OrderBy>,
}

impl OrderByClause {
    pub fn new(list: Vec<OrderBy>) -> Self {
        Self { list }
    }
}

/// Offset/limit pagination descriptor. Zero offset and zero limit mean
/// "unbounded"; renderers omit pagination syntax entirely in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeClause {
    pub offset: u64,
    pub limit: u64,
}

impl RangeClause {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// True if this range places no restriction on the result.
    pub fn is_unbounded(&self) -> bool {
        self.offset == 0 && self.limit == 0
    }
}
