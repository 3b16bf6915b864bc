//! The SQL-emitting visitor.

use std::collections::HashMap;

use crate::ast::clauses::{
    FromClause, FromExpression, GroupByClause, HavingClause, InnerJoinClause, OrderBy,
    OrderByClause, OuterJoinClause, RangeClause, SelectClause, SelectEntity, SelectExpression,
    WhereClause,
};
use crate::ast::conditions::{
    BetweenCondition, Comparison, Condition, ConditionList, ConditionNode, ExistsCondition,
    Expression, InCondition, IsNullCondition, LikeCondition, NotCondition,
};
use crate::ast::idents::{AliasEntity, AliasIdent, Entity, Ident};
use crate::ast::select::{Aggregation, Select};
use crate::ast::values::Value;
use crate::ast::visitor::Visitor;
use crate::dialect::Dialect;
use crate::error::StorqResult;
use crate::mapping::{EntityMapping, MappingRegistry};

/// Renders one query tree into dialect-correct SQL text plus an ordered
/// parameter list.
///
/// A renderer is scoped to exactly one rendering pass: it accumulates the
/// parameter names encountered during traversal, and its alias scope tracks
/// the from clause of whichever select (outer or nested) is currently being
/// rendered. Construct a fresh renderer per rendering call.
pub struct SqlRenderer<'a> {
    dialect: &'a dyn Dialect,
    registry: &'a MappingRegistry,
    aliases: HashMap<String, String>,
    parameters: Vec<String>,
}

impl<'a> SqlRenderer<'a> {
    pub fn new(dialect: &'a dyn Dialect, registry: &'a MappingRegistry) -> Self {
        Self {
            dialect,
            registry,
            aliases: HashMap::new(),
            parameters: Vec::new(),
        }
    }

    /// The parameter names collected so far, in traversal order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn into_parameters(self) -> Vec<String> {
        self.parameters
    }

    /// Render the columns of an entity-shaped select item: every mapped
    /// column for aggressive loads, the id column alone otherwise. `prefix`
    /// is the alias or table name qualifying each column.
    fn entity_columns(
        &self,
        mapping: &EntityMapping,
        prefix: &str,
        load_aggressive: bool,
    ) -> StorqResult<String> {
        let id = mapping.id_mapping()?;
        if !load_aggressive {
            return Ok(self.dialect.quote_prefixed(&id.column, prefix));
        }
        let mut columns = vec![self.dialect.quote_prefixed(&id.column, prefix)];
        for (name, property) in &mapping.properties {
            if name == crate::ast::ID_PROPERTY {
                continue;
            }
            columns.push(self.dialect.quote_prefixed(&property.column, prefix));
        }
        Ok(columns.join(", "))
    }

    /// The quoted table reference for an entity, schema-qualified if the
    /// mapping declares a schema.
    fn table_sql(&self, mapping: &EntityMapping) -> String {
        match &mapping.schema {
            Some(schema) => self.dialect.quote_prefixed(&mapping.table, schema),
            None => self.dialect.quote(&mapping.table),
        }
    }

    /// Render a condition-list member, parenthesizing nested expressions so
    /// their grouping survives inside the surrounding list.
    fn condition_node_sql(&mut self, node: &ConditionNode) -> StorqResult<String> {
        let sql = node.accept(self)?;
        match node {
            ConditionNode::Expression(_) => Ok(format!("({})", sql)),
            _ => Ok(sql),
        }
    }

    fn join_sql(
        &mut self,
        keyword: &str,
        entities: &[FromExpression],
        predicate: &Expression,
    ) -> StorqResult<String> {
        let mut parts = Vec::with_capacity(entities.len());
        for entity in entities {
            parts.push(entity.accept(self)?);
        }
        let predicate = predicate.accept(self)?;
        Ok(format!("{} {} ON {}", keyword, parts.join(", "), predicate))
    }
}

impl Visitor for SqlRenderer<'_> {
    fn entity_mapping(&self, name_or_alias: &str) -> StorqResult<&EntityMapping> {
        match self.aliases.get(name_or_alias) {
            Some(entity) => self.registry.get(entity),
            None => self.registry.get(name_or_alias),
        }
    }

    fn visit_value(&mut self, node: &Value) -> StorqResult<String> {
        Ok(node.to_string())
    }

    fn visit_parameter_value(&mut self, name: &str) -> StorqResult<String> {
        self.parameters.push(name.to_string());
        Ok("?".to_string())
    }

    fn visit_entity(&mut self, node: &Entity) -> StorqResult<String> {
        let mapping = node.entity_mapping(&*self)?;
        let column = &mapping.id_mapping()?.column;
        Ok(self.dialect.quote_prefixed(column, &mapping.table))
    }

    fn visit_ident(&mut self, node: &Ident) -> StorqResult<String> {
        let mapping = node.entity_mapping(&*self)?;
        let column = &node.property_mapping(&*self)?.column;
        Ok(self.dialect.quote_prefixed(column, &mapping.table))
    }

    fn visit_alias_ident(&mut self, node: &AliasIdent) -> StorqResult<String> {
        let column = &node.property_mapping(&*self)?.column;
        Ok(self.dialect.quote_prefixed(column, &node.alias))
    }

    fn visit_alias_entity(&mut self, node: &AliasEntity) -> StorqResult<String> {
        let mapping = node.entity_mapping(&*self)?;
        self.entity_columns(mapping, &node.alias, node.load_aggressive)
    }

    fn visit_comparison(&mut self, node: &Comparison) -> StorqResult<String> {
        let value = node.value.accept(self)?;
        Ok(format!("{} {}", node.operator.as_sql(), value))
    }

    fn visit_condition(&mut self, node: &Condition) -> StorqResult<String> {
        let left = node.left.accept(self)?;
        match &node.right {
            Some(right) => {
                let right = right.accept(self)?;
                Ok(format!("{} {}", left, right))
            }
            None => Ok(left),
        }
    }

    fn visit_not_condition(&mut self, node: &NotCondition) -> StorqResult<String> {
        let inner = node.value.accept(self)?;
        Ok(format!("NOT ({})", inner))
    }

    fn visit_exist_condition(&mut self, node: &ExistsCondition) -> StorqResult<String> {
        let select = node.select.accept(self)?;
        Ok(format!("EXISTS ({})", select))
    }

    fn visit_is_null_condition(&mut self, node: &IsNullCondition) -> StorqResult<String> {
        Ok(if node.is_not {
            "IS NOT NULL".to_string()
        } else {
            "IS NULL".to_string()
        })
    }

    fn visit_between_condition(&mut self, node: &BetweenCondition) -> StorqResult<String> {
        let start = node.start.accept(self)?;
        let end = node.end.accept(self)?;
        Ok(format!("BETWEEN {} AND {}", start, end))
    }

    fn visit_in_condition(&mut self, node: &InCondition) -> StorqResult<String> {
        let mut values = Vec::with_capacity(node.values.len());
        for value in &node.values {
            values.push(value.accept(self)?);
        }
        Ok(format!("IN ({})", values.join(", ")))
    }

    fn visit_like_condition(&mut self, node: &LikeCondition) -> StorqResult<String> {
        let value = node.value.accept(self)?;
        Ok(if node.is_not {
            format!("NOT LIKE {}", value)
        } else {
            format!("LIKE {}", value)
        })
    }

    fn visit_condition_list(&mut self, node: &ConditionList) -> StorqResult<String> {
        let mut parts = Vec::with_capacity(node.len());
        for member in &node.conditions {
            parts.push(self.condition_node_sql(member)?);
        }
        Ok(parts.join(" AND "))
    }

    fn visit_expression(&mut self, node: &Expression) -> StorqResult<String> {
        let and_sql = if node.and_conditions.is_empty() {
            String::new()
        } else {
            node.and_conditions.accept(self)?
        };
        if node.or_conditions.is_empty() {
            return Ok(and_sql);
        }
        let mut or_parts = Vec::with_capacity(node.or_conditions.len());
        for member in &node.or_conditions.conditions {
            or_parts.push(self.condition_node_sql(member)?);
        }
        let mut buf = String::new();
        if !and_sql.is_empty() {
            // The AND group conjoins before disjoining with the OR group.
            if node.and_conditions.len() > 1 {
                buf.push('(');
                buf.push_str(&and_sql);
                buf.push(')');
            } else {
                buf.push_str(&and_sql);
            }
            buf.push_str(" OR ");
        }
        buf.push_str(&or_parts.join(" OR "));
        Ok(buf)
    }

    fn visit_having_clause(&mut self, node: &HavingClause) -> StorqResult<String> {
        let value = node.value.accept(self)?;
        Ok(format!("HAVING {}", value))
    }

    fn visit_order_by(&mut self, node: &OrderBy) -> StorqResult<String> {
        let value = node.value.accept(self)?;
        Ok(format!(
            "{} {}",
            value,
            if node.is_reverse { "DESC" } else { "ASC" }
        ))
    }

    fn visit_order_by_clause(&mut self, node: &OrderByClause) -> StorqResult<String> {
        let mut parts = Vec::with_capacity(node.list.len());
        for order_by in &node.list {
            parts.push(order_by.accept(self)?);
        }
        Ok(format!("ORDER BY {}", parts.join(", ")))
    }

    fn visit_group_by_clause(&mut self, node: &GroupByClause) -> StorqResult<String> {
        let mut parts = Vec::with_capacity(node.list.len());
        for item in &node.list {
            parts.push(item.accept(self)?);
        }
        Ok(format!("GROUP BY {}", parts.join(", ")))
    }

    fn visit_where_clause(&mut self, node: &WhereClause) -> StorqResult<String> {
        let value = node.value.accept(self)?;
        Ok(format!("WHERE {}", value))
    }

    fn visit_from_clause(&mut self, node: &FromClause) -> StorqResult<String> {
        let mut parts = Vec::with_capacity(node.len());
        for expression in node.iter() {
            parts.push(expression.accept(self)?);
        }
        Ok(format!("FROM {}", parts.join(", ")))
    }

    fn visit_from_expression(&mut self, node: &FromExpression) -> StorqResult<String> {
        let mapping = node.entity.entity_mapping(&*self)?;
        let table = self.table_sql(mapping);
        match &node.alias {
            Some(alias) => Ok(format!("{} {}", table, self.dialect.quote(alias))),
            None => Ok(table),
        }
    }

    fn visit_inner_join_clause(&mut self, node: &InnerJoinClause) -> StorqResult<String> {
        self.join_sql("INNER JOIN", &node.entities, &node.predicate)
    }

    fn visit_outer_join_clause(&mut self, node: &OuterJoinClause) -> StorqResult<String> {
        let keyword = format!("{} OUTER JOIN", node.side.as_sql());
        self.join_sql(&keyword, &node.entities, &node.predicate)
    }

    fn visit_range_clause(&mut self, node: &RangeClause, sql: String) -> StorqResult<String> {
        if node.is_unbounded() {
            return Ok(sql);
        }
        if node.offset > 0 && node.limit > 0 {
            self.dialect.add_sql_range(sql, node.offset, node.limit)
        } else if node.limit > 0 {
            self.dialect.add_sql_limit(sql, node.limit)
        } else {
            self.dialect.add_sql_offset(sql, node.offset)
        }
    }

    fn visit_select_clause(&mut self, node: &SelectClause) -> StorqResult<String> {
        let mut parts = Vec::with_capacity(node.len());
        for item in node.iter() {
            parts.push(item.accept(self)?);
        }
        Ok(parts.join(", "))
    }

    fn visit_select_entity(&mut self, node: &SelectEntity) -> StorqResult<String> {
        let mapping = node.entity_mapping(&*self)?;
        let prefix = mapping.table.clone();
        self.entity_columns(mapping, &prefix, node.load_aggressive)
    }

    fn visit_select_expression(&mut self, node: &SelectExpression) -> StorqResult<String> {
        node.expression.accept(self)
    }

    fn visit_aggregation(&mut self, node: &Aggregation) -> StorqResult<String> {
        let value = node.value.accept(self)?;
        Ok(format!("{}({})", node.kind.as_sql(), value))
    }

    fn visit_select(&mut self, node: &Select) -> StorqResult<String> {
        // Layer this select's alias scope over the enclosing one; a nested
        // sub-select shadows outer aliases for the duration of its clauses
        // and still sees the rest (correlated conditions).
        let saved = self.aliases.clone();
        for expression in node.from.iter() {
            if let Some(alias) = &expression.alias {
                self.aliases
                    .insert(alias.clone(), expression.entity.entity.clone());
            }
        }
        if let Some(join) = &node.join {
            for expression in join.entities() {
                if let Some(alias) = &expression.alias {
                    self.aliases
                        .insert(alias.clone(), expression.entity.entity.clone());
                }
            }
        }

        let result = (|| {
            let mut sql = if node.is_distinct {
                String::from("SELECT DISTINCT ")
            } else {
                String::from("SELECT ")
            };
            sql.push_str(&node.select.accept(self)?);
            sql.push(' ');
            sql.push_str(&node.from.accept(self)?);
            if let Some(join) = &node.join {
                sql.push(' ');
                sql.push_str(&join.accept(self)?);
            }
            if let Some(where_clause) = &node.where_clause {
                sql.push(' ');
                sql.push_str(&where_clause.accept(self)?);
            }
            if let Some(group_by) = &node.group_by {
                sql.push(' ');
                sql.push_str(&group_by.accept(self)?);
            }
            if let Some(having) = &node.having {
                sql.push(' ');
                sql.push_str(&having.accept(self)?);
            }
            if let Some(order_by) = &node.order_by {
                sql.push(' ');
                sql.push_str(&order_by.accept(self)?);
            }
            if let Some(range) = &node.range {
                sql = range.accept(self, sql)?;
            }
            Ok(sql)
        })();

        self.aliases = saved;
        result
    }
}

impl std::fmt::Debug for SqlRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlRenderer")
            .field("dialect", &self.dialect.name())
            .field("aliases", &self.aliases)
            .field("parameters", &self.parameters)
            .finish()
    }
}
