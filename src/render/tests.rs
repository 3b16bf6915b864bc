//! End-to-end rendering tests.

use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::dialect::{MysqlDialect, OracleDialect, PostgresDialect};
use crate::error::StorqError;
use crate::mapping::{EntityMapping, MappingRegistry, PropertyMapping};
use crate::render::render_select;

fn registry() -> MappingRegistry {
    let mut registry = MappingRegistry::new();
    registry.register(
        EntityMapping::new("Author", "T_AUTHOR", PropertyMapping::new("AUT_ID", "long"))
            .with_property("name", PropertyMapping::new("AUT_NAME", "string").with_length(200))
            .with_property("age", PropertyMapping::new("AUT_AGE", "integer")),
    );
    registry.register(
        EntityMapping::new("Book", "T_BOOK", PropertyMapping::new("BOK_ID", "long"))
            .with_property("title", PropertyMapping::new("BOK_TITLE", "string"))
            .with_property("author", PropertyMapping::new("BOK_F_AUTHOR", "long"))
            .with_property("price", PropertyMapping::new("BOK_PRICE", "float")),
    );
    registry
}

/// `select Author from Author`
fn entity_select(load_aggressive: bool) -> Select {
    Select::simple(
        SelectClause::new(vec![SelectExpression::new(
            Selectable::Entity(SelectEntity::new("Author", load_aggressive)),
            None,
        )]),
        FromClause::new(vec![FromExpression::new(Entity::new("Author"), None)]),
    )
}

/// `select a from Author a`, with room for extra clauses.
fn alias_select() -> Select {
    Select::simple(
        SelectClause::new(vec![SelectExpression::new(
            Selectable::AliasEntity(AliasEntity::new("a", false)),
            None,
        )]),
        FromClause::new(vec![FromExpression::new(
            Entity::new("Author"),
            Some("a".to_string()),
        )]),
    )
}

fn author_name_eq_param(name: &str) -> Condition {
    Condition::compare(
        AliasIdent::new("a", Some("name".to_string())),
        CompareOp::Eq,
        Value::Parameter(name.to_string()),
    )
}

#[test]
fn test_entity_query() {
    let rendered = render_select(&entity_select(false), &PostgresDialect, &registry()).unwrap();
    assert_eq!(rendered.sql, "SELECT \"T_AUTHOR\".\"AUT_ID\" FROM \"T_AUTHOR\"");
    assert!(rendered.parameters.is_empty());
}

#[test]
fn test_entity_query_aggressive_load() {
    let rendered = render_select(&entity_select(true), &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"T_AUTHOR\".\"AUT_ID\", \"T_AUTHOR\".\"AUT_AGE\", \"T_AUTHOR\".\"AUT_NAME\" \
         FROM \"T_AUTHOR\""
    );
}

#[test]
fn test_alias_query_with_parameter() {
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::single(author_name_eq_param(
        "name",
    ))));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" WHERE \"a\".\"AUT_NAME\" = ?"
    );
    assert_eq!(rendered.parameters, vec!["name".to_string()]);
}

#[test]
fn test_mysql_quoting() {
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::single(author_name_eq_param(
        "name",
    ))));
    let rendered = render_select(&select, &MysqlDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT `a`.`AUT_ID` FROM `T_AUTHOR` `a` WHERE `a`.`AUT_NAME` = ?"
    );
}

#[test]
fn test_distinct() {
    let mut select = alias_select();
    select.is_distinct = true;
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT DISTINCT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\""
    );
}

#[test]
fn test_and_or_grouping_preserved() {
    let c1 = author_name_eq_param("name");
    let c2 = Condition::compare(
        AliasIdent::new("a", Some("age".to_string())),
        CompareOp::Gt,
        Value::from(21),
    );
    let c3 = Condition::compare(
        AliasIdent::new("a", Some("age".to_string())),
        CompareOp::Eq,
        Value::from(42),
    );
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::new(
        ConditionList::new(vec![c1.into(), c2.into()]),
        ConditionList::new(vec![c3.into()]),
    )));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" WHERE \
         (\"a\".\"AUT_NAME\" = ? AND \"a\".\"AUT_AGE\" > 21) OR \"a\".\"AUT_AGE\" = 42"
    );
}

#[test]
fn test_condition_kinds() {
    let between = Condition::new(
        AliasIdent::new("a", Some("age".to_string())),
        Some(ConditionRhs::Between(BetweenCondition::new(
            Value::from(18),
            Value::from(99),
        ))),
    );
    let in_values = Condition::new(
        AliasIdent::new("a", Some("name".to_string())),
        Some(ConditionRhs::In(InCondition::new(vec![
            Value::from("Twain").into(),
            Value::from("Poe").into(),
        ]))),
    );
    let like = Condition::new(
        AliasIdent::new("a", Some("name".to_string())),
        Some(ConditionRhs::Like(LikeCondition::new(
            Value::from("M%"),
            false,
        ))),
    );
    let is_null = Condition::new(
        AliasIdent::new("a", Some("age".to_string())),
        Some(ConditionRhs::IsNull(IsNullCondition::new(true))),
    );
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::new(
        ConditionList::new(vec![
            between.into(),
            in_values.into(),
            like.into(),
            is_null.into(),
        ]),
        ConditionList::default(),
    )));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" WHERE \
         \"a\".\"AUT_AGE\" BETWEEN 18 AND 99 AND \
         \"a\".\"AUT_NAME\" IN ('Twain', 'Poe') AND \
         \"a\".\"AUT_NAME\" LIKE 'M%' AND \
         \"a\".\"AUT_AGE\" IS NOT NULL"
    );
}

#[test]
fn test_not_condition() {
    let inner = author_name_eq_param("name");
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::single(ConditionNode::Not(
        NotCondition::new(inner.into()),
    ))));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" WHERE NOT (\"a\".\"AUT_NAME\" = ?)"
    );
}

#[test]
fn test_order_by_and_group_by() {
    let mut select = Select::simple(
        SelectClause::new(vec![SelectExpression::new(
            Selectable::Aggregation(Aggregation::new(
                AggregationKind::Count,
                AggregationTarget::AliasIdent(AliasIdent::new("a", Some("id".to_string()))),
            )),
            None,
        )]),
        FromClause::new(vec![FromExpression::new(
            Entity::new("Author"),
            Some("a".to_string()),
        )]),
    );
    select.group_by = Some(GroupByClause::new(vec![Selectable::AliasIdent(
        AliasIdent::new("a", Some("name".to_string())),
    )]));
    select.order_by = Some(OrderByClause::new(vec![OrderBy::new(
        Selectable::AliasIdent(AliasIdent::new("a", Some("name".to_string()))),
        true,
    )]));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT COUNT(\"a\".\"AUT_ID\") FROM \"T_AUTHOR\" \"a\" \
         GROUP BY \"a\".\"AUT_NAME\" ORDER BY \"a\".\"AUT_NAME\" DESC"
    );
}

#[test]
fn test_having() {
    let mut select = alias_select();
    select.group_by = Some(GroupByClause::new(vec![Selectable::AliasIdent(
        AliasIdent::new("a", Some("name".to_string())),
    )]));
    select.having = Some(HavingClause::new(Expression::single(Condition::compare(
        AliasIdent::new("a", Some("age".to_string())),
        CompareOp::Ge,
        Value::from(30),
    ))));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" \
         GROUP BY \"a\".\"AUT_NAME\" HAVING \"a\".\"AUT_AGE\" >= 30"
    );
}

#[test]
fn test_inner_join() {
    let mut select = alias_select();
    select.join = Some(JoinClause::Inner(InnerJoinClause::new(
        vec![FromExpression::new(Entity::new("Book"), Some("b".to_string()))],
        Expression::single(Condition::compare(
            AliasIdent::new("b", Some("author".to_string())),
            CompareOp::Eq,
            AliasIdent::new("a", Some("id".to_string())),
        )),
    )));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" \
         INNER JOIN \"T_BOOK\" \"b\" ON \"b\".\"BOK_F_AUTHOR\" = \"a\".\"AUT_ID\""
    );
}

#[test]
fn test_left_outer_join() {
    let mut select = alias_select();
    select.join = Some(JoinClause::Outer(OuterJoinClause::new(
        OuterJoinSide::Left,
        vec![FromExpression::new(Entity::new("Book"), Some("b".to_string()))],
        Expression::single(Condition::compare(
            AliasIdent::new("b", Some("author".to_string())),
            CompareOp::Eq,
            AliasIdent::new("a", Some("id".to_string())),
        )),
    )));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" \
         LEFT OUTER JOIN \"T_BOOK\" \"b\" ON \"b\".\"BOK_F_AUTHOR\" = \"a\".\"AUT_ID\""
    );
}

#[test]
fn test_exists_subselect_and_parameter_order() {
    let mut nested = Select::simple(
        SelectClause::new(vec![SelectExpression::new(
            Selectable::AliasEntity(AliasEntity::new("b", false)),
            None,
        )]),
        FromClause::new(vec![FromExpression::new(
            Entity::new("Book"),
            Some("b".to_string()),
        )]),
    );
    nested.where_clause = Some(WhereClause::new(Expression::new(
        ConditionList::new(vec![
            Condition::compare(
                AliasIdent::new("b", Some("author".to_string())),
                CompareOp::Eq,
                AliasIdent::new("a", Some("id".to_string())),
            )
            .into(),
            Condition::compare(
                AliasIdent::new("b", Some("title".to_string())),
                CompareOp::Eq,
                Value::Parameter("title".to_string()),
            )
            .into(),
        ]),
        ConditionList::default(),
    )));

    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::new(
        ConditionList::new(vec![
            author_name_eq_param("name").into(),
            ConditionNode::Exists(ExistsCondition::new(nested)),
            Condition::compare(
                AliasIdent::new("a", Some("age".to_string())),
                CompareOp::Lt,
                Value::Parameter("age".to_string()),
            )
            .into(),
        ]),
        ConditionList::default(),
    )));

    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" WHERE \
         \"a\".\"AUT_NAME\" = ? AND \
         EXISTS (SELECT \"b\".\"BOK_ID\" FROM \"T_BOOK\" \"b\" WHERE \
         \"b\".\"BOK_F_AUTHOR\" = \"a\".\"AUT_ID\" AND \"b\".\"BOK_TITLE\" = ?) AND \
         \"a\".\"AUT_AGE\" < ?"
    );
    assert_eq!(
        rendered.parameters,
        vec!["name".to_string(), "title".to_string(), "age".to_string()]
    );
}

#[test]
fn test_unbounded_range_adds_nothing() {
    let mut select = alias_select();
    select.range = Some(RangeClause::new(0, 0));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(rendered.sql, "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\"");
    assert!(!rendered.sql.contains("LIMIT"));
    assert!(!rendered.sql.contains("OFFSET"));
}

#[test]
fn test_range_renders_exactly_one_fragment() {
    let mut select = alias_select();
    select.range = Some(RangeClause::new(10, 20));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" LIMIT 20 OFFSET 10"
    );
    assert_eq!(rendered.sql.matches("LIMIT").count(), 1);
}

#[test]
fn test_limit_only_and_offset_only() {
    let mut select = alias_select();
    select.range = Some(RangeClause::new(0, 5));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" LIMIT 5"
    );

    let mut select = alias_select();
    select.range = Some(RangeClause::new(5, 0));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" OFFSET 5"
    );
}

#[test]
fn test_oracle_range_wraps_statement() {
    let mut select = alias_select();
    select.range = Some(RangeClause::new(10, 20));
    let rendered = render_select(&select, &OracleDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT * FROM (SELECT r.*, ROWNUM rnum FROM \
         (SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\") r WHERE ROWNUM <= 30) \
         WHERE rnum > 10"
    );
}

#[test]
fn test_mysql_range() {
    let mut select = alias_select();
    select.range = Some(RangeClause::new(10, 20));
    let rendered = render_select(&select, &MysqlDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT `a`.`AUT_ID` FROM `T_AUTHOR` `a` LIMIT 10, 20"
    );
}

#[test]
fn test_dialect_swap_reuses_tree() {
    let mut select = alias_select();
    select.range = Some(RangeClause::new(0, 3));
    let registry = registry();
    let pg = render_select(&select, &PostgresDialect, &registry).unwrap();
    let ora = render_select(&select, &OracleDialect, &registry).unwrap();
    assert!(pg.sql.ends_with("LIMIT 3"));
    assert!(ora.sql.contains("ROWNUM <= 3"));
}

#[test]
fn test_schema_qualified_table() {
    let mut registry = registry();
    registry.register(
        EntityMapping::new("Event", "T_EVENT", PropertyMapping::new("EVT_ID", "long"))
            .with_schema("APP"),
    );
    let select = Select::simple(
        SelectClause::new(vec![SelectExpression::new(
            Selectable::Entity(SelectEntity::new("Event", false)),
            None,
        )]),
        FromClause::new(vec![FromExpression::new(Entity::new("Event"), None)]),
    );
    let rendered = render_select(&select, &PostgresDialect, &registry).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"T_EVENT\".\"EVT_ID\" FROM \"APP\".\"T_EVENT\""
    );
}

#[test]
fn test_unknown_entity_aborts() {
    let select = Select::simple(
        SelectClause::new(vec![SelectExpression::new(
            Selectable::Entity(SelectEntity::new("Ghost", false)),
            None,
        )]),
        FromClause::new(vec![FromExpression::new(Entity::new("Ghost"), None)]),
    );
    assert_eq!(
        render_select(&select, &PostgresDialect, &registry()).unwrap_err(),
        StorqError::UnknownEntity("Ghost".to_string())
    );
}

#[test]
fn test_unknown_property_aborts() {
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::single(Condition::compare(
        AliasIdent::new("a", Some("missing".to_string())),
        CompareOp::Eq,
        Value::from(1),
    ))));
    assert_eq!(
        render_select(&select, &PostgresDialect, &registry()).unwrap_err(),
        StorqError::unknown_property("Author", "missing")
    );
}

#[test]
fn test_unknown_alias_aborts() {
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::single(Condition::compare(
        AliasIdent::new("zz", Some("name".to_string())),
        CompareOp::Eq,
        Value::from(1),
    ))));
    assert_eq!(
        render_select(&select, &PostgresDialect, &registry()).unwrap_err(),
        StorqError::UnknownEntity("zz".to_string())
    );
}

#[test]
fn test_range_fails_on_dialect_without_pagination() {
    use crate::dialect::{DataTypeFn, Dialect};

    struct NoPaging;
    impl Dialect for NoPaging {
        fn name(&self) -> &'static str {
            "nopaging"
        }
        fn data_types(&self) -> &'static [(&'static str, DataTypeFn)] {
            &[]
        }
    }

    let mut select = alias_select();
    select.range = Some(RangeClause::new(0, 5));
    assert_eq!(
        render_select(&select, &NoPaging, &registry()).unwrap_err(),
        StorqError::unsupported("nopaging", "limit pagination")
    );
}

#[test]
fn test_nested_expression_parenthesized() {
    let nested = Expression::new(
        ConditionList::new(vec![author_name_eq_param("n1").into()]),
        ConditionList::new(vec![author_name_eq_param("n2").into()]),
    );
    let outer = Condition::compare(
        AliasIdent::new("a", Some("age".to_string())),
        CompareOp::Gt,
        Value::from(10),
    );
    let mut select = alias_select();
    select.where_clause = Some(WhereClause::new(Expression::new(
        ConditionList::new(vec![outer.into(), nested.into()]),
        ConditionList::default(),
    )));
    let rendered = render_select(&select, &PostgresDialect, &registry()).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT \"a\".\"AUT_ID\" FROM \"T_AUTHOR\" \"a\" WHERE \
         \"a\".\"AUT_AGE\" > 10 AND (\"a\".\"AUT_NAME\" = ? OR \"a\".\"AUT_NAME\" = ?)"
    );
    assert_eq!(rendered.parameters, vec!["n1".to_string(), "n2".to_string()]);
}
