//! Condition and expression nodes.

use serde::{Deserialize, Serialize};

use crate::ast::idents::{AliasIdent, Entity, Ident};
use crate::ast::select::Select;
use crate::ast::values::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// An operand in a condition: a literal value or a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Value(Value),
    Entity(Entity),
    Ident(Ident),
    AliasIdent(AliasIdent),
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Value(value)
    }
}

impl From<Ident> for Term {
    fn from(ident: Ident) -> Self {
        Term::Ident(ident)
    }
}

impl From<AliasIdent> for Term {
    fn from(ident: AliasIdent) -> Self {
        Term::AliasIdent(ident)
    }
}

/// Operator plus right-hand operand (`= 1`, `> :limit`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub operator: CompareOp,
    pub value: Term,
}

impl Comparison {
    pub fn new(operator: CompareOp, value: impl Into<Term>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }
}

/// `IS NULL` / `IS NOT NULL` test applied to a condition's left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsNullCondition {
    pub is_not: bool,
}

impl IsNullCondition {
    pub fn new(is_not: bool) -> Self {
        Self { is_not }
    }
}

/// `BETWEEN <start> AND <end>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenCondition {
    pub start: Term,
    pub end: Term,
}

impl BetweenCondition {
    pub fn new(start: impl Into<Term>, end: impl Into<Term>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// `IN (<values>)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InCondition {
    pub values: Vec<Term>,
}

impl InCondition {
    pub fn new(values: Vec<Term>) -> Self {
        Self { values }
    }
}

/// `LIKE <pattern>` / `NOT LIKE <pattern>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeCondition {
    pub value: Term,
    pub is_not: bool,
}

impl LikeCondition {
    pub fn new(value: impl Into<Term>, is_not: bool) -> Self {
        Self {
            value: value.into(),
            is_not,
        }
    }
}

/// The right side of a binary condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionRhs {
    Comparison(Comparison),
    IsNull(IsNullCondition),
    Between(BetweenCondition),
    In(InCondition),
    Like(LikeCondition),
}

/// A condition: a left operand, optionally related to a right side.
///
/// A condition without a right side renders its operand alone (a boolean
/// column or an entity reference used as a truth value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub left: Term,
    pub right: Option<ConditionRhs>,
}

impl Condition {
    pub fn new(left: impl Into<Term>, right: Option<ConditionRhs>) -> Self {
        Self {
            left: left.into(),
            right,
        }
    }

    /// Shorthand for `<left> <op> <value>`.
    pub fn compare(left: impl Into<Term>, operator: CompareOp, value: impl Into<Term>) -> Self {
        Self::new(left, Some(ConditionRhs::Comparison(Comparison::new(operator, value))))
    }
}

/// Negation of a nested condition or expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotCondition {
    pub value: Box<ConditionNode>,
}

impl NotCondition {
    pub fn new(value: ConditionNode) -> Self {
        Self {
            value: Box::new(value),
        }
    }
}

/// `EXISTS (<sub-select>)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsCondition {
    pub select: Box<Select>,
}

impl ExistsCondition {
    pub fn new(select: Select) -> Self {
        Self {
            select: Box::new(select),
        }
    }
}

/// Any node a condition list may hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionNode {
    Condition(Condition),
    Not(NotCondition),
    Exists(ExistsCondition),
    /// A nested, parenthesized expression.
    Expression(Expression),
}

impl From<Condition> for ConditionNode {
    fn from(condition: Condition) -> Self {
        ConditionNode::Condition(condition)
    }
}

impl From<Expression> for ConditionNode {
    fn from(expression: Expression) -> Self {
        ConditionNode::Expression(expression)
    }
}

/// An ordered group of sibling conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConditionList {
    pub conditions: Vec<ConditionNode>,
}

impl ConditionList {
    pub fn new(conditions: Vec<ConditionNode>) -> Self {
        Self { conditions }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// One expression's AND/OR grouping: the AND-joined conditions first, then
/// the OR-joined alternatives.
///
/// Renderers must preserve the grouping boundary exactly as constructed:
/// the AND group conjoins before disjoining with the OR group, never
/// re-associated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Expression {
    pub and_conditions: ConditionList,
    pub or_conditions: ConditionList,
}

impl Expression {
    pub fn new(and_conditions: ConditionList, or_conditions: ConditionList) -> Self {
        Self {
            and_conditions,
            or_conditions,
        }
    }

    /// An expression holding a single condition.
    pub fn single(condition: impl Into<ConditionNode>) -> Self {
        Self {
            and_conditions: ConditionList::new(vec![condition.into()]),
            or_conditions: ConditionList::default(),
        }
    }
}
