//! Syntax tree for reconstructed Lua source.
//!
//! Nodes are plain data: they are built directly by the encoder and the assembler
//! (there is no parser) and turned into text by [`crate::printer`]. Literal nodes
//! carry their final source text in `raw`, computed once at construction time.
//!
//! No validation happens on construction. A `LocalStatement` whose `init` is longer
//! than its `variables`, or an `IfStatement` without clauses, renders as whatever
//! text falls out of the printer.

use crate::literal::{number_raw, string_raw};

/// A bare name: a variable, parameter, label or field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    /// Quoted or long-bracket source text, see [`string_raw`].
    pub raw: String,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let raw = string_raw(&value);
        Self { value, raw }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    pub value: f64,
    pub raw: String,
}

impl NumericLiteral {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            raw: number_raw(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub raw: String,
}

impl BooleanLiteral {
    pub fn new(value: bool) -> Self {
        let raw = if value { "true" } else { "false" };
        Self {
            value,
            raw: raw.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NilLiteral {
    pub raw: String,
}

impl Default for NilLiteral {
    fn default() -> Self {
        Self { raw: "nil".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarargLiteral {
    pub raw: String,
}

impl Default for VarargLiteral {
    fn default() -> Self {
        Self { raw: "...".to_owned() }
    }
}

/// Operators rendered between two operands, always inside parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum BinaryOperator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "//")]
    FloorDiv,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "^")]
    Pow,
    #[strum(serialize = "..")]
    Concat,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "~=")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    LtE,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    GtE,
    #[strum(serialize = "&")]
    BitAnd,
    #[strum(serialize = "|")]
    BitOr,
    #[strum(serialize = "~")]
    BitXor,
    #[strum(serialize = "<<")]
    Shl,
    #[strum(serialize = ">>")]
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum LogicalOperator {
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum UnaryOperator {
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "#")]
    Len,
    #[strum(serialize = "~")]
    BitNot,
}

/// Separator between a member expression's base and its field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum MemberIndexer {
    /// `base.name`
    #[strum(serialize = ".")]
    Dot,
    /// `base:name`, a method lookup
    #[strum(serialize = ":")]
    Colon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub base: Box<Expression>,
    pub indexer: MemberIndexer,
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub base: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub base: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// A call whose only argument is a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCallExpression {
    pub base: Box<Expression>,
    pub arguments: TableConstructorExpression,
}

/// A call whose only argument is a string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringCallExpression {
    pub base: Box<Expression>,
    pub argument: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableConstructorExpression {
    pub fields: Vec<TableField>,
}

/// An anonymous function used as a value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionExpression {
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

/// Text that is already valid source, emitted exactly as given.
///
/// Used for constructor templates of host values and for object paths produced
/// by a [`PathResolver`](crate::PathResolver). The printer treats it like a name:
/// it is never wrapped in parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpression {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    NumericLiteral(NumericLiteral),
    BooleanLiteral(BooleanLiteral),
    NilLiteral(NilLiteral),
    VarargLiteral(VarargLiteral),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Unary(UnaryExpression),
    Member(MemberExpression),
    Index(IndexExpression),
    Call(CallExpression),
    TableCall(TableCallExpression),
    StringCall(StringCallExpression),
    TableConstructor(TableConstructorExpression),
    Function(FunctionExpression),
    Raw(RawExpression),
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(StringLiteral::new(value))
    }

    pub fn number(value: f64) -> Self {
        Self::NumericLiteral(NumericLiteral::new(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::BooleanLiteral(BooleanLiteral::new(value))
    }

    pub fn nil() -> Self {
        Self::NilLiteral(NilLiteral::default())
    }

    pub fn vararg() -> Self {
        Self::VarargLiteral(VarargLiteral::default())
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(RawExpression { text: text.into() })
    }

    pub fn binary(operator: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn logical(operator: LogicalOperator, left: Self, right: Self) -> Self {
        Self::Logical(LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(operator: UnaryOperator, argument: Self) -> Self {
        Self::Unary(UnaryExpression {
            operator,
            argument: Box::new(argument),
        })
    }

    pub fn member(base: Self, indexer: MemberIndexer, name: impl Into<String>) -> Self {
        Self::Member(MemberExpression {
            base: Box::new(base),
            indexer,
            identifier: Identifier::new(name),
        })
    }

    pub fn index(base: Self, index: Self) -> Self {
        Self::Index(IndexExpression {
            base: Box::new(base),
            index: Box::new(index),
        })
    }

    pub fn call(base: Self, arguments: Vec<Self>) -> Self {
        Self::Call(CallExpression {
            base: Box::new(base),
            arguments,
        })
    }

    /// `base:method(arguments)`
    pub fn method_call(base: Self, method: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::call(Self::member(base, MemberIndexer::Colon, method), arguments)
    }

    pub fn table(fields: Vec<TableField>) -> Self {
        Self::TableConstructor(TableConstructorExpression { fields })
    }

    /// Whether the expression can sit in front of `.name`, `[index]` or `(args)`
    /// without parentheses.
    ///
    /// Names, lookups, calls and raw text are prefix expressions already; function
    /// literals and binary expressions render with their own parentheses.
    #[must_use]
    pub fn is_prefix(&self) -> bool {
        matches!(
            self,
            Self::Identifier(_)
                | Self::Member(_)
                | Self::Index(_)
                | Self::Call(_)
                | Self::TableCall(_)
                | Self::StringCall(_)
                | Self::Function(_)
                | Self::Binary(_)
                | Self::Raw(_)
        )
    }
}

impl From<Identifier> for Expression {
    fn from(identifier: Identifier) -> Self {
        Self::Identifier(identifier)
    }
}

impl From<StringLiteral> for Expression {
    fn from(literal: StringLiteral) -> Self {
        Self::StringLiteral(literal)
    }
}

impl From<TableConstructorExpression> for Expression {
    fn from(table: TableConstructorExpression) -> Self {
        Self::TableConstructor(table)
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Named(Identifier),
    Vararg(VarargLiteral),
}

impl Parameter {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(Identifier::new(name))
    }

    pub fn vararg() -> Self {
        Self::Vararg(VarargLiteral::default())
    }
}

/// One entry of a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// `[key] = value`
    TableKey { key: Expression, value: Expression },
    /// `key = value`
    TableKeyString { key: Identifier, value: Expression },
    /// `value`, taking the next positional slot
    TableValue { value: Expression },
}

/// `local a, b = x, y`; `init` is empty for a bare declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStatement {
    pub variables: Vec<Identifier>,
    pub init: Vec<Expression>,
}

impl LocalStatement {
    pub fn new(variables: Vec<Identifier>, init: Vec<Expression>) -> Self {
        Self { variables, init }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// Function name: an identifier or a member path such as `a.b:c`.
    pub identifier: Option<Expression>,
    pub is_local: bool,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub variables: Vec<Expression>,
    pub init: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    If { condition: Expression, body: Vec<Statement> },
    ElseIf { condition: Expression, body: Vec<Statement> },
    Else { body: Vec<Statement> },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnStatement {
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoStatement {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForNumericStatement {
    pub variable: Identifier,
    pub start: Expression,
    pub end: Expression,
    pub step: Option<Expression>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForGenericStatement {
    pub variables: Vec<Identifier>,
    pub iterators: Vec<Expression>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GotoStatement {
    pub label: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStatement {
    pub label: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Local(LocalStatement),
    FunctionDeclaration(FunctionDeclaration),
    Call(CallStatement),
    Assignment(AssignmentStatement),
    If(IfStatement),
    Return(ReturnStatement),
    While(WhileStatement),
    Break,
    Do(DoStatement),
    Repeat(RepeatStatement),
    ForNumeric(ForNumericStatement),
    ForGeneric(ForGenericStatement),
    Goto(GotoStatement),
    Label(LabelStatement),
}

impl Statement {
    /// `local name = init`
    pub fn local(name: impl Into<String>, init: Expression) -> Self {
        Self::Local(LocalStatement::new(vec![Identifier::new(name)], vec![init]))
    }

    pub fn call(expression: Expression) -> Self {
        Self::Call(CallStatement { expression })
    }

    pub fn assign(variable: Expression, value: Expression) -> Self {
        Self::Assignment(AssignmentStatement {
            variables: vec![variable],
            init: vec![value],
        })
    }

    pub fn ret(arguments: Vec<Expression>) -> Self {
        Self::Return(ReturnStatement { arguments })
    }

    /// `if condition then body end` with a single clause.
    pub fn if_then(condition: Expression, body: Vec<Self>) -> Self {
        Self::If(IfStatement {
            clauses: vec![Clause::If { condition, body }],
        })
    }
}

/// The root of a render pass: an ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    pub body: Vec<Statement>,
}

impl Chunk {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }
}
