//! Pretty-printer turning a [`Chunk`] into Lua source text.
//!
//! Rendering is a pure function of the tree and the [`FormattingOptions`]. Options
//! are `Copy`; entering a nested block hands a copy with `nesting_depth + 1` to the
//! children, so sibling subtrees can never observe each other's depth.
//!
//! Layout rules:
//! - every statement starts with `indent_width * nesting_depth` spaces and ends with
//!   `statement_separator`
//! - block bodies render one level deeper; the closing keyword returns to the
//!   block's own indentation
//! - in an `if`/`elseif`/`else` chain only the last clause writes `end`
//! - binary expressions are always parenthesized, logical and unary never are
//! - table constructors put one field per line, one level deeper, with a trailing
//!   comma on every field but the last; `{}` when empty
//! - literal `raw` text is emitted verbatim

use crate::ast::{
    Chunk, Clause, Expression, FunctionDeclaration, Identifier, Parameter, Statement, TableConstructorExpression,
    TableField,
};

/// Formatting knobs for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingOptions<'a> {
    /// Written after every statement, including its line break.
    pub statement_separator: &'a str,
    /// Spaces per nesting level.
    pub indent_width: usize,
    pub nesting_depth: usize,
    /// Written after block headers and table fields.
    pub line_break: &'a str,
}

impl Default for FormattingOptions<'static> {
    fn default() -> Self {
        Self {
            statement_separator: ";\n",
            indent_width: 2,
            nesting_depth: 0,
            line_break: "\n",
        }
    }
}

impl FormattingOptions<'_> {
    /// Copy of these options one nesting level deeper.
    #[must_use]
    pub fn nested(self) -> Self {
        Self {
            nesting_depth: self.nesting_depth + 1,
            ..self
        }
    }

    fn indentation(self) -> String {
        " ".repeat(self.indent_width * self.nesting_depth)
    }
}

/// Renders every top-level statement of `chunk`.
#[must_use]
pub fn render(chunk: &Chunk, options: FormattingOptions<'_>) -> String {
    render_statements(&chunk.body, options)
}

#[must_use]
pub fn render_statements(statements: &[Statement], options: FormattingOptions<'_>) -> String {
    let mut printer = Printer::default();
    for statement in statements {
        printer.statement(statement, options);
    }
    printer.out
}

#[must_use]
pub fn render_expression(expression: &Expression, options: FormattingOptions<'_>) -> String {
    let mut printer = Printer::default();
    printer.expression(expression, options);
    printer.out
}

/// How a block body is closed.
#[derive(Clone, Copy)]
enum Closing<'e> {
    End,
    Until(&'e Expression),
    /// A non-final `if` clause: the next clause continues the chain.
    Open,
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn indent(&mut self, options: FormattingOptions<'_>) {
        let indentation = options.indentation();
        self.push(&indentation);
    }

    fn statement(&mut self, statement: &Statement, options: FormattingOptions<'_>) {
        self.indent(options);
        match statement {
            Statement::Local(local) => {
                self.push("local ");
                self.identifiers(&local.variables);
                if !local.init.is_empty() {
                    self.push(" = ");
                    self.expressions(&local.init, options);
                }
                self.push(options.statement_separator);
            }
            Statement::FunctionDeclaration(function) => self.function_declaration(function, options),
            Statement::Call(call) => {
                self.expression(&call.expression, options);
                self.push(options.statement_separator);
            }
            Statement::Assignment(assignment) => {
                self.expressions(&assignment.variables, options);
                self.push(" = ");
                self.expressions(&assignment.init, options);
                self.push(options.statement_separator);
            }
            Statement::If(if_statement) => {
                let last = if_statement.clauses.len().saturating_sub(1);
                for (position, clause) in if_statement.clauses.iter().enumerate() {
                    self.clause(clause, options, position == last);
                }
            }
            Statement::Return(ret) => {
                self.push("return");
                if !ret.arguments.is_empty() {
                    self.push(" ");
                    self.expressions(&ret.arguments, options);
                }
                self.push(options.statement_separator);
            }
            Statement::While(while_statement) => {
                self.push("while ");
                self.expression(&while_statement.condition, options);
                self.push(" do");
                self.block(&while_statement.body, options, Closing::End);
            }
            Statement::Break => {
                self.push("break");
                self.push(options.statement_separator);
            }
            Statement::Do(do_statement) => {
                self.push("do");
                self.block(&do_statement.body, options, Closing::End);
            }
            Statement::Repeat(repeat) => {
                self.push("repeat");
                self.block(&repeat.body, options, Closing::Until(&repeat.condition));
            }
            Statement::ForNumeric(for_numeric) => {
                self.push("for ");
                self.push(&for_numeric.variable.name);
                self.push(" = ");
                self.expression(&for_numeric.start, options);
                self.push(", ");
                self.expression(&for_numeric.end, options);
                if let Some(step) = &for_numeric.step {
                    self.push(", ");
                    self.expression(step, options);
                }
                self.push(" do");
                self.block(&for_numeric.body, options, Closing::End);
            }
            Statement::ForGeneric(for_generic) => {
                self.push("for ");
                self.identifiers(&for_generic.variables);
                self.push(" in ");
                self.expressions(&for_generic.iterators, options);
                self.push(" do");
                self.block(&for_generic.body, options, Closing::End);
            }
            Statement::Goto(goto) => {
                self.push("goto ");
                self.push(&goto.label.name);
                self.push(options.statement_separator);
            }
            Statement::Label(label) => {
                self.push("::");
                self.push(&label.label.name);
                self.push("::");
                self.push(options.statement_separator);
            }
        }
    }

    fn function_declaration(&mut self, function: &FunctionDeclaration, options: FormattingOptions<'_>) {
        if function.is_local {
            self.push("local ");
        }
        self.push("function");
        if let Some(name) = &function.identifier {
            self.push(" ");
            self.expression(name, options);
        }
        self.push("(");
        self.parameters(&function.parameters);
        self.push(")");
        self.block(&function.body, options, Closing::End);
    }

    /// Writes the header's line break, the body one level deeper, then the closing
    /// keyword at the header's indentation.
    fn block(&mut self, body: &[Statement], options: FormattingOptions<'_>, closing: Closing<'_>) {
        self.push(options.line_break);
        let inner = options.nested();
        for statement in body {
            self.statement(statement, inner);
        }
        self.indent(options);
        match closing {
            Closing::End => {
                self.push("end");
                self.push(options.statement_separator);
            }
            Closing::Until(condition) => {
                self.push("until ");
                self.expression(condition, options);
                self.push(options.statement_separator);
            }
            Closing::Open => {}
        }
    }

    fn clause(&mut self, clause: &Clause, options: FormattingOptions<'_>, is_last: bool) {
        let closing = if is_last { Closing::End } else { Closing::Open };
        match clause {
            Clause::If { condition, body } => {
                self.push("if ");
                self.expression(condition, options);
                self.push(" then");
                self.block(body, options, closing);
            }
            Clause::ElseIf { condition, body } => {
                self.push("elseif ");
                self.expression(condition, options);
                self.push(" then");
                self.block(body, options, closing);
            }
            Clause::Else { body } => {
                self.push("else");
                self.block(body, options, closing);
            }
        }
    }

    fn expression(&mut self, expression: &Expression, options: FormattingOptions<'_>) {
        match expression {
            Expression::Identifier(identifier) => self.push(&identifier.name),
            Expression::StringLiteral(literal) => self.push(&literal.raw),
            Expression::NumericLiteral(literal) => self.push(&literal.raw),
            Expression::BooleanLiteral(literal) => self.push(&literal.raw),
            Expression::NilLiteral(literal) => self.push(&literal.raw),
            Expression::VarargLiteral(literal) => self.push(&literal.raw),
            Expression::Binary(binary) => {
                self.push("(");
                self.expression(&binary.left, options);
                self.push(" ");
                self.push(&binary.operator.to_string());
                self.push(" ");
                self.expression(&binary.right, options);
                self.push(")");
            }
            Expression::Logical(logical) => {
                self.expression(&logical.left, options);
                self.push(" ");
                self.push(&logical.operator.to_string());
                self.push(" ");
                self.expression(&logical.right, options);
            }
            Expression::Unary(unary) => {
                self.push(&unary.operator.to_string());
                self.push(" ");
                self.expression(&unary.argument, options);
            }
            Expression::Member(member) => {
                self.base(&member.base, options);
                self.push(&member.indexer.to_string());
                self.push(&member.identifier.name);
            }
            Expression::Index(index) => {
                self.base(&index.base, options);
                self.push("[");
                self.expression(&index.index, options);
                self.push("]");
            }
            Expression::Call(call) => {
                self.base(&call.base, options);
                self.push("(");
                self.expressions(&call.arguments, options);
                self.push(")");
            }
            Expression::TableCall(call) => {
                self.base(&call.base, options);
                self.push("(");
                self.table(&call.arguments, options);
                self.push(")");
            }
            Expression::StringCall(call) => {
                self.base(&call.base, options);
                self.push("(");
                self.push(&call.argument.raw);
                self.push(")");
            }
            Expression::TableConstructor(table) => self.table(table, options),
            Expression::Function(function) => {
                self.push("(function(");
                self.parameters(&function.parameters);
                self.push(")");
                self.push(options.line_break);
                let inner = options.nested();
                for statement in &function.body {
                    self.statement(statement, inner);
                }
                self.indent(options);
                self.push("end)");
            }
            Expression::Raw(raw) => self.push(&raw.text),
        }
    }

    /// The base of a member, index or call expression.
    fn base(&mut self, base: &Expression, options: FormattingOptions<'_>) {
        if base.is_prefix() {
            self.expression(base, options);
        } else {
            self.push("(");
            self.expression(base, options);
            self.push(")");
        }
    }

    fn table(&mut self, table: &TableConstructorExpression, options: FormattingOptions<'_>) {
        if table.fields.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.push(options.line_break);
        let inner = options.nested();
        let last = table.fields.len() - 1;
        for (position, field) in table.fields.iter().enumerate() {
            self.indent(inner);
            match field {
                TableField::TableKey { key, value } => {
                    self.push("[");
                    self.expression(key, inner);
                    self.push("] = ");
                    self.expression(value, inner);
                }
                TableField::TableKeyString { key, value } => {
                    self.push(&key.name);
                    self.push(" = ");
                    self.expression(value, inner);
                }
                TableField::TableValue { value } => self.expression(value, inner),
            }
            if position != last {
                self.push(",");
            }
            self.push(options.line_break);
        }
        self.indent(options);
        self.push("}");
    }

    fn expressions(&mut self, expressions: &[Expression], options: FormattingOptions<'_>) {
        for (position, expression) in expressions.iter().enumerate() {
            if position > 0 {
                self.push(", ");
            }
            self.expression(expression, options);
        }
    }

    fn identifiers(&mut self, identifiers: &[Identifier]) {
        for (position, identifier) in identifiers.iter().enumerate() {
            if position > 0 {
                self.push(", ");
            }
            self.push(&identifier.name);
        }
    }

    fn parameters(&mut self, parameters: &[Parameter]) {
        for (position, parameter) in parameters.iter().enumerate() {
            if position > 0 {
                self.push(", ");
            }
            match parameter {
                Parameter::Named(identifier) => self.push(&identifier.name),
                Parameter::Vararg(vararg) => self.push(&vararg.raw),
            }
        }
    }
}
