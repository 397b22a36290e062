//! The `GetInstancesFromIds` routine embedded in reconstructed snippets.
//!
//! When a snippet refers to objects by debug id, it starts with this routine and a
//! single `local` statement that calls it. At run time the routine walks the nil
//! instances and every descendant of `game`, and replaces each string id with the
//! object whose `GetDebugId()` matches. Ids with no live match are replaced with
//! [`NOT_FOUND_PLACEHOLDER`] followed by the id. Arguments that are already objects
//! pass through, and the result has the same arity as the input.

use crate::{
    ast::{
        BinaryOperator, Expression, ForGenericStatement, ForNumericStatement, FunctionDeclaration, Identifier,
        LocalStatement, MemberIndexer, Parameter, Statement,
    },
    registry::InstanceRegistry,
};

pub const RESOLVER_NAME: &str = "GetInstancesFromIds";

pub const NOT_FOUND_PLACEHOLDER: &str = "nil -- Could not find instance with id: ";

/// The routine as a `local function` declaration.
#[must_use]
pub fn resolver_routine() -> Statement {
    let ids = || Expression::identifier("ids");
    let id_at = || Expression::index(ids(), Expression::identifier("i"));
    let id_count = || Expression::member(ids(), MemberIndexer::Dot, "n");
    let remaining = || Expression::identifier("remaining");
    let is_string_id = || {
        Expression::binary(
            BinaryOperator::Eq,
            Expression::call(Expression::identifier("type"), vec![id_at()]),
            Expression::string("string"),
        )
    };

    let body = vec![
        Statement::local(
            "ids",
            Expression::call(
                Expression::member(Expression::identifier("table"), MemberIndexer::Dot, "pack"),
                vec![Expression::vararg()],
            ),
        ),
        Statement::local("remaining", Expression::number(0.0)),
        each_id(vec![Statement::if_then(
            is_string_id(),
            vec![Statement::assign(
                remaining(),
                Expression::binary(BinaryOperator::Add, remaining(), Expression::number(1.0)),
            )],
        )]),
        Statement::FunctionDeclaration(FunctionDeclaration {
            identifier: Some(Expression::identifier("visit")),
            is_local: true,
            parameters: vec![Parameter::named("instance")],
            body: vec![
                Statement::local(
                    "debugId",
                    Expression::method_call(Expression::identifier("instance"), "GetDebugId", Vec::new()),
                ),
                each_id(vec![Statement::if_then(
                    Expression::binary(BinaryOperator::Eq, id_at(), Expression::identifier("debugId")),
                    vec![
                        Statement::assign(id_at(), Expression::identifier("instance")),
                        Statement::assign(
                            remaining(),
                            Expression::binary(BinaryOperator::Sub, remaining(), Expression::number(1.0)),
                        ),
                    ],
                )]),
            ],
        }),
        visit_each(Expression::call(Expression::identifier("getnilinstances"), Vec::new())),
        visit_each(Expression::call(
            Expression::identifier("getweakdescendants"),
            vec![Expression::identifier("game")],
        )),
        each_id(vec![Statement::if_then(
            is_string_id(),
            vec![Statement::assign(
                id_at(),
                Expression::binary(BinaryOperator::Concat, Expression::string(NOT_FOUND_PLACEHOLDER), id_at()),
            )],
        )]),
        Statement::ret(vec![Expression::call(
            Expression::member(Expression::identifier("table"), MemberIndexer::Dot, "unpack"),
            vec![ids(), Expression::number(1.0), id_count()],
        )]),
    ];

    Statement::FunctionDeclaration(FunctionDeclaration {
        identifier: Some(Expression::identifier(RESOLVER_NAME)),
        is_local: true,
        parameters: vec![Parameter::vararg()],
        body,
    })
}

/// `for i = 1, ids.n do <body> end`
fn each_id(body: Vec<Statement>) -> Statement {
    Statement::ForNumeric(ForNumericStatement {
        variable: Identifier::new("i"),
        start: Expression::number(1.0),
        end: Expression::member(Expression::identifier("ids"), MemberIndexer::Dot, "n"),
        step: None,
        body,
    })
}

/// Visits every object in `list`, stopping once every id is resolved.
fn visit_each(list: Expression) -> Statement {
    Statement::ForGeneric(ForGenericStatement {
        variables: vec![Identifier::new("_"), Identifier::new("instance")],
        iterators: vec![Expression::call(Expression::identifier("ipairs"), vec![list])],
        body: vec![
            Statement::if_then(
                Expression::binary(
                    BinaryOperator::Eq,
                    Expression::identifier("remaining"),
                    Expression::number(0.0),
                ),
                vec![Statement::Break],
            ),
            Statement::call(Expression::call(
                Expression::identifier("visit"),
                vec![Expression::identifier("instance")],
            )),
        ],
    })
}

/// `local a, b = GetInstancesFromIds("id-a", "id-b")`, one variable per registry
/// entry in registration order.
#[must_use]
pub fn resolution_statement(registry: &InstanceRegistry) -> Statement {
    let (variables, ids): (Vec<Identifier>, Vec<Expression>) = registry
        .iter()
        .map(|(name, entry)| (Identifier::new(name), Expression::string(entry.debug_id.as_str())))
        .unzip();
    Statement::Local(LocalStatement::new(
        variables,
        vec![Expression::call(Expression::identifier(RESOLVER_NAME), ids)],
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{printer::render_statements, value::InstanceRef};

    #[test]
    fn routine_text() {
        let text = render_statements(&[resolver_routine()], crate::FormattingOptions::default());
        let expected = r#"local function GetInstancesFromIds(...)
  local ids = table.pack(...);
  local remaining = 0;
  for i = 1, ids.n do
    if (type(ids[i]) == "string") then
      remaining = (remaining + 1);
    end;
  end;
  local function visit(instance)
    local debugId = instance:GetDebugId();
    for i = 1, ids.n do
      if (ids[i] == debugId) then
        ids[i] = instance;
        remaining = (remaining - 1);
      end;
    end;
  end;
  for _, instance in ipairs(getnilinstances()) do
    if (remaining == 0) then
      break;
    end;
    visit(instance);
  end;
  for _, instance in ipairs(getweakdescendants(game)) do
    if (remaining == 0) then
      break;
    end;
    visit(instance);
  end;
  for i = 1, ids.n do
    if (type(ids[i]) == "string") then
      ids[i] = ("nil -- Could not find instance with id: " .. ids[i]);
    end;
  end;
  return table.unpack(ids, 1, ids.n);
end;
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn resolution_binds_in_registration_order() {
        let mut registry = InstanceRegistry::new();
        registry.register("_4lveInstance2", InstanceRef::new("b-id", "B", "Part"));
        registry.register("RemoteInstance", InstanceRef::new("r-id", "R", "RemoteEvent"));
        let text = render_statements(&[resolution_statement(&registry)], crate::FormattingOptions::default());
        assert_eq!(
            text,
            "local _4lveInstance2, RemoteInstance = GetInstancesFromIds(\"b-id\", \"r-id\");\n"
        );
    }
}
