//! Call reconstruction: one captured call in, one block of pseudo-code out.
//!
//! A pass encodes every argument, collects the objects referenced by debug id in a
//! fresh [`InstanceRegistry`], and lays the result out as:
//!
//! ```text
//! -- Pseudo code generated by remospy's AST renderer
//!
//! local function GetInstancesFromIds(...)   -- only when objects are
//!   ...                                     -- referenced by debug id
//! end;
//!
//! -- RemoteInstance = game.ReplicatedStorage.MyRemote
//! local RemoteInstance = GetInstancesFromIds("...");
//!
//! local _4lveString1 = "hello";
//!
//! RemoteInstance:FireServer(_4lveString1);
//! ```
//!
//! Nothing in a pass can fail: an argument the encoder rejects is passed as a `nil`
//! local annotated with the reason, so the reconstructed call keeps its arity.

use crate::{
    ast::{Expression, Identifier, LocalStatement, Statement},
    call::{CallKind, CapturedCall},
    config::GenerationSettings,
    encode::{Encoded, Encoder, LOCAL_PREFIX},
    path::{HierarchyResolver, PathResolver},
    printer::{FormattingOptions, render_statements},
    registry::InstanceRegistry,
    resolver::{resolution_statement, resolver_routine},
    tracer::{NoopTracer, RenderTracer},
};

/// First line of every reconstruction.
pub const GENERATOR_HEADER: &str = "-- Pseudo code generated by remospy's AST renderer";

/// The whole output for a call with no originating script.
pub const UNATTRIBUTED_CALL: &str = "-- Call could not be attributed to a script";

/// Registry name of the called remote when it is referenced by debug id.
pub const REMOTE_INSTANCE_NAME: &str = "RemoteInstance";

/// Local receiving the reply of an invoke-style call.
pub const RETURN_VALUE_NAME: &str = "ReturnValue";

/// Turns captured calls into pseudo-code.
///
/// An assembler holds no per-call state; each [`assemble`](Self::assemble) is an
/// independent pass. The path resolver, the formatting and the tracer are chosen
/// at construction time.
#[derive(Debug)]
pub struct Assembler<'o, R: PathResolver = HierarchyResolver, Tr: RenderTracer = NoopTracer> {
    settings: GenerationSettings,
    resolver: R,
    formatting: FormattingOptions<'o>,
    tracer: Tr,
}

impl Assembler<'static> {
    #[must_use]
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            resolver: HierarchyResolver,
            formatting: FormattingOptions::default(),
            tracer: NoopTracer,
        }
    }
}

impl Default for Assembler<'static> {
    fn default() -> Self {
        Self::new(GenerationSettings::default())
    }
}

impl<'o, R: PathResolver, Tr: RenderTracer> Assembler<'o, R, Tr> {
    #[must_use]
    pub fn with_resolver<R2: PathResolver>(self, resolver: R2) -> Assembler<'o, R2, Tr> {
        Assembler {
            settings: self.settings,
            resolver,
            formatting: self.formatting,
            tracer: self.tracer,
        }
    }

    #[must_use]
    pub fn with_formatting<'p>(self, formatting: FormattingOptions<'p>) -> Assembler<'p, R, Tr> {
        Assembler {
            settings: self.settings,
            resolver: self.resolver,
            formatting,
            tracer: self.tracer,
        }
    }

    #[must_use]
    pub fn with_tracer<T2: RenderTracer>(self, tracer: T2) -> Assembler<'o, R, T2> {
        Assembler {
            settings: self.settings,
            resolver: self.resolver,
            formatting: self.formatting,
            tracer,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    #[must_use]
    pub fn tracer(&self) -> &Tr {
        &self.tracer
    }

    #[must_use]
    pub fn into_tracer(self) -> Tr {
        self.tracer
    }

    /// Reconstructs `call` as source text.
    pub fn assemble(&mut self, call: &CapturedCall) -> String {
        let remote_path = self.resolver.resolve_path(&call.remote);
        if call.script.is_none() {
            self.tracer.on_unattributed(&remote_path);
            return UNATTRIBUTED_CALL.to_owned();
        }
        self.tracer.on_pass_start(&remote_path, call.arguments.len());

        let mut registry = InstanceRegistry::new();
        let mut bindings = Vec::new();
        let mut arguments = Vec::with_capacity(call.arguments.len());
        let mut encoder = Encoder::new(&self.settings, &mut registry, &self.resolver);
        for (position, value) in call.arguments.iter().enumerate() {
            let index = position + 1;
            match encoder.encode(index, value) {
                Ok(encoded) => {
                    self.tracer.on_argument_encoded(index, value.kind(), encoded.name());
                    bindings.extend(encoder.take_hoisted());
                    match encoded {
                        Encoded::Bound { statement, name } => {
                            bindings.push(statement);
                            arguments.push(Expression::identifier(name));
                        }
                        Encoded::Deferred(name) => arguments.push(Expression::identifier(name)),
                    }
                }
                Err(error) => {
                    self.tracer.on_argument_failed(index, &error);
                    let name = format!("{LOCAL_PREFIX}Error{index}");
                    bindings.push(Statement::Local(LocalStatement::new(
                        vec![Identifier::new(name.as_str())],
                        vec![Expression::raw(format!("nil --[[ {error} ]]"))],
                    )));
                    arguments.push(Expression::identifier(name));
                }
            }
        }

        let target = if self.settings.use_remote_id {
            let name = match registry.name_for(&call.remote.debug_id) {
                Some(existing) => existing.to_owned(),
                None => {
                    registry.register(REMOTE_INSTANCE_NAME, call.remote.clone());
                    REMOTE_INSTANCE_NAME.to_owned()
                }
            };
            Expression::identifier(name)
        } else {
            Expression::raw(remote_path)
        };
        let remote_call = Expression::method_call(target, call.remote_kind.method_name(), arguments);
        let call_statement = match call.remote_kind.call_kind() {
            CallKind::Fire => Statement::call(remote_call),
            CallKind::Invoke => Statement::local(RETURN_VALUE_NAME, remote_call),
        };

        let options = self.formatting;
        let line_break = options.line_break;
        let mut out = String::new();
        out.push_str(GENERATOR_HEADER);
        out.push_str(line_break);
        out.push_str(line_break);
        if !registry.is_empty() {
            out.push_str(&render_statements(&[resolver_routine()], options));
            out.push_str(line_break);
            for (name, entry) in registry.iter() {
                self.tracer.on_instance_registered(name, &entry.debug_id);
                out.push_str(&format!(
                    "-- {name} = {}{line_break}",
                    self.resolver.resolve_path(&entry.instance)
                ));
            }
            out.push_str(&render_statements(&[resolution_statement(&registry)], options));
            out.push_str(line_break);
        }
        if !bindings.is_empty() {
            out.push_str(&render_statements(&bindings, options));
            out.push_str(line_break);
        }
        out.push_str(&render_statements(&[call_statement], options));

        self.tracer.on_pass_complete(out.len());
        out
    }
}

/// Reconstructs `call` with `settings`, the default path resolver and default
/// formatting.
#[must_use]
pub fn render_call(call: &CapturedCall, settings: &GenerationSettings) -> String {
    Assembler::new(settings.clone()).assemble(call)
}
