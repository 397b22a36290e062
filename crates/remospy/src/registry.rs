//! Object handles collected during one reconstruction pass.

use indexmap::IndexMap;

use crate::value::InstanceRef;

/// An object referenced by name in the reconstructed snippet and resolved at run
/// time from its debug id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredInstance {
    pub debug_id: String,
    pub instance: InstanceRef,
}

/// Synthesized variable name → object, in registration order.
///
/// One registry lives for exactly one reconstruction pass. Registration order is
/// observable: it fixes the order of the variables bound by the resolution
/// preamble and of its identifier arguments.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    entries: IndexMap<String, RegisteredInstance>,
}

impl InstanceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `instance` under `name`. Re-registering a name replaces the object
    /// and keeps the original position.
    pub fn register(&mut self, name: impl Into<String>, instance: InstanceRef) {
        let entry = RegisteredInstance {
            debug_id: instance.debug_id.clone(),
            instance,
        };
        self.entries.insert(name.into(), entry);
    }

    /// Name already bound to the object with `debug_id`, if any.
    #[must_use]
    pub fn name_for(&self, debug_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.debug_id == debug_id)
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredInstance> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry registered after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegisteredInstance)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}
