//! Settings that shape a reconstruction.

use crate::call::RemoteKind;

/// Options for turning a captured call into pseudo-code.
///
/// Deserializes from partial objects; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[expect(clippy::struct_excessive_bools, reason = "independent user toggles")]
pub struct GenerationSettings {
    /// Reference objects through their debug ids, resolved when the snippet runs,
    /// instead of through a path written into the snippet.
    pub use_instance_ids: bool,
    /// Reference the remote itself through its debug id as `RemoteInstance`.
    pub use_remote_id: bool,
    /// Write captured date-times as `DateTime.now()` rather than the captured instant.
    pub use_now_date_time: bool,
    /// Order table entries by key (numbers ascending, then by key text) instead of
    /// keeping the captured traversal order.
    pub sort_table_keys: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            use_instance_ids: true,
            use_remote_id: true,
            use_now_date_time: true,
            sort_table_keys: false,
        }
    }
}

impl GenerationSettings {
    /// Settings that write every object as a path, never through debug ids.
    #[must_use]
    pub fn by_path() -> Self {
        Self {
            use_instance_ids: false,
            use_remote_id: false,
            ..Self::default()
        }
    }
}

/// Which remote kinds are kept in a [`CallLog`](crate::CallLog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[expect(clippy::struct_excessive_bools, reason = "one toggle per remote kind")]
pub struct RemoteFilter {
    pub remote_event: bool,
    pub remote_function: bool,
    pub bindable_event: bool,
    pub bindable_function: bool,
}

impl Default for RemoteFilter {
    fn default() -> Self {
        Self {
            remote_event: true,
            remote_function: true,
            bindable_event: false,
            bindable_function: false,
        }
    }
}

impl RemoteFilter {
    /// Filter that keeps every remote kind.
    #[must_use]
    pub fn all() -> Self {
        Self {
            remote_event: true,
            remote_function: true,
            bindable_event: true,
            bindable_function: true,
        }
    }

    #[must_use]
    pub fn allows(self, kind: RemoteKind) -> bool {
        match kind {
            RemoteKind::RemoteEvent => self.remote_event,
            RemoteKind::RemoteFunction => self.remote_function,
            RemoteKind::BindableEvent => self.bindable_event,
            RemoteKind::BindableFunction => self.bindable_function,
        }
    }
}
