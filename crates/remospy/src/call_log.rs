//! Captured call history, grouped per remote.

use indexmap::IndexMap;

use crate::{
    call::{CapturedCall, RemoteKind},
    config::RemoteFilter,
    value::InstanceRef,
};

/// Every call recorded on one remote, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteHistory {
    pub remote: InstanceRef,
    pub kind: RemoteKind,
    pub calls: Vec<CapturedCall>,
}

/// Calls recorded so far, keyed by the remote's debug id in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    filter: RemoteFilter,
    remotes: IndexMap<String, RemoteHistory>,
}

impl CallLog {
    #[must_use]
    pub fn new(filter: RemoteFilter) -> Self {
        Self {
            filter,
            remotes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn filter(&self) -> RemoteFilter {
        self.filter
    }

    /// Changes which remote kinds are recorded and listed. Already recorded calls
    /// are kept and reappear once their kind is allowed again.
    pub fn set_filter(&mut self, filter: RemoteFilter) {
        self.filter = filter;
    }

    /// Records `call` and returns whether it was kept.
    ///
    /// Calls on a filtered-out remote kind and calls with no originating script are
    /// dropped.
    pub fn record(&mut self, call: CapturedCall) -> bool {
        if !self.filter.allows(call.remote_kind) || call.script.is_none() {
            return false;
        }
        self.remotes
            .entry(call.remote.debug_id.clone())
            .or_insert_with(|| RemoteHistory {
                remote: call.remote.clone(),
                kind: call.remote_kind,
                calls: Vec::new(),
            })
            .calls
            .push(call);
        true
    }

    /// Remotes whose kind the current filter allows, in first-seen order.
    pub fn visible_remotes(&self) -> impl Iterator<Item = &RemoteHistory> {
        self.remotes
            .values()
            .filter(|history| self.filter.allows(history.kind))
    }

    /// History of the remote with `debug_id`, empty if it was never called.
    #[must_use]
    pub fn calls_for(&self, debug_id: &str) -> &[CapturedCall] {
        self.remotes
            .get(debug_id)
            .map_or(&[], |history| history.calls.as_slice())
    }

    /// Total number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remotes.values().map(|history| history.calls.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    pub fn clear(&mut self) {
        self.remotes.clear();
    }
}
