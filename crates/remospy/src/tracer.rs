//! Reconstruction pass tracing.
//!
//! The [`Assembler`](crate::Assembler) is parameterized over a [`RenderTracer`] and calls
//! its hooks at the interesting points of a pass. With [`NoopTracer`] every hook
//! monomorphizes to nothing.
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | No-op (default) |
//! | [`StderrTracer`] | Human-readable pass log on stderr |
//! | [`RecordingTracer`] | Collects [`TraceEvent`]s for tests and post-mortem |
//!
//! ```ignore
//! let mut assembler = Assembler::new(settings).with_tracer(RecordingTracer::new());
//! let text = assembler.assemble(&call);
//! let events = assembler.into_tracer().into_events();
//! ```

use crate::{encode::EncodeError, value::ValueKind};

/// Event recorded by [`RecordingTracer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A pass started for the remote at `remote`.
    PassStart {
        /// Path of the called remote.
        remote: String,
        /// Number of captured arguments.
        arguments: usize,
    },
    /// An argument was encoded and is passed as `name`.
    ArgumentEncoded { index: usize, kind: ValueKind, name: String },
    /// An argument could not be encoded; it is passed as a `nil` placeholder.
    ArgumentFailed { index: usize, error: EncodeError },
    /// An object was added to the pass's handle registry.
    InstanceRegistered { name: String, debug_id: String },
    /// The call had no originating script and was not reconstructed.
    Unattributed { remote: String },
    /// The pass finished, producing `bytes` bytes of source.
    PassComplete { bytes: usize },
}

/// Hooks called during a reconstruction pass. Every hook defaults to a no-op.
pub trait RenderTracer: std::fmt::Debug {
    /// Called before any argument is encoded.
    #[inline]
    fn on_pass_start(&mut self, _remote: &str, _arguments: usize) {}

    /// Called after argument `index` (1-based) was encoded.
    #[inline]
    fn on_argument_encoded(&mut self, _index: usize, _kind: ValueKind, _name: &str) {}

    /// Called when argument `index` (1-based) failed to encode.
    #[inline]
    fn on_argument_failed(&mut self, _index: usize, _error: &EncodeError) {}

    /// Called once per registry entry when the resolution preamble is built.
    #[inline]
    fn on_instance_registered(&mut self, _name: &str, _debug_id: &str) {}

    /// Called instead of any other hook when the call has no originating script.
    #[inline]
    fn on_unattributed(&mut self, _remote: &str) {}

    /// Called with the size of the rendered output.
    #[inline]
    fn on_pass_complete(&mut self, _bytes: usize) {}
}

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl RenderTracer for NoopTracer {}

/// Tracer that logs every pass to stderr.
///
/// ```text
/// >>> PASS game.ReplicatedStorage.MyRemote  args=2
///   arg 1  String   -> _4lveString1
///   arg 2  Table    !! table key is nil
///   +++ RemoteInstance = 0x1f
/// <<< PASS 412 bytes
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTracer;

impl StderrTracer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderTracer for StderrTracer {
    fn on_pass_start(&mut self, remote: &str, arguments: usize) {
        eprintln!(">>> PASS {remote}  args={arguments}");
    }

    fn on_argument_encoded(&mut self, index: usize, kind: ValueKind, name: &str) {
        let kind: &'static str = kind.into();
        eprintln!("  arg {index:<3}{kind:<9}-> {name}");
    }

    fn on_argument_failed(&mut self, index: usize, error: &EncodeError) {
        eprintln!("  arg {index:<3}!! {error}");
    }

    fn on_instance_registered(&mut self, name: &str, debug_id: &str) {
        eprintln!("  +++ {name} = {debug_id}");
    }

    fn on_unattributed(&mut self, remote: &str) {
        eprintln!("--- {remote}: no originating script, skipped");
    }

    fn on_pass_complete(&mut self, bytes: usize) {
        eprintln!("<<< PASS {bytes} bytes");
    }
}

/// Tracer that records every event in order.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
    /// Stop recording after this many events.
    limit: Option<usize>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    fn push(&mut self, event: TraceEvent) {
        if self.limit.is_some_and(|limit| self.events.len() >= limit) {
            return;
        }
        self.events.push(event);
    }
}

impl RenderTracer for RecordingTracer {
    fn on_pass_start(&mut self, remote: &str, arguments: usize) {
        self.push(TraceEvent::PassStart {
            remote: remote.to_owned(),
            arguments,
        });
    }

    fn on_argument_encoded(&mut self, index: usize, kind: ValueKind, name: &str) {
        self.push(TraceEvent::ArgumentEncoded {
            index,
            kind,
            name: name.to_owned(),
        });
    }

    fn on_argument_failed(&mut self, index: usize, error: &EncodeError) {
        self.push(TraceEvent::ArgumentFailed {
            index,
            error: error.clone(),
        });
    }

    fn on_instance_registered(&mut self, name: &str, debug_id: &str) {
        self.push(TraceEvent::InstanceRegistered {
            name: name.to_owned(),
            debug_id: debug_id.to_owned(),
        });
    }

    fn on_unattributed(&mut self, remote: &str) {
        self.push(TraceEvent::Unattributed {
            remote: remote.to_owned(),
        });
    }

    fn on_pass_complete(&mut self, bytes: usize) {
        self.push(TraceEvent::PassComplete { bytes });
    }
}
