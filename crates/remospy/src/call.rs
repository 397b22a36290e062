//! The record handed over by the interception layer for every call.

use crate::value::{CapturedValue, InstanceRef};

/// Class of the object a call was made on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, serde::Serialize, serde::Deserialize,
)]
pub enum RemoteKind {
    RemoteEvent,
    RemoteFunction,
    BindableEvent,
    BindableFunction,
}

impl RemoteKind {
    #[must_use]
    pub fn call_kind(self) -> CallKind {
        match self {
            Self::RemoteEvent | Self::BindableEvent => CallKind::Fire,
            Self::RemoteFunction | Self::BindableFunction => CallKind::Invoke,
        }
    }

    /// Method the calling script used to issue the call.
    #[must_use]
    pub fn method_name(self) -> &'static str {
        match self {
            Self::RemoteEvent => "FireServer",
            Self::RemoteFunction => "InvokeServer",
            Self::BindableEvent => "Fire",
            Self::BindableFunction => "Invoke",
        }
    }
}

/// Whether a call expects a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum CallKind {
    /// One-way; reconstructed as a bare call statement.
    #[strum(serialize = "fire")]
    Fire,
    /// Returns a value; reconstructed as `local ReturnValue = ...`.
    #[strum(serialize = "invoke")]
    Invoke,
}

/// Who issued the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Caller {
    /// A game script.
    #[default]
    Game,
    /// Code injected into the client, i.e. the user's own snippets.
    Executor,
}

/// One intercepted call.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CapturedCall {
    /// Script the call originated from; `None` when it could not be attributed.
    #[serde(default)]
    pub script: Option<InstanceRef>,
    #[serde(default)]
    pub arguments: Vec<CapturedValue>,
    /// The remote the call was made on.
    pub remote: InstanceRef,
    pub remote_kind: RemoteKind,
    /// Reply observed for invoke-style calls.
    #[serde(default)]
    pub return_value: Option<CapturedValue>,
    #[serde(default)]
    pub caller: Caller,
}

impl CapturedCall {
    pub fn new(remote: InstanceRef, remote_kind: RemoteKind, arguments: Vec<CapturedValue>) -> Self {
        Self {
            script: None,
            arguments,
            remote,
            remote_kind,
            return_value: None,
            caller: Caller::Game,
        }
    }

    #[must_use]
    pub fn with_script(mut self, script: InstanceRef) -> Self {
        self.script = Some(script);
        self
    }
}
