#![doc = include_str!("../../../README.md")]

pub mod ast;
mod assemble;
mod call;
mod call_log;
mod config;
mod encode;
mod literal;
mod path;
mod printer;
mod registry;
mod resolver;
pub mod tracer;
mod value;

pub use crate::{
    assemble::{
        Assembler, GENERATOR_HEADER, REMOTE_INSTANCE_NAME, RETURN_VALUE_NAME, UNATTRIBUTED_CALL, render_call,
    },
    ast::{Chunk, Expression, Statement},
    call::{CallKind, Caller, CapturedCall, RemoteKind},
    call_log::{CallLog, RemoteHistory},
    config::{GenerationSettings, RemoteFilter},
    encode::{EncodeError, Encoded, Encoder, LOCAL_PREFIX, MAX_TABLE_DEPTH},
    literal::{LUA_KEYWORDS, is_identifier, long_bracket_delimiters, long_bracket_level, number_raw, quoted, string_raw},
    path::{DETACHED_SUFFIX, HierarchyResolver, PathResolver, instance_path},
    printer::{FormattingOptions, render, render_expression, render_statements},
    registry::{InstanceRegistry, RegisteredInstance},
    resolver::{NOT_FOUND_PLACEHOLDER, RESOLVER_NAME, resolution_statement, resolver_routine},
    tracer::{NoopTracer, RecordingTracer, RenderTracer, StderrTracer, TraceEvent},
    value::{
        CapturedValue, Color3, ColorSequenceKeypoint, InstanceRef, InstanceRole, NumberSequenceKeypoint, TablePairs,
        ValueKind, Vector3,
    },
};
