//! Captured value → AST.
//!
//! Each top-level argument becomes either a `local` binding plus the name it binds,
//! or, for objects referenced by debug id, just a name registered in the
//! [`InstanceRegistry`] and bound later by the resolution preamble.
//!
//! Names follow `_4lve<Kind><index>` where `index` is the 1-based argument position.
//! Inside tables, scalars and host values are written inline; nested tables are
//! hoisted into their own locals (`_4lveTable<index>_<n>`) and referenced by name,
//! with `n` counting up across the whole pass so siblings never collide.

use std::{cmp::Ordering, fmt, mem};

use crate::{
    ast::{Expression, Identifier, Statement, TableField},
    config::GenerationSettings,
    literal::{is_identifier, number_raw},
    path::PathResolver,
    registry::InstanceRegistry,
    value::{
        CapturedValue, ColorSequenceKeypoint, InstanceRef, NumberSequenceKeypoint, TablePairs, ValueKind, Vector3,
    },
};

/// Prefix of every synthesized local name.
pub const LOCAL_PREFIX: &str = "_4lve";

/// Deepest table nesting the encoder follows before giving up on an argument.
pub const MAX_TABLE_DEPTH: usize = 200;

/// Result of encoding one top-level argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// `statement` binds the value to `name`.
    Bound { statement: Statement, name: String },
    /// An object registered by debug id; the name is bound by the resolution preamble.
    Deferred(String),
}

impl Encoded {
    /// Name the call should pass for this argument.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bound { name, .. } | Self::Deferred(name) => name,
        }
    }
}

/// Why an argument could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A table key was `nil`, which no table can hold.
    NilKey,
    /// A table key was NaN, which no table can hold.
    NanKey,
    /// Tables nested deeper than the limit.
    TooDeep { limit: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilKey => write!(f, "table key is nil"),
            Self::NanKey => write!(f, "table key is NaN"),
            Self::TooDeep { limit } => write!(f, "tables nested deeper than {limit} levels"),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encodes the arguments of one reconstruction pass.
///
/// The encoder writes objects referenced by debug id into the pass's registry and
/// collects hoisted locals for nested tables; drain those with
/// [`take_hoisted`](Self::take_hoisted) after each [`encode`](Self::encode) and emit
/// them before the argument's own binding.
#[derive(Debug)]
pub struct Encoder<'a, R: PathResolver + ?Sized> {
    settings: &'a GenerationSettings,
    registry: &'a mut InstanceRegistry,
    resolver: &'a R,
    hoisted: Vec<Statement>,
    nested_count: usize,
}

impl<'a, R: PathResolver + ?Sized> Encoder<'a, R> {
    pub fn new(settings: &'a GenerationSettings, registry: &'a mut InstanceRegistry, resolver: &'a R) -> Self {
        Self {
            settings,
            registry,
            resolver,
            hoisted: Vec::new(),
            nested_count: 0,
        }
    }

    /// Encodes the argument at 1-based position `index`.
    ///
    /// On error nothing produced by this call is kept: hoisted locals and registry
    /// entries added while encoding the argument are rolled back.
    pub fn encode(&mut self, index: usize, value: &CapturedValue) -> Result<Encoded, EncodeError> {
        let hoisted_mark = self.hoisted.len();
        let registry_mark = self.registry.len();
        let result = self.encode_argument(index, value);
        if result.is_err() {
            self.hoisted.truncate(hoisted_mark);
            self.registry.truncate(registry_mark);
        }
        result
    }

    /// Locals for nested tables produced since the last call, innermost first.
    pub fn take_hoisted(&mut self) -> Vec<Statement> {
        mem::take(&mut self.hoisted)
    }

    fn encode_argument(&mut self, index: usize, value: &CapturedValue) -> Result<Encoded, EncodeError> {
        if let CapturedValue::Instance(instance) = value
            && self.settings.use_instance_ids
        {
            let name = format!("{LOCAL_PREFIX}{}{index}", ValueKind::Instance);
            return Ok(Encoded::Deferred(self.register(name, instance)));
        }
        let init = self.expression(index, value, 1, false)?;
        let name = local_name(index, value);
        Ok(Encoded::Bound {
            statement: Statement::local(name.clone(), init),
            name,
        })
    }

    /// Registers `instance` under `name` unless its debug id is already bound, and
    /// returns the name that refers to it.
    fn register(&mut self, name: String, instance: &InstanceRef) -> String {
        if let Some(existing) = self.registry.name_for(&instance.debug_id) {
            return existing.to_owned();
        }
        self.registry.register(name.clone(), instance.clone());
        name
    }

    fn next_nested_name(&mut self, kind: ValueKind, index: usize) -> String {
        self.nested_count += 1;
        format!("{LOCAL_PREFIX}{kind}{index}_{}", self.nested_count)
    }

    /// Expression for `value`. `nested` is set for values inside a table, where
    /// tables are hoisted and objects get their own registry names.
    fn expression(
        &mut self,
        index: usize,
        value: &CapturedValue,
        depth: usize,
        nested: bool,
    ) -> Result<Expression, EncodeError> {
        let expression = match value {
            CapturedValue::Nil => Expression::nil(),
            CapturedValue::Boolean(value) => Expression::boolean(*value),
            CapturedValue::Number(value) => Expression::number(*value),
            CapturedValue::String(value) => Expression::string(value.as_str()),
            CapturedValue::Table(pairs) => {
                let table = self.table(index, pairs, depth)?;
                if !nested {
                    return Ok(table);
                }
                let name = self.next_nested_name(ValueKind::Table, index);
                self.hoisted.push(Statement::local(name.clone(), table));
                Expression::identifier(name)
            }
            CapturedValue::Instance(instance) if self.settings.use_instance_ids => {
                let name = self.next_nested_name(ValueKind::Instance, index);
                Expression::identifier(self.register(name, instance))
            }
            CapturedValue::Instance(instance) => Expression::raw(self.resolver.resolve_path(instance)),
            CapturedValue::DateTime { unix_timestamp_millis } => {
                if self.settings.use_now_date_time {
                    Expression::raw("DateTime.now()")
                } else {
                    Expression::raw(format!("DateTime.fromUnixTimestampMillis({unix_timestamp_millis})"))
                }
            }
            CapturedValue::PathWaypoint { position, action } => {
                Expression::raw(format!("PathWaypoint.new(Vector3.new({position}), {action})"))
            }
            CapturedValue::Ray { origin, direction } => {
                Expression::raw(format!("Ray.new(Vector3.new({origin}), Vector3.new({direction}))"))
            }
            CapturedValue::Region3 { position, size } => {
                let (min, max) = region_corners(*position, *size);
                Expression::raw(format!("Region3.new(Vector3.new({min}), Vector3.new({max}))"))
            }
            CapturedValue::ColorSequence(keypoints) => {
                let keypoints: Vec<String> = keypoints.iter().map(color_keypoint).collect();
                Expression::raw(format!("ColorSequence.new({{{}}})", keypoints.join(", ")))
            }
            CapturedValue::NumberSequence(keypoints) => {
                let keypoints: Vec<String> = keypoints.iter().map(number_keypoint).collect();
                Expression::raw(format!("NumberSequence.new({{{}}})", keypoints.join(", ")))
            }
            CapturedValue::ColorSequenceKeypoint(keypoint) => Expression::raw(color_keypoint(keypoint)),
            CapturedValue::NumberSequenceKeypoint(keypoint) => Expression::raw(number_keypoint(keypoint)),
            CapturedValue::Other { type_name, text } => Expression::raw(format!("{type_name}.new({text})")),
        };
        Ok(expression)
    }

    #[expect(clippy::float_cmp, reason = "positional keys are exact integers")]
    fn table(&mut self, index: usize, pairs: &TablePairs, depth: usize) -> Result<Expression, EncodeError> {
        if depth > MAX_TABLE_DEPTH {
            return Err(EncodeError::TooDeep { limit: MAX_TABLE_DEPTH });
        }
        let mut entries: Vec<&(CapturedValue, CapturedValue)> = pairs.iter().collect();
        if self.settings.sort_table_keys {
            entries.sort_by(|a, b| compare_keys(&a.0, &b.0));
        }

        let mut next_slot: u32 = 1;
        let mut fields = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let field = match key {
                CapturedValue::Nil => return Err(EncodeError::NilKey),
                CapturedValue::Number(number) if number.is_nan() => return Err(EncodeError::NanKey),
                CapturedValue::Number(number) if *number == f64::from(next_slot) => {
                    next_slot += 1;
                    TableField::TableValue {
                        value: self.expression(index, value, depth + 1, true)?,
                    }
                }
                CapturedValue::String(name) if is_identifier(name) => TableField::TableKeyString {
                    key: Identifier::new(name.as_str()),
                    value: self.expression(index, value, depth + 1, true)?,
                },
                key => TableField::TableKey {
                    key: self.expression(index, key, depth + 1, true)?,
                    value: self.expression(index, value, depth + 1, true)?,
                },
            };
            fields.push(field);
        }
        Ok(Expression::table(fields))
    }
}

/// Name of the local bound to a top-level argument.
fn local_name(index: usize, value: &CapturedValue) -> String {
    match value {
        CapturedValue::Other { type_name, .. } => {
            let tag: String = type_name
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
                .collect();
            format!("{LOCAL_PREFIX}{tag}_{index}")
        }
        value => format!("{LOCAL_PREFIX}{}{index}", value.kind()),
    }
}

/// Numbers first in ascending order, then everything else by key text.
fn compare_keys(a: &CapturedValue, b: &CapturedValue) -> Ordering {
    match (a, b) {
        (CapturedValue::Number(a), CapturedValue::Number(b)) => a.total_cmp(b),
        (CapturedValue::Number(_), _) => Ordering::Less,
        (_, CapturedValue::Number(_)) => Ordering::Greater,
        (a, b) => key_text(a).cmp(&key_text(b)),
    }
}

fn key_text(key: &CapturedValue) -> String {
    match key {
        CapturedValue::String(text) => text.clone(),
        CapturedValue::Boolean(value) => value.to_string(),
        CapturedValue::Instance(instance) => instance.debug_id.clone(),
        other => other.kind().to_string(),
    }
}

/// Minimum and maximum corners of a region centered on `position`.
fn region_corners(position: Vector3, size: Vector3) -> (Vector3, Vector3) {
    let half = Vector3::new(size.x / 2.0, size.y / 2.0, size.z / 2.0);
    (
        Vector3::new(position.x - half.x, position.y - half.y, position.z - half.z),
        Vector3::new(position.x + half.x, position.y + half.y, position.z + half.z),
    )
}

fn color_keypoint(keypoint: &ColorSequenceKeypoint) -> String {
    let [r, g, b] = keypoint.value.to_rgb();
    format!(
        "ColorSequenceKeypoint.new({}, Color3.fromRGB({r}, {g}, {b}))",
        number_raw(keypoint.time)
    )
}

fn number_keypoint(keypoint: &NumberSequenceKeypoint) -> String {
    format!(
        "NumberSequenceKeypoint.new({}, {}, {})",
        number_raw(keypoint.time),
        number_raw(keypoint.value),
        number_raw(keypoint.envelope)
    )
}
