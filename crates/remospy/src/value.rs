//! Values captured from an intercepted call.
//!
//! [`CapturedValue`] is the owned, serializable snapshot of one argument as the
//! interception layer saw it. It carries no live handles: objects are described by
//! an [`InstanceRef`] holding their debug id and ancestry, which is everything the
//! encoder and the path resolver need.
//!
//! # JSON
//!
//! Values use serde's externally tagged format, e.g. `"Nil"`, `{"Number": 42}`,
//! `{"Table": [[{"String": "key"}, {"Boolean": true}]]}`. Primitive variants also
//! accept lowercase aliases (`"nil"`, `{"string": "hi"}`).

use std::fmt;

use crate::literal::number_raw;

/// A captured argument value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CapturedValue {
    #[serde(alias = "nil")]
    Nil,
    #[serde(alias = "boolean")]
    Boolean(bool),
    #[serde(alias = "number")]
    Number(f64),
    #[serde(alias = "string")]
    String(String),
    /// A table as `(key, value)` pairs in traversal order.
    #[serde(alias = "table")]
    Table(TablePairs),
    /// A reference to a scene-graph object.
    #[serde(alias = "instance")]
    Instance(InstanceRef),
    DateTime {
        unix_timestamp_millis: i64,
    },
    PathWaypoint {
        position: Vector3,
        /// Fully qualified enum item, e.g. `Enum.PathWaypointAction.Walk`.
        action: String,
    },
    Ray {
        origin: Vector3,
        direction: Vector3,
    },
    /// An axis-aligned region given by its center and size.
    Region3 {
        position: Vector3,
        size: Vector3,
    },
    ColorSequence(Vec<ColorSequenceKeypoint>),
    NumberSequence(Vec<NumberSequenceKeypoint>),
    ColorSequenceKeypoint(ColorSequenceKeypoint),
    NumberSequenceKeypoint(NumberSequenceKeypoint),
    /// Any other host value: its type name and its `tostring` text.
    Other {
        type_name: String,
        text: String,
    },
}

impl CapturedValue {
    /// Builds a table from ordered key/value pairs.
    pub fn table(pairs: impl IntoIterator<Item = (Self, Self)>) -> Self {
        Self::Table(pairs.into_iter().collect())
    }

    /// Builds a sequence table with keys `1..=n`.
    pub fn array(values: impl IntoIterator<Item = Self>) -> Self {
        Self::Table(
            values
                .into_iter()
                .zip(1_u32..)
                .map(|(value, key)| (Self::Number(f64::from(key)), value))
                .collect(),
        )
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Table(_) => ValueKind::Table,
            Self::Instance(_) => ValueKind::Instance,
            Self::DateTime { .. } => ValueKind::DateTime,
            Self::PathWaypoint { .. } => ValueKind::PathWaypoint,
            Self::Ray { .. } => ValueKind::Ray,
            Self::Region3 { .. } => ValueKind::Region3,
            Self::ColorSequence(_) => ValueKind::ColorSequence,
            Self::NumberSequence(_) => ValueKind::NumberSequence,
            Self::ColorSequenceKeypoint(_) => ValueKind::ColorSequenceKeypoint,
            Self::NumberSequenceKeypoint(_) => ValueKind::NumberSequenceKeypoint,
            Self::Other { .. } => ValueKind::Other,
        }
    }
}

impl From<&str> for CapturedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for CapturedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for CapturedValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CapturedValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for CapturedValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<InstanceRef> for CapturedValue {
    fn from(value: InstanceRef) -> Self {
        Self::Instance(value)
    }
}

/// Kind of a captured value, displayed as the tag used in synthesized local names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum ValueKind {
    Nil,
    Boolean,
    Number,
    String,
    Table,
    Instance,
    DateTime,
    PathWaypoint,
    Ray,
    // the trailing underscore keeps the index from running into the digit
    #[strum(serialize = "Region3_")]
    Region3,
    ColorSequence,
    NumberSequence,
    ColorSequenceKeypoint,
    NumberSequenceKeypoint,
    Other,
}

/// Ordered `(key, value)` pairs of a captured table.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct TablePairs(Vec<(CapturedValue, CapturedValue)>);

impl TablePairs {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (CapturedValue, CapturedValue)> {
        self.0.iter()
    }
}

impl From<Vec<(CapturedValue, CapturedValue)>> for TablePairs {
    fn from(pairs: Vec<(CapturedValue, CapturedValue)>) -> Self {
        Self(pairs)
    }
}

impl FromIterator<(CapturedValue, CapturedValue)> for TablePairs {
    fn from_iter<T: IntoIterator<Item = (CapturedValue, CapturedValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TablePairs {
    type Item = (CapturedValue, CapturedValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TablePairs {
    type Item = &'a (CapturedValue, CapturedValue);
    type IntoIter = std::slice::Iter<'a, (CapturedValue, CapturedValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Formats as constructor arguments: `x, y, z`.
impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", number_raw(self.x), number_raw(self.y), number_raw(self.z))
    }
}

/// An RGB color with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Color3 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color3 {
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0..=255`, as taken by `Color3.fromRGB`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "clamped to the u8 range first")]
    #[expect(clippy::cast_sign_loss, reason = "clamped to the u8 range first")]
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|component| (component * 255.0).round().clamp(0.0, 255.0) as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ColorSequenceKeypoint {
    pub time: f64,
    pub value: Color3,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct NumberSequenceKeypoint {
    pub time: f64,
    pub value: f64,
    #[serde(default)]
    pub envelope: f64,
}

/// Where an object sits in the hierarchy, for the parts of a path that are not
/// derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum InstanceRole {
    #[default]
    Plain,
    /// The root object, written `game`.
    DataModel,
    /// Written `workspace`.
    Workspace,
    /// A direct service of the root, reached with `:GetService`.
    Service,
    /// The local player object.
    LocalPlayer,
}

/// Snapshot of a live object: its stable debug id plus enough of its ancestry to
/// describe a path to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct InstanceRef {
    pub debug_id: String,
    pub name: String,
    pub class_name: String,
    #[serde(default)]
    pub role: InstanceRole,
    /// `None` for the root and for objects detached from the hierarchy.
    #[serde(default)]
    pub parent: Option<Box<InstanceRef>>,
}

impl InstanceRef {
    pub fn new(debug_id: impl Into<String>, name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            debug_id: debug_id.into(),
            name: name.into(),
            class_name: class_name.into(),
            role: InstanceRole::Plain,
            parent: None,
        }
    }

    /// The hierarchy root.
    #[must_use]
    pub fn game() -> Self {
        Self::new("game", "Game", "DataModel").with_role(InstanceRole::DataModel)
    }

    #[must_use]
    pub fn with_role(mut self, role: InstanceRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn child_of(mut self, parent: Self) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}
