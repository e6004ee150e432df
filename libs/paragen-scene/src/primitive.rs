//! # Primitive Kinds
//!
//! The closed set of mesh primitives a host can construct, each mapped through
//! a static table to the host operator that builds it and the parameters that
//! operator accepts.
//!
//! ## Parameters
//!
//! Parameters travel as an open [`PrimitiveParams`] map because every kind
//! takes a different set. The build core forwards them untouched; the host
//! validates them with [`PrimitiveKind::resolve`], which also fills in the
//! host defaults for anything left out.
//!
//! ## Example
//!
//! ```rust
//! use paragen_scene::{PrimitiveKind, PrimitiveParams};
//!
//! let params = PrimitiveParams::new().with("radius", 1.5).with("depth", 8.0);
//! let resolved = PrimitiveKind::Cylinder.resolve(&params).unwrap();
//! assert_eq!(resolved.get_f64("radius"), Some(1.5));
//! assert_eq!(resolved.get_i64("vertices"), Some(32));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use config::constants::{
    DEFAULT_CIRCLE_FILL, DEFAULT_CUBE_SIZE, DEFAULT_DEPTH, DEFAULT_END_FILL,
    DEFAULT_ICO_SUBDIVISIONS, DEFAULT_MONKEY_SIZE, DEFAULT_PLANE_SIZE, DEFAULT_RADIUS,
    DEFAULT_SPHERE_RINGS, DEFAULT_SPHERE_SEGMENTS, DEFAULT_TORUS_MAJOR_RADIUS,
    DEFAULT_TORUS_MAJOR_SEGMENTS, DEFAULT_TORUS_MINOR_RADIUS, DEFAULT_TORUS_MINOR_SEGMENTS,
    DEFAULT_VERTICES,
};
use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};

// =============================================================================
// PARAMETER VALUES
// =============================================================================

/// A single primitive parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric view; integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Text(_) => "string",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

// =============================================================================
// PARAMETER MAP
// =============================================================================

/// Kind-specific primitive parameters, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveParams(BTreeMap<String, ParamValue>);

impl PrimitiveParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// PARAMETER TABLE
// =============================================================================

/// Accepted type and default of one primitive parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSpec {
    Float(f64),
    Int(i64),
    Bool(bool),
    Choice {
        default: &'static str,
        options: &'static [&'static str],
    },
}

impl ParamSpec {
    fn default_value(&self) -> ParamValue {
        match *self {
            ParamSpec::Float(v) => ParamValue::Float(v),
            ParamSpec::Int(v) => ParamValue::Int(v),
            ParamSpec::Bool(v) => ParamValue::Bool(v),
            ParamSpec::Choice { default, .. } => ParamValue::Text(default.to_string()),
        }
    }

    /// Checks `value` against this spec, returning the normalized value.
    fn accept(&self, value: &ParamValue) -> Result<ParamValue, String> {
        match (self, value) {
            (ParamSpec::Float(_), ParamValue::Float(v)) if v.is_finite() => {
                Ok(ParamValue::Float(*v))
            }
            (ParamSpec::Float(_), ParamValue::Float(_)) => Err("value is not finite".to_string()),
            (ParamSpec::Float(_), ParamValue::Int(v)) => Ok(ParamValue::Float(*v as f64)),
            (ParamSpec::Int(_), ParamValue::Int(v)) => Ok(ParamValue::Int(*v)),
            (ParamSpec::Bool(_), ParamValue::Bool(v)) => Ok(ParamValue::Bool(*v)),
            (ParamSpec::Choice { options, .. }, ParamValue::Text(v)) => {
                if options.contains(&v.as_str()) {
                    Ok(ParamValue::Text(v.clone()))
                } else {
                    Err(format!("'{}' is not one of {:?}", v, options))
                }
            }
            (spec, other) => Err(format!(
                "expected {}, got {}",
                spec.type_name(),
                other.type_name()
            )),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParamSpec::Float(_) => "float",
            ParamSpec::Int(_) => "int",
            ParamSpec::Bool(_) => "bool",
            ParamSpec::Choice { .. } => "enum string",
        }
    }
}

/// Named parameter of a primitive constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDef {
    pub name: &'static str,
    pub spec: ParamSpec,
}

const FILL_TYPES: &[&str] = &["NOTHING", "NGON", "TRIFAN"];

const fn float(name: &'static str, default: f64) -> ParamDef {
    ParamDef {
        name,
        spec: ParamSpec::Float(default),
    }
}

const fn int(name: &'static str, default: i64) -> ParamDef {
    ParamDef {
        name,
        spec: ParamSpec::Int(default),
    }
}

const fn fill(name: &'static str, default: &'static str) -> ParamDef {
    ParamDef {
        name,
        spec: ParamSpec::Choice {
            default,
            options: FILL_TYPES,
        },
    }
}

const CUBE_PARAMS: &[ParamDef] = &[float("size", DEFAULT_CUBE_SIZE)];

const CYLINDER_PARAMS: &[ParamDef] = &[
    int("vertices", DEFAULT_VERTICES),
    float("radius", DEFAULT_RADIUS),
    float("depth", DEFAULT_DEPTH),
    fill("end_fill_type", DEFAULT_END_FILL),
];

const CONE_PARAMS: &[ParamDef] = &[
    int("vertices", DEFAULT_VERTICES),
    float("radius1", DEFAULT_RADIUS),
    float("radius2", 0.0),
    float("depth", DEFAULT_DEPTH),
    fill("end_fill_type", DEFAULT_END_FILL),
];

const UV_SPHERE_PARAMS: &[ParamDef] = &[
    int("segments", DEFAULT_SPHERE_SEGMENTS),
    int("ring_count", DEFAULT_SPHERE_RINGS),
    float("radius", DEFAULT_RADIUS),
];

const ICO_SPHERE_PARAMS: &[ParamDef] = &[
    int("subdivisions", DEFAULT_ICO_SUBDIVISIONS),
    float("radius", DEFAULT_RADIUS),
];

const CIRCLE_PARAMS: &[ParamDef] = &[
    int("vertices", DEFAULT_VERTICES),
    float("radius", DEFAULT_RADIUS),
    fill("fill_type", DEFAULT_CIRCLE_FILL),
];

const PLANE_PARAMS: &[ParamDef] = &[float("size", DEFAULT_PLANE_SIZE)];

const TORUS_PARAMS: &[ParamDef] = &[
    int("major_segments", DEFAULT_TORUS_MAJOR_SEGMENTS),
    int("minor_segments", DEFAULT_TORUS_MINOR_SEGMENTS),
    float("major_radius", DEFAULT_TORUS_MAJOR_RADIUS),
    float("minor_radius", DEFAULT_TORUS_MINOR_RADIUS),
];

const MONKEY_PARAMS: &[ParamDef] = &[float("size", DEFAULT_MONKEY_SIZE)];

// =============================================================================
// PRIMITIVE KIND
// =============================================================================

/// Mesh primitive the host knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Cube,
    Cylinder,
    Cone,
    UvSphere,
    IcoSphere,
    Circle,
    Plane,
    Torus,
    Monkey,
}

struct KindEntry {
    name: &'static str,
    object_name: &'static str,
    closed: bool,
    params: &'static [ParamDef],
}

impl PrimitiveKind {
    /// Every kind, in table order.
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Cube,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::UvSphere,
        PrimitiveKind::IcoSphere,
        PrimitiveKind::Circle,
        PrimitiveKind::Plane,
        PrimitiveKind::Torus,
        PrimitiveKind::Monkey,
    ];

    fn entry(self) -> &'static KindEntry {
        const CUBE: KindEntry = KindEntry {
            name: "cube",
            object_name: "Cube",
            closed: true,
            params: CUBE_PARAMS,
        };
        const CYLINDER: KindEntry = KindEntry {
            name: "cylinder",
            object_name: "Cylinder",
            closed: true,
            params: CYLINDER_PARAMS,
        };
        const CONE: KindEntry = KindEntry {
            name: "cone",
            object_name: "Cone",
            closed: true,
            params: CONE_PARAMS,
        };
        const UV_SPHERE: KindEntry = KindEntry {
            name: "uv_sphere",
            object_name: "Sphere",
            closed: true,
            params: UV_SPHERE_PARAMS,
        };
        const ICO_SPHERE: KindEntry = KindEntry {
            name: "ico_sphere",
            object_name: "Icosphere",
            closed: true,
            params: ICO_SPHERE_PARAMS,
        };
        const CIRCLE: KindEntry = KindEntry {
            name: "circle",
            object_name: "Circle",
            closed: false,
            params: CIRCLE_PARAMS,
        };
        const PLANE: KindEntry = KindEntry {
            name: "plane",
            object_name: "Plane",
            closed: false,
            params: PLANE_PARAMS,
        };
        const TORUS: KindEntry = KindEntry {
            name: "torus",
            object_name: "Torus",
            closed: true,
            params: TORUS_PARAMS,
        };
        // Suzanne has open eye sockets
        const MONKEY: KindEntry = KindEntry {
            name: "monkey",
            object_name: "Suzanne",
            closed: false,
            params: MONKEY_PARAMS,
        };

        match self {
            PrimitiveKind::Cube => &CUBE,
            PrimitiveKind::Cylinder => &CYLINDER,
            PrimitiveKind::Cone => &CONE,
            PrimitiveKind::UvSphere => &UV_SPHERE,
            PrimitiveKind::IcoSphere => &ICO_SPHERE,
            PrimitiveKind::Circle => &CIRCLE,
            PrimitiveKind::Plane => &PLANE,
            PrimitiveKind::Torus => &TORUS,
            PrimitiveKind::Monkey => &MONKEY,
        }
    }

    /// Short snake_case name (`"uv_sphere"`).
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Host operator building this kind (`"primitive_uv_sphere_add"`).
    pub fn operator(self) -> String {
        format!("primitive_{}_add", self.name())
    }

    /// Name the host gives a freshly created object of this kind.
    pub fn default_object_name(self) -> &'static str {
        self.entry().object_name
    }

    /// Whether the default mesh of this kind encloses a volume.
    ///
    /// Open kinds (circles, planes) produce non-manifold results when used in
    /// booleans.
    pub fn is_closed(self) -> bool {
        self.entry().closed
    }

    /// Parameters accepted by the constructor.
    pub fn params(self) -> &'static [ParamDef] {
        self.entry().params
    }

    /// Validates `params` and fills in defaults for missing entries.
    ///
    /// Unknown names, wrong types and values outside an enum are rejected the
    /// way the host's own constructor would reject them.
    pub fn resolve(self, params: &PrimitiveParams) -> HostResult<PrimitiveParams> {
        let defs = self.params();

        for (name, _) in params.iter() {
            if !defs.iter().any(|def| def.name == name) {
                return Err(HostError::invalid_parameter(
                    self.name(),
                    name,
                    "unknown parameter",
                ));
            }
        }

        let mut resolved = PrimitiveParams::new();
        for def in defs {
            let value = match params.get(def.name) {
                Some(given) => def
                    .spec
                    .accept(given)
                    .map_err(|reason| HostError::invalid_parameter(self.name(), def.name, reason))?,
                None => def.spec.default_value(),
            };
            resolved.insert(def.name, value);
        }
        Ok(resolved)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HostError::UnknownPrimitive(s.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
