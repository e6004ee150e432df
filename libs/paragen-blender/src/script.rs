//! # Python Script
//!
//! Accumulates `bpy` statements and renders them as a standalone script.
//!
//! ## Literals
//!
//! Strings are written as JSON string literals, which Python reads as the
//! same string. Floats use Rust's shortest round-trip form, so a script
//! reproduces the recorded values exactly.

use std::fmt;

use glam::{DMat4, DVec3};
use paragen_scene::{ParamValue, PrimitiveParams, Rgba};

/// Helpers every script starts with.
const PRELUDE: &str = "\
import bpy
import mathutils


def _delete(obj):
    for child in list(obj.children):
        _delete(child)
    bpy.data.objects.remove(obj, do_unlink=True)


def _delete_named(name):
    if name in bpy.data.objects:
        _delete(bpy.data.objects[name])


def _remove_material(name):
    if name in bpy.data.materials:
        bpy.data.materials.remove(bpy.data.materials[name])
";

/// A generated Blender Python script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PythonScript {
    lines: Vec<String>,
}

impl PythonScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one statement.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends a comment line.
    pub fn comment(&mut self, text: &str) {
        self.lines.push(format!("# {text}"));
    }

    /// Statements recorded so far, without the prelude.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any statement contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Full script: prelude followed by every statement.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PythonScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PRELUDE}")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// =============================================================================
// LITERALS
// =============================================================================

/// Python string literal.
pub fn py_str(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

pub fn py_float(value: f64) -> String {
    format!("{value:?}")
}

pub fn py_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

pub fn py_vec3(v: DVec3) -> String {
    format!("({}, {}, {})", py_float(v.x), py_float(v.y), py_float(v.z))
}

pub fn py_rgba(color: Rgba) -> String {
    let [r, g, b, a] = color.0;
    format!(
        "({}, {}, {}, {})",
        py_float(r),
        py_float(g),
        py_float(b),
        py_float(a)
    )
}

/// `mathutils.Matrix` constructor, rows first.
pub fn py_matrix(m: &DMat4) -> String {
    let rows: Vec<String> = (0..4)
        .map(|i| {
            let row = m.row(i);
            format!(
                "({}, {}, {}, {})",
                py_float(row.x),
                py_float(row.y),
                py_float(row.z),
                py_float(row.w)
            )
        })
        .collect();
    format!("mathutils.Matrix(({}))", rows.join(", "))
}

pub fn py_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Bool(b) => py_bool(*b),
        ParamValue::Int(i) => i.to_string(),
        ParamValue::Float(x) => py_float(*x),
        ParamValue::Text(s) => py_str(s),
    }
}

/// `name=value` keyword arguments in parameter-name order.
pub fn py_kwargs(params: &PrimitiveParams) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{name}={}", py_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(py_str("Sand Castle"), "\"Sand Castle\"");
        assert_eq!(py_str("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(py_float(1.0), "1.0");
        assert_eq!(py_float(0.25), "0.25");
        assert_eq!(py_vec3(DVec3::new(0.0, 30.0, -1.5)), "(0.0, 30.0, -1.5)");
    }

    #[test]
    fn test_kwargs_are_sorted_by_name() {
        let params = PrimitiveParams::new()
            .with("vertices", 16)
            .with("radius", 0.1)
            .with("fill_type", "TRIFAN");
        assert_eq!(
            py_kwargs(&params),
            "fill_type=\"TRIFAN\", radius=0.1, vertices=16"
        );
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(
            py_matrix(&DMat4::IDENTITY),
            "mathutils.Matrix(((1.0, 0.0, 0.0, 0.0), (0.0, 1.0, 0.0, 0.0), \
             (0.0, 0.0, 1.0, 0.0), (0.0, 0.0, 0.0, 1.0)))"
        );
    }

    #[test]
    fn test_render_starts_with_prelude() {
        let mut script = PythonScript::new();
        script.push("bpy.ops.object.select_all(action='DESELECT')");
        let text = script.render();
        assert!(text.starts_with("import bpy\n"));
        assert!(text.ends_with("bpy.ops.object.select_all(action='DESELECT')\n"));
        assert!(script.contains("DESELECT"));
    }
}
