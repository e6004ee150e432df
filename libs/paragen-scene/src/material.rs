//! Surface materials: a base color and a metallic factor on the host's
//! principal shading node.

use serde::{Deserialize, Serialize};

/// Linear RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f64; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self([r, g, b, a])
    }

    /// Opaque color.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self([r, g, b, 1.0])
    }

    /// Copy with every channel clamped to `[0, 1]`; NaN becomes 0.
    pub fn clamped(self) -> Self {
        Self(self.0.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }))
    }

    pub fn r(&self) -> f64 {
        self.0[0]
    }

    pub fn g(&self) -> f64 {
        self.0[1]
    }

    pub fn b(&self) -> f64 {
        self.0[2]
    }

    pub fn a(&self) -> f64 {
        self.0[3]
    }
}

impl From<[f64; 4]> for Rgba {
    fn from(value: [f64; 4]) -> Self {
        Rgba(value)
    }
}

impl From<(f64, f64, f64, f64)> for Rgba {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        Rgba([r, g, b, a])
    }
}

/// A node-based material as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub base_color: Rgba,
    pub metallic: f64,
    /// Whether the shading node graph is enabled.
    pub use_nodes: bool,
}
