//! # Sand Castle
//!
//! A central keep surrounded by eight towers on a 3x3 grid, joined by an
//! outer square wall and an inner cross of walls.
//!
//! The corner towers come from one tower object composed in its own frame
//! and unioned repeatedly; the walls are one stretched cube unioned at each
//! side.

use std::f64::consts::PI;

use glam::DVec3;
use paragen::{at, BuildError, BuildResult, Model, Paragen, PrimSpec, TransformSpec};
use paragen_scene::{Host, PrimitiveKind, Rgba};

/// Sand castle dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SandCastle {
    /// Height of each tower's cylinder.
    pub tower_base_height: f64,
    /// Height of each tower's tip.
    pub tower_peak_height: f64,
}

impl Default for SandCastle {
    fn default() -> Self {
        Self {
            tower_base_height: 4.0,
            tower_peak_height: 6.0,
        }
    }
}

/// Tower grid offsets; the center cell holds the keep.
const GRID: [f64; 3] = [-10.0, 0.0, 10.0];

const SAND: Rgba = Rgba([0.65, 0.55, 0.15, 1.0]);

impl Model for SandCastle {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        let base = self.tower_base_height;
        let peak = self.tower_peak_height;
        let cone_height = peak - base;
        if base <= 0.0 || cone_height <= 0.0 {
            return Err(BuildError::model(
                "SandCastle",
                format!("tower peak ({peak}) must be above a positive base ({base})"),
            ));
        }

        // Keep
        p.union(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", 1.5)
                .param("depth", 2.0 * base),
            at(0.0, 0.0, base),
        )?;
        p.union(
            PrimSpec::new(PrimitiveKind::Cone)
                .param("radius1", 1.5)
                .param("depth", 1.5 * cone_height),
            at(0.0, 0.0, 2.0 * base + 0.75 * cone_height),
        )?;

        let tower = p.prim(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", 1.0)
                .param("depth", base),
        )?;
        p.scoped(tower, |p| {
            p.union(
                PrimSpec::new(PrimitiveKind::Cone)
                    .param("radius1", 1.0)
                    .param("depth", cone_height),
                at(0.0, 0.0, peak / 2.0),
            )
        })?;

        for x in GRID {
            for y in GRID {
                if x == 0.0 && y == 0.0 {
                    continue;
                }
                p.union(tower, at(x, y, base / 2.0))?;
            }
        }

        let wall = p.prim(PrimitiveKind::Cube)?;
        for quarter in 0..4 {
            let theta = 0.5 * PI * quarter as f64;
            let (sin, cos) = theta.sin_cos();

            // Outer wall
            p.union(
                wall,
                TransformSpec::new()
                    .position(DVec3::new(10.0 * cos, 10.0 * sin, 0.4 * base))
                    .rotation(DVec3::new(0.0, 0.0, theta))
                    .scale(DVec3::new(0.3, 10.0, 0.4 * base)),
            )?;

            // Inner wall
            p.union(
                wall,
                TransformSpec::new()
                    .position(DVec3::new(5.0 * cos, 5.0 * sin, 0.3 * base))
                    .rotation(DVec3::new(0.0, 0.0, theta + PI / 2.0))
                    .scale(DVec3::new(0.3, 5.0, 0.3 * base)),
            )?;
        }

        p.material("Sand", SAND)?;
        p.delete(&[tower, wall])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paragen_scene::Scene;

    #[test]
    fn test_castle_bakes_everything_into_one_object() {
        let mut paragen = Paragen::new(Scene::new());
        let castle = paragen
            .build_model("Sand Castle", at(0.0, 50.0, 0.0), &SandCastle::default())
            .unwrap();

        let scene = paragen.host();
        assert_eq!(scene.object_count(), 1);
        // keep roof, 8 towers each carrying its own roof, 8 walls
        assert_eq!(scene.geometry_of(castle).unwrap().boolean_count(), 25);
        assert_eq!(
            scene.material_names(castle),
            vec!["Sand Castle.Sand".to_string()]
        );
    }

    #[test]
    fn test_castle_footprint() {
        let mut paragen = Paragen::new(Scene::new());
        let castle = paragen
            .build_model("Sand Castle", at(0.0, 50.0, 0.0), &SandCastle::default())
            .unwrap();

        let bounds = paragen.host().world_bounds(castle).unwrap().unwrap();
        assert!((bounds.center().y - 50.0).abs() < 1e-6);
        assert!(bounds.size().x >= 22.0 - 1e-6);
        assert!(bounds.max.z > 10.0);
    }

    #[test]
    fn test_inverted_tower_rejected() {
        let mut paragen = Paragen::new(Scene::new());
        let castle = SandCastle {
            tower_base_height: 6.0,
            tower_peak_height: 4.0,
        };
        let result = paragen.build_model("Bad Castle", TransformSpec::new(), &castle);
        assert!(matches!(result, Err(BuildError::Model { .. })));
        assert_eq!(paragen.depth(), 0);
    }
}
