//! # Props
//!
//! Small models that lean on instancing and nested builds.
//!
//! - [`Tower`]: cylinder with a cone roof and a hollow core
//! - [`Table`]: a top with four legs instanced from one temporary leg
//! - [`PicketFence`]: rails plus pickets instanced from a hidden template

use glam::DVec3;
use paragen::{at, BuildError, BuildResult, Model, Paragen, PrimSpec, TransformSpec};
use paragen_scene::{Host, PrimitiveKind, Rgba};

// =============================================================================
// TOWER
// =============================================================================

/// Round tower with a conical roof and a cube-shaped hollow in its core.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub radius: f64,
    pub height: f64,
    pub roof_height: f64,
    /// Edge length of the hollow cut from the center.
    pub core_size: f64,
}

impl Default for Tower {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 4.0,
            roof_height: 2.0,
            core_size: 1.0,
        }
    }
}

impl Model for Tower {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        if self.core_size >= 2.0 * self.radius {
            return Err(BuildError::model(
                "Tower",
                format!(
                    "core {} does not fit inside radius {}",
                    self.core_size, self.radius
                ),
            ));
        }

        p.union(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", self.radius)
                .param("depth", self.height),
            at(0.0, 0.0, self.height / 2.0),
        )?;
        p.union(
            PrimSpec::new(PrimitiveKind::Cone)
                .param("radius1", self.radius)
                .param("depth", self.roof_height),
            at(0.0, 0.0, self.height + self.roof_height / 2.0),
        )?;
        p.difference(
            PrimSpec::new(PrimitiveKind::Cube).param("size", self.core_size),
            at(0.0, 0.0, self.height / 2.0),
        )
    }
}

// =============================================================================
// TABLE
// =============================================================================

/// Rectangular table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub top_thickness: f64,
    pub leg_radius: f64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            width: 2.0,
            depth: 1.0,
            height: 0.8,
            top_thickness: 0.06,
            leg_radius: 0.04,
        }
    }
}

const WOOD: Rgba = Rgba([0.45, 0.30, 0.15, 1.0]);

impl Model for Table {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        p.material("Wood", WOOD)?;

        let top_z = self.height - self.top_thickness / 2.0;
        p.union(
            PrimitiveKind::Cube,
            at(0.0, 0.0, top_z).scale(DVec3::new(
                self.width / 2.0,
                self.depth / 2.0,
                self.top_thickness / 2.0,
            )),
        )?;

        let leg_height = self.height - self.top_thickness;
        let leg = p.prim(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", self.leg_radius)
                .param("depth", leg_height)
                .param("vertices", 12),
        )?;

        let inset_x = self.width / 2.0 - 2.0 * self.leg_radius;
        let inset_y = self.depth / 2.0 - 2.0 * self.leg_radius;
        for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
            p.instance("Leg", leg, at(sx * inset_x, sy * inset_y, leg_height / 2.0))?;
        }
        Ok(())
    }
}

// =============================================================================
// PICKET FENCE
// =============================================================================

/// Straight fence along +X: two rails and evenly spaced pointed pickets.
#[derive(Debug, Clone, PartialEq)]
pub struct PicketFence {
    pub pickets: usize,
    pub spacing: f64,
    pub picket_height: f64,
    pub picket_width: f64,
}

impl Default for PicketFence {
    fn default() -> Self {
        Self {
            pickets: 8,
            spacing: 0.5,
            picket_height: 1.2,
            picket_width: 0.1,
        }
    }
}

const PAINT: Rgba = Rgba([0.95, 0.95, 0.92, 1.0]);

impl Model for PicketFence {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        if self.pickets == 0 {
            return Err(BuildError::model("PicketFence", "needs at least one picket"));
        }
        p.material("Paint", PAINT)?;

        let length = self.spacing * (self.pickets - 1) as f64;
        for rail_z in [0.3, 0.8] {
            let z = rail_z * self.picket_height;
            p.union(
                PrimitiveKind::Cube,
                at(length / 2.0, -self.picket_width, z).scale(DVec3::new(
                    length / 2.0 + self.picket_width,
                    0.02,
                    0.04,
                )),
            )?;
        }

        let half_width = self.picket_width / 2.0;
        let board_height = self.picket_height - self.picket_width;
        let picket = p.template("Picket", |p| {
            p.union(
                PrimitiveKind::Cube,
                at(0.0, 0.0, board_height / 2.0).scale(DVec3::new(
                    half_width,
                    0.02,
                    board_height / 2.0,
                )),
            )?;
            p.union(
                PrimSpec::new(PrimitiveKind::Cone)
                    .param("radius1", half_width * std::f64::consts::SQRT_2)
                    .param("depth", self.picket_width)
                    .param("vertices", 4),
                at(0.0, 0.0, board_height + half_width),
            )
        })?;

        for i in 0..self.pickets {
            p.instance("Picket", picket, at(i as f64 * self.spacing, 0.0, 0.0))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paragen_scene::Scene;

    #[test]
    fn test_tower_is_single_object() {
        let mut paragen = Paragen::new(Scene::new());
        let tower = paragen
            .build_model("T1", TransformSpec::new(), &Tower::default())
            .unwrap();

        let scene = paragen.host();
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.geometry_of(tower).unwrap().boolean_count(), 2);
    }

    #[test]
    fn test_tower_core_must_fit() {
        let mut paragen = Paragen::new(Scene::new());
        let tower = Tower {
            core_size: 3.0,
            ..Tower::default()
        };
        assert!(paragen
            .build_model("T1", TransformSpec::new(), &tower)
            .is_err());
    }

    #[test]
    fn test_table_legs_share_one_mesh() {
        let mut paragen = Paragen::new(Scene::new());
        let table = paragen
            .build_model("Table", TransformSpec::new(), &Table::default())
            .unwrap();

        let scene = paragen.host();
        let legs = scene.children(table);
        assert_eq!(legs.len(), 4);
        let mesh = scene.object(legs[0]).unwrap().mesh;
        assert!(legs.iter().all(|leg| scene.object(*leg).unwrap().mesh == mesh));
        // table + leg
        assert_eq!(scene.mesh_count(), 2);
    }

    #[test]
    fn test_fence_pickets_follow_template() {
        let mut paragen = Paragen::new(Scene::new());
        let fence = paragen
            .build_model("Fence", TransformSpec::new(), &PicketFence::default())
            .unwrap();

        let scene = paragen.host();
        let template = scene.find_object("Fence.Picket").unwrap();
        assert!(scene.object(template).unwrap().template);
        // template + 8 pickets
        assert_eq!(scene.children(fence).len(), 9);
        let mesh = scene.object(template).unwrap().mesh.unwrap();
        assert_eq!(scene.mesh_users(mesh), 9);
    }

    #[test]
    fn test_empty_fence_rejected() {
        let mut paragen = Paragen::new(Scene::new());
        let fence = PicketFence {
            pickets: 0,
            ..PicketFence::default()
        };
        let result = paragen.build_model("Fence", TransformSpec::new(), &fence);
        assert!(matches!(result, Err(BuildError::Model { .. })));
    }
}
