//! # Cactus Drink
//!
//! A mug with a handle, a hollowed top and a field of spines. Spine placement
//! comes from a seeded generator, so the same seed always rebuilds the same
//! cup.

use std::f64::consts::PI;

use glam::DVec3;
use log::debug;
use paragen::{at, BuildError, BuildResult, Model, Paragen, PrimSpec, TransformSpec};
use paragen_scene::{Host, ObjectId, PrimitiveKind, Rgba};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::water::Water;

const CACTUS: Rgba = Rgba([0.10, 0.60, 0.10, 1.0]);
const WATER: Rgba = Rgba([0.10, 0.10, 0.60, 1.0]);
const SPINE: Rgba = Rgba([0.80, 0.80, 0.10, 1.0]);

/// Spines stay clear of the handle side by this angle, in radians.
const HANDLE_CLEARANCE: f64 = 0.7;

/// Cactus mug parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CactusDrink {
    pub height: f64,
    pub spines: usize,
    pub spine_seed: u64,
    /// Shallow water-colored hollow instead of a deep cup.
    pub original: bool,
}

impl Default for CactusDrink {
    fn default() -> Self {
        Self {
            height: 2.0,
            spines: 50,
            spine_seed: 123,
            original: false,
        }
    }
}

impl Model for CactusDrink {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        let height = self.height;
        if height <= 0.2 {
            return Err(BuildError::model(
                "CactusDrink",
                format!("height {height} leaves no room for spines"),
            ));
        }

        p.material("Cactus", CACTUS)?;
        p.union(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", 1.0)
                .param("depth", height),
            at(0.0, 0.0, height / 2.0),
        )?;

        // Handle
        p.union(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", 0.25)
                .param("depth", height),
            at(1.5, 0.0, height / 2.0),
        )?;
        let bar = p.prim(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", 0.1)
                .param("depth", 1.0)
                .param("vertices", 16),
        )?;
        for z in [height - 0.2, 0.2] {
            p.union(bar, at(1.0, 0.0, z).rotation(DVec3::new(0.0, PI / 2.0, 0.0)))?;
        }

        // Hollow
        if self.original {
            p.material("Water", WATER)?;
        }
        let hollow_depth = if self.original {
            0.4
        } else {
            2.0 * (height - 0.15)
        };
        p.difference(
            PrimSpec::new(PrimitiveKind::Cylinder)
                .param("radius", 0.85)
                .param("depth", hollow_depth),
            at(0.0, 0.0, height),
        )?;

        p.material("Spine", SPINE)?;
        let mut rng = Pcg32::seed_from_u64(self.spine_seed);
        let spine = p.prim(
            PrimSpec::new(PrimitiveKind::Cone)
                .param("radius1", 0.03)
                .param("depth", 0.5)
                .param("vertices", 8),
        )?;
        for _ in 0..self.spines {
            let theta = rng.gen_range(HANDLE_CLEARANCE..2.0 * PI - HANDLE_CLEARANCE);
            let z = rng.gen_range(0.1..height - 0.1);
            p.union(
                spine,
                TransformSpec::new()
                    .position(DVec3::new(1.2 * theta.cos(), 1.2 * theta.sin(), z))
                    .rotation(DVec3::new(0.0, PI / 2.0, theta)),
            )?;
        }
        debug!("placed {} spines (seed {})", self.spines, self.spine_seed);

        p.delete(&[bar, spine])
    }
}

/// Cup and water surface built by [`cactus_drink_2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CactusDrinkPair {
    pub cup: ObjectId,
    pub water: ObjectId,
}

/// Cactus cup plus a separate water disc, named `"<name>.Cup"` and
/// `"<name>.Water"`.
///
/// The disc sits at the cup's X/Y, just below the rim, slightly narrower
/// than the cup.
pub fn cactus_drink_2<H: Host>(
    p: &mut Paragen<H>,
    name: &str,
    transform: TransformSpec,
    drink: &CactusDrink,
) -> BuildResult<CactusDrinkPair> {
    let cup = p.build_model(&format!("{name}.Cup"), transform, drink)?;

    let mut water_position = p.host().transform(cup)?.position;
    water_position.z = drink.height - 0.2;
    let water = p.build_model(
        &format!("{name}.Water"),
        TransformSpec::new()
            .position(water_position)
            .scale(DVec3::new(0.9, 0.9, 1.0)),
        &Water,
    )?;
    Ok(CactusDrinkPair { cup, water })
}
