//! A flat water surface.

use glam::DVec3;
use paragen::{BuildResult, Model, Paragen, PrimSpec, TransformSpec};
use paragen_scene::{Host, PrimitiveKind, Rgba};

const WATER: Rgba = Rgba([0.10, 0.10, 0.60, 1.0]);

/// Unit disc filled as a triangle fan.
///
/// The disc is an open surface, so the union produces non-manifold geometry;
/// the host bakes it regardless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Water;

impl Model for Water {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        p.material("Water", WATER)?;
        p.union(
            PrimSpec::new(PrimitiveKind::Circle)
                .param("radius", 1.0)
                .param("fill_type", "TRIFAN"),
            TransformSpec::new().position(DVec3::ZERO),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paragen_scene::Scene;

    #[test]
    fn test_water_is_open_disc() {
        let mut paragen = Paragen::new(Scene::new());
        let water = paragen
            .build_model("Water", TransformSpec::new(), &Water)
            .unwrap();

        let scene = paragen.host();
        let geometry = scene.geometry_of(water).unwrap();
        assert!(!geometry.is_closed());
        assert_eq!(geometry.primitive_count(), 1);
        assert_eq!(scene.material_names(water), vec!["Water.Water".to_string()]);
    }
}
