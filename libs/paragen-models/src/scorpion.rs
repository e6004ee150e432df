//! A body and a curled tail of stretched spheres.

use std::f64::consts::PI;

use glam::DVec3;
use paragen::{BuildResult, Model, Paragen, PrimSpec, TransformSpec};
use paragen_scene::{Host, PrimitiveKind};

/// Scorpion body with a six-segment tail arching over it.
#[derive(Debug, Clone, PartialEq)]
pub struct SadScorpionAttempt {
    pub segments: usize,
}

impl Default for SadScorpionAttempt {
    fn default() -> Self {
        Self { segments: 6 }
    }
}

fn sphere() -> PrimSpec {
    PrimSpec::new(PrimitiveKind::UvSphere).param("radius", 1.0)
}

impl Model for SadScorpionAttempt {
    fn compose<H: Host>(&self, p: &mut Paragen<H>) -> BuildResult<()> {
        p.union(
            sphere(),
            TransformSpec::new()
                .position(DVec3::ZERO)
                .scale(DVec3::new(1.5, 2.0, 1.0)),
        )?;

        for i in 0..self.segments {
            let angle = PI * i as f64 / 6.0;
            p.union(
                sphere(),
                TransformSpec::new()
                    .position(DVec3::new(-4.0 * angle.sin(), 0.0, 4.0 + 4.0 * angle.cos()))
                    .scale(DVec3::new(1.5, 1.4 + 0.1 * i as f64, 1.0)),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paragen_scene::Scene;

    #[test]
    fn test_scorpion_unions_every_segment() {
        let mut paragen = Paragen::new(Scene::new());
        let scorpion = paragen
            .build_model("Scorpion", TransformSpec::new(), &SadScorpionAttempt::default())
            .unwrap();

        let scene = paragen.host();
        let geometry = scene.geometry_of(scorpion).unwrap();
        assert_eq!(geometry.primitive_count(), 7);
        assert_eq!(geometry.boolean_count(), 6);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_tail_rises_above_body() {
        let mut paragen = Paragen::new(Scene::new());
        let scorpion = paragen
            .build_model("Scorpion", TransformSpec::new(), &SadScorpionAttempt::default())
            .unwrap();

        let bounds = paragen.host().world_bounds(scorpion).unwrap().unwrap();
        assert!(bounds.max.z > 8.0);
        assert!(bounds.min.z < -0.9);
    }
}
