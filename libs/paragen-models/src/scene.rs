//! # Demo Scene
//!
//! Top-level placement of the reference models along the Y axis.

use log::info;
use paragen::{at, BuildResult, Paragen};
use paragen_scene::{Host, ObjectId};

use crate::cactus::CactusDrink;
use crate::castle::SandCastle;
use crate::scorpion::SadScorpionAttempt;

/// Root objects of the demo scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoScene {
    pub scorpion: ObjectId,
    pub castle: ObjectId,
    pub cactus: ObjectId,
}

/// Builds the scorpion, the sand castle and the original cactus cup at
/// `y = 30, 50, 70`.
///
/// Running it again replaces the previous models.
pub fn build_demo_scene<H: Host>(p: &mut Paragen<H>) -> BuildResult<DemoScene> {
    let scorpion = p.build_model(
        "Sad Scorpion Attempt",
        at(0.0, 30.0, 0.0),
        &SadScorpionAttempt::default(),
    )?;
    let castle = p.build_model("Sand Castle", at(0.0, 50.0, 0.0), &SandCastle::default())?;
    let cactus = p.build_model(
        "Cactus Drink",
        at(0.0, 70.0, 0.0),
        &CactusDrink {
            original: true,
            ..CactusDrink::default()
        },
    )?;
    info!("demo scene built");

    Ok(DemoScene {
        scorpion,
        castle,
        cactus,
    })
}
