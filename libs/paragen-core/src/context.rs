//! # Build Context Stack
//!
//! Frames of in-progress construction. Each frame holds the object being
//! built and the temporaries created for it; popping a frame deletes those
//! temporaries and puts the object back where it was.
//!
//! ## Frame Rules
//!
//! - Pushing forces object mode, clears the selection and moves the object to
//!   the world origin (identity matrix) so its contents are authored in local
//!   space
//! - Popping deletes every temporary still present and restores the saved
//!   world matrix
//! - Frames are only reachable through [`Paragen::enter`] and
//!   [`Paragen::scoped`], which always pop, including on error and panic
//!
//! ## Example
//!
//! ```rust
//! use paragen::{Paragen, PrimSpec};
//! use paragen_scene::{Host, PrimitiveKind, Scene};
//!
//! let mut paragen = Paragen::new(Scene::new());
//! let root = paragen.host_mut().create_mesh_object("Root").unwrap();
//!
//! let temp = paragen
//!     .scoped(root, |p| p.prim(PrimSpec::new(PrimitiveKind::Cube)))
//!     .unwrap();
//! assert!(!paragen.host().exists(temp));
//! assert_eq!(paragen.depth(), 0);
//! ```

use std::ops::{Deref, DerefMut};

use config::constants::{qualified_name, MAX_BUILD_DEPTH, NAME_SEPARATOR};
use glam::DMat4;
use log::{debug, warn};
use paragen_scene::{Host, ObjectId};

use crate::error::{BuildError, BuildResult};
use crate::Paragen;

// =============================================================================
// FRAMES
// =============================================================================

/// One object under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFrame {
    /// Target of booleans and materials issued in this frame.
    pub active: ObjectId,
    /// Objects to delete when the frame pops, in creation order.
    pub temporaries: Vec<ObjectId>,
    /// World matrix of `active` at push time.
    pub saved_world: DMat4,
}

/// LIFO stack of build frames.
#[derive(Debug, Clone, Default)]
pub struct BuildStack {
    frames: Vec<BuildFrame>,
}

impl BuildStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[BuildFrame] {
        &self.frames
    }

    /// Top frame, or `None` outside any build.
    pub fn current(&self) -> Option<&BuildFrame> {
        self.frames.last()
    }

    fn current_mut(&mut self) -> Option<&mut BuildFrame> {
        self.frames.last_mut()
    }

    fn push(&mut self, frame: BuildFrame) {
        self.frames.push(frame);
    }

    fn pop(&mut self) -> Option<BuildFrame> {
        self.frames.pop()
    }
}

// =============================================================================
// COORDINATOR: FRAME ACCESS
// =============================================================================

impl<H: Host> Paragen<H> {
    /// Top frame.
    pub fn current(&self) -> BuildResult<&BuildFrame> {
        self.stack
            .current()
            .ok_or_else(|| BuildError::no_frame("current"))
    }

    /// Object being built in the top frame.
    pub fn active(&self) -> BuildResult<ObjectId> {
        Ok(self.current()?.active)
    }

    /// `"<active name>."`, the namespace for names created in this frame.
    pub fn name_prefix(&self) -> BuildResult<String> {
        let name = self.host.object_name(self.active()?)?;
        Ok(format!("{name}{NAME_SEPARATOR}"))
    }

    /// `name` qualified by the active object's name.
    pub fn qualified(&self, name: &str) -> BuildResult<String> {
        let context = self.host.object_name(self.active()?)?;
        Ok(qualified_name(&context, name))
    }

    /// Temporaries registered in the top frame.
    pub fn temporaries(&self) -> BuildResult<&[ObjectId]> {
        Ok(&self.current()?.temporaries)
    }

    pub(crate) fn register_temporary(&mut self, object: ObjectId) -> BuildResult<()> {
        self.stack
            .current_mut()
            .ok_or_else(|| BuildError::no_frame("prim"))?
            .temporaries
            .push(object);
        Ok(())
    }

    // =========================================================================
    // SCOPED ACQUISITION
    // =========================================================================

    /// Pushes a frame for `object` and returns a guard that pops it when
    /// dropped.
    ///
    /// Use [`FrameGuard::exit`] to observe cleanup errors; a plain drop logs
    /// them instead.
    pub fn enter(&mut self, object: ObjectId) -> BuildResult<FrameGuard<'_, H>> {
        self.push_frame(object)?;
        let depth = self.stack.depth();
        Ok(FrameGuard {
            paragen: self,
            depth,
            released: false,
        })
    }

    /// Runs `routine` inside a frame for `object`.
    ///
    /// The frame pops whether the routine succeeds, fails or panics. A
    /// routine error takes precedence over a cleanup error.
    pub fn scoped<R>(
        &mut self,
        object: ObjectId,
        routine: impl FnOnce(&mut Self) -> BuildResult<R>,
    ) -> BuildResult<R> {
        let mut frame = self.enter(object)?;
        let result = routine(&mut *frame);
        let cleanup = frame.exit();
        let value = result?;
        cleanup?;
        Ok(value)
    }

    // =========================================================================
    // PUSH / POP
    // =========================================================================

    fn push_frame(&mut self, object: ObjectId) -> BuildResult<()> {
        if self.stack.depth() >= MAX_BUILD_DEPTH {
            return Err(BuildError::DepthExceeded {
                limit: MAX_BUILD_DEPTH,
            });
        }

        if self.host.active_object().is_some() {
            self.host.force_object_mode()?;
        }
        self.host.clear_selection();

        let saved_world = self.host.world_matrix(object)?;
        self.host.set_world_matrix(object, &DMat4::IDENTITY)?;

        self.stack.push(BuildFrame {
            active: object,
            temporaries: Vec::new(),
            saved_world,
        });
        debug!(
            "push frame '{}' (depth {})",
            self.host.object_name(object).unwrap_or_default(),
            self.stack.depth()
        );
        Ok(())
    }

    /// Removes the top frame, then deletes its temporaries and restores the
    /// saved matrix. Reports the first host error after attempting every
    /// step.
    fn pop_frame(&mut self) -> BuildResult<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| BuildError::no_frame("pop"))?;

        let mut first_error: Option<BuildError> = None;
        for temporary in &frame.temporaries {
            if !self.host.exists(*temporary) {
                continue;
            }
            if let Err(e) = self.host.delete_object(*temporary) {
                first_error.get_or_insert(e.into());
            }
        }

        if self.host.exists(frame.active) {
            if let Err(e) = self.host.set_world_matrix(frame.active, &frame.saved_world) {
                first_error.get_or_insert(e.into());
            }
        }

        debug!(
            "pop frame (depth {}, {} temporaries)",
            self.stack.depth(),
            frame.temporaries.len()
        );
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Pops every frame at or above `depth`.
    fn unwind_to(&mut self, depth: usize) -> BuildResult<()> {
        let mut first_error = None;
        while self.stack.depth() >= depth && !self.stack.is_empty() {
            if let Err(e) = self.pop_frame() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// =============================================================================
// GUARD
// =============================================================================

/// Scoped build frame; pops on drop.
///
/// Dereferences to the [`Paragen`] coordinator so composition calls go
/// through the guard.
pub struct FrameGuard<'a, H: Host> {
    paragen: &'a mut Paragen<H>,
    depth: usize,
    released: bool,
}

impl<H: Host> FrameGuard<'_, H> {
    /// Pops the frame and reports cleanup errors.
    pub fn exit(mut self) -> BuildResult<()> {
        self.released = true;
        self.paragen.unwind_to(self.depth)
    }
}

impl<H: Host> Deref for FrameGuard<'_, H> {
    type Target = Paragen<H>;

    fn deref(&self) -> &Self::Target {
        self.paragen
    }
}

impl<H: Host> DerefMut for FrameGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.paragen
    }
}

impl<H: Host> Drop for FrameGuard<'_, H> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.paragen.unwind_to(self.depth) {
            warn!("build frame cleanup failed: {e}");
        }
    }
}
