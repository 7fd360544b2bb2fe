// Drag state: where the droplet is and whether the pointer is holding it.
// Visual: while you drag, the droplet follows the pointer 1:1; on release it springs home.

use crate::spring::{SpringAnimation, SpringParams};
use crate::types::Offset;

pub struct DragTracker {
    offset: Offset,
    dragging: bool,
    spring_params: SpringParams,
    returning: Option<SpringAnimation>, // the in-flight snap-back, if any
    dirty: bool,                        // a re-render is owed
}

impl DragTracker {
    pub fn new(spring_params: SpringParams) -> Self {
        Self {
            offset: Offset::ZERO,
            dragging: false,
            spring_params,
            returning: None,
            dirty: true,
        }
    }

    /// Pointer moved while held. Cancels any snap-back in flight.
    pub fn on_drag_changed(&mut self, translation: Offset) {
        if !self.dragging {
            tracing::debug!(x = translation.width, y = translation.height, "drag started");
        }
        if self.returning.take().is_some() {
            tracing::debug!("return animation interrupted by new drag");
        }
        self.offset = translation;
        self.dragging = true;
        self.dirty = true;
    }

    /// Pointer released. The flag drops now; the offset animates back over the next frames.
    pub fn on_drag_ended(&mut self) {
        tracing::debug!(
            x = self.offset.width,
            y = self.offset.height,
            "drag ended, springing back"
        );
        self.dragging = false;
        self.dirty = true;
        if let Some(anim) = self.returning.as_mut() {
            // already heading home; keep its momentum
            anim.retarget(Offset::ZERO);
            return;
        }
        let anim = SpringAnimation::new(self.spring_params, self.offset, Offset::ZERO);
        self.returning = if anim.is_settled() {
            self.offset = Offset::ZERO;
            None
        } else {
            Some(anim)
        };
    }

    /// Advance the snap-back by `dt` seconds. Returns true while it is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.dragging {
            return false;
        }
        let Some(anim) = self.returning.as_mut() else {
            return false;
        };
        let moving = anim.tick(dt);
        let value = anim.value();
        if value != self.offset {
            self.offset = value;
            self.dirty = true;
        }
        if !moving {
            self.offset = Offset::ZERO;
            self.returning = None;
        }
        moving
    }

    /// Drop everything back to rest without animating.
    pub fn reset(&mut self) {
        self.offset = Offset::ZERO;
        self.dragging = false;
        self.returning = None;
        self.dirty = true;
    }

    /// True once per state change; the caller re-renders when it sees it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_animating(&self) -> bool {
        self.returning.is_some()
    }
}
