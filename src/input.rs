// Turns sampled mouse state into drag gestures.
// Visual: press anywhere and move; the droplet moves by how far you've moved since the press.

use crate::drag::DragTracker;
use crate::types::Offset;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// Pointer is held; translation since the press began.
    Changed(Offset),
    /// Pointer released.
    Ended,
}

impl DragEvent {
    pub fn apply(self, tracker: &mut DragTracker) {
        match self {
            DragEvent::Changed(t) => tracker.on_drag_changed(t),
            DragEvent::Ended => tracker.on_drag_ended(),
        }
    }
}

#[derive(Default)]
pub struct GestureRecognizer {
    start: Option<(f32, f32)>,        // where the press began
    last_pos: Option<(f32, f32)>,     // last known pointer position
    last_translation: Option<Offset>, // last translation we reported
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample per frame. `pos` is `None` when the pointer is outside the window.
    pub fn update(&mut self, button_down: bool, pos: Option<(f32, f32)>) -> Option<DragEvent> {
        if let Some(p) = pos {
            self.last_pos = Some(p);
        }

        if !button_down {
            self.last_translation = None;
            return self.start.take().map(|_| DragEvent::Ended);
        }

        let here = self.last_pos?;
        let start = *self.start.get_or_insert(here);
        let translation = Offset::new(here.0 - start.0, here.1 - start.1);

        if self.last_translation == Some(translation) {
            return None;
        }
        self.last_translation = Some(translation);
        Some(DragEvent::Changed(translation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringParams;

    #[test]
    fn press_move_release() {
        let mut g = GestureRecognizer::new();
        assert_eq!(g.update(false, Some((10.0, 10.0))), None);
        assert_eq!(g.update(true, Some((10.0, 10.0))), Some(DragEvent::Changed(Offset::ZERO)));
        assert_eq!(
            g.update(true, Some((40.0, 5.0))),
            Some(DragEvent::Changed(Offset::new(30.0, -5.0)))
        );
        // no movement, no event
        assert_eq!(g.update(true, Some((40.0, 5.0))), None);
        assert_eq!(g.update(false, Some((40.0, 5.0))), Some(DragEvent::Ended));
        assert_eq!(g.update(false, Some((40.0, 5.0))), None);
    }

    #[test]
    fn leaving_window_keeps_last_position() {
        let mut g = GestureRecognizer::new();
        g.update(true, Some((0.0, 0.0)));
        g.update(true, Some((5.0, 5.0)));
        assert_eq!(g.update(true, None), None);
        assert_eq!(g.update(false, None), Some(DragEvent::Ended));
    }

    #[test]
    fn press_without_position_waits() {
        let mut g = GestureRecognizer::new();
        assert_eq!(g.update(true, None), None);
        // no press was registered, so releasing reports nothing
        assert_eq!(g.update(false, None), None);
    }

    #[test]
    fn each_press_measures_from_its_own_start() {
        let mut g = GestureRecognizer::new();
        g.update(true, Some((0.0, 0.0)));
        g.update(true, Some((50.0, 0.0)));
        g.update(false, Some((50.0, 0.0)));
        assert_eq!(g.update(true, Some((50.0, 0.0))), Some(DragEvent::Changed(Offset::ZERO)));
    }

    #[test]
    fn events_drive_tracker() {
        let mut t = DragTracker::new(SpringParams::default());
        DragEvent::Changed(Offset::new(9.0, 9.0)).apply(&mut t);
        assert!(t.is_dragging());
        DragEvent::Ended.apply(&mut t);
        assert!(!t.is_dragging());
    }
}
