// Damped-spring stepping for the snap-back animation.
// Visual: after you let go, the droplet overshoots the anchor a little and wobbles to rest.

use crate::types::Offset;

/// Largest integration step; longer frames are split into several of these.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    /// Below this distance *and* speed the spring snaps onto its target.
    pub rest_epsilon: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self { stiffness: 50.0, damping: 10.0, rest_epsilon: 0.05 }
    }
}

/// One step of a unit-mass damped oscillator pulled toward `target`.
/// Semi-implicit Euler in fixed sub-steps so a slow frame cannot blow it up.
pub fn step(
    current: f32,
    target: f32,
    velocity: f32,
    stiffness: f32,
    damping: f32,
    dt: f32,
) -> (f32, f32) {
    if !(dt > 0.0) {
        return (current, velocity);
    }
    let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
    let h = dt / steps as f32;
    let (mut x, mut v) = (current, velocity);
    for _ in 0..steps {
        let accel = -stiffness * (x - target) - damping * v;
        v += accel * h;
        x += v * h;
    }
    (x, v)
}

/// Spring animation of an `Offset` toward a (replaceable) target.
#[derive(Clone, Debug)]
pub struct SpringAnimation {
    params: SpringParams,
    value: Offset,
    velocity: Offset,
    target: Offset,
    settled: bool,
}

impl SpringAnimation {
    pub fn new(params: SpringParams, from: Offset, target: Offset) -> Self {
        let mut anim = Self { params, value: from, velocity: Offset::ZERO, target, settled: false };
        anim.settle_if_close();
        anim
    }

    /// Swap the destination mid-flight; position and velocity carry over.
    pub fn retarget(&mut self, target: Offset) {
        self.target = target;
        self.settled = false;
        self.settle_if_close();
    }

    /// Advance by `dt` seconds. Returns true while the spring is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.settled {
            return false;
        }
        let p = self.params;
        let (x, vx) = step(self.value.width, self.target.width, self.velocity.width, p.stiffness, p.damping, dt);
        let (y, vy) = step(self.value.height, self.target.height, self.velocity.height, p.stiffness, p.damping, dt);
        self.value = Offset::new(x, y);
        self.velocity = Offset::new(vx, vy);
        self.settle_if_close();
        !self.settled
    }

    fn settle_if_close(&mut self) {
        let eps = self.params.rest_epsilon;
        if (self.value - self.target).length() < eps && self.velocity.length() < eps {
            self.value = self.target;
            self.velocity = Offset::ZERO;
            self.settled = true;
        }
    }

    pub fn value(&self) -> Offset {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_until_settled(anim: &mut SpringAnimation, dt: f32, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if !anim.tick(dt) {
                return frame + 1;
            }
        }
        max_frames
    }

    #[test]
    fn zero_dt_is_identity() {
        assert_eq!(step(3.0, 0.0, 1.5, 50.0, 10.0, 0.0), (3.0, 1.5));
    }

    #[test]
    fn underdamped_default_overshoots_then_settles() {
        let mut anim = SpringAnimation::new(SpringParams::default(), Offset::new(100.0, 0.0), Offset::ZERO);
        let mut min_x = f32::MAX;
        for _ in 0..600 {
            anim.tick(1.0 / 60.0);
            min_x = min_x.min(anim.value().width);
        }
        assert!(min_x < 0.0, "expected overshoot past the anchor, min was {min_x}");
        assert!(anim.is_settled());
        assert_eq!(anim.value(), Offset::ZERO);
    }

    #[test]
    fn retarget_keeps_position() {
        let mut anim = SpringAnimation::new(SpringParams::default(), Offset::new(50.0, 50.0), Offset::ZERO);
        anim.tick(0.1);
        let here = anim.value();
        anim.retarget(Offset::new(10.0, 0.0));
        assert_eq!(anim.value(), here);
        run_until_settled(&mut anim, 1.0 / 60.0, 2000);
        assert_eq!(anim.value(), Offset::new(10.0, 0.0));
    }

    #[test]
    fn starting_at_target_is_already_settled() {
        let anim = SpringAnimation::new(SpringParams::default(), Offset::ZERO, Offset::ZERO);
        assert!(anim.is_settled());
    }

    #[test]
    fn large_frame_gap_stays_stable() {
        let (x, v) = step(200.0, 0.0, 0.0, 50.0, 10.0, 0.5);
        assert!(x.is_finite() && v.is_finite());
        assert!(x.abs() < 200.0);
    }

    proptest! {
        #[test]
        fn always_converges_to_target(w in -2000.0f32..2000.0, h in -2000.0f32..2000.0, dt in 0.004f32..0.05) {
            let mut anim = SpringAnimation::new(SpringParams::default(), Offset::new(w, h), Offset::ZERO);
            run_until_settled(&mut anim, dt, 5000);
            prop_assert!(anim.is_settled());
            prop_assert_eq!(anim.value(), Offset::ZERO);
        }
    }
}
