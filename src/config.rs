// Every tunable knob of the droplet in one place.
// Visual: changing these changes how big the droplet is, how gooey the neck looks,
// how fast the color saturates and how bouncy the snap-back feels.

use crate::color::{Paint, RED, WHITE, YELLOW};
use crate::error::Error;
use crate::spring::SpringParams;

#[derive(Clone, Debug)]
pub struct DropletConfig {
    pub window_width: usize,
    pub window_height: usize,
    /// Both circles share this diameter (layout units = pixels).
    pub circle_diameter: f32,
    /// Drag distance at which the color is fully "stressed".
    pub max_offset: f32,
    /// Blur standard deviation applied before thresholding.
    pub blur_radius: f32,
    /// Alpha cutoff; blurred coverage above this becomes solid.
    pub threshold: f32,
    pub spring: SpringParams,
    pub rest_color: Paint,
    pub stress_color: Paint,
    pub background: Paint,
    pub icon_color: Paint,
    pub icon_scale: i32,
}

impl Default for DropletConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            circle_diameter: 100.0,
            max_offset: 200.0,
            blur_radius: 10.0,
            threshold: 0.4,
            spring: SpringParams::default(),
            rest_color: YELLOW,
            stress_color: RED,
            background: WHITE,
            icon_color: WHITE,
            icon_scale: 2,
        }
    }
}

impl DropletConfig {
    pub fn radius(&self) -> f32 {
        self.circle_diameter * 0.5
    }

    /// Reject settings that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::InvalidConfig("window size must be non-zero".into()));
        }
        if !(self.circle_diameter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "circle_diameter must be positive, got {}",
                self.circle_diameter
            )));
        }
        if !(self.max_offset > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_offset must be positive, got {}",
                self.max_offset
            )));
        }
        if !(self.blur_radius >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "blur_radius must be >= 0, got {}",
                self.blur_radius
            )));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "threshold must lie in (0,1), got {}",
                self.threshold
            )));
        }
        if !(self.spring.stiffness > 0.0) || !(self.spring.damping >= 0.0) {
            return Err(Error::InvalidConfig(
                "spring needs stiffness > 0 and damping >= 0".into(),
            ));
        }
        if self.icon_scale < 1 {
            return Err(Error::InvalidConfig("icon_scale must be >= 1".into()));
        }
        Ok(())
    }
}
