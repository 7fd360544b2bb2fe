// Core types shared by the tracker, the rasterizer and the compositor.

use std::ops::Sub;

/// Displacement of the dragged circle from its anchor, in layout units (= pixels).
/// Visual: (0,0) means the droplet sits exactly on top of the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub width: f32,
    pub height: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Euclidean length of the displacement.
    #[inline]
    pub fn length(self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }
}

impl Sub for Offset {
    type Output = Offset;
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// A circle in buffer coordinates. Both the anchor and the dragged droplet are one of these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center_x: f32, center_y: f32, radius: f32) -> Self {
        Self { center_x, center_y, radius }
    }

    /// Same radius, center moved by `offset`.
    /// Visual: this is where the droplet is drawn while you drag it.
    pub fn translated(self, offset: Offset) -> Self {
        Self {
            center_x: self.center_x + offset.width,
            center_y: self.center_y + offset.height,
            radius: self.radius,
        }
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Alpha coverage in [0,1] per pixel.
/// Visual: unseen directly. Before thresholding it holds the soft blurred blob;
/// afterwards every value is exactly 0.0 or 1.0 and it is the droplet silhouette.
#[derive(Clone)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,   // length = width * height
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height] }
    }

    /// Coverage at (x,y); out-of-bounds reads as transparent.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0.0;
        }
        self.alpha[y as usize * self.width + x as usize]
    }

    pub fn clear(&mut self) {
        for a in &mut self.alpha { *a = 0.0; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_length_is_euclidean() {
        assert_eq!(Offset::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Offset::ZERO.length(), 0.0);
    }

    #[test]
    fn offset_difference_is_componentwise() {
        let d = Offset::new(150.0, -20.0) - Offset::new(50.0, 30.0);
        assert_eq!(d, Offset::new(100.0, -50.0));
        assert_eq!((d - d).length(), 0.0);
    }

    #[test]
    fn translated_circle_keeps_radius() {
        let c = Circle::new(10.0, 20.0, 50.0).translated(Offset::new(-5.0, 7.5));
        assert_eq!(c, Circle::new(5.0, 27.5, 50.0));
    }

    #[test]
    fn mask_reads_outside_as_transparent() {
        let mut m = Mask::new(2, 2);
        m.alpha[3] = 1.0;
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(-1, 0), 0.0);
        assert_eq!(m.get(2, 0), 0.0);
    }
}
