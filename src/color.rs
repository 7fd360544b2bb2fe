// Device-space colors and the distance → color mapping.
// Visual: the droplet is pale yellow at rest and turns red the further you pull it.

use crate::config::DropletConfig;
use crate::types::Offset;

/// RGBA in device space, each channel in [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const OPAQUE_BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    fn channel_u8(c: f32) -> u32 {
        (c.clamp(0.0, 1.0) * 255.0).round() as u32
    }

    /// Pack as 0x00RRGGBB, ignoring alpha.
    pub fn to_pixel(self) -> u32 {
        (Self::channel_u8(self.r) << 16) | (Self::channel_u8(self.g) << 8) | Self::channel_u8(self.b)
    }

    /// Source-over this color onto an opaque 0x00RRGGBB pixel.
    /// Visual: a half-transparent color tints whatever is below instead of hiding it.
    pub fn over(self, dst: u32) -> u32 {
        let a = self.a.clamp(0.0, 1.0);
        if a >= 1.0 {
            return self.to_pixel();
        }
        let inv = 1.0 - a;
        let dr = ((dst >> 16) & 0xFF) as f32 / 255.0;
        let dg = ((dst >> 8) & 0xFF) as f32 / 255.0;
        let db = (dst & 0xFF) as f32 / 255.0;
        Rgba::new(
            self.r * a + dr * inv,
            self.g * a + dg * inv,
            self.b * a + db * inv,
            1.0,
        )
        .to_pixel()
    }
}

/// A color as the host hands it to us. Not every model can be split into RGBA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Rgb(Rgba),
    Gray { white: f32, alpha: f32 },
    /// Image/pattern fills have no per-channel components.
    Pattern(&'static str),
}

impl Paint {
    /// RGBA components, or `None` if this color model cannot produce them.
    pub fn components(self) -> Option<Rgba> {
        match self {
            Paint::Rgb(c) => Some(c),
            Paint::Gray { white, alpha } => Some(Rgba::new(white, white, white, alpha)),
            Paint::Pattern(_) => None,
        }
    }

    /// Components with the opaque-black fallback applied.
    pub fn resolve(self) -> Rgba {
        match self.components() {
            Some(c) => c,
            None => {
                tracing::debug!(paint = ?self, "color has no RGBA components, using opaque black");
                Rgba::OPAQUE_BLACK
            }
        }
    }
}

pub const YELLOW: Paint = Paint::Rgb(Rgba::new(1.0, 0.8, 0.0, 1.0));
pub const RED: Paint = Paint::Rgb(Rgba::new(1.0, 0.231, 0.188, 1.0));
pub const WHITE: Paint = Paint::Gray { white: 1.0, alpha: 1.0 };

/// Per-channel linear interpolation from `from` to `to`; `fraction` is clamped to [0,1].
pub fn interpolate(from: Paint, to: Paint, fraction: f32) -> Rgba {
    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let a = from.resolve();
    let b = to.resolve();
    if f >= 1.0 {
        return b;
    }
    let lerp = |x: f32, y: f32| x + (y - x) * f;
    Rgba::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b), lerp(a.a, b.a))
}

/// `min(|offset|, max_offset)`.
pub fn drag_distance(offset: Offset, max_offset: f32) -> f32 {
    offset.length().min(max_offset).max(0.0)
}

/// Normalized drag distance in [0,1].
pub fn drag_progress(offset: Offset, max_offset: f32) -> f32 {
    if !(max_offset > 0.0) {
        return 0.0;
    }
    drag_distance(offset, max_offset) / max_offset
}

/// Fill color of the droplet for the current offset.
pub fn display_color(offset: Offset, cfg: &DropletConfig) -> Rgba {
    interpolate(cfg.rest_color, cfg.stress_color, drag_progress(offset, cfg.max_offset))
}
