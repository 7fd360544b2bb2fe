// The metaball compositor: state in, list of draw commands out, then run the list.
// Visual expectation per frame:
//   white background → gooey yellow silhouette (anchor + droplet fused by blur/threshold)
//   → droplet disc tinted by drag distance → weather icon riding on the droplet.

use crate::color::{display_color, Rgba};
use crate::config::DropletConfig;
use crate::draw::draw_icon;
use crate::error::Error;
use crate::raster::{alpha_threshold, clip_span, fill_circle, gaussian_blur};
use crate::types::{Circle, FrameBuffer, Mask, Offset};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Wipe the offscreen coverage buffer.
    ClearCoverage,
    /// Rasterize a circle into the coverage buffer.
    FillCircle(Circle),
    Blur { radius: f32 },
    AlphaThreshold { cutoff: f32 },
    /// Paint every pixel of the output with this color.
    Background(Rgba),
    /// Paint this color wherever the silhouette is opaque.
    FillSilhouette(Rgba),
    /// Paint a disc, clipped to the silhouette.
    FillCircleMasked { circle: Circle, color: Rgba },
    /// Weather glyph centered at (x,y); drawn unmasked.
    Icon { x: f32, y: f32, color: Rgba, scale: i32 },
}

/// Icon centers beyond this are off any real window; keeps the i32 cast in range.
const ICON_COORD_LIMIT: f32 = 1.0e6;

/// The fixed anchor circle for a `width`×`height` frame.
pub fn anchor_circle(cfg: &DropletConfig, width: usize, height: usize) -> Circle {
    Circle::new(width as f32 * 0.5, height as f32 * 0.5, cfg.radius())
}

/// Pure state → command list. Nothing is drawn here.
/// Blur runs before threshold; that ordering is what grows the neck between the circles.
pub fn plan_frame(offset: Offset, cfg: &DropletConfig, width: usize, height: usize) -> Vec<DrawCommand> {
    let anchor = anchor_circle(cfg, width, height);
    let dragged = anchor.translated(offset);
    let rest = cfg.rest_color.resolve();

    vec![
        DrawCommand::ClearCoverage,
        DrawCommand::FillCircle(anchor),
        DrawCommand::FillCircle(dragged),
        DrawCommand::Blur { radius: cfg.blur_radius },
        DrawCommand::AlphaThreshold { cutoff: cfg.threshold },
        DrawCommand::Background(cfg.background.resolve()),
        DrawCommand::FillSilhouette(rest),
        DrawCommand::FillCircleMasked { circle: dragged, color: display_color(offset, cfg) },
        DrawCommand::Icon {
            x: dragged.center_x,
            y: dragged.center_y,
            color: cfg.icon_color.resolve(),
            scale: cfg.icon_scale,
        },
    ]
}

/// Runs command lists. Owns the offscreen buffers so nothing is allocated per frame.
pub struct Compositor {
    coverage: Mask,  // current offscreen layer (silhouette after threshold)
    blur_tmp: Mask,  // invisible scratch for the separable passes
    blur_out: Mask,  // blur result, swapped into `coverage`
}

impl Compositor {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            coverage: Mask::new(width, height),
            blur_tmp: Mask::new(width, height),
            blur_out: Mask::new(width, height),
        }
    }

    /// The last offscreen layer; after a full frame this is the binary silhouette.
    pub fn silhouette(&self) -> &Mask {
        &self.coverage
    }

    pub fn execute(&mut self, commands: &[DrawCommand], fb: &mut FrameBuffer) -> Result<(), Error> {
        Error::check_size(
            "compositor output",
            (self.coverage.width, self.coverage.height),
            (fb.width, fb.height),
        )?;

        for cmd in commands {
            match *cmd {
                DrawCommand::ClearCoverage => self.coverage.clear(),
                DrawCommand::FillCircle(circle) => fill_circle(&mut self.coverage, circle),
                DrawCommand::Blur { radius } => {
                    gaussian_blur(&self.coverage, &mut self.blur_tmp, &mut self.blur_out, radius)?;
                    std::mem::swap(&mut self.coverage, &mut self.blur_out);
                }
                DrawCommand::AlphaThreshold { cutoff } => alpha_threshold(&mut self.coverage, cutoff),
                DrawCommand::Background(color) => {
                    for p in &mut fb.pixels {
                        *p = color.over(*p);
                    }
                }
                DrawCommand::FillSilhouette(color) => {
                    for (p, &a) in fb.pixels.iter_mut().zip(&self.coverage.alpha) {
                        if a >= 0.5 {
                            *p = color.over(*p);
                        }
                    }
                }
                DrawCommand::FillCircleMasked { circle, color } => {
                    self.fill_circle_masked(fb, circle, color);
                }
                DrawCommand::Icon { x, y, color, scale } => {
                    let to_px = |v: f32| v.clamp(-ICON_COORD_LIMIT, ICON_COORD_LIMIT).round() as i32;
                    draw_icon(fb, to_px(x), to_px(y), scale, color.to_pixel());
                }
            }
        }
        tracing::trace!(commands = commands.len(), "frame composed");
        Ok(())
    }

    /// Visual: the tinted droplet disc, but never outside the gooey outline.
    fn fill_circle_masked(&self, fb: &mut FrameBuffer, circle: Circle, color: Rgba) {
        let r = circle.radius;
        let Some((x0, x1)) = clip_span(circle.center_x - r, circle.center_x + r, fb.width) else {
            return;
        };
        let Some((y0, y1)) = clip_span(circle.center_y - r, circle.center_y + r, fb.height) else {
            return;
        };
        let r2 = r * r;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - circle.center_x;
                let dy = y as f32 + 0.5 - circle.center_y;
                if dx * dx + dy * dy > r2 || self.coverage.get(x, y) < 0.5 {
                    continue;
                }
                let idx = y as usize * fb.width + x as usize;
                fb.pixels[idx] = color.over(fb.pixels[idx]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{interpolate, RED, YELLOW};
    use crate::raster::count_regions;
    use proptest::prelude::*;

    const W: usize = 640;
    const H: usize = 480;

    fn render(offset: Offset, w: usize, h: usize) -> (Compositor, FrameBuffer) {
        let cfg = DropletConfig::default();
        let mut comp = Compositor::new(w, h);
        let mut fb = FrameBuffer::new(w, h);
        comp.execute(&plan_frame(offset, &cfg, w, h), &mut fb).unwrap();
        (comp, fb)
    }

    fn pixel(fb: &FrameBuffer, x: usize, y: usize) -> u32 {
        fb.pixels[y * fb.width + x]
    }

    #[test]
    fn blur_is_planned_before_threshold() {
        let cmds = plan_frame(Offset::new(30.0, 0.0), &DropletConfig::default(), W, H);
        let pos = |pred: fn(&DrawCommand) -> bool| cmds.iter().position(pred).unwrap();
        let blur = pos(|c| matches!(c, DrawCommand::Blur { .. }));
        let threshold = pos(|c| matches!(c, DrawCommand::AlphaThreshold { .. }));
        let last_circle = cmds.iter().rposition(|c| matches!(c, DrawCommand::FillCircle(_))).unwrap();
        assert!(last_circle < blur && blur < threshold);
        assert!(matches!(cmds.last(), Some(DrawCommand::Icon { .. })));
    }

    #[test]
    fn dragged_circle_follows_offset() {
        let cmds = plan_frame(Offset::new(30.0, -12.0), &DropletConfig::default(), W, H);
        assert_eq!(cmds[1], DrawCommand::FillCircle(Circle::new(320.0, 240.0, 50.0)));
        assert_eq!(cmds[2], DrawCommand::FillCircle(Circle::new(350.0, 228.0, 50.0)));
    }

    #[test]
    fn rest_frame_is_one_yellow_disk() {
        let (comp, fb) = render(Offset::ZERO, W, H);
        assert_eq!(count_regions(comp.silhouette()), 1);
        assert!(comp.silhouette().alpha.iter().all(|&a| a == 0.0 || a == 1.0));
        // beside the icon, inside the disc
        assert_eq!(pixel(&fb, 320 + 30, 240), YELLOW.resolve().to_pixel());
        assert_eq!(pixel(&fb, 0, 0), 0x00FF_FFFF);
        // icon sits on the center
        assert_eq!(pixel(&fb, 320 - 16, 240 - 16 + 18), 0x00FF_FFFF);
    }

    #[test]
    fn near_touching_circles_fuse_through_blur() {
        // geometric gap of 4 units; only the blur bridges it
        for offset in [Offset::new(60.0, 0.0), Offset::new(100.0, 0.0), Offset::new(0.0, -104.0)] {
            let (comp, fb) = render(offset, W, H);
            assert_eq!(count_regions(comp.silhouette()), 1, "offset {offset:?}");
            let mid_x = (320.0 + offset.width * 0.5) as usize;
            let mid_y = (240.0 + offset.height * 0.5) as usize;
            assert_eq!(comp.silhouette().get(mid_x as i32, mid_y as i32), 1.0);
            assert_ne!(pixel(&fb, mid_x, mid_y), 0x00FF_FFFF);
        }
    }

    #[test]
    fn three_quarter_drag_splits_and_tints() {
        let (comp, fb) = render(Offset::new(150.0, 0.0), W, H);
        assert_eq!(count_regions(comp.silhouette()), 2);
        // gap between the circles shows the background
        assert_eq!(pixel(&fb, 320 + 75, 240), 0x00FF_FFFF);
        // anchor keeps the rest color; droplet is 3/4 toward red
        assert_eq!(pixel(&fb, 320 - 30, 240), YELLOW.resolve().to_pixel());
        assert_eq!(pixel(&fb, 470 + 30, 240), interpolate(YELLOW, RED, 0.75).to_pixel());
    }

    #[test]
    fn far_drag_is_two_separate_red_and_yellow_disks() {
        let (comp, fb) = render(Offset::new(500.0, 500.0), 1400, 1400);
        assert_eq!(count_regions(comp.silhouette()), 2);
        assert_eq!(pixel(&fb, 700 - 30, 700), YELLOW.resolve().to_pixel());
        assert_eq!(pixel(&fb, 1200 + 30, 1200), RED.resolve().to_pixel());
    }

    #[test]
    fn droplet_off_screen_still_renders_anchor() {
        let (comp, fb) = render(Offset::new(5000.0, 0.0), W, H);
        assert_eq!(count_regions(comp.silhouette()), 1);
        assert_eq!(pixel(&fb, 320 - 30, 240), YELLOW.resolve().to_pixel());
    }

    #[test]
    fn unbounded_drag_distance_renders_anchor_only() {
        for offset in [
            Offset::new(3.0e9, 0.0),
            Offset::new(-3.0e9, 0.0),
            Offset::new(0.0, 3.0e9),
            Offset::new(-3.0e9, -3.0e9),
        ] {
            let (comp, fb) = render(offset, W, H);
            assert_eq!(count_regions(comp.silhouette()), 1, "offset {offset:?}");
            assert_eq!(pixel(&fb, 320 - 30, 240), YELLOW.resolve().to_pixel());
        }
    }

    #[test]
    fn wrong_output_size_is_an_error() {
        let mut comp = Compositor::new(8, 8);
        let mut fb = FrameBuffer::new(9, 8);
        let cmds = plan_frame(Offset::ZERO, &DropletConfig::default(), 8, 8);
        assert!(matches!(comp.execute(&cmds, &mut fb), Err(Error::BufferSize { .. })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn overlapping_circles_form_one_region(angle in 0.0f32..std::f32::consts::TAU, dist in 0.0f32..98.0) {
            let offset = Offset::new(dist * angle.cos(), dist * angle.sin());
            let (comp, _) = render(offset, 320, 320);
            prop_assert_eq!(count_regions(comp.silhouette()), 1);
        }
    }
}
