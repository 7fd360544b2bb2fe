// Offscreen coverage rasterizer + the two metaball filters (blur, alpha threshold).
// Visual expectation: two hard discs go in; after blur they are soft glows whose tails
// overlap; after threshold the overlap becomes a solid "neck" joining them.
use crate::error::Error;
use crate::types::{Circle, Mask};

/// Sub-samples per axis on the anti-aliased rim of a circle.
const RIM_SAMPLES: usize = 4;

/// Draw a filled, anti-aliased circle into the coverage buffer (source-over).
/// Visual: a disc appears; its rim pixels get fractional alpha so the edge isn't jagged.
pub fn fill_circle(mask: &mut Mask, circle: Circle) {
    let r = circle.radius;
    if !(r > 0.0) {
        return;
    }
    // Scan just the bounding box, clipped to the buffer (fully off-buffer → nothing)
    let Some((x0, x1)) = clip_span(circle.center_x - r - 1.0, circle.center_x + r + 1.0, mask.width) else {
        return;
    };
    let Some((y0, y1)) = clip_span(circle.center_y - r - 1.0, circle.center_y + r + 1.0, mask.height) else {
        return;
    };

    // Pixels whose center is this close to the rim get supersampled
    let band = std::f32::consts::SQRT_2 * 0.5;
    let inner2 = (r - band).max(0.0).powi(2);
    let outer2 = (r + band).powi(2);
    let r2 = r * r;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - circle.center_x;
            let dy = y as f32 + 0.5 - circle.center_y;
            let d2 = dx * dx + dy * dy;

            let cov = if d2 <= inner2 {
                1.0
            } else if d2 >= outer2 {
                continue; // outside the circle
            } else {
                // Rim pixel: count sub-samples inside the circle
                let mut inside = 0;
                for sy in 0..RIM_SAMPLES {
                    for sx in 0..RIM_SAMPLES {
                        let px = x as f32 + (sx as f32 + 0.5) / RIM_SAMPLES as f32 - circle.center_x;
                        let py = y as f32 + (sy as f32 + 0.5) / RIM_SAMPLES as f32 - circle.center_y;
                        if px * px + py * py <= r2 {
                            inside += 1;
                        }
                    }
                }
                inside as f32 / (RIM_SAMPLES * RIM_SAMPLES) as f32
            };

            let idx = y as usize * mask.width + x as usize;
            let a = mask.alpha[idx];
            mask.alpha[idx] = a + cov * (1.0 - a);
        }
    }
}

/// Pixel indices covering `lo..=hi`, clipped to `0..limit` while still in f32.
/// Any drag distance is legal, so the bounds can be far outside `i32`.
pub fn clip_span(lo: f32, hi: f32, limit: usize) -> Option<(i32, i32)> {
    if limit == 0 || !(hi >= 0.0) || !(lo < limit as f32) {
        return None;
    }
    let first = lo.floor().max(0.0) as i32;
    let last = hi.ceil().min(limit as f32 - 1.0) as i32;
    (first <= last).then_some((first, last))
}

/// Box radius whose three-pass convolution has standard deviation ≈ `sigma`.
/// Three boxes of radius r have variance r(r+1).
pub fn box_radius_for_sigma(sigma: f32) -> usize {
    if !(sigma > 0.0) {
        return 0;
    }
    let r = ((1.0 + 4.0 * sigma * sigma).sqrt() - 1.0) * 0.5;
    r.round() as usize
}

/// Gaussian-style blur of a coverage buffer: three separable box passes.
/// Visual: every disc edge becomes a soft falloff about `radius` pixels wide.
pub fn gaussian_blur(src: &Mask, tmp: &mut Mask, dst: &mut Mask, radius: f32) -> Result<(), Error> {
    Error::check_size("blur dst", (src.width, src.height), (dst.width, dst.height))?;
    Error::check_size("blur tmp", (src.width, src.height), (tmp.width, tmp.height))?;

    let r = box_radius_for_sigma(radius);
    if r == 0 || src.width == 0 || src.height == 0 {
        dst.alpha.copy_from_slice(&src.alpha);
        return Ok(());
    }

    box_pass_horizontal(src, tmp, r);
    box_pass_vertical(tmp, dst, r);
    for _ in 0..2 {
        box_pass_horizontal(dst, tmp, r);
        box_pass_vertical(tmp, dst, r);
    }
    Ok(())
}

/* ---- Pass 1: Horizontal (sliding window along each row) ----
   What you SEE: nothing yet (off-screen), but each pixel becomes its row-neighborhood average. */
fn box_pass_horizontal(src: &Mask, dst: &mut Mask, radius: usize) {
    let w = src.width as i32;
    let r = radius as i32;
    let win = (2 * r + 1) as f32;

    for y in 0..src.height {
        let row = y * src.width;

        // Edge value at x=0 counted r+1 times (we "extend" edges)
        let mut sum = src.alpha[row] * (r as f32 + 1.0);
        for x in 1..=r {
            sum += src.alpha[row + x.min(w - 1) as usize];
        }

        for x in 0..w {
            dst.alpha[row + x as usize] = sum / win;

            let left_x = (x - r).max(0) as usize;
            let right_x = (x + r + 1).min(w - 1) as usize;
            sum += src.alpha[row + right_x] - src.alpha[row + left_x];
        }
    }
}

/* ---- Pass 2: Vertical (same sliding window down each column) ---- */
fn box_pass_vertical(src: &Mask, dst: &mut Mask, radius: usize) {
    let w = src.width;
    let h = src.height as i32;
    let r = radius as i32;
    let win = (2 * r + 1) as f32;

    for x in 0..w {
        let mut sum = src.alpha[x] * (r as f32 + 1.0);
        for y in 1..=r {
            sum += src.alpha[y.min(h - 1) as usize * w + x];
        }

        for y in 0..h {
            dst.alpha[y as usize * w + x] = sum / win;

            let top_y = (y - r).max(0) as usize;
            let bottom_y = (y + r + 1).min(h - 1) as usize;
            sum += src.alpha[bottom_y * w + x] - src.alpha[top_y * w + x];
        }
    }
}

/// Hard cutoff: above `cutoff` → 1.0, else 0.0.
/// Visual: the soft glow snaps into a crisp silhouette.
pub fn alpha_threshold(mask: &mut Mask, cutoff: f32) {
    for a in &mut mask.alpha {
        *a = if *a > cutoff { 1.0 } else { 0.0 };
    }
}

/// Number of 4-connected opaque regions in a (thresholded) mask.
/// Visual: 1 while the droplet is fused to the anchor, 2 once it has torn away.
pub fn count_regions(mask: &Mask) -> usize {
    let (w, h) = (mask.width, mask.height);
    let mut seen = vec![false; w * h];
    let mut stack = Vec::new();
    let mut regions = 0;

    for start in 0..w * h {
        if seen[start] || mask.alpha[start] < 0.5 {
            continue;
        }
        regions += 1;
        seen[start] = true;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            let mut visit = |n: usize| {
                if !seen[n] && mask.alpha[n] >= 0.5 {
                    seen[n] = true;
                    stack.push(n);
                }
            };
            if x > 0 { visit(idx - 1); }
            if x + 1 < w { visit(idx + 1); }
            if y > 0 { visit(idx - w); }
            if y + 1 < h { visit(idx + w); }
        }
    }
    regions
}
