// What you SEE:
// • A yellow droplet sits in the middle of a white window.
// • Hold Left Mouse and drag: the droplet follows, stretching a gooey neck from the anchor
//   until it tears off; it turns from yellow to red the further you pull.
// • Release: it springs back with a little wobble.
// • R snaps it home instantly. S saves a PNG of the frame + silhouette. ESC quits.

mod color;
mod compositor;
mod config;
mod drag;
mod draw;
mod error;
mod input;
mod raster;
mod snapshot;
mod spring;
mod types;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use color::drag_distance;
use compositor::{plan_frame, Compositor};
use config::DropletConfig;
use drag::DragTracker;
use draw::{draw_text_5x7, Drawer};
use error::Error;
use input::GestureRecognizer;
use raster::count_regions;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cfg = DropletConfig::default();
    cfg.validate()?;
    let (w, h) = (cfg.window_width, cfg.window_height);

    /* --- Window setup ---
       Visual: window opens, blank until the first frame is presented. */
    let mut drawer = Drawer::new("Droplet — Metaball Drag", w, h)?;
    tracing::info!(width = w, height = h, "window opened");

    /* --- Reusable buffers ---
       Visual: `composed` holds the droplet picture; `screen` is that plus HUD text. */
    let mut composed = FrameBuffer::new(w, h);
    let mut screen = FrameBuffer::new(w, h);
    let mut compositor = Compositor::new(w, h);
    let mut regions = 0;

    let mut tracker = DragTracker::new(cfg.spring);
    let mut gestures = GestureRecognizer::new();
    let mut snapshots_taken: u32 = 0;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32(); // drives the spring
        last_frame_time = now;

        /* 1) Inputs → drag events → tracker */
        if drawer.r_pressed_once() {
            tracker.reset();
        }
        if let Some(event) = gestures.update(drawer.left_mouse_down(), drawer.mouse_pos()) {
            event.apply(&mut tracker);
        }

        /* 2) Step the snap-back (no-op while dragging or at rest) */
        tracker.tick(dt);

        /* 3) Re-compose only when the state changed.
           Visual: the droplet moves/tints; otherwise last frame is reused. */
        if tracker.take_dirty() {
            let commands = plan_frame(tracker.offset(), &cfg, w, h);
            compositor.execute(&commands, &mut composed)?;
            regions = count_regions(compositor.silhouette());
        }
        screen.pixels.copy_from_slice(&composed.pixels);

        /* 4) Snapshot on demand */
        if drawer.s_pressed_once() {
            snapshots_taken += 1;
            let frame_path = PathBuf::from(format!("droplet-{snapshots_taken}.png"));
            let mask_path = PathBuf::from(format!("droplet-{snapshots_taken}-mask.png"));
            if let Err(e) = snapshot::save_snapshot(&composed, compositor.silhouette(), &frame_path, &mask_path) {
                // optional extra; keep the widget running
                tracing::warn!(error = %e, "snapshot failed");
            }
        }

        /* 5) HUD text */
        let status = if tracker.is_dragging() {
            "DRAG"
        } else if tracker.is_animating() {
            "SPRING"
        } else {
            "REST"
        };
        let hud = format!(
            "{} | DIST: {:.0} | REGIONS: {} | {}",
            status,
            drag_distance(tracker.offset(), cfg.max_offset),
            regions,
            hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_40_40_40);
        draw_text_5x7(&mut screen, 8, h as i32 - 16, "S: SAVE  R: RESET", 0x00_40_40_40);

        /* 6) Present to the window */
        drawer.present(&screen)?;

        /* 7) FPS counter (logged + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            tracing::info!(fps, "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
