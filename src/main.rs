//! Pixel Blast entry point
//!
//! On the web, mounts the particle field on the `pixel-blast` canvas.
//! Natively, runs a short headless session and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;

    use pixel_blast::platform::web::PixelBlast;
    use wasm_bindgen::prelude::*;

    /// Canvas element the page provides
    const CANVAS_ID: &str = "pixel-blast";

    thread_local! {
        // Keeps the mounted field alive for the lifetime of the page
        static MOUNTED: RefCell<Option<PixelBlast>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pixel Blast starting...");

        let blast = PixelBlast::new(CANVAS_ID)?;
        blast.start();
        MOUNTED.with(|m| *m.borrow_mut() = Some(blast));

        log::info!("Pixel Blast running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Blast (native, headless) starting...");

    if let Err(e) = native::run(std::env::args().nth(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use pixel_blast::platform::HeadlessHost;
    use pixel_blast::renderer::PixelBuffer;
    use pixel_blast::{Engine, Result, Settings};

    const WIDTH: u32 = 1280;
    const HEIGHT: u32 = 720;
    const FRAMES_PER_PHASE: u64 = 60;

    /// Drift, sweep the pointer across the field, then let it settle
    pub fn run(settings_path: Option<String>) -> Result<()> {
        let settings = match settings_path {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| pixel_blast::Error::InvalidSettings(format!("{path}: {e}")))?;
                Settings::from_json(&json)?
            }
            None => Settings::load(),
        };

        let mut engine = Engine::new(PixelBuffer::new(0, 0), HeadlessHost::new(WIDTH, HEIGHT), settings)?;
        engine.start();

        engine.run_frames(FRAMES_PER_PHASE);
        report("drift", &engine);

        for i in 0..FRAMES_PER_PHASE {
            let t = i as f64 / FRAMES_PER_PHASE as f64;
            engine.set_pointer(t * WIDTH as f64, HEIGHT as f64 / 2.0);
            engine.run_frames(1);
        }
        report("sweep", &engine);

        engine.clear_pointer();
        engine.run_frames(FRAMES_PER_PHASE);
        report("settle", &engine);

        engine.stop();
        log::info!(
            "Done: {} ticks, {} subscriptions left",
            engine.clock().ticks(),
            engine.host().active_subscriptions()
        );
        Ok(())
    }

    fn report(phase: &str, engine: &Engine<PixelBuffer, HeadlessHost>) {
        let surface = engine.surface();
        log::info!(
            "[{}] tick {}: {} particles, {} squares, {} lit pixels",
            phase,
            engine.clock().ticks(),
            engine.particles().len(),
            surface.rects_drawn(),
            surface.lit_pixels()
        );
    }
}
