use std::time::Duration;

use glam::DVec2;
use pixel_blast::platform::{EventKind, HeadlessHost, HostEvent};
use pixel_blast::renderer::{PixelBuffer, Surface};
use pixel_blast::{Engine, Settings, wrap_coord};

type TestEngine = Engine<PixelBuffer, HeadlessHost>;

fn engine(width: u32, height: u32, seed: u64) -> pixel_blast::Result<TestEngine> {
    let settings = Settings {
        seed: Some(seed),
        ..Settings::default()
    };
    let host = HeadlessHost::new(width, height).with_interval(Duration::ZERO);
    Engine::new(PixelBuffer::new(0, 0), host, settings)
}

/// Fire the pending frame, if any
fn tick(engine: &mut TestEngine) -> bool {
    match engine.host_mut().take_frame() {
        Some(handle) => engine.on_frame(handle),
        None => false,
    }
}

/// 1000×1000 gives 100 particles; a pointer placed on a particle's starting
/// position pushes it away along its drift direction by the falloff amount.
#[test]
fn pointer_on_particle_blasts_it_away() -> pixel_blast::Result<()> {
    let mut engine = engine(1000, 1000, 2024)?;
    engine.start();
    assert_eq!(engine.particles().len(), 100);

    // Pick a particle clear of the edges so wraparound stays out of the way
    let (idx, before) = engine
        .particles()
        .iter()
        .enumerate()
        .find(|(_, p)| {
            p.pos.x > 20.0 && p.pos.x < 980.0 && p.pos.y > 20.0 && p.pos.y < 980.0 && p.vel.length() > 0.05
        })
        .map(|(i, p)| (i, p.clone()))
        .expect("a particle away from the edges");

    engine.set_pointer(before.pos.x, before.pos.y);
    assert!(tick(&mut engine));

    let drifted = before.pos + before.vel;
    let distance = before.vel.length();
    let expected_push = 8.0 * (120.0 - distance) / 120.0;

    let after = engine.particles()[idx].pos;
    let moved = after - drifted;
    assert!(
        (moved.length() - expected_push).abs() < 1e-9,
        "moved {} expected {}",
        moved.length(),
        expected_push
    );
    // Away from the pointer: same direction as pointer -> particle
    let away = (drifted - before.pos).normalize();
    assert!(moved.normalize().dot(away) > 0.999_999);
    Ok(())
}

/// Pointer exactly where the particle lands: zero-distance guard, no push, no NaN
#[test]
fn coincident_pointer_applies_no_force() -> pixel_blast::Result<()> {
    let mut engine = engine(1000, 1000, 77)?;
    engine.start();

    let before = engine.particles()[0].clone();
    let landing = DVec2::new(
        wrap_coord(before.pos.x + before.vel.x, 1000.0),
        wrap_coord(before.pos.y + before.vel.y, 1000.0),
    );
    engine.set_pointer(landing.x, landing.y);
    tick(&mut engine);

    let after = engine.particles()[0].pos;
    assert!(after.is_finite());
    assert_eq!(after, landing);
    Ok(())
}

#[test]
fn resize_rebuilds_population() -> pixel_blast::Result<()> {
    let mut engine = engine(1000, 1000, 1)?;
    engine.start();

    engine.resize(800, 600);
    assert_eq!(engine.particles().len(), 48);
    engine.resize(400, 300);
    assert_eq!(engine.particles().len(), 12);
    assert_eq!(engine.surface().size(), (400, 300));
    for p in engine.particles() {
        assert!(p.pos.x >= 0.0 && p.pos.x < 400.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 300.0);
    }
    Ok(())
}

#[test]
fn stop_tears_down_exactly_once() -> pixel_blast::Result<()> {
    let mut engine = engine(640, 480, 3)?;
    engine.start();
    assert_eq!(engine.host().active_subscriptions(), 3);
    for kind in EventKind::ALL {
        assert!(engine.host().is_subscribed(kind));
    }

    engine.stop();
    engine.stop();
    engine.stop();

    let host = engine.host();
    assert_eq!(host.active_subscriptions(), 0);
    assert_eq!(host.subscribe_calls(), 3);
    assert_eq!(host.unsubscribe_calls(), 3);
    assert_eq!(host.frame_cancels(), 1);
    assert_eq!(host.pending_frame(), None);
    assert!(!engine.is_running());
    Ok(())
}

#[test]
fn restart_after_stop_is_symmetric() -> pixel_blast::Result<()> {
    let mut engine = engine(640, 480, 4)?;
    for _ in 0..3 {
        engine.start();
        assert_eq!(engine.host().active_subscriptions(), 3);
        assert!(tick(&mut engine));
        engine.stop();
        assert_eq!(engine.host().active_subscriptions(), 0);
    }
    assert_eq!(engine.host().subscribe_calls(), engine.host().unsubscribe_calls());
    assert_eq!(engine.clock().ticks(), 3);
    Ok(())
}

#[test]
fn run_frames_ticks_until_stopped() -> pixel_blast::Result<()> {
    let mut engine = engine(500, 400, 5)?;
    assert_eq!(engine.run_frames(10), 0);

    engine.start();
    assert_eq!(engine.run_frames(25), 25);
    assert_eq!(engine.clock().ticks(), 25);
    assert_eq!(engine.surface().rects_drawn(), 20);

    engine.stop();
    assert_eq!(engine.run_frames(10), 0);
    assert_eq!(engine.clock().ticks(), 25);
    Ok(())
}

#[test]
fn long_run_with_moving_pointer_stays_in_bounds() -> pixel_blast::Result<()> {
    let mut engine = engine(300, 200, 6)?;
    engine.start();
    for i in 0..400 {
        let t = i as f64 * 0.05;
        engine.notify(HostEvent::PointerMove {
            x: 150.0 + 140.0 * t.cos(),
            y: 100.0 + 90.0 * t.sin(),
        });
        assert!(tick(&mut engine));
    }
    engine.notify(HostEvent::PointerLeave);
    assert!(engine.pointer().is_absent());

    for p in engine.particles() {
        assert!(p.pos.x >= 0.0 && p.pos.x < 300.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 200.0);
    }
    Ok(())
}

#[test]
fn host_resize_notification_resizes_surface() -> pixel_blast::Result<()> {
    let mut engine = engine(1000, 1000, 8)?;
    engine.start();
    engine.host_mut().set_viewport(1920, 1080);
    engine.notify(HostEvent::Resize {
        width: 1920,
        height: 1080,
    });
    assert_eq!(engine.surface().size(), (1920, 1080));
    assert_eq!(engine.particles().len(), 207);
    Ok(())
}

#[test]
fn engines_are_independent() -> pixel_blast::Result<()> {
    let mut a = engine(1000, 1000, 10)?;
    let mut b = engine(400, 300, 10)?;
    a.start();
    b.start();
    a.set_pointer(10.0, 10.0);
    assert!(b.pointer().is_absent());
    a.stop();
    assert!(b.is_running());
    assert_eq!(b.particles().len(), 12);
    Ok(())
}

#[test]
fn invalid_settings_fail_fast() {
    let settings = Settings {
        palette: Vec::new(),
        ..Settings::default()
    };
    let result = Engine::new(PixelBuffer::new(0, 0), HeadlessHost::new(10, 10), settings);
    assert!(matches!(result, Err(pixel_blast::Error::InvalidSettings(_))));
}
