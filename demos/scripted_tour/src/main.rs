//! Drives the camera with a canned input script, no window or GPU needed
//!
//! Prints the snapshot the renderer would receive every 25 ticks

use mandel::view::{Session, ViewEvent, WindowSize};

fn main() {
    let mut session = Session::new(WindowSize::new(800, 600));

    // (tick, event) pairs; wheel ticks land faster than one animation lasts
    let script = [
        (0, ViewEvent::Scroll { x: 250.0, y: 300.0, delta: 1.0 }),
        (40, ViewEvent::Scroll { x: 250.0, y: 300.0, delta: 1.0 }),
        (80, ViewEvent::Scroll { x: 250.0, y: 300.0, delta: 1.0 }),
        (300, ViewEvent::Drag { dx: -60.0, dy: 25.0 }),
        (325, ViewEvent::Resize { width: 1280, height: 720 }),
        (400, ViewEvent::Reset),
    ];

    for tick in (0u64..=600).step_by(25) {
        let events = script
            .iter()
            .filter(|(at, _)| (tick.saturating_sub(24)..=tick).contains(at))
            .map(|(_, event)| *event);
        let snap = session.process_frame(tick, events);

        println!(
            "t={tick:>4}  center=({:+.5}, {:+.5})  scale={:.5}{}",
            snap.center.x,
            snap.center.y,
            snap.scale,
            if session.view().is_settled() { "" } else { "  ~" }
        );
    }
}
