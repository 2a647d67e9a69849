#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now_millis() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Frame clock: millisecond ticks for the camera plus delta time & FPS
pub struct FrameTimer {
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    last_millis: f64,
    accumulator: f32,
    frame_count: u32,
    /// Time in seconds since the last frame
    pub delta: f32,
    /// Frames per second, updated once per second
    pub fps: u32,
    /// Total number of frames rendered since start
    pub frame: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: Instant::now(),
            last_millis: 0.0,
            accumulator: 0.0,
            frame_count: 0,
            delta: 0.0,
            fps: 0,
            frame: 0,
        }
    }
}

impl FrameTimer {
    fn millis(&self) -> f64 {
        #[cfg(not(target_arch = "wasm32"))]
        {
            now_millis(self.start)
        }
        #[cfg(target_arch = "wasm32")]
        {
            now_millis()
        }
    }

    /// Monotonic milliseconds since the timer started
    ///
    /// Read once at the top of a frame & handed to the view
    pub fn ticks(&self) -> u64 {
        self.millis() as u64
    }
}

/// Internal trait for `mandel_app` integration or direct use outside the runner
/// Calculates delta time & updates FPS once per second
pub trait FrameTimerInternal {
    fn update(&mut self);
}

impl FrameTimerInternal for FrameTimer {
    fn update(&mut self) {
        let cur = self.millis();
        self.delta = ((cur - self.last_millis) / 1000.0) as f32;
        self.last_millis = cur;

        self.accumulator += self.delta;
        self.frame_count += 1;
        self.frame += 1;

        if self.accumulator >= 1.0 {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.accumulator = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_never_go_backwards() {
        let timer = FrameTimer::default();
        let a = timer.ticks();
        let b = timer.ticks();
        assert!(b >= a);
    }

    #[test]
    fn update_counts_frames() {
        let mut timer = FrameTimer::default();
        timer.update();
        timer.update();
        assert_eq!(timer.frame, 2);
        assert!(timer.delta >= 0.0);
    }
}
