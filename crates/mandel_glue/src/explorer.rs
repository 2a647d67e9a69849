use std::sync::Arc;

use mandel_app::{
    AppConfig, AppError, AppHandler, AppRunner, ResourceError, Window,
    input::{Input, KeyCode},
    time::FrameTimer,
};
use mandel_render::{MAX_ITERATIONS, Renderer, ViewUniform};
use mandel_view::{FrameSnapshot, Session, ViewConfig, ViewError, ViewEvent, WindowSize};

pub const DEFAULT_ITERATIONS: u32 = 256;
pub const MORE_ITERATIONS_KEY: KeyCode = KeyCode::BracketRight;
pub const FEWER_ITERATIONS_KEY: KeyCode = KeyCode::BracketLeft;

/// Interactive fractal explorer
///
/// Wheel zooms around the cursor, left-drag pans, `=` animates back home,
/// `[`/`]` halve or double the iteration budget & `Escape` quits
pub struct Explorer {
    config: Option<AppConfig>,
    title: String,
    session: Session,
    iterations: u32,
    vsync: bool,
    shown_fps: u32,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    /// Create a new [`Explorer`] with an 800x600 window
    pub fn new() -> Self {
        let (width, height) = (800, 600);
        let title = "Mandelbrot Explorer".to_string();
        Self {
            config: Some(AppConfig {
                title: title.clone(),
                width: Some(width),
                height: Some(height),
                resizable: true,
            }),
            title,
            session: Session::new(WindowSize::new(width, height)),
            iterations: DEFAULT_ITERATIONS,
            vsync: false,
            shown_fps: 0,
        }
    }

    /// Set window title
    pub fn title(mut self, title: &str) -> Self {
        if let Some(c) = self.config.as_mut() {
            c.title = title.into();
        }
        self.title = title.into();
        self
    }

    /// Set window size (width, height in pixels)
    pub fn screen_size(mut self, width: u32, height: u32) -> Self {
        if let Some(c) = self.config.as_mut() {
            c.width = Some(width);
            c.height = Some(height);
        }
        self.session.handle(ViewEvent::Resize { width, height });
        self
    }

    /// Enable or disable window resizing (defaults to true)
    pub fn resizable(mut self, resizable: bool) -> Self {
        if let Some(c) = self.config.as_mut() {
            c.resizable = resizable;
        }
        self
    }

    /// Enable or disable vsync (defaults to off)
    pub fn vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Starting iteration budget, clamped to `1..=MAX_ITERATIONS`
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.clamp(1, MAX_ITERATIONS);
        self
    }

    /// Replace the zoom/pan tunables; limits that could break the camera are refused
    pub fn view_config(mut self, config: ViewConfig) -> Result<Self, ViewError> {
        self.session = Session::with_config(self.session.window(), config)?;
        Ok(self)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Opens the window & blocks until it closes (native)
    pub fn run(mut self) -> Result<(), AppError> {
        let config = self.config.take().unwrap_or_default();
        AppRunner::new(self, config).run()
    }

    fn adjust_iterations(&mut self, input: &Input) {
        let next = if input.key_pressed(MORE_ITERATIONS_KEY) {
            step_iterations(self.iterations, true)
        } else if input.key_pressed(FEWER_ITERATIONS_KEY) {
            step_iterations(self.iterations, false)
        } else {
            return;
        };

        if next != self.iterations {
            log::info!("iterations {} -> {next}", self.iterations);
            self.iterations = next;
        }
    }

    fn update_title(&mut self, window: &Window, fps: u32) {
        if fps != self.shown_fps {
            self.shown_fps = fps;
            window.set_title(&format!("{} | FPS: {fps}", self.title));
        }
    }
}

/// Doubles or halves the iteration budget within `1..=MAX_ITERATIONS`
fn step_iterations(current: u32, more: bool) -> u32 {
    if more {
        current.saturating_mul(2).min(MAX_ITERATIONS)
    } else {
        (current / 2).max(1)
    }
}

/// Packs a camera snapshot into the shader's uniform layout
///
/// The center goes up in plane units so the `f32` cast keeps its precision relative to the view
fn view_uniform(
    snapshot: FrameSnapshot,
    (width, height): (u32, u32),
    iterations: u32,
) -> ViewUniform {
    ViewUniform::new(
        [width as f32, height as f32],
        (snapshot.center / snapshot.scale).as_vec2().to_array(),
        snapshot.scale as f32,
        iterations,
    )
}

impl AppHandler<Renderer> for Explorer {
    async fn with_resource(&mut self, window: Arc<Window>) -> Result<Renderer, ResourceError> {
        let size = window.inner_size();
        let renderer = Renderer::new(size.width, size.height, window).await?;
        self.session.handle(ViewEvent::Resize {
            width: size.width,
            height: size.height,
        });
        Ok(renderer)
    }

    fn on_ready(&mut self, _window: &Window, renderer: &mut Renderer) {
        renderer.set_vsync(self.vsync);

        #[cfg(target_arch = "wasm32")]
        renderer.resize(_window.inner_size().width, _window.inner_size().height);
    }

    fn frame(
        &mut self,
        window: &Window,
        renderer: &mut Renderer,
        input: &Input,
        timer: &FrameTimer,
    ) {
        let snapshot = self
            .session
            .process_frame(timer.ticks(), input.events().iter().copied());
        self.adjust_iterations(input);
        self.update_title(window, timer.fps);

        let view = view_uniform(snapshot, renderer.surface_size(), self.iterations);
        if let Err(err) = renderer.render(&view) {
            log::error!("failed to render frame: {err}");
        }
    }

    fn resize(&mut self, width: u32, height: u32, renderer: &mut Renderer) {
        renderer.resize(width, height)
    }

    fn should_quit(&self) -> bool {
        !self.session.is_running()
    }

    fn on_quit(&mut self) {
        log::info!("closing explorer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandel_view::dvec2;

    #[test]
    fn iteration_steps_stay_in_range() {
        assert_eq!(step_iterations(256, true), 512);
        assert_eq!(step_iterations(256, false), 128);
        assert_eq!(step_iterations(MAX_ITERATIONS, true), MAX_ITERATIONS);
        assert_eq!(step_iterations(1, false), 1);
        assert_eq!(step_iterations(700, true), MAX_ITERATIONS);
    }

    #[test]
    fn uniform_carries_snapshot() {
        let snapshot = FrameSnapshot {
            center: dvec2(0.25, -1.5),
            scale: 4.0,
        };
        let u = view_uniform(snapshot, (1024, 768), 99);
        assert_eq!(u.window_size, [1024.0, 768.0]);
        assert_eq!(u.center, [0.0625, -0.375]);
        assert_eq!(u.scale, 4.0);
        assert_eq!(u.iterations, 99);
    }

    #[test]
    fn builder_keeps_window_and_tunables_in_sync() {
        let cfg = ViewConfig {
            scroll_coef: 0.5,
            ..Default::default()
        };
        let explorer = Explorer::new()
            .view_config(cfg)
            .unwrap()
            .screen_size(1280, 720)
            .iterations(0);

        assert_eq!(explorer.session().window(), WindowSize::new(1280, 720));
        assert_eq!(explorer.session().config().scroll_coef, 0.5);
        assert_eq!(explorer.iterations, 1);
        assert!(explorer.session().is_running());
    }

    #[test]
    fn deep_zoom_center_keeps_precision() {
        // scaled units reach ~1e4 here; plane units stay near the set
        let snapshot = FrameSnapshot {
            center: dvec2(-0.743643887037151 * 1e4, 0.131825904205330 * 1e4),
            scale: 1e4,
        };
        let u = view_uniform(snapshot, (800, 600), 256);
        assert!((u.center[0] as f64 - -0.743643887037151).abs() < 1e-7);
        assert!((u.center[1] as f64 - 0.131825904205330).abs() < 1e-7);
    }

    #[test]
    fn rejected_view_config_is_an_error() {
        let cfg = ViewConfig {
            min_scale: 5.0,
            max_scale: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Explorer::new().view_config(cfg),
            Err(ViewError::InvalidConfig(_))
        ));
    }
}
