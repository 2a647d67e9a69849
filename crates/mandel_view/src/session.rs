use crate::{
    config::ViewConfig,
    error::ViewError,
    event::ViewEvent,
    mapper::WindowSize,
    view::{FrameSnapshot, ViewState},
};

/// Everything one explorer window needs to turn events into camera frames
///
/// Owned by the main loop & only mutated from it
#[derive(Debug, Clone)]
pub struct Session {
    view: ViewState,
    window: WindowSize,
    config: ViewConfig,
    running: bool,
}

impl Session {
    /// A session using [`ViewConfig::default`]
    pub fn new(window: WindowSize) -> Self {
        let config = ViewConfig::default();
        Self {
            view: ViewState::settled(config.home_center, config.home_scale),
            window,
            config,
            running: true,
        }
    }

    /// A session with custom tunables, refused if they could yield a non-positive or non-finite camera
    pub fn with_config(window: WindowSize, config: ViewConfig) -> Result<Self, ViewError> {
        config.validate()?;
        Ok(Self {
            config,
            view: ViewState::settled(config.home_center, config.home_scale),
            ..Self::new(window)
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// False once a `Close` event has been handled
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pins the tick used for every event & read until the next frame
    pub fn begin_frame(&mut self, now: u64) {
        self.view.begin_frame(now);
    }

    /// Applies a single event; refused events are logged & dropped
    pub fn handle(&mut self, event: ViewEvent) {
        let result = match event {
            ViewEvent::Scroll { x, y, delta } => {
                self.view.scroll(self.window, x, y, delta, &self.config)
            }
            ViewEvent::Drag { dx, dy } => self.view.drag(self.window, dx, dy),
            ViewEvent::Reset => self.view.reset(&self.config),
            ViewEvent::Resize { width, height } => {
                self.window = WindowSize::new(width, height);
                Ok(())
            }
            ViewEvent::Close => {
                self.running = false;
                Ok(())
            }
        };

        if let Err(err) = result {
            log::debug!("ignoring {event:?}: {err}");
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.view.snapshot()
    }

    /// One whole frame: pin the tick, apply events in order, then read the camera
    pub fn process_frame(
        &mut self,
        now: u64,
        events: impl IntoIterator<Item = ViewEvent>,
    ) -> FrameSnapshot {
        self.begin_frame(now);
        for event in events {
            self.handle(event);
        }
        self.snapshot()
    }
}
