pub mod input;
pub mod time;

use crate::{
    input::Input,
    time::{FrameTimer, FrameTimerInternal},
};
use std::{error::Error, sync::Arc};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::WindowId,
};
pub use winit::{event::WindowEvent, window::Window};

/// Error produced by [`AppHandler::with_resource`]
pub type ResourceError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to initialize render resource: {0}")]
    Resource(ResourceError),
}

pub struct AppConfig {
    pub title: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resizable: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Mandel".to_string(),
            width: None,
            height: None,
            resizable: true,
        }
    }
}

/// Trait defining application behavior
///
/// Implement this for your app logic. Hooks are called during window creation,
/// every frame, on resize, & before quitting
#[allow(async_fn_in_trait)]
pub trait AppHandler<R> {
    /// Called for every WindowEvent before default input handling
    fn on_window_event(&mut self, _window: &Window, _event: &WindowEvent) {}
    /// Called once the window exists; should create & return the resource
    async fn with_resource(&mut self, window: Arc<Window>) -> Result<R, ResourceError>;
    /// Called after the resource is initialized & window is ready
    fn on_ready(&mut self, _window: &Window, _resource: &mut R) {}
    /// Called every frame with the input gathered since the previous one
    fn frame(&mut self, _window: &Window, _resource: &mut R, _input: &Input, _timer: &FrameTimer) {}
    /// Called on window resize
    fn resize(&mut self, _w: u32, _h: u32, _resource: &mut R) {}
    /// Polled after every frame; returning true closes the window
    fn should_quit(&self) -> bool {
        false
    }
    /// Called when the window is about to close
    fn on_quit(&mut self) {}
}

/// Generic application entry point
///
/// Manages window creation, input, event loop, & delegating hooks
/// to your `AppHandler`
/// Use `AppRunner::new()` to construct it, then call `.run()` to start the loop
pub struct AppRunner<R: 'static, H: AppHandler<R> + 'static> {
    handler: Option<H>,
    resource: Option<R>,
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<(R, H)>>,
    input: Input,
    timer: FrameTimer,
    config: AppConfig,
    error: Option<AppError>,
}

#[doc(hidden)]
impl<R, H: AppHandler<R> + 'static> ApplicationHandler<(R, H)> for AppRunner<R, H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Called when window is ready; initializes the resource async (wasm) or sync (native)
        let Some(proxy) = self.proxy.take() else {
            return;
        };

        let win_attrs = {
            use winit::dpi::PhysicalSize;

            #[allow(unused_mut)]
            let mut attrs = Window::default_attributes()
                .with_title(&self.config.title)
                .with_resizable(self.config.resizable);

            if let (Some(width), Some(height)) = (self.config.width, self.config.height) {
                attrs = attrs.with_inner_size(PhysicalSize::new(width, height));
            }

            #[cfg(target_arch = "wasm32")]
            {
                use winit::platform::web::WindowAttributesExtWebSys;
                attrs = attrs.with_append(true);
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                attrs = attrs.with_visible(false);
            }

            attrs
        };

        let window = match event_loop.create_window(win_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fail(event_loop, err.into());
                return;
            }
        };
        self.window = Some(window.clone());
        let Some(mut handler) = self.handler.take() else {
            return;
        };

        #[cfg(target_arch = "wasm32")]
        {
            // Wait for DOM and canvas to be ready before initializing
            wasm_bindgen_futures::spawn_local(async move {
                match handler.with_resource(window).await {
                    Ok(resource) => {
                        _ = proxy.send_event((resource, handler));
                    }
                    Err(_err) => {
                        #[cfg(feature = "log")]
                        log::error!("failed to initialize render resource: {_err}");
                    }
                }
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            match pollster::block_on(handler.with_resource(window)) {
                Ok(resource) => {
                    _ = proxy.send_event((resource, handler));
                }
                Err(err) => {
                    self.handler = Some(handler);
                    self.fail(event_loop, AppError::Resource(err));
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if let (Some(handler), Some(window)) = (&mut self.handler, &self.window) {
            handler.on_window_event(window, &event);
        }
        self.input.window_event(&event);

        match event {
            WindowEvent::CloseRequested => self.quit(event_loop),
            WindowEvent::RedrawRequested => {
                if self.run_frame() {
                    self.quit(event_loop);
                } else if let Some(w) = self.window.as_ref() {
                    w.request_redraw();
                }
            }
            WindowEvent::Resized(size) => {
                if let (Some(r), Some(handler)) = (self.resource.as_mut(), self.handler.as_mut()) {
                    handler.resize(size.width, size.height, r);
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _: &ActiveEventLoop, (resource, handler): (R, H)) {
        self.resource = Some(resource);
        self.handler = Some(handler);

        if let (Some(r), Some(h), Some(w)) = (&mut self.resource, &mut self.handler, &self.window) {
            h.on_ready(w, r);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            self.run_frame();
            if let Some(w) = self.window.as_ref() {
                w.set_visible(true);
            }
        }
        if let Some(w) = self.window.as_ref() {
            w.request_redraw();
        }
    }
}

impl<R, H: AppHandler<R> + 'static> AppRunner<R, H> {
    /// Creates a new runner with the given handler & configuration
    pub fn new(handler: H, config: AppConfig) -> Self {
        Self {
            handler: Some(handler),
            resource: None,
            window: None,
            proxy: None,
            input: Input::default(),
            timer: FrameTimer::default(),
            config,
            error: None,
        }
    }

    /// Starts the app & runs the event loop
    ///
    /// On native this blocks until the window closes & reports any failure that ended it
    pub fn run(mut self) -> Result<(), AppError> {
        #[cfg(all(feature = "log", target_arch = "wasm32"))]
        {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            _ = console_log::init_with_level(log::Level::Warn);
        }
        #[cfg(all(feature = "log", not(target_arch = "wasm32")))]
        env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

        let event_loop = EventLoop::<(R, H)>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        self.proxy = Some(event_loop.create_proxy());
        self.start(event_loop)
    }

    #[cfg(target_arch = "wasm32")]
    fn start(self, event_loop: EventLoop<(R, H)>) -> Result<(), AppError> {
        use winit::platform::web::EventLoopExtWebSys;
        wasm_bindgen_futures::spawn_local(async move {
            event_loop.spawn_app(self);
        });
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start(mut self, event_loop: EventLoop<(R, H)>) -> Result<(), AppError> {
        event_loop.run_app(&mut self)?;
        self.error.map_or(Ok(()), Err)
    }

    /// Runs one handler frame; returns true if the handler asked to quit
    fn run_frame(&mut self) -> bool {
        let (Some(w), Some(r), Some(handler)) = (
            self.window.as_ref(),
            self.resource.as_mut(),
            self.handler.as_mut(),
        ) else {
            return false;
        };

        handler.frame(w, r, &self.input, &self.timer);
        self.timer.update();
        self.input.end_frame();
        handler.should_quit()
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(handler) = &mut self.handler {
            handler.on_quit();
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        #[cfg(feature = "log")]
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}
