pub mod view {
    pub use mandel_view::{
        DVec2, FrameSnapshot, Session, ViewConfig, ViewError, ViewEvent, ViewState, WindowSize,
        dvec2, interp, mapper,
    };
}

#[cfg(feature = "app")]
pub mod app {
    pub use mandel_app::{AppConfig, AppError, AppHandler, AppRunner};
}

#[cfg(feature = "app")]
pub mod input {
    pub use mandel_app::input::{Input, KeyCode, MouseButton};
}

#[cfg(feature = "render")]
pub mod render {
    pub use mandel_render::{MAX_ITERATIONS, RenderError, Renderer, ViewUniform};
}

#[cfg(feature = "explorer")]
pub use mandel_glue::Explorer;
