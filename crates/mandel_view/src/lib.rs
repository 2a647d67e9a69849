//! Viewport transform & interpolation engine
//!
//! Turns discrete input (wheel ticks, drags, resets) into a continuously
//! evolving `(center, scale)` camera. Nothing in here touches a window or the GPU;
//! the app layer feeds [`ViewEvent`]s in & reads one [`FrameSnapshot`] per frame.

pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod interp;
pub mod mapper;
pub mod session;
pub mod view;

pub use config::ViewConfig;
pub use error::ViewError;
pub use event::ViewEvent;
pub use glam::{DVec2, dvec2};
pub use mapper::WindowSize;
pub use session::Session;
pub use view::{FrameSnapshot, ViewState};
