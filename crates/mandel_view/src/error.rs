use glam::DVec2;
use thiserror::Error;

/// Reasons an input event or a view config is refused
///
/// None of these are fatal; the event is dropped & the view is left untouched
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewError {
    #[error("window has a zero-sized dimension ({width}x{height})")]
    DegenerateWindow { width: u32, height: u32 },
    #[error("input coordinate or delta is not finite")]
    NonFiniteInput,
    #[error("camera target is not representable (center {center}, scale {scale})")]
    InvalidTarget { center: DVec2, scale: f64 },
    #[error("view config rejected: {0}")]
    InvalidConfig(&'static str),
}
