/// A decoded input event, already stripped of any platform detail
///
/// Pixel coordinates are window coordinates with the origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    /// Wheel movement at pixel `(x, y)`; positive `delta` zooms in
    Scroll { x: f64, y: f64, delta: f64 },
    /// Cursor motion in pixels while the pan button is held
    Drag { dx: f64, dy: f64 },
    /// Animate back to the home view
    Reset,
    Resize { width: u32, height: u32 },
    Close,
}
