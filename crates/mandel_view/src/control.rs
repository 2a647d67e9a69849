//! Input handlers that turn one event into one transition

use crate::{
    config::ViewConfig,
    error::ViewError,
    mapper::{self, WindowSize},
    view::ViewState,
};

impl ViewState {
    /// Animated zoom anchored at pixel `(x, y)`
    ///
    /// The step compounds on the in-flight target scale, so wheel ticks arriving
    /// faster than the animation still add up. The new center is solved against
    /// the visible camera so the plane point under the cursor ends where it started
    pub fn scroll(
        &mut self,
        window: WindowSize,
        x: f64,
        y: f64,
        delta: f64,
        config: &ViewConfig,
    ) -> Result<(), ViewError> {
        if !delta.is_finite() {
            return Err(ViewError::NonFiniteInput);
        }
        let anchor = window.normalize(x, y)?;

        let current = self.snapshot();
        let scale = config
            .clamp_scale(self.target().scale * mapper::zoom_factor(delta, config.scroll_coef));
        let center = mapper::anchored_center(current.center, current.scale, scale, anchor);

        self.begin_transition(center, scale, self.frame_tick(), config.transition_ticks)
    }

    /// Instant pan by a pixel delta; cancels any zoom in flight at its visible scale
    pub fn drag(&mut self, window: WindowSize, dx: f64, dy: f64) -> Result<(), ViewError> {
        let offset = window.pan_offset(dx, dy)?;
        let current = self.snapshot();
        self.begin_transition(current.center + offset, current.scale, self.frame_tick(), 0)
    }

    /// Animates back to the configured home view
    pub fn reset(&mut self, config: &ViewConfig) -> Result<(), ViewError> {
        log::debug!("resetting view to {} @ {}", config.home_center, config.home_scale);
        self.begin_transition(
            config.home_center,
            config.home_scale,
            self.frame_tick(),
            config.reset_ticks,
        )
    }
}
