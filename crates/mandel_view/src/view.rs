use glam::DVec2;

use crate::{error::ViewError, interp};

/// The `(center, scale)` pair handed to the renderer once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub center: DVec2,
    pub scale: f64,
}

/// Camera state as a pair of interpolation endpoints plus the tick window between them
///
/// Reads go through the tick cached by [`begin_frame`](Self::begin_frame), so every
/// channel queried during a frame is evaluated at the same instant
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    last_center: DVec2,
    next_center: DVec2,
    last_scale: f64,
    next_scale: f64,
    last_update_tick: u64,
    next_update_tick: u64,
    last_frame_tick: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::settled(DVec2::ZERO, 1.0)
    }
}

impl ViewState {
    /// A view parked at `center`/`scale` with no animation in flight
    pub fn settled(center: DVec2, scale: f64) -> Self {
        Self {
            last_center: center,
            next_center: center,
            last_scale: scale,
            next_scale: scale,
            last_update_tick: 0,
            next_update_tick: 0,
            last_frame_tick: 0,
        }
    }

    /// Caches the tick all reads during this frame are evaluated at
    pub fn begin_frame(&mut self, now: u64) {
        self.last_frame_tick = now;
    }

    pub fn frame_tick(&self) -> u64 {
        self.last_frame_tick
    }

    pub fn current_center(&self) -> DVec2 {
        interp::point_at(
            self.last_center,
            self.next_center,
            self.last_update_tick,
            self.next_update_tick,
            self.last_frame_tick,
        )
    }

    pub fn current_scale(&self) -> f64 {
        interp::value_at(
            self.last_scale,
            self.next_scale,
            self.last_update_tick,
            self.next_update_tick,
            self.last_frame_tick,
        )
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            center: self.current_center(),
            scale: self.current_scale(),
        }
    }

    /// Where the current transition ends
    pub fn target(&self) -> FrameSnapshot {
        FrameSnapshot {
            center: self.next_center,
            scale: self.next_scale,
        }
    }

    /// Where the current transition started
    pub fn origin(&self) -> FrameSnapshot {
        FrameSnapshot {
            center: self.last_center,
            scale: self.last_scale,
        }
    }

    /// `(last_update_tick, next_update_tick)`
    pub fn transition_window(&self) -> (u64, u64) {
        (self.last_update_tick, self.next_update_tick)
    }

    /// True once the camera has stopped moving as of the cached frame tick
    pub fn is_settled(&self) -> bool {
        self.last_update_tick == self.next_update_tick
            || self.last_frame_tick >= self.next_update_tick
    }

    /// Starts moving toward a new target, superseding any transition in flight
    ///
    /// The visible value at the cached frame tick becomes the new start point so
    /// back-to-back inputs never jump. A `duration` of zero snaps instantly.
    /// Targets with a non-positive or non-finite scale are refused & leave the state untouched
    pub fn begin_transition(
        &mut self,
        center: DVec2,
        scale: f64,
        now: u64,
        duration: u64,
    ) -> Result<(), ViewError> {
        if !center.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Err(ViewError::InvalidTarget { center, scale });
        }

        let current = self.snapshot();
        self.last_center = current.center;
        self.last_scale = current.scale;
        self.next_center = center;
        self.next_scale = scale;
        self.last_update_tick = now;
        self.next_update_tick = now.saturating_add(duration);

        log::trace!(
            "transition to {center} @ {scale} over ticks {}..{}",
            self.last_update_tick,
            self.next_update_tick
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn starts_settled_at_home() {
        let view = ViewState::default();
        assert!(view.is_settled());
        assert_eq!(view.current_center(), DVec2::ZERO);
        assert_eq!(view.current_scale(), 1.0);
    }

    #[test]
    fn reads_use_cached_frame_tick() {
        let mut view = ViewState::default();
        view.begin_frame(1000);
        view.begin_transition(dvec2(2.0, -2.0), 3.0, 1000, 100).unwrap();

        view.begin_frame(1050);
        let snap = view.snapshot();
        assert!((snap.center - dvec2(1.0, -1.0)).length() < 1e-12);
        assert!((snap.scale - 2.0).abs() < 1e-12);
        assert!(!view.is_settled());

        view.begin_frame(1100);
        assert_eq!(view.snapshot(), view.target());
        assert!(view.is_settled());
    }

    #[test]
    fn new_transition_starts_from_visible_value() {
        let mut view = ViewState::default();
        view.begin_frame(0);
        view.begin_transition(dvec2(10.0, 0.0), 1.0, 0, 100).unwrap();

        view.begin_frame(25);
        view.begin_transition(dvec2(0.0, 0.0), 1.0, 25, 100).unwrap();

        // restart picks up where the eye was, not the abandoned target
        assert!((view.origin().center - dvec2(2.5, 0.0)).length() < 1e-12);
        assert_eq!(view.transition_window(), (25, 125));
        assert!((view.current_center() - dvec2(2.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut view = ViewState::default();
        view.begin_frame(77);
        view.begin_transition(dvec2(-1.0, 0.5), 4.0, 77, 0).unwrap();

        let (start, end) = view.transition_window();
        assert_eq!(start, end);
        assert_eq!(view.current_center(), dvec2(-1.0, 0.5));
        assert_eq!(view.current_scale(), 4.0);
    }

    #[test]
    fn invalid_targets_leave_state_alone() {
        let mut view = ViewState::default();
        let before = view.clone();

        assert!(view.begin_transition(DVec2::ZERO, 0.0, 0, 10).is_err());
        assert!(view.begin_transition(DVec2::ZERO, -2.0, 0, 10).is_err());
        assert!(view.begin_transition(DVec2::ZERO, f64::NAN, 0, 10).is_err());
        assert!(view.begin_transition(dvec2(f64::INFINITY, 0.0), 1.0, 0, 10).is_err());
        assert_eq!(view, before);
    }
}
