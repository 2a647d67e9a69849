use glam::DVec2;

/// Linearly interpolates from `last` to `next` across the tick window `[last_tick, next_tick]`
///
/// A zero-width window means the transition is settled (or was an instant snap) & yields `next`.
/// Progress is clamped, so reads before the window give `last` & reads after it give `next`
pub fn value_at(last: f64, next: f64, last_tick: u64, next_tick: u64, now: u64) -> f64 {
    if next_tick <= last_tick {
        return next;
    }

    let progress = (now as f64 - last_tick as f64) / (next_tick - last_tick) as f64;
    if progress <= 0.0 {
        last
    } else if progress >= 1.0 {
        next
    } else {
        last + (next - last) * progress
    }
}

/// [`value_at`] applied to both components of a point
pub fn point_at(last: DVec2, next: DVec2, last_tick: u64, next_tick: u64, now: u64) -> DVec2 {
    DVec2::new(
        value_at(last.x, next.x, last_tick, next_tick, now),
        value_at(last.y, next.y, last_tick, next_tick, now),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_window_returns_target() {
        for now in [0, 5, 10, 1_000_000] {
            assert_eq!(value_at(3.0, 7.5, 10, 10, now), 7.5);
        }
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(value_at(1.0, 2.0, 100, 200, 50), 1.0);
        assert_eq!(value_at(1.0, 2.0, 100, 200, 100), 1.0);
        assert_eq!(value_at(1.0, 2.0, 100, 200, 200), 2.0);
        assert_eq!(value_at(1.0, 2.0, 100, 200, 9_999), 2.0);
    }

    #[test]
    fn midpoint_is_linear() {
        assert!((value_at(0.0, 10.0, 0, 100, 25) - 2.5).abs() < 1e-12);
        assert!((value_at(-4.0, 4.0, 1000, 1125, 1050) - -0.8).abs() < 1e-12);
    }

    #[test]
    fn inverted_window_does_not_divide_by_zero() {
        let v = value_at(1.0, 2.0, 200, 100, 150);
        assert_eq!(v, 2.0);
    }

    #[test]
    fn point_interpolates_both_axes() {
        let p = point_at(DVec2::ZERO, DVec2::new(2.0, -4.0), 0, 10, 5);
        assert!((p - DVec2::new(1.0, -2.0)).length() < 1e-12);
    }
}
