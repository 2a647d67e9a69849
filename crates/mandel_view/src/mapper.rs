//! Pixel ↔ plane math
//!
//! Pixels are first normalized against the shorter window side so the math is
//! resolution independent: the window midpoint maps to `(0, 0)`, the shorter
//! side spans `[-1, 1]` & y grows upward.
//!
//! The plane point shown at normalized coordinate `ss` is
//! `(ss + center) / scale`, so a larger scale magnifies the view.

use glam::{DVec2, dvec2};

use crate::error::ViewError;

/// Lower bound of a single multiplicative zoom step
///
/// Keeps a large negative wheel delta from flipping or zeroing the scale
pub const MIN_ZOOM_FACTOR: f64 = 0.05;

/// Drawable size of the output surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Length of the shorter side, or an error if either side is zero
    pub fn min_dim(&self) -> Result<f64, ViewError> {
        match self.width.min(self.height) {
            0 => Err(ViewError::DegenerateWindow {
                width: self.width,
                height: self.height,
            }),
            m => Ok(m as f64),
        }
    }

    /// Maps a pixel position onto normalized screen coordinates
    pub fn normalize(&self, x: f64, y: f64) -> Result<DVec2, ViewError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ViewError::NonFiniteInput);
        }
        let m = self.min_dim()?;
        let (w, h) = (self.width as f64, self.height as f64);
        Ok(dvec2((2.0 * x - w) / m, (h - 2.0 * y) / m))
    }

    /// Inverse of [`normalize`](Self::normalize)
    pub fn denormalize(&self, ss: DVec2) -> Result<DVec2, ViewError> {
        let m = self.min_dim()?;
        let (w, h) = (self.width as f64, self.height as f64);
        Ok(dvec2((ss.x * m + w) / 2.0, (h - ss.y * m) / 2.0))
    }

    /// Center offset that keeps the plane glued to the cursor for a pixel drag
    pub fn pan_offset(&self, dx: f64, dy: f64) -> Result<DVec2, ViewError> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(ViewError::NonFiniteInput);
        }
        let m = self.min_dim()?;
        Ok(dvec2(-2.0 * dx / m, 2.0 * dy / m))
    }
}

/// Multiplicative scale step for a wheel delta
pub fn zoom_factor(delta: f64, scroll_coef: f64) -> f64 {
    (1.0 + scroll_coef * delta).max(MIN_ZOOM_FACTOR)
}

/// Center that keeps the plane point under `anchor` fixed when going from `scale` to `target_scale`
///
/// Solving `(anchor + c') / s' = (anchor + c) / s` for `c'` gives
/// `c' = (s'/s - 1) * anchor + s'/s * c`
pub fn anchored_center(center: DVec2, scale: f64, target_scale: f64, anchor: DVec2) -> DVec2 {
    let ratio = target_scale / scale;
    (ratio - 1.0) * anchor + ratio * center
}

/// Plane point under a normalized screen coordinate
pub fn screen_to_world(ss: DVec2, center: DVec2, scale: f64) -> DVec2 {
    (ss + center) / scale
}

/// Normalized screen coordinate of a plane point
pub fn world_to_screen(world: DVec2, center: DVec2, scale: f64) -> DVec2 {
    world * scale - center
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn normalize_uses_shorter_side() {
        let win = WindowSize::new(800, 600);
        assert_eq!(win.normalize(400.0, 300.0), Ok(DVec2::ZERO));
        assert_eq!(win.normalize(700.0, 0.0), Ok(dvec2(1.0, 1.0)));
        assert_eq!(win.normalize(0.0, 600.0), Ok(dvec2(-800.0 / 600.0, -1.0)));
    }

    #[test]
    fn denormalize_inverts_normalize() {
        let win = WindowSize::new(1280, 720);
        let ss = win.normalize(100.0, 650.0).unwrap();
        let px = win.denormalize(ss).unwrap();
        assert!((px - dvec2(100.0, 650.0)).length() < 1e-9);
    }

    #[test]
    fn degenerate_window_is_rejected() {
        let err = ViewError::DegenerateWindow {
            width: 0,
            height: 0,
        };
        assert_eq!(WindowSize::new(0, 0).normalize(1.0, 1.0), Err(err));
        assert_eq!(WindowSize::new(0, 0).pan_offset(1.0, 1.0), Err(err));
        assert!(WindowSize::new(640, 0).min_dim().is_err());
    }

    #[test]
    fn non_finite_pixels_are_rejected() {
        let win = WindowSize::new(800, 600);
        assert_eq!(win.normalize(f64::NAN, 0.0), Err(ViewError::NonFiniteInput));
        assert_eq!(
            win.pan_offset(0.0, f64::INFINITY),
            Err(ViewError::NonFiniteInput)
        );
    }

    #[test]
    fn pan_offset_flips_y() {
        let off = WindowSize::new(800, 600).pan_offset(100.0, 30.0).unwrap();
        assert!((off.x - -1.0 / 3.0).abs() < EPS);
        assert!((off.y - 0.1).abs() < EPS);
    }

    #[test]
    fn zoom_factor_never_reaches_zero() {
        assert_eq!(zoom_factor(1.0, 0.25), 1.25);
        assert_eq!(zoom_factor(-1.0, 0.25), 0.75);
        assert_eq!(zoom_factor(-4.0, 0.25), MIN_ZOOM_FACTOR);
        assert_eq!(zoom_factor(-100.0, 0.25), MIN_ZOOM_FACTOR);
    }

    #[test]
    fn anchor_point_stays_put() {
        let (center, scale) = (dvec2(0.3, -1.2), 2.0);
        let anchor = dvec2(0.75, -0.4);
        let before = screen_to_world(anchor, center, scale);

        for target in [0.1, 1.0, 2.5, 40.0] {
            let c = anchored_center(center, scale, target, anchor);
            let after = screen_to_world(anchor, c, target);
            assert!((before - after).length() < 1e-9, "target {target}");
        }
    }

    #[test]
    fn centered_anchor_keeps_origin() {
        let c = anchored_center(DVec2::ZERO, 1.0, 1.25, DVec2::ZERO);
        assert_eq!(c, DVec2::ZERO);
    }

    #[test]
    fn world_screen_round_trip() {
        let (center, scale) = (dvec2(-0.5, 0.25), 3.0);
        let world = dvec2(-1.1, 0.2);
        let back = screen_to_world(world_to_screen(world, center, scale), center, scale);
        assert!((world - back).length() < EPS);
    }
}
