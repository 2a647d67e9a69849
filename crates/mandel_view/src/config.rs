use glam::DVec2;

use crate::error::ViewError;

/// Tunables for how input maps onto camera motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Fraction of the current scale gained per wheel line
    pub scroll_coef: f64,
    /// Length of a zoom animation, in ticks
    pub transition_ticks: u64,
    /// Length of the animation back to the home view, in ticks
    pub reset_ticks: u64,
    pub home_center: DVec2,
    pub home_scale: f64,
    /// Smallest scale a zoom may reach
    pub min_scale: f64,
    /// Largest scale a zoom may reach
    ///
    /// The shader works in `f32`, so detail stops resolving a little past `1e4`
    pub max_scale: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scroll_coef: 0.25,
            transition_ticks: 125,
            reset_ticks: 125,
            home_center: DVec2::ZERO,
            home_scale: 1.0,
            min_scale: 1e-3,
            max_scale: 1e4,
        }
    }
}

impl ViewConfig {
    /// Checks the tunables can only ever produce a finite, positive camera
    pub fn validate(&self) -> Result<(), ViewError> {
        if !self.scroll_coef.is_finite() {
            return Err(ViewError::InvalidConfig("scroll_coef must be finite"));
        }
        if !self.home_center.is_finite() {
            return Err(ViewError::InvalidConfig("home_center must be finite"));
        }
        if !self.home_scale.is_finite() || self.home_scale <= 0.0 {
            return Err(ViewError::InvalidConfig("home_scale must be finite & positive"));
        }
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(ViewError::InvalidConfig("min_scale must be finite & positive"));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(ViewError::InvalidConfig("max_scale must be finite & >= min_scale"));
        }
        Ok(())
    }

    /// Clamps a zoom target into `[min_scale, max_scale]`
    ///
    /// Never panics, even on limits [`validate`](Self::validate) would refuse
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn default_is_valid() {
        assert_eq!(ViewConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_unusable_limits() {
        let bad = [
            ViewConfig {
                min_scale: 5.0,
                max_scale: 2.0,
                ..Default::default()
            },
            ViewConfig {
                min_scale: f64::NAN,
                ..Default::default()
            },
            ViewConfig {
                max_scale: f64::INFINITY,
                ..Default::default()
            },
            ViewConfig {
                min_scale: 0.0,
                ..Default::default()
            },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(ViewError::InvalidConfig(_))),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn rejects_unusable_home() {
        for home_scale in [0.0, -1.0, f64::NAN] {
            let cfg = ViewConfig {
                home_scale,
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "home_scale {home_scale}");
        }
        let cfg = ViewConfig {
            home_center: dvec2(f64::NAN, 0.0),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn clamp_with_inverted_limits_does_not_panic() {
        let cfg = ViewConfig {
            min_scale: 5.0,
            max_scale: 2.0,
            ..Default::default()
        };
        assert_eq!(cfg.clamp_scale(1.25), 2.0);

        let cfg = ViewConfig {
            min_scale: f64::NAN,
            max_scale: f64::NAN,
            ..Default::default()
        };
        assert_eq!(cfg.clamp_scale(3.0), 3.0);
    }
}
