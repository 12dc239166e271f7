/// Converts variable frame times into the `dt_scale` passed to
/// `Simulation::advance_tick`.
///
/// The simulation is frame-driven: `dt_scale == 1.0` is one nominal frame.
/// Long frames (a backgrounded tab, a debugger pause) are capped so a single
/// step cannot throw bodies across the world.
pub struct FrameClock {
    /// Duration of one nominal frame in seconds.
    reference_dt: f64,
    /// Upper bound for the returned scale.
    max_scale: f64,
}

impl FrameClock {
    pub const REFERENCE_DT: f64 = 1.0 / 60.0;

    pub fn new(max_scale: f64) -> Self {
        Self {
            reference_dt: Self::REFERENCE_DT,
            max_scale,
        }
    }

    /// Scale for a frame that took `frame_dt` seconds. A missing or invalid
    /// delta (zero, negative, NaN) counts as one nominal frame.
    pub fn scale_for(&self, frame_dt: f64) -> f64 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            (frame_dt / self.reference_dt).min(self.max_scale)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_nominal_frame() {
        let clock = FrameClock::new(3.0);
        let scale = clock.scale_for(1.0 / 60.0);
        assert!((scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn half_frame_scales_down() {
        let clock = FrameClock::new(3.0);
        let scale = clock.scale_for(1.0 / 120.0);
        assert!((scale - 0.5).abs() < 1e-12);
    }

    #[test]
    fn caps_long_frames() {
        let clock = FrameClock::new(3.0);
        assert_eq!(clock.scale_for(1.0), 3.0);
    }

    #[test]
    fn invalid_delta_is_one_frame() {
        let clock = FrameClock::new(3.0);
        assert_eq!(clock.scale_for(0.0), 1.0);
        assert_eq!(clock.scale_for(f64::NAN), 1.0);
        assert_eq!(clock.scale_for(-0.5), 1.0);
    }
}
