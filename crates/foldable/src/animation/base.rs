use std::f64::consts::PI;
use std::time::{Duration, Instant};

use config::Curve;

#[derive(Debug, Clone)]
pub(crate) struct Animation {
    pub start_time: Instant,
    pub animation_costs: Duration,

    get_y: fn(f64) -> f64,
    cache_x: f64,
    cache_y: f64,
}
impl Animation {
    pub(crate) fn new(start_time: Instant, time_cost: Duration, curve: Curve) -> Self {
        fn linear(x: f64) -> f64 {
            x
        }
        fn quad_y(x: f64) -> f64 {
            x * (2.0 - x)
        }
        fn cubic_y(x: f64) -> f64 {
            let x_minus_one = x - 1.0;
            1.0 + x_minus_one * x_minus_one * x_minus_one
        }
        fn expo_y(x: f64) -> f64 {
            1. - 2f64.powf(-10. * x)
        }
        fn ease_in_out_y(x: f64) -> f64 {
            ((x + 1.) * PI).cos() / 2. + 0.5
        }

        let get_y: fn(f64) -> f64 = match curve {
            Curve::Linear => linear,
            Curve::EaseQuad => quad_y,
            Curve::EaseCubic => cubic_y,
            Curve::EaseExpo => expo_y,
            Curve::EaseInOut => ease_in_out_y,
        };

        Self {
            start_time,
            animation_costs: time_cost,
            get_y,
            cache_x: 0.,
            cache_y: 0.,
        }
    }

    pub(crate) fn refresh(&mut self, now: Instant) {
        let max_time = self.animation_costs.as_secs_f64();
        let passed = now.saturating_duration_since(self.start_time).as_secs_f64();
        let x = if max_time > 0. { passed / max_time } else { 1. };
        (self.cache_x, self.cache_y) = if x >= 1. {
            (1., 1.)
        } else if x <= 0. {
            (0., 0.)
        } else {
            (x, (self.get_y)(x).clamp(0., 1.))
        };
    }

    /// elapsed time fraction, before the curve
    pub(crate) fn raw_progress(&self) -> f64 {
        self.cache_x
    }

    pub(crate) fn progress(&self) -> f64 {
        self.cache_y
    }
}
