use crate::angle;
use std::time::Duration;

/// Eased rotation between two angles, taking the short way round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    delta: f64,
    duration: Duration,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            delta: angle::signed_delta(from, to),
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn sample(&self, elapsed: Duration) -> f64 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + self.delta * ease_out(t)
    }
}

pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(300);

    #[test]
    fn test_endpoints() {
        let tw = Tween::new(0.0, 60.0, D);
        assert_eq!(tw.sample(Duration::ZERO), 0.0);
        assert_eq!(tw.sample(D), 60.0);
        assert_eq!(tw.sample(D * 2), 60.0);
        assert!(tw.is_finished(D));
    }

    #[test]
    fn test_ease_out_front_loads_motion() {
        let tw = Tween::new(0.0, 90.0, D);
        let half = tw.sample(D / 2);
        assert!(half > 45.0 && half < 90.0, "{half}");
    }

    #[test]
    fn test_wraps_the_short_way() {
        // 330 -> 0 should pass through 345, not 165
        let tw = Tween::new(330.0, 0.0, D);
        let mid = angle::normalize(tw.sample(D / 2));
        assert!(mid > 330.0 || mid < 1e-9, "{mid}");
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tw = Tween::new(10.0, 40.0, Duration::ZERO);
        assert_eq!(tw.sample(Duration::ZERO), 40.0);
    }
}
