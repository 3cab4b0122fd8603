use crate::config::Config;
use crate::gui::wheel::WHEEL_MARGIN;
use detent::geometry::{self, Dimensions, Reveal, WheelGeometry};
use detent::{
    Bounds, DiscRotationController, Mount, MountError, RawInput, Segments, Transition, Tween,
    Update,
};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Animation {
    tween: Tween,
    started_us: Option<i64>,
}

/// One wheel: the rotation controller plus what is currently painted.
#[derive(Debug)]
pub struct WheelState {
    pub controller: DiscRotationController,
    pub segments: Segments,
    displayed: f64,
    animation: Option<Animation>,
    ticking: bool,
}

impl WheelState {
    pub fn new(config: &Config) -> Self {
        let controller = DiscRotationController::new(config.mode, config.initial_detent())
            .with_transition(config.transition());
        Self {
            displayed: controller.angle(),
            controller,
            segments: config.segments(),
            animation: None,
            ticking: false,
        }
    }

    pub fn mount(&self) -> Result<Mount, MountError> {
        self.controller.mount()
    }

    /// Angle currently painted; lags the controller while easing.
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn handle(&mut self, raw: &RawInput, bounds: Option<Bounds>) -> Update {
        let was_dragging = self.controller.is_dragging();
        let update = self.controller.handle_raw(raw, bounds);
        if !was_dragging && update.state.is_dragging && self.animation.take().is_some() {
            self.controller.rebase_drag(self.displayed);
        }
        self.present(update.transition);
        update
    }

    pub fn advance(&mut self) -> Update {
        let update = self.controller.advance();
        self.present(update.transition);
        update
    }

    pub fn reduce(&mut self) -> Update {
        let update = self.controller.reduce();
        self.present(update.transition);
        update
    }

    fn present(&mut self, transition: Transition) {
        let target = self.controller.angle();
        match transition {
            Transition::None => {}
            Transition::Instant => {
                self.animation = None;
                self.displayed = target;
            }
            Transition::Eased => {
                self.animation = Some(Animation {
                    tween: Tween::new(self.displayed, target, self.controller.transition_duration()),
                    started_us: None,
                });
            }
        }
    }

    /// Returns true if the caller should install a frame callback, i.e. none
    /// is running yet.
    pub fn claim_frame_clock(&mut self) -> bool {
        !std::mem::replace(&mut self.ticking, true)
    }

    /// Advances the running animation to frame time `now_us`. Returns whether
    /// another frame is needed.
    pub fn tick(&mut self, now_us: i64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            self.ticking = false;
            return false;
        };
        let started = *animation.started_us.get_or_insert(now_us);
        let elapsed = Duration::from_micros(now_us.saturating_sub(started).max(0) as u64);
        self.displayed = animation.tween.sample(elapsed);
        if animation.tween.is_finished(elapsed) {
            self.animation = None;
            self.ticking = false;
            return false;
        }
        true
    }

    /// Applies a reloaded config. The current rotation is kept.
    pub fn reconfigure(&mut self, config: &Config) {
        self.segments = config.segments();
        self.controller.set_mode(config.mode);
        self.controller.set_transition(config.transition());
        self.animation = None;
        self.displayed = self.controller.angle();
    }

    /// Labels the cover exposes once the current rotation settles.
    pub fn describe_visible(&self) -> String {
        geometry::visible_at(self.controller.angle())
            .filter_map(|(slot, reveal)| {
                let segment = self.segments.get(slot.index())?;
                Some(match reveal {
                    Reveal::OuterOnly => segment.outer_label.to_string(),
                    _ => format!("{}/{}", segment.outer_label, segment.inner_label),
                })
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn geometry(&self, bounds: Bounds) -> WheelGeometry {
        let radius = (bounds.width.min(bounds.height) / 2.0 - WHEEL_MARGIN).max(0.0);
        geometry::generate(
            &self.segments,
            self.displayed,
            bounds.center(),
            &Dimensions::from_radius(radius),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detent::{Point, RotationMode};

    fn bounds() -> Option<Bounds> {
        Some(Bounds::new(0.0, 0.0, 200.0, 200.0))
    }

    fn at(deg: f64) -> Point {
        let r = deg.to_radians();
        Point::new(100.0 + 50.0 * r.cos(), 100.0 + 50.0 * r.sin())
    }

    fn continuous() -> WheelState {
        WheelState::new(&Config {
            mode: RotationMode::Continuous,
            initial_position: 0,
            ..Config::default()
        })
    }

    #[test]
    fn test_drag_paints_immediately() {
        let mut wheel = continuous();
        let _mount = wheel.mount().unwrap();
        wheel.handle(&RawInput::MouseDown(at(0.0)), bounds());
        wheel.handle(&RawInput::MouseMove(at(20.0)), bounds());
        assert!(!wheel.is_animating());
        assert!((wheel.displayed() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_release_eases_to_detent() {
        let mut wheel = continuous();
        let _mount = wheel.mount().unwrap();
        wheel.handle(&RawInput::MouseDown(at(0.0)), bounds());
        wheel.handle(&RawInput::MouseMove(at(20.0)), bounds());
        wheel.handle(&RawInput::MouseUp, bounds());

        assert_eq!(wheel.controller.angle(), 30.0);
        assert!(wheel.is_animating());

        assert!(wheel.tick(1_000_000));
        assert!((wheel.displayed() - 20.0).abs() < 1e-9);
        assert!(wheel.tick(1_150_000));
        assert!(wheel.displayed() > 20.0 && wheel.displayed() < 30.0);
        assert!(!wheel.tick(1_300_000));
        assert_eq!(wheel.displayed(), 30.0);
        assert!(!wheel.is_animating());
    }

    #[test]
    fn test_drag_during_ease_starts_from_painted_angle() {
        let mut wheel = continuous();
        let _mount = wheel.mount().unwrap();
        wheel.advance();
        wheel.tick(0);
        assert_eq!(wheel.displayed(), 0.0);

        wheel.handle(&RawInput::MouseDown(at(0.0)), bounds());
        assert!(!wheel.is_animating());
        assert_eq!(wheel.controller.angle(), 0.0);
        wheel.handle(&RawInput::MouseMove(at(10.0)), bounds());
        assert!((wheel.displayed() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_frame_clock_claim() {
        let mut wheel = WheelState::new(&Config::default());
        let _mount = wheel.mount().unwrap();
        wheel.advance();
        assert!(wheel.claim_frame_clock());
        wheel.reduce();
        assert!(!wheel.claim_frame_clock());
        wheel.tick(0);
        assert!(!wheel.tick(1_000_000));
        assert!(wheel.claim_frame_clock());
    }

    #[test]
    fn test_step_animates_the_short_way() {
        let mut wheel = WheelState::new(&Config {
            initial_position: 11,
            ..Config::default()
        });
        let _mount = wheel.mount().unwrap();
        wheel.advance();
        assert_eq!(wheel.controller.position().index(), 0);
        wheel.tick(0);
        wheel.tick(150_000);
        assert!(wheel.displayed() > 330.0, "{}", wheel.displayed());
    }

    #[test]
    fn test_reconfigure_keeps_rotation() {
        let mut wheel = WheelState::new(&Config::default());
        let _mount = wheel.mount().unwrap();
        wheel.advance();
        wheel.reconfigure(&Config {
            mode: RotationMode::Free,
            ..Config::default()
        });
        assert_eq!(wheel.controller.angle(), 120.0);
        assert_eq!(wheel.displayed(), 120.0);
        assert_eq!(wheel.controller.mode(), RotationMode::Free);
    }

    #[test]
    fn test_describe_visible_uses_settled_angle() {
        let mut wheel = WheelState::new(&Config {
            initial_position: 0,
            ..Config::default()
        });
        assert_eq!(wheel.describe_visible(), "C/Am, E, Bb/Gm, F/Dm");
        let _mount = wheel.mount().unwrap();
        wheel.advance();
        // still easing, but the description already reflects the target
        assert_eq!(wheel.describe_visible(), "C/Am, G/Em, B, F/Dm");
    }

    #[test]
    fn test_geometry_fits_bounds() {
        let wheel = WheelState::new(&Config::default());
        let g = wheel.geometry(Bounds::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(g.center, Point::new(150.0, 100.0));
        assert_eq!(g.outer_ring[0].outer_radius, 100.0 - WHEEL_MARGIN);
        assert_eq!(g.cover.rotation, 90.0);
    }
}
