//! Attachment springs
//!
//! A damped harmonic oscillator that pulls an item's live center back to its
//! static anchor. Each step uses the closed-form solution for the current
//! damping regime, so the result does not drift with the frame rate:
//!
//! - damping ratio below 1: under-damped, overshoots and rings
//! - damping ratio of 1: critically damped
//! - damping ratio above 1: over-damped, creeps back without overshoot
//!
//! Once the offset along the scroll axis collapses to the settle threshold the
//! spring switches to a very high damping ratio so residual motion dies out
//! immediately instead of ringing.

use serde::{Deserialize, Serialize};
use springy_core::{Point, Vec2};

const TWO_PI: f32 = std::f32::consts::PI * 2.0;

/// Damping ratios this close to 1.0 use the critically damped solution.
const CRITICAL_EPSILON: f32 = 1e-4;

/// Spring configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Oscillation frequency in Hz
    pub frequency: f32,
    /// Damping ratio (1.0 = critical)
    pub damping: f32,
    /// Largest offset from the anchor still treated as settled
    pub settle_threshold: f32,
    /// Damping ratio forced while settled
    pub settled_damping: f32,
}

impl SpringConfig {
    pub const DEFAULT_FREQUENCY: f32 = 1.0;
    pub const DEFAULT_DAMPING: f32 = 0.6;
    pub const DEFAULT_SETTLE_THRESHOLD: f32 = 1.0;
    pub const DEFAULT_SETTLED_DAMPING: f32 = 100.0;

    pub fn new(frequency: f32, damping: f32) -> Self {
        Self {
            frequency,
            damping,
            ..Default::default()
        }
    }

    /// Loose, wobbly items (the default feel)
    pub fn springy() -> Self {
        Self::default()
    }

    /// Quick return with little overshoot
    pub fn stiff() -> Self {
        Self::new(3.0, 0.8)
    }

    /// Slow, pronounced wobble
    pub fn gentle() -> Self {
        Self::new(0.6, 0.4)
    }

    /// No overshoot at all
    pub fn critical(frequency: f32) -> Self {
        Self::new(frequency, 1.0)
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_settle_threshold(mut self, threshold: f32) -> Self {
        self.settle_threshold = threshold;
        self
    }

    pub fn with_settled_damping(mut self, damping: f32) -> Self {
        self.settled_damping = damping;
        self
    }

    /// Angular frequency in radians per second
    pub fn angular_frequency(&self) -> f32 {
        TWO_PI * self.frequency
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            frequency: Self::DEFAULT_FREQUENCY,
            damping: Self::DEFAULT_DAMPING,
            settle_threshold: Self::DEFAULT_SETTLE_THRESHOLD,
            settled_damping: Self::DEFAULT_SETTLED_DAMPING,
        }
    }
}

/// A spring attaching an item's live center to a fixed anchor point
#[derive(Debug, Clone)]
pub struct AttachmentSpring {
    anchor: Point,
    center: Point,
    velocity: Vec2,
    config: SpringConfig,
    /// Damping ratio in effect for the next step
    damping: f32,
    settled: bool,
}

impl AttachmentSpring {
    /// Create a spring at rest on its anchor
    pub fn new(anchor: Point, config: SpringConfig) -> Self {
        Self {
            anchor,
            center: anchor,
            velocity: Vec2::ZERO,
            config,
            damping: config.damping,
            settled: false,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Damping ratio currently in effect
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Offset of the live center from the anchor
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.center.x - self.anchor.x, self.center.y - self.anchor.y)
    }

    /// Whether the last step left the spring within the settle threshold.
    /// A settled spring rests exactly on its anchor until nudged again.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Move the live center along the scroll axis without touching velocity
    pub fn nudge(&mut self, dy: f32) {
        self.center.y += dy;
    }

    /// Drop all motion and put the center back on the anchor
    pub fn snap_to_anchor(&mut self) {
        self.center = self.anchor;
        self.velocity = Vec2::ZERO;
        self.damping = self.config.damping;
        self.settled = false;
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let omega = self.config.angular_frequency();
        let offset = self.offset();
        let (x, vx) = oscillate(offset.x, self.velocity.x, omega, self.damping, dt);
        let (y, vy) = oscillate(offset.y, self.velocity.y, omega, self.damping, dt);

        self.center = Point::new(self.anchor.x + x, self.anchor.y + y);
        self.velocity = Vec2::new(vx, vy);

        let settled = y.abs() <= self.config.settle_threshold;
        if settled != self.settled {
            tracing::trace!(
                "spring at ({:.1}, {:.1}) {} with offset {:.3}",
                self.anchor.x,
                self.anchor.y,
                if settled { "settled" } else { "woke" },
                y
            );
        }
        if settled {
            self.center = self.anchor;
            self.velocity = Vec2::ZERO;
        }
        self.settled = settled;
        self.damping = if settled {
            self.config.settled_damping
        } else {
            self.config.damping
        };
    }
}

/// One closed-form step of a unit-mass damped oscillator around zero.
///
/// Returns the new `(offset, velocity)`.
fn oscillate(x0: f32, v0: f32, omega: f32, zeta: f32, dt: f32) -> (f32, f32) {
    if x0 == 0.0 && v0 == 0.0 {
        return (0.0, 0.0);
    }

    if (zeta - 1.0).abs() < CRITICAL_EPSILON {
        let decay = (-omega * dt).exp();
        let c = v0 + x0 * omega;
        let x = (x0 + c * dt) * decay;
        let v = (v0 - c * omega * dt) * decay;
        (x, v)
    } else if zeta < 1.0 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * dt).exp();
        let (sin, cos) = (wd * dt).sin_cos();

        let a = x0;
        let b = (v0 + zeta * omega * x0) / wd;

        let x = (a * cos + b * sin) * decay;
        let v = ((b * wd - a * zeta * omega) * cos - (a * wd + b * zeta * omega) * sin) * decay;
        (x, v)
    } else {
        let s = (zeta * zeta - 1.0).sqrt();
        // r1 * r2 == omega^2, so the slow root is computed without cancellation
        let r2 = -omega * (zeta + s);
        let r1 = omega * omega / r2;

        let c1 = (x0 * r2 - v0) / (r2 - r1);
        let c2 = (v0 - x0 * r1) / (r2 - r1);
        let e1 = (r1 * dt).exp();
        let e2 = (r2 * dt).exp();

        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn displaced(dy: f32, config: SpringConfig) -> AttachmentSpring {
        let mut spring = AttachmentSpring::new(Point::new(22.0, 400.0), config);
        spring.nudge(dy);
        spring
    }

    #[test]
    fn test_new_spring_rests_on_anchor() {
        let spring = AttachmentSpring::new(Point::new(10.0, 20.0), SpringConfig::default());
        assert_eq!(spring.center(), spring.anchor());
        assert_eq!(spring.velocity(), Vec2::ZERO);
        assert_eq!(spring.damping(), 0.6);
        assert_eq!(spring.config().frequency, 1.0);
    }

    #[test]
    fn test_nudge_moves_center_only_vertically() {
        let mut spring = AttachmentSpring::new(Point::new(10.0, 20.0), SpringConfig::default());
        spring.nudge(5.0);
        assert_eq!(spring.center(), Point::new(10.0, 25.0));
        assert_eq!(spring.offset(), Vec2::new(0.0, 5.0));
        assert_eq!(spring.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut spring = displaced(30.0, SpringConfig::default());
        let before = spring.center();
        spring.update(0.0);
        spring.update(-1.0);
        assert_eq!(spring.center(), before);
        assert!(!spring.is_settled());
    }

    #[test]
    fn test_underdamped_overshoots_anchor() {
        // A zero threshold keeps the settle snap from swallowing the swing
        let mut spring = displaced(50.0, SpringConfig::default().with_settle_threshold(0.0));
        let mut crossed = false;
        for _ in 0..120 {
            spring.update(FRAME);
            if spring.offset().y < -1.0 {
                crossed = true;
                break;
            }
        }
        assert!(crossed, "under-damped spring should swing past its anchor");
    }

    #[test]
    fn test_critical_never_overshoots() {
        let mut spring = displaced(50.0, SpringConfig::critical(2.0));
        for _ in 0..600 {
            spring.update(FRAME);
            assert!(spring.offset().y >= -1e-3, "overshoot: {}", spring.offset().y);
        }
        assert!(spring.offset().y.abs() < 1.0);
    }

    #[test]
    fn test_overdamped_is_slower_than_critical() {
        let mut critical = displaced(50.0, SpringConfig::critical(1.0));
        let mut over = displaced(50.0, SpringConfig::new(1.0, 3.0));
        for _ in 0..30 {
            critical.update(FRAME);
            over.update(FRAME);
        }
        assert!(critical.offset().y.abs() < over.offset().y.abs());
        assert!(over.offset().y > 0.0);
    }

    #[test]
    fn test_settle_forces_high_damping() {
        let mut spring = displaced(0.5, SpringConfig::default());
        spring.update(FRAME);
        assert!(spring.is_settled());
        assert_eq!(spring.damping(), SpringConfig::DEFAULT_SETTLED_DAMPING);
    }

    #[test]
    fn test_settling_snaps_to_anchor() {
        let mut spring = displaced(0.8, SpringConfig::default());
        spring.update(FRAME);
        assert!(spring.is_settled());
        assert_eq!(spring.center(), spring.anchor());
        assert_eq!(spring.velocity(), Vec2::ZERO);

        for _ in 0..600 {
            spring.update(FRAME);
            assert_eq!(spring.center(), spring.anchor());
        }
    }

    #[test]
    fn test_damping_reverts_when_displaced_again() {
        let mut spring = displaced(0.5, SpringConfig::default());
        spring.update(FRAME);
        assert!(spring.is_settled());

        spring.nudge(40.0);
        spring.update(FRAME);
        assert!(!spring.is_settled());
        assert_eq!(spring.damping(), SpringConfig::DEFAULT_DAMPING);
    }

    #[test]
    fn test_snap_to_anchor_resets_motion() {
        let mut spring = displaced(25.0, SpringConfig::default());
        spring.update(FRAME);
        spring.snap_to_anchor();
        assert_eq!(spring.center(), spring.anchor());
        assert_eq!(spring.velocity(), Vec2::ZERO);
        assert_eq!(spring.damping(), 0.6);
    }

    #[test]
    fn test_config_builders() {
        let config = SpringConfig::stiff()
            .with_damping(0.9)
            .with_settle_threshold(0.5)
            .with_settled_damping(50.0);
        assert_eq!(config.frequency, 3.0);
        assert_eq!(config.damping, 0.9);
        assert_eq!(config.settle_threshold, 0.5);
        assert_eq!(config.settled_damping, 50.0);
        assert!((config.angular_frequency() - 6.0 * std::f32::consts::PI).abs() < 1e-5);
    }
}
