//! Countdown timer gating a repeatable action.

/// A countdown in seconds. The gated action is allowed once it reaches zero.
///
/// Used for fire rate, invulnerability windows and the like. Remaining time
/// is clamped at zero, so a long frame never banks more than one trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// A cooldown that is already elapsed.
    pub fn ready() -> Self {
        Self::default()
    }

    /// A cooldown that has just been started with `duration` seconds.
    pub fn started(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    pub fn tick(&mut self, delta: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - delta).max(0.0);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Restart the countdown.
    pub fn trigger(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Restart the countdown if it has elapsed. Returns whether it did.
    pub fn try_trigger(&mut self, duration: f32) -> bool {
        if self.is_ready() {
            self.trigger(duration);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_cooldown_allows_action() {
        let cooldown = Cooldown::ready();
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining(), 0.0);
    }

    #[test]
    fn trigger_blocks_until_elapsed() {
        let mut cooldown = Cooldown::ready();
        assert!(cooldown.try_trigger(1.0));
        assert!(!cooldown.is_ready());
        assert!(!cooldown.try_trigger(1.0));

        cooldown.tick(0.5);
        assert!(!cooldown.is_ready());

        cooldown.tick(0.5);
        assert!(cooldown.is_ready());
        assert!(cooldown.try_trigger(1.0));
    }

    #[test]
    fn long_tick_never_goes_negative() {
        let mut cooldown = Cooldown::started(0.25);
        cooldown.tick(10.0);
        assert_eq!(cooldown.remaining(), 0.0);

        // Only one trigger is available no matter how much time passed
        assert!(cooldown.try_trigger(0.25));
        assert!(!cooldown.try_trigger(0.25));
    }

    #[test]
    fn ticking_an_elapsed_cooldown_is_a_no_op() {
        let mut cooldown = Cooldown::ready();
        cooldown.tick(0.1);
        assert_eq!(cooldown, Cooldown::ready());
    }
}
