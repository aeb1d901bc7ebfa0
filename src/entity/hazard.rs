//! Short-lived hazards (bombs) that resolve at the end of their fuse.
//!
//! Whether an expiring hazard damages the player or pays out a score reward
//! is decided by the collision resolver from the player's position at the
//! instant of expiry, not from proximity over the hazard's lifetime.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Hazard {
    fuse: Duration,
    elapsed: Duration,
}

impl Hazard {
    pub fn new(fuse: Duration) -> Self {
        Self {
            fuse,
            elapsed: Duration::ZERO,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.fuse
    }

    pub fn remaining(&self) -> Duration {
        self.fuse.saturating_sub(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_fuse() {
        let mut hazard = Hazard::new(Duration::from_secs(2));
        hazard.tick(Duration::from_millis(1999));
        assert!(!hazard.is_expired());
        hazard.tick(Duration::from_millis(1));
        assert!(hazard.is_expired());
        assert_eq!(hazard.remaining(), Duration::ZERO);
    }
}
