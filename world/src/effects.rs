//! Owned queue of expiring cosmetic effects.
//!
//! Transient visuals (muzzle flashes, explosion rings, damage tints) live
//! here instead of in ad-hoc timers so that restart tears them down
//! deterministically and renderers can draw them from a plain list. Nothing
//! in this module touches gameplay state.

use std::time::Duration;

use garden_defence_core::{EffectKind, Position};

/// One cosmetic effect currently visible to renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveEffect {
    /// Category of the effect.
    pub kind: EffectKind,
    /// World position of the effect.
    pub at: Position,
    /// Time left before the effect disappears.
    pub remaining: Duration,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EffectQueue {
    active: Vec<ActiveEffect>,
}

impl EffectQueue {
    pub(crate) fn push(&mut self, kind: EffectKind, at: Position) {
        self.active.push(ActiveEffect {
            kind,
            at,
            remaining: lifetime(kind),
        });
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        for effect in &mut self.active {
            effect.remaining = effect.remaining.saturating_sub(dt);
        }
        self.active.retain(|effect| !effect.remaining.is_zero());
    }

    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }

    pub(crate) fn active(&self) -> &[ActiveEffect] {
        &self.active
    }
}

fn lifetime(kind: EffectKind) -> Duration {
    match kind {
        EffectKind::MuzzleFlash | EffectKind::DamageFlash => Duration::from_millis(100),
        EffectKind::SunSparkle => Duration::from_millis(500),
        EffectKind::Explosion => Duration::from_secs(1),
        EffectKind::Empowerment => Duration::from_secs(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_expire_after_their_lifetime() {
        let mut queue = EffectQueue::default();
        queue.push(EffectKind::MuzzleFlash, Position::new(1.0, 1.0));
        queue.push(EffectKind::Explosion, Position::new(2.0, 2.0));

        queue.advance(Duration::from_millis(150));
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.active()[0].kind, EffectKind::Explosion);

        queue.advance(Duration::from_secs(1));
        assert!(queue.active().is_empty());
    }

    #[test]
    fn clear_drops_pending_effects() {
        let mut queue = EffectQueue::default();
        queue.push(EffectKind::Empowerment, Position::new(0.0, 0.0));
        queue.clear();
        assert!(queue.active().is_empty());
    }
}
