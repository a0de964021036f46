//! Which texture set a field draws its particles from.
//!
//! Texture swaps happen in two steps. A regime change only *requests* a
//! variant; the next field update reassigns textures on every visible
//! particle at once and settles. Until any set is installed the field is
//! `Idle` and draws nothing.

use crate::textures::TextureSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named texture set for a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureVariant {
    #[default]
    Default,
    /// Light smoke for weak eruptions.
    White,
    Ash,
}

impl TextureVariant {
    pub const ALL: [TextureVariant; 3] = [Self::Default, Self::White, Self::Ash];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::White => "white",
            Self::Ash => "ash",
        }
    }
}

/// Texture selection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSetState {
    /// No textures installed yet.
    Idle,
    /// A new variant was requested; applied on the next update.
    Transitioning { to: TextureVariant },
    Steady(TextureVariant),
}

/// Installed texture sets plus the selection state machine.
#[derive(Clone, Debug)]
pub struct TextureSlots {
    sets: HashMap<TextureVariant, TextureSet>,
    state: TextureSetState,
    /// Last requested variant, kept even while no textures are installed.
    wanted: TextureVariant,
}

impl TextureSlots {
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
            state: TextureSetState::Idle,
            wanted: TextureVariant::Default,
        }
    }

    pub fn state(&self) -> TextureSetState {
        self.state
    }

    pub fn wanted(&self) -> TextureVariant {
        self.wanted
    }

    /// Install (or replace) the textures for `variant`. Empty sets are ignored.
    pub fn install(&mut self, variant: TextureVariant, set: TextureSet) {
        if set.is_empty() {
            log::warn!("ignoring empty '{}' texture set", variant.name());
            return;
        }
        self.sets.insert(variant, set);
        let wanted = self.wanted;
        self.request(wanted);
    }

    /// Ask for a different variant. No-op while already steady on it.
    pub fn request(&mut self, variant: TextureVariant) {
        self.wanted = variant;
        if self.sets.is_empty() {
            return;
        }
        if self.state != TextureSetState::Steady(variant) {
            self.state = TextureSetState::Transitioning { to: variant };
        }
    }

    /// Set to draw from for `variant`, falling back to the default set and
    /// then to the first installed set in [`TextureVariant::ALL`] order.
    pub fn resolve(&self, variant: TextureVariant) -> Option<&TextureSet> {
        self.sets
            .get(&variant)
            .or_else(|| self.sets.get(&TextureVariant::Default))
            .or_else(|| TextureVariant::ALL.iter().find_map(|v| self.sets.get(v)))
    }

    /// Set for the current state. `None` while idle.
    pub fn current(&self) -> Option<&TextureSet> {
        match self.state {
            TextureSetState::Idle => None,
            TextureSetState::Transitioning { to } | TextureSetState::Steady(to) => self.resolve(to),
        }
    }

    /// If a transition is pending, settle it and return the new set.
    pub fn take_transition(&mut self) -> Option<&TextureSet> {
        let TextureSetState::Transitioning { to } = self.state else {
            return None;
        };
        self.state = TextureSetState::Steady(to);
        self.resolve(to)
    }
}

impl Default for TextureSlots {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::TextureRef;

    fn set(ids: &[u32]) -> TextureSet {
        TextureSet::new(ids.iter().map(|&i| TextureRef(i)).collect())
    }

    #[test]
    fn test_idle_until_installed() {
        let mut slots = TextureSlots::new();
        slots.request(TextureVariant::White);
        assert_eq!(slots.state(), TextureSetState::Idle);
        assert!(slots.current().is_none());
        assert!(slots.take_transition().is_none());
    }

    #[test]
    fn test_transition_then_steady() {
        let mut slots = TextureSlots::new();
        slots.install(TextureVariant::Default, set(&[0, 1]));
        slots.install(TextureVariant::White, set(&[2]));
        assert_eq!(
            slots.state(),
            TextureSetState::Transitioning { to: TextureVariant::Default }
        );
        slots.take_transition();
        assert_eq!(slots.state(), TextureSetState::Steady(TextureVariant::Default));

        slots.request(TextureVariant::White);
        let next = slots.take_transition().unwrap();
        assert_eq!(next.refs(), &[TextureRef(2)]);
        assert_eq!(slots.state(), TextureSetState::Steady(TextureVariant::White));

        // Same variant again does not retrigger
        slots.request(TextureVariant::White);
        assert!(slots.take_transition().is_none());
    }

    #[test]
    fn test_missing_variant_falls_back() {
        let mut slots = TextureSlots::new();
        slots.install(TextureVariant::Default, set(&[7]));
        slots.request(TextureVariant::Ash);
        let fallback = slots.take_transition().unwrap();
        assert_eq!(fallback.refs(), &[TextureRef(7)]);
    }

    #[test]
    fn test_fallback_without_default_follows_variant_order() {
        let mut slots = TextureSlots::new();
        slots.install(TextureVariant::Ash, set(&[9]));
        slots.install(TextureVariant::White, set(&[4]));
        // Neither Default nor the wanted variant: White comes first in ALL
        assert_eq!(slots.resolve(TextureVariant::Default).unwrap().refs(), &[TextureRef(4)]);
        assert_eq!(slots.resolve(TextureVariant::Ash).unwrap().refs(), &[TextureRef(9)]);
    }

    #[test]
    fn test_empty_set_ignored() {
        let mut slots = TextureSlots::new();
        slots.install(TextureVariant::Default, set(&[]));
        assert_eq!(slots.state(), TextureSetState::Idle);
    }
}
