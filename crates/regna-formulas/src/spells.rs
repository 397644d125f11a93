//! Spell cost catalog.
//!
//! One immutable row per spell: the elan price, the temple count needed to
//! channel the cast safely, and how long the effect lasts. A cast with fewer
//! temples than `required_temples` still resolves but triggers backlash
//! (see [`crate::elan::backlash`]).

use regna_types::Spell;

/// The fixed cost row for one spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellCost {
    /// Elan consumed by the cast.
    pub elan: u64,
    /// Temples needed to channel the cast without backlash.
    pub required_temples: u64,
    /// Turns the effect lasts.
    pub duration_turns: u32,
}

const FERTILE_LANDS: SpellCost = SpellCost {
    elan: 30,
    required_temples: 2,
    duration_turns: 12,
};

const CLAIRVOYANCE: SpellCost = SpellCost {
    elan: 15,
    required_temples: 1,
    duration_turns: 1,
};

const ARCANE_WARD: SpellCost = SpellCost {
    elan: 45,
    required_temples: 4,
    duration_turns: 8,
};

const TEMPEST: SpellCost = SpellCost {
    elan: 60,
    required_temples: 6,
    duration_turns: 1,
};

const RIFTGATE: SpellCost = SpellCost {
    elan: 120,
    required_temples: 10,
    duration_turns: 1,
};

/// Look up the cost row for a spell.
pub const fn spell_cost(spell: Spell) -> &'static SpellCost {
    match spell {
        Spell::FertileLands => &FERTILE_LANDS,
        Spell::Clairvoyance => &CLAIRVOYANCE,
        Spell::ArcaneWard => &ARCANE_WARD,
        Spell::Tempest => &TEMPEST,
        Spell::Riftgate => &RIFTGATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_spell_has_a_positive_cost() {
        for spell in Spell::ALL {
            let cost = spell_cost(spell);
            assert!(cost.elan > 0, "{spell:?} has zero elan cost");
            assert!(cost.required_temples > 0, "{spell:?} needs no temples");
            assert!(cost.duration_turns > 0, "{spell:?} has no duration");
        }
    }

    #[test]
    fn riftgate_is_the_most_demanding() {
        let riftgate = spell_cost(Spell::Riftgate);
        for spell in Spell::ALL {
            let cost = spell_cost(spell);
            assert!(cost.elan <= riftgate.elan);
            assert!(cost.required_temples <= riftgate.required_temples);
        }
    }
}
