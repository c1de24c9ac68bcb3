//! Declaration modifier flags.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Modifier bit set attached to declarations and members.
///
/// The bit layout matches the host toolchain's long-valued flags word, so a
/// value read from a symbol can be written back to a tree unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers(u64);

impl Modifiers {
    pub const PUBLIC: Modifiers = Modifiers(1);
    pub const PRIVATE: Modifiers = Modifiers(1 << 1);
    pub const PROTECTED: Modifiers = Modifiers(1 << 2);
    pub const STATIC: Modifiers = Modifiers(1 << 3);
    pub const FINAL: Modifiers = Modifiers(1 << 4);
    pub const ABSTRACT: Modifiers = Modifiers(1 << 10);

    /// Empty flag set.
    pub const fn empty() -> Self {
        Modifiers(0)
    }

    /// Raw flags word as the host stores it.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reconstruct a flag set from a raw host flags word.
    pub const fn from_bits(bits: u64) -> Self {
        Modifiers(bits)
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of the two sets.
    pub const fn union(self, other: Modifiers) -> Self {
        Modifiers(self.0 | other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        self.union(rhs)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_keeps_existing_bits() {
        let mut mods = Modifiers::PRIVATE | Modifiers::FINAL;
        mods |= Modifiers::STATIC;

        assert!(mods.contains(Modifiers::PRIVATE));
        assert!(mods.contains(Modifiers::FINAL));
        assert!(mods.contains(Modifiers::STATIC));
        assert!(!mods.contains(Modifiers::PUBLIC));
    }

    #[test]
    fn test_round_trips_raw_bits() {
        let mods = Modifiers::PUBLIC | Modifiers::ABSTRACT;
        assert_eq!(Modifiers::from_bits(mods.bits()), mods);
    }
}
