//! Component presence bitsets.
//!
//! Every known component kind owns one bit. The table is closed and its
//! indices are stable: 0 = Transform, 1 = Species, 2 = Health, 3 = Energy,
//! 4 = Reproductive, 5 = Behavior. The bitset holds [`MAX_COMPONENTS`] bits so
//! new kinds can be appended without changing the type.

use std::fmt;
use std::ops::{BitAnd, BitOr};

pub const MAX_COMPONENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Transform = 0,
    Species = 1,
    Health = 2,
    Energy = 3,
    Reproductive = 4,
    Behavior = 5,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Transform,
        ComponentKind::Species,
        ComponentKind::Health,
        ComponentKind::Energy,
        ComponentKind::Reproductive,
        ComponentKind::Behavior,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which component kinds an entity currently carries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(u64);

impl Signature {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub fn of(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::EMPTY, |sig, &k| sig.with(k))
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | (1 << kind.index()))
    }

    #[inline]
    pub fn set(&mut self, kind: ComponentKind, present: bool) {
        let mask = 1u64 << kind.index();
        if present {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    #[inline]
    #[must_use]
    pub const fn test(self, kind: ComponentKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `required` is also set here.
    #[inline]
    #[must_use]
    pub const fn contains(self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    #[must_use]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL.into_iter().filter(move |&k| self.test(k))
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<ComponentKind> for Signature {
    fn from(kind: ComponentKind) -> Self {
        Self::EMPTY.with(kind)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}
