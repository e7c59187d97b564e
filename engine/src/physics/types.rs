//! Physics type definitions
//!
//! The glam vector type re-exported for callers, plus the opaque handles
//! and collision categories shared by every physics world implementation.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Opaque reference to a rigid body owned by a physics world.
///
/// Handles are never reused: once a body is removed its handle stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u32);

impl BodyHandle {
    /// Wrap a raw id handed out by a physics world.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id behind this handle.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque reference to a joint (constraint) owned by a physics world.
///
/// Same lifetime rules as [`BodyHandle`]: a destroyed constraint's handle is
/// never handed out again, so destroying a stale handle can be a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(u32);

impl ConstraintHandle {
    /// Wrap a raw id handed out by a physics world.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id behind this handle.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

static_assertions::assert_impl_all!(BodyHandle: Copy, Eq, std::hash::Hash, Send, Sync);
static_assertions::assert_impl_all!(ConstraintHandle: Copy, Eq, std::hash::Hash, Send, Sync);

/// Bit set of collision categories carried by a collider.
///
/// Used both as a collider's membership and as the mask of categories it
/// collides with. The `HOOKABLE` category marks surfaces a grappling hook
/// may anchor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionLayers(u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);
    /// Static level geometry.
    pub const WORLD: Self = Self(1 << 0);
    /// Surfaces the hook can anchor to.
    pub const HOOKABLE: Self = Self(1 << 1);
    /// Player bodies.
    pub const PLAYER: Self = Self(1 << 2);
    /// Hook heads.
    pub const HOOK: Self = Self(1 << 3);
    pub const ALL: Self = Self(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every category in `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` share at least one category.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// `self` with every category in `other` removed.
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for CollisionLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionLayers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
