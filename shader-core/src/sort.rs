//! Render sort buckets and their script names.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Render-order bucket used to batch and order draw calls.
///
/// Buckets are totally ordered; a renderer draws lower values first.
/// `Sort::BAD` (zero) means no bucket has been assigned yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Sort(pub i32);

impl Sort {
    /// Unassigned; filled in after parsing.
    pub const BAD: Self = Self(0);
    /// Mirrors, portals, viewscreens.
    pub const PORTAL: Self = Self(1);
    /// Sky box.
    pub const ENVIRONMENT: Self = Self(2);
    /// Solid geometry.
    pub const OPAQUE: Self = Self(3);
    /// Scorch marks and similar.
    pub const DECAL: Self = Self(4);
    /// Ladders, grates and grills that may have small blended edges in addition to alpha test.
    pub const SEE_THROUGH: Self = Self(5);
    /// Banners and flags.
    pub const BANNER: Self = Self(6);
    /// Fog volumes.
    pub const FOG: Self = Self(7);
    /// Items that should be drawn in front of the water plane.
    pub const UNDERWATER: Self = Self(8);
    /// Regular transparency and filters.
    pub const BLEND0: Self = Self(9);
    /// Generally only used for additive type effects.
    pub const BLEND1: Self = Self(10);
    /// Further blend passes.
    pub const BLEND2: Self = Self(11);
    /// Further blend passes.
    pub const BLEND3: Self = Self(12);
    /// Last blend pass.
    pub const BLEND6: Self = Self(13);
    /// Stencil shadow volumes.
    pub const STENCIL_SHADOW: Self = Self(14);
    /// Gun smoke puffs.
    pub const ALMOST_NEAREST: Self = Self(15);
    /// Blood blobs.
    pub const NEAREST: Self = Self(16);

    /// Returns `true` while no bucket has been assigned.
    #[inline]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Maps a `sort` keyword argument (already lower-cased) to its named bucket.
    ///
    /// Returns `None` for names the grammar does not know; the caller then
    /// treats the value as a literal integer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "portal" => Some(Self::PORTAL),
            "sky" => Some(Self::ENVIRONMENT),
            "opaque" => Some(Self::OPAQUE),
            "decal" => Some(Self::DECAL),
            "seethrough" => Some(Self::SEE_THROUGH),
            "banner" => Some(Self::BANNER),
            "additive" => Some(Self::BLEND1),
            "nearest" => Some(Self::NEAREST),
            "underwater" => Some(Self::UNDERWATER),
            _ => None,
        }
    }

    /// The symbolic name of a known bucket, if any.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("bad"),
            1 => Some("portal"),
            2 => Some("environment"),
            3 => Some("opaque"),
            4 => Some("decal"),
            5 => Some("seeThrough"),
            6 => Some("banner"),
            7 => Some("fog"),
            8 => Some("underwater"),
            9 => Some("blend0"),
            10 => Some("blend1"),
            11 => Some("blend2"),
            12 => Some("blend3"),
            13 => Some("blend6"),
            14 => Some("stencilShadow"),
            15 => Some("almostNearest"),
            16 => Some("nearest"),
            _ => None,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
