//! Surface/content bit flags and the static `surfaceparm` keyword table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surface flag bits (rendering and gameplay hints).
pub mod flags {
    /// Never give falling damage.
    pub const NODAMAGE: u32 = 0x1;
    /// Affects game physics.
    pub const SLICK: u32 = 0x2;
    /// Lighting from environment map.
    pub const SKY: u32 = 0x4;
    pub const LADDER: u32 = 0x8;
    /// Don't make missile explosions.
    pub const NOIMPACT: u32 = 0x10;
    /// Don't leave missile marks.
    pub const NOMARKS: u32 = 0x20;
    /// Make flesh sounds and effects.
    pub const FLESH: u32 = 0x40;
    /// Don't generate a drawsurface at all.
    pub const NODRAW: u32 = 0x80;
    /// Make a primary bsp splitter.
    pub const HINT: u32 = 0x100;
    /// Completely ignore, allowing non-closed brushes.
    pub const SKIP: u32 = 0x200;
    /// Surface doesn't need a lightmap.
    pub const NOLIGHTMAP: u32 = 0x400;
    /// Generate lighting info at vertexes.
    pub const POINTLIGHT: u32 = 0x800;
    /// Clanking footsteps.
    pub const METALSTEPS: u32 = 0x1000;
    /// No footstep sounds.
    pub const NOSTEPS: u32 = 0x2000;
    /// Don't collide against curves with this set.
    pub const NONSOLID: u32 = 0x4000;
    /// Act as a light filter during lighting compile.
    pub const LIGHTFILTER: u32 = 0x8000;
    /// Do per-pixel light shadow casting during lighting compile.
    pub const ALPHASHADOW: u32 = 0x10000;
    /// Don't dlight even if solid (solid lava, skies).
    pub const NODLIGHT: u32 = 0x20000;
    /// Leave a dust trail when walking on this surface.
    pub const DUST: u32 = 0x40000;
}

/// Content flag bits (physics and game logic volumes).
pub mod contents {
    /// An eye is never valid in a solid.
    pub const SOLID: u32 = 1;
    pub const LAVA: u32 = 8;
    pub const SLIME: u32 = 16;
    pub const WATER: u32 = 32;
    pub const FOG: u32 = 64;

    pub const NOTTEAM1: u32 = 0x0080;
    pub const NOTTEAM2: u32 = 0x0100;
    pub const NOBOTCLIP: u32 = 0x0200;

    pub const AREAPORTAL: u32 = 0x8000;

    pub const PLAYERCLIP: u32 = 0x10000;
    pub const MONSTERCLIP: u32 = 0x20000;
    pub const TELEPORTER: u32 = 0x40000;
    pub const JUMPPAD: u32 = 0x80000;
    pub const CLUSTERPORTAL: u32 = 0x10_0000;
    pub const DONOTENTER: u32 = 0x20_0000;
    pub const BOTCLIP: u32 = 0x40_0000;
    pub const MOVER: u32 = 0x80_0000;

    /// Removed before bsping an entity.
    pub const ORIGIN: u32 = 0x100_0000;

    /// Should never be on a brush, only in game.
    pub const BODY: u32 = 0x200_0000;
    pub const CORPSE: u32 = 0x400_0000;
    /// Brushes not used for the bsp.
    pub const DETAIL: u32 = 0x800_0000;
    /// Brushes used for the bsp.
    pub const STRUCTURAL: u32 = 0x1000_0000;
    /// Don't consume surface fragments inside.
    pub const TRANSLUCENT: u32 = 0x2000_0000;
    pub const TRIGGER: u32 = 0x4000_0000;
    /// Don't leave bodies or items (death fog, lava).
    pub const NODROP: u32 = 0x8000_0000;
}

/// The pair of bits a single `surfaceparm` keyword contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceParm {
    pub surface: u32,
    pub contents: u32,
}

impl SurfaceParm {
    const fn contents(contents: u32) -> Self {
        Self {
            surface: 0,
            contents,
        }
    }

    const fn surface(surface: u32) -> Self {
        Self {
            surface,
            contents: 0,
        }
    }

    /// Looks up a lower-cased `surfaceparm` keyword.
    ///
    /// Unknown keywords return `None`; that is not an error.
    pub fn lookup(keyword: &str) -> Option<Self> {
        let parm = match keyword {
            // server relevant contents
            "water" => Self::contents(contents::WATER),
            "slime" => Self::contents(contents::SLIME),
            "lava" => Self::contents(contents::LAVA),
            "playerclip" => Self::contents(contents::PLAYERCLIP),
            "monsterclip" => Self::contents(contents::MONSTERCLIP),
            "nodrop" => Self::contents(contents::NODROP),
            "nonsolid" => Self::surface(flags::NONSOLID),

            // utility relevant attributes
            "origin" => Self::contents(contents::ORIGIN),
            "trans" => Self::contents(contents::TRANSLUCENT),
            "detail" => Self::contents(contents::DETAIL),
            "structural" => Self::contents(contents::STRUCTURAL),
            "areaportal" => Self::contents(contents::AREAPORTAL),
            "clusterportal" => Self::contents(contents::CLUSTERPORTAL),
            "donotenter" => Self::contents(contents::DONOTENTER),

            "fog" => Self::contents(contents::FOG),
            "sky" => Self::surface(flags::SKY),
            "lightfilter" => Self::surface(flags::LIGHTFILTER),
            "alphashadow" => Self::surface(flags::ALPHASHADOW),
            "hint" => Self::surface(flags::HINT),

            // server attributes
            "slick" => Self::surface(flags::SLICK),
            "noimpact" => Self::surface(flags::NOIMPACT),
            "nomarks" => Self::surface(flags::NOMARKS),
            "ladder" => Self::surface(flags::LADDER),
            "nodamage" => Self::surface(flags::NODAMAGE),
            "metalsteps" => Self::surface(flags::METALSTEPS),
            "flesh" => Self::surface(flags::FLESH),
            "nosteps" => Self::surface(flags::NOSTEPS),

            // drawsurf attributes
            "nodraw" => Self::surface(flags::NODRAW),
            "pointlight" => Self::surface(flags::POINTLIGHT),
            "nolightmap" => Self::surface(flags::NOLIGHTMAP),
            "nodlight" => Self::surface(flags::NODLIGHT),
            "dust" => Self::surface(flags::DUST),
            _ => return None,
        };
        Some(parm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_keywords_only_set_content_bits() {
        let water = SurfaceParm::lookup("water").unwrap();
        assert_eq!(water.surface, 0);
        assert_eq!(water.contents, contents::WATER);

        let nodrop = SurfaceParm::lookup("nodrop").unwrap();
        assert_eq!(nodrop.contents, 0x8000_0000);
    }

    #[test]
    fn surface_keywords_only_set_surface_bits() {
        let sky = SurfaceParm::lookup("sky").unwrap();
        assert_eq!(sky.surface, flags::SKY);
        assert_eq!(sky.contents, 0);

        assert_eq!(
            SurfaceParm::lookup("trans").map(|p| p.contents),
            Some(contents::TRANSLUCENT)
        );
    }

    #[test]
    fn lookup_is_case_sensitive_and_tolerates_unknowns() {
        assert!(SurfaceParm::lookup("Water").is_none());
        assert!(SurfaceParm::lookup("teleporter").is_none());
        assert!(SurfaceParm::lookup("").is_none());
    }
}
