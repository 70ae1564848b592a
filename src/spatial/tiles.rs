//! Tile variants described by edge connectors, and the catalog they are drawn from
//!
//! A variant is a 4-bit mask (top, right, bottom, left). The catalog fixes an
//! order over a set of distinct variants and precomputes, for every side and
//! connector flag, which catalog indices agree with it. Domain filtering is
//! then a single bitset intersection.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use std::fmt;
use std::str::FromStr;

/// Edge of a tile, listed clockwise from the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Edge facing `y - 1`
    Top,
    /// Edge facing `x + 1`
    Right,
    /// Edge facing `y + 1`
    Bottom,
    /// Edge facing `x - 1`
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The edge on the other side of the tile
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Grid step `[dx, dy]` towards the neighbor across this edge
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Top => [0, -1],
            Self::Right => [1, 0],
            Self::Bottom => [0, 1],
            Self::Left => [-1, 0],
        }
    }

    /// Position of this side in [`Side::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

// Indexed by mask; bit 0 top, bit 1 right, bit 2 bottom, bit 3 left
const GLYPHS: [char; 16] = [
    ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];

/// Immutable tile identified by which of its four edges carry a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileVariant {
    mask: u8,
}

impl TileVariant {
    /// Build a variant from its connector flags
    pub const fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        let mut mask = 0;
        if top {
            mask |= Side::Top.bit();
        }
        if right {
            mask |= Side::Right.bit();
        }
        if bottom {
            mask |= Side::Bottom.bit();
        }
        if left {
            mask |= Side::Left.bit();
        }
        Self { mask }
    }

    /// Build a variant from a connector mask; bits above the low four are ignored
    pub const fn from_mask(mask: u8) -> Self {
        Self { mask: mask & 0b1111 }
    }

    /// Connector mask with bit 0 top, bit 1 right, bit 2 bottom, bit 3 left
    pub const fn mask(self) -> u8 {
        self.mask
    }

    /// Whether a connector crosses the given edge
    pub const fn has_connector(self, side: Side) -> bool {
        self.mask & side.bit() != 0
    }

    /// Number of edges carrying a connector
    pub const fn connector_count(self) -> u32 {
        self.mask.count_ones()
    }

    /// Box-drawing character showing the connectors
    pub fn glyph(self) -> char {
        GLYPHS.get(usize::from(self.mask)).copied().unwrap_or('?')
    }
}

impl fmt::Display for TileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for TileVariant {
    type Err = AlgorithmError;

    /// Accepts `TRBL` flags such as `"1010"`, or a single box-drawing glyph
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let chars: Vec<char> = trimmed.chars().collect();

        if let [glyph] = chars.as_slice() {
            return GLYPHS
                .iter()
                .position(|candidate| candidate == glyph)
                .map(|mask| Self::from_mask(mask as u8))
                .ok_or_else(|| invalid_parameter("tile", &s, &"unknown tile glyph"));
        }

        if chars.len() != 4 {
            return Err(invalid_parameter(
                "tile",
                &s,
                &"expected four 0/1 flags in top-right-bottom-left order",
            ));
        }

        let mut mask = 0u8;
        for (side, flag) in Side::ALL.iter().zip(&chars) {
            match flag {
                '1' => mask |= side.bit(),
                '0' => {}
                _ => {
                    return Err(invalid_parameter(
                        "tile",
                        &s,
                        &format!("flag '{flag}' for the {side} edge is not 0 or 1"),
                    ));
                }
            }
        }
        Ok(Self::from_mask(mask))
    }
}

/// Straight pipe from top to bottom
pub const VERTICAL: TileVariant = TileVariant::new(true, false, true, false);
/// Straight pipe from left to right
pub const HORIZONTAL: TileVariant = TileVariant::new(false, true, false, true);
/// Elbow joining the right and bottom edges
pub const ELBOW_RIGHT_BOTTOM: TileVariant = TileVariant::new(false, true, true, false);
/// Elbow joining the bottom and left edges
pub const ELBOW_BOTTOM_LEFT: TileVariant = TileVariant::new(false, false, true, true);
/// Elbow joining the top and right edges
pub const ELBOW_TOP_RIGHT: TileVariant = TileVariant::new(true, true, false, false);
/// Elbow joining the top and left edges
pub const ELBOW_TOP_LEFT: TileVariant = TileVariant::new(true, false, false, true);
/// Vertical pipe branching right
pub const TEE_RIGHT: TileVariant = TileVariant::new(true, true, true, false);
/// Vertical pipe branching left
pub const TEE_LEFT: TileVariant = TileVariant::new(true, false, true, true);
/// Horizontal pipe branching up
pub const TEE_TOP: TileVariant = TileVariant::new(true, true, false, true);
/// Horizontal pipe branching down
pub const TEE_BOTTOM: TileVariant = TileVariant::new(false, true, true, true);
/// Connectors on all four edges
pub const CROSS: TileVariant = TileVariant::new(true, true, true, true);

/// Catalog indices split by the connector flag on one side
#[derive(Debug, Clone)]
struct SideSupport {
    without: TileBitset,
    with: TileBitset,
}

impl SideSupport {
    fn build(variants: &[TileVariant], side: Side) -> Self {
        let mut without = TileBitset::new(variants.len());
        let mut with = TileBitset::new(variants.len());
        for (index, variant) in variants.iter().enumerate() {
            if variant.has_connector(side) {
                with.insert(index);
            } else {
                without.insert(index);
            }
        }
        Self { without, with }
    }
}

/// Ordered set of distinct tile variants available to every cell
#[derive(Debug, Clone)]
pub struct TileCatalog {
    variants: Vec<TileVariant>,
    top: SideSupport,
    right: SideSupport,
    bottom: SideSupport,
    left: SideSupport,
}

impl TileCatalog {
    /// Create a catalog from caller-supplied variants
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or contains a variant twice
    pub fn new(variants: Vec<TileVariant>) -> Result<Self> {
        if variants.is_empty() {
            return Err(AlgorithmError::InvalidCatalog {
                reason: "catalog must contain at least one tile".to_string(),
            });
        }

        for (index, variant) in variants.iter().enumerate() {
            if variants.iter().skip(index + 1).any(|other| other == variant) {
                return Err(AlgorithmError::InvalidCatalog {
                    reason: format!(
                        "tile '{variant}' (mask {:04b}) appears twice",
                        variant.mask()
                    ),
                });
            }
        }

        Ok(Self::from_distinct(variants))
    }

    /// The eleven pipe pieces: two straights, four elbows, four tees and a cross
    pub fn pipes() -> Self {
        Self::from_distinct(vec![
            VERTICAL,
            HORIZONTAL,
            ELBOW_RIGHT_BOTTOM,
            ELBOW_BOTTOM_LEFT,
            ELBOW_TOP_RIGHT,
            ELBOW_TOP_LEFT,
            TEE_RIGHT,
            TEE_LEFT,
            TEE_TOP,
            TEE_BOTTOM,
            CROSS,
        ])
    }

    /// Every one of the sixteen connector masks, in mask order
    ///
    /// Any single constraint leaves eight candidates, so this catalog never contradicts.
    pub fn complete() -> Self {
        Self::from_distinct((0..16).map(TileVariant::from_mask).collect())
    }

    fn from_distinct(variants: Vec<TileVariant>) -> Self {
        Self {
            top: SideSupport::build(&variants, Side::Top),
            right: SideSupport::build(&variants, Side::Right),
            bottom: SideSupport::build(&variants, Side::Bottom),
            left: SideSupport::build(&variants, Side::Left),
            variants,
        }
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variant at a catalog index
    pub fn get(&self, index: usize) -> Option<TileVariant> {
        self.variants.get(index).copied()
    }

    /// Catalog index of a variant
    pub fn index_of(&self, variant: TileVariant) -> Option<usize> {
        self.variants
            .iter()
            .position(|&candidate| candidate == variant)
    }

    /// All variants in catalog order
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Iterate over the variants in catalog order
    pub fn iter(&self) -> impl Iterator<Item = TileVariant> + '_ {
        self.variants.iter().copied()
    }

    /// Catalog indices whose connector flag on `side` equals `has_connector`
    pub const fn matching(&self, side: Side, has_connector: bool) -> &TileBitset {
        let support = match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        };
        if has_connector {
            &support.with
        } else {
            &support.without
        }
    }

    /// Which connector flags on `side` occur among the members of `domain`
    ///
    /// Returns `(any_without, any_with)`.
    pub fn connector_flags(&self, domain: &TileBitset, side: Side) -> (bool, bool) {
        let without = !domain.intersection(self.matching(side, false)).is_empty();
        let with = !domain.intersection(self.matching(side, true)).is_empty();
        (without, with)
    }
}
