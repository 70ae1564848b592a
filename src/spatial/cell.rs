//! Per-position solver state: candidate domain, collapse flag and chosen tile

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::random::RandomSource;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::Position;
use crate::spatial::tiles::{Side, TileCatalog, TileVariant};

/// One grid position and the tiles it may still become
///
/// The domain only ever shrinks. Once collapsed, the cell keeps its chosen
/// tile for the lifetime of the grid (until an explicit reset).
#[derive(Debug, Clone)]
pub struct Cell {
    position: Position,
    domain: TileBitset,
    chosen: Option<TileVariant>,
}

impl Cell {
    /// Create an uncollapsed cell whose domain is the full catalog
    pub fn new(position: Position, catalog: &TileCatalog) -> Self {
        Self {
            position,
            domain: TileBitset::all(catalog.len()),
            chosen: None,
        }
    }

    /// Grid coordinates of the cell
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether a tile has been fixed for this cell
    pub const fn is_collapsed(&self) -> bool {
        self.chosen.is_some()
    }

    /// The fixed tile, if collapsed
    pub const fn chosen(&self) -> Option<TileVariant> {
        self.chosen
    }

    /// Size of the candidate domain
    ///
    /// A comparison key for selection, not an information measure.
    pub fn entropy(&self) -> usize {
        self.domain.count()
    }

    /// Uncollapsed with nothing left to choose from
    pub fn is_contradicted(&self) -> bool {
        self.chosen.is_none() && self.domain.is_empty()
    }

    /// Candidate catalog indices
    pub const fn domain(&self) -> &TileBitset {
        &self.domain
    }

    /// Candidate variants in catalog order
    pub fn candidates(&self, catalog: &TileCatalog) -> Vec<TileVariant> {
        self.domain
            .iter_ones()
            .filter_map(|index| catalog.get(index))
            .collect()
    }

    /// Filter the domain against a connector crossing into this cell
    ///
    /// `side` is the direction from the constraining cell to this one, so the
    /// edge being tested is `side.opposite()`. Variants whose flag on that edge
    /// differs from `has_connector` are dropped. Collapsed cells are left alone.
    /// Returns the entropy after filtering.
    pub fn restrict(&mut self, catalog: &TileCatalog, side: Side, has_connector: bool) -> usize {
        if self.chosen.is_none() {
            self.domain
                .intersect_with(catalog.matching(side.opposite(), has_connector));
        }
        self.entropy()
    }

    /// Fix the cell to a uniformly chosen member of its domain
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The domain is empty (a contradiction)
    /// - The cell is already collapsed
    pub fn collapse<R: RandomSource>(
        &mut self,
        catalog: &TileCatalog,
        random: &mut R,
    ) -> Result<TileVariant> {
        if self.chosen.is_some() {
            return Err(AlgorithmError::CellAlreadyCollapsed {
                position: self.position,
            });
        }

        let position = self.position;
        let contradiction = move || AlgorithmError::Contradiction {
            position,
            iteration: 0,
        };

        let pick = random
            .choose_index(self.domain.count())
            .ok_or_else(contradiction)?;
        let index = self.domain.nth_member(pick).ok_or_else(contradiction)?;
        let variant = catalog.get(index).ok_or_else(contradiction)?;

        self.domain.retain_only(index);
        self.chosen = Some(variant);
        Ok(variant)
    }

    /// Fix the cell to a specific tile from its domain
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cell is already collapsed
    /// - The tile is not in the catalog or no longer in the domain
    pub fn collapse_to(&mut self, catalog: &TileCatalog, variant: TileVariant) -> Result<TileVariant> {
        if self.chosen.is_some() {
            return Err(AlgorithmError::CellAlreadyCollapsed {
                position: self.position,
            });
        }

        let index = catalog
            .index_of(variant)
            .filter(|&index| self.domain.contains(index))
            .ok_or_else(|| {
                invalid_parameter(
                    "tile",
                    &variant,
                    &format!("not a candidate for cell {}", self.position),
                )
            })?;

        self.domain.retain_only(index);
        self.chosen = Some(variant);
        Ok(variant)
    }

    /// Return to the full catalog, uncollapsed
    pub fn reset(&mut self, catalog: &TileCatalog) {
        self.domain = TileBitset::all(catalog.len());
        self.chosen = None;
    }
}
