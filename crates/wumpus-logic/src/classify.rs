//! Percept deduction: classify unexplored cells from the visible grid.
//!
//! The engine is a single local pass. Each unknown cell is judged purely
//! by its visited Moore neighbors:
//!
//! - one clean neighbor (visited, empty, percept-free) proves the cell
//!   safe, because a hazard next to it would have left a percept there;
//! - visited neighbors that all carry percepts mean every line of
//!   evidence points at a hazard, so the cell is dangerous;
//! - a mix of percept-bearing and percept-free evidence leaves the cell
//!   risky;
//! - no visited neighbor at all leaves the cell unclassified.
//!
//! Inferences do not propagate between unknown cells within a pass, so
//! deductions that would require chaining constraints across two
//! unexplored cells are out of reach. That is a limitation of the engine,
//! not of any particular grid.

use std::collections::BTreeSet;

use tracing::debug;
use wumpus_types::{CellView, Position, VisibleGrid};

/// The engine's verdict on every cell it can say something about.
///
/// `safe`, `dangerous`, and `risky` cover only currently-unknown cells
/// (plus revealed hazard cells in `dangerous`) and are pairwise disjoint.
/// Unknown cells with no visited neighbor appear in none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Cells already revealed by visitation.
    pub visited: BTreeSet<Position>,
    /// Unexplored cells proven free of hazards.
    pub safe: BTreeSet<Position>,
    /// Cells proven, or unanimously indicated, to hold a hazard.
    pub dangerous: BTreeSet<Position>,
    /// Unexplored cells with ambiguous evidence.
    pub risky: BTreeSet<Position>,
}

/// Classify every cell of the visible grid.
pub fn classify(grid: &VisibleGrid) -> Classification {
    let size = grid.size();
    let mut result = Classification::default();

    // Pass 1: record visited cells; revealed hazards count as dangerous.
    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            let Some(view) = grid.get(pos) else { continue };
            if view.is_known() {
                result.visited.insert(pos);
                if view.is_hazard() {
                    result.dangerous.insert(pos);
                }
            }
        }
    }

    // Pass 2: judge each unknown cell by its visited neighbors.
    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            if grid.get(pos) != Some(CellView::Unknown) {
                continue;
            }

            let mut has_visited_neighbor = false;
            let mut has_clean_neighbor = false;
            let mut has_percept_neighbor = false;
            let mut all_neighbors_carry_percepts = true;

            for neighbor in pos.neighbors(size) {
                if !result.visited.contains(&neighbor) {
                    continue;
                }
                let Some(view) = grid.get(neighbor) else {
                    continue;
                };
                has_visited_neighbor = true;
                if view.is_clean() {
                    has_clean_neighbor = true;
                }
                if view.has_percepts() {
                    has_percept_neighbor = true;
                } else {
                    all_neighbors_carry_percepts = false;
                }
            }

            if !has_visited_neighbor {
                // No evidence either way; stays unclassified.
                continue;
            }
            if has_clean_neighbor {
                result.safe.insert(pos);
            } else if all_neighbors_carry_percepts {
                result.dangerous.insert(pos);
            } else if has_percept_neighbor {
                result.risky.insert(pos);
            }
        }
    }

    // The branches above are mutually exclusive per cell, but the
    // disjointness invariant is enforced on the sets regardless.
    result.risky = &(&result.risky - &result.safe) - &result.dangerous;

    debug!(
        visited = result.visited.len(),
        safe = result.safe.len(),
        dangerous = result.dangerous.len(),
        risky = result.risky.len(),
        "grid classified"
    );
    result
}
