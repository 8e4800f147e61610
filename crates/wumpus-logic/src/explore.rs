//! Uncommitted exploration: a randomized local step, kept apart from the
//! deterministic selector.
//!
//! [`exploratory_move`] wanders onto a random non-hazard neighbor,
//! preferring unexplored cells. It consults no classification and offers
//! no safety guarantee beyond avoiding revealed hazards, so it is NOT
//! part of the deterministic engine's contract. Callers wanting
//! reproducible behavior must seed the RNG themselves.

use std::collections::BTreeSet;

use rand::Rng;
use wumpus_types::{Position, VisibleGrid};

use crate::selector::SelectedMove;

/// Pick a random neighbor to wander to.
///
/// Revealed pits and wumpuses are never candidates. Neighbors the agent
/// has not visited are preferred over visited ones; `None` means no
/// candidate exists at all.
pub fn exploratory_move(
    grid: &VisibleGrid,
    agent: Position,
    visited: &BTreeSet<Position>,
    rng: &mut impl Rng,
) -> Option<SelectedMove> {
    let size = grid.size();
    let mut unexplored = Vec::new();
    let mut revisitable = Vec::new();

    for neighbor in agent.neighbors(size) {
        let Some(view) = grid.get(neighbor) else {
            continue;
        };
        if view.is_hazard() {
            continue;
        }
        if visited.contains(&neighbor) {
            revisitable.push(neighbor);
        } else {
            unexplored.push(neighbor);
        }
    }

    if let Some(&target) = pick(&unexplored, rng) {
        return Some(SelectedMove {
            target,
            reason: format!("Wandering onto the unexplored neighbor {target}."),
        });
    }
    pick(&revisitable, rng).map(|&target| SelectedMove {
        target,
        reason: format!("No unexplored neighbor to wander to; revisiting {target}."),
    })
}

/// Uniformly pick one element, or `None` from an empty slice.
fn pick<'a, T>(candidates: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.random_range(0..candidates.len()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use wumpus_types::{CellView, PerceptSet};

    use super::*;

    fn explored_clean() -> CellView {
        CellView::Explored(PerceptSet::EMPTY)
    }

    #[test]
    fn wanderer_prefers_unexplored_neighbors() {
        let mut grid = VisibleGrid::new(3);
        assert!(grid.set(Position::START, explored_clean()));
        assert!(grid.set(Position::new(0, 1), explored_clean()));
        let visited: BTreeSet<Position> = [Position::START, Position::new(0, 1)].into();

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let chosen = exploratory_move(&grid, Position::START, &visited, &mut rng).unwrap();
            assert!(
                !visited.contains(&chosen.target),
                "picked a visited cell while unexplored ones remain"
            );
        }
    }

    #[test]
    fn wanderer_never_enters_revealed_hazards() {
        let mut grid = VisibleGrid::new(2);
        assert!(grid.set(Position::START, explored_clean()));
        assert!(grid.set(Position::new(0, 1), CellView::Pit));
        assert!(grid.set(Position::new(1, 0), CellView::Wumpus));
        let visited: BTreeSet<Position> = [Position::START].into();

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let chosen = exploratory_move(&grid, Position::START, &visited, &mut rng).unwrap();
            assert_eq!(chosen.target, Position::new(1, 1));
        }
    }

    #[test]
    fn wanderer_revisits_when_nothing_is_new() {
        let mut grid = VisibleGrid::new(2);
        for row in 0..2 {
            for col in 0..2 {
                assert!(grid.set(Position::new(row, col), explored_clean()));
            }
        }
        let visited: BTreeSet<Position> = [
            Position::START,
            Position::new(0, 1),
            Position::new(1, 0),
            Position::new(1, 1),
        ]
        .into();

        let mut rng = SmallRng::seed_from_u64(1);
        let chosen = exploratory_move(&grid, Position::START, &visited, &mut rng).unwrap();
        assert!(visited.contains(&chosen.target));
        assert!(chosen.reason.contains("revisiting"));
    }

    #[test]
    fn wanderer_gives_up_when_walled_in() {
        let mut grid = VisibleGrid::new(2);
        assert!(grid.set(Position::START, explored_clean()));
        assert!(grid.set(Position::new(0, 1), CellView::Pit));
        assert!(grid.set(Position::new(1, 0), CellView::Pit));
        assert!(grid.set(Position::new(1, 1), CellView::Wumpus));
        let visited: BTreeSet<Position> = [Position::START].into();

        let mut rng = SmallRng::seed_from_u64(3);
        assert!(exploratory_move(&grid, Position::START, &visited, &mut rng).is_none());
    }

    #[test]
    fn wanderer_is_reproducible_per_seed() {
        let grid = {
            let mut grid = VisibleGrid::new(4);
            assert!(grid.set(Position::new(1, 1), explored_clean()));
            grid
        };
        let visited: BTreeSet<Position> = [Position::new(1, 1)].into();

        let mut first_rng = SmallRng::seed_from_u64(99);
        let mut second_rng = SmallRng::seed_from_u64(99);
        for _ in 0..20 {
            let first = exploratory_move(&grid, Position::new(1, 1), &visited, &mut first_rng);
            let second = exploratory_move(&grid, Position::new(1, 1), &visited, &mut second_rng);
            assert_eq!(first, second);
        }
    }
}
