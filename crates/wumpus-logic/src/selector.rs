//! Rule-ordered move selection over the classified grid.
//!
//! Rules are tried in order; the first that produces a move wins:
//!
//! 1. Trapped-return: no unexplored neighbor is provably safe, so retreat
//!    onto visited ground, backtracking only as a last resort.
//! 2. Breadth-first search to the nearest provably safe unexplored cell.
//! 3. The same search for the nearest risky cell.
//! 4. Stay in place, signaling the caller that the game should end.
//!
//! The search never enters a cell classified dangerous, expands neighbors
//! in the canonical scan order for deterministic tie-breaking, and the
//! agent advances one step along the discovered path per turn. Every
//! selected move carries a justification naming the rule that fired and
//! the evidence behind it.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;
use wumpus_types::{CellView, Position, VisibleGrid};

use crate::classify::{Classification, classify};

/// A selected move with its human-readable justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMove {
    /// Destination cell; the agent's own cell when no move is possible.
    pub target: Position,
    /// Which rule fired and the evidence behind it.
    pub reason: String,
}

/// Which classification set a search run is hunting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    Safe,
    Risky,
}

/// Select the best next move from the agent's position.
///
/// `previous` is the cell the agent occupied before its latest move, when
/// known; the trapped-return rule uses it to prefer lateral movement over
/// backtracking. Selection is deterministic: identical inputs always
/// produce the identical move and reason.
pub fn select_move(
    grid: &VisibleGrid,
    agent: Position,
    previous: Option<Position>,
) -> SelectedMove {
    let verdict = classify(grid);

    let chosen = trapped_return(grid, agent, previous, &verdict)
        .or_else(|| nearest_target(grid, agent, &verdict, TargetKind::Safe))
        .or_else(|| nearest_target(grid, agent, &verdict, TargetKind::Risky))
        .unwrap_or_else(|| SelectedMove {
            target: agent,
            reason: "No safe or risky destinations remain. Staying in place.".to_owned(),
        });

    debug!(destination = %chosen.target, "move selected");
    chosen
}

/// Rule 1: every unexplored neighbor lacks proof of safety, but visited
/// non-hazard ground is adjacent.
fn trapped_return(
    grid: &VisibleGrid,
    agent: Position,
    previous: Option<Position>,
    verdict: &Classification,
) -> Option<SelectedMove> {
    let size = grid.size();
    let mut unexplored_neighbors = Vec::new();
    let mut visited_neighbors = Vec::new();
    for neighbor in agent.neighbors(size) {
        match grid.get(neighbor) {
            Some(CellView::Unknown) => unexplored_neighbors.push(neighbor),
            Some(view) if !view.is_hazard() => visited_neighbors.push(neighbor),
            _ => {}
        }
    }

    let all_unproven = !unexplored_neighbors.is_empty()
        && unexplored_neighbors
            .iter()
            .all(|neighbor| !verdict.safe.contains(neighbor));
    if !all_unproven || visited_neighbors.is_empty() {
        return None;
    }

    if let (&[only], Some(prev)) = (visited_neighbors.as_slice(), previous)
        && only == prev
    {
        // Dead end: go back through the previous cell, but only when every
        // other neighbor is a revealed hazard. Dangerous-classified
        // unknowns do not count as hazards here.
        let all_others_hazardous = agent
            .neighbors(size)
            .into_iter()
            .filter(|&neighbor| neighbor != prev)
            .all(|neighbor| grid.get(neighbor).is_some_and(CellView::is_hazard));
        if all_others_hazardous {
            return Some(SelectedMove {
                target: prev,
                reason: format!(
                    "No unexplored neighbor is provably safe and the only visited escape is the previous cell {prev}; every other neighbor is a revealed hazard, so the agent backs out the way it came."
                ),
            });
        }
        return None;
    }

    visited_neighbors
        .into_iter()
        .find(|&neighbor| previous.is_none_or(|prev| neighbor != prev))
        .map(|neighbor| SelectedMove {
            target: neighbor,
            reason: format!(
                "No unexplored neighbor is provably safe. Stepping onto the visited cell {neighbor} rather than backtracking."
            ),
        })
}

/// Rules 2 and 3: breadth-first search for the nearest unexplored cell in
/// the requested set, never routing through a dangerous cell.
///
/// The queue carries the path taken so far; expansion order matches the
/// canonical neighbor scan, so ties always resolve the same way.
fn nearest_target(
    grid: &VisibleGrid,
    agent: Position,
    verdict: &Classification,
    kind: TargetKind,
) -> Option<SelectedMove> {
    let targets = match kind {
        TargetKind::Safe => &verdict.safe,
        TargetKind::Risky => &verdict.risky,
    };

    let size = grid.size();
    let mut queue: VecDeque<(Position, Vec<Position>)> = VecDeque::new();
    let mut explored: BTreeSet<Position> = BTreeSet::new();
    queue.push_back((agent, Vec::new()));

    while let Some((pos, path)) = queue.pop_front() {
        if !explored.insert(pos) {
            continue;
        }
        if targets.contains(&pos) && grid.get(pos) == Some(CellView::Unknown) {
            return Some(describe_path(pos, &path, kind));
        }
        for neighbor in pos.neighbors(size) {
            if verdict.dangerous.contains(&neighbor) || explored.contains(&neighbor) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(neighbor);
            queue.push_back((neighbor, next_path));
        }
    }
    None
}

/// Build the move and justification for a discovered path.
fn describe_path(found: Position, path: &[Position], kind: TargetKind) -> SelectedMove {
    match (kind, path.first()) {
        (TargetKind::Safe, Some(&step)) => SelectedMove {
            target: step,
            reason: format!(
                "Found a path to the provably safe unexplored cell {found}; the first step toward it is {step}. Safety follows from a visited neighbor with neither breeze nor stench."
            ),
        },
        (TargetKind::Safe, None) => SelectedMove {
            target: found,
            reason: "The current cell is itself a provably safe unexplored target. Staying in place."
                .to_owned(),
        },
        (TargetKind::Risky, Some(&step)) => SelectedMove {
            target: step,
            reason: format!(
                "No provably safe unexplored cell is reachable. Heading for the risky cell {found}, which shows mixed evidence but no proof of a hazard; the first step toward it is {step}."
            ),
        },
        (TargetKind::Risky, None) => SelectedMove {
            target: found,
            reason: "No provably safe unexplored cell is reachable. The current cell is itself a risky cell."
                .to_owned(),
        },
    }
}
