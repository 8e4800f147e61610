//! The game board: seeded generation, percepts, and the visible view.
//!
//! The [`World`] owns the ground-truth grid, the agent's position, the
//! visited set, and a per-cell percept cache. Hazards and gold are placed
//! by rejection sampling from an injected seeded RNG, so a given seed
//! always produces the same layout and tests stay deterministic.
//!
//! The deduction engine never reads this crate's ground truth directly; it
//! only receives the [`VisibleGrid`] produced by [`World::visible_grid`],
//! which masks every unvisited cell.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, trace};
use wumpus_types::{CellContent, CellView, MAX_GRID_SIZE, PerceptSet, Position, VisibleGrid};

use crate::error::WorldError;

/// Grid geometry and entity counts for world generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldLayout {
    /// Side length of the square grid.
    pub size: usize,
    /// Number of pits to place.
    pub pit_count: usize,
    /// Number of wumpuses to place.
    pub wumpus_count: usize,
    /// Number of gold cells to place.
    pub gold_count: usize,
}

impl Default for WorldLayout {
    /// The reference layout: a 5x5 grid with 3 pits, 1 wumpus, and 1 gold.
    fn default() -> Self {
        Self {
            size: 5,
            pit_count: 3,
            wumpus_count: 1,
            gold_count: 1,
        }
    }
}

impl WorldLayout {
    /// Validate that the grid fits the labeling scheme and that every
    /// entity can be placed outside the start cell without overlap.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnsupportedSize`] for a zero-sized grid or
    /// one wider than the 26-column label scheme, and
    /// [`WorldError::InfeasibleLayout`] when the requested entities
    /// outnumber the non-start cells.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.size == 0 || self.size > MAX_GRID_SIZE {
            return Err(WorldError::UnsupportedSize(self.size));
        }
        let available = self.size.saturating_mul(self.size).saturating_sub(1);
        let requested = self
            .pit_count
            .saturating_add(self.wumpus_count)
            .saturating_add(self.gold_count);
        if requested > available {
            return Err(WorldError::InfeasibleLayout {
                requested,
                available,
            });
        }
        Ok(())
    }
}

/// The ground-truth world state for one game.
#[derive(Debug, Clone)]
pub struct World {
    /// Geometry and entity counts used for (re)generation.
    layout: WorldLayout,
    /// Ground-truth cell contents, row-major.
    grid: Vec<Vec<CellContent>>,
    /// The agent's current position.
    agent_pos: Position,
    /// Every position the agent has occupied. Only grows.
    visited: BTreeSet<Position>,
    /// Percepts cached at visitation time for each visited cell.
    visited_percepts: BTreeMap<Position, PerceptSet>,
    /// Seeded RNG driving rejection sampling.
    rng: SmallRng,
}

impl World {
    /// Generate a world from a layout and a seed.
    ///
    /// The same seed always yields the same placement. The layout is
    /// validated first, so rejection sampling is guaranteed to terminate.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnsupportedSize`] or
    /// [`WorldError::InfeasibleLayout`] when the layout cannot be
    /// realized.
    pub fn generate(layout: WorldLayout, seed: u64) -> Result<Self, WorldError> {
        layout.validate()?;
        let mut world = Self {
            layout,
            grid: vec![vec![CellContent::Empty; layout.size]; layout.size],
            agent_pos: Position::START,
            visited: BTreeSet::new(),
            visited_percepts: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        world.reset();
        Ok(world)
    }

    /// Build a world around a fixed grid, for scenario setups where the
    /// layout must be exact rather than sampled.
    ///
    /// `cells` is row-major and must be square, within the labeling
    /// scheme, with an empty start cell. The embedded RNG is seeded to
    /// zero; calling [`World::reset`] on such a world regenerates
    /// randomly from that stream.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnsupportedSize`],
    /// [`WorldError::MalformedGrid`], or [`WorldError::OccupiedStartCell`].
    pub fn from_cells(cells: Vec<Vec<CellContent>>) -> Result<Self, WorldError> {
        let size = cells.len();
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(WorldError::UnsupportedSize(size));
        }
        if cells.iter().any(|row| row.len() != size) {
            return Err(WorldError::MalformedGrid);
        }
        if cells
            .first()
            .and_then(|row| row.first())
            .is_none_or(|&content| content != CellContent::Empty)
        {
            return Err(WorldError::OccupiedStartCell);
        }

        let count = |content: CellContent| {
            cells
                .iter()
                .flatten()
                .filter(|&&cell| cell == content)
                .count()
        };
        let layout = WorldLayout {
            size,
            pit_count: count(CellContent::Pit),
            wumpus_count: count(CellContent::Wumpus),
            gold_count: count(CellContent::Gold),
        };

        let mut world = Self {
            layout,
            grid: cells,
            agent_pos: Position::START,
            visited: BTreeSet::new(),
            visited_percepts: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(0),
        };
        world.rediscover_start();
        Ok(world)
    }

    /// Regenerate the grid with fresh random placement and reset the
    /// agent to the start cell.
    ///
    /// Placement rejects the start cell and already-occupied cells, so
    /// entities never overlap. The RNG stream continues from its current
    /// state; construct a new [`World`] to re-seed.
    pub fn reset(&mut self) {
        let size = self.layout.size;
        self.grid = vec![vec![CellContent::Empty; size]; size];
        self.place_entities(CellContent::Wumpus, self.layout.wumpus_count);
        self.place_entities(CellContent::Gold, self.layout.gold_count);
        self.place_entities(CellContent::Pit, self.layout.pit_count);
        debug!(
            size,
            pits = self.layout.pit_count,
            wumpuses = self.layout.wumpus_count,
            golds = self.layout.gold_count,
            "world generated"
        );
        self.rediscover_start();
    }

    /// Put the agent back on the start cell with a fresh visited set and
    /// percept cache.
    fn rediscover_start(&mut self) {
        self.agent_pos = Position::START;
        self.visited = BTreeSet::new();
        self.visited.insert(Position::START);
        self.visited_percepts = BTreeMap::new();
        self.visited_percepts
            .insert(Position::START, self.percepts(Position::START));
    }

    /// Rejection-sample `count` cells for the given content, avoiding the
    /// start cell and every previously placed entity.
    fn place_entities(&mut self, content: CellContent, count: usize) {
        let mut placed: usize = 0;
        while placed < count {
            let row = self.rng.random_range(0..self.layout.size);
            let col = self.rng.random_range(0..self.layout.size);
            let pos = Position::new(row, col);
            if pos == Position::START {
                continue;
            }
            if self.cell(pos) == Some(CellContent::Empty) {
                self.set_cell(pos, content);
                placed = placed.saturating_add(1);
                trace!(%pos, ?content, "entity placed");
            }
        }
    }

    fn set_cell(&mut self, pos: Position, content: CellContent) {
        if let Some(cell) = self
            .grid
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
        {
            *cell = content;
        }
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Side length of the grid.
    pub const fn size(&self) -> usize {
        self.layout.size
    }

    /// The layout this world was generated from.
    pub const fn layout(&self) -> WorldLayout {
        self.layout
    }

    /// The agent's current position.
    pub const fn agent_position(&self) -> Position {
        self.agent_pos
    }

    /// Ground-truth content at a position, or `None` out of bounds.
    pub fn cell(&self, pos: Position) -> Option<CellContent> {
        self.grid
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
    }

    /// Every position the agent has occupied.
    pub fn visited(&self) -> &BTreeSet<Position> {
        &self.visited
    }

    /// Percepts cached for every visited cell.
    pub fn visited_percepts(&self) -> &BTreeMap<Position, PerceptSet> {
        &self.visited_percepts
    }

    /// Whether the agent has visited a position.
    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    /// Percepts at a position: the union of signals radiated by the cell
    /// itself and its Moore neighbors. Pure with respect to world state;
    /// out-of-bounds positions sense nothing.
    pub fn percepts(&self, pos: Position) -> PerceptSet {
        let mut set = PerceptSet::EMPTY;
        for neighbor in pos.neighbors(self.layout.size) {
            if let Some(content) = self.cell(neighbor) {
                set.absorb(content);
            }
        }
        if let Some(content) = self.cell(pos) {
            set.absorb(content);
        }
        set
    }

    /// The visited-restricted view of the grid.
    ///
    /// Visited pit, wumpus, and gold cells reveal their content; visited
    /// empty cells show their cached percept summary; every other cell is
    /// [`CellView::Unknown`]. Ground truth for unvisited cells never
    /// leaks through this view.
    pub fn visible_grid(&self) -> VisibleGrid {
        let size = self.layout.size;
        let mut visible = VisibleGrid::new(size);
        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                if !self.is_visited(pos) {
                    continue;
                }
                let view = match self.cell(pos) {
                    Some(CellContent::Pit) => CellView::Pit,
                    Some(CellContent::Wumpus) => CellView::Wumpus,
                    Some(CellContent::Gold) => CellView::Gold,
                    Some(CellContent::Empty) | None => CellView::Explored(
                        self.visited_percepts.get(&pos).copied().unwrap_or_default(),
                    ),
                };
                visible.set(pos, view);
            }
        }
        visible
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Move the agent to a position, marking it visited and caching its
    /// percepts.
    ///
    /// Returns the ground-truth content of the destination together with
    /// the percepts sensed there. Adjacency is not checked here; that is
    /// the session layer's concern.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] when the position lies outside
    /// the grid; the world is left unchanged.
    pub fn move_agent(&mut self, pos: Position) -> Result<(CellContent, PerceptSet), WorldError> {
        let Some(content) = self.cell(pos) else {
            return Err(WorldError::OutOfBounds {
                position: pos,
                size: self.layout.size,
            });
        };
        self.agent_pos = pos;
        self.visited.insert(pos);
        let percepts = self.percepts(pos);
        self.visited_percepts.insert(pos, percepts);
        trace!(%pos, ?content, "agent moved");
        Ok((content, percepts))
    }

    /// Whether a position is in bounds and free of pits and wumpuses.
    pub fn is_safe(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|content| !content.is_hazard())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    const E: CellContent = CellContent::Empty;
    const P: CellContent = CellContent::Pit;
    const W: CellContent = CellContent::Wumpus;
    const G: CellContent = CellContent::Gold;

    /// 5x5 world with a single pit at (0, 1) and nothing else.
    fn single_pit_world() -> World {
        let mut cells = vec![vec![E; 5]; 5];
        cells[0][1] = P;
        World::from_cells(cells).unwrap()
    }

    fn count_cells(world: &World, content: CellContent) -> usize {
        let size = world.size();
        let mut total = 0_usize;
        for row in 0..size {
            for col in 0..size {
                if world.cell(Position::new(row, col)) == Some(content) {
                    total += 1;
                }
            }
        }
        total
    }

    #[test]
    fn generation_honors_layout_counts() {
        let world = World::generate(WorldLayout::default(), 7).unwrap();
        assert_eq!(count_cells(&world, CellContent::Pit), 3);
        assert_eq!(count_cells(&world, CellContent::Wumpus), 1);
        assert_eq!(count_cells(&world, CellContent::Gold), 1);
    }

    #[test]
    fn start_cell_is_always_empty() {
        // A layout that fills every non-start cell still leaves the start
        // cell alone.
        let layout = WorldLayout {
            size: 3,
            pit_count: 6,
            wumpus_count: 1,
            gold_count: 1,
        };
        for seed in 0..10_u64 {
            let world = World::generate(layout, seed).unwrap();
            assert_eq!(world.cell(Position::START), Some(CellContent::Empty));
        }
    }

    #[test]
    fn generation_is_reproducible_per_seed() {
        let a = World::generate(WorldLayout::default(), 42).unwrap();
        let b = World::generate(WorldLayout::default(), 42).unwrap();
        for row in 0..5 {
            for col in 0..5 {
                let pos = Position::new(row, col);
                assert_eq!(a.cell(pos), b.cell(pos), "layouts diverged at {pos}");
            }
        }
    }

    #[test]
    fn infeasible_layouts_are_rejected() {
        let layout = WorldLayout {
            size: 2,
            pit_count: 4,
            wumpus_count: 0,
            gold_count: 0,
        };
        assert!(matches!(
            World::generate(layout, 0),
            Err(WorldError::InfeasibleLayout { requested: 4, available: 3 })
        ));
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let layout = WorldLayout {
            size: 27,
            ..WorldLayout::default()
        };
        assert!(matches!(
            World::generate(layout, 0),
            Err(WorldError::UnsupportedSize(27))
        ));
    }

    #[test]
    fn from_cells_rejects_bad_grids() {
        let ragged = vec![vec![E, E], vec![E]];
        assert!(matches!(
            World::from_cells(ragged),
            Err(WorldError::MalformedGrid)
        ));

        let occupied = vec![vec![G, E], vec![E, E]];
        assert!(matches!(
            World::from_cells(occupied),
            Err(WorldError::OccupiedStartCell)
        ));
    }

    #[test]
    fn percepts_cover_the_closed_moore_neighborhood() {
        let world = single_pit_world();
        // Every neighbor of the pit at (0, 1) senses a breeze, and so
        // does the pit cell itself.
        for pos in [
            Position::new(0, 0),
            Position::new(0, 2),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(0, 1),
        ] {
            assert!(world.percepts(pos).breeze, "no breeze at {pos}");
        }
        // A cell with no pit in its closed neighborhood never reports one.
        assert!(world.percepts(Position::new(3, 3)).is_empty());
        assert!(!world.percepts(Position::new(0, 3)).breeze);
    }

    #[test]
    fn stench_tracks_the_wumpus() {
        let mut cells = vec![vec![E; 3]; 3];
        cells[2][2] = W;
        let world = World::from_cells(cells).unwrap();
        assert!(world.percepts(Position::new(1, 1)).stench);
        assert!(!world.percepts(Position::START).stench);
    }

    #[test]
    fn visible_grid_masks_unvisited_cells() {
        let world = single_pit_world();
        let visible = world.visible_grid();
        // Only the start cell is visited; it shows its percept summary.
        assert_eq!(
            visible.get(Position::START),
            Some(CellView::Explored(PerceptSet {
                breeze: true,
                stench: false,
            }))
        );
        // The pit itself is unvisited and must stay masked.
        assert_eq!(visible.get(Position::new(0, 1)), Some(CellView::Unknown));
        assert_eq!(visible.get(Position::new(4, 4)), Some(CellView::Unknown));
    }

    #[test]
    fn visible_grid_reveals_visited_hazards() {
        let mut world = single_pit_world();
        let (content, _) = world.move_agent(Position::new(0, 1)).unwrap();
        assert_eq!(content, CellContent::Pit);
        assert_eq!(
            world.visible_grid().get(Position::new(0, 1)),
            Some(CellView::Pit)
        );
    }

    #[test]
    fn visible_grid_serializes_percept_labels() {
        let world = single_pit_world();
        let json = serde_json::to_value(world.visible_grid()).unwrap();
        assert_eq!(json[0][0], "breeze");
        assert_eq!(json[0][1], "unknown");
    }

    #[test]
    fn move_agent_tracks_visits_and_percepts() {
        let mut world = single_pit_world();
        let (content, percepts) = world.move_agent(Position::new(1, 0)).unwrap();
        assert_eq!(content, CellContent::Empty);
        assert!(percepts.breeze);
        assert!(world.is_visited(Position::new(1, 0)));
        assert_eq!(world.agent_position(), Position::new(1, 0));
        assert_eq!(
            world.visited_percepts().get(&Position::new(1, 0)).copied(),
            Some(percepts)
        );
    }

    #[test]
    fn out_of_bounds_move_leaves_world_unchanged() {
        let mut world = single_pit_world();
        let result = world.move_agent(Position::new(9, 9));
        assert!(matches!(result, Err(WorldError::OutOfBounds { .. })));
        assert_eq!(world.agent_position(), Position::START);
        assert_eq!(world.visited().len(), 1);
    }

    #[test]
    fn is_safe_rejects_hazards_and_out_of_bounds() {
        let world = single_pit_world();
        assert!(world.is_safe(Position::START));
        assert!(!world.is_safe(Position::new(0, 1)));
        assert!(!world.is_safe(Position::new(5, 0)));
    }

    #[test]
    fn reset_returns_the_agent_to_the_start() {
        let mut world = World::generate(WorldLayout::default(), 3).unwrap();
        let _ = world.move_agent(Position::new(1, 1)).unwrap();
        assert_eq!(world.visited().len(), 2);

        world.reset();
        assert_eq!(world.agent_position(), Position::START);
        assert_eq!(world.visited().len(), 1);
        assert!(world.is_visited(Position::START));
        assert_eq!(count_cells(&world, CellContent::Pit), 3);
    }

    #[test]
    fn gold_radiates_no_percepts() {
        let mut cells = vec![vec![E; 3]; 3];
        cells[0][1] = G;
        let world = World::from_cells(cells).unwrap();
        assert!(world.percepts(Position::START).is_empty());
    }
}
