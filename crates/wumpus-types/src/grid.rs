//! Grid primitives: positions, percept sets, and the visited-restricted view.
//!
//! [`Position`] is a (row, col) coordinate carrying the board-label scheme
//! `<ColumnLetter><row+1>` (columns A onward for col 0 onward, rows
//! 1-based). [`VisibleGrid`] is the derived read-only view the deduction
//! engine operates on: every cell is a [`CellView`] that never exposes
//! ground truth for unvisited positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::enums::{CellContent, Percept};

/// Maximum supported grid side length; columns are labeled A through Z.
pub const MAX_GRID_SIZE: usize = 26;

/// Moore-neighborhood offsets in canonical scan order: up, down, left,
/// right, then the four diagonals. Deduction and pathfinding both iterate
/// neighbors in this order, which fixes tie-breaking.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Column letter for a zero-based column index (`A` for 0).
///
/// Indices past the 26-letter scheme render as `?`.
pub fn column_letter(col: usize) -> char {
    u8::try_from(col)
        .ok()
        .filter(|&c| usize::from(c) < MAX_GRID_SIZE)
        .map_or('?', |c| char::from(b'A'.saturating_add(c)))
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A (row, column) coordinate on the grid.
///
/// Serialized as a two-element `[row, col]` array, the wire form consumed
/// by clients. Displays as its board label, e.g. `B3` for row 2, col 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Position {
    /// The fixed start cell (0, 0).
    pub const START: Self = Self { row: 0, col: 0 };

    /// Create a position from row and column indices.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this position by a signed delta, returning `None` when the
    /// result leaves the `size` x `size` grid.
    pub fn offset(self, delta: (isize, isize), size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(delta.0)?;
        let col = self.col.checked_add_signed(delta.1)?;
        (row < size && col < size).then_some(Self { row, col })
    }

    /// In-bounds Moore neighbors in canonical scan order.
    pub fn neighbors(self, size: usize) -> Vec<Self> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&delta| self.offset(delta, size))
            .collect()
    }

    /// Whether `other` lies in this position's Moore neighborhood
    /// (Chebyshev distance exactly 1).
    pub fn is_adjacent(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc) == 1
    }

    /// Board label for this position, e.g. `B3` for row 2, col 1.
    pub fn label(self) -> String {
        format!("{}{}", column_letter(self.col), self.row.saturating_add(1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.row, self.col).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (row, col) = <(usize, usize)>::deserialize(deserializer)?;
        Ok(Self { row, col })
    }
}

// ---------------------------------------------------------------------------
// Percept sets
// ---------------------------------------------------------------------------

/// The set of percepts a cell exhibits.
///
/// A two-flag set rather than a list: percepts carry no duplicates and no
/// order that matters for logic, but display is fixed to breeze before
/// stench so rendered output stays deterministic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PerceptSet {
    /// A pit lies in the closed Moore neighborhood.
    pub breeze: bool,
    /// A wumpus lies in the closed Moore neighborhood.
    pub stench: bool,
}

impl PerceptSet {
    /// The empty percept set.
    pub const EMPTY: Self = Self {
        breeze: false,
        stench: false,
    };

    /// Whether no percept is present.
    pub const fn is_empty(self) -> bool {
        !self.breeze && !self.stench
    }

    /// Record the percept radiated by the given cell content, if any.
    pub const fn absorb(&mut self, content: CellContent) {
        match content {
            CellContent::Pit => self.breeze = true,
            CellContent::Wumpus => self.stench = true,
            CellContent::Empty | CellContent::Gold => {}
        }
    }

    /// The percepts as an ordered list (breeze before stench).
    pub fn to_vec(self) -> Vec<Percept> {
        let mut percepts = Vec::new();
        if self.breeze {
            percepts.push(Percept::Breeze);
        }
        if self.stench {
            percepts.push(Percept::Stench);
        }
        percepts
    }
}

impl fmt::Display for PerceptSet {
    /// Percepts joined with `+`, e.g. `breeze+stench`. Empty renders as
    /// nothing at all.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.breeze, self.stench) {
            (true, true) => write!(f, "breeze+stench"),
            (true, false) => write!(f, "breeze"),
            (false, true) => write!(f, "stench"),
            (false, false) => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell views
// ---------------------------------------------------------------------------

/// What one cell of the visible grid reveals.
///
/// This is the only information the deduction engine may see. Visited
/// hazard and gold cells show their ground truth; visited empty cells show
/// the percepts sensed there; everything else is [`CellView::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    /// Not yet visited; ground truth stays masked.
    Unknown,
    /// A visited pit cell.
    Pit,
    /// A visited wumpus cell.
    Wumpus,
    /// A visited gold cell.
    Gold,
    /// A visited empty cell with the percepts sensed there.
    Explored(PerceptSet),
}

impl CellView {
    /// A visited, percept-free empty cell. Clean cells are the strongest
    /// evidence the engine has: their whole neighborhood is hazard-free.
    pub fn is_clean(self) -> bool {
        match self {
            Self::Explored(percepts) => percepts.is_empty(),
            Self::Unknown | Self::Pit | Self::Wumpus | Self::Gold => false,
        }
    }

    /// A visited empty cell carrying at least one percept.
    pub fn has_percepts(self) -> bool {
        match self {
            Self::Explored(percepts) => !percepts.is_empty(),
            Self::Unknown | Self::Pit | Self::Wumpus | Self::Gold => false,
        }
    }

    /// A visited cell revealed to be a pit or the wumpus.
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Pit | Self::Wumpus)
    }

    /// Whether this cell has been visited at all.
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Pit => write!(f, "pit"),
            Self::Wumpus => write!(f, "wumpus"),
            Self::Gold => write!(f, "gold"),
            Self::Explored(percepts) if percepts.is_empty() => write!(f, "empty"),
            Self::Explored(percepts) => write!(f, "{percepts}"),
        }
    }
}

impl Serialize for CellView {
    /// Serializes as the display label, e.g. `"unknown"` or
    /// `"breeze+stench"`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when a cell-view label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellViewError(String);

impl fmt::Display for ParseCellViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized cell view label: {}", self.0)
    }
}

impl std::error::Error for ParseCellViewError {}

impl FromStr for CellView {
    type Err = ParseCellViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "pit" => Ok(Self::Pit),
            "wumpus" => Ok(Self::Wumpus),
            "gold" => Ok(Self::Gold),
            "empty" => Ok(Self::Explored(PerceptSet::EMPTY)),
            "breeze" => Ok(Self::Explored(PerceptSet {
                breeze: true,
                stench: false,
            })),
            "stench" => Ok(Self::Explored(PerceptSet {
                breeze: false,
                stench: true,
            })),
            "breeze+stench" => Ok(Self::Explored(PerceptSet {
                breeze: true,
                stench: true,
            })),
            other => Err(ParseCellViewError(other.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for CellView {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Visible grid
// ---------------------------------------------------------------------------

/// The visited-restricted N x N view of the world.
///
/// Row-major cells; serializes as a 2D array of display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleGrid {
    cells: Vec<Vec<CellView>>,
}

impl VisibleGrid {
    /// Create a fully-unknown grid of the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![CellView::Unknown; size]; size],
        }
    }

    /// Build a grid from row-major cells.
    ///
    /// Returns `None` unless every row has the same length as the row
    /// count (a square grid).
    pub fn from_cells(cells: Vec<Vec<CellView>>) -> Option<Self> {
        let size = cells.len();
        cells
            .iter()
            .all(|row| row.len() == size)
            .then_some(Self { cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The view at a position, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<CellView> {
        self.cells
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
    }

    /// Replace the view at a position.
    ///
    /// Out-of-bounds writes are ignored and reported as `false`.
    pub fn set(&mut self, pos: Position, view: CellView) -> bool {
        match self
            .cells
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
        {
            Some(cell) => {
                *cell = view;
                true
            }
            None => false,
        }
    }

    /// Row-major access to the raw cells.
    pub fn rows(&self) -> &[Vec<CellView>] {
        &self.cells
    }
}

impl Serialize for VisibleGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VisibleGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Vec<CellView>>::deserialize(deserializer)?;
        Self::from_cells(cells)
            .ok_or_else(|| serde::de::Error::custom("cell rows must form a square grid"))
    }
}
