//! Wire types served by the maze API and the invariants they must satisfy.

use serde::Deserialize;
use std::fmt;

/// A grid coordinate: `horizontal` is the column, `vertical` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Position {
    pub horizontal: usize,
    pub vertical: usize,
}

impl Position {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Position {
            horizontal,
            vertical,
        }
    }

    /// Element id of the cell at this position, e.g. `h3v7`
    pub fn cell_id(&self) -> String {
        format!("h{}v{}", self.horizontal, self.vertical)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.horizontal, self.vertical)
    }
}

/// Static layout of one game instance. `cells[vertical][horizontal]` holds a cell label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Maze {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<Vec<String>>,
}

impl Maze {
    /// Check that the declared dimensions match the cell rows.
    pub fn validate(&self) -> Result<(), String> {
        if self.height == 0 || self.width == 0 {
            return Err(format!("empty maze {}x{}", self.width, self.height));
        }
        if self.cells.len() != self.height {
            return Err(format!(
                "maze declares height {} but has {} rows",
                self.height,
                self.cells.len()
            ));
        }
        if let Some((v, row)) = self
            .cells
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.width)
        {
            return Err(format!(
                "row {} has {} cells, expected width {}",
                v,
                row.len(),
                self.width
            ));
        }
        Ok(())
    }

    pub fn contains(&self, position: Position) -> bool {
        position.horizontal < self.width && position.vertical < self.height
    }
}

/// A key as reported by the server: a grid position, a name, or any other
/// identifier (numeric ids and the like), kept verbatim for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeyRef {
    At(Position),
    Named(String),
    Other(serde_json::Value),
}

impl KeyRef {
    pub fn position(&self) -> Option<Position> {
        match self {
            KeyRef::At(position) => Some(*position),
            KeyRef::Named(_) | KeyRef::Other(_) => None,
        }
    }
}

/// Snapshot of the game returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameStatus {
    pub keeper: Position,
    pub door: Position,
    pub keys: Vec<KeyRef>,
    pub found: Vec<KeyRef>,
    pub complete: bool,
}

impl GameStatus {
    /// Check positions against the maze bounds and that every found key is a known key.
    pub fn validate(&self, maze: &Maze) -> Result<(), String> {
        if !maze.contains(self.keeper) {
            return Err(format!("keeper {} outside the maze", self.keeper));
        }
        if !maze.contains(self.door) {
            return Err(format!("door {} outside the maze", self.door));
        }
        if let Some(stray) = self.found.iter().find(|key| !self.keys.contains(key)) {
            return Err(format!("found key {:?} is not one of the maze keys", stray));
        }
        if let Some(key) = self
            .keys
            .iter()
            .filter_map(KeyRef::position)
            .find(|position| !maze.contains(*position))
        {
            return Err(format!("key {} outside the maze", key));
        }
        Ok(())
    }

    /// Positioned keys that have not been collected yet
    pub fn pending_keys(&self) -> impl Iterator<Item = Position> + '_ {
        self.keys
            .iter()
            .filter(|key| !self.found.contains(key))
            .filter_map(KeyRef::position)
    }
}
