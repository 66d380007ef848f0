//! Cell states of the displayed maze and the markup the grid is mounted from.

use crate::model::{Maze, Position};
use std::iter::Enumerate;
use std::slice;

/// Visual state of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellClass {
    Wall,
    Path,
    Key,
    Keeper,
    Door,
    Won,
    /// A label this client has no special handling for
    Other(String),
}

impl CellClass {
    pub fn from_label(label: &str) -> Self {
        match label {
            "wall" => CellClass::Wall,
            "path" => CellClass::Path,
            "key" => CellClass::Key,
            "keeper" => CellClass::Keeper,
            "door" => CellClass::Door,
            "won" => CellClass::Won,
            other => CellClass::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CellClass::Wall => "wall",
            CellClass::Path => "path",
            CellClass::Key => "key",
            CellClass::Keeper => "keeper",
            CellClass::Door => "door",
            CellClass::Won => "won",
            CellClass::Other(label) => label,
        }
    }

    /// Full class attribute value, e.g. `mazebrick keeper`
    pub fn css(&self) -> String {
        format!("mazebrick {}", self.name())
    }
}

/// Everything that currently sits on one cell. The displayed class is the
/// highest of: won > door > keeper > key > walked path > maze label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLayers {
    pub base: CellClass,
    pub walked: bool,
    pub key: bool,
    pub keeper: bool,
    pub door: bool,
    pub won: bool,
}

impl CellLayers {
    fn new(base: CellClass) -> Self {
        CellLayers {
            base,
            walked: false,
            key: false,
            keeper: false,
            door: false,
            won: false,
        }
    }

    pub fn resolve(&self) -> CellClass {
        if self.won {
            CellClass::Won
        } else if self.door {
            CellClass::Door
        } else if self.keeper {
            CellClass::Keeper
        } else if self.key {
            CellClass::Key
        } else if self.walked {
            CellClass::Path
        } else {
            self.base.clone()
        }
    }
}

/// Layered cell model for one maze, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<CellLayers>,
}

impl Grid {
    pub fn from_maze(maze: &Maze) -> Self {
        let cells = maze
            .cells
            .iter()
            .flat_map(|row| row.iter().map(|label| CellLayers::new(CellClass::from_label(label))))
            .collect();
        Grid {
            width: maze.width,
            height: maze.height,
            cells,
        }
    }

    fn index(&self, at: Position) -> Option<usize> {
        (at.horizontal < self.width && at.vertical < self.height)
            .then(|| at.vertical * self.width + at.horizontal)
    }

    pub fn layers(&self, at: Position) -> Option<&CellLayers> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn layers_mut(&mut self, at: Position) -> Option<&mut CellLayers> {
        self.index(at).map(move |i| &mut self.cells[i])
    }

    pub fn class_at(&self, at: Position) -> Option<CellClass> {
        self.layers(at).map(CellLayers::resolve)
    }

    /// Positions whose key layer is currently set
    pub fn key_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.key)
            .map(|(i, _)| Position::new(i % self.width, i / self.width))
            .collect()
    }
}

/// One-shot traversal of a maze producing the markup of one row per item.
pub struct GridMarkup<'a> {
    rows: Enumerate<slice::Iter<'a, Vec<String>>>,
}

impl<'a> GridMarkup<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        GridMarkup {
            rows: maze.cells.iter().enumerate(),
        }
    }
}

impl Iterator for GridMarkup<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (v, row) = self.rows.next()?;
        let mut html = String::from("<div class=\"mazerow\">");
        for (h, label) in row.iter().enumerate() {
            html.push_str(&format!(
                "<div id=\"{}\" class=\"mazebrick {}\"></div>",
                Position::new(h, v).cell_id(),
                escape_attr(label)
            ));
        }
        html.push_str("</div>");
        Some(html)
    }
}

/// Markup for the whole grid. Rebuilt from scratch on every call.
pub fn render_grid(maze: &Maze) -> String {
    GridMarkup::new(maze).collect()
}

pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
