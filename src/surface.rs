//! The display surface the client writes into, and an in-memory implementation
//! shared by the window renderer, the headless mode and the HTML export.

use crate::grid::{CellClass, render_grid};
use crate::model::{Maze, Position};
use log::warn;
use std::collections::HashMap;

/// Text regions of the display, addressed by element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MazeHeight,
    MazeWidth,
    NumberOfKeys,
    KeysFound,
    PositionH,
    PositionV,
    Win,
    Error,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::MazeHeight,
        Field::MazeWidth,
        Field::NumberOfKeys,
        Field::KeysFound,
        Field::PositionH,
        Field::PositionV,
        Field::Win,
        Field::Error,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Field::MazeHeight => "mazeHeight",
            Field::MazeWidth => "mazeWidth",
            Field::NumberOfKeys => "numberOfKeys",
            Field::KeysFound => "keysFound",
            Field::PositionH => "positionH",
            Field::PositionV => "positionV",
            Field::Win => "win",
            Field::Error => "error",
        }
    }
}

/// Pre-existing regions the client updates. The client never creates regions
/// other than the grid it mounts.
pub trait Surface {
    /// Replace the grid region with the markup of `maze`
    fn mount_grid(&mut self, maze: &Maze);
    fn set_text(&mut self, field: Field, text: &str);
    fn set_cell(&mut self, at: Position, class: &CellClass);
}

#[derive(Debug, Default, Clone)]
pub struct Display {
    fields: HashMap<Field, String>,
    markup: String,
    width: usize,
    height: usize,
    cells: Vec<CellClass>,
}

impl Display {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn text(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cell(&self, at: Position) -> Option<&CellClass> {
        if at.horizontal >= self.width || at.vertical >= self.height {
            return None;
        }
        self.cells.get(at.vertical * self.width + at.horizontal)
    }

    /// Row-major iteration over every mounted cell
    pub fn cells(&self) -> impl Iterator<Item = (Position, &CellClass)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, class)| (Position::new(i % width, i / width), class))
    }

    pub fn count(&self, class: &CellClass) -> usize {
        self.cells.iter().filter(|c| *c == class).count()
    }

    /// Plain-text picture of the grid followed by the status line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(cell_glyph));
            out.push('\n');
        }
        out.push_str(&format!(
            "maze {}x{}  keys {}/{}  keeper ({}, {})",
            self.text(Field::MazeWidth),
            self.text(Field::MazeHeight),
            self.text(Field::KeysFound),
            self.text(Field::NumberOfKeys),
            self.text(Field::PositionH),
            self.text(Field::PositionV),
        ));
        for field in [Field::Win, Field::Error] {
            if !self.text(field).is_empty() {
                out.push_str(&format!("\n{}", self.text(field)));
            }
        }
        out
    }
}

fn cell_glyph(class: &CellClass) -> char {
    match class {
        CellClass::Wall => '#',
        CellClass::Path => ' ',
        CellClass::Key => 'k',
        CellClass::Keeper => '@',
        CellClass::Door => 'D',
        CellClass::Won => '*',
        CellClass::Other(_) => '?',
    }
}

impl Surface for Display {
    fn mount_grid(&mut self, maze: &Maze) {
        self.markup = render_grid(maze);
        self.width = maze.width;
        self.height = maze.height;
        self.cells = maze
            .cells
            .iter()
            .flat_map(|row| row.iter().map(|label| CellClass::from_label(label)))
            .collect();
    }

    fn set_text(&mut self, field: Field, text: &str) {
        self.fields.insert(field, text.to_string());
    }

    fn set_cell(&mut self, at: Position, class: &CellClass) {
        if at.horizontal >= self.width || at.vertical >= self.height {
            warn!("no cell {} on the display", at.cell_id());
            return;
        }
        self.cells[at.vertical * self.width + at.horizontal] = class.clone();
    }
}
