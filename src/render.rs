use crate::client::Phase;
use crate::config::{CELL_GAP, GRID_HEIGHT, GRID_MARGIN, GRID_WIDTH, UI_PANEL_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::grid::CellClass;
use crate::surface::{Display, Field};
use macroquad::prelude::*;

/// Placement of the maze inside the grid area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub cell_size: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl GridLayout {
    /// Largest square cells that fit `width` x `height` cells into the grid area, centered
    pub fn fit(width: usize, height: usize) -> Self {
        let avail_w = GRID_WIDTH as f32 - 2.0 * GRID_MARGIN;
        let avail_h = GRID_HEIGHT as f32 - 2.0 * GRID_MARGIN;
        let cols = width.max(1) as f32;
        let rows = height.max(1) as f32;
        let cell_size = (avail_w / cols).min(avail_h / rows);
        GridLayout {
            cell_size,
            origin_x: GRID_MARGIN + (avail_w - cell_size * cols) / 2.0,
            origin_y: GRID_MARGIN + (avail_h - cell_size * rows) / 2.0,
        }
    }

    pub fn cell_origin(&self, horizontal: usize, vertical: usize) -> (f32, f32) {
        (
            self.origin_x + horizontal as f32 * self.cell_size,
            self.origin_y + vertical as f32 * self.cell_size,
        )
    }
}

fn cell_color(class: &CellClass) -> Color {
    match class {
        CellClass::Wall => Color::from_rgba(40, 40, 60, 255),
        CellClass::Path => Color::from_rgba(200, 200, 210, 255),
        CellClass::Key => GOLD,
        CellClass::Keeper => Color::from_rgba(30, 144, 255, 255),
        CellClass::Door => Color::from_rgba(139, 69, 19, 255),
        CellClass::Won => Color::from_rgba(50, 205, 50, 255),
        CellClass::Other(_) => Color::from_rgba(120, 120, 120, 255),
    }
}

// Handles drawing the display surface using macroquad
pub struct Renderer {
    layout: Option<(usize, usize, GridLayout)>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { layout: None }
    }

    fn layout_for(&mut self, width: usize, height: usize) -> GridLayout {
        match self.layout {
            Some((w, h, layout)) if w == width && h == height => layout,
            _ => {
                let layout = GridLayout::fit(width, height);
                crate::debug_render!("layout for {}x{}: cell {:.1}px", width, height, layout.cell_size);
                self.layout = Some((width, height, layout));
                layout
            }
        }
    }

    pub fn draw_frame(&mut self, display: &Display, phase: Phase, acts: u32) {
        clear_background(BLACK);

        let (width, height) = display.dimensions();
        if width > 0 && height > 0 {
            let layout = self.layout_for(width, height);
            Self::draw_cells(display, &layout);
        } else {
            let msg = "Waiting for the maze...";
            let dims = measure_text(msg, None, 24, 1.0);
            draw_text(msg, (GRID_WIDTH as f32 - dims.width) / 2.0, GRID_HEIGHT as f32 / 2.0, 24.0, LIGHTGRAY);
        }

        self.draw_ui_panel(display, phase, acts);

        let banner = display.text(Field::Win);
        if !banner.is_empty() {
            self.draw_announcement(banner);
        }
    }

    fn draw_cells(display: &Display, layout: &GridLayout) {
        let size = (layout.cell_size - CELL_GAP).max(1.0);
        for (at, class) in display.cells() {
            let (x, y) = layout.cell_origin(at.horizontal, at.vertical);
            draw_rectangle(x, y, size, size, cell_color(class));
        }
    }

    fn draw_ui_panel(&self, display: &Display, phase: Phase, acts: u32) {
        let panel_x = GRID_WIDTH as f32;
        let panel_width = UI_PANEL_WIDTH as f32;
        let padding = 12.0;
        let line_height = 22.0;
        let mut y = 32.0;

        // Panel background (Dark Indigo)
        draw_rectangle(panel_x, 0.0, panel_width, WINDOW_HEIGHT as f32, Color::from_rgba(20, 20, 50, 255));

        // Faint grid pattern
        let grid_spacing = 20.0;
        let grid_color = Color::from_rgba(40, 40, 90, 80);
        let mut grid_x = panel_x + grid_spacing;
        while grid_x < WINDOW_WIDTH as f32 {
            draw_line(grid_x, 0.0, grid_x, WINDOW_HEIGHT as f32, 1.0, grid_color);
            grid_x += grid_spacing;
        }
        let mut grid_y = grid_spacing;
        while grid_y < WINDOW_HEIGHT as f32 {
            draw_line(panel_x, grid_y, WINDOW_WIDTH as f32, grid_y, 1.0, grid_color);
            grid_y += grid_spacing;
        }

        draw_text("KEEPER MAZE", panel_x + padding, y, 26.0, GOLD);
        y += line_height * 1.5;

        let rows = [
            ("Maze", format!("{} x {}", display.text(Field::MazeWidth), display.text(Field::MazeHeight))),
            ("Keys", format!("{} / {}", display.text(Field::KeysFound), display.text(Field::NumberOfKeys))),
            ("Keeper", format!("({}, {})", display.text(Field::PositionH), display.text(Field::PositionV))),
            ("Phase", format!("{:?}", phase)),
            ("Acts", acts.to_string()),
        ];
        for (label, value) in rows.iter() {
            draw_text(label, panel_x + padding, y, 18.0, LIGHTGRAY);
            draw_text(value, panel_x + padding + 70.0, y, 18.0, WHITE);
            y += line_height;
        }

        y += line_height;
        for hint in ["SPACE  start / stop", "A      single act", "S      refresh status", "R      new world", "ESC    quit"] {
            draw_text(hint, panel_x + padding, y, 16.0, GRAY);
            y += line_height * 0.8;
        }

        let error = display.text(Field::Error);
        if !error.is_empty() {
            y += line_height;
            draw_text("Error", panel_x + padding, y, 18.0, RED);
            y += line_height;
            // Wrap on word boundaries to fit the panel
            let mut line = String::new();
            for word in error.split_whitespace() {
                if line.len() + word.len() > 24 && !line.is_empty() {
                    draw_text(&line, panel_x + padding, y, 14.0, PINK);
                    y += line_height * 0.7;
                    line.clear();
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
            }
            if !line.is_empty() {
                draw_text(&line, panel_x + padding, y, 14.0, PINK);
            }
        }
    }

    fn draw_announcement(&self, msg: &str) {
        let rect_width = 500.0;
        let rect_height = 120.0;
        let x = (WINDOW_WIDTH as f32 / 2.0) - (rect_width / 2.0);
        let y = (WINDOW_HEIGHT as f32 / 2.0) - (rect_height / 2.0);
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let font_size = 32.0;
        let text_dims = measure_text(msg, None, font_size as u16, 1.0);
        let text_x = x + (rect_width - text_dims.width) / 2.0;
        let text_y = y + (rect_height - font_size) / 2.0 + font_size * 0.7;
        draw_text(msg, text_x, text_y, font_size, WHITE);

        let hint = "Press R for a new world, ESC to exit";
        let hint_size = 18.0;
        let hint_dims = measure_text(hint, None, hint_size as u16, 1.0);
        let hint_x = x + (rect_width - hint_dims.width) / 2.0;
        draw_text(hint, hint_x, y + rect_height - hint_size, hint_size, LIGHTGRAY);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }

    pub fn is_key_pressed(key: KeyCode) -> bool {
        is_key_pressed(key)
    }
}
