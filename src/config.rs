//! Configuration constants for the maze client.

// Server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const MAZE_PATH: &str = "/api/maze/";
pub const STATUS_PATH: &str = "/api/status/";
pub const ACT_PATH: &str = "/api/act/";
pub const RESET_PATH: &str = "/api/reset/";
pub const DEFAULT_TIMEOUT_MS: u64 = 2000; // Per-request HTTP timeout

// Act loop
pub const ACT_INTERVAL_MS: u64 = 50; // Period of the repeating act
pub const DEFAULT_MAX_STEPS: u32 = 10_000; // Headless runs stop after this many acts

// Display
pub const WIN_MESSAGE: &str = "You escaped!";

// Rendering configuration
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 800;
pub const UI_PANEL_WIDTH: i32 = 220; // Width of the side panel
pub const GRID_WIDTH: i32 = WINDOW_WIDTH - UI_PANEL_WIDTH; // Width for the maze rendering
pub const GRID_HEIGHT: i32 = WINDOW_HEIGHT;
pub const GRID_MARGIN: f32 = 16.0; // Empty border around the maze
pub const CELL_GAP: f32 = 1.0; // Gap between neighbouring cells
