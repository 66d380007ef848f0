//! Client for the keeper maze game server: fetches the maze and game status,
//! renders the grid and drives the act loop until the keeper escapes.

pub mod api;
pub mod assets;
pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod logging;
pub mod model;
pub mod page;
pub mod render;
pub mod session;
pub mod surface;
pub mod worker;

pub use api::{Endpoint, HttpMazeApi, MazeApi, Response};
pub use client::{MazeClient, Phase, Ticket};
pub use error::ClientError;
pub use model::{GameStatus, KeyRef, Maze, Position};
pub use surface::{Display, Field, Surface};
