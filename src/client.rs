//! The maze client controller.
//!
//! `MazeClient` owns the fetched maze and status, the layered cell grid and the
//! act loop timer. It performs no I/O itself: operations hand back a [`Ticket`]
//! naming the endpoint to call, and the driver reports the outcome through
//! [`MazeClient::handle`]. Every ticket carries the reset generation it was
//! issued in, so replies that arrive after a reset are dropped.

use crate::api::{Endpoint, Response};
use crate::config;
use crate::debug_client;
use crate::error::ClientError;
use crate::grid::{CellClass, Grid};
use crate::model::{GameStatus, Maze, Position};
use crate::surface::{Field, Surface};
use log::{info, warn};
use std::time::{Duration, Instant};

/// Lifecycle of one game as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Loading,
    Ready,
    Looping,
    Paused,
    Won,
}

/// A request handed to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub endpoint: Endpoint,
}

pub struct MazeClient {
    phase: Phase,
    maze: Option<Maze>,
    status: Option<GameStatus>,
    grid: Option<Grid>,
    previous_keeper: Option<Position>,
    previous_door: Option<Position>,
    generation: u64,
    in_flight: Option<Ticket>,
    interval: Duration,
    next_act: Option<Instant>,
    last_error: Option<ClientError>,
    acts_issued: u32,
    // Phase to return to if a pending reset fails
    resume_phase: Option<Phase>,
}

impl Default for MazeClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(config::ACT_INTERVAL_MS))
    }
}

impl MazeClient {
    pub fn new(interval: Duration) -> Self {
        MazeClient {
            phase: Phase::NotStarted,
            maze: None,
            status: None,
            grid: None,
            previous_keeper: None,
            previous_door: None,
            generation: 0,
            in_flight: None,
            interval,
            next_act: None,
            last_error: None,
            acts_issued: 0,
            resume_phase: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn status(&self) -> Option<&GameStatus> {
        self.status.as_ref()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    pub fn acts_issued(&self) -> u32 {
        self.acts_issued
    }

    pub fn is_looping(&self) -> bool {
        self.phase == Phase::Looping
    }

    fn dispatch(&mut self, endpoint: Endpoint) -> Ticket {
        let ticket = Ticket {
            generation: self.generation,
            endpoint,
        };
        debug_client!(self.generation, "dispatch {}", endpoint);
        self.in_flight = Some(ticket);
        ticket
    }

    /// Fetch the maze from scratch. Anything still in flight is abandoned.
    pub fn initialize(&mut self) -> Ticket {
        self.resume_phase = None;
        self.generation += 1;
        self.phase = Phase::Loading;
        self.dispatch(Endpoint::Maze)
    }

    /// Ask for a fresh status, unless no maze is loaded or a request is pending.
    pub fn fetch_status(&mut self) -> Option<Ticket> {
        if self.maze.is_none() || self.in_flight.is_some() {
            return None;
        }
        Some(self.dispatch(Endpoint::Status))
    }

    /// Ask the server to advance one step. Refused once the game is won, before
    /// the first status arrives and while another cycle is still resolving.
    pub fn act(&mut self) -> Option<Ticket> {
        let playable = matches!(self.phase, Phase::Ready | Phase::Looping | Phase::Paused);
        let complete = self.status.as_ref().is_none_or(|s| s.complete);
        if !playable || complete || self.in_flight.is_some() {
            return None;
        }
        self.acts_issued += 1;
        Some(self.dispatch(Endpoint::Act))
    }

    /// Stop the loop, clear the banners and ask the server for a new world.
    /// The current game stays loaded until the server confirms the reset.
    pub fn reset(&mut self, surface: &mut impl Surface) -> Ticket {
        self.stop_loop();
        surface.set_text(Field::Win, "");
        surface.set_text(Field::Error, "");
        self.last_error = None;
        if self.phase != Phase::Loading {
            self.resume_phase = Some(self.phase);
        }
        self.generation += 1;
        self.phase = Phase::Loading;
        info!("Requesting a new world");
        self.dispatch(Endpoint::Reset)
    }

    /// Arm the repeating act. Returns false when the loop was not started,
    /// including when it is already running.
    pub fn start_loop(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Ready | Phase::Paused => {
                self.phase = Phase::Looping;
                self.next_act = Some(now + self.interval);
                info!("Act loop started ({} ms period)", self.interval.as_millis());
                true
            }
            Phase::Looping => false,
            other => {
                warn!("Cannot start the act loop while {:?}", other);
                false
            }
        }
    }

    /// Cancel the timer. A cycle already in flight still resolves.
    pub fn stop_loop(&mut self) {
        self.next_act = None;
        if self.phase == Phase::Looping {
            self.phase = Phase::Paused;
            info!("Act loop stopped");
        }
    }

    /// Advance the loop timer to `now`, returning an act when one is due and
    /// the previous cycle has resolved. Ticks that find a cycle pending are skipped.
    pub fn tick(&mut self, now: Instant) -> Option<Ticket> {
        if self.phase != Phase::Looping {
            return None;
        }
        let due = self.next_act?;
        if now < due {
            return None;
        }
        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_act = Some(next);
        if self.in_flight.is_some() {
            debug_client!(self.generation, "tick skipped, cycle in flight");
            return None;
        }
        self.act()
    }

    /// Apply the outcome of `ticket` and return the follow-up request, if any.
    pub fn handle(
        &mut self,
        ticket: Ticket,
        result: Result<Response, ClientError>,
        surface: &mut impl Surface,
    ) -> Option<Ticket> {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            debug_client!(self.generation, "dropping stale reply from {}", ticket.endpoint);
            return None;
        }
        self.in_flight = None;
        let resume = match ticket.endpoint {
            Endpoint::Reset => self.resume_phase.take(),
            _ => None,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.fail(e, surface);
                self.resume(resume, surface);
                return None;
            }
        };

        match (ticket.endpoint, response) {
            (Endpoint::Maze, Response::Maze(maze)) => match maze.validate() {
                Ok(()) => {
                    self.load_maze(maze, surface);
                    self.fetch_status()
                }
                Err(reason) => {
                    self.fail(ClientError::malformed(Endpoint::Maze, reason), surface);
                    None
                }
            },
            (Endpoint::Status, Response::Status(status)) => {
                let checked = match &self.maze {
                    Some(maze) => status.validate(maze),
                    None => Err("status arrived before any maze".to_string()),
                };
                match checked {
                    Ok(()) => self.apply_status(status, surface),
                    Err(reason) => {
                        self.fail(ClientError::malformed(Endpoint::Status, reason), surface)
                    }
                }
                None
            }
            (Endpoint::Act, Response::Acted) => self.fetch_status(),
            (Endpoint::Reset, Response::ResetDone) => {
                self.maze = None;
                self.status = None;
                self.grid = None;
                self.previous_keeper = None;
                self.previous_door = None;
                Some(self.initialize())
            }
            (endpoint, response) => {
                let reason = format!("unexpected reply {:?}", response);
                self.fail(ClientError::malformed(endpoint, reason), surface);
                self.resume(resume, surface);
                None
            }
        }
    }

    /// Return to the game that was on screen before a reset that failed.
    /// A loop running at reset time was already paused by `reset`.
    fn resume(&mut self, phase: Option<Phase>, surface: &mut impl Surface) {
        match phase {
            Some(Phase::Won) => {
                self.phase = Phase::Won;
                self.on_win(surface);
            }
            Some(phase) => self.phase = phase,
            None => {}
        }
        if phase.is_some() {
            info!("Reset failed, keeping the current game ({:?})", self.phase);
        }
    }

    fn load_maze(&mut self, maze: Maze, surface: &mut impl Surface) {
        info!("Maze loaded: {}x{}", maze.width, maze.height);
        surface.mount_grid(&maze);
        self.grid = Some(Grid::from_maze(&maze));
        self.maze = Some(maze);
        self.status = None;
        self.previous_keeper = None;
        self.previous_door = None;
    }

    fn apply_status(&mut self, status: GameStatus, surface: &mut impl Surface) {
        if self.last_error.take().is_some() {
            surface.set_text(Field::Error, "");
        }
        self.status = Some(status);
        if self.phase == Phase::Loading {
            self.phase = Phase::Ready;
        }
        self.reconcile(surface);
    }

    fn fail(&mut self, error: ClientError, surface: &mut impl Surface) {
        warn!("{}", error);
        surface.set_text(Field::Error, &error.to_string());
        self.last_error = Some(error);
        self.stop_loop();
    }

    /// Map the current status onto the surface. Applying the same status twice
    /// leaves the surface unchanged.
    pub fn reconcile(&mut self, surface: &mut impl Surface) {
        let (Some(maze), Some(status), Some(grid)) = (&self.maze, &self.status, &mut self.grid)
        else {
            return;
        };

        surface.set_text(Field::MazeHeight, &maze.height.to_string());
        surface.set_text(Field::MazeWidth, &maze.width.to_string());
        surface.set_text(Field::NumberOfKeys, &status.keys.len().to_string());
        surface.set_text(Field::KeysFound, &status.found.len().to_string());
        surface.set_text(Field::PositionH, &status.keeper.horizontal.to_string());
        surface.set_text(Field::PositionV, &status.keeper.vertical.to_string());

        let mut touched = Vec::with_capacity(6);

        if let Some(cell) = grid.layers_mut(status.keeper) {
            cell.keeper = true;
        }
        touched.push(status.keeper);

        if let Some(old) = self.previous_keeper.filter(|p| *p != status.keeper) {
            if let Some(cell) = grid.layers_mut(old) {
                cell.keeper = false;
                cell.walked = true;
            }
            touched.push(old);
        }
        self.previous_keeper = Some(status.keeper);

        if let Some(old) = self.previous_door.filter(|p| *p != status.door) {
            if let Some(cell) = grid.layers_mut(old) {
                cell.door = false;
                cell.won = false;
            }
            touched.push(old);
        }
        if let Some(cell) = grid.layers_mut(status.door) {
            cell.door = true;
        }
        touched.push(status.door);
        self.previous_door = Some(status.door);

        for old in grid.key_positions() {
            if let Some(cell) = grid.layers_mut(old) {
                cell.key = false;
            }
            touched.push(old);
        }
        for key in status.pending_keys() {
            if let Some(cell) = grid.layers_mut(key) {
                cell.key = true;
            }
            touched.push(key);
        }

        for at in touched {
            if let Some(class) = grid.class_at(at) {
                surface.set_cell(at, &class);
            }
        }

        debug_client!(
            self.generation,
            "keeper at {}, {}/{} keys",
            status.keeper,
            status.found.len(),
            status.keys.len()
        );

        if status.complete {
            self.on_win(surface);
        }
    }

    /// Stop the loop, mark the door as won and show the banner.
    pub fn on_win(&mut self, surface: &mut impl Surface) {
        self.stop_loop();
        let Some(door) = self.status.as_ref().map(|s| s.door) else {
            return;
        };
        if let Some(cell) = self.grid.as_mut().and_then(|g| g.layers_mut(door)) {
            cell.won = true;
        }
        surface.set_cell(door, &CellClass::Won);
        surface.set_text(Field::Win, config::WIN_MESSAGE);
        if self.phase != Phase::Won {
            info!("Keeper escaped after {} acts", self.acts_issued);
            self.phase = Phase::Won;
        }
    }
}
