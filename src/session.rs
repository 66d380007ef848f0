//! Synchronous driver: every request is executed as soon as the client asks for it.

use crate::api::MazeApi;
use crate::client::{MazeClient, Phase, Ticket};
use crate::error::ClientError;
use crate::surface::Surface;
use log::info;
use std::thread;
use std::time::{Duration, Instant};

// Granularity of timer checks between acts
const IDLE_POLL: Duration = Duration::from_millis(1);

/// How a headless run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub phase: Phase,
    pub acts: u32,
    pub error: Option<ClientError>,
}

pub struct Session<A: MazeApi> {
    api: A,
}

impl<A: MazeApi> Session<A> {
    pub fn new(api: A) -> Self {
        Session { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Execute `first` and every follow-up request it leads to. Returns the
    /// number of calls made.
    pub fn drive(
        &self,
        client: &mut MazeClient,
        surface: &mut impl Surface,
        first: Option<Ticket>,
    ) -> usize {
        let mut calls = 0;
        let mut next = first;
        while let Some(ticket) = next {
            let result = self.api.call(ticket.endpoint);
            calls += 1;
            next = client.handle(ticket, result, surface);
        }
        calls
    }

    /// Load the game and bring the client to `Ready`.
    pub fn load(&self, client: &mut MazeClient, surface: &mut impl Surface) -> Result<(), ClientError> {
        let ticket = client.initialize();
        self.drive(client, surface, Some(ticket));
        match client.last_error() {
            Some(e) if client.phase() != Phase::Ready => Err(e.clone()),
            _ => Ok(()),
        }
    }

    /// Run the act loop until the keeper escapes, an error pauses the loop or
    /// `max_steps` acts have been issued. `on_step` sees the surface after
    /// every completed cycle.
    pub fn play<S: Surface>(
        &self,
        client: &mut MazeClient,
        surface: &mut S,
        max_steps: u32,
        mut on_step: impl FnMut(&MazeClient, &S),
    ) -> PlayOutcome {
        if client.phase() == Phase::Ready || client.phase() == Phase::Paused {
            client.start_loop(Instant::now());
        }
        while client.is_looping() && client.acts_issued() < max_steps {
            match client.tick(Instant::now()) {
                Some(ticket) => {
                    self.drive(client, surface, Some(ticket));
                    on_step(client, surface);
                }
                None => thread::sleep(IDLE_POLL),
            }
        }
        client.stop_loop();
        info!(
            "Run finished in phase {:?} after {} acts",
            client.phase(),
            client.acts_issued()
        );
        PlayOutcome {
            phase: client.phase(),
            acts: client.acts_issued(),
            error: client.last_error().cloned(),
        }
    }
}
