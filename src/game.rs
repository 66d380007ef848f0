use crate::api::MazeApi;
use crate::client::{MazeClient, Phase, Ticket};
use crate::render::Renderer;
use crate::surface::Display;
use crate::worker::Worker;
use log::{error, info};
use macroquad::prelude::{KeyCode, next_frame};
use std::time::{Duration, Instant};

/// The windowed front end: one client, its display and the request worker
pub struct Game {
    pub client: MazeClient,
    pub display: Display,
    worker: Worker,
}

impl Game {
    pub fn new<A: MazeApi + Send + 'static>(api: A, interval: Duration) -> Self {
        Game {
            client: MazeClient::new(interval),
            display: Display::new(),
            worker: Worker::spawn(api),
        }
    }

    fn submit(&self, ticket: Option<Ticket>) {
        if let Some(ticket) = ticket {
            if !self.worker.submit(ticket) {
                error!("Request worker is gone, dropping {}", ticket.endpoint);
            }
        }
    }

    /// Apply completed requests and queue their follow-ups
    fn pump(&mut self) {
        for (ticket, result) in self.worker.poll() {
            let next = self.client.handle(ticket, result, &mut self.display);
            self.submit(next);
        }
    }

    fn handle_input(&mut self, now: Instant) {
        if Renderer::is_key_pressed(KeyCode::Space) {
            if self.client.is_looping() {
                self.client.stop_loop();
            } else {
                self.client.start_loop(now);
            }
        }
        if Renderer::is_key_pressed(KeyCode::A) {
            let ticket = self.client.act();
            self.submit(ticket);
        }
        if Renderer::is_key_pressed(KeyCode::S) {
            let ticket = self.client.fetch_status();
            self.submit(ticket);
        }
        if Renderer::is_key_pressed(KeyCode::R) {
            let ticket = self.client.reset(&mut self.display);
            self.submit(Some(ticket));
        }
    }

    /// Run the main loop using the provided renderer
    pub async fn run(&mut self, renderer: &mut Renderer, autostart: bool) {
        info!("Starting main loop...");
        let ticket = self.client.initialize();
        self.submit(Some(ticket));
        let mut start_pending = autostart;

        while !Renderer::window_should_close() {
            let now = Instant::now();
            self.pump();

            if start_pending && self.client.phase() == Phase::Ready {
                start_pending = !self.client.start_loop(now);
            }
            self.handle_input(now);

            let ticket = self.client.tick(now);
            self.submit(ticket);

            renderer.draw_frame(&self.display, self.client.phase(), self.client.acts_issued());
            next_frame().await;
        }
        info!("Exiting Keeper Maze.");
    }
}
