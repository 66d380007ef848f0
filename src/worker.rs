//! Background request thread for the windowed front end. Blocking HTTP calls run
//! off the render thread; completions are collected once per frame.

use crate::api::{MazeApi, Response};
use crate::client::Ticket;
use crate::error::ClientError;
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

pub type Completion = (Ticket, Result<Response, ClientError>);

pub struct Worker {
    to_worker: Option<Sender<Ticket>>,
    from_worker: Receiver<Completion>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn<A: MazeApi + Send + 'static>(api: A) -> Self {
        let (to_worker, worker_from_main) = mpsc::channel::<Ticket>();
        let (worker_to_main, from_worker) = mpsc::channel::<Completion>();
        let handle = thread::spawn(move || {
            for ticket in worker_from_main {
                let result = api.call(ticket.endpoint);
                if worker_to_main.send((ticket, result)).is_err() {
                    break;
                }
            }
            debug!(target: "api", "request worker exiting");
        });
        Worker {
            to_worker: Some(to_worker),
            from_worker,
            handle: Some(handle),
        }
    }

    /// Queue a request. Returns false if the worker thread is gone.
    pub fn submit(&self, ticket: Ticket) -> bool {
        match &self.to_worker {
            Some(sender) => sender.send(ticket).is_ok(),
            None => false,
        }
    }

    /// Completions that arrived since the last poll, in completion order
    pub fn poll(&self) -> Vec<Completion> {
        self.from_worker.try_iter().collect()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.to_worker.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("request worker panicked");
            }
        }
    }
}
