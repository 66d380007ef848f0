//! The maze server API: endpoints, the `MazeApi` seam and its HTTP implementation.

use crate::config;
use crate::debug_api;
use crate::error::ClientError;
use crate::model::{GameStatus, Maze};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// The four GET endpoints of the game server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Maze,
    Status,
    Act,
    Reset,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Maze => config::MAZE_PATH,
            Endpoint::Status => config::STATUS_PATH,
            Endpoint::Act => config::ACT_PATH,
            Endpoint::Reset => config::RESET_PATH,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Decoded reply of a successful call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Maze(Maze),
    Status(GameStatus),
    Acted,
    ResetDone,
}

pub trait MazeApi {
    fn maze(&self) -> Result<Maze, ClientError>;
    fn status(&self) -> Result<GameStatus, ClientError>;
    fn act(&self) -> Result<(), ClientError>;
    fn reset(&self) -> Result<(), ClientError>;

    /// Call `endpoint` and wrap the reply
    fn call(&self, endpoint: Endpoint) -> Result<Response, ClientError> {
        match endpoint {
            Endpoint::Maze => self.maze().map(Response::Maze),
            Endpoint::Status => self.status().map(Response::Status),
            Endpoint::Act => self.act().map(|()| Response::Acted),
            Endpoint::Reset => self.reset().map(|()| Response::ResetDone),
        }
    }
}

/// Blocking HTTP client for a maze server rooted at `base_url`
pub struct HttpMazeApi {
    client: Client,
    base_url: String,
}

impl HttpMazeApi {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ClientError::Network {
                endpoint: Endpoint::Maze,
                message: e.to_string(),
            })?;
        Ok(HttpMazeApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn get(&self, endpoint: Endpoint) -> Result<reqwest::blocking::Response, ClientError> {
        let url = self.url(endpoint);
        debug_api!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ClientError::Network {
                endpoint,
                message: e.to_string(),
            })?;
        let status = response.status();
        debug_api!("{} -> {}", endpoint, status.as_u16());
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ClientError> {
        self.get(endpoint)?.json::<T>().map_err(|e| {
            if e.is_decode() {
                ClientError::malformed(endpoint, e.to_string())
            } else {
                ClientError::Network {
                    endpoint,
                    message: e.to_string(),
                }
            }
        })
    }
}

impl MazeApi for HttpMazeApi {
    fn maze(&self) -> Result<Maze, ClientError> {
        self.get_json(Endpoint::Maze)
    }

    fn status(&self) -> Result<GameStatus, ClientError> {
        self.get_json(Endpoint::Status)
    }

    fn act(&self) -> Result<(), ClientError> {
        self.get(Endpoint::Act).map(|_| ())
    }

    fn reset(&self) -> Result<(), ClientError> {
        self.get(Endpoint::Reset).map(|_| ())
    }
}
