#![allow(dead_code)]

use keeper_maze::{ClientError, Endpoint, GameStatus, KeyRef, Maze, MazeApi, Position};
use std::cell::{Cell, RefCell};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

pub const MAZE_JSON: &str = r#"{"height":3,"width":4,"cells":[
    ["wall","wall","wall","wall"],
    ["path","path","path","wall"],
    ["wall","wall","path","wall"]]}"#;

pub fn maze_3x4() -> Maze {
    serde_json::from_str(MAZE_JSON).expect("fixture maze")
}

/// In-process server: the keeper walks a fixed route, picking up the key on the way.
pub struct ScriptedApi {
    route: Vec<Position>,
    step: Cell<usize>,
    fail_act_at: Option<usize>,
    fail_status_at: Option<usize>,
    pub resets: Cell<u32>,
    pub calls: RefCell<Vec<Endpoint>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        ScriptedApi {
            route: vec![
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
            ],
            step: Cell::new(0),
            fail_act_at: None,
            fail_status_at: None,
            resets: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_act_at(step: usize) -> Self {
        ScriptedApi {
            fail_act_at: Some(step),
            ..Self::new()
        }
    }

    pub fn failing_status_at(step: usize) -> Self {
        ScriptedApi {
            fail_status_at: Some(step),
            ..Self::new()
        }
    }

    pub fn door(&self) -> Position {
        *self.route.last().unwrap()
    }

    fn key() -> KeyRef {
        KeyRef::At(Position::new(1, 1))
    }
}

impl MazeApi for ScriptedApi {
    fn maze(&self) -> Result<Maze, ClientError> {
        self.calls.borrow_mut().push(Endpoint::Maze);
        Ok(maze_3x4())
    }

    fn status(&self) -> Result<GameStatus, ClientError> {
        self.calls.borrow_mut().push(Endpoint::Status);
        let step = self.step.get();
        if self.fail_status_at == Some(step) {
            return Err(ClientError::Network {
                endpoint: Endpoint::Status,
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(GameStatus {
            keeper: self.route[step],
            door: self.door(),
            keys: vec![Self::key()],
            found: if step >= 1 { vec![Self::key()] } else { vec![] },
            complete: step + 1 == self.route.len(),
        })
    }

    fn act(&self) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(Endpoint::Act);
        let step = self.step.get();
        if self.fail_act_at == Some(step) {
            return Err(ClientError::UnexpectedStatus {
                endpoint: Endpoint::Act,
                status: 500,
            });
        }
        self.step.set((step + 1).min(self.route.len() - 1));
        Ok(())
    }

    fn reset(&self) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(Endpoint::Reset);
        self.step.set(0);
        self.resets.set(self.resets.get() + 1);
        Ok(())
    }
}

/// Serve canned replies over HTTP. `route` maps a request path to (status, body).
/// Returns the base URL.
pub fn serve(route: fn(&str) -> (u16, String)) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain headers
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) if line == "\r\n" || line == "\n" => break,
                    Ok(_) => continue,
                    Err(_) => break,
                }
            }
            let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = route(&path);
            let reply = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(reply.as_bytes());
            let _ = stream.flush();
        }
    });
    format!("http://{}", addr)
}
