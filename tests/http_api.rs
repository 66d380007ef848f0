mod common;

use common::{MAZE_JSON, maze_3x4, serve};
use keeper_maze::session::Session;
use keeper_maze::{
    ClientError, Display, Endpoint, HttpMazeApi, KeyRef, MazeApi, MazeClient, Phase, Position,
};

const STATUS_JSON: &str = r#"{
 "keeper":{"horizontal":0,"vertical":1},
 "door":{"horizontal":2,"vertical":2},
 "keys":[{"horizontal":1,"vertical":1}],
 "found":[],
 "complete":false}"#;

fn game_server(path: &str) -> (u16, String) {
    match path {
        "/api/maze/" => (200, MAZE_JSON.to_string()),
        "/api/status/" => (200, STATUS_JSON.to_string()),
        "/api/act/" => (503, String::new()),
        "/api/reset/" => (200, String::new()),
        _ => (404, String::new()),
    }
}

fn broken_server(path: &str) -> (u16, String) {
    match path {
        "/api/maze/" => (200, "<html>not json</html>".to_string()),
        _ => (200, "{}".to_string()),
    }
}

#[test]
fn fetches_maze_and_status() {
    let api = HttpMazeApi::new(&serve(game_server), 2000).unwrap();

    assert_eq!(api.maze().unwrap(), maze_3x4());
    let status = api.status().unwrap();
    assert_eq!(status.keeper, Position::new(0, 1));
    assert_eq!(status.keys, vec![KeyRef::At(Position::new(1, 1))]);
    assert!(!status.complete);
    assert!(api.reset().is_ok());
}

#[test]
fn non_success_status_is_reported() {
    let api = HttpMazeApi::new(&serve(game_server), 2000).unwrap();
    assert_eq!(
        api.act(),
        Err(ClientError::UnexpectedStatus {
            endpoint: Endpoint::Act,
            status: 503
        })
    );
}

#[test]
fn undecodable_body_is_malformed() {
    let api = HttpMazeApi::new(&serve(broken_server), 2000).unwrap();
    assert!(matches!(
        api.maze(),
        Err(ClientError::MalformedResponse {
            endpoint: Endpoint::Maze,
            ..
        })
    ));
    // Missing fields are malformed too
    assert!(matches!(
        api.status(),
        Err(ClientError::MalformedResponse {
            endpoint: Endpoint::Status,
            ..
        })
    ));
}

#[test]
fn session_over_http_loads_then_pauses_on_act_failure() {
    let api = HttpMazeApi::new(&serve(game_server), 2000).unwrap();
    let session = Session::new(api);
    let mut client = MazeClient::new(std::time::Duration::ZERO);
    let mut display = Display::new();

    session.load(&mut client, &mut display).unwrap();
    assert_eq!(client.phase(), Phase::Ready);
    assert_eq!(display.dimensions(), (4, 3));

    let outcome = session.play(&mut client, &mut display, 10, |_, _| {});
    assert_eq!(outcome.acts, 1);
    assert_eq!(outcome.phase, Phase::Paused);
    assert!(matches!(
        outcome.error,
        Some(ClientError::UnexpectedStatus { status: 503, .. })
    ));
}

#[test]
fn load_fails_cleanly_on_a_broken_server() {
    let api = HttpMazeApi::new(&serve(broken_server), 2000).unwrap();
    let session = Session::new(api);
    let mut client = MazeClient::default();
    let mut display = Display::new();

    let err = session.load(&mut client, &mut display).unwrap_err();
    assert_eq!(err.endpoint(), Endpoint::Maze);
    assert!(client.maze().is_none());
    assert_eq!(display.dimensions(), (0, 0));
}
