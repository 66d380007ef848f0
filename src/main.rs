use clap::Parser;
use keeper_maze::api::HttpMazeApi;
use keeper_maze::client::{MazeClient, Phase};
use keeper_maze::config::{self, GRID_WIDTH, UI_PANEL_WIDTH, WINDOW_HEIGHT};
use keeper_maze::game::Game;
use keeper_maze::logging;
use keeper_maze::page;
use keeper_maze::render::Renderer;
use keeper_maze::session::Session;
use keeper_maze::surface::Display;
use log::{error, info};
use macroquad::prelude::Conf;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Client for the keeper maze game server", long_about = None)]
struct Args {
    /// Base URL of the maze server
    #[arg(long, default_value = config::DEFAULT_SERVER_URL)]
    server: String,

    /// Milliseconds between two acts of the loop
    #[arg(long, default_value_t = config::ACT_INTERVAL_MS)]
    interval_ms: u64,

    /// Per-request HTTP timeout in milliseconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Run without a window, printing the board to stdout
    #[arg(long)]
    headless: bool,

    /// Start the act loop as soon as the maze is loaded (always on when headless)
    #[arg(long)]
    autostart: bool,

    /// Headless only: stop after this many acts
    #[arg(long, default_value_t = config::DEFAULT_MAX_STEPS)]
    max_steps: u32,

    /// Headless only: print the board every N acts (0 prints only the final board)
    #[arg(long, default_value_t = 0)]
    print_every: u32,

    /// Headless only: write an HTML snapshot of the final board to this file
    #[arg(long)]
    export_html: Option<PathBuf>,

    /// Debug filter to specify log topics (e.g., "api,client,render")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Keeper Maze".to_owned(),
        window_width: GRID_WIDTH + UI_PANEL_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

fn run_headless(args: &Args, api: HttpMazeApi) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(api);
    let mut client = MazeClient::new(Duration::from_millis(args.interval_ms));
    let mut display = Display::new();

    session.load(&mut client, &mut display)?;
    info!("Maze ready, starting the act loop");

    let print_every = args.print_every;
    let outcome = session.play(&mut client, &mut display, args.max_steps, |client, display| {
        if print_every > 0 && client.acts_issued() % print_every == 0 {
            println!("{}\n", display.to_text());
        }
    });
    println!("{}", display.to_text());

    if let Some(path) = &args.export_html {
        page::export_page(&display, path)?;
        info!("Snapshot written to {}", path.display());
    }

    match outcome.phase {
        Phase::Won => Ok(()),
        _ => match outcome.error {
            Some(e) => Err(e.into()),
            None => {
                info!("Stopped after {} acts without escaping", outcome.acts);
                Ok(())
            }
        },
    }
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logger with debug filters if provided
    let log_level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Keeper Maze against {}", args.server);
    let api = match HttpMazeApi::new(&args.server, args.timeout_ms) {
        Ok(api) => api,
        Err(e) => {
            error!("Could not create HTTP client: {}", e);
            process::exit(1);
        }
    };

    if args.headless {
        if let Err(e) = run_headless(&args, api) {
            error!("{}", e);
            process::exit(1);
        }
        return;
    }

    let interval = Duration::from_millis(args.interval_ms);
    let autostart = args.autostart;
    macroquad::Window::from_config(window_conf(), async move {
        let mut game = Game::new(api, interval);
        let mut renderer = Renderer::new();
        info!("Renderer initialized.");
        game.run(&mut renderer, autostart).await;
    });
}
