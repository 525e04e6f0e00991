mod backend;
mod ui;

use backend::pokeapi::{self, ARTWORK_BASE_URL, GENERATION_COUNT};
use backend::preloader::{HttpImageLoader, PreloadTick, Preloader};
use backend::queue::PreloadItem;
use ui::ui::{ui, App};

use crossterm::{
    event::{Event, EventStream, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{env, error::Error, io};
use tokio::sync::mpsc;

enum BackgroundTask {
    RosterLoaded {
        generation: u32,
        items: Vec<PreloadItem>,
    },
}

// Session opt-out, read once before the preloader is built. Stands in for
// the reference's `?nopreload` query flag.
fn preload_disabled(mut args: impl Iterator<Item = String>) -> bool {
    args.any(|arg| arg == "--no-preload")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let enabled = !preload_disabled(env::args());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels for background tasks and preloader ticks
    let (task_tx, mut task_rx) = mpsc::unbounded_channel::<BackgroundTask>();
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<PreloadTick>();

    let loader = HttpImageLoader::new(ARTWORK_BASE_URL);
    let preloader = Preloader::new(enabled, Box::new(loader), tick_tx);
    let mut app = App::new(preloader);

    // Show loading screen while the first rosters come in
    app.set_loading("Fetching Pokémon rosters...");
    terminal.draw(|f| ui(f, &app))?;

    for generation in 1..=GENERATION_COUNT {
        spawn_roster_loader(generation, task_tx.clone());
    }

    let res = run_app(&mut terminal, &mut app, &mut task_rx, &mut tick_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err}");
    }
    Ok(())
}

fn spawn_roster_loader(generation: u32, tx: mpsc::UnboundedSender<BackgroundTask>) {
    tokio::spawn(async move {
        match pokeapi::get_generation(generation).await {
            Ok(items) => {
                let _ = tx.send(BackgroundTask::RosterLoaded { generation, items });
            }
            Err(err) => log::warn!("failed to fetch generation {generation} roster: {err}"),
        }
    });
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: &mut mpsc::UnboundedReceiver<BackgroundTask>,
    tick_rx: &mut mpsc::UnboundedReceiver<PreloadTick>,
) -> io::Result<()> {
    let mut event_stream = EventStream::new();

    loop {
        terminal.draw(|f| ui(f, app))?;

        tokio::select! {
            // Handle keyboard events
            Some(Ok(event)) = event_stream.next() => {
                if let Event::Key(key) = event {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('p') | KeyCode::Char(' ') => app.preloader.toggle(),
                        _ => {}
                    }
                }
            }

            // Roster batches from the enqueue source
            Some(task) = task_rx.recv() => {
                match task {
                    BackgroundTask::RosterLoaded { generation, items } => {
                        app.roster_loaded(generation, items.len());
                        app.preloader.enqueue(items);
                    }
                }
            }

            // Preloader batch timer
            Some(tick) = tick_rx.recv() => {
                app.preloader.drain(tick);
            }
        }
    }
}
