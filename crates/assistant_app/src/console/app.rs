use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use assistant_core::{update, AppState, AppViewModel, Msg, Notice};
use assistant_engine::{CannedResponseProvider, EngineHandle, RandomProgressSource};
use chrono::Utc;
use engine_logging::engine_info;

use super::commands::{parse_line, Command, USAGE};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::render::{render_notice, render_sections, Section};

const RENDER_TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Everything the main loop reacts to, from stdin, the engine or the tick thread.
#[derive(Debug)]
enum Inbox {
    Msg(Msg),
    Show,
    Help,
    Rejected(String),
    Quit,
}

impl From<Msg> for Inbox {
    fn from(msg: Msg) -> Self {
        Inbox::Msg(msg)
    }
}

pub fn run(config: &AppConfig, mode: OutputMode) -> Result<()> {
    let (engine, events) = EngineHandle::start(
        config.simulation.clone(),
        Arc::new(RandomProgressSource),
        Arc::new(CannedResponseProvider::new()),
    )
    .context("starting simulation engine")?;

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(engine, events, inbox_tx.clone());
    spawn_stdin_reader(inbox_tx.clone());
    // Background tick to throttle rendering.
    spawn_render_tick(inbox_tx);

    let mut console = Console::new(io::stdout().lock(), mode);
    if mode == OutputMode::Text {
        console.line(USAGE)?;
    }

    let mut state = AppState::new();
    state = dispatch(state, Msg::SessionStarted { at: Utc::now() }, &runner, &mut console)?;

    for inbox in &inbox_rx {
        match inbox {
            Inbox::Msg(Msg::Tick) => console.render_if_dirty(&mut state)?,
            Inbox::Msg(msg) => state = dispatch(state, msg, &runner, &mut console)?,
            Inbox::Show => console.render_all(&state.view())?,
            Inbox::Help => console.help()?,
            Inbox::Rejected(reason) => console.reject(&reason)?,
            Inbox::Quit => break,
        }
    }

    engine_info!("Session ending");
    state = dispatch(state, Msg::SessionEnded, &runner, &mut console)?;
    console.render_if_dirty(&mut state)?;
    runner.shutdown();
    Ok(())
}

fn dispatch<W: Write>(
    state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    console: &mut Console<W>,
) -> Result<AppState> {
    let (state, effects) = update(state, msg);
    let notices = runner.run(effects);
    console.notify(&notices)?;
    Ok(state)
}

fn route(command: Command) -> Vec<Inbox> {
    match command {
        Command::Quit => vec![Inbox::Quit],
        Command::Show => vec![Inbox::Show],
        Command::Help => vec![Inbox::Help],
        command => command
            .into_msgs(Utc::now())
            .into_iter()
            .map(Inbox::Msg)
            .collect(),
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let items = match parse_line(&line) {
                Ok(command) => route(command),
                Err(err) => vec![Inbox::Rejected(err.to_string())],
            };
            for item in items {
                if tx.send(item).is_err() {
                    return;
                }
            }
        }
        // End of input ends the session.
        let _ = tx.send(Inbox::Quit);
    });
}

fn spawn_render_tick(tx: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        while tx.send(Inbox::Msg(Msg::Tick)).is_ok() {
            thread::sleep(RENDER_TICK);
        }
    });
}

/// Writes views and notices, printing only the sections that changed.
struct Console<W: Write> {
    out: W,
    mode: OutputMode,
    last: HashMap<Section, String>,
}

impl<W: Write> Console<W> {
    fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            last: HashMap::new(),
        }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    fn help(&mut self) -> Result<()> {
        match self.mode {
            OutputMode::Text => self.line(USAGE),
            OutputMode::Json => self.line(&serde_json::json!({ "usage": USAGE }).to_string()),
        }
    }

    fn reject(&mut self, reason: &str) -> Result<()> {
        match self.mode {
            OutputMode::Text => self.line(&format!("? {reason}")),
            OutputMode::Json => self.line(&serde_json::json!({ "error": reason }).to_string()),
        }
    }

    fn notify(&mut self, notices: &[Notice]) -> Result<()> {
        for notice in notices {
            match self.mode {
                OutputMode::Text => writeln!(self.out, "{}", render_notice(notice))?,
                OutputMode::Json => {
                    let json = serde_json::json!({ "notice": notice });
                    writeln!(self.out, "{json}")?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_if_dirty(&mut self, state: &mut AppState) -> Result<()> {
        if state.consume_dirty() {
            self.render(&state.view(), false)?;
        }
        Ok(())
    }

    fn render_all(&mut self, view: &AppViewModel) -> Result<()> {
        self.render(view, true)
    }

    fn render(&mut self, view: &AppViewModel, force: bool) -> Result<()> {
        match self.mode {
            OutputMode::Json => {
                let json = serde_json::to_string(view).context("serializing view")?;
                writeln!(self.out, "{json}")?;
            }
            OutputMode::Text => {
                for (section, text) in render_sections(view) {
                    if !force && self.last.get(&section) == Some(&text) {
                        continue;
                    }
                    writeln!(self.out, "{text}")?;
                    self.last.insert(section, text);
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
