use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info};
use profile_core::{update, AppState, Msg};
use profile_engine::EngineHandle;

use super::config::AppConfig;
use super::effects::{EffectRunner, LoopEvent};
use super::notifier::TerminalNotifier;
use super::ui;
use super::ui::input::UiCommand;

pub fn run_app(config: AppConfig) -> Result<()> {
    engine_logging::initialize(config.log_destination, config.log_level, &config.log_file);
    engine_info!("Starting profile search against {}", config.base_url);

    let engine = EngineHandle::new(config.service_settings()?)
        .context("Failed to start lookup engine")?;
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(
        engine,
        Box::new(TerminalNotifier::new(io::stdout())),
        loop_tx.clone(),
    );

    spawn_input_reader(loop_tx)?;

    let mut app = App::new(runner, io::stdout());
    app.print(ui::layout::banner(&config.base_url));
    app.print(ui::layout::help());
    app.dispatch_msg(Msg::Started);
    app.render();

    while let Ok(event) = loop_rx.recv() {
        let keep_going = match event {
            LoopEvent::Msg(msg) => {
                app.dispatch_msg(msg);
                true
            }
            LoopEvent::Line(line) => app.handle_line(&line),
            LoopEvent::InputClosed => false,
        };
        if !keep_going {
            break;
        }
        app.prompt();
    }

    engine_info!("Profile search exiting");
    Ok(())
}

/// Reads operator commands on a background thread so engine completions
/// keep flowing while the prompt waits.
fn spawn_input_reader(loop_tx: mpsc::Sender<LoopEvent>) -> Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if loop_tx.send(LoopEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = loop_tx.send(LoopEvent::InputClosed);
        })
        .context("Failed to spawn input reader")?;
    Ok(())
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    /// Applies one message, renders if anything changed, then runs effects.
    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            self.render();
        }
        self.runner.enqueue(effects);
    }

    /// Returns `false` when the operator asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        if self.runner.notification_pending() {
            self.runner.acknowledge_notification();
            return true;
        }

        let command = match ui::input::parse(line) {
            Ok(command) => command,
            Err(err) => {
                self.print(vec![err.to_string()]);
                return true;
            }
        };
        engine_debug!("Command {:?}", command);

        match command {
            UiCommand::Name(name) => self.dispatch_msg(Msg::NameChanged(name)),
            UiCommand::Affiliation(affiliation) => {
                self.dispatch_msg(Msg::AffiliationChanged(affiliation))
            }
            UiCommand::Stage(stage) => self.dispatch_msg(Msg::StageChanged(stage)),
            UiCommand::Search(name) => self.submit_search(name),
            UiCommand::Select(index) => self.select_candidate(index),
            UiCommand::Show => self.render(),
            UiCommand::Help => self.print(ui::layout::help()),
            UiCommand::Quit => return false,
            UiCommand::Empty => {}
        }
        true
    }

    fn submit_search(&mut self, name: Option<String>) {
        let view = self.state.view();
        if !view.search_enabled {
            self.print(vec!["Search is disabled while a lookup is in progress.".to_string()]);
            return;
        }
        if let Some(name) = name {
            self.dispatch_msg(Msg::NameChanged(name));
        }
        self.dispatch_msg(Msg::SearchSubmitted);
    }

    fn select_candidate(&mut self, index: usize) {
        let view = self.state.view();
        if !view.selection_enabled {
            self.print(vec![
                "Candidate selection is disabled while a lookup is in progress.".to_string(),
            ]);
            return;
        }
        match view.candidates.iter().find(|row| row.index == index) {
            Some(row) => self.dispatch_msg(Msg::CandidateSelected {
                url: row.url.clone(),
            }),
            None => self.print(vec![format!(
                "No candidate #{index}; {} listed.",
                view.candidates.len()
            )]),
        }
    }

    fn render(&mut self) {
        let lines = ui::render::render(&self.state.view());
        self.print(lines);
    }

    fn print(&mut self, lines: Vec<String>) {
        for line in lines {
            let _ = writeln!(self.out, "{line}");
        }
        let _ = self.out.flush();
    }

    fn prompt(&mut self) {
        if self.runner.notification_pending() {
            return;
        }
        let _ = write!(self.out, "{}", ui::constants::PROMPT);
        let _ = self.out.flush();
    }
}
