//! The viewer's event loop: user commands in, fetch outcomes in, renders out.

use std::{io::Write, sync::Arc};

use client_core::{render, FetchEffect, FetchOutcome, FetchRuntime, RoomsApi, ViewController};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc::UnboundedReceiver,
};
use tracing::{debug, warn};

use crate::commands::{parse_command, ViewerCommand, USAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Owns all view state. Fetches run on their own tasks; their outcomes are
/// applied here, one at a time, in completion order.
pub struct Viewer<W: Write> {
    controller: ViewController,
    runtime: FetchRuntime,
    outcomes: UnboundedReceiver<FetchOutcome>,
    in_flight: usize,
    out: W,
}

impl<W: Write> Viewer<W> {
    pub fn new(api: Arc<dyn RoomsApi>, out: W) -> Self {
        let (runtime, outcomes) = FetchRuntime::new(api);
        Self {
            controller: ViewController::new(),
            runtime,
            outcomes,
            in_flight: 0,
            out,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Loads the room list and prints the first render.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        if let Some(effect) = self.controller.start() {
            self.dispatch(effect);
            if let Some(outcome) = self.outcomes.recv().await {
                self.apply_outcome(outcome);
            }
        }
        self.print_view()
    }

    /// Processes commands until `quit` or end of input. At end of input the
    /// fetches still in flight are awaited so their results get printed.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> anyhow::Result<()> {
        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line)? == Flow::Quit {
                            debug!(in_flight = self.in_flight, "quit requested");
                            break;
                        }
                    }
                    None => {
                        self.drain().await?;
                        break;
                    }
                },
                Some(outcome) = self.outcomes.recv() => self.handle_outcome(outcome)?,
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, effect: FetchEffect) {
        self.in_flight += 1;
        self.runtime.dispatch(effect);
    }

    async fn drain(&mut self) -> anyhow::Result<()> {
        while self.in_flight > 0 {
            match self.outcomes.recv().await {
                Some(outcome) => self.handle_outcome(outcome)?,
                None => break,
            }
        }
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.controller.apply(outcome)
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome) -> anyhow::Result<()> {
        if self.apply_outcome(outcome) {
            self.print_view()?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.out, "{err}; type 'help' for commands")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(command = command.name(), "handling command");

        match command {
            ViewerCommand::Toggle(target) => {
                let Some(room) = target.resolve(&self.controller).cloned() else {
                    warn!(%target, "toggle for a room without a row");
                    writeln!(self.out, "no room matches {target}")?;
                    return Ok(Flow::Continue);
                };
                if let Some(effect) = self.controller.toggle_room(&room) {
                    self.dispatch(effect);
                }
                self.print_view()?;
            }
            ViewerCommand::Refresh(target) => {
                let Some(room) = target.resolve(&self.controller).cloned() else {
                    warn!(%target, "refresh for a room without a row");
                    writeln!(self.out, "no room matches {target}")?;
                    return Ok(Flow::Continue);
                };
                let effect = self.controller.refresh_room(&room);
                self.dispatch(effect);
            }
            ViewerCommand::RefreshRooms => {
                let effect = self.controller.refresh_rooms();
                self.dispatch(effect);
            }
            ViewerCommand::Show => self.print_view()?,
            ViewerCommand::Help => writeln!(self.out, "{USAGE}")?,
            ViewerCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_view(&mut self) -> anyhow::Result<()> {
        write!(self.out, "{}", render(&self.controller))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
