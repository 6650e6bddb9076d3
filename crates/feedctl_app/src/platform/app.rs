use std::sync::Arc;

use anyhow::Context;
use crossterm::event;
use feedctl_core::{update, AppState, Msg, NavigationEvent};
use feedctl_engine::ReqwestControlClient;
use feedctl_logging::{feed_debug, feed_info, feed_warn};

use super::effects::EffectRunner;
use super::guard::TerminalSession;
use super::input::{self, InputOutcome};
use super::logging;
use super::settings::AppSettings;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let settings = AppSettings::load().context("loading settings")?;
    logging::initialize(settings.log_destination(), settings.log_level()?);
    feed_info!("feedctl starting against {}", settings.backend_url);

    let client = ReqwestControlClient::new(settings.client_settings()?)
        .context("building HTTP client")?;
    let runner = EffectRunner::new(Arc::new(client)).context("starting engine thread")?;

    let mut session = TerminalSession::start().context("taking over the terminal")?;
    let mut app = App {
        state: AppState::new(),
        runner,
    };
    let result = app.run(&mut session);
    drop(session);
    feed_info!("feedctl stopped");
    result
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn run(&mut self, session: &mut TerminalSession) -> anyhow::Result<()> {
        self.dispatch(Msg::Mounted);
        let mut redraw = true;

        loop {
            if session.teardown_requested() {
                feed_info!("teardown signal received");
                return Ok(());
            }
            if session.absorb_interrupts() {
                return Ok(());
            }

            if self.state.consume_dirty() || redraw {
                let view = self.state.view();
                session
                    .terminal()
                    .draw(|frame| ui::render::draw(frame, &view))
                    .context("drawing frame")?;
                redraw = false;
            }

            if event::poll(ui::constants::TICK).context("polling terminal")? {
                let terminal_event = event::read().context("reading terminal event")?;
                match input::handle_event(session.guard_mut(), &self.state, &terminal_event) {
                    InputOutcome::Dispatch(msg) => self.dispatch(msg),
                    InputOutcome::Suppressed(_) | InputOutcome::Ignored => {}
                    InputOutcome::Redraw => redraw = true,
                    InputOutcome::Navigate(NavigationEvent::UnloadRequested) => return Ok(()),
                    InputOutcome::Navigate(other) => {
                        feed_warn!("unguarded navigation {:?} has no effect here", other);
                    }
                }
            } else {
                self.dispatch(Msg::Tick);
            }

            for msg in self.runner.drain() {
                self.dispatch(msg);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        match &msg {
            // Keystrokes may carry the password.
            Msg::Tick | Msg::FieldChanged { .. } => {}
            other => feed_debug!("dispatch {:?}", other),
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if !effects.is_empty() {
            self.runner.enqueue(effects);
        }
    }
}
