//! Terminal session with the navigation guard armed for its whole lifetime.
//!
//! Acquiring a [`TerminalSession`] takes over the terminal (raw mode, alternate
//! screen, mouse capture) and installs signal handlers; dropping it releases
//! all of them. Interrupt-style signals are absorbed as unload attempts.
//! SIGTERM and SIGHUP request teardown.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use feedctl_core::{GuardVerdict, NavigationEvent, NavigationGuard};
use feedctl_logging::{feed_debug, feed_info, feed_warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::SigId;

pub type SessionTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalSession {
    terminal: SessionTerminal,
    guard: NavigationGuard,
    interrupted: Arc<AtomicBool>,
    teardown: Arc<AtomicBool>,
    signal_ids: Vec<SigId>,
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = match enter_screen() {
            Ok(terminal) => terminal,
            Err(err) => {
                restore_screen();
                return Err(err);
            }
        };

        let mut session = Self {
            terminal,
            guard: NavigationGuard::new(),
            interrupted: Arc::new(AtomicBool::new(false)),
            teardown: Arc::new(AtomicBool::new(false)),
            signal_ids: Vec::new(),
        };
        // From here on Drop restores the terminal on any error.
        for signal in [SIGINT, SIGQUIT] {
            let id = signal_hook::flag::register(signal, Arc::clone(&session.interrupted))?;
            session.signal_ids.push(id);
        }
        for signal in [SIGTERM, SIGHUP] {
            let id = signal_hook::flag::register(signal, Arc::clone(&session.teardown))?;
            session.signal_ids.push(id);
        }

        session.guard.arm();
        feed_info!("navigation guard armed");
        Ok(session)
    }

    pub fn terminal(&mut self) -> &mut SessionTerminal {
        &mut self.terminal
    }

    pub fn guard_mut(&mut self) -> &mut NavigationGuard {
        &mut self.guard
    }

    /// Feeds pending interrupt signals through the guard. Returns `true` if
    /// one was let through.
    pub fn absorb_interrupts(&mut self) -> bool {
        if !self.interrupted.swap(false, Ordering::Relaxed) {
            return false;
        }
        match self.guard.intercept(NavigationEvent::UnloadRequested) {
            GuardVerdict::Suppress => {
                feed_debug!("suppressed interrupt signal");
                false
            }
            GuardVerdict::Allow => true,
        }
    }

    pub fn teardown_requested(&self) -> bool {
        self.teardown.load(Ordering::Relaxed)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        for id in self.signal_ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
        restore_screen();
        if let Err(err) = self.terminal.show_cursor() {
            feed_warn!("could not show cursor: {}", err);
        }
        feed_info!(
            "terminal session released ({} navigation attempts suppressed)",
            self.guard.suppressed_count()
        );
    }
}

fn enter_screen() -> io::Result<SessionTerminal> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_screen() {
    if let Err(err) = disable_raw_mode() {
        feed_warn!("could not leave raw mode: {}", err);
    }
    if let Err(err) = execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    ) {
        feed_warn!("could not restore screen: {}", err);
    }
}
