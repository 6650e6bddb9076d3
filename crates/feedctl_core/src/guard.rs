//! Navigation guard policy.
//!
//! The guard starts unarmed and is armed once when the session mounts. There
//! is no way back to unarmed: the guard lives until the session is torn down.
//! While armed it suppresses every unload, reload and context-menu attempt,
//! whatever the loading or draft state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Unarmed,
    Armed,
}

/// Platform-neutral navigation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Quit/close/interrupt request.
    UnloadRequested,
    /// Reload key combination.
    ReloadShortcut,
    /// Context menu invocation.
    ContextMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Let the event reach its default handler.
    Allow,
    /// Consume the event.
    Suppress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationGuard {
    state: GuardState,
    suppressed: u64,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Arms the guard. Arming twice is harmless.
    pub fn arm(&mut self) {
        self.state = GuardState::Armed;
    }

    /// Number of attempts suppressed since arming.
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed
    }

    pub fn intercept(&mut self, event: NavigationEvent) -> GuardVerdict {
        match (self.state, event) {
            (GuardState::Unarmed, _) => GuardVerdict::Allow,
            (
                GuardState::Armed,
                NavigationEvent::UnloadRequested
                | NavigationEvent::ReloadShortcut
                | NavigationEvent::ContextMenu,
            ) => {
                self.suppressed += 1;
                GuardVerdict::Suppress
            }
        }
    }
}
