//! Clipboard poller state machine
//!
//! Two states: `Disabled` and `Armed`. The owner drives it with checkbox
//! toggles, focus changes and timer ticks; the poller answers with the
//! timer commands to apply and, on a tick, the replacement text if the
//! clipboard differs from the buffer.

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::clipboard::ClipboardAccess;

/// Poller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum PollerState {
    #[default]
    Disabled,
    Armed,
}

/// What gaining focus on the text surface does to the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FocusPolicy {
    /// Ticks are skipped while focused; the checkbox is left alone
    #[default]
    Guard,
    /// Focus unchecks the checkbox and stops the timer
    Disarm,
}

/// Timer command produced by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerCommand {
    Start(Duration),
    Stop,
}

/// Result of a transition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Transition {
    pub timer: Option<TimerCommand>,
    /// Set when the poll performed on arming found new clipboard text
    pub replacement: Option<String>,
    /// Set when the transition changed the checkbox behind the user's back
    pub checkbox: Option<bool>,
}

#[derive(Debug)]
pub(crate) struct ClipboardPoller {
    state: PollerState,
    policy: FocusPolicy,
    interval: Duration,
}

impl ClipboardPoller {
    pub(crate) fn new(policy: FocusPolicy, interval: Duration) -> Self {
        Self {
            state: PollerState::Disabled,
            policy,
            interval,
        }
    }

    pub(crate) fn state(&self) -> PollerState {
        self.state
    }

    #[allow(dead_code)]
    pub(crate) fn is_armed(&self) -> bool {
        self.state == PollerState::Armed
    }

    /// Checkbox toggled. Arming polls once immediately, then starts the timer.
    pub(crate) fn set_enabled(
        &mut self,
        enabled: bool,
        buffer: &str,
        focused: bool,
        clipboard: &mut dyn ClipboardAccess,
    ) -> Transition {
        match (self.state, enabled) {
            (PollerState::Disabled, true) => {
                self.state = PollerState::Armed;
                info!("Clipboard auto-capture armed ({:?} interval)", self.interval);
                Transition {
                    timer: Some(TimerCommand::Start(self.interval)),
                    replacement: self.poll(buffer, focused, clipboard),
                    checkbox: None,
                }
            }
            (PollerState::Armed, false) => {
                self.state = PollerState::Disabled;
                info!("Clipboard auto-capture disabled");
                Transition {
                    timer: Some(TimerCommand::Stop),
                    ..Transition::default()
                }
            }
            _ => Transition::default(),
        }
    }

    /// Text surface gained input focus
    pub(crate) fn focus_gained(&mut self) -> Transition {
        if self.policy == FocusPolicy::Disarm && self.state == PollerState::Armed {
            self.state = PollerState::Disabled;
            info!("Text box focused, clipboard auto-capture disabled");
            return Transition {
                timer: Some(TimerCommand::Stop),
                replacement: None,
                checkbox: Some(false),
            };
        }
        Transition::default()
    }

    /// One poll. Returns the clipboard text when it should replace the buffer.
    ///
    /// Never reads the clipboard while disabled or while the text surface
    /// has focus.
    pub(crate) fn poll(
        &self,
        buffer: &str,
        focused: bool,
        clipboard: &mut dyn ClipboardAccess,
    ) -> Option<String> {
        if self.state != PollerState::Armed || focused {
            return None;
        }

        let text = clipboard.read_text()?;
        if text == buffer {
            return None;
        }

        debug!("Clipboard changed ({} chars)", text.chars().count());
        Some(text)
    }
}
