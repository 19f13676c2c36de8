//! Counter view model
//!
//! Owns the buffer, focus flag and clipboard poller. Front ends translate
//! toolkit callbacks into [`ViewEvent`]s and apply the returned
//! [`ViewEffect`]s to their widgets and timer. Nothing here touches a UI
//! toolkit, so both front ends share the same behavior.

use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::clipboard::ClipboardAccess;
use crate::config::Config;
use crate::document;
use crate::metrics::{MetricKind, TextMetrics};
use crate::poller::{ClipboardPoller, FocusPolicy, PollerState, TimerCommand, Transition};

/// Input to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewEvent {
    /// Auto-capture checkbox changed by the user
    AutoCaptureToggled(bool),
    FocusGained,
    FocusLost,
    /// Poll timer fired
    PollTick,
    /// User edited the text; carries the full new contents
    TextEdited(String),
    FileOpened(PathBuf),
    ClearRequested,
    CopyTextRequested,
    /// Copy one metric value to the clipboard
    CopyMetricRequested(MetricKind),
    /// Show or hide the detail metrics
    DetailsToggled(bool),
}

/// Output for the front end to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewEffect {
    StartPolling(Duration),
    StopPolling,
    /// Buffer replaced from outside the widget; push it into the widget
    ReplaceText(String),
    MetricsChanged(TextMetrics),
    /// Set the checkbox without treating it as a user toggle
    SetAutoCapture(bool),
    /// Show or hide the detail metric rows
    DetailsVisible(bool),
    /// Short status message for the user
    Notice(String),
}

/// Settings the view needs from the configuration
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewSettings {
    pub auto_capture: bool,
    pub focus_policy: FocusPolicy,
    pub poll_interval: Duration,
    pub page_chars: usize,
    pub show_details: bool,
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            auto_capture: config.clipboard.auto_capture,
            focus_policy: config.clipboard.focus_policy,
            poll_interval: config.clipboard.poll_interval(),
            page_chars: config.metrics.manuscript_page_chars,
            show_details: config.metrics.show_details,
        }
    }
}

pub(crate) struct CounterView {
    buffer: String,
    focused: bool,
    poller: ClipboardPoller,
    metrics: TextMetrics,
    show_details: bool,
    /// Last metric value written to the clipboard; never captured back
    copied_metric: Option<String>,
    settings: ViewSettings,
}

impl CounterView {
    pub(crate) fn new(settings: ViewSettings) -> Self {
        Self {
            buffer: String::new(),
            focused: false,
            poller: ClipboardPoller::new(settings.focus_policy, settings.poll_interval),
            metrics: TextMetrics::default(),
            show_details: settings.show_details,
            copied_metric: None,
            settings,
        }
    }

    /// Apply the initial checkbox state and report the starting metrics
    pub(crate) fn initialize(&mut self, clipboard: &mut dyn ClipboardAccess) -> Vec<ViewEffect> {
        let mut effects = vec![
            ViewEffect::SetAutoCapture(self.settings.auto_capture),
            ViewEffect::DetailsVisible(self.show_details),
            ViewEffect::MetricsChanged(self.metrics),
        ];
        effects.extend(self.handle(
            ViewEvent::AutoCaptureToggled(self.settings.auto_capture),
            clipboard,
        ));
        effects
    }

    pub(crate) fn handle(
        &mut self,
        event: ViewEvent,
        clipboard: &mut dyn ClipboardAccess,
    ) -> Vec<ViewEffect> {
        let mut effects = Vec::new();

        match event {
            ViewEvent::AutoCaptureToggled(enabled) => {
                let transition =
                    self.poller.set_enabled(enabled, &self.buffer, self.focused, clipboard);
                self.apply_transition(transition, &mut effects);
            }
            ViewEvent::FocusGained => {
                self.focused = true;
                let transition = self.poller.focus_gained();
                self.apply_transition(transition, &mut effects);
            }
            ViewEvent::FocusLost => {
                self.focused = false;
            }
            ViewEvent::PollTick => {
                if let Some(text) = self.poller.poll(&self.buffer, self.focused, clipboard) {
                    self.capture(text, &mut effects);
                }
            }
            ViewEvent::TextEdited(text) => {
                if text != self.buffer {
                    self.buffer = text;
                    self.recompute(&mut effects);
                }
            }
            ViewEvent::FileOpened(path) => match document::load_text_file(&path) {
                Ok(text) => {
                    self.replace_buffer(text, &mut effects);
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    effects.push(ViewEffect::Notice(format!("Loaded {}", name)));
                }
                Err(e) => {
                    error!("File load failed: {}", e);
                    effects.push(ViewEffect::Notice(e.to_string()));
                }
            },
            ViewEvent::ClearRequested => {
                if !self.buffer.is_empty() {
                    self.replace_buffer(String::new(), &mut effects);
                    effects.push(ViewEffect::Notice("Text cleared".to_string()));
                }
            }
            ViewEvent::CopyTextRequested => {
                if !self.buffer.is_empty() {
                    let notice = match clipboard.write_text(&self.buffer) {
                        Ok(()) => "Copied text to clipboard".to_string(),
                        Err(e) => {
                            error!("{}", e);
                            e.to_string()
                        }
                    };
                    effects.push(ViewEffect::Notice(notice));
                }
            }
            ViewEvent::CopyMetricRequested(kind) => {
                let value = self.metrics.get(kind).to_string();
                let notice = match clipboard.write_text(&value) {
                    Ok(()) => {
                        let notice = format!("Copied {}: {}", kind, value);
                        self.copied_metric = Some(value);
                        notice
                    }
                    Err(e) => {
                        error!("{}", e);
                        e.to_string()
                    }
                };
                effects.push(ViewEffect::Notice(notice));
            }
            ViewEvent::DetailsToggled(show) => {
                if show != self.show_details {
                    self.show_details = show;
                    effects.push(ViewEffect::DetailsVisible(show));
                }
            }
        }

        effects
    }

    #[allow(dead_code)]
    pub(crate) fn text(&self) -> &str {
        &self.buffer
    }

    pub(crate) fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    #[allow(dead_code)]
    pub(crate) fn show_details(&self) -> bool {
        self.show_details
    }

    #[allow(dead_code)]
    pub(crate) fn is_focused(&self) -> bool {
        self.focused
    }

    #[allow(dead_code)]
    pub(crate) fn poller_state(&self) -> PollerState {
        self.poller.state()
    }

    fn apply_transition(&mut self, transition: Transition, effects: &mut Vec<ViewEffect>) {
        if let Some(checked) = transition.checkbox {
            effects.push(ViewEffect::SetAutoCapture(checked));
        }
        match transition.timer {
            Some(TimerCommand::Start(interval)) => effects.push(ViewEffect::StartPolling(interval)),
            Some(TimerCommand::Stop) => effects.push(ViewEffect::StopPolling),
            None => {}
        }
        if let Some(text) = transition.replacement {
            self.capture(text, effects);
        }
    }

    /// Take new clipboard text into the buffer, unless it is a metric value
    /// this view copied out itself
    fn capture(&mut self, text: String, effects: &mut Vec<ViewEffect>) {
        if self.copied_metric.as_deref() == Some(text.as_str()) {
            debug!("Clipboard still holds a copied metric value");
            return;
        }
        self.copied_metric = None;
        self.replace_buffer(text, effects);
    }

    /// Replace the whole buffer from outside the widget
    fn replace_buffer(&mut self, text: String, effects: &mut Vec<ViewEffect>) {
        info!("Buffer replaced ({} chars)", text.chars().count());
        self.buffer = text;
        effects.push(ViewEffect::ReplaceText(self.buffer.clone()));
        self.recompute(effects);
    }

    fn recompute(&mut self, effects: &mut Vec<ViewEffect>) {
        self.metrics = TextMetrics::compute(&self.buffer, self.settings.page_chars);
        effects.push(ViewEffect::MetricsChanged(self.metrics));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use std::io::Write;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn settings(auto_capture: bool, focus_policy: FocusPolicy) -> ViewSettings {
        ViewSettings {
            auto_capture,
            focus_policy,
            poll_interval: INTERVAL,
            page_chars: 400,
            show_details: false,
        }
    }

    fn view_with_text(text: &str, clipboard: &mut MemoryClipboard) -> CounterView {
        let mut view = CounterView::new(settings(false, FocusPolicy::Guard));
        view.initialize(clipboard);
        view.handle(ViewEvent::TextEdited(text.to_string()), clipboard);
        view
    }

    fn counts(view: &CounterView) -> (usize, usize, usize) {
        let m = view.metrics();
        (m.characters, m.characters_without_whitespace, m.lines)
    }

    #[test]
    fn test_initialize_armed_polls_and_starts() {
        let mut clipboard = MemoryClipboard::with_text("ab cd\nef");
        let mut view = CounterView::new(settings(true, FocusPolicy::Guard));

        let effects = view.initialize(&mut clipboard);

        assert_eq!(effects[0], ViewEffect::SetAutoCapture(true));
        assert_eq!(effects[1], ViewEffect::DetailsVisible(false));
        assert_eq!(effects[2], ViewEffect::MetricsChanged(TextMetrics::default()));
        assert!(effects.contains(&ViewEffect::StartPolling(INTERVAL)));
        assert!(effects.contains(&ViewEffect::ReplaceText("ab cd\nef".to_string())));
        assert_eq!(view.text(), "ab cd\nef");
        assert_eq!(counts(&view), (8, 6, 2));
        assert_eq!(view.poller_state(), PollerState::Armed);
    }

    #[test]
    fn test_initialize_disabled() {
        let mut clipboard = MemoryClipboard::with_text("ignored");
        let mut view = CounterView::new(settings(false, FocusPolicy::Guard));

        let effects = view.initialize(&mut clipboard);

        assert_eq!(
            effects,
            vec![
                ViewEffect::SetAutoCapture(false),
                ViewEffect::DetailsVisible(false),
                ViewEffect::MetricsChanged(TextMetrics::default()),
            ]
        );
        assert_eq!(view.text(), "");
        assert_eq!(counts(&view), (0, 0, 0));
        assert_eq!(clipboard.reads, 0);
    }

    #[test]
    fn test_tick_with_equal_clipboard_is_noop() {
        let mut clipboard = MemoryClipboard::with_text("hello");
        let mut view = view_with_text("hello", &mut clipboard);
        view.handle(ViewEvent::AutoCaptureToggled(true), &mut clipboard);

        let effects = view.handle(ViewEvent::PollTick, &mut clipboard);
        assert!(effects.is_empty());
        assert_eq!(view.text(), "hello");
    }

    #[test]
    fn test_tick_replaces_buffer() {
        let mut clipboard = MemoryClipboard::with_text("hello");
        let mut view = view_with_text("hello", &mut clipboard);
        view.handle(ViewEvent::AutoCaptureToggled(true), &mut clipboard);

        clipboard.text = Some("world".to_string());
        let effects = view.handle(ViewEvent::PollTick, &mut clipboard);

        assert_eq!(view.text(), "world");
        assert_eq!(counts(&view), (5, 5, 1));
        assert_eq!(
            effects,
            vec![
                ViewEffect::ReplaceText("world".to_string()),
                ViewEffect::MetricsChanged(view.metrics()),
            ]
        );
    }

    #[test]
    fn test_disabled_tick_never_mutates() {
        let mut clipboard = MemoryClipboard::with_text("world");
        let mut view = view_with_text("hello", &mut clipboard);

        for _ in 0..3 {
            assert!(view.handle(ViewEvent::PollTick, &mut clipboard).is_empty());
        }
        assert_eq!(view.text(), "hello");
        assert_eq!(clipboard.reads, 0);
    }

    #[test]
    fn test_focus_guard_suspends_and_resumes() {
        let mut clipboard = MemoryClipboard::with_text("first");
        let mut view = CounterView::new(settings(true, FocusPolicy::Guard));
        view.initialize(&mut clipboard);
        assert_eq!(view.text(), "first");

        assert!(view.handle(ViewEvent::FocusGained, &mut clipboard).is_empty());
        assert!(view.is_focused());

        clipboard.text = Some("second".to_string());
        assert!(view.handle(ViewEvent::PollTick, &mut clipboard).is_empty());
        assert_eq!(view.text(), "first");
        assert_eq!(view.poller_state(), PollerState::Armed);

        view.handle(ViewEvent::FocusLost, &mut clipboard);
        view.handle(ViewEvent::PollTick, &mut clipboard);
        assert_eq!(view.text(), "second");
    }

    #[test]
    fn test_window_deactivation_resumes_capture() {
        let mut clipboard = MemoryClipboard::with_text("first");
        let mut view = CounterView::new(settings(true, FocusPolicy::Guard));
        view.initialize(&mut clipboard);

        // Click into the text box, then switch to another app and copy there
        view.handle(ViewEvent::FocusGained, &mut clipboard);
        view.handle(ViewEvent::FocusLost, &mut clipboard);
        clipboard.text = Some("copied elsewhere".to_string());

        let effects = view.handle(ViewEvent::PollTick, &mut clipboard);
        assert!(effects.contains(&ViewEffect::ReplaceText("copied elsewhere".to_string())));
        assert_eq!(view.text(), "copied elsewhere");

        // Back in the window with the text box still first responder
        view.handle(ViewEvent::FocusGained, &mut clipboard);
        clipboard.text = Some("ignored".to_string());
        assert!(view.handle(ViewEvent::PollTick, &mut clipboard).is_empty());
        assert_eq!(view.poller_state(), PollerState::Armed);
    }

    #[test]
    fn test_focus_disarm_unchecks() {
        let mut clipboard = MemoryClipboard::with_text("first");
        let mut view = CounterView::new(settings(true, FocusPolicy::Disarm));
        view.initialize(&mut clipboard);

        let effects = view.handle(ViewEvent::FocusGained, &mut clipboard);
        assert_eq!(
            effects,
            vec![ViewEffect::SetAutoCapture(false), ViewEffect::StopPolling]
        );

        // Focus lost does not re-arm
        view.handle(ViewEvent::FocusLost, &mut clipboard);
        clipboard.text = Some("second".to_string());
        assert!(view.handle(ViewEvent::PollTick, &mut clipboard).is_empty());
        assert_eq!(view.text(), "first");
        assert_eq!(view.poller_state(), PollerState::Disabled);
    }

    #[test]
    fn test_user_edit_recomputes_without_replace() {
        let mut clipboard = MemoryClipboard::default();
        let mut view = view_with_text("", &mut clipboard);

        let effects = view.handle(ViewEvent::TextEdited("a b".to_string()), &mut clipboard);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], ViewEffect::MetricsChanged(_)));
        assert_eq!(counts(&view), (3, 2, 1));

        // Same text again
        assert!(view
            .handle(ViewEvent::TextEdited("a b".to_string()), &mut clipboard)
            .is_empty());
    }

    #[test]
    fn test_uncheck_then_recheck_polls_again() {
        let mut clipboard = MemoryClipboard::with_text("one");
        let mut view = CounterView::new(settings(true, FocusPolicy::Guard));
        view.initialize(&mut clipboard);

        let effects = view.handle(ViewEvent::AutoCaptureToggled(false), &mut clipboard);
        assert_eq!(effects, vec![ViewEffect::StopPolling]);

        clipboard.text = Some("two".to_string());
        let effects = view.handle(ViewEvent::AutoCaptureToggled(true), &mut clipboard);
        assert_eq!(effects[0], ViewEffect::StartPolling(INTERVAL));
        assert_eq!(view.text(), "two");
    }

    #[test]
    fn test_file_opened_replaces_buffer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "line one\nline two").unwrap();
        let mut clipboard = MemoryClipboard::default();
        let mut view = view_with_text("old", &mut clipboard);

        let effects = view.handle(
            ViewEvent::FileOpened(file.path().to_path_buf()),
            &mut clipboard,
        );

        assert_eq!(view.text(), "line one\nline two");
        assert_eq!(counts(&view), (17, 14, 2));
        assert!(effects.contains(&ViewEffect::ReplaceText("line one\nline two".to_string())));
        assert!(matches!(effects.last(), Some(ViewEffect::Notice(n)) if n.starts_with("Loaded ")));
    }

    #[test]
    fn test_file_failure_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = MemoryClipboard::default();
        let mut view = view_with_text("keep me", &mut clipboard);

        let effects = view.handle(
            ViewEvent::FileOpened(dir.path().join("nope.txt")),
            &mut clipboard,
        );

        assert_eq!(view.text(), "keep me");
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], ViewEffect::Notice(_)));
    }

    #[test]
    fn test_clear() {
        let mut clipboard = MemoryClipboard::default();
        let mut view = view_with_text("something", &mut clipboard);

        let effects = view.handle(ViewEvent::ClearRequested, &mut clipboard);
        assert_eq!(view.text(), "");
        assert_eq!(counts(&view), (0, 0, 0));
        assert_eq!(effects[0], ViewEffect::ReplaceText(String::new()));
        assert_eq!(
            effects.last(),
            Some(&ViewEffect::Notice("Text cleared".to_string()))
        );

        assert!(view.handle(ViewEvent::ClearRequested, &mut clipboard).is_empty());
    }

    #[test]
    fn test_copy_text_makes_next_tick_noop() {
        let mut clipboard = MemoryClipboard::with_text("clipboard");
        let mut view = view_with_text("typed", &mut clipboard);

        let effects = view.handle(ViewEvent::CopyTextRequested, &mut clipboard);
        assert_eq!(
            effects,
            vec![ViewEffect::Notice("Copied text to clipboard".to_string())]
        );
        assert_eq!(clipboard.text.as_deref(), Some("typed"));

        view.handle(ViewEvent::AutoCaptureToggled(true), &mut clipboard);
        assert!(view.handle(ViewEvent::PollTick, &mut clipboard).is_empty());
        assert_eq!(view.text(), "typed");
    }

    #[test]
    fn test_copy_empty_is_noop() {
        let mut clipboard = MemoryClipboard::with_text("keep");
        let mut view = view_with_text("", &mut clipboard);

        assert!(view.handle(ViewEvent::CopyTextRequested, &mut clipboard).is_empty());
        assert_eq!(clipboard.text.as_deref(), Some("keep"));
    }

    #[test]
    fn test_copy_metric_writes_value() {
        let mut clipboard = MemoryClipboard::default();
        let mut view = view_with_text("ab cd\nef", &mut clipboard);

        let effects = view.handle(
            ViewEvent::CopyMetricRequested(MetricKind::Characters),
            &mut clipboard,
        );

        assert_eq!(clipboard.text.as_deref(), Some("8"));
        assert_eq!(
            effects,
            vec![ViewEffect::Notice(
                "Copied Characters (with whitespace): 8".to_string()
            )]
        );
        assert_eq!(view.text(), "ab cd\nef");
    }

    #[test]
    fn test_copied_metric_is_not_captured() {
        let mut clipboard = MemoryClipboard::with_text("ab cd\nef");
        let mut view = CounterView::new(settings(true, FocusPolicy::Guard));
        view.initialize(&mut clipboard);

        view.handle(ViewEvent::CopyMetricRequested(MetricKind::Lines), &mut clipboard);
        assert_eq!(clipboard.text.as_deref(), Some("2"));

        assert!(view.handle(ViewEvent::PollTick, &mut clipboard).is_empty());
        assert_eq!(view.text(), "ab cd\nef");

        // Re-arming does not pick it up either
        view.handle(ViewEvent::AutoCaptureToggled(false), &mut clipboard);
        let effects = view.handle(ViewEvent::AutoCaptureToggled(true), &mut clipboard);
        assert_eq!(effects, vec![ViewEffect::StartPolling(INTERVAL)]);

        // Anything else copied afterwards is captured as usual
        clipboard.text = Some("next".to_string());
        view.handle(ViewEvent::PollTick, &mut clipboard);
        assert_eq!(view.text(), "next");
    }

    #[test]
    fn test_details_toggle() {
        let mut clipboard = MemoryClipboard::default();
        let mut view = view_with_text("abc", &mut clipboard);
        assert!(!view.show_details());

        let effects = view.handle(ViewEvent::DetailsToggled(true), &mut clipboard);
        assert_eq!(effects, vec![ViewEffect::DetailsVisible(true)]);
        assert!(view.show_details());

        assert!(view
            .handle(ViewEvent::DetailsToggled(true), &mut clipboard)
            .is_empty());

        let effects = view.handle(ViewEvent::DetailsToggled(false), &mut clipboard);
        assert_eq!(effects, vec![ViewEffect::DetailsVisible(false)]);
    }
}
