//! Global state for the counter window

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2_app_kit::{NSButton, NSScrollView, NSTextField, NSWindow};
use once_cell::sync::OnceCell;
use std::sync::Mutex;

use super::delegates::{CounterActionDelegate, FocusTextView};
use super::window::MetricRow;
use crate::clipboard::SystemClipboard;
use crate::view::CounterView;

/// NSControlStateValueOn
pub(super) const NS_CONTROL_STATE_ON: isize = 1;

/// NSControlStateValueOff
pub(super) const NS_CONTROL_STATE_OFF: isize = 0;

/// Global state for the counter window (needed for Objective-C callbacks)
pub(super) static COUNTER_WINDOW: OnceCell<Mutex<CounterWindowInner>> = OnceCell::new();

/// Counter window widgets plus the view model they render
pub(super) struct CounterWindowInner {
    pub window: Retained<NSWindow>,
    pub scroll_view: Retained<NSScrollView>,
    pub text_view: Retained<FocusTextView>,
    pub auto_capture_checkbox: Retained<NSButton>,
    pub details_checkbox: Retained<NSButton>,
    pub metric_rows: Vec<MetricRow>,
    pub notice_label: Retained<NSTextField>,
    /// Repeating NSTimer while auto-capture is armed
    pub poll_timer: Option<Retained<AnyObject>>,
    pub view: CounterView,
    pub clipboard: SystemClipboard,
    // Delegate (kept alive)
    pub delegate: Retained<CounterActionDelegate>,
}

// SAFETY: CounterWindowInner is only touched from AppKit callbacks, which
// all run on the main thread.
unsafe impl Send for CounterWindowInner {}
