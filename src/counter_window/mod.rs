//! Counter window implementation using objc2
//!
//! A standard macOS window with an editable text box, an auto-capture
//! checkbox, Copy/Clear buttons and one label per metric. AppKit callbacks
//! are turned into [`ViewEvent`]s for the shared [`CounterView`]; the
//! resulting effects are applied back onto the widgets here.

mod components;
mod delegates;
mod edit_menu;
mod objc_utils;
mod state;
mod window;

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{msg_send, msg_send_id, sel};
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy, NSButton};
use objc2_foundation::{MainThreadMarker, NSString};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::error::AppError;
use crate::metrics::TextMetrics;
use crate::view::{CounterView, ViewEffect, ViewEvent, ViewSettings};

use delegates::CounterActionDelegate;
use state::{CounterWindowInner, COUNTER_WINDOW, NS_CONTROL_STATE_OFF, NS_CONTROL_STATE_ON};

/// Counter window manager
pub(crate) struct CounterWindow;

impl CounterWindow {
    /// Create the window and run the AppKit event loop until it is closed.
    ///
    /// Must be called on the main thread.
    pub(crate) fn run(config: &Config, launch_file: Option<PathBuf>) -> Result<(), AppError> {
        let mtm = MainThreadMarker::new().ok_or(AppError::NotMainThread)?;

        let app = NSApplication::sharedApplication(mtm);
        app.setActivationPolicy(NSApplicationActivationPolicy::Regular);
        edit_menu::setup_edit_menu(mtm, &app);

        let delegate = CounterActionDelegate::new(mtm);
        let widgets = window::create_window(mtm, config, &delegate);

        let inner = CounterWindowInner {
            window: widgets.window,
            scroll_view: widgets.scroll_view,
            text_view: widgets.text_view,
            auto_capture_checkbox: widgets.auto_capture_checkbox,
            details_checkbox: widgets.details_checkbox,
            metric_rows: widgets.metric_rows,
            notice_label: widgets.notice_label,
            poll_timer: None,
            view: CounterView::new(ViewSettings::from(config)),
            clipboard: SystemClipboard::new(),
            delegate,
        };
        if COUNTER_WINDOW.set(Mutex::new(inner)).is_err() {
            return Err(AppError::AlreadyRunning);
        }

        if let Some(path) = launch_file {
            Self::dispatch(ViewEvent::FileOpened(path));
        }
        Self::initialize();

        #[allow(deprecated)]
        app.activateIgnoringOtherApps(true);
        unsafe { app.run() };

        Ok(())
    }

    /// Feed one event to the view and apply its effects
    pub(super) fn dispatch(event: ViewEvent) {
        let Some(inner) = COUNTER_WINDOW.get() else {
            return;
        };
        let Ok(mut inner) = inner.lock() else {
            error!("Failed to acquire counter window lock in dispatch");
            return;
        };
        let inner = &mut *inner;

        let effects = inner.view.handle(event, &mut inner.clipboard);
        apply_effects(inner, effects);
    }

    /// Text view contents changed by the user
    pub(super) fn handle_text_changed() {
        let Some(inner) = COUNTER_WINDOW.get() else {
            return;
        };
        let Ok(mut inner) = inner.lock() else {
            error!("Failed to acquire counter window lock in handle_text_changed");
            return;
        };
        let inner = &mut *inner;

        let text = unsafe { inner.text_view.string() }.to_string();
        let effects = inner.view.handle(ViewEvent::TextEdited(text), &mut inner.clipboard);
        apply_effects(inner, effects);
    }

    /// Window became key again. AppKit does not re-send
    /// `becomeFirstResponder` here, so report focus if the text box still
    /// holds it.
    pub(super) fn handle_window_became_key() {
        let Some(inner) = COUNTER_WINDOW.get() else {
            return;
        };
        let Ok(mut inner) = inner.lock() else {
            error!("Failed to acquire counter window lock in handle_window_became_key");
            return;
        };
        let inner = &mut *inner;

        let responder: *mut AnyObject = unsafe { msg_send![&inner.window, firstResponder] };
        let text_view = Retained::as_ptr(&inner.text_view).cast::<AnyObject>();
        if responder.cast_const() != text_view {
            return;
        }

        let effects = inner.view.handle(ViewEvent::FocusGained, &mut inner.clipboard);
        apply_effects(inner, effects);
    }

    /// Window closed: stop polling and quit
    pub(super) fn handle_window_closed() {
        info!("Counter window closed");
        if let Some(inner) = COUNTER_WINDOW.get() {
            if let Ok(mut inner) = inner.lock() {
                stop_poll_timer(&mut inner);
            }
        }

        if let Some(mtm) = MainThreadMarker::new() {
            let app = NSApplication::sharedApplication(mtm);
            unsafe { app.terminate(None) };
        }
    }

    fn initialize() {
        let Some(inner) = COUNTER_WINDOW.get() else {
            return;
        };
        let Ok(mut inner) = inner.lock() else {
            error!("Failed to acquire counter window lock in initialize");
            return;
        };
        let inner = &mut *inner;

        let effects = inner.view.initialize(&mut inner.clipboard);
        apply_effects(inner, effects);
    }
}

fn apply_effects(inner: &mut CounterWindowInner, effects: Vec<ViewEffect>) {
    for effect in effects {
        match effect {
            ViewEffect::StartPolling(interval) => start_poll_timer(inner, interval),
            ViewEffect::StopPolling => stop_poll_timer(inner),
            ViewEffect::ReplaceText(text) => unsafe {
                inner.text_view.setString(&NSString::from_str(&text));
            },
            ViewEffect::MetricsChanged(metrics) => update_metric_labels(inner, &metrics),
            ViewEffect::SetAutoCapture(checked) => {
                set_checkbox(&inner.auto_capture_checkbox, checked);
            }
            ViewEffect::DetailsVisible(show) => {
                set_checkbox(&inner.details_checkbox, show);
                window::layout_metric_rows(&inner.scroll_view, &inner.metric_rows, show);
            }
            ViewEffect::Notice(message) => {
                info!("{}", message);
                unsafe { inner.notice_label.setStringValue(&NSString::from_str(&message)) };
            }
        }
    }
}

fn set_checkbox(checkbox: &NSButton, checked: bool) {
    let state = if checked {
        NS_CONTROL_STATE_ON
    } else {
        NS_CONTROL_STATE_OFF
    };
    unsafe {
        let _: () = msg_send![checkbox, setState: state];
    }
}

fn update_metric_labels(inner: &CounterWindowInner, metrics: &TextMetrics) {
    for row in &inner.metric_rows {
        let text = format!("{}: {}", row.kind, metrics.get(row.kind));
        unsafe { row.label.setStringValue(&NSString::from_str(&text)) };
    }
}

/// Schedule the repeating poll timer on the main run loop, replacing any existing one
fn start_poll_timer(inner: &mut CounterWindowInner, interval: Duration) {
    stop_poll_timer(inner);

    let Some(timer_class) = objc_utils::get_class_or_warn("NSTimer") else {
        return;
    };

    // SAFETY: the delegate implements handlePollTimer: and outlives the timer,
    // which is invalidated before the delegate is released.
    let timer: Option<Retained<AnyObject>> = unsafe {
        msg_send_id![
            timer_class,
            scheduledTimerWithTimeInterval: interval.as_secs_f64(),
            target: &*inner.delegate,
            selector: sel!(handlePollTimer:),
            userInfo: std::ptr::null::<AnyObject>(),
            repeats: true
        ]
    };

    if timer.is_none() {
        error!("Failed to schedule clipboard poll timer");
    }
    inner.poll_timer = timer;
}

fn stop_poll_timer(inner: &mut CounterWindowInner) {
    if let Some(timer) = inner.poll_timer.take() {
        unsafe {
            let _: () = msg_send![&timer, invalidate];
        }
    }
}
