//! Objective-C classes that forward AppKit callbacks to the counter window

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{declare_class, msg_send, msg_send_id, mutability, ClassType, DeclaredClass};
use objc2_app_kit::NSTextView;
use objc2_foundation::{MainThreadMarker, NSObject, NSObjectProtocol, NSRect};
use tracing::warn;

use super::state::NS_CONTROL_STATE_ON;
use super::CounterWindow;
use crate::metrics::MetricKind;
use crate::view::ViewEvent;

// Target for control actions, the poll timer, and text/window notifications
declare_class!(
    pub struct CounterActionDelegate;

    // SAFETY:
    // - The superclass NSObject does not have any subclassing requirements.
    // - Main thread only mutability is correct for UI delegates.
    // - `CounterActionDelegate` does not implement `Drop`.
    unsafe impl ClassType for CounterActionDelegate {
        type Super = NSObject;
        type Mutability = mutability::MainThreadOnly;
        const NAME: &'static str = "CharcountActionDelegate";
    }

    impl DeclaredClass for CounterActionDelegate {}

    unsafe impl CounterActionDelegate {
        #[method(handleAutoCapture:)]
        fn handle_auto_capture(&self, sender: *mut NSObject) {
            // SAFETY: sender is the checkbox NSButton passed by AppKit
            let state: isize = unsafe { msg_send![sender, state] };
            CounterWindow::dispatch(ViewEvent::AutoCaptureToggled(state == NS_CONTROL_STATE_ON));
        }

        #[method(handleCopyText:)]
        fn handle_copy_text(&self, _sender: *mut NSObject) {
            CounterWindow::dispatch(ViewEvent::CopyTextRequested);
        }

        #[method(handleShowDetails:)]
        fn handle_show_details(&self, sender: *mut NSObject) {
            // SAFETY: sender is the details checkbox NSButton passed by AppKit
            let state: isize = unsafe { msg_send![sender, state] };
            CounterWindow::dispatch(ViewEvent::DetailsToggled(state == NS_CONTROL_STATE_ON));
        }

        #[method(handleCopyMetric:)]
        fn handle_copy_metric(&self, sender: *mut NSObject) {
            // SAFETY: sender is a metric row copy button, tagged with its MetricKind::ALL index
            let tag: isize = unsafe { msg_send![sender, tag] };
            match usize::try_from(tag).ok().and_then(|i| MetricKind::ALL.get(i)) {
                Some(&kind) => CounterWindow::dispatch(ViewEvent::CopyMetricRequested(kind)),
                None => warn!("Copy button with unknown metric tag {}", tag),
            }
        }

        #[method(handleClear:)]
        fn handle_clear(&self, _sender: *mut NSObject) {
            CounterWindow::dispatch(ViewEvent::ClearRequested);
        }

        #[method(handlePollTimer:)]
        fn handle_poll_timer(&self, _timer: *mut AnyObject) {
            CounterWindow::dispatch(ViewEvent::PollTick);
        }

        // NSTextDelegate: user edited the text view
        #[method(textDidChange:)]
        fn text_did_change(&self, _notification: *mut AnyObject) {
            CounterWindow::handle_text_changed();
        }

        // NSWindowDelegate: the text box cannot hold keyboard focus while
        // another app (or window) is key
        #[method(windowDidResignKey:)]
        fn window_did_resign_key(&self, _notification: *mut AnyObject) {
            CounterWindow::dispatch(ViewEvent::FocusLost);
        }

        #[method(windowDidBecomeKey:)]
        fn window_did_become_key(&self, _notification: *mut AnyObject) {
            CounterWindow::handle_window_became_key();
        }

        #[method(windowWillClose:)]
        fn window_will_close(&self, _notification: *mut AnyObject) {
            CounterWindow::handle_window_closed();
        }
    }

    unsafe impl NSObjectProtocol for CounterActionDelegate {}
);

impl CounterActionDelegate {
    pub fn new(mtm: MainThreadMarker) -> Retained<Self> {
        let alloc = mtm.alloc::<Self>();
        unsafe { msg_send_id![alloc, init] }
    }
}

// Text view that reports focus changes
declare_class!(
    pub struct FocusTextView;

    unsafe impl ClassType for FocusTextView {
        type Super = NSTextView;
        type Mutability = mutability::MainThreadOnly;
        const NAME: &'static str = "CharcountFocusTextView";
    }

    impl DeclaredClass for FocusTextView {}

    unsafe impl FocusTextView {
        #[method(becomeFirstResponder)]
        fn become_first_responder(&self) -> bool {
            let accepted: bool = unsafe { msg_send![super(self), becomeFirstResponder] };
            if accepted {
                CounterWindow::dispatch(ViewEvent::FocusGained);
            }
            accepted
        }

        #[method(resignFirstResponder)]
        fn resign_first_responder(&self) -> bool {
            let accepted: bool = unsafe { msg_send![super(self), resignFirstResponder] };
            if accepted {
                CounterWindow::dispatch(ViewEvent::FocusLost);
            }
            accepted
        }
    }

    unsafe impl NSObjectProtocol for FocusTextView {}
);

impl FocusTextView {
    pub fn new(mtm: MainThreadMarker, frame: NSRect) -> Retained<Self> {
        let alloc = mtm.alloc::<Self>();
        unsafe { msg_send_id![alloc, initWithFrame: frame] }
    }
}
