//! Window creation and layout

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{msg_send, msg_send_id, sel};
use objc2_app_kit::{
    NSBackingStoreType, NSButton, NSScrollView, NSTextField, NSView, NSWindow, NSWindowStyleMask,
};
use objc2_foundation::{CGFloat, MainThreadMarker, NSPoint, NSRect, NSSize, NSString};
use tracing::info;

use super::components::{create_button, create_checkbox, create_label, create_scrollable_text_view};
use super::delegates::{CounterActionDelegate, FocusTextView};
use crate::config::Config;
use crate::metrics::MetricKind;

/// Layout constants
const PADDING: CGFloat = 15.0;
const CONTROL_HEIGHT: CGFloat = 28.0;
const METRIC_ROW_HEIGHT: CGFloat = 24.0;
const NOTICE_HEIGHT: CGFloat = 18.0;
const SPACING: CGFloat = 8.0;
const BUTTON_WIDTH: CGFloat = 90.0;
const COPY_BUTTON_WIDTH: CGFloat = 64.0;
const MIN_TEXT_HEIGHT: CGFloat = 40.0;

/// Bottom edge of the lowest metric row
const METRICS_BOTTOM: CGFloat = PADDING + NOTICE_HEIGHT + SPACING;

/// Autoresizing: width sizable (2) | max Y margin (32), pinned to the bottom
const PIN_BOTTOM: u64 = 34;
/// Autoresizing: min X margin (1) | max Y margin (32), pinned to the bottom-right
const PIN_BOTTOM_RIGHT: u64 = 33;
/// Autoresizing: min Y margin (8), pinned to the top-left
const PIN_TOP_LEFT: u64 = 8;
/// Autoresizing: min X margin (1) | min Y margin (8), pinned to the top-right
const PIN_TOP_RIGHT: u64 = 9;

/// One metric line: value label plus its copy button
pub(super) struct MetricRow {
    pub kind: MetricKind,
    pub label: Retained<NSTextField>,
    pub copy_button: Retained<NSButton>,
}

/// Widgets created for the counter window
pub(super) struct WindowWidgets {
    pub window: Retained<NSWindow>,
    pub scroll_view: Retained<NSScrollView>,
    pub text_view: Retained<FocusTextView>,
    pub auto_capture_checkbox: Retained<NSButton>,
    pub details_checkbox: Retained<NSButton>,
    pub metric_rows: Vec<MetricRow>,
    pub notice_label: Retained<NSTextField>,
}

/// Create the counter window with all UI elements.
///
/// Layout, top to bottom: auto-capture and details checkboxes with
/// Copy/Clear buttons, the text box, one row per metric, and a notice line.
/// Every metric row is created up front; detail rows are hidden or shown
/// by [`layout_metric_rows`].
pub(super) fn create_window(
    mtm: MainThreadMarker,
    config: &Config,
    delegate: &CounterActionDelegate,
) -> WindowWidgets {
    let width = config.window.width;
    let height = config.window.height;

    let frame = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(width, height));
    let style_mask = NSWindowStyleMask::Titled
        | NSWindowStyleMask::Closable
        | NSWindowStyleMask::Miniaturizable
        | NSWindowStyleMask::Resizable;

    // SAFETY: NSWindow initialization with valid parameters on main thread
    let window = unsafe {
        NSWindow::initWithContentRect_styleMask_backing_defer(
            mtm.alloc(),
            frame,
            style_mask,
            NSBackingStoreType::NSBackingStoreBuffered,
            false,
        )
    };

    window.setTitle(&NSString::from_str(&config.window.title));
    unsafe {
        window.setReleasedWhenClosed(false);
        let _: () = msg_send![&window, setMinSize: NSSize::new(560.0, 420.0)];
        let _: () = msg_send![&window, setDelegate: delegate];
        window.center();
    }

    let content_frame = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(width, height));
    let content_view: Retained<NSView> =
        unsafe { msg_send_id![mtm.alloc::<NSView>(), initWithFrame: content_frame] };

    // Bottom: notice line
    let notice_label = create_label(
        mtm,
        NSRect::new(
            NSPoint::new(PADDING, PADDING),
            NSSize::new(width - PADDING * 2.0, NOTICE_HEIGHT),
        ),
        "",
        false,
        PIN_BOTTOM,
    );

    // Metric rows; real positions are set by layout_metric_rows
    let label_width = width - PADDING * 2.0 - COPY_BUTTON_WIDTH - SPACING;
    let metric_rows: Vec<MetricRow> = MetricKind::ALL
        .iter()
        .enumerate()
        .map(|(index, &kind)| {
            let label = create_label(
                mtm,
                NSRect::new(
                    NSPoint::new(PADDING, METRICS_BOTTOM),
                    NSSize::new(label_width, METRIC_ROW_HEIGHT),
                ),
                &format!("{}: 0", kind),
                true,
                PIN_BOTTOM,
            );
            let copy_button = create_button(
                mtm,
                NSRect::new(
                    NSPoint::new(width - PADDING - COPY_BUTTON_WIDTH, METRICS_BOTTOM),
                    NSSize::new(COPY_BUTTON_WIDTH, METRIC_ROW_HEIGHT),
                ),
                "Copy",
                delegate,
                sel!(handleCopyMetric:),
                PIN_BOTTOM_RIGHT,
            );
            unsafe {
                // Tag is the index into MetricKind::ALL
                let _: () = msg_send![&copy_button, setTag: index as isize];
            }
            MetricRow {
                kind,
                label,
                copy_button,
            }
        })
        .collect();

    // Top: controls row
    let controls_y = height - PADDING - CONTROL_HEIGHT;
    let auto_capture_checkbox = create_checkbox(
        mtm,
        NSRect::new(
            NSPoint::new(PADDING, controls_y),
            NSSize::new(200.0, CONTROL_HEIGHT),
        ),
        "Auto-capture clipboard",
        delegate,
        sel!(handleAutoCapture:),
        PIN_TOP_LEFT,
    );
    let details_checkbox = create_checkbox(
        mtm,
        NSRect::new(
            NSPoint::new(PADDING + 200.0 + SPACING, controls_y),
            NSSize::new(130.0, CONTROL_HEIGHT),
        ),
        "Show details",
        delegate,
        sel!(handleShowDetails:),
        PIN_TOP_LEFT,
    );
    let clear_button = create_button(
        mtm,
        NSRect::new(
            NSPoint::new(width - PADDING - BUTTON_WIDTH, controls_y),
            NSSize::new(BUTTON_WIDTH, CONTROL_HEIGHT),
        ),
        "Clear",
        delegate,
        sel!(handleClear:),
        PIN_TOP_RIGHT,
    );
    let copy_button = create_button(
        mtm,
        NSRect::new(
            NSPoint::new(width - PADDING - BUTTON_WIDTH * 2.0 - SPACING, controls_y),
            NSSize::new(BUTTON_WIDTH, CONTROL_HEIGHT),
        ),
        "Copy",
        delegate,
        sel!(handleCopyText:),
        PIN_TOP_RIGHT,
    );

    // Middle: text box spans from the controls down to the notice line,
    // then layout_metric_rows lifts its bottom edge above the visible rows
    let text_top = controls_y - SPACING;
    let (scroll_view, text_view) = create_scrollable_text_view(
        mtm,
        NSRect::new(
            NSPoint::new(PADDING, METRICS_BOTTOM),
            NSSize::new(width - PADDING * 2.0, text_top - METRICS_BOTTOM),
        ),
        delegate,
    );
    layout_metric_rows(&scroll_view, &metric_rows, config.metrics.show_details);

    unsafe {
        content_view.addSubview(&auto_capture_checkbox);
        content_view.addSubview(&details_checkbox);
        content_view.addSubview(&copy_button);
        content_view.addSubview(&clear_button);
        content_view.addSubview(&scroll_view);
        for row in &metric_rows {
            content_view.addSubview(&row.label);
            content_view.addSubview(&row.copy_button);
        }
        content_view.addSubview(&notice_label);
    }

    window.setContentView(Some(&content_view));
    window.makeKeyAndOrderFront(None);

    // Text box starts unfocused
    unsafe {
        let _: bool = msg_send![&window, makeFirstResponder: std::ptr::null::<AnyObject>()];
    }

    info!("Counter window created and shown");

    WindowWidgets {
        window,
        scroll_view,
        text_view,
        auto_capture_checkbox,
        details_checkbox,
        metric_rows,
        notice_label,
    }
}

/// Stack the visible metric rows above the notice line and let the text
/// box take the space that is left.
///
/// # Arguments
/// * `scroll_view` - The scroll view holding the text box. Its top edge is kept.
/// * `rows` - All metric rows, in display order.
/// * `show_details` - Whether detail rows are shown.
pub(super) fn layout_metric_rows(
    scroll_view: &NSScrollView,
    rows: &[MetricRow],
    show_details: bool,
) {
    let visible: Vec<&MetricRow> = rows
        .iter()
        .filter(|row| show_details || !row.kind.is_detail())
        .collect();

    for row in rows {
        let hidden = row.kind.is_detail() && !show_details;
        unsafe {
            let _: () = msg_send![&row.label, setHidden: hidden];
            let _: () = msg_send![&row.copy_button, setHidden: hidden];
        }
    }

    // First row on top
    for (slot, row) in visible.iter().rev().enumerate() {
        let y = METRICS_BOTTOM + slot as CGFloat * METRIC_ROW_HEIGHT;
        unsafe {
            let mut label_frame: NSRect = msg_send![&row.label, frame];
            label_frame.origin.y = y;
            let _: () = msg_send![&row.label, setFrame: label_frame];

            let mut button_frame: NSRect = msg_send![&row.copy_button, frame];
            button_frame.origin.y = y;
            let _: () = msg_send![&row.copy_button, setFrame: button_frame];
        }
    }

    let text_bottom = METRICS_BOTTOM + visible.len() as CGFloat * METRIC_ROW_HEIGHT + SPACING;
    unsafe {
        let mut frame: NSRect = msg_send![scroll_view, frame];
        let top = frame.origin.y + frame.size.height;
        frame.origin.y = text_bottom;
        frame.size.height = (top - text_bottom).max(MIN_TEXT_HEIGHT);
        let _: () = msg_send![scroll_view, setFrame: frame];
    }
}
