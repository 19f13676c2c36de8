//! UI control creation for the counter window

use objc2::rc::Retained;
use objc2::runtime::{AnyObject, Sel};
use objc2::{msg_send, msg_send_id};
use objc2_app_kit::{NSButton, NSFont, NSScrollView, NSTextField};
use objc2_foundation::{CGFloat, MainThreadMarker, NSPoint, NSRect, NSSize, NSString};

use super::delegates::{CounterActionDelegate, FocusTextView};

/// NSBezelStyleRounded
const NS_BEZEL_STYLE_ROUNDED: u64 = 1;

/// NSButtonTypeSwitch (checkbox)
const NS_BUTTON_TYPE_SWITCH: u64 = 3;

/// Create the editable text view inside a scroll view.
///
/// The delegate receives `textDidChange:` for every user edit. The text
/// view wraps at the scroll view width and grows vertically.
///
/// # Arguments
/// * `mtm` - Main thread marker.
/// * `frame` - Frame of the scroll view in its superview.
/// * `delegate` - Text delegate for change notifications.
///
/// # Returns
/// The scroll view (to add to the window) and the text view inside it.
pub(super) fn create_scrollable_text_view(
    mtm: MainThreadMarker,
    frame: NSRect,
    delegate: &CounterActionDelegate,
) -> (Retained<NSScrollView>, Retained<FocusTextView>) {
    let scroll_view: Retained<NSScrollView> =
        unsafe { msg_send_id![mtm.alloc::<NSScrollView>(), initWithFrame: frame] };

    unsafe {
        scroll_view.setHasVerticalScroller(true);
        scroll_view.setHasHorizontalScroller(false);
        let _: () = msg_send![&scroll_view, setAutohidesScrollers: true];
        let _: () = msg_send![&scroll_view, setBorderType: 2u64]; // NSBezelBorder

        // Resize with window (width sizable | height sizable)
        let _: () = msg_send![&scroll_view, setAutoresizingMask: 18u64];
    }

    let content_size: NSSize = unsafe { msg_send![&scroll_view, contentSize] };
    let text_frame = NSRect::new(NSPoint::new(0.0, 0.0), content_size);
    let text_view = FocusTextView::new(mtm, text_frame);

    unsafe {
        text_view.setEditable(true);
        text_view.setSelectable(true);
        let _: () = msg_send![&text_view, setRichText: false];
        let _: () = msg_send![&text_view, setAllowsUndo: true];

        let font = NSFont::systemFontOfSize(14.0);
        text_view.setFont(Some(&font));

        // Word wrap to the scroll view width
        let text_container: *mut AnyObject = msg_send![&text_view, textContainer];
        if !text_container.is_null() {
            let _: () = msg_send![text_container, setWidthTracksTextView: true];
            let container_size = NSSize::new(content_size.width, CGFloat::MAX);
            let _: () = msg_send![text_container, setContainerSize: container_size];
        }
        let _: () = msg_send![&text_view, setMinSize: NSSize::new(0.0, content_size.height)];
        let _: () = msg_send![&text_view, setMaxSize: NSSize::new(CGFloat::MAX, CGFloat::MAX)];
        let _: () = msg_send![&text_view, setVerticallyResizable: true];
        let _: () = msg_send![&text_view, setHorizontallyResizable: false];
        // Width sizable
        let _: () = msg_send![&text_view, setAutoresizingMask: 2u64];

        let _: () = msg_send![&text_view, setDelegate: delegate];

        scroll_view.setDocumentView(Some(&text_view));
    }

    (scroll_view, text_view)
}

/// Create a non-editable, borderless label.
///
/// # Arguments
/// * `mtm` - Main thread marker.
/// * `frame` - Label frame.
/// * `text` - Initial text.
/// * `bold` - Bold 14pt system font when true, regular 12pt otherwise.
/// * `autoresizing_mask` - How the label follows window resizes.
pub(super) fn create_label(
    mtm: MainThreadMarker,
    frame: NSRect,
    text: &str,
    bold: bool,
    autoresizing_mask: u64,
) -> Retained<NSTextField> {
    let label: Retained<NSTextField> =
        unsafe { msg_send_id![mtm.alloc::<NSTextField>(), initWithFrame: frame] };

    unsafe {
        label.setEditable(false);
        label.setSelectable(false);
        label.setBordered(false);
        label.setDrawsBackground(false);
        label.setStringValue(&NSString::from_str(text));

        let font = if bold {
            NSFont::boldSystemFontOfSize(14.0)
        } else {
            NSFont::systemFontOfSize(12.0)
        };
        label.setFont(Some(&font));

        let _: () = msg_send![&label, setAutoresizingMask: autoresizing_mask];
    }

    label
}

/// Create a rounded push button wired to `action` on the delegate.
///
/// # Arguments
/// * `mtm` - Main thread marker.
/// * `frame` - Button frame.
/// * `title` - Button title.
/// * `delegate` - Action target.
/// * `action` - Selector implemented by `delegate`, called with the button as sender.
/// * `autoresizing_mask` - How the button follows window resizes.
pub(super) fn create_button(
    mtm: MainThreadMarker,
    frame: NSRect,
    title: &str,
    delegate: &CounterActionDelegate,
    action: Sel,
    autoresizing_mask: u64,
) -> Retained<NSButton> {
    let button: Retained<NSButton> =
        unsafe { msg_send_id![mtm.alloc::<NSButton>(), initWithFrame: frame] };

    unsafe {
        let ns_title = NSString::from_str(title);
        let _: () = msg_send![&button, setTitle: &*ns_title];
        let _: () = msg_send![&button, setBezelStyle: NS_BEZEL_STYLE_ROUNDED];
        let _: () = msg_send![&button, setTarget: delegate];
        let _: () = msg_send![&button, setAction: action];
        let _: () = msg_send![&button, setAutoresizingMask: autoresizing_mask];
    }

    button
}

/// Create a checkbox wired to `action` on the delegate.
///
/// Same as [`create_button`] with the switch button type. The action reads
/// the new state from the sender.
pub(super) fn create_checkbox(
    mtm: MainThreadMarker,
    frame: NSRect,
    title: &str,
    delegate: &CounterActionDelegate,
    action: Sel,
    autoresizing_mask: u64,
) -> Retained<NSButton> {
    let checkbox = create_button(mtm, frame, title, delegate, action, autoresizing_mask);

    unsafe {
        let _: () = msg_send![&checkbox, setButtonType: NS_BUTTON_TYPE_SWITCH];
    }

    checkbox
}
