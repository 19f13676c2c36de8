//! Main menu with the standard Edit items
//!
//! NSTextView only receives Cmd+C, Cmd+V, Cmd+X, Cmd+A and Cmd+Z through
//! the main menu's key equivalents, so the app installs an Edit menu even
//! though it has no other menus.

use objc2::{msg_send, sel};
use objc2_app_kit::{NSApplication, NSMenu, NSMenuItem};
use objc2_foundation::{MainThreadMarker, NSString};

/// Install a main menu containing only the Edit menu
pub(super) fn setup_edit_menu(mtm: MainThreadMarker, app: &NSApplication) {
    let main_menu = NSMenu::new(mtm);
    let edit_menu = NSMenu::new(mtm);
    unsafe { edit_menu.setTitle(&NSString::from_str("Edit")) };

    // (title, action, key equivalent); Undo/Redo are followed by a separator
    let items = [
        ("Undo", sel!(undo:), "z"),
        ("Redo", sel!(redo:), "Z"),
        ("Cut", sel!(cut:), "x"),
        ("Copy", sel!(copy:), "c"),
        ("Paste", sel!(paste:), "v"),
        ("Select All", sel!(selectAll:), "a"),
    ];

    for (index, (title, action, key)) in items.into_iter().enumerate() {
        let menu_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str(title),
                Some(action),
                &NSString::from_str(key),
            )
        };
        edit_menu.addItem(&menu_item);
        if index == 1 {
            edit_menu.addItem(&NSMenuItem::separatorItem(mtm));
        }
    }

    let edit_menu_item = NSMenuItem::new(mtm);
    edit_menu_item.setSubmenu(Some(&edit_menu));
    main_menu.addItem(&edit_menu_item);

    unsafe {
        let _: () = msg_send![app, setMainMenu: &*main_menu];
    }
}
