//! Objective-C runtime utilities for class lookups

use objc2::runtime::AnyClass;
use tracing::warn;

/// Look up an Objective-C class, logging a warning if it doesn't exist.
///
/// Used for classes reached through raw `msg_send!` rather than typed
/// bindings, so a missing class degrades the feature instead of panicking.
///
/// # Arguments
/// * `class_name` - The name of the Objective-C class to look up.
///
/// # Returns
/// * `Some(&AnyClass)` if the class was found.
/// * `None` if the class was not found (warning logged).
pub(super) fn get_class_or_warn(class_name: &str) -> Option<&'static AnyClass> {
    match AnyClass::get(class_name) {
        Some(class) => Some(class),
        None => {
            warn!(
                "Objective-C class '{}' not found - feature may be unavailable",
                class_name
            );
            None
        }
    }
}
