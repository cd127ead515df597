//! Component-tagged warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times
//! while a style sheet is parsed. Used by the CSS crate to report
//! declarations it drops.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about a dropped declaration or unsupported feature (prints once per
/// unique message).
///
/// # Example
/// ```
/// use koala_common::warning::warn_once;
///
/// warn_once("CSS", "dropped declaration 'text-decoration: bogus'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = warned().get_or_insert_with(HashSet::new).insert(key);

    if should_print {
        let label = format!("[Koala {component}]");
        eprintln!("{} {}", label.yellow().bold(), message.yellow());
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    warned().as_ref().map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before parsing a new style sheet).
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
