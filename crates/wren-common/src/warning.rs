//! Deduplicated engine warnings.
//!
//! Layout and paint never fail on odd input; they fall back to a simpler
//! behavior instead. Each fallback is reported once per unique message so a
//! large tree does not flood the log.
//!
//! When a `log` backend is installed the warning goes through `log::warn!`
//! with the component as target. Otherwise it is written to stderr in yellow.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use log::Level;
use owo_colors::OwoColorize;

/// Global set of warnings we've already emitted.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Report a degraded-input fallback (emitted once per unique message).
///
/// # Example
/// ```
/// wren_common::warning::warn_once("paint", "double border thinner than 3px drawn solid");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = warning_key(component, message);
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    let first_time = guard.get_or_insert_with(HashSet::new).insert(key);
    drop(guard);

    if !first_time {
        return;
    }
    if log::log_enabled!(target: component, Level::Warn) {
        log::warn!(target: component, "{message}");
    } else {
        eprintln!("{}", format!("[Wren {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once` has already emitted this message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = warning_key(component, message);
    let guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    guard.as_ref().is_some_and(|set| set.contains(&key))
}

/// Forget every recorded warning (call when loading a new scene).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
