//! Tests for deduplicated warnings.
//!
//! The warning set is process-global, so everything runs in one test.

use koala_common::warning::{clear_warnings, warn_once, warning_count};

#[test]
fn test_warnings_are_deduplicated_per_component() {
    clear_warnings();
    assert_eq!(warning_count(), 0);

    warn_once("CSS", "dropped declaration 'color: nope'");
    warn_once("CSS", "dropped declaration 'color: nope'");
    assert_eq!(warning_count(), 1);

    // Same message under another component is a distinct warning.
    warn_once("DOM", "dropped declaration 'color: nope'");
    assert_eq!(warning_count(), 2);

    clear_warnings();
    assert_eq!(warning_count(), 0);
}
