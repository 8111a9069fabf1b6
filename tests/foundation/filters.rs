//! Integration tests for the filter policy.

use traceline_foundation::{Action, FilterSpec, is_allowed};

#[test]
fn absent_filter_allows_everything() {
    assert!(is_allowed(&Action::new("ANY"), None));
    assert!(is_allowed(&Action::new(""), None));
}

#[test]
fn whitelist_is_necessary_and_sufficient() {
    let filter = FilterSpec::new().with_whitelist(["INC", "DEC"]);

    assert!(is_allowed(&Action::new("INC"), Some(&filter)));
    assert!(is_allowed(&Action::new("DEC"), Some(&filter)));
    assert!(!is_allowed(&Action::new("RESET"), Some(&filter)));
}

#[test]
fn whitelist_ignores_blacklist_entirely() {
    // The same type in both lists stays allowed; a blacklisted-only type
    // is excluded by whitelist absence, not by the blacklist.
    let filter = FilterSpec::new()
        .with_whitelist(["INC"])
        .with_blacklist(["INC", "DEC"]);

    assert!(is_allowed(&Action::new("INC"), Some(&filter)));
    assert!(!is_allowed(&Action::new("DEC"), Some(&filter)));
}

#[test]
fn blacklist_applies_only_without_whitelist() {
    let filter = FilterSpec::new().with_blacklist(["NOISY"]);

    assert!(!is_allowed(&Action::new("NOISY"), Some(&filter)));
    assert!(is_allowed(&Action::new("QUIET"), Some(&filter)));
}

#[test]
fn empty_lists_allow_everything() {
    let filter = FilterSpec::new();
    assert!(is_allowed(&Action::new("ANY"), Some(&filter)));
}
