//! Fuzz target: `CookTime::parse`
//!
//! Arbitrary text from the add/edit form must never panic, and anything
//! accepted must be a positive duration whose `MM:SS` rendering parses
//! back to the same value.
//!
//! cargo fuzz run fuzz_cook_time_parse

#![no_main]

use fryertimer::CookTime;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(cook) = CookTime::parse(text) {
        assert!(cook.as_secs() > 0, "accepted zero duration from {text:?}");

        let (_, seconds) = cook.to_parts();
        assert!(seconds <= 59);

        let again = CookTime::parse(&cook.to_string()).expect("rendered cook time must parse");
        assert_eq!(again, cook);
    }
});
