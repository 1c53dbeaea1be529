#![no_main]
use libfuzzer_sys::fuzz_target;
use urlmaster::{add_path_empty, clear_path_empty, UriRef};

fuzz_target!(|data: &str| {
    let added = add_path_empty(data);
    let cleared = clear_path_empty(data);

    // Both are idempotent.
    assert_eq!(add_path_empty(&added), added);
    assert_eq!(clear_path_empty(&cleared), cleared);

    let r = UriRef::parse(data);
    if r.has_authority() && r.path().is_empty() {
        assert_eq!(clear_path_empty(&added), data);
    }
    if r.has_authority() && r.path().as_str() == "/" {
        assert_eq!(add_path_empty(&cleared), data);
    }
    if !r.has_authority() {
        assert_eq!(added, data);
        assert_eq!(cleared, data);
    }
});
