#![no_main]
use libfuzzer_sys::fuzz_target;
use urlmaster::{resolve, resolve::Resolver, resolve_in, Uri, UriRef};

fuzz_target!(|data: (&str, &str)| {
    let Ok(base) = Uri::parse(data.0) else {
        assert_eq!(resolve(data.0, data.1).into_scalar(), Some(None));
        return;
    };
    let r = UriRef::parse(data.1);

    let u1 = Resolver::with_base(base).resolve(&r);

    // The dispatcher agrees with the resolver.
    let out = resolve(data.0, data.1).into_scalar().flatten().unwrap();
    assert_eq!(u1, out.as_str());

    // A null base in the three-argument form stands for the location.
    let out = resolve_in(data.0, None::<&str>, data.1).unwrap();
    assert_eq!(out.into_scalar().flatten().as_deref(), Some(u1.as_str()));

    if r.has_scheme() {
        assert_eq!(u1, data.1);
    } else {
        assert!(u1.has_scheme());
        let scheme = u1.scheme().unwrap().as_str();
        assert_eq!(scheme, base.scheme().as_str().to_ascii_lowercase());
    }
    assert_eq!(u1.fragment(), r.fragment());

    let u2 = Resolver::with_base(base)
        .remove_dot_segments(true)
        .resolve(&r);
    if u2.has_authority() {
        assert!(u2.path().segments().all(|seg| seg != "." && seg != ".."));
    }
});
