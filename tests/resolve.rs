use urlmaster::{resolve::Resolver, Uri, UriRef};

trait Test {
    fn pass(&self, r: &str, expected: &str);
    fn pass_raw(&self, r: &str, expected: &str);
}

impl Test for Uri<&str> {
    // Resolves with dot segments removed.
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let resolver = Resolver::with_base(*self).remove_dot_segments(true);
        assert_eq!(resolver.resolve(&UriRef::parse(r)), expected);
    }

    // Resolves with dot segments passed through.
    #[track_caller]
    fn pass_raw(&self, r: &str, expected: &str) {
        let resolver = Resolver::with_base(*self);
        assert_eq!(resolver.resolve(&UriRef::parse(r)), expected);
    }
}

#[test]
fn resolve() {
    // Examples from Section 5.4 of RFC 3986.
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");

    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");

    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    base.pass("http:g", "http:g");
}

#[test]
fn dot_segments_pass_through_by_default() {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass_raw("g", "http://a/b/c/g");
    base.pass_raw("./g", "http://a/b/c/./g");
    base.pass_raw("../g", "http://a/b/c/../g");
    base.pass_raw("/./g", "http://a/./g");
    base.pass_raw("//g/../h", "http://g/../h");
    base.pass_raw("http://x/./y", "http://x/./y");
    base.pass_raw("", "http://a/b/c/d;p?q");
    base.pass_raw("#s", "http://a/b/c/d;p?q#s");
    base.pass_raw("?y", "http://a/b/c/d;p?y");
}

#[test]
fn full_uri_reference() {
    let base = Uri::parse("http://www.google.com/foo/bar").unwrap();

    // Returned as it is unless dot segments are removed.
    base.pass_raw("HTTP://www.yahoo.com/a/./b", "HTTP://www.yahoo.com/a/./b");
    base.pass("HTTP://www.yahoo.com/a/./b", "http://www.yahoo.com/a/b");
    base.pass_raw("mailto:someone@example.com", "mailto:someone@example.com");
    base.pass("mailto:someone@example.com", "mailto:someone@example.com");
}

#[test]
fn query_and_fragment() {
    let base = Uri::parse("http://h/a/b?bq#bf").unwrap();

    base.pass_raw("c", "http://h/a/c");
    base.pass_raw("/c", "http://h/c");
    base.pass_raw("//g", "http://g");
    base.pass_raw("c?q#f", "http://h/a/c?q#f");
    base.pass_raw("/c#f", "http://h/c#f");
    base.pass_raw("?", "http://h/a/b?");
    base.pass_raw("#", "http://h/a/b?bq#");
}

#[test]
fn directory_of_base_path() {
    Uri::parse("http://h/foo/bar").unwrap().pass_raw("a", "http://h/foo/a");
    Uri::parse("http://h/foo/").unwrap().pass_raw("a", "http://h/foo/a");
    Uri::parse("http://h").unwrap().pass_raw("a", "http://h/a");
    Uri::parse("http://h?q").unwrap().pass_raw("a", "http://h/a");
    Uri::parse("http://h").unwrap().pass("../a", "http://h/a");
    Uri::parse("http://h").unwrap().pass_raw("", "http://h");
}

#[test]
fn absolute_path_ignores_base_path() {
    let r = UriRef::parse("/x?y");
    let out: Vec<_> = ["http://h/a/b", "http://h/c/d/e", "http://h", "http://h/?q"]
        .into_iter()
        .map(|base| Resolver::with_base(Uri::parse(base).unwrap()).resolve(&r))
        .collect();
    assert!(out.iter().all(|uri| uri == "http://h/x?y"));
}

#[test]
fn scheme_is_lowercased() {
    let base = Uri::parse("HTTP://Example.COM/a/b").unwrap();
    base.pass_raw("c", "http://Example.COM/a/c");
    base.pass_raw("//Other.ORG", "http://Other.ORG");
}

#[test]
fn double_slash_path_is_kept_apart_from_authority() {
    let base = Uri::parse("http://h/a/b").unwrap();
    base.pass_raw("//g//x", "http://g//x");
    base.pass("/..//g", "http://h//g");
}

#[test]
fn resolved_uri_ref_is_typed() {
    let base = Uri::parse("http://www.google.com/foo/bar").unwrap();
    let resolver = Resolver::with_base(base);
    assert_eq!(resolver.base(), &base);

    let out = resolver.resolve(&UriRef::parse("a?b#c"));
    assert_eq!(out.scheme().unwrap().as_str(), "http");
    assert_eq!(out.authority().unwrap().host(), "www.google.com");
    assert_eq!(out.path().as_str(), "/foo/a");
    assert_eq!(out.query(), Some("b"));
    assert_eq!(out.fragment(), Some("c"));
    assert!(out.is_resolvable_base());
    assert_eq!(out.into_string(), "http://www.google.com/foo/a?b#c");
}

#[test]
fn resolver_debug() {
    let base = Uri::parse("http://www.google.com/foo/bar").unwrap();
    let s = format!("{:?}", Resolver::with_base(base).remove_dot_segments(true));
    assert!(s.starts_with("Resolver { base: Uri {"));
    assert!(s.contains("\"/foo/bar\""));
    assert!(s.contains("remove_dot_segments: true"));
    assert!(s.contains("windows_drive_letters: true"));

    let owned = Resolver::with_base(base.to_owned()).windows_drive_letters(false);
    assert!(format!("{owned:?}").contains("windows_drive_letters: false"));
}
