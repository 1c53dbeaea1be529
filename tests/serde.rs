#![cfg(feature = "serde")]

use serde_json::json;
use urlmaster::{resolve, Resolved, Shaped, Uri, UriRef};

#[test]
fn resolved_serializes_as_json_shape() {
    let out = resolve(
        [Some("http://www.google.com/foo/bar"), Some("abc")],
        ["/a", "b"],
    );
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!([
            ["http://www.google.com/a", "http://www.google.com/foo/b"],
            [null, null],
        ])
    );

    let out = resolve("abc", "/def");
    assert_eq!(serde_json::to_string(&out).unwrap(), "null");
}

#[test]
fn resolved_deserializes_from_json_shape() {
    let value: Resolved = serde_json::from_str(r#"["a", null, ["b", []]]"#).unwrap();
    assert_eq!(
        value,
        Shaped::Seq(vec![
            Shaped::Scalar(Some("a".to_owned())),
            Shaped::Scalar(None),
            Shaped::Seq(vec![Shaped::Scalar(Some("b".to_owned())), Shaped::Seq(vec![])]),
        ])
    );

    let value: Resolved = serde_json::from_str("null").unwrap();
    assert_eq!(value, Shaped::Scalar(None));

    assert!(serde_json::from_str::<Resolved>("1").is_err());
    assert!(serde_json::from_str::<Resolved>(r#"{"a": "b"}"#).is_err());
}

#[test]
fn deserialized_arguments_can_be_resolved() {
    let bases: Resolved =
        serde_json::from_str(r#"["http://www.google.com/foo/bar", null]"#).unwrap();
    let refs: Resolved = serde_json::from_str(r#""a""#).unwrap();
    let out = resolve(bases.as_deref(), refs.as_deref());
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!(["http://www.google.com/foo/a", null])
    );
}

#[test]
fn uri_serde() {
    let uri = Uri::parse("http://h/a?b#c").unwrap();
    assert_eq!(serde_json::to_string(&uri).unwrap(), r#""http://h/a?b#c""#);

    let uri: Uri<String> = serde_json::from_str(r#""file:///C:/x""#).unwrap();
    assert_eq!(uri.path().drive_letter(), Some("C:"));

    let e = serde_json::from_str::<Uri<String>>(r#""abc""#).unwrap_err();
    assert!(e.to_string().contains("missing scheme at index 0"));

    let r: UriRef<String> = serde_json::from_str(r#""../a""#).unwrap();
    assert_eq!(r.path().as_str(), "../a");
    assert_eq!(serde_json::to_string(&r).unwrap(), r#""../a""#);
}
