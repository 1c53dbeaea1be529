use criterion::{black_box, criterion_group, criterion_main, Criterion};
use iri_string::{
    format::ToDedicatedString,
    types::{UriAbsoluteStr, UriReferenceStr},
};
use url::Url;
use urlmaster::{resolve::Resolver, Broadcaster, Uri, UriRef};

criterion_group!(
    benches,
    bench_parse,
    bench_resolve,
    bench_resolve_dot_segments,
    bench_resolve_iri_string,
    bench_resolve_url,
    bench_broadcast,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
const RESOLVE_CASE_BASE: &str = "http://example.com/foo/bar";
const RESOLVE_CASE_REF: &str = "../baz";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| UriRef::parse(black_box(PARSE_CASE))));
}

fn bench_resolve(c: &mut Criterion) {
    let base = Uri::parse(RESOLVE_CASE_BASE).unwrap();
    let r = UriRef::parse(RESOLVE_CASE_REF);
    let resolver = Resolver::with_base(base);
    c.bench_function("resolve", |b| b.iter(|| resolver.resolve(black_box(&r))));
}

fn bench_resolve_dot_segments(c: &mut Criterion) {
    let base = Uri::parse(RESOLVE_CASE_BASE).unwrap();
    let r = UriRef::parse(RESOLVE_CASE_REF);
    let resolver = Resolver::with_base(base).remove_dot_segments(true);
    c.bench_function("resolve_dot_segments", |b| {
        b.iter(|| resolver.resolve(black_box(&r)))
    });
}

fn bench_resolve_iri_string(c: &mut Criterion) {
    let base = UriAbsoluteStr::new(RESOLVE_CASE_BASE).unwrap();
    let r = UriReferenceStr::new(RESOLVE_CASE_REF).unwrap();
    c.bench_function("resolve_iri_string", |b| {
        b.iter(|| r.resolve_against(base).to_dedicated_string())
    });
}

fn bench_resolve_url(c: &mut Criterion) {
    let base = Url::parse(RESOLVE_CASE_BASE).unwrap();
    c.bench_function("resolve_url", |b| {
        b.iter(|| base.join(black_box(RESOLVE_CASE_REF)))
    });
}

fn bench_broadcast(c: &mut Criterion) {
    let bases = [
        "http://www.google.com/foo/bar",
        "http://www.yahoo.com/ace/fly",
        "file:///C:/a/b",
        "abc",
    ];
    let refs = ["/a", "b", "../c", "http://www.msn.com/d", "?q", "#f"];
    let broadcaster = Broadcaster::new();
    c.bench_function("broadcast", |b| {
        b.iter(|| broadcaster.resolve(black_box(bases), black_box(refs)))
    });
}
