use std::io;

use urlmaster::{error::ParseError, resolve::Resolver, Uri, UriRef};

// Reads lines of the form `<base> <reference>` and prints the resolved URI.
fn main() {
    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        let mut parts = line.split_whitespace();
        let (Some(base), Some(r)) = (parts.next(), parts.next()) else {
            println!("Error: expected a base and a reference");
            continue;
        };

        match resolve(base, r) {
            Ok(out) => println!("{out:#?}"),
            Err(e) => println!("Error: {e}"),
        }
    }
}

fn resolve(base: &str, r: &str) -> Result<UriRef<String>, ParseError> {
    let base = Uri::parse(base)?;
    Ok(Resolver::with_base(base).resolve(&UriRef::parse(r)))
}
