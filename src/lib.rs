#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Resolution of URI references against base URIs, as in [Section 5 of RFC 3986].
//!
//! [Section 5 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5
//!
//! The main entry points are [`resolve()`] and [`resolve_in`], which accept either
//! single strings or (nested) sequences of them and broadcast the resolution over
//! the cross product of their arguments. An unusable base yields `None` at the
//! positions it takes part in, rather than an error.
//!
//! ```
//! use urlmaster::{resolve, Shaped};
//!
//! let out = resolve("http://www.google.com/foo/bar", ["/a", "b", "http://www.yahoo.com/c"]);
//! assert_eq!(
//!     out.as_deref(),
//!     Shaped::from([
//!         "http://www.google.com/a",
//!         "http://www.google.com/foo/b",
//!         "http://www.yahoo.com/c",
//!     ]),
//! );
//!
//! // The drive letter of a `file:///` base is kept.
//! let out = resolve("file:///C:/foo/bar", "/a");
//! assert_eq!(out.as_deref(), Shaped::from("file:///C:/a"));
//! ```
//!
//! For resolution against a single base with typed access to the output,
//! see [`Resolver`](resolve::Resolver), [`Uri`] and [`UriRef`].
//!
//! # Feature flags
//!
//! All features except `std` are disabled by default.
//!
//! - `std`: Enables `std` support. This includes [`Error`] implementations.
//!
//! - `serde`: Enables [`serde`] support. [`Uri`], [`UriRef`] and [`Shaped`]
//!   serialize as strings or (nested) arrays of strings and nulls.
//!
//! - `tracing`: Emits [`tracing`] events. Rejected bases and locations are
//!   reported at the `DEBUG` level, and each resolved pair at the `TRACE` level.
//!
//! [`Error`]: std::error::Error
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

extern crate alloc;

pub mod component;
pub mod error;
pub mod resolve;

mod dispatch;
mod empty_path;
mod fmt;
mod imp;
mod internal;
mod parser;
mod shape;
mod table;

pub use dispatch::{is_resolvable_base, resolve, resolve_in, Broadcaster};
pub use empty_path::{add_path_empty, clear_path_empty};
pub use imp::{Uri, UriRef};
pub use shape::{Arg, Leaves, Resolved, Shaped};
