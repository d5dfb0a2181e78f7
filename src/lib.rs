//! # lambars-fallible
//!
//! Fallible function shapes for Rust.
//!
//! ## Overview
//!
//! A closure returning `Result<R, E>` cannot be passed where a plain
//! `Fn(..) -> R` is expected. This library wraps such closures in *throwing
//! shapes* and offers four uniform conversions into non-throwing closures:
//!
//! - **`uncheck`**: raise the error, mapped by an [`ErrorMapper`](mapper::ErrorMapper)
//!   into a [`BoxError`](error::BoxError), as an unwinding panic
//! - **`lift`**: encode failure as `None`
//! - **`ignore`**: substitute a default value for a failure
//! - **`stage`**: settle into an already completed future
//!
//! The caller always chooses the conversion; the library never decides on
//! its own whether an error is raised or swallowed.
//!
//! ## Feature Flags
//!
//! - `stage`: `stage`/`staged` conversions returning `futures::future::Ready`
//! - `logging`: `tracing` events for swallowed and settled errors
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambars_fallible::prelude::*;
//!
//! let read = SupplierWithError::new(|| Err::<String, _>(std::io::Error::other("boom")));
//!
//! assert_eq!(read.clone().lift()(), None);
//! assert_eq!(read.clone().ignore()(), "");
//!
//! let error = catch_unchecked(read.uncheck()).unwrap_err();
//! let wrapped = error.downcast_ref::<WrappedError>().unwrap();
//! assert_eq!(wrapped.cause().to_string(), "boom");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lambars_fallible::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{BoxError, WrappedError, catch_unchecked};
    pub use crate::handler::{
        DefaultSlot, DefaultSource, DefaultValue, ExceptionHandler, NoDefault, Nullable, Primitive,
    };
    pub use crate::mapper::{ErrorMapper, ErrorRule};
    pub use crate::shape::*;
}

pub mod error;
pub mod handler;
pub mod mapper;
pub mod shape;
