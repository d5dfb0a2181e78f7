//! Error types raised by unchecked conversions.
//!
//! A throwing operation fails with its own declared error type. When such an
//! operation is converted with `uncheck`, a failure has to leave a
//! non-throwing signature, so the declared error is mapped into a
//! [`BoxError`] and raised as an unwinding panic carrying that error as its
//! payload. [`catch_unchecked`] turns such a panic back into a value.
//!
//! # Examples
//!
//! ```rust
//! use lambars_fallible::error::{WrappedError, catch_unchecked};
//! use lambars_fallible::shape::SupplierWithError;
//!
//! let supplier = SupplierWithError::new(|| Err::<i32, _>("boom".to_string()));
//! let unchecked = supplier.uncheck();
//!
//! let error = catch_unchecked(|| unchecked()).unwrap_err();
//! let wrapped = error.downcast_ref::<WrappedError>().unwrap();
//! assert_eq!(wrapped.cause().to_string(), "boom");
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// An owned, thread-safe, type-erased error.
///
/// This is the type every error mapper produces and the payload of the panic
/// raised by an unchecked operation.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The default unchecked error, carrying the original error as its cause.
///
/// Produced by [`ErrorMapper::wrapping`](crate::mapper::ErrorMapper::wrapping),
/// which is the mapper used when none has been configured.
///
/// # Examples
///
/// ```rust
/// use std::error::Error;
/// use lambars_fallible::error::WrappedError;
///
/// let error = WrappedError::new(std::io::Error::other("disk full"));
/// assert_eq!(error.to_string(), "wrapped error: disk full");
/// assert_eq!(error.source().unwrap().to_string(), "disk full");
/// ```
#[derive(Debug)]
pub struct WrappedError {
    cause: BoxError,
}

impl WrappedError {
    /// Wraps `cause`.
    pub fn new<C>(cause: C) -> Self
    where
        C: Into<BoxError>,
    {
        Self {
            cause: cause.into(),
        }
    }

    /// Returns the original error.
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Consumes the wrapper and returns the original error.
    pub fn into_cause(self) -> BoxError {
        self.cause
    }

    /// Returns the original error as `C` if it has that type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::error::WrappedError;
    ///
    /// let error = WrappedError::new(std::io::Error::other("boom"));
    /// assert!(error.downcast_cause::<std::io::Error>().is_some());
    /// assert!(error.downcast_cause::<std::fmt::Error>().is_none());
    /// ```
    pub fn downcast_cause<C>(&self) -> Option<&C>
    where
        C: Error + 'static,
    {
        self.cause.downcast_ref::<C>()
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "wrapped error: {}", self.cause)
    }
}

impl Error for WrappedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Raises `error` as an unchecked error.
///
/// The error becomes the payload of an unwinding panic so that
/// [`catch_unchecked`] can recover it intact. The panic reports the location
/// of the caller.
#[track_caller]
pub(crate) fn raise(error: BoxError) -> ! {
    panic::panic_any(error)
}

/// Runs `operation`, recovering an error raised by an unchecked conversion.
///
/// Returns `Ok` with the value of `operation` when it completes, and `Err`
/// with the mapped error when an `uncheck`ed operation failed inside it.
/// Panics of any other origin are resumed unchanged.
///
/// Requires the unwinding panic strategy.
///
/// # Errors
///
/// Returns the [`BoxError`] raised by the failing unchecked operation.
///
/// # Examples
///
/// ```rust
/// use lambars_fallible::error::catch_unchecked;
/// use lambars_fallible::shape::FunctionWithError;
///
/// let parse = FunctionWithError::new(|text: &str| text.parse::<i32>()).uncheck();
///
/// assert_eq!(catch_unchecked(|| parse("42")).unwrap(), 42);
/// assert!(catch_unchecked(|| parse("forty-two")).is_err());
/// ```
pub fn catch_unchecked<T, F>(operation: F) -> Result<T, BoxError>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(operation)).map_err(recover)
}

fn recover(payload: Box<dyn Any + Send>) -> BoxError {
    match payload.downcast::<BoxError>() {
        Ok(error) => *error,
        Err(other) => panic::resume_unwind(other),
    }
}
