//! The conversion contract shared by every throwing shape.
//!
//! A throwing operation either succeeds with a value or fails with its
//! declared error. That is the only decision point of this library; what
//! happens on the failing branch depends on which conversion was requested:
//!
//! | conversion | success | failure |
//! |------------|---------|---------|
//! | `uncheck`  | the value | the mapped error is raised |
//! | `lift`     | `Some(value)` | `None` |
//! | `ignore`   | the value | the default value |
//! | `stage`    | a future ready with `Ok(value)` | a future ready with `Err(error)` |
//!
//! [`ExceptionHandler`] implements these branches once. It is plain
//! configuration: an optional [`ErrorMapper`] and a default value source,
//! either [`NoDefault`] or a [`DefaultValue`] hook.
//!
//! How `lift` behaves depends on the kind of result the shape produces, and
//! is selected through [`ResultKind`]:
//!
//! - [`ObjectResult`]: lifts into `Option<R>`.
//! - [`PrimitiveResult`]: there is no absent primitive, so `lift` behaves as
//!   `ignore`.
//! - [`VoidResult`]: there is no value, so `lift` behaves as `ignore`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{self, BoxError};
use crate::mapper::ErrorMapper;

/// A shared zero-argument hook producing the value returned by `ignore`
/// when the operation fails.
///
/// # Examples
///
/// ```rust
/// use lambars_fallible::handler::DefaultValue;
///
/// let fallback = DefaultValue::constant("n/a".to_string());
/// assert_eq!(fallback.get(), "n/a");
/// ```
pub struct DefaultValue<R> {
    hook: Arc<dyn Fn() -> R + Send + Sync>,
}

impl<R> DefaultValue<R> {
    /// Creates a default value computed by `hook` on every failure.
    pub fn new<H>(hook: H) -> Self
    where
        H: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            hook: Arc::new(hook),
        }
    }

    /// Creates a default value that clones `value` on every failure.
    pub fn constant(value: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        Self::new(move || value.clone())
    }

    /// Produces the default value.
    pub fn get(&self) -> R {
        (self.hook)()
    }
}

impl<R> Clone for DefaultValue<R> {
    fn clone(&self) -> Self {
        Self {
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<R> fmt::Debug for DefaultValue<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("DefaultValue").finish_non_exhaustive()
    }
}

/// A result type whose successful value may itself be absent.
///
/// `lift_flatten` treats an absent successful value exactly like a failure:
/// both become `None`.
pub trait Nullable {
    /// The present value.
    type Value;

    /// Converts into `Some(value)` when present.
    fn into_option(self) -> Option<Self::Value>;
}

impl<X> Nullable for Option<X> {
    type Value = X;

    fn into_option(self) -> Option<X> {
        self
    }
}

/// The default value source of a handler without a configured default
/// value: `ignore` falls back to `R::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDefault;

/// A default value source that may or may not hold a configured value.
///
/// This trait is sealed. It is implemented by [`NoDefault`] and
/// [`DefaultValue`].
pub trait DefaultSlot<R>: sealed::Sealed {
    /// Produces the configured default value, if one was configured.
    fn configured(&self) -> Option<R>;
}

/// A default value source that can always produce a value.
///
/// [`DefaultValue`] always can; [`NoDefault`] can when `R: Default`.
pub trait DefaultSource<R>: DefaultSlot<R> {
    /// Produces the value `ignore` substitutes for a failure.
    fn default_value(&self) -> R;
}

impl<R> DefaultSlot<R> for NoDefault {
    fn configured(&self) -> Option<R> {
        None
    }
}

impl<R> DefaultSource<R> for NoDefault
where
    R: Default,
{
    fn default_value(&self) -> R {
        R::default()
    }
}

impl<R> DefaultSlot<R> for DefaultValue<R> {
    fn configured(&self) -> Option<R> {
        Some(self.get())
    }
}

impl<R> DefaultSource<R> for DefaultValue<R> {
    fn default_value(&self) -> R {
        self.get()
    }
}

/// Configuration applied by the conversions of a throwing operation.
///
/// Without an error mapper, `uncheck` wraps the original error in a
/// [`WrappedError`](crate::error::WrappedError). The default value source
/// `D` is part of the type: [`NoDefault`] falls back to `R::default()`, and
/// [`with_default_value`](Self::with_default_value) switches to a
/// [`DefaultValue`] hook, which lets `ignore` work for result types without
/// a `Default` implementation.
///
/// The configured mapper is read each time a converted operation fails, so
/// a mapper reading shared state observes that state at the time of the
/// failure.
///
/// # Type Parameters
///
/// * `E` - The declared error type
/// * `R` - The result type
/// * `D` - The default value source
///
/// # Examples
///
/// ```rust
/// use lambars_fallible::handler::{DefaultValue, ExceptionHandler};
///
/// let handler: ExceptionHandler<std::io::Error, i32, DefaultValue<i32>> =
///     ExceptionHandler::new().with_default_value(|| -1);
///
/// assert_eq!(handler.ignore(Ok(5)), 5);
/// assert_eq!(handler.ignore(Err(std::io::Error::other("boom"))), -1);
/// assert_eq!(handler.lift(Err(std::io::Error::other("boom"))), None);
/// ```
pub struct ExceptionHandler<E, R, D = NoDefault> {
    error_mapper: Option<ErrorMapper<E>>,
    default_value: D,
    marker: PhantomData<fn() -> R>,
}

impl<E, R> ExceptionHandler<E, R> {
    /// Creates a handler using the library defaults.
    pub const fn new() -> Self {
        Self {
            error_mapper: None,
            default_value: NoDefault,
            marker: PhantomData,
        }
    }
}

impl<E, R, D> ExceptionHandler<E, R, D> {
    /// Replaces the error mapper used by `uncheck`.
    #[must_use]
    pub fn with_error_mapper(mut self, error_mapper: ErrorMapper<E>) -> Self {
        self.error_mapper = Some(error_mapper);
        self
    }

    /// Replaces the value returned by `ignore` on failure.
    #[must_use]
    pub fn with_default_value<H>(self, hook: H) -> ExceptionHandler<E, R, DefaultValue<R>>
    where
        H: Fn() -> R + Send + Sync + 'static,
    {
        ExceptionHandler {
            error_mapper: self.error_mapper,
            default_value: DefaultValue::new(hook),
            marker: PhantomData,
        }
    }

    /// Returns the configured error mapper, if any.
    pub const fn error_mapper(&self) -> Option<&ErrorMapper<E>> {
        self.error_mapper.as_ref()
    }

    /// Returns the value `ignore` substitutes for a failure.
    pub fn default_value(&self) -> R
    where
        D: DefaultSource<R>,
    {
        self.default_value.default_value()
    }

    /// Maps `error` with the configured mapper, or wraps it.
    pub fn map_error(&self, error: E) -> BoxError
    where
        E: Into<BoxError>,
    {
        match &self.error_mapper {
            Some(error_mapper) => error_mapper.map(error),
            None => ErrorMapper::wrapping().map(error),
        }
    }

    /// Returns the value, or raises the mapped error.
    ///
    /// # Panics
    ///
    /// Raises the mapped error as an unwinding panic when `result` is an
    /// error. Use [`catch_unchecked`](crate::error::catch_unchecked) to
    /// recover it. The panic hook runs for every raised error, recovered or
    /// not, and reports the caller of this method.
    #[track_caller]
    pub fn uncheck(&self, result: Result<R, E>) -> R
    where
        E: Into<BoxError>,
    {
        match result {
            Ok(value) => value,
            Err(error) => error::raise(self.map_error(error)),
        }
    }

    /// Returns `Some(value)`, or `None` when `result` is an error.
    pub fn lift(&self, result: Result<R, E>) -> Option<R> {
        result
            .inspect_err(|_| swallowed::<E>("lift"))
            .ok()
    }

    /// Returns the present value, or `None` when the value is absent or
    /// `result` is an error.
    ///
    /// An absent successful value cannot be told apart from a failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::handler::ExceptionHandler;
    ///
    /// let handler: ExceptionHandler<String, Option<i32>> = ExceptionHandler::new();
    /// assert_eq!(handler.lift_flatten(Ok(Some(1))), Some(1));
    /// assert_eq!(handler.lift_flatten(Ok(None)), None);
    /// assert_eq!(handler.lift_flatten(Err("boom".to_string())), None);
    /// ```
    pub fn lift_flatten(&self, result: Result<R, E>) -> Option<R::Value>
    where
        R: Nullable,
    {
        self.lift(result).and_then(Nullable::into_option)
    }

    /// Returns the value, or the default value when `result` is an error.
    pub fn ignore(&self, result: Result<R, E>) -> R
    where
        D: DefaultSource<R>,
    {
        result.unwrap_or_else(|_| {
            swallowed::<E>("ignore");
            self.default_value()
        })
    }

    /// Returns the value, or a clone of `default` when `result` is an error.
    pub fn ignore_or(&self, result: Result<R, E>, default: &R) -> R
    where
        R: Clone,
    {
        result.unwrap_or_else(|_| {
            swallowed::<E>("ignore");
            default.clone()
        })
    }

    /// Returns the value, or the configured default value when `result` is
    /// an error, falling back to `fallback` when none is configured.
    ///
    /// `conversion` names the conversion in the swallowed-error event.
    pub(crate) fn substitute<G>(
        &self,
        result: Result<R, E>,
        conversion: &'static str,
        fallback: G,
    ) -> R
    where
        D: DefaultSlot<R>,
        G: FnOnce() -> R,
    {
        result.unwrap_or_else(|_| {
            swallowed::<E>(conversion);
            self.default_value.configured().unwrap_or_else(fallback)
        })
    }

    /// Settles `result` into an already completed future.
    ///
    /// The failure carries the original error, not the mapped one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::FutureExt;
    /// use lambars_fallible::handler::ExceptionHandler;
    ///
    /// let handler: ExceptionHandler<String, i32> = ExceptionHandler::new();
    /// let staged = handler.stage(Err("boom".to_string()));
    /// assert_eq!(staged.now_or_never(), Some(Err("boom".to_string())));
    /// ```
    #[cfg(feature = "stage")]
    pub fn stage(&self, result: Result<R, E>) -> futures::future::Ready<Result<R, E>> {
        futures::future::ready(result.inspect_err(|_| settled_failure::<E>()))
    }
}

impl<E, R> Default for ExceptionHandler<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R, D> Clone for ExceptionHandler<E, R, D>
where
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            error_mapper: self.error_mapper.clone(),
            default_value: self.default_value.clone(),
            marker: PhantomData,
        }
    }
}

impl<E, R, D> fmt::Debug for ExceptionHandler<E, R, D>
where
    D: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ExceptionHandler")
            .field("error_mapper", &self.error_mapper)
            .field("default_value", &self.default_value)
            .finish()
    }
}

fn swallowed<E>(conversion: &'static str) {
    #[cfg(feature = "logging")]
    tracing::debug!(
        conversion,
        error_type = std::any::type_name::<E>(),
        "error swallowed"
    );
    #[cfg(not(feature = "logging"))]
    let _ = conversion;
}

#[cfg(feature = "stage")]
fn settled_failure<E>() {
    #[cfg(feature = "logging")]
    tracing::debug!(
        conversion = "stage",
        error_type = std::any::type_name::<E>(),
        "failure settled"
    );
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for bool {}

    impl Sealed for super::NoDefault {}
    impl<R> Sealed for super::DefaultValue<R> {}

    impl Sealed for super::ObjectResult {}
    impl Sealed for super::PrimitiveResult {}
    impl Sealed for super::VoidResult {}
}

/// The primitive result kinds: `i32`, `i64`, `f64` and `bool`.
///
/// Their default value is their zero (`0`, `0`, `0.0`, `false`).
pub trait Primitive: sealed::Sealed + Copy + Default + PartialEq + fmt::Debug {}

impl Primitive for i32 {}
impl Primitive for i64 {}
impl Primitive for f64 {}
impl Primitive for bool {}

/// Selects how `lift` produces its result for one kind of result.
///
/// This trait is sealed.
pub trait ResultKind<R>: sealed::Sealed {
    /// The result type of a lifted operation.
    type Lifted;

    /// Converts `result` the way `lift` does for this kind.
    fn lift<E, D>(handler: &ExceptionHandler<E, R, D>, result: Result<R, E>) -> Self::Lifted
    where
        D: DefaultSlot<R>;
}

/// Operations returning an arbitrary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectResult {}

/// Operations returning a [`Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveResult {}

/// Operations returning nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidResult {}

impl<R> ResultKind<R> for ObjectResult {
    type Lifted = Option<R>;

    fn lift<E, D>(handler: &ExceptionHandler<E, R, D>, result: Result<R, E>) -> Option<R>
    where
        D: DefaultSlot<R>,
    {
        handler.lift(result)
    }
}

impl<R> ResultKind<R> for PrimitiveResult
where
    R: Primitive,
{
    type Lifted = R;

    fn lift<E, D>(handler: &ExceptionHandler<E, R, D>, result: Result<R, E>) -> R
    where
        D: DefaultSlot<R>,
    {
        handler.substitute(result, "lift", R::default)
    }
}

impl ResultKind<()> for VoidResult {
    type Lifted = ();

    fn lift<E, D>(handler: &ExceptionHandler<E, (), D>, result: Result<(), E>)
    where
        D: DefaultSlot<()>,
    {
        handler.substitute(result, "lift", || ());
    }
}
