//! Throwing operation shapes.
//!
//! Each shape wraps one closure returning `Result<R, E>` for a fixed arity
//! (zero to two arguments) and a fixed kind of result, and exposes the four
//! conversions into a non-throwing closure:
//!
//! - `uncheck`: raise the mapped error on failure
//! - `lift`: encode failure as absence
//! - `ignore`: substitute a default value on failure
//! - `stage`: settle into an already completed future
//!
//! | result kind | shapes |
//! |-------------|--------|
//! | object | [`SupplierWithError`], [`FunctionWithError`], [`BiFunctionWithError`] |
//! | primitive | [`PrimitiveSupplierWithError`], [`ToPrimitiveFunctionWithError`], [`ToPrimitiveBiFunctionWithError`], [`PredicateWithError`], [`BiPredicateWithError`] |
//! | void | [`RunnableWithError`], [`ConsumerWithError`], [`BiConsumerWithError`] |
//!
//! Arguments may be of any type, so a primitive argument is simply a shape
//! instantiated with `i32`, `i64`, `f64` or `bool`.
//!
//! # Examples
//!
//! ```rust
//! use lambars_fallible::shape::FunctionWithError;
//!
//! let parse = FunctionWithError::new(|text: &str| text.parse::<i32>());
//!
//! let lifted = parse.clone().lift();
//! assert_eq!(lifted("42"), Some(42));
//! assert_eq!(lifted("x"), None);
//!
//! let ignored = parse.with_default_value(|| -1).ignore();
//! assert_eq!(ignored("x"), -1);
//! ```

/// Instantiates the conversion contract for one shape.
///
/// The result kind selects which conversions exist: `stage` is generated for
/// object and void results only, `lift_flatten` for object results only, and
/// the default value configuration for object and primitive results only.
macro_rules! throwing_shape {
    (
        $(#[$meta:meta])*
        $kind:ident pub struct $name:ident<$($gen:ident),*>
            => $method:ident($($arg:ident: $ty:ty),*) -> Result<$r:ty, $e:ty>;
    ) => {
        $(#[$meta])*
        pub struct $name<F, $($gen),*, D = $crate::handler::NoDefault> {
            operation: F,
            handler: $crate::handler::ExceptionHandler<$e, $r, D>,
            marker: ::std::marker::PhantomData<fn($($ty),*) -> Result<$r, $e>>,
        }

        impl<F, $($gen),*> $name<F, $($gen),*>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Wraps a throwing closure using the default error mapper and
            /// default value.
            pub fn new(operation: F) -> Self {
                Self {
                    operation,
                    handler: $crate::handler::ExceptionHandler::new(),
                    marker: ::std::marker::PhantomData,
                }
            }

            /// Wraps `operation` and converts it with [`Self::uncheck`].
            pub fn unchecked(operation: F) -> impl Fn($($ty),*) -> $r
            where
                $e: Into<$crate::error::BoxError>,
            {
                Self::new(operation).uncheck()
            }

            /// Wraps `operation` and converts it with [`Self::uncheck`], raising
            /// the errors produced by `error_mapper`.
            pub fn unchecked_with(
                operation: F,
                error_mapper: $crate::mapper::ErrorMapper<$e>,
            ) -> impl Fn($($ty),*) -> $r
            where
                $e: Into<$crate::error::BoxError>,
            {
                Self::new(operation).with_error_mapper(error_mapper).uncheck()
            }

            /// Wraps `operation` and converts it with [`Self::lift`].
            pub fn lifted(
                operation: F,
            ) -> impl Fn($($ty),*) -> <$crate::handler::$kind as $crate::handler::ResultKind<$r>>::Lifted
            {
                Self::new(operation).lift()
            }

            /// Wraps `operation` and converts it with [`Self::ignore`].
            pub fn ignored(operation: F) -> impl Fn($($ty),*) -> $r
            where
                $r: Default,
            {
                Self::new(operation).ignore()
            }
        }

        impl<F, $($gen),*, D> $name<F, $($gen),*, D>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Calls the throwing operation.
            ///
            /// # Errors
            ///
            /// Returns the error raised by the operation, unchanged.
            pub fn $method(&self, $($arg: $ty),*) -> Result<$r, $e> {
                (self.operation)($($arg),*)
            }

            /// Returns the wrapped closure.
            pub fn into_fn(self) -> F {
                self.operation
            }

            /// Returns the conversion configuration.
            pub const fn handler(&self) -> &$crate::handler::ExceptionHandler<$e, $r, D> {
                &self.handler
            }

            /// Replaces the error mapper used by `uncheck`.
            #[must_use]
            pub fn with_error_mapper(
                mut self,
                error_mapper: $crate::mapper::ErrorMapper<$e>,
            ) -> Self {
                self.handler = self.handler.with_error_mapper(error_mapper);
                self
            }

            /// Converts into a closure that raises the mapped error on
            /// failure.
            ///
            /// The error mapper is applied each time the closure fails. See
            /// [`catch_unchecked`]($crate::error::catch_unchecked) to recover
            /// the raised error.
            ///
            /// The conversion consumes the shape, so its mapper cannot be
            /// replaced afterwards. To change how later failures are mapped,
            /// configure a mapper that reads shared state, such as an
            /// `Arc<Mutex<_>>` updated between calls.
            ///
            /// The error is raised as a panic whose payload is the mapped
            /// [`BoxError`]($crate::error::BoxError). The panic hook runs for
            /// every failure, including failures later recovered by
            /// `catch_unchecked`, and prints the payload only as
            /// `Box<dyn Any>`; read the message from the recovered error.
            pub fn uncheck(self) -> impl Fn($($ty),*) -> $r
            where
                $e: Into<$crate::error::BoxError>,
            {
                move |$($arg: $ty),*| self.handler.uncheck((self.operation)($($arg),*))
            }

            /// Converts into a closure that encodes failure as absence.
            pub fn lift(
                self,
            ) -> impl Fn($($ty),*) -> <$crate::handler::$kind as $crate::handler::ResultKind<$r>>::Lifted
            where
                D: $crate::handler::DefaultSlot<$r>,
            {
                move |$($arg: $ty),*| {
                    <$crate::handler::$kind as $crate::handler::ResultKind<$r>>::lift(
                        &self.handler,
                        (self.operation)($($arg),*),
                    )
                }
            }

            /// Converts into a closure that returns the default value on
            /// failure.
            ///
            /// The default value is the one configured with
            /// `with_default_value`, or `Default::default()` otherwise.
            pub fn ignore(self) -> impl Fn($($ty),*) -> $r
            where
                D: $crate::handler::DefaultSource<$r>,
            {
                move |$($arg: $ty),*| self.handler.ignore((self.operation)($($arg),*))
            }
        }

        impl<$($gen),*> $name<fn($($ty),*) -> Result<$r, $e>, $($gen),*>
        where
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Creates an operation that fails with the error produced by
            /// `error` on every call, whatever its arguments.
            pub fn failing<S>(error: S) -> $name<impl Fn($($ty),*) -> Result<$r, $e>, $($gen),*>
            where
                S: Fn() -> $e,
            {
                $name::new(move |$($arg: $ty),*| {
                    let _ = ($($arg,)*);
                    Err(error())
                })
            }
        }

        impl<F, $($gen),*, D> Clone for $name<F, $($gen),*, D>
        where
            F: Clone,
            D: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    operation: self.operation.clone(),
                    handler: self.handler.clone(),
                    marker: ::std::marker::PhantomData,
                }
            }
        }

        impl<F, $($gen),*, D> ::std::fmt::Debug for $name<F, $($gen),*, D>
        where
            D: ::std::fmt::Debug,
        {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    .field("handler", &self.handler)
                    .finish_non_exhaustive()
            }
        }

        throwing_shape!(@valued $kind, $name, [$($gen),*], [$($arg: $ty),*], [$r], [$e]);
        throwing_shape!(@nullable $kind, $name, [$($gen),*], [$($arg: $ty),*], [$r], [$e]);
        throwing_shape!(@stage $kind, $name, [$($gen),*], [$($arg: $ty),*], [$r], [$e]);
    };

    (@valued VoidResult, $($rest:tt)*) => {};
    (
        @valued $kind:ident, $name:ident, [$($gen:ident),*], [$($arg:ident: $ty:ty),*], [$r:ty], [$e:ty]
    ) => {
        impl<F, $($gen),*, D> $name<F, $($gen),*, D>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Replaces the value returned by `ignore` on failure.
            ///
            /// The result type needs no `Default` implementation once a
            /// default value is configured.
            pub fn with_default_value<H>(
                self,
                hook: H,
            ) -> $name<F, $($gen),*, $crate::handler::DefaultValue<$r>>
            where
                H: Fn() -> $r + Send + Sync + 'static,
            {
                $name {
                    operation: self.operation,
                    handler: self.handler.with_default_value(hook),
                    marker: ::std::marker::PhantomData,
                }
            }

            /// Converts into a closure that returns a clone of `default` on
            /// failure.
            pub fn ignore_or(self, default: $r) -> impl Fn($($ty),*) -> $r
            where
                $r: Clone,
            {
                move |$($arg: $ty),*| {
                    self.handler.ignore_or((self.operation)($($arg),*), &default)
                }
            }
        }

        impl<F, $($gen),*> $name<F, $($gen),*>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Wraps `operation` and converts it with [`Self::ignore_or`].
            pub fn ignored_with(operation: F, default: $r) -> impl Fn($($ty),*) -> $r
            where
                $r: Clone,
            {
                Self::new(operation).ignore_or(default)
            }
        }
    };

    (
        @nullable ObjectResult, $name:ident, [$($gen:ident),*], [$($arg:ident: $ty:ty),*], [$r:ty], [$e:ty]
    ) => {
        impl<F, $($gen),*, D> $name<F, $($gen),*, D>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $r: $crate::handler::Nullable,
        {
            /// Converts into a closure that encodes both failure and an
            /// absent successful value as `None`.
            ///
            /// The two outcomes cannot be told apart afterwards.
            pub fn lift_flatten(
                self,
            ) -> impl Fn($($ty),*) -> Option<<$r as $crate::handler::Nullable>::Value> {
                move |$($arg: $ty),*| self.handler.lift_flatten((self.operation)($($arg),*))
            }
        }
    };
    (@nullable $kind:ident, $($rest:tt)*) => {};

    (@stage PrimitiveResult, $($rest:tt)*) => {};
    (
        @stage $kind:ident, $name:ident, [$($gen:ident),*], [$($arg:ident: $ty:ty),*], [$r:ty], [$e:ty]
    ) => {
        #[cfg(feature = "stage")]
        impl<F, $($gen),*, D> $name<F, $($gen),*, D>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Converts into a closure returning an already completed future.
            ///
            /// A failure completes the future with the original error.
            pub fn stage(self) -> impl Fn($($ty),*) -> ::futures::future::Ready<Result<$r, $e>> {
                move |$($arg: $ty),*| self.handler.stage((self.operation)($($arg),*))
            }
        }

        #[cfg(feature = "stage")]
        impl<F, $($gen),*> $name<F, $($gen),*>
        where
            F: Fn($($ty),*) -> Result<$r, $e>,
            $crate::handler::$kind: $crate::handler::ResultKind<$r>,
        {
            /// Wraps `operation` and converts it with [`Self::stage`].
            pub fn staged(
                operation: F,
            ) -> impl Fn($($ty),*) -> ::futures::future::Ready<Result<$r, $e>> {
                Self::new(operation).stage()
            }
        }
    };
}

mod object;
mod primitive;
mod void;

pub use object::{BiFunctionWithError, FunctionWithError, SupplierWithError};
pub use primitive::{
    BiPredicateWithError, PredicateWithError, PrimitiveSupplierWithError,
    ToPrimitiveBiFunctionWithError, ToPrimitiveFunctionWithError,
};
pub use void::{BiConsumerWithError, ConsumerWithError, RunnableWithError};

type IoFunction = fn(i32) -> Result<i32, std::io::Error>;

static_assertions::assert_impl_all!(
    FunctionWithError<IoFunction, i32, i32, std::io::Error>: Send, Sync, Clone
);
static_assertions::assert_impl_all!(crate::mapper::ErrorMapper<std::io::Error>: Send, Sync, Clone);
static_assertions::assert_impl_all!(
    crate::handler::ExceptionHandler<std::io::Error, String>: Send, Sync, Clone
);

