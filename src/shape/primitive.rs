//! Throwing operations returning a primitive.
//!
//! A primitive has no absent value, so `lift` on these shapes behaves
//! exactly like `ignore`, and there is no `stage`: convert with
//! `as_supplier`/`as_function` first when a boxed form is needed.

use super::{BiFunctionWithError, FunctionWithError, RunnableWithError, SupplierWithError};
use crate::handler::Primitive;

throwing_shape! {
    /// A throwing supplier of a primitive: `Fn() -> Result<R, E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::shape::PrimitiveSupplierWithError;
    ///
    /// let supplier = PrimitiveSupplierWithError::new(|| "x".parse::<i64>());
    /// assert_eq!(supplier.clone().lift()(), 0);
    /// assert_eq!(supplier.with_default_value(|| -1).ignore()(), -1);
    /// ```
    PrimitiveResult pub struct PrimitiveSupplierWithError<R, E> => get_as() -> Result<R, E>;
}

throwing_shape! {
    /// A throwing function to a primitive: `Fn(T) -> Result<R, E>`.
    PrimitiveResult pub struct ToPrimitiveFunctionWithError<T, R, E> => apply_as(value: T) -> Result<R, E>;
}

throwing_shape! {
    /// A throwing binary function to a primitive: `Fn(T, U) -> Result<R, E>`.
    PrimitiveResult pub struct ToPrimitiveBiFunctionWithError<T, U, R, E> => apply_as(first: T, second: U) -> Result<R, E>;
}

throwing_shape! {
    /// A throwing predicate: `Fn(T) -> Result<bool, E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::shape::PredicateWithError;
    ///
    /// let positive = PredicateWithError::new(|text: &str| text.parse::<i32>().map(|n| n > 0));
    /// let even = |text: &str| text.parse::<i32>().map(|n| n % 2 == 0);
    ///
    /// let positive_and_even = positive.and(even);
    /// assert_eq!(positive_and_even.test("4"), Ok(true));
    /// assert_eq!(positive_and_even.test("-4"), Ok(false));
    /// assert!(positive_and_even.test("four").is_err());
    /// ```
    PrimitiveResult pub struct PredicateWithError<T, E> => test(value: T) -> Result<bool, E>;
}

throwing_shape! {
    /// A throwing binary predicate: `Fn(T, U) -> Result<bool, E>`.
    PrimitiveResult pub struct BiPredicateWithError<T, U, E> => test(first: T, second: U) -> Result<bool, E>;
}

impl<F, R, E, D> PrimitiveSupplierWithError<F, R, E, D>
where
    F: Fn() -> Result<R, E>,
    R: Primitive,
{
    /// Views the supplier as an object-returning supplier.
    pub fn as_supplier(self) -> SupplierWithError<impl Fn() -> Result<R, E>, R, E> {
        SupplierWithError::new(move || self.get_as())
    }

    /// Discards the supplied value.
    pub fn as_runnable(self) -> RunnableWithError<impl Fn() -> Result<(), E>, E> {
        RunnableWithError::new(move || self.get_as().map(drop))
    }
}

impl<F, T, R, E, D> ToPrimitiveFunctionWithError<F, T, R, E, D>
where
    F: Fn(T) -> Result<R, E>,
    R: Primitive,
{
    /// Views the function as an object-returning function.
    pub fn as_function(self) -> FunctionWithError<impl Fn(T) -> Result<R, E>, T, R, E> {
        FunctionWithError::new(move |value: T| self.apply_as(value))
    }

    /// Returns a function applying `self`, then `after` to its result.
    ///
    /// A failure of `self` is returned without calling `after`.
    pub fn and_then<V, G>(
        self,
        after: G,
    ) -> ToPrimitiveFunctionWithError<impl Fn(T) -> Result<V, E>, T, V, E>
    where
        G: Fn(R) -> Result<V, E>,
        V: Primitive,
    {
        ToPrimitiveFunctionWithError::new(move |value: T| self.apply_as(value).and_then(&after))
    }
}

impl<F, T, U, R, E, D> ToPrimitiveBiFunctionWithError<F, T, U, R, E, D>
where
    F: Fn(T, U) -> Result<R, E>,
    R: Primitive,
{
    /// Views the function as an object-returning binary function.
    pub fn as_bi_function(
        self,
    ) -> BiFunctionWithError<impl Fn(T, U) -> Result<R, E>, T, U, R, E> {
        BiFunctionWithError::new(move |first: T, second: U| self.apply_as(first, second))
    }

    /// Fixes the first argument.
    pub fn fix_first(
        self,
        first: T,
    ) -> ToPrimitiveFunctionWithError<impl Fn(U) -> Result<R, E>, U, R, E>
    where
        T: Clone,
    {
        ToPrimitiveFunctionWithError::new(move |second: U| self.apply_as(first.clone(), second))
    }

    /// Fixes the second argument.
    pub fn fix_second(
        self,
        second: U,
    ) -> ToPrimitiveFunctionWithError<impl Fn(T) -> Result<R, E>, T, R, E>
    where
        U: Clone,
    {
        ToPrimitiveFunctionWithError::new(move |first: T| self.apply_as(first, second.clone()))
    }
}

impl<F, T, E, D> PredicateWithError<F, T, E, D>
where
    F: Fn(T) -> Result<bool, E>,
{
    /// Short-circuiting logical AND.
    ///
    /// `other` is not evaluated when `self` yields `false` or fails; a
    /// failure of `self` is returned as is.
    pub fn and<G>(self, other: G) -> PredicateWithError<impl Fn(T) -> Result<bool, E>, T, E>
    where
        G: Fn(T) -> Result<bool, E>,
        T: Clone,
    {
        PredicateWithError::new(move |value: T| -> Result<bool, E> {
            Ok(self.test(value.clone())? && other(value)?)
        })
    }

    /// Short-circuiting logical OR.
    ///
    /// `other` is not evaluated when `self` yields `true` or fails; a
    /// failure of `self` is returned as is.
    pub fn or<G>(self, other: G) -> PredicateWithError<impl Fn(T) -> Result<bool, E>, T, E>
    where
        G: Fn(T) -> Result<bool, E>,
        T: Clone,
    {
        PredicateWithError::new(move |value: T| -> Result<bool, E> {
            Ok(self.test(value.clone())? || other(value)?)
        })
    }

    /// Logical negation. Failures pass through unchanged.
    pub fn negate(self) -> PredicateWithError<impl Fn(T) -> Result<bool, E>, T, E> {
        PredicateWithError::new(move |value: T| self.test(value).map(|outcome| !outcome))
    }

    /// Returns the negation of `target`.
    pub fn not(target: Self) -> PredicateWithError<impl Fn(T) -> Result<bool, E>, T, E> {
        target.negate()
    }

    /// Views the predicate as a function to `bool`.
    pub fn as_function(self) -> FunctionWithError<impl Fn(T) -> Result<bool, E>, T, bool, E> {
        FunctionWithError::new(move |value: T| self.test(value))
    }
}

impl<T, E> PredicateWithError<fn(T) -> Result<bool, E>, T, E> {
    /// A predicate testing equality with `target`. It never fails.
    pub fn is_equal(target: T) -> PredicateWithError<impl Fn(T) -> Result<bool, E>, T, E>
    where
        T: PartialEq,
    {
        PredicateWithError::new(move |value: T| Ok(value == target))
    }
}

impl<F, T, U, E, D> BiPredicateWithError<F, T, U, E, D>
where
    F: Fn(T, U) -> Result<bool, E>,
{
    /// Short-circuiting logical AND.
    pub fn and<G>(self, other: G) -> BiPredicateWithError<impl Fn(T, U) -> Result<bool, E>, T, U, E>
    where
        G: Fn(T, U) -> Result<bool, E>,
        T: Clone,
        U: Clone,
    {
        BiPredicateWithError::new(move |first: T, second: U| -> Result<bool, E> {
            Ok(self.test(first.clone(), second.clone())? && other(first, second)?)
        })
    }

    /// Short-circuiting logical OR.
    pub fn or<G>(self, other: G) -> BiPredicateWithError<impl Fn(T, U) -> Result<bool, E>, T, U, E>
    where
        G: Fn(T, U) -> Result<bool, E>,
        T: Clone,
        U: Clone,
    {
        BiPredicateWithError::new(move |first: T, second: U| -> Result<bool, E> {
            Ok(self.test(first.clone(), second.clone())? || other(first, second)?)
        })
    }

    /// Logical negation. Failures pass through unchanged.
    pub fn negate(self) -> BiPredicateWithError<impl Fn(T, U) -> Result<bool, E>, T, U, E> {
        BiPredicateWithError::new(move |first: T, second: U| {
            self.test(first, second).map(|outcome| !outcome)
        })
    }

    /// Fixes the first argument.
    pub fn fix_first(self, first: T) -> PredicateWithError<impl Fn(U) -> Result<bool, E>, U, E>
    where
        T: Clone,
    {
        PredicateWithError::new(move |second: U| self.test(first.clone(), second))
    }

    /// Fixes the second argument.
    pub fn fix_second(self, second: U) -> PredicateWithError<impl Fn(T) -> Result<bool, E>, T, E>
    where
        U: Clone,
    {
        PredicateWithError::new(move |first: T| self.test(first, second.clone()))
    }
}
