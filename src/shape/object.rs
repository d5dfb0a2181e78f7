//! Throwing operations returning an arbitrary value.

use super::{BiConsumerWithError, ConsumerWithError, RunnableWithError};

throwing_shape! {
    /// A throwing supplier: `Fn() -> Result<R, E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::shape::SupplierWithError;
    ///
    /// let supplier = SupplierWithError::new(|| "42".parse::<u8>());
    /// assert_eq!(supplier.get(), Ok(42));
    /// assert_eq!(supplier.lift()(), Some(42));
    /// ```
    ObjectResult pub struct SupplierWithError<R, E> => get() -> Result<R, E>;
}

throwing_shape! {
    /// A throwing function: `Fn(T) -> Result<R, E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::shape::FunctionWithError;
    ///
    /// let parse = FunctionWithError::new(|text: &str| text.parse::<i32>());
    /// let doubled = parse.and_then(|number| Ok(number * 2));
    ///
    /// assert_eq!(doubled.apply("21"), Ok(42));
    /// assert!(doubled.apply("x").is_err());
    /// ```
    ObjectResult pub struct FunctionWithError<T, R, E> => apply(value: T) -> Result<R, E>;
}

throwing_shape! {
    /// A throwing binary function: `Fn(T, U) -> Result<R, E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::shape::BiFunctionWithError;
    ///
    /// let divide = BiFunctionWithError::new(|numerator: i32, denominator: i32| {
    ///     numerator.checked_div(denominator).ok_or("division by zero")
    /// });
    ///
    /// let halve = divide.fix_second(2);
    /// assert_eq!(halve.apply(10), Ok(5));
    /// ```
    ObjectResult pub struct BiFunctionWithError<T, U, R, E> => apply(first: T, second: U) -> Result<R, E>;
}

impl<F, R, E, D> SupplierWithError<F, R, E, D>
where
    F: Fn() -> Result<R, E>,
{
    /// Transforms the supplied value; failures pass through unchanged.
    pub fn map<V, G>(self, transform: G) -> SupplierWithError<impl Fn() -> Result<V, E>, V, E>
    where
        G: Fn(R) -> V,
    {
        SupplierWithError::new(move || self.get().map(&transform))
    }

    /// Discards the supplied value.
    pub fn as_runnable(self) -> RunnableWithError<impl Fn() -> Result<(), E>, E> {
        RunnableWithError::new(move || self.get().map(drop))
    }
}

impl<F, T, R, E, D> FunctionWithError<F, T, R, E, D>
where
    F: Fn(T) -> Result<R, E>,
{
    /// Returns a function applying `self`, then `after` to its result.
    ///
    /// A failure of `self` is returned without calling `after`.
    pub fn and_then<V, G>(self, after: G) -> FunctionWithError<impl Fn(T) -> Result<V, E>, T, V, E>
    where
        G: Fn(R) -> Result<V, E>,
    {
        FunctionWithError::new(move |value: T| self.apply(value).and_then(&after))
    }

    /// Returns a function applying `before`, then `self` to its result.
    ///
    /// A failure of `before` is returned without calling `self`.
    pub fn compose<V, G>(self, before: G) -> FunctionWithError<impl Fn(V) -> Result<R, E>, V, R, E>
    where
        G: Fn(V) -> Result<T, E>,
    {
        FunctionWithError::new(move |value: V| before(value).and_then(|input| self.apply(input)))
    }

    /// Discards the result.
    pub fn as_consumer(self) -> ConsumerWithError<impl Fn(T) -> Result<(), E>, T, E> {
        ConsumerWithError::new(move |value: T| self.apply(value).map(drop))
    }

    /// Fixes the argument, yielding a supplier.
    pub fn as_supplier(self, value: T) -> SupplierWithError<impl Fn() -> Result<R, E>, R, E>
    where
        T: Clone,
    {
        SupplierWithError::new(move || self.apply(value.clone()))
    }
}

impl<T, E> FunctionWithError<fn(T) -> Result<T, E>, T, T, E> {
    /// A function that always succeeds with its argument.
    pub fn identity() -> FunctionWithError<impl Fn(T) -> Result<T, E>, T, T, E> {
        FunctionWithError::new(Ok)
    }
}

impl<F, T, U, R, E, D> BiFunctionWithError<F, T, U, R, E, D>
where
    F: Fn(T, U) -> Result<R, E>,
{
    /// Returns a function applying `self`, then `after` to its result.
    ///
    /// A failure of `self` is returned without calling `after`.
    pub fn and_then<V, G>(
        self,
        after: G,
    ) -> BiFunctionWithError<impl Fn(T, U) -> Result<V, E>, T, U, V, E>
    where
        G: Fn(R) -> Result<V, E>,
    {
        BiFunctionWithError::new(move |first: T, second: U| {
            self.apply(first, second).and_then(&after)
        })
    }

    /// Fixes the first argument.
    pub fn fix_first(self, first: T) -> FunctionWithError<impl Fn(U) -> Result<R, E>, U, R, E>
    where
        T: Clone,
    {
        FunctionWithError::new(move |second: U| self.apply(first.clone(), second))
    }

    /// Fixes the second argument.
    pub fn fix_second(self, second: U) -> FunctionWithError<impl Fn(T) -> Result<R, E>, T, R, E>
    where
        U: Clone,
    {
        FunctionWithError::new(move |first: T| self.apply(first, second.clone()))
    }

    /// Discards the result.
    pub fn as_bi_consumer(self) -> BiConsumerWithError<impl Fn(T, U) -> Result<(), E>, T, U, E> {
        BiConsumerWithError::new(move |first: T, second: U| self.apply(first, second).map(drop))
    }
}
