//! Throwing operations returning nothing.
//!
//! With no value to produce, `lift` and `ignore` are the same conversion:
//! the error is discarded.

use super::FunctionWithError;

throwing_shape! {
    /// A throwing runnable: `Fn() -> Result<(), E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::shape::RunnableWithError;
    ///
    /// let flush = RunnableWithError::new(|| Err::<(), _>("disk full"));
    /// assert_eq!(flush.run(), Err("disk full"));
    ///
    /// let ignored = flush.ignore();
    /// ignored();
    /// ```
    VoidResult pub struct RunnableWithError<E> => run() -> Result<(), E>;
}

throwing_shape! {
    /// A throwing consumer: `Fn(T) -> Result<(), E>`.
    VoidResult pub struct ConsumerWithError<T, E> => accept(value: T) -> Result<(), E>;
}

throwing_shape! {
    /// A throwing binary consumer: `Fn(T, U) -> Result<(), E>`.
    VoidResult pub struct BiConsumerWithError<T, U, E> => accept(first: T, second: U) -> Result<(), E>;
}

impl<F, E, D> RunnableWithError<F, E, D>
where
    F: Fn() -> Result<(), E>,
{
    /// Runs `self`, then `after`.
    ///
    /// `after` does not run when `self` fails.
    pub fn and_then<G>(self, after: G) -> RunnableWithError<impl Fn() -> Result<(), E>, E>
    where
        G: Fn() -> Result<(), E>,
    {
        RunnableWithError::new(move || self.run().and_then(|()| after()))
    }
}

impl<F, T, E, D> ConsumerWithError<F, T, E, D>
where
    F: Fn(T) -> Result<(), E>,
{
    /// Accepts with `self`, then with `after`.
    ///
    /// `after` is not called when `self` fails.
    pub fn and_then<G>(self, after: G) -> ConsumerWithError<impl Fn(T) -> Result<(), E>, T, E>
    where
        G: Fn(T) -> Result<(), E>,
        T: Clone,
    {
        ConsumerWithError::new(move |value: T| {
            self.accept(value.clone())?;
            after(value)
        })
    }

    /// Views the consumer as a function to `()`.
    pub fn as_function(self) -> FunctionWithError<impl Fn(T) -> Result<(), E>, T, (), E> {
        FunctionWithError::new(move |value: T| self.accept(value))
    }
}

impl<F, T, U, E, D> BiConsumerWithError<F, T, U, E, D>
where
    F: Fn(T, U) -> Result<(), E>,
{
    /// Accepts with `self`, then with `after`.
    ///
    /// `after` is not called when `self` fails.
    pub fn and_then<G>(
        self,
        after: G,
    ) -> BiConsumerWithError<impl Fn(T, U) -> Result<(), E>, T, U, E>
    where
        G: Fn(T, U) -> Result<(), E>,
        T: Clone,
        U: Clone,
    {
        BiConsumerWithError::new(move |first: T, second: U| {
            self.accept(first.clone(), second.clone())?;
            after(first, second)
        })
    }

    /// Fixes the first argument.
    pub fn fix_first(self, first: T) -> ConsumerWithError<impl Fn(U) -> Result<(), E>, U, E>
    where
        T: Clone,
    {
        ConsumerWithError::new(move |second: U| self.accept(first.clone(), second))
    }

    /// Fixes the second argument.
    pub fn fix_second(self, second: U) -> ConsumerWithError<impl Fn(T) -> Result<(), E>, T, E>
    where
        U: Clone,
    {
        ConsumerWithError::new(move |first: T| self.accept(first, second.clone()))
    }
}
