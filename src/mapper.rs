//! Error mappers and their combination.
//!
//! An [`ErrorMapper`] turns the declared error of a throwing operation into
//! the [`BoxError`] raised by `uncheck`. Mappers are pure: they construct the
//! returned error and have no other observable effect.
//!
//! Several mappers can be combined into one that dispatches on the runtime
//! type of the error. Each candidate is an [`ErrorRule`]: a declared error
//! type plus the function that maps it. The combined mapper tries the rules
//! in order and falls back to [`WrappedError`] when none matches.
//!
//! # Examples
//!
//! ```rust
//! use std::fmt;
//! use lambars_fallible::error::{BoxError, WrappedError};
//! use lambars_fallible::mapper::{ErrorMapper, ErrorRule};
//!
//! let mapper: ErrorMapper<BoxError> = ErrorMapper::combine(
//!     ErrorRule::new(|error: std::io::Error| format!("io: {error}")),
//!     ErrorRule::new(|_: fmt::Error| "format failure"),
//! );
//!
//! let mapped = mapper.map(Box::new(std::io::Error::other("disk full")));
//! assert_eq!(mapped.to_string(), "io: disk full");
//!
//! let mapped = mapper.map("something else".into());
//! assert!(mapped.downcast_ref::<WrappedError>().is_some());
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, WrappedError};

/// A shared, thread-safe function from a caught error to an unchecked error.
///
/// Cloning an `ErrorMapper` is cheap: clones share the same function.
///
/// # Type Parameters
///
/// * `E` - The declared error type of the operation being converted
pub struct ErrorMapper<E> {
    function: Arc<dyn Fn(E) -> BoxError + Send + Sync>,
}

impl<E> ErrorMapper<E> {
    /// Creates a mapper from a function producing any error convertible to
    /// [`BoxError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::mapper::ErrorMapper;
    ///
    /// let mapper = ErrorMapper::new(|code: i32| format!("exit code {code}"));
    /// assert_eq!(mapper.map(3).to_string(), "exit code 3");
    /// ```
    pub fn new<F, U>(function: F) -> Self
    where
        F: Fn(E) -> U + Send + Sync + 'static,
        U: Into<BoxError>,
    {
        Self {
            function: Arc::new(move |error: E| -> BoxError { function(error).into() }),
        }
    }

    /// Applies the mapper to `error`.
    pub fn map(&self, error: E) -> BoxError {
        (self.function)(error)
    }
}

impl<E> ErrorMapper<E>
where
    E: Into<BoxError>,
{
    /// The default mapper: wraps the original error in a [`WrappedError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::error::WrappedError;
    /// use lambars_fallible::mapper::ErrorMapper;
    ///
    /// let mapped = ErrorMapper::wrapping().map(std::io::Error::other("boom"));
    /// let wrapped = mapped.downcast_ref::<WrappedError>().unwrap();
    /// assert!(wrapped.downcast_cause::<std::io::Error>().is_some());
    /// ```
    pub fn wrapping() -> Self {
        Self {
            function: Arc::new(|error: E| -> BoxError { Box::new(WrappedError::new(error)) }),
        }
    }

    /// A mapper that raises the original error itself, only boxed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::mapper::ErrorMapper;
    ///
    /// let mapped = ErrorMapper::rethrow().map(std::fmt::Error);
    /// assert!(mapped.downcast_ref::<std::fmt::Error>().is_some());
    /// ```
    pub fn rethrow() -> Self {
        Self {
            function: Arc::new(|error: E| -> BoxError { error.into() }),
        }
    }

    /// Combines two rules into a single mapper.
    ///
    /// The error is boxed and handed to the first rule whose declared type
    /// matches its runtime type, `first` before `second`. When neither
    /// matches, the error is wrapped in a [`WrappedError`].
    pub fn combine(first: ErrorRule, second: ErrorRule) -> Self {
        Self::dispatching(vec![first, second])
    }

    /// Combines any number of rules into a single mapper.
    ///
    /// Rules are tried in ascending order of their order key. The sort is
    /// stable, so rules sharing a key keep their input order. When no rule
    /// matches, the error is wrapped in a [`WrappedError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_fallible::mapper::{ErrorMapper, ErrorRule};
    ///
    /// let mapper: ErrorMapper<std::io::Error> = ErrorMapper::combine_all([
    ///     ErrorRule::ordered(2, |_: std::io::Error| "second"),
    ///     ErrorRule::ordered(1, |_: std::io::Error| "first"),
    /// ]);
    /// assert_eq!(mapper.map(std::io::Error::other("boom")).to_string(), "first");
    /// ```
    pub fn combine_all<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ErrorRule>,
    {
        let mut rules: Vec<ErrorRule> = rules.into_iter().collect();
        rules.sort_by_key(ErrorRule::order);
        Self::dispatching(rules)
    }

    fn dispatching(rules: Vec<ErrorRule>) -> Self {
        Self {
            function: Arc::new(move |error: E| -> BoxError {
                let mut error: BoxError = error.into();
                for rule in &rules {
                    match rule.try_map(error) {
                        Ok(mapped) => return mapped,
                        Err(unmatched) => error = unmatched,
                    }
                }
                Box::new(WrappedError::new(error))
            }),
        }
    }
}

impl<E> Clone for ErrorMapper<E> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<E> Default for ErrorMapper<E>
where
    E: Into<BoxError>,
{
    fn default() -> Self {
        Self::wrapping()
    }
}

impl<E> fmt::Debug for ErrorMapper<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ErrorMapper").finish_non_exhaustive()
    }
}

type RuleFunction = dyn Fn(BoxError) -> BoxError + Send + Sync;

/// A mapper bound to one declared error type, used to build combined mappers.
///
/// A rule matches an error when the boxed runtime error has the rule's
/// declared type.
///
/// # Examples
///
/// ```rust
/// use lambars_fallible::mapper::ErrorRule;
///
/// let rule = ErrorRule::ordered(5, |error: std::io::Error| format!("io: {error}"));
/// assert_eq!(rule.order(), 5);
/// assert!(rule.matches(&std::io::Error::other("boom")));
/// assert!(!rule.matches(&std::fmt::Error));
/// ```
#[derive(Clone)]
pub struct ErrorRule {
    order: i32,
    error_type: &'static str,
    matcher: fn(&(dyn Error + Send + Sync + 'static)) -> bool,
    function: Arc<RuleFunction>,
}

impl ErrorRule {
    /// Creates a rule for errors of type `C` with order key `0`.
    pub fn new<C, F, U>(function: F) -> Self
    where
        C: Error + Send + Sync + 'static,
        F: Fn(C) -> U + Send + Sync + 'static,
        U: Into<BoxError>,
    {
        Self::ordered(0, function)
    }

    /// Creates a rule for errors of type `C` with an explicit order key.
    ///
    /// Lower keys are tried first by [`ErrorMapper::combine_all`].
    pub fn ordered<C, F, U>(order: i32, function: F) -> Self
    where
        C: Error + Send + Sync + 'static,
        F: Fn(C) -> U + Send + Sync + 'static,
        U: Into<BoxError>,
    {
        Self {
            order,
            error_type: std::any::type_name::<C>(),
            matcher: has_type::<C>,
            function: Arc::new(move |error: BoxError| -> BoxError {
                match error.downcast::<C>() {
                    Ok(matched) => function(*matched).into(),
                    Err(unmatched) => unmatched,
                }
            }),
        }
    }

    /// Returns the order key.
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns the name of the declared error type.
    pub const fn error_type(&self) -> &'static str {
        self.error_type
    }

    /// Returns whether `error` has the declared error type.
    pub fn matches(&self, error: &(dyn Error + Send + Sync + 'static)) -> bool {
        (self.matcher)(error)
    }

    /// Maps `error` when it has the declared type, or hands it back.
    ///
    /// # Errors
    ///
    /// Returns the untouched error when its runtime type does not match.
    pub fn try_map(&self, error: BoxError) -> Result<BoxError, BoxError> {
        if self.matches(error.as_ref()) {
            Ok((self.function)(error))
        } else {
            Err(error)
        }
    }
}

fn has_type<C>(error: &(dyn Error + Send + Sync + 'static)) -> bool
where
    C: Error + 'static,
{
    error.is::<C>()
}

impl fmt::Debug for ErrorRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ErrorRule")
            .field("order", &self.order)
            .field("error_type", &self.error_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Tagged(&'static str);

    impl fmt::Display for Tagged {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str(self.0)
        }
    }

    impl Error for Tagged {}

    fn tagging<C>(order: i32, tag: &'static str) -> ErrorRule
    where
        C: Error + Send + Sync + 'static,
    {
        ErrorRule::ordered(order, move |_: C| Tagged(tag))
    }

    #[rstest]
    fn wrapping_mapper_keeps_cause() {
        let mapped = ErrorMapper::wrapping().map(std::io::Error::other("boom"));
        let wrapped = mapped.downcast_ref::<WrappedError>().unwrap();
        assert_eq!(wrapped.cause().to_string(), "boom");
    }

    #[rstest]
    fn custom_mapper_replaces_wrapper() {
        let mapper = ErrorMapper::new(|error: std::io::Error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                Tagged("missing")
            } else {
                Tagged("other")
            }
        });
        let mapped = mapper.map(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(mapped.to_string(), "missing");
    }

    #[rstest]
    fn combine_dispatches_to_matching_rule() {
        let mapper: ErrorMapper<BoxError> = ErrorMapper::combine(
            tagging::<std::io::Error>(0, "io"),
            tagging::<fmt::Error>(0, "fmt"),
        );

        assert_eq!(
            mapper.map(Box::new(std::io::Error::other("x"))).to_string(),
            "io"
        );
        assert_eq!(mapper.map(Box::new(fmt::Error)).to_string(), "fmt");
    }

    #[rstest]
    fn combine_prefers_first_rule_on_overlap() {
        let mapper: ErrorMapper<fmt::Error> = ErrorMapper::combine(
            tagging::<fmt::Error>(9, "first"),
            tagging::<fmt::Error>(0, "second"),
        );
        assert_eq!(mapper.map(fmt::Error).to_string(), "first");
    }

    #[rstest]
    fn combine_falls_back_to_wrapped_error() {
        let mapper: ErrorMapper<BoxError> = ErrorMapper::combine(
            tagging::<std::io::Error>(0, "io"),
            tagging::<fmt::Error>(0, "fmt"),
        );

        let mapped = mapper.map("unrelated".into());
        let wrapped = mapped.downcast_ref::<WrappedError>().unwrap();
        assert_eq!(wrapped.cause().to_string(), "unrelated");
    }

    #[rstest]
    fn combine_all_tries_rules_in_ascending_order() {
        let mapper: ErrorMapper<fmt::Error> = ErrorMapper::combine_all([
            tagging::<fmt::Error>(3, "three"),
            tagging::<fmt::Error>(1, "one"),
            tagging::<fmt::Error>(2, "two"),
        ]);
        assert_eq!(mapper.map(fmt::Error).to_string(), "one");
    }

    #[rstest]
    fn combine_all_skips_lower_keys_that_do_not_match() {
        let mapper: ErrorMapper<BoxError> = ErrorMapper::combine_all([
            tagging::<fmt::Error>(3, "fmt-three"),
            tagging::<std::io::Error>(1, "io-one"),
            tagging::<fmt::Error>(2, "fmt-two"),
        ]);
        assert_eq!(mapper.map(Box::new(fmt::Error)).to_string(), "fmt-two");
    }

    #[rstest]
    fn combine_all_keeps_input_order_for_equal_keys() {
        let mapper: ErrorMapper<fmt::Error> = ErrorMapper::combine_all([
            tagging::<fmt::Error>(1, "earlier"),
            tagging::<fmt::Error>(1, "later"),
        ]);
        assert_eq!(mapper.map(fmt::Error).to_string(), "earlier");
    }

    #[rstest]
    fn combine_all_without_rules_wraps() {
        let mapper: ErrorMapper<fmt::Error> = ErrorMapper::combine_all(Vec::new());
        assert!(mapper.map(fmt::Error).downcast_ref::<WrappedError>().is_some());
    }

    #[rstest]
    fn rule_hands_back_unmatched_error() {
        let rule = tagging::<std::io::Error>(0, "io");
        let unmatched = rule.try_map(Box::new(fmt::Error)).unwrap_err();
        assert!(unmatched.downcast_ref::<fmt::Error>().is_some());
    }

    #[rstest]
    fn rule_reports_declared_type() {
        let rule = tagging::<fmt::Error>(0, "fmt");
        assert_eq!(rule.error_type(), std::any::type_name::<fmt::Error>());
    }
}
