//! Property-based tests for the conversion contract.
//!
//! ## Success Laws
//! - `uncheck(f)(x) == v`, `lift(f)(x) == Some(v)`, `ignore(f)(x) == v`
//!
//! ## Failure Laws
//! - `uncheck(f)(x)` raises `mapper(e)`
//! - `lift(f)(x) == None`
//! - `ignore(f)(x) == default`
//!
//! ## Composition Laws
//! - `negate(negate(p)) == p` for non-failing inputs
//! - `and`/`or` agree with `&&`/`||`
//! - `failing(s)` fails for every argument, for every shape

use lambars_fallible::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rejected(i32);

impl std::fmt::Display for Rejected {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "rejected {}", self.0)
    }
}

impl std::error::Error for Rejected {}

fn non_negative(value: i32) -> Result<i32, Rejected> {
    if value < 0 { Err(Rejected(value)) } else { Ok(value) }
}

// =============================================================================
// Success and Failure Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_success_flows_through_every_conversion(value in 0..=i32::MAX) {
        let function = FunctionWithError::new(non_negative);

        prop_assert_eq!(function.clone().uncheck()(value), value);
        prop_assert_eq!(function.clone().lift()(value), Some(value));
        prop_assert_eq!(function.ignore()(value), value);
    }

    #[test]
    fn prop_uncheck_raises_wrapped_original(value in i32::MIN..0) {
        let unchecked = FunctionWithError::unchecked(non_negative);

        let error = catch_unchecked(|| unchecked(value)).unwrap_err();
        let wrapped = error.downcast_ref::<WrappedError>().unwrap();
        prop_assert_eq!(wrapped.downcast_cause::<Rejected>(), Some(&Rejected(value)));
    }

    #[test]
    fn prop_uncheck_raises_mapped_error(value in i32::MIN..0) {
        let unchecked = FunctionWithError::unchecked_with(
            non_negative,
            ErrorMapper::new(|error: Rejected| format!("mapped {}", error.0)),
        );

        let error = catch_unchecked(|| unchecked(value)).unwrap_err();
        prop_assert_eq!(error.to_string(), format!("mapped {value}"));
    }

    #[test]
    fn prop_failure_is_absent_or_default(value in i32::MIN..0, fallback in any::<i32>()) {
        prop_assert_eq!(FunctionWithError::lifted(non_negative)(value), None);
        prop_assert_eq!(FunctionWithError::ignored(non_negative)(value), 0);
        prop_assert_eq!(FunctionWithError::ignored_with(non_negative, fallback)(value), fallback);
    }

    #[test]
    fn prop_primitive_lift_equals_ignore(value in any::<i32>()) {
        let function = ToPrimitiveFunctionWithError::new(non_negative);

        prop_assert_eq!(function.clone().lift()(value), function.ignore()(value));
    }

    #[test]
    fn prop_void_lift_equals_ignore(value in any::<i32>()) {
        let counter = std::cell::Cell::new(0);
        let consumer = ConsumerWithError::new(|value: i32| {
            non_negative(value)?;
            counter.set(counter.get() + 1);
            Ok::<(), Rejected>(())
        });

        consumer.clone().lift()(value);
        let after_lift = counter.get();
        consumer.ignore()(value);

        prop_assert_eq!(counter.get(), after_lift * 2);
    }
}

// =============================================================================
// Composition Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_double_negate_is_identity(value in any::<i32>()) {
        let even = PredicateWithError::new(|n: i32| Ok::<_, Rejected>(n % 2 == 0));
        let twice = even.clone().negate().negate();

        prop_assert_eq!(twice.test(value), even.test(value));
    }

    #[test]
    fn prop_and_or_agree_with_boolean_operators(left in any::<bool>(), right in any::<bool>()) {
        let first = PredicateWithError::new(move |(): ()| Ok::<_, Rejected>(left));

        prop_assert_eq!(first.clone().and(move |(): ()| Ok(right)).test(()), Ok(left && right));
        prop_assert_eq!(first.or(move |(): ()| Ok(right)).test(()), Ok(left || right));
    }

    #[test]
    fn prop_and_propagates_first_error(value in i32::MIN..0) {
        let evaluated = std::cell::Cell::new(false);
        let predicate = PredicateWithError::new(|n: i32| non_negative(n).map(|_| true))
            .and(|_| {
                evaluated.set(true);
                Ok(true)
            });

        prop_assert_eq!(predicate.test(value), Err(Rejected(value)));
        prop_assert!(!evaluated.get());
    }

    #[test]
    fn prop_failing_fails_for_every_argument(first in any::<i32>(), second in any::<i64>()) {
        let rejected = || Rejected(-1);

        prop_assert_eq!(SupplierWithError::<_, String, Rejected>::failing(rejected).get(), Err(Rejected(-1)));
        prop_assert_eq!(FunctionWithError::<_, i32, String, Rejected>::failing(rejected).apply(first), Err(Rejected(-1)));
        prop_assert_eq!(
            BiFunctionWithError::<_, i32, i64, String, Rejected>::failing(rejected).apply(first, second),
            Err(Rejected(-1))
        );

        prop_assert_eq!(PrimitiveSupplierWithError::<_, f64, Rejected>::failing(rejected).get_as(), Err(Rejected(-1)));
        prop_assert_eq!(
            ToPrimitiveFunctionWithError::<_, i32, i64, Rejected>::failing(rejected).apply_as(first),
            Err(Rejected(-1))
        );
        prop_assert_eq!(
            ToPrimitiveBiFunctionWithError::<_, i32, i64, i32, Rejected>::failing(rejected).apply_as(first, second),
            Err(Rejected(-1))
        );
        prop_assert_eq!(PredicateWithError::<_, i32, Rejected>::failing(rejected).test(first), Err(Rejected(-1)));
        prop_assert_eq!(
            BiPredicateWithError::<_, i32, i64, Rejected>::failing(rejected).test(first, second),
            Err(Rejected(-1))
        );

        prop_assert_eq!(RunnableWithError::<_, Rejected>::failing(rejected).run(), Err(Rejected(-1)));
        prop_assert_eq!(ConsumerWithError::<_, i32, Rejected>::failing(rejected).accept(first), Err(Rejected(-1)));
        prop_assert_eq!(
            BiConsumerWithError::<_, i32, i64, Rejected>::failing(rejected).accept(first, second),
            Err(Rejected(-1))
        );
    }

    #[test]
    fn prop_and_then_matches_sequential_application(value in any::<i32>()) {
        let composed = FunctionWithError::new(non_negative)
            .and_then(|n| Ok(i64::from(n) * 2));

        prop_assert_eq!(composed.apply(value), non_negative(value).map(|n| i64::from(n) * 2));
    }
}

// =============================================================================
// Mapper Ordering
// =============================================================================

proptest! {
    #[test]
    fn prop_combine_all_is_order_independent(
        keys in Just(vec![3, 1, 2]).prop_shuffle()
    ) {
        let rules = keys
            .iter()
            .map(|&key| ErrorRule::ordered(key, move |_: Rejected| format!("rule {key}")));
        let mapper: ErrorMapper<Rejected> = ErrorMapper::combine_all(rules);

        prop_assert_eq!(mapper.map(Rejected(0)).to_string(), "rule 1");
    }
}
