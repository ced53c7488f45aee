//! Property-based tests for the composition laws

use crate::functional::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Property-based test generators
pub mod generators {
    use super::*;
    use proptest::collection::vec;

    /// An integer transform usable both as a plain closure and as a dynamic `Function`
    #[derive(Debug, Clone, Copy)]
    pub enum Step {
        Add(i64),
        Mul(i64),
        Negate,
    }

    impl Step {
        pub fn apply(self, x: i64) -> i64 {
            match self {
                Step::Add(n) => x.wrapping_add(n),
                Step::Mul(n) => x.wrapping_mul(n),
                Step::Negate => x.wrapping_neg(),
            }
        }

        pub fn function(self) -> Function {
            Function::unary(format!("{self:?}"), move |v| {
                json!(self.apply(v.as_i64().unwrap_or_default()))
            })
        }
    }

    pub fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (-1000i64..1000).prop_map(Step::Add),
            (-10i64..10).prop_map(Step::Mul),
            Just(Step::Negate),
        ]
    }

    pub fn steps() -> impl Strategy<Value = Vec<Step>> {
        vec(step(), 0..=8)
    }

    /// Arbitrary JSON scalars and small arrays
    pub fn value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z./:-]{0,24}".prop_map(Value::String),
            vec(any::<i32>(), 0..4).prop_map(|v| json!(v)),
        ]
    }
}

#[cfg(test)]
mod property_tests {
    use super::generators::*;
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn prop_empty_compose_is_identity(x in value()) {
            let identity = compose(Vec::<Function>::new()).unwrap();
            prop_assert_eq!(identity.call1(x.clone()).unwrap(), x);
        }

        #[test]
        fn prop_single_compose_is_same_function(step in step()) {
            let f = step.function();
            let composed = compose([f.clone()]).unwrap();
            prop_assert!(composed.ptr_eq(&f));
        }

        #[test]
        fn prop_compose_applies_right_to_left(steps in steps(), x in -10_000i64..10_000) {
            let expected = steps.iter().rev().fold(x, |acc, step| step.apply(acc));
            let composed = compose(steps.iter().map(|s| s.function())).unwrap();
            prop_assert_eq!(composed.call1(json!(x)).unwrap(), json!(expected));
        }

        #[test]
        fn prop_pipe_applies_left_to_right(steps in steps(), x in -10_000i64..10_000) {
            let expected = steps.iter().fold(x, |acc, step| step.apply(acc));
            let piped = pipe(steps.iter().map(|s| s.function())).unwrap();
            prop_assert_eq!(piped.call1(json!(x)).unwrap(), json!(expected));
        }

        #[test]
        fn prop_compose_is_associative(
            f in step(), g in step(), h in step(), x in -10_000i64..10_000
        ) {
            let fg = compose([f.function(), g.function()]).unwrap();
            let gh = compose([g.function(), h.function()]).unwrap();
            let left = compose([fg, h.function()]).unwrap();
            let right = compose([f.function(), gh]).unwrap();
            let flat = compose([f.function(), g.function(), h.function()]).unwrap();

            let expected = json!(f.apply(g.apply(h.apply(x))));
            prop_assert_eq!(left.call1(json!(x)).unwrap(), expected.clone());
            prop_assert_eq!(right.call1(json!(x)).unwrap(), expected.clone());
            prop_assert_eq!(flat.call1(json!(x)).unwrap(), expected);
        }

        #[test]
        fn prop_non_callable_is_rejected(steps in steps(), position in 0usize..9, junk in value()) {
            let mut operands: Vec<Operand> = steps.iter().map(|s| s.function().into()).collect();
            let position = position.min(operands.len());
            operands.insert(position, junk.into());

            let is_type_error = matches!(compose(operands), Err(crate::Error::TypeKind { .. }));
            prop_assert!(is_type_error);
        }

        #[test]
        fn prop_static_compose_matches_dynamic(f in step(), g in step(), x in -10_000i64..10_000) {
            let composed = crate::compose!(move |v| f.apply(v), move |v| g.apply(v));
            let dynamic = compose([f.function(), g.function()]).unwrap();
            prop_assert_eq!(json!(composed(x)), dynamic.call1(json!(x)).unwrap());
        }
    }
}
