//! Property-based tests for expression evaluation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::calculator::{evaluate, CalcError};

    // Small integers keep every intermediate result exact in f64
    fn operand() -> impl Strategy<Value = i32> {
        -1000i32..1000
    }

    fn nonzero_operand() -> impl Strategy<Value = i32> {
        operand().prop_filter("divisor must be non-zero", |n| *n != 0)
    }

    proptest! {
        #[test]
        fn same_input_same_result(expr in "[0-9+*/(). -]{0,24}") {
            prop_assert_eq!(evaluate(&expr), evaluate(&expr));
        }

        #[test]
        fn product_binds_tighter(a in operand(), b in operand(), c in operand()) {
            let expected = a as f64 + b as f64 * c as f64;
            prop_assert_eq!(evaluate(&format!("{a}+{b}*{c}")), Ok(expected));
        }

        #[test]
        fn parentheses_override(a in operand(), b in operand(), c in operand()) {
            let expected = (a as f64 + b as f64) * c as f64;
            prop_assert_eq!(evaluate(&format!("({a} + {b}) * {c}")), Ok(expected));
        }

        #[test]
        fn subtraction_is_left_associative(a in operand(), b in operand(), c in operand()) {
            let expected = (a as f64 - b as f64) - c as f64;
            prop_assert_eq!(evaluate(&format!("{a} - {b} - {c}")), Ok(expected));
        }

        #[test]
        fn division_matches_f64(a in operand(), b in nonzero_operand(), c in nonzero_operand()) {
            let expected = a as f64 / b as f64 / c as f64;
            prop_assert_eq!(evaluate(&format!("{a}/{b}/{c}")), Ok(expected));
        }

        #[test]
        fn zero_divisor_is_reported(a in operand(), b in operand()) {
            prop_assert_eq!(
                evaluate(&format!("{a} + {b} / (3 - 3)")),
                Err(CalcError::DivisionByZero)
            );
        }

        #[test]
        fn letters_are_rejected(prefix in "[0-9+]{0,6}", letter in "[a-zA-Z]") {
            let c = letter.chars().next().unwrap();
            prop_assert_eq!(
                evaluate(&format!("{prefix}{letter}")),
                Err(CalcError::InvalidCharacters(c))
            );
        }
    }
}
