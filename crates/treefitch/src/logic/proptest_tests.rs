//! Property-based tests for the formula model using proptest.

use proptest::prelude::*;

use super::equivalence;
use super::formula::Formula;
use super::parser::parse_formula;

/// Generate a random formula of bounded depth over a fixed atom pool.
fn arb_formula(depth: u32) -> BoxedStrategy<Formula> {
    if depth == 0 {
        prop_oneof![
            Just(Formula::atom("P")),
            Just(Formula::atom("Q")),
            Just(Formula::atom("R")),
            Just(Formula::atom("S")),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => arb_formula(0),
            2 => arb_formula(depth - 1).prop_map(Formula::not),
            2 => proptest::collection::vec(arb_formula(depth - 1), 2..4)
                .prop_map(Formula::Conjunction),
            2 => proptest::collection::vec(arb_formula(depth - 1), 2..4)
                .prop_map(Formula::Disjunction),
            1 => (arb_formula(depth - 1), arb_formula(depth - 1))
                .prop_map(|(a, b)| Formula::cond(a, b)),
            1 => (arb_formula(depth - 1), arb_formula(depth - 1))
                .prop_map(|(a, b)| Formula::bicond(a, b)),
        ]
        .boxed()
    }
}

proptest! {
    /// The display rendering parses back to the same formula.
    #[test]
    fn display_round_trips_through_parser(f in arb_formula(4)) {
        let rendered = f.to_string();
        let reparsed = parse_formula(&rendered).expect("rendered formula must parse");
        prop_assert_eq!(reparsed, f);
    }

    /// The file-safe rendering never contains a logical symbol.
    #[test]
    fn fitch_str_is_symbol_free(f in arb_formula(4)) {
        let rendered = f.fitch_str();
        for symbol in ['¬', '∧', '∨', '→', '↔', '⊥'] {
            prop_assert!(!rendered.contains(symbol));
        }
    }

    /// Every equivalence pairs the decomposed shape with its rewrite.
    #[test]
    fn equivalences_have_the_documented_shapes(
        a in arb_formula(2),
        b in arb_formula(2),
    ) {
        prop_assert_eq!(
            equivalence::conditional(&a, &b),
            Formula::or(Formula::not(a.clone()), b.clone())
        );
        prop_assert_eq!(
            equivalence::neg_conditional(&a, &b),
            Formula::and(a.clone(), Formula::not(b.clone()))
        );
        prop_assert_eq!(
            equivalence::demorgan1(&[a.clone(), b.clone()]),
            Formula::or(Formula::not(a.clone()), Formula::not(b.clone()))
        );
        prop_assert_eq!(
            equivalence::demorgan2(&[a.clone(), b.clone()]),
            Formula::and(Formula::not(a.clone()), Formula::not(b.clone()))
        );
    }
}
