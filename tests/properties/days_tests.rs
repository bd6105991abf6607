use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nbury::days::DaysSpec;

proptest! {
    #[test]
    fn single_integers_parse_to_degenerate_range(k in 1u32..=10_000) {
        let spec: DaysSpec = k.to_string().parse().unwrap();
        prop_assert_eq!((spec.low(), spec.high()), (k, k));
        prop_assert!(spec.is_fixed());
    }

    #[test]
    fn ordered_ranges_parse_exactly(a in 1u32..=10_000, b in 1u32..=10_000) {
        prop_assume!(a <= b);
        let spec: DaysSpec = format!("{a}-{b}").parse().unwrap();
        prop_assert_eq!((spec.low(), spec.high()), (a, b));
    }

    #[test]
    fn reversed_ranges_are_rejected(a in 1u32..=10_000, b in 1u32..=10_000) {
        prop_assume!(a > b);
        let text = format!("{}-{}", a, b);
        prop_assert!(text.parse::<DaysSpec>().is_err());
    }

    #[test]
    fn surrounding_whitespace_is_ignored(k in 1u32..=10_000, pad_left in 0usize..4, pad_right in 0usize..4) {
        let text = format!("{}{}{}", " ".repeat(pad_left), k, " ".repeat(pad_right));
        let spec: DaysSpec = text.parse().unwrap();
        prop_assert_eq!((spec.low(), spec.high()), (k, k));
    }

    #[test]
    fn zero_low_is_always_rejected(b in 0u32..=10_000) {
        let text = format!("0-{}", b);
        prop_assert!(text.parse::<DaysSpec>().is_err());
    }

    #[test]
    fn arbitrary_text_never_panics(input in "\\PC{0,40}") {
        // Parsing either succeeds or returns a typed error; it never panics.
        let _ = input.parse::<DaysSpec>();
    }

    #[test]
    fn samples_stay_inclusive_of_both_endpoints(low in 1u32..=100, span in 0u32..=100, seed in any::<u64>()) {
        let spec = DaysSpec::new(low, low + span).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..32 {
            let days = spec.sample(&mut rng);
            prop_assert!(days >= low && days <= low + span, "sampled {}", days);
        }
    }

    #[test]
    fn display_round_trips_through_parse(a in 1u32..=10_000, b in 1u32..=10_000) {
        prop_assume!(a <= b);
        let spec = DaysSpec::new(a, b).unwrap();
        let reparsed: DaysSpec = spec.to_string().parse().unwrap();
        prop_assert_eq!(spec, reparsed);
    }
}
