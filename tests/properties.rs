//! Invariants checked over seeded random knot sequences.

use approx::assert_abs_diff_eq;
use knot_sequences::{
    convert::to_expanded, CompactIndex, ExpandedIndex, KnotSequenceConfig,
    StrictlyIncreasingOpenKnotSequence,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 12345;
const SEQUENCES: u64 = 200;

/// Random clamped sequence: distinct abscissae at least `0.1` apart, full
/// multiplicity at both ends, random interior multiplicities below the
/// order.
fn random_clamped(seed: u64) -> StrictlyIncreasingOpenKnotSequence {
    let mut rng = StdRng::seed_from_u64(seed);
    let order: usize = rng.random_range(2..=5);
    let interior: usize = rng.random_range(0..8);

    let mut current = 0.0;
    let mut knots = vec![current];
    let mut multiplicities = vec![order];
    for _ in 0..interior {
        current += rng.random_range(0.1..1.0);
        knots.push(current);
        multiplicities.push(rng.random_range(1..order));
    }
    current += rng.random_range(0.1..1.0);
    knots.push(current);
    multiplicities.push(order);

    StrictlyIncreasingOpenKnotSequence::new(
        order,
        KnotSequenceConfig::StrictlyIncreasingKnots {
            knots: &knots,
            multiplicities: &multiplicities,
        },
    )
    .unwrap()
}

#[test]
fn spans_bracket_their_abscissa() {
    for i in 0..SEQUENCES {
        let sequence = to_expanded(&random_clamped(SEED + i));
        let mut rng = StdRng::seed_from_u64(SEED + 10000 + i);
        for _ in 0..20 {
            let u = rng.random_range(0.0..sequence.u_max());
            let span = sequence.find_span(u).unwrap();
            let lower = sequence.abscissa_at(span).unwrap();
            let upper = sequence
                .abscissa_at(ExpandedIndex::new(span.get() + 1))
                .unwrap();
            assert!(lower <= u && u < upper, "{u} not in [{lower}, {upper})");
        }

        // The last span ends on u_max.
        let last = sequence.find_span(sequence.u_max()).unwrap();
        let upper = sequence
            .abscissa_at(ExpandedIndex::new(last.get() + 1))
            .unwrap();
        assert_eq!(upper, sequence.u_max());
        assert!(sequence.abscissa_at(last).unwrap() < upper);
    }
}

#[test]
fn index_spaces_round_trip() {
    for i in 0..SEQUENCES {
        let sequence = random_clamped(SEED + i);
        let expanded = to_expanded(&sequence);
        for compact in 0..sequence.len() {
            let compact = CompactIndex::new(compact);
            let first = sequence.to_expanded_index(compact).unwrap();
            assert_eq!(sequence.to_compact_index(first), Ok(compact));
            assert_eq!(
                expanded.abscissa_at(first),
                sequence.abscissa_at(compact)
            );
        }
        assert_eq!(expanded.len(), sequence.occurrence_count());
    }
}

#[test]
fn reverting_twice_is_identity() {
    for i in 0..SEQUENCES {
        let sequence = random_clamped(SEED + i);
        let mirrored = sequence.revert_knot_sequence();

        let mut reversed = sequence.multiplicities();
        reversed.reverse();
        assert_eq!(mirrored.multiplicities(), reversed);
        assert_abs_diff_eq!(mirrored.origin(), sequence.origin());
        assert_abs_diff_eq!(
            mirrored.u_max(),
            sequence.u_max(),
            epsilon = 1.0e-12
        );

        let twice = mirrored.revert_knot_sequence();
        for (a, b) in twice
            .distinct_abscissae()
            .iter()
            .zip(sequence.distinct_abscissae())
        {
            assert_abs_diff_eq!(*a, b, epsilon = 1.0e-12);
        }
    }
}

#[test]
fn insertion_between_knots_adds_one_knot() {
    for i in 0..SEQUENCES {
        let sequence = random_clamped(SEED + i);
        let abscissae = sequence.distinct_abscissae();
        let mut rng = StdRng::seed_from_u64(SEED + 20000 + i);
        let gap = rng.random_range(0..abscissae.len() - 1);
        let u = 0.5 * (abscissae[gap] + abscissae[gap + 1]);

        let refined = sequence.insert_knot(u, 1).unwrap();
        assert_eq!(refined.len(), sequence.len() + 1);
        assert_eq!(
            refined.occurrence_count(),
            sequence.occurrence_count() + 1
        );
        assert_eq!(refined.multiplicity_at(u), 1);
        assert_eq!(refined.find_span(u), Ok(CompactIndex::new(gap + 1)));
        assert_eq!(refined.origin(), sequence.origin());
        assert_eq!(refined.u_max(), sequence.u_max());
    }
}

#[test]
fn interior_removal_keeps_a_valid_basis() {
    for i in 0..SEQUENCES {
        let sequence = random_clamped(SEED + i);
        if sequence.len() < 3 {
            continue;
        }
        // Peel the first interior knot until none is left.
        let mut stripped = sequence.clone();
        while stripped.len() > 2 {
            stripped = stripped
                .decrement_knot_multiplicity(&[CompactIndex::new(1)], true)
                .unwrap();
        }
        assert!(stripped.is_knot_multiplicity_non_uniform());
        assert_eq!(stripped.u_max(), sequence.u_max());
        assert!(stripped.normalized_basis_bounds().is_strictly_normalized());
    }
}
