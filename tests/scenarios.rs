//! End-to-end behavior of the four knot sequence flavors.

use approx::assert_abs_diff_eq;
use core::cell::RefCell;
use knot_sequences::{
    convert::{open_to_periodic, periodic_to_open},
    CompactIndex, ExpandedIndex, IncreasingOpenKnotSequence,
    IncreasingPeriodicKnotSequence, KnotSequenceConfig, KnotSequenceError,
    NormalizedBasisStatus, StrictlyIncreasingOpenKnotSequence,
    StrictlyIncreasingPeriodicKnotSequence,
};

const CLAMPED: [f64; 12] =
    [0.0, 0.0, 0.0, 0.0, 0.5, 0.6, 0.7, 0.7, 1.0, 1.0, 1.0, 1.0];

fn assert_all_abs_diff_eq(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1.0e-9);
    }
}

#[test]
fn insert_knot_into_clamped_sequence() {
    let sequence = IncreasingOpenKnotSequence::<f64>::new(
        4,
        KnotSequenceConfig::IncreasingKnots { knots: &CLAMPED },
    )
    .unwrap();

    let refined = sequence.insert_knot(0.3, 3).unwrap();
    assert_eq!(
        refined.distinct_abscissae(),
        vec![0.0, 0.3, 0.5, 0.6, 0.7, 1.0]
    );
    assert_eq!(refined.multiplicities(), vec![4, 3, 1, 1, 2, 4]);
    assert_eq!(refined.occurrence_count(), 15);
    assert!(refined.is_knot_multiplicity_non_uniform());
}

#[test]
fn renormalize_after_removing_the_origin_knot() {
    let knots: Vec<f64> = (0..12).map(|i| -0.3 + 0.1 * i as f64).collect();
    let sequence = IncreasingOpenKnotSequence::<f64>::new(
        4,
        KnotSequenceConfig::IncreasingKnots { knots: &knots },
    )
    .unwrap();
    assert_abs_diff_eq!(sequence.origin(), 0.0);
    assert_abs_diff_eq!(sequence.u_max(), 0.5, epsilon = 1.0e-12);
    assert!(sequence.is_knot_spacing_uniform());

    let origin = sequence
        .to_expanded_index(sequence.index_knot_origin())
        .unwrap();
    assert_eq!(origin, ExpandedIndex::new(3));

    let decremented = sequence
        .decrement_knot_multiplicity(&[origin], false)
        .unwrap();
    assert!(!decremented.is_knot_spacing_uniform());

    let renormalized = decremented
        .update_through_normalized_basis_analysis()
        .unwrap();
    assert_abs_diff_eq!(renormalized.origin(), 0.0);
    assert_abs_diff_eq!(renormalized.u_max(), 0.4, epsilon = 1.0e-12);
    assert_all_abs_diff_eq(
        &renormalized.abscissae(),
        &[-0.4, -0.3, -0.2, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
    );
}

#[test]
fn open_closed_curve_to_periodic_and_back() {
    let knots = [-1.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.0, 8.0];
    let open = IncreasingOpenKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::IncreasingKnots { knots: &knots },
    )
    .unwrap();

    let periodic = open_to_periodic(&open).unwrap();
    assert_eq!(periodic.abscissae(), knots[1..11].to_vec());
    assert_eq!(periodic.u_max(), 7.0);

    let reopened = periodic_to_open(&periodic).unwrap();
    assert_eq!(reopened.abscissae(), knots.to_vec());
    assert_eq!(reopened, open);
}

#[test]
fn periodic_input_to_open_flavor_gains_wrap_around_knots() {
    let open = IncreasingOpenKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::PeriodicKnots {
            knots: &[0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.0],
        },
    )
    .unwrap();
    assert_eq!(
        open.abscissae(),
        vec![-1.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.0, 8.0]
    );
    assert_eq!(open.index_knot_origin(), CompactIndex::new(1));
}

#[test]
fn raising_boundary_knots_is_rejected_for_every_flavor() {
    fn expect_rejection(
        result: Result<impl core::fmt::Debug, KnotSequenceError>,
    ) {
        assert!(
            matches!(
                result,
                Err(KnotSequenceError::ModifyingNormalizedBasis { .. })
            ),
            "{result:?}"
        );
    }

    let increasing_open = IncreasingOpenKnotSequence::<f64>::new(
        4,
        KnotSequenceConfig::Uniform { basis_size: 6 },
    )
    .unwrap();
    for index in [0, 3, 6, 9] {
        let index = ExpandedIndex::new(index);
        let amount = 4 - increasing_open.knot_multiplicity(index).unwrap();
        expect_rejection(
            increasing_open.raise_knot_multiplicity(&[index], amount, true),
        );
    }

    let strictly_open = StrictlyIncreasingOpenKnotSequence::<f64>::new(
        4,
        KnotSequenceConfig::StrictlyIncreasingKnots {
            knots: &[0.0, 0.5, 0.6, 0.7, 1.0],
            multiplicities: &[4, 1, 1, 2, 4],
        },
    )
    .unwrap();
    for index in [0, 4] {
        let index = CompactIndex::new(index);
        let amount = 4 - strictly_open.knot_multiplicity(index).unwrap();
        expect_rejection(
            strictly_open.raise_knot_multiplicity(&[index], amount, true),
        );
    }

    let increasing_periodic = IncreasingPeriodicKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::PeriodicKnots {
            knots: &[0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 4.0],
        },
    )
    .unwrap();
    for index in [0, 1, 5, 6] {
        let index = ExpandedIndex::new(index);
        let amount = 3 - increasing_periodic.knot_multiplicity(index).unwrap();
        expect_rejection(
            increasing_periodic.raise_knot_multiplicity(&[index], amount, true),
        );
    }

    let strictly_periodic = StrictlyIncreasingPeriodicKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::PeriodicStrictlyIncreasingKnots {
            knots: &[0.0, 1.0, 2.0, 3.0, 4.0],
            multiplicities: &[1, 1, 1, 1, 1],
        },
    )
    .unwrap();
    for index in [0, 4] {
        let index = CompactIndex::new(index);
        let amount = 3 - strictly_periodic.knot_multiplicity(index).unwrap();
        expect_rejection(
            strictly_periodic.raise_knot_multiplicity(&[index], amount, true),
        );
    }
}

#[test]
fn minimal_closed_curves() {
    for order in 2..=5 {
        let periodic = IncreasingPeriodicKnotSequence::<f64>::new(
            order,
            KnotSequenceConfig::NoKnotClosedCurve,
        )
        .unwrap();
        let expected: Vec<f64> =
            (0..=order.max(3)).map(|i| i as f64).collect();
        assert_eq!(periodic.abscissae(), expected);
        assert!(periodic.is_knot_multiplicity_uniform());
        assert!(periodic.is_knot_spacing_uniform());
    }

    assert_eq!(
        StrictlyIncreasingPeriodicKnotSequence::<f64>::new(
            1,
            KnotSequenceConfig::NoKnotClosedCurve,
        ),
        Err(KnotSequenceError::InvalidMaxMultiplicityOrder {
            flavor: "StrictlyIncreasingPeriodicKnotSequence",
            value: 1,
            minimum: 2,
        })
    );
}

#[test]
fn periodic_rules() {
    assert_eq!(
        IncreasingPeriodicKnotSequence::<f64>::new(
            3,
            KnotSequenceConfig::PeriodicKnots {
                knots: &[0.0, 0.0, 1.0, 2.0, 3.0],
            },
        ),
        Err(KnotSequenceError::PeriodicEndMultiplicityMismatch {
            start: 2,
            end: 1
        })
    );
    assert_eq!(
        IncreasingPeriodicKnotSequence::<f64>::new(
            4,
            KnotSequenceConfig::PeriodicKnots {
                knots: &[0.0, 1.0, 2.0, 3.0],
            },
        ),
        Err(KnotSequenceError::InsufficientBasisSize {
            basis_size: 3,
            minimum: 4
        })
    );
    assert_eq!(
        IncreasingPeriodicKnotSequence::<f64>::new(
            3,
            KnotSequenceConfig::PeriodicKnots {
                knots: &[0.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0],
            },
        ),
        Err(KnotSequenceError::InteriorMultiplicityTooLarge {
            index: 1,
            multiplicity: 3,
            cap: 2
        })
    );

    let periodic = IncreasingPeriodicKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::Uniform { basis_size: 4 },
    )
    .unwrap();
    assert_eq!(periodic.abscissae(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    let bounds = periodic.normalized_basis_bounds();
    assert_eq!(bounds.start.knot_index, CompactIndex::new(0));
    assert_eq!(bounds.end.knot_index, CompactIndex::new(4));
    assert_eq!(bounds.end.status, NormalizedBasisStatus::StrictlyNormalized);
}

#[test]
fn mirrored_sequence_reverts_twice_to_itself() {
    let sequence = StrictlyIncreasingOpenKnotSequence::<f64>::new(
        4,
        KnotSequenceConfig::StrictlyIncreasingKnots {
            knots: &[0.0, 0.15, 0.6, 0.7, 1.0],
            multiplicities: &[4, 1, 3, 2, 4],
        },
    )
    .unwrap();

    let mirrored = sequence.revert_knot_sequence();
    assert_eq!(mirrored.multiplicities(), vec![4, 2, 3, 1, 4]);
    assert_all_abs_diff_eq(
        &mirrored.distinct_abscissae(),
        &[0.0, 0.3, 0.4, 0.85, 1.0],
    );

    let twice = mirrored.revert_knot_sequence();
    assert_all_abs_diff_eq(
        &twice.distinct_abscissae(),
        &sequence.distinct_abscissae(),
    );
    assert_eq!(twice.multiplicities(), sequence.multiplicities());
}

#[test]
fn c0_sequences_admit_full_interior_multiplicity() {
    let sequence = StrictlyIncreasingOpenKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::StrictlyIncreasingKnotsUpToC0Discontinuity {
            knots: &[0.0, 0.5, 1.0],
            multiplicities: &[3, 2, 3],
        },
    )
    .unwrap();
    let raised = sequence
        .raise_knot_multiplicity(&[CompactIndex::new(1)], 1, true)
        .unwrap();
    assert_eq!(raised.multiplicities(), vec![3, 3, 3]);
    assert_eq!(raised.find_span(0.5), Ok(CompactIndex::new(1)));
    assert_eq!(raised.find_span(0.25), Ok(CompactIndex::new(0)));

    let refined = sequence.insert_knot(0.75, 3).unwrap();
    assert_eq!(refined.multiplicities(), vec![3, 2, 3, 3]);

    // The same knots without the C0 allowance.
    assert_eq!(
        StrictlyIncreasingOpenKnotSequence::<f64>::new(
            3,
            KnotSequenceConfig::StrictlyIncreasingKnots {
                knots: &[0.0, 0.5, 1.0],
                multiplicities: &[3, 3, 3],
            },
        ),
        Err(KnotSequenceError::InteriorMultiplicityTooLarge {
            index: 1,
            multiplicity: 3,
            cap: 2
        })
    );
}

#[test]
fn multiplicity_query_reports_missing_knots() {
    let sequence = StrictlyIncreasingOpenKnotSequence::<f64>::new(
        3,
        KnotSequenceConfig::UniformlySpreadInterKnots { basis_size: 5 },
    )
    .unwrap();

    let warnings = RefCell::new(Vec::new());
    let sink = |component: &str, message: &str| {
        warnings
            .borrow_mut()
            .push((component.to_string(), message.to_string()))
    };

    assert_eq!(sequence.multiplicity_at_with(1.0, &sink), 1);
    assert_eq!(sequence.multiplicity_at_with(3.0, &sink), 3);
    assert!(warnings.borrow().is_empty());

    assert_eq!(sequence.multiplicity_at_with(1.5, &sink), 0);
    let warnings = warnings.into_inner();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, "StrictlyIncreasingOpenKnotSequence");
}

#[cfg(feature = "sentinel_check")]
#[test]
fn sentinel_abscissa_is_rejected() {
    use knot_sequences::UNINITIALIZED_ABSCISSA;

    // The basis spans [-2e5, 1e5], so the sentinel lies inside it.
    let sequence = IncreasingPeriodicKnotSequence::<f64>::new(
        2,
        KnotSequenceConfig::PeriodicKnots {
            knots: &[-2.0e5, -1.5e5, 0.0, 1.0e5],
        },
    )
    .unwrap();
    assert!(sequence.insert_knot(-0.5e5, 1).is_ok());
    assert_eq!(
        sequence.insert_knot(UNINITIALIZED_ABSCISSA, 1),
        Err(KnotSequenceError::UninitializedAbscissa {
            abscissa: UNINITIALIZED_ABSCISSA
        })
    );
}

#[test]
fn f32_sequences() {
    let sequence = StrictlyIncreasingOpenKnotSequence::<f32>::new(
        3,
        KnotSequenceConfig::StrictlyIncreasingKnots {
            knots: &[0.0, 0.25, 1.0],
            multiplicities: &[3, 1, 3],
        },
    )
    .unwrap();
    assert_eq!(sequence.find_span(0.5), Ok(CompactIndex::new(1)));
    assert_eq!(sequence.u_max(), 1.0f32);
}
