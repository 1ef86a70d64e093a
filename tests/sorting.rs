use numstream::DoubleStream;
use numstream::testing::*;

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

#[test]
fn sorted_by_f64_orders_by_the_derived_key() {
    let out = DoubleStream::of([1.0, 2.0, 3.0]).sorted_by_f64(|x| -x).to_vec();
    assert_elements_eq(&out, &[3.0, 2.0, 1.0]);
}

#[test]
fn reverse_sorted_round_trips_the_special_values_exactly() {
    let out = DoubleStream::of([
        0.0,
        1.0,
        1000.0,
        -10.0,
        -f64::MAX,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::MAX,
        -0.0,
        f64::MIN_POSITIVE,
    ])
    .reverse_sorted()
    .to_vec();

    let expected = [
        f64::INFINITY,
        f64::MAX,
        1000.0,
        1.0,
        f64::MIN_POSITIVE,
        0.0,
        -0.0,
        -10.0,
        -f64::MAX,
        f64::NEG_INFINITY,
    ];
    // Bit-exact: distinguishes -0.0 from +0.0.
    assert_eq!(bits(&out), bits(&expected));
}

#[test]
fn negative_zero_sorts_before_positive_zero_and_nan_sorts_last() {
    let out = DoubleStream::of([f64::NAN, 1.0, 0.0, -0.0]).sorted().to_vec();
    assert_eq!(bits(&out[..3]), bits(&[-0.0, 0.0, 1.0]));
    assert!(out[3].is_nan());
}

#[test]
fn sorting_an_already_sorted_stream_is_idempotent() {
    let once = DoubleStream::of([5.0, -1.0, 3.0, 3.0, 0.5]).sorted().to_vec();
    let twice = DoubleStream::of(once.clone()).sorted().to_vec();
    assert_f64_seq_eq(&twice, &once, 0.0);
}

#[test]
fn sorted_by_key_is_stable_and_evaluates_lazily() {
    // Key ties (x % 3) must keep encounter order within each key.
    let out = DoubleStream::of([4.0, 1.0, 5.0, 2.0, 7.0])
        .sorted_by_key(|x| x as i64 % 3)
        .to_vec();
    assert_elements_eq(&out, &[4.0, 1.0, 7.0, 5.0, 2.0]);

    // No evaluation before the terminal: sorting an infinite stream is
    // fine as long as a limit precedes it.
    let bounded = DoubleStream::iterate(9.0, |x| x - 1.0).limit(4).sorted().to_vec();
    assert_elements_eq(&bounded, &[6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn distinct_preserves_first_occurrence_order() {
    let out = DoubleStream::of([3.0, 1.0, 3.0, 2.0, 1.0, 3.0]).distinct().to_vec();
    assert_elements_eq(&out, &[3.0, 1.0, 2.0]);
}
