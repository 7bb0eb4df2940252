use randomizer::{
    ArgumentError, BoundedStrategy, EntropyError, Error, FixedBytesProvider, ProviderDescriptor,
    RandomConfig, RandomContext, RandomSource,
};

fn fixed_context(provider: FixedBytesProvider) -> RandomContext {
    let descriptor = ProviderDescriptor::new("fixed", provider);
    let context =
        RandomContext::with_providers(RandomConfig::default(), vec![descriptor.clone()]).unwrap();

    // Pinning skips the probe, so the script is consumed by draws only.
    context.providers().set_active(descriptor).unwrap();
    context
}

fn unit_script(magnitudes: &[[u8; 4]]) -> Vec<u8> {
    magnitudes
        .iter()
        .flat_map(|m| m.iter().copied().chain([0u8; 4]))
        .collect()
}

#[test]
fn bounded_draws_stay_in_range() {
    let context = RandomContext::new();
    let source = context.source();

    for max in [1u64, 2, 3, 7, 10, 26, 62, 94, 1000, u64::MAX] {
        for _ in 0..10_000 {
            assert!(source.draw_bounded(max).unwrap() < max);
        }
    }
}

#[test]
fn bound_of_one_always_yields_zero() {
    let source = RandomSource::global();

    for _ in 0..1000 {
        assert_eq!(source.draw_bounded(1).unwrap(), 0);
        assert_eq!(source.draw_bounded_unbiased(1).unwrap(), 0);
    }
}

#[test]
fn bound_of_zero_is_invalid() {
    let source = RandomSource::global();

    assert_eq!(
        source.draw_bounded(0),
        Err(Error::Argument(ArgumentError::InvalidBound))
    );
    assert_eq!(
        source.draw_bounded_unbiased(0),
        Err(Error::Argument(ArgumentError::InvalidBound))
    );
}

#[test]
fn unit_draws_stay_in_range() {
    let source = RandomSource::global();

    for _ in 0..10_000 {
        let unit = source.draw_unit().unwrap();
        assert!((0.0..1.0).contains(&unit));

        let single = source.draw_unit_single().unwrap();
        assert!((0.0..1.0).contains(&single));

        let uniform = source.draw_unit_uniform().unwrap();
        assert!((0.0..1.0).contains(&uniform));
    }
}

#[test]
fn modulo_draws_follow_script() {
    let context = fixed_context(FixedBytesProvider::from_draws(&[10, 11, 12, u64::MAX]));
    let source = context.source().with_strategy(BoundedStrategy::Modulo);

    let draws: Vec<u64> = (0..4).map(|_| source.draw_bounded(3).unwrap()).collect();

    assert_eq!(draws, [1, 2, 0, 0]);
}

#[test]
fn rejection_discards_values_outside_zone() {
    // 2^64 % 3 == 1, so u64::MAX is the one value the unbiased draw rejects.
    let context = fixed_context(FixedBytesProvider::from_draws(&[u64::MAX, 7]));
    let source = context.source();

    assert_eq!(source.draw_bounded_unbiased(3).unwrap(), 1);
}

#[test]
fn rejection_gives_up_after_repeated_rejections() {
    let context = fixed_context(FixedBytesProvider::from_draws(&[u64::MAX]));
    let source = context.source();

    assert!(matches!(
        source.draw_bounded_unbiased(3),
        Err(Error::Entropy(EntropyError::Unreadable { .. }))
    ));
}

#[test]
fn strategy_follows_config() {
    let config = RandomConfig::default().with_bounded_strategy(BoundedStrategy::Rejection);
    let context = RandomContext::with_config(config).unwrap();

    assert_eq!(context.source().strategy(), BoundedStrategy::Rejection);

    let context = fixed_context(FixedBytesProvider::from_draws(&[u64::MAX, 7]));
    let source = context.source().with_strategy(BoundedStrategy::Rejection);
    assert_eq!(source.draw_bounded(3).unwrap(), 1);
}

#[test]
fn unit_draw_divides_magnitude_by_double_max() {
    let one = 1.0f32.to_le_bytes();
    let minus_two = (-2.0f32).to_le_bytes();
    let near_max = [0xfe, 0xff, 0x7f, 0x7f];
    let script = unit_script(&[one, minus_two, near_max]);
    let context = fixed_context(FixedBytesProvider::cycling(script));
    let source = context.source();

    assert_eq!(source.draw_unit().unwrap(), 1.0 / f64::MAX);
    assert_eq!(source.draw_unit().unwrap(), 2.0 / f64::MAX);

    let largest = source.draw_unit().unwrap();
    assert_eq!(largest, f64::from(f32::from_le_bytes(near_max)) / f64::MAX);
    assert!(largest < 1e-260);
}

#[test]
fn unit_draw_redraws_non_finite_patterns() {
    let nan = f32::NAN.to_le_bytes();
    let infinity = f32::INFINITY.to_le_bytes();
    let max = f32::MAX.to_le_bytes();
    let context = fixed_context(FixedBytesProvider::cycling(unit_script(&[nan, infinity, max])));

    assert_eq!(
        context.source().draw_unit().unwrap(),
        f64::from(f32::MAX) / f64::MAX
    );
}

#[test]
fn single_unit_draw_normalizes_by_single_max() {
    let one = 1.0f32.to_le_bytes();
    let minus_two = (-2.0f32).to_le_bytes();
    let context = fixed_context(FixedBytesProvider::cycling(unit_script(&[one, minus_two])));
    let source = context.source();

    assert_eq!(source.draw_unit_single().unwrap(), 1.0 / f64::from(f32::MAX));
    assert_eq!(source.draw_unit_single().unwrap(), 2.0 / f64::from(f32::MAX));
}

#[test]
fn single_unit_draw_redraws_unusable_patterns() {
    let nan = f32::NAN.to_le_bytes();
    let infinity = f32::INFINITY.to_le_bytes();
    let max = f32::MAX.to_le_bytes();
    let half_max = (f32::MAX / 2.0).to_le_bytes();
    let script = unit_script(&[nan, infinity, max, half_max]);
    let context = fixed_context(FixedBytesProvider::cycling(script));

    assert_eq!(context.source().draw_unit_single().unwrap(), 0.5);
}

#[test]
fn uniform_unit_uses_high_bits() {
    let context = fixed_context(FixedBytesProvider::from_draws(&[0, u64::MAX, 1 << 63]));
    let source = context.source();

    assert_eq!(source.draw_unit_uniform().unwrap(), 0.0);
    assert!(source.draw_unit_uniform().unwrap() < 1.0);
    assert_eq!(source.draw_unit_uniform().unwrap(), 0.5);
}

#[test]
fn provider_failure_propagates() {
    let context = fixed_context(FixedBytesProvider::exhausting(vec![0; 12]));
    let source = context.source();

    assert_eq!(source.draw_bounded(10).unwrap(), 0);
    assert!(matches!(
        source.draw_bounded(10),
        Err(Error::Entropy(EntropyError::Unreadable { .. }))
    ));
    assert!(matches!(
        source.draw_unit(),
        Err(Error::Entropy(EntropyError::Unreadable { .. }))
    ));
}
