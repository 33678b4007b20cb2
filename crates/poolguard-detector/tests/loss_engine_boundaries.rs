use ethereum_types::U256;
use poolguard_core::math::scale_x96;
use poolguard_core::types::SwapDirection;
use poolguard_detector::{compute_loss, min_price_move};

fn eth(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

#[test]
fn displacement_below_threshold_is_dust() {
    let fair = scale_x96();
    let exec = fair - (min_price_move() - U256::one());
    let loss = compute_loss(fair, exec, eth(10), SwapDirection::Forward).unwrap();
    assert_eq!(loss, U256::zero());
}

#[test]
fn displacement_at_threshold_may_be_positive() {
    let fair = scale_x96();
    let exec = fair - min_price_move();
    let loss = compute_loss(fair, exec, eth(10), SwapDirection::Forward).unwrap();
    assert!(loss > U256::zero(), "loss={}", loss);
}

#[test]
fn loss_monotonic_in_displacement() {
    let fair = scale_x96();
    let displacements = [
        min_price_move(),
        U256::exp10(15),
        U256::exp10(16),
        U256::exp10(17),
        U256::exp10(18),
    ];
    let mut previous = U256::zero();
    for d in displacements {
        let loss = compute_loss(fair, fair - d, eth(10), SwapDirection::Forward).unwrap();
        assert!(loss >= previous, "loss={} previous={}", loss, previous);
        previous = loss;
    }
}
