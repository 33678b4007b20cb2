use ethereum_types::{Address, U256};
use poolguard_core::math::scale_x96;
use poolguard_core::types::{SwapDirection, SwapRecord};
use poolguard_detector::PatternDetector;

fn eth(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

fn record(
    swapper: u8,
    direction: SwapDirection,
    price_before: U256,
    price_after: U256,
    tx_index: u32,
) -> SwapRecord {
    SwapRecord {
        swapper: Address::repeat_byte(swapper),
        direction,
        price_before,
        price_after,
        amount_in: eth(10),
        block_number: 7,
        tx_index,
    }
}

#[test]
fn one_swap_participates_in_two_detections() {
    // cadeia alternada: a perna back do primeiro sandwich é a perna front do
    // segundo; ambos devem ser emitidos, sem deduplicação
    let down = scale_x96() * U256::from(99u64) / U256::from(100u64);
    let up = scale_x96() * U256::from(101u64) / U256::from(100u64);
    let window = vec![
        record(0xaa, SwapDirection::Forward, scale_x96(), down, 0),
        record(0xbb, SwapDirection::Forward, scale_x96(), down, 1),
        record(0xaa, SwapDirection::Reverse, down, scale_x96(), 2),
        record(0xcc, SwapDirection::Reverse, scale_x96(), up, 3),
        record(0xaa, SwapDirection::Forward, up, scale_x96(), 4),
    ];

    let detections = PatternDetector::new().scan(&window).unwrap();
    assert_eq!(detections.len(), 2);

    assert_eq!(detections[0].attack.victim, Address::repeat_byte(0xbb));
    assert_eq!(detections[0].attack.back_tx_index, 2);

    assert_eq!(detections[1].attack.victim, Address::repeat_byte(0xcc));
    assert_eq!(detections[1].attack.front_tx_index, 2);
    assert_eq!(detections[1].attack.attacker, Address::repeat_byte(0xaa));
}

#[test]
fn sliding_window_advances_one_position() {
    // dois sandwiches disjuntos na mesma janela
    let down = scale_x96() * U256::from(98u64) / U256::from(100u64);
    let window = vec![
        record(0xaa, SwapDirection::Forward, scale_x96(), down, 0),
        record(0xbb, SwapDirection::Forward, scale_x96(), down, 1),
        record(0xaa, SwapDirection::Reverse, down, scale_x96(), 2),
        record(0xdd, SwapDirection::Forward, scale_x96(), down, 3),
        record(0xee, SwapDirection::Forward, scale_x96(), down, 4),
        record(0xdd, SwapDirection::Reverse, down, scale_x96(), 5),
    ];

    let detections = PatternDetector::new().scan(&window).unwrap();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].attack.attacker, Address::repeat_byte(0xaa));
    assert_eq!(detections[1].attack.attacker, Address::repeat_byte(0xdd));
    assert_eq!(detections[1].attack.victim, Address::repeat_byte(0xee));
}
