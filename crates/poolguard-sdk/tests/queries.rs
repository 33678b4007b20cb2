use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use poolguard_core::error::Result;
use poolguard_core::traits::PayoutTransport;
use poolguard_core::types::{SwapDirection, SwapRecord};
use poolguard_core::Error;
use poolguard_sdk::{GuardConfig, PoolGuard};

#[derive(Clone, Default)]
struct NullTransport;

#[async_trait]
impl PayoutTransport for NullTransport {
    async fn transfer(&self, _to: Address, _amount: U256) -> Result<()> {
        Ok(())
    }
}

fn px96() -> U256 {
    U256::one() << 96
}

fn swap(swapper: Address, block_number: u64, tx_index: u32) -> SwapRecord {
    SwapRecord {
        swapper,
        direction: SwapDirection::Forward,
        price_before: px96(),
        price_after: px96(),
        amount_in: U256::exp10(18),
        block_number,
        tx_index,
    }
}

#[test]
fn unauthorized_reporter_is_rejected() {
    let authorized = Address::repeat_byte(0x0e);
    let config = GuardConfig::builder().authorized_reporter(authorized).build();
    let guard = PoolGuard::new(config, NullTransport).unwrap();
    let pool = H256::repeat_byte(0x11);

    let err = guard
        .record_swap(Address::repeat_byte(0x0f), pool, swap(Address::repeat_byte(0x01), 1, 0))
        .unwrap_err();
    match err {
        Error::UnauthorizedCaller(_) => {}
        other => panic!("unexpected error: {other}"),
    }
    assert!(guard.block_swaps(pool, 1).is_empty());

    // a origem autorizada segue aceita
    assert!(guard
        .record_swap(authorized, pool, swap(Address::repeat_byte(0x01), 1, 0))
        .unwrap());
}

#[test]
fn open_ingestion_when_no_reporters_configured() {
    let guard = PoolGuard::new(GuardConfig::default(), NullTransport).unwrap();
    let pool = H256::repeat_byte(0x11);
    assert!(guard
        .record_swap(Address::repeat_byte(0x0f), pool, swap(Address::repeat_byte(0x01), 1, 0))
        .unwrap());
}

#[test]
fn zero_swapper_is_rejected() {
    let guard = PoolGuard::new(GuardConfig::default(), NullTransport).unwrap();
    let err = guard
        .record_swap(Address::repeat_byte(0x0e), H256::repeat_byte(0x11), swap(Address::zero(), 1, 0))
        .unwrap_err();
    match err {
        Error::InvalidAddress(_) => {}
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn block_swaps_preserves_insertion_order() {
    let guard = PoolGuard::new(GuardConfig::default(), NullTransport).unwrap();
    let reporter = Address::repeat_byte(0x0e);
    let pool = H256::repeat_byte(0x11);

    for tx_index in 0..5u32 {
        guard
            .record_swap(reporter, pool, swap(Address::repeat_byte(0x01), 7, tx_index))
            .unwrap();
    }
    let records = guard.block_swaps(pool, 7);
    let indices: Vec<u32> = records.iter().map(|r| r.tx_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    // (pool, bloco) desconhecido responde vazio
    assert!(guard.block_swaps(pool, 8).is_empty());
    assert!(guard.block_swaps(H256::repeat_byte(0x22), 7).is_empty());
}

#[test]
fn fresh_service_answers_zeroed_queries() {
    let guard = PoolGuard::new(GuardConfig::default(), NullTransport).unwrap();
    let address = Address::repeat_byte(0x01);
    assert_eq!(guard.attack_count(address), 0);
    assert!(!guard.is_blacklisted(address));
    assert_eq!(guard.pending_refund(address), U256::zero());
    assert_eq!(guard.treasury_balance(), U256::zero());
    assert_eq!(guard.avg_refund_rate(), U256::zero());
}

#[test]
fn queue_refund_through_facade_credits_victim() {
    let guard = PoolGuard::new(GuardConfig::default(), NullTransport).unwrap();
    let victim = Address::repeat_byte(0xbb);
    guard.fund(U256::exp10(18)).unwrap();
    guard.queue_refund(victim, U256::exp10(17)).unwrap();
    assert_eq!(guard.pending_refund(victim), U256::exp10(17));
    assert_eq!(guard.treasury_balance(), U256::exp10(18) - U256::exp10(17));
}
