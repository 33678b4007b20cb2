use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use poolguard_core::error::Result;
use poolguard_core::traits::PayoutTransport;
use poolguard_core::types::{SwapDirection, SwapRecord};
use poolguard_sdk::{GuardConfig, PoolGuard};
use tracing::info;

/// Transporte de demonstração: apenas loga a transferência
struct LogTransport;

#[async_trait]
impl PayoutTransport for LogTransport {
    async fn transfer(&self, to: Address, amount: U256) -> Result<()> {
        info!(to = %to, amount = %amount, "transferência executada");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GuardConfig::builder()
        .authorized_reporter(Address::repeat_byte(0x0e))
        .build();
    let guard = PoolGuard::new(config, LogTransport)?;

    let reporter = Address::repeat_byte(0x0e);
    let pool = H256::repeat_byte(0x11);
    let attacker = Address::repeat_byte(0xaa);
    let victim = Address::repeat_byte(0xbb);
    let price = U256::one() << 96;

    // Financia a tesouraria com 10 unidades
    guard.fund(U256::exp10(19))?;

    // Reporta um bloco com um sandwich: front e back do atacante cercando a
    // vítima, cujo preço de execução cai pela metade
    let records = [
        SwapRecord {
            swapper: attacker,
            direction: SwapDirection::Forward,
            price_before: price,
            price_after: price,
            amount_in: U256::exp10(18),
            block_number: 100,
            tx_index: 0,
        },
        SwapRecord {
            swapper: victim,
            direction: SwapDirection::Forward,
            price_before: price,
            price_after: price >> 1,
            amount_in: U256::exp10(18),
            block_number: 100,
            tx_index: 1,
        },
        SwapRecord {
            swapper: attacker,
            direction: SwapDirection::Reverse,
            price_before: price >> 1,
            price_after: price,
            amount_in: U256::exp10(18),
            block_number: 100,
            tx_index: 2,
        },
    ];
    for record in records {
        guard.record_swap(reporter, pool, record)?;
    }

    // Analisa o bloco concluído e liquida as detecções
    let attacks = guard.analyze_block(pool, 100)?;
    for attack in &attacks {
        info!(
            attacker = %attack.attacker,
            victim = %attack.victim,
            loss = %attack.extracted_value,
            "ataque liquidado"
        );
    }

    info!(pending = %guard.pending_refund(victim), "reembolso pendente da vítima");
    info!(rate = %guard.avg_refund_rate(), "taxa média de reembolso (bps)");

    // A vítima saca o saldo acumulado
    let paid = guard.claim(victim).await?;
    info!(paid = %paid, "saque concluído");

    Ok(())
}
