use ethereum_types::U256;
use poolguard_core::math::mul_div;

/// Fração da perda reembolsada, em basis points (30%)
pub const REFUND_BPS: u64 = 3000;

/// Denominador de basis points
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Teto absoluto de reembolso por swap (0,1 token em 18 casas)
pub fn max_refund_per_swap() -> U256 {
    U256::exp10(17)
}

/// Calcula o reembolso limitado para uma perda dada a tesouraria disponível:
/// `min(loss·REFUND_BPS/10000, treasury, max_refund_per_swap())`.
///
/// Os três tetos são avaliados e o mínimo tomado; a ordem de avaliação não
/// altera o resultado. Função pura, nunca falha.
pub fn compute_bounded_refund(loss: U256, treasury: U256) -> U256 {
    // o produto de um U256 por 3000 nunca estoura o caminho largo com
    // denominador 10000
    let share = mul_div(loss, U256::from(REFUND_BPS), U256::from(BPS_DENOMINATOR))
        .unwrap_or_else(|_| max_refund_per_swap());
    share.min(treasury).min(max_refund_per_swap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth_frac(numerator: u64, denominator: u64) -> U256 {
        U256::from(numerator) * U256::exp10(18) / U256::from(denominator)
    }

    #[test]
    fn caps_at_treasury() {
        // loss = 10, treasury = 0.01 => refund = 0.01
        let refund = compute_bounded_refund(eth_frac(10, 1), eth_frac(1, 100));
        assert_eq!(refund, eth_frac(1, 100));
    }

    #[test]
    fn caps_at_share_of_loss() {
        // loss = 0.1, treasury = 100 => refund = 0.03
        let refund = compute_bounded_refund(eth_frac(1, 10), eth_frac(100, 1));
        assert_eq!(refund, eth_frac(3, 100));
    }

    #[test]
    fn caps_at_absolute_ceiling() {
        // loss = 100, treasury = 100 => refund = teto absoluto (0.1)
        let refund = compute_bounded_refund(eth_frac(100, 1), eth_frac(100, 1));
        assert_eq!(refund, max_refund_per_swap());
    }

    #[test]
    fn zero_loss_zero_refund() {
        let refund = compute_bounded_refund(U256::zero(), eth_frac(100, 1));
        assert_eq!(refund, U256::zero());
    }

    #[test]
    fn empty_treasury_zero_refund() {
        let refund = compute_bounded_refund(eth_frac(10, 1), U256::zero());
        assert_eq!(refund, U256::zero());
    }

    #[test]
    fn all_caps_respected() {
        let losses = [eth_frac(1, 1000), eth_frac(1, 10), eth_frac(5, 1), eth_frac(1000, 1)];
        let treasuries = [U256::zero(), eth_frac(1, 100), eth_frac(50, 1)];
        for loss in losses {
            for treasury in treasuries {
                let refund = compute_bounded_refund(loss, treasury);
                assert!(refund <= loss * U256::from(REFUND_BPS) / U256::from(BPS_DENOMINATOR));
                assert!(refund <= treasury);
                assert!(refund <= max_refund_per_swap());
            }
        }
    }
}
