use ethereum_types::U256;
use poolguard_core::error::Result;
use poolguard_core::math::{quote_forward, quote_reverse};
use poolguard_core::types::SwapDirection;

/// Deslocamento mínimo de preço (em unidades da escala 2^96) para que uma
/// diferença seja tratada como manipulação e não como deriva ordinária.
pub fn min_price_move() -> U256 {
    U256::from(200_000_000_000_000u64) // 2×10^14
}

/// Quantifica a perda de uma vítima a partir do deslocamento mensurável de
/// preço. Função pura e determinística: entradas idênticas produzem sempre a
/// mesma saída, sem estado oculto.
///
/// Retorna zero quando qualquer preço é zero ou quando o deslocamento fica
/// abaixo de [`min_price_move`]. Caso contrário a perda é
/// `max(0, esperado − real)`, com esperado/real cotados pelo par de funções
/// que corresponde à direção do trade.
pub fn compute_loss(
    fair_price: U256,
    exec_price: U256,
    amount_in: U256,
    direction: SwapDirection,
) -> Result<U256> {
    if fair_price.is_zero() || exec_price.is_zero() {
        return Ok(U256::zero());
    }

    let displacement = if fair_price > exec_price {
        fair_price - exec_price
    } else {
        exec_price - fair_price
    };
    if displacement < min_price_move() {
        return Ok(U256::zero());
    }

    let (expected_out, actual_out) = match direction {
        SwapDirection::Forward => (
            quote_forward(amount_in, fair_price)?,
            quote_forward(amount_in, exec_price)?,
        ),
        SwapDirection::Reverse => (
            quote_reverse(amount_in, fair_price)?,
            quote_reverse(amount_in, exec_price)?,
        ),
    };

    Ok(expected_out.saturating_sub(actual_out))
}
