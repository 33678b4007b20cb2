/*!
 * PoolGuard Math
 *
 * Aritmética exata de ponto fixo sobre inteiros largos. Os preços usam a
 * representação raiz-de-preço com escala 2^96; nenhuma operação monetária
 * passa por ponto flutuante.
 */

use crate::error::{Error, Result};
use ethereum_types::{U256, U512};

/// Escala fracionária da representação de preço (2^96)
pub fn scale_x96() -> U256 {
    U256::one() << 96
}

/// Calcula ⌊a·b / denominator⌋ com produto intermediário de 512 bits.
///
/// Falha com [`Error::Overflow`] quando o quociente verdadeiro não cabe em
/// 256 bits, isto é, quando o denominador é menor ou igual à parte alta do
/// produto (o que cobre também denominador zero).
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    let product: U512 = a.full_mul(b);
    let high = product >> 256;
    if U512::from(denominator) <= high {
        return Err(Error::Overflow);
    }
    let quotient = product / U512::from(denominator);
    U256::try_from(quotient).map_err(|_| Error::Overflow)
}

/// Cotação na direção em que o preço aumenta a saída:
/// `amount_in · (price/SCALE)²`, via duas chamadas encadeadas de [`mul_div`].
pub fn quote_forward(amount_in: U256, price_x96: U256) -> Result<U256> {
    let scaled = mul_div(amount_in, price_x96, scale_x96())?;
    mul_div(scaled, price_x96, scale_x96())
}

/// Cotação na direção oposta: `amount_in · (SCALE/price)²`.
///
/// Retorna zero quando `price_x96` é zero; guarda explícita de divisão por
/// zero, não um erro.
pub fn quote_reverse(amount_in: U256, price_x96: U256) -> Result<U256> {
    if price_x96.is_zero() {
        return Ok(U256::zero());
    }
    let scaled = mul_div(amount_in, scale_x96(), price_x96)?;
    mul_div(scaled, scale_x96(), price_x96)
}
