/*!
 * PoolGuard Traits
 *
 * Traits comuns usados em toda a workspace PoolGuard
 */

use async_trait::async_trait;
use crate::error::Result;
use ethereum_types::{Address, U256};

/// Trait para o transporte externo de pagamentos.
///
/// É o único ponto do núcleo que pode falhar por causa externa; o processador
/// de saques envolve a chamada de forma que uma falha nunca deixe o ledger
/// em estado inconsistente.
#[async_trait]
pub trait PayoutTransport: Send + Sync {
    /// Transfere `amount` para `to`
    async fn transfer(&self, to: Address, amount: U256) -> Result<()>;
}
