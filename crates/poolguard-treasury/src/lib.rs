/*!
 * PoolGuard Treasury
 *
 * Contabilidade durável do fundo de seguro: financiamento, reembolsos
 * limitados, saldos sacáveis por endereço e métricas agregadas.
 */

mod refund_engine;
mod store;
mod treasury_ledger;
mod claim_processor;

pub use refund_engine::*;
pub use store::*;
pub use treasury_ledger::*;
pub use claim_processor::*;
