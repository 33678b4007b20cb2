/*!
 * PoolGuard Detector
 *
 * Ledger de swaps por bloco, motor de quantificação de perdas e detector
 * do padrão sandwich sobre janelas ordenadas de trades.
 */

mod loss_engine;
mod swap_ledger;
mod pattern_detector;

pub use loss_engine::*;
pub use swap_ledger::*;
pub use pattern_detector::*;
