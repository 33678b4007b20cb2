/*!
 * PoolGuard Core
 *
 * Tipos e utilitários compartilhados para a workspace PoolGuard
 */

pub mod types;
pub mod traits;
pub mod math;
pub mod error;

// Re-exportações públicas
pub use error::Error;
pub use types::*;
