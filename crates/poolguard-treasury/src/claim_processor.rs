use crate::treasury_ledger::TreasuryLedger;
use ethereum_types::{Address, U256};
use parking_lot::RwLock;
use poolguard_core::error::{Error, Result};
use poolguard_core::traits::PayoutTransport;
use std::sync::Arc;

/// Processador de saques. O zeramento do saldo é confirmado antes da
/// transferência e revertido se ela falhar: o saldo nunca é observado como
/// zerado sem que os fundos tenham de fato se movido.
pub struct ClaimProcessor<T> {
    ledger: Arc<RwLock<TreasuryLedger>>,
    transport: T,
}

impl<T: PayoutTransport> ClaimProcessor<T> {
    pub fn new(ledger: Arc<RwLock<TreasuryLedger>>, transport: T) -> Self {
        Self { ledger, transport }
    }

    /// Saca o saldo acumulado do chamador.
    ///
    /// Falha com [`Error::NothingToClaim`] quando o saldo é zero e com
    /// [`Error::TransferFailed`] quando o transporte de pagamento falha —
    /// neste caso o zeramento é revertido integralmente.
    pub async fn claim(&self, caller: Address) -> Result<U256> {
        if caller.is_zero() {
            return Err(Error::InvalidAddress("chamador com endereço zero".into()));
        }

        let amount = self.ledger.write().begin_claim(caller)?;

        match self.transport.transfer(caller, amount).await {
            Ok(()) => Ok(amount),
            Err(e) => {
                self.ledger.write().rollback_claim(caller, amount)?;
                Err(Error::TransferFailed(e.to_string()))
            }
        }
    }
}
