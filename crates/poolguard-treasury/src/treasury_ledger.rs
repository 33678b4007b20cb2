use crate::refund_engine::compute_bounded_refund;
use crate::store::TreasuryStore;
use ethereum_types::{Address, U256};
use poolguard_core::error::{Error, Result};
use poolguard_core::math::mul_div;
use redb::Database;
use std::collections::HashMap;
use std::sync::Arc;

/// Número de ataques a partir do qual um endereço é marcado como reincidente
pub const REPEAT_ATTACKER_THRESHOLD: u64 = 3;

/// Ledger da tesouraria: saldo do fundo, saldos sacáveis por endereço,
/// contadores de ataque e totais agregados.
///
/// Invariante: a soma dos saldos sacáveis mais o total já pago nunca excede o
/// financiamento acumulado. A tesouraria só aumenta por financiamento e só
/// diminui pela emissão de reembolsos; nunca fica negativa.
pub struct TreasuryLedger {
    store: Option<TreasuryStore>,
    treasury: U256,
    claimable: HashMap<Address, U256>,
    attack_counts: HashMap<Address, u64>,
    total_refunds_issued: U256,
    total_loss_detected: U256,
}

impl TreasuryLedger {
    /// Cria um ledger somente em memória
    pub fn new() -> Self {
        Self {
            store: None,
            treasury: U256::zero(),
            claimable: HashMap::new(),
            attack_counts: HashMap::new(),
            total_refunds_issued: U256::zero(),
            total_loss_detected: U256::zero(),
        }
    }

    /// Abre um ledger sobre a base durável, recarregando o estado persistido
    pub fn open(db: Arc<Database>) -> Result<Self> {
        let store = TreasuryStore::open(db)?;
        let snapshot = store.load()?;
        Ok(Self {
            store: Some(store),
            treasury: snapshot.treasury,
            claimable: snapshot.claimable,
            attack_counts: snapshot.attack_counts,
            total_refunds_issued: snapshot.total_refunds_issued,
            total_loss_detected: snapshot.total_loss_detected,
        })
    }

    /// Financia a tesouraria. Qualquer chamador, sem teto e sem autorização.
    pub fn fund(&mut self, amount: U256) -> Result<()> {
        self.treasury = self
            .treasury
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if let Some(store) = &self.store {
            store.persist_fund(self.treasury)?;
        }
        Ok(())
    }

    /// Liquida um ataque detectado: incrementa o contador do atacante, soma a
    /// perda ao total detectado, debita a tesouraria pelo reembolso limitado e
    /// credita o saldo sacável da vítima. Retorna o reembolso emitido.
    pub fn settle_attack(&mut self, attacker: Address, victim: Address, loss: U256) -> Result<U256> {
        let count = self.attack_counts.entry(attacker).or_insert(0);
        *count += 1;
        let count = *count;

        self.total_loss_detected = self
            .total_loss_detected
            .checked_add(loss)
            .ok_or(Error::Overflow)?;

        let refund = compute_bounded_refund(loss, self.treasury);
        // refund ≤ treasury por construção
        self.treasury -= refund;
        let balance = self.claimable.entry(victim).or_insert_with(U256::zero);
        *balance = balance.checked_add(refund).ok_or(Error::Overflow)?;
        let balance = *balance;
        self.total_refunds_issued = self
            .total_refunds_issued
            .checked_add(refund)
            .ok_or(Error::Overflow)?;

        if let Some(store) = &self.store {
            store.persist_settlement(
                victim,
                balance,
                attacker,
                count,
                self.treasury,
                self.total_refunds_issued,
                self.total_loss_detected,
            )?;
        }
        Ok(refund)
    }

    /// Caminho manual do operador: credita uma vítima fora do pipeline de
    /// detecção. Debita a tesouraria para manter o invariante de
    /// financiamento; não altera os totais de detecção.
    pub fn queue_refund(&mut self, victim: Address, amount: U256) -> Result<()> {
        if victim.is_zero() {
            return Err(Error::InvalidAddress("vítima com endereço zero".into()));
        }
        if amount > self.treasury {
            return Err(Error::InsufficientTreasury {
                requested: amount.to_string(),
                available: self.treasury.to_string(),
            });
        }
        self.treasury -= amount;
        let balance = self.claimable.entry(victim).or_insert_with(U256::zero);
        *balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
        let balance = *balance;

        if let Some(store) = &self.store {
            store.persist_queue(victim, balance, self.treasury)?;
        }
        Ok(())
    }

    /// Zera e devolve o saldo sacável do chamador, persistindo o zeramento.
    /// Primeiro passo do saque atômico; revertido por [`Self::rollback_claim`]
    /// quando a transferência falha.
    pub fn begin_claim(&mut self, caller: Address) -> Result<U256> {
        let amount = self
            .claimable
            .get(&caller)
            .copied()
            .unwrap_or_else(U256::zero);
        if amount.is_zero() {
            return Err(Error::NothingToClaim);
        }
        self.claimable.insert(caller, U256::zero());
        if let Some(store) = &self.store {
            store.persist_claimable(caller, U256::zero())?;
        }
        Ok(amount)
    }

    /// Restaura o saldo zerado por [`Self::begin_claim`] após uma falha de
    /// transferência, de forma que o zeramento e o pagamento nunca divirjam.
    pub fn rollback_claim(&mut self, caller: Address, amount: U256) -> Result<()> {
        let balance = self.claimable.entry(caller).or_insert_with(U256::zero);
        *balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
        let balance = *balance;
        if let Some(store) = &self.store {
            store.persist_claimable(caller, balance)?;
        }
        Ok(())
    }

    /// Contador de ataques atribuídos a um endereço
    pub fn attack_count(&self, address: Address) -> u64 {
        self.attack_counts.get(&address).copied().unwrap_or(0)
    }

    /// Endereço reincidente: três ou mais ataques
    pub fn is_repeat_attacker(&self, address: Address) -> bool {
        self.attack_count(address) >= REPEAT_ATTACKER_THRESHOLD
    }

    /// Saldo sacável pendente de um endereço
    pub fn pending_refund(&self, address: Address) -> U256 {
        self.claimable
            .get(&address)
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Saldo corrente da tesouraria
    pub fn treasury_balance(&self) -> U256 {
        self.treasury
    }

    pub fn total_refunds_issued(&self) -> U256 {
        self.total_refunds_issued
    }

    pub fn total_loss_detected(&self) -> U256 {
        self.total_loss_detected
    }

    /// Taxa média de reembolso em basis points:
    /// `total_refunds·10000 / total_loss`, zero quando nada foi detectado.
    pub fn avg_refund_rate(&self) -> U256 {
        if self.total_loss_detected.is_zero() {
            return U256::zero();
        }
        mul_div(
            self.total_refunds_issued,
            U256::from(crate::refund_engine::BPS_DENOMINATOR),
            self.total_loss_detected,
        )
        .unwrap_or_default()
    }
}

impl Default for TreasuryLedger {
    fn default() -> Self {
        Self::new()
    }
}
