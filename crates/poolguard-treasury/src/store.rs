use ethereum_types::{Address, U256};
use poolguard_core::error::{Error, Result};
use redb::{Database, ReadableTable, TableDefinition};
use std::collections::HashMap;
use std::sync::Arc;

const CLAIMABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("claimable");
const ATTACK_COUNTS: TableDefinition<&[u8], u64> = TableDefinition::new("attack_counts");
const SCALARS: TableDefinition<&str, &[u8]> = TableDefinition::new("scalars");

const KEY_TREASURY: &str = "treasury";
const KEY_TOTAL_REFUNDS: &str = "total_refunds";
const KEY_TOTAL_LOSS: &str = "total_loss";

/// Estado durável da tesouraria recarregado na abertura
#[derive(Debug, Default)]
pub struct TreasurySnapshot {
    pub treasury: U256,
    pub total_refunds_issued: U256,
    pub total_loss_detected: U256,
    pub claimable: HashMap<Address, U256>,
    pub attack_counts: HashMap<Address, u64>,
}

/// Armazenamento chave-valor durável da tesouraria. Escalares e saldos em
/// bytes big-endian de largura fixa; cada mutação lógica é um único commit.
pub struct TreasuryStore {
    db: Arc<Database>,
}

fn storage_err(e: impl std::fmt::Display) -> Error {
    Error::Storage(e.to_string())
}

fn u256_bytes(value: U256) -> [u8; 32] {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    buf
}

fn bytes_u256(raw: &[u8]) -> U256 {
    U256::from_big_endian(raw)
}

impl TreasuryStore {
    /// Abre o armazenamento sobre a base compartilhada, criando as tabelas
    /// quando ausentes.
    pub fn open(db: Arc<Database>) -> Result<Self> {
        let write = db.begin_write().map_err(storage_err)?;
        write.open_table(CLAIMABLE).map_err(storage_err)?;
        write.open_table(ATTACK_COUNTS).map_err(storage_err)?;
        write.open_table(SCALARS).map_err(storage_err)?;
        write.commit().map_err(storage_err)?;
        Ok(Self { db })
    }

    /// Recarrega todo o estado persistido
    pub fn load(&self) -> Result<TreasurySnapshot> {
        let read = self.db.begin_read().map_err(storage_err)?;
        let mut snapshot = TreasurySnapshot::default();

        let scalars = read.open_table(SCALARS).map_err(storage_err)?;
        if let Some(v) = scalars.get(KEY_TREASURY).map_err(storage_err)? {
            snapshot.treasury = bytes_u256(v.value());
        }
        if let Some(v) = scalars.get(KEY_TOTAL_REFUNDS).map_err(storage_err)? {
            snapshot.total_refunds_issued = bytes_u256(v.value());
        }
        if let Some(v) = scalars.get(KEY_TOTAL_LOSS).map_err(storage_err)? {
            snapshot.total_loss_detected = bytes_u256(v.value());
        }

        let claimable = read.open_table(CLAIMABLE).map_err(storage_err)?;
        for entry in claimable.iter().map_err(storage_err)? {
            let (key, value) = entry.map_err(storage_err)?;
            snapshot
                .claimable
                .insert(Address::from_slice(key.value()), bytes_u256(value.value()));
        }

        let counts = read.open_table(ATTACK_COUNTS).map_err(storage_err)?;
        for entry in counts.iter().map_err(storage_err)? {
            let (key, value) = entry.map_err(storage_err)?;
            snapshot
                .attack_counts
                .insert(Address::from_slice(key.value()), value.value());
        }

        Ok(snapshot)
    }

    /// Persiste o saldo da tesouraria após um financiamento
    pub fn persist_fund(&self, treasury: U256) -> Result<()> {
        let write = self.db.begin_write().map_err(storage_err)?;
        {
            let mut scalars = write.open_table(SCALARS).map_err(storage_err)?;
            scalars
                .insert(KEY_TREASURY, u256_bytes(treasury).as_slice())
                .map_err(storage_err)?;
        }
        write.commit().map_err(storage_err)?;
        Ok(())
    }

    /// Persiste todos os efeitos de uma liquidação de ataque em um único
    /// commit: saldo da vítima, contador do atacante e os três escalares.
    #[allow(clippy::too_many_arguments)]
    pub fn persist_settlement(
        &self,
        victim: Address,
        victim_balance: U256,
        attacker: Address,
        attacker_count: u64,
        treasury: U256,
        total_refunds: U256,
        total_loss: U256,
    ) -> Result<()> {
        let write = self.db.begin_write().map_err(storage_err)?;
        {
            let mut claimable = write.open_table(CLAIMABLE).map_err(storage_err)?;
            claimable
                .insert(victim.as_bytes(), u256_bytes(victim_balance).as_slice())
                .map_err(storage_err)?;

            let mut counts = write.open_table(ATTACK_COUNTS).map_err(storage_err)?;
            counts
                .insert(attacker.as_bytes(), attacker_count)
                .map_err(storage_err)?;

            let mut scalars = write.open_table(SCALARS).map_err(storage_err)?;
            scalars
                .insert(KEY_TREASURY, u256_bytes(treasury).as_slice())
                .map_err(storage_err)?;
            scalars
                .insert(KEY_TOTAL_REFUNDS, u256_bytes(total_refunds).as_slice())
                .map_err(storage_err)?;
            scalars
                .insert(KEY_TOTAL_LOSS, u256_bytes(total_loss).as_slice())
                .map_err(storage_err)?;
        }
        write.commit().map_err(storage_err)?;
        Ok(())
    }

    /// Persiste um crédito manual: saldo da vítima e tesouraria debitada
    pub fn persist_queue(&self, victim: Address, victim_balance: U256, treasury: U256) -> Result<()> {
        let write = self.db.begin_write().map_err(storage_err)?;
        {
            let mut claimable = write.open_table(CLAIMABLE).map_err(storage_err)?;
            claimable
                .insert(victim.as_bytes(), u256_bytes(victim_balance).as_slice())
                .map_err(storage_err)?;

            let mut scalars = write.open_table(SCALARS).map_err(storage_err)?;
            scalars
                .insert(KEY_TREASURY, u256_bytes(treasury).as_slice())
                .map_err(storage_err)?;
        }
        write.commit().map_err(storage_err)?;
        Ok(())
    }

    /// Persiste o saldo sacável de um endereço
    pub fn persist_claimable(&self, address: Address, balance: U256) -> Result<()> {
        let write = self.db.begin_write().map_err(storage_err)?;
        {
            let mut claimable = write.open_table(CLAIMABLE).map_err(storage_err)?;
            claimable
                .insert(address.as_bytes(), u256_bytes(balance).as_slice())
                .map_err(storage_err)?;
        }
        write.commit().map_err(storage_err)?;
        Ok(())
    }
}
