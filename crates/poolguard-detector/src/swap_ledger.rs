use dashmap::DashMap;
use poolguard_core::error::{Error, Result};
use poolguard_core::types::{PoolId, SwapRecord};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SWAP_WINDOWS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("swap_windows");

/// Capacidade máxima de uma janela de bloco. Além deste limite os swaps do
/// bloco são descartados (política explícita: descarte silencioso reportado
/// pelo retorno de [`SwapLedger::append`], nunca truncamento ou reordenação).
pub const MAX_WINDOW_SWAPS: usize = 50;

/// Janela ordenada de swaps de um par (pool, bloco). Preserva a ordem de
/// inserção e nunca é mutada retroativamente; uma janela é superada, não
/// removida, quando um novo bloco começa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockSwapWindow {
    pub records: Vec<SwapRecord>,
}

/// Ledger de swaps por pool e por bloco, com persistência opcional em uma
/// base chave-valor durável compartilhada.
pub struct SwapLedger {
    db: Option<Arc<Database>>,
    windows: DashMap<(PoolId, u64), BlockSwapWindow>,
}

impl SwapLedger {
    /// Cria um ledger somente em memória
    pub fn new() -> Self {
        Self { db: None, windows: DashMap::new() }
    }

    /// Abre um ledger sobre a base durável, recarregando as janelas
    /// persistidas de execuções anteriores.
    pub fn open(db: Arc<Database>) -> Result<Self> {
        let write = db
            .begin_write()
            .map_err(|e| Error::Storage(e.to_string()))?;
        write
            .open_table(SWAP_WINDOWS)
            .map_err(|e| Error::Storage(e.to_string()))?;
        write.commit().map_err(|e| Error::Storage(e.to_string()))?;

        let windows = DashMap::new();
        let read = db
            .begin_read()
            .map_err(|e| Error::Storage(e.to_string()))?;
        let table = read
            .open_table(SWAP_WINDOWS)
            .map_err(|e| Error::Storage(e.to_string()))?;
        for entry in table.iter().map_err(|e| Error::Storage(e.to_string()))? {
            let (key, value) = entry.map_err(|e| Error::Storage(e.to_string()))?;
            let (pool, block) = Self::decode_key(key.value())?;
            let window: BlockSwapWindow = serde_json::from_slice(value.value())
                .map_err(|e| Error::Storage(e.to_string()))?;
            windows.insert((pool, block), window);
        }
        drop(table);
        drop(read);

        Ok(Self { db: Some(db), windows })
    }

    /// Acrescenta um swap à janela do bloco corrente do pool, criando a
    /// janela no primeiro swap de um novo par (pool, bloco).
    ///
    /// Retorna `false` quando o registro foi descartado pela política de
    /// capacidade.
    pub fn append(&self, pool: PoolId, record: SwapRecord) -> Result<bool> {
        let key = (pool, record.block_number);
        let mut window = self.windows.entry(key).or_default();
        if window.records.len() >= MAX_WINDOW_SWAPS {
            return Ok(false);
        }
        window.records.push(record);
        if let Some(db) = &self.db {
            Self::persist(db, &key, &window)?;
        }
        Ok(true)
    }

    /// Snapshot da janela de um par (pool, bloco)
    pub fn window(&self, pool: PoolId, block_number: u64) -> Option<Vec<SwapRecord>> {
        self.windows
            .get(&(pool, block_number))
            .map(|w| w.records.clone())
    }

    fn encode_key(pool: &PoolId, block_number: u64) -> [u8; 40] {
        let mut key = [0u8; 40];
        key[..32].copy_from_slice(pool.as_bytes());
        key[32..].copy_from_slice(&block_number.to_be_bytes());
        key
    }

    fn decode_key(raw: &[u8]) -> Result<(PoolId, u64)> {
        if raw.len() != 40 {
            return Err(Error::Storage("chave de janela malformada".into()));
        }
        let pool = PoolId::from_slice(&raw[..32]);
        let mut block = [0u8; 8];
        block.copy_from_slice(&raw[32..]);
        Ok((pool, u64::from_be_bytes(block)))
    }

    fn persist(db: &Database, key: &(PoolId, u64), window: &BlockSwapWindow) -> Result<()> {
        let raw_key = Self::encode_key(&key.0, key.1);
        let value =
            serde_json::to_vec(window).map_err(|e| Error::Storage(e.to_string()))?;
        let write = db
            .begin_write()
            .map_err(|e| Error::Storage(e.to_string()))?;
        {
            let mut table = write
                .open_table(SWAP_WINDOWS)
                .map_err(|e| Error::Storage(e.to_string()))?;
            table
                .insert(raw_key.as_slice(), value.as_slice())
                .map_err(|e| Error::Storage(e.to_string()))?;
        }
        write.commit().map_err(|e| Error::Storage(e.to_string()))?;
        Ok(())
    }
}

impl Default for SwapLedger {
    fn default() -> Self {
        Self::new()
    }
}
