/*!
 * PoolGuard SDK
 *
 * Fachada de serviço para operadores de pool: ingestão de swaps reportados
 * pelo ambiente de execução, análise de blocos em busca de sandwiches,
 * consultas e mutações da tesouraria.
 *
 * Toda mutação contra o estado de um pool é serializada por um lock por
 * pool; consultas de leitura executam concorrentemente e pools distintos
 * avançam em paralelo. A entrega de `record_swap` é confiada como ordenada e
 * exatamente-uma-vez por bloco — contrato externo do chamador, não há
 * deduplicação nem reordenação internas.
 */

use dashmap::DashMap;
use ethereum_types::{Address, U256};
use parking_lot::{Mutex, RwLock};
use poolguard_core::error::{Error, Result};
use poolguard_core::traits::PayoutTransport;
use poolguard_core::types::{PoolId, SandwichAttack, SwapRecord};
use poolguard_detector::{PatternDetector, SwapLedger};
use poolguard_treasury::{ClaimProcessor, TreasuryLedger};
use redb::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuração do serviço
#[derive(Debug, Clone, Default)]
pub struct GuardConfig {
    /// Caminho da base durável; `None` opera somente em memória
    pub db_path: Option<PathBuf>,
    /// Origens autorizadas a reportar swaps; vazio = ingestão aberta
    pub authorized_reporters: Vec<Address>,
}

impl GuardConfig {
    /// Cria um builder para a configuração
    pub fn builder() -> GuardConfigBuilder {
        GuardConfigBuilder::default()
    }
}

/// Builder para a configuração do serviço
#[derive(Debug, Default)]
pub struct GuardConfigBuilder {
    db_path: Option<PathBuf>,
    authorized_reporters: Vec<Address>,
}

impl GuardConfigBuilder {
    /// Define o caminho da base durável
    pub fn db_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.db_path = Some(path.into());
        self
    }

    /// Acrescenta uma origem autorizada de ingestão
    pub fn authorized_reporter(mut self, reporter: Address) -> Self {
        self.authorized_reporters.push(reporter);
        self
    }

    /// Constrói a configuração
    pub fn build(self) -> GuardConfig {
        GuardConfig {
            db_path: self.db_path,
            authorized_reporters: self.authorized_reporters,
        }
    }
}

/// Serviço PoolGuard: uma instância possui todo o estado lógico da
/// implantação e toda mutação passa pelas operações abaixo.
pub struct PoolGuard<T> {
    config: GuardConfig,
    swaps: SwapLedger,
    detector: PatternDetector,
    treasury: Arc<RwLock<TreasuryLedger>>,
    claims: ClaimProcessor<T>,
    pool_locks: DashMap<PoolId, Arc<Mutex<()>>>,
}

impl<T: PayoutTransport> PoolGuard<T> {
    /// Cria o serviço, abrindo a base durável quando configurada
    pub fn new(config: GuardConfig, transport: T) -> Result<Self> {
        let (swaps, ledger) = match &config.db_path {
            Some(path) => {
                let db = Arc::new(
                    Database::create(path).map_err(|e| Error::Storage(e.to_string()))?,
                );
                (SwapLedger::open(db.clone())?, TreasuryLedger::open(db)?)
            }
            None => (SwapLedger::new(), TreasuryLedger::new()),
        };
        let treasury = Arc::new(RwLock::new(ledger));
        let claims = ClaimProcessor::new(treasury.clone(), transport);
        Ok(Self {
            config,
            swaps,
            detector: PatternDetector::new(),
            treasury,
            claims,
            pool_locks: DashMap::new(),
        })
    }

    fn pool_lock(&self, pool: PoolId) -> Arc<Mutex<()>> {
        self.pool_locks
            .entry(pool)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn authorize(&self, reporter: Address) -> Result<()> {
        if self.config.authorized_reporters.is_empty() {
            return Ok(());
        }
        if self.config.authorized_reporters.contains(&reporter) {
            return Ok(());
        }
        Err(Error::UnauthorizedCaller(format!("0x{:x}", reporter)))
    }

    /// Ingere um swap executado, reportado uma vez por trade real.
    ///
    /// Retorna `false` quando o registro foi descartado pela política de
    /// capacidade da janela do bloco.
    pub fn record_swap(&self, reporter: Address, pool: PoolId, record: SwapRecord) -> Result<bool> {
        self.authorize(reporter)?;
        if record.swapper.is_zero() {
            return Err(Error::InvalidAddress("swapper com endereço zero".into()));
        }

        let lock = self.pool_lock(pool);
        let _guard = lock.lock();
        let accepted = self.swaps.append(pool, record.clone())?;
        if accepted {
            debug!(
                pool = %pool,
                block = record.block_number,
                tx_index = record.tx_index,
                "swap registrado"
            );
        } else {
            debug!(
                pool = %pool,
                block = record.block_number,
                "janela cheia, swap descartado"
            );
        }
        Ok(accepted)
    }

    /// Analisa a janela de um bloco concluído: varre o padrão sandwich,
    /// liquida cada detecção de perda positiva contra a tesouraria e retorna
    /// os registros de ataque emitidos.
    pub fn analyze_block(&self, pool: PoolId, block_number: u64) -> Result<Vec<SandwichAttack>> {
        let lock = self.pool_lock(pool);
        let _guard = lock.lock();

        let window = match self.swaps.window(pool, block_number) {
            Some(window) => window,
            None => return Ok(Vec::new()),
        };

        let detections = self.detector.scan(&window)?;
        let mut attacks = Vec::with_capacity(detections.len());
        for detection in detections {
            let refund = self.treasury.write().settle_attack(
                detection.attack.attacker,
                detection.attack.victim,
                detection.loss,
            )?;
            info!(
                pool = %pool,
                block = block_number,
                attacker = %detection.attack.attacker,
                victim = %detection.attack.victim,
                loss = %detection.loss,
                refund = %refund,
                "sandwich detectado"
            );
            attacks.push(detection.attack);
        }
        Ok(attacks)
    }

    /// Financia a tesouraria; qualquer chamador, sem teto
    pub fn fund(&self, amount: U256) -> Result<()> {
        self.treasury.write().fund(amount)?;
        info!(amount = %amount, "tesouraria financiada");
        Ok(())
    }

    /// Saca o saldo reembolsável acumulado do chamador
    pub async fn claim(&self, caller: Address) -> Result<U256> {
        let amount = self.claims.claim(caller).await?;
        info!(caller = %caller, amount = %amount, "saque pago");
        Ok(amount)
    }

    /// Crédito manual do operador para uma vítima, fora do pipeline
    pub fn queue_refund(&self, victim: Address, amount: U256) -> Result<()> {
        self.treasury.write().queue_refund(victim, amount)
    }

    /// Número de ataques atribuídos a um endereço
    pub fn attack_count(&self, address: Address) -> u64 {
        self.treasury.read().attack_count(address)
    }

    /// Endereço marcado como reincidente (três ou mais ataques)
    pub fn is_blacklisted(&self, address: Address) -> bool {
        self.treasury.read().is_repeat_attacker(address)
    }

    /// Saldo reembolsável pendente de um endereço
    pub fn pending_refund(&self, address: Address) -> U256 {
        self.treasury.read().pending_refund(address)
    }

    /// Swaps registrados para um par (pool, bloco)
    pub fn block_swaps(&self, pool: PoolId, block_number: u64) -> Vec<SwapRecord> {
        self.swaps.window(pool, block_number).unwrap_or_default()
    }

    /// Saldo corrente da tesouraria
    pub fn treasury_balance(&self) -> U256 {
        self.treasury.read().treasury_balance()
    }

    /// Taxa média de reembolso em basis points
    pub fn avg_refund_rate(&self) -> U256 {
        self.treasury.read().avg_refund_rate()
    }
}
