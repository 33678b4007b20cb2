/*!
 * PoolGuard Types
 *
 * Tipos comuns usados em toda a workspace PoolGuard
 */

use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de um pool de liquidez
pub type PoolId = H256;

/// Direção de um swap dentro do pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Direção em que o preço aumenta a saída
    Forward,
    /// Direção oposta
    Reverse,
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::Forward => write!(f, "forward"),
            SwapDirection::Reverse => write!(f, "reverse"),
        }
    }
}

/// Registro imutável de um swap executado, reportado pelo ambiente de execução.
///
/// Os preços são raízes quadradas de preço em ponto fixo com escala 2^96 e
/// devem ser não nulos quando válidos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    pub swapper: Address,
    pub direction: SwapDirection,
    pub price_before: U256,
    pub price_after: U256,
    pub amount_in: U256,
    pub block_number: u64,
    /// Índice sequencial da transação dentro do bloco
    pub tx_index: u32,
}

/// Ataque sandwich detectado. Produzido apenas pelo detector de padrões e
/// imutável depois de emitido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandwichAttack {
    pub attacker: Address,
    pub victim: Address,
    /// Perda da vítima quantificada pelo motor de perdas
    pub extracted_value: U256,
    pub block_number: u64,
    /// Referência probatória: índices das duas pernas do atacante no bloco
    pub front_tx_index: u32,
    pub back_tx_index: u32,
    /// Timestamp Unix da detecção
    pub detected_at: u64,
}
