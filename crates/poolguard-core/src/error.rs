use thiserror::Error;

/// Erros comuns da workspace PoolGuard
#[derive(Error, Debug)]
pub enum Error {
    /// Estouro aritmético na multiplicação-divisão de largura estendida
    #[error("Estouro aritmético: o quociente não cabe em 256 bits")]
    Overflow,

    /// Saque sem saldo reembolsável
    #[error("Nenhum saldo disponível para saque")]
    NothingToClaim,

    /// Falha no transporte de pagamento
    #[error("Falha na transferência de pagamento: {0}")]
    TransferFailed(String),

    /// Ingestão a partir de origem não confiável
    #[error("Chamador não autorizado: {0}")]
    UnauthorizedCaller(String),

    /// Identidade zero ou placeholder onde uma real é exigida
    #[error("Endereço inválido: {0}")]
    InvalidAddress(String),

    /// Tesouraria sem saldo para cobrir o crédito solicitado
    #[error("Tesouraria insuficiente: solicitado {requested}, disponível {available}")]
    InsufficientTreasury { requested: String, available: String },

    /// Erro do armazenamento durável
    #[error("Erro de armazenamento: {0}")]
    Storage(String),

    /// Erro genérico
    #[error("{0}")]
    Other(String),
}

/// Tipo de resultado usado em toda a workspace
pub type Result<T> = std::result::Result<T, Error>;
