use crate::loss_engine::compute_loss;
use ethereum_types::U256;
use poolguard_core::error::Result;
use poolguard_core::types::{SandwichAttack, SwapRecord};

/// Detecção individual: o registro do ataque e a perda quantificada da
/// vítima, a ser liquidada pelo pipeline chamador.
#[derive(Debug, Clone)]
pub struct Detection {
    pub attack: SandwichAttack,
    pub loss: U256,
}

/// Detector do padrão sandwich sobre uma janela de swaps em ordem de
/// inserção.
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Varre a janela avaliando cada tripla (front = i−2, vítima = i−1,
    /// back = i). A janela desliza uma posição por avaliação, portanto
    /// triplas sobrepostas são permitidas e um mesmo swap pode participar de
    /// mais de uma detecção em uma cadeia de trades alternados — isto é
    /// intencional, não há deduplicação.
    ///
    /// Uma tripla é sandwich sse:
    /// 1. front.swapper == back.swapper
    /// 2. front.swapper != vítima.swapper
    /// 3. front.direction == vítima.direction
    /// 4. front.direction != back.direction
    ///
    /// Para cada tripla marcada, o preço justo é o `price_before` da vítima
    /// e o preço de execução o seu `price_after`; só emite detecção quando a
    /// perda resultante é positiva.
    pub fn scan(&self, window: &[SwapRecord]) -> Result<Vec<Detection>> {
        let mut detections = Vec::new();
        if window.len() < 3 {
            return Ok(detections);
        }

        for i in 2..window.len() {
            let front = &window[i - 2];
            let victim = &window[i - 1];
            let back = &window[i];

            if front.swapper != back.swapper {
                continue;
            }
            if front.swapper == victim.swapper {
                continue;
            }
            if front.direction != victim.direction {
                continue;
            }
            if front.direction == back.direction {
                continue;
            }

            let loss = compute_loss(
                victim.price_before,
                victim.price_after,
                victim.amount_in,
                victim.direction,
            )?;
            if loss.is_zero() {
                continue;
            }

            detections.push(Detection {
                attack: SandwichAttack {
                    attacker: front.swapper,
                    victim: victim.swapper,
                    extracted_value: loss,
                    block_number: victim.block_number,
                    front_tx_index: front.tx_index,
                    back_tx_index: back.tx_index,
                    detected_at: chrono::Utc::now().timestamp() as u64,
                },
                loss,
            });
        }

        Ok(detections)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
