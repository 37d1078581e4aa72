// src/services/sweeper.rs
//
// Varredura periódica de vencimentos. Como só grava bloqueios que mudam
// estado, uma revenda vencida é bloqueada no máximo uma vez por vencimento.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::services::reseller_service::ResellerService;

pub fn spawn_expiration_sweeper(reseller_service: ResellerService, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match reseller_service.run_expiration_check().await {
                Ok(report) => {
                    let newly_blocked = report.blocks.iter().filter(|b| b.newly_blocked).count();
                    tracing::info!(
                        "⏰ Varredura de vencimentos: {} alertas, {} novos bloqueios",
                        report.alerts.len(),
                        newly_blocked
                    );
                }
                // Loga e espera o próximo tick
                Err(e) => tracing::error!("🔥 Falha na varredura de vencimentos: {}", e),
            }
        }
    })
}
