// src/services/lifecycle.rs
//
// Motor de vencimentos. Funções puras: recebem o "agora" e um retrato das
// coleções, devolvem alertas e transições. Quem chama decide o que persistir.

use chrono::{DateTime, FixedOffset, Months, Offset, Timelike, Utc};

use crate::{
    common::{dates::midnight_utc, error::AppError},
    models::{
        customer::Customer,
        lifecycle::{Alert, AlertKind, BlockTransition, ExpirationReport, ResellerState},
        reseller::Reseller,
    },
};

pub const DEFAULT_ALERT_LEAD_DAYS: u32 = 5;
pub const CUSTOMER_EXPIRING_WINDOW_DAYS: i64 = 3;

// Bloqueio automático a partir do meio-dia (horário de Brasília, UTC-3 fixo)
pub const BLOCK_CUTOFF_HOUR: u32 = 12;
const BRASILIA_OFFSET_SECS: i32 = 3 * 3600;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

fn brasilia() -> FixedOffset {
    FixedOffset::west_opt(BRASILIA_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `ceil((expiração - agora) / 1 dia)`, em milissegundos.
///
/// 11 horas restantes contam como 1 dia; 1 hora depois do vencimento conta
/// como 0 (ainda dentro da janela de aviso).
pub fn days_remaining(now: DateTime<Utc>, expiration: DateTime<Utc>) -> i64 {
    let diff = (expiration - now).num_milliseconds();
    let whole = diff.div_euclid(MILLIS_PER_DAY);
    if diff.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Hora do dia em UTC-3.
pub fn local_hour(now: DateTime<Utc>) -> u32 {
    now.with_timezone(&brasilia()).hour()
}

pub fn alert_lead_days(reseller: &Reseller) -> i64 {
    i64::from(reseller.alert_lead_days.unwrap_or(DEFAULT_ALERT_LEAD_DAYS))
}

fn warning_message(reseller: &Reseller, days: i64) -> String {
    format!(
        "⚠️ ATENÇÃO: o plano da revenda {} vence em {} dia(s)! Renove antes do vencimento para não perder o acesso.",
        reseller.name, days
    )
}

fn blocked_message(reseller: &Reseller) -> String {
    format!(
        "🚫 BLOQUEADO: o plano da revenda {} venceu e foi bloqueado às 12:00. Entre em contato para renovar.",
        reseller.name
    )
}

/// Uma passada de avaliação sobre o roster de revendas.
///
/// - `0 <= dias <= antecedência`: um alerta de aviso.
/// - `dias < 0` e hora local >= 12: transição de bloqueio + alerta de bloqueio.
///   O alerta reaparece a cada passada; a transição só é "nova" quando muda
///   alguma coisa.
pub fn evaluate_expirations(now: DateTime<Utc>, resellers: &[Reseller]) -> ExpirationReport {
    let past_cutoff = local_hour(now) >= BLOCK_CUTOFF_HOUR;
    let mut report = ExpirationReport::default();

    for reseller in resellers {
        let days = days_remaining(now, reseller.expiration_date);

        if (0..=alert_lead_days(reseller)).contains(&days) {
            report.alerts.push(Alert {
                kind: AlertKind::Warning,
                reseller_id: reseller.id.clone(),
                reseller_name: reseller.name.clone(),
                days_remaining: days,
                message: warning_message(reseller, days),
            });
        }

        if days < 0 && past_cutoff {
            report.blocks.push(BlockTransition {
                reseller_id: reseller.id.clone(),
                newly_blocked: !reseller.blocked || reseller.active,
            });
            report.alerts.push(Alert {
                kind: AlertKind::Blocked,
                reseller_id: reseller.id.clone(),
                reseller_name: reseller.name.clone(),
                days_remaining: days,
                message: blocked_message(reseller),
            });
        }
    }

    report
}

pub fn reseller_state(now: DateTime<Utc>, reseller: &Reseller) -> ResellerState {
    if reseller.blocked {
        return ResellerState::Blocked;
    }
    // Vencida mas antes do corte continua avisada, aguardando o bloqueio
    if days_remaining(now, reseller.expiration_date) <= alert_lead_days(reseller) {
        ResellerState::ActiveButWarned
    } else {
        ResellerState::Active
    }
}

/// Clientes com `0 <= dias <= 3`. Nenhum status é alterado.
pub fn customers_expiring_soon<'a>(now: DateTime<Utc>, customers: &'a [Customer]) -> Vec<&'a Customer> {
    customers
        .iter()
        .filter(|c| {
            let days = days_remaining(now, c.expiration_date);
            (0..=CUSTOMER_EXPIRING_WINDOW_DAYS).contains(&days)
        })
        .collect()
}

/// Novo vencimento: mesma data do mês seguinte ao momento da renovação.
///
/// Não mexe em `blocked`/`active`; desbloquear é uma ação separada.
pub fn renewal_expiration(now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    now.date_naive()
        .checked_add_months(Months::new(1))
        .map(midnight_utc)
        .ok_or_else(|| AppError::InvalidDate(now.to_rfc3339()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        banner::LogoPosition,
        customer::CustomerStatus,
        rbac::Permissions,
        reseller::ResellerTier,
    };
    use chrono::{Duration, NaiveDate, TimeZone};
    use rust_decimal::Decimal;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn reseller(id: &str, expiration: DateTime<Utc>) -> Reseller {
        Reseller {
            id: id.to_string(),
            name: format!("Revenda {id}"),
            email: format!("{id}@revenda.com"),
            password: "123456".to_string(),
            active: true,
            blocked: false,
            tier: ResellerTier::Simple,
            monthly_fee: Decimal::new(5000, 2),
            expiration_date: expiration,
            created_at: at(2023, 1, 1, 0, 0),
            last_access: None,
            notes: String::new(),
            custom_logo_url: None,
            logo_position: LogoPosition::Right,
            alert_lead_days: None,
            permissions: Permissions::simple_defaults(),
        }
    }

    fn customer(id: &str, expiration: DateTime<Utc>) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Cliente {id}"),
            whatsapp: "(11) 99999-9999".to_string(),
            plan: "Premium".to_string(),
            status: CustomerStatus::Active,
            monthly_fee: Decimal::new(4990, 2),
            expiration_date: expiration,
            last_payment_date: None,
            notes: String::new(),
            created_at: NaiveDate::from_ymd_opt(2023, 6, 10).unwrap(),
            owner_id: "admin".to_string(),
        }
    }

    fn warnings_for(report: &ExpirationReport, id: &str) -> usize {
        report
            .alerts
            .iter()
            .filter(|a| a.kind == AlertKind::Warning && a.reseller_id == id)
            .count()
    }

    #[test]
    fn fractional_days_round_up() {
        let now = at(2024, 1, 1, 0, 0);
        assert_eq!(days_remaining(now, now + Duration::hours(11)), 1);
        assert_eq!(days_remaining(now, now + Duration::days(5)), 5);
        assert_eq!(days_remaining(now, now + Duration::days(5) + Duration::milliseconds(1)), 6);
        assert_eq!(days_remaining(now, now), 0);
    }

    #[test]
    fn just_past_expiration_still_counts_as_zero() {
        let now = at(2024, 1, 1, 10, 0);
        assert_eq!(days_remaining(now, now - Duration::hours(1)), 0);
        assert_eq!(days_remaining(now, now - Duration::hours(24)), -1);
        assert_eq!(days_remaining(now, now - Duration::hours(39)), -1);
    }

    #[test]
    fn warning_at_exactly_lead_days() {
        let now = at(2024, 1, 1, 0, 0);
        let resellers = vec![
            reseller("limite", at(2024, 1, 6, 0, 0)),
            reseller("fora", at(2024, 1, 7, 0, 0)),
        ];

        let report = evaluate_expirations(now, &resellers);

        assert_eq!(warnings_for(&report, "limite"), 1);
        assert_eq!(warnings_for(&report, "fora"), 0);
        let alert = report.alerts.iter().find(|a| a.reseller_id == "limite").unwrap();
        assert_eq!(alert.days_remaining, 5);
        assert!(alert.message.contains("Revenda limite"));
        assert!(alert.message.contains("5 dia(s)"));
    }

    #[test]
    fn custom_lead_days_widen_the_window() {
        let now = at(2024, 1, 1, 0, 0);
        let mut r = reseller("r", at(2024, 1, 11, 0, 0));
        assert_eq!(warnings_for(&evaluate_expirations(now, &[r.clone()]), "r"), 0);

        r.alert_lead_days = Some(10);
        assert_eq!(warnings_for(&evaluate_expirations(now, &[r]), "r"), 1);
    }

    #[test]
    fn no_warning_after_expiration() {
        // Antes do corte: nem aviso nem bloqueio
        let now = at(2024, 1, 10, 11, 0);
        let report = evaluate_expirations(now, &[reseller("r", at(2024, 1, 9, 0, 0))]);
        assert!(report.alerts.is_empty());
        assert!(report.blocks.is_empty());
    }

    #[test]
    fn blocks_at_noon_brasilia() {
        let resellers = vec![reseller("r", at(2024, 1, 9, 0, 0))];

        let report = evaluate_expirations(at(2024, 1, 10, 15, 0), &resellers);
        assert_eq!(local_hour(at(2024, 1, 10, 15, 0)), 12);
        assert_eq!(
            report.blocks,
            vec![BlockTransition { reseller_id: "r".into(), newly_blocked: true }]
        );
        assert!(report.alerts.iter().any(|a| a.kind == AlertKind::Blocked));

        let before = evaluate_expirations(at(2024, 1, 10, 14, 59), &resellers);
        assert_eq!(local_hour(at(2024, 1, 10, 14, 59)), 11);
        assert!(before.blocks.is_empty());
        assert!(before.alerts.is_empty());
    }

    #[test]
    fn early_utc_hours_are_previous_evening_in_brasilia() {
        // 01:00 UTC = 22:00 do dia anterior em UTC-3
        let now = at(2024, 1, 11, 1, 0);
        assert_eq!(local_hour(now), 22);
        let report = evaluate_expirations(now, &[reseller("r", at(2024, 1, 9, 0, 0))]);
        assert_eq!(report.blocks.len(), 1);
    }

    #[test]
    fn reblocking_is_not_new_but_alert_repeats() {
        let mut r = reseller("r", at(2024, 1, 9, 0, 0));
        r.block();

        let report = evaluate_expirations(at(2024, 1, 10, 15, 0), &[r]);
        assert_eq!(
            report.blocks,
            vec![BlockTransition { reseller_id: "r".into(), newly_blocked: false }]
        );
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].kind, AlertKind::Blocked);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let now = at(2024, 1, 10, 15, 0);
        let resellers = vec![
            reseller("a", at(2024, 1, 12, 0, 0)),
            reseller("b", at(2024, 1, 9, 0, 0)),
            reseller("c", at(2024, 3, 1, 0, 0)),
        ];

        let first = evaluate_expirations(now, &resellers);
        let second = evaluate_expirations(now, &resellers);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.alerts).unwrap(),
            serde_json::to_string(&second.alerts).unwrap()
        );
    }

    #[test]
    fn state_machine() {
        let now = at(2024, 1, 1, 0, 0);
        assert_eq!(reseller_state(now, &reseller("r", at(2024, 2, 1, 0, 0))), ResellerState::Active);
        assert_eq!(
            reseller_state(now, &reseller("r", at(2024, 1, 3, 0, 0))),
            ResellerState::ActiveButWarned
        );

        let mut blocked = reseller("r", at(2024, 2, 1, 0, 0));
        blocked.block();
        assert_eq!(reseller_state(now, &blocked), ResellerState::Blocked);
        assert!(!blocked.can_authenticate());

        blocked.unblock();
        assert_eq!(reseller_state(now, &blocked), ResellerState::Active);
        assert!(blocked.can_authenticate());
    }

    #[test]
    fn renewal_is_one_month_after_the_renewal_instant() {
        let renewed = renewal_expiration(at(2024, 1, 15, 9, 30)).unwrap();
        assert_eq!(renewed, at(2024, 2, 15, 0, 0));
    }

    #[test]
    fn renewal_clamps_to_month_end() {
        let renewed = renewal_expiration(at(2024, 1, 31, 12, 0)).unwrap();
        assert_eq!(renewed, at(2024, 2, 29, 0, 0));
    }

    #[test]
    fn customers_expiring_within_three_days() {
        let now = at(2024, 1, 1, 8, 0);
        let customers = vec![
            customer("hoje", at(2024, 1, 1, 0, 0)),
            customer("tres", at(2024, 1, 4, 0, 0)),
            customer("quatro", at(2024, 1, 5, 9, 0)),
            customer("vencido", at(2023, 12, 30, 0, 0)),
        ];

        let ids: Vec<&str> = customers_expiring_soon(now, &customers)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["hoje", "tres"]);
    }
}
