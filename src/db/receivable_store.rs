// src/db/receivable_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::receivable::Receivable;

#[derive(Debug, Error)]
pub enum StoreError {
    // O UPDATE não encontrou a linha que esperava (concorrência otimista)
    #[error("Conflito de escrita no título {0}")]
    WriteConflict(i64),

    #[error("Erro de banco de dados: {0}")]
    Database(#[from] sqlx::Error),
}

/// Predicado do relatório: com data de emissão, emitidos depois de `issued_after`
/// (quando houver) e não cancelados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceivableFilter {
    pub issued_after: Option<DateTime<Utc>>,
}

impl ReceivableFilter {
    pub fn issued_after(start_date: DateTime<Utc>) -> Self {
        Self { issued_after: Some(start_date) }
    }

    /// Sem limite inferior: qualquer título com data de emissão.
    pub fn any_issue_date() -> Self {
        Self { issued_after: None }
    }

    // Comparação estrita: issueDate == startDate fica de fora
    pub fn matches(&self, receivable: &Receivable) -> bool {
        !receivable.is_cancelled()
            && receivable.issue_date.is_some_and(|issued| {
                self.issued_after.is_none_or(|start_date| issued > start_date)
            })
    }
}

/// Persistência dos títulos. O id é sempre atribuído pelo store.
#[async_trait]
pub trait ReceivableStore: Send + Sync {
    /// Insere ignorando qualquer id vindo de fora e devolve o registro com o id gerado.
    async fn insert(&self, receivable: Receivable) -> Result<Receivable, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Receivable>, StoreError>;

    async fn exists(&self, id: i64) -> Result<bool, StoreError>;

    /// Registros que passam no filtro, na ordem natural do store (por id).
    async fn scan(&self, filter: &ReceivableFilter) -> Result<Vec<Receivable>, StoreError>;

    /// Substitui o registro inteiro. `WriteConflict` se a linha não foi afetada.
    async fn replace(&self, id: i64, receivable: &Receivable) -> Result<(), StoreError>;

    /// `true` se algo foi removido.
    async fn remove(&self, id: i64) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn issued_at(issue_date: Option<DateTime<Utc>>, cancelled: Option<bool>) -> Receivable {
        Receivable {
            id: Some(1),
            reference: "ref".into(),
            currency_code: "USD".into(),
            issue_date,
            opening_value: None,
            paid_value: None,
            due_date: None,
            closed_date: None,
            cancelled,
            debtor_name: "d".into(),
            debtor_reference: "d".into(),
            debtor_address1: None,
            debtor_address2: None,
            debtor_town: None,
            debtor_state: None,
            debtor_zip: None,
            debtor_country_code: "GB".into(),
            debtor_registration_number: None,
        }
    }

    #[test]
    fn filter_is_strict_on_issue_date() {
        let start = Utc.with_ymd_and_hms(2023, 9, 9, 22, 8, 15).unwrap();
        let filter = ReceivableFilter::issued_after(start);

        assert!(!filter.matches(&issued_at(Some(start), None)));
        assert!(!filter.matches(&issued_at(Some(start - Duration::seconds(1)), None)));
        assert!(filter.matches(&issued_at(Some(start + Duration::milliseconds(1)), None)));
    }

    #[test]
    fn filter_excludes_cancelled_and_undated() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let later = Some(start + Duration::days(1));
        let filter = ReceivableFilter::issued_after(start);

        assert!(!filter.matches(&issued_at(later, Some(true))));
        assert!(filter.matches(&issued_at(later, Some(false))));
        assert!(!filter.matches(&issued_at(None, None)));
    }

    #[test]
    fn filter_without_start_takes_any_dated_receivable() {
        let filter = ReceivableFilter::any_issue_date();
        let ancient = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();

        assert!(filter.matches(&issued_at(Some(ancient), None)));
        assert!(!filter.matches(&issued_at(Some(ancient), Some(true))));
        assert!(!filter.matches(&issued_at(None, None)));
    }
}
