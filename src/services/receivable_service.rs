// src/services/receivable_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::{ReceivableFilter, ReceivableStore, StoreError},
    models::{receivable::Receivable, report::ReceivablesReport},
    services::report_builder::build_report,
};

/// Fachada sobre o store de títulos. Todo acesso a dados passa por aqui.
#[derive(Clone, Default)]
pub struct ReceivableService {
    store: Option<Arc<dyn ReceivableStore>>,
}

impl ReceivableService {
    pub fn new(store: Arc<dyn ReceivableStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Serviço sem store. Só existe para o caso de configuração incompleta:
    /// toda operação devolve `AppError::MissingStore`.
    pub fn without_store() -> Self {
        Self { store: None }
    }

    fn store(&self) -> Result<&dyn ReceivableStore, AppError> {
        self.store.as_deref().ok_or_else(|| {
            tracing::error!("ReceivableService usado sem store configurado");
            AppError::MissingStore
        })
    }

    pub async fn create(&self, receivable: Receivable) -> Result<Receivable, AppError> {
        let created = self.store()?.insert(receivable).await?;

        tracing::info!(id = ?created.id, reference = %created.reference, "Título criado");
        Ok(created)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Receivable>, AppError> {
        Ok(self.store()?.find(id).await?)
    }

    pub async fn report(
        &self,
        start_date: Option<DateTime<Utc>>,
        summary_only: bool,
    ) -> Result<ReceivablesReport, AppError> {
        let store = self.store()?;

        let filter = match start_date {
            Some(start_date) => ReceivableFilter::issued_after(start_date),
            None => ReceivableFilter::any_issue_date(),
        };

        // 1. Filtra e materializa uma vez; 2. agrega sobre o mesmo conjunto
        let qualifying = store.scan(&filter).await?;
        tracing::debug!(?start_date, rows = qualifying.len(), summary_only, "Montando relatório");

        Ok(build_report(qualifying, summary_only))
    }

    /// `Ok(false)` quando o título não existe (ou sumiu no meio do caminho).
    /// Um conflito com o registro ainda presente volta como `WriteConflict`,
    /// sem retry automático.
    pub async fn update(&self, receivable: Receivable) -> Result<bool, AppError> {
        let store = self.store()?;

        let Some(id) = receivable.id else {
            return Ok(false);
        };

        match store.replace(id, &receivable).await {
            Ok(()) => {
                tracing::info!(id, "Título atualizado");
                Ok(true)
            }
            Err(StoreError::WriteConflict(_)) => {
                if store.exists(id).await? {
                    Err(AppError::WriteConflict(id))
                } else {
                    // Nunca existiu ou foi removido enquanto tentávamos atualizar
                    tracing::debug!(id, "Atualização de título inexistente");
                    Ok(false)
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    // DELETE idempotente: remover o que não existe não é erro
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.store()?.remove(id).await? {
            tracing::info!(id, "Título removido");
        } else {
            tracing::debug!(id, "Remoção de título inexistente ignorada");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryReceivableStore;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn receivable() -> Receivable {
        let issued = Utc.with_ymd_and_hms(2023, 10, 6, 7, 5, 20).unwrap();
        Receivable {
            id: None,
            reference: "reference".to_string(),
            currency_code: "USD".to_string(),
            issue_date: Some(issued),
            opening_value: Some(dec!(11)),
            paid_value: Some(dec!(1)),
            due_date: Some(issued),
            closed_date: None,
            cancelled: None,
            debtor_name: "debtorName".to_string(),
            debtor_reference: "debtorReference".to_string(),
            debtor_address1: None,
            debtor_address2: None,
            debtor_town: None,
            debtor_state: None,
            debtor_zip: None,
            debtor_country_code: "GB".to_string(),
            debtor_registration_number: None,
        }
    }

    // Store que sempre acusa conflito no UPDATE, com o registro ainda presente ou não
    struct ConflictingStore {
        still_exists: bool,
    }

    #[async_trait]
    impl ReceivableStore for ConflictingStore {
        async fn insert(&self, receivable: Receivable) -> Result<Receivable, StoreError> {
            Ok(receivable)
        }

        async fn find(&self, _id: i64) -> Result<Option<Receivable>, StoreError> {
            Ok(None)
        }

        async fn exists(&self, _id: i64) -> Result<bool, StoreError> {
            Ok(self.still_exists)
        }

        async fn scan(&self, _filter: &ReceivableFilter) -> Result<Vec<Receivable>, StoreError> {
            Ok(Vec::new())
        }

        async fn replace(&self, id: i64, _receivable: &Receivable) -> Result<(), StoreError> {
            Err(StoreError::WriteConflict(id))
        }

        async fn remove(&self, _id: i64) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    fn in_memory() -> ReceivableService {
        ReceivableService::new(Arc::new(InMemoryReceivableStore::new()))
    }

    #[tokio::test]
    async fn create_assigns_an_id() {
        let service = in_memory();

        let created = service.create(receivable()).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(service.find(created.id.unwrap()).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn find_absent_is_not_an_error() {
        assert_eq!(in_memory().find(123).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_existing_returns_true() {
        let service = in_memory();
        let mut created = service.create(receivable()).await.unwrap();
        created.cancelled = Some(true);

        assert!(service.update(created.clone()).await.unwrap());
        assert_eq!(service.find(created.id.unwrap()).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn update_missing_returns_false() {
        let mut r = receivable();
        r.id = Some(5);

        assert!(!in_memory().update(r).await.unwrap());
    }

    #[tokio::test]
    async fn update_without_id_returns_false() {
        assert!(!in_memory().update(receivable()).await.unwrap());
    }

    #[tokio::test]
    async fn conflict_on_vanished_record_is_not_found() {
        let service = ReceivableService::new(Arc::new(ConflictingStore { still_exists: false }));
        let mut r = receivable();
        r.id = Some(1);

        assert!(!service.update(r).await.unwrap());
    }

    #[tokio::test]
    async fn conflict_on_existing_record_is_surfaced() {
        let service = ReceivableService::new(Arc::new(ConflictingStore { still_exists: true }));
        let mut r = receivable();
        r.id = Some(1);

        let result = service.update(r).await;

        assert!(matches!(result, Err(AppError::WriteConflict(1))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = in_memory();
        let id = service.create(receivable()).await.unwrap().id.unwrap();

        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();
        service.delete(999).await.unwrap();

        assert_eq!(service.find(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn report_reads_through_the_store() {
        let service = in_memory();
        service.create(receivable()).await.unwrap();
        let mut cancelled = receivable();
        cancelled.cancelled = Some(true);
        service.create(cancelled).await.unwrap();

        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let report = service.report(Some(start), false).await.unwrap();

        assert_eq!(report.total_count(), 1);
        assert_eq!(report.receivables.map(|list| list.len()), Some(1));
    }

    #[tokio::test]
    async fn report_without_start_date_includes_old_receivables() {
        let service = in_memory();
        let mut old = receivable();
        old.issue_date = Some(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap());
        service.create(old).await.unwrap();

        let report = service.report(None, true).await.unwrap();

        assert_eq!(report.total_count(), 1);
        assert_eq!(report.receivables, None);
    }

    #[tokio::test]
    async fn every_operation_reports_missing_store() {
        let service = ReceivableService::without_store();
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

        assert!(matches!(service.create(receivable()).await, Err(AppError::MissingStore)));
        assert!(matches!(service.find(1).await, Err(AppError::MissingStore)));
        assert!(matches!(service.report(Some(start), true).await, Err(AppError::MissingStore)));
        assert!(matches!(service.update(receivable()).await, Err(AppError::MissingStore)));
        assert!(matches!(service.delete(1).await, Err(AppError::MissingStore)));
    }
}
