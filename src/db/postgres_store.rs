// src/db/postgres_store.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::receivable_store::{ReceivableFilter, ReceivableStore, StoreError},
    models::receivable::Receivable,
};

const COLUMNS: &str = r#"
    id, reference, currency_code, issue_date, opening_value, paid_value,
    due_date, closed_date, cancelled, debtor_name, debtor_reference,
    debtor_address1, debtor_address2, debtor_town, debtor_state, debtor_zip,
    debtor_country_code, debtor_registration_number
"#;

// O repositório de títulos, responsável por todas as interações com a tabela 'receivables'
#[derive(Clone)]
pub struct PgReceivableStore {
    pool: PgPool,
}

impl PgReceivableStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceivableStore for PgReceivableStore {
    async fn insert(&self, receivable: Receivable) -> Result<Receivable, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO receivables (
                reference, currency_code, issue_date, opening_value, paid_value,
                due_date, closed_date, cancelled, debtor_name, debtor_reference,
                debtor_address1, debtor_address2, debtor_town, debtor_state, debtor_zip,
                debtor_country_code, debtor_registration_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {COLUMNS}
            "#
        );

        // O id vindo do cliente é ignorado: quem gera é o BIGSERIAL
        let created = sqlx::query_as::<_, Receivable>(&sql)
            .bind(&receivable.reference)
            .bind(&receivable.currency_code)
            .bind(receivable.issue_date)
            .bind(receivable.opening_value)
            .bind(receivable.paid_value)
            .bind(receivable.due_date)
            .bind(receivable.closed_date)
            .bind(receivable.cancelled)
            .bind(&receivable.debtor_name)
            .bind(&receivable.debtor_reference)
            .bind(&receivable.debtor_address1)
            .bind(&receivable.debtor_address2)
            .bind(&receivable.debtor_town)
            .bind(&receivable.debtor_state)
            .bind(&receivable.debtor_zip)
            .bind(&receivable.debtor_country_code)
            .bind(&receivable.debtor_registration_number)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find(&self, id: i64) -> Result<Option<Receivable>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM receivables WHERE id = $1");

        let receivable = sqlx::query_as::<_, Receivable>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(receivable)
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM receivables WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn scan(&self, filter: &ReceivableFilter) -> Result<Vec<Receivable>, StoreError> {
        // Mesmo predicado de ReceivableFilter::matches. `cancelled` pode ser NULL,
        // por isso IS DISTINCT FROM e não `<> TRUE`. Sem $1 não há limite inferior.
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM receivables
            WHERE issue_date IS NOT NULL
              AND ($1::timestamptz IS NULL OR issue_date > $1)
              AND cancelled IS DISTINCT FROM TRUE
            ORDER BY id ASC
            "#
        );

        let receivables = sqlx::query_as::<_, Receivable>(&sql)
            .bind(filter.issued_after)
            .fetch_all(&self.pool)
            .await?;

        Ok(receivables)
    }

    async fn replace(&self, id: i64, receivable: &Receivable) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE receivables SET
                reference = $2,
                currency_code = $3,
                issue_date = $4,
                opening_value = $5,
                paid_value = $6,
                due_date = $7,
                closed_date = $8,
                cancelled = $9,
                debtor_name = $10,
                debtor_reference = $11,
                debtor_address1 = $12,
                debtor_address2 = $13,
                debtor_town = $14,
                debtor_state = $15,
                debtor_zip = $16,
                debtor_country_code = $17,
                debtor_registration_number = $18
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&receivable.reference)
        .bind(&receivable.currency_code)
        .bind(receivable.issue_date)
        .bind(receivable.opening_value)
        .bind(receivable.paid_value)
        .bind(receivable.due_date)
        .bind(receivable.closed_date)
        .bind(receivable.cancelled)
        .bind(&receivable.debtor_name)
        .bind(&receivable.debtor_reference)
        .bind(&receivable.debtor_address1)
        .bind(&receivable.debtor_address2)
        .bind(&receivable.debtor_town)
        .bind(&receivable.debtor_state)
        .bind(&receivable.debtor_zip)
        .bind(&receivable.debtor_country_code)
        .bind(&receivable.debtor_registration_number)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::WriteConflict(id));
        }

        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM receivables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
