// src/models/receivable.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Alguns campos obrigatórios são `Option` de propósito: se o cliente omitir
// `paidValue`, queremos um erro de validação ("required") e não um zero
// silencioso vindo do Default. Strings ausentes viram "" e caem no `length`.

// `rename` explícito (e não só `rename_all`) para que o validator use os
// mesmos nomes do JSON nas chaves de erro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receivable {
    #[schema(example = 1)]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "length_1_50"))]
    #[schema(example = "INV-2023-0001")]
    pub reference: String,

    // ISO 4217
    #[serde(rename = "currencyCode", default)]
    #[validate(length(equal = 3, message = "invalid_currency_code"))]
    #[schema(example = "USD")]
    pub currency_code: String,

    #[serde(rename = "issueDate")]
    #[validate(required(message = "required"))]
    #[schema(value_type = String, format = DateTime, example = "2023-10-06T07:05:20.257Z")]
    pub issue_date: Option<DateTime<Utc>>,

    #[serde(rename = "openingValue", default, with = "rust_decimal::serde::arbitrary_precision_option")]
    #[validate(required(message = "required"))]
    #[schema(value_type = f64, example = 11)]
    pub opening_value: Option<Decimal>,

    #[serde(rename = "paidValue", default, with = "rust_decimal::serde::arbitrary_precision_option")]
    #[validate(required(message = "required"))]
    #[schema(value_type = f64, example = 1)]
    pub paid_value: Option<Decimal>,

    #[serde(rename = "dueDate")]
    #[validate(required(message = "required"))]
    #[schema(value_type = String, format = DateTime, example = "2023-11-06T07:05:20.257Z")]
    pub due_date: Option<DateTime<Utc>>,

    // Preenchido => título fechado
    #[schema(value_type = Option<String>, format = DateTime)]
    pub closed_date: Option<DateTime<Utc>>,

    #[schema(example = false)]
    pub cancelled: Option<bool>,

    #[serde(rename = "debtorName", default)]
    #[validate(length(min = 1, max = 50, message = "length_1_50"))]
    #[schema(example = "ACME Ltd")]
    pub debtor_name: String,

    #[serde(rename = "debtorReference", default)]
    #[validate(length(min = 1, max = 50, message = "length_1_50"))]
    #[schema(example = "DEB-42")]
    pub debtor_reference: String,

    #[serde(rename = "debtorAddress1")]
    #[validate(length(max = 50, message = "max_50"))]
    pub debtor_address1: Option<String>,

    #[serde(rename = "debtorAddress2")]
    #[validate(length(max = 50, message = "max_50"))]
    pub debtor_address2: Option<String>,

    #[serde(rename = "debtorTown")]
    #[validate(length(max = 50, message = "max_50"))]
    pub debtor_town: Option<String>,

    #[serde(rename = "debtorState")]
    #[validate(length(max = 50, message = "max_50"))]
    pub debtor_state: Option<String>,

    #[serde(rename = "debtorZip")]
    #[validate(length(max = 50, message = "max_50"))]
    pub debtor_zip: Option<String>,

    #[serde(rename = "debtorCountryCode", default)]
    #[validate(length(min = 1, max = 50, message = "length_1_50"))]
    #[schema(example = "GB")]
    pub debtor_country_code: String,

    #[serde(rename = "debtorRegistrationNumber")]
    #[validate(length(max = 50, message = "max_50"))]
    pub debtor_registration_number: Option<String>,
}

impl Receivable {
    /// Valor em aberto: `openingValue - paidValue`, com ausentes contando como zero.
    pub fn remainder(&self) -> Decimal {
        self.opening_value.unwrap_or(Decimal::ZERO) - self.paid_value.unwrap_or(Decimal::ZERO)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled == Some(true)
    }

    pub fn is_open(&self) -> bool {
        self.closed_date.is_none()
    }
}
