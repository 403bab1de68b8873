// src/models/report.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::receivable::Receivable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum ReceivableStatus {
    Open,
    Closed,
}

impl ReceivableStatus {
    pub fn of(receivable: &Receivable) -> Self {
        if receivable.is_open() {
            ReceivableStatus::Open
        } else {
            ReceivableStatus::Closed
        }
    }
}

/// Estatísticas de uma célula (status, moeda) do relatório.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 30)]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 10)]
    pub max: Decimal,
    #[schema(example = 3)]
    pub count: u64,
}

impl Stats {
    pub fn first(remainder: Decimal) -> Self {
        Self {
            total: remainder,
            max: remainder,
            count: 1,
        }
    }

    pub fn record(&mut self, remainder: Decimal) {
        self.total += remainder;
        self.max = self.max.max(remainder);
        self.count += 1;
    }
}

// Status -> Moeda -> Stats
pub type Summary = BTreeMap<ReceivableStatus, BTreeMap<String, Stats>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReceivablesReport {
    #[schema(value_type = BTreeMap<String, BTreeMap<String, Stats>>)]
    pub summary: Summary,

    // `None` no modo summaryOnly: o campo some do JSON (não vira lista vazia)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receivables: Option<Vec<Receivable>>,
}

impl ReceivablesReport {
    pub fn stats(&self, status: ReceivableStatus, currency_code: &str) -> Option<&Stats> {
        self.summary.get(&status)?.get(currency_code)
    }

    pub fn total_count(&self) -> u64 {
        self.summary
            .values()
            .flat_map(|by_currency| by_currency.values())
            .map(|stats| stats.count)
            .sum()
    }
}
