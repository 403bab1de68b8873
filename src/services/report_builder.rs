// src/services/report_builder.rs

use crate::models::{
    receivable::Receivable,
    report::{ReceivableStatus, ReceivablesReport, Stats, Summary},
};

/// Monta o relatório a partir do conjunto já filtrado (emitidos após a data
/// de corte e não cancelados). Uma única passada: status -> moeda -> Stats.
///
/// A lista e o resumo saem do mesmo conjunto; no modo `summary_only` a lista
/// é descartada e `receivables` fica `None`.
pub fn build_report(qualifying: Vec<Receivable>, summary_only: bool) -> ReceivablesReport {
    let summary = summarize(&qualifying);

    ReceivablesReport {
        summary,
        receivables: (!summary_only).then_some(qualifying),
    }
}

pub fn summarize<'a, I>(receivables: I) -> Summary
where
    I: IntoIterator<Item = &'a Receivable>,
{
    let mut summary = Summary::new();

    for receivable in receivables {
        let remainder = receivable.remainder();

        summary
            .entry(ReceivableStatus::of(receivable))
            .or_default()
            .entry(receivable.currency_code.clone())
            .and_modify(|stats| stats.record(remainder))
            .or_insert_with(|| Stats::first(remainder));
    }

    summary
}

#[cfg(test)]
#[path = "report_builder_tests.rs"]
mod tests;
