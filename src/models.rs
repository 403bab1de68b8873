pub mod receivable;
pub mod report;
