pub mod report_builder;
pub mod receivable_service;
pub use receivable_service::ReceivableService;
