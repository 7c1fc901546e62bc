pub mod ledger_service;
pub mod report_service;
