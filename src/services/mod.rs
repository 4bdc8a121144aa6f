pub mod billing_service;
pub mod report_service;
pub mod trail_service;
