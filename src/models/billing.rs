//! Billing figures derived from cumulative estimated-charge readings

/// Daily increment and month-to-date total for one billing scope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billing {
    pub daily: f64,
    pub monthly: f64,
}

/// Billing figures for a single AWS service
#[derive(Debug, Clone)]
pub struct ServiceBilling {
    pub service: String,
    pub billing: Billing,
}
