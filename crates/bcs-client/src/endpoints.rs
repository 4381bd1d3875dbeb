//! API endpoint URL builders

/// Build the customer-scoped bulk alerts URL
pub fn bulk_alerts_url(base_url: &str, customer_id: &str) -> String {
    format!(
        "{}/customer/{}/bulk/alerts",
        base_url.trim_end_matches('/'),
        customer_id
    )
}
