// Detail table domain model
use serde::Serialize;

/// One activity / ticket type / time row of the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub id: String,
    pub activity_name: String,
    pub ticket_type: String,
    pub date_time: String,
    pub sold_count: u32,
    pub gross_revenue: u64,
    pub net_revenue: u64,
    pub pending_count: u32,
}
