// Ticket category catalogue

/// Ticket categories in display order.
pub const TICKET_TYPES: [&str; 4] = ["HK$1180", "HK$680", "HK$380", "VIP Package"];

/// Categories tracked per minute in the sliding window.
pub const WINDOW_CATEGORIES: [&str; 3] = ["HK$1180", "HK$680", "HK$380"];

/// Catch-all slice shown in the composition chart.
pub const OTHER_CATEGORY: &str = "Other";
