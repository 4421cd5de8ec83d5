use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use tracing::warn;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub email: String,
    pub companyname: String,
}

/// Order row as stored in `orders`. Never written by this service;
/// `order_status` is advanced externally by fulfillment.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub cylinder_type: String,
    pub total_price: f64,
    pub order_status: String,
    pub created_at: NaiveDateTime,
}

impl Order {
    /// Parsed delivery status. Unknown values degrade to `None` (the tracking
    /// page then highlights no step) and are logged.
    pub fn status(&self) -> Option<OrderStatus> {
        let parsed = OrderStatus::parse(&self.order_status);
        if parsed.is_none() {
            warn!(order_id = self.id, status = %self.order_status, "unrecognized order status");
        }
        parsed
    }
}

/// Profile fields snapshotted into the session at sign-in and read-only
/// afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub firstname: String,
    pub email: String,
    pub companyname: String,
}

impl SessionUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            firstname: user.firstname.clone(),
            email: user.email.clone(),
            companyname: user.companyname.clone(),
        }
    }

    pub fn avatar_letter(&self) -> String {
        self.firstname
            .chars()
            .next()
            .map(|first| first.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// Delivery lifecycle stages. Stored as free text, parsed once at the
/// boundary instead of string-compared per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    OnTheWay,
    Delivered,
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "on the way" => Some(Self::OnTheWay),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::OnTheWay => "On The Way",
            Self::Delivered => "Delivered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

/// One step of the fixed delivery sequence with its projected visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub status: OrderStatus,
    pub state: StepState,
}

/// One aggregated row from the store: total spend for one cylinder type.
#[derive(Debug, Clone, FromRow)]
pub struct SpendRow {
    pub cylinder_type: String,
    pub total: f64,
}

/// Chart-ready parallel series for the spending chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendSeries {
    pub labels: Vec<String>,
    pub totals: Vec<f64>,
}

/// Payload handed to the map embed. Driver position and name are mocked
/// until a live tracking feed exists; the shape is what such a feed would
/// fill.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub driver: [f64; 2],
    pub customer: [f64; 2],
    pub driver_name: &'static str,
    pub vehicle: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("Pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("ON THE WAY"), Some(OrderStatus::OnTheWay));
        assert_eq!(OrderStatus::parse("  delivered "), Some(OrderStatus::Delivered));
    }

    #[test]
    fn status_parse_rejects_unknown_values() {
        assert_eq!(OrderStatus::parse("cancelled"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn avatar_letter_is_uppercased_first_char() {
        let user = SessionUser {
            user_id: 1,
            firstname: "amina".to_string(),
            email: "amina@example.com".to_string(),
            companyname: "Kibo Catering".to_string(),
        };
        assert_eq!(user.avatar_letter(), "A");
    }
}
