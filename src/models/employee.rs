use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,                   // ⇔ employees.id
    pub name: String,              // ⇔ employees.name
    #[serde(skip_serializing)]
    pub pin_hash: String,          // ⇔ employees.pin_hash (Argon2id PHC string)
    pub pay_rate: f64,             // ⇔ employees.pay_rate
    pub active: bool,              // ⇔ employees.active (INT 0/1)
    pub created_at: DateTime<Utc>, // ⇔ employees.created_at (TEXT, ISO8601 Z)
}
