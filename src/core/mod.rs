pub mod kiosk;
pub mod reports;
pub mod security;
