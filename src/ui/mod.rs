pub mod banner;
pub mod messages;
