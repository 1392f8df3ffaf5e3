pub mod absence;
pub mod attempts;
pub mod audit;
pub mod config;
pub mod employee;
pub mod init;
pub mod kiosk;
pub mod report;
