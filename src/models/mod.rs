pub mod absence;
pub mod attempt;
pub mod decision;
pub mod employee;
pub mod punch;
pub mod settings;

pub use absence::AbsenceRecord;
pub use attempt::{FailReason, PinAttempt};
pub use decision::Decision;
pub use employee::Employee;
pub use punch::{PunchMethod, PunchRecord};
pub use settings::KioskSettings;
