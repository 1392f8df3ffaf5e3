/// Typed view over the four kiosk settings rows. Parsed fresh on every
/// decision so administrative changes take effect immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskSettings {
    pub debounce_seconds: i64,
    pub attempt_window_seconds: i64,
    pub max_attempts_per_window: i64,
    pub lockout_minutes: i64,
}

pub const KEY_DEBOUNCE_SECONDS: &str = "kiosk.debounce_seconds";
pub const KEY_ATTEMPT_WINDOW_SECONDS: &str = "kiosk.pin_attempt_window_seconds";
pub const KEY_MAX_ATTEMPTS_PER_WINDOW: &str = "kiosk.pin_max_attempts_per_window";
pub const KEY_LOCKOUT_MINUTES: &str = "kiosk.lockout_minutes";

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            debounce_seconds: 30,
            attempt_window_seconds: 300,
            max_attempts_per_window: 5,
            lockout_minutes: 10,
        }
    }
}

impl KioskSettings {
    /// Parse one stored value, falling back to the default when the row is
    /// missing or not an integer.
    pub fn parse_or(value: Option<String>, default: i64) -> i64 {
        value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }
}
