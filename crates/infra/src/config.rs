use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// UK local hour at which filing reminders go out
    pub send_hour: u32,
    /// Name signed under outgoing reminder emails
    pub sender_name: String,
    /// Lifetime of the batch lock. A crashed run's lock expires after this
    /// long instead of wedging the batch forever.
    pub batch_lock_ttl_secs: i64,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                5000
            }
        };

        let default_send_hour = "9";
        let send_hour = std::env::var("SEND_HOUR").unwrap_or_else(|_| default_send_hour.into());
        let send_hour = match send_hour.parse::<u32>() {
            Ok(hour) if hour < 24 => hour,
            _ => {
                warn!(
                    "The given SEND_HOUR: {} is not a valid hour of day, falling back to the default send hour: {}.",
                    send_hour, default_send_hour
                );
                9
            }
        };

        let sender_name = std::env::var("SENDER_NAME").unwrap_or_else(|_| {
            info!("Did not find SENDER_NAME environment variable. Falling back to the default sender name.");
            "Your accountant".into()
        });

        let default_lock_ttl = "300";
        let batch_lock_ttl_secs =
            std::env::var("BATCH_LOCK_TTL_SECS").unwrap_or_else(|_| default_lock_ttl.into());
        let batch_lock_ttl_secs = match batch_lock_ttl_secs.parse::<i64>() {
            Ok(ttl) if ttl > 0 => ttl,
            _ => {
                warn!(
                    "The given BATCH_LOCK_TTL_SECS: {} is not valid, falling back to the default: {}.",
                    batch_lock_ttl_secs, default_lock_ttl
                );
                300
            }
        };

        Self {
            port,
            send_hour,
            sender_name,
            batch_lock_ttl_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
