use crate::domain::{BankAccount, Rupiah};
use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub struct Config {
    pub booking_dir: PathBuf,
    pub sessions_dir: PathBuf,
    pub session: String,
    pub base_price: Rupiah,
    pub admin_whatsapp: String,
    pub public_url: String,
    pub submit_delay: Duration,
    pub theme: String,
    pub bank: BankAccount,
}

impl Config {
    pub fn from_env() -> Self {
        let booking_dir = std::env::var("VILLA_BOOKING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("villa-booking")
            });

        let sessions_dir = booking_dir.join("sessions");
        let session = std::env::var("VILLA_SESSION").unwrap_or_else(|_| "default".to_string());

        let public_url = std::env::var("VILLA_PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            booking_dir,
            sessions_dir,
            session,
            base_price: parsed_var("VILLA_BASE_PRICE", 2_000_000),
            admin_whatsapp: std::env::var("VILLA_ADMIN_WHATSAPP")
                .unwrap_or_else(|_| "6281809252706".to_string()),
            public_url,
            submit_delay: Duration::from_millis(parsed_var("VILLA_SUBMIT_DELAY_MS", 1500)),
            theme: std::env::var("VILLA_THEME").unwrap_or_else(|_| "dark".to_string()),
            bank: BankAccount::default(),
        }
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    pub fn session_dir(&self) -> PathBuf {
        self.sessions_dir.join(&self.session)
    }

    /// Link the guest can reopen their order with.
    pub fn order_link(&self, reference: &str) -> String {
        format!("{}/book/confirmation/{}", self.public_url, reference)
    }
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring {name}={raw:?}, not a number");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            booking_dir: PathBuf::from("/tmp/villa"),
            sessions_dir: PathBuf::from("/tmp/villa/sessions"),
            session: "default".to_string(),
            base_price: 2_000_000,
            admin_whatsapp: "6281809252706".to_string(),
            public_url: "https://villasekipan.com".to_string(),
            submit_delay: Duration::ZERO,
            theme: "dark".to_string(),
            bank: BankAccount::default(),
        }
    }

    #[test]
    fn session_dir_follows_session_name() {
        let config = config().with_session("guest-42");
        assert_eq!(config.session_dir(), PathBuf::from("/tmp/villa/sessions/guest-42"));
    }

    #[test]
    fn order_link_points_at_confirmation_page() {
        assert_eq!(
            config().order_link("VS-12345678"),
            "https://villasekipan.com/book/confirmation/VS-12345678"
        );
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        assert_eq!(parsed_var::<u64>("VILLA_TEST_SURELY_UNSET_VAR", 7), 7);
    }
}
