use std::time::Duration;

use clap::Parser;

/// Server settings. Each flag can also come from the environment (or `.env`).
#[derive(Parser, Debug, Clone)]
#[command(name = "parlor", version, about = "Real-time chat presence and message routing server")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "PARLOR_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Browser origin allowed by CORS; any origin when unset
    #[arg(long, env = "PARLOR_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Group every client sees on connect
    #[arg(long, env = "PARLOR_DEFAULT_GROUP", default_value = "Global Chat")]
    pub default_group: String,

    /// Drop connections silent for this many seconds (0 keeps them forever)
    #[arg(long, env = "PARLOR_IDLE_TIMEOUT_SECS", default_value_t = 0)]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleTimeout(pub Option<Duration>);

impl Config {
    pub fn idle_timeout(&self) -> IdleTimeout {
        IdleTimeout((self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs)))
    }
}
