use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Recipient of form-submission notifications.
    pub admin_email: String,
    /// Verified sender address used by the delivery provider.
    pub sender_email: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        let admin_email = env_or_default("ADMIN_EMAIL", "admin@advolcano.io");
        let sender_email = env_or_default("VERIFIED_SENDER_EMAIL", "noreply@advolcano.io");

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            admin_email,
            sender_email,
        })
    }
}
