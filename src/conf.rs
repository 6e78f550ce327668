use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    // signing secret for issued tokens; startup fails if unset
    pub jwt_secret: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
