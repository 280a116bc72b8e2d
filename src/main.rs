use std::io;

use config::{Config, Environment, File};
use dotenvy::dotenv;
use pushkind_cookbook::models::config::ServerConfig;
use pushkind_cookbook::run;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from `.env` in local development.
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build();

    let server_config = match settings.and_then(|s| s.try_deserialize::<ServerConfig>()) {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load server configuration: {e}");
            std::process::exit(1);
        }
    };

    run(server_config).await
}
