use clap::Subcommand;
use mindora_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `session.cooldown_secs`
    Get { key: String },
    /// Change one value and save it
    Set { key: String, value: String },
    /// Print every `session.*` key with its value
    List,
    /// Overwrite the config file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let entries = Config::load()?.entries();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            tracing::info!("config reset");
            for (key, value) in Config::default().entries() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
