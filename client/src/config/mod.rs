use figment::{
    Figment,
    providers::{Format, Yaml},
};
use once_cell::sync::Lazy;
use serde::Deserialize;

fn default_apm_endpoint() -> String {
    String::new()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub client_id: String,
    pub torrent_store_addrs: String,
    pub log_level: String,
    pub log_base: String,
    #[serde(default = "default_apm_endpoint")]
    pub apm_endpoint: String,
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
    let config_file_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| format!("./client/config/{}.yaml", env));
    println!("Reading config from file : {config_file_path}");
    Figment::new()
        .merge(Yaml::file(config_file_path))
        .extract()
        .unwrap()
});
