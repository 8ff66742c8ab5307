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
    pub tracker_id: String,
    pub torrent_store_addrs: String,
    pub internal_grpc_port: String,
    pub external_grpc_addrs: String,
    // download-intent queries on one file before it is replicated to a new
    // holder
    pub request_threshold: u32,
    pub log_level: String,
    pub log_base: String,
    #[serde(default = "default_apm_endpoint")]
    pub apm_endpoint: String,
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
    let config_file_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| format!("./tracker/config/{}.yaml", env));
    println!("Reading config from file : {config_file_path}");
    Figment::new()
        .merge(Yaml::file(config_file_path))
        .extract()
        .unwrap()
});
