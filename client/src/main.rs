mod chunk_joiner;
mod chunk_plan;
mod command_runner;
mod config;
mod node_service;
mod torrent_store_service;
mod tracker_service;

use std::io;

use command_runner::CommandRunner;
use config::CONFIG;
use utilities::{
    logger::{info, init_logger},
    result::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _gaurd = init_logger(
        "Client",
        &CONFIG.client_id,
        CONFIG.log_level.clone(),
        &CONFIG.apm_endpoint,
        &CONFIG.log_base,
    );
    let mut command_executer = CommandRunner::new();
    info!("starting the Client");
    loop {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_bytes) => {
                if input.trim() == "quit" {
                    break;
                }
                match command_executer.handle_input(&mut input).await {
                    Ok(message) => {
                        println!("Success : {}", message);
                    }
                    Err(message) => {
                        println!("Error : {}", message);
                    }
                }
            }
            Err(e) => {
                println!("error while reading the command {:?}", e);
            }
        }
    }
    Ok(())
}
