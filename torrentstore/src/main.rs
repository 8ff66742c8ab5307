mod config;
mod handler;

use config::CONFIG;
use handler::TorrentStoreHandler;
use proto::generated::torrent_store::torrent_store_server::TorrentStoreServer;
use storage::file_storage::FileStorage;
use tonic::transport::Server;
use utilities::{
    logger::{error, info, init_logger},
    result::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _gaurd = init_logger(
        "TorrentStore",
        &CONFIG.store_id,
        CONFIG.log_level.clone(),
        &CONFIG.apm_endpoint,
        &CONFIG.log_base,
    );
    info!(grpc_port=%CONFIG.internal_grpc_port,"Starting the grpc server on port");
    let store = match FileStorage::new(&CONFIG.torrent_path).await {
        Ok(v) => v,
        Err(e) => {
            error!(error=%e,"Error while creating the torrent root Hence shuting down");
            return Err(e);
        }
    };
    let handler = TorrentStoreHandler::new(store);
    info!("grpc server starting");
    Server::builder()
        .add_service(TorrentStoreServer::new(handler))
        .serve(format!("0.0.0.0:{}", CONFIG.internal_grpc_port).parse()?)
        .await?;
    Ok(())
}
