mod config;
mod handler;
mod tracker_service;

use config::CONFIG;
use handler::NodeHandler;
use proto::generated::node::node_server::NodeServer;
use storage::file_storage::FileStorage;
use tonic::transport::Server;
use tracker_service::TrackerService;
use utilities::{
    logger::{error, info, init_logger},
    result::Result,
    retry_policy::retry_with_backoff,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _gaurd = init_logger(
        "Node",
        &CONFIG.node_id,
        CONFIG.log_level.clone(),
        &CONFIG.apm_endpoint,
        &CONFIG.log_base,
    );
    info!(grpc_addrs=%CONFIG.external_grpc_addrs,"Starting the grpc server on address");
    let store = match FileStorage::new(&CONFIG.storage_path).await {
        Ok(v) => v,
        Err(e) => {
            error!(error=%e,"Error while creating the storage root Hence shuting down");
            return Err(e);
        }
    };
    let tracker_service = TrackerService::new();
    if let Err(e) = retry_with_backoff(|| async { tracker_service.register_node().await }, 5).await
    {
        error!(error=%e,"Error while registering with tracker Hence shuting down");
        return Err(e);
    }
    info!(tracker=%CONFIG.tracker_addrs,"Registered with tracker");

    let handler = NodeHandler::new(store, Box::new(tracker_service));
    info!("grpc server starting");
    Server::builder()
        .add_service(NodeServer::new(handler))
        .serve(format!("0.0.0.0:{}", CONFIG.internal_grpc_port).parse()?)
        .await?;
    Ok(())
}
