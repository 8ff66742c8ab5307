mod config;
mod handler;
mod registry;
mod replication;
mod selection_policy;
mod torrent_store_service;

use std::sync::Arc;

use config::CONFIG;
use handler::TrackerHandler;
use proto::generated::tracker::tracker_server::TrackerServer;
use registry::TrackerRegistry;
use replication::{GrpcReplicaTransfer, Replicator};
use selection_policy::registry_order_policy::RegistryOrderPolicy;
use tokio::sync::Mutex;
use tonic::transport::Server;
use torrent_store_service::TorrentStoreService;
use utilities::{
    logger::{error, info, init_logger},
    result::Result,
    retry_policy::retry_with_backoff,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _gaurd = init_logger(
        "Tracker",
        &CONFIG.tracker_id,
        CONFIG.log_level.clone(),
        &CONFIG.apm_endpoint,
        &CONFIG.log_base,
    );
    info!(grpc_addrs=%CONFIG.external_grpc_addrs,"Starting the grpc server on address");
    let torrent_store_service = TorrentStoreService::new();
    let registered = match retry_with_backoff(
        || async {
            torrent_store_service
                .register_tracker(&CONFIG.torrent_store_addrs, &CONFIG.external_grpc_addrs)
                .await
        },
        5,
    )
    .await
    {
        Ok(v) => v,
        Err(e) => {
            error!(error=%e,"Error while registering with torrent store Hence shuting down");
            return Err(e);
        }
    };
    if !registered {
        error!("Torrent store rejected the tracker registration Hence shuting down");
        return Err("Torrent store rejected the tracker registration".into());
    }
    info!(torrent_store=%CONFIG.torrent_store_addrs,"Registered with torrent store");

    let state = Arc::new(Mutex::new(TrackerRegistry::new()));
    let replicator = Replicator::new(Box::new(GrpcReplicaTransfer), Box::new(RegistryOrderPolicy));
    let handler = TrackerHandler::new(
        state,
        Box::new(RegistryOrderPolicy),
        replicator,
        CONFIG.request_threshold,
    );
    info!("grpc server starting");
    Server::builder()
        .add_service(TrackerServer::new(handler))
        .serve(format!("0.0.0.0:{}", CONFIG.internal_grpc_port).parse()?)
        .await?;
    Ok(())
}
