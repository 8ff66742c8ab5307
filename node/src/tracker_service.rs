use async_trait::async_trait;
use proto::generated::tracker::{
    RegisterFileRequest, RegisterNodeRequest, tracker_client::TrackerClient,
};
use tonic::transport::Channel;
use utilities::{
    grpc_channel_pool::GRPC_CHANNEL_POOL,
    logger::{error, info, instrument, tracing},
    result::Result,
};

use crate::config::CONFIG;

/// Announces stored files to the tracker. A trait seam so the grpc handler
/// can be tested without a running tracker.
#[async_trait]
pub trait FileRegistrar {
    async fn register_file(&self, file_name: &str, file_size: u64) -> Result<()>;
}

pub struct TrackerService {}

impl TrackerService {
    pub fn new() -> Self {
        Self {}
    }
    async fn get_grpc_connection(&self) -> Result<TrackerClient<Channel>> {
        let channel = GRPC_CHANNEL_POOL.get_channel(&CONFIG.tracker_addrs).await?;
        Ok(TrackerClient::new(channel))
    }
    /// Joins the tracker's node table under this node's external address.
    #[instrument(name = "service_tracker_register_node", skip(self))]
    pub async fn register_node(&self) -> Result<()> {
        let register_node_request = RegisterNodeRequest {
            hostname: CONFIG.external_grpc_addrs.clone(),
        };
        let mut tracker_client = self.get_grpc_connection().await?;
        match tracker_client
            .register_node(tonic::Request::new(register_node_request))
            .await
        {
            Ok(response) => {
                if !response.get_ref().registered {
                    return Err("Tracker rejected the node registration".into());
                }
                info!("Registered with tracker sucessfully");
                Ok(())
            }
            Err(tonic_status) => {
                error!(error = ?tonic_status,"Error while registering with tracker");
                Err(format!("Error while registering with tracker {tonic_status}").into())
            }
        }
    }
}

#[async_trait]
impl FileRegistrar for TrackerService {
    #[instrument(name = "service_tracker_register_file", skip(self))]
    async fn register_file(&self, file_name: &str, file_size: u64) -> Result<()> {
        let register_file_request = RegisterFileRequest {
            hostname: CONFIG.external_grpc_addrs.clone(),
            file_name: file_name.to_owned(),
            file_size,
        };
        let mut tracker_client = self.get_grpc_connection().await?;
        let response = tracker_client
            .register_file(tonic::Request::new(register_file_request))
            .await
            .map_err(|e| format!("Error while registering file {file_name} with tracker : {e}"))?;
        if !response.get_ref().registered {
            return Err(format!("Tracker refused the registration of {file_name}").into());
        }
        Ok(())
    }
}
