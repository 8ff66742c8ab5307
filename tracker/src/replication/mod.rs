use async_trait::async_trait;
use proto::generated::node::{
    FetchFileRequest, StoreFileRequest, node_client::NodeClient,
};
use tonic::transport::Channel;
use utilities::{
    grpc_channel_pool::GRPC_CHANNEL_POOL,
    logger::{info, instrument, tracing},
    result::Result,
};

use crate::{registry::TrackerRegistry, selection_policy::selection_policy::SelectionPolicy};

/// Moves file bytes between nodes on the tracker's behalf. Behind a trait so
/// the handler tests can run without a network.
#[async_trait]
pub trait ReplicaTransfer {
    async fn fetch_file(&self, hostname: &str, file_name: &str) -> Result<Vec<u8>>;
    async fn push_replica(&self, hostname: &str, file_name: &str, content: Vec<u8>) -> Result<()>;
}

pub struct GrpcReplicaTransfer;

impl GrpcReplicaTransfer {
    async fn get_connection(addrs: &str) -> Result<NodeClient<Channel>> {
        let channel = GRPC_CHANNEL_POOL.get_channel(addrs).await?;
        Ok(NodeClient::new(channel))
    }
}

#[async_trait]
impl ReplicaTransfer for GrpcReplicaTransfer {
    #[instrument(name = "replication_fetch_file", skip(self))]
    async fn fetch_file(&self, hostname: &str, file_name: &str) -> Result<Vec<u8>> {
        let request = FetchFileRequest {
            file_name: file_name.to_owned(),
        };
        let response = Self::get_connection(hostname)
            .await?
            .fetch_file(tonic::Request::new(request))
            .await
            .map_err(|e| {
                format!("Error while fetching {file_name} from source node {hostname} : {e}")
            })?;
        Ok(response.into_inner().content)
    }
    #[instrument(name = "replication_push_replica", skip(self, content))]
    async fn push_replica(&self, hostname: &str, file_name: &str, content: Vec<u8>) -> Result<()> {
        let request = StoreFileRequest {
            file_name: file_name.to_owned(),
            content,
            system_origin: true,
        };
        let response = Self::get_connection(hostname)
            .await?
            .store_file(tonic::Request::new(request))
            .await
            .map_err(|e| {
                format!("Error while pushing {file_name} to target node {hostname} : {e}")
            })?;
        if !response.get_ref().stored {
            return Err(format!("Target node {hostname} refused replica of {file_name}").into());
        }
        Ok(())
    }
}

/// Copies a popular file from its first holder to the first node that does
/// not hold it yet. Registry bookkeeping is committed only after the push
/// succeeds.
pub struct Replicator {
    transfer: Box<dyn ReplicaTransfer + Send + Sync>,
    policy: Box<dyn SelectionPolicy + Send + Sync>,
}

impl Replicator {
    pub fn new(
        transfer: Box<dyn ReplicaTransfer + Send + Sync>,
        policy: Box<dyn SelectionPolicy + Send + Sync>,
    ) -> Self {
        Self { transfer, policy }
    }

    /// Runs one replication round for `file_name` and returns the hostname
    /// the replica landed on.
    #[instrument(name = "replication_replicate", skip(self, registry))]
    pub async fn replicate(
        &self,
        registry: &mut TrackerRegistry,
        file_name: &str,
    ) -> Result<String> {
        let Some(record) = registry.file(file_name) else {
            return Err(format!("No file record for {file_name}").into());
        };
        let Some(source) = record.holders().first().cloned() else {
            return Err(format!("File {file_name} has no holders to replicate from").into());
        };
        let Some(target) = self.policy.replication_target(registry, file_name) else {
            return Err(format!("Every registered node already holds {file_name}").into());
        };
        let content = self.transfer.fetch_file(&source, file_name).await?;
        self.transfer
            .push_replica(&target, file_name, content)
            .await?;
        registry.commit_replica(file_name, &target)?;
        info!(%source, %target, %file_name, "Replicated file to a new holder");
        Ok(target)
    }
}
