use async_trait::async_trait;
use proto::generated::node::{
    FetchChunkRequest, StoreFileRequest, node_client::NodeClient,
};
use tonic::transport::Channel;
use utilities::{
    grpc_channel_pool::GRPC_CHANNEL_POOL,
    logger::{instrument, tracing},
    result::Result,
};

/// Node storage operations the command handlers depend on, behind a trait
/// so transfers can be mocked in handler tests.
#[async_trait]
pub trait NodeService {
    async fn store_file(&self, node_addrs: &str, file_name: &str, content: Vec<u8>) -> Result<()>;
    async fn fetch_chunk(
        &self,
        node_addrs: &str,
        file_name: &str,
        position: u64,
        chunk_size: u64,
    ) -> Result<Vec<u8>>;
}

pub struct GrpcNodeService;

impl GrpcNodeService {
    async fn get_connection(addrs: &str) -> Result<NodeClient<Channel>> {
        let channel = GRPC_CHANNEL_POOL.get_channel(addrs).await?;
        Ok(NodeClient::new(channel))
    }
}

#[async_trait]
impl NodeService for GrpcNodeService {
    #[instrument(name = "service_node_store_file", skip(self, content))]
    async fn store_file(&self, node_addrs: &str, file_name: &str, content: Vec<u8>) -> Result<()> {
        let request = StoreFileRequest {
            file_name: file_name.to_owned(),
            content,
            system_origin: false,
        };
        let response = Self::get_connection(node_addrs)
            .await?
            .store_file(tonic::Request::new(request))
            .await
            .map_err(|e| format!("Error while storing {file_name} on node {node_addrs} : {e}"))?;
        if !response.get_ref().stored {
            return Err(format!("Node {node_addrs} refused to store {file_name}").into());
        }
        Ok(())
    }
    #[instrument(name = "service_node_fetch_chunk", skip(self))]
    async fn fetch_chunk(
        &self,
        node_addrs: &str,
        file_name: &str,
        position: u64,
        chunk_size: u64,
    ) -> Result<Vec<u8>> {
        let request = FetchChunkRequest {
            file_name: file_name.to_owned(),
            position,
            chunk_size,
        };
        let response = Self::get_connection(node_addrs)
            .await?
            .fetch_chunk(tonic::Request::new(request))
            .await
            .map_err(|e| {
                format!("Error while fetching chunk of {file_name} from node {node_addrs} : {e}")
            })?;
        Ok(response.into_inner().content)
    }
}
