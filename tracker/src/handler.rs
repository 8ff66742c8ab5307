use std::sync::Arc;

use proto::generated::tracker::{
    QueryRequest, QueryResponse, RegisterFileRequest, RegisterFileResponse, RegisterNodeRequest,
    RegisterNodeResponse, SelectUploadTargetsRequest, SelectUploadTargetsResponse,
    tracker_server::Tracker,
};
use tokio::sync::Mutex;
use utilities::logger::{info, instrument, tracing, warn};

use crate::{
    registry::TrackerRegistry,
    replication::Replicator,
    selection_policy::selection_policy::SelectionPolicy,
};

pub struct TrackerHandler {
    state: Arc<Mutex<TrackerRegistry>>,
    selector: Box<dyn SelectionPolicy + Send + Sync>,
    replicator: Replicator,
    request_threshold: u32,
}

impl TrackerHandler {
    pub fn new(
        state: Arc<Mutex<TrackerRegistry>>,
        selector: Box<dyn SelectionPolicy + Send + Sync>,
        replicator: Replicator,
        request_threshold: u32,
    ) -> Self {
        Self {
            state,
            selector,
            replicator,
            request_threshold,
        }
    }
}

#[tonic::async_trait]
impl Tracker for TrackerHandler {
    #[instrument(name="grpc_tracker_register_node",skip(self,request),fields(hostname= %request.get_ref().hostname))]
    async fn register_node(
        &self,
        request: tonic::Request<RegisterNodeRequest>,
    ) -> Result<tonic::Response<RegisterNodeResponse>, tonic::Status> {
        let register_node_request = request.get_ref();
        let mut state = self.state.lock().await;
        let registered = state.register_node(&register_node_request.hostname);
        if registered {
            info!(node_count = state.node_count(), "Node registered");
        }
        Ok(tonic::Response::new(RegisterNodeResponse { registered }))
    }

    #[instrument(name="grpc_tracker_register_file",skip(self,request),fields(hostname= %request.get_ref().hostname,file_name= %request.get_ref().file_name))]
    async fn register_file(
        &self,
        request: tonic::Request<RegisterFileRequest>,
    ) -> Result<tonic::Response<RegisterFileResponse>, tonic::Status> {
        let register_file_request = request.get_ref();
        let mut state = self.state.lock().await;
        let registered = state.register_file(
            &register_file_request.hostname,
            &register_file_request.file_name,
            register_file_request.file_size,
        );
        if !registered {
            warn!("Rejected file registration from an unknown node");
        }
        Ok(tonic::Response::new(RegisterFileResponse { registered }))
    }

    #[instrument(name="grpc_tracker_select_upload_targets",skip(self,request),fields(file_name= %request.get_ref().file_name))]
    async fn select_upload_targets(
        &self,
        request: tonic::Request<SelectUploadTargetsRequest>,
    ) -> Result<tonic::Response<SelectUploadTargetsResponse>, tonic::Status> {
        let select_request = request.get_ref();
        let state = self.state.lock().await;
        let response = match self
            .selector
            .upload_targets(&state, &select_request.file_name)
        {
            Some((hostname1, hostname2)) => SelectUploadTargetsResponse {
                hostname1,
                hostname2,
            },
            // no complete pair, signalled by empty hostnames
            None => SelectUploadTargetsResponse {
                hostname1: String::new(),
                hostname2: String::new(),
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(name="grpc_tracker_query",skip(self,request),fields(file_name= %request.get_ref().file_name,want_node_list= %request.get_ref().want_node_list))]
    async fn query(
        &self,
        request: tonic::Request<QueryRequest>,
    ) -> Result<tonic::Response<QueryResponse>, tonic::Status> {
        let query_request = request.get_ref();
        let mut state = self.state.lock().await;
        let Some(record) = state.file_mut(&query_request.file_name) else {
            // unknown file is a zero result, not an error
            return Ok(tonic::Response::new(QueryResponse {
                file_size: 0,
                holder_count: 0,
                holders: vec![],
            }));
        };
        let response = if query_request.want_node_list {
            record.request_count += 1;
            QueryResponse {
                file_size: record.file_size,
                holder_count: record.holder_count(),
                holders: record.holders().to_vec(),
            }
        } else {
            QueryResponse {
                file_size: record.file_size,
                holder_count: record.holder_count(),
                holders: vec![],
            }
        };
        if record.request_count >= self.request_threshold {
            // replication runs under the registry lock, so the holder list a
            // downloader sees is never mid-update
            if let Err(e) = self
                .replicator
                .replicate(&mut state, &query_request.file_name)
                .await
            {
                warn!(error=%e,"Replication attempt failed");
            }
            // the counter restarts after every attempt, failed ones included
            if let Some(record) = state.file_mut(&query_request.file_name) {
                record.request_count = 0;
            }
        }
        Ok(tonic::Response::new(response))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc as StdArc,
        atomic::{AtomicBool, Ordering},
    };

    use async_trait::async_trait;
    use utilities::result::Result as UtilResult;

    use super::*;
    use crate::{
        replication::ReplicaTransfer,
        selection_policy::registry_order_policy::RegistryOrderPolicy,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum TransferCall {
        Fetch { source: String, file_name: String },
        Push { target: String, file_name: String },
    }

    struct MockTransfer {
        calls: StdArc<Mutex<Vec<TransferCall>>>,
        fail_push: StdArc<AtomicBool>,
    }

    #[async_trait]
    impl ReplicaTransfer for MockTransfer {
        async fn fetch_file(&self, hostname: &str, file_name: &str) -> UtilResult<Vec<u8>> {
            self.calls.lock().await.push(TransferCall::Fetch {
                source: hostname.to_owned(),
                file_name: file_name.to_owned(),
            });
            Ok(b"replica-bytes".to_vec())
        }
        async fn push_replica(
            &self,
            hostname: &str,
            file_name: &str,
            _content: Vec<u8>,
        ) -> UtilResult<()> {
            if self.fail_push.load(Ordering::SeqCst) {
                return Err("push refused".into());
            }
            self.calls.lock().await.push(TransferCall::Push {
                target: hostname.to_owned(),
                file_name: file_name.to_owned(),
            });
            Ok(())
        }
    }

    struct Harness {
        handler: TrackerHandler,
        state: Arc<Mutex<TrackerRegistry>>,
        calls: StdArc<Mutex<Vec<TransferCall>>>,
        fail_push: StdArc<AtomicBool>,
    }

    fn harness(threshold: u32) -> Harness {
        let state = Arc::new(Mutex::new(TrackerRegistry::new()));
        let calls = StdArc::new(Mutex::new(Vec::new()));
        let fail_push = StdArc::new(AtomicBool::new(false));
        let transfer = MockTransfer {
            calls: calls.clone(),
            fail_push: fail_push.clone(),
        };
        let replicator = Replicator::new(Box::new(transfer), Box::new(RegistryOrderPolicy));
        let handler = TrackerHandler::new(
            state.clone(),
            Box::new(RegistryOrderPolicy),
            replicator,
            threshold,
        );
        Harness {
            handler,
            state,
            calls,
            fail_push,
        }
    }

    async fn register_node(harness: &Harness, hostname: &str) {
        let response = harness
            .handler
            .register_node(tonic::Request::new(RegisterNodeRequest {
                hostname: hostname.to_owned(),
            }))
            .await
            .unwrap();
        assert!(response.get_ref().registered);
    }

    async fn register_file(harness: &Harness, hostname: &str, file_name: &str, file_size: u64) {
        let response = harness
            .handler
            .register_file(tonic::Request::new(RegisterFileRequest {
                hostname: hostname.to_owned(),
                file_name: file_name.to_owned(),
                file_size,
            }))
            .await
            .unwrap();
        assert!(response.get_ref().registered);
    }

    async fn query(harness: &Harness, file_name: &str, want_node_list: bool) -> QueryResponse {
        harness
            .handler
            .query(tonic::Request::new(QueryRequest {
                file_name: file_name.to_owned(),
                want_node_list,
            }))
            .await
            .unwrap()
            .into_inner()
    }

    #[tokio::test]
    async fn upload_targets_follow_registration_order() {
        let harness = harness(3);
        register_node(&harness, "http://a:3000").await;
        register_node(&harness, "http://b:3000").await;
        let response = harness
            .handler
            .select_upload_targets(tonic::Request::new(SelectUploadTargetsRequest {
                file_name: "x.txt".to_owned(),
            }))
            .await
            .unwrap();
        assert_eq!(response.get_ref().hostname1, "http://a:3000");
        assert_eq!(response.get_ref().hostname2, "http://b:3000");
    }

    #[tokio::test]
    async fn no_eligible_pair_returns_empty_hostnames() {
        let harness = harness(3);
        register_node(&harness, "http://a:3000").await;
        register_node(&harness, "http://b:3000").await;
        register_file(&harness, "http://b:3000", "x.txt", 10).await;
        let response = harness
            .handler
            .select_upload_targets(tonic::Request::new(SelectUploadTargetsRequest {
                file_name: "x.txt".to_owned(),
            }))
            .await
            .unwrap();
        assert_eq!(response.get_ref().hostname1, "");
        assert_eq!(response.get_ref().hostname2, "");
    }

    #[tokio::test]
    async fn unknown_file_queries_are_zero_results() {
        let harness = harness(3);
        let response = query(&harness, "ghost.txt", true).await;
        assert_eq!(response.file_size, 0);
        assert_eq!(response.holder_count, 0);
        assert!(response.holders.is_empty());
    }

    #[tokio::test]
    async fn informational_queries_skip_the_node_list_and_the_counter() {
        let harness = harness(3);
        register_node(&harness, "http://a:3000").await;
        register_file(&harness, "http://a:3000", "x.txt", 64).await;
        for _ in 0..10 {
            let response = query(&harness, "x.txt", false).await;
            assert_eq!(response.file_size, 64);
            assert_eq!(response.holder_count, 1);
            assert!(response.holders.is_empty());
        }
        assert!(harness.calls.lock().await.is_empty());
        let state = harness.state.lock().await;
        assert_eq!(state.file("x.txt").unwrap().request_count, 0);
    }

    #[tokio::test]
    async fn threshold_downloads_trigger_one_replication() {
        let harness = harness(3);
        register_node(&harness, "http://a:3000").await;
        register_node(&harness, "http://b:3000").await;
        register_node(&harness, "http://c:3000").await;
        register_file(&harness, "http://a:3000", "x.txt", 64).await;
        register_file(&harness, "http://b:3000", "x.txt", 64).await;

        query(&harness, "x.txt", true).await;
        query(&harness, "x.txt", true).await;
        assert!(harness.calls.lock().await.is_empty());

        let response = query(&harness, "x.txt", true).await;
        // the third downloader still sees the pre-replication holder list
        assert_eq!(response.holder_count, 2);

        let calls = harness.calls.lock().await.clone();
        assert_eq!(
            calls,
            [
                TransferCall::Fetch {
                    source: "http://a:3000".to_owned(),
                    file_name: "x.txt".to_owned()
                },
                TransferCall::Push {
                    target: "http://c:3000".to_owned(),
                    file_name: "x.txt".to_owned()
                },
            ]
        );
        let state = harness.state.lock().await;
        let record = state.file("x.txt").unwrap();
        assert_eq!(record.request_count, 0);
        assert_eq!(record.holder_count(), 3);
        assert!(state.node("http://c:3000").unwrap().has_file("x.txt"));
    }

    #[tokio::test]
    async fn failed_push_resets_the_counter_but_not_the_holders() {
        let harness = harness(2);
        register_node(&harness, "http://a:3000").await;
        register_node(&harness, "http://b:3000").await;
        register_file(&harness, "http://a:3000", "x.txt", 64).await;
        harness.fail_push.store(true, Ordering::SeqCst);

        query(&harness, "x.txt", true).await;
        query(&harness, "x.txt", true).await;

        let state = harness.state.lock().await;
        let record = state.file("x.txt").unwrap();
        assert_eq!(record.holder_count(), 1);
        assert_eq!(record.request_count, 0);
        assert!(!state.node("http://b:3000").unwrap().has_file("x.txt"));
    }

    #[tokio::test]
    async fn replication_is_skipped_when_every_node_holds_the_file() {
        let harness = harness(1);
        register_node(&harness, "http://a:3000").await;
        register_file(&harness, "http://a:3000", "x.txt", 64).await;
        query(&harness, "x.txt", true).await;
        // target selection found nothing, so no transfer ran
        assert!(harness.calls.lock().await.is_empty());
        let state = harness.state.lock().await;
        assert_eq!(state.file("x.txt").unwrap().request_count, 0);
    }
}
