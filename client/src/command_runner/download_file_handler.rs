use std::sync::Arc;

use utilities::{
    logger::{Instrument, error, info, instrument, trace, tracing},
    result::Result,
    retry_policy::retry_with_backoff,
};

use crate::{
    chunk_joiner::ChunkJoiner, chunk_plan::plan_chunks, node_service::NodeService,
    torrent_store_service::TorrentStoreService, tracker_service::TrackerService,
};

use super::tracker_from_torrent;

pub struct DownloadFileHandler {
    torrent_store: Box<dyn TorrentStoreService + Send + Sync>,
    tracker: Box<dyn TrackerService + Send + Sync>,
    node: Arc<dyn NodeService + Send + Sync>,
}
impl DownloadFileHandler {
    pub fn new(
        torrent_store: Box<dyn TorrentStoreService + Send + Sync>,
        tracker: Box<dyn TrackerService + Send + Sync>,
        node: Arc<dyn NodeService + Send + Sync>,
    ) -> Self {
        Self {
            torrent_store,
            tracker,
            node,
        }
    }
    #[instrument(skip(self))]
    pub async fn download_file(
        &mut self,
        remote_file_name: String,
        local_file_path: String,
    ) -> Result<String> {
        let Some(torrent) = self.torrent_store.query_torrent(&remote_file_name).await? else {
            return Err(format!("No torrent exists for {remote_file_name}").into());
        };
        let tracker_addrs = tracker_from_torrent(&torrent)?;
        trace!(%tracker_addrs, "located tracker through torrent");
        let response = self
            .tracker
            .query(&tracker_addrs, &remote_file_name, true)
            .await?;
        if response.holder_count == 0 || response.holders.is_empty() {
            return Err(format!("No node currently holds {remote_file_name}").into());
        }
        let plan = plan_chunks(response.file_size, &response.holders);
        trace!(?plan, "planned chunks across holders");
        let chunk_joiner = ChunkJoiner::new(local_file_path.clone(), response.file_size).await?;
        let mut handles = vec![];
        for assignment in plan {
            let chunk_joiner = chunk_joiner.clone();
            let node = self.node.clone();
            let remote_file_name = remote_file_name.clone();
            handles.push(tokio::spawn(
                async move {
                    retry_with_backoff(
                        || async {
                            let content = node
                                .fetch_chunk(
                                    &assignment.hostname,
                                    &remote_file_name,
                                    assignment.offset,
                                    assignment.size,
                                )
                                .await?;
                            if content.len() as u64 != assignment.size {
                                return Err(format!(
                                    "Node {} returned {} bytes instead of {}",
                                    assignment.hostname,
                                    content.len(),
                                    assignment.size
                                )
                                .into());
                            }
                            chunk_joiner.join_chunk(assignment.offset, &content).await
                        },
                        3,
                    )
                    .await
                }
                .in_current_span(),
            ));
        }
        // every outstanding fetch finishes before success or failure is
        // decided, so no task can race the cleanup below
        let mut failure = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error=%e,"Error during chunk fetching");
                    failure.get_or_insert(format!("{e}"));
                }
                Err(e) => {
                    error!("Error during chunk fetching {e:?}");
                    failure.get_or_insert(format!("{e:?}"));
                }
            }
        }
        if let Some(failure) = failure {
            info!("Freeing the reserved space");
            chunk_joiner.abort().await;
            info!("Space freed");
            return Err(format!("Error in one handler {failure}").into());
        }
        Ok(format!(
            "File {remote_file_name} downloaded to {local_file_path}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use async_trait::async_trait;
    use proto::generated::tracker::QueryResponse;
    use tokio::sync::Mutex;

    use super::*;
    use crate::command_runner::test_support::{MockNode, MockTorrentStore};

    struct MockTracker {
        file_size: u64,
        holders: Vec<String>,
    }

    #[async_trait]
    impl TrackerService for MockTracker {
        async fn select_upload_targets(
            &self,
            _tracker_addrs: &str,
            _file_name: &str,
        ) -> Result<Option<(String, String)>> {
            unreachable!("download never selects upload targets")
        }
        async fn query(
            &self,
            _tracker_addrs: &str,
            _file_name: &str,
            _want_node_list: bool,
        ) -> Result<QueryResponse> {
            Ok(QueryResponse {
                file_size: self.file_size,
                holder_count: self.holders.len() as u32,
                holders: self.holders.clone(),
            })
        }
    }

    struct Harness {
        handler: DownloadFileHandler,
        fetches: Arc<Mutex<Vec<(String, u64, u64)>>>,
    }

    fn harness(content: Vec<u8>, holders: &[&str], fail_fetch_from: Option<&str>) -> Harness {
        let fetches = Arc::new(Mutex::new(Vec::new()));
        let node = MockNode {
            stores: Arc::new(Mutex::new(Vec::new())),
            fail_store: Arc::new(AtomicBool::new(false)),
            fetches: fetches.clone(),
            content: content.clone(),
            fail_fetch_from: fail_fetch_from.map(str::to_owned),
        };
        let torrent_store = MockTorrentStore {
            torrents: Arc::new(Mutex::new(Vec::new())),
            torrent: Some("http://tracker:6000/x.txt".to_owned()),
        };
        let tracker = MockTracker {
            file_size: content.len() as u64,
            holders: holders.iter().map(|h| (*h).to_owned()).collect(),
        };
        Harness {
            handler: DownloadFileHandler::new(
                Box::new(torrent_store),
                Box::new(tracker),
                Arc::new(node),
            ),
            fetches,
        }
    }

    fn output_path(test_name: &str) -> String {
        std::env::temp_dir()
            .join(format!("download_{}_{}", test_name, std::process::id()))
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn chunks_from_all_holders_reconstruct_the_file() {
        let content: Vec<u8> = (0..101).map(|i| i as u8).collect();
        let mut harness = harness(
            content.clone(),
            &["http://a:3000", "http://b:3000"],
            None,
        );
        let path = output_path("reconstruct");
        let _ = tokio::fs::remove_file(&path).await;
        harness
            .handler
            .download_file("x.txt".to_owned(), path.clone())
            .await
            .unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), content);
        let mut fetches = harness.fetches.lock().await.clone();
        fetches.sort();
        assert_eq!(
            fetches,
            [
                ("http://a:3000".to_owned(), 0, 50),
                ("http://b:3000".to_owned(), 50, 51),
            ]
        );
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn failed_chunk_waits_for_the_rest_then_removes_the_output() {
        let content: Vec<u8> = (0..100).map(|i| i as u8).collect();
        let mut harness = harness(
            content,
            &["http://a:3000", "http://b:3000"],
            Some("http://b:3000"),
        );
        let path = output_path("failed_chunk");
        let _ = tokio::fs::remove_file(&path).await;
        assert!(
            harness
                .handler
                .download_file("x.txt".to_owned(), path.clone())
                .await
                .is_err()
        );
        // the partial output is cleaned up only after every task reported
        assert!(tokio::fs::metadata(&path).await.is_err());
        let fetches = harness.fetches.lock().await.clone();
        assert!(fetches.contains(&("http://a:3000".to_owned(), 0, 50)));
        // the failing holder exhausted its retries before the verdict
        let failed_attempts = fetches
            .iter()
            .filter(|(hostname, _, _)| hostname == "http://b:3000")
            .count();
        assert_eq!(failed_attempts, 3);
    }

    #[tokio::test]
    async fn no_holders_means_unavailable() {
        let mut harness = harness(vec![1, 2, 3], &[], None);
        let path = output_path("unavailable");
        let _ = tokio::fs::remove_file(&path).await;
        assert!(
            harness
                .handler
                .download_file("x.txt".to_owned(), path.clone())
                .await
                .is_err()
        );
        assert!(harness.fetches.lock().await.is_empty());
        assert!(tokio::fs::metadata(&path).await.is_err());
    }
}
