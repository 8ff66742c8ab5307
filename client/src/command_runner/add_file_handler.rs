use std::path::Path;
use std::sync::Arc;

use utilities::{
    logger::{Instrument, error, info, instrument, trace, tracing},
    result::Result,
    retry_policy::retry_with_backoff,
};

use crate::{
    node_service::NodeService, torrent_store_service::TorrentStoreService,
    tracker_service::TrackerService,
};

pub struct AddFileHandler {
    torrent_store: Box<dyn TorrentStoreService + Send + Sync>,
    tracker: Box<dyn TrackerService + Send + Sync>,
    node: Arc<dyn NodeService + Send + Sync>,
}
impl AddFileHandler {
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
    pub async fn add_file(&mut self, local_file_path: String) -> Result<String> {
        let file_name = match Path::new(&local_file_path).file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                return Err(format!("Provided path ({local_file_path}) has no file name").into());
            }
        };
        trace!("Fetching file metadata");
        let file_metadata = match tokio::fs::metadata(&local_file_path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                return Err(format!("Error while reading file metadata : {e:?}").into());
            }
        };
        if file_metadata.is_dir() {
            return Err(format!("Provided file path ({local_file_path}) is dir").into());
        }
        let tracker_addrs = self.torrent_store.locate_tracker().await?;
        trace!(%tracker_addrs, "located tracker");
        let Some((target1, target2)) = self
            .tracker
            .select_upload_targets(&tracker_addrs, &file_name)
            .await?
        else {
            return Err(format!(
                "Tracker has no eligible node pair to receive {file_name}"
            )
            .into());
        };
        info!(%target1, %target2, "got upload targets");
        // the file is read once and the same bytes go to both targets
        let content = tokio::fs::read(&local_file_path)
            .await
            .map_err(|e| format!("Error while reading {local_file_path} : {e}"))?;
        let mut handles = vec![];
        for target in [target1, target2] {
            let node = self.node.clone();
            let file_name = file_name.clone();
            let content = content.clone();
            handles.push(tokio::spawn(
                async move {
                    retry_with_backoff(
                        || async {
                            node.store_file(&target, &file_name, content.clone()).await
                        },
                        3,
                    )
                    .await
                }
                .in_current_span(),
            ));
        }
        let mut failure = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error=%e,"one file store failed");
                    failure.get_or_insert(e);
                }
                Err(e) => {
                    error!("Error during file store {e:?}");
                    failure.get_or_insert(format!("Error in one handler {e:?}").into());
                }
            }
        }
        // the torrent is recorded even after a failed push, so a single
        // surviving copy stays reachable instead of silently hidden
        let created = self.torrent_store.create_torrent(&file_name).await;
        if let Some(e) = failure {
            return Err(e);
        }
        if !created? {
            return Err(format!("Torrent store refused to create a torrent for {file_name}").into());
        }
        Ok(format!("File {file_name} added successfully"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::command_runner::test_support::{MockNode, MockTorrentStore};

    struct MockTracker {
        upload_targets: Option<(String, String)>,
    }

    #[async_trait]
    impl TrackerService for MockTracker {
        async fn select_upload_targets(
            &self,
            _tracker_addrs: &str,
            _file_name: &str,
        ) -> Result<Option<(String, String)>> {
            Ok(self.upload_targets.clone())
        }
        async fn query(
            &self,
            _tracker_addrs: &str,
            _file_name: &str,
            _want_node_list: bool,
        ) -> Result<proto::generated::tracker::QueryResponse> {
            unreachable!("add never queries the tracker")
        }
    }

    struct Harness {
        handler: AddFileHandler,
        stores: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
        torrents: Arc<Mutex<Vec<String>>>,
        fail_store: Arc<AtomicBool>,
    }

    fn harness(upload_targets: Option<(&str, &str)>) -> Harness {
        let stores = Arc::new(Mutex::new(Vec::new()));
        let torrents = Arc::new(Mutex::new(Vec::new()));
        let fail_store = Arc::new(AtomicBool::new(false));
        let node = MockNode {
            stores: stores.clone(),
            fail_store: fail_store.clone(),
            fetches: Arc::new(Mutex::new(Vec::new())),
            content: vec![],
            fail_fetch_from: None,
        };
        let torrent_store = MockTorrentStore {
            torrents: torrents.clone(),
            torrent: None,
        };
        let tracker = MockTracker {
            upload_targets: upload_targets
                .map(|(a, b)| (a.to_owned(), b.to_owned())),
        };
        Harness {
            handler: AddFileHandler::new(
                Box::new(torrent_store),
                Box::new(tracker),
                Arc::new(node),
            ),
            stores,
            torrents,
            fail_store,
        }
    }

    async fn local_file(test_name: &str, content: &[u8]) -> String {
        let path = std::env::temp_dir()
            .join(format!("add_file_{}_{}", test_name, std::process::id()))
            .to_str()
            .unwrap()
            .to_owned();
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn pushes_the_same_bytes_to_both_targets_and_records_the_torrent() {
        let mut harness = harness(Some(("http://a:3000", "http://b:3000")));
        let path = local_file("both_targets", b"payload").await;
        harness.handler.add_file(path.clone()).await.unwrap();
        let mut stores = harness.stores.lock().await.clone();
        stores.sort();
        let file_name = Path::new(&path).file_name().unwrap().to_str().unwrap();
        assert_eq!(
            stores,
            [
                ("http://a:3000".to_owned(), file_name.to_owned(), b"payload".to_vec()),
                ("http://b:3000".to_owned(), file_name.to_owned(), b"payload".to_vec()),
            ]
        );
        assert_eq!(harness.torrents.lock().await.clone(), [file_name.to_owned()]);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn empty_pair_aborts_before_contacting_any_node() {
        let mut harness = harness(None);
        let path = local_file("empty_pair", b"payload").await;
        assert!(harness.handler.add_file(path.clone()).await.is_err());
        assert!(harness.stores.lock().await.is_empty());
        assert!(harness.torrents.lock().await.is_empty());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn failed_store_is_reported_but_the_torrent_is_still_recorded() {
        let mut harness = harness(Some(("http://a:3000", "http://b:3000")));
        harness.fail_store.store(true, Ordering::SeqCst);
        let path = local_file("failed_store", b"payload").await;
        assert!(harness.handler.add_file(path.clone()).await.is_err());
        assert_eq!(harness.torrents.lock().await.len(), 1);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
