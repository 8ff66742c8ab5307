mod add_file_handler;
mod download_file_handler;
mod query_file_handler;

use std::sync::Arc;

use add_file_handler::AddFileHandler;
use download_file_handler::DownloadFileHandler;
use query_file_handler::QueryFileHandler;
use utilities::result::Result;

use crate::{
    node_service::GrpcNodeService, torrent_store_service::GrpcTorrentStoreService,
    tracker_service::GrpcTrackerService,
};

/// Splits a `trackerHost/fileName` torrent record on its last `/`, so the
/// slashes in `http://host:port` stay part of the tracker address.
pub(crate) fn tracker_from_torrent(torrent: &str) -> Result<String> {
    match torrent.rsplit_once('/') {
        Some((tracker_addrs, _file_name)) if !tracker_addrs.is_empty() => {
            Ok(tracker_addrs.to_owned())
        }
        _ => Err(format!("Malformed torrent record : {torrent}").into()),
    }
}

pub struct CommandRunner {
    add_file_handler: AddFileHandler,
    query_file_handler: QueryFileHandler,
    download_file_handler: DownloadFileHandler,
}
impl CommandRunner {
    pub fn new() -> Self {
        CommandRunner {
            add_file_handler: AddFileHandler::new(
                Box::new(GrpcTorrentStoreService),
                Box::new(GrpcTrackerService),
                Arc::new(GrpcNodeService),
            ),
            query_file_handler: QueryFileHandler::new(
                Box::new(GrpcTorrentStoreService),
                Box::new(GrpcTrackerService),
            ),
            download_file_handler: DownloadFileHandler::new(
                Box::new(GrpcTorrentStoreService),
                Box::new(GrpcTrackerService),
                Arc::new(GrpcNodeService),
            ),
        }
    }
    pub async fn handle_input(&mut self, command: &mut str) -> Result<String> {
        match command {
            add_command if add_command.starts_with("add") => {
                let inputs: Vec<&str> = add_command.split_whitespace().collect();
                if inputs.len() < 2 {
                    return Err("Invalid add command usage please use <help> to get help".into());
                }
                return self.add_file_handler.add_file(inputs[1].to_owned()).await;
            }
            query_command if query_command.starts_with("query") => {
                let inputs: Vec<&str> = query_command.split_whitespace().collect();
                if inputs.len() < 2 {
                    return Err("Invalid query command usage please use <help> to get help".into());
                }
                return self.query_file_handler.query_file(inputs[1].to_owned()).await;
            }
            download_command if download_command.starts_with("download") => {
                let inputs: Vec<&str> = download_command.split_whitespace().collect();
                if inputs.len() < 3 {
                    return Err(
                        "Invalid download command usage please use <help> to get help".into(),
                    );
                }
                return self
                    .download_file_handler
                    .download_file(inputs[1].to_owned(), inputs[2].to_owned())
                    .await;
            }
            help_command if help_command == "help\n" => {
                Ok("\nadd command : add local_file_path\nquery command : query remote_file_name\ndownload command : download remote_file_name target_file_path\nquit command : quit\n".to_owned())
            }
            _ => {
                Err(
                    "Invalid Command Please use valid command use :help to list available commands"
                        .into(),
                )
            }
        }
    }
}
