/// One (file name, size) entry in a node's holdings. Entries are appended,
/// never removed or updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFile {
    pub file_name: String,
    pub file_size: u64,
}

#[derive(Debug, Clone)]
pub struct NodeDetail {
    pub hostname: String,
    files: Vec<NodeFile>,
}

impl NodeDetail {
    pub fn new(hostname: String) -> Self {
        Self {
            hostname,
            files: vec![],
        }
    }
    pub fn has_file(&self, file_name: &str) -> bool {
        self.files.iter().any(|f| f.file_name == file_name)
    }
    pub fn add_file(&mut self, file_name: &str, file_size: u64) {
        if !self.has_file(file_name) {
            self.files.push(NodeFile {
                file_name: file_name.to_owned(),
                file_size,
            });
        }
    }
    pub fn files(&self) -> &[NodeFile] {
        &self.files
    }
}
