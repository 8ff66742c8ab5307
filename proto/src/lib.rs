pub mod generated {
    pub mod tracker {
        include!("./generated/tracker.rs");
    }
    pub mod node {
        include!("./generated/node.rs");
    }
    pub mod torrent_store {
        include!("./generated/torrent_store.rs");
    }
}
