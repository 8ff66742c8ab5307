use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Generated code is committed under src/generated/. Set REGEN_PROTO to
    // refresh it after editing a .proto file (requires protoc).
    if std::env::var("REGEN_PROTO").is_err() {
        return Ok(());
    }
    tonic_build::configure()
        .out_dir("src/generated/")
        .build_client(true)
        .build_server(true)
        .compile_protos(
            &["tracker.proto", "node.proto", "torrent_store.proto"],
            &["."],
        )?;
    Ok(())
}
