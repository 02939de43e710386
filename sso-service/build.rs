fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Locate a protoc binary. The build environment does not ship one, so
    // fall back to the vendored binary when PROTOC is not already set.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }

    // Generate gRPC code from proto files; the client is used by the
    // integration test suite
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/auth.proto"], &["../proto"])?;

    Ok(())
}
