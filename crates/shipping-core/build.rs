/// Builds the gRPC client and server code for the `shipping.proto` definition
/// using `tonic-prost-build`.
///
/// The Protocol Buffer definitions located in the `proto` directory are
/// compiled into Rust modules with gRPC bindings in the crate's `OUT_DIR`. An
/// encoded file descriptor set is written next to them so the server can
/// expose gRPC reflection.
///
/// # Files and Paths
///
/// - Proto file: `proto/shipping.proto`
/// - Includes: `proto/`
/// - Descriptor: `$OUT_DIR/shipping_descriptor.bin`
///
/// # Output
///
/// Generated code is included in Rust via:
///
/// ```rust,ignore
/// pub mod proto {
///     tonic::include_proto!("shipping");
/// }
/// ```
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("shipping_descriptor.bin");

    tonic_prost_build::configure()
        .file_descriptor_set_path(&descriptor_path)
        .compile_protos(&["proto/shipping.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/shipping.proto");
    Ok(())
}
