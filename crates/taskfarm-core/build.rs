//! Compiles `proto/taskfarm.proto` into the `Dispatch` client/server stubs
//! and the `TaskRequest`/`TaskReply` message types used across the
//! dispatcher, worker, and launcher crates.

use std::env;
use std::path::PathBuf;

fn main() {
    if env::var_os("PROTOC").is_none() {
        if let Ok(protoc_path) = protoc_bin_vendored::protoc_bin_path() {
            unsafe {
                env::set_var("PROTOC", protoc_path);
            }
        }
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("taskfarm_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/taskfarm.proto"], &["proto"])
        .expect("failed to compile taskfarm.proto");
}
