#![doc = include_str!("../README.md")]

pub mod constants;
pub mod error;
pub mod time;

pub use error::Error;

/// Generated protobuf/gRPC types for the `taskfarm` package.
pub mod proto {
    tonic::include_proto!("taskfarm");

    /// Encoded `FileDescriptorSet` for the `taskfarm` package, for tools
    /// that want gRPC server reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        include_bytes!(concat!(env!("OUT_DIR"), "/taskfarm_descriptor.bin"));
}
