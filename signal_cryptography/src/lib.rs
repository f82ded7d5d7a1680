pub mod zkgroup;

pub use zkgroup::{ServerPublicParams, ZkGroupError};
