pub mod blocks;
pub mod config;
pub mod envfile;
pub mod error;
pub mod mirror;
pub mod transport;

pub use blocks::{markdown_to_blocks, Block, MAX_BLOCKS};
pub use config::{Credentials, MirrorConfig};
pub use envfile::{merge_env, write_credentials};
pub use error::MirrorError;
pub use mirror::{Mirror, SyncOutcome};
pub use transport::{HttpResponse, Method, Transport, UreqTransport};
