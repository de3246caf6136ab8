//! Remote control for voxedit - line-delimited JSON commands over TCP
//!
//! Start the server in your app:
//! ```ignore
//! let handler: SharedHandler = Arc::new(Mutex::new(MyHandler::new()));
//! let server = RemoteServer::bind(&RemoteConfig::default(), handler).await?;
//! ```

pub mod protocol;
pub mod server;

pub use protocol::*;
pub use server::{EditHandler, RemoteConfig, RemoteServer, SharedHandler, serve};

/// Default remote server port
pub const DEFAULT_PORT: u16 = 9743;
