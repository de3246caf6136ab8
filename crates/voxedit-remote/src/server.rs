//! TCP command server

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::protocol::{self, EditCommand, EditResponse, ProtocolError};

/// Application side of the protocol: applies one command to the editor.
pub trait EditHandler: Send + Sync + 'static {
    fn handle_command(&mut self, cmd: EditCommand) -> EditResponse;
}

/// Shared handler; commands from all clients are applied one at a time.
pub type SharedHandler = Arc<Mutex<dyn EditHandler>>;

/// Remote server settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Whether the binary starts the TCP command server
    pub enabled: bool,
    /// Port bound on 127.0.0.1 (0 picks a free port)
    pub port: u16,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: crate::DEFAULT_PORT,
        }
    }
}

impl RemoteConfig {
    /// Loopback address the server binds
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], self.port))
    }
}

/// Running server. Dropping it leaves the accept loop running; call
/// `shutdown` to stop it.
pub struct RemoteServer {
    addr: SocketAddr,
    accept_task: tokio::task::JoinHandle<()>,
}

impl RemoteServer {
    /// Bind the configured address and start accepting clients.
    ///
    /// Bind failures are returned to the caller; once bound, the accept loop
    /// runs on the current tokio runtime.
    pub async fn bind(config: &RemoteConfig, handler: SharedHandler) -> io::Result<Self> {
        let listener = TcpListener::bind(config.addr()).await?;
        let addr = listener.local_addr()?;
        log::info!("Remote server listening on {}", addr);

        let accept_task = tokio::spawn(accept_loop(listener, handler));
        Ok(Self { addr, accept_task })
    }

    /// Address actually bound (differs from the config when port 0 was asked)
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting clients. Connections already open finish their
    /// current command and are closed with the runtime.
    pub fn shutdown(self) {
        log::info!("Remote server on {} shutting down", self.addr);
        self.accept_task.abort();
    }
}

async fn accept_loop(listener: TcpListener, handler: SharedHandler) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::warn!("Remote accept failed: {}", e);
                continue;
            }
        };
        log::info!("Remote client {} connected", peer);

        let handler = handler.clone();
        tokio::spawn(async move {
            let (reader, writer) = stream.into_split();
            match serve(BufReader::new(reader), writer, handler).await {
                Ok(commands) => log::info!("Remote client {} left after {} commands", peer, commands),
                Err(e) => log::warn!("Remote client {} dropped: {}", peer, e),
            }
        });
    }
}

/// Answer each command line on `reader` with one response line on `writer`
/// until the stream closes. Blank lines get no response.
///
/// Returns the number of commands answered.
pub async fn serve<R, W>(mut reader: R, mut writer: W, handler: SharedHandler) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    let mut answered = 0;

    while reader.read_line(&mut line).await? > 0 {
        if let Some(response) = respond(&line, &handler).await {
            writer.write_all(protocol::encode_response(&response).as_bytes()).await?;
            writer.flush().await?;
            answered += 1;
        }
        line.clear();
    }

    Ok(answered)
}

async fn respond(line: &str, handler: &SharedHandler) -> Option<EditResponse> {
    match protocol::parse_command(line) {
        Ok(cmd) => {
            log::debug!("Remote command: {:?}", cmd);
            Some(handler.lock().await.handle_command(cmd))
        }
        Err(ProtocolError::Empty) => None,
        Err(e) => {
            log::debug!("Rejected remote line {:?}: {}", line.trim(), e);
            Some(EditResponse::error(e.to_string()))
        }
    }
}
