use crate::helpers::send_response;
use log::{debug, warn};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Write end of a negotiated data connection.
pub type DataChannel = Box<dyn AsyncWrite + Send + Sync + Unpin>;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("no data connection")]
    NoDataConnection,

    /// The control channel failed while announcing the transfer.
    #[error("control channel: {0}")]
    Control(#[from] std::io::Error),
}

/// Per-connection state. Owned by the task serving that connection.
pub struct Session {
    current_dir: String,
    data_channel: Option<DataChannel>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            current_dir: String::from("/"),
            data_channel: None,
        }
    }

    /// Current working directory: absolute, no trailing slash except for "/".
    pub fn path(&self) -> &str {
        &self.current_dir
    }

    pub fn set_path(&mut self, path: String) {
        debug!("Session path: {} -> {}", self.current_dir, path);
        self.current_dir = path;
    }

    /// Hands the session a data connection for the next transfer.
    ///
    /// The `rouillenav` binary ships no data-channel provider (no PASV or
    /// PORT), so nothing calls this outside tests and LIST there always ends
    /// in 425. An embedder that negotiates data connections plugs in here.
    #[allow(dead_code)]
    pub fn attach_data_channel(&mut self, channel: DataChannel) {
        self.data_channel = Some(channel);
    }

    pub fn has_data_channel(&self) -> bool {
        self.data_channel.is_some()
    }

    /// Announces the transfer on the control channel and returns the data sink.
    pub async fn transfer_open<W>(&mut self, writer: &mut W) -> Result<&mut DataChannel, TransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        if self.data_channel.is_none() {
            return Err(TransferError::NoDataConnection);
        }
        send_response(writer, 150, "Using transfer connection").await?;
        self.data_channel
            .as_mut()
            .ok_or(TransferError::NoDataConnection)
    }

    /// Shuts the data connection down and forgets it.
    pub async fn transfer_close(&mut self) {
        if let Some(mut channel) = self.data_channel.take() {
            if let Err(e) = channel.shutdown().await {
                warn!("Failed to shutdown data stream: {:?}", e);
            }
        }
    }
}
