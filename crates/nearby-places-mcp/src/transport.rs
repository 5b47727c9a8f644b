//! Newline-delimited JSON-RPC over stdio

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::select;
use tokio::signal;

use crate::server::McpServerState;

/// Stdio transport using tokio async I/O.
pub struct StdioTransport {
    reader: BufReader<tokio::io::Stdin>,
    writer: tokio::io::Stdout,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(stdin()),
            writer: stdout(),
        }
    }

    /// Read a single raw message line. Returns Ok(None) on EOF.
    pub async fn read_message(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes = self
            .reader
            .read_line(&mut line)
            .await
            .context("failed to read line")?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    // Map std::io::Result into anyhow::Result while preserving BrokenPipe as io::Error
    fn check_io<T>(res: std::io::Result<T>) -> Result<T> {
        match res {
            Ok(v) => Ok(v),
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "Client disconnected",
            )
            .into()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write_message(&mut self, msg: &Value) -> Result<()> {
        let s = serde_json::to_string(msg)?;

        Self::check_io(self.writer.write_all(s.as_bytes()).await)?;
        Self::check_io(self.writer.write_all(b"\n").await)?;
        Self::check_io(self.writer.flush().await)?;

        Ok(())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|ioe| ioe.kind() == std::io::ErrorKind::BrokenPipe)
        .unwrap_or(false)
}

/// Run the server loop: read messages from stdin and respond on stdout.
pub async fn run_server_loop(mut transport: StdioTransport, server: McpServerState) -> Result<()> {
    server
        .initialize()
        .await
        .context("failed to initialize MCP server state")?;

    tracing::info!("MCP server initialized, waiting for requests...");

    loop {
        select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Received shutdown signal, exiting gracefully");
                break;
            }

            msg = transport.read_message() => {
                match msg {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let Some(response) = server.handle_message(&line).await else {
                            continue;
                        };
                        if let Err(e) = transport.write_message(&response).await {
                            if is_broken_pipe(&e) {
                                tracing::info!("Client disconnected (broken pipe)");
                                break;
                            }
                            return Err(e);
                        }
                    }
                    Ok(None) => {
                        tracing::info!("Client disconnected (EOF)");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Transport error: {}", e);
                        return Err(e);
                    }
                }
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
