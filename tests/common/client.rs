//! Test console client.
//!
//! Spawns a console on in-memory pipes and lets a test send lines and
//! assert on the replies.

use botcmd::config::Config;
use botcmd::console::{self, Console};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter, DuplexStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::codec::LinesCodecError;

/// A test console client.
pub struct TestClient {
    reader: BufReader<DuplexStream>,
    writer: BufWriter<DuplexStream>,
    task: JoinHandle<Result<(), LinesCodecError>>,
}

impl TestClient {
    /// Spawn a console with the builtin commands and `config`.
    pub fn spawn(config: &Config) -> anyhow::Result<Self> {
        let dispatcher = console::shared_dispatcher(config)?;
        let console = Console::new(dispatcher, "tester");

        let (client_in, server_in) = tokio::io::duplex(16 * 1024);
        let (server_out, client_out) = tokio::io::duplex(16 * 1024);
        let task = tokio::spawn(async move { console.run(server_in, server_out).await });

        Ok(Self {
            reader: BufReader::new(client_out),
            writer: BufWriter::new(client_in),
            task,
        })
    }

    /// Send one line of input.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single reply line.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a reply line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("console output closed");
        }
        Ok(line.trim_end().to_string())
    }

    /// Send a line and wait for its first reply.
    pub async fn command(&mut self, line: &str) -> anyhow::Result<String> {
        self.send(line).await?;
        self.recv().await
    }

    /// Close the input and collect every remaining reply.
    pub async fn finish(mut self) -> anyhow::Result<Vec<String>> {
        self.writer.shutdown().await?;
        let mut rest = Vec::new();
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                break;
            }
            rest.push(line.trim_end().to_string());
        }
        self.task.await??;
        Ok(rest)
    }
}
