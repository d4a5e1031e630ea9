use std::io;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout_at, Instant};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tokio_util::sync::CancellationToken;

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

use crate::config::EchoConfig;
use crate::error::EchoError;

/// Open the named serial device with the session's baud rate and timeout.
pub fn open_port(port: &str, config: &EchoConfig) -> Result<SerialStream, EchoError> {
    let mut stream = tokio_serial::new(port, config.baud_rate)
        .timeout(config.read_timeout)
        .open_native_async()
        .map_err(|source| EchoError::PortOpen {
            port: port.to_owned(),
            source,
        })?;
    // The handle is the port's only owner for the process lifetime.
    stream
        .set_exclusive(true)
        .map_err(|source| EchoError::PortOpen {
            port: port.to_owned(),
            source,
        })?;
    debug!(port, baud_rate = config.baud_rate, "serial port opened");
    Ok(stream)
}

/// One end of an echo test: writes the configured payload to a port and
/// collects whatever the other end sends back.
#[derive(Debug)]
pub struct EchoTester<S> {
    stream: S,
    config: EchoConfig,
}

impl EchoTester<SerialStream> {
    /// Open `port` and wrap it in a tester.
    pub fn open(port: &str, config: EchoConfig) -> Result<Self, EchoError> {
        let stream = open_port(port, &config)?;
        Ok(Self::from_stream(stream, config))
    }
}

impl<S> EchoTester<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already-open byte stream. The tester only needs something it
    /// can write to and read from, so tests can hand it an in-memory pipe
    /// instead of hardware.
    pub fn from_stream(stream: S, config: EchoConfig) -> Self {
        Self { stream, config }
    }

    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// One iteration: send the payload, then collect up to `payload.len()`
    /// bytes until that many have arrived or the read timeout elapses.
    ///
    /// A short (or empty) result means the timeout hit first, which is
    /// normal for a port with nothing wired to it. An error means the write
    /// failed or the stream itself failed.
    pub async fn echo_once(&mut self) -> Result<Bytes, EchoError> {
        self.stream
            .write_all(&self.config.payload)
            .await
            .map_err(|source| EchoError::Write { source })?;
        trace!(sent = self.config.payload.len(), "payload written");
        self.read_back().await
    }

    /// Like [`echo_once`](Self::echo_once), but demand the whole payload
    /// back. Anything less is [`EchoError::ReadTimeout`].
    pub async fn expect_echo(&mut self) -> Result<Bytes, EchoError> {
        let expected = self.config.payload.len();
        let echoed = self.echo_once().await?;
        if echoed.len() < expected {
            return Err(EchoError::ReadTimeout {
                received: echoed.len(),
                expected,
            });
        }
        Ok(echoed)
    }

    /// Write, read back, report, repeat, until `cancel` fires or the port
    /// faults. Each iteration's echoed bytes (possibly empty) are handed to
    /// `on_echo`.
    ///
    /// The token is checked ahead of every iteration; cancelling while an
    /// iteration is in flight abandons it at its next await point and the
    /// function returns `Ok(())`. Faults end the loop with no retry.
    pub async fn run<F>(
        &mut self,
        cancel: &CancellationToken,
        mut on_echo: F,
    ) -> Result<(), EchoError>
    where
        F: FnMut(Bytes),
    {
        let mut iteration: u64 = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(iteration, "echo loop cancelled");
                    return Ok(());
                }
                echoed = self.echo_once() => {
                    let echoed = echoed?;
                    debug!(iteration, received = echoed.len(), "echo iteration finished");
                    on_echo(echoed);
                    iteration += 1;
                }
            }
        }
    }

    async fn read_back(&mut self) -> Result<Bytes, EchoError> {
        let expected = self.config.payload.len();
        let deadline = Instant::now() + self.config.read_timeout;
        let mut buf = BytesMut::zeroed(expected);
        let mut filled = 0;
        while filled < expected {
            match timeout_at(deadline, self.stream.read(&mut buf[filled..])).await {
                // Timeout: report whatever made it back so far.
                Err(_) => break,
                Ok(Ok(0)) => {
                    return Err(EchoError::Read {
                        source: io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "serial port closed while waiting for the echo",
                        ),
                    })
                }
                Ok(Ok(count)) => filled += count,
                Ok(Err(source)) => return Err(EchoError::Read { source }),
            }
        }
        buf.truncate(filled);
        Ok(buf.freeze())
    }
}
