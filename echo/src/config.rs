use std::time::Duration;

use bytes::Bytes;

/// Baud rate used when nothing else is configured.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default wait for echoed bytes. The unit is milliseconds: 250 ms.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(250);

/// The fixed test payload, 8 ASCII bytes.
pub const DEFAULT_PAYLOAD: &[u8] = b"Testing.";

/// Settings for one echo-test session.
#[derive(Clone, Debug, PartialEq)]
pub struct EchoConfig {
    /// Bit rate configured on the port, in bits per second.
    pub baud_rate: u32,
    /// How long one read-back waits for the echo before returning whatever
    /// has arrived so far. Wall-clock time, millisecond granularity.
    pub read_timeout: Duration,
    /// Bytes written to the port on every iteration.
    pub payload: Bytes,
}

impl EchoConfig {
    pub fn new(baud_rate: u32, read_timeout: Duration, payload: impl Into<Bytes>) -> Self {
        Self {
            baud_rate,
            read_timeout,
            payload: payload.into(),
        }
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
            payload: Bytes::from_static(DEFAULT_PAYLOAD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_test_constants() {
        let config = EchoConfig::default();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.read_timeout, Duration::from_millis(250));
        assert_eq!(&config.payload[..], b"Testing.");
    }

    #[test]
    fn payload_is_eight_ascii_bytes() {
        let config = EchoConfig::default();
        assert_eq!(
            config.payload.as_ref(),
            &[84, 101, 115, 116, 105, 110, 103, 46]
        );
    }

    #[test]
    fn new_accepts_any_payload() {
        let config = EchoConfig::new(9_600, Duration::from_millis(100), &b"ping"[..]);
        assert_eq!(config.baud_rate, 9_600);
        assert_eq!(&config.payload[..], b"ping");
    }
}
