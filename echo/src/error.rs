use std::io;

/// Everything the echo tester can fail with, tagged by the operation that
/// failed so callers can decide whether to log, abort, or try elsewhere.
#[derive(Debug, thiserror::Error)]
pub enum EchoError {
    #[error("failed to open serial port {port}")]
    PortOpen {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },

    #[error("failed to write the test payload to the port")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("echo incomplete before the read timeout: got {received} of {expected} bytes")]
    ReadTimeout { received: usize, expected: usize },

    #[error("failed to read echoed bytes from the port")]
    Read {
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_open_names_the_device() {
        let err = EchoError::PortOpen {
            port: "/dev/doesnotexist".into(),
            source: tokio_serial::Error::new(tokio_serial::ErrorKind::NoDevice, "no such device"),
        };
        assert!(err.to_string().contains("/dev/doesnotexist"));
    }

    #[test]
    fn read_timeout_reports_byte_counts() {
        let err = EchoError::ReadTimeout {
            received: 3,
            expected: 8,
        };
        assert_eq!(
            err.to_string(),
            "echo incomplete before the read timeout: got 3 of 8 bytes"
        );
    }
}
