use echo::tester::open_port;
use echo::EchoConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const USAGE: &str = "Usage: port_echo_responder <port name like: /dev/ttyUSB0>";

fn port_from_args(args: impl Iterator<Item = String>) -> Option<String> {
    let mut args = args.skip(1);
    match (args.next(), args.next()) {
        (Some(port), None) => Some(port),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    let Some(port_name) = port_from_args(std::env::args()) else {
        println!("{USAGE}");
        std::process::exit(1);
    };

    tracing_subscriber::fmt::init();

    let mut port =
        open_port(&port_name, &EchoConfig::default()).expect("Failed to open serial port");
    eprintln!("Echoing everything received on {port_name}...");

    let mut buf = [0; 1024];
    loop {
        let count = port.read(&mut buf).await.expect("Error while port read");
        if count == 0 {
            eprintln!("Port closed, exiting.");
            break;
        }
        port.write_all(&buf[..count])
            .await
            .expect("Error while port write");
        port.flush().await.expect("Error while port flush");
    }
}

#[cfg(test)]
mod tests {
    use super::port_from_args;

    #[test]
    fn exactly_one_argument_is_required() {
        let none: Vec<String> = vec!["port_echo_responder".into()];
        assert!(port_from_args(none.into_iter()).is_none());

        let one: Vec<String> = vec!["port_echo_responder".into(), "/dev/ttyUSB1".into()];
        assert_eq!(port_from_args(one.into_iter()).as_deref(), Some("/dev/ttyUSB1"));
    }
}
