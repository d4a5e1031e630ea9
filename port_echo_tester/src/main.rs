use std::io::Write;

use echo::{EchoConfig, EchoTester};
use tokio_util::sync::CancellationToken;

const USAGE: &str = "Usage: port_echo_tester <port name like: /dev/ttyUSB0>";

/// Exactly one positional argument, the port name. Anything else is a usage
/// error.
fn port_from_args(args: impl Iterator<Item = String>) -> Option<String> {
    let mut args = args.skip(1);
    match (args.next(), args.next()) {
        (Some(port), None) => Some(port),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    let Some(port) = port_from_args(std::env::args()) else {
        println!("{USAGE}");
        std::process::exit(1);
    };

    tracing_subscriber::fmt::init();

    let mut tester =
        EchoTester::open(&port, EchoConfig::default()).expect("Failed to open serial port");

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        ctrl_c_cancel.cancel();
    });

    let mut stdout = std::io::stdout();
    tester
        .run(&cancel, |echoed| {
            stdout.write_all(&echoed).expect("Error while stdout write");
            stdout.write_all(b"\n").expect("Error while stdout write");
            stdout.flush().expect("Error while stdout flush");
        })
        .await
        .expect("Echo loop failed");
}
