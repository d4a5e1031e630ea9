use echo::detect;

fn main() {
    if std::env::args().count() > 1 {
        println!("Usage: port_lister");
        std::process::exit(1);
    }

    tracing_subscriber::fmt::init();

    let ports = detect::list_ports().expect("Failed to list available ports");
    if ports.is_empty() {
        println!("No serial ports found.");
        return;
    }
    for port in &ports {
        println!("{}", detect::describe(port));
    }
}
