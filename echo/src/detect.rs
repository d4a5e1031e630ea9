use tokio_serial::{SerialPortInfo, SerialPortType};

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

/// List the serial ports currently present on the system.
pub fn list_ports() -> Result<Vec<SerialPortInfo>, tokio_serial::Error> {
    let ports = tokio_serial::available_ports()?;
    debug!(count = ports.len(), "enumerated serial ports");
    Ok(ports)
}

/// One line describing a port: its name plus what kind of device backs it.
pub fn describe(port: &SerialPortInfo) -> String {
    match &port.port_type {
        SerialPortType::UsbPort(usb) => {
            let mut line = format!("{} usb {:04x}:{:04x}", port.port_name, usb.vid, usb.pid);
            if let Some(product) = &usb.product {
                line.push(' ');
                line.push_str(product);
            }
            line
        }
        SerialPortType::PciPort => format!("{} pci", port.port_name),
        SerialPortType::BluetoothPort => format!("{} bluetooth", port.port_name),
        SerialPortType::Unknown => format!("{} unknown", port.port_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_labels_unknown_ports() {
        let port = SerialPortInfo {
            port_name: "/dev/ttyS0".into(),
            port_type: SerialPortType::Unknown,
        };
        assert_eq!(describe(&port), "/dev/ttyS0 unknown");
    }

    #[test]
    fn describe_labels_pci_ports() {
        let port = SerialPortInfo {
            port_name: "/dev/ttyS4".into(),
            port_type: SerialPortType::PciPort,
        };
        assert_eq!(describe(&port), "/dev/ttyS4 pci");
    }
}
