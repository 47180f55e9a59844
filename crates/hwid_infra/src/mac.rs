use hwid_domain::{ComponentName, DeviceIdComponent, join_sorted};

/// Component that collects hardware addresses straight from the interface
/// tables, without going through the shell session.
///
/// Addresses are rendered as uppercase hex without separators; empty and
/// all-zero addresses (loopback, tunnels) are skipped.
pub struct MacAddressComponent {
    name: ComponentName,
}

impl MacAddressComponent {
    pub fn new() -> Self {
        Self { name: ComponentName::from("MACAddress") }
    }
}

impl Default for MacAddressComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DeviceIdComponent for MacAddressComponent {
    fn name(&self) -> &ComponentName {
        &self.name
    }

    async fn value(&self) -> String {
        let addresses = match mac_address::MacAddressIterator::new() {
            Ok(iter) => iter,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to enumerate network interfaces");
                return String::new();
            }
        };

        let values: Vec<String> = addresses
            .map(|address| address.bytes())
            .filter(|bytes| bytes.iter().any(|b| *b != 0))
            .map(|bytes| format_address(&bytes))
            .collect();

        join_sorted(values)
    }
}

fn format_address(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}
