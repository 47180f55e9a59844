use std::sync::Arc;

use hwid_domain::{ComponentName, DeviceIdComponent};

use crate::session::ShellSession;

/// Command lines issued verbatim to the interpreter, one per logical
/// attribute.
pub const BOARD_SERIAL_CMD: &str = "cat /sys/class/dmi/id/board_serial";
pub const SYSTEM_UUID_CMD: &str = "cat /sys/class/dmi/id/product_uuid";
pub const PROCESSOR_ID_CMD: &str =
    "dmidecode -t 4 | grep ID |sort -u |awk -F': ' '{print $2}'|xargs |sed 's/ //g'";
pub const DRIVE_UUID_HASH_CMD: &str =
    r#"blkid | grep -oP 'UUID="\K[^"]+' | sha256sum | awk '{print $1}'"#;

/// Component that reads one attribute through the shared shell session.
///
/// The session is owned by the platform factory, not by any component;
/// this component only borrows it for the duration of each query.
pub struct ShellComponent {
    name: ComponentName,
    command: String,
    session: Arc<ShellSession>,
}

impl ShellComponent {
    pub fn new(
        name: impl Into<ComponentName>,
        command: impl ToString,
        session: Arc<ShellSession>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.to_string(),
            session,
        }
    }
}

#[async_trait::async_trait]
impl DeviceIdComponent for ShellComponent {
    fn name(&self) -> &ComponentName {
        &self.name
    }

    async fn value(&self) -> String {
        let line = self.session.run_command(&self.command).await;
        strip_noise(&line)
    }
}

/// Spaces and hyphens vary between firmware renderings of the same value,
/// so they never contribute to the identifier.
fn strip_noise(line: &str) -> String {
    line.chars().filter(|c| *c != ' ' && *c != '-').collect()
}
