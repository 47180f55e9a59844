use std::sync::Arc;

use hwid_domain::{DeviceIdComponent, StaticComponent};

use crate::catalog::{CatalogComponent, WmicCatalog};
use crate::mac::MacAddressComponent;
use crate::session::ShellSession;
use crate::shell_component::{
    BOARD_SERIAL_CMD, DRIVE_UUID_HASH_CMD, PROCESSOR_ID_CMD, SYSTEM_UUID_CMD, ShellComponent,
};

/// OS family, detected once. Determines which value source backs each
/// logical attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
    Unsupported,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(unix) {
            Platform::Unix
        } else {
            Platform::Unsupported
        }
    }
}

/// Selects the concrete value source for each logical attribute.
///
/// The factory owns the shared shell session used by every shell-queried
/// component it produces, so the subprocess is created once per factory and
/// torn down when the factory (and all components holding an `Arc` to the
/// session) are gone. On Windows the session is never spawned; queries go
/// through the management catalog instead.
pub struct ComponentFactory {
    platform: Platform,
    session: Arc<ShellSession>,
    catalog: Arc<WmicCatalog>,
}

impl ComponentFactory {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            // Spawns lazily, so constructing this on Windows costs nothing.
            session: Arc::new(ShellSession::new()),
            catalog: Arc::new(WmicCatalog),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn session(&self) -> Arc<ShellSession> {
        Arc::clone(&self.session)
    }

    pub fn mac_address(&self) -> Box<dyn DeviceIdComponent> {
        match self.platform {
            Platform::Windows => {
                self.catalog_component("MACAddress", "Win32_NetworkAdapterConfiguration", "MACAddress")
            }
            _ => Box::new(MacAddressComponent::new()),
        }
    }

    pub fn processor_id(&self) -> Box<dyn DeviceIdComponent> {
        match self.platform {
            Platform::Windows => {
                self.catalog_component("ProcessorId", "Win32_Processor", "ProcessorId")
            }
            Platform::Unix => self.shell_component("ProcessorId", PROCESSOR_ID_CMD),
            Platform::Unsupported => unsupported("ProcessorId"),
        }
    }

    pub fn motherboard_serial(&self) -> Box<dyn DeviceIdComponent> {
        match self.platform {
            Platform::Windows => {
                self.catalog_component("MotherboardSerialNumber", "Win32_BaseBoard", "SerialNumber")
            }
            Platform::Unix => self.shell_component("MotherboardSerialNumber", BOARD_SERIAL_CMD),
            Platform::Unsupported => unsupported("MotherboardSerialNumber"),
        }
    }

    pub fn system_uuid(&self) -> Box<dyn DeviceIdComponent> {
        match self.platform {
            Platform::Windows => {
                self.catalog_component("SystemUUID", "Win32_ComputerSystemProduct", "UUID")
            }
            Platform::Unix => self.shell_component("SystemUUID", SYSTEM_UUID_CMD),
            Platform::Unsupported => unsupported("SystemUUID"),
        }
    }

    /// On Unix this is a stable hash over all block device UUIDs rather
    /// than a literal serial number.
    pub fn system_drive_serial(&self) -> Box<dyn DeviceIdComponent> {
        match self.platform {
            Platform::Windows => {
                self.catalog_component("SystemDriveSerialNumber", "Win32_DiskDrive", "SerialNumber")
            }
            Platform::Unix => {
                self.shell_component("SystemDriveSerialNumber", DRIVE_UUID_HASH_CMD)
            }
            Platform::Unsupported => unsupported("SystemDriveSerialNumber"),
        }
    }

    fn shell_component(&self, name: &str, command: &str) -> Box<dyn DeviceIdComponent> {
        Box::new(ShellComponent::new(name, command, self.session()))
    }

    fn catalog_component(
        &self,
        name: &str,
        class: &str,
        property: &str,
    ) -> Box<dyn DeviceIdComponent> {
        Box::new(CatalogComponent::new(
            name,
            class,
            property,
            Arc::clone(&self.catalog),
        ))
    }
}

impl Default for ComponentFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported(name: &str) -> Box<dyn DeviceIdComponent> {
    tracing::debug!(component = name, "No value source for this platform");
    Box::new(StaticComponent::new(name, ""))
}
