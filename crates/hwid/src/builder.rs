use std::path::PathBuf;

use hwid_domain::{
    ComponentRegistry, DeviceIdComponent, DeviceIdFormatter, HashFormatter, StaticComponent,
};
use hwid_infra::{ComponentFactory, FileTokenComponent, Platform};

/// Fluent builder for a device identifier.
///
/// Platform-appropriate value sources are selected automatically through a
/// [`ComponentFactory`]; the kernel/firmware attributes go through one
/// shared shell session on Unix and the management catalog on Windows.
/// Adding a component whose name is already registered is a no-op, so the
/// same logical attribute is never counted twice.
///
/// The default formatter hashes with SHA-256 and encodes as URL-safe base64
/// without padding; [`Self::use_formatter`] replaces it.
pub struct HwidBuilder {
    factory: ComponentFactory,
    registry: ComponentRegistry,
}

impl HwidBuilder {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Mainly for tests; production callers want [`Self::new`].
    pub fn for_platform(platform: Platform) -> Self {
        let mut registry = ComponentRegistry::new();
        registry.use_formatter(Box::new(HashFormatter::default()));

        Self {
            factory: ComponentFactory::for_platform(platform),
            registry,
        }
    }

    /// Registers a custom component. First registration of a name wins.
    pub fn add_component(mut self, component: Box<dyn DeviceIdComponent>) -> Self {
        self.registry.add_component(component);
        self
    }

    /// Replaces the formatter used to render the identifier.
    pub fn use_formatter(mut self, formatter: Box<dyn DeviceIdFormatter>) -> Self {
        self.registry.use_formatter(formatter);
        self
    }

    /// Adds the current user name.
    pub fn add_user_name(self) -> Self {
        let value = whoami::username();
        self.add_component(Box::new(StaticComponent::new("UserName", value)))
    }

    /// Adds the host name.
    pub fn add_machine_name(self) -> Self {
        let value = sysinfo::System::host_name().unwrap_or_default();
        self.add_component(Box::new(StaticComponent::new("MachineName", value)))
    }

    /// Adds the OS name and version string.
    pub fn add_os_version(self) -> Self {
        let value = sysinfo::System::long_os_version().unwrap_or_default();
        self.add_component(Box::new(StaticComponent::new("OSVersion", value)))
    }

    /// Adds all non-zero hardware addresses, sorted and comma-joined.
    pub fn add_mac_address(mut self) -> Self {
        let component = self.factory.mac_address();
        self.registry.add_component(component);
        self
    }

    /// Adds the processor identifier.
    pub fn add_processor_id(mut self) -> Self {
        let component = self.factory.processor_id();
        self.registry.add_component(component);
        self
    }

    /// Adds the motherboard serial number.
    pub fn add_motherboard_serial(mut self) -> Self {
        let component = self.factory.motherboard_serial();
        self.registry.add_component(component);
        self
    }

    /// Adds the firmware system UUID.
    pub fn add_system_uuid(mut self) -> Self {
        let component = self.factory.system_uuid();
        self.registry.add_component(component);
        self
    }

    /// Adds the system drive identifier.
    pub fn add_system_drive_serial(mut self) -> Self {
        let component = self.factory.system_drive_serial();
        self.registry.add_component(component);
        self
    }

    /// Adds a random token persisted at `path`. See [`FileTokenComponent`]
    /// for the stability caveat when the path is not writable.
    pub fn add_file_token(self, path: impl Into<PathBuf>) -> Self {
        self.add_component(Box::new(FileTokenComponent::new(path)))
    }

    /// Computes the identifier from the registered components. Each call
    /// re-queries every source; nothing is cached.
    pub async fn build(&self) -> anyhow::Result<String> {
        Ok(self.registry.device_id().await?)
    }
}

impl Default for HwidBuilder {
    fn default() -> Self {
        Self::new()
    }
}
