//! Stable, semi-unique machine identifiers.
//!
//! A device identifier is derived from a set of named hardware/OS
//! attributes ("components") whose values are ordered deterministically,
//! joined, hashed and encoded into one opaque string. Typical uses are
//! licensing, anti-fraud and installation binding.
//!
//! ```no_run
//! use hwid::HwidBuilder;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let id = HwidBuilder::new()
//!     .add_machine_name()
//!     .add_mac_address()
//!     .add_system_uuid()
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::*;
pub use hwid_domain::{
    Base64UrlEncoder, ByteEncoder, ComponentName, ComponentRegistry, DeviceIdComponent,
    DeviceIdFormatter, Error, HashFormatter, Hasher, HexEncoder, PlainTextEncoder,
    SaltedHashFormatter, Sha256Hasher, StaticComponent,
};
pub use hwid_infra::{
    ComponentFactory, FileTokenComponent, ManagementCatalog, Platform, ShellSession,
};
