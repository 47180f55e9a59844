use std::fmt::Display;

/// Semantic identity of a device attribute (e.g. `MACAddress`).
///
/// Names are the uniqueness key when components are registered: the first
/// component registered under a name wins and later ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn new(value: impl ToString) -> Self {
        ComponentName(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ComponentName {
    fn from(value: String) -> Self {
        ComponentName::new(value)
    }
}

impl From<&str> for ComponentName {
    fn from(value: &str) -> Self {
        ComponentName::new(value)
    }
}

impl Display for ComponentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named provider of one attribute contributing to the device identifier.
///
/// `value` never fails. A source that cannot read its attribute recovers
/// locally and returns an empty string, so callers must tolerate empty
/// segments in the joined identifier. Values are not cached; each call may
/// re-query the underlying system.
#[async_trait::async_trait]
pub trait DeviceIdComponent: Send + Sync {
    fn name(&self) -> &ComponentName;

    async fn value(&self) -> String;
}

/// Component that wraps a value known at construction time, such as the
/// user name or an OS version string.
pub struct StaticComponent {
    name: ComponentName,
    value: String,
}

impl StaticComponent {
    pub fn new(name: impl Into<ComponentName>, value: impl ToString) -> Self {
        Self { name: name.into(), value: value.to_string() }
    }
}

#[async_trait::async_trait]
impl DeviceIdComponent for StaticComponent {
    fn name(&self) -> &ComponentName {
        &self.name
    }

    async fn value(&self) -> String {
        self.value.clone()
    }
}

/// Joins the values of a multi-value source (MAC addresses, management
/// catalog rows) after sorting them lexicographically ascending, so the
/// output does not depend on OS enumeration order.
pub fn join_sorted(mut values: Vec<String>) -> String {
    values.sort();
    values.join(",")
}
