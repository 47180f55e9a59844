use std::sync::Arc;

use hwid_domain::{ComponentName, DeviceIdComponent, join_sorted};

/// Boundary to the host's management attribute database (WMI on Windows).
/// A (class, property) pair resolves to zero or more string values; an
/// empty result is a valid answer, never an error.
#[async_trait::async_trait]
pub trait ManagementCatalog: Send + Sync {
    async fn query(&self, class: &str, property: &str) -> Vec<String>;
}

/// Component that reads one property of one management class and joins all
/// matching values, sorted ascending.
pub struct CatalogComponent<C> {
    name: ComponentName,
    class: String,
    property: String,
    catalog: Arc<C>,
}

impl<C: ManagementCatalog> CatalogComponent<C> {
    pub fn new(
        name: impl Into<ComponentName>,
        class: impl ToString,
        property: impl ToString,
        catalog: Arc<C>,
    ) -> Self {
        Self {
            name: name.into(),
            class: class.to_string(),
            property: property.to_string(),
            catalog,
        }
    }
}

#[async_trait::async_trait]
impl<C: ManagementCatalog + 'static> DeviceIdComponent for CatalogComponent<C> {
    fn name(&self) -> &ComponentName {
        &self.name
    }

    async fn value(&self) -> String {
        join_sorted(self.catalog.query(&self.class, &self.property).await)
    }
}

/// Default catalog implementation: one-shot `wmic` invocations. Only
/// functional on Windows; elsewhere every query resolves to no values.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmicCatalog;

#[async_trait::async_trait]
impl ManagementCatalog for WmicCatalog {
    async fn query(&self, class: &str, property: &str) -> Vec<String> {
        #[cfg(windows)]
        {
            let output = tokio::process::Command::new("wmic")
                .arg("path")
                .arg(class)
                .arg("get")
                .arg(property)
                .output()
                .await;

            let output = match output {
                Ok(output) => output,
                Err(err) => {
                    tracing::warn!(class, property, error = %err, "Management catalog query failed");
                    return Vec::new();
                }
            };

            let text = String::from_utf8_lossy(&output.stdout);
            text.lines()
                .skip(1) // header row repeats the property name
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect()
        }
        #[cfg(not(windows))]
        {
            tracing::debug!(class, property, "Management catalog requires Windows");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct MockCatalog {
        values: Vec<String>,
    }

    #[async_trait::async_trait]
    impl ManagementCatalog for MockCatalog {
        async fn query(&self, class: &str, property: &str) -> Vec<String> {
            assert_eq!(class, "Win32_NetworkAdapterConfiguration");
            assert_eq!(property, "MACAddress");
            self.values.clone()
        }
    }

    #[tokio::test]
    async fn test_catalog_component_sorts_and_joins() {
        let catalog = Arc::new(MockCatalog {
            values: vec!["b".to_string(), "a".to_string(), "c".to_string()],
        });
        let fixture = CatalogComponent::new(
            "MACAddress",
            "Win32_NetworkAdapterConfiguration",
            "MACAddress",
            catalog,
        );

        let actual = fixture.value().await;
        let expected = "a,b,c".to_string();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_empty_catalog_result_is_empty_value() {
        let catalog = Arc::new(MockCatalog { values: Vec::new() });
        let fixture = CatalogComponent::new(
            "MACAddress",
            "Win32_NetworkAdapterConfiguration",
            "MACAddress",
            catalog,
        );

        let actual = fixture.value().await;

        assert_eq!(actual, "");
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_wmic_catalog_is_inert_off_windows() {
        let fixture = WmicCatalog;

        let actual = fixture.query("Win32_Processor", "ProcessorId").await;

        assert!(actual.is_empty());
    }
}
