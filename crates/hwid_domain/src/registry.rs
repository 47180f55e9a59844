use indexmap::IndexMap;

use crate::component::{ComponentName, DeviceIdComponent};
use crate::error::{Error, Result};
use crate::formatter::DeviceIdFormatter;

/// Collection of value sources keyed by name, plus the formatter that turns
/// them into the final identifier.
///
/// Components are owned by the registry and released with it; the shell
/// session backing shell-queried components is owned elsewhere and only
/// referenced here.
#[derive(Default)]
pub struct ComponentRegistry {
    formatter: Option<Box<dyn DeviceIdFormatter>>,
    components: IndexMap<ComponentName, Box<dyn DeviceIdComponent>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component. First registration wins: a later component
    /// with a name already present is silently ignored.
    pub fn add_component(&mut self, component: Box<dyn DeviceIdComponent>) {
        let name = component.name().clone();
        self.components.entry(name).or_insert(component);
    }

    /// Replaces the active formatter. Not validated until [`Self::device_id`]
    /// is called.
    pub fn use_formatter(&mut self, formatter: Box<dyn DeviceIdFormatter>) {
        self.formatter = Some(formatter);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Computes the identifier from the current component set. Recomputed on
    /// every call; nothing is cached.
    pub async fn device_id(&self) -> Result<String> {
        let formatter = self.formatter.as_ref().ok_or(Error::MissingFormatter)?;

        let components: Vec<&dyn DeviceIdComponent> =
            self.components.values().map(|c| c.as_ref()).collect();

        Ok(formatter.format(components).await)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::component::StaticComponent;
    use crate::encoding::PlainTextEncoder;
    use crate::formatter::HashFormatter;
    use crate::hash::Hasher;

    struct IdentityHasher;

    impl Hasher for IdentityHasher {
        fn digest(&self, data: &[u8]) -> Vec<u8> {
            data.to_vec()
        }
    }

    fn plain_formatter() -> Box<dyn DeviceIdFormatter> {
        Box::new(HashFormatter::new(IdentityHasher, PlainTextEncoder))
    }

    #[tokio::test]
    async fn test_duplicate_name_keeps_first() {
        let mut fixture = ComponentRegistry::new();
        fixture.use_formatter(plain_formatter());
        fixture.add_component(Box::new(StaticComponent::new("X", "first")));
        fixture.add_component(Box::new(StaticComponent::new("X", "second")));

        let actual = fixture.device_id().await.unwrap();
        let expected = "first".to_string();

        assert_eq!(fixture.len(), 1);
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_missing_formatter_fails() {
        let mut fixture = ComponentRegistry::new();
        fixture.add_component(Box::new(StaticComponent::new("X", "1")));

        let actual = fixture.device_id().await;

        assert!(matches!(actual, Err(Error::MissingFormatter)));
    }

    #[tokio::test]
    async fn test_end_to_end_two_static_components() {
        let mut fixture = ComponentRegistry::new();
        fixture.use_formatter(plain_formatter());
        fixture.add_component(Box::new(StaticComponent::new("X", "1")));
        fixture.add_component(Box::new(StaticComponent::new("Y", "2")));

        let actual = fixture.device_id().await.unwrap();
        let expected = "1,2".to_string();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_identifier_invariant_under_registration_order() {
        let mut forward = ComponentRegistry::new();
        forward.use_formatter(Box::new(HashFormatter::default()));
        forward.add_component(Box::new(StaticComponent::new("A", "1")));
        forward.add_component(Box::new(StaticComponent::new("B", "2")));
        forward.add_component(Box::new(StaticComponent::new("C", "3")));

        let mut reverse = ComponentRegistry::new();
        reverse.use_formatter(Box::new(HashFormatter::default()));
        reverse.add_component(Box::new(StaticComponent::new("C", "3")));
        reverse.add_component(Box::new(StaticComponent::new("B", "2")));
        reverse.add_component(Box::new(StaticComponent::new("A", "1")));

        let actual = forward.device_id().await.unwrap();
        let expected = reverse.device_id().await.unwrap();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_empty_value_contributes_empty_segment() {
        let mut fixture = ComponentRegistry::new();
        fixture.use_formatter(plain_formatter());
        fixture.add_component(Box::new(StaticComponent::new("A", "1")));
        fixture.add_component(Box::new(StaticComponent::new("B", "")));
        fixture.add_component(Box::new(StaticComponent::new("C", "3")));

        let actual = fixture.device_id().await.unwrap();
        let expected = "1,,3".to_string();

        assert_eq!(actual, expected);
    }
}
