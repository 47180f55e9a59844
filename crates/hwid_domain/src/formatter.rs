use crate::component::DeviceIdComponent;
use crate::encoding::{Base64UrlEncoder, ByteEncoder};
use crate::hash::{Hasher, Sha256Hasher};

/// Strategy that orders, joins and renders the component values into the
/// final identifier string.
#[async_trait::async_trait]
pub trait DeviceIdFormatter: Send + Sync {
    async fn format(&self, components: Vec<&dyn DeviceIdComponent>) -> String;
}

/// Sorts components ascending by name, retrieves their values in that order
/// and joins them with `,`. Embedded commas in a value are not escaped.
///
/// The sort makes the output invariant under the order components were
/// registered in; it is not invariant if a component itself is
/// non-deterministic.
async fn joined_values(mut components: Vec<&dyn DeviceIdComponent>) -> String {
    components.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));

    let mut values = Vec::with_capacity(components.len());
    for component in components {
        values.push(component.value().await);
    }

    values.join(",")
}

/// Hashes the joined component values and encodes the digest.
pub struct HashFormatter {
    hasher: Box<dyn Hasher>,
    encoder: Box<dyn ByteEncoder>,
}

impl HashFormatter {
    pub fn new(hasher: impl Hasher + 'static, encoder: impl ByteEncoder + 'static) -> Self {
        Self { hasher: Box::new(hasher), encoder: Box::new(encoder) }
    }
}

impl Default for HashFormatter {
    /// SHA-256 digest rendered as URL-safe base64 without padding.
    fn default() -> Self {
        Self::new(Sha256Hasher, Base64UrlEncoder)
    }
}

#[async_trait::async_trait]
impl DeviceIdFormatter for HashFormatter {
    async fn format(&self, components: Vec<&dyn DeviceIdComponent>) -> String {
        let joined = joined_values(components).await;
        self.encoder.encode(&self.hasher.digest(joined.as_bytes()))
    }
}

/// Like [`HashFormatter`], but the digest covers the joined values combined
/// with a caller-supplied salt, so two deployments with different salts
/// produce unrelated identifiers for the same machine.
pub struct SaltedHashFormatter {
    salt: String,
    hasher: Box<dyn Hasher>,
    encoder: Box<dyn ByteEncoder>,
}

impl SaltedHashFormatter {
    pub fn new(
        salt: impl ToString,
        hasher: impl Hasher + 'static,
        encoder: impl ByteEncoder + 'static,
    ) -> Self {
        Self {
            salt: salt.to_string(),
            hasher: Box::new(hasher),
            encoder: Box::new(encoder),
        }
    }
}

#[async_trait::async_trait]
impl DeviceIdFormatter for SaltedHashFormatter {
    async fn format(&self, components: Vec<&dyn DeviceIdComponent>) -> String {
        let mut data = joined_values(components).await.into_bytes();
        data.extend_from_slice(self.salt.as_bytes());
        self.encoder.encode(&self.hasher.digest(&data))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::component::StaticComponent;
    use crate::encoding::PlainTextEncoder;

    struct IdentityHasher;

    impl Hasher for IdentityHasher {
        fn digest(&self, data: &[u8]) -> Vec<u8> {
            data.to_vec()
        }
    }

    #[tokio::test]
    async fn test_hash_formatter_orders_by_name() {
        let y = StaticComponent::new("Y", "2");
        let x = StaticComponent::new("X", "1");
        let fixture = HashFormatter::new(IdentityHasher, PlainTextEncoder);

        // Registered Y before X; output must still be sorted by name.
        let actual = fixture.format(vec![&y, &x]).await;
        let expected = "1,2".to_string();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_salted_formatter_appends_salt() {
        let x = StaticComponent::new("X", "1");
        let fixture = SaltedHashFormatter::new("pepper", IdentityHasher, PlainTextEncoder);

        let actual = fixture.format(vec![&x]).await;
        let expected = "1pepper".to_string();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_default_formatter_is_url_safe() {
        let x = StaticComponent::new("X", "1");
        let fixture = HashFormatter::default();

        let actual = fixture.format(vec![&x]).await;

        // 32 digest bytes render to 43 unpadded base64 characters.
        assert_eq!(actual.len(), 43);
        assert!(
            actual
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[tokio::test]
    async fn test_salted_and_unsalted_differ() {
        let x = StaticComponent::new("X", "1");
        let unsalted = HashFormatter::default();
        let salted = SaltedHashFormatter::new("pepper", Sha256Hasher, Base64UrlEncoder);

        let actual = salted.format(vec![&x]).await;
        let expected = unsalted.format(vec![&x]).await;

        assert_ne!(actual, expected);
    }
}
