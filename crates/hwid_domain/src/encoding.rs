use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Transform from raw hash bytes to the printable identifier string.
pub trait ByteEncoder: Send + Sync {
    fn encode(&self, bytes: &[u8]) -> String;
}

/// URL-safe base64 without padding, the default output alphabet.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64UrlEncoder;

impl ByteEncoder for Base64UrlEncoder {
    fn encode(&self, bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// Lowercase hexadecimal.
#[derive(Debug, Default, Clone, Copy)]
pub struct HexEncoder;

impl ByteEncoder for HexEncoder {
    fn encode(&self, bytes: &[u8]) -> String {
        hex::encode(bytes)
    }
}

/// Lossy UTF-8 passthrough. Useful for diagnostics and for tests where the
/// digest stage is an identity transform.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextEncoder;

impl ByteEncoder for PlainTextEncoder {
    fn encode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
