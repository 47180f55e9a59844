use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hwid_domain::{ComponentName, DeviceIdComponent};
use uuid::Uuid;

/// Component backed by a token file.
///
/// The first call generates a random 128-bit token, persists it at the
/// configured path and returns it; later calls read the file back. If the
/// path never becomes writable the token cannot stick and every call
/// produces a fresh value, silently breaking stability. That degradation is
/// accepted and surfaces only as a warning log.
pub struct FileTokenComponent {
    name: ComponentName,
    path: PathBuf,
}

impl FileTokenComponent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = ComponentName::from(format!("FileToken{:x}", path_hash(&path)));
        Self { name, path }
    }
}

fn path_hash(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}

/// Uppercase hyphenless rendering of a random 128-bit identifier.
fn fresh_token() -> String {
    Uuid::new_v4().simple().to_string().to_uppercase()
}

#[async_trait::async_trait]
impl DeviceIdComponent for FileTokenComponent {
    fn name(&self) -> &ComponentName {
        &self.name
    }

    async fn value(&self) -> String {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let token = fresh_token();
                if let Err(err) = tokio::fs::write(&self.path, &token).await {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %err,
                        "Failed to persist file token"
                    );
                }
                token
            }
            Err(err) => {
                // Existing but unreadable file: do not clobber it.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to read file token"
                );
                fresh_token()
            }
        }
    }
}
