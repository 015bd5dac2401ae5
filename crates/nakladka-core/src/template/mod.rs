//! Named template persistence.

mod record;

pub use record::Template;

use crate::storage::{Storage, StorageError};
use thiserror::Error;

/// Key prefix under which templates are stored.
pub const TEMPLATE_KEY_PREFIX: &str = "template_";

/// Template errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Template name is empty")]
    EmptyName,
    #[error("Malformed template record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(StorageError),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Storage key for a template name.
pub fn template_key(name: &str) -> String {
    format!("{}{}", TEMPLATE_KEY_PREFIX, name)
}

fn normalize_name(name: &str) -> TemplateResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        Err(TemplateError::EmptyName)
    } else {
        Ok(name)
    }
}

/// Named templates over a key-value storage backend.
///
/// Keeps an explicit registry of template names next to the backend. The
/// registry is read from the backend once when the store is opened and
/// maintained on every save and delete after that.
#[derive(Debug)]
pub struct TemplateStore<S: Storage> {
    storage: S,
    names: Vec<String>,
}

impl<S: Storage> TemplateStore<S> {
    /// Open a store, registering every template already in `storage`.
    pub fn open(storage: S) -> TemplateResult<Self> {
        let names: Vec<String> = storage
            .list()
            .map_err(TemplateError::Storage)?
            .into_iter()
            .filter_map(|key| {
                let name = key.strip_prefix(TEMPLATE_KEY_PREFIX)?;
                match normalize_name(name) {
                    Ok(normalized) if normalized == name => Some(name.to_string()),
                    _ => {
                        log::warn!("Skipping template key {:?} with an unusable name", key);
                        None
                    }
                }
            })
            .collect();
        log::debug!("Opened template store with {} template(s)", names.len());
        Ok(Self { storage, names })
    }

    /// Save a template, overwriting any template with the same name.
    pub fn save(&mut self, name: &str, template: &Template) -> TemplateResult<()> {
        let name = normalize_name(name)?;
        let json = template.to_json()?;
        self.storage
            .save(&template_key(name), &json)
            .map_err(TemplateError::Storage)?;

        if !self.contains(name) {
            self.names.push(name.to_string());
        }
        log::info!("Saved template {:?}", name);
        Ok(())
    }

    /// Load a template by name.
    pub fn load(&self, name: &str) -> TemplateResult<Template> {
        let name = normalize_name(name)?;
        let json = self.storage.load(&template_key(name)).map_err(|e| match e {
            StorageError::NotFound(_) => TemplateError::NotFound(name.to_string()),
            other => TemplateError::Storage(other),
        })?;
        Ok(Template::from_json(&json)?)
    }

    /// Delete a template by name.
    pub fn delete(&mut self, name: &str) -> TemplateResult<()> {
        let name = normalize_name(name)?;
        self.storage.delete(&template_key(name)).map_err(|e| match e {
            StorageError::NotFound(_) => TemplateError::NotFound(name.to_string()),
            other => TemplateError::Storage(other),
        })?;
        self.names.retain(|n| n != name);
        log::info!("Deleted template {:?}", name);
        Ok(())
    }

    /// Names of all templates, in registry order.
    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
