//! The font registry.
//!
//! Owns the ordered list of active custom fonts together with the style
//! rule and resource handle backing each one. Every change to the list is
//! published on a `watch` channel so observers can re-read it.

mod error;
mod file;
mod format;
mod name;

use std::sync::Arc;

use tokio::sync::watch;

pub use error::RegistryError;
pub use file::FontFile;
pub use format::{mime_for_extension, FontFormat, MimeError};
pub use name::{derive_font_name, strip_extension, FontName};

use crate::config::{DuplicatePolicy, HandlePolicy, RegistrySettings};
use crate::resource::{MemoryResourceStore, ResourceHandle, ResourceStore};
use crate::stylesheet::{binds_family, FontFaceRule, MemoryStyleSheet, RuleId, StyleSheet};

/// A font that is currently registered.
#[derive(Debug, Clone)]
pub struct RegisteredFont {
    pub name: FontName,
    pub resource: ResourceHandle,
    pub binding: RuleId,
}

pub struct FontRegistry {
    entries: Vec<RegisteredFont>,
    style_sheet: Box<dyn StyleSheet>,
    resources: Box<dyn ResourceStore>,
    settings: RegistrySettings,
    notifier: watch::Sender<Arc<[FontName]>>,
}

impl FontRegistry {
    pub fn new(
        style_sheet: impl StyleSheet + 'static,
        resources: impl ResourceStore + 'static,
        settings: RegistrySettings,
    ) -> Self {
        let empty: Arc<[FontName]> = Arc::from(Vec::new());
        let (notifier, _) = watch::channel(empty);
        Self {
            entries: Vec::new(),
            style_sheet: Box::new(style_sheet),
            resources: Box::new(resources),
            settings,
            notifier,
        }
    }

    /// A registry backed by the in-memory style sheet and resource store.
    pub fn in_memory(settings: RegistrySettings) -> Self {
        let sheet = match settings.max_rules {
            Some(capacity) => MemoryStyleSheet::with_capacity_limit(capacity),
            None => MemoryStyleSheet::new(),
        };
        Self::new(sheet, MemoryResourceStore::new(), settings)
    }

    /// Snapshot of the active font names in insertion order.
    pub fn custom_fonts(&self) -> Arc<[FontName]> {
        self.notifier.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[FontName]>> {
        self.notifier.subscribe()
    }

    pub fn entries(&self) -> &[RegisteredFont] {
        &self.entries
    }

    pub fn style_sheet(&self) -> &dyn StyleSheet {
        self.style_sheet.as_ref()
    }

    pub fn resources(&self) -> &dyn ResourceStore {
        self.resources.as_ref()
    }

    /// Number of style rules currently binding `family`.
    pub fn binding_count(&self, family: &str) -> usize {
        self.style_sheet
            .rules()
            .iter()
            .filter(|css| binds_family(css, family))
            .count()
    }

    /// Registers an uploaded font under the name derived from its file name.
    ///
    /// On failure nothing is registered, any handle created along the way is
    /// revoked, and the reason is logged before being returned.
    pub fn add_custom_font(&mut self, file: &FontFile) -> Result<FontName, RegistryError> {
        self.try_add(file).inspect_err(|e| {
            log::error!("Error loading custom font '{}': {}", file.name, e);
        })
    }

    fn try_add(&mut self, file: &FontFile) -> Result<FontName, RegistryError> {
        let name = derive_font_name(&file.name).ok_or_else(|| RegistryError::EmptyName {
            file_name: file.name.clone(),
        })?;
        let format = FontFormat::from_mime(&file.mime_type).map_err(|e| match e {
            MimeError::Missing => RegistryError::MissingMimeType {
                file_name: file.name.clone(),
            },
            MimeError::Unparseable => RegistryError::UnparseableMime(file.mime_type.clone()),
        })?;

        let resource = self.resources.create(Arc::clone(&file.data))?;
        let css = FontFaceRule::new(&name, &resource, &format).to_css();
        let binding = match self.style_sheet.insert_rule(css) {
            Ok(id) => id,
            Err(e) => {
                self.resources.revoke(&resource);
                return Err(e.into());
            }
        };

        if self.settings.duplicates == DuplicatePolicy::Replace {
            let replaced = self.replace_existing(&name);
            if replaced > 0 {
                log::info!("Replaced {} existing registration(s) of '{}'", replaced, name);
            }
        }

        log::info!("Registered custom font '{}' as {}", name, resource);
        self.entries.push(RegisteredFont {
            name: name.clone(),
            resource,
            binding,
        });
        self.publish();

        Ok(name)
    }

    /// Removes every registration of `name` and the rules binding it.
    ///
    /// Returns how many list entries were removed; unknown names are a no-op.
    pub fn remove_custom_font(&mut self, name: &str) -> usize {
        let removed = self.take_entries(name);
        let rules = self
            .style_sheet
            .remove_rules_where(&mut |css| binds_family(css, name));
        log::debug!("Removed {} style rule(s) for '{}'", rules, name);
        self.release(&removed);

        if !removed.is_empty() {
            log::info!("Removed custom font '{}' ({} entries)", name, removed.len());
            self.publish();
        }
        removed.len()
    }

    /// Drops the entries already registered as `name`, along with the exact
    /// rules they inserted. Called after the replacement rule is in place.
    fn replace_existing(&mut self, name: &str) -> usize {
        let replaced = self.take_entries(name);
        for entry in &replaced {
            if !self.style_sheet.remove_rule(entry.binding) {
                log::warn!(
                    "Style rule {} for '{}' was already gone",
                    entry.binding.get(),
                    name
                );
            }
        }
        self.release(&replaced);
        replaced.len()
    }

    fn take_entries(&mut self, name: &str) -> Vec<RegisteredFont> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.name == name);
        self.entries = kept;
        taken
    }

    fn release(&mut self, entries: &[RegisteredFont]) {
        if self.settings.handles == HandlePolicy::Release {
            for entry in entries {
                self.resources.revoke(&entry.resource);
            }
        }
    }

    fn publish(&self) {
        let names: Arc<[FontName]> = self.entries.iter().map(|e| e.name.clone()).collect();
        self.notifier.send_replace(names);
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::in_memory(RegistrySettings::default())
    }
}
