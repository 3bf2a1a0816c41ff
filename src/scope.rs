//! Access point for the registry.
//!
//! A [`FontProvider`] owns a registry. Entering it makes the registry current
//! for the thread, and [`use_fonts`] hands out a [`FontsHandle`] to whichever
//! provider is innermost. Calling [`use_fonts`] with no provider entered is a
//! wiring bug and panics.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::watch;

use crate::registry::{FontFile, FontName, FontRegistry, RegistryError};

type SharedRegistry = Rc<RefCell<FontRegistry>>;

thread_local! {
    static SCOPES: RefCell<Vec<SharedRegistry>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("use_fonts must be used within a FontProvider")]
    OutsideProvider,
}

pub struct FontProvider {
    registry: SharedRegistry,
}

impl FontProvider {
    pub fn new(registry: FontRegistry) -> Self {
        Self {
            registry: Rc::new(RefCell::new(registry)),
        }
    }

    /// Makes this provider's registry current until the guard is dropped.
    ///
    /// Dropping a guard closes only its own scope, whatever order guards
    /// are dropped in.
    pub fn enter(&self) -> ScopeGuard {
        let registry = Rc::clone(&self.registry);
        SCOPES.with(|scopes| scopes.borrow_mut().push(Rc::clone(&registry)));
        ScopeGuard {
            registry,
            _not_send: PhantomData,
        }
    }

    /// Runs `f` with this provider entered.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }

    pub fn handle(&self) -> FontsHandle {
        FontsHandle {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl Default for FontProvider {
    fn default() -> Self {
        Self::new(FontRegistry::default())
    }
}

#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct ScopeGuard {
    registry: SharedRegistry,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            if let Some(idx) = scopes.iter().rposition(|r| Rc::ptr_eq(r, &self.registry)) {
                scopes.remove(idx);
            }
        });
    }
}

/// Returns the innermost registry, panicking if no provider is entered.
pub fn use_fonts() -> FontsHandle {
    match try_use_fonts() {
        Ok(handle) => handle,
        Err(e) => panic!("{}", e),
    }
}

pub fn try_use_fonts() -> Result<FontsHandle, ScopeError> {
    SCOPES.with(|scopes| {
        scopes
            .borrow()
            .last()
            .map(|registry| FontsHandle {
                registry: Rc::clone(registry),
            })
            .ok_or(ScopeError::OutsideProvider)
    })
}

/// The capabilities the registry exposes to the rest of the application.
#[derive(Clone)]
pub struct FontsHandle {
    registry: SharedRegistry,
}

impl FontsHandle {
    pub fn custom_fonts(&self) -> Arc<[FontName]> {
        self.registry.borrow().custom_fonts()
    }

    pub async fn add_custom_font(&self, file: FontFile) -> Result<FontName, RegistryError> {
        self.registry.borrow_mut().add_custom_font(&file)
    }

    /// Reads a font from disk and registers it.
    pub async fn add_font_path(&self, path: &Path) -> Result<FontName, RegistryError> {
        let file = FontFile::read(path).await.inspect_err(|e| {
            log::error!("Error loading custom font: {}", e);
        })?;
        self.add_custom_font(file).await
    }

    pub fn remove_custom_font(&self, name: &str) -> usize {
        self.registry.borrow_mut().remove_custom_font(name)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[FontName]>> {
        self.registry.borrow().subscribe()
    }

    /// Runs `f` against the registry, for inspecting its style sheet and
    /// resources.
    pub fn with_registry<R>(&self, f: impl FnOnce(&FontRegistry) -> R) -> R {
        f(&self.registry.borrow())
    }

    pub fn same_registry(&self, other: &FontsHandle) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}
