//! Dependency container
//!
//! Tokens map to factories registered up front. A factory receives the
//! container and may resolve the tokens it depends on; the first `resolve`
//! of a token runs its factory and every later call returns the same
//! instance.
//!
//! The dependency graph must be acyclic. Each token's construction is
//! serialised by its own lock, so concurrent first resolutions run the
//! factory exactly once.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::{Arc, Mutex, OnceLock},
};

use tracing::debug;

type Instance = Box<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn(&Container) -> ContainerResult<Instance> + Send + Sync>;

/// Typed resolution key.
///
/// The name is the key the container stores under; the type parameter ties
/// the key to what `resolve` hands back, which may be a trait object.
pub struct Token<T: ?Sized> {
    name: &'static str,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized> Token<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: ?Sized> Clone for Token<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Token<T> {}

impl<T: ?Sized> fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.name).finish()
    }
}

/// Container configuration and resolution errors
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("No factory registered for token '{0}'")]
    Unregistered(&'static str),

    #[error("Token '{0}' is already registered")]
    AlreadyRegistered(&'static str),

    #[error("Token '{token}' does not hold a value of type {expected}")]
    TypeMismatch {
        token: &'static str,
        expected: &'static str,
    },

    #[error("Construction of '{0}' panicked in another thread")]
    Poisoned(&'static str),

    #[error("Factory for '{token}' failed: {reason}")]
    Factory { token: &'static str, reason: String },
}

/// Result type alias using ContainerError
pub type ContainerResult<T> = Result<T, ContainerError>;

/// One registered token: its recipe and, once built, its instance
struct Slot {
    name: &'static str,
    factory: Factory,
    instance: OnceLock<Instance>,
    construction: Mutex<()>,
}

impl Slot {
    fn get_or_construct(&self, container: &Container) -> ContainerResult<&Instance> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance);
        }

        let _guard = self
            .construction
            .lock()
            .map_err(|_| ContainerError::Poisoned(self.name))?;

        // Another thread may have finished while we waited on the lock
        if let Some(instance) = self.instance.get() {
            return Ok(instance);
        }

        debug!(token = self.name, "Constructing component");
        let built = (self.factory)(container)?;
        Ok(self.instance.get_or_init(|| built))
    }
}

/// Singleton container keyed by token name
#[derive(Default)]
pub struct Container {
    slots: HashMap<&'static str, Slot>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a token
    pub fn register<T, F>(&mut self, token: Token<T>, factory: F) -> ContainerResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> ContainerResult<Arc<T>> + Send + Sync + 'static,
    {
        if self.slots.contains_key(token.name()) {
            return Err(ContainerError::AlreadyRegistered(token.name()));
        }

        let factory: Factory =
            Box::new(move |container| factory(container).map(|value| Box::new(value) as Instance));

        self.slots.insert(
            token.name(),
            Slot {
                name: token.name(),
                factory,
                instance: OnceLock::new(),
                construction: Mutex::new(()),
            },
        );

        Ok(())
    }

    /// Register an already constructed instance
    pub fn register_instance<T>(&mut self, token: Token<T>, value: Arc<T>) -> ContainerResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register(token, move |_| Ok(Arc::clone(&value)))
    }

    /// Whether a token has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Resolve a token to its singleton, constructing it on first use
    pub fn resolve<T>(&self, token: &Token<T>) -> ContainerResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let slot = self
            .slots
            .get(token.name())
            .ok_or(ContainerError::Unregistered(token.name()))?;

        slot.get_or_construct(self)?
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ContainerError::TypeMismatch {
                token: token.name(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("tokens", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}
