//! Component registry
//!
//! A plain value filled in by the bootstrap routine: every component module
//! declares itself through an explicit call, and the finished registry is
//! handed by reference to the router assembler. There is no removal; the
//! contents are fixed once bootstrap completes.

use std::{collections::HashSet, fmt};

use tracing::debug;

use crate::{container::Token, routing::HandlerGroupDefinition};

/// Classification of a declared component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    ApiClient,
    Repository,
    Service,
    HandlerGroup,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiClient => "api_client",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::HandlerGroup => "handler_group",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
    /// Unique per declared type
    pub identity: &'static str,
    /// Container key the component resolves under
    pub token: &'static str,
    pub kind: ComponentKind,
}

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Component '{0}' is already declared")]
    DuplicateIdentity(&'static str),
}

/// Catalog of declared components and handler groups
#[derive(Default)]
pub struct ComponentRegistry {
    definitions: Vec<ComponentDefinition>,
    identities: HashSet<&'static str>,
    handler_groups: Vec<HandlerGroupDefinition>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component definition
    pub fn declare(
        &mut self,
        kind: ComponentKind,
        identity: &'static str,
        token: &'static str,
    ) -> Result<(), RegistryError> {
        if !self.identities.insert(identity) {
            return Err(RegistryError::DuplicateIdentity(identity));
        }

        debug!(kind = %kind, identity, token, "Component declared");
        self.definitions.push(ComponentDefinition {
            identity,
            token,
            kind,
        });

        Ok(())
    }

    /// Declare a component using its concrete type name as identity
    pub fn declare_type<C: ?Sized, T: ?Sized>(
        &mut self,
        kind: ComponentKind,
        token: &Token<T>,
    ) -> Result<(), RegistryError> {
        self.declare(kind, std::any::type_name::<C>(), token.name())
    }

    /// Declare a handler group together with its route table
    pub fn declare_handler_group(
        &mut self,
        group: HandlerGroupDefinition,
    ) -> Result<(), RegistryError> {
        self.declare(ComponentKind::HandlerGroup, group.identity, group.token)?;
        self.handler_groups.push(group);
        Ok(())
    }

    /// All definitions of a kind, in declaration order
    pub fn list_declared(&self, kind: ComponentKind) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.iter().filter(move |d| d.kind == kind)
    }

    /// Handler groups, in declaration order
    pub fn handler_groups(&self) -> &[HandlerGroupDefinition] {
        &self.handler_groups
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
