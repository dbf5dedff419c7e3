//! HTTP Request Handlers
//!
//! Each handler group declares its routes and interceptors to the registry
//! and its construction recipe to the container.

pub mod difficulty;
pub mod health;
pub mod performance;

use crate::{
    config::SecurityConfig, container::Container, error::BootstrapError,
    registry::ComponentRegistry,
};

/// Declare every handler group, in binding order
pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
    security: &SecurityConfig,
) -> Result<(), BootstrapError> {
    health::register(registry, container)?;
    difficulty::register(registry, container, security)?;
    performance::register(registry, container, security)?;
    Ok(())
}
