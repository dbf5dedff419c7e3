//! Route tables and their assembly into a live router

mod assembler;
mod route;

pub use assembler::{Assembly, AssemblyError, Binding, RouterAssembler};
pub use route::{BoundHandler, HandlerGroupBuilder, HandlerGroupDefinition, RouteDefinition};
