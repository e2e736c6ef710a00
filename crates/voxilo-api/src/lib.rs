// voxilo-api: Async Rust client SDK for the Voxilo communications REST API

pub mod base;
pub mod error;
pub mod resources;
pub mod transport;

pub use base::{
    ApiResource, ErrorPolicy, GenericResponse, Pagination, Resource, ResourceInterface,
    ResourceList, SecondaryResource,
};
pub use error::Error;
pub use transport::{HttpMethod, Params, Response, SharedTransport, Transport};
