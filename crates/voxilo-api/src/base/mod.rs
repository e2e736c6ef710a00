// Generic resource/action dispatch framework
//
// Maps CRUD-ish operations onto HTTP verbs and URL path composition, wraps
// responses into typed objects, and threads pagination metadata through
// list results. Concrete resources in `crate::resources` are thin layers
// over these bases.

pub mod interface;
pub mod resource;
pub mod response;
pub mod secondary;

pub use interface::{ApiResource, ResourceInterface};
pub use resource::{ErrorPolicy, Resource};
pub use response::{GenericResponse, Pagination, ResourceList};
pub use secondary::SecondaryResource;
