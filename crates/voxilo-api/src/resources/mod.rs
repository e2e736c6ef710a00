// Concrete resources
//
// One resource family per file, each a thin layer over the dispatch bases:
// a fixed action path, an identifier field, and override hooks for
// per-resource request quirks.

pub mod application;
pub mod subaccount;

pub use application::{Application, ApplicationInterface};
pub use subaccount::{Subaccount, SubaccountInterface};
