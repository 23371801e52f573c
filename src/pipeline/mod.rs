//! Pipeline module - the fit/transform stages in application order

pub mod classify;
pub mod clean;
pub mod combine;
pub mod encode;
pub mod error;
pub mod infer;
pub mod loader;
pub mod manifest;
pub mod scale;
pub mod schema;
pub mod select;
pub mod split;
pub mod train;

pub use classify::*;
pub use clean::*;
pub use combine::*;
pub use encode::*;
pub use error::PipelineError;
pub use infer::*;
pub use loader::*;
pub use manifest::*;
pub use scale::*;
pub use schema::*;
pub use select::*;
pub use split::*;
pub use train::*;
