//! Core business logic - the data-access operations behind the HTTP endpoints.
//!
//! Each submodule exposes find-all/create/update style functions over one entity.

pub mod category;
pub mod product;
pub mod profile;
