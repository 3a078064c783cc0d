//! Document Model - WordprocessingML document tree and value types
//!
//! This crate provides the document object model: a flat node arena
//! addressed by handles, nesting-legality rules, style value objects,
//! and the registries (media, numbering, collections) the serialization
//! engine consumes.

mod collections;
mod document;
mod element;
mod error;
mod legality;
mod media;
mod node;
pub mod field;
pub mod image;
pub mod length;
pub mod numbering;
pub mod protection;
pub mod section;
pub mod settings;
pub mod style;

pub use collections::*;
pub use document::*;
pub use element::*;
pub use error::*;
pub use field::*;
pub use image::*;
pub use legality::check_nesting;
pub use length::*;
pub use media::*;
pub use node::*;
pub use numbering::*;
pub use protection::*;
pub use section::*;
pub use settings::*;
pub use style::*;
