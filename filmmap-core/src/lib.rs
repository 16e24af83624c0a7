pub mod catalog;
pub mod gateways;
pub mod ranking;
pub mod resolver;
pub mod text;
pub mod usecases;

mod error;

pub use self::error::Error;

pub mod entities {
    pub use filmmap_entities::{geo::*, record::*};
}
