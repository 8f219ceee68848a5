pub mod field;
pub mod pet;
pub mod schema;

pub use field::*;
pub use pet::*;
pub use schema::*;
