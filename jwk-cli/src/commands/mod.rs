pub mod function;
pub mod resource;
pub mod schema;
pub mod state;
