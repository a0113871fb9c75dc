//! SeaORM entities.

pub mod item;
