//! Database models for all domain entities.

mod city;
mod supermarket;

pub use city::{City, NewCity, UpdateCity};
pub use supermarket::{NewSupermarket, Supermarket, UpdateSupermarket};
