//! HTTP handlers for the Coffee Tasting API

pub mod coffees;
pub mod flavor_tags;
pub mod health;
pub mod recommendations;
pub mod roasters;
pub mod tastings;
