// src/handlers/mod.rs

pub mod assessment;
pub mod auth;
pub mod catalog;
pub mod family;
