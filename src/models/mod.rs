// src/models/mod.rs

pub mod assessment;
pub mod parent;
pub mod student;
