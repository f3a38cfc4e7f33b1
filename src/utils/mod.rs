// src/utils/mod.rs

pub mod crypto;
pub mod extract;
pub mod jwt;
pub mod sanitize;
