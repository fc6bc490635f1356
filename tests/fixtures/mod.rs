#![allow(dead_code)]
pub mod handlers;
pub mod non_handlers;
