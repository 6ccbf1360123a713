//! pipviz - Parse point-in-polygon result reports and render them as interactive plots

pub mod config;
pub mod domain;
pub mod geometry;
pub mod parser;
pub mod render;
