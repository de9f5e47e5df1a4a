pub mod alphabet;
pub mod digraph;
pub mod fonts;
pub mod input;
pub mod keyboard;
pub mod types;
