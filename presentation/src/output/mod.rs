//! Console output for single-turn mode

pub mod console;
pub mod one_shot;
