pub mod policy;

pub use policy::{GatePolicy, evaluate, parse_flag};
