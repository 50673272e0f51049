pub mod json_loader;

pub use json_loader::{load_input_payload, save_input_payload};
