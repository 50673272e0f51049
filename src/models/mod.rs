pub mod loaders;
pub mod payload;
pub mod query;
pub mod sequence;

pub use loaders::{load_input_payload, save_input_payload};
pub use payload::InputPayload;
pub use query::{Query, QueryKind, RawQuery};
pub use sequence::{Answers, Sequence};
