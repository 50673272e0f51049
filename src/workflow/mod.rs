pub mod batch_runner;

pub use batch_runner::{
    prepare_queries, run, run_concurrent, run_sequence, run_sequence_concurrent,
};
