mod example_id;

pub use example_id::ExampleId;
