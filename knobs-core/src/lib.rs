//! Live knobs for catalog examples
//!
//! Example setup code asks the [`KnobRegistry`] for typed values ("knobs");
//! controls write them back, and the registry broadcasts [`KnobsChanged`] so
//! the catalog re-renders. Knob sets are kept per example and text knobs
//! round-trip through URL args ([`url_args`]) so a configuration can be
//! shared as a link.

mod active_example;
mod error;
mod knob;
mod preset;
mod registry;
mod scheduler;
pub mod url_args;
mod value;
mod variant;

pub use active_example::{ActiveExample, ExampleChanged, ExampleSelection};
pub use error::KnobError;
pub use knob::Knob;
pub use knobs_common::ExampleId;
pub use preset::Preset;
pub use registry::{KnobRegistry, KnobsChanged};
pub use scheduler::{DeferredTask, Scheduler, TokioScheduler, TurnQueue};
pub use value::{KnobValue, Value};
pub use variant::{
    KnobKind, KnobOption, OptionsKnob, SliderBounds, SliderParams, DEFAULT_SLIDER_SPREAD,
    DEFAULT_SLIDER_VALUE,
};
