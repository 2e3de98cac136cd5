//! One catalog viewing session: active example, registry and render loop

use crate::catalog::{Catalog, MockExample};
use crate::panel::render_panel;
use knobs_core::{
    ExampleId, ExampleSelection, Knob, KnobError, KnobKind, KnobRegistry, KnobsChanged,
    TurnQueue, Value,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Re-render rounds per settle before giving up on a noisy example.
const MAX_SETTLE_ROUNDS: usize = 8;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown example: {0}")]
    UnknownExample(String),
    #[error("No example is shown")]
    NoExample,
    #[error("Example '{example}' has no preset '{name}'")]
    UnknownPreset { example: String, name: String },
    #[error("Cannot set knob '{label}' from '{raw}'")]
    InvalidInput { label: String, raw: String },
    #[error("Knob error: {0}")]
    Knob(#[from] KnobError),
}

/// What the shell shows for the active example
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub example: String,
    pub preview: String,
    pub url_args: String,
    pub knobs: Vec<Knob>,
}

pub struct MockSession {
    catalog: Catalog,
    selection: Arc<ExampleSelection>,
    queue: TurnQueue,
    registry: KnobRegistry,
    changes: broadcast::Receiver<KnobsChanged>,
    preview: String,
    renders: usize,
}

impl MockSession {
    pub fn new(catalog: Catalog) -> Self {
        let selection = Arc::new(ExampleSelection::new());
        let queue = TurnQueue::new();
        let registry = KnobRegistry::new(selection.clone(), Arc::new(queue.clone()));
        let changes = registry.subscribe();
        Self {
            catalog,
            selection,
            queue,
            registry,
            changes,
            preview: String::new(),
            renders: 0,
        }
    }

    pub fn registry(&self) -> &KnobRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Number of example renders so far
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Navigate to `id` and render it.
    pub fn show(&mut self, id: &ExampleId) -> Result<(), SessionError> {
        if self.catalog.get(id).is_none() {
            return Err(SessionError::UnknownExample(id.to_string()));
        }
        self.selection.select(id.clone());
        self.registry.on_example_changed();
        self.render()?;
        self.settle();
        Ok(())
    }

    fn current(&self) -> Result<&MockExample, SessionError> {
        let id = self
            .registry
            .active_example()
            .ok_or(SessionError::NoExample)?;
        self.catalog
            .get(&id)
            .ok_or_else(|| SessionError::UnknownExample(id.to_string()))
    }

    fn render(&mut self) -> Result<(), SessionError> {
        let preview = self.current()?.render(&self.registry);
        self.renders += 1;
        debug!("Render #{}: {preview}", self.renders);
        self.preview = preview;
        Ok(())
    }

    /// Run deferred work and re-render while knobs keep changing.
    /// Returns the number of re-renders.
    pub fn settle(&mut self) -> usize {
        let mut rounds = 0;
        while rounds < MAX_SETTLE_ROUNDS {
            self.queue.run_until_idle();
            let mut changed = false;
            while self.changes.try_recv().is_ok() {
                changed = true;
            }
            if !changed {
                return rounds;
            }
            if let Err(e) = self.render() {
                debug!("Skipping re-render: {e}");
                return rounds;
            }
            rounds += 1;
        }
        warn!("Knobs still changing after {MAX_SETTLE_ROUNDS} re-renders");
        rounds
    }

    /// Apply a shared link's URL args
    pub fn apply_url_args(&mut self, raw: &str) {
        self.registry.apply_url_args(raw);
        self.settle();
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<(), SessionError> {
        let example = self.current()?;
        let preset = example
            .preset(name)
            .cloned()
            .ok_or_else(|| SessionError::UnknownPreset {
                example: example.id.to_string(),
                name: name.to_string(),
            })?;
        self.registry.apply_preset(&preset);
        self.settle();
        Ok(())
    }

    /// Set a knob the way a control would, from user-typed text
    pub fn set(&mut self, label: &str, raw: &str) -> Result<(), SessionError> {
        let knob = self
            .registry
            .knob(label)
            .ok_or_else(|| KnobError::UnknownLabel(label.to_string()))?;
        let value = parse_control_input(knob.kind(), raw).ok_or_else(|| {
            SessionError::InvalidInput {
                label: label.to_string(),
                raw: raw.to_string(),
            }
        })?;
        self.registry.try_update(label, value)?;
        info!("Set {label} = {raw}");
        self.settle();
        Ok(())
    }

    pub fn panel(&self) -> Result<String, SessionError> {
        let example = self.current()?;
        Ok(render_panel(
            &example.title,
            &self.registry.all(),
            &example.presets,
        ))
    }

    pub fn snapshot(&self) -> Result<Snapshot, SessionError> {
        let example = self.current()?;
        Ok(Snapshot {
            example: example.id.to_string(),
            preview: self.preview.clone(),
            url_args: self.registry.build_url_args(),
            knobs: self.registry.all(),
        })
    }
}

/// Parse text typed into a control into a value for `kind`.
/// `null` clears nullable knobs; numbers must be finite; options match by
/// label or value.
pub fn parse_control_input(kind: &KnobKind, raw: &str) -> Option<Value> {
    let nullable = kind.is_nullable() && raw == "null";
    match kind {
        _ if nullable => Some(Value::Null),
        KnobKind::Boolean { .. } | KnobKind::NullableBoolean { .. } => {
            raw.parse().ok().map(Value::Bool)
        }
        KnobKind::Text { .. } | KnobKind::NullableText { .. } => Some(Value::Text(raw.to_string())),
        KnobKind::Number { .. }
        | KnobKind::NullableNumber { .. }
        | KnobKind::Slider { .. }
        | KnobKind::NullableSlider { .. } => raw
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Number),
        KnobKind::Options(options) => options
            .options()
            .iter()
            .find(|option| option.label == raw || option.value.to_string() == raw)
            .map(|option| option.value.clone()),
    }
}
