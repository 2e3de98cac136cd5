//! Knob registry: per-example live values with URL sync and change broadcast

use crate::active_example::ActiveExample;
use crate::error::KnobError;
use crate::knob::Knob;
use crate::preset::Preset;
use crate::scheduler::Scheduler;
use crate::url_args::{parse_args, ArgsBuilder};
use crate::value::{KnobValue, Value};
use crate::variant::{KnobKind, KnobOption, SliderParams};
use knobs_common::ExampleId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

/// Emitted whenever knob state changes. Subscribers re-read the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnobsChanged;

#[derive(Default)]
struct RegistryState {
    /// Knob sets in registration order, one per example.
    knobs_by_example: HashMap<ExampleId, Vec<Knob>>,
    /// URL overrides by label, applied whenever a knob with that label
    /// registers.
    pending_url_args: HashMap<String, String>,
}

/// Registry holding every example's knobs and their current values
///
/// Example setup code calls the typed accessors ([`KnobRegistry::text`],
/// [`KnobRegistry::slider`], ...) on every render; the first call for a label
/// registers the knob, later calls read it back. Controls write through
/// [`KnobRegistry::update`]. Everything resolves against the example the
/// [`ActiveExample`] provider reports at call time.
#[derive(Clone)]
pub struct KnobRegistry {
    provider: Arc<dyn ActiveExample>,
    scheduler: Arc<dyn Scheduler>,
    state: Arc<Mutex<RegistryState>>,
    event_tx: broadcast::Sender<KnobsChanged>,
}

impl std::fmt::Debug for KnobRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnobRegistry")
            .field("active_example", &self.active_example())
            .finish_non_exhaustive()
    }
}

impl KnobRegistry {
    pub fn new(provider: Arc<dyn ActiveExample>, scheduler: Arc<dyn Scheduler>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            provider,
            scheduler,
            state: Arc::new(Mutex::new(RegistryState::default())),
            event_tx,
        }
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<KnobsChanged> {
        self.event_tx.subscribe()
    }

    pub fn active_example(&self) -> Option<ExampleId> {
        if self.provider.is_active() {
            self.provider.current()
        } else {
            None
        }
    }

    /// Every knob of the active example, in registration order
    pub fn all(&self) -> Vec<Knob> {
        let Some(example) = self.active_example() else {
            return Vec::new();
        };
        self.lock()
            .knobs_by_example
            .get(&example)
            .cloned()
            .unwrap_or_default()
    }

    /// Look up one knob of the active example
    pub fn knob(&self, label: &str) -> Option<Knob> {
        let example = self.active_example()?;
        self.lock()
            .knobs_by_example
            .get(&example)?
            .iter()
            .find(|k| k.label() == label)
            .cloned()
    }

    /// Register-or-read a knob and return its current value.
    ///
    /// A pending URL argument for `label` overrides the initial value carried
    /// by `kind`. If the label is already registered, the stored value wins
    /// and `kind`'s constraints are ignored. A new registration notifies
    /// subscribers on the next scheduler turn, never from inside this call.
    pub fn request_value(&self, label: &str, description: Option<&str>, kind: KnobKind) -> Value {
        let mut candidate = Knob::new(label, description.map(str::to_string), kind);

        let Some(example) = self.active_example() else {
            if let Some(raw) = self.lock().pending_url_args.get(label) {
                candidate.apply_url_arg(raw);
            }
            debug!("No active example, knob '{label}' not registered");
            return candidate.value();
        };

        let mut state = self.lock();
        let RegistryState {
            knobs_by_example,
            pending_url_args,
        } = &mut *state;
        let pending = pending_url_args.get(label).map(String::as_str);
        if let Some(raw) = pending {
            candidate.apply_url_arg(raw);
        }

        let knobs = knobs_by_example.entry(example.clone()).or_default();
        if let Some(existing) = knobs.iter_mut().find(|k| k.label() == label) {
            if !existing.kind().same_kind(candidate.kind()) {
                warn!(
                    "Knob '{label}' in {example} is a {}, requested as {}",
                    existing.kind().type_name(),
                    candidate.kind().type_name()
                );
                return candidate.value();
            }

            let mut changed = false;
            if let Some(raw) = pending {
                if existing.url_applied() != Some(raw) {
                    changed = existing.apply_url_arg(raw);
                }
            }
            let value = existing.value();
            drop(state);

            if changed {
                self.notify_deferred();
            }
            return value;
        }

        debug!(
            "Registered {} knob '{label}' in {example}",
            candidate.kind().type_name()
        );
        let value = candidate.value();
        knobs.push(candidate);
        drop(state);

        self.notify_deferred();
        value
    }

    pub fn boolean(&self, label: &str, description: Option<&str>, initial: bool) -> bool {
        self.request_typed(label, description, KnobKind::boolean(initial), initial)
    }

    pub fn nullable_boolean(
        &self,
        label: &str,
        description: Option<&str>,
        initial: Option<bool>,
    ) -> Option<bool> {
        self.request_typed(
            label,
            description,
            KnobKind::nullable_boolean(initial),
            initial,
        )
    }

    pub fn text(&self, label: &str, description: Option<&str>, initial: &str) -> String {
        self.request_typed(
            label,
            description,
            KnobKind::text(initial),
            initial.to_string(),
        )
    }

    pub fn nullable_text(
        &self,
        label: &str,
        description: Option<&str>,
        initial: Option<&str>,
    ) -> Option<String> {
        let initial = initial.map(str::to_string);
        self.request_typed(
            label,
            description,
            KnobKind::nullable_text(initial.clone()),
            initial,
        )
    }

    pub fn number(&self, label: &str, description: Option<&str>, initial: f64) -> f64 {
        self.request_typed(label, description, KnobKind::number(initial), initial)
    }

    pub fn nullable_number(
        &self,
        label: &str,
        description: Option<&str>,
        initial: Option<f64>,
    ) -> Option<f64> {
        self.request_typed(
            label,
            description,
            KnobKind::nullable_number(initial),
            initial,
        )
    }

    pub fn slider(&self, label: &str, description: Option<&str>, params: SliderParams) -> f64 {
        let (initial, _) = params.resolve();
        self.request_typed(label, description, KnobKind::slider(params), initial)
    }

    pub fn nullable_slider(
        &self,
        label: &str,
        description: Option<&str>,
        params: SliderParams,
    ) -> Option<f64> {
        self.request_typed(
            label,
            description,
            KnobKind::nullable_slider(params),
            params.initial,
        )
    }

    /// Single-select knob. Starts on the first option.
    ///
    /// # Panics
    ///
    /// If `options` is empty.
    pub fn options<T: KnobValue + Clone>(
        &self,
        label: &str,
        description: Option<&str>,
        options: Vec<(impl Into<String>, T)>,
    ) -> T {
        let Some((_, first)) = options.first() else {
            panic!("options knob '{label}' requires at least one option");
        };
        let fallback = first.clone();
        let options = options
            .into_iter()
            .map(|(option_label, value)| KnobOption::new(option_label, value.into_value()))
            .collect();
        let kind = match KnobKind::options(options) {
            Ok(kind) => kind,
            Err(e) => panic!("options knob '{label}': {e}"),
        };
        self.request_typed(label, description, kind, fallback)
    }

    fn request_typed<T: KnobValue>(
        &self,
        label: &str,
        description: Option<&str>,
        kind: KnobKind,
        fallback: T,
    ) -> T {
        let value = self.request_value(label, description, kind);
        T::from_value(&value).unwrap_or(fallback)
    }

    /// Set a knob's value from a control.
    ///
    /// Unknown labels, a missing active example and values of the wrong type
    /// are ignored; URL-driven updates may arrive before the knob registers.
    pub fn update<T: KnobValue>(&self, label: &str, value: T) {
        self.update_value(label, value.into_value());
    }

    pub fn update_value(&self, label: &str, value: Value) {
        match self.try_update(label, value) {
            Ok(_) => {}
            Err(e @ (KnobError::TypeMismatch { .. } | KnobError::NotAnOption { .. })) => {
                warn!("Ignoring knob update: {e}");
            }
            Err(e) => debug!("Ignoring knob update: {e}"),
        }
    }

    /// Like [`KnobRegistry::update_value`], but reports why nothing happened.
    /// Returns whether the value changed; every accepted update broadcasts.
    pub fn try_update(&self, label: &str, value: Value) -> Result<bool, KnobError> {
        let example = self.active_example().ok_or(KnobError::NoActiveExample)?;
        let changed = {
            let mut state = self.lock();
            let knob = state
                .knobs_by_example
                .get_mut(&example)
                .and_then(|knobs| knobs.iter_mut().find(|k| k.label() == label))
                .ok_or_else(|| KnobError::UnknownLabel(label.to_string()))?;
            knob.set_value(value)?
        };
        self.notify();
        Ok(changed)
    }

    /// Encode the active example's text knobs as URL args.
    ///
    /// Other kinds are not encoded; they have no URL decode either.
    pub fn build_url_args(&self) -> String {
        let mut builder = ArgsBuilder::new();
        for knob in self.all() {
            if let Some(text) = knob.kind().text_value() {
                builder.set_string(knob.label(), text);
            }
        }
        builder.build()
    }

    /// Apply URL args: remember every pair for knobs that register later and
    /// update already registered knobs whose decoded value differs.
    pub fn apply_url_args(&self, raw: &str) {
        let pairs = parse_args(raw);
        let example = self.active_example();
        let mut updates = Vec::new();
        {
            let mut state = self.lock();
            let RegistryState {
                knobs_by_example,
                pending_url_args,
            } = &mut *state;
            let knobs = example
                .as_ref()
                .and_then(|example| knobs_by_example.get_mut(example));

            if let Some(knobs) = knobs {
                for (label, raw_value) in &pairs {
                    let Some(knob) = knobs.iter_mut().find(|k| k.label() == label) else {
                        continue;
                    };
                    knob.mark_url_applied(raw_value);
                    match knob.decode_url_arg(raw_value) {
                        Some(decoded) if decoded != knob.value() => {
                            updates.push((label.clone(), decoded));
                        }
                        Some(_) => {}
                        None => debug!(
                            "URL arg for {} knob '{label}' not decodable, ignored",
                            knob.kind().type_name()
                        ),
                    }
                }
            }
            for (label, raw_value) in pairs.iter().cloned() {
                pending_url_args.insert(label, raw_value);
            }
        }

        info!(
            "Applied {} URL args, {} knob updates",
            pairs.len(),
            updates.len()
        );
        for (label, value) in updates {
            self.update_value(&label, value);
        }
    }

    /// URL overrides captured so far, sorted by label
    pub fn pending_url_args(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self
            .lock()
            .pending_url_args
            .iter()
            .map(|(label, value)| (label.clone(), value.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Reset every knob to its registered value, then apply the preset.
    pub fn apply_preset(&self, preset: &Preset) {
        let Some(example) = self.active_example() else {
            return;
        };
        {
            let mut state = self.lock();
            let Some(knobs) = state.knobs_by_example.get_mut(&example) else {
                return;
            };
            for knob in knobs.iter_mut() {
                knob.reset();
            }
            for (label, value) in &preset.values {
                match knobs.iter_mut().find(|k| k.label() == label) {
                    Some(knob) => {
                        if let Err(e) = knob.set_value(value.clone()) {
                            warn!("Preset '{}': {e}", preset.name);
                        }
                    }
                    None => debug!("Preset '{}' names unknown knob '{label}'", preset.name),
                }
            }
        }
        info!("Applied preset '{}' to {example}", preset.name);
        self.notify();
    }

    /// Whether the active example's knobs are exactly at `preset`.
    pub fn preset_matches(&self, preset: &Preset) -> bool {
        preset.matches(&self.all())
    }

    /// Drop one example's knob set.
    pub fn reset_example(&self, example: &ExampleId) {
        let removed = self.lock().knobs_by_example.remove(example);
        if let Some(knobs) = removed {
            debug!("Dropped {} knobs of {example}", knobs.len());
            self.notify();
        }
    }

    /// Drop every knob set. Pending URL args are kept.
    pub fn clear(&self) {
        self.lock().knobs_by_example.clear();
        self.notify();
    }

    /// The provider switched examples; controls must re-render.
    pub fn on_example_changed(&self) {
        match self.active_example() {
            Some(example) => info!("Showing knobs of {example}"),
            None => info!("No active example"),
        }
        self.notify();
    }

    /// Follow the provider's change stream until it closes.
    ///
    /// Subscribes immediately, so changes made after this call are seen even
    /// before the returned future is first polled.
    pub fn follow_active_example(&self) -> impl Future<Output = ()> + Send + 'static {
        let registry = self.clone();
        let mut rx = self.provider.subscribe_changes();
        async move {
            loop {
                match rx.recv().await {
                    Ok(_) => registry.on_example_changed(),
                    Err(RecvError::Lagged(n)) => {
                        warn!("Missed {n} active example changes");
                        registry.on_example_changed();
                    }
                    Err(RecvError::Closed) => {
                        debug!("Active example stream closed");
                        break;
                    }
                }
            }
        }
    }

    fn notify(&self) {
        let _ = self.event_tx.send(KnobsChanged);
    }

    fn notify_deferred(&self) {
        let event_tx = self.event_tx.clone();
        self.scheduler.defer(Box::new(move || {
            let _ = event_tx.send(KnobsChanged);
        }));
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
