//! Registry invariants over arbitrary labels and values.
mod support;
use crate::support::queued_registry;
use knobs_core::{SliderParams, DEFAULT_SLIDER_SPREAD};
use proptest::prelude::*;

proptest! {
    #[test]
    fn first_registration_wins(label in "[a-z]{1,12}", first in ".{0,16}", second in ".{0,16}") {
        let (_, _, registry) = queued_registry("example");
        prop_assert_eq!(registry.text(&label, None, &first), first.clone());
        prop_assert_eq!(registry.text(&label, Some("again"), &second), first);
        prop_assert_eq!(registry.all().len(), 1);
    }

    #[test]
    fn examples_do_not_see_each_other(labels in prop::collection::hash_set("[a-z]{1,8}", 1..6)) {
        let (selection, _, registry) = queued_registry("one");
        for label in &labels {
            registry.boolean(label, None, true);
        }
        selection.select("two");
        prop_assert!(registry.all().is_empty());
        selection.select("one");
        prop_assert_eq!(registry.all().len(), labels.len());
    }

    #[test]
    fn slider_bounds_surround_initial_value(initial in -1000.0_f64..1000.0) {
        let (_, _, registry) = queued_registry("example");
        let value = registry.slider("x", None, SliderParams::new().initial(initial));
        prop_assert_eq!(value, initial);
        let knob = registry.knob("x").unwrap();
        match knob.kind() {
            knobs_core::KnobKind::Slider { bounds, .. } => {
                prop_assert_eq!(bounds.min, initial - DEFAULT_SLIDER_SPREAD);
                prop_assert_eq!(bounds.max, initial + DEFAULT_SLIDER_SPREAD);
            }
            other => prop_assert!(false, "unexpected kind {:?}", other),
        }
    }

    #[test]
    fn url_override_beats_any_default(value in "[a-zA-Z0-9 ]{0,12}", default in ".{0,12}") {
        let (_, _, registry) = queued_registry("example");
        registry.apply_url_args(&format!("name:{value};"));
        prop_assert_eq!(registry.text("name", None, &default), value);
    }
}
