use std::collections::HashMap;

use crate::schema::{Feature, Schema};

/// The form field carried by the submit button.
pub const SUBMIT_FIELD: &str = "predict";

/// The current value of every feature.
///
/// Values can only enter through [`FeatureValues::set`] or the constructors, all of which
/// constrain them the way the feature's widget does, so a `FeatureValues` is always inside the
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureValues {
    values: [i64; 6],
}

impl FeatureValues {
    /// Every feature at its declared default.
    pub fn defaults(schema: &Schema) -> Self {
        Self {
            values: Feature::ALL.map(|f| schema.spec(f).default),
        }
    }

    /// Builds the values from the raw fields of a submitted form.
    ///
    /// # Arguments
    /// * `schema` - The feature table giving bounds, steps and defaults.
    /// * `form` - Field name to raw text, as decoded from the request.
    ///
    /// # Returns
    /// The constrained values. Missing or unparsable fields take their default.
    pub fn from_form(schema: &Schema, form: &HashMap<String, String>) -> Self {
        let mut values = Self::defaults(schema);

        for feature in Feature::ALL {
            let Some(raw) = form.get(feature.name()) else {
                continue;
            };

            match raw.trim().parse::<f64>() {
                Ok(value) => values.set(schema, feature, value),
                Err(_) => log::debug!("ignoring unparsable {feature} value {raw:?}"),
            }
        }

        values
    }

    /// Builds the values from numeric fields, e.g. a decoded JSON object.
    pub fn from_numbers(schema: &Schema, numbers: &HashMap<String, f64>) -> Self {
        let mut values = Self::defaults(schema);

        for (name, &value) in numbers {
            match Feature::from_name(name) {
                Some(feature) => values.set(schema, feature, value),
                None => log::debug!("ignoring unknown feature {name:?}"),
            }
        }

        values
    }

    #[inline]
    pub fn get(&self, feature: Feature) -> i64 {
        self.values[feature.index()]
    }

    /// Stores `value` for `feature`, clamped and snapped the way the widget would.
    pub fn set(&mut self, schema: &Schema, feature: Feature, value: f64) {
        self.values[feature.index()] = schema.spec(feature).constrain(value);
    }

    /// Iterates `(feature, value)` pairs in feature vector order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, i64)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

/// One external event the view reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A fresh page load.
    Load,
    /// A widget changed; re-render without predicting.
    Change(FeatureValues),
    /// The predict button was pressed.
    Submit(FeatureValues),
}

impl Interaction {
    /// Classifies a posted form. Only the submit button's field turns it into a submission.
    pub fn from_form(schema: &Schema, form: &HashMap<String, String>) -> Self {
        let values = FeatureValues::from_form(schema, form);

        if form.contains_key(SUBMIT_FIELD) {
            Interaction::Submit(values)
        } else {
            Interaction::Change(values)
        }
    }
}
