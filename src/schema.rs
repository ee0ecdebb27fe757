use std::{collections::HashSet, fmt};

use crate::error::{AppErr, Result};

/// One named input of the model.
///
/// The discriminants are the positions in the feature vector, so the declaration order here
/// is the order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    OverallQual = 0,
    GrLivArea = 1,
    TotalBsmtSF = 2,
    GarageCars = 3,
    YearBuilt = 4,
    FullBath = 5,
}

impl Feature {
    /// Every feature, in feature vector order.
    pub const ALL: [Feature; 6] = [
        Feature::OverallQual,
        Feature::GrLivArea,
        Feature::TotalBsmtSF,
        Feature::GarageCars,
        Feature::YearBuilt,
        Feature::FullBath,
    ];

    /// The training column name, also used as the form field name.
    pub fn name(self) -> &'static str {
        match self {
            Feature::OverallQual => "OverallQual",
            Feature::GrLivArea => "GrLivArea",
            Feature::TotalBsmtSF => "TotalBsmtSF",
            Feature::GarageCars => "GarageCars",
            Feature::YearBuilt => "YearBuilt",
            Feature::FullBath => "FullBath",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The names of every feature, in feature vector order.
    pub fn names() -> [&'static str; 6] {
        Self::ALL.map(Feature::name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a feature is presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Slider,
    NumberInput,
}

/// Static description of a single feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub feature: Feature,
    pub label: &'static str,
    pub description: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: i64,
    pub step: i64,
    pub widget: Widget,
    pub help: &'static str,
}

impl FeatureSpec {
    /// Clamps `value` into `[min, max]`.
    ///
    /// Sliders only stop on multiples of `step` counted from `min`, so their values are snapped
    /// to the nearest one. Number inputs use `step` for their +/- buttons only and keep any whole
    /// number.
    pub fn constrain(&self, value: f64) -> i64 {
        if !value.is_finite() {
            return self.default;
        }

        let clamped = value.clamp(self.min as f64, self.max as f64);
        match self.widget {
            Widget::Slider => {
                let steps = ((clamped - self.min as f64) / self.step as f64).round() as i64;
                (self.min + steps * self.step).min(self.max)
            }
            Widget::NumberInput => clamped.round() as i64,
        }
    }

    /// The granularity the browser accepts for this widget.
    pub fn input_step(&self) -> i64 {
        match self.widget {
            Widget::Slider => self.step,
            Widget::NumberInput => 1,
        }
    }

    /// Checks the invariants a single record must hold.
    fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(AppErr::InvalidSchema(format!(
                "{}: min ({}) is greater than max ({})",
                self.feature, self.min, self.max
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(AppErr::InvalidSchema(format!(
                "{}: default ({}) is outside [{}, {}]",
                self.feature, self.default, self.min, self.max
            )));
        }
        if self.step <= 0 {
            return Err(AppErr::InvalidSchema(format!(
                "{}: step must be positive, got {}",
                self.feature, self.step
            )));
        }

        Ok(())
    }
}

static FEATURES: [FeatureSpec; 6] = [
    FeatureSpec {
        feature: Feature::OverallQual,
        label: "Overall Quality (1-10)",
        description: "Overall Quality Rating (1-10)",
        min: 1,
        max: 10,
        default: 7,
        step: 1,
        widget: Widget::Slider,
        help: "Rating scale where 10 is excellent quality",
    },
    FeatureSpec {
        feature: Feature::GrLivArea,
        label: "Above Ground Living Area (sq ft)",
        description: "Above Ground Living Area (sq ft)",
        min: 300,
        max: 5000,
        default: 2000,
        step: 100,
        widget: Widget::NumberInput,
        help: "Larger homes typically cost more",
    },
    FeatureSpec {
        feature: Feature::TotalBsmtSF,
        label: "Total Basement Area (sq ft)",
        description: "Total Basement Area (sq ft)",
        min: 0,
        max: 6000,
        default: 1000,
        step: 100,
        widget: Widget::NumberInput,
        help: "Basement space adds value",
    },
    FeatureSpec {
        feature: Feature::GarageCars,
        label: "Garage Capacity (cars)",
        description: "Number of Cars Garage Can Hold",
        min: 0,
        max: 5,
        default: 2,
        step: 1,
        widget: Widget::Slider,
        help: "More garage space correlates with house size",
    },
    FeatureSpec {
        feature: Feature::YearBuilt,
        label: "Year Built",
        description: "Year House Was Built",
        min: 1872,
        max: 2010,
        default: 2000,
        step: 1,
        widget: Widget::Slider,
        help: "Newer homes tend to be more expensive",
    },
    FeatureSpec {
        feature: Feature::FullBath,
        label: "Full Bathrooms",
        description: "Number of Full Bathrooms",
        min: 0,
        max: 5,
        default: 2,
        step: 1,
        widget: Widget::Slider,
        help: "More bathrooms increase property value",
    },
];

/// The fixed feature table.
///
/// Construct it through [`Schema::load`] so the invariants are checked once up front; after
/// that every lookup is infallible.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    specs: &'static [FeatureSpec; 6],
}

impl Schema {
    /// Returns the validated feature table.
    ///
    /// # Returns
    /// The schema or an `InvalidSchema` error naming the first broken invariant.
    pub fn load() -> Result<Self> {
        let schema = Self { specs: &FEATURES };
        schema.validate()?;
        Ok(schema)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (i, spec) in self.specs.iter().enumerate() {
            if spec.feature.index() != i || Feature::ALL[i] != spec.feature {
                return Err(AppErr::InvalidSchema(format!(
                    "{} is declared at position {i} but belongs at {}",
                    spec.feature,
                    spec.feature.index()
                )));
            }
            if !seen.insert(spec.feature.name()) {
                return Err(AppErr::InvalidSchema(format!(
                    "{} is declared twice",
                    spec.feature
                )));
            }
            spec.validate()?;
        }

        Ok(())
    }

    /// Returns the record of `feature`.
    #[inline]
    pub fn spec(&self, feature: Feature) -> &'static FeatureSpec {
        let specs: &'static [FeatureSpec; 6] = self.specs;
        &specs[feature.index()]
    }

    /// Iterates the records in feature vector order.
    pub fn specs(&self) -> impl Iterator<Item = &'static FeatureSpec> {
        let specs: &'static [FeatureSpec; 6] = self.specs;
        specs.iter()
    }
}
