use crate::{
    error::AppErr,
    input::{FeatureValues, Interaction},
    predictor::Predictor,
    provider::{Availability, ModelProvider},
    schema::Schema,
    view::{self, Outcome, ViewState},
};

/// The application: a validated schema plus the model provider it was handed.
///
/// Every interaction is handled synchronously and produces the complete page; nothing but the
/// provider's cached model survives between calls.
pub struct App {
    schema: Schema,
    provider: ModelProvider,
}

impl App {
    pub fn new(schema: Schema, provider: ModelProvider) -> Self {
        Self { schema, provider }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn availability(&self) -> &Availability {
        self.provider.availability()
    }

    /// Handles one interaction and renders the resulting page.
    ///
    /// # Arguments
    /// * `interaction` - The event that triggered this render.
    ///
    /// # Returns
    /// The full HTML page.
    pub fn handle(&self, interaction: Interaction) -> String {
        let availability = self.provider.availability();

        let (values, outcome) = match interaction {
            Interaction::Load => (FeatureValues::defaults(&self.schema), Outcome::Nothing),
            Interaction::Change(values) => (values, Outcome::Nothing),
            Interaction::Submit(values) => match self.predictor() {
                Some(predictor) => match predictor.predict(&values) {
                    Ok(result) => (values, Outcome::Predicted(result)),
                    Err(AppErr::PredictionFailure(msg)) => (values, Outcome::Failed(msg)),
                    Err(e) => (values, Outcome::Failed(e.to_string())),
                },
                None => (values, Outcome::Nothing),
            },
        };

        view::render(&ViewState {
            schema: &self.schema,
            availability,
            values,
            outcome,
        })
    }

    /// Returns a predictor bound to the cached model, or `None` when the model is unavailable.
    pub fn predictor(&self) -> Option<Predictor> {
        let model = self.provider.availability().model()?;
        Some(Predictor::new(model.regressor.clone()))
    }
}
