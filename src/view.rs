use std::fmt::Write;

use model::ModelInfo;

use crate::{
    input::{FeatureValues, SUBMIT_FIELD},
    predictor::PredictionResult,
    provider::{Availability, FALLBACK_MODEL_PATH},
    schema::{FeatureSpec, Schema, Widget},
};

/// What the last submission produced, if anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Nothing,
    Predicted(PredictionResult),
    Failed(String),
}

/// Everything needed to draw one page.
#[derive(Debug, Clone)]
pub struct ViewState<'a> {
    pub schema: &'a Schema,
    pub availability: &'a Availability,
    pub values: FeatureValues,
    pub outcome: Outcome,
}

const TIPS: [(&str, &str); 4] = [
    ("Quality", "Scale 1-10, affects price significantly"),
    ("Living Area", "Larger homes command higher prices"),
    ("Year Built", "Newer homes tend to be more expensive"),
    ("Bathrooms", "Additional bathrooms increase value"),
];

/// Renders the whole page for `state`.
pub fn render(state: &ViewState) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>House Price Predictor</title>\n</head>\n<body>\n\
         <header>\n<h1>House Price Prediction System</h1>\n\
         <p>Predict house prices based on 6 key features</p>\n</header>\n",
    );

    match state.availability {
        Availability::Unavailable(reason) => unavailable(&mut html, reason),
        Availability::Ready(model) => {
            html.push_str("<main>\n");
            form(&mut html, state);
            outcome(&mut html, &state.outcome);
            info(&mut html, &model.info, model.feature_names.len(), state.schema);
            tips(&mut html);
            html.push_str("</main>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn unavailable(html: &mut String, reason: &str) {
    let _ = write!(
        html,
        "<section class=\"error\" role=\"alert\">\n\
         <p><strong>ERROR: Model file not found or unreadable.</strong> \
         Please ensure '{file}' is in the model directory.</p>\n\
         <p>{reason}</p>\n\
         <ol>\n\
         <li>Export the trained model with the offline training pipeline</li>\n\
         <li>Ensure {file} is saved in the model/ folder</li>\n\
         <li>Restart the app</li>\n\
         </ol>\n</section>\n",
        file = escape(FALLBACK_MODEL_PATH),
        reason = escape(reason),
    );
}

fn form(html: &mut String, state: &ViewState) {
    html.push_str(
        "<section class=\"inputs\">\n<h2>Enter House Features</h2>\n\
         <form method=\"post\" action=\"/\">\n",
    );

    let specs: Vec<_> = state.schema.specs().collect();
    for pair in specs.chunks(2) {
        html.push_str("<div class=\"row\">\n");
        for spec in pair {
            widget(html, spec, state.values.get(spec.feature));
        }
        html.push_str("</div>\n");
    }

    let _ = write!(
        html,
        "<button type=\"submit\" name=\"{SUBMIT_FIELD}\" value=\"1\">Predict Price</button>\n\
         </form>\n</section>\n"
    );
}

fn widget(html: &mut String, spec: &FeatureSpec, value: i64) {
    let kind = match spec.widget {
        Widget::Slider => "range",
        Widget::NumberInput => "number",
    };
    let name = spec.feature.name();

    let _ = write!(
        html,
        "<label for=\"{name}\" title=\"{help}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" \
         step=\"{step}\" value=\"{value}\" title=\"{help}\">\n",
        label = escape(spec.label),
        help = escape(spec.help),
        min = spec.min,
        max = spec.max,
        step = spec.input_step(),
    );

    if spec.widget == Widget::Slider {
        let _ = writeln!(html, "<output for=\"{name}\">{value}</output>");
    }
}

fn outcome(html: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Nothing => {}
        Outcome::Predicted(result) => {
            let _ = write!(
                html,
                "<section class=\"prediction\">\n<p class=\"price\">{}</p>\n\
                 <p>Prediction Generated Successfully!</p>\n</section>\n",
                escape(&result.formatted)
            );
        }
        Outcome::Failed(msg) => {
            let _ = writeln!(
                html,
                "<section class=\"error\" role=\"alert\">Error making prediction: {}</section>",
                escape(msg)
            );
        }
    }
}

fn info(html: &mut String, info: &ModelInfo, nfeatures: usize, schema: &Schema) {
    html.push_str("<aside class=\"model-info\">\n<h2>Model Information</h2>\n<dl>\n");

    if !info.algorithm.is_empty() {
        let _ = writeln!(html, "<dt>Algorithm</dt><dd>{}</dd>", escape(&info.algorithm));
    }
    let _ = writeln!(html, "<dt>Model Type</dt><dd>Regression</dd>");
    let _ = writeln!(html, "<dt>Features Used</dt><dd>{nfeatures}</dd>");
    if let Some(r2) = info.r2 {
        let _ = writeln!(
            html,
            "<dt>Performance</dt><dd>~{:.0}% R&sup2; on test data</dd>",
            r2 * 100.0
        );
    }
    if let Some(samples) = info.training_samples {
        let _ = writeln!(html, "<dt>Training Samples</dt><dd>{samples}</dd>");
    }
    html.push_str("</dl>\n<ul class=\"features\">\n");

    for spec in schema.specs() {
        let _ = writeln!(
            html,
            "<li><code>{}</code>: {} ({} to {})</li>",
            spec.feature.name(),
            escape(spec.description),
            spec.min,
            spec.max
        );
    }

    html.push_str("</ul>\n</aside>\n");
}

fn tips(html: &mut String) {
    html.push_str("<aside class=\"tips\">\n<h2>Quick Tips</h2>\n<ul>\n");
    for (title, tip) in TIPS {
        let _ = writeln!(html, "<li><strong>{title}</strong>: {tip}</li>");
    }
    html.push_str("</ul>\n</aside>\n");
}

/// Escapes the characters with meaning in HTML text and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
