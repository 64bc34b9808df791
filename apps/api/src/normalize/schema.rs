//! Response schemas — the fixed, ordered key sets each analysis feature must
//! return, plus the per-field coercion rule table.
//!
//! Coercion rules are declared per field kind rather than inferred from
//! runtime types, so the mapping is enumerable and testable field by field.

use serde_json::Value;

/// How a field's value is repaired and coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-text feedback. Default `""`; arrays join with `", "`,
    /// non-primitives stringify.
    Text,
    /// Model-reported score, later fed through the rescale curve. Default
    /// `0.0`; kept as number or string so the blender owns numeric fallback.
    Score,
}

/// One required field of a feature's response.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn text(name: &'static str) -> Self {
        Field {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn score(name: &'static str) -> Self {
        Field {
            name,
            kind: FieldKind::Score,
        }
    }

    /// Default inserted when the model omits the field or returns null.
    pub fn default_value(&self) -> Value {
        match self.kind {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Score => Value::from(0.0),
        }
    }

    /// Total coercion from any JSON value to a serializable primitive.
    pub fn coerce(&self, value: Value) -> Value {
        match self.kind {
            FieldKind::Text => coerce_text(value),
            FieldKind::Score => coerce_score(value),
        }
    }
}

/// Generic text coercion, also applied to keys outside any schema:
/// arrays join with `", "`, strings and numbers pass through, everything
/// else is stringified.
pub fn coerce_text(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(render_item)
                .collect::<Vec<_>>()
                .join(", ");
            Value::String(joined)
        }
        Value::String(_) | Value::Number(_) => value,
        other => Value::String(other.to_string()),
    }
}

/// Score coercion keeps numbers and numeric-looking strings untouched; the
/// score blender applies the 75.0 fallback for anything unparseable, so the
/// rule here only has to guarantee a primitive. Arrays join like any other
/// key, so a single-element list score stays parseable.
fn coerce_score(value: Value) -> Value {
    match value {
        Value::Array(_) => coerce_text(value),
        Value::String(_) | Value::Number(_) => value,
        other => Value::String(other.to_string()),
    }
}

fn render_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The named, ordered list of required keys for one analysis feature.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl ResponseSchema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const JOB_ANALYSIS: ResponseSchema = ResponseSchema {
    name: "job-analysis",
    fields: &[
        Field::score("score"),
        Field::text("summaryFeedback"),
        Field::text("skillsFeedback"),
        Field::text("experienceFeedback"),
        Field::text("educationFeedback"),
        Field::text("projectFeedback"),
        Field::text("jobRoleSuggestions"),
        Field::text("overallSuggestions"),
    ],
};

pub const COMPREHENSIVE_ANALYSIS: ResponseSchema = ResponseSchema {
    name: "comprehensive-analysis",
    fields: &[
        Field::score("score"),
        Field::text("comprehensiveAnalysis"),
        Field::text("summaryFeedback"),
        Field::text("skillsFeedback"),
        Field::text("experienceFeedback"),
        Field::text("educationFeedback"),
        Field::text("projectFeedback"),
        Field::text("jobRoleSuggestions"),
        Field::text("overallSuggestions"),
    ],
};

pub const LINKEDIN_OPTIMIZATION: ResponseSchema = ResponseSchema {
    name: "linkedin-optimization",
    fields: &[
        Field::score("profileStrengthScore"),
        Field::text("headlineFeedback"),
        Field::text("summaryFeedback"),
        Field::text("experienceFeedback"),
        Field::text("skillsFeedback"),
        Field::text("activityFeedback"),
        Field::text("keywordSuggestions"),
        Field::text("overallSuggestions"),
    ],
};

pub const REPO_ANALYSIS: ResponseSchema = ResponseSchema {
    name: "repo-analysis",
    fields: &[
        Field::text("purposeFeedback"),
        Field::text("documentationQualityFeedback"),
        Field::text("overallSuggestions"),
    ],
};
