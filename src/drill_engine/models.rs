use std::fmt;
use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    i18n::Lang,
    math::{fmt_num, linear_str},
};

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    #[serde(rename = "fraction_arith")]
    FractionArithmetic,
    Scale,
    Volume,
    Similarity,
    Equations,
    LinearGraph,
    Simplify,
    Geometry,
    NegativeNumbers,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::FractionArithmetic,
        Topic::Scale,
        Topic::Volume,
        Topic::Similarity,
        Topic::Equations,
        Topic::LinearGraph,
        Topic::Simplify,
        Topic::Geometry,
        Topic::NegativeNumbers,
    ];

    /// Stable wire key, e.g. `"fraction_arith"`.
    pub fn key(self) -> &'static str {
        match self {
            Topic::FractionArithmetic => "fraction_arith",
            Topic::Scale              => "scale",
            Topic::Volume             => "volume",
            Topic::Similarity         => "similarity",
            Topic::Equations          => "equations",
            Topic::LinearGraph        => "linear_graph",
            Topic::Simplify           => "simplify",
            Topic::Geometry           => "geometry",
            Topic::NegativeNumbers    => "negative_numbers",
        }
    }

    pub fn from_key(key: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Prefix of every question ID generated for this topic.
    pub fn prefix(self) -> &'static str {
        match self {
            Topic::FractionArithmetic => "FR",
            Topic::Scale              => "SC",
            Topic::Volume             => "VO",
            Topic::Similarity         => "SI",
            Topic::Equations          => "EQ",
            Topic::LinearGraph        => "LG",
            Topic::Simplify           => "SM",
            Topic::Geometry           => "GE",
            Topic::NegativeNumbers    => "NE",
        }
    }

    /// Highest level; always the "mixed" level.
    pub fn max_level(self) -> u8 {
        match self {
            Topic::FractionArithmetic
            | Topic::Scale
            | Topic::Volume
            | Topic::Equations
            | Topic::Simplify => 5,
            Topic::Similarity
            | Topic::LinearGraph
            | Topic::Geometry
            | Topic::NegativeNumbers => 4,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// Ground truth of a question. Every variant has exactly one canonical
/// string form (see [`Answer::canonical`]) which is what the token carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    Numeric { value: f64 },
    Text { value: String },
    Fraction { n: i64, d: i64 },
    Ratio { left: i64, right: i64 },
    /// Coefficients of `kx + m`.
    Linear { k: i64, m: i64 },
}

impl Answer {
    pub fn numeric(value: f64) -> Self {
        Answer::Numeric { value }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text { value: value.into() }
    }

    pub fn canonical(&self) -> String {
        match self {
            Answer::Numeric { value }      => fmt_num(*value),
            Answer::Text { value }         => value.clone(),
            Answer::Fraction { n, d }      => format!("{}/{}", n, d),
            Answer::Ratio { left, right }  => format!("{}:{}", left, right),
            Answer::Linear { k, m }        => linear_str(*k, *m),
        }
    }

    /// Inverse of [`Answer::canonical`]. Shapes are tried in the order
    /// ratio, fraction, linear, number; anything else is text. A linear
    /// answer with `k == 0` reads back as a number with the same canonical
    /// string.
    pub fn parse_canonical(s: &str) -> Answer {
        if let Some((l, r)) = split_ints(s, ':') {
            return Answer::Ratio { left: l, right: r };
        }
        if let Some((n, d)) = split_ints(s, '/') {
            return Answer::Fraction { n, d };
        }
        if let Some((k, m)) = parse_linear(s) {
            return Answer::Linear { k, m };
        }
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Answer::Numeric { value: v },
            _ => Answer::Text { value: s.to_string() },
        }
    }
}

fn split_ints(s: &str, sep: char) -> Option<(i64, i64)> {
    let (a, b) = s.split_once(sep)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_linear(s: &str) -> Option<(i64, i64)> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let (coef, rest) = compact.split_once('x')?;
    let k = match coef {
        ""  => 1,
        "-" => -1,
        c   => c.parse().ok()?,
    };
    let m = if rest.is_empty() {
        0
    } else {
        if !rest.starts_with('+') && !rest.starts_with('-') {
            return None;
        }
        rest.parse().ok()?
    };
    Some((k, m))
}

/// Which input widget / comparison the consumer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    Numeric,
    Fraction,
    Scale,
    MultipleChoice,
    Text,
}

// ---------------------------------------------------------------------------
// Render payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Cuboid,
    Cube,
    TriangularPrism,
    Cylinder,
    Cone,
    Sphere,
    Rectangle,
    Triangle,
    Circle,
    SimilarTriangles,
}

/// One labelled dimension of a figure. `value: None` marks the unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Measure {
    pub fn known(label: impl Into<String>, value: f64, unit: &str) -> Self {
        Measure { label: label.into(), value: Some(value), unit: Some(unit.to_string()) }
    }

    pub fn unknown(label: impl Into<String>) -> Self {
        Measure { label: label.into(), value: None, unit: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub shape: Shape,
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: i64,
    pub y: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Coordinate-plane descriptor. The renderer draws a line through the
/// points when `line_through_points` is set; the line's equation is never
/// part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub x_range: (i64, i64),
    pub y_range: (i64, i64),
    pub points: Vec<GraphPoint>,
    pub line_through_points: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,
    pub answer_type: AnswerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<Graph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl RenderPayload {
    pub fn new(description: String, answer_type: AnswerType) -> Self {
        RenderPayload {
            description,
            latex: None,
            answer_type,
            unit: None,
            geometry: None,
            graph: None,
            choices: None,
        }
    }

    pub fn latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = Some(latex.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn geometry(mut self, shape: Shape, measures: Vec<Measure>) -> Self {
        self.geometry = Some(Geometry { shape, measures });
        self
    }

    pub fn graph(mut self, graph: Graph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }
}

// ---------------------------------------------------------------------------
// Generated question
// ---------------------------------------------------------------------------

/// One step of the revealed derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerData {
    pub answer: Answer,
    pub solution_steps: Vec<Clue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question_id: String,
    pub topic: Topic,
    pub level: u8,
    /// Variation key that produced this question, e.g. `"add_diff_denom"`.
    /// Stable across seeds; useful for per-skill progress tracking.
    pub variation: String,
    pub render_data: RenderPayload,
    pub server_data: ServerData,
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Per-call generation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenOptions {
    /// Drop multiple-choice `concept_*` variations.
    #[serde(default)]
    pub hide_concept: bool,
    /// Scales the upper bound of free operand ranges (values below 1 count
    /// as 1, values above [`GenOptions::MAX_MULTIPLIER`] are rejected).
    #[serde(default = "one")]
    pub multiplier: u32,
}

impl GenOptions {
    /// Largest accepted multiplier. Keeps every product of scaled operands
    /// far inside `i64`.
    pub const MAX_MULTIPLIER: u32 = 10;
}

fn one() -> u32 {
    1
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions { hide_concept: false, multiplier: 1 }
    }
}

/// Raw inbound request as it arrives from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub topic: String,
    pub level: u32,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub variation: Option<String>,
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(flatten)]
    pub options: GenOptions,
}

impl QuestionRequest {
    /// Minimal request: Swedish, random seed, no variation, default options.
    pub fn new(topic: impl Into<String>, level: u32) -> Self {
        QuestionRequest {
            topic: topic.into(),
            level,
            lang: Lang::Sv,
            variation: None,
            seed: None,
            options: GenOptions::default(),
        }
    }

    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn variation(mut self, key: impl Into<String>) -> Self {
        self.variation = Some(key.into());
        self
    }
}

/// Envelope sent to the client. The answer travels only inside `token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: String,
    pub render_data: RenderPayload,
    pub clues: Vec<Clue>,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_keys_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_key(topic.key()), Some(topic));
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.key()));
        }
        assert_eq!(Topic::from_key("trigonometry"), None);
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(Answer::numeric(350.0).canonical(), "350");
        assert_eq!(Answer::numeric(502.4).canonical(), "502.4");
        assert_eq!(Answer::Fraction { n: 5, d: 8 }.canonical(), "5/8");
        assert_eq!(Answer::Ratio { left: 1, right: 50 }.canonical(), "1:50");
        assert_eq!(Answer::Linear { k: 2, m: -3 }.canonical(), "2x - 3");
        assert_eq!(Answer::text("Lika stora").canonical(), "Lika stora");
    }

    #[test]
    fn parse_canonical_recovers_every_shape() {
        let answers = [
            Answer::numeric(-12.0),
            Answer::numeric(78.5),
            Answer::Fraction { n: 3, d: 4 },
            Answer::Ratio { left: 20, right: 1 },
            Answer::Linear { k: -1, m: 4 },
            Answer::Linear { k: 8, m: 0 },
            Answer::text("Vinklarna är lika stora"),
        ];
        for a in answers {
            assert_eq!(Answer::parse_canonical(&a.canonical()), a);
        }
    }

    #[test]
    fn request_deserialises_from_query_shape() {
        let req: QuestionRequest = serde_json::from_str(
            r#"{"topic":"scale","level":2,"lang":"en","hideConcept":true}"#,
        )
        .unwrap();
        assert_eq!(req.lang, Lang::En);
        assert!(req.options.hide_concept);
        assert_eq!(req.options.multiplier, 1);
        assert_eq!(req.variation, None);
    }
}
