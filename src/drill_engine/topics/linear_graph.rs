//! Straight lines in the coordinate plane (LG-).
//!
//! The payload carries points only. The renderer draws the line through
//! them; `k` and `m` never appear in anything the client sees.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | slope | `slope_from_points` |
//! | 2 | y-intercept | `intercept_from_graph` |
//! | 3 | equation of the line | `line_equation` |
//! | 4 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized},
    math::{linear_str, paren},
    models::{Answer, AnswerType, Clue, Graph, GraphPoint, RenderPayload},
    rng::{resample, DrawExt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Slope = 1,
    Intercept = 2,
    Equation = 3,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Slope, Mode::Intercept, Mode::Equation];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::Slope,
            2 => Mode::Intercept,
            3 => Mode::Equation,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    SlopeFromPoints,
    InterceptFromGraph,
    LineEquation,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::SlopeFromPoints,
        Variation::InterceptFromGraph,
        Variation::LineEquation,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::SlopeFromPoints    => "slope_from_points",
            Variation::InterceptFromGraph => "intercept_from_graph",
            Variation::LineEquation       => "line_equation",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::SlopeFromPoints    => Mode::Slope,
            Variation::InterceptFromGraph => Mode::Intercept,
            Variation::LineEquation       => Mode::Equation,
        }
    }

    fn level(self) -> u8 {
        self.mode() as u8
    }
}

pub fn generate<R: Rng>(rng: &mut R, level: u8, ctx: &GenContext) -> EngineResult<Draft> {
    let mode = Mode::for_level(rng, level);
    let variation = choose_in_mode(rng, mode, &ctx.options);
    build(rng, variation, ctx)
}

/// A line `y = kx + m` with `k` in ±1..=3 and `m` in -5..=5.
fn line<R: Rng>(rng: &mut R) -> (i64, i64) {
    let k = rng.int_between(1, 3) * if rng.gen_bool(0.5) { 1 } else { -1 };
    (k, rng.int_between(-5, 5))
}

/// Two distinct x-values in -4..=4, both off the y-axis.
fn two_xs<R: Rng>(rng: &mut R) -> Option<(i64, i64)> {
    let (a, b) = (rng.int_between(-4, 4), rng.int_between(-4, 4));
    (a != b && a != 0 && b != 0).then_some((a.min(b), a.max(b)))
}

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let lang = ctx.lang;
    let key = variation.key();
    let (x1, x2) = resample(rng, ctx.max_attempts, key, two_xs)?;
    match variation {
        Variation::SlopeFromPoints => {
            let (k, m) = line(rng);
            Ok(slope_from_points(lang, (x1, k * x1 + m), (x2, k * x2 + m)))
        }
        Variation::InterceptFromGraph => {
            let (k, m) = line(rng);
            Ok(intercept_from_graph(lang, (x1, k * x1 + m), (x2, k * x2 + m)))
        }
        Variation::LineEquation => resample(rng, ctx.max_attempts, key, |rng| {
            let (k, m) = line(rng);
            line_equation(lang, (x1, k * x1 + m), (x2, k * x2 + m))
        }),
    }
}

/// Symmetric axis range that keeps every point off the border.
fn axis(values: impl Iterator<Item = i64>) -> (i64, i64) {
    let reach = values.map(i64::abs).max().unwrap_or(0).max(5) + 1;
    (-reach, reach)
}

fn graph(a: (i64, i64), b: (i64, i64)) -> Graph {
    Graph {
        x_range: axis([a.0, b.0].into_iter()),
        y_range: axis([a.1, b.1].into_iter()),
        points: vec![
            GraphPoint { x: a.0, y: a.1, label: Some("A".into()) },
            GraphPoint { x: b.0, y: b.1, label: Some("B".into()) },
        ],
        line_through_points: true,
    }
}

fn point_tex(p: (i64, i64)) -> String {
    format!("({}, {})", p.0, p.1)
}

/// Slope between `a` and `b`; `a.0 < b.0` and the quotient is exact.
fn slope(a: (i64, i64), b: (i64, i64)) -> i64 {
    (b.1 - a.1) / (b.0 - a.0)
}

fn slope_clue(lang: Lang, a: (i64, i64), b: (i64, i64)) -> Clue {
    clue(
        t(lang, Localized::new(
            "Lutningen är förändringen i y delat med förändringen i x.",
            "The slope is the change in y divided by the change in x.",
        )),
        format!(
            "k = \\frac{{{} - {}}}{{{} - {}}} = {}",
            b.1,
            paren(a.1),
            b.0,
            paren(a.0),
            slope(a, b)
        ),
    )
}

fn intercept_clue(lang: Lang, a: (i64, i64), k: i64) -> Clue {
    let m = a.1 - k * a.0;
    clue(
        t(lang, Localized::new(
            "Sätt in en punkt i y = kx + m och lös ut m.",
            "Put one point into y = kx + m and solve for m.",
        )),
        format!("m = {} - {} \\cdot {} = {}", a.1, paren(k), paren(a.0), m),
    )
}

pub fn slope_from_points(lang: Lang, a: (i64, i64), b: (i64, i64)) -> Draft {
    let k = slope(a, b);
    let answer = Answer::numeric(k as f64);
    let clues = vec![slope_clue(lang, a, b), final_clue(lang, &answer, None, Some(format!("k = {}", k)))];
    let description = t(lang, Localized::new(
        format!("Linjen går genom A{} och B{}. Bestäm linjens lutning k.", point_tex(a), point_tex(b)),
        format!("The line passes through A{} and B{}. Find the slope k of the line.", point_tex(a), point_tex(b)),
    ));
    Draft {
        variation: "slope_from_points",
        render: RenderPayload::new(description, AnswerType::Numeric).graph(graph(a, b)),
        answer,
        clues,
    }
}

pub fn intercept_from_graph(lang: Lang, a: (i64, i64), b: (i64, i64)) -> Draft {
    let k = slope(a, b);
    let m = a.1 - k * a.0;
    let answer = Answer::numeric(m as f64);
    let clues = vec![
        slope_clue(lang, a, b),
        intercept_clue(lang, a, k),
        final_clue(lang, &answer, None, Some(format!("m = {}", m))),
    ];
    let description = t(lang, Localized::new(
        "Linjen i grafen går genom A och B. I vilken y-koordinat skär linjen y-axeln?",
        "The line in the graph passes through A and B. At which y-coordinate does it cross the y-axis?",
    ));
    Draft {
        variation: "intercept_from_graph",
        render: RenderPayload::new(description, AnswerType::Numeric).graph(graph(a, b)),
        answer,
        clues,
    }
}

/// `None` when the line passes through the origin; its canonical answer
/// would be a bare `x`.
pub fn line_equation(lang: Lang, a: (i64, i64), b: (i64, i64)) -> Option<Draft> {
    let k = slope(a, b);
    let m = a.1 - k * a.0;
    if k == 0 || m == 0 {
        return None;
    }
    let answer = Answer::Linear { k, m };
    let clues = vec![
        slope_clue(lang, a, b),
        intercept_clue(lang, a, k),
        final_clue(lang, &answer, None, Some(format!("y = {}", linear_str(k, m)))),
    ];
    let description = t(lang, Localized::new(
        "Bestäm ekvationen för linjen genom A och B. Skriv svaret som kx + m.",
        "Find the equation of the line through A and B. Write the answer as kx + m.",
    ));
    Some(Draft {
        variation: "line_equation",
        render: RenderPayload::new(description, AnswerType::Text).graph(graph(a, b)),
        answer,
        clues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::helpers::leaks_answer;

    #[test]
    fn slope_reads_off_two_points() {
        let d = slope_from_points(Lang::En, (-1, 1), (2, 7));
        assert_eq!(d.answer, Answer::numeric(2.0));
        assert_eq!(d.clues[0].latex.as_deref(), Some("k = \\frac{7 - 1}{2 - (-1)} = 2"));
    }

    #[test]
    fn intercept_is_never_a_plotted_point() {
        let d = intercept_from_graph(Lang::Sv, (1, -1), (3, -7));
        assert_eq!(d.answer, Answer::numeric(2.0));
        let g = d.render.graph.as_ref().unwrap();
        assert!(g.points.iter().all(|p| p.x != 0));
        assert!(g.line_through_points);
    }

    #[test]
    fn equation_is_linear_text_without_leaking() {
        let d = line_equation(Lang::En, (1, 5), (2, 7)).unwrap();
        assert_eq!(d.answer, Answer::Linear { k: 2, m: 3 });
        assert_eq!(d.answer.canonical(), "2x + 3");
        assert_eq!(d.render.answer_type, AnswerType::Text);
        assert!(!leaks_answer(&d));
        assert!(line_equation(Lang::En, (1, 2), (2, 4)).is_none());
    }
}
