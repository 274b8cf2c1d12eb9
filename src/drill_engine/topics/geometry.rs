//! Plane figures (GE-): rectangles, triangles and circles.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | rectangles | `rectangle_area`, `rectangle_perimeter`, `concept_right_angle` |
//! | 2 | triangles | `triangle_area` |
//! | 3 | circles | `circle_area`, `circle_circumference` |
//! | 4 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, multiple_choice, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized},
    math::{fmt_num, round1, PI},
    models::{Answer, AnswerType, Clue, Measure, RenderPayload, Shape},
    rng::{resample, DrawExt},
};

const UNIT: &str = "cm";
const SQUARE: &str = "cm²";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Rectangle = 1,
    Triangle = 2,
    Circle = 3,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Rectangle, Mode::Triangle, Mode::Circle];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::Rectangle,
            2 => Mode::Triangle,
            3 => Mode::Circle,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    RectangleArea,
    RectanglePerimeter,
    ConceptRightAngle,
    TriangleArea,
    CircleArea,
    CircleCircumference,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::RectangleArea,
        Variation::RectanglePerimeter,
        Variation::ConceptRightAngle,
        Variation::TriangleArea,
        Variation::CircleArea,
        Variation::CircleCircumference,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::RectangleArea       => "rectangle_area",
            Variation::RectanglePerimeter  => "rectangle_perimeter",
            Variation::ConceptRightAngle   => "concept_right_angle",
            Variation::TriangleArea        => "triangle_area",
            Variation::CircleArea          => "circle_area",
            Variation::CircleCircumference => "circle_circumference",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::RectangleArea | Variation::RectanglePerimeter | Variation::ConceptRightAngle => Mode::Rectangle,
            Variation::TriangleArea => Mode::Triangle,
            Variation::CircleArea | Variation::CircleCircumference => Mode::Circle,
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

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let lang = ctx.lang;
    let hi = ctx.upper(12);
    match variation {
        Variation::RectangleArea => {
            let (w, h) = (rng.int_between(2, hi), rng.int_between(2, hi));
            Ok(rectangle_area(lang, w, h))
        }
        Variation::RectanglePerimeter => {
            let (w, h) = (rng.int_between(2, hi), rng.int_between(2, hi));
            Ok(rectangle_perimeter(lang, w, h))
        }
        Variation::TriangleArea => resample(rng, ctx.max_attempts, variation.key(), |rng| {
            let (b, h) = (rng.int_between(2, hi), rng.int_between(2, hi));
            triangle_area(lang, b, h)
        }),
        Variation::CircleArea => Ok(circle_area(lang, rng.int_between(1, 10))),
        Variation::CircleCircumference => Ok(circle_circumference(lang, rng.int_between(2, 20))),
        Variation::ConceptRightAngle => Ok(multiple_choice(
            rng,
            ctx,
            variation.key(),
            Localized::new("Hur många grader är en rät vinkel?", "How many degrees is a right angle?"),
            Localized::new("90°", "90°"),
            &[
                Localized::new("45°", "45°"),
                Localized::new("180°", "180°"),
                Localized::new("360°", "360°"),
            ],
            Localized::new(
                "En rät vinkel är ett kvarts varv, och ett helt varv är 360°.",
                "A right angle is a quarter turn, and a full turn is 360°.",
            ),
        )),
    }
}

fn calculate(lang: Lang, what: Localized, figure: Localized) -> String {
    t(lang, Localized::new(
        format!("Beräkna {} av {}.", what.sv, figure.sv),
        format!("Calculate the {} of the {}.", what.en, figure.en),
    ))
}

fn with_pi_note(lang: Lang, description: String) -> String {
    let note = t(lang, Localized::new(
        "Använd π ≈ 3,14 och avrunda till en decimal.",
        "Use π ≈ 3.14 and round to one decimal place.",
    ));
    format!("{} {}", description, note)
}

fn rule(lang: Lang, text: Localized, latex: &str) -> Clue {
    clue(t(lang, text), latex.to_string())
}

fn substitute(lang: Lang, latex: String) -> Clue {
    clue(
        t(lang, Localized::new("Sätt in måtten.", "Substitute the measurements.")),
        latex,
    )
}

fn sides(w: i64, h: i64) -> Vec<Measure> {
    vec![Measure::known("b", w as f64, UNIT), Measure::known("h", h as f64, UNIT)]
}

pub fn rectangle_area(lang: Lang, w: i64, h: i64) -> Draft {
    let area = w * h;
    let answer = Answer::numeric(area as f64);
    let clues = vec![
        rule(lang, Localized::new("Area = bas · höjd", "Area = base · height"), "A = b \\cdot h"),
        substitute(lang, format!("A = {} \\cdot {}", w, h)),
        final_clue(lang, &answer, Some(SQUARE), Some(format!("A = {}\\text{{ cm}}^2", area))),
    ];
    Draft {
        variation: "rectangle_area",
        render: RenderPayload::new(
            calculate(lang, Localized::new("arean", "area"), Localized::new("rektangeln", "rectangle")),
            AnswerType::Numeric,
        )
        .unit(SQUARE)
        .geometry(Shape::Rectangle, sides(w, h)),
        answer,
        clues,
    }
}

pub fn rectangle_perimeter(lang: Lang, w: i64, h: i64) -> Draft {
    let perimeter = 2 * (w + h);
    let answer = Answer::numeric(perimeter as f64);
    let clues = vec![
        rule(
            lang,
            Localized::new("Omkretsen är summan av alla fyra sidor.", "The perimeter is the sum of all four sides."),
            "O = 2b + 2h",
        ),
        substitute(lang, format!("O = 2 \\cdot {} + 2 \\cdot {}", w, h)),
        final_clue(lang, &answer, Some(UNIT), Some(format!("O = {}\\text{{ cm}}", perimeter))),
    ];
    Draft {
        variation: "rectangle_perimeter",
        render: RenderPayload::new(
            calculate(lang, Localized::new("omkretsen", "perimeter"), Localized::new("rektangeln", "rectangle")),
            AnswerType::Numeric,
        )
        .unit(UNIT)
        .geometry(Shape::Rectangle, sides(w, h)),
        answer,
        clues,
    }
}

/// `None` unless `b · h` is even, so the area is a whole number.
pub fn triangle_area(lang: Lang, b: i64, h: i64) -> Option<Draft> {
    if (b * h) % 2 != 0 {
        return None;
    }
    let area = b * h / 2;
    let answer = Answer::numeric(area as f64);
    let clues = vec![
        rule(
            lang,
            Localized::new("Area = bas · höjd / 2", "Area = base · height / 2"),
            "A = \\frac{b \\cdot h}{2}",
        ),
        substitute(lang, format!("A = \\frac{{{} \\cdot {}}}{{2}}", b, h)),
        final_clue(lang, &answer, Some(SQUARE), Some(format!("A = {}\\text{{ cm}}^2", area))),
    ];
    Some(Draft {
        variation: "triangle_area",
        render: RenderPayload::new(
            calculate(lang, Localized::new("arean", "area"), Localized::new("triangeln", "triangle")),
            AnswerType::Numeric,
        )
        .unit(SQUARE)
        .geometry(Shape::Triangle, sides(b, h)),
        answer,
        clues,
    })
}

pub fn circle_area(lang: Lang, r: i64) -> Draft {
    let area = round1(PI * (r * r) as f64);
    let answer = Answer::numeric(area);
    let clues = vec![
        rule(lang, Localized::new("Area = π · r²", "Area = π · r²"), "A = \\pi r^2"),
        substitute(lang, format!("A \\approx 3.14 \\cdot {}^2", r)),
        final_clue(lang, &answer, Some(SQUARE), Some(format!("A \\approx {}\\text{{ cm}}^2", fmt_num(area)))),
    ];
    Draft {
        variation: "circle_area",
        render: RenderPayload::new(
            with_pi_note(lang, calculate(lang, Localized::new("arean", "area"), Localized::new("cirkeln", "circle"))),
            AnswerType::Numeric,
        )
        .unit(SQUARE)
        .geometry(Shape::Circle, vec![Measure::known("r", r as f64, UNIT)]),
        answer,
        clues,
    }
}

pub fn circle_circumference(lang: Lang, d: i64) -> Draft {
    let circumference = round1(PI * d as f64);
    let answer = Answer::numeric(circumference);
    let clues = vec![
        rule(lang, Localized::new("Omkrets = π · diameter", "Circumference = π · diameter"), "O = \\pi d"),
        substitute(lang, format!("O \\approx 3.14 \\cdot {}", d)),
        final_clue(lang, &answer, Some(UNIT), Some(format!("O \\approx {}\\text{{ cm}}", fmt_num(circumference)))),
    ];
    Draft {
        variation: "circle_circumference",
        render: RenderPayload::new(
            with_pi_note(
                lang,
                calculate(lang, Localized::new("omkretsen", "circumference"), Localized::new("cirkeln", "circle")),
            ),
            AnswerType::Numeric,
        )
        .unit(UNIT)
        .geometry(Shape::Circle, vec![Measure::known("d", d as f64, UNIT)]),
        answer,
        clues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::GenOptions;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rectangle_area_and_perimeter() {
        assert_eq!(rectangle_area(Lang::En, 4, 7).answer, Answer::numeric(28.0));
        assert_eq!(rectangle_perimeter(Lang::En, 4, 7).answer, Answer::numeric(22.0));
    }

    #[test]
    fn odd_triangle_products_are_rejected() {
        assert!(triangle_area(Lang::Sv, 3, 5).is_none());
        assert_eq!(triangle_area(Lang::Sv, 6, 5).unwrap().answer, Answer::numeric(15.0));
    }

    #[test]
    fn circles_use_one_decimal_pi() {
        assert_eq!(circle_area(Lang::En, 2).answer.canonical(), "12.6");
        assert_eq!(circle_circumference(Lang::En, 10).answer.canonical(), "31.4");
    }

    #[test]
    fn right_angle_choices_contain_ninety_once() {
        let ctx = GenContext::new(Lang::En, GenOptions::default(), 64);
        let mut rng = StdRng::seed_from_u64(3);
        let d = build(&mut rng, Variation::ConceptRightAngle, &ctx).unwrap();
        let choices = d.render.choices.unwrap();
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.iter().filter(|c| c.as_str() == "90°").count(), 1);
        assert_eq!(d.answer, Answer::text("90°"));
    }

    #[test]
    fn huge_multiplier_is_clamped_in_operand_ranges() {
        let options = GenOptions { hide_concept: true, multiplier: u32::MAX };
        let ctx = GenContext::new(Lang::En, options, 64);
        assert_eq!(ctx.upper(12), 12 * i64::from(GenOptions::MAX_MULTIPLIER));
        let mut rng = StdRng::seed_from_u64(11);
        for variation in [Variation::RectangleArea, Variation::TriangleArea, Variation::CircleArea] {
            let d = build(&mut rng, variation, &ctx).unwrap();
            if let Answer::Numeric { value } = d.answer {
                assert!(value > 0.0 && value <= 120.0 * 120.0, "{}: {value}", d.variation);
            }
        }
    }
}
