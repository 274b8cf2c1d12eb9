//! Volume of solids (VO-).
//!
//! Dimensions are drawn from 2..=10 so the generated diagrams stay well
//! proportioned. Modes involving π use 3.14 and round to one decimal.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | right prisms | `volume_cuboid`, `volume_cube` |
//! | 2 | triangular prism | `volume_triangular_prism` |
//! | 3 | cylinder | `volume_cylinder`, `volume_cylinder_diameter` |
//! | 4 | cone and sphere | `volume_cone`, `volume_sphere` |
//! | 5 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized},
    math::{fmt_num, round1, PI},
    models::{Answer, AnswerType, Clue, Measure, RenderPayload, Shape},
    rng::{resample, DrawExt},
};

const DIM_MIN: i64 = 2;
const DIM_MAX: i64 = 10;
const UNIT: &str = "cm";
const CUBIC: &str = "cm³";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Prism = 1,
    TriangularPrism = 2,
    Cylinder = 3,
    ConeSphere = 4,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Prism, Mode::TriangularPrism, Mode::Cylinder, Mode::ConeSphere];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::Prism,
            2 => Mode::TriangularPrism,
            3 => Mode::Cylinder,
            4 => Mode::ConeSphere,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    Cuboid,
    Cube,
    TriangularPrism,
    Cylinder,
    CylinderDiameter,
    Cone,
    Sphere,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::Cuboid,
        Variation::Cube,
        Variation::TriangularPrism,
        Variation::Cylinder,
        Variation::CylinderDiameter,
        Variation::Cone,
        Variation::Sphere,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::Cuboid           => "volume_cuboid",
            Variation::Cube             => "volume_cube",
            Variation::TriangularPrism  => "volume_triangular_prism",
            Variation::Cylinder         => "volume_cylinder",
            Variation::CylinderDiameter => "volume_cylinder_diameter",
            Variation::Cone             => "volume_cone",
            Variation::Sphere           => "volume_sphere",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::Cuboid | Variation::Cube => Mode::Prism,
            Variation::TriangularPrism => Mode::TriangularPrism,
            Variation::Cylinder | Variation::CylinderDiameter => Mode::Cylinder,
            Variation::Cone | Variation::Sphere => Mode::ConeSphere,
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

fn dim<R: Rng>(rng: &mut R) -> i64 {
    rng.int_between(DIM_MIN, DIM_MAX)
}

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let lang = ctx.lang;
    match variation {
        Variation::Cuboid => {
            let (l, w, h) = (dim(rng), dim(rng), dim(rng));
            Ok(cuboid(lang, l, w, h))
        }
        Variation::Cube => Ok(cube(lang, dim(rng))),
        // Base × height must be even so the triangle area is whole.
        Variation::TriangularPrism => resample(rng, ctx.max_attempts, variation.key(), |rng| {
            let (b, hb, l) = (dim(rng), dim(rng), dim(rng));
            ((b * hb) % 2 == 0).then(|| triangular_prism(lang, b, hb, l))
        }),
        Variation::Cylinder => {
            let (r, h) = (dim(rng), dim(rng));
            Ok(cylinder(lang, r, h, false))
        }
        Variation::CylinderDiameter => {
            let (r, h) = (dim(rng), dim(rng));
            Ok(cylinder(lang, r, h, true))
        }
        Variation::Cone => {
            let (r, h) = (dim(rng), dim(rng));
            Ok(cone(lang, r, h))
        }
        Variation::Sphere => Ok(sphere(lang, dim(rng))),
    }
}

fn describe(lang: Lang, solid: Localized, rounded: bool) -> String {
    let base = t(lang, Localized::new(
        format!("Beräkna volymen av {}.", solid.sv),
        format!("Calculate the volume of the {}.", solid.en),
    ));
    if rounded {
        let tail = t(lang, Localized::new(
            "Använd π ≈ 3,14 och avrunda till en decimal.",
            "Use π ≈ 3.14 and round to one decimal place.",
        ));
        format!("{} {}", base, tail)
    } else {
        base
    }
}

fn formula_clue(lang: Lang, rule: Localized, formula: &str) -> Clue {
    clue(t(lang, rule), formula.to_string())
}

fn substitute_clue(lang: Lang, latex: String) -> Clue {
    clue(
        t(lang, Localized::new("Sätt in måtten i formeln.", "Substitute the measurements into the formula.")),
        latex,
    )
}

fn finish(lang: Lang, volume: f64, approx: bool, mut clues: Vec<Clue>) -> (Answer, Vec<Clue>) {
    let answer = Answer::numeric(volume);
    let rel = if approx { "\\approx" } else { "=" };
    clues.push(final_clue(
        lang,
        &answer,
        Some(CUBIC),
        Some(format!("V {} {}\\text{{ cm}}^3", rel, fmt_num(volume))),
    ));
    (answer, clues)
}

pub fn cuboid(lang: Lang, l: i64, w: i64, h: i64) -> Draft {
    let v = l * w * h;
    let clues = vec![
        formula_clue(
            lang,
            Localized::new("Volym = längd · bredd · höjd", "Volume = length · width · height"),
            "V = l \\cdot b \\cdot h",
        ),
        substitute_clue(lang, format!("V = {} \\cdot {} \\cdot {} = {}", l, w, h, v)),
    ];
    let (answer, clues) = finish(lang, v as f64, false, clues);
    Draft {
        variation: "volume_cuboid",
        render: RenderPayload::new(describe(lang, Localized::new("rätblocket", "cuboid"), false), AnswerType::Numeric)
            .unit(CUBIC)
            .geometry(
                Shape::Cuboid,
                vec![
                    Measure::known("l", l as f64, UNIT),
                    Measure::known("b", w as f64, UNIT),
                    Measure::known("h", h as f64, UNIT),
                ],
            ),
        answer,
        clues,
    }
}

pub fn cube(lang: Lang, s: i64) -> Draft {
    let v = s * s * s;
    let clues = vec![
        formula_clue(
            lang,
            Localized::new("Alla sidor i en kub är lika långa: V = s³", "All edges of a cube are equal: V = s³"),
            "V = s^3",
        ),
        substitute_clue(lang, format!("V = {}^3 = {} \\cdot {} \\cdot {} = {}", s, s, s, s, v)),
    ];
    let (answer, clues) = finish(lang, v as f64, false, clues);
    Draft {
        variation: "volume_cube",
        render: RenderPayload::new(describe(lang, Localized::new("kuben", "cube"), false), AnswerType::Numeric)
            .unit(CUBIC)
            .geometry(Shape::Cube, vec![Measure::known("s", s as f64, UNIT)]),
        answer,
        clues,
    }
}

/// Triangle base `b`, triangle height `hb`, prism length `l`.
pub fn triangular_prism(lang: Lang, b: i64, hb: i64, l: i64) -> Draft {
    let base_area = b * hb / 2;
    let v = base_area * l;
    let clues = vec![
        formula_clue(
            lang,
            Localized::new("Volym = basytans area · längd", "Volume = base area · length"),
            "V = B \\cdot l",
        ),
        clue(
            t(lang, Localized::new("Basytan är en triangel.", "The base is a triangle.")),
            format!("B = \\frac{{{} \\cdot {}}}{{2}} = {}", b, hb, base_area),
        ),
        substitute_clue(lang, format!("V = {} \\cdot {} = {}", base_area, l, v)),
    ];
    let (answer, clues) = finish(lang, v as f64, false, clues);
    Draft {
        variation: "volume_triangular_prism",
        render: RenderPayload::new(
            describe(lang, Localized::new("det triangulära prismat", "triangular prism"), false),
            AnswerType::Numeric,
        )
        .unit(CUBIC)
        .geometry(
            Shape::TriangularPrism,
            vec![
                Measure::known("b", b as f64, UNIT),
                Measure::known("h", hb as f64, UNIT),
                Measure::known("l", l as f64, UNIT),
            ],
        ),
        answer,
        clues,
    }
}

/// Cylinder of radius `r`, height `h`. With `show_diameter` the figure is
/// labelled with `d = 2r` and the first clue halves it.
pub fn cylinder(lang: Lang, r: i64, h: i64, show_diameter: bool) -> Draft {
    let v = round1(PI * (r * r) as f64 * h as f64);
    let mut clues = Vec::new();
    if show_diameter {
        clues.push(clue(
            t(lang, Localized::new("Radien är halva diametern.", "The radius is half the diameter.")),
            format!("r = \\frac{{{}}}{{2}} = {}", 2 * r, r),
        ));
    }
    clues.push(formula_clue(
        lang,
        Localized::new("Volym = basytans area · höjd = πr² · h", "Volume = base area · height = πr² · h"),
        "V = \\pi r^2 h",
    ));
    clues.push(substitute_clue(
        lang,
        format!("V = 3.14 \\cdot {}^2 \\cdot {} = 3.14 \\cdot {} \\cdot {}", r, h, r * r, h),
    ));
    let (answer, clues) = finish(lang, v, true, clues);

    let (variation, radius_measure) = if show_diameter {
        ("volume_cylinder_diameter", Measure::known("d", (2 * r) as f64, UNIT))
    } else {
        ("volume_cylinder", Measure::known("r", r as f64, UNIT))
    };
    Draft {
        variation,
        render: RenderPayload::new(describe(lang, Localized::new("cylindern", "cylinder"), true), AnswerType::Numeric)
            .unit(CUBIC)
            .geometry(Shape::Cylinder, vec![radius_measure, Measure::known("h", h as f64, UNIT)]),
        answer,
        clues,
    }
}

pub fn cone(lang: Lang, r: i64, h: i64) -> Draft {
    let v = round1(PI * (r * r) as f64 * h as f64 / 3.0);
    let clues = vec![
        formula_clue(
            lang,
            Localized::new("Volym = basytans area · höjd / 3", "Volume = base area · height / 3"),
            "V = \\frac{\\pi r^2 h}{3}",
        ),
        substitute_clue(lang, format!("V = \\frac{{3.14 \\cdot {}^2 \\cdot {}}}{{3}}", r, h)),
    ];
    let (answer, clues) = finish(lang, v, true, clues);
    Draft {
        variation: "volume_cone",
        render: RenderPayload::new(describe(lang, Localized::new("konen", "cone"), true), AnswerType::Numeric)
            .unit(CUBIC)
            .geometry(
                Shape::Cone,
                vec![Measure::known("r", r as f64, UNIT), Measure::known("h", h as f64, UNIT)],
            ),
        answer,
        clues,
    }
}

pub fn sphere(lang: Lang, r: i64) -> Draft {
    let v = round1(4.0 * PI * (r * r * r) as f64 / 3.0);
    let clues = vec![
        formula_clue(
            lang,
            Localized::new("Volym = 4πr³ / 3", "Volume = 4πr³ / 3"),
            "V = \\frac{4 \\pi r^3}{3}",
        ),
        substitute_clue(lang, format!("V = \\frac{{4 \\cdot 3.14 \\cdot {}^3}}{{3}}", r)),
    ];
    let (answer, clues) = finish(lang, v, true, clues);
    Draft {
        variation: "volume_sphere",
        render: RenderPayload::new(describe(lang, Localized::new("klotet", "sphere"), true), AnswerType::Numeric)
            .unit(CUBIC)
            .geometry(Shape::Sphere, vec![Measure::known("r", r as f64, UNIT)]),
        answer,
        clues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_from_diameter() {
        let d = cylinder(Lang::En, 4, 10, true);
        assert_eq!(d.answer, Answer::numeric(502.4));
        assert_eq!(d.variation, "volume_cylinder_diameter");
        let geo = d.render.geometry.as_ref().unwrap();
        assert_eq!(geo.measures[0].label, "d");
        assert_eq!(geo.measures[0].value, Some(8.0));
        assert!(d.clues.last().unwrap().latex.as_deref().unwrap().contains("502.4"));
    }

    #[test]
    fn exact_solids() {
        assert_eq!(cuboid(Lang::Sv, 3, 4, 5).answer, Answer::numeric(60.0));
        assert_eq!(cube(Lang::Sv, 3).answer, Answer::numeric(27.0));
        assert_eq!(triangular_prism(Lang::Sv, 4, 3, 10).answer, Answer::numeric(60.0));
    }

    #[test]
    fn rounded_solids() {
        // 3.14 · 9 · 4 / 3 = 37.68
        assert_eq!(cone(Lang::En, 3, 4).answer, Answer::numeric(37.7));
        // 4 · 3.14 · 8 / 3 = 33.49…
        assert_eq!(sphere(Lang::En, 2).answer, Answer::numeric(33.5));
    }

    #[test]
    fn dimensions_stay_in_bounds() {
        let ctx = GenContext::new(Lang::En, Default::default(), 64);
        let mut rng = crate::drill_engine::rng::stream_for(Some("dims"));
        for _ in 0..50 {
            let d = generate(&mut rng, 5, &ctx).unwrap();
            for m in &d.render.geometry.unwrap().measures {
                let v = m.value.unwrap();
                assert!((2.0..=20.0).contains(&v), "{} out of range", v);
            }
        }
    }
}
