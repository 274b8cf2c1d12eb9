//! Similar figures (SI-).
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | scale factor between similar triangles | `similar_scale_factor`, `concept_similar_angles` |
//! | 2 | missing side | `similar_missing_side` |
//! | 3 | area scale = length scale² | `similar_area_ratio` |
//! | 4 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, multiple_choice, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized},
    models::{Answer, AnswerType, Measure, RenderPayload, Shape},
    rng::{resample, DrawExt},
};

const UNIT: &str = "cm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    ScaleFactor = 1,
    MissingSide = 2,
    AreaRatio = 3,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::ScaleFactor, Mode::MissingSide, Mode::AreaRatio];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::ScaleFactor,
            2 => Mode::MissingSide,
            3 => Mode::AreaRatio,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    ScaleFactor,
    ConceptAngles,
    MissingSide,
    AreaRatio,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::ScaleFactor,
        Variation::ConceptAngles,
        Variation::MissingSide,
        Variation::AreaRatio,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::ScaleFactor   => "similar_scale_factor",
            Variation::ConceptAngles => "concept_similar_angles",
            Variation::MissingSide   => "similar_missing_side",
            Variation::AreaRatio     => "similar_area_ratio",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::ScaleFactor | Variation::ConceptAngles => Mode::ScaleFactor,
            Variation::MissingSide => Mode::MissingSide,
            Variation::AreaRatio   => Mode::AreaRatio,
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

/// Three sides 2..=9 that form a proper triangle.
fn triangle<R: Rng>(rng: &mut R) -> Option<[i64; 3]> {
    let s = [rng.int_between(2, 9), rng.int_between(2, 9), rng.int_between(2, 9)];
    let ok = s[0] + s[1] > s[2] && s[0] + s[2] > s[1] && s[1] + s[2] > s[0];
    ok.then_some(s)
}

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let lang = ctx.lang;
    let key = variation.key();
    match variation {
        Variation::ScaleFactor => {
            let small = resample(rng, ctx.max_attempts, key, triangle)?;
            let k = rng.int_between(2, 4);
            Ok(scale_factor(lang, small, k))
        }
        Variation::MissingSide => {
            let small = resample(rng, ctx.max_attempts, key, triangle)?;
            let k = rng.int_between(2, 4);
            Ok(missing_side(lang, small, k))
        }
        Variation::AreaRatio => {
            let k = rng.int_between(2, 5);
            let area = rng.int_between(2, ctx.upper(12));
            Ok(area_ratio(lang, area, k))
        }
        Variation::ConceptAngles => Ok(multiple_choice(
            rng,
            ctx,
            key,
            Localized::new(
                "Vad gäller alltid för vinklarna i två likformiga trianglar?",
                "What is always true about the angles of two similar triangles?",
            ),
            Localized::new("Motsvarande vinklar är lika stora", "Corresponding angles are equal"),
            &[
                Localized::new("Den större triangeln har större vinklar", "The larger triangle has larger angles"),
                Localized::new("Vinklarna multipliceras med skalfaktorn", "The angles are multiplied by the scale factor"),
                Localized::new("Vinkelsumman är olika i trianglarna", "The angle sums differ between the triangles"),
            ],
            Localized::new(
                "Likformiga figurer har samma form: bara längderna skalas, vinklarna är oförändrade.",
                "Similar figures have the same shape: only lengths are scaled, angles stay the same.",
            ),
        )),
    }
}

fn triangle_measures(small: [i64; 3], big: [Option<i64>; 3]) -> Vec<Measure> {
    let labels = ["a", "b", "c"];
    let mut out: Vec<Measure> = labels
        .iter()
        .zip(small)
        .map(|(l, s)| Measure::known(*l, s as f64, UNIT))
        .collect();
    for (l, b) in labels.iter().zip(big) {
        let label = format!("{}'", l);
        out.push(match b {
            Some(v) => Measure::known(label, v as f64, UNIT),
            None => Measure::unknown(format!("{} = x", label)),
        });
    }
    out
}

/// Length scale factor from the small triangle `small` to a copy scaled by `k`.
pub fn scale_factor(lang: Lang, small: [i64; 3], k: i64) -> Draft {
    let big = small.map(|s| s * k);
    let answer = Answer::numeric(k as f64);
    let clues = vec![
        clue(
            t(lang, Localized::new(
                "Dividera en sida i den stora triangeln med motsvarande sida i den lilla.",
                "Divide a side of the large triangle by the corresponding side of the small one.",
            )),
            format!("\\frac{{{}}}{{{}}} = {}", big[0], small[0], k),
        ),
        clue(
            t(lang, Localized::new("Kontrollera med en annan sida.", "Check with another side.")),
            format!("\\frac{{{}}}{{{}}} = {}", big[1], small[1], k),
        ),
        final_clue(lang, &answer, None, Some(format!("k = {}", k))),
    ];
    let description = t(lang, Localized::new(
        "Trianglarna är likformiga. Bestäm skalfaktorn från den lilla till den stora triangeln.",
        "The triangles are similar. Find the scale factor from the small triangle to the large one.",
    ));
    Draft {
        variation: "similar_scale_factor",
        render: RenderPayload::new(description, AnswerType::Numeric).geometry(
            Shape::SimilarTriangles,
            triangle_measures(small, [Some(big[0]), Some(big[1]), Some(big[2])]),
        ),
        answer,
        clues,
    }
}

/// Side `c'` of the large triangle is unknown; `a'` gives the scale factor.
pub fn missing_side(lang: Lang, small: [i64; 3], k: i64) -> Draft {
    let big = small.map(|s| s * k);
    let answer = Answer::numeric(big[2] as f64);
    let clues = vec![
        clue(
            t(lang, Localized::new(
                "Bestäm skalfaktorn med ett par motsvarande sidor.",
                "Find the scale factor from a pair of corresponding sides.",
            )),
            format!("k = \\frac{{{}}}{{{}}} = {}", big[0], small[0], k),
        ),
        clue(
            t(lang, Localized::new(
                "Multiplicera den motsvarande sidan i den lilla triangeln med skalfaktorn.",
                "Multiply the corresponding side of the small triangle by the scale factor.",
            )),
            format!("x = {} \\cdot {} = {}", small[2], k, big[2]),
        ),
        final_clue(lang, &answer, Some(UNIT), Some(format!("x = {}\\text{{ cm}}", big[2]))),
    ];
    let description = t(lang, Localized::new(
        "Trianglarna är likformiga. Beräkna längden x.",
        "The triangles are similar. Calculate the length x.",
    ));
    Draft {
        variation: "similar_missing_side",
        render: RenderPayload::new(description, AnswerType::Numeric)
            .unit(UNIT)
            .geometry(Shape::SimilarTriangles, triangle_measures(small, [Some(big[0]), Some(big[1]), None])),
        answer,
        clues,
    }
}

/// Small figure has area `area`; the large one is a `k`-times enlargement.
pub fn area_ratio(lang: Lang, area: i64, k: i64) -> Draft {
    let area_scale = k * k;
    let big = area * area_scale;
    let answer = Answer::numeric(big as f64);
    let clues = vec![
        clue(
            t(lang, Localized::new(
                "Areaskalan är längdskalan i kvadrat.",
                "The area scale is the length scale squared.",
            )),
            format!("{}^2 = {}", k, area_scale),
        ),
        clue(
            t(lang, Localized::new(
                "Multiplicera den lilla arean med areaskalan.",
                "Multiply the small area by the area scale.",
            )),
            format!("{} \\cdot {} = {}", area, area_scale, big),
        ),
        final_clue(lang, &answer, Some("cm²"), Some(format!("{}\\text{{ cm}}^2", big))),
    ];
    let description = t(lang, Localized::new(
        format!(
            "Två figurer är likformiga. Den stora är en förstoring av den lilla med skalfaktorn {}. \
             Den lilla figuren har arean {} cm². Vilken area har den stora?",
            k, area
        ),
        format!(
            "Two figures are similar. The large one is an enlargement of the small one by scale factor {}. \
             The small figure has area {} cm². What is the area of the large one?",
            k, area
        ),
    ));
    Draft {
        variation: "similar_area_ratio",
        render: RenderPayload::new(description, AnswerType::Numeric).unit("cm²"),
        answer,
        clues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_side_hides_the_unknown() {
        let d = missing_side(Lang::En, [3, 4, 5], 3);
        assert_eq!(d.answer, Answer::numeric(15.0));
        let measures = &d.render.geometry.as_ref().unwrap().measures;
        assert_eq!(measures.len(), 6);
        assert_eq!(measures[5].value, None);
        assert!(measures.iter().all(|m| m.value != Some(15.0)));
    }

    #[test]
    fn area_scales_with_square() {
        let d = area_ratio(Lang::Sv, 6, 3);
        assert_eq!(d.answer, Answer::numeric(54.0));
        assert_eq!(d.clues[0].latex.as_deref(), Some("3^2 = 9"));
    }

    #[test]
    fn scale_factor_is_k() {
        assert_eq!(scale_factor(Lang::En, [2, 3, 4], 4).answer, Answer::numeric(4.0));
    }
}
