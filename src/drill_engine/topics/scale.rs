//! Scale drawings (SC-).
//!
//! Reduction scales come from a fixed pool of "nice" factors so that the
//! conversions stay mental-arithmetic friendly.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | drawing length from reality | `scale_find_drawing`, `concept_scale_meaning` |
//! | 2 | reality from drawing | `scale_find_reality` |
//! | 3 | scale from both lengths | `scale_find_ratio` |
//! | 4 | enlargement scales (k:1) | `scale_enlargement` |
//! | 5 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, multiple_choice, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized, Term},
    models::{Answer, AnswerType, Clue, RenderPayload},
    rng::DrawExt,
};

/// Reduction factors used in 1:k scales.
pub const SCALE_FACTORS: [i64; 6] = [10, 20, 50, 100, 200, 500];

/// Enlargement factors used in k:1 scales.
pub const ENLARGEMENT_FACTORS: [i64; 4] = [2, 5, 10, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    FindDrawing = 1,
    FindReality = 2,
    FindRatio = 3,
    Enlargement = 4,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::FindDrawing, Mode::FindReality, Mode::FindRatio, Mode::Enlargement];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::FindDrawing,
            2 => Mode::FindReality,
            3 => Mode::FindRatio,
            4 => Mode::Enlargement,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    FindDrawing,
    ConceptMeaning,
    FindReality,
    FindRatio,
    Enlargement,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::FindDrawing,
        Variation::ConceptMeaning,
        Variation::FindReality,
        Variation::FindRatio,
        Variation::Enlargement,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::FindDrawing    => "scale_find_drawing",
            Variation::ConceptMeaning => "concept_scale_meaning",
            Variation::FindReality    => "scale_find_reality",
            Variation::FindRatio      => "scale_find_ratio",
            Variation::Enlargement    => "scale_enlargement",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::FindDrawing | Variation::ConceptMeaning => Mode::FindDrawing,
            Variation::FindReality => Mode::FindReality,
            Variation::FindRatio   => Mode::FindRatio,
            Variation::Enlargement => Mode::Enlargement,
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
    let draft = match variation {
        Variation::FindDrawing => {
            let factor = *rng.pick(&SCALE_FACTORS);
            let drawing = rng.int_between(2, 15);
            find_drawing(lang, drawing * factor, factor)
        }
        Variation::FindReality => {
            let factor = *rng.pick(&SCALE_FACTORS);
            find_reality(lang, rng.int_between(2, 15), factor)
        }
        Variation::FindRatio => {
            let factor = *rng.pick(&SCALE_FACTORS);
            let drawing = rng.int_between(2, 12);
            find_ratio(lang, drawing, drawing * factor)
        }
        Variation::Enlargement => {
            let factor = *rng.pick(&ENLARGEMENT_FACTORS);
            let reality = rng.int_between(1, 9);
            enlargement(lang, reality * factor, factor)
        }
        Variation::ConceptMeaning => {
            let f = *rng.pick(&SCALE_FACTORS);
            multiple_choice(
                rng,
                ctx,
                variation.key(),
                Localized::new(format!("Vad betyder skalan 1:{}?", f), format!("What does the scale 1:{} mean?", f)),
                Localized::new(
                    format!("1 cm på ritningen är {} cm i verkligheten", f),
                    format!("1 cm on the drawing is {} cm in reality", f),
                ),
                &[
                    Localized::new(
                        format!("{} cm på ritningen är 1 cm i verkligheten", f),
                        format!("{} cm on the drawing is 1 cm in reality", f),
                    ),
                    Localized::new(
                        format!("Ritningen är {} gånger större än verkligheten", f),
                        format!("The drawing is {} times larger than reality", f),
                    ),
                    Localized::new(
                        format!("1 cm på ritningen är {} m i verkligheten", f),
                        format!("1 cm on the drawing is {} m in reality", f),
                    ),
                ],
                Localized::new(
                    "Det första talet gäller ritningen och det andra verkligheten.",
                    "The first number refers to the drawing and the second to reality.",
                ),
            )
        }
    };
    Ok(draft)
}

fn meaning_clue(lang: Lang, factor: i64) -> Clue {
    clue(
        t(lang, Localized::new(
            format!("Skalan 1:{} betyder att verkligheten är {} gånger större än ritningen.", factor, factor),
            format!("The scale 1:{} means reality is {} times larger than the drawing.", factor, factor),
        )),
        format!("1:{}", factor),
    )
}

/// Reality length (cm) → drawing length at 1:`factor`.
pub fn find_drawing(lang: Lang, reality_cm: i64, factor: i64) -> Draft {
    let drawing = reality_cm / factor;
    let cm = t(lang, Term::Centimetres);
    let answer = Answer::numeric(drawing as f64);
    let clues = vec![
        meaning_clue(lang, factor),
        clue(
            t(lang, Localized::new(
                format!("Dividera den verkliga längden med {}.", factor),
                format!("Divide the real length by {}.", factor),
            )),
            format!("\\frac{{{}}}{{{}}} = {}", reality_cm, factor, drawing),
        ),
        final_clue(lang, &answer, Some(&cm), Some(format!("{}\\text{{ {}}}", drawing, cm))),
    ];
    let description = t(lang, Localized::new(
        format!(
            "En ritning har skalan 1:{}. En sträcka är {} cm i verkligheten. Hur lång är sträckan på ritningen?",
            factor, reality_cm
        ),
        format!(
            "A drawing has the scale 1:{}. A distance is {} cm in reality. How long is it on the drawing?",
            factor, reality_cm
        ),
    ));
    Draft {
        variation: "scale_find_drawing",
        render: RenderPayload::new(description, AnswerType::Numeric).unit(cm),
        answer,
        clues,
    }
}

/// Drawing length (cm) at 1:`factor` → reality length (cm).
pub fn find_reality(lang: Lang, drawing_cm: i64, factor: i64) -> Draft {
    let reality = drawing_cm * factor;
    let cm = t(lang, Term::Centimetres);
    let answer = Answer::numeric(reality as f64);
    let clues = vec![
        meaning_clue(lang, factor),
        clue(
            t(lang, Localized::new(
                format!("Multiplicera längden på ritningen med {}.", factor),
                format!("Multiply the length on the drawing by {}.", factor),
            )),
            format!("{} \\cdot {} = {}", drawing_cm, factor, reality),
        ),
        final_clue(lang, &answer, Some(&cm), Some(format!("{}\\text{{ {}}}", reality, cm))),
    ];
    let description = t(lang, Localized::new(
        format!(
            "En ritning har skalan 1:{}. En sträcka är {} cm på ritningen. Hur lång är den i verkligheten (i cm)?",
            factor, drawing_cm
        ),
        format!(
            "A drawing has the scale 1:{}. A distance measures {} cm on the drawing. How long is it in reality (in cm)?",
            factor, drawing_cm
        ),
    ));
    Draft {
        variation: "scale_find_reality",
        render: RenderPayload::new(description, AnswerType::Numeric).unit(cm),
        answer,
        clues,
    }
}

/// Both lengths known → scale `1:k`. Reality is given in metres when it
/// converts evenly, which adds a unit-conversion step.
pub fn find_ratio(lang: Lang, drawing_cm: i64, reality_cm: i64) -> Draft {
    let factor = reality_cm / drawing_cm;
    let in_metres = reality_cm % 100 == 0;
    let mut clues = Vec::new();
    let reality_shown = if in_metres {
        let m = reality_cm / 100;
        clues.push(clue(
            t(lang, Localized::new("Gör om till samma enhet.", "Convert to the same unit.")),
            format!("{}\\text{{ m}} = {}\\text{{ cm}}", m, reality_cm),
        ));
        format!("{} {}", m, t(lang, Term::Metres))
    } else {
        format!("{} {}", reality_cm, t(lang, Term::Centimetres))
    };
    clues.push(clue(
        t(lang, Localized::new(
            "Dividera den verkliga längden med längden på ritningen.",
            "Divide the real length by the length on the drawing.",
        )),
        format!("\\frac{{{}}}{{{}}} = {}", reality_cm, drawing_cm, factor),
    ));
    let answer = Answer::Ratio { left: 1, right: factor };
    clues.push(final_clue(lang, &answer, None, Some(format!("1:{}", factor))));

    let description = t(lang, Localized::new(
        format!(
            "En sträcka är {} cm på en ritning och {} i verkligheten. Vilken skala har ritningen?",
            drawing_cm, reality_shown
        ),
        format!(
            "A distance is {} cm on a drawing and {} in reality. What is the scale of the drawing?",
            drawing_cm, reality_shown
        ),
    ));
    Draft {
        variation: "scale_find_ratio",
        render: RenderPayload::new(description, AnswerType::Scale),
        answer,
        clues,
    }
}

/// Enlargement `factor:1`: picture length (mm) → real length (mm).
pub fn enlargement(lang: Lang, picture_mm: i64, factor: i64) -> Draft {
    let reality = picture_mm / factor;
    let answer = Answer::numeric(reality as f64);
    let clues = vec![
        clue(
            t(lang, Localized::new(
                format!("Skalan {}:1 betyder att bilden är {} gånger större än verkligheten.", factor, factor),
                format!("The scale {}:1 means the picture is {} times larger than reality.", factor, factor),
            )),
            format!("{}:1", factor),
        ),
        clue(
            t(lang, Localized::new(
                format!("Dividera bildens mått med {}.", factor),
                format!("Divide the picture length by {}.", factor),
            )),
            format!("\\frac{{{}}}{{{}}} = {}", picture_mm, factor, reality),
        ),
        final_clue(lang, &answer, Some("mm"), Some(format!("{}\\text{{ mm}}", reality))),
    ];
    let description = t(lang, Localized::new(
        format!(
            "En bild av en insekt är förstorad i skala {}:1. På bilden är insekten {} mm lång. Hur lång är den i verkligheten?",
            factor, picture_mm
        ),
        format!(
            "A picture of an insect is enlarged at scale {}:1. In the picture the insect is {} mm long. How long is it in reality?",
            factor, picture_mm
        ),
    ));
    Draft {
        variation: "scale_enlargement",
        render: RenderPayload::new(description, AnswerType::Numeric).unit("mm"),
        answer,
        clues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_reality_seven_cm_at_one_to_fifty() {
        let d = find_reality(Lang::En, 7, 50);
        assert_eq!(d.answer, Answer::numeric(350.0));
        assert!(d.clues.iter().any(|c| c.latex.as_deref() == Some("7 \\cdot 50 = 350")));
        assert!(d.clues.last().unwrap().text.contains("350"));
    }

    #[test]
    fn find_drawing_divides() {
        let d = find_drawing(Lang::Sv, 1500, 100);
        assert_eq!(d.answer, Answer::numeric(15.0));
    }

    #[test]
    fn find_ratio_converts_metres() {
        let d = find_ratio(Lang::En, 4, 2000);
        assert_eq!(d.answer, Answer::Ratio { left: 1, right: 500 });
        assert_eq!(d.clues.len(), 3);
        assert!(d.render.description.contains("20 m"));
        let d = find_ratio(Lang::En, 3, 150);
        assert_eq!(d.answer, Answer::Ratio { left: 1, right: 50 });
        assert_eq!(d.clues.len(), 2);
    }

    #[test]
    fn enlargement_divides_by_factor() {
        let d = enlargement(Lang::En, 40, 5);
        assert_eq!(d.answer, Answer::numeric(8.0));
    }
}
