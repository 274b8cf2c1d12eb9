//! Fraction arithmetic (FR-).
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | same denominator | `add_same_denom`, `sub_same_denom`, `concept_denominator` |
//! | 2 | one denominator a multiple of the other | `add_multiple_denom`, `sub_multiple_denom` |
//! | 3 | coprime denominators (LCD = product) | `add_diff_denom`, `sub_diff_denom` |
//! | 4 | multiplication / division | `mul_fractions`, `div_fractions` |
//! | 5 | mixed | any of the above |
//!
//! Answers are always reduced, positive and never whole (`d != 1`);
//! subtraction operands are drawn so the difference stays positive.

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, multiple_choice, GenContext, Draft, VariationSet},
    i18n::{t, Lang, Localized, Term},
    math::{frac_tex, gcd, lcm, reduce},
    models::{Answer, AnswerType, Clue, RenderPayload},
    rng::{resample, DrawExt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    SameDenominator = 1,
    MultipleDenominator = 2,
    CoprimeDenominator = 3,
    Product = 4,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::SameDenominator,
        Mode::MultipleDenominator,
        Mode::CoprimeDenominator,
        Mode::Product,
    ];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::SameDenominator,
            2 => Mode::MultipleDenominator,
            3 => Mode::CoprimeDenominator,
            4 => Mode::Product,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    AddSameDenom,
    SubSameDenom,
    ConceptDenominator,
    AddMultipleDenom,
    SubMultipleDenom,
    AddDiffDenom,
    SubDiffDenom,
    MulFractions,
    DivFractions,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::AddSameDenom,
        Variation::SubSameDenom,
        Variation::ConceptDenominator,
        Variation::AddMultipleDenom,
        Variation::SubMultipleDenom,
        Variation::AddDiffDenom,
        Variation::SubDiffDenom,
        Variation::MulFractions,
        Variation::DivFractions,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::AddSameDenom       => "add_same_denom",
            Variation::SubSameDenom       => "sub_same_denom",
            Variation::ConceptDenominator => "concept_denominator",
            Variation::AddMultipleDenom   => "add_multiple_denom",
            Variation::SubMultipleDenom   => "sub_multiple_denom",
            Variation::AddDiffDenom       => "add_diff_denom",
            Variation::SubDiffDenom       => "sub_diff_denom",
            Variation::MulFractions       => "mul_fractions",
            Variation::DivFractions       => "div_fractions",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::AddSameDenom | Variation::SubSameDenom | Variation::ConceptDenominator => {
                Mode::SameDenominator
            }
            Variation::AddMultipleDenom | Variation::SubMultipleDenom => Mode::MultipleDenominator,
            Variation::AddDiffDenom | Variation::SubDiffDenom => Mode::CoprimeDenominator,
            Variation::MulFractions | Variation::DivFractions => Mode::Product,
        }
    }

    fn level(self) -> u8 {
        self.mode() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn tex(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "\\cdot",
            Op::Div => "\\div",
        }
    }
}

pub fn generate<R: Rng>(rng: &mut R, level: u8, ctx: &GenContext) -> EngineResult<Draft> {
    let mode = Mode::for_level(rng, level);
    let variation = choose_in_mode(rng, mode, &ctx.options);
    build(rng, variation, ctx)
}

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let key = variation.key();
    let lang = ctx.lang;
    match variation {
        Variation::AddSameDenom | Variation::SubSameDenom => {
            let op = if variation == Variation::AddSameDenom { Op::Add } else { Op::Sub };
            resample(rng, ctx.max_attempts, key, |rng| {
                let d = rng.int_between(3, 12);
                let a = rng.int_between(1, d - 1);
                let c = rng.int_between(1, d - 1);
                add_sub(lang, key, op, (a, d), (c, d))
            })
        }
        Variation::AddMultipleDenom | Variation::SubMultipleDenom => {
            let op = if variation == Variation::AddMultipleDenom { Op::Add } else { Op::Sub };
            resample(rng, ctx.max_attempts, key, |rng| {
                let b = rng.int_between(2, 6);
                let d = b * rng.int_between(2, 4);
                let a = rng.int_between(1, b - 1);
                let c = rng.int_between(1, d - 1);
                add_sub(lang, key, op, (a, b), (c, d))
            })
        }
        Variation::AddDiffDenom | Variation::SubDiffDenom => {
            let op = if variation == Variation::AddDiffDenom { Op::Add } else { Op::Sub };
            resample(rng, ctx.max_attempts, key, |rng| {
                let b = rng.int_between(2, 9);
                let d = rng.int_between(2, 9);
                if b == d || gcd(b, d) != 1 {
                    return None;
                }
                let a = rng.int_between(1, b - 1);
                let c = rng.int_between(1, d - 1);
                add_sub(lang, key, op, (a, b), (c, d))
            })
        }
        Variation::MulFractions | Variation::DivFractions => {
            let op = if variation == Variation::MulFractions { Op::Mul } else { Op::Div };
            resample(rng, ctx.max_attempts, key, |rng| {
                let b = rng.int_between(2, 9);
                let d = rng.int_between(2, 9);
                let a = rng.int_between(1, b - 1);
                let c = rng.int_between(1, d - 1);
                mul_div(lang, key, op, (a, b), (c, d))
            })
        }
        Variation::ConceptDenominator => {
            let d = rng.int_between(3, 9);
            let n = rng.int_between(1, d - 1);
            let mut draft = multiple_choice(
                rng,
                ctx,
                key,
                Localized::new(
                    "Vad kallas talet under bråkstrecket?",
                    "What is the number below the fraction bar called?",
                ),
                Localized::new("Nämnare", "Denominator"),
                &[
                    Localized::new("Täljare", "Numerator"),
                    Localized::new("Kvot", "Quotient"),
                    Localized::new("Faktor", "Factor"),
                ],
                Localized::new(
                    format!("I {}/{} är {} täljaren och {} nämnaren.", n, d, n, d),
                    format!("In {}/{}, {} is the numerator and {} the denominator.", n, d, n, d),
                ),
            );
            draft.render = draft.render.latex(frac_tex(n, d));
            Ok(draft)
        }
    }
}

fn prompt(lang: Lang) -> String {
    t(lang, Localized::new("Beräkna och svara i enklaste form.", "Calculate and give the answer in simplest form."))
}

/// Reduce `n/d` for the answer, pushing a simplification clue when the
/// raw result is not already in lowest terms. `None` for non-positive or
/// whole results.
fn finish(lang: Lang, n: i64, d: i64, clues: &mut Vec<Clue>) -> Option<Answer> {
    let (rn, rd) = reduce(n, d)?;
    if rn <= 0 || rd == 1 {
        return None;
    }
    if rd != d {
        let g = d / rd;
        clues.push(clue(
            t(lang, Localized::new(
                format!("{}. Dela täljare och nämnare med {}.", t(lang, Term::Simplify), g),
                format!("{}. Divide numerator and denominator by {}.", t(lang, Term::Simplify), g),
            )),
            format!("{} = {}", frac_tex(n, d), frac_tex(rn, rd)),
        ));
    }
    let answer = Answer::Fraction { n: rn, d: rd };
    clues.push(final_clue(lang, &answer, None, Some(frac_tex(rn, rd))));
    Some(answer)
}

/// `a/b ± c/d`. Returns `None` when the operands violate the constraints
/// (non-positive difference, whole-number result).
pub fn add_sub(lang: Lang, key: &'static str, op: Op, x: (i64, i64), y: (i64, i64)) -> Option<Draft> {
    let ((a, b), (c, d)) = (x, y);
    if b <= 0 || d <= 0 || a <= 0 || c <= 0 {
        return None;
    }
    if op == Op::Sub && a * d <= c * b {
        return None;
    }
    let question_tex = format!("{} {} {}", frac_tex(a, b), op.tex(), frac_tex(c, d));
    let verb = match op {
        Op::Sub => Localized::new("subtrahera", "subtract"),
        _ => Localized::new("addera", "add"),
    };
    let verb = t(lang, verb);

    let mut clues = Vec::new();
    let (a2, c2, den) = if b == d {
        clues.push(clue(
            t(lang, Localized::new(
                format!("Nämnarna är lika. Behåll nämnaren {} och {} täljarna.", b, verb),
                format!("The denominators are equal. Keep the denominator {} and {} the numerators.", b, verb),
            )),
            format!("{} = \\frac{{{} {} {}}}{{{}}}", question_tex, a, op.tex(), c, b),
        ));
        (a, c, b)
    } else {
        let den = lcm(b, d);
        let (ka, kc) = (den / b, den / d);
        clues.push(clue(
            t(lang, Localized::new(
                format!("Minsta gemensamma nämnare för {} och {} är {}. Förläng bråken.", b, d, den),
                format!("The lowest common denominator of {} and {} is {}. Rewrite both fractions.", b, d, den),
            )),
            format!(
                "{} = {}, \\quad {} = {}",
                frac_tex(a, b), frac_tex(a * ka, den), frac_tex(c, d), frac_tex(c * kc, den)
            ),
        ));
        (a * ka, c * kc, den)
    };

    let raw = if op == Op::Sub { a2 - c2 } else { a2 + c2 };
    clues.push(clue(
        t(lang, Localized::new(format!("Nu kan du {} täljarna.", verb), format!("Now {} the numerators.", verb))),
        format!("\\frac{{{} {} {}}}{{{}}} = {}", a2, op.tex(), c2, den, frac_tex(raw, den)),
    ));

    let answer = finish(lang, raw, den, &mut clues)?;
    Some(Draft {
        variation: key,
        render: RenderPayload::new(prompt(lang), AnswerType::Fraction).latex(question_tex),
        answer,
        clues,
    })
}

/// `a/b · c/d` or `a/b ÷ c/d`.
pub fn mul_div(lang: Lang, key: &'static str, op: Op, x: (i64, i64), y: (i64, i64)) -> Option<Draft> {
    let ((a, b), (c, d)) = (x, y);
    if a <= 0 || b <= 0 || c <= 0 || d <= 0 {
        return None;
    }
    let question_tex = format!("{} {} {}", frac_tex(a, b), op.tex(), frac_tex(c, d));
    let mut clues = Vec::new();

    let (c, d) = if op == Op::Div {
        clues.push(clue(
            t(lang, Localized::new(
                "Att dividera med ett bråk är samma sak som att multiplicera med det inverterade bråket.",
                "Dividing by a fraction is the same as multiplying by its reciprocal.",
            )),
            format!("{} = {} \\cdot {}", question_tex, frac_tex(a, b), frac_tex(d, c)),
        ));
        (d, c)
    } else {
        (c, d)
    };

    let (n, den) = (a * c, b * d);
    clues.push(clue(
        t(lang, Localized::new(
            "Multiplicera täljare med täljare och nämnare med nämnare.",
            "Multiply numerator by numerator and denominator by denominator.",
        )),
        format!("\\frac{{{} \\cdot {}}}{{{} \\cdot {}}} = {}", a, c, b, d, frac_tex(n, den)),
    ));

    let answer = finish(lang, n, den, &mut clues)?;
    Some(Draft {
        variation: key,
        render: RenderPayload::new(prompt(lang), AnswerType::Fraction).latex(question_tex),
        answer,
        clues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::helpers::variation_from_key;

    #[test]
    fn same_denominator_addition() {
        let draft = add_sub(Lang::Sv, "add_same_denom", Op::Add, (3, 8), (2, 8)).unwrap();
        assert_eq!(draft.answer, Answer::Fraction { n: 5, d: 8 });
        assert_eq!(draft.clues.len(), 3);
        assert_eq!(draft.clues[2].latex.as_deref(), Some("\\frac{5}{8}"));
        assert_eq!(draft.render.latex.as_deref(), Some("\\frac{3}{8} + \\frac{2}{8}"));
    }

    #[test]
    fn reducible_result_adds_a_simplification_step() {
        let draft = add_sub(Lang::En, "add_same_denom", Op::Add, (1, 8), (5, 8)).unwrap();
        assert_eq!(draft.answer, Answer::Fraction { n: 3, d: 4 });
        assert_eq!(draft.clues.len(), 4);
        assert_eq!(draft.clues[2].latex.as_deref(), Some("\\frac{6}{8} = \\frac{3}{4}"));
    }

    #[test]
    fn coprime_denominators_use_the_product() {
        let draft = add_sub(Lang::En, "add_diff_denom", Op::Add, (1, 3), (1, 4)).unwrap();
        assert_eq!(draft.answer, Answer::Fraction { n: 7, d: 12 });
        assert!(draft.clues[0].text.contains("12"));
    }

    #[test]
    fn subtraction_rejects_non_positive_difference() {
        assert!(add_sub(Lang::En, "sub_same_denom", Op::Sub, (2, 8), (3, 8)).is_none());
        assert!(add_sub(Lang::En, "sub_same_denom", Op::Sub, (3, 8), (3, 8)).is_none());
        let d = add_sub(Lang::En, "sub_diff_denom", Op::Sub, (1, 2), (1, 3)).unwrap();
        assert_eq!(d.answer, Answer::Fraction { n: 1, d: 6 });
    }

    #[test]
    fn whole_results_are_rejected() {
        assert!(add_sub(Lang::En, "add_same_denom", Op::Add, (3, 8), (5, 8)).is_none());
    }

    #[test]
    fn division_multiplies_by_reciprocal() {
        let d = mul_div(Lang::En, "div_fractions", Op::Div, (2, 3), (4, 5)).unwrap();
        assert_eq!(d.answer, Answer::Fraction { n: 5, d: 6 });
        assert_eq!(d.clues.len(), 4);
        assert!(d.clues[0].latex.as_deref().unwrap().contains("\\frac{5}{4}"));
    }

    #[test]
    fn keys_resolve() {
        for v in Variation::ALL {
            assert_eq!(variation_from_key::<Variation>(v.key()), Some(*v));
        }
    }
}
