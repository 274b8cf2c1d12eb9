//! Negative numbers (NE-). The only topic whose results may go below zero.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | addition | `neg_add` |
//! | 2 | subtracting a negative | `neg_subtract_negative` |
//! | 3 | multiplication and division | `neg_multiply`, `neg_divide` |
//! | 4 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized, Term},
    math::paren,
    models::{Answer, AnswerType, Clue, RenderPayload},
    rng::{resample, DrawExt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Add = 1,
    SubtractNegative = 2,
    MulDiv = 3,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Add, Mode::SubtractNegative, Mode::MulDiv];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::Add,
            2 => Mode::SubtractNegative,
            3 => Mode::MulDiv,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    Add,
    SubtractNegative,
    Multiply,
    Divide,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::Add,
        Variation::SubtractNegative,
        Variation::Multiply,
        Variation::Divide,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::Add              => "neg_add",
            Variation::SubtractNegative => "neg_subtract_negative",
            Variation::Multiply         => "neg_multiply",
            Variation::Divide           => "neg_divide",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::Add                          => Mode::Add,
            Variation::SubtractNegative             => Mode::SubtractNegative,
            Variation::Multiply | Variation::Divide => Mode::MulDiv,
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

fn signed<R: Rng>(rng: &mut R, hi: i64) -> i64 {
    let v = rng.int_between(1, hi);
    if rng.gen_bool(0.5) { -v } else { v }
}

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let lang = ctx.lang;
    let hi = ctx.upper(10);
    match variation {
        // At least one operand is negative, otherwise the drill is plain addition.
        Variation::Add => resample(rng, ctx.max_attempts, variation.key(), |rng| {
            let (a, b) = (signed(rng, hi), signed(rng, hi));
            (a < 0 || b < 0).then(|| neg_add(lang, a, b))
        }),
        Variation::SubtractNegative => {
            let (a, b) = (signed(rng, hi), rng.int_between(1, hi));
            Ok(neg_subtract_negative(lang, a, -b))
        }
        Variation::Multiply => resample(rng, ctx.max_attempts, variation.key(), |rng| {
            let (a, b) = (signed(rng, 9), signed(rng, 9));
            (a < 0 || b < 0).then(|| neg_multiply(lang, a, b))
        }),
        Variation::Divide => resample(rng, ctx.max_attempts, variation.key(), |rng| {
            let (q, b) = (signed(rng, 9), signed(rng, 9));
            (q < 0 || b < 0).then(|| neg_divide(lang, q * b, b))
        }),
    }
}

fn sign_rule(lang: Lang, a: i64, b: i64) -> Clue {
    let text = if (a < 0) == (b < 0) {
        Localized::new(
            "Lika tecken ger positivt resultat.",
            "Equal signs give a positive result.",
        )
    } else {
        Localized::new(
            "Olika tecken ger negativt resultat.",
            "Different signs give a negative result.",
        )
    };
    clue(t(lang, text), format!("{} \\cdot {}", if a < 0 { "-" } else { "+" }, if b < 0 { "-" } else { "+" }))
}

fn draft(lang: Lang, variation: &'static str, expression: String, result: i64, mut clues: Vec<Clue>) -> Draft {
    let answer = Answer::numeric(result as f64);
    clues.push(final_clue(lang, &answer, None, Some(format!("{} = {}", expression, result))));
    Draft {
        variation,
        render: RenderPayload::new(t(lang, Term::Calculate), AnswerType::Numeric).latex(expression),
        answer,
        clues,
    }
}

pub fn neg_add(lang: Lang, a: i64, b: i64) -> Draft {
    let expression = format!("{} + {}", a, paren(b));
    let hint = if b < 0 {
        Localized::new(
            format!("Att addera {} är samma sak som att subtrahera {}.", b, -b),
            format!("Adding {} is the same as subtracting {}.", b, -b),
        )
    } else {
        Localized::new(
            format!("Starta på {} på tallinjen och gå {} steg åt höger.", a, b),
            format!("Start at {} on the number line and move {} steps right.", a, b),
        )
    };
    let step = if b < 0 { format!("{} - {}", a, -b) } else { expression.clone() };
    draft(lang, "neg_add", expression, a + b, vec![clue(t(lang, hint), step)])
}

/// `a - b` with `b < 0`.
pub fn neg_subtract_negative(lang: Lang, a: i64, b: i64) -> Draft {
    let expression = format!("{} - {}", a, paren(b));
    let clues = vec![clue(
        t(lang, Localized::new(
            "Två minustecken i rad blir plus.",
            "Two minus signs in a row make a plus.",
        )),
        format!("{} + {}", a, -b),
    )];
    draft(lang, "neg_subtract_negative", expression, a - b, clues)
}

pub fn neg_multiply(lang: Lang, a: i64, b: i64) -> Draft {
    let expression = format!("{} \\cdot {}", a, paren(b));
    let clues = vec![
        sign_rule(lang, a, b),
        clue(
            t(lang, Localized::new("Multiplicera talen utan tecken.", "Multiply the numbers without signs.")),
            format!("{} \\cdot {} = {}", a.abs(), b.abs(), (a * b).abs()),
        ),
    ];
    draft(lang, "neg_multiply", expression, a * b, clues)
}

/// `a / b`; `b` divides `a` exactly.
pub fn neg_divide(lang: Lang, a: i64, b: i64) -> Draft {
    let q = a / b;
    let expression = format!("\\frac{{{}}}{{{}}}", a, b);
    let clues = vec![
        sign_rule(lang, a, b),
        clue(
            t(lang, Localized::new("Dividera talen utan tecken.", "Divide the numbers without signs.")),
            format!("{} / {} = {}", a.abs(), b.abs(), q.abs()),
        ),
    ];
    draft(lang, "neg_divide", expression, q, clues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_with_a_negative_term() {
        let d = neg_add(Lang::En, -5, 3);
        assert_eq!(d.render.latex.as_deref(), Some("-5 + 3"));
        assert_eq!(d.answer, Answer::numeric(-2.0));
        let d = neg_add(Lang::En, 4, -9);
        assert_eq!(d.render.latex.as_deref(), Some("4 + (-9)"));
        assert_eq!(d.clues[0].latex.as_deref(), Some("4 - 9"));
    }

    #[test]
    fn double_minus_becomes_plus() {
        let d = neg_subtract_negative(Lang::Sv, -2, -7);
        assert_eq!(d.render.latex.as_deref(), Some("-2 - (-7)"));
        assert_eq!(d.clues[0].latex.as_deref(), Some("-2 + 7"));
        assert_eq!(d.answer.canonical(), "5");
    }

    #[test]
    fn sign_rules_for_products_and_quotients() {
        assert_eq!(neg_multiply(Lang::En, -3, -4).answer, Answer::numeric(12.0));
        assert_eq!(neg_multiply(Lang::En, 3, -4).answer, Answer::numeric(-12.0));
        let d = neg_divide(Lang::En, -24, 6);
        assert_eq!(d.answer.canonical(), "-4");
        assert!(d.clues[0].text.contains("negative"));
    }
}
