//! Algebraic simplification (SM-). Every answer is a linear expression
//! `kx + m` with `k != 0`.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | like terms | `collect_like_terms` |
//! | 2 | like terms and constants | `collect_with_constants` |
//! | 3 | one bracket | `expand_bracket` |
//! | 4 | bracket then collect | `expand_and_collect` |
//! | 5 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{choose_in_mode, clue, final_clue, Draft, GenContext, VariationSet},
    i18n::{t, Lang, Localized, Term},
    math::linear_str,
    models::{Answer, AnswerType, Clue, RenderPayload},
    rng::{resample, DrawExt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    LikeTerms = 1,
    WithConstants = 2,
    Bracket = 3,
    BracketAndCollect = 4,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::LikeTerms, Mode::WithConstants, Mode::Bracket, Mode::BracketAndCollect];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::LikeTerms,
            2 => Mode::WithConstants,
            3 => Mode::Bracket,
            4 => Mode::BracketAndCollect,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    CollectLikeTerms,
    CollectWithConstants,
    ExpandBracket,
    ExpandAndCollect,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::CollectLikeTerms,
        Variation::CollectWithConstants,
        Variation::ExpandBracket,
        Variation::ExpandAndCollect,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::CollectLikeTerms     => "collect_like_terms",
            Variation::CollectWithConstants => "collect_with_constants",
            Variation::ExpandBracket        => "expand_bracket",
            Variation::ExpandAndCollect     => "expand_and_collect",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::CollectLikeTerms     => Mode::LikeTerms,
            Variation::CollectWithConstants => Mode::WithConstants,
            Variation::ExpandBracket        => Mode::Bracket,
            Variation::ExpandAndCollect     => Mode::BracketAndCollect,
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

fn nonzero<R: Rng>(rng: &mut R, hi: i64) -> i64 {
    let v = rng.int_between(1, hi);
    if rng.gen_bool(0.3) { -v } else { v }
}

pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft> {
    let lang = ctx.lang;
    let key = variation.key();
    let hi = ctx.upper(9);
    match variation {
        Variation::CollectLikeTerms => resample(rng, ctx.max_attempts, key, |rng| {
            let xs = [rng.int_between(1, hi), nonzero(rng, hi), nonzero(rng, hi)];
            collect_like_terms(lang, &xs)
        }),
        Variation::CollectWithConstants => resample(rng, ctx.max_attempts, key, |rng| {
            let terms = [
                Piece::X(rng.int_between(1, hi)),
                Piece::C(nonzero(rng, hi)),
                Piece::X(nonzero(rng, hi)),
                Piece::C(nonzero(rng, hi)),
            ];
            collect_with_constants(lang, &terms)
        }),
        Variation::ExpandBracket => {
            let a = rng.int_between(2, 9);
            let (b, c) = (rng.int_between(1, hi), nonzero(rng, hi));
            Ok(expand_bracket(lang, a, b, c))
        }
        Variation::ExpandAndCollect => resample(rng, ctx.max_attempts, key, |rng| {
            let a = rng.int_between(2, 6);
            let (b, c) = (rng.int_between(1, hi), nonzero(rng, hi));
            let (d, e) = (nonzero(rng, hi), nonzero(rng, hi));
            expand_and_collect(lang, a, (b, c), (d, e))
        }),
    }
}

/// One term of an expression to be simplified: `X(3)` is `3x`, `C(-2)` is `-2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    X(i64),
    C(i64),
}

impl Piece {
    fn coef(self) -> i64 {
        match self {
            Piece::X(v) | Piece::C(v) => v,
        }
    }

    fn body(self) -> String {
        match self {
            Piece::X(v) => linear_str(v.abs(), 0),
            Piece::C(v) => v.abs().to_string(),
        }
    }
}

/// `t1 + t2 - t3 ...` with the sign of each term folded into its operator.
fn sum_tex(terms: &[Piece]) -> String {
    join_terms(terms, false)
}

/// Like [`sum_tex`] but the first term also gets an operator, for
/// appending after another expression.
fn tail_tex(terms: &[Piece]) -> String {
    join_terms(terms, true)
}

fn join_terms(terms: &[Piece], lead: bool) -> String {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        let neg = term.coef() < 0;
        match (i == 0 && !lead, neg) {
            (true, false) => {}
            (true, true) => out.push('-'),
            (false, false) => out.push_str(" + "),
            (false, true) => out.push_str(" - "),
        }
        out.push_str(&term.body());
    }
    out
}

fn simplify_draft(lang: Lang, variation: &'static str, latex: String, (k, m): (i64, i64), mut clues: Vec<Clue>) -> Draft {
    let answer = Answer::Linear { k, m };
    clues.push(final_clue(lang, &answer, None, Some(linear_str(k, m))));
    Draft {
        variation,
        render: RenderPayload::new(t(lang, Term::Simplify), AnswerType::Text).latex(latex),
        answer,
        clues,
    }
}

/// `a₁x + a₂x + a₃x`; `None` when the x-terms cancel.
pub fn collect_like_terms(lang: Lang, coefs: &[i64]) -> Option<Draft> {
    let k: i64 = coefs.iter().sum();
    if k == 0 {
        return None;
    }
    let terms: Vec<Piece> = coefs.iter().map(|c| Piece::X(*c)).collect();
    let sum: Vec<String> = coefs.iter().map(|c| if *c < 0 { format!("({})", c) } else { c.to_string() }).collect();
    let clues = vec![clue(
        t(lang, Localized::new(
            "Termerna är av samma sort. Addera koefficienterna framför x.",
            "The terms are alike. Add the coefficients in front of x.",
        )),
        format!("({})x", sum.join(" + ")),
    )];
    Some(simplify_draft(lang, "collect_like_terms", sum_tex(&terms), (k, 0), clues))
}

/// Mixed x-terms and constants; `None` when the x-terms cancel.
pub fn collect_with_constants(lang: Lang, terms: &[Piece]) -> Option<Draft> {
    let xs: Vec<Piece> = terms.iter().copied().filter(|t| matches!(t, Piece::X(_))).collect();
    let cs: Vec<Piece> = terms.iter().copied().filter(|t| matches!(t, Piece::C(_))).collect();
    let k: i64 = xs.iter().map(|t| t.coef()).sum();
    let m: i64 = cs.iter().map(|t| t.coef()).sum();
    if k == 0 {
        return None;
    }
    let clues = vec![
        clue(
            t(lang, Localized::new(
                "Samla x-termerna för sig och konstanterna för sig.",
                "Group the x-terms together and the constants together.",
            )),
            format!("({}) + ({})", sum_tex(&xs), sum_tex(&cs)),
        ),
        clue(
            t(lang, Localized::new("Förenkla varje grupp.", "Simplify each group.")),
            format!("{} + ({})", linear_str(k, 0), m),
        ),
    ];
    Some(simplify_draft(lang, "collect_with_constants", sum_tex(terms), (k, m), clues))
}

fn bracket_tex(a: i64, b: i64, c: i64) -> String {
    format!("{}({})", a, linear_str(b, c))
}

/// `a(bx + c)`.
pub fn expand_bracket(lang: Lang, a: i64, b: i64, c: i64) -> Draft {
    let (k, m) = (a * b, a * c);
    let clues = vec![clue(
        t(lang, Localized::new(
            format!("Multiplicera {} med varje term i parentesen.", a),
            format!("Multiply {} by each term inside the bracket.", a),
        )),
        format!("{} \\cdot {} + {} \\cdot ({})", a, linear_str(b, 0), a, c),
    )];
    simplify_draft(lang, "expand_bracket", bracket_tex(a, b, c), (k, m), clues)
}

/// `a(bx + c) + dx + e`; `None` when the x-terms cancel.
pub fn expand_and_collect(lang: Lang, a: i64, (b, c): (i64, i64), (d, e): (i64, i64)) -> Option<Draft> {
    let k = a * b + d;
    let m = a * c + e;
    if k == 0 {
        return None;
    }
    let tail = tail_tex(&[Piece::X(d), Piece::C(e)]);
    let expanded = [Piece::X(a * b), Piece::C(a * c), Piece::X(d), Piece::C(e)];
    let clues = vec![
        clue(
            t(lang, Localized::new(
                "Multiplicera in talet framför parentesen först.",
                "Multiply out the bracket first.",
            )),
            sum_tex(&expanded),
        ),
        clue(
            t(lang, Localized::new(
                "Samla sedan x-termerna och konstanterna.",
                "Then collect the x-terms and the constants.",
            )),
            format!("({}) + ({})", sum_tex(&[expanded[0], expanded[2]]), sum_tex(&[expanded[1], expanded[3]])),
        ),
    ];
    Some(simplify_draft(
        lang,
        "expand_and_collect",
        format!("{}{}", bracket_tex(a, b, c), tail),
        (k, m),
        clues,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_terms_sum_coefficients() {
        let d = collect_like_terms(Lang::En, &[3, 5, -2]).unwrap();
        assert_eq!(d.render.latex.as_deref(), Some("3x + 5x - 2x"));
        assert_eq!(d.answer.canonical(), "6x");
        assert!(collect_like_terms(Lang::En, &[2, -2, 0]).is_none());
    }

    #[test]
    fn constants_fold_into_m() {
        let terms = [Piece::X(4), Piece::C(3), Piece::X(2), Piece::C(-5)];
        let d = collect_with_constants(Lang::Sv, &terms).unwrap();
        assert_eq!(d.render.latex.as_deref(), Some("4x + 3 + 2x - 5"));
        assert_eq!(d.answer, Answer::Linear { k: 6, m: -2 });
        assert_eq!(d.answer.canonical(), "6x - 2");
    }

    #[test]
    fn bracket_expands_every_term() {
        let d = expand_bracket(Lang::En, 3, 2, -4);
        assert_eq!(d.render.latex.as_deref(), Some("3(2x - 4)"));
        assert_eq!(d.answer.canonical(), "6x - 12");
    }

    #[test]
    fn expand_then_collect() {
        let d = expand_and_collect(Lang::En, 2, (3, 1), (-4, 5)).unwrap();
        assert_eq!(d.render.latex.as_deref(), Some("2(3x + 1) - 4x + 5"));
        assert_eq!(d.answer, Answer::Linear { k: 2, m: 7 });
        assert!(expand_and_collect(Lang::En, 2, (2, 1), (-4, 5)).is_none());
    }
}
