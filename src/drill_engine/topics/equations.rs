//! Linear equations in one unknown (EQ-).
//!
//! The solution is drawn first and the equation built around it, so every
//! equation has a positive whole-number solution. Subtraction forms are
//! resampled until no step goes below zero.
//!
//! | Level | Mode | Variations |
//! |-------|------|------------|
//! | 1 | one step, ± | `eq_one_step_add`, `eq_one_step_sub` |
//! | 2 | one step, × | `eq_one_step_mul`, `eq_word_price`, `eq_word_age` |
//! | 3 | two steps | `eq_two_step` |
//! | 4 | unknown on both sides | `eq_both_sides` |
//! | 5 | mixed | any of the above |

use rand::Rng;

use crate::drill_engine::{
    context::{age_span, fill_template, random_context_item, random_name, ContextCategory},
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
    OneStepAddSub = 1,
    OneStepMul = 2,
    TwoStep = 3,
    BothSides = 4,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::OneStepAddSub, Mode::OneStepMul, Mode::TwoStep, Mode::BothSides];

    fn for_level<R: Rng>(rng: &mut R, level: u8) -> Mode {
        match level {
            1 => Mode::OneStepAddSub,
            2 => Mode::OneStepMul,
            3 => Mode::TwoStep,
            4 => Mode::BothSides,
            _ => *rng.pick(&Mode::ALL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    OneStepAdd,
    OneStepSub,
    OneStepMul,
    WordPrice,
    WordAge,
    TwoStep,
    BothSides,
}

impl VariationSet for Variation {
    type Mode = Mode;

    const ALL: &'static [Variation] = &[
        Variation::OneStepAdd,
        Variation::OneStepSub,
        Variation::OneStepMul,
        Variation::WordPrice,
        Variation::WordAge,
        Variation::TwoStep,
        Variation::BothSides,
    ];

    fn key(self) -> &'static str {
        match self {
            Variation::OneStepAdd => "eq_one_step_add",
            Variation::OneStepSub => "eq_one_step_sub",
            Variation::OneStepMul => "eq_one_step_mul",
            Variation::WordPrice  => "eq_word_price",
            Variation::WordAge    => "eq_word_age",
            Variation::TwoStep    => "eq_two_step",
            Variation::BothSides  => "eq_both_sides",
        }
    }

    fn mode(self) -> Mode {
        match self {
            Variation::OneStepAdd | Variation::OneStepSub => Mode::OneStepAddSub,
            Variation::OneStepMul | Variation::WordPrice | Variation::WordAge => Mode::OneStepMul,
            Variation::TwoStep   => Mode::TwoStep,
            Variation::BothSides => Mode::BothSides,
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
    let key = variation.key();
    let hi = ctx.upper(20);
    match variation {
        Variation::OneStepAdd => {
            let (x, a) = (rng.int_between(1, hi), rng.int_between(1, hi));
            Ok(one_step_add(lang, a, x + a))
        }
        Variation::OneStepSub => resample(rng, ctx.max_attempts, key, |rng| {
            let (x, a) = (rng.int_between(1, hi), rng.int_between(1, hi));
            one_step_sub(lang, a, x - a)
        }),
        Variation::OneStepMul => {
            let (a, x) = (rng.int_between(2, 9), rng.int_between(2, ctx.upper(12)));
            Ok(one_step_mul(lang, a, a * x))
        }
        Variation::WordPrice => {
            let category = *rng.pick(&ContextCategory::PURCHASABLE);
            let item = random_context_item(rng, category, lang);
            let name = random_name(rng);
            let count = rng.int_between(2, 9);
            let price = rng.int_between(2, ctx.upper(15));
            Ok(word_price(lang, name, item, count, count * price))
        }
        Variation::WordAge => {
            let relative = random_context_item(rng, ContextCategory::Age, lang);
            let name = random_name(rng);
            let span = age_span(relative);
            // The child is 4..=15; k is redrawn until k·age can land in the relative's span.
            resample(rng, ctx.max_attempts, key, |rng| {
                let k = rng.int_between(2, 5);
                let lo = ((span.start() + k - 1) / k).max(4);
                let hi = (span.end() / k).min(15);
                (lo <= hi).then(|| {
                    let age = rng.int_between(lo, hi);
                    word_age(lang, name, relative, k, k * age)
                })
            })
        }
        Variation::TwoStep => {
            let a = rng.int_between(2, 9);
            let x = rng.int_between(1, ctx.upper(12));
            let b = rng.int_between(1, hi);
            Ok(two_step(lang, a, b, a * x + b))
        }
        Variation::BothSides => resample(rng, ctx.max_attempts, key, |rng| {
            let (a, c) = (rng.int_between(2, 9), rng.int_between(1, 8));
            let x = rng.int_between(1, ctx.upper(10));
            let b = rng.int_between(1, hi);
            both_sides(lang, a, b, c, (a - c) * x + b)
        }),
    }
}

fn coef(a: i64) -> String {
    linear_str(a, 0)
}

fn solve_prompt(lang: Lang) -> String {
    t(lang, Term::Solve)
}

fn answer_clue(lang: Lang, x: i64, unit: Option<&str>) -> (Answer, Clue) {
    let answer = Answer::numeric(x as f64);
    let c = final_clue(lang, &answer, unit, Some(format!("x = {}", x)));
    (answer, c)
}

fn subtract_both(lang: Lang, what: &str) -> String {
    t(lang, Localized::new(
        format!("Subtrahera {} från båda leden.", what),
        format!("Subtract {} from both sides.", what),
    ))
}

fn divide_both(lang: Lang, by: i64) -> String {
    t(lang, Localized::new(
        format!("Dividera båda leden med {}.", by),
        format!("Divide both sides by {}.", by),
    ))
}

/// `x + a = b`.
pub fn one_step_add(lang: Lang, a: i64, b: i64) -> Draft {
    let x = b - a;
    let (answer, last) = answer_clue(lang, x, None);
    let clues = vec![
        clue(subtract_both(lang, &a.to_string()), format!("x + {} - {} = {} - {}", a, a, b, a)),
        last,
    ];
    Draft {
        variation: "eq_one_step_add",
        render: RenderPayload::new(solve_prompt(lang), AnswerType::Numeric).latex(format!("x + {} = {}", a, b)),
        answer,
        clues,
    }
}

/// `x - a = b`; `None` unless `b > 0`.
pub fn one_step_sub(lang: Lang, a: i64, b: i64) -> Option<Draft> {
    if b <= 0 {
        return None;
    }
    let x = a + b;
    let (answer, last) = answer_clue(lang, x, None);
    let clues = vec![
        clue(
            t(lang, Localized::new(
                format!("Addera {} till båda leden.", a),
                format!("Add {} to both sides.", a),
            )),
            format!("x - {} + {} = {} + {}", a, a, b, a),
        ),
        last,
    ];
    Some(Draft {
        variation: "eq_one_step_sub",
        render: RenderPayload::new(solve_prompt(lang), AnswerType::Numeric).latex(format!("x - {} = {}", a, b)),
        answer,
        clues,
    })
}

/// `ax = b`.
pub fn one_step_mul(lang: Lang, a: i64, b: i64) -> Draft {
    let x = b / a;
    let (answer, last) = answer_clue(lang, x, None);
    let clues = vec![
        clue(divide_both(lang, a), format!("\\frac{{{}x}}{{{}}} = \\frac{{{}}}{{{}}}", a, a, b, a)),
        last,
    ];
    Draft {
        variation: "eq_one_step_mul",
        render: RenderPayload::new(solve_prompt(lang), AnswerType::Numeric).latex(format!("{}x = {}", a, b)),
        answer,
        clues,
    }
}

const PRICE_SV: &str = "{name} köper {count} {item} och betalar {total} kr. Vad kostar en?";
const PRICE_EN: &str = "{name} buys {count} {item} and pays {total} kr. How much does one cost?";

pub fn word_price(lang: Lang, name: &str, item: &str, count: i64, total: i64) -> Draft {
    let price = total / count;
    let (count_s, total_s) = (count.to_string(), total.to_string());
    let pairs = [("name", name), ("count", count_s.as_str()), ("item", item), ("total", total_s.as_str())];
    let description = t(lang, Localized::new(fill_template(PRICE_SV, &pairs), fill_template(PRICE_EN, &pairs)));

    let (answer, last) = answer_clue(lang, price, Some("kr"));
    let clues = vec![
        clue(
            t(lang, Localized::new(
                "Låt x vara priset för en. Ställ upp en ekvation.",
                "Let x be the price of one. Write an equation.",
            )),
            format!("{}x = {}", count, total),
        ),
        clue(divide_both(lang, count), format!("x = \\frac{{{}}}{{{}}}", total, count)),
        last,
    ];
    Draft {
        variation: "eq_word_price",
        render: RenderPayload::new(description, AnswerType::Numeric).unit("kr"),
        answer,
        clues,
    }
}

const AGE_SV: &str = "{name}s {relative} är {total} år, vilket är {k} gånger så gammal som {name}. Hur gammal är {name}?";
const AGE_EN: &str = "{name}'s {relative} is {total} years old, which is {k} times as old as {name}. How old is {name}?";

pub fn word_age(lang: Lang, name: &str, relative: &str, k: i64, total: i64) -> Draft {
    let age = total / k;
    let (k_s, total_s) = (k.to_string(), total.to_string());
    let pairs = [("name", name), ("relative", relative), ("k", k_s.as_str()), ("total", total_s.as_str())];
    let description = t(lang, Localized::new(fill_template(AGE_SV, &pairs), fill_template(AGE_EN, &pairs)));
    let years = t(lang, Localized::new("år", "years"));

    let (answer, last) = answer_clue(lang, age, Some(years.as_str()));
    let clues = vec![
        clue(
            t(lang, Localized::new(
                format!("Låt x vara {}s ålder. Ställ upp en ekvation.", name),
                format!("Let x be {}'s age. Write an equation.", name),
            )),
            format!("{}x = {}", k, total),
        ),
        clue(divide_both(lang, k), format!("x = \\frac{{{}}}{{{}}}", total, k)),
        last,
    ];
    Draft {
        variation: "eq_word_age",
        render: RenderPayload::new(description, AnswerType::Numeric).unit(years),
        answer,
        clues,
    }
}

/// `ax + b = c`.
pub fn two_step(lang: Lang, a: i64, b: i64, c: i64) -> Draft {
    let rhs = c - b;
    let x = rhs / a;
    let (answer, last) = answer_clue(lang, x, None);
    let clues = vec![
        clue(subtract_both(lang, &b.to_string()), format!("{} = {} - {} = {}", coef(a), c, b, rhs)),
        clue(divide_both(lang, a), format!("x = \\frac{{{}}}{{{}}}", rhs, a)),
        last,
    ];
    Draft {
        variation: "eq_two_step",
        render: RenderPayload::new(solve_prompt(lang), AnswerType::Numeric)
            .latex(format!("{} + {} = {}", coef(a), b, c)),
        answer,
        clues,
    }
}

/// `ax + b = cx + d`; `None` unless `a > c` and `d > b`.
pub fn both_sides(lang: Lang, a: i64, b: i64, c: i64, d: i64) -> Option<Draft> {
    if a <= c || d <= b {
        return None;
    }
    let k = a - c;
    let rhs = d - b;
    if rhs % k != 0 {
        return None;
    }
    let x = rhs / k;
    let (answer, last) = answer_clue(lang, x, None);
    let clues = vec![
        clue(subtract_both(lang, &coef(c)), format!("{} + {} = {}", coef(k), b, d)),
        clue(subtract_both(lang, &b.to_string()), format!("{} = {}", coef(k), rhs)),
        clue(divide_both(lang, k), format!("x = \\frac{{{}}}{{{}}}", rhs, k)),
        last,
    ];
    Some(Draft {
        variation: "eq_both_sides",
        render: RenderPayload::new(solve_prompt(lang), AnswerType::Numeric)
            .latex(format!("{} + {} = {} + {}", coef(a), b, coef(c), d)),
        answer,
        clues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_forms() {
        assert_eq!(one_step_add(Lang::En, 5, 12).answer, Answer::numeric(7.0));
        assert_eq!(one_step_sub(Lang::En, 4, 9).unwrap().answer, Answer::numeric(13.0));
        assert!(one_step_sub(Lang::En, 9, 0).is_none());
        assert_eq!(one_step_mul(Lang::En, 6, 42).answer, Answer::numeric(7.0));
    }

    #[test]
    fn two_step_shows_both_operations() {
        let d = two_step(Lang::En, 3, 4, 19);
        assert_eq!(d.answer, Answer::numeric(5.0));
        assert_eq!(d.render.latex.as_deref(), Some("3x + 4 = 19"));
        assert_eq!(d.clues[0].latex.as_deref(), Some("3x = 19 - 4 = 15"));
        assert_eq!(d.clues.len(), 3);
    }

    #[test]
    fn both_sides_collects_x_first() {
        let d = both_sides(Lang::Sv, 5, 2, 3, 10).unwrap();
        assert_eq!(d.answer, Answer::numeric(4.0));
        assert_eq!(d.clues[0].latex.as_deref(), Some("2x + 2 = 10"));
        assert!(both_sides(Lang::Sv, 3, 2, 5, 10).is_none());
    }

    #[test]
    fn word_problems_fill_every_placeholder() {
        let d = word_price(Lang::En, "Maja", "pens", 4, 36);
        assert_eq!(d.render.description, "Maja buys 4 pens and pays 36 kr. How much does one cost?");
        assert_eq!(d.answer, Answer::numeric(9.0));
        let d = word_age(Lang::Sv, "Hugo", "mormor", 6, 60);
        assert!(!d.render.description.contains('{'));
        assert_eq!(d.answer, Answer::numeric(10.0));
    }

    #[test]
    fn word_age_relative_is_old_enough() {
        let ctx = GenContext::new(Lang::En, Default::default(), 64);
        for i in 0..200 {
            let mut rng = crate::drill_engine::rng::stream_for(Some(&format!("age-{i}")));
            let d = build(&mut rng, Variation::WordAge, &ctx).unwrap();
            let relative = ["grandmother", "grandfather", "mother", "father", "aunt", "uncle"]
                .into_iter()
                .find(|r| d.render.description.contains(&format!("'s {r} is")))
                .expect("description names a relative");
            let total: i64 = d.clues[0]
                .latex
                .as_deref()
                .and_then(|l| l.split(" = ").nth(1))
                .and_then(|n| n.parse().ok())
                .expect("first clue is kx = total");
            assert!(age_span(relative).contains(&total), "{relative} aged {total}");
        }
    }
}
