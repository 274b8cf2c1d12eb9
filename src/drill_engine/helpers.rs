//! Shared builder functions used by every topic generator.
//!
//! Each topic assembles the same pieces: pick a variation inside the
//! level's mode, build clue steps, finish with the answer clue and bundle
//! everything into a [`Draft`]. The dispatcher turns a draft into a
//! [`GeneratedQuestion`](crate::drill_engine::models::GeneratedQuestion)
//! by attaching the ID, topic and level.
//!
//! ## Variation tables
//!
//! Topics describe their variations with [`VariationSet`]: one `ALL` table,
//! a key per variation and the mode each one belongs to. Mode pools and key
//! lookup are derived from that single table, so a variation cannot be
//! reachable by key but missing from its level (or the reverse).

use rand::Rng;

use crate::drill_engine::{
    i18n::{t, Lang, Localized, Term, Text},
    models::{Answer, AnswerType, Clue, GenOptions, RenderPayload},
    rng::DrawExt,
};

/// Everything a topic builder needs besides the random stream.
#[derive(Debug, Clone, Copy)]
pub struct GenContext {
    pub lang: Lang,
    pub options: GenOptions,
    pub max_attempts: u32,
}

impl GenContext {
    pub fn new(lang: Lang, options: GenOptions, max_attempts: u32) -> Self {
        GenContext { lang, options, max_attempts }
    }

    pub fn tr(&self, value: impl Into<Text>) -> String {
        t(self.lang, value)
    }

    /// Upper bound of a free operand range, scaled by the caller's multiplier
    /// (clamped to `1..=GenOptions::MAX_MULTIPLIER`).
    pub fn upper(&self, base: i64) -> i64 {
        base * i64::from(self.options.multiplier.clamp(1, GenOptions::MAX_MULTIPLIER))
    }
}

/// A finished question body before the dispatcher attaches its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub variation: &'static str,
    pub render: RenderPayload,
    pub answer: Answer,
    pub clues: Vec<Clue>,
}

pub trait VariationSet: Copy + PartialEq + 'static {
    type Mode: Copy + PartialEq;

    const ALL: &'static [Self];

    fn key(self) -> &'static str;
    fn mode(self) -> Self::Mode;
    /// Level whose fixed mode contains this variation.
    fn level(self) -> u8;

    fn is_concept(self) -> bool {
        self.key().starts_with("concept_")
    }
}

pub fn variation_from_key<V: VariationSet>(key: &str) -> Option<V> {
    V::ALL.iter().copied().find(|v| v.key() == key)
}

/// Uniform choice among the variations of `mode`, honouring `hide_concept`.
pub fn choose_in_mode<R: Rng, V: VariationSet>(rng: &mut R, mode: V::Mode, options: &GenOptions) -> V {
    let all: Vec<V> = V::ALL.iter().copied().filter(|v| v.mode() == mode).collect();
    let allowed: Vec<V> = all
        .iter()
        .copied()
        .filter(|v| !(options.hide_concept && v.is_concept()))
        .collect();
    // Every mode carries at least one non-concept variation.
    if allowed.is_empty() { *rng.pick(&all) } else { *rng.pick(&allowed) }
}

pub fn clue(text: String, latex: impl Into<String>) -> Clue {
    Clue { text, latex: Some(latex.into()) }
}

pub fn note(text: String) -> Clue {
    Clue { text, latex: None }
}

/// The closing clue: states the answer in canonical form, optionally with
/// a unit and a LaTeX rendering.
pub fn final_clue(lang: Lang, answer: &Answer, unit: Option<&str>, latex: Option<String>) -> Clue {
    let value = match unit {
        Some(u) => format!("{} {}", answer.canonical(), u),
        None => answer.canonical(),
    };
    Clue {
        text: format!("{}: {}", t(lang, Term::Answer), value),
        latex,
    }
}

/// Build a multiple-choice "concept" question. Choices are shuffled with
/// the request's stream; the answer is the correct choice's text.
pub fn multiple_choice<R: Rng>(
    rng: &mut R,
    ctx: &GenContext,
    variation: &'static str,
    prompt: Localized,
    correct: Localized,
    distractors: &[Localized],
    explanation: Localized,
) -> Draft {
    let correct_text = ctx.tr(correct);
    let mut choices: Vec<String> = distractors.iter().map(|d| ctx.tr(d.clone())).collect();
    let slot = rng.gen_range(0..=choices.len());
    choices.insert(slot, correct_text.clone());

    let answer = Answer::text(correct_text);
    let clues = vec![
        note(ctx.tr(explanation)),
        final_clue(ctx.lang, &answer, None, None),
    ];
    let description = format!("{} {}", ctx.tr(prompt), ctx.tr(Term::ChooseCorrect));
    Draft {
        variation,
        render: RenderPayload::new(description, AnswerType::MultipleChoice).choices(choices),
        answer,
        clues,
    }
}

/// True when the client-visible payload spells out the answer.
///
/// Multiple-choice payloads necessarily list it among the choices and are
/// exempt. Numeric answers only count when they appear right after `=`.
pub fn leaks_answer(draft: &Draft) -> bool {
    if draft.render.answer_type == AnswerType::MultipleChoice {
        return false;
    }
    let Ok(render) = serde_json::to_string(&draft.render) else {
        return false;
    };
    let canon = draft.answer.canonical();
    match draft.answer {
        Answer::Numeric { .. } => {
            contains_token(&render, &format!("= {}", canon))
                || contains_token(&render, &format!("={}", canon))
        }
        _ => contains_token(&render, &canon),
    }
}

/// Substring match that does not start or end inside a longer number.
fn contains_token(hay: &str, needle: &str) -> bool {
    hay.match_indices(needle).any(|(i, _)| {
        let before = hay[..i].chars().next_back();
        let after = hay[i + needle.len()..].chars().next();
        let starts_clean = !needle.starts_with(|c: char| c.is_ascii_digit())
            || !before.is_some_and(|c| c.is_ascii_digit());
        let ends_clean = !after.is_some_and(|c| c.is_ascii_alphanumeric() || c == '.');
        starts_clean && ends_clean
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str, latex: &str, answer: Answer) -> Draft {
        Draft {
            variation: "test",
            render: RenderPayload::new(description.to_string(), AnswerType::Numeric).latex(latex),
            answer,
            clues: Vec::new(),
        }
    }

    #[test]
    fn numeric_leak_requires_equals_sign() {
        assert!(leaks_answer(&draft("x", "3 + 4 = 7", Answer::numeric(7.0))));
        assert!(!leaks_answer(&draft("x", "x + 5 = 12", Answer::numeric(1.0))));
        assert!(!leaks_answer(&draft("7 apples", "7x = 49", Answer::numeric(7.0))));
    }

    #[test]
    fn structured_leak_ignores_longer_numbers() {
        let a = Answer::Linear { k: 6, m: 2 };
        assert!(!leaks_answer(&draft("", "16x + 25", a.clone())));
        assert!(leaks_answer(&draft("", "6x + 2", a)));
    }

    #[test]
    fn final_clue_states_canonical_answer() {
        let c = final_clue(Lang::En, &Answer::numeric(350.0), Some("cm"), None);
        assert_eq!(c.text, "Answer: 350 cm");
        let c = final_clue(Lang::Sv, &Answer::Fraction { n: 5, d: 8 }, None, Some("x".into()));
        assert_eq!(c.text, "Svar: 5/8");
    }
}
