//! Crate-level tests for `math_drill_gen`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → byte-identical JSON; concurrent calls do not interfere; different seeds → varied output |
//! | Structural | ≥1 clue; last clue carries the canonical answer; ID format and prefix; level and variation recorded |
//! | Leakage | No render payload spells out its answer; the response envelope has no cleartext answer |
//! | Constraints | Reduced positive fractions; positive subtraction results outside negative numbers |
//! | Catalog | Every catalog key is handled and lands on its own topic; keys unique across topics |
//! | Request gate | Strict errors; lenient fallbacks; hide_concept honoured |
//! | Token | Token decodes to the last clue's answer; checking accepts normalised input |
//! | Scenarios | Fraction 3/8 + 2/8; scale 7 cm at 1:50; cylinder d = 8, h = 10; level-up policy |

use std::collections::HashSet;

use crate::drill_engine::{
    catalog::SKILL_BUCKETS,
    check_answer, check_level_up,
    config::{EngineConfig, FallbackPolicy},
    decode_token,
    error::EngineError,
    generate, generate_by_variation, generate_question,
    helpers::{leaks_answer, Draft},
    i18n::Lang,
    math::gcd,
    models::{Answer, GenOptions, GeneratedQuestion, QuestionRequest, Topic},
    topics::{fractions, scale, volume, TopicVariation},
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Seed strings that span different RNG states.
const SEEDS: [&str; 6] = ["1", "42", "lesson-7", "elev-19", "0xDEADBEEF", ""];

fn cfg() -> EngineConfig {
    EngineConfig::default()
}

fn lenient() -> EngineConfig {
    EngineConfig { fallback: FallbackPolicy::Lenient, ..EngineConfig::default() }
}

fn gen(topic: Topic, level: u8, seed: &str) -> GeneratedQuestion {
    generate(topic, level, Some(seed), Lang::Sv, GenOptions::default(), &cfg())
        .unwrap_or_else(|e| panic!("{topic} level {level} seed {seed:?}: {e}"))
}

/// Every (topic, level) pair the engine accepts.
fn all_levels() -> Vec<(Topic, u8)> {
    Topic::ALL
        .into_iter()
        .flat_map(|t| (1..=t.max_level()).map(move |l| (t, l)))
        .collect()
}

/// Signed literals such as `-3` in a LaTeX string. Binary minus is always
/// written with spaces (`a - b`), so a minus glued to a digit is a sign.
fn negative_literals(latex: &str) -> Vec<String> {
    let bytes = latex.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i] == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        .map(|i| {
            let digits = latex[i + 1..].chars().take_while(char::is_ascii_digit).collect::<String>();
            format!("-{digits}")
        })
        .collect()
}

fn as_draft(q: &GeneratedQuestion) -> Draft {
    Draft {
        variation: "",
        render: q.render_data.clone(),
        answer: q.server_data.answer.clone(),
        clues: q.server_data.solution_steps.clone(),
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_json() {
    for (topic, level) in all_levels() {
        for lang in [Lang::Sv, Lang::En] {
            let a = generate(topic, level, Some("repeat-me"), lang, GenOptions::default(), &cfg()).unwrap();
            let b = generate(topic, level, Some("repeat-me"), lang, GenOptions::default(), &cfg()).unwrap();
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap(),
                "output differs for {topic} level {level}"
            );
        }
    }
}

#[test]
fn concurrent_calls_with_the_same_seed_agree() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| serde_json::to_string(&gen(Topic::Equations, 5, "threads")).unwrap()))
        .collect();
    let outputs: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs.len(), 1);
}

#[test]
fn different_seeds_produce_varied_questions() {
    for topic in Topic::ALL {
        let ids: HashSet<String> = (0..10)
            .map(|i| gen(topic, topic.max_level(), &format!("vary-{i}")).question_id)
            .collect();
        assert!(ids.len() > 1, "{topic} produced the same ID for every seed");
    }
}

#[test]
fn entropy_seed_produces_a_valid_question() {
    for topic in Topic::ALL {
        let q = generate(topic, 1, None, Lang::En, GenOptions::default(), &cfg()).unwrap();
        assert!(!q.server_data.solution_steps.is_empty());
    }
}

// ── structural ───────────────────────────────────────────────────────────────

#[test]
fn every_question_has_clues_ending_with_the_answer() {
    for (topic, level) in all_levels() {
        for seed in SEEDS {
            let q = gen(topic, level, seed);
            let last = q.server_data.solution_steps.last().expect("at least one clue");
            let canon = q.server_data.answer.canonical();
            let in_latex = last.latex.as_deref().is_some_and(|l| l.contains(&canon));
            assert!(
                in_latex || last.text.contains(&canon),
                "last clue of {} does not contain {canon:?}",
                q.question_id
            );
        }
    }
}

#[test]
fn question_id_has_prefix_level_and_hex_suffix() {
    for (topic, level) in all_levels() {
        let q = gen(topic, level, "ids");
        let head = format!("{}-L{}-", topic.prefix(), level);
        assert!(q.question_id.starts_with(&head), "{} should start with {head}", q.question_id);
        let hex = &q.question_id[head.len()..];
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_eq!(q.topic, topic);
        assert_eq!(q.level, level);
    }
}

#[test]
fn fixed_levels_only_use_their_own_variations() {
    for (topic, level) in all_levels().into_iter().filter(|(t, l)| *l < t.max_level()) {
        for seed in SEEDS {
            let q = gen(topic, level, seed);
            let v = TopicVariation::from_key(&q.variation).expect("recorded variation is known");
            assert_eq!(v.topic(), topic);
            assert_eq!(v.level(), level, "{} is not a level {level} variation", q.variation);
        }
    }
}

#[test]
fn numeric_answers_are_finite() {
    for (topic, level) in all_levels() {
        for seed in SEEDS {
            if let Answer::Numeric { value } = gen(topic, level, seed).server_data.answer {
                assert!(value.is_finite(), "{topic} level {level}: {value}");
            }
        }
    }
}

// ── leakage ──────────────────────────────────────────────────────────────────

#[test]
fn render_payload_never_leaks_the_answer() {
    for (topic, level) in all_levels() {
        for seed in SEEDS {
            let q = gen(topic, level, seed);
            assert!(!leaks_answer(&as_draft(&q)), "{} leaks its answer", q.question_id);
        }
    }
}

#[test]
fn response_envelope_carries_the_answer_only_in_the_token() {
    let request = QuestionRequest::new("equations", 3).seed("envelope");
    let response = generate_question(&request, &cfg()).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    let keys: HashSet<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, HashSet::from(["questionId", "renderData", "clues", "token"]));
    assert!(json["renderData"].get("answer").is_none());
}

// ── constraints ──────────────────────────────────────────────────────────────

#[test]
fn fraction_answers_are_reduced_and_positive() {
    for level in 1..=Topic::FractionArithmetic.max_level() {
        for i in 0..20 {
            let q = gen(Topic::FractionArithmetic, level, &format!("frac-{i}"));
            match q.server_data.answer {
                Answer::Fraction { n, d } => {
                    assert_eq!(gcd(n, d), 1, "{n}/{d} is not reduced");
                    assert!(n > 0 && d > 1, "{n}/{d}");
                }
                Answer::Text { .. } => assert!(q.variation.starts_with("concept_")),
                ref other => panic!("unexpected fraction answer {other:?}"),
            }
        }
    }
}

#[test]
fn subtraction_outside_negative_numbers_stays_positive() {
    for i in 0..30 {
        let seed = format!("sub-{i}");
        for key in ["sub_same_denom", "sub_multiple_denom", "sub_diff_denom", "eq_one_step_sub", "eq_both_sides"] {
            let q = generate_by_variation(key, Some(&seed), Lang::Sv, GenOptions::default(), &cfg()).unwrap();
            match q.server_data.answer {
                Answer::Fraction { n, .. } => assert!(n > 0, "{key}: {n}"),
                Answer::Numeric { value } => assert!(value > 0.0, "{key}: {value}"),
                ref other => panic!("{key}: {other:?}"),
            }
        }
    }
}

#[test]
fn subtraction_clues_never_show_a_negative_value() {
    for i in 0..30 {
        let seed = format!("sub-steps-{i}");
        for key in ["sub_same_denom", "sub_multiple_denom", "sub_diff_denom", "eq_one_step_sub", "eq_both_sides"] {
            let q = generate_by_variation(key, Some(&seed), Lang::En, GenOptions::default(), &cfg()).unwrap();
            let latex = q.render_data.latex.iter().chain(q.server_data.solution_steps.iter().filter_map(|c| c.latex.as_ref()));
            for tex in latex {
                assert!(negative_literals(tex).is_empty(), "{key} seed {seed}: {tex}");
            }
        }
    }
}

#[test]
fn negative_literal_scan_ignores_binary_minus() {
    assert!(negative_literals("\\frac{7}{8} - \\frac{3}{8} = \\frac{4}{8}").is_empty());
    assert_eq!(negative_literals("x = -3"), vec!["-3"]);
    assert_eq!(negative_literals("\\frac{-12}{4}"), vec!["-12"]);
}

#[test]
fn multiplier_keeps_questions_valid() {
    let options = GenOptions { hide_concept: false, multiplier: 4 };
    for topic in [Topic::Equations, Topic::NegativeNumbers, Topic::Geometry, Topic::Simplify] {
        for seed in SEEDS {
            let q = generate(topic, topic.max_level(), Some(seed), Lang::En, options, &cfg()).unwrap();
            assert!(!leaks_answer(&as_draft(&q)));
        }
    }
}

// ── catalog ──────────────────────────────────────────────────────────────────

#[test]
fn every_catalog_key_is_handled_by_its_topic() {
    for bucket in SKILL_BUCKETS {
        let q = generate_by_variation(bucket.key, Some("catalog"), Lang::En, GenOptions::default(), &cfg())
            .unwrap_or_else(|e| panic!("{}: {e}", bucket.key));
        assert_eq!(q.variation, bucket.key);
        assert_eq!(q.topic, bucket.topic, "{} generated under the wrong topic", bucket.key);
    }
}

#[test]
fn catalog_and_generators_agree_on_the_key_set() {
    let generated: Vec<&str> = TopicVariation::all().into_iter().map(|v| v.key()).collect();
    let unique: HashSet<&str> = generated.iter().copied().collect();
    assert_eq!(unique.len(), generated.len(), "variation keys collide across topics");
    let catalog: HashSet<&str> = SKILL_BUCKETS.iter().map(|b| b.key).collect();
    assert_eq!(unique, catalog);
}

// ── request gate ─────────────────────────────────────────────────────────────

#[test]
fn strict_policy_rejects_malformed_requests() {
    let c = cfg();
    let err = generate_question(&QuestionRequest::new("trigonometry", 1), &c).unwrap_err();
    assert_eq!(err, EngineError::UnknownTopic("trigonometry".into()));

    let err = generate_question(&QuestionRequest::new("similarity", 5), &c).unwrap_err();
    assert!(matches!(err, EngineError::InvalidLevel { level: 5, max: 4, .. }));

    let err = generate_question(&QuestionRequest::new("volume", 0), &c).unwrap_err();
    assert!(matches!(err, EngineError::InvalidLevel { level: 0, .. }));

    let err = generate_question(&QuestionRequest::new("scale", 1).variation("scale_find_moon"), &c).unwrap_err();
    assert_eq!(err, EngineError::UnknownVariation { key: "scale_find_moon".into() });
}

#[test]
fn lenient_policy_falls_back_instead_of_failing() {
    let c = lenient();
    let r = generate_question(&QuestionRequest::new("trigonometry", 2).seed("x"), &c).unwrap();
    assert!(r.question_id.starts_with("FR-L2-"), "{}", r.question_id);

    let r = generate_question(&QuestionRequest::new("geometry", 99).seed("x"), &c).unwrap();
    assert!(r.question_id.starts_with("GE-L1-"), "{}", r.question_id);

    let r = generate_question(&QuestionRequest::new("volume", 4).variation("nope").seed("x"), &c).unwrap();
    assert!(r.question_id.starts_with("VO-L1-"), "{}", r.question_id);
}

#[test]
fn oversized_multiplier_is_rejected_or_clamped() {
    let huge = GenOptions { hide_concept: false, multiplier: u32::MAX };
    let max = GenOptions::MAX_MULTIPLIER;

    let err = generate_by_variation("rectangle_area", Some("big"), Lang::En, huge, &cfg()).unwrap_err();
    assert_eq!(err, EngineError::InvalidMultiplier { value: u32::MAX, max });
    let err = generate(Topic::Geometry, 2, Some("big"), Lang::En, huge, &cfg()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMultiplier { .. }));

    let mut request = QuestionRequest::new("geometry", 1).variation("rectangle_area").seed("big");
    request.options = huge;
    let err = generate_question(&request, &cfg()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMultiplier { .. }));

    for seed in SEEDS {
        let request = QuestionRequest { seed: Some(seed.to_string()), ..request.clone() };
        let response = generate_question(&request, &lenient()).unwrap();
        let area: f64 = decode_token(&response.token).unwrap().parse().unwrap();
        let side = 12.0 * f64::from(max);
        assert!(area >= 4.0 && area <= side * side, "{area}");
    }

    let at_cap = GenOptions { hide_concept: false, multiplier: max };
    for topic in Topic::ALL {
        assert!(generate(topic, topic.max_level(), Some("cap"), Lang::Sv, at_cap, &cfg()).is_ok());
    }
}

#[test]
fn explicit_variation_sets_topic_and_level() {
    let r = generate_question(&QuestionRequest::new("fraction_arith", 1).variation("volume_cone").seed("v"), &cfg())
        .unwrap();
    assert!(r.question_id.starts_with("VO-L4-"), "{}", r.question_id);
}

#[test]
fn hide_concept_removes_multiple_choice_variations() {
    let hidden = GenOptions { hide_concept: true, multiplier: 1 };
    for topic in [Topic::FractionArithmetic, Topic::Scale, Topic::Similarity, Topic::Geometry] {
        for i in 0..40 {
            let q = generate(topic, 1, Some(&format!("hide-{i}")), Lang::Sv, hidden, &cfg()).unwrap();
            assert!(!q.variation.starts_with("concept_"), "{topic}: {}", q.variation);
        }
    }
    let shown: HashSet<String> = (0..60)
        .map(|i| gen(Topic::FractionArithmetic, 1, &format!("hide-{i}")).variation)
        .collect();
    assert!(shown.contains("concept_denominator"));
}

#[test]
fn language_changes_text_but_not_the_answer() {
    for (topic, level) in all_levels() {
        let sv = generate(topic, level, Some("lang"), Lang::Sv, GenOptions::default(), &cfg()).unwrap();
        let en = generate(topic, level, Some("lang"), Lang::En, GenOptions::default(), &cfg()).unwrap();
        assert_eq!(sv.question_id, en.question_id);
        assert_eq!(sv.variation, en.variation);
        assert_ne!(sv.render_data.description, en.render_data.description);
        if !matches!(sv.server_data.answer, Answer::Text { .. }) {
            assert_eq!(sv.server_data.answer, en.server_data.answer);
        }
    }
}

// ── token ────────────────────────────────────────────────────────────────────

#[test]
fn token_decodes_to_the_canonical_answer() {
    for (topic, level) in all_levels() {
        let request = QuestionRequest::new(topic.key(), u32::from(level)).seed("token");
        let response = generate_question(&request, &cfg()).unwrap();
        let canon = decode_token(&response.token).unwrap();
        let last = response.clues.last().unwrap();
        assert!(last.text.ends_with(&canon) || last.text.contains(&format!("{canon} ")), "{canon:?} vs {:?}", last.text);
        assert!(check_answer(&response.token, &canon).unwrap());
    }
}

// ── scenarios ────────────────────────────────────────────────────────────────

#[test]
fn scenario_fraction_same_denominator() {
    let d = fractions::add_sub(Lang::Sv, "add_same_denom", fractions::Op::Add, (3, 8), (2, 8)).unwrap();
    assert_eq!(d.answer, Answer::Fraction { n: 5, d: 8 });
    assert_eq!(d.clues.len(), 3);
    assert_eq!(d.clues[2].latex.as_deref(), Some("\\frac{5}{8}"));
}

#[test]
fn scenario_scale_find_reality() {
    let d = scale::find_reality(Lang::Sv, 7, 50);
    assert_eq!(d.answer, Answer::numeric(350.0));
    assert!(d.clues.iter().any(|c| c.latex.as_deref() == Some("7 \\cdot 50 = 350")));
}

#[test]
fn scenario_cylinder_with_diameter() {
    let d = volume::cylinder(Lang::En, 4, 10, true);
    assert_eq!(d.answer, Answer::numeric(502.4));
    let geometry = d.render.geometry.as_ref().unwrap();
    assert!(geometry.measures.iter().any(|m| m.label == "d" && m.value == Some(8.0)));
}

#[test]
fn scenario_level_up_policy() {
    assert!(check_level_up(8, 3).should_promote);
    assert!(!check_level_up(7, 3).should_promote);
    assert!(!check_level_up(8, 5).should_promote);
}
