//! Demo of all nine topics.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Language comparison**: the same fraction question is generated twice
//!    (same seed = same operands) in Swedish and English.
//!
//! 2. **All topics**: one question per topic at its mixed level with fixed
//!    seeds, so the output is deterministic and reproducible.
//!
//! 3. **Checking**: the token from a response is checked against a student
//!    answer without any server-side state.

use math_drill_gen::{
    check_answer, drill_engine::catalog::entries_for, generate, generate_question, EngineConfig,
    GenOptions, Lang, QuestionRequest, Topic,
};

fn print_question(topic: Topic, seed: &str, lang: Lang, config: &EngineConfig) {
    let level = topic.max_level();
    let q = match generate(topic, level, Some(seed), lang, GenOptions::default(), config) {
        Ok(q) => q,
        Err(e) => {
            println!("  [{}] generation failed: {}", topic, e);
            return;
        }
    };
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{}]  ID: {}  Variation: {}", q.topic, q.question_id, q.variation);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Q: {}", q.render_data.description);
    if let Some(latex) = &q.render_data.latex {
        println!("     {}", latex);
    }
    if let Some(choices) = &q.render_data.choices {
        for (i, c) in choices.iter().enumerate() {
            println!("     {}) {}", i + 1, c);
        }
    }
    println!();
    for (i, clue) in q.server_data.solution_steps.iter().enumerate() {
        match &clue.latex {
            Some(l) => println!("  {}. {}   [{}]", i + 1, clue.text, l),
            None => println!("  {}. {}", i + 1, clue.text),
        }
    }
    println!();
}

fn main() {
    let config = EngineConfig::default();

    println!("=== Same seed, two languages ===\n");
    print_question(Topic::FractionArithmetic, "demo-lang", Lang::Sv, &config);
    print_question(Topic::FractionArithmetic, "demo-lang", Lang::En, &config);

    println!("=== One question per topic ===\n");
    for (i, topic) in Topic::ALL.into_iter().enumerate() {
        let seed = format!("demo-{}", i);
        print_question(topic, &seed, Lang::En, &config);
        println!("  variations:");
        for bucket in entries_for(topic) {
            println!("    {:<26} {}", bucket.key, bucket.name().get(Lang::En));
        }
        println!();
    }

    println!("=== Stateless checking ===\n");
    let request = QuestionRequest::new("scale", 2).lang(Lang::En).seed("demo-check");
    match generate_question(&request, &config) {
        Ok(response) => {
            println!("  Q: {}", response.render_data.description);
            let expected = response.clues.last().map(|c| c.text.clone()).unwrap_or_default();
            println!("  {}", expected);
            for guess in ["1", "350"] {
                let verdict = match check_answer(&response.token, guess) {
                    Ok(true) => "correct",
                    Ok(false) => "wrong",
                    Err(_) => "bad token",
                };
                println!("  answer {:>4} -> {}", guess, verdict);
            }
        }
        Err(e) => println!("  generation failed: {}", e),
    }
}
