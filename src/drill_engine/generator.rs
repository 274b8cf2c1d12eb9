use rand::{rngs::StdRng, RngCore};
use tracing::{debug, error, warn};

use crate::drill_engine::{
    config::{EngineConfig, FallbackPolicy},
    error::{EngineError, EngineResult},
    helpers::{leaks_answer, Draft, GenContext},
    i18n::Lang,
    models::{GenOptions, GeneratedQuestion, QuestionRequest, QuestionResponse, ServerData, Topic},
    rng::stream_for,
    token::encode_token,
    topics::{self, TopicVariation},
};

/// What a validated request asks the engine to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Level dispatch: the topic picks a variation inside the level's mode.
    Level { topic: Topic, level: u8 },
    /// One exact variation, irrespective of level.
    Variation(TopicVariation),
}

/// Output of [`resolve_request`]: every field is known to be valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub target: Target,
    pub lang: Lang,
    pub seed: Option<String>,
    pub options: GenOptions,
}

/// Generate a question ID from topic, level and the request's stream.
fn make_question_id(topic: Topic, level: u8, rng: &mut impl RngCore) -> String {
    format!("{}-L{}-{:08X}", topic.prefix(), level, rng.next_u32())
}

/// The single validation gate for inbound requests.
///
/// Under [`FallbackPolicy::Strict`] malformed input is a typed error. Under
/// [`FallbackPolicy::Lenient`] it is logged and replaced: an unknown topic by
/// `default_topic`, an out-of-range level by 1, an unknown variation key by
/// level 1 of the request's topic, an oversized multiplier by the cap.
pub fn resolve_request(request: &QuestionRequest, config: &EngineConfig) -> EngineResult<ResolvedRequest> {
    let lenient = config.fallback == FallbackPolicy::Lenient;

    let explicit = match request.variation.as_deref() {
        None => None,
        Some(key) => match TopicVariation::from_key(key) {
            Some(v) => Some(v),
            None if lenient => {
                warn!(target: "question_engine", variation = key, topic = %request.topic, "Unknown variation key, falling back to level 1");
                None
            }
            None => return Err(EngineError::UnknownVariation { key: key.to_string() }),
        },
    };

    let target = match explicit {
        Some(v) => Target::Variation(v),
        None => {
            let topic = resolve_topic(&request.topic, config, lenient)?;
            // An unknown variation always restarts at level 1.
            let requested = if request.variation.is_some() { 1 } else { request.level };
            let level = resolve_level(topic, requested, lenient)?;
            Target::Level { topic, level }
        }
    };

    Ok(ResolvedRequest {
        target,
        lang: request.lang,
        seed: request.seed.clone(),
        options: resolve_options(request.options, lenient)?,
    })
}

fn resolve_options(options: GenOptions, lenient: bool) -> EngineResult<GenOptions> {
    match check_options(options) {
        Err(_) if lenient => {
            let max = GenOptions::MAX_MULTIPLIER;
            warn!(target: "question_engine", multiplier = options.multiplier, max, "Multiplier too large, clamping");
            Ok(GenOptions { multiplier: max, ..options })
        }
        checked => checked,
    }
}

/// Multipliers of 0 are read as 1; anything above the cap is an error.
fn check_options(options: GenOptions) -> EngineResult<GenOptions> {
    let max = GenOptions::MAX_MULTIPLIER;
    if options.multiplier > max {
        return Err(EngineError::InvalidMultiplier { value: options.multiplier, max });
    }
    Ok(GenOptions { multiplier: options.multiplier.max(1), ..options })
}

fn resolve_topic(key: &str, config: &EngineConfig, lenient: bool) -> EngineResult<Topic> {
    if let Some(topic) = Topic::from_key(key) {
        return Ok(topic);
    }
    if !lenient {
        return Err(EngineError::UnknownTopic(key.to_string()));
    }
    let fallback = Topic::from_key(&config.default_topic).unwrap_or(Topic::FractionArithmetic);
    warn!(target: "question_engine", topic = key, fallback = %fallback, "Unknown topic, using default topic");
    Ok(fallback)
}

fn resolve_level(topic: Topic, level: u32, lenient: bool) -> EngineResult<u8> {
    let max = topic.max_level();
    match u8::try_from(level) {
        Ok(l) if (1..=max).contains(&l) => Ok(l),
        _ if lenient => {
            warn!(target: "question_engine", %topic, level, max, "Level out of range, using level 1");
            Ok(1)
        }
        _ => Err(EngineError::InvalidLevel { topic: topic.key().to_string(), level, max }),
    }
}

/// Build drafts until one passes the leak check, at most `attempts` times.
fn leak_free<F>(rng: &mut StdRng, attempts: u32, mut build: F) -> EngineResult<Draft>
where
    F: FnMut(&mut StdRng) -> EngineResult<Draft>,
{
    for _ in 0..attempts {
        let draft = build(rng)?;
        if !leaks_answer(&draft) {
            return Ok(draft);
        }
        debug!(target: "question_engine", variation = draft.variation, "Render payload leaks the answer, resampling");
    }
    error!(target: "question_engine", attempts, "No leak-free render within the attempt cap");
    Err(EngineError::GenerationExhausted { what: "leak-free render", attempts })
}

fn assemble(topic: Topic, level: u8, question_id: String, draft: Draft) -> GeneratedQuestion {
    debug!(
        target: "question_engine",
        %question_id,
        %topic,
        level,
        variation = draft.variation,
        clues = draft.clues.len(),
        "Generated question"
    );
    GeneratedQuestion {
        question_id,
        topic,
        level,
        variation: draft.variation.to_string(),
        render_data: draft.render,
        server_data: ServerData { answer: draft.answer, solution_steps: draft.clues },
    }
}

/// Level dispatch for a known topic. `level` must be in `1..=topic.max_level()`.
pub fn generate(
    topic: Topic,
    level: u8,
    seed: Option<&str>,
    lang: Lang,
    options: GenOptions,
    config: &EngineConfig,
) -> EngineResult<GeneratedQuestion> {
    let max = topic.max_level();
    if !(1..=max).contains(&level) {
        return Err(EngineError::InvalidLevel { topic: topic.key().to_string(), level: u32::from(level), max });
    }
    let ctx = GenContext::new(lang, check_options(options)?, config.max_resample_attempts);
    let mut rng = stream_for(seed);
    let question_id = make_question_id(topic, level, &mut rng);
    let draft = leak_free(&mut rng, ctx.max_attempts, |rng| topics::generate_level(topic, rng, level, &ctx))?;
    Ok(assemble(topic, level, question_id, draft))
}

/// Build exactly the variation named by `key`. The question's level is the
/// fixed level whose mode contains that variation.
pub fn generate_by_variation(
    key: &str,
    seed: Option<&str>,
    lang: Lang,
    options: GenOptions,
    config: &EngineConfig,
) -> EngineResult<GeneratedQuestion> {
    let variation = TopicVariation::from_key(key).ok_or_else(|| EngineError::UnknownVariation { key: key.to_string() })?;
    generate_variation(variation, seed, lang, options, config)
}

fn generate_variation(
    variation: TopicVariation,
    seed: Option<&str>,
    lang: Lang,
    options: GenOptions,
    config: &EngineConfig,
) -> EngineResult<GeneratedQuestion> {
    let (topic, level) = (variation.topic(), variation.level());
    let ctx = GenContext::new(lang, check_options(options)?, config.max_resample_attempts);
    let mut rng = stream_for(seed);
    let question_id = make_question_id(topic, level, &mut rng);
    let draft = leak_free(&mut rng, ctx.max_attempts, |rng| topics::generate_variation(variation, rng, &ctx))?;
    Ok(assemble(topic, level, question_id, draft))
}

/// Generate from an already validated request.
pub fn generate_resolved(request: &ResolvedRequest, config: &EngineConfig) -> EngineResult<GeneratedQuestion> {
    let seed = request.seed.as_deref();
    match request.target {
        Target::Level { topic, level } => generate(topic, level, seed, request.lang, request.options, config),
        Target::Variation(v) => generate_variation(v, seed, request.lang, request.options, config),
    }
}

/// Wrap a generated question for the client. The answer leaves only as
/// the token.
pub fn to_response(question: GeneratedQuestion) -> QuestionResponse {
    let token = encode_token(&question.server_data.answer);
    QuestionResponse {
        question_id: question.question_id,
        render_data: question.render_data,
        clues: question.server_data.solution_steps,
        token,
    }
}

/// Core entry point: validate, generate, wrap.
pub fn generate_question(request: &QuestionRequest, config: &EngineConfig) -> EngineResult<QuestionResponse> {
    let resolved = resolve_request(request, config)?;
    generate_resolved(&resolved, config).map(to_response)
}
