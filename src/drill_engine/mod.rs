//! Question engine: seeded generation, topic dispatch and the answer token.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Topics, answers, render payload, request/response structs |
//! | `error`       | `EngineError`, the crate-wide error type |
//! | `config`      | `EngineConfig` (TOML): fallback policy, resample cap, server port |
//! | `rng`         | Seed hashing, per-request `StdRng`, bounded resampling |
//! | `math`        | GCD/LCM, fraction reduction, rounding and number formatting |
//! | `i18n`        | Swedish/English lookup and the static `Term` table |
//! | `context`     | Word-problem vocabulary, names and template filling |
//! | `helpers`     | Shared builder functions and the answer leak check |
//! | `topics`      | Nine topic generators with level-to-mode dispatch |
//! | `catalog`     | Static variation catalog for authoring tools |
//! | `token`       | base64 answer token and input normalisation |
//! | `progression` | Streak-based level-up policy and difficulty table |
//! | `generator`   | Request validation and the `generate_question` entry point |

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod math;
pub mod models;
pub mod progression;
pub mod rng;
pub mod token;
pub mod topics;

// Re-export the public API surface so callers can use
// `drill_engine::generate_question` without reaching into sub-modules.
pub use config::{EngineConfig, FallbackPolicy};
pub use error::{EngineError, EngineResult};
pub use generator::{generate, generate_by_variation, generate_question, resolve_request, to_response};
pub use i18n::Lang;
pub use models::{
    Answer, AnswerType, Clue, GenOptions, GeneratedQuestion, QuestionRequest,
    QuestionResponse, RenderPayload, Topic,
};
pub use progression::{check_level_up, get_config};
pub use token::{check_answer, decode_token, encode_token};
