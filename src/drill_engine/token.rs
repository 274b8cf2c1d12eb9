//! Answer token: `base64(canonical answer string)`.
//!
//! The token is the only place the answer leaves the engine. The checking
//! side decodes it back to the canonical string (or to an [`Answer`]) and
//! compares against the student's input in the same canonical form.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::drill_engine::{
    error::{EngineError, EngineResult},
    models::Answer,
};

/// Canonical string for the token payload.
pub fn format_answer_for_token(answer: &Answer) -> String {
    answer.canonical()
}

pub fn encode_token(answer: &Answer) -> String {
    STANDARD.encode(format_answer_for_token(answer))
}

pub fn decode_token(token: &str) -> EngineResult<String> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| EngineError::InvalidToken(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| EngineError::InvalidToken(e.to_string()))
}

pub fn decode_answer(token: &str) -> EngineResult<Answer> {
    decode_token(token).map(|s| Answer::parse_canonical(&s))
}

/// Student input in canonical form. Accepts a decimal comma and loose
/// spacing (`5 / 8`, `2x+3`).
pub fn normalize_input(input: &str) -> String {
    let trimmed = input.trim();
    let dotted = trimmed.replace(',', ".");
    if dotted.parse::<f64>().is_ok() {
        return Answer::parse_canonical(&dotted).canonical();
    }
    Answer::parse_canonical(trimmed).canonical()
}

/// Compare a student's input with the answer carried by `token`.
pub fn check_answer(token: &str, input: &str) -> EngineResult<bool> {
    let expected = decode_token(token)?;
    Ok(normalize_input(input) == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_answer_shape_survives_the_token() {
        let answers = [
            Answer::numeric(502.4),
            Answer::numeric(-7.0),
            Answer::text("Alla vinklar är lika stora"),
            Answer::Fraction { n: 5, d: 8 },
            Answer::Ratio { left: 1, right: 50 },
            Answer::Linear { k: 3, m: -2 },
        ];
        for a in answers {
            let token = encode_token(&a);
            assert_eq!(decode_token(&token).unwrap(), format_answer_for_token(&a));
            assert_eq!(decode_answer(&token).unwrap(), a);
        }
    }

    #[test]
    fn known_encoding() {
        assert_eq!(encode_token(&Answer::Fraction { n: 5, d: 8 }), "NS84");
        assert_eq!(encode_token(&Answer::numeric(350.0)), "MzUw");
    }

    #[test]
    fn input_is_normalised_before_comparison() {
        let token = encode_token(&Answer::numeric(502.4));
        assert!(check_answer(&token, "502,4").unwrap());
        assert!(check_answer(&token, " 502.40 ").unwrap());
        assert!(!check_answer(&token, "502").unwrap());

        let token = encode_token(&Answer::Linear { k: 2, m: -3 });
        assert!(check_answer(&token, "2x-3").unwrap());
        let token = encode_token(&Answer::Fraction { n: 5, d: 8 });
        assert!(check_answer(&token, "5 / 8").unwrap());
        assert!(!check_answer(&token, "10/16").unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode_token("%%%"), Err(EngineError::InvalidToken(_))));
        // valid base64, invalid UTF-8
        assert!(matches!(decode_token("/w=="), Err(EngineError::InvalidToken(_))));
    }
}
