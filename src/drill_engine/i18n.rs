//! Bilingual (Swedish / English) string lookup.
//!
//! Static vocabulary lives in the closed [`Term`] table, so a missing
//! translation is a compile error rather than a runtime fallback.
//! Sentences that embed numbers are built by the topic generators as
//! [`Localized`] values and resolved with [`t`] like everything else.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Lang {
    #[default]
    Sv,
    En,
}

impl Lang {
    /// Any tag other than `en` resolves to Swedish.
    pub fn parse(tag: &str) -> Lang {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::Sv,
        }
    }
}

impl From<String> for Lang {
    fn from(tag: String) -> Self {
        Lang::parse(&tag)
    }
}

/// A `{sv, en}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub sv: String,
    pub en: String,
}

impl Localized {
    pub fn new(sv: impl Into<String>, en: impl Into<String>) -> Self {
        Localized { sv: sv.into(), en: en.into() }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Sv => &self.sv,
            Lang::En => &self.en,
        }
    }
}

/// Either an already-resolved string or a translation pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Plain(String),
    Localized(Localized),
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Plain(s.to_string())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Plain(s)
    }
}

impl From<Localized> for Text {
    fn from(l: Localized) -> Self {
        Text::Localized(l)
    }
}

/// Resolve `value` for `lang`. Plain strings pass through unchanged.
pub fn t(lang: Lang, value: impl Into<Text>) -> String {
    match value.into() {
        Text::Plain(s) => s,
        Text::Localized(l) => l.get(lang).to_string(),
    }
}

/// Shared static vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Answer,
    Simplify,
    Calculate,
    ChooseCorrect,
    Solve,
    LevelUp,
    Centimetres,
    Metres,
}

impl Term {
    pub fn text(self) -> Localized {
        let (sv, en) = match self {
            Term::Answer        => ("Svar", "Answer"),
            Term::Simplify      => ("Förenkla så långt det går", "Simplify as far as possible"),
            Term::Calculate     => ("Beräkna", "Calculate"),
            Term::ChooseCorrect => ("Välj rätt alternativ", "Choose the correct option"),
            Term::Solve         => ("Lös ekvationen", "Solve the equation"),
            Term::LevelUp       => ("Bra jobbat! Du går upp en nivå.", "Well done! You move up a level."),
            Term::Centimetres   => ("cm", "cm"),
            Term::Metres        => ("m", "m"),
        };
        Localized::new(sv, en)
    }
}

impl From<Term> for Text {
    fn from(term: Term) -> Self {
        Text::Localized(term.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(t(Lang::En, "x + 1"), "x + 1");
        assert_eq!(t(Lang::Sv, String::from("abc")), "abc");
    }

    #[test]
    fn localized_resolves_by_lang() {
        let l = Localized::new("hej", "hello");
        assert_eq!(t(Lang::Sv, l.clone()), "hej");
        assert_eq!(t(Lang::En, l), "hello");
        assert_eq!(t(Lang::En, Term::Answer), "Answer");
    }

    #[test]
    fn unknown_tags_default_to_swedish() {
        assert_eq!(Lang::parse("en"), Lang::En);
        assert_eq!(Lang::parse(" EN "), Lang::En);
        assert_eq!(Lang::parse("de"), Lang::Sv);
        assert_eq!(Lang::parse(""), Lang::Sv);
        let parsed: Lang = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, Lang::Sv);
    }
}
