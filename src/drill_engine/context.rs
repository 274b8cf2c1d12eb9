//! Flavour vocabulary for word problems: names, everyday items, and the
//! `{placeholder}` template filler.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::drill_engine::{i18n::Lang, rng::DrawExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextCategory {
    Shopping,
    School,
    Hobbies,
    Age,
}

impl ContextCategory {
    pub const ALL: [ContextCategory; 4] = [
        ContextCategory::Shopping,
        ContextCategory::School,
        ContextCategory::Hobbies,
        ContextCategory::Age,
    ];

    /// Categories whose items can be bought by the piece.
    pub const PURCHASABLE: [ContextCategory; 3] = [
        ContextCategory::Shopping,
        ContextCategory::School,
        ContextCategory::Hobbies,
    ];
}

/// (sv, en) vocabulary pairs, plural form.
const SHOPPING: &[(&str, &str)] = &[
    ("äpplen", "apples"),
    ("bullar", "buns"),
    ("glassar", "ice creams"),
    ("bananer", "bananas"),
    ("mjölkpaket", "cartons of milk"),
];

const SCHOOL: &[(&str, &str)] = &[
    ("pennor", "pens"),
    ("suddgummin", "erasers"),
    ("linjaler", "rulers"),
    ("anteckningsböcker", "notebooks"),
];

const HOBBIES: &[(&str, &str)] = &[
    ("klistermärken", "stickers"),
    ("fotbollskort", "football cards"),
    ("pärlor", "beads"),
    ("gitarrsträngar", "guitar strings"),
];

const AGE: &[(&str, &str)] = &[
    ("mormor", "grandmother"),
    ("farfar", "grandfather"),
    ("mamma", "mother"),
    ("pappa", "father"),
    ("moster", "aunt"),
    ("morbror", "uncle"),
];

const NAMES: &[&str] = &[
    "Alva", "Hugo", "Maja", "Noah", "Saga", "Omar", "Leo", "Wilma", "Amir", "Ella",
];

fn table(category: ContextCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        ContextCategory::Shopping => SHOPPING,
        ContextCategory::School   => SCHOOL,
        ContextCategory::Hobbies  => HOBBIES,
        ContextCategory::Age      => AGE,
    }
}

pub fn random_context_item<R: Rng>(rng: &mut R, category: ContextCategory, lang: Lang) -> &'static str {
    let (sv, en) = *rng.pick(table(category));
    match lang {
        Lang::Sv => sv,
        Lang::En => en,
    }
}

pub fn random_name<R: Rng>(rng: &mut R) -> &'static str {
    *rng.pick(NAMES)
}

/// Ages a reader would believe for a relative from the `Age` table, in
/// either language.
pub fn age_span(relative: &str) -> RangeInclusive<i64> {
    match relative {
        "mormor" | "farfar" | "grandmother" | "grandfather" => 50..=90,
        "mamma" | "pappa" | "mother" | "father"             => 22..=55,
        _                                                   => 18..=70,
    }
}

/// Replace every `{key}` with its value in one left-to-right pass, so
/// inserted values are never expanded again. Placeholders without a
/// matching key are left untouched.
pub fn fill_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = &rest[open + 1..close];
        match pairs.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..=close]),
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::rng::stream_for;

    #[test]
    fn fill_template_replaces_known_and_keeps_unknown() {
        let out = fill_template("{name} has {n} {item}", &[("name", "Alva"), ("n", "3")]);
        assert_eq!(out, "Alva has 3 {item}");
    }

    #[test]
    fn fill_template_replaces_repeated_placeholders() {
        assert_eq!(fill_template("{a}+{a}", &[("a", "1")]), "1+1");
    }

    #[test]
    fn fill_template_does_not_expand_inserted_values() {
        let out = fill_template("{name} bought {n}", &[("name", "{n}"), ("n", "4")]);
        assert_eq!(out, "{n} bought 4");
    }

    #[test]
    fn fill_template_keeps_unclosed_braces() {
        assert_eq!(fill_template("{a} and {b", &[("a", "1")]), "1 and {b");
        assert_eq!(fill_template("", &[("a", "1")]), "");
    }

    #[test]
    fn every_relative_has_a_specific_age_span() {
        for (sv, en) in AGE {
            assert_eq!(age_span(sv), age_span(en), "{sv}/{en}");
            assert!(*age_span(en).start() >= 18);
        }
        assert_eq!(age_span("grandmother"), 50..=90);
    }

    #[test]
    fn context_items_follow_lang() {
        let mut rng = stream_for(Some("ctx"));
        for category in ContextCategory::ALL {
            let en = random_context_item(&mut rng, category, Lang::En);
            assert!(table(category).iter().any(|(_, e)| *e == en));
        }
        let name = random_name(&mut rng);
        assert!(NAMES.contains(&name));
    }
}
