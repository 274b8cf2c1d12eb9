//! Variation catalog used by authoring tools ("skill buckets").
//!
//! Each entry names a variation key a studio can request through
//! [`generate_by_variation`](crate::drill_engine::generator::generate_by_variation).
//! The crate tests check that every key here is handled by a generator.

use serde::Serialize;

use crate::drill_engine::{i18n::Localized, models::Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillBucket {
    pub topic: Topic,
    pub key: &'static str,
    pub sv: &'static str,
    pub en: &'static str,
}

impl SkillBucket {
    pub fn name(&self) -> Localized {
        Localized::new(self.sv, self.en)
    }
}

const fn bucket(topic: Topic, key: &'static str, sv: &'static str, en: &'static str) -> SkillBucket {
    SkillBucket { topic, key, sv, en }
}

pub static SKILL_BUCKETS: &[SkillBucket] = &[
    bucket(Topic::FractionArithmetic, "add_same_denom",      "Addition, samma nämnare",          "Addition, same denominator"),
    bucket(Topic::FractionArithmetic, "sub_same_denom",      "Subtraktion, samma nämnare",       "Subtraction, same denominator"),
    bucket(Topic::FractionArithmetic, "concept_denominator", "Vad är nämnaren?",                 "What is the denominator?"),
    bucket(Topic::FractionArithmetic, "add_multiple_denom",  "Addition, nämnare som är multipler", "Addition, multiple denominators"),
    bucket(Topic::FractionArithmetic, "sub_multiple_denom",  "Subtraktion, nämnare som är multipler", "Subtraction, multiple denominators"),
    bucket(Topic::FractionArithmetic, "add_diff_denom",      "Addition, olika nämnare",          "Addition, different denominators"),
    bucket(Topic::FractionArithmetic, "sub_diff_denom",      "Subtraktion, olika nämnare",       "Subtraction, different denominators"),
    bucket(Topic::FractionArithmetic, "mul_fractions",       "Multiplikation av bråk",           "Multiplying fractions"),
    bucket(Topic::FractionArithmetic, "div_fractions",       "Division av bråk",                 "Dividing fractions"),

    bucket(Topic::Scale, "scale_find_drawing",    "Bestäm längden på ritningen", "Find the drawing length"),
    bucket(Topic::Scale, "concept_scale_meaning", "Vad betyder skalan?",         "What does the scale mean?"),
    bucket(Topic::Scale, "scale_find_reality",    "Bestäm verklig längd",        "Find the real length"),
    bucket(Topic::Scale, "scale_find_ratio",      "Bestäm skalan",               "Find the scale"),
    bucket(Topic::Scale, "scale_enlargement",     "Förstoring",                  "Enlargement"),

    bucket(Topic::Volume, "volume_cuboid",            "Rätblock",                 "Cuboid"),
    bucket(Topic::Volume, "volume_cube",              "Kub",                      "Cube"),
    bucket(Topic::Volume, "volume_triangular_prism",  "Triangulärt prisma",       "Triangular prism"),
    bucket(Topic::Volume, "volume_cylinder",          "Cylinder",                 "Cylinder"),
    bucket(Topic::Volume, "volume_cylinder_diameter", "Cylinder med diameter",    "Cylinder, diameter given"),
    bucket(Topic::Volume, "volume_cone",              "Kon",                      "Cone"),
    bucket(Topic::Volume, "volume_sphere",            "Klot",                     "Sphere"),

    bucket(Topic::Similarity, "similar_scale_factor",   "Skalfaktor",               "Scale factor"),
    bucket(Topic::Similarity, "concept_similar_angles", "Vinklar i likformiga figurer", "Angles in similar figures"),
    bucket(Topic::Similarity, "similar_missing_side",   "Okänd sida",               "Missing side"),
    bucket(Topic::Similarity, "similar_area_ratio",     "Areaskala",                "Area scale"),

    bucket(Topic::Equations, "eq_one_step_add", "Ett steg, addition",       "One step, addition"),
    bucket(Topic::Equations, "eq_one_step_sub", "Ett steg, subtraktion",    "One step, subtraction"),
    bucket(Topic::Equations, "eq_one_step_mul", "Ett steg, multiplikation", "One step, multiplication"),
    bucket(Topic::Equations, "eq_word_price",   "Textuppgift, pris",        "Word problem, price"),
    bucket(Topic::Equations, "eq_word_age",     "Textuppgift, ålder",       "Word problem, age"),
    bucket(Topic::Equations, "eq_two_step",     "Två steg",                 "Two steps"),
    bucket(Topic::Equations, "eq_both_sides",   "x i båda leden",           "x on both sides"),

    bucket(Topic::LinearGraph, "slope_from_points",    "Lutning från två punkter", "Slope from two points"),
    bucket(Topic::LinearGraph, "intercept_from_graph", "Skärning med y-axeln",     "y-intercept"),
    bucket(Topic::LinearGraph, "line_equation",        "Linjens ekvation",         "Equation of the line"),

    bucket(Topic::Simplify, "collect_like_terms",     "Samla x-termer",              "Collect like terms"),
    bucket(Topic::Simplify, "collect_with_constants", "Samla x-termer och konstanter", "Collect terms and constants"),
    bucket(Topic::Simplify, "expand_bracket",         "Multiplicera in i parentes",  "Expand a bracket"),
    bucket(Topic::Simplify, "expand_and_collect",     "Parentes och förenkling",     "Expand and collect"),

    bucket(Topic::Geometry, "rectangle_area",       "Rektangelns area",     "Area of a rectangle"),
    bucket(Topic::Geometry, "rectangle_perimeter",  "Rektangelns omkrets",  "Perimeter of a rectangle"),
    bucket(Topic::Geometry, "concept_right_angle",  "Rät vinkel",           "Right angle"),
    bucket(Topic::Geometry, "triangle_area",        "Triangelns area",      "Area of a triangle"),
    bucket(Topic::Geometry, "circle_area",          "Cirkelns area",        "Area of a circle"),
    bucket(Topic::Geometry, "circle_circumference", "Cirkelns omkrets",     "Circumference of a circle"),

    bucket(Topic::NegativeNumbers, "neg_add",               "Addition med negativa tal",   "Adding negative numbers"),
    bucket(Topic::NegativeNumbers, "neg_subtract_negative", "Subtrahera ett negativt tal", "Subtracting a negative"),
    bucket(Topic::NegativeNumbers, "neg_multiply",          "Multiplikation med tecken",   "Multiplying with signs"),
    bucket(Topic::NegativeNumbers, "neg_divide",            "Division med tecken",         "Dividing with signs"),
];

/// Catalog entries for one topic, in catalog order.
pub fn entries_for(topic: Topic) -> impl Iterator<Item = &'static SkillBucket> {
    SKILL_BUCKETS.iter().filter(move |b| b.topic == topic)
}
