//! Topic generators.
//!
//! Every module exposes the same pair of entry points:
//!
//! ```ignore
//! pub fn generate<R: Rng>(rng: &mut R, level: u8, ctx: &GenContext) -> EngineResult<Draft>
//! pub fn build<R: Rng>(rng: &mut R, variation: Variation, ctx: &GenContext) -> EngineResult<Draft>
//! ```
//!
//! `generate` maps the level to a mode and picks a variation inside it;
//! `build` produces one variation directly. The dispatcher reaches both
//! through [`generate_level`] and [`generate_variation`].

use rand::Rng;

use crate::drill_engine::{
    error::EngineResult,
    helpers::{variation_from_key, Draft, GenContext, VariationSet},
    models::Topic,
};

/// FR-
pub mod fractions;
/// SC-
pub mod scale;
/// VO-
pub mod volume;
/// SI-
pub mod similarity;
/// EQ-
pub mod equations;
/// LG-
pub mod linear_graph;
/// SM-
pub mod simplify;
/// GE-
pub mod geometry;
/// NE-
pub mod negatives;

/// A variation of any topic, addressed by its globally unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicVariation {
    Fractions(fractions::Variation),
    Scale(scale::Variation),
    Volume(volume::Variation),
    Similarity(similarity::Variation),
    Equations(equations::Variation),
    LinearGraph(linear_graph::Variation),
    Simplify(simplify::Variation),
    Geometry(geometry::Variation),
    Negatives(negatives::Variation),
}

impl TopicVariation {
    pub fn from_key(key: &str) -> Option<TopicVariation> {
        variation_from_key(key)
            .map(TopicVariation::Fractions)
            .or_else(|| variation_from_key(key).map(TopicVariation::Scale))
            .or_else(|| variation_from_key(key).map(TopicVariation::Volume))
            .or_else(|| variation_from_key(key).map(TopicVariation::Similarity))
            .or_else(|| variation_from_key(key).map(TopicVariation::Equations))
            .or_else(|| variation_from_key(key).map(TopicVariation::LinearGraph))
            .or_else(|| variation_from_key(key).map(TopicVariation::Simplify))
            .or_else(|| variation_from_key(key).map(TopicVariation::Geometry))
            .or_else(|| variation_from_key(key).map(TopicVariation::Negatives))
    }

    /// Every variation of every topic, in topic order.
    pub fn all() -> Vec<TopicVariation> {
        let mut out = Vec::new();
        out.extend(fractions::Variation::ALL.iter().copied().map(TopicVariation::Fractions));
        out.extend(scale::Variation::ALL.iter().copied().map(TopicVariation::Scale));
        out.extend(volume::Variation::ALL.iter().copied().map(TopicVariation::Volume));
        out.extend(similarity::Variation::ALL.iter().copied().map(TopicVariation::Similarity));
        out.extend(equations::Variation::ALL.iter().copied().map(TopicVariation::Equations));
        out.extend(linear_graph::Variation::ALL.iter().copied().map(TopicVariation::LinearGraph));
        out.extend(simplify::Variation::ALL.iter().copied().map(TopicVariation::Simplify));
        out.extend(geometry::Variation::ALL.iter().copied().map(TopicVariation::Geometry));
        out.extend(negatives::Variation::ALL.iter().copied().map(TopicVariation::Negatives));
        out
    }

    pub fn topic(self) -> Topic {
        match self {
            TopicVariation::Fractions(_)   => Topic::FractionArithmetic,
            TopicVariation::Scale(_)       => Topic::Scale,
            TopicVariation::Volume(_)      => Topic::Volume,
            TopicVariation::Similarity(_)  => Topic::Similarity,
            TopicVariation::Equations(_)   => Topic::Equations,
            TopicVariation::LinearGraph(_) => Topic::LinearGraph,
            TopicVariation::Simplify(_)    => Topic::Simplify,
            TopicVariation::Geometry(_)    => Topic::Geometry,
            TopicVariation::Negatives(_)   => Topic::NegativeNumbers,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TopicVariation::Fractions(v)   => v.key(),
            TopicVariation::Scale(v)       => v.key(),
            TopicVariation::Volume(v)      => v.key(),
            TopicVariation::Similarity(v)  => v.key(),
            TopicVariation::Equations(v)   => v.key(),
            TopicVariation::LinearGraph(v) => v.key(),
            TopicVariation::Simplify(v)    => v.key(),
            TopicVariation::Geometry(v)    => v.key(),
            TopicVariation::Negatives(v)   => v.key(),
        }
    }

    /// The fixed level whose mode contains this variation.
    pub fn level(self) -> u8 {
        match self {
            TopicVariation::Fractions(v)   => v.level(),
            TopicVariation::Scale(v)       => v.level(),
            TopicVariation::Volume(v)      => v.level(),
            TopicVariation::Similarity(v)  => v.level(),
            TopicVariation::Equations(v)   => v.level(),
            TopicVariation::LinearGraph(v) => v.level(),
            TopicVariation::Simplify(v)    => v.level(),
            TopicVariation::Geometry(v)    => v.level(),
            TopicVariation::Negatives(v)   => v.level(),
        }
    }
}

/// Level dispatch: routes to the topic module's `generate`.
pub fn generate_level<R: Rng>(topic: Topic, rng: &mut R, level: u8, ctx: &GenContext) -> EngineResult<Draft> {
    match topic {
        Topic::FractionArithmetic => fractions::generate(rng, level, ctx),
        Topic::Scale              => scale::generate(rng, level, ctx),
        Topic::Volume             => volume::generate(rng, level, ctx),
        Topic::Similarity         => similarity::generate(rng, level, ctx),
        Topic::Equations          => equations::generate(rng, level, ctx),
        Topic::LinearGraph        => linear_graph::generate(rng, level, ctx),
        Topic::Simplify           => simplify::generate(rng, level, ctx),
        Topic::Geometry           => geometry::generate(rng, level, ctx),
        Topic::NegativeNumbers    => negatives::generate(rng, level, ctx),
    }
}

/// Variation dispatch: bypasses level-to-mode selection.
pub fn generate_variation<R: Rng>(variation: TopicVariation, rng: &mut R, ctx: &GenContext) -> EngineResult<Draft> {
    match variation {
        TopicVariation::Fractions(v)   => fractions::build(rng, v, ctx),
        TopicVariation::Scale(v)       => scale::build(rng, v, ctx),
        TopicVariation::Volume(v)      => volume::build(rng, v, ctx),
        TopicVariation::Similarity(v)  => similarity::build(rng, v, ctx),
        TopicVariation::Equations(v)   => equations::build(rng, v, ctx),
        TopicVariation::LinearGraph(v) => linear_graph::build(rng, v, ctx),
        TopicVariation::Simplify(v)    => simplify::build(rng, v, ctx),
        TopicVariation::Geometry(v)    => geometry::build(rng, v, ctx),
        TopicVariation::Negatives(v)   => negatives::build(rng, v, ctx),
    }
}
