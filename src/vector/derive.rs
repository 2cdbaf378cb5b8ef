//! Derivation operators: extend, spin, parse
//!
//! None of these fail. Malformed input is reported to the context's sink
//! (when validation is on) and the operator still returns a usable vector.
//! Refused derivations on terminated input are always reported.

use super::correlation_vector::CorrelationVector;
use super::spin::{next_spin_value, SpinParameters};
use super::validation::{parse_extension, validate_and_report};
use super::version::CorrelationVectorVersion;
use super::{is_terminated, DELIMITER, TERMINATOR};
use crate::config::CorrelationContext;
use crate::observability::{Event, NullSink};

impl CorrelationVector {
    /// Derive a vector one level deeper: the whole inbound value becomes the
    /// new base and a fresh counter starts at 0.
    ///
    /// Call at the entry point of an operation with the vector taken from
    /// the inbound message. A terminated input is not extended; it is
    /// returned as an immutable vector.
    ///
    /// Length is not checked here. An inbound value already at the version's
    /// maximum yields a vector that is saturated from the start: its first
    /// `increment` returns the value unchanged.
    pub fn extend(serialized: &str, ctx: &CorrelationContext) -> Self {
        if is_terminated(serialized) {
            return Self::refuse_derivation(serialized, "extend", ctx);
        }

        let version = Self::resolve_version(serialized, ctx);
        Self::from_parts(serialized.to_string(), 0, version)
    }

    /// Derive a vector by appending a time and entropy derived value, using
    /// the context's configured spin parameters.
    pub fn spin(serialized: &str, ctx: &CorrelationContext) -> Self {
        Self::spin_with(serialized, &ctx.config().spin, ctx)
    }

    /// Derive a vector by appending a time and entropy derived value.
    ///
    /// The appended value is one segment when `total_bits <= 32`, two
    /// otherwise, and never exceeds `2^total_bits - 1`. Collisions with other
    /// instances of the same stage are unlikely, not impossible.
    pub fn spin_with(
        serialized: &str,
        parameters: &SpinParameters,
        ctx: &CorrelationContext,
    ) -> Self {
        if is_terminated(serialized) {
            return Self::refuse_derivation(serialized, "spin", ctx);
        }

        let version = Self::resolve_version(serialized, ctx);
        let spin = next_spin_value(parameters);
        Self::from_parts(format!("{serialized}{DELIMITER}{spin}"), 0, version)
    }

    /// Parse a serialized vector, splitting off its final extension.
    ///
    /// Lenient and silent: empty input or a final segment that is not a
    /// non-negative integer yields a brand-new V1 root vector. Parsing does
    /// not round-trip malformed input.
    pub fn parse(serialized: &str) -> Self {
        Self::try_parse(serialized).unwrap_or_else(Self::new)
    }

    /// Like [`parse`](Self::parse), reporting the fallback to the context's
    /// sink when validation is on.
    pub(crate) fn parse_reported(serialized: &str, ctx: &CorrelationContext) -> Self {
        if let Some(parsed) = Self::try_parse(serialized) {
            return parsed;
        }

        if ctx.validate_on_creation() && !serialized.is_empty() {
            ctx.sink().report_error(
                Event::ParseFallback,
                &format!("Invalid correlation vector {serialized}"),
            );
        }
        Self::new()
    }

    fn try_parse(serialized: &str) -> Option<Self> {
        let (body, terminated) = split_terminator(serialized);
        let position = body.rfind(DELIMITER).filter(|p| *p > 0)?;
        let extension = parse_extension(&body[position + 1..])?;
        let version = CorrelationVectorVersion::infer(body, false, &NullSink);
        let base = body[..position].to_string();

        Some(if terminated {
            Self::terminated(base, extension, version)
        } else {
            Self::from_parts(base, extension, version)
        })
    }

    fn resolve_version(serialized: &str, ctx: &CorrelationContext) -> CorrelationVectorVersion {
        let validate = ctx.validate_on_creation();
        let version = CorrelationVectorVersion::infer(serialized, validate, ctx.sink());
        if validate {
            validate_and_report(serialized, version, ctx.sink());
        }
        version
    }

    /// Terminated input always comes back immutable. When the body has no
    /// clean final extension, the whole body becomes the base.
    fn refuse_derivation(serialized: &str, operator: &str, ctx: &CorrelationContext) -> Self {
        ctx.sink().report_error(
            Event::ImmutableDerivation,
            &format!("Cannot {operator} terminated correlation vector {serialized}"),
        );

        Self::try_parse(serialized).unwrap_or_else(|| {
            let (body, _) = split_terminator(serialized);
            let version = CorrelationVectorVersion::infer(body, false, &NullSink);
            Self::terminated(body.to_string(), 0, version)
        })
    }
}

fn split_terminator(serialized: &str) -> (&str, bool) {
    match serialized.strip_suffix(TERMINATOR) {
        Some(body) => (body, true),
        None => (serialized, false),
    }
}
