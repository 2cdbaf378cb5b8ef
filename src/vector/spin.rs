//! Spin operator parameters and value generation
//!
//! A spin value mixes a coarsened clock reading with random bytes so that
//! concurrent instances of one stage are unlikely to pick the same suffix.
//! Nothing is coordinated between processes; the parameters only trade
//! collision probability against vector length.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// How many low-order tick bits are discarded before mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinCounterInterval {
    /// Drop 24 bits, roughly 1.67 second resolution
    #[default]
    Coarse,
    /// Drop 16 bits, roughly 6.5 millisecond resolution
    Fine,
}

impl SpinCounterInterval {
    /// Number of tick bits dropped
    pub const fn ticks_bits_to_drop(self) -> u32 {
        match self {
            SpinCounterInterval::Coarse => 24,
            SpinCounterInterval::Fine => 16,
        }
    }
}

/// How many bits of the coarsened tick count are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinCounterPeriodicity {
    /// No tick bits, entropy only
    None,
    /// 16 bits
    #[default]
    Short,
    /// 24 bits
    Medium,
    /// 32 bits
    Long,
}

impl SpinCounterPeriodicity {
    /// Number of tick bits kept
    pub const fn bits(self) -> u32 {
        match self {
            SpinCounterPeriodicity::None => 0,
            SpinCounterPeriodicity::Short => 16,
            SpinCounterPeriodicity::Medium => 24,
            SpinCounterPeriodicity::Long => 32,
        }
    }
}

/// How many random bytes are appended to the tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinEntropy {
    None,
    One,
    #[default]
    Two,
    Three,
    Four,
}

impl SpinEntropy {
    /// Number of random bytes
    pub const fn bytes(self) -> usize {
        match self {
            SpinEntropy::None => 0,
            SpinEntropy::One => 1,
            SpinEntropy::Two => 2,
            SpinEntropy::Three => 3,
            SpinEntropy::Four => 4,
        }
    }
}

/// Tunable parameters for the spin operator.
///
/// The default is coarse interval, short periodicity and two bytes of
/// entropy: a single 32-bit segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinParameters {
    pub interval: SpinCounterInterval,
    pub periodicity: SpinCounterPeriodicity,
    pub entropy: SpinEntropy,
}

impl SpinParameters {
    /// Create parameters from their three components.
    pub fn new(
        interval: SpinCounterInterval,
        periodicity: SpinCounterPeriodicity,
        entropy: SpinEntropy,
    ) -> Self {
        Self {
            interval,
            periodicity,
            entropy,
        }
    }

    pub fn ticks_bits_to_drop(&self) -> u32 {
        self.interval.ticks_bits_to_drop()
    }

    pub fn entropy_bytes(&self) -> usize {
        self.entropy.bytes()
    }

    /// Width of the spin value in bits, at most 64
    pub fn total_bits(&self) -> u32 {
        // entropy_bytes() <= 4, so the cast cannot truncate
        self.periodicity.bits() + 8 * self.entropy_bytes() as u32
    }

    /// Number of dot-separated segments a spin appends
    pub fn segment_count(&self) -> usize {
        if self.total_bits() > 32 {
            2
        } else {
            1
        }
    }
}

/// Current time in 100-nanosecond ticks since the Unix epoch.
pub fn current_ticks() -> u64 {
    ticks_at(Utc::now())
}

/// 100-nanosecond ticks of an instant; instants before the epoch map to 0.
pub fn ticks_at(instant: DateTime<Utc>) -> u64 {
    let seconds = u64::try_from(instant.timestamp()).unwrap_or(0);
    seconds
        .wrapping_mul(10_000_000)
        .wrapping_add(u64::from(instant.timestamp_subsec_nanos() / 100))
}

/// Fill a buffer with `count` random bytes.
pub fn draw_entropy(count: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; count];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Mix a tick count with entropy bytes and mask to `total_bits`.
pub fn spin_value(ticks: u64, entropy: &[u8], parameters: &SpinParameters) -> u64 {
    let mut value = ticks >> parameters.ticks_bits_to_drop();
    for byte in entropy {
        value = (value << 8) | u64::from(*byte);
    }

    let total_bits = parameters.total_bits();
    if total_bits >= 64 {
        value
    } else {
        value & ((1u64 << total_bits) - 1)
    }
}

/// Render a spin value as one or two unsigned 32-bit segments, high bits first.
pub fn format_spin_value(value: u64, total_bits: u32) -> String {
    let low = value as u32;
    if total_bits > 32 {
        let high = (value >> 32) as u32;
        format!("{high}.{low}")
    } else {
        low.to_string()
    }
}

/// Generate the suffix appended by one spin.
pub fn next_spin_value(parameters: &SpinParameters) -> String {
    let entropy = draw_entropy(parameters.entropy_bytes());
    let value = spin_value(current_ticks(), &entropy, parameters);
    format_spin_value(value, parameters.total_bits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params(
        interval: SpinCounterInterval,
        periodicity: SpinCounterPeriodicity,
        entropy: SpinEntropy,
    ) -> SpinParameters {
        SpinParameters::new(interval, periodicity, entropy)
    }

    #[test]
    fn test_default_parameters() {
        let p = SpinParameters::default();
        assert_eq!(p.ticks_bits_to_drop(), 24);
        assert_eq!(p.entropy_bytes(), 2);
        assert_eq!(p.total_bits(), 32);
        assert_eq!(p.segment_count(), 1);
    }

    #[test]
    fn test_total_bits_range() {
        let widest = params(
            SpinCounterInterval::Fine,
            SpinCounterPeriodicity::Long,
            SpinEntropy::Four,
        );
        assert_eq!(widest.total_bits(), 64);
        assert_eq!(widest.segment_count(), 2);

        let narrowest = params(
            SpinCounterInterval::Fine,
            SpinCounterPeriodicity::None,
            SpinEntropy::None,
        );
        assert_eq!(narrowest.total_bits(), 0);
    }

    #[test]
    fn test_spin_value_mixes_ticks_and_entropy() {
        let p = params(
            SpinCounterInterval::Fine,
            SpinCounterPeriodicity::Short,
            SpinEntropy::Two,
        );
        let ticks = 0xABCD_u64 << 16;
        assert_eq!(spin_value(ticks, &[0x12, 0x34], &p), 0xABCD_1234);
    }

    #[test]
    fn test_spin_value_masks_to_total_bits() {
        let p = params(
            SpinCounterInterval::Fine,
            SpinCounterPeriodicity::Short,
            SpinEntropy::One,
        );
        let value = spin_value(u64::MAX, &[0xFF], &p);
        assert_eq!(value, (1 << 24) - 1);
    }

    #[test]
    fn test_spin_value_full_width() {
        let p = params(
            SpinCounterInterval::Fine,
            SpinCounterPeriodicity::Long,
            SpinEntropy::Four,
        );
        let value = spin_value(u64::MAX, &[0xFF; 4], &p);
        assert_eq!(value, u64::MAX);
    }

    #[test]
    fn test_format_one_or_two_segments() {
        assert_eq!(format_spin_value(0x1_0000_0002, 40), "1.2");
        assert_eq!(format_spin_value(0xFFFF_FFFF, 32), "4294967295");
        assert_eq!(format_spin_value(7, 16), "7");
    }

    #[test]
    fn test_ticks_at_epoch_offsets() {
        let instant = Utc.timestamp_opt(1, 500).unwrap();
        assert_eq!(ticks_at(instant), 10_000_005);
        let before_epoch = Utc.timestamp_opt(-5, 0).unwrap();
        assert_eq!(ticks_at(before_epoch), 0);
    }

    #[test]
    fn test_draw_entropy_length() {
        assert_eq!(draw_entropy(0).len(), 0);
        assert_eq!(draw_entropy(4).len(), 4);
    }

    #[test]
    fn test_parameters_serde() {
        let p: SpinParameters =
            serde_json::from_str(r#"{"interval":"fine","entropy":"four"}"#).unwrap();
        assert_eq!(p.interval, SpinCounterInterval::Fine);
        assert_eq!(p.periodicity, SpinCounterPeriodicity::Short);
        assert_eq!(p.entropy, SpinEntropy::Four);
    }
}
