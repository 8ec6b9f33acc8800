use serde::{Deserialize, Serialize};

/// Average bytes a `Name` entry contributes, measured on generated data.
const AVG_NAME_BYTES: f64 = 41.0;
/// Average number of `Language` entries per `Name`.
const AVG_LANGUAGES_PER_NAME: u64 = 3;

const FIXED_LINKS_BOUND: u64 = 6;
const FIXED_NAMES_BOUND: u64 = 4;
const FIXED_LANGUAGES_BOUND: u64 = 6;

/// Rule that fixes the random count bounds of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    /// Bounds derived from a target average record size in bytes.
    Sized { avg_record_bytes: u64 },
    /// Embedded constant bounds.
    Fixed,
}

impl Profile {
    pub fn bounds(&self) -> CountBounds {
        match *self {
            Profile::Sized { avg_record_bytes } => CountBounds::for_record_size(avg_record_bytes),
            Profile::Fixed => CountBounds {
                links: FIXED_LINKS_BOUND,
                names: FIXED_NAMES_BOUND,
                languages: FIXED_LANGUAGES_BOUND,
            },
        }
    }

    /// Name of the JSON collection written for `records` documents.
    pub fn json_file_name(&self, records: u64) -> String {
        match self {
            Profile::Sized { avg_record_bytes } => {
                format!("generated_data_{records}_{avg_record_bytes}.json")
            }
            Profile::Fixed => format!("generated_data_{records}.json"),
        }
    }
}

/// Exclusive upper bounds for the repeated-field counts of one record.
///
/// A count is drawn uniformly from `[0, bound)`; a bound of zero always
/// yields zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBounds {
    /// Bound for `Backward` and for `Forward` links, each drawn separately.
    pub links: u64,
    /// Bound for `Name` entries.
    pub names: u64,
    /// Bound for `Language` entries within one `Name`.
    pub languages: u64,
}

impl CountBounds {
    /// Half of the bytes beyond `DocId` go to links, half to names. Bounds are
    /// twice the expected count so the uniform draw averages to it.
    pub fn for_record_size(avg_record_bytes: u64) -> Self {
        let avg_bytes = (avg_record_bytes as f64 - 8.0) / 2.0;
        let links = doubled_round(avg_bytes / 2.0 / 8.0);
        let names = doubled_round(avg_bytes / AVG_NAME_BYTES);

        Self {
            links,
            names,
            languages: AVG_LANGUAGES_PER_NAME * 2,
        }
    }
}

fn doubled_round(expected: f64) -> u64 {
    let rounded = expected.round_ties_even();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u64 * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_bounds_follow_target_size() {
        let bounds = CountBounds::for_record_size(100);
        assert_eq!(
            bounds,
            CountBounds {
                links: 6,
                names: 2,
                languages: 6,
            }
        );

        let bounds = CountBounds::for_record_size(1000);
        assert_eq!(bounds.links, 62);
        assert_eq!(bounds.names, 24);
    }

    #[test]
    fn rounding_is_half_to_even() {
        // avg_bytes = 8.0 -> links 8 / 16 = 0.5 rounds to 0
        assert_eq!(CountBounds::for_record_size(24).links, 0);
        // avg_bytes = 24.0 -> links 24 / 16 = 1.5 rounds to 2
        assert_eq!(CountBounds::for_record_size(56).links, 4);
    }

    #[test]
    fn tiny_targets_clamp_to_zero() {
        let bounds = CountBounds::for_record_size(0);
        assert_eq!(bounds.links, 0);
        assert_eq!(bounds.names, 0);
    }

    #[test]
    fn file_name_reflects_profile() {
        let sized = Profile::Sized {
            avg_record_bytes: 100,
        };
        assert_eq!(sized.json_file_name(10), "generated_data_10_100.json");
        assert_eq!(Profile::Fixed.json_file_name(10), "generated_data_10.json");
    }
}
