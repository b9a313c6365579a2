//! Audio feature vocabulary, targets and tolerance policy
//!
//! The provider computes a fixed set of per-track descriptors. Seven of them
//! live on a normalized 0.0-1.0 scale; tempo is measured in BPM. A target is
//! matched when the measured value falls inside the feature's inclusive
//! tolerance band around it.

use crate::{Error, Result, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Half-width of the band for features on the normalized 0.0-1.0 scale
pub const NORMALIZED_TOLERANCE: f64 = 0.35;

/// Half-width of the tempo band, in BPM
pub const TEMPO_TOLERANCE_BPM: f64 = 30.0;

/// Highest tempo a caller may ask for
pub const MAX_TEMPO_BPM: f64 = 300.0;

/// Audio features a caller can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFeature {
    Acousticness,
    Liveness,
    Danceability,
    Speechiness,
    Tempo,
    Instrumentalness,
    Valence,
    Energy,
}

impl AudioFeature {
    /// Every feature, in form order
    pub const ALL: [AudioFeature; 8] = [
        AudioFeature::Acousticness,
        AudioFeature::Liveness,
        AudioFeature::Danceability,
        AudioFeature::Speechiness,
        AudioFeature::Tempo,
        AudioFeature::Instrumentalness,
        AudioFeature::Valence,
        AudioFeature::Energy,
    ];

    /// Provider name of the feature
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Liveness => "liveness",
            AudioFeature::Danceability => "danceability",
            AudioFeature::Speechiness => "speechiness",
            AudioFeature::Tempo => "tempo",
            AudioFeature::Instrumentalness => "instrumentalness",
            AudioFeature::Valence => "valence",
            AudioFeature::Energy => "energy",
        }
    }

    /// Name of the slider field carrying the target value.
    ///
    /// Instrumentalness is posted as `instrumental`.
    pub fn form_field(&self) -> &'static str {
        match self {
            AudioFeature::Instrumentalness => "instrumental",
            other => other.as_str(),
        }
    }

    /// Name of the checkbox that activates the feature
    pub fn check_field(&self) -> String {
        format!("{}_check", self.as_str())
    }

    /// Human-readable label for the picker page
    pub fn label(&self) -> &'static str {
        match self {
            AudioFeature::Acousticness => "Acousticness",
            AudioFeature::Liveness => "Liveness",
            AudioFeature::Danceability => "Danceability",
            AudioFeature::Speechiness => "Speechiness",
            AudioFeature::Tempo => "Tempo (BPM)",
            AudioFeature::Instrumentalness => "Instrumentalness",
            AudioFeature::Valence => "Valence",
            AudioFeature::Energy => "Energy",
        }
    }

    /// Tempo is raw BPM; everything else is a 0.0-1.0 ratio
    pub fn is_bpm(&self) -> bool {
        matches!(self, AudioFeature::Tempo)
    }

    /// Half-width of the inclusive tolerance band
    pub fn tolerance(&self) -> f64 {
        if self.is_bpm() {
            TEMPO_TOLERANCE_BPM
        } else {
            NORMALIZED_TOLERANCE
        }
    }

    /// Whether `measured` lies within `[target - tolerance, target + tolerance]`
    pub fn within_band(&self, measured: f64, target: f64) -> bool {
        let tolerance = self.tolerance();
        measured >= target - tolerance && measured <= target + tolerance
    }

    /// Convert a raw form value into a target value.
    ///
    /// Percentages (0-100) become ratios; tempo stays in BPM (0-300).
    pub fn normalize(&self, raw: f64) -> Result<f64> {
        if !raw.is_finite() {
            return Err(Error::InvalidInput(format!(
                "{} must be a number",
                self.as_str()
            )));
        }

        if self.is_bpm() {
            if !(0.0..=MAX_TEMPO_BPM).contains(&raw) {
                return Err(Error::InvalidInput(format!(
                    "tempo must be between 0 and {} BPM, got {}",
                    MAX_TEMPO_BPM, raw
                )));
            }
            return Ok(raw);
        }

        if !(0.0..=100.0).contains(&raw) {
            return Err(Error::InvalidInput(format!(
                "{} must be between 0 and 100, got {}",
                self.as_str(),
                raw
            )));
        }
        Ok(raw / 100.0)
    }
}

impl fmt::Display for AudioFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired values for the active features.
///
/// Inactive features are absent, never zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTargets {
    targets: BTreeMap<AudioFeature, f64>,
}

impl FeatureTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `feature` with an already-normalized target value
    pub fn insert(&mut self, feature: AudioFeature, target: f64) -> Option<f64> {
        self.targets.insert(feature, target)
    }

    pub fn remove(&mut self, feature: AudioFeature) -> Option<f64> {
        self.targets.remove(&feature)
    }

    pub fn get(&self, feature: AudioFeature) -> Option<f64> {
        self.targets.get(&feature).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AudioFeature, f64)> + '_ {
        self.targets.iter().map(|(feature, target)| (*feature, *target))
    }

    /// True when every active target is inside its band for `record`
    pub fn matches(&self, record: &FeatureRecord) -> bool {
        self.iter()
            .all(|(feature, target)| feature.within_band(record.value(feature), target))
    }
}

impl FromIterator<(AudioFeature, f64)> for FeatureTargets {
    fn from_iter<I: IntoIterator<Item = (AudioFeature, f64)>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

/// Measured audio features of one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: TrackId,
    pub acousticness: f64,
    pub liveness: f64,
    pub danceability: f64,
    pub speechiness: f64,
    /// Beats per minute
    pub tempo: f64,
    pub instrumentalness: f64,
    pub valence: f64,
    pub energy: f64,
}

impl FeatureRecord {
    /// Measured value of `feature`
    pub fn value(&self, feature: AudioFeature) -> f64 {
        match feature {
            AudioFeature::Acousticness => self.acousticness,
            AudioFeature::Liveness => self.liveness,
            AudioFeature::Danceability => self.danceability,
            AudioFeature::Speechiness => self.speechiness,
            AudioFeature::Tempo => self.tempo,
            AudioFeature::Instrumentalness => self.instrumentalness,
            AudioFeature::Valence => self.valence,
            AudioFeature::Energy => self.energy,
        }
    }
}
