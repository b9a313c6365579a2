//! Typed HTML form payloads
//!
//! Every slider arrives as text next to an optional checkbox. A feature is
//! active only when its checkbox is present; an unchecked feature is left out
//! of the targets even though its slider value is still posted.

use serde::Deserialize;
use tunesift_common::{AudioFeature, Error, FeatureTargets, Result};

/// POST /get_playlists
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// `local` for the user's own playlists, anything else for public search
    #[serde(default)]
    pub location: String,
    pub playlist_name: String,
}

/// POST /new_playlist/:playlist_id
#[derive(Debug, Default, Deserialize)]
pub struct FeatureForm {
    pub acousticness: Option<String>,
    pub acousticness_check: Option<String>,
    pub liveness: Option<String>,
    pub liveness_check: Option<String>,
    pub danceability: Option<String>,
    pub danceability_check: Option<String>,
    pub speechiness: Option<String>,
    pub speechiness_check: Option<String>,
    pub tempo: Option<String>,
    pub tempo_check: Option<String>,
    pub instrumental: Option<String>,
    pub instrumentalness_check: Option<String>,
    pub valence: Option<String>,
    pub valence_check: Option<String>,
    pub energy: Option<String>,
    pub energy_check: Option<String>,
}

impl FeatureForm {
    /// Raw slider text and checkbox state for `feature`
    fn field(&self, feature: AudioFeature) -> (Option<&str>, bool) {
        let (value, check) = match feature {
            AudioFeature::Acousticness => (&self.acousticness, &self.acousticness_check),
            AudioFeature::Liveness => (&self.liveness, &self.liveness_check),
            AudioFeature::Danceability => (&self.danceability, &self.danceability_check),
            AudioFeature::Speechiness => (&self.speechiness, &self.speechiness_check),
            AudioFeature::Tempo => (&self.tempo, &self.tempo_check),
            AudioFeature::Instrumentalness => (&self.instrumental, &self.instrumentalness_check),
            AudioFeature::Valence => (&self.valence, &self.valence_check),
            AudioFeature::Energy => (&self.energy, &self.energy_check),
        };
        (value.as_deref(), check.is_some())
    }

    /// Validate and normalize the active features into targets
    pub fn to_targets(&self) -> Result<FeatureTargets> {
        let mut targets = FeatureTargets::new();

        for feature in AudioFeature::ALL {
            let (value, active) = self.field(feature);
            if !active {
                continue;
            }

            let raw = value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    Error::InvalidInput(format!("{} is checked but has no value", feature))
                })?;
            let raw: f64 = raw.parse().map_err(|_| {
                Error::InvalidInput(format!("{} value '{}' is not a number", feature, raw))
            })?;

            targets.insert(feature, feature.normalize(raw)?);
        }

        Ok(targets)
    }
}
