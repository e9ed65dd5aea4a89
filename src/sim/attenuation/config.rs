use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FaderError, Result};

/// Calibration settings for the attenuation model.
///
/// Two coefficients only: a fixed loss per wall crossed and a loss per
/// metre of air path. The serialized field names and defaults match the
/// flat key/value settings file of the original host add-in, so existing
/// settings files keep working.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttenuationSettings {
    /// Signal loss caused by crossing one wall [dB].
    #[serde(rename = "AttenuationWallInDb", default = "default_wall_db")]
    pub wall_in_db: f64,
    /// Signal loss per metre of air path [dB/m].
    #[serde(rename = "AttenuationAirPerMetreInDb", default = "default_air_db")]
    pub air_per_metre_in_db: f64,
}

fn default_wall_db() -> f64 {
    3.0
}

fn default_air_db() -> f64 {
    0.8
}

impl Default for AttenuationSettings {
    fn default() -> Self {
        Self {
            wall_in_db: default_wall_db(),
            air_per_metre_in_db: default_air_db(),
        }
    }
}

impl AttenuationSettings {
    pub fn new(wall_in_db: f64, air_per_metre_in_db: f64) -> Self {
        Self {
            wall_in_db,
            air_per_metre_in_db,
        }
    }

    /// Checks that both coefficients are usable. Negative loss is
    /// nonsensical; the check happens here, at the settings boundary,
    /// not inside the hot path.
    pub fn validate(&self) -> Result<()> {
        if !self.wall_in_db.is_finite() || self.wall_in_db < 0.0 {
            return Err(FaderError::Config(format!(
                "wall attenuation must be a non-negative number, got {}",
                self.wall_in_db
            )));
        }
        if !self.air_per_metre_in_db.is_finite() || self.air_per_metre_in_db < 0.0 {
            return Err(FaderError::Config(format!(
                "air attenuation must be a non-negative number, got {}",
                self.air_per_metre_in_db
            )));
        }
        Ok(())
    }

    /// Loads settings from a JSON file.
    ///
    /// A missing file yields the defaults; a present but malformed file
    /// is a configuration error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(path).map_err(|e| {
            FaderError::Config(format!("cannot open settings file {}: {e}", path.display()))
        })?;
        let reader = BufReader::new(file);
        let settings: Self = serde_json::from_reader(reader)
            .map_err(|e| FaderError::Config(format!("malformed settings file: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Saves settings to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            FaderError::Config(format!(
                "cannot create settings file {}: {e}",
                path.display()
            ))
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            FaderError::Config(format!(
                "cannot write settings file {}: {e}",
                path.display()
            ))
        })?;
        Ok(())
    }
}
