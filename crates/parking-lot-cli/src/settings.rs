//! Settings from `parking.toml` and the environment

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot_core::Config;
use serde::Deserialize;
use thiserror::Error;

/// Name of the settings file searched for from the working directory upwards
pub const SETTINGS_FILE: &str = "parking.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("environment variable {var} has invalid value `{value}`")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Clone, Deserialize, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// File the settings were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,

    pub car_slots: Option<i64>,
    pub bike_slots: Option<i64>,
    pub hourly_rate: Option<u32>,
}

impl Settings {
    /// Load the settings file.
    ///
    /// `explicit` wins over `PARKING_CONFIG`; without either, the first
    /// `parking.toml` found from the working directory upwards is used. A
    /// missing file is not an error unless it was named explicitly.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("PARKING_CONFIG").map(PathBuf::from));

        let path = match named {
            Some(path) => path,
            None => match discover() {
                Some(path) => path,
                None => return Ok(Settings::default()),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        let mut settings = Self::from_toml(&contents, &path)?;
        settings.source = Some(path);
        Ok(settings)
    }

    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override values with `PARKING_CAR_SLOTS`, `PARKING_BIKE_SLOTS` and
    /// `PARKING_RATE`.
    pub fn apply_env(&mut self) -> Result<(), SettingsError> {
        self.apply_vars(|var| std::env::var(var).ok())
    }

    fn apply_vars(
        &mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        if let Some(v) = parse_var("PARKING_CAR_SLOTS", &lookup)? {
            self.car_slots = Some(v);
        }
        if let Some(v) = parse_var("PARKING_BIKE_SLOTS", &lookup)? {
            self.bike_slots = Some(v);
        }
        if let Some(v) = parse_var("PARKING_RATE", &lookup)? {
            self.hourly_rate = Some(v);
        }
        Ok(())
    }

    /// Merge into `config`, keeping values of `config` the settings leave open.
    pub fn merge_into(&self, config: &mut Config) {
        if let Some(cars) = self.car_slots {
            config.car_slots = cars;
        }
        if let Some(bikes) = self.bike_slots {
            config.bike_slots = bikes;
        }
        if let Some(rate) = self.hourly_rate {
            config.hourly_rate = rate;
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    lookup: &impl Fn(&'static str) -> Option<String>,
) -> Result<Option<T>, SettingsError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| SettingsError::InvalidEnv { var, value })
}

fn discover() -> Option<PathBuf> {
    let mut path = std::env::current_dir().ok()?;
    loop {
        path.push(SETTINGS_FILE);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => return Some(path),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping settings file");
            }
        }
        path.pop();
        if !path.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_kebab_case_file() {
        let settings = Settings::from_toml(
            "car-slots = 4\nbike-slots = 2\nhourly-rate = 30\n",
            Path::new("parking.toml"),
        )
        .unwrap();
        assert_eq!(settings.car_slots, Some(4));
        assert_eq!(settings.bike_slots, Some(2));
        assert_eq!(settings.hourly_rate, Some(30));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Settings::from_toml("trucks = 3\n", Path::new("parking.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "car-slots = -1").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.car_slots, Some(-1));
        assert_eq!(settings.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn environment_overrides_file() {
        let vars = HashMap::from([("PARKING_BIKE_SLOTS", "7"), ("PARKING_RATE", " 15 ")]);
        let mut settings = Settings {
            car_slots: Some(1),
            bike_slots: Some(1),
            ..Settings::default()
        };
        settings
            .apply_vars(|var| vars.get(var).map(|v| v.to_string()))
            .unwrap();

        let mut config = Config::default();
        settings.merge_into(&mut config);
        assert_eq!(
            config,
            Config {
                car_slots: 1,
                bike_slots: 7,
                hourly_rate: 15,
            }
        );
    }

    #[test]
    fn invalid_environment_value() {
        let mut settings = Settings::default();
        let err = settings
            .apply_vars(|var| (var == "PARKING_RATE").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidEnv {
                var: "PARKING_RATE",
                ..
            }
        ));
    }
}
