use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Distance cutoff; pairs strictly closer than this are connected.
    pub threshold: f32,
    /// Neighbour cap applied by mutual-kNN pruning.
    pub max_degree: usize,
    /// Apply mutual-kNN pruning after thresholding.
    pub knn: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            max_degree: 10,
            knn: false,
        }
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.max_degree == 0 {
            return Err(ConfigError::InvalidMaxDegree(self.max_degree));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidThreshold(f32),
    InvalidMaxDegree(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold(t) => {
                write!(f, "invalid threshold {t}: must be finite and > 0")
            }
            Self::InvalidMaxDegree(k) => write!(f, "invalid max_degree {k}: must be >= 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GraphConfig};

    #[test]
    fn default_is_valid() {
        let cfg = GraphConfig::default();
        assert_eq!(cfg.threshold, 50.0);
        assert_eq!(cfg.max_degree, 10);
        assert!(!cfg.knn);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_threshold() {
        for t in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let cfg = GraphConfig {
                threshold: t,
                ..GraphConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn rejects_zero_degree() {
        let cfg = GraphConfig {
            max_degree: 0,
            knn: true,
            ..GraphConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidMaxDegree(0)));
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: GraphConfig =
            serde_json::from_str(r#"{"threshold": 25.5, "knn": true}"#).expect("valid json");
        assert_eq!(cfg.threshold, 25.5);
        assert_eq!(cfg.max_degree, 10);
        assert!(cfg.knn);
    }
}
