// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parametric part generators

pub mod gingerbread;
pub mod params;
pub mod part;
pub mod sign;
pub mod text;

pub use params::{HouseParams, SignParams};
pub use part::{Part, PartSet};

use crate::config::BuildConfig;
use crate::error::ModelResult;
use serde::{Deserialize, Serialize};

/// Available models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    GingerbreadHouse,
    HolidaySign,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::GingerbreadHouse, Model::HolidaySign];

    pub fn as_str(&self) -> &'static str {
        match self {
            Model::GingerbreadHouse => "gingerbread_house",
            Model::HolidaySign => "holiday_sign",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "gingerbread_house" | "house" => Some(Model::GingerbreadHouse),
            "holiday_sign" | "sign" => Some(Model::HolidaySign),
            _ => None,
        }
    }

    /// Build every part of this model from the configured parameters
    pub fn build(&self, config: &BuildConfig) -> ModelResult<PartSet> {
        match self {
            Model::GingerbreadHouse => gingerbread::build(&config.house),
            Model::HolidaySign => sign::build(&config.sign, config.font_path.as_deref()),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_names() {
        for model in Model::ALL {
            assert_eq!(Model::from_str(model.as_str()), Some(model));
        }
        assert_eq!(Model::from_str("House"), Some(Model::GingerbreadHouse));
        assert_eq!(Model::from_str("holiday-sign"), Some(Model::HolidaySign));
        assert_eq!(Model::from_str("castle"), None);
    }

    #[test]
    fn test_build_house_from_config() {
        let set = Model::GingerbreadHouse.build(&BuildConfig::default()).unwrap();
        assert_eq!(set.parts.len(), 7);
        assert!(set.notes.is_empty());
    }
}
