//! Run configuration: column labels, prayer names, regional layouts and the
//! fixed correction tables.
//!
//! Everything has a built-in default matching the ministry documents; a YAML
//! file only needs the keys it overrides.

pub mod types;

use anyhow::{Context, Result};
use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PipelineError;
use crate::prayer::{Prayer, PrayerNames};
use crate::process::diffs::DiffsLayout;
use crate::process::shape::Shape;

pub use types::{ColumnNames, Language, OutputSettings, RegionSettings};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct Settings {
    pub column_names: ColumnNames,
    pub column_names_en: ColumnNames,
    pub salawat: PrayerNames,
    pub salawat_en: PrayerNames,
    /// Old column/row labels mapped onto a canonical prayer (e.g. zawal).
    pub legacy_aliases: BTreeMap<String, Prayer>,
    /// Literal date strings known to be mistyped in the source documents.
    pub date_corrections: BTreeMap<String, String>,
    pub base_shapes: Vec<Shape>,
    pub regions: BTreeMap<String, RegionSettings>,
    /// PDF spelling → canonical province identifier.
    pub rename: BTreeMap<String, String>,
    pub output: OutputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let legacy_aliases = BTreeMap::from([("الزوال".to_string(), Prayer::Dhohr)]);

        // djelfa.pdf, page 10: year typed as 2020; one day written d-m-Y.
        let date_corrections = BTreeMap::from([
            ("2020-04-17".to_string(), "2021-04-17".to_string()),
            ("04-02-2021".to_string(), "2021-02-04".to_string()),
        ]);

        let generic = |reference: &str| RegionSettings {
            layout: DiffsLayout::Generic,
            reference_province: reference.to_string(),
            diffs_shapes: vec![Shape::new(7, 17)],
        };
        let regions = BTreeMap::from([
            ("centre".to_string(), generic("الجزائر")),
            ("est".to_string(), generic("قسنطينة")),
            (
                "ouest".to_string(),
                RegionSettings {
                    layout: DiffsLayout::Split,
                    reference_province: "وهران".to_string(),
                    diffs_shapes: Vec::new(),
                },
            ),
        ]);

        Self {
            column_names: ColumnNames::arabic(),
            column_names_en: ColumnNames::english(),
            salawat: PrayerNames::arabic(),
            salawat_en: PrayerNames::english(),
            legacy_aliases,
            date_corrections,
            base_shapes: vec![Shape::new(29, 8), Shape::new(30, 8)],
            regions,
            rename: BTreeMap::new(),
            output: OutputSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a YAML file, falling back to defaults for missing keys.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        debug!(
            path = %path.display(),
            regions = settings.regions.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn region(&self, name: &str) -> Result<&RegionSettings, PipelineError> {
        self.regions
            .get(name)
            .ok_or_else(|| PipelineError::UnknownRegion(name.to_string()))
    }

    /// Resolve a column or row label to a prayer, honouring legacy aliases.
    pub fn prayer_for_label(&self, label: &str) -> Option<Prayer> {
        self.salawat
            .lookup(label)
            .or_else(|| self.legacy_aliases.get(label.trim()).copied())
    }

    pub fn prayer_names(&self, language: Language) -> &PrayerNames {
        match language {
            Language::Ar => &self.salawat,
            Language::En => &self.salawat_en,
        }
    }

    pub fn column_names(&self, language: Language) -> &ColumnNames {
        match language {
            Language::Ar => &self.column_names,
            Language::En => &self.column_names_en,
        }
    }

    /// Canonical identifier for a province as spelled in the documents.
    pub fn canonical_province<'a>(&'a self, name: &'a str) -> &'a str {
        self.rename.get(name).map(String::as_str).unwrap_or(name)
    }
}
