use serde::{Deserialize, Serialize};

/// The six daily time points, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Chorok,
    Dhohr,
    Asr,
    Maghrib,
    Icha,
}

impl Prayer {
    /// Canonical order. Every normalized table is indexed by this.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Chorok,
        Prayer::Dhohr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Icha,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Display names for the six prayers in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerNames {
    pub fajr: String,
    pub chorok: String,
    pub dhohr: String,
    pub asr: String,
    pub maghrib: String,
    pub icha: String,
}

impl PrayerNames {
    pub fn arabic() -> Self {
        Self {
            fajr: "الفجر".into(),
            chorok: "الشروق".into(),
            dhohr: "الظهر".into(),
            asr: "العصر".into(),
            maghrib: "المغرب".into(),
            icha: "العشاء".into(),
        }
    }

    pub fn english() -> Self {
        Self {
            fajr: "fajr".into(),
            chorok: "chorok".into(),
            dhohr: "dhohr".into(),
            asr: "asr".into(),
            maghrib: "maghrib".into(),
            icha: "icha".into(),
        }
    }

    pub fn name(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Chorok => &self.chorok,
            Prayer::Dhohr => &self.dhohr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Icha => &self.icha,
        }
    }

    /// Exact (trimmed) label lookup.
    pub fn lookup(&self, label: &str) -> Option<Prayer> {
        let label = label.trim();
        Prayer::ALL.into_iter().find(|&p| self.name(p) == label)
    }

    /// Names in canonical order.
    pub fn ordered(&self) -> Vec<&str> {
        Prayer::ALL.iter().map(|&p| self.name(p)).collect()
    }
}
