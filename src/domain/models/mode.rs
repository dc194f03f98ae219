use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Topic specialization chosen by the caller.
///
/// Resolution is total: any value outside the known set, including non-string
/// JSON and `null`, resolves to [`ModeKey::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeKey {
    #[default]
    General,
    Quran,
    Hadith,
    Fiqh,
}

impl ModeKey {
    pub const ALL: [ModeKey; 4] = [
        ModeKey::General,
        ModeKey::Quran,
        ModeKey::Hadith,
        ModeKey::Fiqh,
    ];

    pub fn resolve(name: &str) -> Self {
        match name {
            "quran" => ModeKey::Quran,
            "hadith" => ModeKey::Hadith,
            "fiqh" => ModeKey::Fiqh,
            _ => ModeKey::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKey::General => "general",
            ModeKey::Quran => "quran",
            ModeKey::Hadith => "hadith",
            ModeKey::Fiqh => "fiqh",
        }
    }
}

impl std::fmt::Display for ModeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ModeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(ModeKey::resolve).unwrap_or_default())
    }
}
