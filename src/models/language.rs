use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Languages the platform can answer in.
///
/// The wire form is the lowercase tag (`pt-pt`), which differs from the
/// variant name, so the two-way mapping is owned here instead of derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    PtPt,
    EnGb,
    EsEs,
}

impl Language {
    pub const DEFAULT: Language = Language::PtPt;

    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::PtPt => "pt-pt",
            Language::EnGb => "en-gb",
            Language::EsEs => "es-es",
        }
    }

    /// Parse a language tag, case-insensitively. Unknown tags resolve to
    /// `None`; callers decide the fallback.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pt-pt" => Some(Language::PtPt),
            "en-gb" => Some(Language::EnGb),
            "es-es" => Some(Language::EsEs),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        // Unknown tags fall back to the default rather than failing the
        // whole payload, matching how the request filter treats them.
        Ok(Language::from_tag(&tag).unwrap_or(Language::DEFAULT))
    }
}
