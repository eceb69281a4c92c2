//! Service categories a student can ask about.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when an interest label is not one of the eight categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid interest: {0}")]
pub struct UnknownInterest(pub String);

/// The service an enquiry is about.
///
/// Serialized by its display label (`"Visa Support"`), which is also what
/// the landing page form submits and what the database stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interest {
    #[serde(rename = "German Consultancy")]
    GermanConsultancy,
    #[serde(rename = "University Selection")]
    UniversitySelection,
    #[serde(rename = "Application Assistance")]
    ApplicationAssistance,
    #[serde(rename = "Visa Support")]
    VisaSupport,
    #[serde(rename = "Accommodation")]
    Accommodation,
    #[serde(rename = "Language Courses")]
    LanguageCourses,
    #[serde(rename = "Career Guidance")]
    CareerGuidance,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Interest {
    /// Every category, in the order the enquiry form lists them.
    pub const ALL: [Self; 8] = [
        Self::GermanConsultancy,
        Self::UniversitySelection,
        Self::ApplicationAssistance,
        Self::VisaSupport,
        Self::Accommodation,
        Self::LanguageCourses,
        Self::CareerGuidance,
        Self::Other,
    ];

    /// Human-readable label, identical to the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GermanConsultancy => "German Consultancy",
            Self::UniversitySelection => "University Selection",
            Self::ApplicationAssistance => "Application Assistance",
            Self::VisaSupport => "Visa Support",
            Self::Accommodation => "Accommodation",
            Self::LanguageCourses => "Language Courses",
            Self::CareerGuidance => "Career Guidance",
            Self::Other => "Other",
        }
    }

    /// Lenient parse used for public submissions.
    ///
    /// Missing, blank or unrecognised input becomes [`Interest::Other`].
    #[must_use]
    pub fn parse_or_default(input: Option<&str>) -> Self {
        input
            .map(str::trim)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interest {
    type Err = UnknownInterest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interest| interest.label() == s)
            .ok_or_else(|| UnknownInterest(s.to_owned()))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Interest {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Interest {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Interest {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.label(), buf)
    }
}
