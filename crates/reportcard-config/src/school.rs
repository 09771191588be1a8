use crate::{process_env, string_or};

/// Institution identity printed on every report card.
///
/// The defaults are the fixed values of the school the service was built for;
/// `SCHOOL_NAME`, `SCHOOL_ADDRESS`, `SCHOOL_PHONE` and `ACADEMIC_YEAR` override them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchoolProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub academic_year: String,
}

pub const DEFAULT_SCHOOL_NAME: &str = "ADILANG SECONDARY SCHOOL";
pub const DEFAULT_SCHOOL_ADDRESS: &str = "P.O.BOX 13, PADER-AGAGO DISTRICT";
pub const DEFAULT_SCHOOL_PHONE: &str = "TEL: 0773221580/0782634466/0782446279/0770685882";
pub const DEFAULT_ACADEMIC_YEAR: &str = "2025";

impl Default for SchoolProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHOOL_NAME.to_string(),
            address: DEFAULT_SCHOOL_ADDRESS.to_string(),
            phone: DEFAULT_SCHOOL_PHONE.to_string(),
            academic_year: DEFAULT_ACADEMIC_YEAR.to_string(),
        }
    }
}

impl SchoolProfile {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            name: string_or(&lookup, "SCHOOL_NAME", DEFAULT_SCHOOL_NAME),
            address: string_or(&lookup, "SCHOOL_ADDRESS", DEFAULT_SCHOOL_ADDRESS),
            phone: string_or(&lookup, "SCHOOL_PHONE", DEFAULT_SCHOOL_PHONE),
            academic_year: string_or(&lookup, "ACADEMIC_YEAR", DEFAULT_ACADEMIC_YEAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_defaults_are_the_school_constants() {
        let profile = SchoolProfile::from_lookup(lookup_from(&[]));
        assert_eq!(profile, SchoolProfile::default());
        assert_eq!(profile.academic_year, "2025");
    }

    #[test]
    fn test_year_override() {
        let profile = SchoolProfile::from_lookup(lookup_from(&[("ACADEMIC_YEAR", "2026")]));
        assert_eq!(profile.academic_year, "2026");
        assert_eq!(profile.name, DEFAULT_SCHOOL_NAME);
    }
}
