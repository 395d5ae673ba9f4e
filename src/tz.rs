use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Clone, Debug, PartialEq, Eq, DeserializeFromStr)]
pub enum Tz {
    Local,
    Iana(chrono_tz::Tz),
}

impl Default for Tz {
    fn default() -> Self {
        Tz::Local
    }
}

impl Tz {
    pub fn date_of(&self, utc: &DateTime<Utc>) -> NaiveDate {
        match self {
            Tz::Local => utc.with_timezone(&chrono::Local).date_naive(),
            Tz::Iana(tz) => tz.from_utc_datetime(&utc.naive_utc()).date_naive(),
        }
    }
}

impl FromStr for Tz {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();

        if matches!(lowercase.as_str(), "localtime" | "local") {
            Ok(Tz::Local)
        } else if let Ok(tz) = s.parse::<chrono_tz::Tz>() {
            Ok(Tz::Iana(tz))
        } else {
            Err(Error::new(
                ErrorKind::TimezoneParse,
                &format!("Timezone '{}' not recognized", s),
            ))
        }
    }
}

impl fmt::Display for Tz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tz::Local => write!(f, "local"),
            Tz::Iana(tz) => write!(f, "{}", tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("local".parse::<Tz>().unwrap(), Tz::Local);
        assert_eq!("Localtime".parse::<Tz>().unwrap(), Tz::Local);
        assert_eq!(
            "Europe/Berlin".parse::<Tz>().unwrap(),
            Tz::Iana(chrono_tz::Europe::Berlin)
        );
        assert!("Mars/Olympus_Mons".parse::<Tz>().is_err());
    }

    #[test]
    fn date_depends_on_zone() {
        let utc = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2023, 12, 31)
                .unwrap()
                .and_hms_opt(23, 30, 0)
                .unwrap(),
        );

        let berlin = "Europe/Berlin".parse::<Tz>().unwrap();
        let new_york = "America/New_York".parse::<Tz>().unwrap();

        assert_eq!(berlin.date_of(&utc), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(new_york.date_of(&utc), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn display_round_trips() {
        let tz = "Asia/Kolkata".parse::<Tz>().unwrap();
        assert_eq!(tz.to_string().parse::<Tz>().unwrap(), tz);
    }
}
