use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {scale} value: {value}")]
pub struct ParseLevelError {
    pub scale: &'static str,
    pub value: String,
}

// Every scale is stored and serialized by its upper-case name; the lower-case
// code is accepted on input as well.
macro_rules! level_scale {
    (
        $(#[$meta:meta])*
        $scale:ident {
            $($variant:ident => ($name:literal, $code:literal, $description:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $scale {
            $(
                #[serde(rename = $name, alias = $code)]
                $variant,
            )+
        }

        impl $scale {
            pub const ALL: [$scale; 5] = [$($scale::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($scale::$variant => $name,)+
                }
            }

            pub fn code(&self) -> &'static str {
                match self {
                    $($scale::$variant => $code,)+
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $($scale::$variant => $description,)+
                }
            }

            /// Position on the scale, 1 to 5.
            pub fn level(&self) -> u8 {
                *self as u8 + 1
            }
        }

        impl fmt::Display for $scale {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $scale {
            type Err = ParseLevelError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                $scale::ALL
                    .into_iter()
                    .find(|level| level.as_str() == value || level.code() == value)
                    .ok_or_else(|| ParseLevelError {
                        scale: stringify!($scale),
                        value: value.to_string(),
                    })
            }
        }

        impl TryFrom<String> for $scale {
            type Error = ParseLevelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

level_scale! {
    /// How the shoe fits compared to the usual size.
    SizeFit {
        VerySmall => ("VERY_SMALL", "very_small", "Runs very small"),
        Small => ("SMALL", "small", "Runs small"),
        Perfect => ("PERFECT", "perfect", "True to size"),
        Big => ("BIG", "big", "Runs big"),
        VeryBig => ("VERY_BIG", "very_big", "Runs very big"),
    }
}

level_scale! {
    /// Softness of the cushioning.
    Cushion {
        VerySoft => ("VERY_SOFT", "very_soft", "Very soft"),
        Soft => ("SOFT", "soft", "Soft"),
        Normal => ("NORMAL", "normal", "Normal"),
        Firm => ("FIRM", "firm", "Firm"),
        VeryFirm => ("VERY_FIRM", "very_firm", "Very firm"),
    }
}

level_scale! {
    /// Ankle support.
    Stability {
        VeryUnstable => ("VERY_UNSTABLE", "very_unstable", "Very unstable"),
        Unstable => ("UNSTABLE", "unstable", "Unstable"),
        Normal => ("NORMAL", "normal", "Normal"),
        Stable => ("STABLE", "stable", "Stable"),
        VeryStable => ("VERY_STABLE", "very_stable", "Very stable"),
    }
}

/// Selects which characteristic column an aggregate runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    SizeFit,
    Cushion,
    Stability,
}

impl Characteristic {
    pub fn column(&self) -> &'static str {
        match self {
            Characteristic::SizeFit => "size_fit",
            Characteristic::Cushion => "cushion",
            Characteristic::Stability => "stability",
        }
    }

    /// Stored names of the five levels, lowest first.
    pub fn levels(&self) -> [&'static str; 5] {
        match self {
            Characteristic::SizeFit => SizeFit::ALL.map(|level| level.as_str()),
            Characteristic::Cushion => Cushion::ALL.map(|level| level.as_str()),
            Characteristic::Stability => Stability::ALL.map(|level| level.as_str()),
        }
    }
}

/// Narrows a rating average down to reviews sharing the given levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicFilter {
    pub size_fit: Option<SizeFit>,
    pub cushion: Option<Cushion>,
    pub stability: Option<Stability>,
}

impl CharacteristicFilter {
    pub fn is_empty(&self) -> bool {
        self.size_fit.is_none() && self.cushion.is_none() && self.stability.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_declaration_order() {
        assert_eq!(SizeFit::VerySmall.level(), 1);
        assert_eq!(SizeFit::Perfect.level(), 3);
        assert_eq!(SizeFit::VeryBig.level(), 5);
        assert!(Cushion::VerySoft < Cushion::VeryFirm);
        assert!(Stability::Unstable < Stability::Stable);
    }

    #[test]
    fn parses_name_and_code() {
        assert_eq!("VERY_SOFT".parse::<Cushion>(), Ok(Cushion::VerySoft));
        assert_eq!("very_soft".parse::<Cushion>(), Ok(Cushion::VerySoft));
        let stable: Result<Stability, _> = "STABLE".to_string().try_into();
        assert_eq!(stable, Ok(Stability::Stable));

        let err = "LARGE".parse::<SizeFit>().unwrap_err();
        assert_eq!(err.scale, "SizeFit");
        assert_eq!(err.to_string(), "unknown SizeFit value: LARGE");
    }

    #[test]
    fn serde_uses_upper_case_name_and_accepts_code() {
        assert_eq!(
            serde_json::to_string(&SizeFit::VeryBig).unwrap(),
            "\"VERY_BIG\""
        );
        let fit: SizeFit = serde_json::from_str("\"very_small\"").unwrap();
        assert_eq!(fit, SizeFit::VerySmall);
        assert!(serde_json::from_str::<Stability>("\"WOBBLY\"").is_err());
    }

    #[test]
    fn code_and_description() {
        assert_eq!(Stability::VeryStable.code(), "very_stable");
        assert_eq!(SizeFit::Perfect.description(), "True to size");
        assert_eq!(Cushion::Normal.to_string(), "NORMAL");
    }
}
