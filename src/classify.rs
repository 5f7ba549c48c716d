//! Lookups that label a year or a date: decade, generation and zodiac sign.

use chrono::Datelike;
use serde::Serialize;
use std::fmt;

/// Label for the decade containing `year`, e.g. `"1990s"`.
///
/// Uses floor division so negative years land in the decade below them.
/// Computed in i64: the decade of `i32::MIN` does not fit in an i32.
pub fn decade_label(year: i32) -> String {
    let decade = i64::from(year).div_euclid(10) * 10;
    format!("{decade}s")
}

/// Western generational cohort assigned by birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Generation {
    #[serde(rename = "Silent Generation")]
    Silent,
    #[serde(rename = "Baby Boomer")]
    BabyBoomer,
    #[serde(rename = "Generation X")]
    GenX,
    #[serde(rename = "Millennial")]
    Millennial,
    #[serde(rename = "Generation Z")]
    GenZ,
    #[serde(rename = "Generation Alpha")]
    GenAlpha,
    Unknown,
}

/// Ordered, non-overlapping first years of each cohort. A cohort runs until
/// the year before the next one starts; the last is open-ended.
const GENERATIONS: [(i32, Generation); 6] = [
    (1928, Generation::Silent),
    (1946, Generation::BabyBoomer),
    (1965, Generation::GenX),
    (1981, Generation::Millennial),
    (1997, Generation::GenZ),
    (2013, Generation::GenAlpha),
];

impl Generation {
    pub fn from_birth_year(year: i32) -> Self {
        GENERATIONS
            .iter()
            .rev()
            .find(|(first, _)| year >= *first)
            .map(|(_, generation)| *generation)
            .unwrap_or(Generation::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            Generation::Silent => "Silent Generation",
            Generation::BabyBoomer => "Baby Boomer",
            Generation::GenX => "Generation X",
            Generation::Millennial => "Millennial",
            Generation::GenZ => "Generation Z",
            Generation::GenAlpha => "Generation Alpha",
            Generation::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generation label for a birth year; `"Unknown"` before 1928.
pub fn generation_label(year: i32) -> &'static str {
    Generation::from_birth_year(year).label()
}

/// Western zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

/// (month, day) on which each sign starts, in calendar order. Each sign ends
/// the day before the next one starts; Capricorn wraps over new year.
const ZODIAC_STARTS: [((u32, u32), ZodiacSign); 12] = [
    ((1, 20), ZodiacSign::Aquarius),
    ((2, 19), ZodiacSign::Pisces),
    ((3, 21), ZodiacSign::Aries),
    ((4, 20), ZodiacSign::Taurus),
    ((5, 21), ZodiacSign::Gemini),
    ((6, 21), ZodiacSign::Cancer),
    ((7, 23), ZodiacSign::Leo),
    ((8, 23), ZodiacSign::Virgo),
    ((9, 23), ZodiacSign::Libra),
    ((10, 23), ZodiacSign::Scorpio),
    ((11, 22), ZodiacSign::Sagittarius),
    ((12, 22), ZodiacSign::Capricorn),
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
    ];

    /// Sign for a (month, day) pair. The year plays no part.
    pub fn from_month_day(month: u32, day: u32) -> Self {
        ZODIAC_STARTS
            .iter()
            .rev()
            .find(|(start, _)| (month, day) >= *start)
            .map(|(_, sign)| *sign)
            .unwrap_or(ZodiacSign::Capricorn)
    }

    /// Inclusive (month, day) bounds of the sign.
    pub fn range(self) -> ((u32, u32), (u32, u32)) {
        match self {
            ZodiacSign::Capricorn => ((12, 22), (1, 19)),
            ZodiacSign::Aquarius => ((1, 20), (2, 18)),
            ZodiacSign::Pisces => ((2, 19), (3, 20)),
            ZodiacSign::Aries => ((3, 21), (4, 19)),
            ZodiacSign::Taurus => ((4, 20), (5, 20)),
            ZodiacSign::Gemini => ((5, 21), (6, 20)),
            ZodiacSign::Cancer => ((6, 21), (7, 22)),
            ZodiacSign::Leo => ((7, 23), (8, 22)),
            ZodiacSign::Virgo => ((8, 23), (9, 22)),
            ZodiacSign::Libra => ((9, 23), (10, 22)),
            ZodiacSign::Scorpio => ((10, 23), (11, 21)),
            ZodiacSign::Sagittarius => ((11, 22), (12, 21)),
        }
    }

    /// Whether (month, day) falls inside [`ZodiacSign::range`].
    pub fn contains(self, month: u32, day: u32) -> bool {
        let (start, end) = self.range();
        let md = (month, day);
        if start <= end {
            start <= md && md <= end
        } else {
            md >= start || md <= end
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zodiac sign for a birth date.
pub fn zodiac_sign(date: impl Datelike) -> ZodiacSign {
    ZodiacSign::from_month_day(date.month(), date.day())
}
