//! Life periods derived from a birth date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::age::shift_years;
use crate::birth::BirthDate;
use crate::classify::decade_label;

/// A named stretch of life measured in whole years from birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Childhood,
    Teenage,
    YoungAdult,
}

impl LifeStage {
    pub const ALL: [LifeStage; 3] = [
        LifeStage::Childhood,
        LifeStage::Teenage,
        LifeStage::YoungAdult,
    ];

    /// First and last age of the stage, inclusive.
    pub fn age_bounds(self) -> (i32, i32) {
        match self {
            LifeStage::Childhood => (5, 12),
            LifeStage::Teenage => (13, 19),
            LifeStage::YoungAdult => (20, 29),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LifeStage::Childhood => "Childhood years",
            LifeStage::Teenage => "Teenage years",
            LifeStage::YoungAdult => "Young adult years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub stage: LifeStage,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    fn for_stage(birth: BirthDate, stage: LifeStage) -> Self {
        let (first, last) = stage.age_bounds();
        Self {
            stage,
            start: shift_years(birth.date(), first),
            end: shift_years(birth.date(), last),
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// Decade the period starts in.
    pub fn decade_label(&self) -> String {
        decade_label(self.start_year())
    }
}

/// The three life periods of one birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSet {
    pub childhood: Period,
    pub teenage: Period,
    pub young_adult: Period,
}

impl PeriodSet {
    pub fn get(&self, stage: LifeStage) -> &Period {
        match stage {
            LifeStage::Childhood => &self.childhood,
            LifeStage::Teenage => &self.teenage,
            LifeStage::YoungAdult => &self.young_adult,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        LifeStage::ALL.into_iter().map(move |stage| self.get(stage))
    }

    /// child_start, child_end, teen_start, teen_end, ya_start, ya_end
    pub fn dates(&self) -> [NaiveDate; 6] {
        [
            self.childhood.start,
            self.childhood.end,
            self.teenage.start,
            self.teenage.end,
            self.young_adult.start,
            self.young_adult.end,
        ]
    }
}

/// Offsets the birth date into each life stage. A 29 Feb birthday lands on
/// 28 Feb in common years.
pub fn compute_periods(birth: BirthDate) -> PeriodSet {
    PeriodSet {
        childhood: Period::for_stage(birth, LifeStage::Childhood),
        teenage: Period::for_stage(birth, LifeStage::Teenage),
        young_adult: Period::for_stage(birth, LifeStage::YoungAdult),
    }
}
