//! Life periods, decade labels, generation and zodiac sign for a birth date,
//! with an optional LLM-written cultural summary.

pub mod age;
pub mod birth;
pub mod classify;
pub mod error;
pub mod periods;
pub mod report;
pub mod summary;

pub use birth::{BirthDate, resolve, resolve_today};
pub use classify::{Generation, ZodiacSign, decade_label, generation_label, zodiac_sign};
pub use error::{ExternalServiceError, InvalidInputError};
pub use periods::{LifeStage, Period, PeriodSet, compute_periods};
pub use report::{OutputFormat, Report};
pub use summary::{SummaryConfig, SummaryGenerator, SummaryRequest, TextProvider};
