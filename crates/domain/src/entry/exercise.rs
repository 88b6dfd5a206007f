//! 運動記録

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MetricEntry, MetricKind};
use crate::user::UserId;

/// 運動記録の入力値
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExerciseValues {
    /// 運動時間（時間）
    pub exercise: f64,
}

/// 1 日分の運動時間
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseEntry {
    #[serde(skip_serializing)]
    pub user_id:        UserId,
    pub entry_date:     NaiveDate,
    pub total_exercise: f64,
}

impl MetricEntry for ExerciseEntry {
    type Values = ExerciseValues;

    const KIND: MetricKind = MetricKind::Exercise;

    fn from_values(user_id: UserId, entry_date: NaiveDate, values: Self::Values) -> Self {
        Self {
            user_id,
            entry_date,
            total_exercise: values.exercise,
        }
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }
}
