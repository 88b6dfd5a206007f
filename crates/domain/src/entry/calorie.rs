//! カロリー記録

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MetricEntry, MetricKind};
use crate::user::UserId;

/// カロリー記録の入力値
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalorieValues {
    /// 摂取カロリー（kcal）
    pub intake_cal: i32,
    /// 消費カロリー（kcal）
    pub burned_cal: i32,
}

/// 1 日分のカロリー収支
///
/// `calorie_difference` は `intake_cal - burned_cal`。
/// DB 側でも生成列として同じ式で保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalorieEntry {
    #[serde(skip_serializing)]
    pub user_id:            UserId,
    pub entry_date:         NaiveDate,
    pub intake_cal:         i32,
    pub burned_cal:         i32,
    pub calorie_difference: i32,
}

impl MetricEntry for CalorieEntry {
    type Values = CalorieValues;

    const KIND: MetricKind = MetricKind::Calorie;

    fn from_values(user_id: UserId, entry_date: NaiveDate, values: Self::Values) -> Self {
        Self {
            user_id,
            entry_date,
            intake_cal: values.intake_cal,
            burned_cal: values.burned_cal,
            calorie_difference: values.intake_cal.saturating_sub(values.burned_cal),
        }
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }
}
