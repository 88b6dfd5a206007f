//! 飲水記録

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MetricEntry, MetricKind};
use crate::user::UserId;

/// 飲水記録の入力値
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaterValues {
    /// 飲水量（リットル）
    pub water: f64,
}

/// 1 日分の飲水記録
///
/// `user_id` は URL で指定されるためレスポンスには含めない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterEntry {
    #[serde(skip_serializing)]
    pub user_id:     UserId,
    pub entry_date:  NaiveDate,
    pub total_water: f64,
}

impl MetricEntry for WaterEntry {
    type Values = WaterValues;

    const KIND: MetricKind = MetricKind::Water;

    fn from_values(user_id: UserId, entry_date: NaiveDate, values: Self::Values) -> Self {
        Self {
            user_id,
            entry_date,
            total_water: values.water,
        }
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_シリアライズ結果にuser_idが含まれない() {
        let entry = WaterEntry::from_values(
            UserId::new(1),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            WaterValues { water: 1.5 },
        );

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "entry_date": "2024-01-01", "total_water": 1.5 })
        );
    }

    #[test]
    fn test_整数の飲水量も受け付ける() {
        let values: WaterValues = serde_json::from_str(r#"{"water": 2}"#).unwrap();
        assert_eq!(values.water, 2.0);
    }
}
