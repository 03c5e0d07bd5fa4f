//! 财年选择
//!
//! 每个会话加载一次财年列表。已选择的财年保存在本地存储里，刷新后恢复；
//! 没有选择时自动选中标记为当前的那一个。

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::FiscalYear;
use crate::protocol::NoFilter;
use crate::transport::Transport;

/// 决定当前使用的财年
///
/// 优先使用仍然存在的已保存选择（以服务器最新数据为准），其次是 `is_current`，
/// 最后退回到起始日期最晚的财年。
pub fn select_year(years: &[FiscalYear], stored: Option<&FiscalYear>) -> Option<FiscalYear> {
    if let Some(stored) = stored {
        if let Some(fresh) = years.iter().find(|y| y.id == stored.id) {
            return Some(fresh.clone());
        }
        log::info!("stored fiscal year {} no longer exists", stored.year_name);
    }
    years
        .iter()
        .find(|y| y.is_current)
        .or_else(|| years.iter().max_by_key(|y| y.start_date))
        .cloned()
}

/// 拉取财年列表并确定选择
pub async fn load_fiscal_years<T: Transport>(
    client: &ApiClient<T>,
    stored: Option<&FiscalYear>,
) -> ApiResult<(Vec<FiscalYear>, Option<FiscalYear>)> {
    let years = client.list::<FiscalYear>(NoFilter).await?;
    let selected = select_year(&years, stored);
    Ok((years, selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn years() -> Vec<FiscalYear> {
        serde_json::from_value(json!([
            {"id": "fy-23", "year_name": "FY 2023", "start_date": "2023-01-01", "end_date": "2023-12-31", "status": "closed", "is_current": false},
            {"id": "fy-24", "year_name": "FY 2024", "start_date": "2024-01-01", "end_date": "2024-12-31", "status": "open", "is_current": true},
            {"id": "fy-25", "year_name": "FY 2025", "start_date": "2025-01-01", "end_date": "2025-12-31", "status": "open", "is_current": false}
        ]))
        .unwrap()
    }

    #[test]
    fn test_current_year_selected_by_default() {
        let selected = select_year(&years(), None).unwrap();
        assert_eq!(selected.id, "fy-24");
    }

    #[test]
    fn test_stored_choice_wins_and_is_refreshed() {
        let mut stale = years()[0].clone();
        stale.year_name = "old name".to_string();
        let selected = select_year(&years(), Some(&stale)).unwrap();
        assert_eq!(selected.id, "fy-23");
        assert_eq!(selected.year_name, "FY 2023");
        assert!(selected.is_closed());
    }

    #[test]
    fn test_missing_stored_choice_falls_back() {
        let mut gone = years()[0].clone();
        gone.id = "deleted".to_string();
        assert_eq!(select_year(&years(), Some(&gone)).unwrap().id, "fy-24");

        let none_current: Vec<FiscalYear> = years()
            .into_iter()
            .map(|mut y| {
                y.is_current = false;
                y
            })
            .collect();
        assert_eq!(select_year(&none_current, None).unwrap().id, "fy-25");
        assert_eq!(select_year(&[], None), None);
    }
}
