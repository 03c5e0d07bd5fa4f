//! 仪表盘图表的几何计算
//!
//! 只负责把数据换算成 SVG 坐标，渲染在 `dashboard.rs`。

use ledger_shared::dashboard::{CategoryTotal, MonthlyPoint};

/// 绘图区域，坐标单位为 SVG viewBox 单位
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub const MONTHLY: Frame = Frame {
        width: 720.0,
        height: 260.0,
        left: 48.0,
        top: 12.0,
        bottom: 28.0,
    };

    pub fn plot_width(&self) -> f64 {
        self.width - self.left
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.top - self.bottom
    }

    /// 数值在 Y 轴上的位置
    pub fn y_of(&self, value: f64, max: f64) -> f64 {
        self.top + self.plot_height() - self.bar_height(value, max)
    }

    fn bar_height(&self, value: f64, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        (value.max(0.0) / max).min(1.0) * self.plot_height()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 一个月份的一组柱子
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBars {
    pub label: &'static str,
    pub label_x: f64,
    pub income: Bar,
    pub expense: Bar,
}

/// 向上取整到 1/2/5 × 10ⁿ，作为坐标轴上限
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|&n| fraction <= n)
        .unwrap_or(10.0);
    nice * magnitude
}

/// 坐标轴上限：所有月份收入与支出中的最大值
pub fn monthly_max(points: &[MonthlyPoint]) -> f64 {
    let max = points
        .iter()
        .flat_map(|p| [p.income, p.expense])
        .fold(0.0, f64::max);
    nice_ceiling(max)
}

pub fn monthly_bars(points: &[MonthlyPoint], frame: &Frame) -> Vec<MonthBars> {
    if points.is_empty() {
        return Vec::new();
    }
    let max = monthly_max(points);
    let slot = frame.plot_width() / points.len() as f64;
    let bar_width = slot * 0.35;

    let bar = |x: f64, value: f64| Bar {
        x,
        y: frame.y_of(value, max),
        width: bar_width,
        height: frame.bar_height(value, max),
    };

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let start = frame.left + i as f64 * slot;
            let income_x = start + slot * 0.15;
            MonthBars {
                label: p.month.short_name(),
                label_x: start + slot / 2.0,
                income: bar(income_x, p.income),
                expense: bar(income_x + bar_width, p.expense),
            }
        })
        .collect()
}

/// Y 轴刻度，从 0 到上限均分
pub fn ticks(max: f64, count: u32) -> Vec<f64> {
    (0..=count).map(|i| max * i as f64 / count as f64).collect()
}

/// 分类支出占最大项的比例，用于横向条形
pub fn expense_shares(categories: &[CategoryTotal]) -> Vec<f64> {
    let max = categories.iter().map(|c| c.expense).fold(0.0, f64::max);
    categories
        .iter()
        .map(|c| if max > 0.0 { c.expense / max } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_shared::date::MonthKey;

    fn point(month: u32, income: f64, expense: f64) -> MonthlyPoint {
        MonthlyPoint {
            month: MonthKey::new(2024, month),
            income,
            expense,
            net: income - expense,
        }
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(-5.0), 1.0);
        assert_eq!(nice_ceiling(4.2), 5.0);
        assert_eq!(nice_ceiling(180.0), 200.0);
        assert_eq!(nice_ceiling(730.0), 1000.0);
    }

    #[test]
    fn test_monthly_bars_scale_to_tallest_value() {
        let frame = Frame::MONTHLY;
        let bars = monthly_bars(&[point(1, 0.0, 0.0), point(2, 500.0, 200.0)], &frame);
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].label, "Jan");
        assert_eq!(bars[0].income.height, 0.0);
        assert_eq!(bars[0].income.y, frame.top + frame.plot_height());

        let feb = &bars[1];
        assert_eq!(feb.label, "Feb");
        assert_eq!(feb.income.height, frame.plot_height());
        assert_eq!(feb.income.y, frame.top);
        assert!((feb.expense.height - frame.plot_height() * 0.4).abs() < 1e-9);
        assert!(feb.expense.x > feb.income.x);
    }

    #[test]
    fn test_expense_shares() {
        let cats = vec![
            CategoryTotal {
                name: "Rent".into(),
                color: None,
                income: 0.0,
                expense: 800.0,
            },
            CategoryTotal {
                name: "Food".into(),
                color: None,
                income: 0.0,
                expense: 200.0,
            },
        ];
        assert_eq!(expense_shares(&cats), vec![1.0, 0.25]);
        assert!(expense_shares(&[]).is_empty());
    }
}
