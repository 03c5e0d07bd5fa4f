//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Dashboard,
    Transactions,
    Accounts,
    Categories,
    Partners,
    Products,
    Warehouses,
    StockMovements,
    TaxRates,
    Invoices,
    Reports,
    ActivityLogs,
    Settings,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 侧边栏中的页面，按显示顺序
    pub const NAV: [AppRoute; 13] = [
        AppRoute::Dashboard,
        AppRoute::Transactions,
        AppRoute::Accounts,
        AppRoute::Categories,
        AppRoute::Partners,
        AppRoute::Invoices,
        AppRoute::Reports,
        AppRoute::Products,
        AppRoute::Warehouses,
        AppRoute::StockMovements,
        AppRoute::TaxRates,
        AppRoute::ActivityLogs,
        AppRoute::Settings,
    ];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/transactions" => Self::Transactions,
            "/accounts" => Self::Accounts,
            "/categories" => Self::Categories,
            "/partners" => Self::Partners,
            "/products" => Self::Products,
            "/warehouses" => Self::Warehouses,
            "/stock-movements" => Self::StockMovements,
            "/tax-rates" => Self::TaxRates,
            "/invoices" => Self::Invoices,
            "/reports" => Self::Reports,
            "/activity-logs" => Self::ActivityLogs,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Transactions => "/transactions",
            Self::Accounts => "/accounts",
            Self::Categories => "/categories",
            Self::Partners => "/partners",
            Self::Products => "/products",
            Self::Warehouses => "/warehouses",
            Self::StockMovements => "/stock-movements",
            Self::TaxRates => "/tax-rates",
            Self::Invoices => "/invoices",
            Self::Reports => "/reports",
            Self::ActivityLogs => "/activity-logs",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Accounts => "Accounts",
            Self::Categories => "Categories",
            Self::Partners => "Partners",
            Self::Products => "Products & Services",
            Self::Warehouses => "Warehouses",
            Self::StockMovements => "Stock Movements",
            Self::TaxRates => "Tax Rates",
            Self::Invoices => "Invoices",
            Self::Reports => "Reports",
            Self::ActivityLogs => "Activity Log",
            Self::Settings => "Settings",
            Self::NotFound => "Not found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in AppRoute::NAV {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/tax-rates/"), AppRoute::TaxRates);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_guards() {
        assert!(AppRoute::NAV.iter().all(AppRoute::requires_auth));
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Settings.should_redirect_when_authenticated());
    }
}
