use ledger_shared::models::{ActivityEntity, ActivityFilter, ActivityLog, ActivityType};
use leptos::prelude::*;

use super::crud::{ErrorBanner, PageHeader, ResourcePage, TableStatus};
use super::format;
use super::form::{Field, SelectField};
use crate::config::use_config;

/// 审计枚举下拉框的选项
fn enum_options<T: Copy>(all: &[T], entry: fn(T) -> (&'static str, &'static str)) -> Signal<Vec<(String, String)>> {
    Signal::stored(
        all.iter()
            .map(|v| {
                let (value, label) = entry(*v);
                (value.to_string(), label.to_string())
            })
            .collect(),
    )
}

fn badge_class(kind: ActivityType) -> &'static str {
    match kind {
        ActivityType::Create | ActivityType::Register => "badge badge-success badge-sm",
        ActivityType::Update | ActivityType::SettingsChange => "badge badge-info badge-sm",
        ActivityType::Delete => "badge badge-error badge-sm",
        ActivityType::Login | ActivityType::Logout => "badge badge-ghost badge-sm",
        _ => "badge badge-outline badge-sm",
    }
}

#[component]
pub fn ActivityLogsPage() -> impl IntoView {
    let limit = use_config().activity_limit;
    let page = ResourcePage::<ActivityLog>::new(ActivityFilter {
        limit: Some(limit),
        ..ActivityFilter::default()
    });
    let items = page.items();

    let activity = Field {
        value: Signal::derive(move || {
            page.filter
                .with(|f| f.activity_type.map(|t| t.as_str().to_string()).unwrap_or_default())
        }),
        set: Callback::new(move |v: String| page.filter.update(|f| f.activity_type = ActivityType::parse(&v))),
    };
    let entity = Field {
        value: Signal::derive(move || {
            page.filter
                .with(|f| f.entity_type.map(|e| e.as_str().to_string()).unwrap_or_default())
        }),
        set: Callback::new(move |v: String| page.filter.update(|f| f.entity_type = ActivityEntity::parse(&v))),
    };

    let row = |log: ActivityLog| {
        let user = log.user_name.or(log.user_email.clone()).unwrap_or_else(|| "System".to_string());
        view! {
            <tr>
                <td class="whitespace-nowrap text-sm">{format::date_time(log.created_at)}</td>
                <td>
                    <div class="font-medium">{user}</div>
                    <div class="text-xs text-base-content/60">{log.user_email.unwrap_or_default()}</div>
                </td>
                <td><span class=badge_class(log.activity_type)>{log.activity_type.label()}</span></td>
                <td>
                    <div>{log.entity_type.label()}</div>
                    <div class="text-xs text-base-content/60">{log.entity_name.unwrap_or_default()}</div>
                </td>
                <td class="text-sm">{log.description.unwrap_or_default()}</td>
                <td class="font-mono text-xs">{log.ip_address.unwrap_or_default()}</td>
            </tr>
        }
    };

    view! {
        <PageHeader
            title="Activity Log"
            subtitle=format!("The latest {limit} actions in this organization")
            loading=page.is_loading()
            on_refresh=Callback::new(move |_: ()| page.reload())
        />
        <ErrorBanner error=page.error() />

        <div class="grid md:grid-cols-2 gap-3 mb-4 max-w-2xl">
            <SelectField
                label="Activity"
                field=activity
                options=enum_options(ActivityType::ALL, |t| (t.as_str(), t.label()))
                empty_label="All activities"
            />
            <SelectField
                label="Entity"
                field=entity
                options=enum_options(ActivityEntity::ALL, |e| (e.as_str(), e.label()))
                empty_label="All entities"
            />
        </div>

        <div class="card bg-base-100 shadow">
            <div class="overflow-x-auto">
                <table class="table table-sm">
                    <thead>
                        <tr>
                            <th>"When"</th>
                            <th>"User"</th>
                            <th>"Action"</th>
                            <th>"Entity"</th>
                            <th>"Description"</th>
                            <th>"IP"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <TableStatus
                            colspan=6
                            spinner=page.show_spinner()
                            empty=Signal::derive(move || items.with(Vec::is_empty))
                            empty_text="No activity recorded yet."
                        />
                        {move || items.get().into_iter().map(row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_class_by_action() {
        assert!(badge_class(ActivityType::Delete).contains("badge-error"));
        assert!(badge_class(ActivityType::Create).contains("badge-success"));
        assert!(badge_class(ActivityType::Export).contains("badge-outline"));
    }
}
