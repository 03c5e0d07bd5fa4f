//! 表单字段
//!
//! 编辑弹窗的草稿放在 `RwSignal<Option<Editor<D>>>` 里，[`draft_field`] 把其中一个字段
//! 映射成「读取信号 + 写入回调」，字段组件只认这一对。

use ledger_shared::crud::Editor;
use leptos::prelude::*;

/// 草稿字段绑定
pub struct Field<T: Send + Sync + 'static> {
    pub value: Signal<T>,
    pub set: Callback<T>,
}

impl<T: Send + Sync + 'static> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Field<T> {}

pub fn draft_field<D, T>(
    editor: RwSignal<Option<Editor<D>>>,
    get: fn(&D) -> T,
    set: fn(&mut D, T),
) -> Field<T>
where
    D: Send + Sync + 'static,
    T: Default + Send + Sync + 'static,
{
    Field {
        value: Signal::derive(move || {
            editor.with(|e| e.as_ref().map(|e| get(&e.draft)).unwrap_or_default())
        }),
        set: Callback::new(move |value: T| {
            editor.update(|e| {
                if let Some(e) = e {
                    set(&mut e.draft, value);
                }
            })
        }),
    }
}

/// 可选文本：空白视为未填写，其余原样保留，输入中的空格不会被吞掉
pub fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn text_of(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// 数字输入框的文本；`None` 为空
pub fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    field: Field<String>,
    #[prop(optional)] required: bool,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(optional)] max_len: Option<usize>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label} {required.then_some(" *")}</span>
            </div>
            <input
                type=input_type
                class="input input-bordered w-full"
                placeholder=placeholder
                required=required
                maxlength=max_len.map(|n| n.to_string())
                prop:value=move || field.value.get()
                on:input=move |ev| field.set.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextAreaField(#[prop(into)] label: String, field: Field<String>) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <textarea
                class="textarea textarea-bordered w-full"
                rows="2"
                prop:value=move || field.value.get()
                on:input=move |ev| field.set.run(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

/// 数字输入在失焦/回车时解析，避免输入 `1.` 时被格式化掉
#[component]
pub fn NumberField(
    #[prop(into)] label: String,
    field: Field<Option<f64>>,
    #[prop(optional)] required: bool,
    #[prop(into, default = "0.01".to_string())] step: String,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label} {required.then_some(" *")}</span>
            </div>
            <input
                type="number"
                class="input input-bordered w-full"
                step=step
                required=required
                prop:value=move || number_text(field.value.get())
                on:change=move |ev| field.set.run(parse_number(&event_target_value(&ev)))
            />
        </label>
    }
}

/// 下拉框，选项为 `(值, 显示文本)`
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    field: Field<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    /// 有值时加一个空选项
    #[prop(into, optional)]
    empty_label: Option<String>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <select
                class="select select-bordered w-full"
                prop:value=move || field.value.get()
                on:change=move |ev| field.set.run(event_target_value(&ev))
            >
                {empty_label.map(|text| view! { <option value="">{text}</option> })}
                <For
                    each=move || options.get()
                    key=|(value, _)| value.clone()
                    children=move |(value, text)| {
                        let selected_value = value.clone();
                        view! {
                            <option
                                value=value
                                selected=move || field.value.get() == selected_value
                            >
                                {text}
                            </option>
                        }
                    }
                />
            </select>
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, field: Field<bool>) -> impl IntoView {
    view! {
        <label class="label cursor-pointer justify-start gap-3">
            <input
                type="checkbox"
                class="checkbox checkbox-primary checkbox-sm"
                prop:checked=move || field.value.get()
                on:change=move |ev| field.set.run(event_target_checked(&ev))
            />
            <span class="label-text">{label}</span>
        </label>
    }
}

/// 弹窗底部的错误提示与按钮
#[component]
pub fn FormFooter(
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into, default = "Save".to_string())] submit_label: String,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2 mt-4">
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
        <div class="modal-action">
            <button type="button" class="btn" on:click=move |_| on_cancel.run(())>
                "Cancel"
            </button>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                <Show when=move || saving.get()>
                    <span class="loading loading-spinner loading-sm"></span>
                </Show>
                {submit_label}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text_keeps_inner_spaces() {
        assert_eq!(optional_text("   ".to_string()), None);
        assert_eq!(optional_text("Main St ".to_string()), Some("Main St ".to_string()));
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(number_text(None), "");
        assert_eq!(number_text(Some(3.0)), "3");
    }
}
