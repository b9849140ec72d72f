use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::shared::{
    bind, confirm, empty_state, input_value, loading_block, page_shell, INPUT_CLASS,
    PRIMARY_BUTTON, SECONDARY_BUTTON,
};
use crate::api::{ApiClient, Transport};
use crate::category_art::category_icon;
use crate::error::{ApiError, GENERIC_FAILURE};
use crate::hooks::use_api;
use crate::models::{Category, Id};
use crate::notify::{use_toaster, Toaster};

pub(crate) enum CategoryChange {
    Create(String),
    Rename(Category),
    Delete(Id),
}

/// Applies `change`, then fetches the fresh list. Nothing is reloaded when the
/// change fails, so the caller keeps showing what it had.
pub(crate) async fn apply_change<T: Transport>(
    api: &ApiClient<T>,
    change: CategoryChange,
) -> Result<(Option<String>, Vec<Category>), ApiError> {
    let reply = match change {
        CategoryChange::Create(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(ApiError::validation("Enter a category name"));
            }
            api.create_category(name).await?
        }
        CategoryChange::Rename(category) => {
            if category.name.trim().is_empty() {
                return Err(ApiError::validation("Enter a category name"));
            }
            api.update_category(&category).await?
        }
        CategoryChange::Delete(id) => api.delete_category(id).await?,
    };
    let list = api.get_categories(None).await?;
    Ok((reply.message, list))
}

fn run_change(
    api: std::rc::Rc<ApiClient>,
    toaster: Toaster,
    categories: UseStateHandle<Vec<Category>>,
    change: CategoryChange,
    on_done: impl FnOnce(bool) + 'static,
) {
    spawn_local(async move {
        match apply_change(&api, change).await {
            Ok((message, list)) => {
                toaster.success(message.unwrap_or_else(|| "Done".to_string()));
                categories.set(list);
                on_done(true);
            }
            Err(err) => {
                toaster.failure(&err, GENERIC_FAILURE);
                on_done(false);
            }
        }
    });
}

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let api = use_api();
    let toaster = use_toaster();

    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let new_name = use_state(String::new);
    let adding = use_state(|| false);
    let editing = use_state(|| None::<Category>);

    {
        let api = api.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.get_categories(None).await {
                        Ok(list) => categories.set(list),
                        Err(err) => toaster.failure(&err, "Failed to fetch categories"),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let on_add = {
        let api = api.clone();
        let toaster = toaster.clone();
        let categories = categories.clone();
        let new_name = new_name.clone();
        let adding = adding.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *adding {
                return;
            }
            adding.set(true);
            let new_name = new_name.clone();
            let adding = adding.clone();
            run_change(
                api.clone(),
                toaster.clone(),
                categories.clone(),
                CategoryChange::Create((*new_name).clone()),
                move |ok| {
                    if ok {
                        new_name.set(String::new());
                    }
                    adding.set(false);
                },
            );
        })
    };

    let on_save = {
        let api = api.clone();
        let toaster = toaster.clone();
        let categories = categories.clone();
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(category) = (*editing).clone() {
                let editing = editing.clone();
                run_change(
                    api.clone(),
                    toaster.clone(),
                    categories.clone(),
                    CategoryChange::Rename(category),
                    move |ok| {
                        if ok {
                            editing.set(None);
                        }
                    },
                );
            }
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    let on_edit_name = {
        let editing = editing.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(mut category) = (*editing).clone() {
                category.name = input_value(&e);
                editing.set(Some(category));
            }
        })
    };

    if *loading {
        return loading_block("Loading categories...");
    }

    let add_form = html! {
        <div class="bg-white rounded-2xl border border-slate-200 p-6">
            <h3 class="font-bold text-slate-800 mb-3">{"Add New Category"}</h3>
            <form class="flex flex-col md:flex-row gap-3" onsubmit={on_add}>
                <input type="text" class={INPUT_CLASS} placeholder="Enter category name (e.g., Food, Transport)"
                    value={(*new_name).clone()} oninput={bind(&new_name)} />
                <button type="submit" class={PRIMARY_BUTTON} disabled={*adding}>
                    { if *adding { "Adding..." } else { "Add Category" } }
                </button>
            </form>
        </div>
    };

    let grid = if categories.is_empty() {
        empty_state(
            "📁",
            "No categories yet",
            "Create your first category to organize transactions",
        )
    } else {
        html! {
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                { for categories.iter().map(|category| {
                    let being_edited = (*editing).as_ref().filter(|edit| edit.id == category.id);
                    let body = match being_edited {
                        Some(edit) => html! {
                            <div class="flex gap-2 w-full">
                                <input type="text" class={INPUT_CLASS} value={edit.name.clone()} oninput={on_edit_name.clone()} />
                                <button class={PRIMARY_BUTTON} onclick={on_save.clone()}>{"Save"}</button>
                                <button class={SECONDARY_BUTTON} onclick={on_cancel.clone()}>{"Cancel"}</button>
                            </div>
                        },
                        None => {
                            let start_edit = {
                                let editing = editing.clone();
                                let category = category.clone();
                                Callback::from(move |_: MouseEvent| editing.set(Some(category.clone())))
                            };
                            let delete = {
                                let api = api.clone();
                                let toaster = toaster.clone();
                                let categories = categories.clone();
                                let id = category.id;
                                Callback::from(move |_: MouseEvent| {
                                    if confirm("Are you sure you want to delete this category?") {
                                        run_change(
                                            api.clone(),
                                            toaster.clone(),
                                            categories.clone(),
                                            CategoryChange::Delete(id),
                                            |_| (),
                                        );
                                    }
                                })
                            };
                            html! {
                                <>
                                    <div class="flex items-center gap-3">
                                        <div class="w-12 h-12 rounded-full bg-[#e8f5f0] flex items-center justify-center text-2xl">
                                            { category_icon(&category.name) }
                                        </div>
                                        <div>
                                            <h4 class="font-semibold text-slate-800">{ category.name.clone() }</h4>
                                            <p class="text-xs text-slate-400">{ format!("ID: #{}", category.id) }</p>
                                        </div>
                                    </div>
                                    <div class="flex gap-2">
                                        <button title="Edit" onclick={start_edit}>{"✏️"}</button>
                                        <button title="Delete" onclick={delete}>{"🗑️"}</button>
                                    </div>
                                </>
                            }
                        }
                    };
                    html! {
                        <div key={category.id} class="bg-white rounded-xl border border-slate-200 p-4 flex items-center justify-between">
                            { body }
                        </div>
                    }
                }) }
            </div>
        }
    };

    page_shell(
        "Categories",
        html! {},
        html! {
            <>
                { add_form }
                { grid }
            </>
        },
    )
}
