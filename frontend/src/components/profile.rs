use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::shared::{input_value, page_shell, INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::api::{ApiClient, Transport};
use crate::error::{ApiError, GENERIC_FAILURE};
use crate::forms::ProfileDraft;
use crate::hooks::{use_api, use_session};
use crate::models::{Id, UserPatch, UserUpdate};
use crate::notify::use_toaster;

/// Sends the edited profile. On success returns the server message and the
/// fields to merge into the session.
pub(crate) async fn save_profile<T: Transport>(
    api: &ApiClient<T>,
    id: Id,
    draft: &ProfileDraft,
) -> Result<(Option<String>, UserPatch), ApiError> {
    let (update, patch) = draft.to_update(id)?;
    let reply = api.update_user(&update).await?;
    Ok((reply.message, patch))
}

/// Points the user record at an already uploaded image.
pub(crate) async fn attach_avatar<T: Transport>(
    api: &ApiClient<T>,
    id: Id,
    filename: &str,
) -> Result<UserPatch, ApiError> {
    let update = UserUpdate {
        id,
        image: Some(filename.to_string()),
        ..UserUpdate::default()
    };
    api.update_user(&update).await?;
    Ok(UserPatch::image(filename))
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_session();
    let api = use_api();
    let toaster = use_toaster();

    let user = session.state.user.clone();
    let draft = {
        let user = user.clone();
        use_state(move || user.as_ref().map(ProfileDraft::from_user).unwrap_or_default())
    };
    let editing = use_state(|| false);
    let show_password = use_state(|| false);
    let saving = use_state(|| false);
    let uploading = use_state(|| false);
    let file_input = use_node_ref();

    let Some(user) = user else {
        return html! {};
    };
    let user_id = user.id;

    let on_photo = {
        let api = api.clone();
        let toaster = toaster.clone();
        let store = session.store.clone();
        let uploading = uploading.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let api = api.clone();
            let toaster = toaster.clone();
            let store = store.clone();
            let uploading = uploading.clone();
            uploading.set(true);
            spawn_local(async move {
                match api.upload_image(file).await {
                    Ok(filename) => match attach_avatar(&api, user_id, &filename).await {
                        Ok(patch) => {
                            store.update_user(patch);
                            toaster.success("Profile photo updated!");
                        }
                        Err(err) => toaster.failure(&err, "Failed to update photo"),
                    },
                    Err(err) => toaster.failure(&err, "Upload failed"),
                }
                uploading.set(false);
            });
        })
    };

    let on_pick = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let field = |apply: fn(&mut ProfileDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            apply(&mut next, input_value(&e));
            draft.set(next);
        })
    };

    let start_edit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(ProfileDraft::from_user(&user));
            editing.set(true);
        })
    };

    let cancel_edit = {
        let editing = editing.clone();
        let show_password = show_password.clone();
        let draft = draft.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(ProfileDraft::from_user(&user));
            show_password.set(false);
            editing.set(false);
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    let on_submit = {
        let api = api.clone();
        let toaster = toaster.clone();
        let store = session.store.clone();
        let draft = draft.clone();
        let editing = editing.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let api = api.clone();
            let toaster = toaster.clone();
            let store = store.clone();
            let draft = draft.clone();
            let editing = editing.clone();
            let saving = saving.clone();
            saving.set(true);
            spawn_local(async move {
                match save_profile(&api, user_id, &draft).await {
                    Ok((message, patch)) => {
                        store.update_user(patch);
                        toaster.success(message.unwrap_or_else(|| "Profile updated".to_string()));
                        let mut cleared = (*draft).clone();
                        cleared.password.clear();
                        draft.set(cleared);
                        editing.set(false);
                    }
                    Err(err) => toaster.failure(&err, GENERIC_FAILURE),
                }
                saving.set(false);
            });
        })
    };

    let avatar = user.avatar_url(api.image_base_url());

    let text_field = |label: &'static str,
                      kind: &'static str,
                      placeholder: &'static str,
                      value: &str,
                      oninput: Callback<InputEvent>| {
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-slate-700">{ label }</label>
                <input type={kind} class={INPUT_CLASS} {placeholder} value={value.to_string()}
                    {oninput} disabled={!*editing} />
            </div>
        }
    };

    let header = html! {
        <div class="bg-white rounded-2xl border border-slate-200 p-6 flex items-center gap-6">
            <div class="relative">
                <img src={avatar} alt="Profile" class="w-24 h-24 rounded-full object-cover border-4 border-[#e8f5f0]" />
                <button type="button" title="Change photo" onclick={on_pick} disabled={*uploading}
                    class="absolute bottom-0 right-0 w-8 h-8 rounded-full bg-[#10a37f] text-white text-sm">
                    { if *uploading { "…" } else { "📷" } }
                </button>
                <input ref={file_input} type="file" accept="image/*" class="hidden" onchange={on_photo} />
            </div>
            <div>
                <h1 class="text-2xl font-bold text-slate-800">{ user.display_name().to_string() }</h1>
                <p class="text-slate-500">{ user.email.clone().unwrap_or_default() }</p>
            </div>
        </div>
    };

    let actions = if *editing {
        html! {}
    } else {
        html! { <button class={PRIMARY_BUTTON} onclick={start_edit}>{"✏️ Edit Profile"}</button> }
    };

    page_shell(
        "Profile",
        actions,
        html! {
            <>
                { header }
                <form class="bg-white rounded-2xl border border-slate-200 p-6 space-y-4" onsubmit={on_submit}>
                    <h3 class="font-bold text-slate-800">{"Personal Information"}</h3>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { text_field("Full Name", "text", "Enter your name", &draft.name, field(|d, v| d.name = v)) }
                        { text_field("Email", "email", "Enter your email", &draft.email, field(|d, v| d.email = v)) }
                    </div>
                    { text_field("Phone Number", "tel", "Enter your phone number", &draft.phone, field(|d, v| d.phone = v)) }

                    if *editing {
                        <div class="border-t border-slate-200 pt-4">
                            <button type="button" class="text-sm font-semibold text-[#10a37f]" onclick={toggle_password}>
                                {"🔐 Change Password"}
                            </button>
                            if *show_password {
                                <div class="mt-3">
                                    { text_field("New Password", "password", "Enter new password", &draft.password, field(|d, v| d.password = v)) }
                                    <p class="text-xs text-slate-400 mt-1">{"💡 Leave blank to keep your current password"}</p>
                                </div>
                            }
                        </div>
                        <div class="flex gap-2">
                            <button type="submit" class={PRIMARY_BUTTON} disabled={*saving}>
                                { if *saving { "Saving..." } else { "Save Changes" } }
                            </button>
                            <button type="button" class={SECONDARY_BUTTON} onclick={cancel_edit}>{"Cancel"}</button>
                        </div>
                    }
                </form>
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            password: String::new(),
        }
    }

    #[async_std::test]
    async fn avatar_is_attached_by_id() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": true}));

        let patch = attach_avatar(&api, 7, "me.png").await.unwrap();

        assert_eq!(patch, UserPatch::image("me.png"));
        assert_eq!(
            api.transport().requests()[0].json_body(),
            Some(&json!({"id": 7, "image": "me.png"}))
        );
    }

    #[async_std::test]
    async fn rejected_avatar_leaves_session_alone() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": false}));

        let err = attach_avatar(&api, 7, "me.png").await.unwrap_err();

        assert_eq!(err.user_message("Failed to update photo"), "Failed to update photo");
    }

    #[async_std::test]
    async fn save_returns_the_changed_fields() {
        let api = MockTransport::client();
        api.transport()
            .reply_json(json!({"success": true, "message": "Profile updated"}));

        let (message, patch) = save_profile(&api, 7, &draft()).await.unwrap();

        assert_eq!(message.as_deref(), Some("Profile updated"));
        assert_eq!(patch.name.as_deref(), Some("Asha"));
        assert_eq!(patch.phone.as_deref(), Some("9876543210"));
        assert_eq!(
            api.transport().requests()[0].json_body(),
            Some(&json!({"id": 7, "name": "Asha", "email": "asha@example.com", "phone": "9876543210"}))
        );
    }

    #[async_std::test]
    async fn invalid_draft_is_not_sent() {
        let api = MockTransport::client();
        let mut bad = draft();
        bad.name = " ".into();

        let err = save_profile(&api, 7, &bad).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(api.transport().request_count(), 0);
    }
}
