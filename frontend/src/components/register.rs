use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;

use super::shared::{bind, INPUT_CLASS};
use crate::error::GENERIC_FAILURE;
use crate::forms::validate_registration;
use crate::hooks::use_api;
use crate::models::RegisterForm;
use crate::notify::use_toaster;
use crate::routes::{use_navigator, Route};

fn is_image(file: &File) -> bool {
    file.type_().starts_with("image/")
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toaster();

    let name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let image = use_state(String::new);
    let uploading = use_state(|| false);
    let dragging = use_state(|| false);
    let loading = use_state(|| false);
    let file_input = use_node_ref();

    let upload = {
        let api = api.clone();
        let toaster = toaster.clone();
        let image = image.clone();
        let uploading = uploading.clone();
        Callback::from(move |file: File| {
            if !is_image(&file) {
                toaster.error("Please drop an image file");
                return;
            }
            let api = api.clone();
            let toaster = toaster.clone();
            let image = image.clone();
            let uploading = uploading.clone();
            uploading.set(true);
            spawn_local(async move {
                match api.upload_image(file).await {
                    Ok(filename) => {
                        log::info!("avatar uploaded as {}", filename);
                        image.set(filename);
                        toaster.success("Image uploaded!");
                    }
                    Err(err) => {
                        image.set(String::new());
                        toaster.failure(&err, "Upload failed");
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_file = {
        let upload = upload.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                upload.emit(file);
            }
        })
    };

    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };

    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
        })
    };

    let on_drop = {
        let dragging = dragging.clone();
        let toaster = toaster.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            match e
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0))
            {
                Some(file) => upload.emit(file),
                None => toaster.error("Please drop an image file"),
            }
        })
    };

    let on_remove = {
        let image = image.clone();
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            image.set(String::new());
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.set_value("");
            }
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

    let on_submit = {
        let api = api.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let image = image.clone();
        let loading = loading.clone();
        let navigator = navigator.clone();
        let toaster = toaster.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            let form = RegisterForm {
                name: (*name).clone(),
                email: (*email).clone(),
                phone: (*phone).clone(),
                password: (*password).clone(),
                confirm_password: (*confirm_password).clone(),
                image: (*image).clone(),
            };
            if let Err(err) = validate_registration(&form) {
                toaster.failure(&err, GENERIC_FAILURE);
                return;
            }

            let api = api.clone();
            let navigator = navigator.clone();
            let toaster = toaster.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                match api.register(&form).await {
                    Ok(reply) => {
                        toaster.success(reply.message.unwrap_or_else(|| "Registered".to_string()));
                        if let Some(navigator) = &navigator {
                            navigator.push(Route::Login);
                        }
                    }
                    Err(err) => toaster.failure(&err, GENERIC_FAILURE),
                }
                loading.set(false);
            });
        })
    };

    let to_login = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(Route::Login);
            }
        })
    };

    let preview = api.image_url(&image);
    let drop_class = if *dragging {
        "border-[#10a37f] bg-[#e8f5f0]"
    } else {
        "border-slate-300"
    };

    let text_field = |label: &'static str, kind: &'static str, handle: &UseStateHandle<String>| {
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-slate-700">{ label }</label>
                <input type={kind} class={INPUT_CLASS} value={(**handle).clone()} oninput={bind(handle)} />
            </div>
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#e8f5f0] p-6">
            <div class="w-full max-w-md bg-white border border-slate-200 rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h2 class="text-2xl font-bold text-slate-800">{"Create Account"}</h2>
                    <p class="text-sm text-slate-500 mt-2">{"Fill the details to get started"}</p>
                </div>

                <div
                    class={classes!("mx-auto", "mb-6", "w-28", "h-28", "rounded-full", "border-2", "border-dashed", "flex", "items-center", "justify-center", "overflow-hidden", "cursor-pointer", drop_class)}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                    onclick={on_pick}
                >
                    {
                        match preview {
                            Some(src) => html! { <img src={src} alt="Avatar" class="w-full h-full object-cover" /> },
                            None if *uploading => html! { <span class="text-xs text-slate-500">{"Uploading..."}</span> },
                            None => html! { <span class="text-xs text-slate-500 text-center px-2">{"Drop or click to add photo"}</span> },
                        }
                    }
                </div>
                <input ref={file_input} type="file" accept="image/*" class="hidden" onchange={on_file} />
                if !image.is_empty() {
                    <div class="text-center -mt-4 mb-4">
                        <button type="button" class="text-xs text-red-500" onclick={on_remove}>{"Remove photo"}</button>
                    </div>
                }

                <form class="space-y-4" onsubmit={on_submit}>
                    { text_field("Full Name", "text", &name) }
                    { text_field("Email", "email", &email) }
                    { text_field("Phone", "tel", &phone) }
                    { text_field("Password", "password", &password) }
                    { text_field("Confirm Password", "password", &confirm_password) }
                    <button type="submit" class="w-full bg-[#10a37f] text-white py-2 rounded-lg font-semibold disabled:opacity-50" disabled={*loading || *uploading}>
                        { if *loading { "Creating account..." } else { "Register" } }
                    </button>
                </form>

                <p class="mt-6 text-center text-sm text-slate-500">
                    {"Already have an account?"}
                    <button class="ml-2 text-[#10a37f] font-semibold" onclick={to_login}>{"Login"}</button>
                </p>
            </div>
        </div>
    }
}
