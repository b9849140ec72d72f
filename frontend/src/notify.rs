use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::TOAST_TIMEOUT_MS;
use crate::error::ApiError;

const MAX_VISIBLE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "bg-emerald-600",
            NoticeKind::Error => "bg-red-600",
            NoticeKind::Info => "bg-[#173E63]",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

pub enum ToastAction {
    Push(Notice),
    Dismiss(u64),
}

/// Visible notices, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    pub notices: Vec<Notice>,
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut notices = self.notices.clone();
        match action {
            ToastAction::Push(notice) => {
                notices.push(notice);
                if notices.len() > MAX_VISIBLE {
                    let overflow = notices.len() - MAX_VISIBLE;
                    notices.drain(..overflow);
                }
            }
            ToastAction::Dismiss(id) => notices.retain(|notice| notice.id != id),
        }
        Rc::new(ToastQueue { notices })
    }
}

/// Pushes transient notices that dismiss themselves after a few seconds.
#[derive(Clone)]
pub struct Toaster {
    queue: UseReducerHandle<ToastQueue>,
    next_id: Rc<Cell<u64>>,
    timeout_ms: u32,
}

impl PartialEq for Toaster {
    fn eq(&self, other: &Self) -> bool {
        self.queue == other.queue && Rc::ptr_eq(&self.next_id, &other.next_id)
    }
}

impl Toaster {
    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    /// Reports a failed operation: the server's message when it sent one,
    /// otherwise `generic`.
    pub fn failure(&self, err: &ApiError, generic: &str) {
        log::warn!("{}: {}", generic, err);
        self.error(err.user_message(generic));
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.dispatch(ToastAction::Dismiss(id));
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.queue.notices.clone()
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        log::info!("notice {:?}: {}", kind, text);
        self.queue.dispatch(ToastAction::Push(Notice { id, kind, text }));

        let queue = self.queue.clone();
        Timeout::new(self.timeout_ms, move || queue.dispatch(ToastAction::Dismiss(id))).forget();
    }
}

#[hook]
pub fn use_toaster_state(timeout_ms: u32) -> Toaster {
    let queue = use_reducer(ToastQueue::default);
    let next_id = use_memo(|_| Cell::new(0u64), ());
    Toaster {
        queue,
        next_id,
        timeout_ms,
    }
}

/// The application's toaster, or a private one outside the app root.
#[hook]
pub fn use_toaster() -> Toaster {
    let fallback = use_toaster_state(TOAST_TIMEOUT_MS);
    use_context::<Toaster>().unwrap_or(fallback)
}

#[function_component(ToastHost)]
pub fn toast_host() -> Html {
    let toaster = use_toaster();

    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80">
            { for toaster.notices().into_iter().map(|notice| {
                let on_close = {
                    let toaster = toaster.clone();
                    let id = notice.id;
                    Callback::from(move |_: MouseEvent| toaster.dismiss(id))
                };
                html! {
                    <div key={notice.id} class={classes!("flex", "items-start", "justify-between", "gap-3", "px-4", "py-3", "rounded-xl", "shadow-lg", "text-sm", "text-white", notice.kind.css_class())}>
                        <span>{ notice.text }</span>
                        <button class="opacity-70 hover:opacity-100" aria-label="Dismiss" onclick={on_close}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
