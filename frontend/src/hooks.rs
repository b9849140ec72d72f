use std::rc::Rc;

use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::{Session, SessionContext};

#[derive(Clone)]
pub struct SessionHandle {
    pub store: SessionContext,
    pub state: Session,
}

/// Reads the session and re-renders the calling component whenever it
/// changes. The subscription is dropped when the component unmounts.
#[hook]
pub fn use_session() -> SessionHandle {
    let provided = use_context::<SessionContext>();
    let fallback = use_memo(
        |provided: &bool| standalone(*provided, SessionContext::restore),
        provided.is_some(),
    );
    let store = provided
        .or_else(|| (*fallback).clone())
        .unwrap_or_else(SessionContext::restore);
    let update = use_force_update();

    use_effect_with_deps(
        move |store: &SessionContext| {
            let id = store.subscribe(move |_| update.force_update());
            let store = store.clone();
            move || store.unsubscribe(id)
        },
        store.clone(),
    );

    let state = store.snapshot();
    SessionHandle { store, state }
}

/// Only builds a store of its own when no provider is mounted above.
fn standalone<T>(provided: bool, build: impl FnOnce() -> T) -> Option<T> {
    if provided {
        return None;
    }
    log::warn!("no session provider mounted; reading the session directly");
    Some(build())
}

#[hook]
pub fn use_config() -> Rc<AppConfig> {
    use_memo(|_| AppConfig::from_env(), ())
}

#[hook]
pub fn use_api() -> Rc<ApiClient> {
    use_memo(|_| ApiClient::from_config(&AppConfig::from_env()), ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn provider_means_no_second_store() {
        let built = Cell::new(0);
        let build = || {
            built.set(built.get() + 1);
            built.get()
        };

        assert_eq!(standalone(true, build), None);
        assert_eq!(built.get(), 0);
        assert_eq!(standalone(false, build), Some(1));
        assert_eq!(built.get(), 1);
    }
}
