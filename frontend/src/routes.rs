use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::models::{Id, Transaction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Otp,
    Register,
    Dashboard,
    Transactions,
    AddTransaction,
    EditTransaction(Id),
    Categories,
    Profile,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Login,
            "/otp" => Route::Otp,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/transactions" => Route::Transactions,
            "/add-transaction" => Route::AddTransaction,
            "/categories" => Route::Categories,
            "/profile" => Route::Profile,
            other => other
                .strip_prefix("/edit-transaction/")
                .and_then(|id| id.parse().ok())
                .map(Route::EditTransaction)
                .unwrap_or(Route::NotFound),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login | Route::NotFound => "/".to_string(),
            Route::Otp => "/otp".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Transactions => "/transactions".to_string(),
            Route::AddTransaction => "/add-transaction".to_string(),
            Route::EditTransaction(id) => format!("/edit-transaction/{}", id),
            Route::Categories => "/categories".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::Transactions
                | Route::AddTransaction
                | Route::EditTransaction(_)
                | Route::Categories
                | Route::Profile
        )
    }
}

/// Data carried along with a navigation. Lives only in memory, so a reload
/// or a direct visit arrives without it.
#[derive(Clone, Debug, PartialEq)]
pub enum NavState {
    Otp { email: String },
    EditTransaction(Transaction),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub route: Route,
    pub state: Option<NavState>,
}

impl Location {
    pub fn new(route: Route) -> Self {
        Self { route, state: None }
    }

    pub fn current() -> Self {
        let path = web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string());
        Self::new(Route::from_path(&path))
    }

    pub fn otp_email(&self) -> Option<&str> {
        match &self.state {
            Some(NavState::Otp { email }) => Some(email),
            _ => None,
        }
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        match &self.state {
            Some(NavState::EditTransaction(tx)) => Some(tx),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// Moves between views and keeps the address bar in step.
#[derive(Clone, PartialEq)]
pub struct Navigator {
    location: UseStateHandle<Location>,
}

impl Navigator {
    pub fn new(location: UseStateHandle<Location>) -> Self {
        Self { location }
    }

    pub fn location(&self) -> Location {
        (*self.location).clone()
    }

    pub fn push(&self, route: Route) {
        self.go(Location::new(route), HistoryMode::Push);
    }

    pub fn push_with_state(&self, route: Route, state: NavState) {
        self.go(
            Location {
                route,
                state: Some(state),
            },
            HistoryMode::Push,
        );
    }

    pub fn push_location(&self, location: Location) {
        self.go(location, HistoryMode::Push);
    }

    /// Replaces the current history entry so back-navigation skips it.
    pub fn replace(&self, route: Route) {
        self.go(Location::new(route), HistoryMode::Replace);
    }

    pub fn back(&self) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(err) = history.back() {
                log::warn!("history.back failed: {:?}", err);
            }
        }
    }

    /// Follows a browser back/forward step; transient state does not survive it.
    pub fn sync_from_address_bar(&self) {
        self.location.set(Location::current());
    }

    fn go(&self, location: Location, mode: HistoryMode) {
        let path = location.route.path();
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let result = match mode {
                HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&path)),
                HistoryMode::Replace => {
                    history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
                }
            };
            if let Err(err) = result {
                log::warn!("could not update history for {}: {:?}", path, err);
            }
        }
        log::debug!("navigate {:?} -> {}", mode, path);
        self.location.set(location);
    }
}

#[hook]
pub fn use_navigator() -> Option<Navigator> {
    use_context::<Navigator>()
}
