mod app;
mod categories;
mod dashboard;
mod layout;
mod login;
mod otp;
mod profile;
mod register;
mod shared;
mod transaction_form;
mod transactions;

pub use app::App;
