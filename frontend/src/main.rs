use moneybank_frontend::components::App;
use moneybank_frontend::config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(AppConfig::from_env().log_level));
    log::info!("MoneyBank starting...");

    yew::Renderer::<App>::new().render();
}
