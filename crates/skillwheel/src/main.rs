use relm4::prelude::*;
use skillwheel::config;
use skillwheel::gui::app::AppModel;
use skillwheel::gui::wheel::State;
use skillwheel::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let skills = State::init_skills(&config);
    log::info!("Loaded {} skill(s)", skills.len());
    let state = State::new(skills, &config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.skillwheel");

    app.run::<AppModel>((state, rx));
}
