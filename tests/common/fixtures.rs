//! Scripts and configs for playback tests

use std::path::PathBuf;

use advisor::{Config, Illustration, Message, Script, Step};

/// Greeting step, then one question with a thinking answer
pub fn two_step_script() -> Script {
    Script::new(vec![
        Step::new(vec![Message::assistant("Hi")]),
        Step::new(vec![Message::user("Q"), Message::assistant("A")]).with_thinking(),
    ])
}

/// Three steps, the last one swapping the illustration
pub fn illustrated_script() -> Script {
    Script::new(vec![
        Step::new(vec![Message::assistant("Welcome")]),
        Step::new(vec![Message::user("How busy?"), Message::assistant("Very.")]).with_thinking(),
        Step::new(vec![Message::user("Anomalies?"), Message::assistant("Two.")])
            .with_thinking()
            .with_illustration(Illustration::Anomalies),
    ])
}

/// Config whose images never resolve, so the dashboard is drawn
pub fn dashboard_config() -> Config {
    Config::default()
        .with_pa_image(PathBuf::from("/nonexistent/advisor/pa_example.png"))
        .with_assets_dir(PathBuf::from("/nonexistent/advisor"))
}

pub fn fast_config() -> Config {
    dashboard_config().with_fast_forward()
}
