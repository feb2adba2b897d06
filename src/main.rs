use campaign_dashboard::{Config, build_rocket};
use rocket::{Build, Rocket};

#[rocket::launch]
fn rocket() -> Rocket<Build> {
    dotenvy::dotenv().ok();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => panic!("Failed to load configuration: {}", e),
    };

    build_rocket(config)
}
