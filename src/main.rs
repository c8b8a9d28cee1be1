use std::sync::Arc;

use chorale::{
    app::App,
    http::{HttpApi, MusicApi},
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    setup()?;

    let base_url = std::env::var("CHORALE_API_URL")
        .unwrap_or_else(|_| "http://localhost:4000/api".to_string());
    let api: Arc<dyn MusicApi> = Arc::new(HttpApi::new(base_url));

    let mut app = App::new(api)?;
    app.run().await
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}
