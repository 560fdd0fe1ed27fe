use crate::commands::GlobalArgs;
use crate::output;
use crate::session::load_config;
use anyhow::Result;
use board::BannerClient;

pub async fn run(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let message = match BannerClient::from_config(&config.banner)? {
        Some(client) => client.fetch().await?,
        None => {
            if !global.json {
                output::info("No announcement configured");
            }
            None
        }
    };

    if global.json {
        return output::json(&serde_json::json!({ "announcement": message }));
    }
    if let Some(message) = message {
        output::subheader(&message);
    }
    Ok(())
}
