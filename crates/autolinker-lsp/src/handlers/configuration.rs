use crate::config::LspSettings;
use crate::state::GlobalState;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Settings section the client sends our configuration under
pub const SETTINGS_SECTION: &str = "autolinker";

pub async fn handle_did_change_configuration(
    client: &Client,
    state: &GlobalState,
    params: DidChangeConfigurationParams,
) {
    client
        .log_message(MessageType::INFO, "⚙️ Configuration changed")
        .await;

    let serde_json::Value::Object(map) = params.settings else {
        return;
    };
    let Some(section) = map.get(SETTINGS_SECTION) else {
        return;
    };

    apply_settings(client, state, section.clone()).await;
}

/// Parse and store settings coming from the client (initializationOptions or
/// didChangeConfiguration). Invalid settings leave the current ones in place.
pub async fn apply_settings(client: &Client, state: &GlobalState, value: serde_json::Value) {
    match LspSettings::from_client_value(value) {
        Ok((new_settings, adjusted)) => {
            if adjusted {
                client
                    .log_message(
                        MessageType::WARNING,
                        format!(
                            "Suggestion settings out of range, using {:?}",
                            new_settings.suggest
                        ),
                    )
                    .await;
            }

            log::set_max_level(new_settings.log_level.into());

            // Sessions ranked under the old limits are not reused
            state.close_session().await;
            *state.config.write().await = new_settings;

            client
                .log_message(MessageType::INFO, "✅ LSP settings updated successfully")
                .await;
        }
        Err(e) => {
            client
                .log_message(
                    MessageType::ERROR,
                    format!("❌ Failed to parse updated settings: {}", e),
                )
                .await;
        }
    }
}
