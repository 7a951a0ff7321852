/// Session server that handles JSON-RPC communication
///
/// This module implements the line-oriented session loop that:
/// 1. Reads JSON-RPC requests, one per line
/// 2. Applies each one to the companion as a store mutation or navigation intent
/// 3. Writes one response per request, plus `mood/advice` notifications
///    whenever fetched advice is applied

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::domain::{CustomSound, DomainError, Profile, RitualDraft, Settings};
use crate::navigation::NavIntent;
use crate::session::protocol::*;
use crate::storage::KeyValueStore;
use crate::store::Applied;
use crate::{AdviceResolution, Companion, CompanionError};

/// Why a method call failed
struct MethodError {
    code: i32,
    message: String,
}

impl MethodError {
    fn invalid_params(message: String) -> Self {
        Self {
            code: error_codes::INVALID_PARAMS,
            message,
        }
    }

    fn not_found(method: &str) -> Self {
        Self {
            code: error_codes::METHOD_NOT_FOUND,
            message: format!("Method '{}' not found", method),
        }
    }
}

impl From<DomainError> for MethodError {
    fn from(err: DomainError) -> Self {
        Self {
            code: error_codes::VALIDATION_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MethodError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            code: error_codes::INTERNAL_ERROR,
            message: format!("Failed to encode result: {}", err),
        }
    }
}

type MethodResult = Result<Value, MethodError>;

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, MethodError> {
    let params =
        params.ok_or_else(|| MethodError::invalid_params("Missing parameters".to_string()))?;
    serde_json::from_value(params)
        .map_err(|e| MethodError::invalid_params(format!("Invalid parameters: {}", e)))
}

/// Session server driving one companion
pub struct SessionServer<K: KeyValueStore> {
    companion: Companion<K>,
}

impl<K: KeyValueStore> SessionServer<K> {
    pub fn new(companion: Companion<K>) -> Self {
        Self { companion }
    }

    pub fn companion(&self) -> &Companion<K> {
        &self.companion
    }

    pub fn companion_mut(&mut self) -> &mut Companion<K> {
        &mut self.companion
    }

    /// Run the session over stdin/stdout
    pub async fn run(&mut self) -> Result<(), CompanionError> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }

    /// Run the session over any line reader and writer until input ends
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), CompanionError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Session started, waiting for JSON-RPC requests...");
        self.companion.resume_pending_advice();

        let mut lines = reader.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if let Some(response) = self.process_line(&line) {
                            write_message(&mut writer, &response).await?;
                        }
                    }
                    Ok(None) => {
                        info!("Session shutting down (input closed)");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read request: {}", e);
                        break;
                    }
                },
                Some(resolution) = self.companion.next_advice() => {
                    if let Some(notification) = self.apply_advice(resolution) {
                        write_message(&mut writer, &notification).await?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    pub fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Handle a JSON-RPC request
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let JsonRpcRequest { jsonrpc, id, method, params } = request;

        if jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", jsonrpc),
                None,
            );
        }

        let result = match method.as_str() {
            "state/get" => self.get_state(),
            "stats/get" => serde_json::to_value(self.companion.stats()).map_err(MethodError::from),
            "task/add" => self.add_task(params),
            "task/toggle" => self.toggle_task(params),
            "ritual/add" => self.add_ritual(params),
            "ritual/toggle" => self.toggle_ritual(params),
            "journal/save" => self.save_journal(params),
            "mood/set" => self.set_mood(params),
            "settings/update" => self.update_settings(params),
            "profile/update" => self.update_profile(params),
            "sound/add" => self.add_sound(params),
            "sound/remove" => self.remove_sound(params),
            "soundscape/resolve" => {
                serde_json::to_value(self.companion.soundscape()).map_err(MethodError::from)
            }
            "navigate" => self.navigate(params),
            _ => Err(MethodError::not_found(&method)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                debug!("{} failed: {}", method, e.message);
                JsonRpcResponse::error(id, e.code, e.message, None)
            }
        }
    }

    /// Apply fetched advice and build the notification announcing it
    ///
    /// Returns `None` when the advice was stale and dropped.
    pub fn apply_advice(&mut self, resolution: AdviceResolution) -> Option<JsonRpcNotification> {
        let ticket = resolution.ticket;
        let advice = resolution.advice.clone();

        let applied = self.companion.apply_advice(resolution);
        if !applied.value {
            return None;
        }
        if let Some(e) = &applied.warning {
            warn!("Advice shown but not persisted: {}", e);
        }

        Some(JsonRpcNotification::new(
            ADVICE_NOTIFICATION,
            json!({
                "mood": ticket.mood,
                "generation": ticket.generation,
                "advice": advice,
                "persisted": applied.is_durable(),
            }),
        ))
    }

    fn mutation<T: Serialize>(&self, applied: Applied<T>) -> MethodResult {
        Ok(serde_json::to_value(MutationResult::new(applied, self.companion.screen()))?)
    }

    fn get_state(&self) -> MethodResult {
        Ok(json!({
            "state": self.companion.state(),
            "view": ScreenView::from(self.companion.screen()),
        }))
    }

    fn add_task(&mut self, params: Option<Value>) -> MethodResult {
        let params: TextParams = parse_params(params)?;
        let applied = self.companion.add_task(params.text)?;
        self.mutation(applied)
    }

    fn toggle_task(&mut self, params: Option<Value>) -> MethodResult {
        let params: TaskIdParams = parse_params(params)?;
        let applied = self.companion.toggle_task(&params.id);
        self.mutation(applied)
    }

    fn add_ritual(&mut self, params: Option<Value>) -> MethodResult {
        let draft: RitualDraft = parse_params(params)?;
        let applied = self.companion.add_ritual(draft);
        self.mutation(applied)
    }

    fn toggle_ritual(&mut self, params: Option<Value>) -> MethodResult {
        let params: RitualIdParams = parse_params(params)?;
        let applied = self.companion.toggle_ritual(&params.id);
        self.mutation(applied)
    }

    fn save_journal(&mut self, params: Option<Value>) -> MethodResult {
        let params: ContentParams = parse_params(params)?;
        let applied = self.companion.save_journal(params.content)?;
        self.mutation(applied)
    }

    fn set_mood(&mut self, params: Option<Value>) -> MethodResult {
        let params: MoodParams = parse_params(params)?;
        let applied = self.companion.set_mood(params.mood);
        self.mutation(applied)
    }

    fn update_settings(&mut self, params: Option<Value>) -> MethodResult {
        let settings: Settings = parse_params(params)?;
        let applied = self.companion.update_settings(settings);
        self.mutation(applied)
    }

    fn update_profile(&mut self, params: Option<Value>) -> MethodResult {
        let params: ProfileParams = parse_params(params)?;
        let profile = Profile {
            name: params.name,
            avatar: params.avatar,
            join_date: self.companion.state().profile.join_date,
        };
        let applied = self.companion.update_profile(profile);
        self.mutation(applied)
    }

    fn add_sound(&mut self, params: Option<Value>) -> MethodResult {
        let params: SoundParams = parse_params(params)?;
        let sound = match (params.file_name, params.name) {
            (_, Some(name)) => CustomSound::new(name, params.data)?,
            (Some(file_name), None) => CustomSound::from_upload(&file_name, params.data)?,
            (None, None) => {
                return Err(MethodError::invalid_params(
                    "Either name or fileName is required".to_string(),
                ))
            }
        };
        let applied = self.companion.add_custom_sound(sound)?;
        self.mutation(applied)
    }

    fn remove_sound(&mut self, params: Option<Value>) -> MethodResult {
        let params: SoundIdParams = parse_params(params)?;
        let applied = self.companion.remove_custom_sound(&params.id);
        self.mutation(applied)
    }

    fn navigate(&mut self, params: Option<Value>) -> MethodResult {
        let intent: NavIntent = parse_params(params)?;
        let screen = self.companion.navigate(intent);
        Ok(serde_json::to_value(ScreenView::from(screen))?)
    }
}

async fn write_message<W, M>(writer: &mut W, message: &M) -> Result<(), CompanionError>
where
    W: AsyncWrite + Unpin,
    M: Serialize,
{
    let encoded = serde_json::to_string(message)?;

    writer.write_all(encoded.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    debug!("Sent: {}", encoded);
    Ok(())
}
