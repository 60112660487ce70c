/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the MCP server that:
/// 1. Reads JSON-RPC requests line by line
/// 2. Dispatches tool calls to the planner tools
/// 3. Writes one JSON-RPC response line per request

use chrono::{Local, NaiveDate};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{PlannerServer, ServerError};

/// Today's date on the local wall clock
fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// MCP server that handles communication with the client
pub struct McpServer {
    planner: PlannerServer,
    /// Whether the client sent its initialized notification
    initialized: bool,
    /// Source of "today" for every tool call
    clock: fn() -> NaiveDate,
}

impl McpServer {
    /// Create a new MCP server reading today's date from the local clock
    pub fn new(planner: PlannerServer) -> Self {
        Self {
            planner,
            initialized: false,
            clock: local_today,
        }
    }

    /// Replace the clock (tests pin "today" with this)
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until it is closed
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.process_line(&line) {
                let response_str = serde_json::to_string(&response)?;

                writer.write_all(response_str.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;

                debug!("Sent response: {}", response_str);
            }
        }

        info!("MCP server shutting down (input closed)");
        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
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

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                    None,
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle a JSON-RPC request that expects a response
    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Planner MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = vec![
            definition::<tools::CreateHabitParams>(
                "habit_create",
                "Create a new habit with an optional icon, color and weekly target",
            ),
            definition::<tools::HabitIdParams>(
                "habit_delete",
                "Delete a habit and its completion history",
            ),
            definition::<tools::ToggleHabitParams>(
                "habit_toggle",
                "Mark a habit done for a day (default today), or undo it if already done",
            ),
            definition::<tools::ListHabitsParams>(
                "habit_list",
                "List habits with their completion over the last 7 days",
            ),
            definition::<tools::AddTaskParams>("task_add", "Add a task to the to-do list"),
            definition::<tools::TaskIdParams>("task_toggle", "Mark a task completed or reopen it"),
            definition::<tools::UpdateTaskParams>(
                "task_update",
                "Change a task's title, priority or due date",
            ),
            definition::<tools::TaskIdParams>("task_delete", "Delete a task"),
            definition::<tools::ListTasksParams>("task_list", "List all tasks, newest first"),
            definition::<tools::StatsSummaryParams>(
                "stats_summary",
                "Task completion rate, habit completions in the last 7 days and the current streak",
            ),
        ];

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match self.call_tool(&tool_params.name, tool_params.arguments) {
            Some(result) => result,
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Unknown tool: {}", tool_params.name),
                    None,
                );
            }
        };

        to_response(id, &result)
    }

    /// Run a tool by name; `None` when no tool has that name
    fn call_tool(&self, name: &str, args: Map<String, Value>) -> Option<ToolCallResult> {
        let storage = self.planner.storage();
        let today = (self.clock)();
        debug!("Calling tool {} (today is {})", name, today);

        let result = match name {
            "habit_create" => respond(parse_args(args).and_then(|p| tools::create_habit(storage, p))),
            "habit_delete" => respond(parse_args(args).and_then(|p| tools::delete_habit(storage, p))),
            "habit_toggle" => respond(parse_args(args).and_then(|p| tools::toggle_habit(storage, p, today))),
            "habit_list" => respond(parse_args(args).and_then(|p| tools::list_habits(storage, p, today))),
            "task_add" => respond(parse_args(args).and_then(|p| tools::add_task(storage, p))),
            "task_toggle" => respond(parse_args(args).and_then(|p| tools::toggle_task(storage, p))),
            "task_update" => respond(parse_args(args).and_then(|p| tools::update_task(storage, p))),
            "task_delete" => respond(parse_args(args).and_then(|p| tools::delete_task(storage, p))),
            "task_list" => respond(parse_args(args).and_then(|p| tools::list_tasks(storage, p))),
            "stats_summary" => respond(parse_args(args).and_then(|p| tools::stats_summary(storage, p, today))),
            _ => return None,
        };

        Some(result)
    }
}

fn definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = schemars::schema_for!(P);
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" })),
    }
}

fn parse_args<P: DeserializeOwned>(args: Map<String, Value>) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ToolError::InvalidArgument(e.to_string()))
}

/// Turn a tool response into an MCP result
///
/// The `message` field becomes the text content; the remaining fields are
/// returned as structured content.
fn respond<R: Serialize>(result: Result<R, ToolError>) -> ToolCallResult {
    let structured = result.and_then(|response| serde_json::to_value(response).map_err(ToolError::from));

    match structured {
        Ok(mut value) => {
            let text = value
                .as_object_mut()
                .and_then(|fields| fields.remove("message"))
                .and_then(|message| message.as_str().map(str::to_string))
                .unwrap_or_default();
            ToolCallResult::success(text, Some(value))
        }
        Err(e) => {
            warn!("Tool call failed: {}", e);
            ToolCallResult::error(&e)
        }
    }
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}
