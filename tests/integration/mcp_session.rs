/// MCP server sessions driven through in-memory I/O
use chrono::NaiveDate;
use habit_planner_mcp::mcp::McpServer;
use habit_planner_mcp::PlannerServer;
use serde_json::{json, Value};
use tokio::io::BufReader;

#[cfg(test)]
mod mcp_session_tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn server() -> McpServer {
        McpServer::new(PlannerServer::in_memory().unwrap()).with_clock(fixed_today)
    }

    async fn run_session(server: &mut McpServer, requests: &[Value]) -> Vec<Value> {
        let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
    }

    #[tokio::test]
    async fn test_handshake_and_tool_listing() {
        let mut server = server();
        let responses = run_session(&mut server, &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ]).await;

        assert_eq!(responses.len(), 3);
        assert!(server.is_initialized());
        assert_eq!(responses[0]["id"], 1);
        assert!(responses[0]["result"]["serverInfo"]["version"].is_string());

        let names: Vec<&str> = responses[1]["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"habit_toggle"));
        assert!(names.contains(&"stats_summary"));
        assert_eq!(responses[2], json!({"jsonrpc": "2.0", "id": 3, "result": {}}));
    }

    #[tokio::test]
    async fn test_habit_and_task_session() {
        let mut server = server();
        let created = run_session(&mut server, &[
            tool_call(1, "habit_create", json!({"name": "Push-ups", "target_days": 3})),
        ]).await;
        let habit_id = created[0]["result"]["structuredContent"]["habit_id"]
            .as_str()
            .unwrap()
            .to_string();

        let responses = run_session(&mut server, &[
            tool_call(2, "habit_toggle", json!({"habit_id": habit_id})),
            tool_call(3, "habit_toggle", json!({"habit_id": habit_id, "date": "2024-08-31"})),
            tool_call(4, "task_add", json!({"title": "Book dentist", "priority": "high"})),
            tool_call(5, "stats_summary", json!({})),
            tool_call(6, "habit_list", json!({})),
        ]).await;

        assert_eq!(responses.len(), 5);
        assert_eq!(responses[1]["result"]["structuredContent"]["week"]["completed_days"], 2);

        let summary = &responses[3]["result"]["structuredContent"]["summary"];
        assert_eq!(summary["current_streak"], 2);
        assert_eq!(summary["weekly_completions"], 2);
        assert_eq!(summary["total_tasks"], 1);
        assert_eq!(summary["task_completion_rate"], 0.0);
        assert!(responses[3]["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Current streak: 2 days"));

        let week = &responses[4]["result"]["structuredContent"]["habits"][0]["week"];
        assert_eq!(week["progress"], json!([false, false, false, false, false, true, true]));
        assert_eq!(week["target_met"], false);
    }

    #[tokio::test]
    async fn test_errors_keep_the_session_alive() {
        let mut server = server();
        let input = concat!(
            "this is not json\n",
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/call\"}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"task_toggle\",\"arguments\":{\"task_id\":\"00000000-0000-0000-0000-000000000000\"}}}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n",
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["error"]["code"], -32602);
        assert_eq!(responses[2]["result"]["isError"], true);
        assert_eq!(responses[2]["result"]["structuredContent"]["code"], -32001);
        assert_eq!(responses[3]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_method_exact_bytes() {
        let mut server = server();
        let reader = tokio_test::io::Builder::new()
            .read(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"foo/bar\"}\n")
            .build();
        let writer = tokio_test::io::Builder::new()
            .write(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"error\":{\"code\":-32601,\"message\":\"Method 'foo/bar' not found\"}}")
            .write(b"\n")
            .build();

        server.serve(BufReader::new(reader), writer).await.unwrap();
    }
}
