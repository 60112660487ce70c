/// Integration tests against real databases and the MCP server loop
mod mcp_session;
mod storage_workflow;
