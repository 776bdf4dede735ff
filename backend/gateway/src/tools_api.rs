//! Direct invocation of the mock data tools.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::server::GatewayState;
use crate::sessions_api::error_response;

#[derive(Serialize)]
pub struct ToolView {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Handler for `GET /api/tools`
pub async fn list_tools(State(state): State<GatewayState>) -> Json<Vec<ToolView>> {
    let tools = state
        .tools
        .list()
        .into_iter()
        .filter_map(|name| state.tools.get(&name))
        .map(|tool| ToolView {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters(),
        })
        .collect();
    Json(tools)
}

/// Handler for `POST /api/tools/:name`
pub async fn invoke_tool(
    State(state): State<GatewayState>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> Response {
    let Some(tool) = state.tools.get(&name) else {
        return error_response(StatusCode::NOT_FOUND, format!("Unknown tool: {name}"));
    };
    match tool.execute(args).await {
        Ok(output) => Json(json!({ "tool": name, "output": output })).into_response(),
        Err(e) => {
            warn!(tool = %name, error = %e, "Tool invocation failed");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;
    use wayfarer_planner::ScriptedProvider;

    fn state() -> crate::GatewayState {
        state_with(Arc::new(ScriptedProvider::new("mock")))
    }

    #[tokio::test]
    async fn test_list_tools() {
        let json = body_json(send(&state(), "GET", "/api/tools", None).await).await;
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[1]["name"], "get_flights");
        assert_eq!(json[1]["parameters"]["required"][0], "origin");
    }

    #[tokio::test]
    async fn test_invoke_hotels() {
        let response = send(
            &state(),
            "POST",
            "/api/tools/suggest_hotels",
            Some(json!({ "destination": "Kyoto", "budget": "luxury", "nights": 3 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["output"].as_str().unwrap().contains("Kyoto"));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let response = send(&state(), "POST", "/api/tools/teleport", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invoke_with_missing_argument() {
        let response = send(
            &state(),
            "POST",
            "/api/tools/get_flights",
            Some(json!({ "origin": "Paris" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("destination"));
    }
}
