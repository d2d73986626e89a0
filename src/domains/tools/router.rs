//! Tool Router - builds the tool table and the rmcp ToolRouter from it.
//!
//! STDIO/TCP transports route through the rmcp router; HTTP calls the table
//! directly. Both come from the same registration pass, so they always agree.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::instrumentation::{CallLog, Instrumented};
use super::registry::{ToolTable, register_operations};
use crate::domains::maps::Upstream;

/// Register every Maps tool into a fresh table, instrumented when a call log is given.
pub fn build_tool_table(upstream: Arc<dyn Upstream>, call_log: Option<Arc<CallLog>>) -> ToolTable {
    match call_log {
        Some(log) => {
            let mut instrumented = Instrumented::new(ToolTable::new(), log);
            register_operations(&mut instrumented, upstream);
            instrumented.into_inner()
        }
        None => {
            let mut table = ToolTable::new();
            register_operations(&mut table, upstream);
            table
        }
    }
}

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(table: &ToolTable) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    table.routes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{StubUpstream, text_of};
    use rmcp::model::JsonObject;
    use serde_json::json;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let table = build_tool_table(Arc::new(StubUpstream::ok(json!({}))), None);
        let router: ToolRouter<TestServer> = build_tool_router(&table);
        let tools = router.list_all();
        assert_eq!(tools.len(), 7);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"maps_geocode"));
        assert!(names.contains(&"maps_reverse_geocode"));
        assert!(names.contains(&"maps_search_places"));
        assert!(names.contains(&"maps_place_details"));
        assert!(names.contains(&"maps_distance_matrix"));
        assert!(names.contains(&"maps_elevation"));
        assert!(names.contains(&"maps_directions"));
    }

    #[tokio::test]
    async fn test_instrumented_table_records_calls() {
        let log = Arc::new(CallLog::in_memory());
        let table = build_tool_table(
            Arc::new(StubUpstream::ok(json!({"routes": []}))),
            Some(log.clone()),
        );

        let args: JsonObject = json!({"origin": "A", "destination": "B", "mode": "walking"})
            .as_object()
            .cloned()
            .unwrap();
        let result = table.call("maps_directions", args).await.unwrap();

        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("\"routes\": []"));
        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, "maps_directions");
        assert_eq!(snapshot[0].1.calls, 1);
        assert_eq!(snapshot[0].1.failures, 0);
    }
}
