// self
use crate::obs::ToolOutcome;

/// Records a tool outcome via the global metrics recorder (when enabled).
pub fn record_tool_outcome(tool: &'static str, outcome: ToolOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth0_mcp_tool_total",
			"tool" => tool,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (tool, outcome);
	}
}
