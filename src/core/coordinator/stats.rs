use std::collections::HashMap;
use tracing::info;

/// Counters accumulated over one goal run
#[derive(Debug, Default)]
pub struct RunStats {
    /// Dispatch count per tool name
    pub tool_usage: HashMap<String, usize>,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

impl RunStats {
    pub fn record_tool(&mut self, name: &str) {
        *self.tool_usage.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn total_tool_uses(&self) -> usize {
        self.tool_usage.values().sum()
    }

    /// Logs the end-of-run summary
    pub fn report(&self) {
        info!(
            "Run finished: {}/{} tasks completed, {} tool calls",
            self.completed_tasks,
            self.total_tasks,
            self.total_tool_uses()
        );
        let mut usage: Vec<_> = self.tool_usage.iter().collect();
        usage.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (name, count) in usage {
            info!("  {} used {} time(s)", name, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_usage_accumulates() {
        let mut stats = RunStats::default();
        stats.record_tool("write_file");
        stats.record_tool("write_file");
        stats.record_tool("run_code_file");
        assert_eq!(stats.tool_usage["write_file"], 2);
        assert_eq!(stats.total_tool_uses(), 3);
    }
}
