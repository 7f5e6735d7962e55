//! Parse command - show how a query string is read and written back

use crate::{
    Result,
    catalog::ProductQuery,
    output,
    query::QuerySnapshot,
    ui::output::OutputWriter,
};
use serde_json::{Map, Value, json};

/// Execute the parse command
///
/// # Errors
///
/// Returns `AppError::Json` if JSON output cannot be produced.
pub fn execute(query: &str, json: bool, out: &dyn OutputWriter, quiet: bool) -> Result<()> {
    let snapshot = QuerySnapshot::parse(query);

    if json {
        out.write(&serde_json::to_string_pretty(&to_json(&snapshot))?);
        return Ok(());
    }

    out.write(&snapshot.to_href());
    if quiet {
        return Ok(());
    }

    if snapshot.is_empty() {
        out.info("(no keys)");
    }
    for (key, value) in snapshot.iter() {
        out.write(&output::key_value(key.as_str(), value, false));
    }
    for (key, value) in snapshot.extras() {
        out.write(&output::key_value(key, value.as_deref().unwrap_or(""), false));
    }

    let interpreted = ProductQuery::from_snapshot(&snapshot);
    out.info(&format!(
        "sort {} / page {} / {} active filter(s)",
        interpreted.sort,
        interpreted.page,
        snapshot.active_filter_count()
    ));
    Ok(())
}

fn to_json(snapshot: &QuerySnapshot) -> Value {
    let values: Map<String, Value> = snapshot
        .iter()
        .map(|(key, value)| (key.as_str().to_string(), Value::from(value)))
        .collect();
    let extras: Vec<Value> = snapshot
        .extras()
        .iter()
        .map(|(key, value)| json!([key, value]))
        .collect();

    json!({
        "href": snapshot.to_href(),
        "values": values,
        "extras": extras,
        "sort": snapshot.sort().as_str(),
        "page": snapshot.page(),
        "activeFilters": snapshot.active_filter_count(),
    })
}
