use crate::model::ReportData;

/// Render the run report as a pretty-printed JSON document.
pub fn render_json_report(data: &ReportData) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}
