use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn raw_is_single_line() {
        let value = serde_json::json!({"task_id": "tsk-1", "slack": 0.0});
        let raw = render(&value, OutputFormat::Raw).unwrap();
        assert_eq!(raw, r#"{"slack":0.0,"task_id":"tsk-1"}"#);
        let pretty = render(&value, OutputFormat::Json).unwrap();
        assert!(pretty.contains('\n'));
    }
}
