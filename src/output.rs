use std::io::{self, Write};

use comfy_table::{presets, Cell, Table};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

const PREFERRED_COLUMNS: &[&str] = &[
	"id",
	"name",
	"status",
	"admin_state_up",
	"shared",
	"cidr",
	"ip_version",
	"network_id",
	"subnet_id",
	"tenant_id",
];

pub fn print_list(
	items: &[Value],
	columns: &[String],
	format: OutputFormat,
) -> Result<(), CliError> {
	let mut stdout = io::stdout().lock();
	write_list(&mut stdout, items, columns, format)
}

pub fn write_list<W: Write>(
	mut writer: W,
	items: &[Value],
	columns: &[String],
	format: OutputFormat,
) -> Result<(), CliError> {
	match format {
		OutputFormat::Json => {
			let value = project_items(items, columns);
			writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?;
		}
		OutputFormat::Yaml => {
			let value = project_items(items, columns);
			let yaml = serde_yaml::to_string(&value)
				.map_err(|err| CliError::InvalidArgument(format!("yaml serialize error: {err}")))?;
			write!(writer, "{yaml}")?;
		}
		OutputFormat::Csv => {
			let cols = select_columns(items, columns);
			writeln!(writer, "{}", cols.iter().map(|c| csv_escape(c)).collect::<Vec<_>>().join(","))?;
			for item in items {
				let row: Vec<String> = cols
					.iter()
					.map(|col| csv_escape(&cell_text(item.get(col.as_str()))))
					.collect();
				writeln!(writer, "{}", row.join(","))?;
			}
		}
		OutputFormat::Table => {
			let cols = select_columns(items, columns);
			if cols.is_empty() {
				writeln!(writer, "{}", serde_json::to_string_pretty(&Value::Array(items.to_vec()))?)?;
				return Ok(());
			}

			let mut table = Table::new();
			table.load_preset(presets::UTF8_FULL);
			table.set_header(cols.iter().map(String::as_str));

			for item in items {
				let cells: Vec<Cell> = cols
					.iter()
					.map(|col| Cell::new(cell_text(item.get(col.as_str()))))
					.collect();
				table.add_row(cells);
			}
			writeln!(writer, "{table}")?;
		}
	}
	Ok(())
}

pub fn print_item(value: &Value, columns: &[String], format: OutputFormat) -> Result<(), CliError> {
	let mut stdout = io::stdout().lock();
	write_item(&mut stdout, value, columns, format)
}

pub fn write_item<W: Write>(
	mut writer: W,
	value: &Value,
	columns: &[String],
	format: OutputFormat,
) -> Result<(), CliError> {
	let projected = project_value(value, columns);

	match format {
		OutputFormat::Json => {
			writeln!(writer, "{}", serde_json::to_string_pretty(&projected)?)?;
		}
		OutputFormat::Yaml => {
			let yaml = serde_yaml::to_string(&projected)
				.map_err(|err| CliError::InvalidArgument(format!("yaml serialize error: {err}")))?;
			write!(writer, "{yaml}")?;
		}
		OutputFormat::Csv => {
			let Some(obj) = projected.as_object() else {
				writeln!(writer, "{}", serde_json::to_string(&projected)?)?;
				return Ok(());
			};
			writeln!(writer, "field,value")?;
			for (key, v) in obj {
				writeln!(writer, "{},{}", csv_escape(key), csv_escape(&cell_text(Some(v))))?;
			}
		}
		OutputFormat::Table => {
			let Some(obj) = projected.as_object() else {
				writeln!(writer, "{}", serde_json::to_string_pretty(&projected)?)?;
				return Ok(());
			};

			let mut table = Table::new();
			table.load_preset(presets::UTF8_FULL);
			table.set_header(["Field", "Value"]);
			for (key, v) in obj {
				table.add_row([Cell::new(key), Cell::new(cell_text(Some(v)))]);
			}
			writeln!(writer, "{table}")?;
		}
	}
	Ok(())
}

// Explicit -c selections win, in the order given; otherwise preferred
// well-known columns present in the data, then the remaining keys in map
// order.
fn select_columns(items: &[Value], requested: &[String]) -> Vec<String> {
	if !requested.is_empty() {
		return requested.to_vec();
	}

	let mut columns: Vec<String> = Vec::new();
	for col in PREFERRED_COLUMNS {
		if items.iter().any(|item| item.get(col).is_some()) {
			columns.push((*col).to_string());
		}
	}
	for item in items {
		let Some(obj) = item.as_object() else { continue };
		for key in obj.keys() {
			if !columns.iter().any(|c| c == key) {
				columns.push(key.clone());
			}
		}
	}
	columns
}

fn project_items(items: &[Value], columns: &[String]) -> Value {
	Value::Array(items.iter().map(|item| project_value(item, columns)).collect())
}

fn project_value(value: &Value, columns: &[String]) -> Value {
	if columns.is_empty() {
		return value.clone();
	}
	let Some(obj) = value.as_object() else {
		return value.clone();
	};

	let mut out = serde_json::Map::new();
	for col in columns {
		if let Some(v) = obj.get(col) {
			out.insert(col.clone(), v.clone());
		}
	}
	Value::Object(out)
}

// Nested lists and dicts flatten to compact JSON; null becomes an empty cell.
fn cell_text(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::Bool(v)) => v.to_string(),
		Some(Value::Number(v)) => v.to_string(),
		Some(Value::String(v)) => v.clone(),
		Some(other) => serde_json::to_string(other).unwrap_or_default(),
	}
}

pub fn csv_escape(value: &str) -> String {
	if value.contains([',', '"', '\n', '\r']) {
		format!("\"{}\"", value.replace('"', "\"\""))
	} else {
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn select_columns_prefers_well_known_keys_first() {
		let items = vec![json!({"zone": "a", "name": "n1", "id": "x"})];
		assert_eq!(select_columns(&items, &[]), vec!["id", "name", "zone"]);
	}

	#[test]
	fn explicit_columns_win_and_keep_order() {
		let items = vec![json!({"id": "x", "name": "n1"})];
		let requested = vec!["name".to_string(), "id".to_string()];
		assert_eq!(select_columns(&items, &requested), requested);
	}

	#[test]
	fn cell_text_flattens_nested_values() {
		assert_eq!(cell_text(Some(&json!(null))), "");
		assert_eq!(cell_text(Some(&json!(true))), "true");
		assert_eq!(cell_text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
		assert_eq!(cell_text(Some(&json!({"k": 1}))), r#"{"k":1}"#);
	}

	#[test]
	fn csv_escape_quotes_separators_and_quotes() {
		assert_eq!(csv_escape("plain"), "plain");
		assert_eq!(csv_escape("a,b"), "\"a,b\"");
		assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
	}

	#[test]
	fn csv_list_output_has_header_and_rows() {
		let items = vec![
			json!({"id": "n1", "name": "net,one"}),
			json!({"id": "n2", "name": "net2"}),
		];
		let mut buf = Vec::new();
		write_list(&mut buf, &items, &[], OutputFormat::Csv).unwrap();
		let text = String::from_utf8(buf).unwrap();
		assert_eq!(text, "id,name\nn1,\"net,one\"\nn2,net2\n");
	}

	#[test]
	fn item_projection_respects_column_selection() {
		let value = json!({"id": "n1", "name": "foo", "status": "ACTIVE"});
		let columns = vec!["id".to_string(), "status".to_string()];
		assert_eq!(
			project_value(&value, &columns),
			json!({"id": "n1", "status": "ACTIVE"})
		);
	}

	#[test]
	fn json_list_output_is_pretty_array() {
		let items = vec![json!({"id": "n1"})];
		let mut buf = Vec::new();
		write_list(&mut buf, &items, &[], OutputFormat::Json).unwrap();
		let text = String::from_utf8(buf).unwrap();
		assert!(text.starts_with('['));
		assert!(text.contains("\"id\": \"n1\""));
	}
}
