
use fixtures::*;
use reinhardt_datatables::{
	CallbackHook, CallbackRegistry, ColumnCollection, ColumnDescriptor, DisplayLength,
	LanguageConfig, RequestParameters, SortDirection, TableConfig, TableError, TableRenderer,
};
use rstest::*;
use serde_json::{Value, json};

#[rstest]
fn test_static_render_is_capped(static_table: TaskTable) {
	let html = static_table.render_html().unwrap();

	assert!(html.contains(
		"<tbody><tr><td>1</td><td>a</td></tr><tr><td>2</td><td>b</td></tr></tbody>"
	));
	assert_eq!(html.matches("<tr><td>").count(), 2);

	let request = static_table.last_request().unwrap();
	assert_eq!(request.offset(), 0);
	assert_eq!(request.length(), DisplayLength::Rows(2));
}

#[rstest]
fn test_static_render_truncates_oversized_loads(mut static_table: TaskTable) {
	static_table.ignore_window = true;
	let html = static_table.render_html().unwrap();
	assert_eq!(html.matches("<tr><td>").count(), 2);
	assert!(!html.contains("<td>c</td>"));
}

#[rstest]
fn test_static_request_follows_default_sort(sample_tasks: Vec<TestTask>) {
	let columns = ColumnCollection::try_from(vec![
		ColumnDescriptor::new("id", "ID"),
		ColumnDescriptor::new("label", "Label").default_sort(SortDirection::Desc),
	])
	.unwrap();
	let table = TaskTable::new(TableConfig::new(columns), sample_tasks);

	table.render_html().unwrap();

	let request = table.last_request().unwrap();
	assert_eq!(request.sort_column(), Some(1));
	assert_eq!(request.sort_direction(), SortDirection::Desc);
}

#[rstest]
fn test_server_side_render(server_table: TaskTable) {
	let html = server_table.render().unwrap();

	assert!(html.contains(
		"<tbody><tr><td colspan=\"2\" class=\"dataTables_empty\"><p>loading data</p></td></tr></tbody>"
	));
	assert!(html.contains("\"serverSide\":true,\"sAjaxSource\":\"/tasks/data\""));
	assert!(html.contains("$('#tasks').DataTable({"));
	assert!(server_table.requests.borrow().is_empty());
}

#[rstest]
fn test_server_side_render_without_source_fails(mut server_table: TaskTable) {
	server_table.config.as_mut().unwrap().ajax_source = None;
	let error = server_table.render().unwrap_err();
	assert!(matches!(error, HostError::Table(TableError::MissingDataSource)));

	server_table.data_url = Some("/fallback");
	assert!(server_table.render().unwrap().contains("\"sAjaxSource\":\"/fallback\""));
}

#[rstest]
fn test_paged_response(server_table: TaskTable) {
	let request = RequestParameters::new()
		.with_offset(0)
		.with_length(DisplayLength::Rows(10))
		.with_echo("tok1");
	let response = server_table.render_json(&request).unwrap();

	assert_eq!(response.total_records, 3);
	assert_eq!(response.total_display_records, 3);
	assert_eq!(response.echo.as_deref(), Some("tok1"));
	assert_eq!(
		response.data,
		vec![
			vec![json!(1), json!("a")],
			vec![json!(2), json!("b")],
			vec![json!(3), json!("c")],
		]
	);
}

#[rstest]
fn test_paged_response_uses_filtered_count(mut server_table: TaskTable) {
	server_table.filtered = Some(1);
	let response = server_table
		.render_json(&RequestParameters::new().with_length(DisplayLength::Rows(1)))
		.unwrap();

	assert_eq!(response.total_records, 3);
	assert_eq!(response.total_display_records, 1);
	assert_eq!(response.data.len(), 1);
}

#[rstest]
fn test_paged_response_wire_format(server_table: TaskTable) {
	let response = server_table
		.render_json_query("sEcho=9&iDisplayStart=2&iDisplayLength=5")
		.unwrap();
	let value: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

	assert_eq!(
		value,
		json!({
			"iTotalRecords": 3,
			"iTotalDisplayRecords": 3,
			"data": [[3, "c"]],
			"sEcho": "9"
		})
	);
}

#[rstest]
fn test_render_expression_is_embedded_unquoted(sample_tasks: Vec<TestTask>) {
	let columns = ColumnCollection::try_from(vec![
		ColumnDescriptor::new("id", "ID"),
		ColumnDescriptor::new("label", "Label").render("function(d){ return d; }"),
	])
	.unwrap();
	let table = TaskTable::new(TableConfig::new(columns), sample_tasks);

	let script = table.render_script().unwrap();
	assert!(script.contains("\"render\":function(d){ return d; }"));
	assert!(!script.contains("\"function(d){ return d; }\""));

	let mut registry = CallbackRegistry::new();
	let encoded = table.render_options(&mut registry).unwrap();
	assert!(script.contains(&encoded));
}

#[rstest]
fn test_callback_hooks_are_embedded(mut server_table: TaskTable) {
	server_table.callbacks = vec![
		(CallbackHook::Draw, "function(settings) {\n\tconsole.log(settings);\n}"),
		(CallbackHook::Header, "function(thead) {}"),
	];
	let script = server_table.render_script().unwrap();

	assert!(script.contains("\"drawCallback\":function(settings) {console.log(settings);}"));
	assert!(script.contains("\"headerCallback\":function(thead) {}"));
	assert!(!script.contains("footerCallback"));
}

#[rstest]
fn test_trailing_line_comment_in_hook_is_dropped(mut server_table: TaskTable) {
	server_table.callbacks = vec![(CallbackHook::Draw, "function(){ return 1; }\n// done")];
	let script = server_table.render_script().unwrap();

	assert!(script.contains("\"drawCallback\":function(){ return 1; }}); });</script>"));
	assert!(!script.contains("// done"));
}

#[rstest]
fn test_config_strings_cannot_close_the_script(mut server_table: TaskTable) {
	let config = server_table.config.as_mut().unwrap();
	config.language = Some(LanguageConfig {
		search: Some("</script><b>x".to_string()),
		..LanguageConfig::default()
	});
	config.dom = Some("</SCRIPT>lfrtip".to_string());
	config.ajax_source = Some("/tasks/</script>".to_string());

	let script = server_table.render_script().unwrap();
	assert_eq!(script.matches("</").count(), 1);
	assert!(script.ends_with("</script>"));
	assert!(script.contains(r#""search":"<\/script><b>x""#));
}

#[rstest]
fn test_script_binds_widget_to_page_variable(server_table: TaskTable) {
	let script = server_table.render_script().unwrap();
	assert!(script.contains("$(document).ready(function(){ var tasks = $('#tasks').DataTable({"));
}

#[rstest]
fn test_row_accessor_used_without_override(server_table: TaskTable) {
	let response = server_table.render_json(&RequestParameters::new()).unwrap();
	assert_eq!(response.data[0][1], json!("a"));
}

#[rstest]
fn test_table_accessor_preferred_over_row(mut server_table: TaskTable) {
	server_table.uppercase_labels = true;
	let response = server_table.render_json(&RequestParameters::new()).unwrap();
	assert_eq!(response.data[0][1], json!("A"));
}

#[rstest]
fn test_table_computed_column(sample_tasks: Vec<TestTask>) {
	let columns = ColumnCollection::try_from(vec![
		ColumnDescriptor::new("id", "ID"),
		ColumnDescriptor::new("status", "Status"),
	])
	.unwrap();
	let table = TaskTable::new(TableConfig::new(columns), sample_tasks);

	let html = table.render_html().unwrap();
	assert!(html.contains("<tr><td>1</td><td>open</td></tr><tr><td>2</td><td>done</td></tr>"));
}

#[rstest]
fn test_missing_accessor_aborts_render(sample_tasks: Vec<TestTask>) {
	let columns = ColumnCollection::try_from(vec![
		ColumnDescriptor::new("id", "ID"),
		ColumnDescriptor::new("owner", "Owner"),
	])
	.unwrap();
	let table = TaskTable::new(TableConfig::new(columns), sample_tasks);

	let error = table.render_json(&RequestParameters::new()).unwrap_err();
	match error {
		HostError::Table(TableError::MissingAccessor { accessor, .. }) => {
			assert_eq!(accessor, "getOwner");
		}
		other => panic!("expected MissingAccessor, got {other:?}"),
	}
	assert!(table.render().is_err());
}

#[rstest]
fn test_explicit_accessor_name(sample_tasks: Vec<TestTask>) {
	let columns = ColumnCollection::try_from(vec![
		ColumnDescriptor::new("title", "Title").accessor("getLabel"),
	])
	.unwrap();
	let table = TaskTable::new(TableConfig::new(columns), sample_tasks);

	let response = table.render_json(&RequestParameters::new()).unwrap();
	assert_eq!(response.data[1], vec![json!("b")]);
}

#[rstest]
fn test_host_error_is_returned_unchanged(mut server_table: TaskTable) {
	server_table.backend_failure = Some("database down".to_string());

	let error = server_table.render_json(&RequestParameters::new()).unwrap_err();
	assert!(matches!(&error, HostError::Backend(message) if message == "database down"));

	server_table.config.as_mut().unwrap().server_side = false;
	let error = server_table.render().unwrap_err();
	assert_eq!(error.to_string(), "backend unavailable: database down");
}

#[rstest]
fn test_missing_configuration(mut server_table: TaskTable) {
	server_table.config = None;

	assert!(matches!(
		server_table.render(),
		Err(HostError::Table(TableError::ConfigurationMissing))
	));
	assert!(matches!(
		server_table.render_json(&RequestParameters::new()),
		Err(HostError::Table(TableError::ConfigurationMissing))
	));
	assert!(server_table.requests.borrow().is_empty());
}

#[rstest]
fn test_hidden_columns_are_emitted(sample_tasks: Vec<TestTask>) {
	let columns = ColumnCollection::try_from(vec![
		ColumnDescriptor::new("id", "ID").visible(false),
		ColumnDescriptor::new("label", "Label"),
	])
	.unwrap();
	let config = TableConfig {
		static_max_length: 1,
		..TableConfig::new(columns)
	};
	let table = TaskTable::new(config, sample_tasks);

	let html = table.render_html().unwrap();
	assert!(html.contains("<th style=\"display: none;\">ID</th><th>Label</th>"));
	assert!(html.contains("<tr><td style=\"display: none;\">1</td><td>a</td></tr>"));
}

#[rstest]
fn test_table_from_toml_config(sample_tasks: Vec<TestTask>) {
	let config = TableConfig::from_toml_str(
		r#"
		class = "display compact"
		static_max_length = 1
		paging_type = "simple"

		[[columns]]
		name = "id"
		title = "ID"

		[[columns]]
		name = "label"
		title = "Label"
		default_sort = true
		default_sort_direction = "desc"
		"#,
	)
	.unwrap();
	let table = TaskTable::new(config, sample_tasks);

	let html = table.render().unwrap();
	assert!(html.contains("class=\"display compact\" id=\"tasks\""));
	assert!(html.contains("\"pagingType\":\"simple\""));
	assert!(html.contains("\"order\":[[1,\"desc\"]]"));
	assert_eq!(html.matches("<tr><td>").count(), 1);
}
