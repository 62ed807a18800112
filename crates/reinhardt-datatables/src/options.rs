//! Assembly of the client configuration document
//!
//! Mandatory options are always emitted, copied straight from the
//! [`TableConfig`]. Optional settings are emitted only when set, and callbacks
//! only for the hooks the table supplies.

use crate::column::{ColumnCollection, ColumnDescriptor};
use crate::config::{LanguageConfig, LengthLabel, LengthMenu, ScrollSetting, TableConfig};
use crate::document::{Document, DocumentMap};
use crate::error::{Result, TableError};
use crate::table::{CallbackHook, DataTable};

/// Builds the configuration document for `table` from `config`
///
/// Fails with [`TableError::MissingDataSource`] when server-side mode is on and
/// neither the configuration nor the table names a data source URL.
pub fn build_configuration_document<T>(table: &T, config: &TableConfig) -> Result<Document>
where
	T: DataTable + ?Sized,
{
	let mut options = DocumentMap::new();

	options.insert("paging".into(), config.paging.into());
	options.insert("lengthChange".into(), config.length_change.into());
	options.insert("processing".into(), config.processing.into());
	options.insert("searching".into(), config.searching.into());
	options.insert("ordering".into(), config.ordering.into());
	options.insert("info".into(), config.info.into());
	options.insert("autoWidth".into(), config.auto_width.into());
	options.insert("scrollCollapse".into(), config.scroll_collapse.into());
	options.insert("pageLength".into(), config.page_length.into());
	options.insert("jQueryUI".into(), config.jquery_ui.into());
	options.insert("pagingType".into(), config.paging_type.as_str().into());
	options.insert("stateSave".into(), config.state_save.into());
	options.insert("stateDuration".into(), config.state_duration.into());
	options.insert("columns".into(), column_options(&config.columns));
	options.insert("order".into(), default_order(&config.columns));
	options.insert("lengthMenu".into(), length_menu(&config.length_menu));

	if config.server_side {
		let source = config
			.ajax_source
			.as_deref()
			.or_else(|| table.ajax_data_url())
			.ok_or(TableError::MissingDataSource)?;
		options.insert("serverSide".into(), true.into());
		options.insert("sAjaxSource".into(), source.into());
	}

	if let Some(scroll_x) = &config.scroll_x {
		options.insert("scrollX".into(), scroll_setting(scroll_x));
	}
	if let Some(scroll_y) = &config.scroll_y {
		options.insert("scrollY".into(), scroll_setting(scroll_y));
	}
	if let Some(language) = &config.language {
		options.insert("language".into(), language_options(language));
	}
	if let Some(dom) = &config.dom {
		options.insert("dom".into(), dom.as_str().into());
	}

	for hook in CallbackHook::ALL {
		if let Some(source) = table.callback(hook) {
			options.insert(hook.option_name().into(), Document::raw(&source));
		}
	}

	Ok(Document::Map(options))
}

/// Per-column option list, one entry per column in display order
pub fn column_options(columns: &ColumnCollection) -> Document {
	Document::List(columns.iter().map(column_option).collect())
}

fn column_option(column: &ColumnDescriptor) -> Document {
	let mut option = DocumentMap::new();
	option.insert("orderable".into(), column.is_sortable().into());
	option.insert("name".into(), column.name().into());
	option.insert("visible".into(), column.is_visible().into());
	option.insert("searchable".into(), column.is_searchable().into());

	if let Some(width) = column.width_value() {
		option.insert("width".into(), width.into());
	}
	if let Some(class) = column.css_class_value() {
		option.insert("className".into(), class.into());
	}
	if let Some(render) = column.render_expression() {
		option.insert("render".into(), Document::raw(render));
	}

	Document::Map(option)
}

/// `[index, direction]` pairs for the default sort column
pub fn default_order(columns: &ColumnCollection) -> Document {
	Document::List(
		columns
			.iter()
			.enumerate()
			.filter(|(_, column)| column.is_default_sort())
			.map(|(index, column)| {
				Document::List(vec![
					index.into(),
					column.default_sort_direction().as_str().into(),
				])
			})
			.collect(),
	)
}

/// Page lengths and labels as two parallel lists
pub fn length_menu(menu: &LengthMenu) -> Document {
	let lengths = menu.lengths().map(Document::from).collect();
	let labels = menu
		.labels()
		.map(|label| match label {
			LengthLabel::Count(n) => Document::Integer(*n),
			LengthLabel::Text(text) => Document::Text(text.clone()),
		})
		.collect();
	Document::List(vec![Document::List(lengths), Document::List(labels)])
}

fn scroll_setting(setting: &ScrollSetting) -> Document {
	match setting {
		ScrollSetting::Enabled(enabled) => Document::Bool(*enabled),
		ScrollSetting::Extent(extent) => Document::Text(extent.clone()),
	}
}

/// Language overrides; only strings that are set appear
pub fn language_options(language: &LanguageConfig) -> Document {
	fn insert(map: &mut DocumentMap, key: &str, value: &Option<String>) {
		if let Some(value) = value {
			map.insert(key.into(), value.as_str().into());
		}
	}

	let mut paginate = DocumentMap::new();
	insert(&mut paginate, "first", &language.paginate_first);
	insert(&mut paginate, "last", &language.paginate_last);
	insert(&mut paginate, "next", &language.paginate_next);
	insert(&mut paginate, "previous", &language.paginate_previous);

	let mut options = DocumentMap::new();
	if !paginate.is_empty() {
		options.insert("paginate".into(), Document::Map(paginate));
	}
	insert(&mut options, "emptyTable", &language.empty_table);
	insert(&mut options, "info", &language.info);
	insert(&mut options, "infoEmpty", &language.info_empty);
	insert(&mut options, "infoFiltered", &language.info_filtered);
	insert(&mut options, "infoPostFix", &language.info_post_fix);
	insert(&mut options, "lengthMenu", &language.length_menu);
	insert(&mut options, "search", &language.search);
	insert(&mut options, "zeroRecords", &language.zero_records);
	insert(&mut options, "url", &language.url);

	Document::Map(options)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::SortDirection;
	use crate::request::RequestParameters;
	use crate::result::DataResult;
	use rstest::{fixture, rstest};
	use serde_json::{Map, Value, json};

	struct OptionsTable {
		config: Option<TableConfig>,
		ajax_url: Option<&'static str>,
		hooks: Vec<(CallbackHook, &'static str)>,
	}

	impl DataTable for OptionsTable {
		type Row = Map<String, Value>;
		type Error = TableError;

		fn table_id(&self) -> &str {
			"options"
		}

		fn config(&self) -> Option<&TableConfig> {
			self.config.as_ref()
		}

		fn load_data(
			&self,
			_request: &RequestParameters,
		) -> std::result::Result<DataResult<Self::Row>, TableError> {
			Ok(DataResult::new(Vec::new(), 0))
		}

		fn ajax_data_url(&self) -> Option<&str> {
			self.ajax_url
		}

		fn callback(&self, hook: CallbackHook) -> Option<String> {
			self.hooks
				.iter()
				.find(|(candidate, _)| *candidate == hook)
				.map(|(_, source)| source.to_string())
		}
	}

	#[fixture]
	fn columns() -> ColumnCollection {
		ColumnCollection::try_from(vec![
			ColumnDescriptor::new("id", "ID").width("40px"),
			ColumnDescriptor::new("label", "Label")
				.sortable(false)
				.css_class("text")
				.default_sort(SortDirection::Desc),
			ColumnDescriptor::new("secret", "Secret").visible(false).searchable(false),
		])
		.unwrap()
	}

	fn table(config: TableConfig) -> OptionsTable {
		OptionsTable {
			config: Some(config),
			ajax_url: None,
			hooks: Vec::new(),
		}
	}

	fn to_json(document: &Document) -> Value {
		serde_json::from_str(&document.encode().unwrap()).unwrap()
	}

	#[rstest]
	fn test_mandatory_options(columns: ColumnCollection) {
		let config = TableConfig::new(columns);
		let document = build_configuration_document(&table(config.clone()), &config).unwrap();

		assert_eq!(
			to_json(&document),
			json!({
				"paging": false,
				"lengthChange": false,
				"processing": true,
				"searching": false,
				"ordering": true,
				"info": false,
				"autoWidth": true,
				"scrollCollapse": false,
				"pageLength": 10,
				"jQueryUI": true,
				"pagingType": "full_numbers",
				"stateSave": false,
				"stateDuration": 7200,
				"columns": [
					{"orderable": true, "name": "id", "visible": true, "searchable": true, "width": "40px"},
					{"orderable": false, "name": "label", "visible": true, "searchable": true, "className": "text"},
					{"orderable": true, "name": "secret", "visible": false, "searchable": false}
				],
				"order": [[1, "desc"]],
				"lengthMenu": [[10, 25, 50, 100], [10, 25, 50, 100]]
			})
		);
	}

	#[rstest]
	fn test_conditional_options(columns: ColumnCollection) {
		let config = TableConfig {
			server_side: true,
			ajax_source: Some("/rows".into()),
			scroll_x: Some(ScrollSetting::Enabled(true)),
			scroll_y: Some(ScrollSetting::Extent("200px".into())),
			dom: Some("lfrtip".into()),
			language: Some(LanguageConfig {
				paginate_next: Some("Next".into()),
				search: Some("Find:".into()),
				..LanguageConfig::default()
			}),
			..TableConfig::new(columns)
		};
		let json = to_json(&build_configuration_document(&table(config.clone()), &config).unwrap());

		assert_eq!(json["serverSide"], json!(true));
		assert_eq!(json["sAjaxSource"], json!("/rows"));
		assert_eq!(json["scrollX"], json!(true));
		assert_eq!(json["scrollY"], json!("200px"));
		assert_eq!(json["dom"], json!("lfrtip"));
		assert_eq!(
			json["language"],
			json!({"paginate": {"next": "Next"}, "search": "Find:"})
		);
	}

	#[rstest]
	fn test_unset_options_are_omitted(columns: ColumnCollection) {
		let config = TableConfig::new(columns);
		let document = build_configuration_document(&table(config.clone()), &config).unwrap();
		for key in ["serverSide", "sAjaxSource", "scrollX", "scrollY", "language", "dom", "rowCallback"] {
			assert!(document.get(key).is_none(), "{key} should be omitted");
		}
	}

	#[rstest]
	fn test_table_data_url_is_fallback(columns: ColumnCollection) {
		let config = TableConfig {
			server_side: true,
			..TableConfig::new(columns)
		};
		let mut host = table(config.clone());
		host.ajax_url = Some("/fallback");
		let document = build_configuration_document(&host, &config).unwrap();
		assert_eq!(document.get("sAjaxSource"), Some(&Document::Text("/fallback".into())));
	}

	#[rstest]
	fn test_server_side_without_url_fails(columns: ColumnCollection) {
		let config = TableConfig {
			server_side: true,
			..TableConfig::new(columns)
		};
		let result = build_configuration_document(&table(config.clone()), &config);
		assert!(matches!(result, Err(TableError::MissingDataSource)));
	}

	#[rstest]
	fn test_only_supplied_hooks_are_emitted(columns: ColumnCollection) {
		let config = TableConfig::new(columns);
		let mut host = table(config.clone());
		host.hooks = vec![
			(CallbackHook::Header, "function(thead){}"),
			(CallbackHook::Row, "function(row){\n}"),
		];
		let document = build_configuration_document(&host, &config).unwrap();

		assert_eq!(document.get("rowCallback"), Some(&Document::Raw("function(row){}".into())));
		assert_eq!(
			document.get("headerCallback"),
			Some(&Document::Raw("function(thead){}".into()))
		);
		assert!(document.get("footerCallback").is_none());
		assert!(document.get("drawCallback").is_none());
	}

	#[rstest]
	fn test_render_expression_is_unquoted_in_output() {
		let columns = ColumnCollection::try_from(vec![
			ColumnDescriptor::new("label", "Label").render("function(d){ return d; }"),
		])
		.unwrap();
		let config = TableConfig::new(columns);
		let encoded = build_configuration_document(&table(config.clone()), &config)
			.unwrap()
			.encode()
			.unwrap();

		assert!(encoded.contains(r#""render":function(d){ return d; }"#));
		assert!(!encoded.contains(r#""function(d){ return d; }""#));
	}

	#[rstest]
	fn test_length_menu_with_text_label() {
		let menu = LengthMenu::new().entry(10, 10).entry(-1, "All");
		assert_eq!(to_json(&length_menu(&menu)), json!([[10, -1], [10, "All"]]));
	}

	#[rstest]
	fn test_empty_language_config() {
		assert_eq!(language_options(&LanguageConfig::default()), Document::Map(DocumentMap::new()));
	}
}
