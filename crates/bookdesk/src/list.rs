use crate::prelude::{println, *};
use anstream::print;
use bookdesk_core::entities::{
    parse_list_page, Admin, Article, Book, BookImage, Category, FieldKey, FieldKind, ListPage,
    ListView,
};
use bookdesk_core::format::{
    format_currency, format_date, format_number, strip_html, truncate, DateFormat,
};
use bookdesk_core::pagination::{page_bounds, PaginationInfo, DEFAULT_MAX_BUTTONS};
use bookdesk_core::record::{FieldValue, Record};
use bookdesk_core::table::{SortOrder, TableFilter};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Widest a text cell gets before it is cut.
const CELL_WIDTH: usize = 40;

/// Record types with an admin list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entity {
    Admins,
    Articles,
    Categories,
    Books,
    BookImages,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Record type to list
    #[arg(value_enum, value_name = "ENTITY")]
    pub entity: Entity,

    /// JSON file with one page of records ("-" or unset reads stdin)
    #[arg(short, long, env = "BOOKDESK_FILE")]
    pub file: Option<PathBuf>,

    /// Case-insensitive keyword matched against the searchable fields
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Field to sort by (defaults to the screen's default sort)
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long, value_name = "ORDER")]
    pub order: Option<SortOrder>,

    /// Keep the records in the order they were loaded
    #[arg(long, conflicts_with_all = ["sort", "order"])]
    pub no_sort: bool,

    /// Page number (1-indexed), used when the records are paged locally
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of records per page
    #[arg(short, long, env = "BOOKDESK_LIMIT", default_value = "10")]
    pub limit: usize,

    /// Maximum number of page buttons
    #[arg(long, env = "BOOKDESK_MAX_BUTTONS", default_value_t = DEFAULT_MAX_BUTTONS)]
    pub max_buttons: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Filtered, sorted and paged view of one list screen
#[derive(Debug, Serialize)]
pub struct ListOutput<'a, V> {
    pub entity: &'static str,
    pub search: String,
    pub sort_key: Option<String>,
    pub sort_order: SortOrder,
    pub items: Vec<&'a V>,
    pub pagination: PaginationInfo,
}

pub fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let document = crate::source::read_document(options.file.as_deref(), global.verbose)?;

    match options.entity {
        Entity::Admins => list_records::<Admin>(document, &options),
        Entity::Articles => list_records::<Article>(document, &options),
        Entity::Categories => list_records::<Category>(document, &options),
        Entity::Books => list_records::<Book>(document, &options),
        Entity::BookImages => list_records::<BookImage>(document, &options),
    }
}

fn list_records<V>(document: Value, options: &ListOptions) -> Result<()>
where
    V: ListView + Record<V::Field>,
{
    let page: ListPage<V> = parse_list_page(document)
        .with_context(|| f!("Failed to read {} records", V::NAME))?;

    log::info!(
        "loaded {} {} (total {}, page {}, limit {})",
        page.data.len(),
        V::NAME,
        page.total(),
        page.page,
        page.limit
    );

    let filter = build_filter::<V>(options)?;
    let output = build_output(&page, &filter, options)?;

    if options.json {
        println!("{}", format_list_json(&output)?);
    } else {
        print!("{}", format_list_text(&output, &filter, options));
    }

    Ok(())
}

/// Start from the screen's defaults and apply the command-line overrides.
///
/// A `--sort` on a field other than the active one starts ascending unless
/// `--order` says otherwise.
pub fn build_filter<V>(options: &ListOptions) -> Result<TableFilter<V::Field>>
where
    V: ListView,
{
    let mut filter = V::table_filter();
    filter.set_search(options.search.clone());

    if options.no_sort {
        filter.clear_sort();
    }

    if let Some(field) = &options.sort {
        let key: V::Field = field.parse()?;
        if filter.sort_key() != Some(&key) {
            filter.set_sort_key(key);
            filter.set_sort_order(SortOrder::Asc);
        }
    }

    if let Some(order) = options.order {
        filter.set_sort_order(order);
    }

    log::debug!(
        "filter: search={:?} sort={:?} order={}",
        filter.search(),
        filter.sort_key(),
        filter.sort_order()
    );

    Ok(filter)
}

/// Run the filter over the loaded page and work out pagination.
///
/// When the document is one page of a larger server result, the matching
/// rows are shown as they are and the pagination bar follows the server's
/// page, limit and total. Otherwise the matching rows are paged locally with
/// `--page` and `--limit`.
pub fn build_output<'a, V>(
    page: &'a ListPage<V>,
    filter: &TableFilter<V::Field>,
    options: &ListOptions,
) -> Result<ListOutput<'a, V>>
where
    V: ListView + Record<V::Field>,
{
    let rows = filter.apply(&page.data);

    let (items, pagination) = if page.is_server_paged() {
        if options.page != 1 && options.page != page.page {
            log::warn!(
                "--page {} ignored: records are server page {}",
                options.page,
                page.page
            );
        }
        let info = PaginationInfo::new(page.page, page.limit, page.total(), options.max_buttons);
        (rows, info)
    } else {
        let total = rows.len();
        let (start, end) = page_bounds(total, options.page, options.limit)?;
        let info = PaginationInfo::new(options.page, options.limit, total, options.max_buttons);
        (rows[start..end].to_vec(), info)
    };

    Ok(ListOutput {
        entity: V::NAME,
        search: filter.search().to_string(),
        sort_key: filter.sort_key().map(|key| key.to_string()),
        sort_order: filter.sort_order(),
        items,
        pagination,
    })
}

/// Display text of one cell
pub fn format_cell(value: &FieldValue<'_>, kind: FieldKind) -> String {
    if value.is_null() {
        return "-".to_string();
    }

    match (kind, value) {
        (FieldKind::Date, _) => format_date(&value.to_text(), DateFormat::Short),
        (FieldKind::Currency, FieldValue::Number(n)) => format_currency(*n),
        (FieldKind::Number, FieldValue::Number(n)) => format_number(*n),
        (FieldKind::Html, _) => truncate(strip_html(&value.to_text()).trim(), CELL_WIDTH),
        _ => truncate(&value.to_text(), CELL_WIDTH),
    }
}

fn header_label<K: FieldKey>(column: &K, filter: &TableFilter<K>) -> String {
    let indicator = filter.sort_indicator(column);

    if indicator.is_active() {
        f!("{} {}", column.label(), indicator.symbol())
    } else {
        column.label()
    }
}

fn format_list_json<V: Serialize>(output: &ListOutput<'_, V>) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_list_text<V>(
    output: &ListOutput<'_, V>,
    filter: &TableFilter<V::Field>,
    options: &ListOptions,
) -> String
where
    V: ListView + Record<V::Field>,
{
    let mut result = String::new();
    let info = &output.pagination;
    let title = output.entity.to_uppercase().replace('-', " ");

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!("{} (Page {} of {})", title, info.current_page, info.total_pages.max(1))
            .bright_cyan()
            .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if !output.search.is_empty() {
        result.push_str(&f!(
            "{}: {}\n",
            "Search".green(),
            output.search.as_str().bright_white()
        ));
    }

    if output.items.is_empty() {
        let message = if output.search.is_empty() {
            f!("No {} on this page.", output.entity)
        } else {
            f!("No {} match \"{}\".", output.entity, output.search)
        };
        result.push_str(&f!("\n{}\n", message.yellow()));
    } else {
        let mut table = new_table();
        table.set_titles(prettytable::Row::new(
            V::COLUMNS
                .iter()
                .map(|column| prettytable::Cell::new(&header_label(column, filter)))
                .collect(),
        ));

        for item in &output.items {
            table.add_row(prettytable::Row::new(
                V::COLUMNS
                    .iter()
                    .map(|column| {
                        prettytable::Cell::new(&format_cell(&item.field(column), column.kind()))
                    })
                    .collect(),
            ));
        }

        result.push('\n');
        result.push_str(&table.to_string());
    }

    result.push_str(&f!("\n{}\n", info.summary().bright_white()));
    if !info.pages.is_empty() {
        result.push_str(&f!("{}\n", crate::pages::format_pagination_bar(info)));
    }

    result.push_str(&format_navigation(output, options));
    result.push('\n');
    result
}

fn format_navigation<V>(output: &ListOutput<'_, V>, options: &ListOptions) -> String {
    let info = &output.pagination;
    let mut result = String::new();

    result.push_str(&f!("\n{}:\n", "To navigate".bright_white().bold()));
    if info.has_next {
        result.push_str(&f!(
            "  {}: {}\n",
            "Next page".green(),
            f!("bookdesk list {} --page {}", output.entity, info.current_page + 1).cyan()
        ));
    }
    if info.has_prev {
        result.push_str(&f!(
            "  {}: {}\n",
            "Previous page".green(),
            f!("bookdesk list {} --page {}", output.entity, info.current_page - 1).cyan()
        ));
    }

    result.push_str(&f!("\n{}:\n", "To sort".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        f!("bookdesk list {} --sort <field> --order <asc|desc>", output.entity).cyan()
    ));

    if !options.json {
        result.push_str(&f!(
            "\n{}:\n",
            "To get JSON output".bright_white().bold()
        ));
        result.push_str(&f!(
            "  {}\n",
            f!("bookdesk list {} --json", output.entity).cyan()
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookdesk_core::entities::BookField;
    use serde_json::json;

    fn book_json(name: &str, author: &str, qty: Option<u32>) -> Value {
        json!({
            "id": format!("id-{name}"),
            "name": name,
            "slug": name.to_lowercase(),
            "desc": format!("<p>{name} by <b>{author}</b></p>"),
            "author": author,
            "publisher": "Gramedia",
            "published_at": "2023-05-01T00:00:00Z",
            "language": "Indonesia",
            "page": 320,
            "length": 20,
            "width": 13.5,
            "weight": 0.4,
            "price": 89000,
            "qty": qty,
            "categoryId": "cat-1",
            "image_url": "https://cdn.example.com/b.jpg",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-16T10:30:00Z"
        })
    }

    fn books_page() -> ListPage<Book> {
        parse_list_page(json!([
            book_json("Bumi Manusia", "Pramoedya", Some(12)),
            book_json("Laskar Pelangi", "Andrea Hirata", Some(3)),
            book_json("Cantik Itu Luka", "Eka Kurniawan", None),
        ]))
        .unwrap()
    }

    fn create_test_options() -> ListOptions {
        ListOptions {
            entity: Entity::Books,
            file: None,
            search: String::new(),
            sort: None,
            order: None,
            no_sort: false,
            page: 1,
            limit: 10,
            max_buttons: 5,
            json: false,
        }
    }

    fn names(output: &ListOutput<'_, Book>) -> Vec<String> {
        output.items.iter().map(|b| b.name.clone()).collect()
    }

    #[test]
    fn test_build_output_default_sort() {
        let page = books_page();
        let options = create_test_options();
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(
            names(&output),
            vec!["Laskar Pelangi", "Cantik Itu Luka", "Bumi Manusia"]
        );
        assert_eq!(output.sort_key.as_deref(), Some("name"));
        assert_eq!(output.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_build_filter_new_sort_key_starts_ascending() {
        let mut options = create_test_options();
        options.sort = Some("qty".to_string());

        let filter = build_filter::<Book>(&options).unwrap();

        assert_eq!(filter.sort_key(), Some(&BookField::Qty));
        assert_eq!(filter.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_build_filter_same_sort_key_keeps_default_order() {
        let mut options = create_test_options();
        options.sort = Some("name".to_string());

        let filter = build_filter::<Book>(&options).unwrap();

        assert_eq!(filter.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_build_filter_explicit_order() {
        let mut options = create_test_options();
        options.sort = Some("author".to_string());
        options.order = Some(SortOrder::Desc);

        let filter = build_filter::<Book>(&options).unwrap();

        assert_eq!(filter.sort_key(), Some(&BookField::Author));
        assert_eq!(filter.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_build_filter_unknown_field() {
        let mut options = create_test_options();
        options.sort = Some("isbn".to_string());

        let err = build_filter::<Book>(&options).unwrap_err();

        assert!(err.to_string().contains("Unknown field 'isbn' for books"));
    }

    #[test]
    fn test_build_output_no_sort_keeps_input_order() {
        let page = books_page();
        let mut options = create_test_options();
        options.no_sort = true;
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(
            names(&output),
            vec!["Bumi Manusia", "Laskar Pelangi", "Cantik Itu Luka"]
        );
        assert!(output.sort_key.is_none());
    }

    #[test]
    fn test_build_output_search() {
        let page = books_page();
        let mut options = create_test_options();
        options.search = "HIRATA".to_string();
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(names(&output), vec!["Laskar Pelangi"]);
        assert_eq!(output.pagination.total_items, 1);
    }

    #[test]
    fn test_build_output_qty_sort_with_missing_value() {
        let page = books_page();
        let mut options = create_test_options();
        options.sort = Some("qty".to_string());
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(output.items.len(), 3);
        assert_eq!(output.items[0].qty, Some(3));
    }

    #[test]
    fn test_build_output_local_paging() {
        let page = books_page();
        let mut options = create_test_options();
        options.limit = 2;
        options.page = 2;
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(names(&output), vec!["Bumi Manusia"]);
        assert_eq!(output.pagination.total_pages, 2);
        assert_eq!(output.pagination.summary(), "Showing 3 to 3 of 3 entries");
    }

    #[test]
    fn test_build_output_local_page_out_of_range() {
        let page = books_page();
        let mut options = create_test_options();
        options.page = 4;
        let filter = build_filter::<Book>(&options).unwrap();

        let err = build_output(&page, &filter, &options).unwrap_err();

        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_build_output_server_paged() {
        let page: ListPage<Book> = parse_list_page(json!({
            "success": true,
            "data": {
                "data": [book_json("Bumi Manusia", "Pramoedya", Some(12))],
                "total": 45,
                "page": 3,
                "limit": 10
            }
        }))
        .unwrap();
        let options = create_test_options();
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(output.items.len(), 1);
        assert_eq!(output.pagination.current_page, 3);
        assert_eq!(output.pagination.total_pages, 5);
        assert_eq!(output.pagination.pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(output.pagination.summary(), "Showing 21 to 30 of 45 entries");
    }

    #[test]
    fn test_build_output_huge_server_page() {
        let page: ListPage<Book> = parse_list_page(json!({
            "data": [book_json("Bumi Manusia", "Pramoedya", Some(12))],
            "total": 100,
            "page": usize::MAX,
            "limit": 10
        }))
        .unwrap();
        let options = create_test_options();
        let filter = build_filter::<Book>(&options).unwrap();

        let output = build_output(&page, &filter, &options).unwrap();

        assert_eq!(output.items.len(), 1);
        assert_eq!(output.pagination.total_pages, 10);
        assert_eq!(output.pagination.pages, vec![6, 7, 8, 9, 10]);
        assert!(!output.pagination.has_next);
    }

    #[test]
    fn test_format_cell_kinds() {
        assert_eq!(format_cell(&FieldValue::Null, FieldKind::Text), "-");
        assert_eq!(
            format_cell(&FieldValue::from("2024-01-15T10:30:00Z"), FieldKind::Date),
            "15 Jan 2024"
        );
        assert_eq!(
            format_cell(&FieldValue::Number(89000.0), FieldKind::Currency),
            "Rp\u{a0}89.000"
        );
        assert_eq!(format_cell(&FieldValue::Number(1200.0), FieldKind::Number), "1.200");
        assert_eq!(
            format_cell(&FieldValue::from("<p>Hello <b>World</b></p>"), FieldKind::Html),
            "Hello World"
        );
    }

    #[test]
    fn test_format_cell_truncates_long_text() {
        let long = "x".repeat(100);
        let cell = format_cell(&FieldValue::from(long.as_str()), FieldKind::Text);

        assert_eq!(cell.chars().count(), CELL_WIDTH);
        assert!(cell.ends_with('…'));
    }

    #[test]
    fn test_format_list_text_table() {
        let page = books_page();
        let options = create_test_options();
        let filter = build_filter::<Book>(&options).unwrap();
        let output = build_output(&page, &filter, &options).unwrap();

        let text = format_list_text(&output, &filter, &options);

        assert!(text.contains("BOOKS (Page 1 of 1)"));
        assert!(text.contains("Name ▼"));
        assert!(text.contains("Published At"));
        assert!(!text.contains("Author ▲"));
        assert!(text.contains("Laskar Pelangi"));
        assert!(text.contains("01 Mei 2023"));
        assert!(text.contains("Showing 1 to 3 of 3 entries"));
        assert!(text.contains("[1]"));
    }

    #[test]
    fn test_format_list_text_empty_search() {
        let page = books_page();
        let mut options = create_test_options();
        options.search = "tolkien".to_string();
        let filter = build_filter::<Book>(&options).unwrap();
        let output = build_output(&page, &filter, &options).unwrap();

        let text = format_list_text(&output, &filter, &options);

        assert!(text.contains("No books match \"tolkien\"."));
        assert!(text.contains("Showing 1 to 0 of 0 entries"));
    }

    #[test]
    fn test_format_list_text_navigation() {
        let page = books_page();
        let mut options = create_test_options();
        options.limit = 1;
        options.page = 2;
        let filter = build_filter::<Book>(&options).unwrap();
        let output = build_output(&page, &filter, &options).unwrap();

        let text = format_list_text(&output, &filter, &options);

        assert!(text.contains("Next page"));
        assert!(text.contains("bookdesk list books --page 3"));
        assert!(text.contains("Previous page"));
        assert!(text.contains("bookdesk list books --page 1"));
    }

    #[test]
    fn test_format_list_json() {
        let page = books_page();
        let mut options = create_test_options();
        options.search = "pelangi".to_string();
        let filter = build_filter::<Book>(&options).unwrap();
        let output = build_output(&page, &filter, &options).unwrap();

        let json = format_list_json(&output).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["entity"], "books");
        assert_eq!(parsed["search"], "pelangi");
        assert_eq!(parsed["sort_key"], "name");
        assert_eq!(parsed["sort_order"], "desc");
        assert_eq!(parsed["items"][0]["categoryId"], "cat-1");
        assert_eq!(parsed["pagination"]["total_items"], 1);
    }

    #[test]
    fn test_admin_and_category_screens() {
        let admins: ListPage<Admin> = parse_list_page(json!([
            {"id": "1", "name": "Sari", "username": "sari", "role": "Staff",
             "tokenVersion": 0, "created_at": "2024-01-01", "updated_at": "2024-01-01"},
            {"id": "2", "name": "Budi", "username": "budi", "role": "Superadmin",
             "tokenVersion": 1, "created_at": "2024-01-01", "updated_at": "2024-01-01"}
        ]))
        .unwrap();
        let mut options = create_test_options();
        options.entity = Entity::Admins;
        options.search = "staff".to_string();
        let filter = build_filter::<Admin>(&options).unwrap();

        let output = build_output(&admins, &filter, &options).unwrap();

        assert_eq!(output.items.len(), 1);
        assert_eq!(output.items[0].name, "Sari");
        assert_eq!(output.entity, "admins");
    }
}
