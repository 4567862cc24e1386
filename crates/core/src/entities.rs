//! Bookstore record types and their list-view configuration
//!
//! Models for the records the admin screens list (admins, articles,
//! categories, books and book images), the field-key enum of each, and the
//! [`ListView`] settings every screen uses: which fields are searchable,
//! the default sort and the sortable columns.

use crate::record::{FieldValue, Record};
use crate::table::{SortOrder, TableFilter};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How a column's values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Currency,
    Date,
    /// Rich text, shown with tags stripped.
    Html,
}

/// Unknown field name for an entity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field '{field}' for {entity}. Valid fields: {valid}")]
pub struct FieldKeyError {
    pub entity: &'static str,
    pub field: String,
    pub valid: String,
}

/// A field-key enum: a closed set of wire names.
pub trait FieldKey:
    Copy + PartialEq + fmt::Debug + fmt::Display + FromStr<Err = FieldKeyError> + 'static
{
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn kind(&self) -> FieldKind;

    /// Column header label
    fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

macro_rules! field_keys {
    ($entity:literal, $name:ident { $($variant:ident => ($wire:literal, $kind:ident)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FieldKey for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn kind(&self) -> FieldKind {
                match self {
                    $($name::$variant => FieldKind::$kind),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FieldKeyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(FieldKeyError {
                        entity: $entity,
                        field: s.to_string(),
                        valid: [$($wire),+].join(", "),
                    }),
                }
            }
        }
    };
}

/// Settings of one admin list screen.
///
/// Implementors also implement `Record<Self::Field>`; generic callers spell
/// that out as `V: ListView + Record<V::Field>`.
pub trait ListView: Serialize + DeserializeOwned {
    type Field: FieldKey;

    /// Plural name used in commands and headings
    const NAME: &'static str;
    const SEARCHABLE: &'static [Self::Field];
    const DEFAULT_SORT: (Self::Field, SortOrder);
    const COLUMNS: &'static [Self::Field];

    /// Filter state with this screen's searchable keys and default sort.
    fn table_filter() -> TableFilter<Self::Field> {
        let (key, order) = Self::DEFAULT_SORT;
        TableFilter::new(Self::SEARCHABLE.to_vec()).with_default_sort(key, order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    Superadmin,
    Staff,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Superadmin => "Superadmin",
            AdminRole::Staff => "Staff",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    #[serde(rename = "tokenVersion", default)]
    pub token_version: u32,
    pub created_at: String,
    pub updated_at: String,
}

field_keys!("admins", AdminField {
    Id => ("id", Text),
    Name => ("name", Text),
    Username => ("username", Text),
    Email => ("email", Text),
    Profile => ("profile", Text),
    Phone => ("phone", Text),
    Role => ("role", Text),
    TokenVersion => ("tokenVersion", Number),
    CreatedAt => ("created_at", Date),
    UpdatedAt => ("updated_at", Date),
});

impl Record<AdminField> for Admin {
    fn field(&self, key: &AdminField) -> FieldValue<'_> {
        match key {
            AdminField::Id => (&self.id).into(),
            AdminField::Name => (&self.name).into(),
            AdminField::Username => (&self.username).into(),
            AdminField::Email => self.email.as_ref().into(),
            AdminField::Profile => self.profile.as_ref().into(),
            AdminField::Phone => self.phone.as_ref().into(),
            AdminField::Role => self.role.map(|role| role.as_str()).into(),
            AdminField::TokenVersion => self.token_version.into(),
            AdminField::CreatedAt => (&self.created_at).into(),
            AdminField::UpdatedAt => (&self.updated_at).into(),
        }
    }
}

impl ListView for Admin {
    type Field = AdminField;

    const NAME: &'static str = "admins";
    const SEARCHABLE: &'static [AdminField] = &[AdminField::Name, AdminField::Phone, AdminField::Role];
    const DEFAULT_SORT: (AdminField, SortOrder) = (AdminField::Name, SortOrder::Desc);
    const COLUMNS: &'static [AdminField] = &[
        AdminField::Name,
        AdminField::Username,
        AdminField::Role,
        AdminField::Phone,
        AdminField::CreatedAt,
        AdminField::UpdatedAt,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published_at: String,
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

field_keys!("articles", ArticleField {
    Id => ("id", Text),
    Title => ("title", Text),
    Slug => ("slug", Text),
    Content => ("content", Html),
    PublishedAt => ("published_at", Date),
    ImageUrl => ("image_url", Text),
    CreatedAt => ("created_at", Date),
    UpdatedAt => ("updated_at", Date),
});

impl Record<ArticleField> for Article {
    fn field(&self, key: &ArticleField) -> FieldValue<'_> {
        match key {
            ArticleField::Id => (&self.id).into(),
            ArticleField::Title => (&self.title).into(),
            ArticleField::Slug => (&self.slug).into(),
            ArticleField::Content => (&self.content).into(),
            ArticleField::PublishedAt => (&self.published_at).into(),
            ArticleField::ImageUrl => (&self.image_url).into(),
            ArticleField::CreatedAt => (&self.created_at).into(),
            ArticleField::UpdatedAt => (&self.updated_at).into(),
        }
    }
}

impl ListView for Article {
    type Field = ArticleField;

    const NAME: &'static str = "articles";
    const SEARCHABLE: &'static [ArticleField] = &[ArticleField::Title, ArticleField::Content];
    const DEFAULT_SORT: (ArticleField, SortOrder) = (ArticleField::Title, SortOrder::Desc);
    const COLUMNS: &'static [ArticleField] = &[
        ArticleField::Title,
        ArticleField::Content,
        ArticleField::PublishedAt,
        ArticleField::UpdatedAt,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

field_keys!("categories", CategoryField {
    Id => ("id", Text),
    Name => ("name", Text),
    Slug => ("slug", Text),
    ImageUrl => ("image_url", Text),
    CreatedAt => ("created_at", Date),
    UpdatedAt => ("updated_at", Date),
});

impl Record<CategoryField> for Category {
    fn field(&self, key: &CategoryField) -> FieldValue<'_> {
        match key {
            CategoryField::Id => (&self.id).into(),
            CategoryField::Name => (&self.name).into(),
            CategoryField::Slug => (&self.slug).into(),
            CategoryField::ImageUrl => (&self.image_url).into(),
            CategoryField::CreatedAt => (&self.created_at).into(),
            CategoryField::UpdatedAt => (&self.updated_at).into(),
        }
    }
}

impl ListView for Category {
    type Field = CategoryField;

    const NAME: &'static str = "categories";
    const SEARCHABLE: &'static [CategoryField] = &[CategoryField::Name];
    const DEFAULT_SORT: (CategoryField, SortOrder) = (CategoryField::Name, SortOrder::Desc);
    const COLUMNS: &'static [CategoryField] = &[
        CategoryField::Name,
        CategoryField::Slug,
        CategoryField::CreatedAt,
        CategoryField::UpdatedAt,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub desc: String,
    pub author: String,
    pub publisher: String,
    pub published_at: String,
    pub language: String,
    pub page: u32,
    pub length: f64,
    pub width: f64,
    pub weight: f64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

field_keys!("books", BookField {
    Id => ("id", Text),
    Name => ("name", Text),
    Slug => ("slug", Text),
    Desc => ("desc", Html),
    Author => ("author", Text),
    Publisher => ("publisher", Text),
    PublishedAt => ("published_at", Date),
    Language => ("language", Text),
    Page => ("page", Number),
    Length => ("length", Number),
    Width => ("width", Number),
    Weight => ("weight", Number),
    Price => ("price", Currency),
    DiscountPrice => ("discount_price", Currency),
    Qty => ("qty", Number),
    CategoryId => ("categoryId", Text),
    ImageUrl => ("image_url", Text),
    CreatedAt => ("created_at", Date),
    UpdatedAt => ("updated_at", Date),
});

impl Record<BookField> for Book {
    fn field(&self, key: &BookField) -> FieldValue<'_> {
        match key {
            BookField::Id => (&self.id).into(),
            BookField::Name => (&self.name).into(),
            BookField::Slug => (&self.slug).into(),
            BookField::Desc => (&self.desc).into(),
            BookField::Author => (&self.author).into(),
            BookField::Publisher => (&self.publisher).into(),
            BookField::PublishedAt => (&self.published_at).into(),
            BookField::Language => (&self.language).into(),
            BookField::Page => self.page.into(),
            BookField::Length => self.length.into(),
            BookField::Width => self.width.into(),
            BookField::Weight => self.weight.into(),
            BookField::Price => self.price.into(),
            BookField::DiscountPrice => self.discount_price.into(),
            BookField::Qty => self.qty.into(),
            BookField::CategoryId => (&self.category_id).into(),
            BookField::ImageUrl => (&self.image_url).into(),
            BookField::CreatedAt => (&self.created_at).into(),
            BookField::UpdatedAt => (&self.updated_at).into(),
        }
    }
}

impl ListView for Book {
    type Field = BookField;

    const NAME: &'static str = "books";
    const SEARCHABLE: &'static [BookField] = &[
        BookField::Name,
        BookField::Desc,
        BookField::Author,
        BookField::Publisher,
    ];
    const DEFAULT_SORT: (BookField, SortOrder) = (BookField::Name, SortOrder::Desc);
    const COLUMNS: &'static [BookField] = &[
        BookField::Name,
        BookField::Author,
        BookField::Publisher,
        BookField::Qty,
        BookField::PublishedAt,
        BookField::UpdatedAt,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookImage {
    pub id: String,
    pub title: String,
    #[serde(rename = "bookId")]
    pub book_id: String,
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

field_keys!("book-images", BookImageField {
    Id => ("id", Text),
    Title => ("title", Text),
    BookId => ("bookId", Text),
    ImageUrl => ("image_url", Text),
    CreatedAt => ("created_at", Date),
    UpdatedAt => ("updated_at", Date),
});

impl Record<BookImageField> for BookImage {
    fn field(&self, key: &BookImageField) -> FieldValue<'_> {
        match key {
            BookImageField::Id => (&self.id).into(),
            BookImageField::Title => (&self.title).into(),
            BookImageField::BookId => (&self.book_id).into(),
            BookImageField::ImageUrl => (&self.image_url).into(),
            BookImageField::CreatedAt => (&self.created_at).into(),
            BookImageField::UpdatedAt => (&self.updated_at).into(),
        }
    }
}

impl ListView for BookImage {
    type Field = BookImageField;

    const NAME: &'static str = "book-images";
    const SEARCHABLE: &'static [BookImageField] = &[BookImageField::Title];
    const DEFAULT_SORT: (BookImageField, SortOrder) = (BookImageField::Title, SortOrder::Desc);
    const COLUMNS: &'static [BookImageField] = &[
        BookImageField::Title,
        BookImageField::CreatedAt,
        BookImageField::UpdatedAt,
    ];
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

/// One page of records as delivered by a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    #[serde(default = "Vec::new", alias = "items")]
    pub data: Vec<T>,

    /// Total records across all server pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl<T> ListPage<T> {
    pub fn from_items(data: Vec<T>) -> Self {
        Self {
            data,
            total: None,
            page: default_page(),
            limit: default_limit(),
        }
    }

    /// Server-side total, falling back to the records on this page.
    pub fn total(&self) -> usize {
        self.total.unwrap_or(self.data.len())
    }

    /// True when the records are one slice of a larger server result.
    pub fn is_server_paged(&self) -> bool {
        self.total() > self.data.len()
    }
}

/// Response envelope of the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub data: T,
}

fn default_success() -> bool {
    true
}

// Null object members are dropped so they fall back to the field defaults.
fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

/// Read a list page from any of the shapes a list endpoint or an export
/// can take: a bare array, a page object, or a page inside the response
/// envelope.
///
/// Record fields that are missing or null load as their empty value, so a
/// sparse record never rejects the page.
pub fn parse_list_page<T>(mut value: Value) -> Result<ListPage<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    drop_nulls(&mut value);

    if value.is_array() {
        return serde_json::from_value::<Vec<T>>(value).map(ListPage::from_items);
    }

    if value.get("data").is_some_and(Value::is_object) {
        return serde_json::from_value::<ApiResponse<ListPage<T>>>(value)
            .map(|envelope| envelope.data);
    }

    serde_json::from_value::<ListPage<T>>(value)
}
