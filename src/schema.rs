//! Output schema
//!
//! The known field names of a flattened article. The list is static; live
//! records may carry only some of these fields, or extra ones if the API
//! grows new fields.

/// Field names of a flattened article, in output order
pub const ARTICLE_SCHEMA: [&str; 20] = [
    "web_url",
    "snippet",
    "lead_paragraph",
    "abstract",
    "print_section",
    "print_page",
    "source",
    "multimedia",
    "headline.main",
    "keywords.value",
    "pub_date",
    "document_type",
    "news_desk",
    "section_name",
    "subsection_name",
    "byline.original",
    "type_of_material",
    "_id",
    "word_count",
    "uri",
];

/// Return the schema of the article stream
pub fn get_schema() -> &'static [&'static str] {
    &ARTICLE_SCHEMA
}
