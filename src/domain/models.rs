// Catalog records as served by the books API

use serde::{Deserialize, Serialize};

/// One catalog entry. Wire format is camelCase JSON; identity is `id` and a
/// record never changes once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(
        deserialize_with = "crate::domain::models::de::opt_i64_from_str_or_num",
        default
    )]
    pub year: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(
        deserialize_with = "crate::domain::models::de::opt_i64_from_str_or_num",
        default
    )]
    pub pages: Option<i64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
}

/// Internal serde helpers
pub mod de {
    use serde::{Deserialize, Deserializer};

    /// Accept Option<i64> from either a number or a string like "1869"; null/"" -> None.
    pub fn opt_i64_from_str_or_num<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumOrStr<'a> {
            Num(i64),
            Str(&'a str),
        }

        let val: Option<NumOrStr> = Option::deserialize(deserializer)?;
        Ok(match val {
            None => None,
            Some(NumOrStr::Num(n)) => Some(n),
            Some(NumOrStr::Str(s)) => s.trim().parse::<i64>().ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_deserialize_full_record() {
        let json = r#"{
            "id": 1,
            "title": "Things Fall Apart",
            "author": "Chinua Achebe",
            "country": "Nigeria",
            "imageLink": "images/things-fall-apart.jpg",
            "language": "English",
            "pages": 209,
            "year": 1958
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.title, "Things Fall Apart");
        assert_eq!(book.author.as_deref(), Some("Chinua Achebe"));
        assert_eq!(book.year, Some(1958));
        assert_eq!(book.pages, Some(209));
        assert_eq!(
            book.image_link.as_deref(),
            Some("images/things-fall-apart.jpg")
        );
    }

    #[test]
    fn book_deserialize_year_from_string_and_negative() {
        // The upstream dataset mixes numbers and numeric strings, and ancient
        // works carry negative years.
        let json = r#"{ "id": 2, "title": "The Iliad", "year": "-762", "pages": "208" }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.year, Some(-762));
        assert_eq!(book.pages, Some(208));

        let json = r#"{ "id": 3, "title": "Untitled", "year": "", "pages": null }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.year, None);
        assert_eq!(book.pages, None);
    }

    #[test]
    fn book_deserialize_missing_optionals() {
        let json = r#"{ "id": 9, "title": "Bare" }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.author, None);
        assert_eq!(book.country, None);
        assert_eq!(book.language, None);
        assert_eq!(book.image_link, None);
    }

    #[test]
    fn book_serialize_uses_wire_names() {
        let book = Book {
            id: 4,
            title: "Fairy tales".to_string(),
            author: Some("Hans Christian Andersen".to_string()),
            year: Some(1836),
            country: Some("Denmark".to_string()),
            pages: Some(784),
            language: Some("Danish".to_string()),
            image_link: Some("images/fairy-tales.jpg".to_string()),
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["imageLink"], "images/fairy-tales.jpg");
        assert_eq!(json["year"], 1836);
    }
}
