use crate::db::{AuthorCreate, BookCreate};
use crate::error::CatalogError;
use crate::views::{AuthorFormValues, BookFormValues};
use chrono::NaiveDate;
use serde::Deserialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw `POST /add_author` body. Blank fields count as missing.
#[derive(Debug, Default, Deserialize)]
pub struct AddAuthorForm {
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub date_of_death: Option<String>,
}

impl AddAuthorForm {
    pub fn values(&self) -> AuthorFormValues {
        AuthorFormValues {
            name: trimmed(self.name.as_deref()).to_string(),
            birthdate: trimmed(self.birthdate.as_deref()).to_string(),
            date_of_death: trimmed(self.date_of_death.as_deref()).to_string(),
        }
    }

    pub fn parse(&self) -> Result<AuthorCreate, CatalogError> {
        let name = trimmed(self.name.as_deref());
        let birthdate = trimmed(self.birthdate.as_deref());
        if name.is_empty() || birthdate.is_empty() {
            return Err(CatalogError::Validation(
                "Name and birthdate are required!".to_string(),
            ));
        }

        let birth_date = parse_date(birthdate, "birthdate")?;
        let date_of_death = match trimmed(self.date_of_death.as_deref()) {
            "" => None,
            s => Some(parse_date(s, "date of death")?),
        };

        Ok(AuthorCreate {
            name: name.to_string(),
            birth_date,
            date_of_death,
        })
    }
}

/// Raw `POST /add_book` body. Every field is required.
#[derive(Debug, Default, Deserialize)]
pub struct AddBookForm {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub publication_year: Option<String>,
    pub author_id: Option<String>,
}

impl AddBookForm {
    pub fn values(&self) -> BookFormValues {
        BookFormValues {
            isbn: trimmed(self.isbn.as_deref()).to_string(),
            title: trimmed(self.title.as_deref()).to_string(),
            publication_year: trimmed(self.publication_year.as_deref()).to_string(),
            author_id: trimmed(self.author_id.as_deref()).parse().ok(),
        }
    }

    pub fn parse(&self) -> Result<BookCreate, CatalogError> {
        let isbn = trimmed(self.isbn.as_deref());
        let title = trimmed(self.title.as_deref());
        let year = trimmed(self.publication_year.as_deref());
        let author_id = trimmed(self.author_id.as_deref());
        if [isbn, title, year, author_id].iter().any(|s| s.is_empty()) {
            return Err(CatalogError::Validation(
                "All fields are required!".to_string(),
            ));
        }

        let publication_year = year.parse::<i32>().map_err(|_| {
            CatalogError::Validation(format!(
                "Publication year must be a whole number, got '{year}'."
            ))
        })?;
        let author_id = author_id.parse::<i64>().map_err(|_| {
            CatalogError::Validation(format!("Author id must be a whole number, got '{author_id}'."))
        })?;

        Ok(BookCreate {
            isbn: isbn.to_string(),
            title: title.to_string(),
            publication_year,
            author_id,
        })
    }
}

fn trimmed(value: Option<&str>) -> &str {
    value.map_or("", str::trim)
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, CatalogError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CatalogError::Validation(format!(
            "Invalid {field} '{value}': expected YYYY-MM-DD."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str, birth: &str, death: &str) -> AddAuthorForm {
        AddAuthorForm {
            name: Some(name.to_string()),
            birthdate: Some(birth.to_string()),
            date_of_death: Some(death.to_string()),
        }
    }

    #[test]
    fn author_with_only_required_fields_parses() {
        let create = author(" Jane Doe ", "1970-01-01", "").parse().expect("valid");
        assert_eq!(create.name, "Jane Doe");
        assert_eq!(create.birth_date, NaiveDate::from_ymd_opt(1970, 1, 1).expect("date"));
        assert_eq!(create.date_of_death, None);
    }

    #[test]
    fn author_missing_name_or_birthdate_is_rejected() {
        for form in [
            author("", "1970-01-01", ""),
            author("   ", "1970-01-01", ""),
            author("Jane", "", ""),
            AddAuthorForm::default(),
        ] {
            let err = form.parse().expect_err("missing field");
            assert_eq!(err.to_string(), "Name and birthdate are required!");
        }
    }

    #[test]
    fn author_dates_must_be_iso() {
        let err = author("Jane", "01/01/1970", "").parse().expect_err("bad birthdate");
        assert!(matches!(err, CatalogError::Validation(ref m) if m.contains("birthdate")));

        let err = author("Jane", "1970-01-01", "2020-13-01")
            .parse()
            .expect_err("bad death date");
        assert!(matches!(err, CatalogError::Validation(ref m) if m.contains("date of death")));
    }

    fn book(isbn: &str, title: &str, year: &str, author_id: &str) -> AddBookForm {
        AddBookForm {
            isbn: Some(isbn.to_string()),
            title: Some(title.to_string()),
            publication_year: Some(year.to_string()),
            author_id: Some(author_id.to_string()),
        }
    }

    #[test]
    fn book_fields_are_all_required() {
        let err = book("111", "", "2000", "1").parse().expect_err("missing title");
        assert_eq!(err.to_string(), "All fields are required!");
        let err = AddBookForm::default().parse().expect_err("empty form");
        assert_eq!(err.to_string(), "All fields are required!");
    }

    #[test]
    fn book_numbers_must_be_integers() {
        let err = book("111", "X", "two thousand", "1")
            .parse()
            .expect_err("bad year");
        assert!(matches!(err, CatalogError::Validation(ref m) if m.contains("Publication year")));

        let err = book("111", "X", "2000", "jane").parse().expect_err("bad author");
        assert!(matches!(err, CatalogError::Validation(ref m) if m.contains("Author id")));
    }

    #[test]
    fn book_values_keep_selected_author() {
        let form = book("111", "X", "2000", "7");
        assert_eq!(form.values().author_id, Some(7));
        assert_eq!(book("111", "X", "2000", "x").values().author_id, None);

        let create = form.parse().expect("valid");
        assert_eq!(create.publication_year, 2000);
        assert_eq!(create.author_id, 7);
    }
}
