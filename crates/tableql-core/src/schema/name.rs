use heck::{ToLowerCamelCase, ToSnakeCase};

/// An identifier split into words, used to derive API names from table names.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let parts = src
            .to_snake_case()
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// `book_author` becomes `bookAuthor`.
    pub fn camel_case(&self) -> String {
        self.snake_case().to_lower_camel_case()
    }

    /// Plural of the camel-cased name: `bookAuthor` becomes `bookAuthors`.
    pub fn plural(&self) -> String {
        pluralizer::pluralize(&self.camel_case(), 2, false)
    }

    /// Singular of the plural form, so `people` and `person` both give `person`.
    pub fn singular(&self) -> String {
        pluralizer::pluralize(&self.plural(), 1, false)
    }
}
