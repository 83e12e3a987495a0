//! Harvested record types and their export row layouts

/// Leading product columns, before the description labels
pub const PRODUCT_LEADING_COLUMNS: &[&str] = &["name", "article"];

/// Trailing product columns, after the description labels
pub const PRODUCT_TRAILING_COLUMNS: &[&str] = &["availability", "price", "old_price", "url"];

/// Leading listing columns, before the description labels
pub const LISTING_LEADING_COLUMNS: &[&str] = &["name"];

/// Trailing listing columns, after the description labels
pub const LISTING_TRAILING_COLUMNS: &[&str] = &["price"];

/// One `label: value` description entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub label: String,
    pub value: String,
}

impl Attribute {
    /// Splits an entry on its first `:`
    ///
    /// An entry without a separator keeps its whole text as the value and
    /// gets an empty label.
    ///
    /// # Examples
    ///
    /// ```
    /// use shop_harvest::Attribute;
    ///
    /// let attribute = Attribute::parse("Бренд: CASIO");
    /// assert_eq!(attribute.label, "Бренд");
    /// assert_eq!(attribute.value, "CASIO");
    ///
    /// let bare = Attribute::parse("waterproof");
    /// assert_eq!(bare.label, "");
    /// assert_eq!(bare.value, "waterproof");
    /// ```
    pub fn parse(entry: &str) -> Self {
        match entry.split_once(':') {
            Some((label, value)) => Self {
                label: label.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => Self {
                label: String::new(),
                value: entry.trim().to_string(),
            },
        }
    }
}

/// Strips a leading `label:` from a field such as `Артикул: 80244813`
pub fn strip_label(text: &str) -> String {
    Attribute::parse(text).value
}

/// One product card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub article: String,
    pub description: Vec<Attribute>,
    pub availability: String,
    pub price: String,
    pub old_price: String,
    pub url: String,
}

impl ProductRecord {
    /// Header row for the given description labels
    pub fn header(labels: &[String]) -> Vec<String> {
        build_header(PRODUCT_LEADING_COLUMNS, labels, PRODUCT_TRAILING_COLUMNS)
    }

    /// Row with one description cell per label, in label order
    pub fn to_row(&self, labels: &[String]) -> Vec<String> {
        let mut row = vec![self.name.clone(), self.article.clone()];
        row.extend(values_for(&self.description, labels));
        row.extend([
            self.availability.clone(),
            self.price.clone(),
            self.old_price.clone(),
            self.url.clone(),
        ]);
        row
    }
}

/// One product summary on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub name: String,
    pub description: Vec<Attribute>,
    pub price: String,
}

impl ListingRecord {
    /// Header row for the given description labels
    pub fn header(labels: &[String]) -> Vec<String> {
        build_header(LISTING_LEADING_COLUMNS, labels, LISTING_TRAILING_COLUMNS)
    }

    /// Row with one description cell per label, in label order
    pub fn to_row(&self, labels: &[String]) -> Vec<String> {
        let mut row = vec![self.name.clone()];
        row.extend(values_for(&self.description, labels));
        row.push(self.price.clone());
        row
    }
}

/// Union of description labels across records, in first-seen order
///
/// A label repeated within one description gets one column per repeat, so
/// the column list holds each label as many times as the record repeating
/// it most.
pub fn collect_labels<'a, I>(descriptions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [Attribute]>,
{
    let mut labels: Vec<String> = Vec::new();

    for description in descriptions {
        for (index, attribute) in description.iter().enumerate() {
            let occurrence = occurrences(&description[..index], &attribute.label);
            let columns = labels.iter().filter(|l| **l == attribute.label).count();
            if columns <= occurrence {
                labels.push(attribute.label.clone());
            }
        }
    }

    labels
}

fn occurrences(description: &[Attribute], label: &str) -> usize {
    description.iter().filter(|a| a.label == label).count()
}

fn build_header(leading: &[&str], labels: &[String], trailing: &[&str]) -> Vec<String> {
    leading
        .iter()
        .map(|c| c.to_string())
        .chain(labels.iter().cloned())
        .chain(trailing.iter().map(|c| c.to_string()))
        .collect()
}

/// The value under each label column, or an empty cell when the record lacks it
///
/// The n-th column carrying a label takes the record's n-th entry with that
/// label.
fn values_for<'a>(
    description: &'a [Attribute],
    labels: &'a [String],
) -> impl Iterator<Item = String> + 'a {
    labels.iter().enumerate().map(move |(column, label)| {
        let occurrence = labels[..column].iter().filter(|l| *l == label).count();
        description
            .iter()
            .filter(|attribute| attribute.label == *label)
            .nth(occurrence)
            .map(|attribute| attribute.value.clone())
            .unwrap_or_default()
    })
}
