use super::super::domain::ListingField;
use super::super::text::strip_invisible;

/// schema.org property names accepted as bare headers.
const PROPERTY_ALIASES: [(&str, ListingField); 4] = [
    ("addressLocality", ListingField::Locality),
    ("addressRegion", ListingField::Region),
    ("unitText", ListingField::WageUnit),
    ("minValue", ListingField::WageLowerBound),
];

pub(crate) fn field_for_header(header: &str) -> Option<ListingField> {
    let cleaned = strip_invisible(header);
    ListingField::ordered()
        .into_iter()
        .find(|field| field.header() == cleaned)
        .or_else(|| {
            PROPERTY_ALIASES
                .iter()
                .find(|(alias, _)| *alias == cleaned)
                .map(|(_, field)| *field)
        })
}

/// Column index per field; the first matching column wins when a header repeats.
pub(crate) fn column_map(headers: &[String]) -> Vec<(ListingField, usize)> {
    let mut mapped: Vec<(ListingField, usize)> = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if let Some(field) = field_for_header(header) {
            if mapped.iter().all(|(existing, _)| *existing != field) {
                mapped.push((field, index));
            }
        }
    }
    mapped
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(header: &str) -> Option<ListingField> {
    field_for_header(header)
}
