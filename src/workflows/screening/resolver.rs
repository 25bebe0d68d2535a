use super::domain::{JobListing, ListingField};
use super::regions;
use super::wage_table::RegionWageTable;

/// Free-text fields scanned for a region name, in priority order.
pub const REGION_SEARCH_FIELDS: [ListingField; 4] = [
    ListingField::WorkAddress,
    ListingField::Locality,
    ListingField::JobTitle,
    ListingField::EmployerName,
];

/// Region applicable to a listing plus how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegion {
    pub region: Option<&'static str>,
    pub provenance: String,
}

pub fn resolve_region(listing: &JobListing, table: &RegionWageTable) -> ResolvedRegion {
    let explicit = listing.text(ListingField::Region);
    if let Some(region) = regions::canonical(explicit).filter(|region| table.contains(region)) {
        return ResolvedRegion {
            region: Some(region),
            provenance: "explicit region field used".to_string(),
        };
    }

    for (index, field) in REGION_SEARCH_FIELDS.into_iter().enumerate() {
        let text = listing.text(field);
        if text.is_empty() {
            continue;
        }

        if let Some(region) = regions::find_region(text).filter(|region| table.contains(region)) {
            return ResolvedRegion {
                region: Some(region),
                provenance: format!(
                    "region extracted from text #{} ({})",
                    index + 1,
                    field.label()
                ),
            };
        }
    }

    ResolvedRegion {
        region: None,
        provenance: "region unresolved".to_string(),
    }
}
